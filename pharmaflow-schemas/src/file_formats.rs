use crate::process::ProcessDefinition;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub schema_version: String,
    pub categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub products: Vec<ProcessDefinition>,
}
