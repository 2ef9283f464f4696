use thiserror::Error;

#[derive(Debug, Error)]
pub enum PharmaflowError {
    #[error("Catalog document has an empty schema_version")]
    MissingSchemaVersion,

    #[error("Catalog contains a category with an empty name")]
    UnnamedCategory,

    #[error("Duplicate category '{0}' in catalog")]
    DuplicateCategory(String),

    #[error("Category '{0}' defines no products")]
    EmptyCategory(String),

    #[error("Category '{category}' contains a product with an empty name")]
    UnnamedProduct { category: String },

    #[error("Duplicate product '{product}' in category '{category}'")]
    DuplicateProduct { category: String, product: String },

    #[error("Product '{0}' defines no steps")]
    EmptySteps(String),

    #[error("Step {index} of product '{product}' has an empty name")]
    UnnamedStep { product: String, index: usize },

    #[error("Duplicate step '{step}' in product '{product}'")]
    DuplicateStep { product: String, step: String },

    #[error("Step '{step}' of product '{product}' has an invalid duration value: {value}")]
    InvalidDuration {
        product: String,
        step: String,
        value: f64,
    },

    #[error(
        "Step '{step}' of product '{product}' has an inverted temperature range: {min} > {max}"
    )]
    InvalidTemperatureRange {
        product: String,
        step: String,
        min: f64,
        max: f64,
    },

    #[error("Failed to parse catalog YAML: {0}")]
    YamlParsing(#[from] serde_yaml::Error),
}
