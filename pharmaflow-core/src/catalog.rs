use crate::error::PharmaflowError;
use pharmaflow_schemas::file_formats::CatalogFile;
use pharmaflow_schemas::process::{ProcessDefinition, Temperature};
use std::collections::HashMap;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.yaml");

/// A read-only registry of manufacturing processes, grouped by dosage-form
/// category. Categories and the products within them keep the order of the
/// source document.
#[derive(Debug)]
pub struct ProcessCatalog {
    category_order: Vec<String>,
    products_by_category: HashMap<String, Vec<ProcessDefinition>>,
}

impl ProcessCatalog {
    /// Loads the catalog document compiled into this crate.
    pub fn builtin() -> Result<Self, PharmaflowError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Parses and validates a catalog from a YAML document. Any structural
    /// defect fails the whole load; a partially usable catalog is never
    /// handed back.
    pub fn from_yaml_str(document: &str) -> Result<Self, PharmaflowError> {
        let file: CatalogFile = serde_yaml::from_str(document)?;
        Self::from_catalog_file(file)
    }

    fn from_catalog_file(file: CatalogFile) -> Result<Self, PharmaflowError> {
        if file.schema_version.trim().is_empty() {
            return Err(PharmaflowError::MissingSchemaVersion);
        }

        let mut category_order: Vec<String> = Vec::with_capacity(file.categories.len());
        let mut products_by_category: HashMap<String, Vec<ProcessDefinition>> = HashMap::new();

        for entry in file.categories {
            if entry.name.trim().is_empty() {
                return Err(PharmaflowError::UnnamedCategory);
            }
            if products_by_category.contains_key(&entry.name) {
                return Err(PharmaflowError::DuplicateCategory(entry.name));
            }
            if entry.products.is_empty() {
                return Err(PharmaflowError::EmptyCategory(entry.name));
            }

            let mut products: Vec<ProcessDefinition> = Vec::with_capacity(entry.products.len());
            for mut definition in entry.products {
                if definition.name.trim().is_empty() {
                    return Err(PharmaflowError::UnnamedProduct {
                        category: entry.name,
                    });
                }
                if products.iter().any(|known| known.name == definition.name) {
                    return Err(PharmaflowError::DuplicateProduct {
                        category: entry.name,
                        product: definition.name,
                    });
                }
                definition.category = entry.name.clone();
                validate_definition(&definition)?;
                products.push(definition);
            }

            category_order.push(entry.name.clone());
            products_by_category.insert(entry.name, products);
        }

        Ok(Self {
            category_order,
            products_by_category,
        })
    }

    /// Category names in catalog order.
    pub fn list_categories(&self) -> &[String] {
        &self.category_order
    }

    /// Product names within one category, in catalog order. Unknown
    /// categories yield an empty list.
    pub fn list_products(&self, category: &str) -> Vec<&str> {
        self.products_by_category
            .get(category)
            .map(|products| products.iter().map(|p| p.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Full definitions within one category, in catalog order.
    pub fn products(&self, category: &str) -> &[ProcessDefinition] {
        self.products_by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Exact-match lookup of a single process.
    pub fn get_process(&self, category: &str, product: &str) -> Option<&ProcessDefinition> {
        self.products_by_category
            .get(category)?
            .iter()
            .find(|definition| definition.name == product)
    }

    /// Every definition in the catalog, in catalog order.
    pub fn definitions(&self) -> impl Iterator<Item = &ProcessDefinition> + '_ {
        self.category_order
            .iter()
            .filter_map(move |category| self.products_by_category.get(category))
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.products_by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.products_by_category.is_empty()
    }
}

fn validate_definition(definition: &ProcessDefinition) -> Result<(), PharmaflowError> {
    if definition.steps.is_empty() {
        return Err(PharmaflowError::EmptySteps(definition.name.clone()));
    }

    let mut seen_steps: Vec<&str> = Vec::with_capacity(definition.steps.len());
    for (index, step) in definition.steps.iter().enumerate() {
        if step.name.trim().is_empty() {
            return Err(PharmaflowError::UnnamedStep {
                product: definition.name.clone(),
                index,
            });
        }
        if seen_steps.contains(&step.name.as_str()) {
            return Err(PharmaflowError::DuplicateStep {
                product: definition.name.clone(),
                step: step.name.clone(),
            });
        }
        seen_steps.push(&step.name);

        if let Some(duration) = &step.duration {
            if !duration.value.is_finite() || duration.value < 0.0 {
                return Err(PharmaflowError::InvalidDuration {
                    product: definition.name.clone(),
                    step: step.name.clone(),
                    value: duration.value,
                });
            }
        }

        if let Temperature::Range {
            min_celsius,
            max_celsius,
        } = step.temperature
        {
            if min_celsius > max_celsius {
                return Err(PharmaflowError::InvalidTemperatureRange {
                    product: definition.name.clone(),
                    step: step.name.clone(),
                    min: min_celsius,
                    max: max_celsius,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_CATALOG: &str = r#"
schema_version: "1.0"
categories:
  - name: solids
    products:
      - name: tablet
        description: Compressed oral dosage form.
        key_features: [accurate dosing]
        steps:
          - name: blending
            critical_parameters: [blending time]
            equipment: [mixing machine]
            duration: {value: 2, unit: hours}
            temperature: {type: ambient}
          - name: compression
            critical_parameters: [pressure]
            equipment: [tablet press]
            duration: {value: 4, unit: hours}
            temperature: {type: ambient}
      - name: capsule
        description: Encapsulated dosage form.
        steps:
          - name: filling
            equipment: [capsule filling machine]
            duration: {value: 1, unit: days}
            temperature: {type: ambient}
  - name: liquids
    products:
      - name: syrup
        description: Sweetened oral liquid.
        steps:
          - name: compounding
            temperature: {type: fixed, celsius: 25}
"#;

    #[test]
    fn preserves_category_and_product_order() {
        let catalog = ProcessCatalog::from_yaml_str(SMALL_CATALOG).unwrap();
        assert_eq!(catalog.list_categories(), ["solids", "liquids"]);
        assert_eq!(catalog.list_products("solids"), ["tablet", "capsule"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn stamps_category_onto_definitions() {
        let catalog = ProcessCatalog::from_yaml_str(SMALL_CATALOG).unwrap();
        let tablet = catalog.get_process("solids", "tablet").unwrap();
        assert_eq!(tablet.category, "solids");
        assert!(catalog.definitions().all(|d| !d.category.is_empty()));
    }

    #[test]
    fn absence_is_an_empty_result_not_an_error() {
        let catalog = ProcessCatalog::from_yaml_str(SMALL_CATALOG).unwrap();
        assert!(catalog.list_products("no-such-category").is_empty());
        assert!(catalog.products("no-such-category").is_empty());
        assert!(catalog.get_process("solids", "no-such-product").is_none());
        assert!(catalog.get_process("no-such-category", "tablet").is_none());
    }

    #[test]
    fn lookup_is_exact_match_only() {
        let catalog = ProcessCatalog::from_yaml_str(SMALL_CATALOG).unwrap();
        assert!(catalog.get_process("solids", "Tablet").is_none());
        assert!(catalog.get_process("solids", "tab").is_none());
    }

    #[test]
    fn rejects_empty_schema_version() {
        let document = SMALL_CATALOG.replace("schema_version: \"1.0\"", "schema_version: \"\"");
        let err = ProcessCatalog::from_yaml_str(&document).unwrap_err();
        assert!(matches!(err, PharmaflowError::MissingSchemaVersion));
    }

    #[test]
    fn rejects_duplicate_products_within_a_category() {
        let document = SMALL_CATALOG.replace("name: capsule", "name: tablet");
        let err = ProcessCatalog::from_yaml_str(&document).unwrap_err();
        assert!(matches!(err, PharmaflowError::DuplicateProduct { .. }));
    }

    #[test]
    fn rejects_duplicate_step_names_within_a_product() {
        let document = SMALL_CATALOG.replace("name: compression", "name: blending");
        let err = ProcessCatalog::from_yaml_str(&document).unwrap_err();
        assert!(matches!(err, PharmaflowError::DuplicateStep { .. }));
    }

    #[test]
    fn rejects_a_product_without_steps() {
        let document = r#"
schema_version: "1.0"
categories:
  - name: solids
    products:
      - name: tablet
        description: Compressed oral dosage form.
        steps: []
"#;
        let err = ProcessCatalog::from_yaml_str(document).unwrap_err();
        assert!(matches!(err, PharmaflowError::EmptySteps(product) if product == "tablet"));
    }

    #[test]
    fn rejects_negative_and_non_finite_durations() {
        let negative = SMALL_CATALOG.replace("{value: 2, unit: hours}", "{value: -2, unit: hours}");
        let err = ProcessCatalog::from_yaml_str(&negative).unwrap_err();
        assert!(matches!(err, PharmaflowError::InvalidDuration { .. }));

        let non_finite =
            SMALL_CATALOG.replace("{value: 2, unit: hours}", "{value: .nan, unit: hours}");
        let err = ProcessCatalog::from_yaml_str(&non_finite).unwrap_err();
        assert!(matches!(err, PharmaflowError::InvalidDuration { .. }));
    }

    #[test]
    fn rejects_an_inverted_temperature_range() {
        let document = SMALL_CATALOG.replace(
            "{type: fixed, celsius: 25}",
            "{type: range, min_celsius: 30, max_celsius: 20}",
        );
        let err = ProcessCatalog::from_yaml_str(&document).unwrap_err();
        assert!(matches!(
            err,
            PharmaflowError::InvalidTemperatureRange { .. }
        ));
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = ProcessCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());
    }
}
