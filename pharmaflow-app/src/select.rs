use anyhow::{bail, Context, Result};
use pharmaflow_core::aggregate::{self, CategoryStats};
use pharmaflow_core::catalog::ProcessCatalog;
use pharmaflow_schemas::process::ProcessDefinition;

/// Resolves command-line selectors of the form "category/product" against
/// the catalog, keeping selection order and dropping duplicate picks.
/// "category/*" expands to every product in that category.
pub fn resolve_selectors<'a>(
    catalog: &'a ProcessCatalog,
    selectors: &[String],
) -> Result<Vec<&'a ProcessDefinition>> {
    let mut selected: Vec<&ProcessDefinition> = Vec::new();

    for selector in selectors {
        let (category, product) = selector.split_once('/').with_context(|| {
            format!("Selector '{selector}' is not of the form category/product")
        })?;

        if product == "*" {
            let products = catalog.products(category);
            if products.is_empty() {
                bail!("Unknown category '{category}'");
            }
            for definition in products {
                push_unique(&mut selected, definition);
            }
        } else {
            let definition = catalog
                .get_process(category, product)
                .with_context(|| format!("No process '{product}' in category '{category}'"))?;
            push_unique(&mut selected, definition);
        }
    }

    Ok(selected)
}

fn push_unique<'a>(selected: &mut Vec<&'a ProcessDefinition>, definition: &'a ProcessDefinition) {
    let already_there = selected
        .iter()
        .any(|known| known.category == definition.category && known.name == definition.name);
    if !already_there {
        selected.push(definition);
    }
}

/// Category statistics ordered the way the catalog lists its categories.
pub fn category_stats_in_catalog_order(catalog: &ProcessCatalog) -> Vec<(String, CategoryStats)> {
    let mut stats = aggregate::group_by_category(catalog.definitions());
    catalog
        .list_categories()
        .iter()
        .filter_map(|category| stats.remove(category).map(|entry| (category.clone(), entry)))
        .collect()
}
