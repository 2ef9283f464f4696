use pharmaflow_core::aggregate::{self, CategoryStats, Comparison, MAX_COMPARISON_PRODUCTS};
use pharmaflow_core::catalog::ProcessCatalog;
use pharmaflow_schemas::process::{DurationUnit, ProcessDefinition, StepDuration, Temperature};

pub fn format_duration(duration: &Option<StepDuration>) -> String {
    match duration {
        Some(StepDuration {
            value,
            unit: DurationUnit::Hours,
        }) => format!("{value} h"),
        Some(StepDuration {
            value,
            unit: DurationUnit::Days,
        }) => format!("{value} d"),
        None => "unknown".to_string(),
    }
}

pub fn format_temperature(temperature: &Temperature) -> String {
    match temperature {
        Temperature::Ambient => "ambient".to_string(),
        Temperature::Fixed { celsius } => format!("{celsius} °C"),
        Temperature::Range {
            min_celsius,
            max_celsius,
        } => format!("{min_celsius} to {max_celsius} °C"),
    }
}

/// Prints every category with the products it contains.
pub fn print_catalog(catalog: &ProcessCatalog) {
    println!("\n--- [Catalog] Categories and Products ---");
    for category in catalog.list_categories() {
        let products = catalog.list_products(category);
        println!("\n{} ({} products)", category, products.len());
        for product in products {
            println!("  - {product}");
        }
    }
}

/// Suggests valid names after a failed lookup.
pub fn print_category_hint(catalog: &ProcessCatalog, category: &str) {
    let products = catalog.list_products(category);
    if products.is_empty() {
        println!("Known categories: {}", catalog.list_categories().join(", "));
    } else {
        println!("Products in '{}': {}", category, products.join(", "));
    }
}

/// Full drill-down for one process: steps, summary metrics, and the
/// classified parameter and equipment views.
pub fn print_definition(definition: &ProcessDefinition) {
    println!("\n--- [Process] {} ({}) ---", definition.name, definition.category);
    println!("{}", definition.description);
    if !definition.key_features.is_empty() {
        println!("Key features: {}", definition.key_features.join(", "));
    }

    println!("\nSteps:");
    for (index, step) in definition.steps.iter().enumerate() {
        println!(
            "  {:>2}. {:<36} {:>9}  {:>14}",
            index + 1,
            step.name,
            format_duration(&step.duration),
            format_temperature(&step.temperature)
        );
        if !step.critical_parameters.is_empty() {
            println!("      parameters: {}", step.critical_parameters.join(", "));
        }
        if !step.equipment.is_empty() {
            println!("      equipment:  {}", step.equipment.join(", "));
        }
    }

    let summary = aggregate::summarize(definition);
    println!("\nSummary:");
    println!("  - Steps:               {:>7}", summary.step_count);
    println!("  - Critical parameters: {:>7}", summary.critical_parameter_count);
    println!("  - Distinct equipment:  {:>7}", summary.distinct_equipment_count);
    println!("  - Total duration:      {:>7.1} h", summary.total_duration_hours);

    println!("\nParameter analysis:");
    for record in aggregate::parameter_profile(definition) {
        println!(
            "  - {:<32} {:<26} {:<18} importance {}",
            record.parameter,
            record.step,
            record.class.to_string(),
            record.importance
        );
    }

    println!("\nParameter classes:");
    for (class, count) in aggregate::parameter_class_distribution(definition) {
        println!("  - {:<26} {:>3}", class.to_string(), count);
    }

    println!("\nEquipment by first use:");
    for record in aggregate::equipment_profile(definition) {
        println!(
            "  - {:<36} {:<26} x{}",
            record.equipment,
            record.class.to_string(),
            record.usage_count
        );
    }
}

/// Side-by-side table over the selected processes.
pub fn print_comparison(comparison: &Comparison) {
    println!("\n--- [Comparison] {} products ---", comparison.rows.len());
    if comparison.truncated {
        println!(
            "Note: selection exceeded {} products; the extra ones were dropped.",
            MAX_COMPARISON_PRODUCTS
        );
    }

    println!(
        "{:<22} {:<24} {:>6} {:>8} {:>10} {:>12}",
        "Product", "Category", "Steps", "Params", "Equipment", "Duration (h)"
    );
    for row in &comparison.rows {
        println!(
            "{:<22} {:<24} {:>6} {:>8} {:>10} {:>12.1}",
            row.product,
            row.category,
            row.step_count,
            row.critical_parameter_count,
            row.distinct_equipment_count,
            row.total_duration_hours
        );
    }
}

/// Per-category step statistics, in catalog order.
pub fn print_overview(ordered: &[(String, CategoryStats)]) {
    println!("\n--- [Overview] Step counts by category ---");
    println!(
        "{:<24} {:>9} {:>11} {:>10} {:>10}",
        "Category", "Products", "Mean steps", "Min steps", "Max steps"
    );
    for (category, stats) in ordered {
        println!(
            "{:<24} {:>9} {:>11.1} {:>10} {:>10}",
            category,
            stats.product_count,
            stats.mean_step_count,
            stats.min_step_count,
            stats.max_step_count
        );
    }
}
