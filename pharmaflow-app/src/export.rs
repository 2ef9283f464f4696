use crate::view;
use anyhow::{Context, Result};
use pharmaflow_core::aggregate::{self, CategoryStats, Comparison, ProcessSummary};
use pharmaflow_core::report::ReportWriter;
use pharmaflow_schemas::process::ProcessDefinition;
use serde::Serialize;
use std::fmt::Display;
use std::{fs, path::Path};

#[derive(Serialize)]
struct ClassCount {
    class: String,
    count: usize,
}

#[derive(Serialize)]
struct ShowManifest<'a> {
    category: &'a str,
    product: &'a str,
    summary: &'a ProcessSummary,
    parameter_classes: Vec<ClassCount>,
    equipment_classes: Vec<ClassCount>,
}

fn class_counts<C: Display>(distribution: Vec<(C, usize)>) -> Vec<ClassCount> {
    distribution
        .into_iter()
        .map(|(class, count)| ClassCount {
            class: class.to_string(),
            count,
        })
        .collect()
}

/// Writes the run artifacts for a single process drill-down: a copy of the
/// definition, the classified CSV profiles, a JSON summary, and a markdown
/// report.
pub fn export_show(output_dir: &str, definition: &ProcessDefinition) -> Result<()> {
    println!("[Export] Writing reports for '{}'...", definition.name);

    let yaml = serde_yaml::to_string(definition)?;
    fs::write(Path::new(output_dir).join("definition.yaml"), yaml)
        .context("Failed to write the process definition copy")?;

    let writer = ReportWriter::new(output_dir);
    writer.write_parameter_profile(&aggregate::parameter_profile(definition))?;
    writer.write_equipment_profile(&aggregate::equipment_profile(definition))?;

    let summary = aggregate::summarize(definition);
    let manifest = ShowManifest {
        category: &definition.category,
        product: &definition.name,
        summary: &summary,
        parameter_classes: class_counts(aggregate::parameter_class_distribution(definition)),
        equipment_classes: class_counts(aggregate::equipment_class_distribution([definition])),
    };
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(Path::new(output_dir).join("summary.json"), json)?;

    let report = generate_process_report(definition, &summary);
    fs::write(Path::new(output_dir).join("process_report.md"), report)?;

    println!("[Export] Reports have been saved to '{}'.", output_dir);
    Ok(())
}

/// Writes the comparison table as both CSV and JSON.
pub fn export_comparison(output_dir: &str, comparison: &Comparison) -> Result<()> {
    println!("[Export] Writing comparison reports...");

    let writer = ReportWriter::new(output_dir);
    writer.write_comparison(comparison)?;

    let json = serde_json::to_string_pretty(comparison)?;
    fs::write(Path::new(output_dir).join("comparison.json"), json)?;

    println!("[Export] Reports have been saved to '{}'.", output_dir);
    Ok(())
}

/// Writes the per-category statistics as CSV.
pub fn export_overview(output_dir: &str, ordered: &[(String, CategoryStats)]) -> Result<()> {
    println!("[Export] Writing overview report...");

    let writer = ReportWriter::new(output_dir);
    writer.write_category_overview(ordered)?;

    println!("[Export] Reports have been saved to '{}'.", output_dir);
    Ok(())
}

fn generate_process_report(definition: &ProcessDefinition, summary: &ProcessSummary) -> String {
    let mut report = format!("# {} ({})\n\n", definition.name, definition.category);
    report.push_str(&format!("{}\n\n", definition.description));

    if !definition.key_features.is_empty() {
        report.push_str(&format!(
            "Key features: {}\n\n",
            definition.key_features.join(", ")
        ));
    }

    report.push_str(&format!(
        "{} steps, {} critical parameters, {} distinct pieces of equipment, {:.1} h in total.\n\n",
        summary.step_count,
        summary.critical_parameter_count,
        summary.distinct_equipment_count,
        summary.total_duration_hours
    ));

    report.push_str("| # | Step | Duration | Temperature | Critical Parameters | Equipment |\n");
    report.push_str("|---|------|----------|-------------|---------------------|-----------|\n");

    for (index, step) in definition.steps.iter().enumerate() {
        let parameters = if step.critical_parameters.is_empty() {
            "*None*".to_string()
        } else {
            step.critical_parameters.join(", ")
        };
        let equipment = if step.equipment.is_empty() {
            "*None*".to_string()
        } else {
            step.equipment.join(", ")
        };
        report.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            index + 1,
            step.name,
            view::format_duration(&step.duration),
            view::format_temperature(&step.temperature),
            parameters,
            equipment
        ));
    }

    report
}
