use crate::aggregate::{CategoryStats, Comparison, EquipmentRecord, ParameterRecord};
use csv::Writer;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct ParameterRow<'a> {
    step: &'a str,
    parameter: &'a str,
    class: String,
    importance: u8,
}

#[derive(Debug, Serialize)]
struct EquipmentRow<'a> {
    equipment: &'a str,
    class: String,
    usage_count: usize,
    steps: String,
}

#[derive(Debug, Serialize)]
struct OverviewRow<'a> {
    category: &'a str,
    product_count: usize,
    mean_step_count: f64,
    min_step_count: usize,
    max_step_count: usize,
}

/// Writes analysis tables as CSV files into one directory.
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn write_parameter_profile(
        &self,
        records: &[ParameterRecord],
    ) -> Result<PathBuf, anyhow::Error> {
        let path = self.dir.join("parameter_profile.csv");
        let mut writer = Writer::from_path(&path)?;
        for record in records {
            writer.serialize(ParameterRow {
                step: &record.step,
                parameter: &record.parameter,
                class: record.class.to_string(),
                importance: record.importance,
            })?;
        }
        writer.flush()?;
        Ok(path)
    }

    pub fn write_equipment_profile(
        &self,
        records: &[EquipmentRecord],
    ) -> Result<PathBuf, anyhow::Error> {
        let path = self.dir.join("equipment_profile.csv");
        let mut writer = Writer::from_path(&path)?;
        for record in records {
            writer.serialize(EquipmentRow {
                equipment: &record.equipment,
                class: record.class.to_string(),
                usage_count: record.usage_count,
                steps: record.steps.join(", "),
            })?;
        }
        writer.flush()?;
        Ok(path)
    }

    pub fn write_comparison(&self, comparison: &Comparison) -> Result<PathBuf, anyhow::Error> {
        let path = self.dir.join("comparison.csv");
        let mut writer = Writer::from_path(&path)?;
        for row in &comparison.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(path)
    }

    /// Rows are written in the order given; callers usually pass catalog
    /// order.
    pub fn write_category_overview(
        &self,
        stats: &[(String, CategoryStats)],
    ) -> Result<PathBuf, anyhow::Error> {
        let path = self.dir.join("category_overview.csv");
        let mut writer = Writer::from_path(&path)?;
        for (category, stats) in stats {
            writer.serialize(OverviewRow {
                category,
                product_count: stats.product_count,
                mean_step_count: stats.mean_step_count,
                min_step_count: stats.min_step_count,
                max_step_count: stats.max_step_count,
            })?;
        }
        writer.flush()?;
        Ok(path)
    }
}
