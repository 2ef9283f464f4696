use crate::classify::{
    self, EquipmentClass, ParameterClass, EQUIPMENT_CLASSES, PARAMETER_CLASSES,
};
use pharmaflow_schemas::process::{DurationUnit, ProcessDefinition, ProcessStep};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Hard cap on side-by-side comparison; anything beyond it is dropped in
/// selection order and flagged.
pub const MAX_COMPARISON_PRODUCTS: usize = 6;

/// Headline metrics for one process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSummary {
    pub step_count: usize,
    pub critical_parameter_count: usize,
    pub distinct_equipment_count: usize,
    pub total_duration_hours: f64,
}

/// Hours contributed by one step; unknown durations count as zero.
fn duration_hours(step: &ProcessStep) -> f64 {
    match step.duration {
        Some(duration) => match duration.unit {
            DurationUnit::Hours => duration.value,
            DurationUnit::Days => duration.value * 24.0,
        },
        None => 0.0,
    }
}

pub fn summarize(definition: &ProcessDefinition) -> ProcessSummary {
    let distinct_equipment: HashSet<&str> = definition
        .steps
        .iter()
        .flat_map(|step| step.equipment.iter().map(String::as_str))
        .collect();

    ProcessSummary {
        step_count: definition.steps.len(),
        critical_parameter_count: definition
            .steps
            .iter()
            .map(|step| step.critical_parameters.len())
            .sum(),
        distinct_equipment_count: distinct_equipment.len(),
        total_duration_hours: definition.steps.iter().map(duration_hours).sum(),
    }
}

/// Step-count statistics for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub product_count: usize,
    pub mean_step_count: f64,
    pub min_step_count: usize,
    pub max_step_count: usize,
}

pub fn group_by_category<'a, I>(definitions: I) -> HashMap<String, CategoryStats>
where
    I: IntoIterator<Item = &'a ProcessDefinition>,
{
    struct Accumulator {
        product_count: usize,
        total_steps: usize,
        min_steps: usize,
        max_steps: usize,
    }

    let mut groups: HashMap<String, Accumulator> = HashMap::new();
    for definition in definitions {
        let steps = definition.steps.len();
        groups
            .entry(definition.category.clone())
            .and_modify(|acc| {
                acc.product_count += 1;
                acc.total_steps += steps;
                acc.min_steps = acc.min_steps.min(steps);
                acc.max_steps = acc.max_steps.max(steps);
            })
            .or_insert(Accumulator {
                product_count: 1,
                total_steps: steps,
                min_steps: steps,
                max_steps: steps,
            });
    }

    groups
        .into_iter()
        .map(|(category, acc)| {
            (
                category,
                CategoryStats {
                    product_count: acc.product_count,
                    mean_step_count: acc.total_steps as f64 / acc.product_count as f64,
                    min_step_count: acc.min_steps,
                    max_step_count: acc.max_steps,
                },
            )
        })
        .collect()
}

/// One line of a side-by-side comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub product: String,
    pub category: String,
    pub step_count: usize,
    pub critical_parameter_count: usize,
    pub distinct_equipment_count: usize,
    pub total_duration_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    pub truncated: bool,
}

/// Summarizes the given processes in selection order, keeping at most
/// [`MAX_COMPARISON_PRODUCTS`] of them.
pub fn compare<'a, I>(definitions: I) -> Comparison
where
    I: IntoIterator<Item = &'a ProcessDefinition>,
{
    let mut rows: Vec<ComparisonRow> = Vec::new();
    let mut truncated = false;
    for definition in definitions {
        if rows.len() == MAX_COMPARISON_PRODUCTS {
            truncated = true;
            break;
        }
        let summary = summarize(definition);
        rows.push(ComparisonRow {
            product: definition.name.clone(),
            category: definition.category.clone(),
            step_count: summary.step_count,
            critical_parameter_count: summary.critical_parameter_count,
            distinct_equipment_count: summary.distinct_equipment_count,
            total_duration_hours: summary.total_duration_hours,
        });
    }
    Comparison { rows, truncated }
}

/// One classified critical parameter occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRecord {
    pub step: String,
    pub parameter: String,
    pub class: ParameterClass,
    pub importance: u8,
}

/// Classifies every critical parameter of every step, in step order.
/// Parameters repeated across steps stay separate records.
pub fn parameter_profile(definition: &ProcessDefinition) -> Vec<ParameterRecord> {
    definition
        .steps
        .iter()
        .flat_map(|step| {
            step.critical_parameters.iter().map(move |parameter| ParameterRecord {
                step: step.name.clone(),
                parameter: parameter.clone(),
                class: classify::classify_parameter(parameter),
                importance: classify::assess_importance(parameter),
            })
        })
        .collect()
}

/// One piece of equipment and the steps that use it.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentRecord {
    pub equipment: String,
    pub class: EquipmentClass,
    pub usage_count: usize,
    pub steps: Vec<String>,
}

/// Collects equipment in first-use order, merging repeat mentions into
/// usage counts.
pub fn equipment_profile(definition: &ProcessDefinition) -> Vec<EquipmentRecord> {
    let mut records: Vec<EquipmentRecord> = Vec::new();
    for step in &definition.steps {
        for name in &step.equipment {
            match records.iter_mut().find(|record| record.equipment == *name) {
                Some(record) => {
                    record.usage_count += 1;
                    record.steps.push(step.name.clone());
                }
                None => records.push(EquipmentRecord {
                    equipment: name.clone(),
                    class: classify::classify_equipment(name),
                    usage_count: 1,
                    steps: vec![step.name.clone()],
                }),
            }
        }
    }
    records
}

/// Parameter-class occurrence counts in declaration order of the classes.
/// Classes with no occurrences are omitted.
pub fn parameter_class_distribution(definition: &ProcessDefinition) -> Vec<(ParameterClass, usize)> {
    let mut counts: HashMap<ParameterClass, usize> = HashMap::new();
    for step in &definition.steps {
        for parameter in &step.critical_parameters {
            *counts.entry(classify::classify_parameter(parameter)).or_default() += 1;
        }
    }
    PARAMETER_CLASSES
        .iter()
        .filter_map(|class| counts.get(class).map(|count| (*class, *count)))
        .collect()
}

/// Equipment-class occurrence counts across many processes, one count per
/// step-level mention. Classes with no occurrences are omitted.
pub fn equipment_class_distribution<'a, I>(definitions: I) -> Vec<(EquipmentClass, usize)>
where
    I: IntoIterator<Item = &'a ProcessDefinition>,
{
    let mut counts: HashMap<EquipmentClass, usize> = HashMap::new();
    for definition in definitions {
        for step in &definition.steps {
            for name in &step.equipment {
                *counts.entry(classify::classify_equipment(name)).or_default() += 1;
            }
        }
    }
    EQUIPMENT_CLASSES
        .iter()
        .filter_map(|class| counts.get(class).map(|count| (*class, *count)))
        .collect()
}
