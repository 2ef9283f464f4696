use serde::Serialize;
use std::fmt;

/// Families a critical parameter can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterClass {
    Physicochemical,
    ProcessControl,
    Quality,
    Economic,
    Other,
}

pub const PARAMETER_CLASSES: [ParameterClass; 5] = [
    ParameterClass::Physicochemical,
    ParameterClass::ProcessControl,
    ParameterClass::Quality,
    ParameterClass::Economic,
    ParameterClass::Other,
];

impl fmt::Display for ParameterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParameterClass::Physicochemical => "physicochemical",
            ParameterClass::ProcessControl => "process control",
            ParameterClass::Quality => "quality",
            ParameterClass::Economic => "economic",
            ParameterClass::Other => "other",
        };
        write!(f, "{label}")
    }
}

/// Families a piece of equipment can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentClass {
    Bioreaction,
    SeparationPurification,
    DryingConcentration,
    MixingPreparation,
    FillingPackaging,
    Sterilization,
    Other,
}

pub const EQUIPMENT_CLASSES: [EquipmentClass; 7] = [
    EquipmentClass::Bioreaction,
    EquipmentClass::SeparationPurification,
    EquipmentClass::DryingConcentration,
    EquipmentClass::MixingPreparation,
    EquipmentClass::FillingPackaging,
    EquipmentClass::Sterilization,
    EquipmentClass::Other,
];

impl fmt::Display for EquipmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EquipmentClass::Bioreaction => "bioreaction",
            EquipmentClass::SeparationPurification => "separation & purification",
            EquipmentClass::DryingConcentration => "drying & concentration",
            EquipmentClass::MixingPreparation => "mixing & preparation",
            EquipmentClass::FillingPackaging => "filling & packaging",
            EquipmentClass::Sterilization => "sterilization",
            EquipmentClass::Other => "other",
        };
        write!(f, "{label}")
    }
}

// Rule tables are scanned top to bottom; the first keyword hit decides.
// Matching is case-insensitive on the lowercased name.

const PARAMETER_RULES: &[(&[&str], ParameterClass)] = &[
    (
        &["temperature", "pressure", "ph", "concentration"],
        ParameterClass::Physicochemical,
    ),
    (&["time", "rate", "speed"], ParameterClass::ProcessControl),
    (&["content", "purity", "impurity"], ParameterClass::Quality),
    (
        &["yield", "efficiency", "output"],
        ParameterClass::Economic,
    ),
];

const IMPORTANCE_RULES: &[(&[&str], u8)] = &[
    (&["steril", "safety", "virus"], 5),
    (&["content", "purity", "critical quality"], 4),
    (&["temperature", "time", "ph"], 3),
];

/// Importance assigned when no rule matches. The scale bottoms out at 1,
/// which no current rule produces; routine parameters land here instead.
pub const DEFAULT_IMPORTANCE: u8 = 2;

const EQUIPMENT_RULES: &[(&[&str], EquipmentClass)] = &[
    (
        &["reactor", "fermenter", "bio"],
        EquipmentClass::Bioreaction,
    ),
    (
        &["centrifuge", "filter", "chromatography", "purification"],
        EquipmentClass::SeparationPurification,
    ),
    (
        &["drying", "concentration", "evaporation"],
        EquipmentClass::DryingConcentration,
    ),
    (
        &["mixing", "stirring", "granulation"],
        EquipmentClass::MixingPreparation,
    ),
    (
        &["filling", "packaging", "labeling"],
        EquipmentClass::FillingPackaging,
    ),
    (
        &["sterilization", "disinfection"],
        EquipmentClass::Sterilization,
    ),
];

pub fn classify_parameter(name: &str) -> ParameterClass {
    let lowered = name.to_lowercase();
    for (keywords, class) in PARAMETER_RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return *class;
        }
    }
    ParameterClass::Other
}

/// Scores a critical parameter from 1 (routine) to 5 (highest stakes).
pub fn assess_importance(name: &str) -> u8 {
    let lowered = name.to_lowercase();
    for (keywords, score) in IMPORTANCE_RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return *score;
        }
    }
    DEFAULT_IMPORTANCE
}

pub fn classify_equipment(name: &str) -> EquipmentClass {
    let lowered = name.to_lowercase();
    for (keywords, class) in EQUIPMENT_RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return *class;
        }
    }
    EquipmentClass::Other
}
