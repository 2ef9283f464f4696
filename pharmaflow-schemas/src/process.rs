use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Hours,
    Days,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StepDuration {
    pub value: f64,
    pub unit: DurationUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Temperature {
    Ambient,
    Fixed { celsius: f64 },
    Range { min_celsius: f64, max_celsius: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessStep {
    pub name: String,
    #[serde(default)]
    pub critical_parameters: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<StepDuration>,
    pub temperature: Temperature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessDefinition {
    pub name: String,
    // Filled in from the enclosing catalog category while loading.
    #[serde(default)]
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub key_features: Vec<String>,
    pub steps: Vec<ProcessStep>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_parses_from_yaml() {
        let yaml = r#"
name: sterilization
critical_parameters: [temperature, time]
equipment: [steam sterilization cabinet]
duration: {value: 2, unit: hours}
temperature: {type: fixed, celsius: 121}
"#;
        let step: ProcessStep = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(step.name, "sterilization");
        assert_eq!(step.critical_parameters.len(), 2);
        assert_eq!(
            step.duration,
            Some(StepDuration {
                value: 2.0,
                unit: DurationUnit::Hours,
            })
        );
        assert_eq!(step.temperature, Temperature::Fixed { celsius: 121.0 });
    }

    #[test]
    fn temperature_forms_parse_from_yaml() {
        let ambient: Temperature = serde_yaml::from_str("type: ambient").unwrap();
        assert_eq!(ambient, Temperature::Ambient);

        let range: Temperature =
            serde_yaml::from_str("{type: range, min_celsius: -40, max_celsius: 25}").unwrap();
        assert_eq!(
            range,
            Temperature::Range {
                min_celsius: -40.0,
                max_celsius: 25.0,
            }
        );
    }

    #[test]
    fn optional_step_fields_default_to_empty() {
        let yaml = r#"
name: drug dissolution
temperature: {type: ambient}
"#;
        let step: ProcessStep = serde_yaml::from_str(yaml).unwrap();
        assert!(step.critical_parameters.is_empty());
        assert!(step.equipment.is_empty());
        assert_eq!(step.duration, None);
    }

    #[test]
    fn definition_round_trips_through_yaml() {
        let definition = ProcessDefinition {
            name: "tablet".to_string(),
            category: "chemical-solid-dosage".to_string(),
            description: "Oral solid dosage form shaped by powder compression.".to_string(),
            key_features: vec!["accurate dosing".to_string()],
            steps: vec![ProcessStep {
                name: "drying".to_string(),
                critical_parameters: vec!["temperature".to_string(), "moisture content".to_string()],
                equipment: vec!["fluidized-bed drying machine".to_string()],
                duration: Some(StepDuration {
                    value: 4.0,
                    unit: DurationUnit::Hours,
                }),
                temperature: Temperature::Range {
                    min_celsius: 50.0,
                    max_celsius: 60.0,
                },
            }],
        };

        let yaml = serde_yaml::to_string(&definition).unwrap();
        let parsed: ProcessDefinition = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, definition);
    }
}
