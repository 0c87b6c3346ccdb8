use serde::{Deserialize, Serialize};

use crate::{Result, StepflowError};

/// Smallest allowed swipe interval in milliseconds.
pub const MIN_INTERVAL_MS: u64 = 1000;

/// One step of a workflow in the backend's persisted format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    pub id: String,
    pub action: String,
    #[serde(default)]
    pub description: String,
    /// delay in milliseconds
    #[serde(default)]
    pub delay: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<bool>,
    /// timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_swipes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_swipes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_interval_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_interval_ms: Option<u64>,
    /// goto target, only meaningful for `goto` steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infinite_allowed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_iterations: Option<bool>,
}

impl WorkflowStep {
    pub fn new(
        id: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            action: action.into(),
            ..Default::default()
        }
    }

    pub fn is_goto(&self) -> bool {
        self.action == "goto"
    }

    /// Check the field rules the property editor enforces before save.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(StepflowError::Step("step id must not be empty".to_string()));
        }
        if self.action.trim().is_empty() {
            return Err(StepflowError::Step(format!("step {}: action must not be empty", self.id)));
        }
        if self.swipe_count == Some(0) {
            return Err(StepflowError::Step(format!("step {}: swipeCount must be at least 1", self.id)));
        }
        if let (Some(min), Some(max)) = (self.min_swipes, self.max_swipes) {
            if min > max {
                return Err(StepflowError::Step(format!("step {}: minSwipes ({}) exceeds maxSwipes ({})", self.id, min, max)));
            }
        }
        for (name, value) in [("minIntervalMs", self.min_interval_ms), ("maxIntervalMs", self.max_interval_ms)] {
            if let Some(v) = value {
                if v < MIN_INTERVAL_MS {
                    return Err(StepflowError::Step(format!("step {}: {} must be at least {}ms, got {}", self.id, name, MIN_INTERVAL_MS, v)));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min_interval_ms, self.max_interval_ms) {
            if min > max {
                return Err(StepflowError::Step(format!("step {}: minIntervalMs ({}) exceeds maxIntervalMs ({})", self.id, min, max)));
            }
        }
        if self.next_step.is_some() && !self.is_goto() {
            return Err(StepflowError::Step(format!("step {}: nextStep is only allowed on goto steps", self.id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::WorkflowStep;

    #[test]
    fn test_deserialize_wire_format() {
        let step: WorkflowStep = serde_json::from_value(json!({
            "id": "s1",
            "action": "activate_continuous_swipe",
            "description": "Swipe for a while",
            "delay": 1000,
            "minSwipes": 5,
            "maxSwipes": 20,
            "minIntervalMs": 1500,
            "maxIntervalMs": 4000
        }))
        .unwrap();

        assert_eq!(step.min_swipes, Some(5));
        assert_eq!(step.max_interval_ms, Some(4000));
        assert_eq!(step.critical, None);
    }

    #[test]
    fn test_missing_delay_and_description_default() {
        let step: WorkflowStep = serde_json::from_value(json!({"id": "s1", "action": "wait"})).unwrap();
        assert_eq!(step.delay, 0);
        assert_eq!(step.description, "");
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let mut step = WorkflowStep::new("g", "goto");
        step.next_step = Some("a".to_string());

        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value, json!({"id": "g", "action": "goto", "description": "", "delay": 0, "nextStep": "a"}));
    }

    #[test]
    fn test_validate_rules() {
        assert!(WorkflowStep::new("a", "wait").validate().is_ok());
        assert!(WorkflowStep::new("", "wait").validate().is_err());

        let mut step = WorkflowStep::new("s", "swipe_with_spectre");
        step.swipe_count = Some(0);
        assert!(step.validate().is_err());

        let mut step = WorkflowStep::new("s", "activate_continuous_swipe");
        step.min_swipes = Some(10);
        step.max_swipes = Some(5);
        assert!(step.validate().is_err());

        let mut step = WorkflowStep::new("s", "activate_continuous_swipe");
        step.min_interval_ms = Some(999);
        assert!(step.validate().is_err());

        step.min_interval_ms = Some(5000);
        step.max_interval_ms = Some(2000);
        assert!(step.validate().is_err());

        let mut step = WorkflowStep::new("s", "wait");
        step.next_step = Some("a".to_string());
        assert!(step.validate().is_err());
    }
}
