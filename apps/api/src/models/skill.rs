use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SkillRow {
    pub id: i64,
    pub name: String,
    pub resource_type: Option<String>,
    pub platform: Option<String>,
    pub progress: String,
    pub hours_spent: f64,
    pub difficulty: i64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Payload for creating a skill. Omitted fields take the column defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillIn {
    pub name: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default = "default_progress")]
    pub progress: String,
    #[serde(default)]
    pub hours_spent: f64,
    #[serde(default = "default_difficulty")]
    pub difficulty: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update. `None` (absent or null) leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub resource_type: Option<String>,
    pub platform: Option<String>,
    pub progress: Option<String>,
    pub hours_spent: Option<f64>,
    pub difficulty: Option<i64>,
    pub notes: Option<String>,
}

impl SkillPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.resource_type.is_none()
            && self.platform.is_none()
            && self.progress.is_none()
            && self.hours_spent.is_none()
            && self.difficulty.is_none()
            && self.notes.is_none()
    }
}

fn default_progress() -> String {
    "started".to_string()
}

fn default_difficulty() -> i64 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_in_defaults() {
        let skill: SkillIn = serde_json::from_str(r#"{"name": "Rust"}"#).unwrap();
        assert_eq!(skill.progress, "started");
        assert_eq!(skill.difficulty, 3);
        assert_eq!(skill.hours_spent, 0.0);
        assert!(skill.notes.is_none());
    }

    #[test]
    fn test_patch_with_nulls_is_empty() {
        let patch: SkillPatch =
            serde_json::from_str(r#"{"name": null, "hours_spent": null}"#).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_patch_with_field_is_not_empty() {
        let patch: SkillPatch = serde_json::from_str(r#"{"difficulty": 5}"#).unwrap();
        assert!(!patch.is_empty());
    }
}
