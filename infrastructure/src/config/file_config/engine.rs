//! Engine configuration from TOML (`[engine]` section)

use catalog_application::EngineParams;
use catalog_domain::{ConfigIssue, ConfigIssueCode, SubmitPolicy};
use serde::{Deserialize, Serialize};

/// Raw catalog engine configuration from TOML
///
/// # Example
///
/// ```toml
/// [engine]
/// max_in_flight = 16                    # concurrent store updates per bulk update
/// submit_policy = "require_categories"  # or "relaxed"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    pub max_in_flight: usize,
    pub submit_policy: String,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            max_in_flight: 16,
            submit_policy: SubmitPolicy::default().as_str().to_string(),
        }
    }
}

impl FileEngineConfig {
    /// Parse submit_policy string into [`SubmitPolicy`].
    ///
    /// An unknown value is an error issue.
    pub fn parse_submit_policy(&self) -> (SubmitPolicy, Vec<ConfigIssue>) {
        match self.submit_policy.parse::<SubmitPolicy>() {
            Ok(policy) => (policy, vec![]),
            Err(_) => {
                let issue = ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "engine.submit_policy".to_string(),
                        value: self.submit_policy.clone(),
                        valid_values: SubmitPolicy::VALID_VALUES
                            .iter()
                            .map(|v| v.to_string())
                            .collect(),
                    },
                    format!(
                        "engine.submit_policy: unknown value '{}' (expected one of: {})",
                        self.submit_policy,
                        SubmitPolicy::VALID_VALUES.join(", ")
                    ),
                );
                (SubmitPolicy::default(), vec![issue])
            }
        }
    }

    /// Convert to [`EngineParams`], collecting issues.
    pub fn to_engine_params(&self) -> (EngineParams, Vec<ConfigIssue>) {
        let (policy, mut issues) = self.parse_submit_policy();

        if self.max_in_flight == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "engine.max_in_flight".to_string(),
                },
                "engine.max_in_flight must be at least 1",
            ));
        }

        let params = EngineParams::default()
            .with_max_in_flight(self.max_in_flight)
            .with_submit_policy(policy);
        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_converts_cleanly() {
        let (params, issues) = FileEngineConfig::default().to_engine_params();
        assert!(issues.is_empty());
        assert_eq!(params.max_in_flight, 16);
        assert_eq!(params.submit_policy, SubmitPolicy::RequireCategories);
    }

    #[test]
    fn test_relaxed_policy() {
        let config = FileEngineConfig {
            submit_policy: "relaxed".to_string(),
            ..Default::default()
        };
        assert_eq!(config.parse_submit_policy().0, SubmitPolicy::Relaxed);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let config = FileEngineConfig {
            max_in_flight: 0,
            submit_policy: "lenient".to_string(),
        };
        let (_, issues) = config.to_engine_params();
        assert_eq!(issues.len(), 2);
        assert!(ConfigIssue::has_errors(&issues));
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::InvalidEnumValue { field, .. } if field == "engine.submit_policy"
        ));
    }
}
