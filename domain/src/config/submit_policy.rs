//! Submit policy value object

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How strictly submissions are validated before they reach the store.
///
/// The store itself accepts records without categorical fields; this policy
/// only applies at the submit boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// `questionText`, `examType`, `examYear` and `subject` are required (default)
    RequireCategories,
    /// Only `questionText` is required
    Relaxed,
}

impl SubmitPolicy {
    pub const VALID_VALUES: [&'static str; 2] = ["require_categories", "relaxed"];

    pub fn requires_categories(&self) -> bool {
        matches!(self, SubmitPolicy::RequireCategories)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitPolicy::RequireCategories => "require_categories",
            SubmitPolicy::Relaxed => "relaxed",
        }
    }
}

impl Default for SubmitPolicy {
    fn default() -> Self {
        Self::RequireCategories
    }
}

impl FromStr for SubmitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "require_categories" | "strict" => Ok(SubmitPolicy::RequireCategories),
            "relaxed" => Ok(SubmitPolicy::Relaxed),
            other => Err(format!("unknown submit policy '{}'", other)),
        }
    }
}

impl std::fmt::Display for SubmitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_requires_categories() {
        assert_eq!(SubmitPolicy::default(), SubmitPolicy::RequireCategories);
        assert!(SubmitPolicy::default().requires_categories());
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "require-categories".parse::<SubmitPolicy>().unwrap(),
            SubmitPolicy::RequireCategories
        );
        assert_eq!("strict".parse::<SubmitPolicy>().unwrap(), SubmitPolicy::RequireCategories);
        assert_eq!("Relaxed".parse::<SubmitPolicy>().unwrap(), SubmitPolicy::Relaxed);
        assert!("lenient".parse::<SubmitPolicy>().is_err());
    }

    #[test]
    fn test_serialize_snake_case() {
        let json = serde_json::to_string(&SubmitPolicy::RequireCategories).unwrap();
        assert_eq!(json, "\"require_categories\"");
    }
}
