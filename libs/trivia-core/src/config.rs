//! Loading and validating [`QuizSettings`].
//!
//! Layers, lowest to highest: built-in defaults, a TOML file, `TRIVIA_*`
//! environment variables. Command-line flags are applied by the caller.

use std::path::Path;

use crate::error::ConfigError;
use crate::types::QuizSettings;

pub const ENV_PASS_THRESHOLD: &str = "TRIVIA_PASS_THRESHOLD";
pub const ENV_ALLOW_REPEATS: &str = "TRIVIA_ALLOW_REPEATS";
pub const ENV_MAX_QUESTIONS: &str = "TRIVIA_MAX_QUESTIONS";

impl QuizSettings {
    /// Parse settings from TOML. Missing keys keep their defaults.
    ///
    /// ```toml
    /// pass_threshold = 0.8
    /// allow_repeats = true
    ///
    /// [thresholds]
    /// long_similarity = 0.85
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Override fields from environment variables read through `lookup`.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_PASS_THRESHOLD) {
            self.pass_threshold = value.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "{ENV_PASS_THRESHOLD} must be a number, got {value:?}"
                ))
            })?;
        }
        if let Some(value) = lookup(ENV_ALLOW_REPEATS) {
            self.allow_repeats = parse_flag(&value).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "{ENV_ALLOW_REPEATS} must be true or false, got {value:?}"
                ))
            })?;
        }
        if let Some(value) = lookup(ENV_MAX_QUESTIONS) {
            self.max_questions = value.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "{ENV_MAX_QUESTIONS} must be a whole number, got {value:?}"
                ))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pass_threshold > 0.0 && self.pass_threshold <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "pass_threshold must be in (0, 1], got {}",
                self.pass_threshold
            )));
        }
        if self.min_questions == 0 {
            return Err(ConfigError::Invalid("min_questions must be at least 1".into()));
        }
        if self.min_questions > self.max_questions {
            return Err(ConfigError::Invalid(format!(
                "min_questions ({}) exceeds max_questions ({})",
                self.min_questions, self.max_questions
            )));
        }
        if !(self.min_questions..=self.max_questions).contains(&self.default_questions) {
            return Err(ConfigError::Invalid(format!(
                "default_questions ({}) must be between {} and {}",
                self.default_questions, self.min_questions, self.max_questions
            )));
        }

        let t = &self.thresholds;
        for (name, value) in [
            ("part_similarity", t.part_similarity),
            ("short_similarity", t.short_similarity),
            ("long_similarity", t.long_similarity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "thresholds.{name} must be in [0, 1], got {value}"
                )));
            }
        }
        if t.exact_only_max_len > t.short_max_len {
            return Err(ConfigError::Invalid(format!(
                "thresholds.exact_only_max_len ({}) exceeds thresholds.short_max_len ({})",
                t.exact_only_max_len, t.short_max_len
            )));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        assert!(QuizSettings::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = QuizSettings::from_toml_str(
            "pass_threshold = 0.8\n\n[thresholds]\nlong_similarity = 0.85\n",
        )
        .unwrap();
        assert_eq!(settings.pass_threshold, 0.8);
        assert_eq!(settings.thresholds.long_similarity, 0.85);
        assert_eq!(settings.thresholds.short_similarity, 0.88);
        assert_eq!(settings.max_questions, 50);
        assert!(!settings.allow_repeats);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(QuizSettings::from_toml_str("").unwrap(), QuizSettings::default());
    }

    #[test]
    fn malformed_toml() {
        let result = QuizSettings::from_toml_str("pass_threshold = ");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn out_of_range_values_rejected() {
        for content in [
            "pass_threshold = 0.0",
            "pass_threshold = 1.5",
            "min_questions = 0",
            "min_questions = 60",
            "default_questions = 2",
            "[thresholds]\nlong_similarity = 2.0",
            "[thresholds]\nexact_only_max_len = 9",
        ] {
            let result = QuizSettings::from_toml_str(content);
            assert!(matches!(result, Err(ConfigError::Invalid(_))), "{content}");
        }
    }

    #[test]
    fn env_overrides() {
        let settings = QuizSettings::default()
            .apply_env(env(&[
                (ENV_PASS_THRESHOLD, "0.5"),
                (ENV_ALLOW_REPEATS, "yes"),
                (ENV_MAX_QUESTIONS, " 20 "),
            ]))
            .unwrap();
        assert_eq!(settings.pass_threshold, 0.5);
        assert!(settings.allow_repeats);
        assert_eq!(settings.max_questions, 20);
    }

    #[test]
    fn env_absent_changes_nothing() {
        let settings = QuizSettings::default().apply_env(env(&[])).unwrap();
        assert_eq!(settings, QuizSettings::default());
    }

    #[test]
    fn env_bad_values() {
        let bad_threshold = QuizSettings::default().apply_env(env(&[(ENV_PASS_THRESHOLD, "most")]));
        assert!(matches!(bad_threshold, Err(ConfigError::Invalid(_))));

        let bad_flag = QuizSettings::default().apply_env(env(&[(ENV_ALLOW_REPEATS, "maybe")]));
        assert!(matches!(bad_flag, Err(ConfigError::Invalid(_))));

        // default_questions (10) no longer fits under the new maximum
        let too_small = QuizSettings::default().apply_env(env(&[(ENV_MAX_QUESTIONS, "8")]));
        assert!(matches!(too_small, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_missing_file() {
        let result = QuizSettings::load(Path::new("/nonexistent/trivia.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
