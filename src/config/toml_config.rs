use crate::adapters::dconf::{DEFAULT_EXECUTABLE, DEFAULT_PROFILES_PATH};
use crate::utils::error::{MigrateError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Optional settings file; command line flags take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    pub dconf: Option<DconfSettings>,
    pub migration: Option<MigrationSettings>,
    pub overrides: Option<BTreeMap<String, OverrideValue>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DconfSettings {
    pub executable: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationSettings {
    pub gconf_path: Option<String>,
    pub skip_duplicate_names: Option<bool>,
    pub set_backup_profile_default: Option<bool>,
}

/// dconf values are GVariant text, so strings are inserted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl OverrideValue {
    pub fn render(&self) -> String {
        match self {
            OverrideValue::Boolean(b) => b.to_string(),
            OverrideValue::Integer(i) => i.to_string(),
            OverrideValue::Float(f) => f.to_string(),
            OverrideValue::Text(s) => s.clone(),
        }
    }
}

impl SettingsFile {
    /// Reads and parses a settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MigrateError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MigrateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MigrateError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn dconf_executable(&self) -> &str {
        self.dconf
            .as_ref()
            .and_then(|d| d.executable.as_deref())
            .unwrap_or(DEFAULT_EXECUTABLE)
    }

    pub fn dconf_path(&self) -> &str {
        self.dconf
            .as_ref()
            .and_then(|d| d.path.as_deref())
            .unwrap_or(DEFAULT_PROFILES_PATH)
    }

    pub fn rendered_overrides(&self) -> BTreeMap<String, String> {
        self.overrides
            .iter()
            .flatten()
            .map(|(name, value)| (name.clone(), value.render()))
            .collect()
    }
}

impl Validate for SettingsFile {
    fn validate(&self) -> Result<()> {
        validation::validate_path("dconf.executable", self.dconf_executable())?;
        validation::validate_dconf_dir("dconf.path", self.dconf_path())?;

        for name in self.overrides.iter().flat_map(|o| o.keys()) {
            validation::validate_non_empty_string("overrides", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_settings_file() {
        let content = r#"
[dconf]
executable = "/usr/local/bin/dconf"

[migration]
skip_duplicate_names = true

[overrides]
font = "'Consolas 13'"
default-size-columns = 136
use-system-font = false
"#;

        let settings = SettingsFile::from_toml_str(content).unwrap();
        assert_eq!(settings.dconf_executable(), "/usr/local/bin/dconf");
        assert_eq!(settings.dconf_path(), DEFAULT_PROFILES_PATH);
        assert_eq!(
            settings.migration.as_ref().unwrap().skip_duplicate_names,
            Some(true)
        );

        let overrides = settings.rendered_overrides();
        assert_eq!(overrides.get("font").unwrap(), "'Consolas 13'");
        assert_eq!(overrides.get("default-size-columns").unwrap(), "136");
        assert_eq!(overrides.get("use-system-font").unwrap(), "false");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_settings_file_uses_defaults() {
        let settings = SettingsFile::from_toml_str("").unwrap();
        assert_eq!(settings.dconf_executable(), DEFAULT_EXECUTABLE);
        assert!(settings.rendered_overrides().is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GTERM_MIGRATE_TEST_DCONF", "/opt/dconf");

        let content = r#"
[dconf]
executable = "${GTERM_MIGRATE_TEST_DCONF}"
path = "/org/${GTERM_MIGRATE_UNSET_VARIABLE}/"
"#;
        let settings = SettingsFile::from_toml_str(content).unwrap();
        assert_eq!(settings.dconf_executable(), "/opt/dconf");
        assert_eq!(settings.dconf_path(), "/org/${GTERM_MIGRATE_UNSET_VARIABLE}/");

        std::env::remove_var("GTERM_MIGRATE_TEST_DCONF");
    }

    #[test]
    fn test_invalid_dconf_path_fails_validation() {
        let settings = SettingsFile::from_toml_str("[dconf]\npath = \"/org/gnome\"\n").unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[overrides]\n\"default-size-rows\" = 44\n")
            .unwrap();

        let settings = SettingsFile::from_file(temp_file.path()).unwrap();
        assert_eq!(settings.rendered_overrides().get("default-size-rows").unwrap(), "44");
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            SettingsFile::from_toml_str("[dconf"),
            Err(MigrateError::ConfigValidationError { .. })
        ));
    }
}
