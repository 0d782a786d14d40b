pub mod cli;
pub mod toml_config;

use crate::adapters::dconf::{DconfCommand, DEFAULT_EXECUTABLE, DEFAULT_PROFILES_PATH};
use crate::core::ConfigProvider;
use crate::utils::error::{MigrateError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use toml_config::SettingsFile;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "gterm-migrate", version))]
#[cfg_attr(
    feature = "cli",
    command(about = "Migrate GNOME Terminal profiles from GConf to dconf")
)]
pub struct CliConfig {
    /// Load current dconf profiles
    #[cfg_attr(feature = "cli", arg(long))]
    pub load_current_profiles: bool,

    /// Load gconf profiles from path (usually ~/.gconf/apps/gnome-terminal)
    #[cfg_attr(feature = "cli", arg(long = "load-gconf-profiles-from", value_name = "PATH"))]
    pub gconf_path: Option<String>,

    /// Skip restoring already existent profile names
    #[cfg_attr(feature = "cli", arg(long))]
    pub skip_duplicate_names: bool,

    /// Set new default profile to GConf default
    #[cfg_attr(feature = "cli", arg(long))]
    pub set_backup_profile_default: bool,

    /// Set all profile option to value, e.g. --set="font='Consolas 13'" --set=default-size-columns=136
    #[cfg_attr(
        feature = "cli",
        arg(long = "set", value_name = "NAME=VALUE", action = clap::ArgAction::Append)
    )]
    pub set: Vec<String>,

    /// Load the result into dconf instead of printing it
    #[cfg_attr(feature = "cli", arg(long))]
    pub execute_action: bool,

    /// Delete previous existing profiles before loading
    #[cfg_attr(feature = "cli", arg(long))]
    pub execute_delete: bool,

    /// Write the dconf load text to a file instead of stdout
    #[cfg_attr(feature = "cli", arg(long, value_name = "FILE"))]
    pub output: Option<String>,

    /// TOML settings file
    #[cfg_attr(feature = "cli", arg(long, value_name = "FILE"))]
    pub config: Option<String>,

    /// dconf directory holding the terminal profiles
    #[cfg_attr(feature = "cli", arg(long, value_name = "PATH"))]
    pub dconf_path: Option<String>,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(skip))]
    pub dconf_executable: Option<String>,

    #[cfg_attr(feature = "cli", arg(skip))]
    pub overrides: BTreeMap<String, String>,
}

impl CliConfig {
    /// Folds a settings file in. Flags given on the command line win.
    pub fn apply_settings_file(&mut self, settings: &SettingsFile) {
        if let Some(migration) = &settings.migration {
            if self.gconf_path.is_none() {
                self.gconf_path = migration.gconf_path.clone();
            }
            self.skip_duplicate_names |= migration.skip_duplicate_names.unwrap_or(false);
            self.set_backup_profile_default |=
                migration.set_backup_profile_default.unwrap_or(false);
        }

        if self.dconf_path.is_none() {
            self.dconf_path = Some(settings.dconf_path().to_string());
        }
        if self.dconf_executable.is_none() {
            self.dconf_executable = Some(settings.dconf_executable().to_string());
        }
        self.overrides = settings.rendered_overrides();
    }

    pub fn dconf_command(&self) -> DconfCommand {
        DconfCommand::new(
            self.dconf_executable.as_deref().unwrap_or(DEFAULT_EXECUTABLE),
            self.dconf_path.as_deref().unwrap_or(DEFAULT_PROFILES_PATH),
        )
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if !self.load_current_profiles && self.gconf_path.is_none() {
            return Err(MigrateError::MissingConfigError {
                field: "--load-current-profiles or --load-gconf-profiles-from".to_string(),
            });
        }

        if let Some(path) = &self.gconf_path {
            validation::validate_existing_dir("load-gconf-profiles-from", path)?;
        }

        if self.execute_delete && !self.execute_action {
            return Err(MigrateError::ConfigValidationError {
                field: "execute-delete".to_string(),
                message: "--execute-delete only makes sense with --execute-action".to_string(),
            });
        }

        for directive in &self.set {
            validation::validate_set_directive("set", directive)?;
        }

        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }

        if let Some(path) = &self.dconf_path {
            validation::validate_dconf_dir("dconf-path", path)?;
        }

        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn load_current_profiles(&self) -> bool {
        self.load_current_profiles
    }

    fn gconf_path(&self) -> Option<&str> {
        self.gconf_path.as_deref()
    }

    fn skip_duplicate_names(&self) -> bool {
        self.skip_duplicate_names
    }

    fn set_backup_profile_default(&self) -> bool {
        self.set_backup_profile_default
    }

    fn set_directives(&self) -> &[String] {
        &self.set
    }

    fn overrides(&self) -> BTreeMap<String, String> {
        self.overrides.clone()
    }

    fn execute_action(&self) -> bool {
        self.execute_action
    }

    fn execute_delete(&self) -> bool {
        self.execute_delete
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }
}
