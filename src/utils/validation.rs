use crate::utils::error::{MigrateError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MigrateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MigrateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_existing_dir(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    if !Path::new(path).is_dir() {
        return Err(MigrateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Directory does not exist".to_string(),
        });
    }

    Ok(())
}

/// dconf only accepts directory paths, i.e. `/a/b/`.
pub fn validate_dconf_dir(field_name: &str, path: &str) -> Result<()> {
    if !path.starts_with('/') || !path.ends_with('/') {
        return Err(MigrateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "dconf directory paths must start and end with '/'".to_string(),
        });
    }
    if path.contains("//") {
        return Err(MigrateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "dconf paths cannot contain empty segments".to_string(),
        });
    }
    Ok(())
}

/// Directives without `=` are tolerated (ignored later); an empty name is not.
pub fn validate_set_directive(field_name: &str, directive: &str) -> Result<()> {
    if let Some((name, _)) = directive.split_once('=') {
        if name.trim().is_empty() {
            return Err(MigrateError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: directive.to_string(),
                reason: "Setting name cannot be empty".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MigrateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
