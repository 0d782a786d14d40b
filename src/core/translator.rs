//! Rename and re-encode one GConf profile entry into its dconf equivalent.

use crate::utils::error::{MigrateError, Result};

/// Keys the translation table can produce that differ from plain hyphenation.
pub const TRANSLATED_KEYS: &[&str] = &[
    "audible-bell",
    "background-transparency-percent",
    "visible-name",
    "font",
    "custom-command",
    "exit-action",
    "background-color",
    "foreground-color",
    "bold-color",
    "palette",
    "backspace-binding",
    "delete-binding",
];

/// Translates a legacy `(name, raw value)` pair into the target key and its
/// already-formatted dconf value.
pub fn translate(name: &str, raw: &str) -> Result<(String, String)> {
    let (name, value) = match name {
        "silent_bell" => {
            let silent = parse_bool(name, raw)?;
            ("audible_bell", (!silent).to_string())
        }
        "background_darkness" => ("background_transparency_percent", scale_percent(name, raw)?),
        "visible_name" | "font" | "custom_command" | "exit_action" => (name, quote(raw)),
        "background_color" | "foreground_color" | "bold_color" => {
            (name, quote(&color_16bit_to_rgb(name, raw)?))
        }
        "palette" => (name, palette_to_list(raw)?),
        "backspace_binding" => (name, quote(&rename_token(raw, "ascii-del", "ascii-delete"))),
        "delete_binding" => (
            name,
            quote(&rename_token(raw, "escape-sequence", "delete-sequence")),
        ),
        _ => (name, raw.to_string()),
    };

    Ok((name.replace('_', "-"), value))
}

pub fn quote(value: &str) -> String {
    format!("'{}'", value)
}

fn parse_bool(field: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(MigrateError::ValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn scale_percent(field: &str, raw: &str) -> Result<String> {
    let value: f64 = raw.trim().parse().map_err(|_| MigrateError::ValueError {
        field: field.to_string(),
        value: raw.to_string(),
        reason: "expected a decimal number".to_string(),
    })?;
    if !value.is_finite() {
        return Err(MigrateError::ValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "value is not finite".to_string(),
        });
    }
    Ok(format!("{}", (value * 100.0).round() as i64))
}

/// `#RRRRGGGGBBBB` to `rgb(r,g,b)`.
///
/// Each channel goes through two successive floor divisions by 16. Older
/// migrations produced values this way, so it must not become `/ 257`.
pub fn color_16bit_to_rgb(field: &str, raw: &str) -> Result<String> {
    let invalid = |reason: &str| MigrateError::ValueError {
        field: field.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let hex = raw.trim().strip_prefix('#').ok_or_else(|| invalid("missing leading '#'"))?;
    if hex.len() < 12 || !hex.as_bytes()[..12].iter().all(u8::is_ascii_hexdigit) {
        return Err(invalid("expected 12 hex digits"));
    }

    let mut channels = [0u32; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        let digits = &hex[i * 4..i * 4 + 4];
        let wide =
            u32::from_str_radix(digits, 16).map_err(|_| invalid("expected 12 hex digits"))?;
        *channel = wide / 16 / 16;
    }

    Ok(format!("rgb({},{},{})", channels[0], channels[1], channels[2]))
}

fn palette_to_list(raw: &str) -> Result<String> {
    let colors = raw
        .split(':')
        .map(|color| color_16bit_to_rgb("palette", color).map(|rgb| quote(&rgb)))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("[{}]", colors.join(", ")))
}

/// Replaces whole `from` tokens only, so `ascii-delete` stays untouched.
fn rename_token(raw: &str, from: &str, to: &str) -> String {
    if raw == from {
        to.to_string()
    } else {
        raw.to_string()
    }
}
