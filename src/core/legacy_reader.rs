use crate::core::translator;
use crate::domain::model::{LegacyGlobalConfig, LegacyProfile, Settings};
use crate::utils::error::{MigrateError, Result};
use roxmltree::{Document, Node};
use std::path::{Path, PathBuf};

pub const GCONF_FILE: &str = "%gconf.xml";

/// GConf keys with no dconf counterpart.
pub const IGNORE_LIST: &[&str] = &[
    "alternate_screen_scroll",
    "background_image",
    "background_type",
    "cursor_blink_mode",
    "cursor_shape",
    "default_show_menubar",
    "scroll_background",
    "scrollback_unlimited",
    "scrollbar_position",
    "title",
    "title_mode",
    "update_records",
    "use_custom_default_size",
    "word_chars",
];

/// Reads a `~/.gconf/apps/gnome-terminal` tree.
#[derive(Debug, Clone)]
pub struct LegacyProfileReader {
    root: PathBuf,
    global: LegacyGlobalConfig,
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| MigrateError::XmlError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn parse_document<'a>(path: &Path, content: &'a str) -> Result<Document<'a>> {
    Document::parse(content).map_err(|e| MigrateError::XmlError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn entries<'a, 'input>(doc: &'a Document<'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    doc.root_element()
        .children()
        .filter(|n| n.is_element() && n.has_tag_name("entry"))
}

/// `value` attribute when non-empty, otherwise the text of the first child element.
fn node_value(node: Node) -> Option<String> {
    if let Some(value) = node.attribute("value").filter(|v| !v.is_empty()) {
        return Some(value.to_string());
    }
    node.children()
        .find(|n| n.is_element())
        .map(|child| child.text().unwrap_or_default().to_string())
}

pub fn load_global_config(path: &Path) -> Result<LegacyGlobalConfig> {
    let content = read_document(path)?;
    let doc = parse_document(path, &content)?;
    let mut config = LegacyGlobalConfig::default();

    for entry in entries(&doc) {
        match entry.attribute("name") {
            Some("default_profile") => {
                config.default_profile = node_value(entry);
            }
            Some("profile_list") => {
                config.profile_names = entry
                    .children()
                    .filter(|n| n.is_element() && n.has_tag_name("li"))
                    .filter_map(node_value)
                    .collect();
            }
            _ => {}
        }
    }

    tracing::debug!(
        "Global config lists {} profiles, default {:?}",
        config.profile_names.len(),
        config.default_profile
    );
    Ok(config)
}

pub fn read_legacy_profile(path: &Path) -> Result<LegacyProfile> {
    let content = read_document(path)?;
    let doc = parse_document(path, &content)?;
    let mut profile = LegacyProfile::default();

    for entry in entries(&doc) {
        let Some(name) = entry.attribute("name") else {
            continue;
        };
        let value = node_value(entry).ok_or_else(|| MigrateError::XmlError {
            path: path.display().to_string(),
            message: format!("entry '{}' has no value", name),
        })?;
        profile.entries.push((name.to_string(), value));
    }

    Ok(profile)
}

/// Drops ignored keys and runs the rest through the translation table.
pub fn translate_profile(legacy: &LegacyProfile) -> Result<Settings> {
    let mut settings = Settings::new();
    for (name, value) in &legacy.entries {
        if IGNORE_LIST.contains(&name.as_str()) {
            continue;
        }
        let (key, value) = translator::translate(name, value)?;
        settings.insert(key, value);
    }
    Ok(settings)
}

/// Translated settings of `<root>/profiles/<profile_name>/%gconf.xml`.
pub fn read_profile(root: &Path, profile_name: &str) -> Result<Settings> {
    let path = root.join("profiles").join(profile_name).join(GCONF_FILE);
    tracing::debug!("Reading legacy profile {}", path.display());
    translate_profile(&read_legacy_profile(&path)?)
}

impl LegacyProfileReader {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let global = load_global_config(&root.join("global").join(GCONF_FILE))?;
        Ok(Self { root, global })
    }

    pub fn default_profile_name(&self) -> Option<&str> {
        self.global.default_profile.as_deref()
    }

    pub fn profile_names(&self) -> &[String] {
        &self.global.profile_names
    }

    pub fn read_profile(&self, profile_name: &str) -> Result<Settings> {
        read_profile(&self.root, profile_name)
    }

    /// Translated profiles in global config order. Files are read lazily.
    pub fn profiles(&self) -> impl Iterator<Item = Result<Settings>> + '_ {
        self.global
            .profile_names
            .iter()
            .map(move |name| self.read_profile(name))
    }
}
