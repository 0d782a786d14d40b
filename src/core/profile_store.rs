use crate::core::dump_format::{self, format_list_literal, format_section};
use crate::domain::model::{Profile, Settings};
use crate::utils::error::{MigrateError, Result};
use std::collections::{BTreeMap, HashMap};

pub const GLOBAL_SECTION: &str = "/";
pub const VISIBLE_NAME: &str = "visible-name";

/// Working set of dconf terminal profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    skip_duplicate_names: bool,
    /// (display name, identifier), in load order.
    order: Vec<(String, String)>,
    default_id: Option<String>,
    profiles: HashMap<String, Profile>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub skipped: usize,
}

pub fn display_name(settings: &Settings) -> Result<String> {
    settings
        .get(VISIBLE_NAME)
        .map(|name| dump_format::strip_quotes(name).to_string())
        .ok_or_else(|| MigrateError::InvalidProfile {
            message: format!("profile has no '{}' setting", VISIBLE_NAME),
        })
}

impl ProfileStore {
    pub fn new(skip_duplicate_names: bool) -> Self {
        Self {
            skip_duplicate_names,
            ..Self::default()
        }
    }

    /// Returns `Ok(false)` when the profile was skipped as a duplicate name.
    pub fn add(&mut self, id: impl Into<String>, settings: Settings) -> Result<bool> {
        let id = id.into();
        let name = display_name(&settings)?;

        if let Some(existing) = self.profiles.get_mut(&id) {
            existing.name = name.clone();
            existing.settings = settings;
            if let Some(entry) = self.order.iter_mut().find(|(_, entry_id)| *entry_id == id) {
                entry.0 = name;
            }
            return Ok(true);
        }

        if self.skip_duplicate_names && self.order.iter().any(|(n, _)| *n == name) {
            tracing::warn!("Skipping duplicated profile \"{}\"", name);
            return Ok(false);
        }

        tracing::debug!("Adding profile {} ({})", id, name);
        self.order.push((name.clone(), id.clone()));
        self.profiles.insert(id.clone(), Profile { id, name, settings });
        Ok(true)
    }

    /// The identifier is not checked against the stored profiles.
    pub fn set_default(&mut self, id: impl Into<String>) {
        self.default_id = Some(id.into());
    }

    pub fn default_id(&self) -> Option<&str> {
        self.default_id.as_deref()
    }

    pub fn order(&self) -> &[(String, String)] {
        &self.order
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.get(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Profile> {
        self.order
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, id)| self.profiles.get(id))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn set_param_on_all(&mut self, name: &str, value: &str) {
        for profile in self.profiles.values_mut() {
            profile.settings.insert(name.to_string(), value.to_string());
        }

        // Display names are cached, keep them in step with visible-name.
        if name == VISIBLE_NAME {
            let display = dump_format::strip_quotes(value).to_string();
            for profile in self.profiles.values_mut() {
                profile.name = display.clone();
            }
            for entry in self.order.iter_mut() {
                entry.0 = display.clone();
            }
        }
    }

    /// Adds translated legacy profiles under fresh identifiers from `next_id`.
    ///
    /// With `carry_default`, the profile whose display name matches `legacy_default`
    /// becomes the store default. When that profile is skipped as a duplicate, the
    /// already stored profile of the same name becomes the default instead.
    pub fn merge_legacy<I, F>(
        &mut self,
        profiles: I,
        legacy_default: Option<&str>,
        carry_default: bool,
        mut next_id: F,
    ) -> Result<MergeStats>
    where
        I: IntoIterator<Item = Settings>,
        F: FnMut() -> String,
    {
        let mut stats = MergeStats::default();

        for settings in profiles {
            let id = next_id();
            let name = display_name(&settings)?;

            let added = self.add(id.clone(), settings)?;
            if added {
                stats.added += 1;
            } else {
                stats.skipped += 1;
            }

            if !carry_default || legacy_default != Some(name.as_str()) {
                continue;
            }
            let default_id = if added {
                Some(id)
            } else {
                self.find_by_name(&name).map(|p| p.id.clone())
            };
            if let Some(default_id) = default_id {
                tracing::info!("Setting default profile to \"{}\" ({})", name, default_id);
                self.set_default(default_id);
            }
        }

        Ok(stats)
    }

    pub fn serialize(&self) -> String {
        let ids: Vec<&str> = self.order.iter().map(|(_, id)| id.as_str()).collect();

        let mut global = BTreeMap::new();
        global.insert("list".to_string(), format_list_literal(&ids));
        if let Some(default_id) = &self.default_id {
            global.insert("default".to_string(), format!("'{}'", default_id));
        }

        let mut sections = vec![format_section(GLOBAL_SECTION, &global)];
        for id in ids {
            if let Some(profile) = self.profiles.get(id) {
                sections.push(format_section(&format!(":{}", id), &profile.settings));
            }
        }

        sections.join("\n\n")
    }

    pub fn deserialize(text: &str, skip_duplicate_names: bool) -> Result<Self> {
        let mut store = Self::new(skip_duplicate_names);
        let sections = dump_format::tokenize(text)?;
        if sections.is_empty() {
            return Ok(store);
        }

        let global = sections
            .iter()
            .find(|s| s.id == GLOBAL_SECTION)
            .ok_or_else(|| MigrateError::DumpParseError {
                line: 1,
                message: "missing [/] section".to_string(),
            })?;

        let list = global.get("list").ok_or_else(|| MigrateError::DumpParseError {
            line: global.line,
            message: "[/] section has no 'list' key".to_string(),
        })?;
        let ids = dump_format::parse_list_literal(list, global.line)?;

        for id in ids {
            let header = format!(":{}", id);
            let section = sections
                .iter()
                .find(|s| s.id == header)
                .ok_or_else(|| MigrateError::DumpParseError {
                    line: global.line,
                    message: format!("profile '{}' is listed but has no [{}] section", id, header),
                })?;
            let settings: Settings = section.entries.iter().cloned().collect();
            store.add(id, settings)?;
        }

        if let Some(default_id) = global.get("default") {
            let default_id = dump_format::strip_quotes(default_id);
            if store.get(default_id).is_some() {
                store.set_default(default_id);
            } else {
                // The default was dropped as a duplicate; follow it to the kept profile.
                let kept = sections
                    .iter()
                    .find(|s| s.id == format!(":{}", default_id))
                    .and_then(|s| s.get(VISIBLE_NAME))
                    .and_then(|name| store.find_by_name(dump_format::strip_quotes(name)))
                    .map(|p| p.id.clone());
                match kept {
                    Some(id) => store.set_default(id),
                    None => tracing::warn!(
                        "Default profile '{}' is not among the loaded profiles, clearing it",
                        default_id
                    ),
                }
            }
        }

        Ok(store)
    }

    pub fn summarize(&self) -> String {
        let mut lines = vec![
            match &self.default_id {
                Some(id) => format!("Default profile: \"{}\"", id),
                None => "Default profile: (none)".to_string(),
            },
            String::new(),
        ];

        let mut sorted: Vec<&(String, String)> = self.order.iter().collect();
        sorted.sort_by_key(|(name, _)| name.to_lowercase());

        for (name, id) in sorted {
            let marker = if self.default_id.as_deref() == Some(id.as_str()) {
                '*'
            } else {
                ' '
            };
            lines.push(format!(" {}  {}: {}", marker, id, name));
        }

        lines.join("\n")
    }
}
