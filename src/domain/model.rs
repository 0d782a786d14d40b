use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// dconf key -> already formatted dconf value. Sorted so sections serialize in key order.
pub type Settings = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub settings: Settings,
}

/// Raw entries of one GConf profile file, before translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyProfile {
    pub entries: Vec<(String, String)>,
}

impl LegacyProfile {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyGlobalConfig {
    pub default_profile: Option<String>,
    pub profile_names: Vec<String>,
}

/// Everything read from the outside world before any merging happens.
#[derive(Debug, Clone, Default)]
pub struct ExtractedProfiles {
    pub current_dump: Option<String>,
    pub legacy_profiles: Vec<Settings>,
    pub legacy_default: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MigrationResult {
    pub dconf_load: String,
    pub summary: String,
    pub profile_count: usize,
    pub added: usize,
    pub skipped: usize,
}
