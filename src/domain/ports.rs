use crate::domain::model::{ExtractedProfiles, MigrationResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Output sink for the rendered dconf text.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// The target store, reached through its dump/load/reset commands.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    async fn dump(&self) -> Result<String>;
    async fn load(&self, text: &str) -> Result<()>;
    async fn reset(&self) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn load_current_profiles(&self) -> bool;
    fn gconf_path(&self) -> Option<&str>;
    fn skip_duplicate_names(&self) -> bool;
    fn set_backup_profile_default(&self) -> bool;
    /// Raw `name=value` directives in command line order.
    fn set_directives(&self) -> &[String];
    /// Overrides from the settings file, applied before `set_directives`.
    fn overrides(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
    fn execute_action(&self) -> bool;
    fn execute_delete(&self) -> bool;
    /// `None` means stdout.
    fn output_path(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractedProfiles>;
    async fn transform(&self, data: ExtractedProfiles) -> Result<MigrationResult>;
    async fn load(&self, result: MigrationResult) -> Result<String>;
}
