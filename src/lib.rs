pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{dconf::DconfCommand, memory::MemoryBackend};
pub use config::{cli::LocalStorage, toml_config::SettingsFile, CliConfig};
pub use self::core::{
    etl::{EtlEngine, MigrationReport},
    legacy_reader::LegacyProfileReader,
    pipeline::MigrationPipeline,
    profile_store::ProfileStore,
};
pub use utils::error::{MigrateError, Result};
