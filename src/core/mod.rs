pub mod dump_format;
pub mod etl;
pub mod legacy_reader;
pub mod pipeline;
pub mod profile_store;
pub mod translator;

pub use crate::domain::model::{ExtractedProfiles, MigrationResult, Profile, Settings};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, StoreBackend};
pub use crate::utils::error::Result;
