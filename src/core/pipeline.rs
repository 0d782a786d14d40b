use crate::core::legacy_reader::LegacyProfileReader;
use crate::core::profile_store::ProfileStore;
use crate::core::{ConfigProvider, ExtractedProfiles, MigrationResult, Pipeline, Storage, StoreBackend};
use crate::utils::error::Result;

pub fn new_profile_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// GConf -> dconf migration: read both stores, merge, then print or load.
pub struct MigrationPipeline<S: Storage, C: ConfigProvider, B: StoreBackend> {
    storage: S,
    config: C,
    backend: B,
    id_source: fn() -> String,
}

impl<S: Storage, C: ConfigProvider, B: StoreBackend> MigrationPipeline<S, C, B> {
    pub fn new(storage: S, config: C, backend: B) -> Self {
        Self {
            storage,
            config,
            backend,
            id_source: new_profile_id,
        }
    }

    /// Replaces UUIDv4 generation, mostly for reproducible output in tests.
    pub fn with_id_source(mut self, id_source: fn() -> String) -> Self {
        self.id_source = id_source;
        self
    }

    fn apply_overrides(&self, store: &mut ProfileStore) {
        for (name, value) in self.config.overrides() {
            tracing::info!("Setting all profiles preference \"{}\" to \"{}\"", name, value);
            store.set_param_on_all(&name, &value);
        }

        for directive in self.config.set_directives() {
            let Some((name, value)) = directive.split_once('=') else {
                tracing::warn!("Ignoring --set \"{}\": expected name=value", directive);
                continue;
            };
            tracing::info!("Setting all profiles preference \"{}\" to \"{}\"", name, value);
            store.set_param_on_all(name, value);
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, B: StoreBackend> Pipeline for MigrationPipeline<S, C, B> {
    async fn extract(&self) -> Result<ExtractedProfiles> {
        let mut extracted = ExtractedProfiles::default();

        if self.config.load_current_profiles() {
            tracing::debug!("Dumping current dconf profiles");
            extracted.current_dump = Some(self.backend.dump().await?);
        }

        if let Some(gconf_path) = self.config.gconf_path() {
            tracing::debug!("Reading GConf profiles from {}", gconf_path);
            let reader = LegacyProfileReader::open(gconf_path)?;
            extracted.legacy_default = reader.default_profile_name().map(str::to_string);
            extracted.legacy_profiles = reader.profiles().collect::<Result<Vec<_>>>()?;
        }

        Ok(extracted)
    }

    async fn transform(&self, data: ExtractedProfiles) -> Result<MigrationResult> {
        let skip_duplicates = self.config.skip_duplicate_names();
        let mut store = match &data.current_dump {
            Some(dump) => ProfileStore::deserialize(dump, skip_duplicates)?,
            None => ProfileStore::new(skip_duplicates),
        };
        tracing::debug!("Starting from {} existing profiles", store.len());

        let stats = store.merge_legacy(
            data.legacy_profiles,
            data.legacy_default.as_deref(),
            self.config.set_backup_profile_default(),
            self.id_source,
        )?;

        self.apply_overrides(&mut store);

        Ok(MigrationResult {
            dconf_load: store.serialize(),
            summary: store.summarize(),
            profile_count: store.len(),
            added: stats.added,
            skipped: stats.skipped,
        })
    }

    async fn load(&self, result: MigrationResult) -> Result<String> {
        if self.config.execute_action() {
            if self.config.execute_delete() {
                tracing::info!("Deleting all gnome terminal entries");
                self.backend.reset().await?;
            }

            tracing::info!("Loading new gnome terminal entries");
            self.backend.load(&result.dconf_load).await?;
            return Ok("dconf".to_string());
        }

        match self.config.output_path() {
            Some(path) => {
                let mut data = result.dconf_load.into_bytes();
                data.push(b'\n');
                self.storage.write_file(path, &data).await?;
                Ok(path.to_string())
            }
            None => {
                println!("{}", result.dconf_load);
                Ok("stdout".to_string())
            }
        }
    }
}
