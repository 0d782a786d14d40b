use clap::Parser;
use gterm_migrate::utils::error::{ErrorSeverity, MigrateError};
use gterm_migrate::utils::{logger, validation::Validate};
use gterm_migrate::{CliConfig, EtlEngine, LocalStorage, MigrationPipeline, SettingsFile};

fn exit_code(e: &MigrateError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: MigrateError) -> ! {
    tracing::error!(
        "{} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("error: {}", e.user_friendly_message());
    eprintln!("hint: {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

#[tokio::main]
async fn main() {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    let settings = match &config.config {
        Some(path) => {
            tracing::debug!("Loading settings from {}", path);
            match SettingsFile::from_file(path) {
                Ok(settings) => settings,
                Err(e) => fail(e),
            }
        }
        None => SettingsFile::default(),
    };
    if let Err(e) = settings.validate() {
        fail(e);
    }
    config.apply_settings_file(&settings);

    if let Err(e) = config.validate() {
        fail(e);
    }
    tracing::debug!("CLI config: {:?}", config);

    let backend = config.dconf_command();
    let pipeline = MigrationPipeline::new(LocalStorage::current_dir(), config, backend);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            tracing::debug!("Result sent to {}", report.destination);
            eprintln!("{}", report.summary);
        }
        Err(e) => fail(e),
    }
}
