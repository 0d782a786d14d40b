use anyhow::Result;
use gterm_migrate::core::profile_store::ProfileStore;
use gterm_migrate::{CliConfig, EtlEngine, LocalStorage, MemoryBackend, MigrationPipeline};
use std::path::Path;
use tempfile::TempDir;

const GLOBAL: &str = r#"<?xml version="1.0"?>
<gconf>
	<entry name="profile_list" mtime="1400000000" type="list" ltype="string">
		<li type="string">
			<stringvalue>Default</stringvalue>
		</li>
		<li type="string">
			<stringvalue>Profile0</stringvalue>
		</li>
	</entry>
	<entry name="default_profile" mtime="1400000000" type="string">
		<stringvalue>Night</stringvalue>
	</entry>
</gconf>
"#;

fn profile_xml(name: &str, silent_bell: bool) -> String {
    format!(
        r#"<?xml version="1.0"?>
<gconf>
	<entry name="visible_name" mtime="1400000000" type="string">
		<stringvalue>{name}</stringvalue>
	</entry>
	<entry name="silent_bell" mtime="1400000000" type="bool" value="{silent_bell}"/>
	<entry name="background_darkness" mtime="1400000000" type="float" value="0.5"/>
	<entry name="palette" mtime="1400000000" type="string">
		<stringvalue>#000000000000:#ffffffffffff</stringvalue>
	</entry>
	<entry name="backspace_binding" mtime="1400000000" type="string">
		<stringvalue>ascii-del</stringvalue>
	</entry>
	<entry name="title_mode" mtime="1400000000" type="string">
		<stringvalue>replace</stringvalue>
	</entry>
	<entry name="word_chars" mtime="1400000000" type="string">
		<stringvalue>-A-Za-z0-9,./?%&amp;#:_=+@~</stringvalue>
	</entry>
</gconf>
"#
    )
}

fn write_gconf_tree(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root.join("global"))?;
    std::fs::write(root.join("global/%gconf.xml"), GLOBAL)?;
    for (dir, name, bell) in [("Default", "Default", true), ("Profile0", "Night", false)] {
        std::fs::create_dir_all(root.join("profiles").join(dir))?;
        std::fs::write(
            root.join("profiles").join(dir).join("%gconf.xml"),
            profile_xml(name, bell),
        )?;
    }
    Ok(())
}

const CURRENT_DUMP: &str = "[:b1dcc9dd-5262-4d8d-a863-c897e6d979b9]\n\
                            visible-name='Default'\n\
                            \n\
                            [/]\n\
                            list=['b1dcc9dd-5262-4d8d-a863-c897e6d979b9']\n\
                            default='b1dcc9dd-5262-4d8d-a863-c897e6d979b9'\n";

#[tokio::test]
async fn test_migrate_into_existing_store_and_execute() -> Result<()> {
    let gconf = TempDir::new()?;
    write_gconf_tree(gconf.path())?;

    let config = CliConfig {
        load_current_profiles: true,
        gconf_path: Some(gconf.path().to_string_lossy().into_owned()),
        skip_duplicate_names: true,
        set_backup_profile_default: true,
        set: vec!["default-size-columns=136".to_string()],
        execute_action: true,
        execute_delete: true,
        ..CliConfig::default()
    };

    let backend = MemoryBackend::new(CURRENT_DUMP);
    let pipeline = MigrationPipeline::new(LocalStorage::current_dir(), config, backend.clone());
    let report = EtlEngine::new(pipeline).run().await?;

    assert_eq!(report.destination, "dconf");
    assert_eq!(report.added, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(backend.reset_count().await, 1);

    let loaded = ProfileStore::deserialize(&backend.contents().await, false)?;
    assert_eq!(loaded.len(), 2);

    let night = loaded.find_by_name("Night").expect("Night profile migrated");
    assert_eq!(loaded.default_id(), Some(night.id.as_str()));
    assert_eq!(night.settings.get("audible-bell").unwrap(), "true");
    assert_eq!(
        night.settings.get("background-transparency-percent").unwrap(),
        "50"
    );
    assert_eq!(
        night.settings.get("palette").unwrap(),
        "['rgb(0,0,0)', 'rgb(255,255,255)']"
    );
    assert_eq!(night.settings.get("backspace-binding").unwrap(), "'ascii-delete'");
    assert_eq!(night.settings.get("default-size-columns").unwrap(), "136");
    assert!(!night.settings.contains_key("title-mode"));
    assert!(!night.settings.contains_key("word-chars"));

    let existing = loaded.get("b1dcc9dd-5262-4d8d-a863-c897e6d979b9").unwrap();
    assert_eq!(existing.settings.get("default-size-columns").unwrap(), "136");

    assert!(report.summary.contains(&format!(" *  {}: Night", night.id)));
    Ok(())
}

#[tokio::test]
async fn test_migrate_to_output_file() -> Result<()> {
    let gconf = TempDir::new()?;
    write_gconf_tree(gconf.path())?;
    let out = TempDir::new()?;

    let config = CliConfig {
        gconf_path: Some(gconf.path().to_string_lossy().into_owned()),
        output: Some("migrated.dconf".to_string()),
        ..CliConfig::default()
    };

    let pipeline = MigrationPipeline::new(
        LocalStorage::new(out.path()),
        config,
        MemoryBackend::default(),
    );
    let report = EtlEngine::new(pipeline).run().await?;
    assert_eq!(report.destination, "migrated.dconf");

    let text = std::fs::read_to_string(out.path().join("migrated.dconf"))?;
    let store = ProfileStore::deserialize(&text, false)?;

    let names: Vec<&str> = store.order().iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Default", "Night"]);
    // default is only carried with --set-backup-profile-default
    assert_eq!(store.default_id(), None);
    assert_eq!(
        store.find_by_name("Default").unwrap().settings.get("audible-bell").unwrap(),
        "false"
    );
    Ok(())
}

#[tokio::test]
async fn test_broken_legacy_profile_aborts_run() -> Result<()> {
    let gconf = TempDir::new()?;
    write_gconf_tree(gconf.path())?;
    std::fs::write(
        gconf.path().join("profiles/Profile0/%gconf.xml"),
        r#"<gconf><entry name="bold_color" type="string"><stringvalue>#zz</stringvalue></entry></gconf>"#,
    )?;

    let config = CliConfig {
        gconf_path: Some(gconf.path().to_string_lossy().into_owned()),
        execute_action: true,
        ..CliConfig::default()
    };
    let backend = MemoryBackend::new(CURRENT_DUMP);
    let pipeline = MigrationPipeline::new(LocalStorage::current_dir(), config, backend.clone());

    let err = EtlEngine::new(pipeline).run().await.unwrap_err();
    assert!(matches!(err, gterm_migrate::MigrateError::ValueError { .. }));
    // nothing was loaded
    assert_eq!(backend.contents().await, CURRENT_DUMP);
    Ok(())
}
