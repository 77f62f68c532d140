//! Configuration file loading with temporary files

use anyhow::Result;
use ccs::config::{Config, ConfigSource, load_config, load_config_with_fallback};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_full_config_file() -> Result<()> {
    let file = config_file(
        r#"
[server]
host = "127.0.0.1"
threads = 2

[stats]
report_interval = 5

[discovery]
enabled = false
"#,
    )?;

    let config = load_config(file.path().to_str().unwrap())?;
    assert_eq!(config.server.host.as_str(), "127.0.0.1");
    assert_eq!(config.server.threads.map(|t| t.get()), Some(2));
    assert_eq!(config.stats.report_interval, Duration::from_secs(5));
    assert!(!config.discovery.enabled);
    Ok(())
}

#[test]
fn test_config_round_trips_through_file() -> Result<()> {
    let mut config = Config::default();
    config.stats.report_interval = Duration::from_secs(42);
    config.discovery.enabled = false;

    let file = config_file(&toml::to_string_pretty(&config)?)?;
    let loaded = load_config(file.path().to_str().unwrap())?;
    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn test_missing_file_falls_back_to_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ccs.toml");

    let (config, source) = load_config_with_fallback(path.to_str().unwrap())?;
    assert_eq!(config, Config::default());
    assert_eq!(source, ConfigSource::Defaults);
    Ok(())
}

#[test]
fn test_zero_report_interval_rejected() -> Result<()> {
    let file = config_file("[stats]\nreport_interval = 0\n")?;
    let err = load_config(file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_unknown_sections_are_ignored() -> Result<()> {
    let file = config_file("[metrics]\nenabled = true\n")?;
    let config = load_config(file.path().to_str().unwrap())?;
    assert_eq!(config, Config::default());
    Ok(())
}

#[test]
fn test_wrong_type_rejected() -> Result<()> {
    let file = config_file("[discovery]\nenabled = \"yes\"\n")?;
    assert!(load_config(file.path().to_str().unwrap()).is_err());
    Ok(())
}
