#[cfg(test)]
mod tests {
    use super::super::config::{CliConfig, FileConfig, OutputFormat, Overrides};
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cloudbackup.toml");
        std::fs::write(&path, contents).unwrap();
        (temp_dir, path)
    }

    fn file_config() -> FileConfig {
        FileConfig {
            host: Some("file.example.com".to_string()),
            access_key: Some("file-access".to_string()),
            secret_key: Some("file-secret".to_string()),
            timeout: Some(30),
            format: Some(OutputFormat::Json),
        }
    }

    #[test]
    fn test_read_config_file() {
        let (_temp, path) = write_config(
            r#"
host = "panel.example.com"
access-key = "AK"
secret-key = "SK"
timeout = 5
format = "json"
"#,
        );

        let config = FileConfig::load(Some(&path)).unwrap();

        assert_eq!(config.host.as_deref(), Some("panel.example.com"));
        assert_eq!(config.access_key.as_deref(), Some("AK"));
        assert_eq!(config.secret_key.as_deref(), Some("SK"));
        assert_eq!(config.timeout, Some(5));
        assert_eq!(config.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_partial_config_file() {
        let (_temp, path) = write_config("host = \"panel.example.com\"\n");

        let config = FileConfig::load(Some(&path)).unwrap();

        assert_eq!(config.host.as_deref(), Some("panel.example.com"));
        assert!(config.access_key.is_none());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        assert!(FileConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let (_temp, path) = write_config("host = [unterminated");

        assert!(FileConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_resolve_prefers_overrides() {
        let overrides = Overrides {
            host: Some("flag.example.com".to_string()),
            secret_key: Some("flag-secret".to_string()),
            format: Some(OutputFormat::Table),
            ..Default::default()
        };

        let config = CliConfig::resolve(overrides, file_config()).unwrap();

        assert_eq!(config.host, "flag.example.com");
        assert_eq!(config.access_key, "file-access");
        assert_eq!(config.secret_key, "flag-secret");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_resolve_ignores_blank_overrides() {
        let overrides = Overrides {
            host: Some("  ".to_string()),
            ..Default::default()
        };

        let config = CliConfig::resolve(overrides, file_config()).unwrap();

        assert_eq!(config.host, "file.example.com");
    }

    #[test]
    fn test_resolve_defaults() {
        let overrides = Overrides {
            host: Some("panel.example.com".to_string()),
            access_key: Some("AK".to_string()),
            secret_key: Some("SK".to_string()),
            ..Default::default()
        };

        let config = CliConfig::resolve(overrides, FileConfig::default()).unwrap();

        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_resolve_requires_credentials() {
        let overrides = Overrides {
            host: Some("panel.example.com".to_string()),
            access_key: Some("AK".to_string()),
            ..Default::default()
        };

        let err = CliConfig::resolve(overrides, FileConfig::default()).unwrap_err();

        assert!(err.to_string().contains("secret key"));
    }

    #[test]
    fn test_resolve_rejects_zero_timeout() {
        let overrides = Overrides {
            timeout: Some(0),
            ..Default::default()
        };

        assert!(CliConfig::resolve(overrides, file_config()).is_err());
    }

    #[test]
    fn test_debug_masks_secret() {
        let config = CliConfig::resolve(Overrides::default(), file_config()).unwrap();

        let debug = format!("{:?}", config);
        assert!(!debug.contains("file-secret"));
    }
}
