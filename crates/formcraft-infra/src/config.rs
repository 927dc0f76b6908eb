//! Global configuration loader for Formcraft.
//!
//! Reads `config.toml` from the data directory (`~/.formcraft/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};

use formcraft_types::config::GlobalConfig;

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(mut config) => {
            if config.model.reset_zero_timeout() {
                tracing::warn!(
                    "model.timeout_secs = 0 in {} is not allowed, using {}s",
                    config_path.display(),
                    config.model.timeout_secs
                );
            }
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `FORMCRAFT_DATA_DIR` environment variable
/// 2. `~/.formcraft`
/// 3. `./.formcraft`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FORMCRAFT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".formcraft");
    }

    PathBuf::from(".formcraft")
}

/// SQLite URL for the database inside `data_dir`.
pub fn database_url(data_dir: &Path) -> String {
    format!(
        "sqlite://{}?mode=rwc",
        data_dir.join("formcraft.db").display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.model.name, "deepseek-coder");
        assert_eq!(config.model.timeout_secs, 120);
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[model]
endpoint = "http://gpu-box:11434/api/generate"
name = "llama3.1"
timeout_secs = 45
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.model.endpoint, "http://gpu-box:11434/api/generate");
        assert_eq!(config.model.name, "llama3.1");
        assert_eq!(config.model.timeout_secs, 45);
    }

    #[tokio::test]
    async fn load_global_config_zero_timeout_uses_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "[model]\nname = \"llama3.1\"\ntimeout_secs = 0\n",
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.model.name, "llama3.1");
        assert_eq!(config.model.timeout_secs, 120);
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.model.name, "deepseek-coder");
    }

    #[test]
    fn database_url_points_into_data_dir() {
        let url = database_url(Path::new("/tmp/fc"));
        assert!(url.starts_with("sqlite:///tmp/fc/formcraft.db"));
        assert!(url.ends_with("?mode=rwc"));
    }
}
