use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub path: String,
}

/// Кто указывается автором изменений, пока нет аутентификации
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuditConfig {
    pub default_actor: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            default_actor: "system".into(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[database]
path = "target/db/cointrack.db"

[audit]
default_actor = "system"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current working directory
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    for config_path in candidate_config_paths() {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            return load_from_file(&config_path);
        }
        tracing::debug!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse(DEFAULT_CONFIG)
}

fn candidate_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            paths.push(exe_dir.join("config.toml"));
        }
    }
    paths.push(PathBuf::from("config.toml"));
    paths
}

pub fn load_from_file(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    parse(&contents)
}

fn parse(contents: &str) -> anyhow::Result<Config> {
    toml::from_str(contents).map_err(|e| anyhow::anyhow!("invalid config.toml: {e}"))
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(db_path);
        }
    }

    // Fallback: use relative to current directory
    db_path.to_path_buf()
}
