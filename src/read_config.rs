// Module de lecture de configuration (fichier TOML optionnel)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use crate::error::{AppError, Result};
use crate::lsa::SyncPolicy;
use crate::report::ReportFormat;

/// Variable d'environnement consultée quand `--config` n'est pas donné
pub const CONFIG_ENV_VAR: &str = "LSDB_SIM_CONFIG";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Arrêt à la première ligne invalide ; sinon la ligne est ignorée
    #[serde(default = "default_strict")]
    pub strict: bool,
    #[serde(default)]
    pub output_format: ReportFormat,
    #[serde(default)]
    pub lsdb_sync: SyncPolicy,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_strict() -> bool {
    true
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            strict: default_strict(),
            output_format: ReportFormat::default(),
            lsdb_sync: SyncPolicy::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Lit la configuration depuis `path`
pub fn read_config_file<P: AsRef<Path>>(path: P) -> Result<SimulationConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AppError::ConfigError(format!("Config file not found: {}", path.display())));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| AppError::ConfigError(format!("Failed to read config file {}: {}", path.display(), e)))?;

    let config: SimulationConfig = toml::from_str(&content)
        .map_err(|e| AppError::ConfigError(format!("Failed to parse config file {}: {}", path.display(), e)))?;

    log::info!("Loaded configuration from {}", path.display());
    log::debug!("Config: {:?}", config);

    Ok(config)
}

/// Choisit la configuration : chemin explicite, puis variable d'environnement,
/// puis valeurs par défaut.
pub fn load_config(explicit_path: Option<&str>) -> Result<SimulationConfig> {
    if let Some(path) = explicit_path {
        return read_config_file(path);
    }
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) if !path.is_empty() => read_config_file(path),
        _ => Ok(SimulationConfig::default()),
    }
}
