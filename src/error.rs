// Gestion des erreurs personnalisées

use std::fmt;
use std::error::Error as StdError;

#[derive(Debug)]
pub enum AppError {
    /// Ligne du script qui ne respecte pas la grammaire (numéro de ligne à partir de 1)
    ParseError { line: usize, message: String },
    ConfigError(String),
    IOError(std::io::Error),
    SerializationError(serde_json::Error),
}

impl AppError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        AppError::ParseError { line, message: message.into() }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ParseError { line, message } => write!(f, "Parse error at line {}: {}", line, message),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::IOError(err) => write!(f, "IO error: {}", err),
            AppError::SerializationError(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            AppError::IOError(err) => Some(err),
            AppError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IOError(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
