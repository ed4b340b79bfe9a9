//! TOML configuration for the tunable solvers.
//!
//! Every config struct derives `Deserialize` with `#[serde(default)]`, so a
//! file only needs the keys it changes:
//!
//! ```
//! use ai_coursework::config;
//! use ai_coursework::pente::PlayerConfig;
//!
//! let cfg: PlayerConfig = config::from_toml_str("depth = 3\ncandidate_radius = 2").unwrap();
//! assert_eq!(cfg.depth, 3);
//! assert_eq!(cfg.low_clock_depth, 1);
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

pub fn from_toml_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(s)?)
}

pub fn load_toml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    from_toml_str(&contents)
}

/// [`load_toml`] when a path is given, else `T::default()`.
pub fn load_or_default<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T, ConfigError> {
    match path {
        Some(p) => load_toml(p),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pente::PlayerConfig;
    use crate::resolution::ProverConfig;

    #[test]
    fn it_loads_from_file() {
        let path = std::env::temp_dir().join(format!("ai-coursework-config-{}.toml", std::process::id()));
        std::fs::write(&path, "max_clauses = 50\n").unwrap();
        let cfg: ProverConfig = load_toml(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(cfg.max_clauses, 50);
        assert!(cfg.factoring);
    }

    #[test]
    fn missing_path_gives_defaults() {
        let cfg: PlayerConfig = load_or_default(None).unwrap();
        assert_eq!(cfg, PlayerConfig::default());
    }

    #[test]
    fn it_reports_errors() {
        assert!(matches!(from_toml_str::<ProverConfig>("max_clauses = \"lots\""), Err(ConfigError::Toml(_))));
        let missing = load_toml::<ProverConfig>("/nonexistent/ai-coursework.toml");
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
