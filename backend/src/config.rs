//! Server configuration read from the environment at start-up.
//!
//! | Variable        | Default                     |
//! |-----------------|-----------------------------|
//! | `HOST`          | `127.0.0.1`                 |
//! | `PORT`          | `3001`                      |
//! | `EXERCISES_DIR` | `<crate>/exercises`         |

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub exercises_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            exercises_dir: default_exercises_dir(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or blank values use defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("[SERVER] Invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            exercises_dir: get("EXERCISES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_exercises_dir),
        }
    }
}

fn default_exercises_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("exercises")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 3001);
        assert!(config.exercises_dir.ends_with("exercises"));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("EXERCISES_DIR", "/srv/lab/exercises"),
        ]));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.exercises_dir, PathBuf::from("/srv/lab/exercises"));
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "eighty"), ("HOST", " ")]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
    }
}
