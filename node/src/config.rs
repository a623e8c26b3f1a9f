// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_BIND_ADDR: &str = "VREG_BIND_ADDR";
pub const ENV_IMAGE_PATH: &str = "VREG_IMAGE_PATH";
pub const ENV_AUTH_TOKEN: &str = "VREG_AUTH_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    InvalidBindAddr { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    /// Backing image file. `None` keeps the window in memory only.
    pub image_path: Option<PathBuf>,
    /// Bearer token required on every route when set.
    pub auth_token: Option<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8443)),
            image_path: Some(PathBuf::from("vreg.bin")),
            auth_token: None,
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by `VREG_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(value) = lookup(ENV_BIND_ADDR) {
            cfg.bind_addr = value.parse().map_err(|_| ConfigError::InvalidBindAddr {
                var: ENV_BIND_ADDR,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_IMAGE_PATH) {
            cfg.image_path = if value.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }

        cfg.auth_token = lookup(ENV_AUTH_TOKEN).filter(|t| !t.is_empty());

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let cfg = NodeConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.bind_addr.port(), 8443);
        assert_eq!(cfg.image_path, Some(PathBuf::from("vreg.bin")));
        assert!(cfg.auth_token.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let cfg = NodeConfig::from_lookup(lookup_from(&[
            (ENV_BIND_ADDR, "0.0.0.0:9000"),
            (ENV_IMAGE_PATH, "/tmp/regs.bin"),
            (ENV_AUTH_TOKEN, "secret"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(cfg.image_path, Some(PathBuf::from("/tmp/regs.bin")));
        assert_eq!(cfg.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_empty_image_path_means_memory() {
        let cfg = NodeConfig::from_lookup(lookup_from(&[(ENV_IMAGE_PATH, "")])).unwrap();
        assert!(cfg.image_path.is_none());
    }

    #[test]
    fn test_bad_bind_addr() {
        let res = NodeConfig::from_lookup(lookup_from(&[(ENV_BIND_ADDR, "not-an-addr")]));
        assert!(matches!(res, Err(ConfigError::InvalidBindAddr { .. })));
    }
}
