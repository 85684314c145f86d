//! Configuración del runner desde variables de entorno y merge de la
//! configuración de componentes.
//!
//! Variables reconocidas (todas opcionales):
//! - `NLUFLOW_STORAGE_DIR`: raíz del `LocalModelStorage` (default
//!   `.nluflow/models`).
//! - `NLUFLOW_PARALLEL_BATCH`: procesa lotes de mensajes en paralelo
//!   (default `true`).
//! - `NLUFLOW_OUTPUT_CACHE`: reutiliza outputs cacheados por fingerprint
//!   (default `true`).

mod merge;

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

pub use merge::{merge_json, resolve_config};

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_STORAGE_DIR: &str = ".nluflow/models";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub storage_dir: PathBuf,
    pub parallel_batch: bool,
    pub output_cache: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
               parallel_batch: true,
               output_cache: true }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        let storage_dir = env::var("NLUFLOW_STORAGE_DIR").map(PathBuf::from).unwrap_or(defaults.storage_dir);
        let parallel_batch = env::var("NLUFLOW_PARALLEL_BATCH").ok()
                                                               .and_then(|v| parse_flag(&v))
                                                               .unwrap_or(defaults.parallel_batch);
        let output_cache = env::var("NLUFLOW_OUTPUT_CACHE").ok()
                                                           .and_then(|v| parse_flag(&v))
                                                           .unwrap_or(defaults.output_cache);
        Self { storage_dir,
               parallel_batch,
               output_cache }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn defaults_enable_batch_and_cache() {
        let cfg = EngineConfig::default();
        assert!(cfg.parallel_batch && cfg.output_cache);
        assert_eq!(cfg.storage_dir, PathBuf::from(DEFAULT_STORAGE_DIR));
    }

    #[test]
    fn from_env_reads_overrides() {
        env::set_var("NLUFLOW_STORAGE_DIR", "/tmp/nluflow-models");
        env::set_var("NLUFLOW_PARALLEL_BATCH", "off");
        env::set_var("NLUFLOW_OUTPUT_CACHE", "0");
        let cfg = EngineConfig::from_env();
        env::remove_var("NLUFLOW_STORAGE_DIR");
        env::remove_var("NLUFLOW_PARALLEL_BATCH");
        env::remove_var("NLUFLOW_OUTPUT_CACHE");

        assert_eq!(cfg,
                   EngineConfig { storage_dir: PathBuf::from("/tmp/nluflow-models"),
                                  parallel_batch: false,
                                  output_cache: false });
    }
}
