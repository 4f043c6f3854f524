//! Configuration for Products API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse_or};
use core_config::{cors::CorsConfig, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_products::handlers::DEFAULT_BODY_LIMIT;
use std::path::PathBuf;

pub use core_config::Environment;

/// Where uploaded images live and how large a request body may be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    /// Flat directory holding `image_<digits>.<ext>` files, served at `/upload`
    pub upload_dir: PathBuf,
    pub body_limit: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("public/upload"),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl FromEnv for StorageConfig {
    /// `UPLOAD_DIR` (default `public/upload`), `UPLOAD_BODY_LIMIT_BYTES` (default 8 MiB)
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            upload_dir: PathBuf::from(env_or_default("UPLOAD_DIR", "public/upload")),
            body_limit: env_parse_or("UPLOAD_BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT)?,
        })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub postgres: PostgresConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let postgres = PostgresConfig::from_env()?; // DATABASE_URL is required
        let server = ServerConfig::from_env()?;
        let cors = CorsConfig::from_env()?;
        let storage = StorageConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            postgres,
            server,
            cors,
            storage,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_defaults() {
        temp_env::with_vars_unset(["UPLOAD_DIR", "UPLOAD_BODY_LIMIT_BYTES"], || {
            let config = StorageConfig::from_env().unwrap();
            assert_eq!(config, StorageConfig::default());
            assert_eq!(config.upload_dir, PathBuf::from("public/upload"));
            assert_eq!(config.body_limit, 8 * 1024 * 1024);
        });
    }

    #[test]
    fn test_storage_config_overrides() {
        temp_env::with_vars(
            [
                ("UPLOAD_DIR", Some("/var/lib/products/images")),
                ("UPLOAD_BODY_LIMIT_BYTES", Some("1048576")),
            ],
            || {
                let config = StorageConfig::from_env().unwrap();
                assert_eq!(config.upload_dir, PathBuf::from("/var/lib/products/images"));
                assert_eq!(config.body_limit, 1_048_576);
            },
        );
    }

    #[test]
    fn test_storage_config_rejects_bad_limit() {
        temp_env::with_var("UPLOAD_BODY_LIMIT_BYTES", Some("lots"), || {
            let err = StorageConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("UPLOAD_BODY_LIMIT_BYTES"));
        });
    }

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", None),
                ("CORS_ALLOWED_ORIGIN", Some("http://localhost:3000")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("DATABASE_URL"));
            },
        );
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/products")),
                ("CORS_ALLOWED_ORIGIN", Some("http://localhost:3000")),
                ("PORT", Some("4000")),
                ("APP_ENV", Some("production")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "products_api");
                assert_eq!(config.postgres.url(), "postgresql://localhost/products");
                assert_eq!(config.server.port, 4000);
                assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
                assert!(config.environment.is_production());
            },
        );
    }
}
