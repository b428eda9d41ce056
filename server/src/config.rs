use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

/// Runtime configuration, loaded once at startup and passed into the
/// components that need it. Nothing below this layer reads the environment.
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub upload: UploadConfig,
}

/// Storage backend for uploaded images, selected by the `USE_S3` flag.
pub enum UploadConfig {
    Local { dir: PathBuf },
    S3 { bucket: String, region: String },
}

impl Config {
    pub fn load() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:3000"),
            upload: UploadConfig::load(),
        }
    }
}

impl UploadConfig {
    fn load() -> Self {
        let use_s3: bool = try_load("USE_S3", "false");

        if use_s3 {
            Self::S3 {
                bucket: env::var("AWS_S3_BUCKET").expect("AWS_S3_BUCKET must be set with USE_S3"),
                region: try_load("AWS_REGION", "us-east-1"),
            }
        } else {
            Self::Local {
                dir: PathBuf::from(try_load::<String>("UPLOAD_DIR", "uploads")),
            }
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
