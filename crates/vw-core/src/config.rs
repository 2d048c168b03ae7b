//! Configuration module
//!
//! This module provides configuration structures for both workers. Values come
//! from the process environment (a `.env` file is honoured in development).
//! Empty values are treated as unset.

use std::env;
use std::str::FromStr;

use crate::constants::CLAMAV_TIMEOUT_SECS;
use crate::storage_types::StorageBackend;

// Common constants
const DEFAULT_AWS_REGION: &str = "us-east-1";
const DEFAULT_API_URL: &str = "https://api.video-window.com";
const DEFAULT_CLOUDFRONT_DOMAIN: &str = "d3vw-feed.cloudfront.net";
const DEFAULT_SNS_TOPIC_ARN: &str =
    "arn:aws:sns:us-east-1:4815162342:video-window-virus-scan-callback";
const DEFAULT_CLAMAV_HOST: &str = "localhost";
const DEFAULT_CLAMAV_PORT: u16 = 3310;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Which scanning engine the upload scanner uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEngineKind {
    /// Placeholder engine that reports every buffer as clean.
    Stub,
    /// ClamAV daemon over TCP.
    ClamAv,
}

impl FromStr for ScanEngineKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stub" => Ok(ScanEngineKind::Stub),
            "clamav" => Ok(ScanEngineKind::ClamAv),
            _ => Err(anyhow::anyhow!("Invalid scan engine: {}", s)),
        }
    }
}

/// Base configuration shared by both workers
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub environment: String,
    pub aws_region: String,
    pub log_format: LogFormat,
}

/// Feed-prefetch worker configuration
#[derive(Clone, Debug)]
pub struct PrefetchConfig {
    /// Trending API base URL, without trailing slash.
    pub api_url: String,
    pub service_token: Option<String>,
    /// Unset disables invalidation entirely (prewarm becomes a no-op).
    pub cloudfront_distribution_id: Option<String>,
    pub cloudfront_domain: String,
}

/// Upload-scan worker configuration
#[derive(Clone, Debug)]
pub struct ScanWorkerConfig {
    pub sns_topic_arn: String,
    pub scan_engine: ScanEngineKind,
    pub clamav_host: String,
    pub clamav_port: u16,
    pub clamav_timeout_secs: u64,
    pub storage_backend: StorageBackend,
    pub local_storage_path: Option<String>,
}

/// Application configuration for both workers.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub prefetch: PrefetchConfig,
    pub scan: ScanWorkerConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| -> Option<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let log_format = match get("LOG_FORMAT") {
            Some(v) => v.parse::<LogFormat>()?,
            None if is_production_env(&environment) => LogFormat::Json,
            None => LogFormat::Pretty,
        };

        let base = BaseConfig {
            environment,
            aws_region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            log_format,
        };

        let prefetch = PrefetchConfig {
            api_url: get("SERVERPOD_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            service_token: get("SERVERPOD_SERVICE_TOKEN"),
            cloudfront_distribution_id: get("CLOUDFRONT_DISTRIBUTION_ID"),
            cloudfront_domain: get("CLOUDFRONT_DOMAIN")
                .unwrap_or_else(|| DEFAULT_CLOUDFRONT_DOMAIN.to_string()),
        };

        let scan = ScanWorkerConfig {
            sns_topic_arn: get("SNS_TOPIC_ARN")
                .unwrap_or_else(|| DEFAULT_SNS_TOPIC_ARN.to_string()),
            scan_engine: get("SCAN_ENGINE")
                .map(|v| v.parse::<ScanEngineKind>())
                .transpose()?
                .unwrap_or(ScanEngineKind::Stub),
            clamav_host: get("CLAMAV_HOST").unwrap_or_else(|| DEFAULT_CLAMAV_HOST.to_string()),
            clamav_port: get("CLAMAV_PORT")
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(DEFAULT_CLAMAV_PORT),
            clamav_timeout_secs: get("CLAMAV_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(CLAMAV_TIMEOUT_SECS),
            storage_backend: get("STORAGE_BACKEND")
                .map(|v| v.parse::<StorageBackend>())
                .transpose()?
                .unwrap_or(StorageBackend::S3),
            local_storage_path: get("LOCAL_STORAGE_PATH"),
        };

        let config = Config {
            base,
            prefetch,
            scan,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.scan.storage_backend == StorageBackend::Local
            && self.scan.local_storage_path.is_none()
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH is required when STORAGE_BACKEND=local"
            ));
        }
        if self.prefetch.cloudfront_domain.contains('/') {
            return Err(anyhow::anyhow!(
                "CLOUDFRONT_DOMAIN must be a bare host name, got {}",
                self.prefetch.cloudfront_domain
            ));
        }
        Ok(())
    }

    /// Check if the workers are running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.base.environment)
    }
}

fn is_production_env(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}
