use reqwest::Url;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Browser origin of the development front-end.
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3001";

const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub common: core_config::Config,
    pub upstream: UpstreamConfig,
    pub cors: CorsConfig,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Chat-completions endpoint the prompt is posted to.
    pub api_url: Url,
    /// Bearer credential for the upstream API.
    pub api_key: Secret<String>,
    /// Upper bound on a single upstream call.
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl SummarizerConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let api_url = parse_api_url(&get_env("API_URL", None)?)?;
        let api_key = get_env("API_KEY", None)?;

        let timeout_secs = get_env(
            "UPSTREAM_TIMEOUT_SECS",
            Some(&DEFAULT_UPSTREAM_TIMEOUT_SECS.to_string()),
        )?
        .parse::<u64>()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS is invalid: {}", e))
        })?;

        let allowed_origins =
            parse_origins(&get_env("CORS_ALLOWED_ORIGINS", Some(DEFAULT_ALLOWED_ORIGIN))?);

        Ok(SummarizerConfig {
            common,
            upstream: UpstreamConfig {
                api_url,
                api_key: Secret::new(api_key),
                timeout: Duration::from_secs(timeout_secs),
            },
            cors: CorsConfig { allowed_origins },
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
        })
    }
}

/// Accept only absolute http(s) URLs for the upstream endpoint.
pub fn parse_api_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw)
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("API_URL is not a valid URL: {}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::ConfigError(anyhow::anyhow!(
            "API_URL must use http or https, got '{}'",
            other
        ))),
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a variable; empty values count as unset.
fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key).ok().filter(|v| !v.trim().is_empty()) {
        Some(val) => Ok(val),
        None => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}
