use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::shared::llm::RetryPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub llm: LlmConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
    /// Directory of `.jinja` files overriding the built-in prompt templates
    pub prompt_template_dir: Option<PathBuf>,
}

/// Supported language model providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

impl LlmProvider {
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini-2.0-flash",
            LlmProvider::OpenAi => "gpt-4o-mini",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            LlmProvider::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// Provider-specific environment variables checked after `LLM_API_KEY`
    fn api_key_fallback_vars(&self) -> &'static [&'static str] {
        match self {
            LlmProvider::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
            LlmProvider::OpenAi => &["OPENAI_API_KEY"],
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" | "googleai" => Ok(LlmProvider::Gemini),
            "openai" => Ok(LlmProvider::OpenAi),
            other => Err(format!(
                "Invalid LLM_PROVIDER '{}': expected 'gemini' or 'openai'",
                other
            )),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Gemini => f.write_str("gemini"),
            LlmProvider::OpenAi => f.write_str("openai"),
        }
    }
}

/// Language model gateway configuration
#[derive(Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Timeout for a single inference attempt
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

// Keep the API key out of logs
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    /// Read configuration from the process environment (`.env` is loaded by `main`)
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_env()?,
            llm: LlmConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 64 * 1024; // 64KB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        let prompt_template_dir = env::var("PROMPT_TEMPLATE_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
            prompt_template_dir,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LlmConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let provider = env::var("LLM_PROVIDER")
            .unwrap_or_else(|_| "gemini".to_string())
            .parse::<LlmProvider>()?;

        let api_key = std::iter::once("LLM_API_KEY")
            .chain(provider.api_key_fallback_vars().iter().copied())
            .find_map(|name| env::var(name).ok().filter(|s| !s.is_empty()))
            .ok_or_else(|| {
                format!(
                    "LLM_API_KEY (or {}) environment variable is required",
                    provider.api_key_fallback_vars().join(" / ")
                )
            })?;

        let model = env::var("LLM_MODEL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        let base_url = env::var("LLM_BASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| provider.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string();

        let request_timeout = parse_timeout_secs(
            &env::var("LLM_TIMEOUT_SECS").unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string()),
        )?;

        let defaults = RetryPolicy::default();

        let max_retries = match env::var("LLM_MAX_RETRIES") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|_| "LLM_MAX_RETRIES must be a valid number".to_string())?,
            Err(_) => defaults.max_retries,
        };

        let base_delay = match env::var("LLM_RETRY_BASE_DELAY_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "LLM_RETRY_BASE_DELAY_MS must be a valid number".to_string())?,
            Err(_) => defaults.base_delay,
        };

        let max_delay = match env::var("LLM_RETRY_MAX_DELAY_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "LLM_RETRY_MAX_DELAY_MS must be a valid number".to_string())?,
            Err(_) => defaults.max_delay,
        };

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
            request_timeout,
            retry: RetryPolicy {
                max_retries,
                base_delay,
                max_delay,
            },
        })
    }
}

/// Per-attempt timeout in whole seconds; zero would fail every call
fn parse_timeout_secs(raw: &str) -> Result<Duration, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err("LLM_TIMEOUT_SECS must be greater than 0".to_string()),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => Err("LLM_TIMEOUT_SECS must be a valid number".to_string()),
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Promptsaz API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for Promptsaz".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
