//! Configuration loading from command-line flags and environment variables.
//!
//! Values are validated early so startup fails fast with actionable errors.

use clap::Parser;

use crate::error::AppError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Runtime configuration for the HTTP server and LLM provider.
#[derive(Debug, Clone, Parser)]
#[command(name = "translator-server", version, about)]
pub struct AppConfig {
    /// Host interface to bind, for example `127.0.0.1`.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// TCP port to bind.
    #[arg(
        long,
        env = "PORT",
        default_value_t = DEFAULT_PORT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub port: u16,

    /// Credential for the chat-completion provider.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Base URL of an OpenAI-compatible API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,

    /// Model identifier sent with every completion request.
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Upper bound on a single provider call, in seconds.
    #[arg(
        long,
        env = "OPENAI_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=MAX_REQUEST_TIMEOUT_SECS)
    )]
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Parses flags and environment, then validates the result.
    ///
    /// Exits the process with usage output on malformed flags, like any
    /// `clap` binary.
    pub fn load() -> Result<Self, AppError> {
        Self::parse().validated()
    }

    /// Normalizes whitespace and rejects values that would only fail later.
    pub fn validated(mut self) -> Result<Self, AppError> {
        self.host = self.host.trim().to_string();
        self.openai_api_key = self.openai_api_key.trim().to_string();
        self.openai_base_url = self.openai_base_url.trim().trim_end_matches('/').to_string();
        self.model = self.model.trim().to_string();

        if self.host.is_empty() {
            return Err(AppError::internal("invalid HOST; expected a non-empty value"));
        }
        if self.openai_api_key.is_empty() {
            return Err(AppError::internal(
                "OPENAI_API_KEY is empty; set it to a valid provider credential",
            ));
        }
        if !(self.openai_base_url.starts_with("http://")
            || self.openai_base_url.starts_with("https://"))
        {
            return Err(AppError::internal(format!(
                "invalid OPENAI_BASE_URL={:?}; expected an http(s) URL",
                self.openai_base_url
            )));
        }
        if self.model.is_empty() {
            return Err(AppError::internal("invalid OPENAI_MODEL; expected a non-empty value"));
        }
        Ok(self)
    }

    /// Address string accepted by `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::AppConfig;

    fn cfg() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            openai_api_key: "sk-test".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            request_timeout_secs: 30,
        }
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = AppConfig::try_parse_from([
            "translator-server",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--openai-api-key",
            "sk-flag",
            "--model",
            "gpt-4o-mini",
            "--request-timeout-secs",
            "5",
        ])
        .unwrap();
        assert_eq!(parsed.bind_addr(), "0.0.0.0:8080");
        assert_eq!(parsed.openai_api_key, "sk-flag");
        assert_eq!(parsed.model, "gpt-4o-mini");
        assert_eq!(parsed.request_timeout_secs, 5);
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        let base = ["translator-server", "--openai-api-key", "sk"];
        assert!(AppConfig::try_parse_from(base.iter().chain(&["--port", "0"])).is_err());
        assert!(
            AppConfig::try_parse_from(base.iter().chain(&["--request-timeout-secs", "601"]))
                .is_err()
        );
    }

    #[test]
    fn validation_trims_and_strips_trailing_slash() {
        let mut raw = cfg();
        raw.openai_api_key = "  sk-test \n".to_string();
        raw.openai_base_url = "http://localhost:11434/v1/".to_string();
        let validated = raw.validated().unwrap();
        assert_eq!(validated.openai_api_key, "sk-test");
        assert_eq!(validated.openai_base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn validation_rejects_blank_key_and_bad_url() {
        let mut blank_key = cfg();
        blank_key.openai_api_key = "   ".to_string();
        assert!(blank_key.validated().is_err());

        let mut bad_url = cfg();
        bad_url.openai_base_url = "api.openai.com".to_string();
        assert!(bad_url.validated().is_err());
    }
}
