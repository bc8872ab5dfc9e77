use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which document parsing backend extracts resume text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParserBackend {
    /// Remote LlamaParse service (default).
    LlamaParse(LlamaParseConfig),
    /// In-process `pdf-extract`. Needs no credentials.
    Local,
}

/// Settings for the remote LlamaParse service.
#[derive(Debug, Clone, PartialEq)]
pub struct LlamaParseConfig {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub result_type: String,
    pub poll_interval: Duration,
    pub max_wait: Duration,
}

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to each component's constructor.
/// `from_env` fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub parser: ParserBackend,
    pub http_timeout: Duration,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parser = match optional(&lookup, "DOCUMENT_PARSER", "llama_parse").as_str() {
            "llama_parse" => ParserBackend::LlamaParse(LlamaParseConfig {
                api_key: require(&lookup, "LLAMA_PARSE_API_KEY")?,
                base_url: trim_base(optional(
                    &lookup,
                    "LLAMA_PARSE_BASE_URL",
                    "https://api.cloud.llamaindex.ai",
                )),
                language: optional(&lookup, "LLAMA_PARSE_LANGUAGE", "en"),
                result_type: match optional(&lookup, "LLAMA_PARSE_RESULT_TYPE", "markdown").as_str()
                {
                    t @ ("markdown" | "text") => t.to_string(),
                    other => bail!(
                        "LLAMA_PARSE_RESULT_TYPE must be 'markdown' or 'text', got '{other}'"
                    ),
                },
                poll_interval: Duration::from_millis(parse_num(
                    &lookup,
                    "LLAMA_PARSE_POLL_INTERVAL_MS",
                    1000,
                )?),
                max_wait: Duration::from_secs(parse_num(&lookup, "LLAMA_PARSE_MAX_WAIT_SECS", 120)?),
            }),
            "local" => ParserBackend::Local,
            other => bail!("DOCUMENT_PARSER must be 'llama_parse' or 'local', got '{other}'"),
        };

        Ok(Config {
            openai_api_key: require(&lookup, "OPENAI_API_KEY")?,
            openai_base_url: trim_base(optional(
                &lookup,
                "OPENAI_BASE_URL",
                "https://api.openai.com",
            )),
            parser,
            http_timeout: Duration::from_secs(parse_num(&lookup, "HTTP_TIMEOUT_SECS", 30)?),
            max_upload_bytes: parse_num(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            port: parse_num(&lookup, "PORT", 8000)?,
            rust_log: optional(&lookup, "RUST_LOG", "info"),
        })
    }
}

fn require<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Result<String> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_num<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
