use std::env;
use std::str::FromStr;

use log::info;
use reqwest::Url;

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_FALLBACK_TEXT: &str = "[ERROR]";

/// Known deployments of the ask page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// `POST /` with `prompt`, reads `output`.
    Prompt,
    /// `POST /ask` with `text`, reads `answer`.
    Ask,
    /// `POST /api/chat` with `message`, reads `reply`, keeps a transcript.
    Chat,
    /// `POST /api/chat` with `message`, reads `respuesta`, keeps a transcript.
    Respuesta,
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompt" => Ok(Preset::Prompt),
            "ask" => Ok(Preset::Ask),
            "chat" => Ok(Preset::Chat),
            "respuesta" => Ok(Preset::Respuesta),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub endpoint: String,
    pub request_field: String,
    pub response_field: String,
    pub loading_text: String,
    pub fallback_text: String,
    pub transcript: bool,
}

impl ClientConfig {
    pub fn preset(preset: Preset, base_url: Url) -> Self {
        let (endpoint, request_field, response_field, loading_text, transcript) = match preset {
            Preset::Prompt => ("/", "prompt", "output", "Pensant...", false),
            Preset::Ask => ("/ask", "text", "answer", "Thinking...", false),
            Preset::Chat => ("/api/chat", "message", "reply", "...", true),
            Preset::Respuesta => ("/api/chat", "message", "respuesta", "Escribiendo...", true),
        };

        Self {
            base_url,
            endpoint: endpoint.to_string(),
            request_field: request_field.to_string(),
            response_field: response_field.to_string(),
            loading_text: loading_text.to_string(),
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
            transcript,
        }
    }

    /// Build the configuration from `ASK_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let preset = match lookup("ASK_PRESET") {
            Some(name) => name.parse()?,
            None => Preset::Prompt,
        };

        let base_url = lookup("ASK_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_url(&base_url)?;
        info!("Using {:?} preset against {}", preset, base_url);

        let mut config = Self::preset(preset, base_url);

        if let Some(endpoint) = lookup("ASK_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Some(field) = lookup("ASK_REQUEST_FIELD") {
            config.request_field = field;
        }
        if let Some(field) = lookup("ASK_RESPONSE_FIELD") {
            config.response_field = field;
        }
        if let Some(text) = lookup("ASK_LOADING_TEXT") {
            config.loading_text = text;
        }
        if let Some(text) = lookup("ASK_FALLBACK_TEXT") {
            config.fallback_text = text;
        }
        if let Some(value) = lookup("ASK_TRANSCRIPT") {
            config.transcript = parse_bool("ASK_TRANSCRIPT", &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.request_field.trim().is_empty() {
            return Err(ConfigError::EmptyField("request field"));
        }
        if self.response_field.trim().is_empty() {
            return Err(ConfigError::EmptyField("response field"));
        }
        self.endpoint_url().map(|_| ())
    }

    /// Full URL the client posts to.
    pub fn endpoint_url(&self) -> ConfigResult<Url> {
        self.base_url
            .join(&self.endpoint)
            .map_err(|e| ConfigError::InvalidUrl {
                url: format!("{}{}", self.base_url, self.endpoint),
                reason: e.to_string(),
            })
    }
}

fn parse_url(raw: &str) -> ConfigResult<Url> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(var: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}
