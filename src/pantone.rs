//! Pantone name lookup backed by a generative text model.
//!
//! The model does the matching; this module only builds prompts and reads
//! back the JSON it was asked to produce. Every answer is treated as
//! untrusted: anything off-shape becomes [`Error::MalformedResponse`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "pantone")]
use crate::config::LookupConfig;
use crate::error::{Error, Result};
use crate::math;

/// Something that can translate between hex colors and Pantone names.
///
/// Calls block; the picker runs them off the UI thread.
pub trait PantoneSource: Send + Sync {
    /// Closest Pantone name for `hex` (`#RRGGBB`), or `None` if there is none.
    fn name_for_hex(&self, hex: &str) -> Result<Option<String>>;

    /// Hex value (`#RRGGBB`) for a Pantone name, or `None` if it is unknown.
    fn hex_for_name(&self, name: &str) -> Result<Option<String>>;
}

pub(crate) fn name_prompt(hex: &str) -> String {
    format!(
        "Which Pantone color is the closest match to the hex color {hex}? \
         Respond only with JSON of the form {{\"name\": \"PANTONE <code> <name>\"}}. \
         If there is no reasonable match respond with {{\"name\": null}}."
    )
}

pub(crate) fn hex_prompt(name: &str) -> String {
    let name = name.trim().replace('"', "'");
    format!(
        "What is the sRGB hex value of the Pantone color \"{name}\"? \
         Respond only with JSON of the form {{\"hex\": \"#RRGGBB\"}}. \
         If this is not a known Pantone color respond with {{\"hex\": null}}."
    )
}

/// Read `{"name": ...}` from a model answer.
pub fn parse_name_response(text: &str) -> Result<Option<String>> {
    let Some(name) = field_value(text, "name")? else {
        return Ok(None);
    };
    Ok(Some(name))
}

/// Read `{"hex": ...}` from a model answer, normalized to `#RRGGBB`.
pub fn parse_hex_response(text: &str) -> Result<Option<String>> {
    let Some(raw) = field_value(text, "hex")? else {
        return Ok(None);
    };
    let (r, g, b) = math::parse_hex(&raw)
        .ok_or_else(|| Error::malformed(format!("not a hex color: {raw}")))?;
    Ok(Some(math::rgb_to_hex(r, g, b)))
}

/// Pull a string field out of the model's JSON, mapping the various
/// "nothing found" spellings to `None`.
fn field_value(text: &str, field: &str) -> Result<Option<String>> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(Error::malformed("empty answer"));
    }
    let value: Value =
        serde_json::from_str(body).map_err(|e| Error::malformed(format!("{e}: {body}")))?;
    let found = match value {
        Value::Object(mut map) => match map.remove(field) {
            Some(Value::String(s)) => s,
            Some(Value::Null) => return Ok(None),
            Some(other) => return Err(Error::malformed(format!("{field} is {other}"))),
            None => return Err(Error::malformed(format!("missing \"{field}\""))),
        },
        Value::String(s) => s,
        Value::Null => return Ok(None),
        other => return Err(Error::malformed(format!("unexpected answer {other}"))),
    };
    let found = found.trim();
    if found.is_empty() || is_not_found(found) {
        return Ok(None);
    }
    Ok(Some(found.to_string()))
}

fn is_not_found(s: &str) -> bool {
    let folded = s.to_ascii_lowercase().replace(['_', '-'], " ");
    matches!(folded.as_str(), "not found" | "none" | "null" | "n/a" | "unknown")
}

/// Models like to wrap JSON in ```json fences even when told not to.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    rest.trim()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    pub(crate) fn new(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    pub(crate) fn text(&self) -> Result<String> {
        let content = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .ok_or_else(|| Error::malformed("no candidates in response"))?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        Ok(text)
    }
}

/// [`PantoneSource`] talking to the Gemini `generateContent` REST API.
#[cfg(feature = "pantone")]
pub struct GeminiPantone {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[cfg(feature = "pantone")]
impl GeminiPantone {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or(Error::MissingApiKey)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn generate(&self, prompt: String) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::new(prompt))
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::status(status.as_u16(), &body));
        }
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        parsed.text()
    }
}

#[cfg(feature = "pantone")]
impl PantoneSource for GeminiPantone {
    fn name_for_hex(&self, hex: &str) -> Result<Option<String>> {
        log::debug!("pantone name lookup for {hex}");
        parse_name_response(&self.generate(name_prompt(hex))?)
    }

    fn hex_for_name(&self, name: &str) -> Result<Option<String>> {
        log::debug!("pantone hex lookup for {name:?}");
        parse_hex_response(&self.generate(hex_prompt(name))?)
    }
}
