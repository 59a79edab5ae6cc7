//! Client for the external skill-extraction service.
//!
//! One multipart POST per resume with a bounded timeout. No retries: a failed
//! parse is recorded on the resume and can be re-triggered explicitly.

use std::time::Duration;

use anyhow::Context;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

const PARSE_ENDPOINT: &str = "/parse";

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("skill parser timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("skill parser returned status {status}: {message}")]
    Service { status: u16, message: String },

    #[error("unexpected skill parser response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Response shape of the skill-extraction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub extracted_skills: Vec<String>,
    #[serde(default)]
    pub final_ats_score: f64,
    #[serde(default)]
    pub score_breakdown: Value,
}

#[derive(Clone)]
pub struct ParserClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl ParserClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build skill parser HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout_secs,
        })
    }

    /// Sends the resume file and returns the extracted skills and ATS score.
    pub async fn parse(
        &self,
        file_name: &str,
        content_type: &str,
        content: Bytes,
    ) -> Result<ParsedResume, ParserError> {
        let url = format!("{}{}", self.base_url, PARSE_ENDPOINT);
        let part = Part::bytes(content.to_vec())
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        info!("Calling skill parser for {file_name}");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(ParserError::Service {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: ParsedResume = serde_json::from_str(&body)?;
        debug!(
            "Skill parser returned {} skills, ATS score {}",
            parsed.extracted_skills.len(),
            parsed.final_ats_score
        );
        Ok(parsed)
    }

    fn classify(&self, e: reqwest::Error) -> ParserError {
        if e.is_timeout() {
            ParserError::Timeout(self.timeout_secs)
        } else {
            ParserError::Http(e)
        }
    }
}
