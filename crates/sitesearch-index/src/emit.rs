//! Index emission.
//!
//! Turns an aggregation outcome into a response-shaped artifact: status,
//! headers and JSON body. Failures become an error document with a server
//! error status instead of propagating.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sitesearch_core::config::SearchConfig;
use tracing::info;

use crate::{IndexError, Result, aggregate::SearchResponse};

const ERROR_TITLE: &str = "Failed to generate comprehensive search data";

/// Body emitted when aggregation fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ERROR_TITLE.to_string(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    fn to_json(&self) -> String {
        serde_json::json!({
            "error": self.error,
            "message": self.message,
            "timestamp": self.timestamp,
        })
        .to_string()
    }
}

/// A serialized index ready to be served or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedIndex {
    /// HTTP-equivalent status.
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl EmittedIndex {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Value of the first header named `name`, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Serializes aggregation results.
#[derive(Debug, Clone)]
pub struct IndexEmitter {
    cache_max_age: u32,
    pretty: bool,
}

impl Default for IndexEmitter {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl IndexEmitter {
    pub fn new(cache_max_age: u32, pretty: bool) -> Self {
        Self {
            cache_max_age,
            pretty,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.cache_max_age, config.pretty)
    }

    /// Emit the comprehensive index document for an aggregation outcome.
    pub fn emit(&self, outcome: std::result::Result<&SearchResponse, &IndexError>) -> EmittedIndex {
        self.emit_with(outcome, |response| self.to_json(response))
    }

    /// Emit the bare record array for an aggregation outcome.
    pub fn emit_records(
        &self,
        outcome: std::result::Result<&SearchResponse, &IndexError>,
    ) -> EmittedIndex {
        self.emit_with(outcome, |response| self.records_json(response))
    }

    fn emit_with(
        &self,
        outcome: std::result::Result<&SearchResponse, &IndexError>,
        serialize: impl FnOnce(&SearchResponse) -> Result<String>,
    ) -> EmittedIndex {
        let serialized = outcome
            .map_err(ToString::to_string)
            .and_then(|response| serialize(response).map_err(|e| e.to_string()));

        match serialized {
            Ok(body) => EmittedIndex {
                status: 200,
                headers: self.success_headers(),
                body,
            },
            Err(message) => self.emit_error(message),
        }
    }

    /// Emit the error document with a server error status.
    pub fn emit_error(&self, message: impl Into<String>) -> EmittedIndex {
        EmittedIndex {
            status: 500,
            headers: vec![("Content-Type", "application/json".to_string())],
            body: ErrorBody::new(message).to_json(),
        }
    }

    /// The comprehensive index document as JSON.
    pub fn to_json(&self, response: &SearchResponse) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(response)?
        } else {
            serde_json::to_string(response)?
        };
        Ok(json)
    }

    /// The bare record array as JSON, the payload of the client engine.
    pub fn records_json(&self, response: &SearchResponse) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(&response.data)?
        } else {
            serde_json::to_string(&response.data)?
        };
        Ok(json)
    }

    /// Write the index document and the record array under `output_dir`.
    ///
    /// Both files are serialized before either is written, so a failure
    /// leaves no partial artifact behind.
    pub fn write_files(
        &self,
        response: &SearchResponse,
        output_dir: &Path,
        config: &SearchConfig,
    ) -> Result<Vec<PathBuf>> {
        let index = self.to_json(response)?;
        let records = self.records_json(response)?;

        fs::create_dir_all(output_dir)?;

        let index_path = output_dir.join(&config.index_file);
        let records_path = output_dir.join(&config.records_file);
        fs::write(&index_path, index)?;
        fs::write(&records_path, records)?;

        info!(
            index = %index_path.display(),
            records = %records_path.display(),
            count = response.data.len(),
            "wrote search artifacts"
        );

        Ok(vec![index_path, records_path])
    }

    fn success_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", "application/json".to_string()),
            ("Cache-Control", format!("public, max-age={}", self.cache_max_age)),
            ("Access-Control-Allow-Origin", "*".to_string()),
            ("Access-Control-Allow-Methods", "GET".to_string()),
            ("Access-Control-Allow-Headers", "Content-Type".to_string()),
        ]
    }
}
