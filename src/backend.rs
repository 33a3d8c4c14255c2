//! Client handle for an Elasticsearch-compatible indexing backend.
//!
//! The handle is built from [`ElasticConfig`] and kept on the logger. Nothing
//! in this crate sends requests through it yet.

use base64::{Engine as _, engine::general_purpose};
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::config::ElasticConfig;
use crate::{Error, Result};

/// Address used when the configuration leaves `host` empty
pub const DEFAULT_HOST: &str = "http://localhost:9200";

/// Configured HTTP client bound to one backend
#[derive(Debug, Clone)]
pub struct ElasticClient {
    http: reqwest::Client,
    base_url: Url,
    index_template: String,
    has_credentials: bool,
}

impl ElasticClient {
    /// Build a client for the given backend.
    ///
    /// The client's connection diagnostics are emitted through the `log` facade.
    /// They reach stdout only after [`crate::logging::init`] has installed a
    /// logger; [`crate::new_logger`] does not install one, so until then they
    /// are dropped.
    pub fn new(config: &ElasticConfig) -> Result<Self> {
        let host = if config.host.trim().is_empty() {
            DEFAULT_HOST
        } else {
            config.host.trim()
        };

        let base_url = Url::parse(host)
            .map_err(|e| Error::InvalidConfig(format!("Invalid backend host {}: {}", host, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "Unsupported backend scheme: {}",
                base_url.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        let has_credentials = !config.user.is_empty();
        if has_credentials {
            let token = general_purpose::STANDARD
                .encode(format!("{}:{}", config.user, config.password));
            let mut value = HeaderValue::from_str(&format!("Basic {}", token))
                .map_err(|e| Error::InvalidConfig(format!("Invalid credentials: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connection_verbose(true)
            .build()
            .map_err(|e| Error::Backend(e.to_string()))?;

        log::debug!("Constructed backend client for {}", base_url);

        Ok(Self {
            http,
            base_url,
            index_template: config.index_template.clone(),
            has_credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn index_template(&self) -> &str {
        &self.index_template
    }

    /// Whether a basic-auth header is attached to every request
    pub fn has_credentials(&self) -> bool {
        self.has_credentials
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}
