//! TM1 REST connector.
//!
//! Talks to the TM1 REST API (`/api/v1`) over `reqwest`. One `reqwest`
//! client per instance keeps the session cookie, so every task of a run
//! reuses the session opened by [`RestConnector::connect`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::json;

use crate::config::InstanceConfig;
use crate::domain::{ConnectError, Parameters, RemoteError};
use crate::ports::{Connector, RemoteClient};

/// Value of the `TM1-SessionContext` header; shows up in TM1 Top / Arc.
pub const SESSION_CONTEXT: &str = "RushTI";

const MAX_ERROR_BODY_CHARS: usize = 2048;

#[derive(Debug, Default, Clone, Copy)]
pub struct RestConnector;

impl RestConnector {
    fn http_client(
        &self,
        config: &InstanceConfig,
        password: &str,
    ) -> Result<reqwest::Client, ConnectError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization(config, password)?);
        headers.insert(
            "TM1-SessionContext",
            HeaderValue::from_static(SESSION_CONTEXT),
        );

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .danger_accept_invalid_certs(!config.verify_tls);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }
}

#[async_trait]
impl Connector for RestConnector {
    async fn connect(
        &self,
        name: &str,
        config: &InstanceConfig,
        password: &str,
    ) -> Result<Arc<dyn RemoteClient>, ConnectError> {
        let http = self.http_client(config, password)?;
        let base_url = base_url(config);

        let response = http
            .get(format!("{base_url}/Configuration/ProductVersion/$value"))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::Rejected {
                status: status.as_u16(),
                body: error_message(&body),
            });
        }
        let version = response.text().await.unwrap_or_default();
        tracing::debug!(instance = name, %base_url, version = %version.trim(), "Session opened");

        Ok(Arc::new(RestClient { http, base_url }))
    }
}

/// A session against one instance.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

#[async_trait]
impl RemoteClient for RestClient {
    async fn invoke(
        &self,
        process: &str,
        parameters: &Parameters,
    ) -> Result<Duration, RemoteError> {
        let started = Instant::now();
        let response = self
            .http
            .post(process_url(&self.base_url, process))
            .json(&execute_body(parameters))
            .send()
            .await
            .map_err(|e| RemoteError::new(e.to_string()))?;
        let elapsed = started.elapsed();

        let status = response.status();
        if status.is_success() {
            return Ok(elapsed);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::new(format!("{status}: {}", error_message(&body))))
    }

    async fn logout(&self) -> Result<(), RemoteError> {
        let response = self
            .http
            .post(format!("{}/ActiveSession/tm1.Close", self.base_url))
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| RemoteError::new(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RemoteError::new(format!("logout returned {status}")))
        }
    }
}

fn base_url(config: &InstanceConfig) -> String {
    if let Some(url) = &config.base_url {
        return url.trim_end_matches('/').to_string();
    }
    let scheme = if config.ssl { "https" } else { "http" };
    format!("{scheme}://{}:{}/api/v1", config.address, config.port)
}

/// Basic auth, or CAM auth when a namespace is configured.
fn authorization(config: &InstanceConfig, password: &str) -> Result<HeaderValue, ConnectError> {
    let raw = match &config.namespace {
        Some(namespace) => format!(
            "CAMNamespace {}",
            STANDARD.encode(format!("{}:{password}:{namespace}", config.user))
        ),
        None => format!(
            "Basic {}",
            STANDARD.encode(format!("{}:{password}", config.user))
        ),
    };
    let mut value = HeaderValue::from_str(&raw)
        .map_err(|e| ConnectError::InvalidSettings(format!("credentials: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

fn process_url(base_url: &str, process: &str) -> String {
    // OData string literal: single quotes are doubled
    format!(
        "{base_url}/Processes('{}')/tm1.Execute",
        process.replace('\'', "''")
    )
}

fn execute_body(parameters: &Parameters) -> serde_json::Value {
    let parameters: Vec<_> = parameters
        .iter()
        .map(|(name, value)| json!({ "Name": name, "Value": value }))
        .collect();
    json!({ "Parameters": parameters })
}

/// Pull `error.message` out of an OData error body, or fall back to the
/// (truncated) raw body.
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    if let Some(message) = parsed
        .as_ref()
        .and_then(|v| v.pointer("/error/message"))
        .and_then(|m| m.as_str())
    {
        return message.to_string();
    }
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
