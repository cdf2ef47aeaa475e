//! REST Client
//!
//! Speaks the store's PostgREST dialect: collections under
//! `/rest/v1/{table}`, row filters as `?id=eq.{id}` query parameters,
//! mutations returning the affected rows when asked via the `Prefer`
//! header.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::config::RemoteConfig;

/// Characters escaped when an id is spliced into a filter query
const QUERY_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?');

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request timed out")]
    Timeout,
    #[error("network: {0}")]
    Network(reqwest::Error),
    #[error("remote returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout
        } else {
            RemoteError::Network(err)
        }
    }
}

/// Client for one base endpoint (the store itself, or a proxy in front
/// of it)
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl RestClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        read_timeout: Duration,
        write_timeout: Duration,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
            read_timeout,
            write_timeout,
        }
    }

    /// Client for the store's own endpoint
    pub fn direct(config: &RemoteConfig) -> Self {
        Self::new(
            config.project_url.clone(),
            config.api_key.clone(),
            config.read_timeout,
            config.write_timeout,
        )
    }

    /// Client for the proxy endpoint, when one is configured
    pub fn proxy(config: &RemoteConfig) -> Option<Self> {
        config.proxy_url.clone().map(|base| {
            Self::new(
                base,
                config.api_key.clone(),
                config.read_timeout,
                config.write_timeout,
            )
        })
    }

    pub async fn select_all<T: DeserializeOwned>(
        &self,
        table: &str,
        order: Option<&str>,
    ) -> Result<Vec<T>, RemoteError> {
        let mut url = format!("{}/rest/v1/{}?select=*", self.base_url, table);
        if let Some(order) = order {
            url.push_str("&order=");
            url.push_str(order);
        }
        let body = self
            .send_checked(self.http.get(&url).timeout(self.read_timeout))
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn insert<T: DeserializeOwned>(
        &self,
        table: &str,
        row: &(impl Serialize + Sync),
    ) -> Result<T, RemoteError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let body = self
            .send_checked(
                self.http
                    .post(&url)
                    .timeout(self.write_timeout)
                    .header("Prefer", "return=representation")
                    .json(row),
            )
            .await?;
        first_row(&body)
    }

    pub async fn update_by_id<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
        patch: &(impl Serialize + Sync),
    ) -> Result<T, RemoteError> {
        let url = format!(
            "{}/rest/v1/{}?id=eq.{}",
            self.base_url,
            table,
            utf8_percent_encode(id, QUERY_ENCODE)
        );
        let body = self
            .send_checked(
                self.http
                    .patch(&url)
                    .timeout(self.write_timeout)
                    .header("Prefer", "return=representation")
                    .json(patch),
            )
            .await?;
        first_row(&body)
    }

    pub async fn delete_by_id(&self, table: &str, id: &str) -> Result<(), RemoteError> {
        let url = format!(
            "{}/rest/v1/{}?id=eq.{}",
            self.base_url,
            table,
            utf8_percent_encode(id, QUERY_ENCODE)
        );
        self.send_checked(self.http.delete(&url).timeout(self.write_timeout))
            .await?;
        Ok(())
    }

    async fn send_checked(&self, request: reqwest::RequestBuilder) -> Result<String, RemoteError> {
        let response = request
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

/// Mutations with `Prefer: return=representation` come back as a
/// one-element array; unwrap it.
fn first_row<T: DeserializeOwned>(body: &str) -> Result<T, RemoteError> {
    let value: Value = serde_json::from_str(body)?;
    let value = match value {
        Value::Array(mut rows) if !rows.is_empty() => rows.remove(0),
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_unwraps_representation_arrays() {
        let row: Value = first_row(r#"[{"id":"1"}]"#).unwrap();
        assert_eq!(row["id"], "1");

        let row: Value = first_row(r#"{"id":"2"}"#).unwrap();
        assert_eq!(row["id"], "2");
    }

    #[test]
    fn ids_are_escaped_into_filter_queries() {
        let encoded = utf8_percent_encode("a b&c", QUERY_ENCODE).to_string();
        assert_eq!(encoded, "a%20b%26c");
    }
}
