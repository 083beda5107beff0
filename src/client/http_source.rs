use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::client::config::ClientConfig;
use crate::client::source::DataSource;
use crate::core::constants::{ANNOTATIONS_SEGMENT, SIGNALS_SEGMENT, UPDATE_ANNOTATIONS_SEGMENT};
use crate::core::error::{Result, StoreError};
use crate::core::format::{AnnotationResource, SignalsPayload, UpdateResponse};

/// Talks to the analysis backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| StoreError::Config(format!("Invalid base URL {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Config(format!(
                "Base URL cannot hold a path: {}",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/<endpoint>/<file_key>`, the key percent-encoded as a single
    /// path segment.
    fn url(&self, endpoint: &str, file_key: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint).push(file_key);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let path = url.path().to_string();
        debug!("GET {}", path);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                error!("Request {} failed: {}", path, e);
                StoreError::Transport(e)
            })?;

        Self::decode(&path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            error!("{} returned {}", path, status);
            return Err(StoreError::Status {
                path: path.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| StoreError::Payload(format!("{path}: {e}")))
    }
}

impl DataSource for HttpSource {
    async fn fetch_signals(&self, file_key: &str) -> Result<SignalsPayload> {
        self.get_json(self.url(SIGNALS_SEGMENT, file_key)).await
    }

    async fn fetch_annotations(&self, file_key: &str) -> Result<AnnotationResource> {
        self.get_json(self.url(ANNOTATIONS_SEGMENT, file_key)).await
    }

    async fn update_annotations(
        &self,
        file_key: &str,
        annotations: &AnnotationResource,
    ) -> Result<UpdateResponse> {
        let url = self.url(UPDATE_ANNOTATIONS_SEGMENT, file_key);
        let path = url.path().to_string();
        debug!("POST {}", path);

        let response = self
            .client
            .post(url)
            .json(annotations)
            .send()
            .await
            .map_err(|e| {
                error!("Request {} failed: {}", path, e);
                StoreError::Transport(e)
            })?;

        Self::decode(&path, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base_url: &str) -> HttpSource {
        HttpSource::new(&ClientConfig {
            base_url: base_url.to_string(),
            timeout_secs: Some(3),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_url() {
        let source = source("http://localhost:8000/");

        assert_eq!(
            source.url(SIGNALS_SEGMENT, "abc").as_str(),
            "http://localhost:8000/get-signals/abc"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let source = source("http://lab.local/api");

        assert_eq!(
            source.url(ANNOTATIONS_SEGMENT, "abc").as_str(),
            "http://lab.local/api/get-annotations/abc"
        );
    }

    #[test]
    fn test_file_key_is_one_encoded_segment() {
        let source = source("http://localhost:8000");

        let url = source.url(SIGNALS_SEGMENT, "a#b?c/d e");

        assert_eq!(url.path(), "/get-signals/a%23b%3Fc%2Fd%20e");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = HttpSource::new(&ClientConfig {
            base_url: "not a url".to_string(),
            timeout_secs: None,
        });
        assert!(matches!(result, Err(StoreError::Config(_))));

        let result = HttpSource::new(&ClientConfig {
            base_url: "mailto:lab@example.com".to_string(),
            timeout_secs: None,
        });
        assert!(matches!(result, Err(StoreError::Config(_))));
    }
}
