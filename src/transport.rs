//! HTTP transport used by the geocoding and routing clients
//!
//! The clients only ever exchange JSON with their upstream services, so the
//! transport is a JSON-in / JSON-out seam. `ReqwestTransport` is the real one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::HttpConfig;
use crate::error::RotaflexError;
use crate::Result;

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `url` and parse the body as JSON
    async fn get_json(&self, url: &str) -> Result<Value>;

    /// POST `body` as JSON to `url` with extra headers and parse the reply as JSON
    async fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> Result<Value>;
}

/// reqwest-backed transport
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport from HTTP settings
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());

        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout.into()));
        }

        let client = builder.build()?;
        Ok(Self { client })
    }

    async fn read_json(response: Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&text)?);
        }

        warn!("Upstream returned HTTP {}", status);
        // Error bodies are often JSON; the caller's contract decides what they mean.
        serde_json::from_str(&text).map_err(|_| RotaflexError::Upstream {
            status: status.as_u16(),
            body: text,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(level = "debug", skip(self))]
    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).send().await?;
        debug!("HTTP response received: {}", response.status());
        Self::read_json(response).await
    }

    #[instrument(level = "debug", skip(self, headers, body))]
    async fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> Result<Value> {
        let mut request = self.client.post(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.json(body).send().await?;
        debug!("HTTP response received: {}", response.status());
        Self::read_json(response).await
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted transport that records every request it receives.

    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub headers: Vec<(String, String)>,
        pub body: Option<Value>,
    }

    impl RecordedRequest {
        pub fn query_param(&self, name: &str) -> Option<String> {
            let (_, query) = self.url.split_once('?')?;
            query.split('&').find_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                (key == name).then(|| value.to_string())
            })
        }

        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        }
    }

    type Handler = Box<dyn Fn(&RecordedRequest) -> Result<Value> + Send + Sync>;

    pub struct FakeTransport {
        handler: Handler,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl FakeTransport {
        pub fn new(handler: impl Fn(&RecordedRequest) -> Result<Value> + Send + Sync + 'static) -> Self {
            Self {
                handler: Box::new(handler),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Answer every request with the same body
        pub fn returning(body: Value) -> Self {
            Self::new(move |_| Ok(body.clone()))
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn record(&self, request: RecordedRequest) -> Result<Value> {
            let response = (self.handler)(&request);
            self.requests.lock().unwrap().push(request);
            response
        }
    }

    #[async_trait]
    impl HttpTransport for FakeTransport {
        async fn get_json(&self, url: &str) -> Result<Value> {
            self.record(RecordedRequest {
                method: "GET",
                url: url.to_string(),
                headers: Vec::new(),
                body: None,
            })
        }

        async fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> Result<Value> {
            self.record(RecordedRequest {
                method: "POST",
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
                body: Some(body.clone()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RotaflexConfig;

    #[test]
    fn test_transport_creation() {
        let config = RotaflexConfig::default();
        assert!(ReqwestTransport::new(&config.http).is_ok());
    }

    #[test]
    fn test_transport_creation_with_timeout() {
        let mut config = RotaflexConfig::default();
        config.http.timeout_seconds = Some(10);
        assert!(ReqwestTransport::new(&config.http).is_ok());
    }
}
