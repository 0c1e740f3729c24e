use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::credential::Credential;
use crate::{ApiRequest, ApiResponse, FailureKind, Method, RequestBody, TransportError};

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Sends one request, attaching `credential` when given. Never retries.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: &ApiRequest,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: TransportSettings,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    fn build_url(&self, request: &ApiRequest) -> Result<reqwest::Url, TransportError> {
        let base = self.settings.base_url.trim_end_matches('/');
        let mut url = reqwest::Url::parse(&format!("{base}{}", request.path))
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: &ApiRequest,
        credential: Option<&Credential>,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.build_url(request)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, request.accept.as_str());
        if let Some(credential) = credential {
            builder = builder.header(AUTHORIZATION, credential.authorization_value());
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(json.clone()),
            RequestBody::Multipart {
                field,
                file_name,
                content_type,
                bytes,
            } => {
                let part = reqwest::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(content_type)
                    .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;
                builder.multipart(reqwest::multipart::Form::new().part(field.clone(), part))
            }
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(ApiResponse { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
