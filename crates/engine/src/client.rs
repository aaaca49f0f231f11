use std::{future::Future, time::Duration};

use api_types::qr::QrImageQuery;
use reqwest::{
    Url,
    header::{ACCEPT, CONTENT_TYPE},
};

use crate::error::EngineError;

pub const DEFAULT_ENDPOINT: &str = "https://api.paylibo.com/paylibo/generator/czech/image";

/// Raw reply of the generator, before it is mapped into a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The remote QR generator.
pub trait QrApi: Send + Sync + 'static {
    fn fetch(
        &self,
        query: &QrImageQuery,
    ) -> impl Future<Output = Result<HttpReply, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpQrApi {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpQrApi {
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, EngineError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| EngineError::InvalidEndpoint(format!("{endpoint}: {err}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint,
            http: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl QrApi for HttpQrApi {
    async fn fetch(&self, query: &QrImageQuery) -> Result<HttpReply, ClientError> {
        tracing::debug!(endpoint = %self.endpoint, "requesting QR image");

        let res = self
            .http
            .get(self.endpoint.clone())
            .query(query)
            .header(ACCEPT, "image/png")
            .send()
            .await?;

        let status = res.status().as_u16();
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = res.bytes().await?.to_vec();

        tracing::debug!(status, bytes = body.len(), "generator replied");

        Ok(HttpReply {
            status,
            content_type,
            body,
        })
    }
}
