//! HTTP tip source for an Ollama-style `/api/generate` endpoint.
//!
//! Sends `{"model", "prompt", "stream": false}` and reads the `response`
//! field of the reply. Plain HTTP only.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{header, Method, Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::{Deserialize, Serialize};
use sumblocks_types::TipRequest;

use crate::config::TipConfig;
use crate::error::TipError;
use crate::source::{build_prompt, clean_tip, TipFuture, TipSource};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

pub struct HttpTipSource {
    client: Client<HttpConnector, Full<Bytes>>,
    uri: Uri,
    model: String,
    max_chars: usize,
}

impl HttpTipSource {
    pub fn new(config: &TipConfig) -> Result<Self, TipError> {
        let uri: Uri = config
            .endpoint
            .parse()
            .map_err(|_| TipError::Endpoint(config.endpoint.clone()))?;
        if uri.scheme_str() != Some("http") || uri.host().is_none() {
            return Err(TipError::Endpoint(config.endpoint.clone()));
        }
        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self {
            client,
            uri,
            model: config.model.clone(),
            max_chars: config.max_chars,
        })
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    async fn fetch(&self, request: &TipRequest) -> Result<String, TipError> {
        let body = serde_json::to_vec(&GenerateRequest {
            model: &self.model,
            prompt: build_prompt(request),
            stream: false,
        })
        .map_err(|e| TipError::Request(e.to_string()))?;

        let req = Request::builder()
            .method(Method::POST)
            .uri(self.uri.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| TipError::Request(e.to_string()))?;

        let resp = self
            .client
            .request(req)
            .await
            .map_err(|e| TipError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TipError::Status(status.as_u16()));
        }

        let bytes = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| TipError::Body(e.to_string()))?
            .to_bytes();
        parse_generate_response(&bytes, self.max_chars)
    }
}

impl TipSource for HttpTipSource {
    fn fetch_tip<'a>(&'a self, request: &'a TipRequest) -> TipFuture<'a> {
        Box::pin(self.fetch(request))
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Extract and clean the tip from a generate response body.
pub fn parse_generate_response(body: &[u8], max_chars: usize) -> Result<String, TipError> {
    let parsed: GenerateResponse = serde_json::from_slice(body)?;
    let tip = clean_tip(&parsed.response, max_chars);
    if tip.is_empty() {
        return Err(TipError::Empty);
    }
    Ok(tip)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> TipConfig {
        TipConfig {
            endpoint: endpoint.to_string(),
            ..TipConfig::default()
        }
    }

    #[test]
    fn parse_ok() {
        let body = br#"{"model":"m","response":"  Pair a 9 with a 1. ","done":true}"#;
        assert_eq!(parse_generate_response(body, 100).unwrap(), "Pair a 9 with a 1.");
    }

    #[test]
    fn parse_missing_field_is_malformed() {
        let err = parse_generate_response(br#"{"error":"model not found"}"#, 100).unwrap_err();
        assert!(matches!(err, TipError::Malformed(_)));
    }

    #[test]
    fn parse_blank_is_empty() {
        let err = parse_generate_response(br#"{"response":"   "}"#, 100).unwrap_err();
        assert!(matches!(err, TipError::Empty));
    }

    #[test]
    fn rejects_non_http_endpoints() {
        assert!(matches!(
            HttpTipSource::new(&config("https://example.com/api/generate")),
            Err(TipError::Endpoint(_))
        ));
        assert!(matches!(
            HttpTipSource::new(&config("not a url")),
            Err(TipError::Endpoint(_))
        ));
    }

    #[test]
    fn accepts_default_endpoint() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let _guard = rt.enter();
        let src = HttpTipSource::new(&TipConfig::default()).unwrap();
        assert_eq!(src.uri().path(), "/api/generate");
        assert_eq!(src.name(), "http");
    }
}
