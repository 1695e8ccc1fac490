use std::path::Path;

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    config::ClientConfig,
    error::{ApiError, ApiResult},
    response::{ApiResponse, ErrorBody},
};

/// HTTP client wrapper shared by every feature: base-URL resolution, bearer
/// injection, per-request id, envelope decoding and `{message}` extraction.
#[derive(Debug, Clone)]
pub struct ApiGateway {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiGateway {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn prepare(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let req = req.header("x-request-id", Uuid::new_v4().to_string());
        match &self.token {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {token}")),
            None => req,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<T>> {
        let resp = self.prepare(self.http.get(self.url(path))).send().await?;
        decode(resp).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<ApiResponse<T>> {
        let resp = self
            .prepare(self.http.get(self.url(path)).query(query))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiResponse<T>> {
        let resp = self
            .prepare(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiResponse<T>> {
        let resp = self
            .prepare(self.http.put(self.url(path)).json(body))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<T>> {
        let resp = self.prepare(self.http.delete(self.url(path))).send().await?;
        decode(resp).await
    }

    /// Binary invoice fetch. Bypasses the JSON envelope entirely; the bearer
    /// header still has to be attached by hand, matching the streaming path
    /// the shared wrapper cannot serve.
    pub async fn download_invoice(&self, order_id: &str) -> ApiResult<InvoiceDownload> {
        let url = self.url(&format!("invoices/{order_id}/download"));
        let mut req = self
            .http
            .get(url)
            .header("x-request-id", Uuid::new_v4().to_string());
        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| status.to_string());
            return Err(reject(status.as_u16(), message));
        }

        let file_name = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_file_name)
            .unwrap_or_else(|| format!("invoice-{order_id}.pdf"));
        let bytes = resp.bytes().await?;
        Ok(InvoiceDownload { file_name, bytes })
    }
}

/// A fetched invoice. The browser version triggered a blob-anchor download;
/// here the caller decides where the bytes go.
#[derive(Debug, Clone)]
pub struct InvoiceDownload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl InvoiceDownload {
    pub async fn save_to(&self, dir: &Path) -> ApiResult<std::path::PathBuf> {
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes)
            .await
            .map_err(|err| ApiError::Internal(err.into()))?;
        Ok(path)
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<ApiResponse<T>> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.json::<ApiResponse<T>>().await?;
        return Ok(body);
    }

    let message = resp.json::<ErrorBody>().await.ok().and_then(|b| b.message);
    tracing::debug!(status = %status, message = ?message, "request rejected");
    match message {
        Some(message) => Err(reject(status.as_u16(), message)),
        None => match status.as_u16() {
            404 => Err(ApiError::NotFound),
            403 => Err(ApiError::Forbidden),
            code => Err(reject(code, status.to_string())),
        },
    }
}

fn reject(status: u16, message: String) -> ApiError {
    ApiError::Rejected { status, message }
}

fn parse_file_name(header: &str) -> Option<String> {
    let marker = "filename=";
    let idx = header.find(marker)?;
    let name = header[idx + marker.len()..].trim().trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
