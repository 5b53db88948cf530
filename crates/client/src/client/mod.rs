//! HTTP access to the transactions API.
//!
//! [`Transport`] is the seam the store talks through; [`HttpTransport`] is
//! the reqwest implementation used by the binary.

use std::{future::Future, time::Duration};

use api_types::{
    error::ErrorBody,
    transaction::{TransactionListResponse, TransactionListing, TransactionPayload},
};
use engine::TransactionId;
use reqwest::{Response, Url};
use thiserror::Error;

use crate::error::{AppError, Result};

const TRANSACTIONS_PATH: &str = "api/transactions";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("unreadable response: {0}")]
    Decode(String),
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Message worth showing to a user, if the failure carried one.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Conflict(body) | Self::Validation(body) | Self::Server(body) => {
                Some(body.trim())
                    .filter(|body| !body.is_empty())
                    .map(str::to_string)
            }
            other => Some(other.to_string()),
        }
    }
}

/// The four operations the transactions API exposes.
pub trait Transport: Send + Sync {
    fn list(
        &self,
    ) -> impl Future<Output = std::result::Result<TransactionListing, ClientError>> + Send;

    fn create(
        &self,
        payload: &TransactionPayload,
    ) -> impl Future<Output = std::result::Result<(), ClientError>> + Send;

    fn update(
        &self,
        id: &TransactionId,
        payload: &TransactionPayload,
    ) -> impl Future<Output = std::result::Result<(), ClientError>> + Send;

    fn delete(
        &self,
        id: &TransactionId,
    ) -> impl Future<Output = std::result::Result<(), ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::BaseUrl(base_url.to_string()));
        }
        // `join` replaces the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn collection(&self) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(TRANSACTIONS_PATH)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    fn item(&self, id: &TransactionId) -> std::result::Result<Url, ClientError> {
        let mut endpoint = self.collection()?;
        endpoint
            .path_segments_mut()
            .map_err(|()| ClientError::Server("invalid base_url".to_string()))?
            .push(id.as_str());
        Ok(endpoint)
    }
}

impl Transport for HttpTransport {
    async fn list(&self) -> std::result::Result<TransactionListing, ClientError> {
        let res = self.http.get(self.collection()?).send().await?;
        if res.status().is_success() {
            let body = res
                .json::<TransactionListResponse>()
                .await
                .map_err(|err| {
                    if err.is_decode() {
                        ClientError::Decode(err.to_string())
                    } else {
                        ClientError::Transport(err)
                    }
                })?;
            return Ok(body.transactions);
        }
        Err(error_from_response(res).await)
    }

    async fn create(&self, payload: &TransactionPayload) -> std::result::Result<(), ClientError> {
        let res = self
            .http
            .post(self.collection()?)
            .json(payload)
            .send()
            .await?;
        expect_success(res).await
    }

    async fn update(
        &self,
        id: &TransactionId,
        payload: &TransactionPayload,
    ) -> std::result::Result<(), ClientError> {
        let res = self.http.put(self.item(id)?).json(payload).send().await?;
        expect_success(res).await
    }

    async fn delete(&self, id: &TransactionId) -> std::result::Result<(), ClientError> {
        let res = self.http.delete(self.item(id)?).send().await?;
        expect_success(res).await
    }
}

async fn expect_success(res: Response) -> std::result::Result<(), ClientError> {
    if res.status().is_success() {
        return Ok(());
    }
    Err(error_from_response(res).await)
}

async fn error_from_response(res: Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorBody>()
        .await
        .map(|err| err.error)
        .unwrap_or_default();

    match status.as_u16() {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        409 => ClientError::Conflict(body),
        422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_base_path() {
        let transport =
            HttpTransport::new("http://127.0.0.1:3000/tally", Duration::from_secs(1)).unwrap();
        assert_eq!(
            transport.collection().unwrap().as_str(),
            "http://127.0.0.1:3000/tally/api/transactions"
        );
        assert_eq!(
            transport.item(&TransactionId::from("a b")).unwrap().as_str(),
            "http://127.0.0.1:3000/tally/api/transactions/a%20b"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpTransport::new("not a url", Duration::from_secs(1)),
            Err(AppError::BaseUrl(_))
        ));
    }

    #[test]
    fn empty_server_message_is_dropped() {
        assert_eq!(ClientError::Server("  ".to_string()).message(), None);
        assert_eq!(
            ClientError::Validation("amount too large".to_string()).message(),
            Some("amount too large".to_string())
        );
        assert_eq!(ClientError::NotFound.message(), Some("not found".to_string()));
    }
}
