//! HTTP Data Source
//!
//! Client for the customers/transactions REST service.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{DataSource, SourceError, SourceResult};
use crate::model::{Customer, Transaction};

/// Configuration for the HTTP source
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Base URL of the service (e.g., "https://summit-api-kappa.vercel.app")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://summit-api-kappa.vercel.app".to_string(),
            timeout_secs: 30,
        }
    }
}

/// REST client for the customers/transactions service
pub struct HttpSource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpSource {
    /// Create a new HTTP source with the given configuration
    pub fn new(config: HttpSourceConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("summit/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &HttpSourceConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// GET a JSON array from the service
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> SourceResult<Vec<T>> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.bytes().await.map_err(classify)?;
        let items: Vec<T> = serde_json::from_slice(&body)?;
        Ok(items)
    }
}

/// Map transport failures onto the error kinds callers care about
fn classify(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else if e.is_connect() {
        SourceError::Unavailable(e.to_string())
    } else {
        SourceError::Request(e)
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.config.base_url.clone()
    }

    async fn fetch_customers(&self) -> SourceResult<Vec<Customer>> {
        self.get_list("customers").await
    }

    async fn fetch_transactions(&self) -> SourceResult<Vec<Transaction>> {
        self.get_list("transactions").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};

    async fn spawn_service(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn source_for(base_url: String) -> HttpSource {
        HttpSource::new(HttpSourceConfig {
            base_url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    async fn customers() -> Json<Value> {
        Json(json!([
            {"id": 1, "name": "Ahmed Ali"},
            {"id": 2, "name": "Aya Elsayed", "amount": 0}
        ]))
    }

    async fn transactions() -> Json<Value> {
        Json(json!([
            {"id": 1, "customer_id": 1, "date": "2022-01-01", "amount": 1000},
            {"id": 2, "customer_id": 2, "date": "2022-01-01", "amount": 550.5}
        ]))
    }

    #[test]
    fn test_default_config() {
        let config = HttpSourceConfig::default();
        assert_eq!(config.base_url, "https://summit-api-kappa.vercel.app");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_url_joins_trailing_slash() {
        let source = source_for("http://example.test/".to_string());
        assert_eq!(source.url("customers"), "http://example.test/customers");
    }

    #[tokio::test]
    async fn test_fetch_both_collections() {
        let router = Router::new()
            .route("/customers", get(customers))
            .route("/transactions", get(transactions));
        let source = source_for(spawn_service(router).await);

        let customers = source.fetch_customers().await.unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[1].name, "Aya Elsayed");

        let transactions = source.fetch_transactions().await.unwrap();
        assert_eq!(transactions[1].amount, 550.5);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let router = Router::new().route(
            "/customers",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down for maintenance") }),
        );
        let source = source_for(spawn_service(router).await);

        match source.fetch_customers().await {
            Err(SourceError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "down for maintenance");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let router = Router::new().route(
            "/transactions",
            get(|| async { Json(json!([{"id": 1, "date": "2022-01-01"}])) }),
        );
        let source = source_for(spawn_service(router).await);

        let err = source.fetch_transactions().await.unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = source_for(format!("http://{}", addr));
        let err = source.fetch_customers().await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable(_)));
    }
}
