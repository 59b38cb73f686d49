use super::ObjectStore;
use crate::error::{EvalError, Result};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Unsigned HTTP reads from a public S3 bucket (or any server with the
/// same `{endpoint}/{key}` layout).
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    endpoint: String,
}

impl HttpStore {
    pub fn new(client: Client, endpoint: impl Into<String>) -> HttpStore {
        HttpStore {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// Virtual-hosted endpoint of a public bucket.
    pub fn bucket_endpoint(bucket: &str) -> String {
        format!("https://{}.s3.amazonaws.com", bucket)
    }

    /// Store reading from `endpoint` with a per-request timeout.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<HttpStore> {
        let endpoint = endpoint.into();
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            EvalError::Retrieval {
                key: endpoint.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(HttpStore::new(client, endpoint))
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.endpoint, key.trim_start_matches('/'))
    }
}

impl ObjectStore for HttpStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let url = self.url_for(key);
        debug!("GET {}", url);
        let retrieval = |reason: String| EvalError::Retrieval {
            key: key.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| retrieval(format!("request failed: {}", e)))?;

        match response.status() {
            // S3 answers 403 for absent keys when listing is not allowed
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
                Err(EvalError::NotFound(key.to_string()))
            }
            status if status.is_success() => {
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| retrieval(format!("failed to read body: {}", e)))?;
                Ok(body.to_vec())
            }
            status => {
                warn!("Bad response status for {}: {}", key, status);
                Err(retrieval(format!("HTTP {}", status)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DEFAULT_BUCKET;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const KEY: &str = "NWIS/NWIS_sites_AL.h5/NWIS_02342500.csv";

    /// Serve one canned response on a local port and return its endpoint.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 2048];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    async fn store_for(status: &'static str, body: &'static str) -> HttpStore {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpStore::new(client, serve_once(status, body).await)
    }

    #[test]
    fn test_url_for() {
        let store = HttpStore::new(Client::new(), "https://example.org/data/");
        assert_eq!(
            store.url_for(KEY),
            "https://example.org/data/NWIS/NWIS_sites_AL.h5/NWIS_02342500.csv"
        );
    }

    #[test]
    fn test_bucket_endpoint() {
        assert_eq!(
            HttpStore::bucket_endpoint(DEFAULT_BUCKET),
            "https://streamflow-app-data.s3.amazonaws.com"
        );
    }

    #[test]
    fn test_with_timeout_trims_endpoint() {
        let store =
            HttpStore::with_timeout("http://localhost:9000/bucket/", Duration::from_secs(5)).unwrap();
        assert_eq!(store.url_for("a/b.csv"), "http://localhost:9000/bucket/a/b.csv");
    }

    #[tokio::test]
    async fn test_get_success_returns_body() {
        let store = store_for("200 OK", ",Datetime,USGS_flow\n").await;
        assert_eq!(store.get(KEY).await.unwrap(), b",Datetime,USGS_flow\n".to_vec());
    }

    #[tokio::test]
    async fn test_get_404_is_not_found() {
        let store = store_for("404 Not Found", "").await;
        assert_eq!(store.get(KEY).await, Err(EvalError::NotFound(KEY.to_string())));
    }

    #[tokio::test]
    async fn test_get_403_is_not_found() {
        let store = store_for("403 Forbidden", "<Error>AccessDenied</Error>").await;
        assert_eq!(store.get(KEY).await, Err(EvalError::NotFound(KEY.to_string())));
    }

    #[tokio::test]
    async fn test_get_500_is_retrieval_error() {
        let store = store_for("500 Internal Server Error", "").await;
        match store.get(KEY).await {
            Err(EvalError::Retrieval { key, reason }) => {
                assert_eq!(key, KEY);
                assert!(reason.contains("500"));
            }
            other => panic!("expected retrieval error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_unreachable_is_retrieval_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = Client::builder().no_proxy().build().unwrap();
        let store = HttpStore::new(client, format!("http://{}", addr));
        assert!(matches!(store.get(KEY).await, Err(EvalError::Retrieval { .. })));
    }
}
