use crate::catalog::Catalog;
use crate::model::{Product, ProviderError};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Supplies a fresh catalog snapshot. The parser never fetches on its own.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch(&self) -> Result<Catalog, ProviderError>;
}

/// Reads a JSON array of products from disk.
pub struct FileCatalogProvider {
    path: PathBuf,
}

impl FileCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for FileCatalogProvider {
    async fn fetch(&self) -> Result<Catalog, ProviderError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let products: Vec<Product> = serde_json::from_str(&content)?;
        info!("Loaded {} products from {}", products.len(), self.path.display());
        Ok(Catalog::new(products))
    }
}

/// Pulls the product listing from the shop backend (`GET /api/products`).
pub struct HttpCatalogProvider {
    client: Client,
    base_url: String,
}

impl HttpCatalogProvider {
    pub fn new(base_url: &str) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent("FreshCart/0.1")
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn products_url(&self) -> String {
        format!("{}/api/products", self.base_url)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for HttpCatalogProvider {
    async fn fetch(&self) -> Result<Catalog, ProviderError> {
        let url = self.products_url();
        info!("Fetching catalog from {}", url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let products: Vec<Product> = response.json().await?;
        info!("Fetched {} products", products.len());
        Ok(Catalog::new(products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    /// Answers a single HTTP request with `status` and `body`, returns the base URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn local_provider(base_url: &str) -> HttpCatalogProvider {
        HttpCatalogProvider {
            client: Client::builder().no_proxy().build().unwrap(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[tokio::test]
    async fn file_provider_reads_backend_shaped_json() {
        let file = json_file(
            r#"[
                {"id": 1, "name": "Fresh Tomatoes", "price": 40, "unit": "per kg",
                 "category": "vegetables", "stock": 25, "image": "🍅"},
                {"id": 9, "name": "Paneer", "price": 90, "unit": null, "category": null}
            ]"#,
        );

        let catalog = FileCatalogProvider::new(file.path()).fetch().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().stock, 25);
        let paneer = catalog.get(9).unwrap();
        assert_eq!(paneer.stock, 0);
        assert!(paneer.category.is_none());
    }

    #[tokio::test]
    async fn file_provider_reports_bad_json() {
        let file = json_file("{ not json");
        let result = FileCatalogProvider::new(file.path()).fetch().await;
        assert!(matches!(result, Err(ProviderError::Decode(_))));
    }

    #[tokio::test]
    async fn file_provider_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileCatalogProvider::new(dir.path().join("catalog.json")).fetch().await;
        assert!(matches!(result, Err(ProviderError::Io(_))));
    }

    #[test]
    fn http_provider_builds_listing_url() {
        let provider = HttpCatalogProvider::new("http://localhost:5000/").unwrap();
        assert_eq!(provider.products_url(), "http://localhost:5000/api/products");
    }

    #[tokio::test]
    async fn http_provider_decodes_product_listing() {
        let base = serve_once(
            "200 OK",
            r#"[{"id": 3, "name": "Sweet Bananas", "price": 60, "category": "fruits", "stock": 20},
                {"id": 4, "name": "Fresh Apples", "price": 120, "stock": 0}]"#,
        )
        .await;

        let catalog = local_provider(&base).fetch().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(3).unwrap().name, "Sweet Bananas");
        assert_eq!(catalog.get(4).unwrap().stock, 0);
    }

    #[tokio::test]
    async fn http_provider_reports_error_status() {
        let base = serve_once("500 Internal Server Error", r#"{"error": "boom"}"#).await;
        let result = local_provider(&base).fetch().await;
        assert!(matches!(result, Err(ProviderError::Status(500))));
    }

    #[tokio::test]
    async fn http_provider_reports_bad_body() {
        let base = serve_once("200 OK", r#"{"products": []}"#).await;
        let result = local_provider(&base).fetch().await;
        assert!(matches!(result, Err(ProviderError::Http(_))));
    }
}
