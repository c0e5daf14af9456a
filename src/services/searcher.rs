// src/services/searcher.rs

//! HTTP search facade.
//!
//! Fetches one documentation page per call and hands it to the site parser.
//! Nothing is cached here; wrap the searcher in `CachedSearcher` for that.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use scraper::Html;

use crate::error::{DocError, Result};
use crate::models::{Package, ParseOptions, SearcherConfig};
use crate::parsers::Parser;
use crate::utils::{http, module};

/// Anything that can look up a package by module path.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Find the documentation for `module`.
    async fn search(&self, module: &str) -> Result<Package>;
}

/// Searcher that requests the documentation page on every call.
pub struct HttpSearcher {
    parser: Arc<dyn Parser>,
    client: Client,
    config: SearcherConfig,
    options: ParseOptions,
}

impl HttpSearcher {
    /// Create a searcher for the site named in the configuration.
    pub fn new(config: SearcherConfig) -> Result<Self> {
        config.validate()?;
        let site = config.site.ok_or(DocError::NoParser)?;
        let parser = site.parser(config.base_url.as_deref());
        let client = http::create_client(&config)?;
        Ok(Self::with_parser(parser, client, config))
    }

    /// Create a searcher around a custom parser and client.
    pub fn with_parser(parser: Arc<dyn Parser>, client: Client, config: SearcherConfig) -> Self {
        let options = config.parse_options();
        Self {
            parser,
            client,
            config,
            options,
        }
    }

    pub fn parser(&self) -> &dyn Parser {
        self.parser.as_ref()
    }

    /// Page URL that `search` would request for `module`.
    pub fn url(&self, module: &str) -> String {
        self.parser
            .url(&module::resolve(module, self.config.expand_std_aliases))
    }

    /// GET the page and return its body; anything but 200 is an error.
    async fn request(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(DocError::InvalidStatus(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    /// Parse a fetched page. Kept synchronous so the DOM never crosses an await.
    fn parse_body(&self, body: &str) -> Result<Package> {
        let document = Html::parse_document(body);
        self.parser.parse(&document, &self.options)
    }
}

#[async_trait]
impl Searcher for HttpSearcher {
    async fn search(&self, module: &str) -> Result<Package> {
        let module = module::resolve(module, self.config.expand_std_aliases);
        if module.is_empty() {
            return Err(DocError::validation("module name is empty"));
        }

        let url = self.parser.url(&module);
        log::info!("Fetching {} documentation from {url}", self.parser.site());

        let body = self.request(&url).await?;
        let package = self.parse_body(&body)?;
        log::debug!(
            "Found package {} ({} functions, {} types)",
            package.url,
            package.functions.len(),
            package.types.len()
        );
        Ok(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::Site;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    const GODOCS_PAGE: &str = r#"<html><head><title>fmt - godocs.io</title></head><body><div>
        <h2 id="pkg-overview">package fmt</h2>
        <p><code>import "fmt"</code></p>
        <p>Package fmt implements formatted I/O.</p>
        <h2 id="pkg-index">Index</h2>
        <h3 id="Println" data-kind="function">func Println</h3>
        <pre>func Println(a ...any) (n int, err error)</pre>
        </div></body></html>"#;

    const NOT_FOUND_PAGE: &str =
        "<html><head><title>Not Found - godocs.io</title></head><body></body></html>";

    /// Serve one canned response and report the raw request it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            let _ = tx.send(request);
        });

        (format!("http://{addr}/"), rx)
    }

    fn config(base_url: String) -> SearcherConfig {
        SearcherConfig {
            site: Some(Site::Godocs),
            base_url: Some(base_url),
            user_agent: "godocs-test/1.0".to_string(),
            ..SearcherConfig::default()
        }
    }

    #[test]
    fn test_new_without_site() {
        let config = SearcherConfig {
            site: None,
            ..SearcherConfig::default()
        };
        assert!(matches!(HttpSearcher::new(config), Err(DocError::NoParser)));
    }

    #[test]
    fn test_url_expansion() {
        let mut config = SearcherConfig::default();
        let searcher = HttpSearcher::new(config.clone()).unwrap();
        assert_eq!(searcher.url("/http/"), "https://pkg.go.dev/http");

        config.expand_std_aliases = true;
        let searcher = HttpSearcher::new(config).unwrap();
        assert_eq!(searcher.url("http"), "https://pkg.go.dev/net/http");
        assert_eq!(searcher.parser().site(), Site::Pkgsite);
    }

    #[tokio::test]
    async fn test_search_sends_user_agent() {
        let (base, request) = serve_once("200 OK", GODOCS_PAGE).await;
        let searcher = HttpSearcher::new(config(base)).unwrap();

        let package = searcher.search(" fmt ").await.unwrap();
        assert_eq!(package.name, "fmt");
        assert_eq!(package.url, "fmt");
        assert!(package.functions.contains_key("println"));

        let request = request.await.unwrap();
        assert!(request.starts_with("GET /fmt HTTP/1.1"));
        assert!(
            request
                .to_lowercase()
                .contains("user-agent: godocs-test/1.0")
        );
    }

    #[tokio::test]
    async fn test_search_rejects_non_200() {
        let (base, _request) = serve_once("500 Internal Server Error", "oops").await;
        let searcher = HttpSearcher::new(config(base)).unwrap();

        let err = searcher.search("fmt").await.unwrap_err();
        assert!(matches!(err, DocError::InvalidStatus(500)));
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_search_not_found_page() {
        let (base, _request) = serve_once("200 OK", NOT_FOUND_PAGE).await;
        let searcher = HttpSearcher::new(config(base)).unwrap();

        let err = searcher.search("does/not/exist").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_empty_module() {
        let searcher = HttpSearcher::new(SearcherConfig::default()).unwrap();
        assert!(matches!(
            searcher.search(" / ").await,
            Err(DocError::Validation(_))
        ));
    }
}
