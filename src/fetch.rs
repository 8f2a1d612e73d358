use std::time::Duration;

use eyre::Result;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Settings for `Fetcher`. Fixed for the lifetime of the client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub accept: String,
    /// Timeout of a whole request.
    pub timeout: Duration,
    /// Pause after every successful fetch.
    pub delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/120.0 Safari/537.36"
                .into(),
            accept_language: "en-US,en;q=0.9".into(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
                .into(),
            timeout: Duration::from_secs(20),
            delay: Duration::from_secs(1),
        }
    }
}

impl FetchConfig {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds the default headers for the client.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_str(&self.accept_language)?,
        );
        headers.insert(header::ACCEPT, HeaderValue::from_str(&self.accept)?);
        Ok(headers)
    }
}

/// Sequential page downloader with a fixed pause between requests.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    delay: Duration,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(config.build_headers()?)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            delay: config.delay,
        })
    }

    /// Downloads a page and returns its body with the URL it was finally
    /// served from (after redirects).
    ///
    /// Non-success statuses are errors.
    pub async fn fetch(&self, url: Url) -> Result<(String, Url)> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().clone();
        debug!(status = %response.status(), url = %final_url, "fetched page");
        let body = response.text().await?;

        tokio::time::sleep(self.delay).await;
        Ok((body, final_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Canned responses of the loopback server.
    fn respond(path: &str) -> String {
        let (status, location, body) = match path {
            "/old_page-1.php" => ("301 Moved Permanently", "Location: /final_page-1.php\r\n", ""),
            "/final_page-1.php" => ("200 OK", "", "hello"),
            _ => ("404 Not Found", "", "missing"),
        };
        format!(
            "HTTP/1.1 {status}\r\n{location}Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Serves `respond` on a random local port, one request per connection.
    async fn spawn_server() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let request = String::from_utf8_lossy(&request);
                    let path = request.split_whitespace().nth(1).unwrap_or("/");
                    let _ = stream.write_all(respond(path).as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });
        addr
    }

    fn local_url(addr: SocketAddr, path: &str) -> Url {
        Url::parse(&format!("http://{addr}{path}")).unwrap()
    }

    fn no_delay() -> Fetcher {
        Fetcher::new(&FetchConfig::default().with_delay(Duration::ZERO)).unwrap()
    }

    #[test]
    fn default_headers() {
        let headers = FetchConfig::default().build_headers().unwrap();

        assert!(headers[header::USER_AGENT]
            .to_str()
            .unwrap()
            .starts_with("Mozilla/5.0 (Windows NT 10.0; Win64; x64)"));
        assert_eq!(headers[header::ACCEPT_LANGUAGE], "en-US,en;q=0.9");
        assert!(headers.contains_key(header::ACCEPT));
    }

    #[test]
    fn invalid_header_is_an_error() {
        let config = FetchConfig::default().with_user_agent("bad\nagent");
        assert!(config.build_headers().is_err());
        assert!(Fetcher::new(&config).is_err());
    }

    #[tokio::test]
    async fn builds_client_from_config() {
        let config = FetchConfig::default()
            .with_delay(Duration::ZERO)
            .with_timeout(Duration::from_secs(5));
        let fetcher = Fetcher::new(&config).unwrap();

        assert_eq!(fetcher.delay, Duration::ZERO);
    }

    #[tokio::test]
    async fn not_found_is_an_error() {
        let addr = spawn_server().await;
        let result = no_delay().fetch(local_url(addr, "/missing-404.php")).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn follows_redirect_to_final_url() {
        let addr = spawn_server().await;
        let (body, final_url) = no_delay()
            .fetch(local_url(addr, "/old_page-1.php"))
            .await
            .unwrap();

        assert_eq!(body, "hello");
        assert_eq!(final_url, local_url(addr, "/final_page-1.php"));
    }

    #[tokio::test]
    async fn waits_after_each_fetch() {
        let addr = spawn_server().await;
        let delay = Duration::from_millis(200);
        let fetcher = Fetcher::new(&FetchConfig::default().with_delay(delay)).unwrap();

        let start = Instant::now();
        fetcher
            .fetch(local_url(addr, "/final_page-1.php"))
            .await
            .unwrap();

        assert!(start.elapsed() >= delay);
    }
}
