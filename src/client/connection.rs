//! Connection management for the Ollama server
//!
//! A `Connection` pairs an HTTP session with a resolved server endpoint.
//! It lives for exactly one logical operation and is released on every
//! exit path, either explicitly through `close` or when it is dropped.

use crate::config::ClientConfig;
use crate::error::ClientError;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use std::time::Duration;
use url::Url;

/// Port used when the host carries no `:port` suffix
pub const DEFAULT_HTTP_PORT: u16 = 80;

const USER_AGENT: &str = concat!("ollama-assist/", env!("CARGO_PKG_VERSION"));

/// Server name and port extracted from a configured host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host name or address, without scheme or port
    pub server: String,
    /// TCP port; 0 when the port text was not a valid number
    pub port: u16,
}

impl Endpoint {
    /// Parse a configured host string
    ///
    /// Strips a leading `http://` or `https://`, then splits on the last
    /// `:`. The parse is purely textual; no character-set validation of the
    /// server name takes place.
    ///
    /// # Examples
    ///
    /// ```
    /// use ollama_assist::client::Endpoint;
    ///
    /// let endpoint = Endpoint::parse("https://example.com:9999");
    /// assert_eq!(endpoint.server, "example.com");
    /// assert_eq!(endpoint.port, 9999);
    ///
    /// let endpoint = Endpoint::parse("myhost");
    /// assert_eq!(endpoint.port, 80);
    /// ```
    pub fn parse(host: &str) -> Self {
        let host = host.trim();
        let host = host
            .strip_prefix("http://")
            .or_else(|| host.strip_prefix("https://"))
            .unwrap_or(host)
            .trim_end_matches('/');

        match host.rsplit_once(':') {
            Some((server, port)) => Self {
                server: server.to_string(),
                port: port.parse().unwrap_or(0),
            },
            None => Self {
                server: host.to_string(),
                port: DEFAULT_HTTP_PORT,
            },
        }
    }

    /// Base URL requests are sent to
    ///
    /// # Errors
    ///
    /// Returns `ConnectFailed` if the server is empty, the port is invalid,
    /// or the pair does not form a valid URL
    pub fn base_url(&self) -> Result<Url, ClientError> {
        if self.server.is_empty() {
            return Err(ClientError::ConnectFailed("missing server name".to_string()));
        }
        if self.port == 0 {
            return Err(ClientError::ConnectFailed(format!(
                "invalid port for server {}",
                self.server
            )));
        }

        Url::parse(&format!("http://{}:{}/", self.server, self.port))
            .map_err(|e| ClientError::ConnectFailed(format!("{}: {}", self.server, e)))
    }
}

/// Raw outcome of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body decoded as UTF-8
    pub body: String,
}

/// Open handle to an Ollama server
#[derive(Debug)]
pub struct Connection {
    session: Option<Client>,
    base_url: Option<Url>,
}

impl Connection {
    /// Open a connection for the given configuration
    ///
    /// The session is created first, then the server endpoint is resolved.
    /// Whatever was allocated before a failure is released before returning.
    ///
    /// # Errors
    ///
    /// - `Disabled` if `config.enabled` is false; no network work happens
    /// - `OpenFailed` if the HTTP session cannot be built
    /// - `ConnectFailed` if the host does not resolve to a usable endpoint
    pub fn open(config: &ClientConfig) -> Result<Self, ClientError> {
        if !config.enabled {
            return Err(ClientError::Disabled);
        }

        let deadline = (config.timeout_ms > 0).then(|| Duration::from_millis(config.timeout_ms));
        let session = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(deadline)
            .build()
            .map_err(|e| ClientError::OpenFailed(e.to_string()))?;

        let endpoint = Endpoint::parse(&config.host);
        let base_url = endpoint.base_url()?;

        tracing::debug!(
            server = %endpoint.server,
            port = endpoint.port,
            timeout_ms = config.timeout_ms,
            "Opened Ollama connection"
        );

        Ok(Self {
            session: Some(session),
            base_url: Some(base_url),
        })
    }

    /// Whether the connection still holds its session
    pub fn is_open(&self) -> bool {
        self.session.is_some() && self.base_url.is_some()
    }

    /// Base URL of the connected server
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Issue a GET request
    pub fn get(&self, path: &str, stage: &str) -> Result<WireResponse, ClientError> {
        self.request(Method::GET, path, None, stage)
    }

    /// Issue a POST request with a JSON body
    pub fn post_json(&self, path: &str, body: &str, stage: &str) -> Result<WireResponse, ClientError> {
        self.request(Method::POST, path, Some(body), stage)
    }

    /// Issue a request and read the whole body
    ///
    /// `stage` names the operation in the `SendFailed` error, which keeps
    /// the underlying transport diagnostic as its detail.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
        stage: &str,
    ) -> Result<WireResponse, ClientError> {
        let (Some(session), Some(base_url)) = (&self.session, &self.base_url) else {
            return Err(ClientError::send_failed(stage, "Not connected to server"));
        };

        let url = base_url
            .join(path)
            .map_err(|e| ClientError::send_failed(stage, e))?;

        tracing::debug!(
            %method,
            %url,
            bytes = body.map_or(0, str::len),
            "Sending request to Ollama"
        );

        let mut request = session
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request
            .send()
            .map_err(|e| ClientError::send_failed(stage, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ClientError::send_failed(stage, e))?;

        tracing::debug!(status, bytes = body.len(), "Received response from Ollama");
        Ok(WireResponse { status, body })
    }

    /// Release the connection, then the session
    ///
    /// Safe to call any number of times.
    pub fn close(&mut self) {
        if self.base_url.take().is_some() {
            tracing::trace!("Released Ollama connection");
        }
        if self.session.take().is_some() {
            tracing::trace!("Released Ollama session");
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
