use std::time::Duration;

/// Connection settings for a Panopto server
#[derive(Clone)]
pub struct ClientConfig {
    /// Server host name, e.g. `demo.hosted.panopto.com`
    pub server: String,
    pub client_id: String,
    pub client_secret: String,
    /// Disable TLS certificate validation. Never use against production.
    pub skip_verify: bool,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(server: String, client_id: String, client_secret: String) -> Self {
        Self {
            server,
            client_id,
            client_secret,
            skip_verify: false,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_skip_verify(mut self, skip_verify: bool) -> Self {
        self.skip_verify = skip_verify;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL of the server, accepting a bare host or a full `https://` URL
    pub fn base_url(&self) -> String {
        let server = self.server.trim().trim_end_matches('/');
        if server.starts_with("http://") || server.starts_with("https://") {
            server.to_string()
        } else {
            format!("https://{}", server)
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}/Panopto/oauth2/connect/token", self.base_url())
    }

    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/Panopto/api/v1/{}",
            self.base_url(),
            path.trim_start_matches('/')
        )
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server", &self.server)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("skip_verify", &self.skip_verify)
            .field("timeout", &self.timeout)
            .finish()
    }
}
