use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use folderwalk_core::{FolderService, RawFolder, RawSession, RemoteAccessError};

use crate::auth::TokenProvider;
use crate::config::ClientConfig;

/// One page of a paginated Panopto listing
#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(rename = "Results")]
    results: Vec<T>,
}

/// Sort applied to a paginated listing
#[derive(Debug, Clone, Copy)]
struct Listing {
    resource: &'static str,
    sort_field: &'static str,
    sort_order: &'static str,
}

const CHILD_FOLDERS: Listing = Listing {
    resource: "children",
    sort_field: "Name",
    sort_order: "Asc",
};

const FOLDER_SESSIONS: Listing = Listing {
    resource: "sessions",
    sort_field: "CreatedDate",
    sort_order: "Desc",
};

/// Panopto REST API client
#[derive(Debug)]
pub struct PanoptoClient {
    client: Client,
    config: ClientConfig,
    tokens: TokenProvider,
}

impl PanoptoClient {
    pub fn new(config: ClientConfig) -> Result<Self, RemoteAccessError> {
        if config.skip_verify {
            warn!(
                server = %config.server,
                "TLS certificate verification is disabled"
            );
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.skip_verify)
            .build()
            .map_err(|e| RemoteAccessError::Transport(e.to_string()))?;

        let tokens = TokenProvider::new(&config);
        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn page_url(&self, folder_id: &str, listing: Listing, page_number: usize) -> String {
        format!(
            "{}?sortField={}&sortOrder={}&pageNumber={}",
            self.config
                .api_url(&format!("folders/{}/{}", folder_id, listing.resource)),
            listing.sort_field,
            listing.sort_order,
            page_number
        )
    }

    /// Fetch pages from 0 until the first empty one
    async fn fetch_all<T: DeserializeOwned>(
        &self,
        folder_id: &str,
        listing: Listing,
    ) -> Result<Vec<T>, RemoteAccessError> {
        let mut items = Vec::new();
        let mut page_number = 0;

        loop {
            let url = self.page_url(folder_id, listing, page_number);
            let page: Page<T> = self.get_json(&url).await?;
            if page.results.is_empty() {
                break;
            }
            debug!(
                folder_id,
                resource = listing.resource,
                page_number,
                count = page.results.len(),
                "Fetched page"
            );
            items.extend(page.results);
            page_number += 1;
        }

        Ok(items)
    }

    /// GET with bearer auth, re-authorizing once on 401
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteAccessError> {
        let mut reauthorized = false;

        loop {
            let token = self.tokens.access_token(&self.client).await?;
            let response = self
                .client
                .get(url)
                .bearer_auth(&token)
                .send()
                .await
                .map_err(|e| RemoteAccessError::Transport(e.to_string()))?;

            match response.status() {
                StatusCode::UNAUTHORIZED if !reauthorized => {
                    debug!(url, "Access token rejected, re-authorizing");
                    self.tokens.invalidate().await;
                    reauthorized = true;
                }
                StatusCode::UNAUTHORIZED => {
                    return Err(RemoteAccessError::Authentication(format!(
                        "request to {} rejected after re-authorization",
                        url
                    )));
                }
                status if status.is_success() => {
                    let body = response
                        .text()
                        .await
                        .map_err(|e| RemoteAccessError::Transport(e.to_string()))?;
                    return parse_body(&body);
                }
                status => {
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    return Err(RemoteAccessError::Status {
                        status: status.as_u16(),
                        body,
                    });
                }
            }
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, RemoteAccessError> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(100).collect();
        RemoteAccessError::MalformedResponse(format!("{} (body: {})", e, preview))
    })
}

#[async_trait]
impl FolderService for PanoptoClient {
    async fn list_child_folders(
        &self,
        folder_id: &str,
    ) -> Result<Vec<RawFolder>, RemoteAccessError> {
        self.fetch_all(folder_id, CHILD_FOLDERS).await
    }

    async fn list_sessions(&self, folder_id: &str) -> Result<Vec<RawSession>, RemoteAccessError> {
        self.fetch_all(folder_id, FOLDER_SESSIONS).await
    }
}
