use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::{
    config::PanelConfig,
    error::{PanelError, Result},
    operations::FileOperations,
    types::RenameRequest,
};

const ACCEPT_HEADER: &str = "application/vnd.pterodactyl.v1+json";

/// Panel-backed file operations
///
/// Talks to the client API of the panel:
/// - `PUT /api/client/servers/{server}/files/rename` to rename or move
#[derive(Clone)]
pub struct PanelClient {
    client: Client,
    config: PanelConfig,
}

impl PanelClient {
    /// Create a client from validated configuration
    pub fn new(config: PanelConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Build the rename endpoint URL for a server
    fn rename_url(&self, server: &str) -> String {
        format!(
            "{}/api/client/servers/{}/files/rename",
            self.config.base_url.trim_end_matches('/'),
            server
        )
    }
}

#[async_trait]
impl FileOperations for PanelClient {
    async fn rename_file(&self, server: &str, request: &RenameRequest) -> Result<()> {
        let url = self.rename_url(server);
        debug!(
            "PUT {} ({} -> {})",
            url, request.rename_from, request.rename_to
        );

        let mut builder = self
            .client
            .put(&url)
            .header("Accept", ACCEPT_HEADER)
            .json(request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "access denied".to_string());
                Err(PanelError::Unauthorized { message })
            }
            StatusCode::NOT_FOUND => Err(PanelError::NotFound {
                path: request.rename_from.clone(),
            }),
            status => Err(PanelError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }

    fn identifier(&self) -> String {
        format!("panel://{}", self.config.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_url() {
        let client = PanelClient::new(PanelConfig::new("https://panel.example.com/")).unwrap();

        assert_eq!(
            client.rename_url("1a7ce997"),
            "https://panel.example.com/api/client/servers/1a7ce997/files/rename"
        );
        assert_eq!(client.identifier(), "panel://https://panel.example.com");
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(matches!(
            PanelClient::new(PanelConfig::new("panel.example.com")),
            Err(PanelError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_request_wire_format() {
        let request = RenameRequest {
            rename_from: "/a.txt".to_string(),
            rename_to: "/sub/a.txt".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "rename_from": "/a.txt", "rename_to": "/sub/a.txt" })
        );
    }
}
