use serde::Serialize;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Mojang-account credentials for online-mode servers. Offline servers
/// skip the encryption request entirely, in which case no credentials are
/// needed.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// OAuth/Yggdrasil access token.
    pub access_token: String,
    /// Profile uuid without dashes, as the session server expects it.
    pub profile_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinRequest<'a> {
    access_token: &'a str,
    selected_profile: &'a str,
    server_id: &'a str,
}

/// Thin client for the session server's join endpoint. The server checks
/// this record when it verifies the player after the encryption response.
pub struct SessionService {
    client: reqwest::Client,
    join_url: String,
}

impl SessionService {
    pub fn new(join_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            join_url: join_url.to_string(),
        }
    }

    /// Registers the pending join under `server_hash`. A 204 means the
    /// session server accepted it; anything else fails the login.
    pub async fn join_server(
        &self,
        credentials: &Credentials,
        server_hash: &str,
    ) -> ClientResult<()> {
        debug!(server_hash, "posting session join");

        let request = JoinRequest {
            access_token: &credentials.access_token,
            selected_profile: &credentials.profile_id,
            server_id: server_hash,
        };

        let response = self
            .client
            .post(&self.join_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Auth(format!("session join request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Auth(format!(
                "session server rejected join ({status}): {body}"
            )));
        }

        Ok(())
    }
}
