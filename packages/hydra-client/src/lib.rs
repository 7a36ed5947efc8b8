//! Pure Hydra REST API client.
//!
//! A minimal client for the Hydra collaboration service API. Supports
//! listing and creating rooms, adding members to a room, and posting text
//! messages or file references.
//!
//! # Example
//!
//! ```rust,ignore
//! use hydra_client::HydraClient;
//!
//! let client = HydraClient::new("your-access-token".into());
//!
//! let rooms = client.list_rooms().await?;
//! for room in &rooms {
//!     println!("{} {}", room.id, room.title);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{HydraError, Result};
pub use types::{
    find_room_by_title, CreateMembershipRequest, CreateMessageRequest, CreateRoomRequest,
    Membership, Message, Room, RoomList,
};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

const BASE_URL: &str = "https://api.example-collab-service.com";

pub struct HydraClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl HydraClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Create from the `HYDRA_TOKEN` environment variable.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("HYDRA_TOKEN")
            .map_err(|_| HydraError::Config("HYDRA_TOKEN not set".into()))?;
        Ok(Self::new(token))
    }

    /// Set a custom base URL (tests, proxies, on-prem deployments).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Disable TLS certificate verification, for deployments behind
    /// self-signed certificates. Verification is on unless this is called.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Result<Self> {
        self.client = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept)
            .build()?;
        Ok(self)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the rooms visible to the authenticated identity.
    pub async fn list_rooms(&self) -> Result<Vec<Room>> {
        let url = format!("{}/hydra/api/v1/rooms", self.base_url);
        tracing::debug!(url = %url, "Listing rooms");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let list: RoomList = decode(resp).await?;
        Ok(list.items)
    }

    /// Create a room with the given title. The server assigns the id.
    pub async fn create_room(&self, title: &str) -> Result<Room> {
        let url = format!("{}/hydra/api/v1/rooms", self.base_url);
        let body = CreateRoomRequest {
            title: title.to_string(),
        };
        tracing::debug!(url = %url, title, "Creating room");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        decode(resp).await
    }

    /// Add a member to a room by email address, never as a moderator.
    ///
    /// A 403 from this endpoint means the person is already a participant;
    /// callers are expected to treat that status specially rather than as
    /// an authorization failure.
    pub async fn add_member(&self, room_id: Option<&str>, email: &str) -> Result<Membership> {
        let url = format!("{}/hydra/api/v1/memberships", self.base_url);
        let body = CreateMembershipRequest {
            person_email: email.to_string(),
            is_moderator: false,
            room_id: room_id.map(str::to_string),
        };
        tracing::debug!(url = %url, email, room_id = ?room_id, "Adding member");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        decode(resp).await
    }

    /// Post a text message and/or a file reference to a room. Absent
    /// fields are omitted from the payload entirely.
    pub async fn send_message(
        &self,
        room_id: Option<&str>,
        text: Option<&str>,
        file: Option<&str>,
    ) -> Result<Message> {
        let url = format!("{}/hydra/api/v1/messages", self.base_url);
        let body = CreateMessageRequest {
            room_id: room_id.map(str::to_string),
            text: text.map(str::to_string),
            file: file.map(str::to_string),
        };
        tracing::debug!(url = %url, room_id = ?room_id, "Sending message");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        decode(resp).await
    }
}

/// Synthesized "<status> <reason>" diagnostic for bodies that are not JSON.
fn status_line(status: StatusCode) -> String {
    format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}

/// Turn a response into a typed record, tagging every failure mode.
///
/// Anything other than 200 becomes `HydraError::Api` carrying the parsed
/// error payload (or the synthesized status line when the body is not
/// JSON). A 200 with an unparseable body becomes `HydraError::Parse`.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if status != StatusCode::OK {
        let text = resp.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text)
            .unwrap_or_else(|_| Value::String(status_line(status)));
        return Err(HydraError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|_| HydraError::Parse {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    })
}
