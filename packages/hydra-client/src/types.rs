use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A room visible to the authenticated identity.
///
/// `id` is the server-assigned identity; `title` is a non-unique
/// human-readable lookup key. Unrecognized fields are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Response wrapper for the room listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomList {
    pub items: Vec<Room>,
}

/// Body for `POST /hydra/api/v1/rooms`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRoomRequest {
    pub title: String,
}

/// Body for `POST /hydra/api/v1/memberships`.
///
/// `room_id` stays present (null) even when no room was obtained, so the
/// server rejects the call rather than the client short-circuiting it.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMembershipRequest {
    #[serde(rename = "personEmail")]
    pub person_email: String,
    #[serde(rename = "isModerator")]
    pub is_moderator: bool,
    #[serde(rename = "roomId")]
    pub room_id: Option<String>,
}

/// A person's membership in a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub id: String,
    #[serde(rename = "roomId", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(rename = "personEmail", skip_serializing_if = "Option::is_none")]
    pub person_email: Option<String>,
    #[serde(rename = "isModerator", skip_serializing_if = "Option::is_none")]
    pub is_moderator: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Body for `POST /hydra/api/v1/messages`.
///
/// `text` and `file` are omitted entirely when absent; `room_id` is always
/// serialized, null when no room was obtained.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest {
    #[serde(rename = "roomId")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// A message accepted by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "roomId", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// First room (in server-returned order) whose title contains `needle` as
/// a substring. Returns `None` when nothing matches or the list is empty.
pub fn find_room_by_title<'a>(rooms: &'a [Room], needle: &str) -> Option<&'a Room> {
    rooms.iter().find(|room| room.title.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn room(id: &str, title: &str) -> Room {
        Room {
            id: id.into(),
            title: title.into(),
            created: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_find_room_by_title_substring_match() {
        let rooms = vec![room("r1", "ops"), room("r2", "network ops"), room("r3", "ops war room")];
        let found = find_room_by_title(&rooms, "war").unwrap();
        assert_eq!(found.id, "r3");
    }

    #[test]
    fn test_find_room_by_title_first_match_wins() {
        let rooms = vec![room("r1", "team alpha"), room("r2", "alpha leads")];
        let found = find_room_by_title(&rooms, "alpha").unwrap();
        assert_eq!(found.id, "r1");
    }

    #[test]
    fn test_find_room_by_title_empty_list() {
        assert!(find_room_by_title(&[], "anything").is_none());
    }

    #[test]
    fn test_message_request_omits_absent_fields() {
        let request = CreateMessageRequest {
            room_id: Some("abc123".into()),
            text: Some("hello".into()),
            file: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"roomId": "abc123", "text": "hello"}));
    }

    #[test]
    fn test_message_request_null_room_id_is_kept() {
        let request = CreateMessageRequest {
            room_id: None,
            text: Some("hello".into()),
            file: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"roomId": null, "text": "hello"}));
    }

    #[test]
    fn test_membership_request_wire_names() {
        let request = CreateMembershipRequest {
            person_email: "joe.user@example.com".into(),
            is_moderator: false,
            room_id: Some("abc123".into()),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "personEmail": "joe.user@example.com",
                "isModerator": false,
                "roomId": "abc123"
            })
        );
    }

    #[test]
    fn test_room_keeps_unrecognized_fields() {
        let value = json!({
            "id": "r1",
            "title": "ops",
            "teamId": "t9",
            "isLocked": true
        });
        let parsed: Room = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.extra.get("teamId"), Some(&json!("t9")));
        assert_eq!(parsed.extra.get("isLocked"), Some(&json!(true)));
    }
}
