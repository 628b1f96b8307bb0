use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::model::{FriendRequest, FriendRequestStatus, User};

/// body of `POST /send`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendFriendRequest {
    pub sender_id: String,
    pub receiver_id: String,
}

/// body of `POST /accept` and `POST /reject`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestReply {
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// the sender fields exposed in a request list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SenderInfo {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for SenderInfo {
    fn from(value: &User) -> Self {
        Self {
            id: value.id.to_hex(),
            name: value.name.clone(),
            email: value.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestWithSender {
    #[serde(rename = "_id")]
    pub id: String,
    /// none if the sender was removed after sending
    pub sender: Option<SenderInfo>,
    pub receiver: String,
    pub status: FriendRequestStatus,
    pub create_time: i64,
    pub update_time: i64,
}

impl FriendRequestWithSender {
    pub fn new(fs: FriendRequest, sender: Option<&User>) -> Self {
        Self {
            id: fs.id.to_hex(),
            sender: sender.map(SenderInfo::from),
            receiver: fs.receiver.to_hex(),
            status: fs.status,
            create_time: fs.create_time,
            update_time: fs.update_time,
        }
    }
}

/// parse a hex object id coming from a request, `field` names it in the error message
pub fn parse_object_id(field: &str, value: &str) -> Result<ObjectId, Error> {
    ObjectId::parse_str(value).map_err(|_| Error::bad_request(format!("Invalid {field}: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn send_request_should_use_camel_case() {
        let body = r#"{"senderId":"a","receiverId":"b"}"#;
        let req: SendFriendRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.sender_id, "a");
        assert_eq!(req.receiver_id, "b");

        let reply: FriendRequestReply = serde_json::from_str(r#"{"requestId":"c"}"#).unwrap();
        assert_eq!(reply.request_id, "c");
    }

    #[test]
    fn parse_object_id_should_reject_garbage() {
        let err = parse_object_id("userId", "not-an-id").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.details(), Some("Invalid userId: not-an-id"));

        let id = ObjectId::new();
        assert_eq!(parse_object_id("userId", &id.to_hex()).unwrap(), id);
    }

    #[test]
    fn request_with_sender_should_expand_sender() {
        let sender = User::new("alice", "alice@example.com");
        let receiver = User::new("bob", "bob@example.com");
        let fs = FriendRequest::new(sender.id, receiver.id);

        let item = FriendRequestWithSender::new(fs.clone(), Some(&sender));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["_id"], fs.id.to_hex());
        assert_eq!(value["sender"]["name"], "alice");
        assert_eq!(value["sender"]["email"], "alice@example.com");
        assert_eq!(value["receiver"], receiver.id.to_hex());
        assert_eq!(value["status"], "pending");
        assert!(value.get("createTime").is_some());

        let orphan = FriendRequestWithSender::new(fs, None);
        assert!(orphan.sender.is_none());
    }
}
