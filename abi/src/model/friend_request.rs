use std::fmt::{Display, Formatter};

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl FriendRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendRequestStatus::Pending => "pending",
            FriendRequestStatus::Accepted => "accepted",
            FriendRequestStatus::Rejected => "rejected",
        }
    }
}

impl Display for FriendRequestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// document of the `friend_requests` collection, one per ordered (sender, receiver) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendRequest {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub sender: ObjectId,
    pub receiver: ObjectId,
    #[serde(default)]
    pub status: FriendRequestStatus,
    pub create_time: i64,
    pub update_time: i64,
}

impl FriendRequest {
    /// new request is always pending, whatever the caller wants
    pub fn new(sender: ObjectId, receiver: ObjectId) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: ObjectId::new(),
            sender,
            receiver,
            status: FriendRequestStatus::Pending,
            create_time: now,
            update_time: now,
        }
    }
}
