use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// document of the `users` collection.
/// registration and profile changes belong to the user service,
/// friend request handling only touches `friends`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub friends: Vec<ObjectId>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            email: email.into(),
            friends: Vec::new(),
        }
    }

    pub fn is_friend_of(&self, other: &ObjectId) -> bool {
        self.friends.contains(other)
    }
}
