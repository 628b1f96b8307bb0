use abi::errors::Error;
use abi::model::{FriendRequest, FriendRequestStatus};
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::fmt::Debug;

#[async_trait]
pub trait FriendRequestRepo: Send + Sync + Debug {
    /// create a pending friend request.
    /// DuplicateKey if the pair (sender, receiver) already has one
    async fn create_request(
        &self,
        sender: &ObjectId,
        receiver: &ObjectId,
    ) -> Result<FriendRequest, Error>;

    async fn get_request(&self, id: &ObjectId) -> Result<Option<FriendRequest>, Error>;

    /// directional: (a, b) does not find the request (b, a)
    async fn find_by_pair(
        &self,
        sender: &ObjectId,
        receiver: &ObjectId,
    ) -> Result<Option<FriendRequest>, Error>;

    /// set the status and return the updated request, none if id does not exist
    async fn update_status(
        &self,
        id: &ObjectId,
        status: FriendRequestStatus,
    ) -> Result<Option<FriendRequest>, Error>;

    /// every request received by the user, whatever the status, oldest first
    async fn list_by_receiver(&self, receiver: &ObjectId) -> Result<Vec<FriendRequest>, Error>;
}
