use abi::errors::Error;
use abi::model::User;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::fmt::Debug;

#[async_trait]
pub trait UserRepo: Sync + Send + Debug {
    /// create user; users are owned by the user service, this is for seeding and tests
    async fn create_user(&self, user: User) -> Result<User, Error>;

    /// get user by id
    async fn get_user_by_id(&self, id: &ObjectId) -> Result<Option<User>, Error>;

    /// get users by ids, missing ids are skipped
    async fn get_users_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<User>, Error>;

    /// add friend_id to the friend list of user_id, nothing happens if it is already there.
    /// NotFound if user_id does not exist
    async fn add_friend(&self, user_id: &ObjectId, friend_id: &ObjectId) -> Result<(), Error>;
}
