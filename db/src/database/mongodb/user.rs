use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures::TryStreamExt;

use abi::errors::Error;
use abi::model::User;

use crate::database::mongodb::MongoStore;
use crate::database::user::UserRepo;

#[async_trait]
impl UserRepo for MongoStore {
    async fn create_user(&self, user: User) -> Result<User, Error> {
        self.users.insert_one(&user, None).await?;
        Ok(user)
    }

    async fn get_user_by_id(&self, id: &ObjectId) -> Result<Option<User>, Error> {
        let user = self.users.find_one(doc! {"_id": *id}, None).await?;
        Ok(user)
    }

    async fn get_users_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<User>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self
            .users
            .find(doc! {"_id": {"$in": ids.to_vec()}}, None)
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn add_friend(&self, user_id: &ObjectId, friend_id: &ObjectId) -> Result<(), Error> {
        // $addToSet keeps the list free of duplicates even if accept runs twice
        let result = self
            .users
            .update_one(
                doc! {"_id": *user_id},
                doc! {"$addToSet": {"friends": *friend_id}},
                None,
            )
            .await?;
        if result.matched_count == 0 {
            return Err(Error::not_found_with_details(format!(
                "user {} not found",
                user_id
            )));
        }
        Ok(())
    }
}
