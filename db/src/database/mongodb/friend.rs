use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};

use abi::errors::Error;
use abi::model::{FriendRequest, FriendRequestStatus};

use crate::database::friend::FriendRequestRepo;
use crate::database::mongodb::MongoStore;

#[async_trait]
impl FriendRequestRepo for MongoStore {
    async fn create_request(
        &self,
        sender: &ObjectId,
        receiver: &ObjectId,
    ) -> Result<FriendRequest, Error> {
        let fs = FriendRequest::new(*sender, *receiver);
        // the unique index turns a concurrent duplicate into ErrorKind::DuplicateKey
        self.requests.insert_one(&fs, None).await?;
        Ok(fs)
    }

    async fn get_request(&self, id: &ObjectId) -> Result<Option<FriendRequest>, Error> {
        let fs = self.requests.find_one(doc! {"_id": *id}, None).await?;
        Ok(fs)
    }

    async fn find_by_pair(
        &self,
        sender: &ObjectId,
        receiver: &ObjectId,
    ) -> Result<Option<FriendRequest>, Error> {
        let fs = self
            .requests
            .find_one(doc! {"sender": *sender, "receiver": *receiver}, None)
            .await?;
        Ok(fs)
    }

    async fn update_status(
        &self,
        id: &ObjectId,
        status: FriendRequestStatus,
    ) -> Result<Option<FriendRequest>, Error> {
        let option = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let update = doc! {
            "$set": {
                "status": status.as_str(),
                "update_time": chrono::Utc::now().timestamp_millis(),
            }
        };
        let fs = self
            .requests
            .find_one_and_update(doc! {"_id": *id}, update, option)
            .await?;
        Ok(fs)
    }

    async fn list_by_receiver(&self, receiver: &ObjectId) -> Result<Vec<FriendRequest>, Error> {
        // object id starts with the creation second, sort by it for insertion order
        let option = FindOptions::builder().sort(Some(doc! {"_id": 1})).build();
        let cursor = self
            .requests
            .find(doc! {"receiver": *receiver}, option)
            .await?;
        let list: Vec<FriendRequest> = cursor.try_collect().await?;
        Ok(list)
    }
}
