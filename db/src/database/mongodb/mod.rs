mod friend;
mod user;

use bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

use abi::config::Config;
use abi::errors::Error;
use abi::model::{FriendRequest, User};

const COLL_USERS: &str = "users";
const COLL_FRIEND_REQUESTS: &str = "friend_requests";

/// users and friend requests live in the same database
#[derive(Debug)]
pub struct MongoStore {
    users: Collection<User>,
    requests: Collection<FriendRequest>,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self {
            users: db.collection(COLL_USERS),
            requests: db.collection(COLL_FRIEND_REQUESTS),
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self, Error> {
        let db = Client::with_uri_str(config.db.mongodb.url())
            .await?
            .database(&config.db.mongodb.database);
        Ok(Self::new(db))
    }

    /// unique (sender, receiver) so two racing sends cannot both insert,
    /// plus a receiver index for the request list
    pub async fn ensure_indexes(&self) -> Result<(), Error> {
        let pair = IndexModel::builder()
            .keys(doc! {"sender": 1, "receiver": 1})
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let receiver = IndexModel::builder().keys(doc! {"receiver": 1}).build();
        self.requests.create_indexes(vec![pair, receiver], None).await?;
        Ok(())
    }
}
