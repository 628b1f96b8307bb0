mod friend;
mod memory;
mod mongodb;
mod user;

use std::sync::Arc;

use abi::config::{Config, DbBackend};
use abi::errors::Error;
use tracing::info;

pub use crate::database::friend::FriendRequestRepo;
pub use crate::database::memory::MemoryStore;
pub use crate::database::mongodb::MongoStore;
pub use crate::database::user::UserRepo;

/// the two collections the friend request handlers work on
#[derive(Clone, Debug)]
pub struct DbRepo {
    pub user: Arc<dyn UserRepo>,
    pub friend: Arc<dyn FriendRequestRepo>,
}

impl DbRepo {
    pub async fn new(config: &Config) -> Result<Self, Error> {
        match config.db.backend {
            DbBackend::MongoDb => {
                info!("connect to mongodb: {}", config.db.mongodb.server_url());
                let store = Arc::new(MongoStore::from_config(config).await?);
                store.ensure_indexes().await?;
                Ok(Self {
                    user: store.clone(),
                    friend: store,
                })
            }
            DbBackend::Memory => {
                info!("use in-memory store, data is lost on exit");
                Ok(Self::memory())
            }
        }
    }

    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            user: store.clone(),
            friend: store,
        }
    }
}
