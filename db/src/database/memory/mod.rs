//! In-memory store for handler tests and local runs without mongodb.

use async_trait::async_trait;
use bson::oid::ObjectId;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use abi::errors::{Error, ErrorKind};
use abi::model::{FriendRequest, FriendRequestStatus, User};

use crate::database::friend::FriendRequestRepo;
use crate::database::user::UserRepo;

/// Implements both repos with concurrent maps.
///
/// `pairs` plays the role of the unique (sender, receiver) index,
/// the entry api makes the existence check and the insert one step.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<ObjectId, User>,
    requests: DashMap<ObjectId, FriendRequest>,
    pairs: DashMap<(ObjectId, ObjectId), ObjectId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn create_user(&self, user: User) -> Result<User, Error> {
        match self.users.entry(user.id) {
            Entry::Occupied(_) => Err(Error::with_details(
                ErrorKind::DuplicateKey,
                format!("user {} already exists", user.id),
            )),
            Entry::Vacant(entry) => {
                entry.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn get_user_by_id(&self, id: &ObjectId) -> Result<Option<User>, Error> {
        Ok(self.users.get(id).map(|user| user.value().clone()))
    }

    async fn get_users_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<User>, Error> {
        Ok(ids
            .iter()
            .filter_map(|id| self.users.get(id).map(|user| user.value().clone()))
            .collect())
    }

    async fn add_friend(&self, user_id: &ObjectId, friend_id: &ObjectId) -> Result<(), Error> {
        let mut user = self.users.get_mut(user_id).ok_or_else(|| {
            Error::not_found_with_details(format!("user {} not found", user_id))
        })?;
        if !user.is_friend_of(friend_id) {
            user.friends.push(*friend_id);
        }
        Ok(())
    }
}

#[async_trait]
impl FriendRequestRepo for MemoryStore {
    async fn create_request(
        &self,
        sender: &ObjectId,
        receiver: &ObjectId,
    ) -> Result<FriendRequest, Error> {
        match self.pairs.entry((*sender, *receiver)) {
            Entry::Occupied(_) => Err(Error::with_details(
                ErrorKind::DuplicateKey,
                format!("friend request {} -> {} already exists", sender, receiver),
            )),
            Entry::Vacant(entry) => {
                let fs = FriendRequest::new(*sender, *receiver);
                entry.insert(fs.id);
                self.requests.insert(fs.id, fs.clone());
                Ok(fs)
            }
        }
    }

    async fn get_request(&self, id: &ObjectId) -> Result<Option<FriendRequest>, Error> {
        Ok(self.requests.get(id).map(|fs| fs.value().clone()))
    }

    async fn find_by_pair(
        &self,
        sender: &ObjectId,
        receiver: &ObjectId,
    ) -> Result<Option<FriendRequest>, Error> {
        let id = match self.pairs.get(&(*sender, *receiver)) {
            Some(id) => *id.value(),
            None => return Ok(None),
        };
        self.get_request(&id).await
    }

    async fn update_status(
        &self,
        id: &ObjectId,
        status: FriendRequestStatus,
    ) -> Result<Option<FriendRequest>, Error> {
        Ok(self.requests.get_mut(id).map(|mut fs| {
            fs.status = status;
            fs.update_time = chrono::Utc::now().timestamp_millis();
            fs.value().clone()
        }))
    }

    async fn list_by_receiver(&self, receiver: &ObjectId) -> Result<Vec<FriendRequest>, Error> {
        let mut list: Vec<FriendRequest> = self
            .requests
            .iter()
            .filter(|fs| &fs.receiver == receiver)
            .map(|fs| fs.value().clone())
            .collect();
        list.sort_by_key(|fs| fs.id);
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_users(store: &MemoryStore) -> (User, User) {
        let alice = store
            .create_user(User::new("alice", "alice@example.com"))
            .await
            .unwrap();
        let bob = store
            .create_user(User::new("bob", "bob@example.com"))
            .await
            .unwrap();
        (alice, bob)
    }

    #[tokio::test]
    async fn create_request_should_reject_same_pair() {
        let store = MemoryStore::new();
        let (alice, bob) = seed_users(&store).await;

        let fs = store.create_request(&alice.id, &bob.id).await.unwrap();
        assert_eq!(fs.status, FriendRequestStatus::Pending);

        let err = store.create_request(&alice.id, &bob.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);

        // the opposite direction is another pair
        assert!(store.create_request(&bob.id, &alice.id).await.is_ok());
    }

    #[tokio::test]
    async fn find_by_pair_should_be_directional() {
        let store = MemoryStore::new();
        let (alice, bob) = seed_users(&store).await;
        let fs = store.create_request(&alice.id, &bob.id).await.unwrap();

        let found = store.find_by_pair(&alice.id, &bob.id).await.unwrap();
        assert_eq!(found.map(|f| f.id), Some(fs.id));
        assert!(store.find_by_pair(&bob.id, &alice.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_status_should_return_updated_request() {
        let store = MemoryStore::new();
        let (alice, bob) = seed_users(&store).await;
        let fs = store.create_request(&alice.id, &bob.id).await.unwrap();

        let updated = store
            .update_status(&fs.id, FriendRequestStatus::Rejected)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, FriendRequestStatus::Rejected);
        assert!(updated.update_time >= fs.update_time);

        let missing = store
            .update_status(&ObjectId::new(), FriendRequestStatus::Accepted)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn add_friend_should_not_duplicate() {
        let store = MemoryStore::new();
        let (alice, bob) = seed_users(&store).await;

        store.add_friend(&alice.id, &bob.id).await.unwrap();
        store.add_friend(&alice.id, &bob.id).await.unwrap();

        let alice = store.get_user_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(alice.friends, vec![bob.id]);

        let err = store.add_friend(&ObjectId::new(), &bob.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn list_by_receiver_should_only_return_received() {
        let store = MemoryStore::new();
        let (alice, bob) = seed_users(&store).await;
        let carol = store
            .create_user(User::new("carol", "carol@example.com"))
            .await
            .unwrap();

        store.create_request(&alice.id, &bob.id).await.unwrap();
        store.create_request(&carol.id, &bob.id).await.unwrap();
        store.create_request(&bob.id, &alice.id).await.unwrap();

        let list = store.list_by_receiver(&bob.id).await.unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|fs| fs.receiver == bob.id));
        assert_eq!(list[0].sender, alice.id);
        assert_eq!(list[1].sender, carol.id);

        let users = store
            .get_users_by_ids(&[alice.id, ObjectId::new()])
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
    }
}
