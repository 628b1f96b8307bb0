use abi::errors::ErrorKind;
use abi::model::{FriendRequestStatus, User};
use db::{FriendRequestRepo, MongoStore, UserRepo};
use utils::mongodb_tester::MongoDbTester;

async fn setup() -> (MongoDbTester, MongoStore) {
    let tdb = MongoDbTester::new("localhost", 27017, "", "").await;
    let store = MongoStore::new(tdb.database().await);
    store.ensure_indexes().await.unwrap();
    (tdb, store)
}

#[tokio::test]
#[ignore = "needs a mongodb server on localhost:27017"]
async fn duplicate_request_should_hit_unique_index() {
    let (_tdb, store) = setup().await;
    let alice = store
        .create_user(User::new("alice", "alice@example.com"))
        .await
        .unwrap();
    let bob = store
        .create_user(User::new("bob", "bob@example.com"))
        .await
        .unwrap();

    store.create_request(&alice.id, &bob.id).await.unwrap();
    let err = store.create_request(&alice.id, &bob.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateKey);
}

#[tokio::test]
#[ignore = "needs a mongodb server on localhost:27017"]
async fn update_status_and_list_should_work() {
    let (_tdb, store) = setup().await;
    let alice = store
        .create_user(User::new("alice", "alice@example.com"))
        .await
        .unwrap();
    let bob = store
        .create_user(User::new("bob", "bob@example.com"))
        .await
        .unwrap();

    let fs = store.create_request(&alice.id, &bob.id).await.unwrap();
    let found = store.find_by_pair(&alice.id, &bob.id).await.unwrap();
    assert_eq!(found, Some(fs.clone()));
    assert!(store.find_by_pair(&bob.id, &alice.id).await.unwrap().is_none());

    let updated = store
        .update_status(&fs.id, FriendRequestStatus::Accepted)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, FriendRequestStatus::Accepted);

    let list = store.list_by_receiver(&bob.id).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, fs.id);
    assert!(store.list_by_receiver(&alice.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "needs a mongodb server on localhost:27017"]
async fn add_friend_should_use_set_semantics() {
    let (_tdb, store) = setup().await;
    let alice = store
        .create_user(User::new("alice", "alice@example.com"))
        .await
        .unwrap();
    let bob = store
        .create_user(User::new("bob", "bob@example.com"))
        .await
        .unwrap();

    store.add_friend(&alice.id, &bob.id).await.unwrap();
    store.add_friend(&alice.id, &bob.id).await.unwrap();
    let alice = store.get_user_by_id(&alice.id).await.unwrap().unwrap();
    assert_eq!(alice.friends, vec![bob.id]);

    let users = store.get_users_by_ids(&[alice.id, bob.id]).await.unwrap();
    assert_eq!(users.len(), 2);
}
