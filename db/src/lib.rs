mod database;

pub use database::{DbRepo, FriendRequestRepo, MemoryStore, MongoStore, UserRepo};
