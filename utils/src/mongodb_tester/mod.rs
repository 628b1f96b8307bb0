use std::thread;

use mongodb::{Client, Database};
use tokio::runtime::Runtime;
use tracing::warn;

/// a throwaway database named `test_<uuid>`, dropped when the tester goes out of scope
pub struct MongoDbTester {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl MongoDbTester {
    pub async fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> MongoDbTester {
        let dbname = format!("test_{}", uuid::Uuid::new_v4().simple());
        MongoDbTester {
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            dbname,
        }
    }

    pub fn server_url(&self) -> String {
        match (self.user.is_empty(), self.password.is_empty()) {
            (true, _) => format!("mongodb://{}:{}", self.host, self.port),
            (false, true) => format!("mongodb://{}@{}:{}", self.user, self.host, self.port),
            (false, false) => format!(
                "mongodb://{}:{}@{}:{}",
                self.user, self.password, self.host, self.port
            ),
        }
    }

    pub fn url(&self) -> String {
        format!("{}/{}", self.server_url(), self.dbname)
    }

    pub async fn database(&self) -> Database {
        Client::with_uri_str(self.url())
            .await
            .expect("connect to mongodb failed")
            .database(&self.dbname)
    }
}

impl Drop for MongoDbTester {
    fn drop(&mut self) {
        let server_url = self.server_url();
        let dbname = self.dbname.clone();
        // drop runs inside the test runtime, so the cleanup gets a runtime of its own
        thread::spawn(move || {
            Runtime::new().unwrap().block_on(async move {
                match Client::with_uri_str(server_url).await {
                    Ok(client) => {
                        if let Err(e) = client.database(&dbname).drop(None).await {
                            warn!("drop test database {} error: {}", dbname, e);
                        }
                    }
                    Err(e) => warn!("connect to mongodb for cleanup error: {}", e),
                }
            });
        })
        .join()
        .unwrap();
    }
}
