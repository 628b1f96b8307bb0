use std::sync::Arc;

use abi::config::Config;
use abi::errors::Error;
use db::{DbRepo, FriendRequestRepo, UserRepo};

pub(crate) mod handlers;
mod routes;

pub use routes::app_routes;

#[derive(Clone, Debug)]
pub struct AppState {
    pub user: Arc<dyn UserRepo>,
    pub friend: Arc<dyn FriendRequestRepo>,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, Error> {
        let repo = DbRepo::new(config).await?;
        Ok(Self::from_repo(repo))
    }

    pub fn from_repo(repo: DbRepo) -> Self {
        Self {
            user: repo.user,
            friend: repo.friend,
        }
    }
}

pub async fn start(config: Config) -> Result<(), Error> {
    let state = AppState::new(&config).await?;
    let app = routes::app_routes(state);
    let listener = tokio::net::TcpListener::bind(&config.server.server_url()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
