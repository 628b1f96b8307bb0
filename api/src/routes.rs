use axum::routing::{get, post};
use axum::Router;

use crate::handlers::friends::{accept_request, list_requests, reject_request, send_request};
use crate::AppState;

pub fn app_routes(state: AppState) -> Router {
    Router::new().merge(friend_request_routes(state))
}

fn friend_request_routes(state: AppState) -> Router {
    Router::new()
        .route("/send", post(send_request))
        .route("/accept", post(accept_request))
        .route("/reject", post(reject_request))
        .route("/requests/:user_id", get(list_requests))
        .with_state(state)
}
