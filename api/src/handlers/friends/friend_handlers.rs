use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use bson::oid::ObjectId;
use tracing::debug;

use abi::errors::{Error, ErrorKind};
use abi::model::{FriendRequest, FriendRequestStatus, User};
use abi::types::{
    parse_object_id, FriendRequestReply, FriendRequestWithSender, MessageResponse,
    SendFriendRequest,
};
use utils::custom_extract::{JsonExtractor, PathExtractor};

use crate::AppState;

const SELF_REQUEST: &str = "You can't send a friend request to yourself";
const USERS_NOT_FOUND: &str = "User(s) not found";
const REQUEST_EXISTS: &str = "Friend request already exists";
const REQUEST_NOT_FOUND: &str = "Friend request not found";

// 发送好友请求
pub async fn send_request(
    State(app_state): State<AppState>,
    JsonExtractor(req): JsonExtractor<SendFriendRequest>,
) -> Result<Json<MessageResponse>, Error> {
    debug!("send friend request: {:?}", &req);
    if req.sender_id == req.receiver_id {
        return Err(Error::bad_request(SELF_REQUEST));
    }
    let sender_id = parse_object_id("senderId", &req.sender_id)?;
    let receiver_id = parse_object_id("receiverId", &req.receiver_id)?;
    // same id written in another letter case
    if sender_id == receiver_id {
        return Err(Error::bad_request(SELF_REQUEST));
    }

    let sender = app_state.user.get_user_by_id(&sender_id).await?;
    let receiver = app_state.user.get_user_by_id(&receiver_id).await?;
    if sender.is_none() || receiver.is_none() {
        return Err(Error::not_found_with_details(USERS_NOT_FOUND));
    }

    if app_state
        .friend
        .find_by_pair(&sender_id, &receiver_id)
        .await?
        .is_some()
    {
        return Err(Error::bad_request(REQUEST_EXISTS));
    }

    // a concurrent send can still win between the check and the insert
    app_state
        .friend
        .create_request(&sender_id, &receiver_id)
        .await
        .map_err(|err| match err.kind() {
            ErrorKind::DuplicateKey => Error::bad_request(REQUEST_EXISTS),
            _ => err,
        })?;

    Ok(Json(MessageResponse::new("Friend request sent")))
}

// 同意好友请求
pub async fn accept_request(
    State(app_state): State<AppState>,
    JsonExtractor(reply): JsonExtractor<FriendRequestReply>,
) -> Result<Json<MessageResponse>, Error> {
    debug!("accept friend request: {:?}", &reply);
    let id = parse_object_id("requestId", &reply.request_id)?;
    let fs = get_request(&app_state, &id).await?;
    if fs.status == FriendRequestStatus::Accepted {
        return Err(Error::bad_request("Friend request already accepted"));
    }

    let fs = update_status(&app_state, &id, FriendRequestStatus::Accepted).await?;

    // status, sender and receiver are three separate writes, nothing rolls back
    let (sender, receiver) = match get_parties(&app_state, &fs).await? {
        (Some(sender), Some(receiver)) => (sender, receiver),
        _ => return Err(Error::not_found_with_details(USERS_NOT_FOUND)),
    };
    app_state.user.add_friend(&sender.id, &receiver.id).await?;
    app_state.user.add_friend(&receiver.id, &sender.id).await?;

    Ok(Json(MessageResponse::new("Friend request accepted")))
}

// 拒绝好友请求
pub async fn reject_request(
    State(app_state): State<AppState>,
    JsonExtractor(reply): JsonExtractor<FriendRequestReply>,
) -> Result<Json<MessageResponse>, Error> {
    debug!("reject friend request: {:?}", &reply);
    let id = parse_object_id("requestId", &reply.request_id)?;
    let fs = get_request(&app_state, &id).await?;
    if fs.status == FriendRequestStatus::Rejected {
        return Err(Error::bad_request("Friend request already rejected"));
    }

    update_status(&app_state, &id, FriendRequestStatus::Rejected).await?;

    Ok(Json(MessageResponse::new("Friend request rejected")))
}

// 获取好友申请列表
pub async fn list_requests(
    State(app_state): State<AppState>,
    PathExtractor(user_id): PathExtractor<String>,
) -> Result<Json<Vec<FriendRequestWithSender>>, Error> {
    let receiver = parse_object_id("userId", &user_id)?;
    let list = app_state.friend.list_by_receiver(&receiver).await?;
    debug!("user {} has {} friend requests", user_id, list.len());

    let mut sender_ids: Vec<ObjectId> = list.iter().map(|fs| fs.sender).collect();
    sender_ids.sort();
    sender_ids.dedup();
    let senders: HashMap<ObjectId, User> = app_state
        .user
        .get_users_by_ids(&sender_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

    let result = list
        .into_iter()
        .map(|fs| {
            let sender = senders.get(&fs.sender);
            FriendRequestWithSender::new(fs, sender)
        })
        .collect();
    Ok(Json(result))
}

async fn get_request(app_state: &AppState, id: &ObjectId) -> Result<FriendRequest, Error> {
    app_state
        .friend
        .get_request(id)
        .await?
        .ok_or_else(|| Error::not_found_with_details(REQUEST_NOT_FOUND))
}

async fn update_status(
    app_state: &AppState,
    id: &ObjectId,
    status: FriendRequestStatus,
) -> Result<FriendRequest, Error> {
    app_state
        .friend
        .update_status(id, status)
        .await?
        .ok_or_else(|| Error::not_found_with_details(REQUEST_NOT_FOUND))
}

async fn get_parties(
    app_state: &AppState,
    fs: &FriendRequest,
) -> Result<(Option<User>, Option<User>), Error> {
    let sender = app_state.user.get_user_by_id(&fs.sender).await?;
    let receiver = app_state.user.get_user_by_id(&fs.receiver).await?;
    Ok((sender, receiver))
}
