//! # Handlers
//!
//! Each handler merges the JSON body, path parameters and caller id into
//! one payload and hands it to the matching use case.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Map, Value};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

type Created = (StatusCode, Json<Value>);

/// Path parameters and caller id overwrite same-named body fields.
fn merge_payload(body: Option<Value>, fields: &[(&str, &str)]) -> Value {
    let mut map = match body {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for (key, value) in fields {
        map.insert((*key).to_string(), Value::String((*value).to_string()));
    }
    Value::Object(map)
}

fn success() -> Json<Value> {
    Json(json!({ "status": "success" }))
}

fn created(key: &str, data: Value) -> Created {
    let mut wrapped = Map::new();
    wrapped.insert(key.to_string(), data);
    (StatusCode::CREATED, Json(json!({ "status": "success", "data": wrapped })))
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|err| ApiError::from(domains::DomainError::internal(err.to_string())))
}

pub async fn post_thread(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(body) = body?;
    let payload = merge_payload(Some(body), &[("owner", owner.as_str())]);
    let added = state.use_cases.add_thread.execute(&payload).await?;
    Ok(created("addedThread", to_value(added)?))
}

pub async fn get_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let payload = merge_payload(None, &[("threadId", thread_id.as_str())]);
    let thread = state.use_cases.get_thread.execute(&payload).await?;
    Ok(Json(json!({ "status": "success", "data": { "thread": to_value(thread)? } })))
}

pub async fn post_comment(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path(thread_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(body) = body?;
    let payload =
        merge_payload(Some(body), &[("threadId", thread_id.as_str()), ("owner", owner.as_str())]);
    let added = state.use_cases.add_comment.execute(&payload).await?;
    Ok(created("addedComment", to_value(added)?))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path((thread_id, comment_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let payload = merge_payload(
        None,
        &[
            ("threadId", thread_id.as_str()),
            ("commentId", comment_id.as_str()),
            ("owner", owner.as_str()),
        ],
    );
    state.use_cases.delete_comment.execute(&payload).await?;
    Ok(success())
}

pub async fn post_reply(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path((thread_id, comment_id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(body) = body?;
    let payload = merge_payload(
        Some(body),
        &[
            ("threadId", thread_id.as_str()),
            ("commentId", comment_id.as_str()),
            ("owner", owner.as_str()),
        ],
    );
    let added = state.use_cases.add_reply.execute(&payload).await?;
    Ok(created("addedReply", to_value(added)?))
}

pub async fn delete_reply(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path((thread_id, comment_id, reply_id)): Path<(String, String, String)>,
) -> Result<Json<Value>, ApiError> {
    let payload = merge_payload(
        None,
        &[
            ("threadId", thread_id.as_str()),
            ("commentId", comment_id.as_str()),
            ("replyId", reply_id.as_str()),
            ("owner", owner.as_str()),
        ],
    );
    state.use_cases.delete_reply.execute(&payload).await?;
    Ok(success())
}

pub async fn put_like(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path((thread_id, comment_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let payload = merge_payload(
        None,
        &[
            ("threadId", thread_id.as_str()),
            ("commentId", comment_id.as_str()),
            ("owner", owner.as_str()),
        ],
    );
    state.use_cases.toggle_like.execute(&payload).await?;
    Ok(success())
}
