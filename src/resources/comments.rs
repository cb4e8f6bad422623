//! Comment endpoints.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /comments[?userId]` | [`list`] |
//! | `POST /comments` | [`create`] |
//! | `GET /comments/{id}` | [`get`] |
//! | `PATCH /comments/{id}` | [`update`] |
//! | `DELETE /comments/{id}` | [`remove`] |
//! | `GET /posts/{id}/comments[?userId]` | [`for_post`] |
//! | `GET /users/{id}/comments[?postId]` | [`for_user`] |

use tracing::info;

use super::{Message, created, path_id};
use crate::error::ApiError;
use crate::model::Comment;
use crate::query::{self, Constraints, Field, Record};
use crate::request::Request;
use crate::response::{Json, Response};
use crate::store::Db;

const NOT_FOUND: &str = "Comment not found";

/// A validated `POST /comments` body.
#[derive(Debug)]
struct NewComment {
    user_id: i64,
    post_id: i64,
    body: String,
}

impl NewComment {
    fn from_request(req: &Request) -> Result<Self, ApiError> {
        let body = req.body();
        Ok(Self {
            user_id: query::require_id(body, "userId")?,
            post_id: query::require_id(body, "postId")?,
            body: query::require_text(body, "body")?,
        })
    }
}

pub async fn list(req: Request, db: Db) -> Result<Json<Vec<Comment>>, ApiError> {
    let user_id = query::parse_optional_identifier(req.query("userId"), "userId")?;

    let store = db.read().await;
    let comments = query::by_field(store.comments.all(), Field::UserId, user_id);
    Ok(Json(comments.into_iter().cloned().collect()))
}

pub async fn create(req: Request, db: Db) -> Result<Response, ApiError> {
    let input = NewComment::from_request(&req)?;

    let mut store = db.write().await;
    let comment = store.comments
        .insert_with(|id| Comment::new(id, input.user_id, input.post_id, input.body));

    info!(id = comment.id(), user_id = comment.user_id(), post_id = comment.post_id(), "comment created");
    created(&format!("/comments/{}", comment.id()), comment)
}

pub async fn get(req: Request, db: Db) -> Result<Json<Comment>, ApiError> {
    let id = path_id(&req, "id")?;

    let store = db.read().await;
    store.comments.get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// Replaces the body. Every other field is left untouched.
pub async fn update(req: Request, db: Db) -> Result<Json<Comment>, ApiError> {
    let id = path_id(&req, "id")?;
    let body = query::require_text(req.body(), "body")?;

    let mut store = db.write().await;
    let comment = store.comments.get_mut(id).ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    comment.set_body(body);
    Ok(Json(comment.clone()))
}

pub async fn remove(req: Request, db: Db) -> Result<Json<Message>, ApiError> {
    let id = path_id(&req, "id")?;

    let mut store = db.write().await;
    store.comments.remove(id).ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(id, "comment deleted");
    Ok(Json(Message::new("Comment deleted successfully")))
}

pub async fn for_post(req: Request, db: Db) -> Result<Json<Vec<Comment>>, ApiError> {
    let post_id = path_id(&req, "postId")?;
    let user_id = query::parse_optional_identifier(req.query("userId"), "userId")?;

    let filter = Constraints::new()
        .with(Field::PostId, post_id)
        .maybe(Field::UserId, user_id);

    let store = db.read().await;
    Ok(Json(query::by_fields(store.comments.all(), &filter).into_iter().cloned().collect()))
}

pub async fn for_user(req: Request, db: Db) -> Result<Json<Vec<Comment>>, ApiError> {
    let user_id = path_id(&req, "userId")?;
    let post_id = query::parse_optional_identifier(req.query("postId"), "postId")?;

    let filter = Constraints::new()
        .with(Field::UserId, user_id)
        .maybe(Field::PostId, post_id);

    let store = db.read().await;
    Ok(Json(query::by_fields(store.comments.all(), &filter).into_iter().cloned().collect()))
}
