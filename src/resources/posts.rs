//! Post endpoints, mounted under `/api` behind the key gate.

use tracing::info;

use super::{Message, created, path_id};
use crate::error::ApiError;
use crate::model::Post;
use crate::query::{self, Field, Record};
use crate::request::Request;
use crate::response::{Json, Response};
use crate::store::Db;

const NOT_FOUND: &str = "Post not found";

/// `GET /api/posts[?userId]`
pub async fn list(req: Request, db: Db) -> Result<Json<Vec<Post>>, ApiError> {
    let user_id = query::parse_optional_identifier(req.query("userId"), "userId")?;

    let store = db.read().await;
    let posts = query::by_field(store.posts.all(), Field::UserId, user_id);
    Ok(Json(posts.into_iter().cloned().collect()))
}

pub async fn create(req: Request, db: Db) -> Result<Response, ApiError> {
    let body = req.body();
    let user_id = query::require_id(body, "userId")?;
    let title = query::require_text(body, "title")?;
    let content = query::require_text(body, "content")?;

    let mut store = db.write().await;
    let post = store.posts.insert_with(|id| Post::new(id, user_id, title, content));

    info!(id = post.id(), user_id, "post created");
    created(&format!("/api/posts/{}", post.id()), post)
}

pub async fn get(req: Request, db: Db) -> Result<Json<Post>, ApiError> {
    let id = path_id(&req, "id")?;

    let store = db.read().await;
    store.posts.get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// Merges `title` and/or `content`. The author never changes.
pub async fn update(req: Request, db: Db) -> Result<Json<Post>, ApiError> {
    let id = path_id(&req, "id")?;
    let title = query::optional_text(req.body(), "title")?;
    let content = query::optional_text(req.body(), "content")?;

    let mut store = db.write().await;
    let post = store.posts.get_mut(id).ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    if let Some(title) = title {
        post.set_title(title);
    }
    if let Some(content) = content {
        post.set_content(content);
    }
    Ok(Json(post.clone()))
}

pub async fn remove(req: Request, db: Db) -> Result<Json<Message>, ApiError> {
    let id = path_id(&req, "id")?;

    let mut store = db.write().await;
    store.posts.remove(id).ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(id, "post deleted");
    Ok(Json(Message::new("Post deleted successfully")))
}
