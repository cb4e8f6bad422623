//! User endpoints, mounted under `/api` behind the key gate.

use tracing::info;

use super::{Message, created, path_id};
use crate::error::ApiError;
use crate::model::{Post, User};
use crate::query::{self, Field, Record};
use crate::request::Request;
use crate::response::{Json, Response};
use crate::store::{Db, Store};

const NOT_FOUND: &str = "User not found";
const TAKEN: &str = "Username Already Taken";

fn username_taken(users: &Store<User>, username: &str, except: Option<i64>) -> bool {
    users.all().iter().any(|u| u.username() == username && Some(u.id()) != except)
}

pub async fn list(_req: Request, db: Db) -> Json<Vec<User>> {
    Json(db.read().await.users.all().to_vec())
}

pub async fn create(req: Request, db: Db) -> Result<Response, ApiError> {
    let body = req.body();
    let name = query::require_text(body, "name")?;
    let username = query::require_text(body, "username")?;
    let email = query::require_text(body, "email")?;

    let mut store = db.write().await;
    if username_taken(&store.users, &username, None) {
        return Err(ApiError::conflict(TAKEN));
    }

    let user = store.users.insert_with(|id| User::new(id, name, username, email));
    let id = user.id();
    info!(id, "user created");
    created(&format!("/api/users/{id}"), user)
}

pub async fn get(req: Request, db: Db) -> Result<Json<User>, ApiError> {
    let id = path_id(&req, "id")?;

    let store = db.read().await;
    store.users.get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// Merges whichever of `name`, `username` and `email` the body carries.
pub async fn update(req: Request, db: Db) -> Result<Json<User>, ApiError> {
    let id = path_id(&req, "id")?;
    let body = req.body();
    let name = query::optional_text(body, "name")?;
    let username = query::optional_text(body, "username")?;
    let email = query::optional_text(body, "email")?;

    let mut store = db.write().await;
    if store.users.get(id).is_none() {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    if username.as_deref().is_some_and(|u| username_taken(&store.users, u, Some(id))) {
        return Err(ApiError::conflict(TAKEN));
    }

    let user = store.users.get_mut(id).ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    if let Some(name) = name {
        user.set_name(name);
    }
    if let Some(username) = username {
        user.set_username(username);
    }
    if let Some(email) = email {
        user.set_email(email);
    }
    Ok(Json(user.clone()))
}

pub async fn remove(req: Request, db: Db) -> Result<Json<Message>, ApiError> {
    let id = path_id(&req, "id")?;

    let mut store = db.write().await;
    store.users.remove(id).ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(id, "user deleted");
    Ok(Json(Message::new("User deleted successfully")))
}

/// `GET /api/users/{id}/posts`
pub async fn posts(req: Request, db: Db) -> Result<Json<Vec<Post>>, ApiError> {
    let user_id = path_id(&req, "userId")?;

    let store = db.read().await;
    let posts = query::by_field(store.posts.all(), Field::UserId, Some(user_id));
    Ok(Json(posts.into_iter().cloned().collect()))
}
