//! The route table and middleware wiring for the service.

use crate::app::App;
use crate::config::Config;
use crate::middleware::{ApiKeyGate, RequestLogger};
use crate::resources::{comments, links, posts, users};
use crate::router::Router;
use crate::store::Db;

/// Every route the service answers.
pub fn router() -> Router<Db> {
    Router::new()
        .get("/", links::root)
        .get("/api", links::api)

        .get("/api/users",              users::list)
        .post("/api/users",             users::create)
        .get("/api/users/{id}",         users::get)
        .patch("/api/users/{id}",       users::update)
        .delete("/api/users/{id}",      users::remove)
        .get("/api/users/{id}/posts",   users::posts)

        .get("/api/posts",              posts::list)
        .post("/api/posts",             posts::create)
        .get("/api/posts/{id}",         posts::get)
        .patch("/api/posts/{id}",       posts::update)
        .delete("/api/posts/{id}",      posts::remove)

        .get("/comments",               comments::list)
        .post("/comments",              comments::create)
        .get("/comments/{id}",          comments::get)
        .patch("/comments/{id}",        comments::update)
        .delete("/comments/{id}",       comments::remove)
        .get("/posts/{id}/comments",    comments::for_post)
        .get("/users/{id}/comments",    comments::for_user)
}

/// The full app: request logger on everything, key gate on `/api`.
pub fn app(db: Db, config: &Config) -> App<Db> {
    App::new(router(), db)
        .layer(RequestLogger)
        .scoped("/api", ApiKeyGate::new(config.api_keys.iter().cloned()))
}
