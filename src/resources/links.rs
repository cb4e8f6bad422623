//! Hypermedia indexes for `/` and `/api`.

use serde::Serialize;

use crate::request::Request;
use crate::response::Json;
use crate::store::Db;

#[derive(Debug, Serialize)]
pub struct Link {
    href: &'static str,
    rel: &'static str,
    #[serde(rename = "type")]
    method: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Links {
    links: Vec<Link>,
}

fn links(entries: &[(&'static str, &'static str, &'static str)]) -> Json<Links> {
    let links = entries.iter()
        .map(|&(href, rel, method)| Link { href, rel, method })
        .collect();
    Json(Links { links })
}

/// `GET /`
pub async fn root(_req: Request, _db: Db) -> Json<Links> {
    links(&[
        ("/api", "api", "GET"),
        ("/comments", "comments", "GET"),
    ])
}

/// `GET /api`
pub async fn api(_req: Request, _db: Db) -> Json<Links> {
    links(&[
        ("api/users", "users", "GET"),
        ("api/users", "users", "POST"),
        ("api/posts", "posts", "GET"),
        ("api/posts", "posts", "POST"),
        ("comments", "comments", "GET"),
        ("comments", "comments", "POST"),
    ])
}
