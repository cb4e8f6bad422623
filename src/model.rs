//! Records held by the stores.
//!
//! Fields are private: the only mutations are the setters below, so a
//! comment's `id`, `userId` and `postId` cannot change after creation.

use serde::Serialize;

use crate::query::{Field, Record};

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: i64,
    user_id: i64,
    post_id: i64,
    body: String,
}

impl Comment {
    pub fn new(id: i64, user_id: i64, post_id: i64, body: impl Into<String>) -> Self {
        Self { id, user_id, post_id, body: body.into() }
    }

    pub fn user_id(&self) -> i64 { self.user_id }
    pub fn post_id(&self) -> i64 { self.post_id }
    pub fn body(&self) -> &str { &self.body }

    pub fn set_body(&mut self, body: String) {
        self.body = body;
    }
}

impl Record for Comment {
    fn id(&self) -> i64 { self.id }

    fn field(&self, field: Field) -> Option<i64> {
        Some(match field {
            Field::Id     => self.id,
            Field::UserId => self.user_id,
            Field::PostId => self.post_id,
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct User {
    id: i64,
    name: String,
    username: String,
    email: String,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id, name: name.into(), username: username.into(), email: email.into() }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn username(&self) -> &str { &self.username }
    pub fn email(&self) -> &str { &self.email }

    pub fn set_name(&mut self, name: String) { self.name = name; }
    pub fn set_username(&mut self, username: String) { self.username = username; }
    pub fn set_email(&mut self, email: String) { self.email = email; }
}

impl Record for User {
    fn id(&self) -> i64 { self.id }

    fn field(&self, field: Field) -> Option<i64> {
        (field == Field::Id).then_some(self.id)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    id: i64,
    user_id: i64,
    title: String,
    content: String,
}

impl Post {
    pub fn new(id: i64, user_id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id, user_id, title: title.into(), content: content.into() }
    }

    pub fn user_id(&self) -> i64 { self.user_id }
    pub fn title(&self) -> &str { &self.title }
    pub fn content(&self) -> &str { &self.content }

    pub fn set_title(&mut self, title: String) { self.title = title; }
    pub fn set_content(&mut self, content: String) { self.content = content; }
}

impl Record for Post {
    fn id(&self) -> i64 { self.id }

    fn field(&self, field: Field) -> Option<i64> {
        match field {
            Field::Id     => Some(self.id),
            Field::UserId => Some(self.user_id),
            Field::PostId => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comment_uses_camel_case_on_the_wire() {
        let c = Comment::new(1, 2, 3, "hi");
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({ "id": 1, "userId": 2, "postId": 3, "body": "hi" })
        );
    }

    #[test]
    fn post_has_no_post_id_field() {
        let p = Post::new(4, 1, "t", "c");
        assert_eq!(p.field(Field::UserId), Some(1));
        assert_eq!(p.field(Field::PostId), None);
    }
}
