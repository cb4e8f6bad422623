//! In-memory resource stores.
//!
//! A [`Store`] is an insertion-ordered collection with unique integer ids.
//! The three stores live together in [`Collections`], owned by a [`Db`]
//! handle that the app clones into every handler. Nothing here is global, so
//! every test can start from a fresh `Db`.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::{Comment, Post, User};
use crate::query::{self, Record};

/// An insertion-ordered collection of records.
#[derive(Clone, Debug)]
pub struct Store<T> {
    items: Vec<T>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Store<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The id the next insert receives: one past the largest id present, or
    /// `1` for an empty store. Taking the maximum rather than the tail keeps
    /// ids unique after deletions anywhere in the collection.
    pub fn next_id(&self) -> i64 {
        self.items.iter().map(Record::id).max().map_or(1, |max| max + 1)
    }

    /// Appends the record `build` makes from the next id and returns it.
    pub fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> &T {
        let id = self.next_id();
        self.items.push(build(id));
        &self.items[self.items.len() - 1]
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        query::by_id(&self.items, id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.items.iter_mut().find(|r| r.id() == id)
    }

    /// Removes the record with `id`, shifting later records left.
    pub fn remove(&mut self, id: i64) -> Option<T> {
        let index = self.items.iter().position(|r| r.id() == id)?;
        Some(self.items.remove(index))
    }
}

impl<T> From<Vec<T>> for Store<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// Every collection the API serves.
#[derive(Clone, Debug, Default)]
pub struct Collections {
    pub users: Store<User>,
    pub posts: Store<Post>,
    pub comments: Store<Comment>,
}

impl Collections {
    /// The data a fresh process starts with: a few users and posts, no
    /// comments.
    pub fn seeded() -> Self {
        let users = vec![
            User::new(1, "Carey", "cjdaniel", "carey@example.com"),
            User::new(2, "Mikoto", "mikoto", "mikoto@example.com"),
            User::new(3, "Ronald", "ronald", "ronald@example.com"),
        ];
        let posts = vec![
            Post::new(1, 1, "Hello", "First post on the board."),
            Post::new(2, 1, "Again", "Still here, still posting."),
            Post::new(3, 2, "Greetings", "Mikoto says hi."),
            Post::new(4, 3, "Notes", "Ronald's notes on the week."),
        ];

        Self { users: users.into(), posts: posts.into(), comments: Store::new() }
    }
}

/// Shared handle to the stores. Cloning is cheap and every clone sees the
/// same data.
#[derive(Clone, Debug, Default)]
pub struct Db {
    inner: Arc<RwLock<Collections>>,
}

impl Db {
    pub fn new(collections: Collections) -> Self {
        Self { inner: Arc::new(RwLock::new(collections)) }
    }

    pub fn seeded() -> Self {
        Self::new(Collections::seeded())
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.inner.write().await
    }
}
