// Community feed store
//
// Posts live in memory after a single hydrate at open; every mutation writes
// the full sequence back. `likes` is a one-profile toggle counter, not a
// count of distinct likers.

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

use super::local::LocalStorage;
use super::FEED_KEY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub text: String,
    pub sender: String,
    pub likes: i64,
    pub liked: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    fn new(text: &str, sender: &str) -> Self {
        Self {
            text: text.to_string(),
            sender: sender.to_string(),
            likes: 0,
            liked: false,
            comments: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct FeedStore {
    storage: LocalStorage,
    posts: Vec<Post>,
}

impl FeedStore {
    /// Hydrate from storage. A corrupt blob is an error.
    pub fn open(storage: LocalStorage) -> Result<Self, StoreError> {
        let posts = storage.read(FEED_KEY)?.unwrap_or_default();
        Ok(Self { storage, posts })
    }

    /// Hydrate, treating a corrupt or unreadable blob as an empty feed
    pub fn open_or_empty(storage: LocalStorage) -> Self {
        let posts = match storage.read(FEED_KEY) {
            Ok(posts) => posts.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable community feed: {}", e);
                Vec::new()
            }
        };
        Self { storage, posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Append a post. Blank text is ignored and returns `Ok(false)`.
    pub fn add_post(&mut self, text: &str, sender: &str) -> Result<bool, StoreError> {
        if text.trim().is_empty() {
            return Ok(false);
        }
        let mut posts = self.posts.clone();
        posts.push(Post::new(text, sender));
        self.commit(posts)?;
        Ok(true)
    }

    /// Flip the like flag on a post and move the counter with it
    pub fn toggle_like(&mut self, index: usize) -> Result<&Post, StoreError> {
        let mut posts = self.posts.clone();
        let post = post_mut(&mut posts, index)?;
        post.liked = !post.liked;
        post.likes += if post.liked { 1 } else { -1 };
        self.commit(posts)?;
        Ok(&self.posts[index])
    }

    /// Append a comment to a post. Blank text is ignored and returns `Ok(false)`.
    pub fn add_comment(&mut self, index: usize, text: &str, sender: &str) -> Result<bool, StoreError> {
        let mut posts = self.posts.clone();
        let post = post_mut(&mut posts, index)?;
        if text.trim().is_empty() {
            return Ok(false);
        }
        post.comments.push(Comment {
            text: text.to_string(),
            sender: sender.to_string(),
        });
        self.commit(posts)?;
        Ok(true)
    }

    /// Persist the new sequence, then adopt it. A failed write keeps the
    /// in-memory feed equal to what is on disk.
    fn commit(&mut self, posts: Vec<Post>) -> Result<(), StoreError> {
        self.storage.write(FEED_KEY, &posts)?;
        self.posts = posts;
        Ok(())
    }
}

fn post_mut(posts: &mut [Post], index: usize) -> Result<&mut Post, StoreError> {
    let len = posts.len();
    posts
        .get_mut(index)
        .ok_or(StoreError::IndexOutOfRange { index, len })
}
