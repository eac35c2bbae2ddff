//! In-memory post feed.
//!
//! The feed owns the posts of a session in insertion order together with the
//! pending reply drafts. Every command runs synchronously against `&mut Feed`;
//! the server shares one feed behind [`SharedFeed`].

use crate::auth::Identity;
use crate::models::{Post, Reply};
use crate::moderation::{PROFANITY_WARNING, moderate};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Author label for posts created without an identity.
pub const GUEST_AUTHOR: &str = "Guest";

/// Author label for replies from callers without a display name.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

pub type SharedFeed = Arc<Mutex<Feed>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Profanity,
}

impl RejectReason {
    pub fn warning(&self) -> &'static str {
        match self {
            RejectReason::Profanity => PROFANITY_WARNING,
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Profanity => write!(f, "profanity"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("{}", .0.warning())]
    Rejected(RejectReason),

    #[error("Only the author can delete this post")]
    Forbidden,
}

#[derive(Debug, Default)]
pub struct Feed {
    posts: Vec<Post>,
    last_id: u64,
    reply_drafts: HashMap<u64, String>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedFeed {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Posts in the order they were created.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Post> {
        self.posts.iter_mut().find(|post| post.id == id)
    }

    /// Append a post after moderation.
    ///
    /// Blank text is ignored and yields `Ok(None)`. Text containing a banned
    /// word is refused as a whole; nothing is stored.
    pub fn create_post(
        &mut self,
        text: &str,
        identity: Option<&Identity>,
    ) -> Result<Option<&Post>, FeedError> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank post");
            return Ok(None);
        }

        if moderate(text).flagged {
            warn!("Post rejected by moderation");
            return Err(FeedError::Rejected(RejectReason::Profanity));
        }

        self.last_id += 1;
        self.posts.push(Post {
            id: self.last_id,
            author: post_author(identity),
            author_id: identity.map(|identity| identity.user_id),
            text: text.to_string(),
            liked: false,
            reposted: false,
            replies: Vec::new(),
            created_at: Utc::now().timestamp(),
        });

        Ok(self.posts.last())
    }

    /// Flip the like flag. Unknown ids are ignored.
    pub fn toggle_like(&mut self, id: u64) -> Option<&Post> {
        let post = self.get_mut(id)?;
        post.liked = !post.liked;
        Some(post)
    }

    /// Flip the repost flag. Unknown ids are ignored.
    pub fn toggle_repost(&mut self, id: u64) -> Option<&Post> {
        let post = self.get_mut(id)?;
        post.reposted = !post.reposted;
        Some(post)
    }

    /// Remove a post if `requesting_name` is its author. Returns whether a
    /// post was removed; unknown ids are not an error.
    pub fn delete_post(&mut self, id: u64, requesting_name: &str) -> Result<bool, FeedError> {
        let Some(index) = self.posts.iter().position(|post| post.id == id) else {
            debug!("Delete of unknown post {} ignored", id);
            return Ok(false);
        };

        if self.posts[index].author != requesting_name {
            warn!("Delete of post {} refused for {}", id, requesting_name);
            return Err(FeedError::Forbidden);
        }

        self.posts.remove(index);
        self.reply_drafts.remove(&id);
        Ok(true)
    }

    /// Append a reply. Reply text is stored as written; it is not moderated.
    ///
    /// Returns the updated post, or `None` when the text is blank or the post
    /// does not exist.
    pub fn add_reply(&mut self, id: u64, text: &str, identity: Option<&Identity>) -> Option<&Post> {
        if text.trim().is_empty() {
            return None;
        }

        let post = self.get_mut(id)?;
        post.replies.push(Reply {
            author: reply_author(identity),
            text: text.to_string(),
        });
        Some(post)
    }

    /// Store the in-progress reply for a post. Returns false for unknown ids.
    pub fn set_reply_draft(&mut self, id: u64, text: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.reply_drafts.insert(id, text.to_string());
        true
    }

    pub fn reply_draft(&self, id: u64) -> &str {
        self.reply_drafts.get(&id).map(String::as_str).unwrap_or("")
    }

    /// Post the stored draft as a reply and clear it once it was accepted.
    pub fn submit_reply(&mut self, id: u64, identity: Option<&Identity>) -> Option<&Post> {
        let draft = self.reply_draft(id).to_string();
        if self.add_reply(id, &draft, identity).is_none() {
            return None;
        }

        self.reply_drafts.remove(&id);
        self.get(id)
    }
}

/// Author stamped on a new post.
pub fn post_author(identity: Option<&Identity>) -> String {
    match identity {
        Some(identity) => identity.author_name(),
        None => GUEST_AUTHOR.to_string(),
    }
}

fn reply_author(identity: Option<&Identity>) -> String {
    identity
        .and_then(Identity::name)
        .unwrap_or(ANONYMOUS_AUTHOR)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::UNNAMED_USER;
    use uuid::Uuid;

    fn user(name: &str) -> Identity {
        Identity::new(Uuid::new_v4(), Some(name))
    }

    fn post_id(feed: &mut Feed, text: &str, identity: &Identity) -> u64 {
        feed.create_post(text, Some(identity)).unwrap().unwrap().id
    }

    #[test]
    fn test_blank_post_is_ignored() {
        let mut feed = Feed::new();
        assert_eq!(feed.create_post("", None), Ok(None));
        assert_eq!(feed.create_post("   \n\t", Some(&user("Ann"))), Ok(None));
        assert!(feed.is_empty());
    }

    #[test]
    fn test_profane_post_is_rejected() {
        let mut feed = Feed::new();
        let result = feed.create_post("I hate this shit", Some(&user("Ann")));

        assert_eq!(result, Err(FeedError::Rejected(RejectReason::Profanity)));
        assert_eq!(feed.len(), 0);
        assert_eq!(
            FeedError::Rejected(RejectReason::Profanity).to_string(),
            "Your message contains inappropriate words."
        );
    }

    #[test]
    fn test_create_post_stamps_author() {
        let mut feed = Feed::new();
        let ann = user("Ann");
        let post = feed.create_post("Hello world", Some(&ann)).unwrap().unwrap().clone();

        assert_eq!(feed.len(), 1);
        assert_eq!(post.author, "Ann");
        assert_eq!(post.author_id, Some(ann.user_id));
        assert_eq!(post.text, "Hello world");
        assert!(!post.liked);
        assert!(!post.reposted);
        assert!(post.replies.is_empty());
    }

    #[test]
    fn test_create_post_trims_text() {
        let mut feed = Feed::new();
        let post = feed.create_post("  spaced out  ", None).unwrap().unwrap();
        assert_eq!(post.text, "spaced out");
    }

    #[test]
    fn test_author_placeholders() {
        let mut feed = Feed::new();
        let unnamed = Identity::new(Uuid::new_v4(), None);

        let guest_post = feed.create_post("from a guest", None).unwrap().unwrap();
        assert_eq!(guest_post.author, GUEST_AUTHOR);
        assert_eq!(guest_post.author_id, None);

        let unnamed_post = feed.create_post("no name", Some(&unnamed)).unwrap().unwrap();
        assert_eq!(unnamed_post.author, UNNAMED_USER);
    }

    #[test]
    fn test_ids_are_unique_after_delete() {
        let mut feed = Feed::new();
        let ann = user("Ann");
        let first = post_id(&mut feed, "one", &ann);
        feed.delete_post(first, "Ann").unwrap();
        let second = post_id(&mut feed, "two", &ann);
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn test_toggle_like_twice_restores_state() {
        let mut feed = Feed::new();
        let id = post_id(&mut feed, "like me", &user("Ann"));

        assert!(feed.toggle_like(id).unwrap().liked);
        assert!(!feed.toggle_like(id).unwrap().liked);
        assert!(!feed.get(id).unwrap().reposted);
    }

    #[test]
    fn test_toggle_repost_is_independent_of_like() {
        let mut feed = Feed::new();
        let id = post_id(&mut feed, "share me", &user("Ann"));

        feed.toggle_repost(id);
        let post = feed.get(id).unwrap();
        assert!(post.reposted);
        assert!(!post.liked);
    }

    #[test]
    fn test_toggle_unknown_post_is_noop() {
        let mut feed = Feed::new();
        post_id(&mut feed, "only post", &user("Ann"));
        assert!(feed.toggle_like(999).is_none());
        assert!(feed.toggle_repost(999).is_none());
        assert!(!feed.posts()[0].liked);
    }

    #[test]
    fn test_delete_requires_matching_author() {
        let mut feed = Feed::new();
        let id = post_id(&mut feed, "mine", &user("Bob"));

        assert_eq!(feed.delete_post(id, "Ann"), Err(FeedError::Forbidden));
        assert_eq!(feed.len(), 1);

        assert_eq!(feed.delete_post(id, "Bob"), Ok(true));
        assert_eq!(feed.len(), 0);
    }

    #[test]
    fn test_delete_unknown_post_is_noop() {
        let mut feed = Feed::new();
        post_id(&mut feed, "stays", &user("Bob"));
        assert_eq!(feed.delete_post(42, "Bob"), Ok(false));
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn test_delete_compares_names_not_identities() {
        let mut feed = Feed::new();
        let id = post_id(&mut feed, "shared name", &user("Sam"));
        // A different account with the same display name is treated as the author.
        let other_sam = user("Sam");
        assert_eq!(feed.delete_post(id, &other_sam.author_name()), Ok(true));
    }

    #[test]
    fn test_add_reply_appends_raw_text() {
        let mut feed = Feed::new();
        let id = post_id(&mut feed, "topic", &user("Ann"));

        assert!(feed.add_reply(id, "", Some(&user("Cy"))).is_none());
        assert!(feed.add_reply(id, "   ", Some(&user("Cy"))).is_none());
        assert!(feed.get(id).unwrap().replies.is_empty());

        let post = feed.add_reply(id, "nice!", Some(&user("Cy"))).unwrap();
        assert_eq!(post.replies.len(), 1);
        assert_eq!(
            post.replies.last().unwrap(),
            &Reply {
                author: "Cy".to_string(),
                text: "nice!".to_string(),
            }
        );
    }

    #[test]
    fn test_replies_are_not_moderated() {
        let mut feed = Feed::new();
        let id = post_id(&mut feed, "topic", &user("Ann"));
        let post = feed.add_reply(id, "what a jerk", None).unwrap();
        assert_eq!(post.replies[0].text, "what a jerk");
    }

    #[test]
    fn test_reply_author_falls_back_to_anonymous() {
        let mut feed = Feed::new();
        let id = post_id(&mut feed, "topic", &user("Ann"));
        let unnamed = Identity::new(Uuid::new_v4(), None);

        feed.add_reply(id, "first", None);
        feed.add_reply(id, "second", Some(&unnamed));

        let replies = &feed.get(id).unwrap().replies;
        assert_eq!(replies[0].author, ANONYMOUS_AUTHOR);
        assert_eq!(replies[1].author, ANONYMOUS_AUTHOR);
    }

    #[test]
    fn test_reply_to_unknown_post_is_noop() {
        let mut feed = Feed::new();
        assert!(feed.add_reply(7, "hello?", None).is_none());
    }

    #[test]
    fn test_submit_reply_uses_and_clears_draft() {
        let mut feed = Feed::new();
        let id = post_id(&mut feed, "topic", &user("Ann"));

        assert!(feed.set_reply_draft(id, "agreed"));
        assert_eq!(feed.reply_draft(id), "agreed");

        let post = feed.submit_reply(id, Some(&user("Cy"))).unwrap();
        assert_eq!(post.replies.last().unwrap().text, "agreed");
        assert_eq!(feed.reply_draft(id), "");
    }

    #[test]
    fn test_submit_blank_draft_keeps_draft() {
        let mut feed = Feed::new();
        let id = post_id(&mut feed, "topic", &user("Ann"));

        feed.set_reply_draft(id, "  ");
        assert!(feed.submit_reply(id, None).is_none());
        assert_eq!(feed.reply_draft(id), "  ");
        assert!(feed.get(id).unwrap().replies.is_empty());
    }

    #[test]
    fn test_draft_for_unknown_post_is_refused() {
        let mut feed = Feed::new();
        assert!(!feed.set_reply_draft(3, "lost"));
        assert_eq!(feed.reply_draft(3), "");
    }

    #[test]
    fn test_order_survives_toggles() {
        let mut feed = Feed::new();
        let ann = user("Ann");
        let p1 = post_id(&mut feed, "P1", &ann);
        let p2 = post_id(&mut feed, "P2", &ann);
        let p3 = post_id(&mut feed, "P3", &ann);

        feed.toggle_like(p3);
        feed.toggle_repost(p1);
        feed.toggle_like(p2);

        let order: Vec<u64> = feed.posts().iter().map(|post| post.id).collect();
        assert_eq!(order, vec![p1, p2, p3]);
    }
}
