use error::{FeedError, FeedResult};
use model::{Author, Post};
use uuid::Uuid;

/// Produces identifiers for new posts. Only uniqueness matters.
pub trait IdSource {
    fn next_id(&mut self) -> Uuid;
}

pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// The ordered post collection, most recent first.
#[derive(Clone, Debug)]
pub struct FeedStore {
    posts: Vec<Post>,
}

impl FeedStore {
    pub fn new() -> FeedStore {
        FeedStore { posts: vec![] }
    }

    /// Build a store from seed posts, keeping their order.
    ///
    /// A post flagged as liked (or retweeted) must count at least that one
    /// like (or retweet), otherwise toggling it off and on again would not
    /// return to the seeded count.
    pub fn from_posts(posts: Vec<Post>) -> FeedResult<FeedStore> {
        let mut store = FeedStore::new();
        for post in posts {
            if store.contains(post.uuid()) {
                return Err(FeedError::DuplicateId(*post.uuid()));
            }
            if (post.is_liked() && post.likes() == 0) ||
               (post.is_retweeted() && post.retweets() == 0) {
                return Err(FeedError::InconsistentCounts(*post.uuid()));
            }
            store.posts.push(post);
        }
        Ok(store)
    }

    pub fn posts(&self) -> &Vec<Post> {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn find(&self, id: &Uuid) -> Option<&Post> {
        self.posts.iter().find(|post| post.uuid() == id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.find(id).is_some()
    }

    fn find_mut(&mut self, id: &Uuid) -> FeedResult<&mut Post> {
        self.posts
            .iter_mut()
            .find(|post| post.uuid() == id)
            .ok_or(FeedError::NotFound(*id))
    }

    pub fn toggle_like(&mut self, id: &Uuid) -> FeedResult<&Post> {
        let post = try!(self.find_mut(id));
        post.toggle_like();
        Ok(&*post)
    }

    pub fn toggle_retweet(&mut self, id: &Uuid) -> FeedResult<&Post> {
        let post = try!(self.find_mut(id));
        post.toggle_retweet();
        Ok(&*post)
    }

    /// Publish `text` as a new post at the front of the feed.
    ///
    /// Blank text is refused with `EmptyText`; the text itself is kept as
    /// typed.
    pub fn submit(&mut self, text: &str, author: &Author, id: Uuid) -> FeedResult<&Post> {
        if text.trim().is_empty() {
            return Err(FeedError::EmptyText);
        }
        if self.contains(&id) {
            return Err(FeedError::DuplicateId(id));
        }
        self.posts.insert(0, Post::new(text, author, id));
        Ok(&self.posts[0])
    }
}
