use rustc_serialize::{Decodable, Decoder, Encodable, Encoder};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    uuid: Uuid,
    handle: String,
    profile_pic: String,
    tweet_text: String,
    likes: u32,
    retweets: u32,
    is_liked: bool,
    is_retweeted: bool,
    replies: Vec<Reply>,
}

impl Post {
    /// A fresh post: no likes, no retweets, no replies.
    pub fn new(text: &str, author: &Author, uuid: Uuid) -> Post {
        Post {
            uuid: uuid,
            handle: author.handle.clone(),
            profile_pic: author.profile_pic.clone(),
            tweet_text: text.to_string(),
            likes: 0,
            retweets: 0,
            is_liked: false,
            is_retweeted: false,
            replies: vec![],
        }
    }

    pub fn uuid(&self) -> &Uuid {
        &self.uuid
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn profile_pic(&self) -> &str {
        &self.profile_pic
    }

    pub fn text(&self) -> &str {
        &self.tweet_text
    }

    pub fn likes(&self) -> u32 {
        self.likes
    }

    pub fn retweets(&self) -> u32 {
        self.retweets
    }

    pub fn is_liked(&self) -> bool {
        self.is_liked
    }

    pub fn is_retweeted(&self) -> bool {
        self.is_retweeted
    }

    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    /// Flip the liked flag and move the like count with it.
    pub fn toggle_like(&mut self) {
        self.is_liked = !self.is_liked;
        self.likes = step(self.likes, self.is_liked);
    }

    /// Flip the retweeted flag and move the retweet count with it.
    pub fn toggle_retweet(&mut self) {
        self.is_retweeted = !self.is_retweeted;
        self.retweets = step(self.retweets, self.is_retweeted);
    }

    #[cfg(test)]
    pub fn with_counts(mut self, likes: u32, retweets: u32) -> Post {
        self.likes = likes;
        self.retweets = retweets;
        self
    }

    #[cfg(test)]
    pub fn with_flags(mut self, liked: bool, retweeted: bool) -> Post {
        self.is_liked = liked;
        self.is_retweeted = retweeted;
        self
    }

    #[cfg(test)]
    pub fn with_reply(mut self, reply: Reply) -> Post {
        self.replies.push(reply);
        self
    }
}

fn step(count: u32, on: bool) -> u32 {
    if on {
        count.saturating_add(1)
    } else {
        count.saturating_sub(1)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    handle: String,
    profile_pic: String,
    tweet_text: String,
}

impl Reply {
    #[cfg(test)]
    pub fn new(handle: &str, profile_pic: &str, text: &str) -> Reply {
        Reply {
            handle: handle.to_string(),
            profile_pic: profile_pic.to_string(),
            tweet_text: text.to_string(),
        }
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn profile_pic(&self) -> &str {
        &self.profile_pic
    }

    pub fn text(&self) -> &str {
        &self.tweet_text
    }
}

// Field names double as the seed file's JSON keys.

impl Encodable for Post {
    fn encode<S: Encoder>(&self, s: &mut S) -> Result<(), S::Error> {
        s.emit_struct("Post", 9, |s| {
            try!(s.emit_struct_field("uuid", 0, |s| self.uuid.encode(s)));
            try!(s.emit_struct_field("handle", 1, |s| self.handle.encode(s)));
            try!(s.emit_struct_field("profile_pic", 2, |s| self.profile_pic.encode(s)));
            try!(s.emit_struct_field("tweet_text", 3, |s| self.tweet_text.encode(s)));
            try!(s.emit_struct_field("likes", 4, |s| self.likes.encode(s)));
            try!(s.emit_struct_field("retweets", 5, |s| self.retweets.encode(s)));
            try!(s.emit_struct_field("is_liked", 6, |s| self.is_liked.encode(s)));
            try!(s.emit_struct_field("is_retweeted", 7, |s| self.is_retweeted.encode(s)));
            s.emit_struct_field("replies", 8, |s| self.replies.encode(s))
        })
    }
}

impl Decodable for Post {
    fn decode<D: Decoder>(d: &mut D) -> Result<Post, D::Error> {
        d.read_struct("Post", 9, |d| {
            Ok(Post {
                uuid: try!(d.read_struct_field("uuid", 0, Decodable::decode)),
                handle: try!(d.read_struct_field("handle", 1, Decodable::decode)),
                profile_pic: try!(d.read_struct_field("profile_pic", 2, Decodable::decode)),
                tweet_text: try!(d.read_struct_field("tweet_text", 3, Decodable::decode)),
                likes: try!(d.read_struct_field("likes", 4, Decodable::decode)),
                retweets: try!(d.read_struct_field("retweets", 5, Decodable::decode)),
                is_liked: try!(d.read_struct_field("is_liked", 6, Decodable::decode)),
                is_retweeted: try!(d.read_struct_field("is_retweeted", 7, Decodable::decode)),
                replies: try!(d.read_struct_field("replies", 8, Decodable::decode)),
            })
        })
    }
}

impl Encodable for Reply {
    fn encode<S: Encoder>(&self, s: &mut S) -> Result<(), S::Error> {
        s.emit_struct("Reply", 3, |s| {
            try!(s.emit_struct_field("handle", 0, |s| self.handle.encode(s)));
            try!(s.emit_struct_field("profile_pic", 1, |s| self.profile_pic.encode(s)));
            s.emit_struct_field("tweet_text", 2, |s| self.tweet_text.encode(s))
        })
    }
}

impl Decodable for Reply {
    fn decode<D: Decoder>(d: &mut D) -> Result<Reply, D::Error> {
        d.read_struct("Reply", 3, |d| {
            Ok(Reply {
                handle: try!(d.read_struct_field("handle", 0, Decodable::decode)),
                profile_pic: try!(d.read_struct_field("profile_pic", 1, Decodable::decode)),
                tweet_text: try!(d.read_struct_field("tweet_text", 2, Decodable::decode)),
            })
        })
    }
}

/// The identity new posts are published under.
#[derive(Clone, Debug)]
pub struct Author {
    handle: String,
    profile_pic: String,
}

impl Author {
    pub fn new(handle: &str, profile_pic: &str) -> Author {
        Author {
            handle: handle.to_string(),
            profile_pic: profile_pic.to_string(),
        }
    }
}
