use std::fs::File;
use std::io::Read;
use std::path::Path;
use rustc_serialize::json;
use error::FeedResult;
use model::Post;
use store::FeedStore;

const BUILTIN: &'static str = include_str!("seed.json");

/// The store every fresh server starts with.
pub fn builtin() -> FeedResult<FeedStore> {
    parse(BUILTIN)
}

pub fn from_file<P: AsRef<Path>>(path: P) -> FeedResult<FeedStore> {
    let mut contents = String::new();
    try!(File::open(path).and_then(|mut f| f.read_to_string(&mut contents)));
    parse(&contents)
}

pub fn parse(contents: &str) -> FeedResult<FeedStore> {
    let posts: Vec<Post> = try!(json::decode(contents));
    FeedStore::from_posts(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use error::FeedError;

    #[test]
    fn builtin_seed_loads() {
        let store = builtin().unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.posts()[0].handle(), "@TrollBot66756542");
        assert_eq!(store.posts()[1].replies().len(), 2);
        assert!(store.posts().iter().all(|p| !p.is_liked() && !p.is_retweeted()));
    }

    #[test]
    fn duplicate_seed_ids_are_rejected() {
        let post = r#"{"uuid": "4b161eee-c0f5-4545-9c4b-8562944223ee", "handle": "@a",
                       "profile_pic": "a.png", "tweet_text": "x", "likes": 1,
                       "retweets": 0, "is_liked": false, "is_retweeted": false,
                       "replies": []}"#;
        let doubled = format!("[{}, {}]", post, post);
        match parse(&doubled) {
            Err(FeedError::DuplicateId(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(parse(&format!("[{}]", post)).unwrap().len(), 1);
    }

    #[test]
    fn liked_seed_without_likes_is_rejected() {
        let post = r#"[{"uuid": "4b161eee-c0f5-4545-9c4b-8562944223ee", "handle": "@a",
                        "profile_pic": "a.png", "tweet_text": "x", "likes": 0,
                        "retweets": 0, "is_liked": true, "is_retweeted": false,
                        "replies": []}]"#;
        match parse(post) {
            Err(FeedError::InconsistentCounts(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn malformed_seed_is_an_error() {
        match parse("[{\"uuid\": \"not-a-uuid\"}]") {
            Err(FeedError::Seed(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(from_file("/nonexistent/seed.json").is_err());
    }
}
