use error::{FeedError, FeedResult};
use model::Author;
use store::{FeedStore, IdSource};
use uuid::Uuid;
use view::ViewState;

/// Form field carrying the tweet input.
pub const TEXT_FIELD: &'static str = "text";

/// Everything one feed page needs: the posts, the open reply panels, the
/// identity new posts are published under and where their ids come from.
pub struct App {
    pub store: FeedStore,
    pub view: ViewState,
    author: Author,
    ids: Box<IdSource + Send>,
}

impl App {
    pub fn new(store: FeedStore, author: Author, ids: Box<IdSource + Send>) -> App {
        App {
            store: store,
            view: ViewState::new(),
            author: author,
            ids: ids,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Like(Uuid),
    Retweet(Uuid),
    Reveal(Uuid),
    Submit(String),
}

impl Action {
    /// Classify a submitted form by its marker field. Markers are checked as
    /// like, retweet, reply, then tweet; the first one present wins.
    pub fn from_markers(fields: &[(String, String)]) -> FeedResult<Option<Action>> {
        let field = |name: &str| {
            fields.iter().find(|&&(ref k, _)| k == name).map(|&(_, ref v)| v.as_str())
        };

        if let Some(raw) = field("like") {
            return parse_id(raw).map(|id| Some(Action::Like(id)));
        }
        if let Some(raw) = field("retweet") {
            return parse_id(raw).map(|id| Some(Action::Retweet(id)));
        }
        if let Some(raw) = field("reply") {
            return parse_id(raw).map(|id| Some(Action::Reveal(id)));
        }
        if field("tweet").is_some() {
            let text = field(TEXT_FIELD).unwrap_or("");
            return Ok(Some(Action::Submit(text.to_string())));
        }
        Ok(None)
    }
}

fn parse_id(raw: &str) -> FeedResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| FeedError::BadId(raw.to_string()))
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Liked(Uuid),
    Retweeted(Uuid),
    Revealed(Uuid),
    Posted(Uuid),
    /// Blank submission; nothing changed.
    Rejected,
    NotFound(Uuid),
}

impl Outcome {
    /// What the input field holds after this outcome: cleared once a post
    /// went out, otherwise whatever was typed.
    pub fn draft<'a>(&self, submitted: &'a str) -> &'a str {
        match *self {
            Outcome::Posted(_) => "",
            _ => submitted,
        }
    }
}

/// Run the single handler `action` selects.
pub fn dispatch(app: &mut App, action: Action) -> Outcome {
    let outcome = match action {
        Action::Like(id) => {
            app.store
                .toggle_like(&id)
                .map(|post| {
                    debug!("{} liked={} likes={}", id, post.is_liked(), post.likes());
                    Outcome::Liked(id)
                })
        }
        Action::Retweet(id) => {
            app.store
                .toggle_retweet(&id)
                .map(|post| {
                    debug!("{} retweeted={} retweets={}",
                           id,
                           post.is_retweeted(),
                           post.retweets());
                    Outcome::Retweeted(id)
                })
        }
        Action::Reveal(id) => {
            if app.store.contains(&id) {
                let open = app.view.toggle_replies(id);
                debug!("{} replies open={}", id, open);
                Ok(Outcome::Revealed(id))
            } else {
                Err(FeedError::NotFound(id))
            }
        }
        Action::Submit(text) => {
            let id = app.ids.next_id();
            app.store.submit(&text, &app.author, id).map(|post| {
                info!("new post {} by {}", post.uuid(), post.handle());
                Outcome::Posted(id)
            })
        }
    };

    match outcome {
        Ok(outcome) => outcome,
        Err(FeedError::NotFound(id)) => {
            warn!("no post with id {}, ignoring", id);
            Outcome::NotFound(id)
        }
        Err(e) => {
            warn!("submission rejected: {}", e);
            Outcome::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::RandomIds;
    use store::tests::{FixedIds, author, two_posts};
    use uuid::Uuid;

    fn app() -> App {
        App::new(two_posts(), author(), Box::new(RandomIds))
    }

    fn form(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|&(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn markers_follow_priority() {
        let id = Uuid::new_v4();
        let raw = id.to_string();
        let raw = raw.as_str();

        let all = form(&[("tweet", "1"), ("reply", raw), ("retweet", raw), ("like", raw)]);
        assert_eq!(Action::from_markers(&all).unwrap(), Some(Action::Like(id)));

        let no_like = form(&[("tweet", "1"), ("reply", raw), ("retweet", raw)]);
        assert_eq!(Action::from_markers(&no_like).unwrap(), Some(Action::Retweet(id)));

        let reply = form(&[("text", "hi"), ("reply", raw)]);
        assert_eq!(Action::from_markers(&reply).unwrap(), Some(Action::Reveal(id)));

        let tweet = form(&[("text", "hi"), ("tweet", "1")]);
        assert_eq!(Action::from_markers(&tweet).unwrap(),
                   Some(Action::Submit("hi".to_string())));

        let only_button = form(&[("tweet", "1")]);
        assert_eq!(Action::from_markers(&only_button).unwrap(),
                   Some(Action::Submit(String::new())));

        assert_eq!(Action::from_markers(&form(&[("text", "hi")])).unwrap(), None);
    }

    #[test]
    fn malformed_marker_is_bad_id() {
        match Action::from_markers(&form(&[("like", "nope")])) {
            Err(FeedError::BadId(ref raw)) if raw == "nope" => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn like_and_retweet_are_independent() {
        let mut app = app();
        let id = *app.store.posts()[0].uuid();

        assert_eq!(dispatch(&mut app, Action::Like(id)), Outcome::Liked(id));
        assert_eq!(dispatch(&mut app, Action::Retweet(id)), Outcome::Retweeted(id));
        assert_eq!(dispatch(&mut app, Action::Like(id)), Outcome::Liked(id));

        let post = app.store.find(&id).unwrap();
        assert!(!post.is_liked());
        assert_eq!(post.likes(), 5);
        assert!(post.is_retweeted());
        assert_eq!(post.retweets(), 2);
    }

    #[test]
    fn submit_clears_draft() {
        let id = Uuid::new_v4();
        let mut app = App::new(two_posts(), author(), Box::new(FixedIds(vec![id])));
        let existing: Vec<Uuid> = app.store.posts().iter().map(|p| *p.uuid()).collect();

        let outcome = dispatch(&mut app, Action::Submit("hello".to_string()));
        assert_eq!(outcome, Outcome::Posted(id));
        assert_eq!(outcome.draft("hello"), "");
        assert_eq!(app.store.len(), 3);

        let post = &app.store.posts()[0];
        assert_eq!(post.text(), "hello");
        assert_eq!((post.likes(), post.retweets()), (0, 0));
        assert!(!post.is_liked() && !post.is_retweeted());
        assert!(post.replies().is_empty());
        assert!(!existing.contains(post.uuid()));
    }

    #[test]
    fn blank_submit_keeps_draft() {
        let mut app = app();
        for text in &["", "    "] {
            let outcome = dispatch(&mut app, Action::Submit(text.to_string()));
            assert_eq!(outcome, Outcome::Rejected);
            assert_eq!(outcome.draft(text), *text);
        }
        assert_eq!(app.store.len(), 2);
    }

    #[test]
    fn reveal_only_touches_view() {
        let mut app = app();
        let a = *app.store.posts()[0].uuid();
        let b = *app.store.posts()[1].uuid();
        let before = app.store.posts().to_vec();

        assert_eq!(dispatch(&mut app, Action::Reveal(a)), Outcome::Revealed(a));
        assert!(app.view.is_revealed(&a));
        assert!(!app.view.is_revealed(&b));
        assert_eq!(app.store.posts(), &before);
        assert_eq!(Outcome::Revealed(a).draft("typed"), "typed");
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut app = app();
        let missing = Uuid::new_v4();
        assert_eq!(dispatch(&mut app, Action::Like(missing)), Outcome::NotFound(missing));
        assert_eq!(dispatch(&mut app, Action::Retweet(missing)),
                   Outcome::NotFound(missing));
        assert_eq!(dispatch(&mut app, Action::Reveal(missing)),
                   Outcome::NotFound(missing));
        assert!(!app.view.is_revealed(&missing));
    }
}
