use std::collections::HashSet;
use std::fmt::Write;
use model::{Post, Reply};
use store::FeedStore;
use uuid::Uuid;

/// Display state that is not part of the feed itself: which reply panels
/// are open.
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    revealed: HashSet<Uuid>,
}

impl ViewState {
    pub fn new() -> ViewState {
        ViewState::default()
    }

    pub fn is_revealed(&self, id: &Uuid) -> bool {
        self.revealed.contains(id)
    }

    /// Open or close one post's reply panel. Returns whether it is now open.
    pub fn toggle_replies(&mut self, id: Uuid) -> bool {
        if self.revealed.remove(&id) {
            false
        } else {
            self.revealed.insert(id);
            true
        }
    }
}

const STYLE: &'static str = ".hidden { display: none; }\n\
                             .liked { color: #e0245e; }\n\
                             .retweeted { color: #17bf63; }";

/// Full document: the tweet input (holding `draft`) above the feed.
pub fn render_page(store: &FeedStore, view: &ViewState, draft: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>feedbox</title>\n<style>\n");
    html.push_str(STYLE);
    html.push_str("\n</style>\n</head>\n<body>\n");
    html.push_str("<form method=\"post\" action=\"/action\">\n");
    html.push_str("<div class=\"tweet-input-area\">\n");
    // Browsers drop one newline right after <textarea>.
    let _ = write!(html,
                   "<textarea name=\"text\" id=\"tweet-input\" \
                    placeholder=\"What's happening?\">\n{}</textarea>\n",
                   escape(draft));
    html.push_str("</div>\n");
    html.push_str("<button type=\"submit\" name=\"tweet\" value=\"1\" id=\"tweet-btn\">Tweet</button>\n");
    html.push_str("<div id=\"feed\">");
    html.push_str(&render_feed(store, view));
    html.push_str("</div>\n</form>\n</body>\n</html>\n");
    html
}

/// Inner markup of the feed container, one block per post in store order.
pub fn render_feed(store: &FeedStore, view: &ViewState) -> String {
    let mut html = String::new();
    for post in store.posts() {
        render_post(&mut html, post, view.is_revealed(post.uuid()));
    }
    html
}

fn render_post(html: &mut String, post: &Post, revealed: bool) {
    let id = post.uuid().to_string();
    let _ = write!(html,
                   "
<div class=\"tweet\">
    <div class=\"tweet-inner\">
        <img src=\"{pic}\" class=\"profile-pic\">
        <div>
            <p class=\"handle\">{handle}</p>
            <p class=\"tweet-text\">{text}</p>
            <div class=\"tweet-details\">
                <span class=\"tweet-detail\">
                    <button type=\"submit\" name=\"reply\" value=\"{id}\">💬</button>
                    {replies}
                </span>
                <span class=\"tweet-detail{liked}\">
                    <button type=\"submit\" name=\"like\" value=\"{id}\">♥</button>
                    {likes}
                </span>
                <span class=\"tweet-detail{retweeted}\">
                    <button type=\"submit\" name=\"retweet\" value=\"{id}\">⟲</button>
                    {retweets}
                </span>
            </div>
        </div>
    </div>
    <div class=\"{hidden}\" id=\"replies-{id}\">",
                   pic = escape(post.profile_pic()),
                   handle = escape(post.handle()),
                   text = escape(post.text()),
                   id = id,
                   replies = post.replies().len(),
                   liked = if post.is_liked() { " liked" } else { "" },
                   likes = post.likes(),
                   retweeted = if post.is_retweeted() { " retweeted" } else { "" },
                   retweets = post.retweets(),
                   hidden = if revealed { "" } else { "hidden" });
    for reply in post.replies() {
        render_reply(html, reply);
    }
    html.push_str("\n    </div>\n</div>\n");
}

fn render_reply(html: &mut String, reply: &Reply) {
    let _ = write!(html,
                   "
        <div class=\"tweet-reply\">
            <div class=\"tweet-inner\">
                <img src=\"{pic}\" class=\"profile-pic\">
                <div>
                    <p class=\"handle\">{handle}</p>
                    <p class=\"tweet-text\">{text}</p>
                </div>
            </div>
        </div>",
                   pic = escape(reply.profile_pic()),
                   handle = escape(reply.handle()),
                   text = escape(reply.text()));
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
