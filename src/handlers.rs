use std::sync::{Arc, Mutex};
use std::io::Read;
use iron::{Handler, status, IronResult, Response, Request, AfterMiddleware};
use iron::headers::ContentType;
use rustc_serialize::json;
use router::Router;
use url::form_urlencoded;
use uuid::Uuid;
use dispatch::{self, Action, App, TEXT_FIELD};
use error::{FeedError, FeedResult};
use view;

/// Match a `Result` into its inner value or
/// return `500 Internal Server Error`,
/// or some other provided error using the second variant of this macro.
macro_rules! try_handler {
    ( $e:expr ) => {
        match $e {
            Ok(x) => x,
            Err(e) => return Ok(Response::with((status::InternalServerError, e.to_string())))
        }
    };
    ( $e:expr, $error:expr ) => {
        match $e {
            Ok(x) => x,
            Err(e) => return Ok(Response::with(($error, e.to_string())))
        }
    }
}

/// Lock a `Mutex`. This macro simply calls `m.lock().unwrap()`,
/// because the thread should panic if the lock can not be obtained:
/// we cannot recover from that.
macro_rules! lock {
    ( $e:expr ) => { $e.lock().unwrap() }
}

/// Get the value of a parameter in the URI.
/// If the parameter was absent, return `400 Bad Request`.
/// If we could not obtain the parameter list, return `500 Internal Server Error`.
macro_rules! get_http_param {
    ( $r:expr, $e:expr ) => {
        match $r.extensions.get::<Router>() {
            Some(router) => {
                match router.find($e) {
                    Some(val) => val,
                    None => return Ok(Response::with(status::BadRequest)),
                }
            }
            None => return Ok(Response::with(status::InternalServerError)),
        }
    }
}

fn error_status(e: &FeedError) -> status::Status {
    match *e {
        FeedError::BadId(_) => status::BadRequest,
        FeedError::NotFound(_) => status::NotFound,
        _ => status::InternalServerError,
    }
}

fn error_response(e: FeedError) -> Response {
    Response::with((error_status(&e), e.to_string()))
}

fn json_response<T>(status: status::Status, payload: T) -> Response
    where T: Into<String>
{
    let mut res = Response::with((status, payload.into()));
    res.headers.set(ContentType::json());
    res
}

pub struct Handlers {
    pub page: PageHandler,
    pub action: ActionHandler,
    pub feed: FeedHandler,
    pub post: PostHandler,
}

impl Handlers {
    pub fn new(app: App) -> Handlers {
        let app = Arc::new(Mutex::new(app));
        Handlers {
            page: PageHandler::new(app.clone()),
            action: ActionHandler::new(app.clone()),
            feed: FeedHandler::new(app.clone()),
            post: PostHandler::new(app.clone()),
        }
    }
}

/// `GET /`: the feed page with an empty input.
pub struct PageHandler {
    app: Arc<Mutex<App>>,
}

impl PageHandler {
    fn new(app: Arc<Mutex<App>>) -> PageHandler {
        PageHandler { app: app }
    }
}

impl Handler for PageHandler {
    fn handle(&self, _: &mut Request) -> IronResult<Response> {
        let app = lock!(self.app);
        let page = view::render_page(&app.store, &app.view, "");
        Ok(Response::with((status::Ok, page)))
    }
}

/// `POST /action`: one click on the page. The clicked button's marker picks
/// the handler, then the whole page is rendered again.
pub struct ActionHandler {
    app: Arc<Mutex<App>>,
}

impl ActionHandler {
    fn new(app: Arc<Mutex<App>>) -> ActionHandler {
        ActionHandler { app: app }
    }
}

impl Handler for ActionHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let mut body = String::new();
        try_handler!(req.body.read_to_string(&mut body));

        match respond(&mut lock!(self.app), &body) {
            Ok(page) => Ok(Response::with((status::Ok, page))),
            Err(e) => Ok(error_response(e)),
        }
    }
}

/// Apply one submitted form to `app` and render the page that follows it.
pub fn respond(app: &mut App, body: &str) -> FeedResult<String> {
    let fields = parse_form(body);
    let action = try!(Action::from_markers(&fields));
    let submitted = fields.iter()
        .find(|&&(ref k, _)| k == TEXT_FIELD)
        .map(|&(_, ref v)| v.as_str())
        .unwrap_or("");

    let draft = match action {
        Some(action) => dispatch::dispatch(app, action).draft(submitted),
        None => submitted,
    };
    Ok(view::render_page(&app.store, &app.view, draft))
}

fn parse_form(body: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(body.as_bytes()).into_owned().collect()
}

/// `GET /feed.json`: every post, most recent first.
pub struct FeedHandler {
    app: Arc<Mutex<App>>,
}

impl FeedHandler {
    fn new(app: Arc<Mutex<App>>) -> FeedHandler {
        FeedHandler { app: app }
    }
}

impl Handler for FeedHandler {
    fn handle(&self, _: &mut Request) -> IronResult<Response> {
        let payload = try_handler!(feed_json(&lock!(self.app)));
        Ok(json_response(status::Ok, payload))
    }
}

fn feed_json(app: &App) -> FeedResult<String> {
    Ok(try!(json::encode(app.store.posts())))
}

/// `GET /post/:id`: a single post.
pub struct PostHandler {
    app: Arc<Mutex<App>>,
}

impl PostHandler {
    fn new(app: Arc<Mutex<App>>) -> PostHandler {
        PostHandler { app: app }
    }
}

impl Handler for PostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let ref post_id = get_http_param!(req, "id");

        match post_json(&lock!(self.app), post_id) {
            Ok(payload) => Ok(json_response(status::Ok, payload)),
            Err(e) => {
                warn!("{}", e);
                Ok(error_response(e))
            }
        }
    }
}

fn post_json(app: &App, raw_id: &str) -> FeedResult<String> {
    let id = try!(Uuid::parse_str(raw_id).map_err(|_| FeedError::BadId(raw_id.to_string())));
    match app.store.find(&id) {
        Some(post) => Ok(try!(json::encode(post))),
        None => Err(FeedError::NotFound(id)),
    }
}

/// Serve HTML unless a handler already chose a content type.
pub struct HtmlAfterMiddleware;

impl AfterMiddleware for HtmlAfterMiddleware {
    fn after(&self, _: &mut Request, mut res: Response) -> IronResult<Response> {
        if !res.headers.has::<ContentType>() {
            res.headers.set(ContentType::html());
        }
        Ok(res)
    }
}
