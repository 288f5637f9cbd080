extern crate iron;
extern crate router;
extern crate logger;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate rustc_serialize;
extern crate url;
extern crate uuid;

mod error;
mod model;
mod store;
mod seed;
mod view;
mod dispatch;
mod config;
mod handlers;

use std::error::Error;
use std::process;

use config::Config;
use dispatch::App;
use handlers::*;
use store::RandomIds;

use iron::prelude::Chain;
use iron::Iron;
use router::Router;
use logger::Logger;

// RUST_LOG=info FEEDBOX_ADDR=localhost:3000 feedbox
fn main() {
    if let Err(e) = env_logger::init() {
        eprintln!("logger unavailable: {}", e);
    }

    if let Err(e) = run(Config::from_env()) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(config: Config) -> Result<(), Box<Error>> {
    let (logger_before, logger_after) = Logger::new(None);

    let store = try!(config.load_store());
    info!("seeded feed with {} posts", store.len());

    let handlers = Handlers::new(App::new(store, config.author(), Box::new(RandomIds)));

    let mut router = Router::new();
    router.get("/", handlers.page, "page");
    router.post("/action", handlers.action, "action");
    router.get("/feed.json", handlers.feed, "feed");
    router.get("/post/:id", handlers.post, "post");

    let mut chain = Chain::new(router);
    chain.link_before(logger_before); // Should be first!
    chain.link_after(HtmlAfterMiddleware);
    chain.link_after(logger_after); // Should be last!

    let _listening = try!(Iron::new(chain).http(config.addr.as_str()));
    info!("listening on http://{}", config.addr);
    Ok(())
}
