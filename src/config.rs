use std::env;
use std::path::PathBuf;
use error::FeedResult;
use model::Author;
use seed;
use store::FeedStore;

pub const DEFAULT_ADDR: &'static str = "localhost:3000";
pub const DEFAULT_HANDLE: &'static str = "@Scrimba";
pub const DEFAULT_AVATAR: &'static str = "images/scrimbalogo.png";

/// Startup settings, read once from `FEEDBOX_*` environment variables.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub addr: String,
    pub seed: Option<PathBuf>,
    pub handle: String,
    pub avatar: String,
}

impl Config {
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Config
        where F: Fn(&str) -> Option<String>
    {
        let var = |key: &str| lookup(key).and_then(|v| if v.trim().is_empty() { None } else { Some(v) });
        Config {
            addr: var("FEEDBOX_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            seed: var("FEEDBOX_SEED").map(PathBuf::from),
            handle: var("FEEDBOX_HANDLE").unwrap_or_else(|| DEFAULT_HANDLE.to_string()),
            avatar: var("FEEDBOX_AVATAR").unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        }
    }

    /// The identity posts typed into the page are published under.
    pub fn author(&self) -> Author {
        Author::new(&self.handle, &self.avatar)
    }

    /// The seed file if one is configured, the bundled seed otherwise.
    pub fn load_store(&self) -> FeedResult<FeedStore> {
        match self.seed {
            Some(ref path) => seed::from_file(path),
            None => seed::builtin(),
        }
    }
}
