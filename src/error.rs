use std::error::Error;
use std::fmt;
use std::io;
use rustc_serialize::json::{DecoderError, EncoderError};
use uuid::Uuid;

#[derive(Debug)]
pub enum FeedError {
    /// No post carries this identifier.
    NotFound(Uuid),
    /// Submitted text was empty or only whitespace.
    EmptyText,
    /// A post with this identifier already exists.
    DuplicateId(Uuid),
    /// A marker or path parameter that is not a UUID.
    BadId(String),
    /// A seeded post is flagged liked or retweeted with a zero count.
    InconsistentCounts(Uuid),
    Seed(DecoderError),
    Encode(EncoderError),
    Io(io::Error),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FeedError::NotFound(ref id) => write!(f, "no post with id {}", id),
            FeedError::EmptyText => write!(f, "post text is empty"),
            FeedError::DuplicateId(ref id) => write!(f, "duplicate post id {}", id),
            FeedError::BadId(ref raw) => write!(f, "not a post id: {:?}", raw),
            FeedError::InconsistentCounts(ref id) => {
                write!(f, "post {} is flagged without a matching count", id)
            }
            FeedError::Seed(ref e) => write!(f, "invalid seed data: {}", e),
            FeedError::Encode(ref e) => write!(f, "cannot encode posts: {}", e),
            FeedError::Io(ref e) => write!(f, "{}", e),
        }
    }
}

impl Error for FeedError {
    fn description(&self) -> &str {
        match *self {
            FeedError::NotFound(_) => "post not found",
            FeedError::EmptyText => "empty post text",
            FeedError::DuplicateId(_) => "duplicate post id",
            FeedError::BadId(_) => "malformed post id",
            FeedError::InconsistentCounts(_) => "flag without count",
            FeedError::Seed(_) => "invalid seed data",
            FeedError::Encode(_) => "encoding error",
            FeedError::Io(_) => "i/o error",
        }
    }

    fn source(&self) -> Option<&(Error + 'static)> {
        match *self {
            FeedError::Seed(ref e) => Some(e),
            FeedError::Encode(ref e) => Some(e),
            FeedError::Io(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FeedError {
    fn from(e: io::Error) -> FeedError {
        FeedError::Io(e)
    }
}

impl From<DecoderError> for FeedError {
    fn from(e: DecoderError) -> FeedError {
        FeedError::Seed(e)
    }
}

impl From<EncoderError> for FeedError {
    fn from(e: EncoderError) -> FeedError {
        FeedError::Encode(e)
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
