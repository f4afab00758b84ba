pub mod error;
pub mod models;

pub use error::Error;
pub use models::{Entry, EntryKind, Profile, Section};

pub type Result<T> = std::result::Result<T, Error>;
