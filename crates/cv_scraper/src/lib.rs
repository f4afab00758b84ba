pub mod parse;
pub mod profile;
pub mod session;
pub mod spans;

pub use profile::ProfileScraper;
pub use session::{classify_login, LoginStatus, Navigator, Session};
pub use spans::Span;

pub mod prelude {
    pub use super::profile::ProfileScraper;
    pub use super::session::{LoginStatus, Navigator, Session};
    pub use cv_core::{Entry, EntryKind, Profile, Result, Section};
}
