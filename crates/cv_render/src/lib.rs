pub mod resume;

pub use resume::{date_range, split_bullets, Resume};
