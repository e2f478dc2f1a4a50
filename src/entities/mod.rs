pub mod prelude;

pub mod articles;
pub mod comments;
pub mod files;
