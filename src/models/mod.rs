//! Request payloads and response projections.

pub mod article;
pub mod comment;
pub mod file;

pub use article::*;
pub use comment::*;
pub use file::*;
