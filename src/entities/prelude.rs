pub use super::articles::Entity as Articles;
pub use super::comments::Entity as Comments;
pub use super::files::Entity as Files;
