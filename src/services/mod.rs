pub mod article_service;
pub mod comment_service;
pub mod file_service;
pub mod storage;
