pub mod user_service;
pub mod project_service;
pub mod comment_service;
pub mod issue_service;
pub mod connection_service;
pub mod deployment_service;
pub mod file_service;
pub mod search_service;
