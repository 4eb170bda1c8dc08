pub mod add;
pub mod auth_cmd;
pub mod common;
pub mod completions;
pub mod delete;
pub mod draft;
pub mod edit;
pub mod list;
