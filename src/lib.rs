pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod messages;
pub mod projects;
pub mod reviews;
pub mod sessions;
pub mod state;
pub mod storage;
pub mod users;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
