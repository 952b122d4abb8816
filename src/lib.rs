//! Form builder service: form definitions, submitted responses, and the
//! JSON API over them, plus the client-side editor and viewer state.

pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
