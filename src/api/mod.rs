//! REST API handlers

pub mod auth;
pub mod email;
pub mod health;
pub mod template;
pub mod user;
