//! Mensageiro Core - Templated Email Notification Backend
//!
//! This crate provides the backend for the Mensageiro notification service:
//! user registration and login, reusable email templates with `{{variable}}`
//! placeholders, templated email dispatch over SMTP, and an immutable
//! delivery audit log.

pub mod api;
pub mod config;
pub mod domain;
pub mod email;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod migration;
pub mod openapi;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
