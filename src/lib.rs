//! Shortly - a session-authenticated URL shortener
//!
//! Logged-in users submit long URLs and get short codes back; visiting
//! `/{code}` redirects to the stored URL with a 302.
//!
//! # Architecture
//! - `storage`: SeaORM storage for users and links (SQLite, MySQL, PostgreSQL)
//! - `services`: link creation/resolution, signup/login, session tokens
//! - `api`: actix-web handlers and middleware
//! - `config`: TOML + environment configuration
//! - `runtime`: startup wiring and execution modes
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
