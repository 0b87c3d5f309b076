//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the CLI.

pub mod auth_service;
pub mod link_service;
pub mod session;
pub mod title_fetcher;

pub use auth_service::{AuthService, IssuedSession};
pub use link_service::{LinkCreateResult, LinkService, LinkSettings};
pub use session::{Session, SessionClaims, SessionService};
pub use title_fetcher::{
    HttpTitleFetcher, NoopTitleFetcher, TitleFetcher, extract_title, title_fetcher_from_config,
};
