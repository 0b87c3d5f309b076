pub mod auth;
pub mod request_id;

pub use auth::RequireSession;
pub use request_id::{RequestId, RequestIdMiddleware};
