//! HTTP Layer - RESTful API + WebSocket

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use auth::CurrentUser;
pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerOptions};
pub use state::{AppPorts, AppState, VoicePreviewConfig};
