//! HTTP Handlers

mod draft;
mod ping;
mod podcast;
mod storage;
mod user;
mod voice;
mod websocket;

pub use draft::*;
pub use ping::*;
pub use podcast::*;
pub use storage::*;
pub use user::*;
pub use voice::*;
pub use websocket::*;
