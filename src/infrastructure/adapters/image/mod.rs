//! Image Adapter - 封面生成客户端实现

mod fake_image_client;
mod http_image_client;

pub use fake_image_client::FakeImageClient;
pub use http_image_client::*;
