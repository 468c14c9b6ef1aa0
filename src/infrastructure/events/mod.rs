//! Events - WebSocket 事件发布

mod publisher;

pub use publisher::{EventPublisher, NoticeVariant, WsEvent};
