//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod image;
pub mod probe;
pub mod speech;
pub mod storage;

pub use image::*;
pub use probe::*;
pub use speech::*;
pub use storage::*;
