//! GPU resource management: device/surface context and texture upload.

pub mod render_context;
pub mod texture;

pub use render_context::RenderContext;
pub use texture::GpuTexture;
