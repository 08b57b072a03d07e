//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers, textures), creates
//! them lazily on first use, and re-creates its pipeline when the surface
//! format changes. Every renderer records into its own render pass that loads
//! the existing color (and depth) contents, so passes compose in call order.
//!
//! Convention:
//! - 2D geometry is in NDC (`[-1, 1]`, +Y up).
//! - Pixel rects (viewport / scissor) are physical pixels, top-left origin.

mod common;
mod ctx;
mod lines3d;
mod mesh;
mod primitives;
mod region;
mod texture;

pub use ctx::{RenderCtx, RenderTarget};
pub use lines3d::{Line3d, LineRenderer3d};
pub use mesh::{MeshRenderer, MeshVertex};
pub use primitives::PrimitiveRenderer;
pub use region::RegionFill;
pub use texture::TextureImage;
