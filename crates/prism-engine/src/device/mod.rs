//! wgpu device, surface and depth attachment for the single exercise window.
//!
//! [`Gpu`] is created once per window and borrows it for the surface lifetime.
//! Frames are acquired with [`Gpu::begin_frame`] and presented with
//! [`Gpu::submit`].

mod depth;
mod gpu;
mod init;
mod surface;

pub use depth::DepthTarget;
pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
