use glam::DVec2;
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::{DepthTarget, Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::app::AppControl;
use super::overlay::StatusOverlay;

/// Window handle and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the logical window size as `(width, height)` in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys = self.window.inner_size();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(self.window.scale_factor());
        (logi.width as f32, logi.height as f32)
    }

    /// Returns the drawable size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let phys = self.window.inner_size();
        (phys.width, phys.height)
    }

    pub fn viewport(&self) -> Viewport {
        let (w, h) = self.physical_size();
        Viewport::new(w as f32, h as f32)
    }

    /// Maps a pointer position (logical pixels, as carried by input events) to NDC.
    pub fn pointer_to_ndc(&self, x: f32, y: f32) -> Option<DVec2> {
        let (w, h) = self.logical_size();
        prism_geom::ndc::pixel_to_ndc(x as f64, y as f64, w as f64, h as f64)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub overlay: &'a mut StatusOverlay,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears color (and depth, if the surface has a depth target) with `clear`,
    /// calls `draw` with a ready [`RenderCtx`] and [`RenderTarget`], then
    /// presents the frame.
    ///
    /// A zero-sized window skips the frame entirely.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let viewport = self.window.viewport();
        if !viewport.is_valid() {
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        let gpu: &Gpu<'w> = &*self.gpu;
        let depth_view = gpu.depth_view();

        // Clear pass, dropped before the encoder is moved into submit().
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("prism clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: depth_view.map(|view| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::new(
            gpu.device(),
            gpu.queue(),
            gpu.surface_format(),
            depth_view.map(|_| DepthTarget::FORMAT),
            viewport,
        );

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view, depth_view);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        gpu.submit(frame);

        AppControl::Continue
    }
}
