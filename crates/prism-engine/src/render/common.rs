//! Shared GPU types and utilities used by the renderers.

use bytemuck::Pod;

use crate::coords::{PixelRect, Viewport};

use super::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight (non-premultiplied) alpha blending.
pub(super) fn alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState::ALPHA_BLENDING
}

// ── depth ─────────────────────────────────────────────────────────────────

/// Standard less-than depth test with writes, or `None` for 2D passes.
pub(super) fn depth_state(format: Option<wgpu::TextureFormat>) -> Option<wgpu::DepthStencilState> {
    format.map(|format| wgpu::DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: Default::default(),
        bias: Default::default(),
    })
}

// ── uniforms ──────────────────────────────────────────────────────────────

pub(super) fn uniform_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
    size: usize,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(size as u64),
        },
        count: None,
    }
}

pub(super) fn mat4_cols(m: glam::Mat4) -> [[f32; 4]; 4] {
    m.to_cols_array_2d()
}

// ── scissor ───────────────────────────────────────────────────────────────

/// Clamps `rect` to the viewport. Returns `None` if nothing is left to draw.
pub(super) fn clamp_to_viewport(rect: PixelRect, viewport: Viewport) -> Option<PixelRect> {
    let full = viewport.full_rect();
    let clamped = rect.clamp_to(full.width, full.height);
    (!clamped.is_empty()).then_some(clamped)
}

// ── growable vertex buffers ───────────────────────────────────────────────

/// Capacity (in elements) to allocate for `required` elements.
pub(super) fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(64)
}

/// GPU buffer that grows by power-of-two reallocation and is never shrunk.
pub(super) struct GrowableBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
}

impl GrowableBuffer {
    pub(super) const fn new(label: &'static str, usage: wgpu::BufferUsages) -> Self {
        Self {
            label,
            usage,
            buffer: None,
            capacity: 0,
        }
    }

    /// Uploads `data` from offset 0, reallocating first if it does not fit.
    pub(super) fn upload<T: Pod>(&mut self, ctx: &RenderCtx<'_>, data: &[T]) -> Option<&wgpu::Buffer> {
        if data.is_empty() {
            return None;
        }

        if data.len() > self.capacity || self.buffer.is_none() {
            let new_cap = grown_capacity(data.len());
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (new_cap * std::mem::size_of::<T>()) as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = new_cap;
            log::trace!("{}: grew to {new_cap} elements", self.label);
        }

        let buffer = self.buffer.as_ref()?;
        ctx.queue.write_buffer(buffer, 0, bytemuck::cast_slice(data));
        Some(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_rounds_up_to_power_of_two_with_floor() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(64), 64);
        assert_eq!(grown_capacity(65), 128);
        assert_eq!(grown_capacity(1000), 1024);
    }

    #[test]
    fn scissor_is_clamped_to_viewport() {
        let vp = Viewport::new(100.0, 80.0);
        assert_eq!(
            clamp_to_viewport(PixelRect::new(50, 40, 100, 100), vp),
            Some(PixelRect::new(50, 40, 50, 40))
        );
    }

    #[test]
    fn scissor_outside_viewport_is_dropped() {
        let vp = Viewport::new(100.0, 80.0);
        assert_eq!(clamp_to_viewport(PixelRect::new(120, 0, 10, 10), vp), None);
        assert_eq!(clamp_to_viewport(PixelRect::new(0, 0, 0, 10), vp), None);
    }

    #[test]
    fn depth_state_only_when_format_given() {
        assert!(depth_state(None).is_none());
        let d = depth_state(Some(wgpu::TextureFormat::Depth32Float));
        assert_eq!(d.map(|d| d.depth_compare), Some(wgpu::CompareFunction::Less));
    }
}
