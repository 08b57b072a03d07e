use bytemuck::{Pod, Zeroable};

use crate::coords::PixelRect;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{clamp_to_viewport, GrowableBuffer};

/// Fills pixel rectangles with solid colors using viewport + scissor.
///
/// Regions are painted in slice order, so later regions cover earlier ones.
pub struct RegionFill {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    instances: GrowableBuffer,
}

impl Default for RegionFill {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            instances: GrowableBuffer::new("prism region instance vbo", wgpu::BufferUsages::VERTEX),
        }
    }
}

impl RegionFill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        regions: &[(PixelRect, Color)],
    ) {
        let visible: Vec<(PixelRect, RegionInstance)> = regions
            .iter()
            .filter_map(|(rect, color)| {
                let rect = clamp_to_viewport(*rect, ctx.viewport)?;
                Some((rect, RegionInstance { color: color.to_array() }))
            })
            .collect();

        if visible.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);

        let raw: Vec<RegionInstance> = visible.iter().map(|(_, inst)| *inst).collect();
        let Some(instance_vbo) = self.instances.upload(ctx, &raw) else { return };
        let Some(pipeline) = self.pipeline.as_ref() else { return };

        let mut rpass = target.begin_load_pass("prism region pass", false);
        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, instance_vbo.slice(..));

        for (i, (rect, _)) in visible.iter().enumerate() {
            let i = i as u32;
            rpass.set_viewport(
                rect.x as f32,
                rect.y as f32,
                rect.width as f32,
                rect.height as f32,
                0.0,
                1.0,
            );
            rpass.set_scissor_rect(rect.x, rect.y, rect.width, rect.height);
            rpass.draw(0..3, i..i + 1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism region shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/region.wgsl").into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism region pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism region pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[RegionInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RegionInstance {
    color: [f32; 4],
}

impl RegionInstance {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RegionInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
