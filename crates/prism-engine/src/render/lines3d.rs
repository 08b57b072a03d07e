use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{depth_state, mat4_cols, uniform_entry, GrowableBuffer};

/// A colored segment in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line3d {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Color,
}

impl From<prism_geom::mesh::AxisLine> for Line3d {
    fn from(a: prism_geom::mesh::AxisLine) -> Self {
        Self {
            from: a.from,
            to: a.to,
            color: a.color.into(),
        }
    }
}

/// Draws world-space line lists through a single `view_proj` transform.
///
/// Depth-tested when the frame has a depth attachment.
pub struct LineRenderer3d {
    pipeline_key: Option<(wgpu::TextureFormat, Option<wgpu::TextureFormat>)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bgl: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    ubo: Option<wgpu::Buffer>,

    vertices: GrowableBuffer,
}

impl Default for LineRenderer3d {
    fn default() -> Self {
        Self {
            pipeline_key: None,
            pipeline: None,
            bgl: None,
            bind_group: None,
            ubo: None,
            vertices: GrowableBuffer::new("prism line3d vbo", wgpu::BufferUsages::VERTEX),
        }
    }
}

impl LineRenderer3d {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        lines: &[Line3d],
        view_proj: Mat4,
    ) {
        if lines.is_empty() || !view_proj.is_finite() {
            return;
        }

        self.ensure_bindings(ctx);
        self.ensure_pipeline(ctx);

        let verts: Vec<LineVertex> = lines
            .iter()
            .flat_map(|l| {
                let color = l.color.to_array();
                [
                    LineVertex { pos: l.from.to_array(), color },
                    LineVertex { pos: l.to.to_array(), color },
                ]
            })
            .collect();

        if let Some(ubo) = self.ubo.as_ref() {
            let u = CameraUniform {
                view_proj: mat4_cols(view_proj),
            };
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
        }

        let Some(vbo) = self.vertices.upload(ctx, &verts) else { return };
        let (Some(pipeline), Some(bind_group)) = (self.pipeline.as_ref(), self.bind_group.as_ref()) else {
            return;
        };

        let mut rpass = target.begin_load_pass("prism line3d pass", ctx.depth_format.is_some());
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..verts.len() as u32, 0..1);
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bgl.is_some() && self.bind_group.is_some() && self.ubo.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism line3d bgl"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX,
                std::mem::size_of::<CameraUniform>(),
            )],
        });

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism line3d ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism line3d bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.bgl = Some(bgl);
        self.ubo = Some(ubo);
        self.bind_group = Some(bind_group);

        // Pipeline layout depends on bgl.
        self.pipeline = None;
        self.pipeline_key = None;
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let Some(bgl) = self.bgl.as_ref() else { return };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism line3d shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/line3d.wgsl").into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism line3d pipeline layout"),
            bind_group_layouts: &[bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism line3d pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[LineVertex::layout()],
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
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: depth_state(ctx.depth_format),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_key = Some(key);
        self.pipeline = Some(pipeline);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineVertex {
    pos: [f32; 3],
    color: [f32; 4],
}

impl LineVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_lines_convert_with_color() {
        let [x, y, z] = prism_geom::mesh::axes(1.8);
        let x: Line3d = x.into();
        let y: Line3d = y.into();
        let z: Line3d = z.into();
        assert_eq!(x.color, Color::RED);
        assert_eq!(y.color, Color::GREEN);
        assert_eq!(z.color, Color::BLUE);
        assert_eq!(x.to, Vec3::new(1.8, 0.0, 0.0));
    }

    #[test]
    fn uniform_is_one_matrix() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
    }
}
