use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use prism_geom::mesh::{IndexedMesh, TexVertex};

use crate::render::{RenderCtx, RenderTarget};

use super::common::{depth_state, mat4_cols, uniform_entry};
use super::TextureImage;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl From<TexVertex> for MeshVertex {
    fn from(v: TexVertex) -> Self {
        Self {
            position: v.position.to_array(),
            uv: v.uv.to_array(),
        }
    }
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Single textured, indexed, depth-tested mesh.
///
/// Geometry and texture are set once and kept on the GPU; only the transform
/// uniform is rewritten per frame. Until a texture is set nothing is drawn.
pub struct MeshRenderer {
    mesh: Option<(Vec<MeshVertex>, Vec<u16>)>,
    texture: Option<TextureImage>,

    pipeline_key: Option<(wgpu::TextureFormat, Option<wgpu::TextureFormat>)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bgl: Option<wgpu::BindGroupLayout>,
    ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,
    bind_group: Option<wgpu::BindGroup>,

    vbo: Option<wgpu::Buffer>,
    ibo: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Default for MeshRenderer {
    fn default() -> Self {
        Self {
            mesh: None,
            texture: None,
            pipeline_key: None,
            pipeline: None,
            bgl: None,
            ubo: None,
            sampler: None,
            bind_group: None,
            vbo: None,
            ibo: None,
            index_count: 0,
        }
    }
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the geometry. Uploaded on the next `render`.
    pub fn set_mesh(&mut self, mesh: &IndexedMesh) {
        let verts = mesh.vertices.iter().copied().map(MeshVertex::from).collect();
        self.mesh = Some((verts, mesh.indices.clone()));
        self.vbo = None;
        self.ibo = None;
    }

    /// Replaces the texture. Uploaded on the next `render`.
    pub fn set_texture(&mut self, image: TextureImage) {
        self.texture = Some(image);
        self.bind_group = None;
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        model: Mat4,
        view: Mat4,
        proj: Mat4,
    ) {
        if !(model.is_finite() && view.is_finite() && proj.is_finite()) {
            return;
        }

        self.ensure_layout(ctx);
        self.ensure_bind_group(ctx);
        self.ensure_pipeline(ctx);
        self.ensure_buffers(ctx);

        if let Some(ubo) = self.ubo.as_ref() {
            let u = TransformUniform {
                model: mat4_cols(model),
                view: mat4_cols(view),
                proj: mat4_cols(proj),
            };
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
        }

        let (Some(pipeline), Some(bind_group), Some(vbo), Some(ibo)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.vbo.as_ref(),
            self.ibo.as_ref(),
        ) else {
            return;
        };

        let mut rpass = target.begin_load_pass("prism mesh pass", ctx.depth_format.is_some());
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    fn ensure_layout(&mut self, ctx: &RenderCtx<'_>) {
        if self.bgl.is_some() && self.ubo.is_some() && self.sampler.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism mesh bgl"),
            entries: &[
                uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX,
                    std::mem::size_of::<TransformUniform>(),
                ),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism mesh ubo"),
            size: std::mem::size_of::<TransformUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("prism mesh sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        self.bgl = Some(bgl);
        self.ubo = Some(ubo);
        self.sampler = Some(sampler);

        // Both depend on bgl.
        self.bind_group = None;
        self.pipeline = None;
        self.pipeline_key = None;
    }

    fn ensure_bind_group(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() {
            return;
        }
        let (Some(bgl), Some(ubo), Some(sampler), Some(image)) = (
            self.bgl.as_ref(),
            self.ubo.as_ref(),
            self.sampler.as_ref(),
            self.texture.as_ref(),
        ) else {
            return;
        };

        let max = ctx.device.limits().max_texture_dimension_2d;
        if !image.fits(max) {
            log::error!(
                "mesh texture {}x{} does not fit the device limit {max}; not drawing",
                image.width,
                image.height
            );
            self.texture = None;
            return;
        }

        let texture = image.upload(ctx.device, ctx.queue);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism mesh bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
        log::debug!("mesh texture uploaded ({}x{})", image.width, image.height);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let Some(bgl) = self.bgl.as_ref() else { return };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism mesh pipeline layout"),
            bind_group_layouts: &[bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism mesh pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout()],
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
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
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

    fn ensure_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo.is_some() && self.ibo.is_some() {
            return;
        }
        let Some((verts, indices)) = self.mesh.as_ref() else { return };
        if verts.is_empty() || indices.is_empty() {
            return;
        }

        self.vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism mesh vbo"),
            contents: bytemuck::cast_slice(verts),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        // Uint16 index copies must be 4-byte aligned.
        let mut padded = indices.clone();
        if padded.len() % 2 == 1 {
            padded.push(0);
        }
        self.ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism mesh ibo"),
            contents: bytemuck::cast_slice(&padded),
            usage: wgpu::BufferUsages::INDEX,
        }));
        self.index_count = indices.len() as u32;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TransformUniform {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pyramid_converts_to_gpu_vertices() {
        let mesh = prism_geom::mesh::square_pyramid(0.5, 1.0);
        let verts: Vec<MeshVertex> = mesh.vertices.iter().copied().map(MeshVertex::from).collect();
        assert_eq!(verts.len(), mesh.vertices.len());
        assert_eq!(verts[0].position, mesh.vertices[0].position.to_array());
        assert_eq!(verts[0].uv, mesh.vertices[0].uv.to_array());
    }

    #[test]
    fn vertex_stride_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 20);
        assert_eq!(std::mem::size_of::<TransformUniform>(), 3 * 64);
    }

    #[test]
    fn mesh_changes_invalidate_gpu_buffers() {
        let mut r = MeshRenderer::new();
        r.set_mesh(&prism_geom::mesh::square_pyramid(0.5, 1.0));
        assert!(r.vbo.is_none() && r.ibo.is_none());
        assert_eq!(r.mesh.as_ref().map(|(_, i)| i.len()), Some(18));
        r.set_texture(TextureImage::solid([0, 0, 255, 255]));
        assert!(r.bind_group.is_none());
    }
}
