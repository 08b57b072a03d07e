use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{alpha_blend, GrowableBuffer};

/// Draws a [`DrawList`] of 2D line strips, segments, points and fills.
///
/// All commands of a frame are tessellated into one vertex buffer and drawn
/// as consecutive batches, preserving list order.
pub struct PrimitiveRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: Option<[wgpu::RenderPipeline; 3]>,

    vertices: GrowableBuffer,
}

impl Default for PrimitiveRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipelines: None,
            vertices: GrowableBuffer::new("prism primitive vbo", wgpu::BufferUsages::VERTEX),
        }
    }
}

impl PrimitiveRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, list: &DrawList) {
        if list.is_empty() || !ctx.viewport.is_valid() {
            return;
        }

        let (verts, batches) = tessellate(list.items(), ctx.viewport.ndc_per_pixel());
        if batches.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx);

        let Some(vbo) = self.vertices.upload(ctx, &verts) else { return };
        let Some(pipelines) = self.pipelines.as_ref() else { return };

        let mut rpass = target.begin_load_pass("prism primitive pass", false);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        let mut bound: Option<Topology> = None;
        for batch in &batches {
            if bound != Some(batch.topology) {
                rpass.set_pipeline(&pipelines[batch.topology as usize]);
                bound = Some(batch.topology);
            }
            rpass.draw(batch.range.clone(), 0..1);
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipelines.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism primitive shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/primitive.wgsl").into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism primitive pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let build = |topology: Topology| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(topology.label()),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[PrimVertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: topology.to_wgpu(),
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        self.pipelines = Some([
            build(Topology::LineStrip),
            build(Topology::LineList),
            build(Topology::TriangleList),
        ]);
        self.pipeline_format = Some(ctx.surface_format);
    }
}

// ── tessellation ──────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Topology {
    LineStrip = 0,
    LineList = 1,
    TriangleList = 2,
}

impl Topology {
    fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            Topology::LineList => wgpu::PrimitiveTopology::LineList,
            Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Topology::LineStrip => "prism primitive line-strip pipeline",
            Topology::LineList => "prism primitive line-list pipeline",
            Topology::TriangleList => "prism primitive triangle pipeline",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Batch {
    topology: Topology,
    range: Range<u32>,
}

/// Flattens draw commands into vertices plus ordered draw batches.
///
/// Points become `size_px` squares, fills become triangle fans. Adjacent list
/// and triangle batches are merged; every strip stays its own batch.
fn tessellate(items: &[DrawCmd], ndc_per_px: Vec2) -> (Vec<PrimVertex>, Vec<Batch>) {
    let mut verts: Vec<PrimVertex> = Vec::new();
    let mut batches: Vec<Batch> = Vec::new();

    for cmd in items {
        let color = cmd.color().to_array();
        let start = verts.len() as u32;

        let topology = match cmd {
            DrawCmd::LineStrip { points, .. } => {
                if points.len() < 2 {
                    continue;
                }
                verts.extend(points.iter().map(|p| PrimVertex::new(*p, color)));
                Topology::LineStrip
            }
            DrawCmd::Lines { segments, .. } => {
                verts.extend(
                    segments
                        .iter()
                        .flat_map(|[a, b]| [PrimVertex::new(*a, color), PrimVertex::new(*b, color)]),
                );
                Topology::LineList
            }
            DrawCmd::Points { points, size_px, .. } => {
                let half = ndc_per_px * (*size_px * 0.5);
                for p in points {
                    let (l, r) = (p.x - half.x, p.x + half.x);
                    let (b, t) = (p.y - half.y, p.y + half.y);
                    verts.extend(
                        [
                            Vec2::new(l, b),
                            Vec2::new(r, b),
                            Vec2::new(r, t),
                            Vec2::new(l, b),
                            Vec2::new(r, t),
                            Vec2::new(l, t),
                        ]
                        .map(|v| PrimVertex::new(v, color)),
                    );
                }
                Topology::TriangleList
            }
            DrawCmd::Fill { polygon, .. } => {
                if polygon.len() < 3 {
                    continue;
                }
                let anchor = polygon[0];
                for pair in polygon[1..].windows(2) {
                    verts.extend(
                        [anchor, pair[0], pair[1]].map(|v| PrimVertex::new(v, color)),
                    );
                }
                Topology::TriangleList
            }
        };

        let end = verts.len() as u32;
        if end == start {
            continue;
        }

        match batches.last_mut() {
            Some(last)
                if last.topology == topology
                    && topology != Topology::LineStrip
                    && last.range.end == start =>
            {
                last.range.end = end;
            }
            _ => batches.push(Batch { topology, range: start..end }),
        }
    }

    (verts, batches)
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct PrimVertex {
    pos: [f32; 2],
    color: [f32; 4],
}

impl PrimVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn new(pos: Vec2, color: [f32; 4]) -> Self {
        Self {
            pos: pos.to_array(),
            color,
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PrimVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
