use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{Color, Vec2};
use crate::device::DEPTH_FORMAT;
use crate::render::{RenderCtx, RenderTarget};

use super::transform::{cursor_translation, screen_projection};

/// Side length of the quad in logical pixels.
pub const QUAD_EXTENT: f32 = 200.0;

const QUAD_COLOR: Color = Color::RED;

/// Quad corners in local space: origin corner first, then clockwise.
const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { position: [0.0, 0.0], color: QUAD_COLOR.to_array() },
    QuadVertex { position: [QUAD_EXTENT, 0.0], color: QUAD_COLOR.to_array() },
    QuadVertex { position: [QUAD_EXTENT, QUAD_EXTENT], color: QUAD_COLOR.to_array() },
    QuadVertex { position: [0.0, QUAD_EXTENT], color: QUAD_COLOR.to_array() },
];

/// Degenerate closed strip: revisiting vertex 0 closes the quad with three
/// strip triangles from five indices.
const QUAD_INDICES: [u16; 5] = [0, 1, 2, 3, 0];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    position: [f32; 2],
    color: [f32; 4],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Renders a single colored quad translated to the cursor position.
///
/// Every GPU resource is created once in [`QuadRenderer::new`] and owned for
/// the renderer's lifetime; per-frame work is limited to rewriting the two
/// matrix uniform buffers and recording one indexed draw. Resources are
/// released when the renderer is dropped.
pub struct QuadRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,

    projection_ubo: wgpu::Buffer,
    world_ubo: wgpu::Buffer,

    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
}

impl QuadRenderer {
    /// Creates every GPU resource for the quad against the surface format in `ctx`.
    ///
    /// Resource-creation and shader-validation failures surface through wgpu's
    /// uncaptured-error machinery and abort the process; there is no partial
    /// state to roll back.
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let projection_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint quad projection ubo"),
            size: matrix_size(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let world_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint quad world ubo"),
            size: matrix_size(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("glint quad bgl"),
                    entries: &[
                        matrix_ubo_layout_entry(0),
                        matrix_ubo_layout_entry(1),
                    ],
                });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint quad bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: projection_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: world_ubo.as_entire_binding(),
                },
            ],
        });

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let shader_src = include_str!("shaders/quad.wgsl");
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glint quad shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("glint quad pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glint quad pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(single_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: Some(wgpu::IndexFormat::Uint16),
                front_face: wgpu::FrontFace::Cw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group,
            projection_ubo,
            world_ubo,
            vbo,
            ibo,
        }
    }

    /// Records one frame's quad draw into `target`.
    ///
    /// Rewrites the projection matrix from the current viewport and the world
    /// matrix from `cursor`, then issues a single indexed triangle-strip draw.
    /// The color and depth attachments are loaded, not cleared; clearing is
    /// the frame envelope's responsibility.
    pub fn draw(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, cursor: Vec2) {
        let projection = screen_projection(ctx.viewport);
        ctx.queue
            .write_buffer(&self.projection_ubo, 0, bytemuck::bytes_of(&projection));

        let world = cursor_translation(cursor);
        ctx.queue
            .write_buffer(&self.world_ubo, 0, bytemuck::bytes_of(&world));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glint quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}

impl Drop for QuadRenderer {
    fn drop(&mut self) {
        // wgpu handles release ordering internally; field order still drops
        // the pipeline before the buffers it references.
        log::debug!("releasing quad renderer GPU resources");
    }
}

fn single_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// Byte size of one shader-visible 4x4 matrix.
fn matrix_size() -> u64 {
    std::mem::size_of::<glam::Mat4>() as u64
}

/// Returns the `wgpu` minimum binding size for a matrix uniform buffer.
///
/// `glam::Mat4` is 64 bytes so the size is always non-zero. Centralising this
/// avoids `.unwrap()` at the pipeline-creation site.
fn matrix_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(matrix_size())
        .expect("Mat4 has non-zero size by construction")
}

fn matrix_ubo_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(matrix_min_binding_size()),
        },
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── vertex data ───────────────────────────────────────────────────────

    #[test]
    fn four_vertices_form_square_at_origin() {
        assert_eq!(QUAD_VERTICES.len(), 4);

        let positions: Vec<[f32; 2]> = QUAD_VERTICES.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![
                [0.0, 0.0],
                [QUAD_EXTENT, 0.0],
                [QUAD_EXTENT, QUAD_EXTENT],
                [0.0, QUAD_EXTENT],
            ]
        );
    }

    #[test]
    fn all_vertices_share_one_color() {
        let expected = Color::RED.to_array();
        for v in &QUAD_VERTICES {
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn vertex_stride_matches_gpu_layout() {
        // 2 position floats + 4 color floats.
        assert_eq!(std::mem::size_of::<QuadVertex>(), 24);
        assert_eq!(QuadVertex::layout().array_stride, 24);
    }

    // ── index data ────────────────────────────────────────────────────────

    #[test]
    fn index_sequence_is_closed_strip() {
        assert_eq!(QUAD_INDICES, [0, 1, 2, 3, 0]);
    }

    #[test]
    fn strip_triangles_cover_the_quad() {
        // Each consecutive index triple is one strip triangle; together the
        // three triangles must touch all four corners and close back on 0.
        let triangles: Vec<[u16; 3]> = QUAD_INDICES
            .windows(3)
            .map(|w| [w[0], w[1], w[2]])
            .collect();
        assert_eq!(triangles, vec![[0, 1, 2], [1, 2, 3], [2, 3, 0]]);
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    #[test]
    fn matrix_buffers_are_exactly_64_bytes() {
        assert_eq!(matrix_size(), 64);
        assert_eq!(matrix_min_binding_size().get(), 64);
    }
}
