use super::helpers;
use super::textures::MediaTexture;
use crate::core::constants::{CURL_GRID, GAMMA, VIDEO_CROP};
use crate::core::CurlParams;
use glam::Mat4;
use wgpu;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CurlUniforms {
    pub(crate) proj: [[f32; 4]; 4],
    pub(crate) params: [f32; 4],
    pub(crate) uv_xform: [f32; 4],
    pub(crate) encode: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GridVertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

/// Unit plane centred on the origin split into `n` x `n` cells.
fn grid_mesh(n: u32) -> (Vec<GridVertex>, Vec<u32>) {
    let n = n.max(1);
    let mut verts = Vec::with_capacity(((n + 1) * (n + 1)) as usize);
    for j in 0..=n {
        for i in 0..=n {
            let u = i as f32 / n as f32;
            let v = j as f32 / n as f32;
            verts.push(GridVertex {
                pos: [u - 0.5, v - 0.5],
                uv: [u, 1.0 - v],
            });
        }
    }
    let mut indices = Vec::with_capacity((n * n * 6) as usize);
    let row = n + 1;
    for j in 0..n {
        for i in 0..n {
            let a = j * row + i;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            indices.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }
    (verts, indices)
}

/// Page-curl plane for the detail viewer.
pub(crate) struct CurlPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    encode_flag: f32,
}

impl CurlPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        sampler: &wgpu::Sampler,
        texture: &MediaTexture,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("curl_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::CURL_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("curl_bgl"),
            entries: &[
                helpers::uniform_entry(0),
                helpers::texture_entry(1),
                helpers::sampler_entry(2),
            ],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("curl_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GridVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2],
        };
        let pipeline = helpers::make_media_pipeline(
            device,
            "curl_pipeline",
            &pl,
            &shader,
            &[vertex_layout],
            color_format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            None,
        );
        let (verts, indices) = grid_mesh(CURL_GRID);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("curl_vertices"),
            contents: bytemuck::cast_slice(&verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("curl_indices"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = helpers::create_uniform_buffer::<CurlUniforms>(device, "curl_uniforms");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("curl_bg"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            uniform_buffer,
            bind_group,
            encode_flag: texture.encode_flag(),
        }
    }

    pub(crate) fn draw(&self, queue: &wgpu::Queue, rpass: &mut wgpu::RenderPass<'_>, params: &CurlParams) {
        let a = params.aspect.max(1e-3);
        // Orthographic box spanning the aspect-scaled plane; depth covers the curl lift
        let proj = Mat4::orthographic_rh(-0.5 * a, 0.5 * a, -0.5, 0.5, -1.0, 1.0);
        let crop = 1.0 - VIDEO_CROP * 2.0;
        let u = CurlUniforms {
            proj: proj.to_cols_array_2d(),
            params: [params.curl, params.radius, a, params.angle],
            uv_xform: [crop, crop, VIDEO_CROP, VIDEO_CROP],
            encode: [self.encode_flag, GAMMA, 0.0, 0.0],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    pub(crate) fn destroy(&self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.uniform_buffer.destroy();
    }
}
