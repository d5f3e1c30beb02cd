use super::helpers;
use super::targets::DEPTH_FORMAT;
use super::textures::MediaTexture;
use crate::core::constants::{
    GAMMA, RIPPLE_BLOOM_SOFTNESS, RIPPLE_BLOOM_SPEED, RIPPLE_DISTORTION, RIPPLE_EDGE_SPEED,
    RIPPLE_WAVE_AMP, RIPPLE_WAVE_FREQ_D, RIPPLE_WAVE_FREQ_T, RIPPLE_WIDTH,
};
use crate::core::{CameraRig, RippleFrame};
use glam::Vec2;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct RippleUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) size_progress: [f32; 4],
    pub(crate) uv_from: [f32; 4],
    pub(crate) uv_to: [f32; 4],
    pub(crate) flags: [f32; 4],
    pub(crate) shape: [f32; 4],
    pub(crate) wave: [f32; 4],
    pub(crate) bloom: [f32; 4],
}

/// Full-screen plane cross-fading the current and next slide textures.
pub(crate) struct RipplePass {
    pipeline: wgpu::RenderPipeline,
    bgl: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    bind_group: Option<wgpu::BindGroup>,
    bound_pair: Option<(usize, usize)>,
}

impl RipplePass {
    pub(crate) fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ripple_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::RIPPLE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ripple_bgl"),
            entries: &[
                helpers::uniform_entry(0),
                helpers::texture_entry(1),
                helpers::texture_entry(2),
                helpers::sampler_entry(3),
            ],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ripple_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_media_pipeline(
            device,
            "ripple_pipeline",
            &pl,
            &shader,
            &[],
            color_format,
            Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
            Some(DEPTH_FORMAT),
        );
        let uniform_buffer = helpers::create_uniform_buffer::<RippleUniforms>(device, "ripple_uniforms");
        Self {
            pipeline,
            bgl,
            uniform_buffer,
            bind_group: None,
            bound_pair: None,
        }
    }

    /// Rebind when the (from, to) pair changes; a commit changes it on the
    /// same frame the engine advances `current`.
    fn bind(
        &mut self,
        device: &wgpu::Device,
        sampler: &wgpu::Sampler,
        textures: &[MediaTexture],
        pair: (usize, usize),
    ) -> bool {
        if self.bound_pair == Some(pair) && self.bind_group.is_some() {
            return true;
        }
        let (Some(from), Some(to)) = (textures.get(pair.0), textures.get(pair.1)) else {
            return false;
        };
        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ripple_bg"),
            layout: &self.bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&from.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&to.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
        self.bound_pair = Some(pair);
        true
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rpass: &mut wgpu::RenderPass<'_>,
        sampler: &wgpu::Sampler,
        camera: &CameraRig,
        frame: &RippleFrame,
        plane: Vec2,
        textures: &[MediaTexture],
    ) {
        if !self.bind(device, sampler, textures, (frame.from, frame.to)) {
            return;
        }
        let from = &textures[frame.from];
        let to = &textures[frame.to];
        let u = RippleUniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
            size_progress: [plane.x, plane.y, frame.progress, frame.time],
            uv_from: from.kind.uv_transform().to_array(),
            uv_to: to.kind.uv_transform().to_array(),
            flags: [from.encode_flag(), to.encode_flag(), frame.opacity, 0.0],
            shape: [RIPPLE_WIDTH, RIPPLE_EDGE_SPEED, RIPPLE_DISTORTION, GAMMA],
            wave: [
                RIPPLE_WAVE_FREQ_T,
                RIPPLE_WAVE_FREQ_D,
                RIPPLE_WAVE_AMP,
                RIPPLE_BLOOM_SPEED,
            ],
            bloom: [RIPPLE_BLOOM_SOFTNESS, 0.0, 0.0, 0.0],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
        if let Some(bg) = &self.bind_group {
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, bg, &[]);
            rpass.draw(0..6, 0..1);
        }
    }

    pub(crate) fn destroy(&self) {
        self.uniform_buffer.destroy();
    }
}
