use super::helpers;
use super::targets::DEPTH_FORMAT;
use super::textures::MediaTexture;
use crate::constants::FOG_COLOR;
use crate::core::constants::{FOG_FAR, FOG_NEAR, GAMMA};
use crate::core::pose::SlidePose;
use crate::core::CameraRig;
use glam::Mat4;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SlideUniforms {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) camera_pos: [f32; 4],
    pub(crate) size_encode: [f32; 4],
    pub(crate) uv_xform: [f32; 4],
    pub(crate) fog: [f32; 4],
    pub(crate) fog_color: [f32; 4],
}

struct SlideBinding {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws every visible carousel slide as a textured, fogged quad.
pub(crate) struct SlidePass {
    pipeline: wgpu::RenderPipeline,
    bindings: Vec<SlideBinding>,
}

impl SlidePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        sampler: &wgpu::Sampler,
        textures: &[MediaTexture],
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("slide_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SLIDE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("slide_bgl"),
            entries: &[
                helpers::uniform_entry(0),
                helpers::texture_entry(1),
                helpers::sampler_entry(2),
            ],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("slide_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_media_pipeline(
            device,
            "slide_pipeline",
            &pl,
            &shader,
            &[],
            color_format,
            None,
            Some(DEPTH_FORMAT),
        );
        let bindings = textures
            .iter()
            .enumerate()
            .map(|(i, tex)| {
                let uniform_buffer =
                    helpers::create_uniform_buffer::<SlideUniforms>(device, &format!("slide_uniforms_{i}"));
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("slide_bg"),
                    layout: &bgl,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: uniform_buffer.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(&tex.view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::Sampler(sampler),
                        },
                    ],
                });
                SlideBinding {
                    uniform_buffer,
                    bind_group,
                }
            })
            .collect();
        Self { pipeline, bindings }
    }

    pub(crate) fn draw(
        &self,
        queue: &wgpu::Queue,
        rpass: &mut wgpu::RenderPass<'_>,
        camera: &CameraRig,
        poses: &[SlidePose],
        textures: &[MediaTexture],
    ) {
        let view_proj = camera.view_projection().to_cols_array_2d();
        let camera_pos = camera.position.extend(1.0).to_array();
        rpass.set_pipeline(&self.pipeline);
        for ((pose, binding), tex) in poses.iter().zip(&self.bindings).zip(textures) {
            if !pose.visible {
                continue;
            }
            let model: Mat4 = pose.quad().model_matrix();
            let u = SlideUniforms {
                model: model.to_cols_array_2d(),
                view_proj,
                camera_pos,
                size_encode: [pose.size.x, pose.size.y, tex.encode_flag(), GAMMA],
                uv_xform: tex.kind.uv_transform().to_array(),
                fog: [FOG_NEAR, FOG_FAR, 0.0, 0.0],
                fog_color: FOG_COLOR,
            };
            queue.write_buffer(&binding.uniform_buffer, 0, bytemuck::bytes_of(&u));
            rpass.set_bind_group(0, &binding.bind_group, &[]);
            rpass.draw(0..6, 0..1);
        }
    }

    pub(crate) fn destroy(&self) {
        for b in &self.bindings {
            b.uniform_buffer.destroy();
        }
    }
}
