use crate::constants::CLEAR_COLOR;
use crate::core::{CurlParams, SceneState};
use crate::loader::LoadedMedia;
use web_sys as web;

pub(crate) mod curl;
mod helpers;
mod ripple;
mod slides;
mod targets;
mod textures;

use curl::CurlPass;
use ripple::RipplePass;
use slides::SlidePass;
use targets::DepthTarget;
use textures::MediaTexture;

/// Canvas surface plus the device it was configured with.
pub struct SurfaceContext {
    surface: wgpu::Surface<'static>,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl SurfaceContext {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        // Image textures are gamma-encoded in the shaders, so write to a linear view
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied) {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {:?} {}x{} alpha {:?}", format, width, height, alpha_mode);
        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure for a new backing size. Returns true when the size changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if width == self.config.width && height == self.config.height {
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        true
    }

    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Next swapchain image. A lost or outdated surface is reconfigured and
    /// the frame skipped.
    fn acquire(&self) -> Option<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(frame) => Some(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                None
            }
            Err(e) => {
                log::warn!("[gpu] surface error: {:?}", e);
                None
            }
        }
    }
}

/// GPU side of the carousel stage: one texture per slide, the carousel
/// quad pass, and the full-screen ripple pass.
pub struct StageRenderer {
    ctx: SurfaceContext,
    depth: DepthTarget,
    sampler: wgpu::Sampler,
    textures: Vec<MediaTexture>,
    slides: SlidePass,
    ripple: RipplePass,
}

impl StageRenderer {
    pub async fn new(canvas: &web::HtmlCanvasElement, media: &[LoadedMedia]) -> anyhow::Result<Self> {
        let ctx = SurfaceContext::new(canvas).await?;
        let (width, height) = ctx.size();
        let depth = DepthTarget::new(&ctx.device, width, height);
        let sampler = helpers::create_linear_sampler(&ctx.device, "media_sampler");
        let textures: Vec<MediaTexture> = media
            .iter()
            .enumerate()
            .map(|(i, m)| MediaTexture::upload(&ctx.device, &ctx.queue, &format!("slide_tex_{i}"), m))
            .collect();
        let slides = SlidePass::new(&ctx.device, ctx.format(), &sampler, &textures);
        let ripple = RipplePass::new(&ctx.device, ctx.format());
        log::info!(
            "[gpu] stage ready with {} textures ({} video)",
            textures.len(),
            textures.iter().filter(|t| t.is_video()).count()
        );
        Ok(Self {
            ctx,
            depth,
            sampler,
            textures,
            slides,
            ripple,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.depth.recreate(&self.ctx.device, width, height);
        }
    }

    pub fn render(&mut self, scene: &SceneState) {
        for tex in &self.textures {
            tex.refresh(&self.ctx.queue);
        }
        let Some(frame) = self.ctx.acquire() else {
            return;
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("stage_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("stage_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if scene.is_fullscreen() {
                self.ripple.draw(
                    &self.ctx.device,
                    &self.ctx.queue,
                    &mut rpass,
                    &self.sampler,
                    scene.camera(),
                    &scene.ripple_frame(),
                    scene.fullscreen_size(),
                    &self.textures,
                );
            } else {
                self.slides.draw(
                    &self.ctx.queue,
                    &mut rpass,
                    scene.camera(),
                    scene.poses(),
                    &self.textures,
                );
            }
        }
        self.ctx.queue.submit(Some(encoder.finish()));
        frame.present();
    }

    pub fn destroy(&self) {
        self.slides.destroy();
        self.ripple.destroy();
        for tex in &self.textures {
            tex.destroy();
        }
        self.depth.destroy();
    }
}

/// GPU side of the detail page: a single curled media plane.
pub struct CurlRenderer {
    ctx: SurfaceContext,
    texture: MediaTexture,
    pass: CurlPass,
}

impl CurlRenderer {
    pub async fn new(canvas: &web::HtmlCanvasElement, media: &LoadedMedia) -> anyhow::Result<Self> {
        let ctx = SurfaceContext::new(canvas).await?;
        let sampler = helpers::create_linear_sampler(&ctx.device, "detail_sampler");
        let texture = MediaTexture::upload(&ctx.device, &ctx.queue, "detail_tex", media);
        let pass = CurlPass::new(&ctx.device, ctx.format(), &sampler, &texture);
        Ok(Self { ctx, texture, pass })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
    }

    pub fn render(&mut self, params: &CurlParams) {
        self.texture.refresh(&self.ctx.queue);
        let Some(frame) = self.ctx.acquire() else {
            return;
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("detail_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("detail_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.pass.draw(&self.ctx.queue, &mut rpass, params);
        }
        self.ctx.queue.submit(Some(encoder.finish()));
        frame.present();
    }

    pub fn destroy(&self) {
        self.pass.destroy();
        self.texture.destroy();
    }
}
