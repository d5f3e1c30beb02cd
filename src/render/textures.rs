use super::helpers;
use crate::core::MediaKind;
use crate::loader::{LoadedMedia, MediaSource};
use web_sys as web;

/// Images are stored sRGB so samples come back linear; video frames are
/// copied and read as-is.
pub(crate) fn media_format(kind: MediaKind) -> wgpu::TextureFormat {
    if kind.gamma_corrected() {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    }
}

/// One sampled slide texture. Video-backed textures keep their element and
/// are refreshed from it every frame.
pub(crate) struct MediaTexture {
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) kind: MediaKind,
    pub(crate) aspect: f32,
    video: Option<web::HtmlVideoElement>,
    size: wgpu::Extent3d,
}

impl MediaTexture {
    pub(crate) fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        media: &LoadedMedia,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: media.width.max(1),
            height: media.height.max(1),
            depth_or_array_layers: 1,
        };
        let (texture, view) = helpers::create_texture(
            device,
            label,
            size.width,
            size.height,
            media_format(media.kind),
            wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let mut tex = Self {
            texture,
            view,
            kind: media.kind,
            aspect: media.aspect(),
            video: media.video().cloned(),
            size,
        };
        match &media.source {
            MediaSource::Bitmap(bitmap) => tex.copy_external(
                queue,
                wgpu::ExternalImageSource::ImageBitmap(bitmap.clone()),
            ),
            MediaSource::Video(_) => tex.refresh(queue),
            MediaSource::Placeholder => tex.fill_placeholder(queue),
        }
        tex
    }

    fn copy_external(&self, queue: &wgpu::Queue, source: wgpu::ExternalImageSource) {
        queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source,
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            self.size,
        );
    }

    fn fill_placeholder(&self, queue: &wgpu::Queue) {
        let texel: [u8; 4] = [200, 200, 200, 255];
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &texel,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Copy the current video frame, if there is one.
    pub(crate) fn refresh(&self, queue: &wgpu::Queue) {
        let Some(video) = &self.video else { return };
        // HAVE_CURRENT_DATA and the frame size the texture was made for
        if video.ready_state() < 2
            || video.video_width() != self.size.width
            || video.video_height() != self.size.height
        {
            return;
        }
        self.copy_external(queue, wgpu::ExternalImageSource::HTMLVideoElement(video.clone()));
    }

    /// 1.0 when the shader must gamma-encode this texture's samples.
    pub(crate) fn encode_flag(&self) -> f32 {
        if self.kind.gamma_corrected() {
            1.0
        } else {
            0.0
        }
    }

    pub(crate) fn is_video(&self) -> bool {
        self.video.is_some()
    }

    pub(crate) fn destroy(&self) {
        self.texture.destroy();
    }
}
