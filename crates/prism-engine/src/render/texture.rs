use std::path::Path;

use anyhow::Context;

/// Decoded RGBA8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Decodes a PNG or JPEG file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?
            .to_rgba8();

        let (width, height) = img.dimensions();
        log::debug!("loaded texture {} ({width}x{height})", path.display());

        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    /// Decodes like [`load`](Self::load), but first rejects an image wider or
    /// taller than `max_dimension` (the device's `max_texture_dimension_2d`).
    ///
    /// Only the header is read for the size check.
    pub fn load_within(path: impl AsRef<Path>, max_dimension: u32) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?;

        anyhow::ensure!(
            width <= max_dimension && height <= max_dimension,
            "texture {} is {width}x{height}, over the device limit of {max_dimension}",
            path.display()
        );

        Self::load(path)
    }

    /// 1x1 image of a single color.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    /// Whether both sides are non-zero and at most `max_dimension`.
    pub fn fits(&self, max_dimension: u32) -> bool {
        self.width > 0 && self.height > 0 && self.width <= max_dimension && self.height <= max_dimension
    }

    pub(super) fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }

    /// Creates a sampled texture and uploads the pixels.
    pub(super) fn upload(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::Texture {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("prism mesh texture"),
            size: self.extent(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            self.extent(),
        );

        texture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_is_one_pixel() {
        let t = TextureImage::solid([0, 0, 255, 255]);
        assert_eq!((t.width, t.height), (1, 1));
        assert_eq!(t.rgba, vec![0, 0, 255, 255]);
    }

    fn write_png(name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("prism-texture-{}-{name}.png", std::process::id()));
        image::RgbaImage::new(width, height).save(&path).unwrap();
        path
    }

    // ── loading ───────────────────────────────────────────────────────────

    #[test]
    fn missing_file_reports_path() {
        let err = TextureImage::load("does/not/exist.png").unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.png"));
    }

    #[test]
    fn load_within_accepts_image_at_limit() {
        let path = write_png("at-limit", 4, 2);
        let img = TextureImage::load_within(&path, 4).unwrap();
        assert_eq!((img.width, img.height), (4, 2));
        assert_eq!(img.rgba.len(), 4 * 2 * 4);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn load_within_rejects_oversized_image() {
        // Wider than wgpu's default max_texture_dimension_2d (8192).
        let path = write_png("oversized", 16384, 1);
        let limit = wgpu::Limits::default().max_texture_dimension_2d;
        let err = TextureImage::load_within(&path, limit).unwrap_err();
        assert!(format!("{err:#}").contains("16384x1"));
        std::fs::remove_file(path).ok();
    }

    // ── limits ────────────────────────────────────────────────────────────

    #[test]
    fn fits_checks_both_sides() {
        let img = TextureImage { width: 8, height: 2, rgba: vec![0; 8 * 2 * 4] };
        assert!(img.fits(8));
        assert!(!img.fits(7));
        assert!(!TextureImage { width: 0, height: 1, rgba: vec![] }.fits(8));
    }
}
