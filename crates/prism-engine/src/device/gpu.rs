use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{self, SurfaceErrorAction};
use super::{DepthTarget, GpuInit};

/// One acquired swapchain image plus the encoder recording into it.
///
/// Hand it back to [`Gpu::submit`] promptly; the next frame cannot be acquired
/// while this one is alive.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Device, queue and configured surface for one window.
///
/// `'w` is the window borrow; the runtime keeps the window alive next to this
/// value (see `window::runtime`).
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    /// Physical pixels. May be 0x0 while minimized; `config` keeps the last
    /// non-zero size.
    size: PhysicalSize<u32>,
    depth: Option<DepthTarget>,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;

        let info = adapter.get_info();
        log::info!("gpu adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("prism device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let config = Self::surface_config(&surface.get_capabilities(&adapter), &init, size)?;
        surface.configure(&device, &config);

        log::debug!(
            "surface {:?} / {:?}, {}x{}, depth: {}",
            config.format,
            config.alpha_mode,
            size.width,
            size.height,
            init.depth
        );

        let depth = init
            .depth
            .then(|| DepthTarget::new(&device, size.width, size.height));

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            depth,
        })
    }

    fn surface_config(
        caps: &wgpu::SurfaceCapabilities,
        init: &GpuInit,
        size: PhysicalSize<u32>,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let format = surface::choose_surface_format(&caps.formats, init.prefer_srgb)
            .context("surface reports no supported formats")?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode: surface::choose_alpha_mode(&caps.alpha_modes, init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// `None` unless [`GpuInit::depth`] was set.
    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        self.depth.as_ref().map(DepthTarget::view)
    }

    /// Applies a new window size to the surface and depth target.
    ///
    /// A zero-sized window (minimized) is recorded but not configured.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        if let Some(depth) = self.depth.as_mut() {
            if depth.size() != (new_size.width, new_size.height) {
                *depth = DepthTarget::new(&self.device, new_size.width, new_size.height);
            }
        }
    }

    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("prism frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Decides how to recover from a failed acquire, reconfiguring the surface
    /// when that is the fix.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = surface::surface_error_action(&err);

        match action {
            SurfaceErrorAction::Reconfigured => {
                if self.size.width > 0 && self.size.height > 0 {
                    self.surface.configure(&self.device, &self.config);
                }
                log::debug!("surface reconfigured after {err:?}");
            }
            SurfaceErrorAction::SkipFrame => log::debug!("skipping frame: {err:?}"),
            SurfaceErrorAction::Fatal => log::error!("fatal surface error: {err:?}"),
        }

        action
    }
}
