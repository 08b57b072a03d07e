/// Surface and device options chosen at startup.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format if the surface offers one.
    ///
    /// With `false` a linear format is picked, so colors written by shaders
    /// reach the display unconverted.
    pub prefer_srgb: bool,

    pub present_mode: wgpu::PresentMode,

    /// Falls back to the first supported mode if unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint only.
    pub desired_maximum_frame_latency: u32,

    /// Allocate a depth attachment that follows the surface size.
    pub depth: bool,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            depth: false,
        }
    }
}

impl GpuInit {
    /// Defaults plus a depth attachment and a linear surface, for 3D scenes.
    pub fn depth_tested() -> Self {
        Self {
            prefer_srgb: false,
            depth: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_2d() {
        let init = GpuInit::default();
        assert!(!init.depth);
        assert!(init.prefer_srgb);
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
    }

    #[test]
    fn depth_tested_preset() {
        let init = GpuInit::depth_tested();
        assert!(init.depth);
        assert!(!init.prefer_srgb);
        assert_eq!(init.desired_maximum_frame_latency, 2);
    }
}
