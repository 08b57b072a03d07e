use winit::dpi::LogicalSize;

use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::coords::PixelRect;
use prism_engine::device::GpuInit;
use prism_engine::paint::Color;
use prism_engine::render::RegionFill;
use prism_engine::window::{Runtime, RuntimeConfig};
use prism_engine::StartupError;
use prism_geom::layout::{quadrants, Corner};

#[derive(Debug, Clone)]
pub struct QuadrantsConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub background: Color,
    pub top_left: Color,
    pub top_right: Color,
    pub bottom_left: Color,
    pub bottom_right: Color,
}

impl Default for QuadrantsConfig {
    fn default() -> Self {
        Self {
            title: "Quadrants".to_string(),
            initial_size: LogicalSize::new(500.0, 500.0),
            background: Color::rgb(0.1, 0.2, 0.3),
            top_left: Color::GREEN,
            top_right: Color::RED,
            bottom_left: Color::BLUE,
            bottom_right: Color::YELLOW,
        }
    }
}

impl QuadrantsConfig {
    fn color_for(&self, corner: Corner) -> Color {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomLeft => self.bottom_left,
            Corner::BottomRight => self.bottom_right,
        }
    }

    /// Colored quadrants of the square region for a `width x height` surface.
    pub fn regions(&self, width: u32, height: u32) -> Vec<(PixelRect, Color)> {
        quadrants(width, height)
            .iter()
            .map(|q| (q.rect, self.color_for(q.corner)))
            .collect()
    }
}

struct QuadrantsApp {
    config: QuadrantsConfig,
    fill: RegionFill,
    last_size: Option<(u32, u32)>,
}

impl App for QuadrantsApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.physical_size();
        if self.last_size != Some((w, h)) {
            log::debug!("quadrants: square region {}px", w.min(h));
            self.last_size = Some((w, h));
        }

        let regions = self.config.regions(w, h);
        let fill = &mut self.fill;
        ctx.render(self.config.background, |rctx, target| {
            fill.render(rctx, target, &regions);
        })
    }
}

pub fn run(config: QuadrantsConfig) -> Result<(), StartupError> {
    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: config.initial_size,
        resizable: true,
        ..Default::default()
    };

    let app = QuadrantsApp {
        config,
        fill: RegionFill::new(),
        last_size: None,
    };

    Runtime::run(runtime, GpuInit::default(), app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_follow_corner_colors() {
        let cfg = QuadrantsConfig::default();
        let regions = cfg.regions(400, 300);

        assert_eq!(regions.len(), 4);
        assert_eq!(regions[0], (PixelRect::new(0, 0, 150, 150), Color::GREEN));
        assert_eq!(regions[1], (PixelRect::new(150, 0, 150, 150), Color::RED));
        assert_eq!(regions[2], (PixelRect::new(0, 150, 150, 150), Color::BLUE));
        assert_eq!(regions[3], (PixelRect::new(150, 150, 150, 150), Color::YELLOW));
    }

    #[test]
    fn regions_track_resize() {
        let cfg = QuadrantsConfig::default();
        let small = cfg.regions(200, 800);
        let large = cfg.regions(900, 600);
        assert_eq!(small[3].0, PixelRect::new(100, 100, 100, 100));
        assert_eq!(large[3].0, PixelRect::new(300, 300, 300, 300));
    }
}
