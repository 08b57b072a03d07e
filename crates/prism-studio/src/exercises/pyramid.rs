use std::path::{Path, PathBuf};

use glam::Mat4;
use winit::dpi::LogicalSize;

use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::device::GpuInit;
use prism_engine::input::{InputEvent, MouseButtonState};
use prism_engine::paint::Color;
use prism_engine::render::{Line3d, LineRenderer3d, MeshRenderer, TextureImage};
use prism_engine::window::{Runtime, RuntimeConfig};
use prism_engine::StartupError;
use prism_geom::arcball::{DragLatch, RotationAccumulator, Zoom};
use prism_geom::{camera, mesh};

/// Shown when the texture image is missing or cannot be decoded.
const PLACEHOLDER_RGBA: [u8; 4] = [0, 0, 255, 255];

#[derive(Debug, Clone)]
pub struct PyramidConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub background: Color,
    /// Image for the pyramid faces. `None` draws the blue placeholder.
    pub texture_path: Option<PathBuf>,
    pub base_half: f32,
    pub height: f32,
    pub axis_length: f32,
    /// Degrees of rotation per pixel of drag.
    pub rotate_sensitivity: f32,
    pub zoom: Zoom,
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            title: "Textured Pyramid".to_string(),
            initial_size: LogicalSize::new(700.0, 700.0),
            background: Color::rgb(0.1, 0.15, 0.2),
            texture_path: None,
            base_half: 0.5,
            height: 1.0,
            axis_length: 1.8,
            rotate_sensitivity: 0.5,
            zoom: Zoom::default(),
        }
    }
}

/// Drag-to-rotate and wheel-to-zoom state.
#[derive(Debug, Clone)]
pub struct PyramidSession {
    rotation: RotationAccumulator,
    latch: DragLatch,
    zoom: Zoom,
}

impl PyramidSession {
    pub fn new(config: &PyramidConfig) -> Self {
        Self {
            rotation: RotationAccumulator::new(config.rotate_sensitivity),
            latch: DragLatch::default(),
            zoom: config.zoom,
        }
    }

    pub fn model(&self) -> Mat4 {
        self.rotation.orientation()
    }

    pub fn view(&self) -> Mat4 {
        camera::view_matrix(self.zoom.distance())
    }

    pub fn distance(&self) -> f32 {
        self.zoom.distance()
    }

    pub fn is_dragging(&self) -> bool {
        self.latch.is_dragging()
    }

    pub fn handle(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::PointerButton(b) => match b.state {
                MouseButtonState::Pressed => self.latch.press(b.x, b.y),
                MouseButtonState::Released => self.latch.release(),
            },
            InputEvent::PointerMoved(m) => {
                if let Some((dx, dy)) = self.latch.moved(m.x, m.y) {
                    self.rotation.apply_delta(dx, dy);
                }
            }
            InputEvent::PointerLeft | InputEvent::Focused(false) => self.latch.release(),
            InputEvent::MouseWheel { delta, .. } => {
                self.zoom.apply_wheel(delta.page_delta_y());
                log::trace!("camera distance {:.2}", self.zoom.distance());
            }
            _ => {}
        }
    }
}

/// Loads the texture, falling back to a 1x1 blue image when there is no path,
/// the file cannot be decoded, or either side exceeds `max_dimension`.
pub fn load_texture(path: Option<&Path>, max_dimension: u32) -> TextureImage {
    let Some(path) = path else {
        log::info!("no texture given; using placeholder texture");
        return TextureImage::solid(PLACEHOLDER_RGBA);
    };

    match TextureImage::load_within(path, max_dimension) {
        Ok(img) => img,
        Err(err) => {
            log::warn!("{err:#}; using placeholder texture");
            TextureImage::solid(PLACEHOLDER_RGBA)
        }
    }
}

struct PyramidApp {
    config: PyramidConfig,
    session: PyramidSession,

    mesh: MeshRenderer,
    lines: LineRenderer3d,
    axes: Vec<Line3d>,
}

impl App for PyramidApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        for ev in &ctx.input_frame.events {
            self.session.handle(ev);
        }

        let (w, h) = ctx.window.physical_size();
        let model = self.session.model();
        let view = self.session.view();
        let proj = camera::projection(w, h);

        let (mesh, lines, axes) = (&mut self.mesh, &mut self.lines, &self.axes);
        ctx.render(self.config.background, |rctx, target| {
            mesh.render(rctx, target, model, view, proj);
            // Axes rotate with the model.
            lines.render(rctx, target, axes, proj * (view * model));
        })
    }
}

pub fn run(config: PyramidConfig) -> Result<(), StartupError> {
    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: config.initial_size,
        resizable: false,
        ..Default::default()
    };

    let gpu_init = GpuInit::depth_tested();
    // The device is created with exactly these limits.
    let max_dimension = gpu_init.required_limits.max_texture_dimension_2d;

    let mut mesh_renderer = MeshRenderer::new();
    mesh_renderer.set_mesh(&mesh::square_pyramid(config.base_half, config.height));
    mesh_renderer.set_texture(load_texture(config.texture_path.as_deref(), max_dimension));

    let app = PyramidApp {
        session: PyramidSession::new(&config),
        axes: mesh::axes(config.axis_length).into_iter().map(Line3d::from).collect(),
        mesh: mesh_renderer,
        lines: LineRenderer3d::new(),
        config,
    };

    Runtime::run(runtime, gpu_init, app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use prism_engine::input::{
        Modifiers, MouseButton, MouseWheelDelta, PointerButtonEvent, PointerMoveEvent,
    };

    fn button(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
            modifiers: Modifiers::default(),
        })
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    fn wheel(delta: MouseWheelDelta) -> InputEvent {
        InputEvent::MouseWheel {
            delta,
            modifiers: Modifiers::default(),
        }
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn moves_without_press_do_not_rotate() {
        let mut s = PyramidSession::new(&PyramidConfig::default());
        s.handle(&moved(10.0, 10.0));
        s.handle(&moved(50.0, 20.0));
        assert_eq!(s.model(), Mat4::IDENTITY);
    }

    #[test]
    fn drag_rotates_by_half_degree_per_pixel() {
        let mut s = PyramidSession::new(&PyramidConfig::default());
        s.handle(&button(MouseButtonState::Pressed, 100.0, 100.0));
        s.handle(&moved(280.0, 100.0));

        let expected = Mat4::from_rotation_y(90f32.to_radians());
        assert!(s.model().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn pointer_leave_ends_drag() {
        let mut s = PyramidSession::new(&PyramidConfig::default());
        s.handle(&button(MouseButtonState::Pressed, 0.0, 0.0));
        assert!(s.is_dragging());
        s.handle(&InputEvent::PointerLeft);
        assert!(!s.is_dragging());

        let before = s.model();
        s.handle(&moved(40.0, 40.0));
        assert_eq!(s.model(), before);
    }

    // ── zoom ──────────────────────────────────────────────────────────────

    #[test]
    fn wheel_notch_moves_camera_one_unit() {
        let mut s = PyramidSession::new(&PyramidConfig::default());
        // winit reports scrolling toward the user as a negative line delta.
        s.handle(&wheel(MouseWheelDelta::Line { x: 0.0, y: -1.0 }));
        assert_relative_eq!(s.distance(), 6.0, epsilon = 1e-5);
    }

    #[test]
    fn zoom_does_not_touch_orientation() {
        let mut s = PyramidSession::new(&PyramidConfig::default());
        s.handle(&wheel(MouseWheelDelta::Pixel { x: 0.0, y: 10_000.0 }));
        assert_eq!(s.distance(), 1.5);
        assert_eq!(s.model(), Mat4::IDENTITY);
    }

    // ── texture ───────────────────────────────────────────────────────────

    fn write_png(name: &str, width: u32, height: u32) -> PathBuf {
        let path = std::env::temp_dir().join(format!("prism-pyramid-{}-{name}.png", std::process::id()));
        image::RgbaImage::from_pixel(width, height, image::Rgba([255, 128, 0, 255]))
            .save(&path)
            .unwrap();
        path
    }

    const LIMIT: u32 = 8192;

    #[test]
    fn missing_texture_falls_back_to_blue_pixel() {
        let img = load_texture(Some(Path::new("no/such/texture.jpg")), LIMIT);
        assert_eq!(img, TextureImage::solid(PLACEHOLDER_RGBA));
    }

    #[test]
    fn no_texture_path_uses_placeholder() {
        assert_eq!(load_texture(None, LIMIT), TextureImage::solid(PLACEHOLDER_RGBA));
    }

    #[test]
    fn oversized_texture_falls_back_to_blue_pixel() {
        let path = write_png("oversized", 16384, 1);
        let img = load_texture(Some(path.as_path()), LIMIT);
        std::fs::remove_file(&path).ok();
        assert_eq!(img, TextureImage::solid(PLACEHOLDER_RGBA));
    }

    #[test]
    fn texture_within_limit_is_kept() {
        let path = write_png("small", 2, 2);
        let img = load_texture(Some(path.as_path()), LIMIT);
        std::fs::remove_file(&path).ok();
        assert_eq!((img.width, img.height), (2, 2));
        assert_eq!(&img.rgba[..4], &[255, 128, 0, 255]);
    }

    #[test]
    fn default_device_limit_matches_checked_limit() {
        assert_eq!(GpuInit::depth_tested().required_limits.max_texture_dimension_2d, LIMIT);
    }
}
