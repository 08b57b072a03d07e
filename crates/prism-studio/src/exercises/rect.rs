use glam::DVec2;
use winit::dpi::LogicalSize;

use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::device::GpuInit;
use prism_engine::input::Key;
use prism_engine::paint::Color;
use prism_engine::render::PrimitiveRenderer;
use prism_engine::scene::DrawList;
use prism_engine::window::{Runtime, RuntimeConfig};
use prism_engine::StartupError;
use prism_geom::rect::{Direction, RectController};

const HINT: &str = "Use arrow keys to move the rectangle";

#[derive(Debug, Clone)]
pub struct RectConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub background: Color,
    pub color: Color,
    pub half_extent: f64,
    pub step: f64,
}

impl Default for RectConfig {
    fn default() -> Self {
        Self {
            title: "Move Rectangle".to_string(),
            initial_size: LogicalSize::new(600.0, 600.0),
            background: Color::BLACK,
            color: Color::RED,
            half_extent: 0.1,
            step: 0.01,
        }
    }
}

fn direction_for(key: Key) -> Option<Direction> {
    match key {
        Key::ArrowUp => Some(Direction::Up),
        Key::ArrowDown => Some(Direction::Down),
        Key::ArrowLeft => Some(Direction::Left),
        Key::ArrowRight => Some(Direction::Right),
        _ => None,
    }
}

/// Rectangle position driven by arrow-key presses.
///
/// Key repeats count as presses, so holding a key keeps moving.
#[derive(Debug, Clone)]
pub struct RectSession {
    ctrl: RectController,
}

impl RectSession {
    pub fn new(config: &RectConfig) -> Self {
        Self {
            ctrl: RectController::new(config.half_extent, config.step),
        }
    }

    pub fn controller(&self) -> &RectController {
        &self.ctrl
    }

    /// Applies one key press. Returns `true` if the rectangle moved.
    pub fn press_key(&mut self, key: Key) -> bool {
        direction_for(key).is_some_and(|dir| self.ctrl.step(dir))
    }

    pub fn draw(&self, list: &mut DrawList, color: Color) {
        let (l, b, r, t) = self.ctrl.bounds();
        list.push_rect(DVec2::new(l, b), DVec2::new(r, t), color);
    }
}

struct RectApp {
    config: RectConfig,
    session: RectSession,
    announced: bool,

    list: DrawList,
    prims: PrimitiveRenderer,
}

impl App for RectApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if !self.announced {
            ctx.overlay.set(1, HINT);
            self.announced = true;
        }

        for key in ctx.input_frame.key_presses() {
            self.session.press_key(key);
        }

        self.list.clear();
        self.session.draw(&mut self.list, self.config.color);

        let (list, prims) = (&self.list, &mut self.prims);
        ctx.render(self.config.background, |rctx, target| {
            prims.render(rctx, target, list);
        })
    }
}

impl RectConfig {
    /// Fixed-size window; a non-square surface would stretch the NDC square.
    fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: self.initial_size,
            resizable: false,
            ..Default::default()
        }
    }
}

pub fn run(config: RectConfig) -> Result<(), StartupError> {
    let runtime = config.runtime();

    let app = RectApp {
        session: RectSession::new(&config),
        config,
        announced: false,
        list: DrawList::new(),
        prims: PrimitiveRenderer::new(),
    };

    Runtime::run(runtime, GpuInit::default(), app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_engine::input::{InputEvent, InputFrame, KeyState, Modifiers};

    fn key_event(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            code: 0,
            repeat,
        }
    }

    #[test]
    fn arrow_press_moves_one_step() {
        let mut s = RectSession::new(&RectConfig::default());
        assert!(s.press_key(Key::ArrowRight));
        let (x, y) = s.controller().offset();
        approx::assert_abs_diff_eq!(x, 0.01, epsilon = 1e-12);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn repeats_keep_moving() {
        let mut frame = InputFrame::default();
        frame.push_event(key_event(Key::ArrowUp, KeyState::Pressed, false));
        for _ in 0..4 {
            frame.push_event(key_event(Key::ArrowUp, KeyState::Pressed, true));
        }
        frame.push_event(key_event(Key::ArrowUp, KeyState::Released, false));

        let mut s = RectSession::new(&RectConfig::default());
        for key in frame.key_presses() {
            s.press_key(key);
        }
        approx::assert_abs_diff_eq!(s.controller().offset().1, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut s = RectSession::new(&RectConfig::default());
        assert!(!s.press_key(Key::Space));
        assert!(!s.press_key(Key::Enter));
        assert_eq!(s.controller().offset(), (0.0, 0.0));
    }

    #[test]
    fn window_is_fixed_square() {
        let runtime = RectConfig::default().runtime();
        assert!(!runtime.resizable);
        assert_eq!(runtime.initial_size.width, runtime.initial_size.height);
    }

    #[test]
    fn draws_one_rect_at_bounds() {
        let s = RectSession::new(&RectConfig::default());
        let mut list = DrawList::new();
        s.draw(&mut list, Color::RED);
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].point_count(), 4);
        assert_eq!(list.items()[0].color(), Color::RED);
    }
}
