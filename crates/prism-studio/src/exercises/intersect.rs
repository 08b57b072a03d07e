use glam::DVec2;
use winit::dpi::LogicalSize;

use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::device::GpuInit;
use prism_engine::input::{InputEvent, MouseButton, MouseButtonState};
use prism_engine::paint::Color;
use prism_engine::render::PrimitiveRenderer;
use prism_engine::scene::DrawList;
use prism_engine::window::{Runtime, RuntimeConfig};
use prism_engine::StartupError;
use prism_geom::intersect::{Circle, IntersectionSet, Segment};
use prism_geom::mesh::{circle_outline, CIRCLE_SEGMENTS};
use prism_geom::sketch::{ReleaseOutcome, SketchSession};

const SLOT_CIRCLE: u8 = 1;
const SLOT_LINE: u8 = 2;
const SLOT_HITS: u8 = 3;

#[derive(Debug, Clone)]
pub struct IntersectConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub background: Color,
    pub circle_color: Color,
    pub line_color: Color,
    pub point_color: Color,
    pub point_size_px: f32,
    pub axis_length: f64,
}

impl Default for IntersectConfig {
    fn default() -> Self {
        Self {
            title: "Circle / Line Intersection".to_string(),
            initial_size: LogicalSize::new(700.0, 700.0),
            background: Color::rgb(0.1, 0.2, 0.3),
            circle_color: Color::rgb(0.0, 0.6, 1.0),
            line_color: Color::RED,
            point_color: Color::YELLOW,
            point_size_px: 10.0,
            axis_length: 0.85,
        }
    }
}

pub fn circle_status(c: &Circle) -> String {
    format!(
        "Circle: center=({:.2}, {:.2}), r={:.2}",
        c.center.x, c.center.y, c.radius
    )
}

pub fn segment_status(s: &Segment) -> String {
    format!(
        "Line: ({:.2}, {:.2}) ~ ({:.2}, {:.2})",
        s.start.x, s.start.y, s.end.x, s.end.y
    )
}

/// Status slot updates produced by a release.
pub fn status_updates(outcome: &ReleaseOutcome) -> Vec<(u8, String)> {
    match outcome {
        ReleaseOutcome::CircleCommitted(c) => vec![(SLOT_CIRCLE, circle_status(c))],
        ReleaseOutcome::SegmentCommitted { segment, intersections } => vec![
            (SLOT_LINE, segment_status(segment)),
            (SLOT_HITS, intersections.describe()),
        ],
        ReleaseOutcome::Ignored | ReleaseOutcome::Skipped => Vec::new(),
    }
}

/// Routes pointer input into the sketch session.
///
/// Positions arrive in window pixels and are mapped to NDC by `to_ndc`
/// before they reach the session.
pub fn handle_event<F>(session: &mut SketchSession, ev: &InputEvent, to_ndc: F) -> Option<ReleaseOutcome>
where
    F: Fn(f32, f32) -> Option<DVec2>,
{
    match ev {
        InputEvent::PointerButton(b) if b.button == MouseButton::Left => match b.state {
            MouseButtonState::Pressed => {
                if let Some(p) = to_ndc(b.x, b.y) {
                    session.press(p);
                }
                None
            }
            MouseButtonState::Released => {
                // The release position is the final drag position.
                if let Some(p) = to_ndc(b.x, b.y) {
                    session.drag(p);
                }
                Some(session.release())
            }
        },
        InputEvent::PointerMoved(m) => {
            if session.is_dragging() {
                if let Some(p) = to_ndc(m.x, m.y) {
                    session.drag(p);
                }
            }
            None
        }
        InputEvent::PointerLeft | InputEvent::Focused(false) => {
            if session.is_dragging() {
                log::debug!("sketch drag abandoned");
                session.cancel();
            }
            None
        }
        _ => None,
    }
}

/// Draw order: circle, segment, intersection points, axes.
pub fn build_scene(session: &SketchSession, config: &IntersectConfig, list: &mut DrawList) {
    if let Some(circle) = session.visible_circle() {
        list.push_line_strip(circle_outline(&circle, CIRCLE_SEGMENTS), config.circle_color);
    }

    if let Some(segment) = session.visible_segment() {
        list.push_segment(segment.start, segment.end, config.line_color);
    }

    let hits: &IntersectionSet = session.intersections();
    if !hits.is_empty() {
        list.push_points(hits.points(), config.point_size_px, config.point_color);
    }

    let len = config.axis_length;
    list.push_segment(DVec2::new(-len, 0.0), DVec2::new(len, 0.0), Color::RED);
    list.push_segment(DVec2::new(0.0, -len), DVec2::new(0.0, len), Color::GREEN);
}

struct IntersectApp {
    config: IntersectConfig,
    session: SketchSession,
    announced: bool,

    list: DrawList,
    prims: PrimitiveRenderer,
}

impl App for IntersectApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if !self.announced {
            ctx.overlay.set(SLOT_CIRCLE, "No circle");
            ctx.overlay.set(SLOT_LINE, "Draw a line after circle");
            ctx.overlay.set(SLOT_HITS, "Intersection info");
            self.announced = true;
        }

        let window = &ctx.window;
        for ev in &ctx.input_frame.events {
            let Some(outcome) = handle_event(&mut self.session, ev, |x, y| window.pointer_to_ndc(x, y))
            else {
                continue;
            };
            for (slot, text) in status_updates(&outcome) {
                ctx.overlay.set(slot, text);
            }
        }

        self.list.clear();
        build_scene(&self.session, &self.config, &mut self.list);

        let (list, prims) = (&self.list, &mut self.prims);
        ctx.render(self.config.background, |rctx, target| {
            prims.render(rctx, target, list);
        })
    }
}

pub fn run(config: IntersectConfig) -> Result<(), StartupError> {
    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: config.initial_size,
        resizable: false,
        ..Default::default()
    };

    let app = IntersectApp {
        config,
        session: SketchSession::new(),
        announced: false,
        list: DrawList::new(),
        prims: PrimitiveRenderer::new(),
    };

    Runtime::run(runtime, GpuInit::default(), app)
}
