use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by each exercise.
pub trait App {
    /// Called once per rendered frame.
    ///
    /// Input that arrived since the previous frame is in `ctx.input_frame.events`,
    /// in arrival order.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
