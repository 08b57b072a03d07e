use anyhow::Context;
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, StatusOverlay, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::error::StartupError;
use crate::input::platform::translate_window_event;
use crate::input::{InputEvent, InputFrame, InputState, Key, KeyState};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
    /// Close the window when Escape is pressed.
    pub exit_on_escape: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            initial_size: LogicalSize::new(700.0, 700.0),
            resizable: true,
            exit_on_escape: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until the window closes.
    ///
    /// Blocks the calling thread. Returns the first startup failure, if any.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<(), StartupError>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new()
            .context("failed to create winit EventLoop")
            .map_err(StartupError::Init)?;

        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")
            .map_err(StartupError::Init)?;

        match state.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    overlay: StatusOverlay,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    startup_error: Option<StartupError>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            startup_error: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry, StartupError> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")
            .map_err(StartupError::Init)?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            overlay: StatusOverlay::new(self.config.title.clone()),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .map_err(StartupError::SurfaceUnavailable)
    }

    fn draw_frame(&mut self, window_id: WindowId) -> AppControl {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return AppControl::Continue;
        };

        entry.with_mut(|fields| {
            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: window_id,
                        window: fields.window,
                    },
                    gpu: &mut *fields.gpu,
                    input: &*fields.input_state,
                    input_frame: &*fields.input_frame,
                    overlay: &mut *fields.overlay,
                };

                app.on_frame(&mut ctx)
            };

            if let Some(title) = fields.overlay.take_changed() {
                fields.window.set_title(&title);
            }

            // Clear per-frame deltas after the frame is consumed.
            fields.input_frame.clear();

            control
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(err) => {
                log::error!("{err}");
                self.startup_error = Some(err);
                self.request_exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let exit_on_escape = self.config.exit_on_escape;
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let mut escape = false;
        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, &*fields.input_state, &event) {
                escape = matches!(
                    ev,
                    InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, .. }
                );
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        if escape && exit_on_escape {
            log::debug!("escape pressed; closing");
            self.entry = None;
            self.request_exit(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                if self.draw_frame(window_id) == AppControl::Exit {
                    self.entry = None;
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }
}
