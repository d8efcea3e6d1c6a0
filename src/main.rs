//! Native viewer binary: winit event loop driving the engine.

use std::{process, sync::Arc, time::Instant};

use plume::engine::App;
use plume::options::Options;
use plume::page::PageLayout;
use winit::{
    application::ApplicationHandler,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

// Wheel line deltas arrive in abstract lines; scale to document pixels.
const LINE_HEIGHT: f32 = 40.0;

struct RenderApp {
    window: Option<Arc<Window>>,
    app: Option<App>,
    last_frame_time: Instant,
    options: Options,
    layout: PageLayout,
}

impl RenderApp {
    fn new(options: Options, layout: PageLayout) -> Self {
        Self {
            window: None,
            app: None,
            last_frame_time: Instant::now(),
            options,
            layout,
        }
    }
}

impl ApplicationHandler for RenderApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = Window::default_attributes().with_title("Plume");
            let window = match event_loop.create_window(attrs) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    log::error!("window creation failed: {e}");
                    event_loop.exit();
                    return;
                }
            };

            let size = window.inner_size();
            let app = pollster::block_on(App::new(
                window.clone(),
                (size.width.max(1), size.height.max(1)),
                self.options.clone(),
                self.layout.clone(),
            ));
            let app = match app {
                Ok(app) => app,
                Err(e) => {
                    log::error!("startup failed: {e}");
                    event_loop.exit();
                    process::exit(1);
                }
            };

            self.last_frame_time = Instant::now();
            window.request_redraw();
            self.window = Some(window);
            self.app = Some(app);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(app) = &mut self.app {
                    app.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(app)) =
                    (&self.window, &mut self.app)
                {
                    let now = Instant::now();
                    let dt =
                        now.duration_since(self.last_frame_time).as_secs_f32();
                    self.last_frame_time = now;

                    app.update(dt, now);
                    match app.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            let inner = window.inner_size();
                            app.resize(inner.width, inner.height);
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                    // Continuous animation: always schedule the next frame.
                    window.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(app) = &mut self.app {
                    app.handle_pointer_move(
                        position.x as f32,
                        position.y as f32,
                        Instant::now(),
                    );
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(app) = &mut self.app {
                    app.handle_pointer_left(Instant::now());
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(app) = &mut self.app {
                    let pixels = match delta {
                        MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
                        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                    };
                    app.handle_scroll_delta(pixels, Instant::now());
                }
            }

            _ => (),
        }
    }
}

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(std::path::Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load options from {path}: {e}");
                process::exit(1);
            }
        },
        None => Options::default(),
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("event loop creation failed: {e}");
            process::exit(1);
        }
    };

    let mut render_app = RenderApp::new(options, PageLayout::default());
    if let Err(e) = event_loop.run_app(&mut render_app) {
        log::error!("event loop error: {e}");
        process::exit(1);
    }
}
