use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use glam::Vec3;
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorGrabMode, Window, WindowId},
};

use freelook::camera::Camera;
use freelook::cli::Cli;
use freelook::config::Settings;
use freelook::input::WinitInput;
use freelook::motion;
use freelook::renderer::TriangleRenderer;
use freelook::traits::ViewTarget;

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 0.5);

struct App {
    cli: Cli,
    settings: Settings,
    window: Option<Arc<Window>>,
    renderer: Option<TriangleRenderer>,
    camera: Camera,
    input: WinitInput,
    last_frame_time: Instant,
    frame_count: u32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli, settings: Settings) -> Self {
        let camera = Camera::new(INITIAL_CAMERA_POSITION, settings.signal_amplifier);
        Self {
            cli,
            settings,
            window: None,
            renderer: None,
            camera,
            input: WinitInput::new(),
            last_frame_time: Instant::now(),
            frame_count: 0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            debug!(
                "fps: {:.1}",
                self.frame_count as f32 / self.fps_update_timer
            );
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("freelook")
                .with_inner_size(winit::dpi::LogicalSize::new(self.cli.width, self.cli.height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        // Mouse-look needs an unbounded, hidden cursor. Not every platform
        // supports locking, so fall back to confining.
        if window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            .is_err()
        {
            warn!("cursor grab unavailable; look input may hit the window edge");
        }
        window.set_cursor_visible(false);

        let mut renderer = match pollster::block_on(TriangleRenderer::new(window.clone())) {
            Ok(r) => r,
            Err(e) => {
                error!("failed to initialize renderer: {e:#}");
                event_loop.exit();
                return;
            }
        };

        renderer.set_view_matrix(self.camera.view_matrix());

        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.input.process_key(&event);
                self.camera.move_direction = self.input.commanded_direction();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (dx, dy) = self.input.cursor_moved(position.x, position.y);
                self.camera.look(dx, dy);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta = now.duration_since(self.last_frame_time).as_secs_f32();
                self.last_frame_time = now;
                self.update_fps(delta);

                if self.input.exit_requested() {
                    event_loop.exit();
                    return;
                }

                if let Some(renderer) = &mut self.renderer {
                    motion::step(&mut self.camera, &self.input, &self.settings, renderer);

                    match renderer.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            if let Some(window) = &self.window {
                                renderer.resize(window.inner_size());
                            }
                        }
                        Err(e) => error!("render error: {e}"),
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(sensitivity) = cli.sensitivity {
        settings.signal_amplifier = sensitivity;
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, settings);

    info!("freelook - mouse to look, WASD to move, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
