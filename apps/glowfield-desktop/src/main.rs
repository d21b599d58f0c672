use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use clap::Parser;
use glowfield_camera::Camera;
use glowfield_game::{FrameClock, GameConfig, SceneAssets, Session};
use glowfield_input::{CursorTracker, InputState, movement_direction, quit_requested};
use glowfield_render::Renderer;
use glowfield_render_gl::{GlBackend, RenderWindow, WindowOptions, glow};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, WindowId};

/// Scroll lines reported per this many pixels of touchpad scrolling.
const PIXELS_PER_LINE: f32 = 20.0;

#[derive(Parser)]
#[command(name = "glowfield-desktop", about = "Collect glowing spheres in first person")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Seed for pickup placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of pickups kept in the field
    #[arg(long)]
    pickups: Option<usize>,

    /// Disable vertical sync
    #[arg(long)]
    no_vsync: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(pickups) = self.pickups {
            config.world.max_pickups = pickups;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_vsync {
            config.window.vsync = false;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Everything that lives on the GPU or advances per frame.
struct Game {
    renderer: Renderer<GlBackend>,
    assets: SceneAssets<GlBackend>,
    session: Session<GlBackend>,
    camera: Camera,
    input: InputState,
    cursor: CursorTracker,
    clock: FrameClock,
}

impl Game {
    fn new(gl: glow::Context, config: &GameConfig) -> Result<Self> {
        let gpu = Rc::new(GlBackend::new(gl));
        let renderer = Renderer::new(Rc::clone(&gpu)).context("building default shader")?;
        let assets = SceneAssets::load(&gpu, &config.world).context("loading scene assets")?;
        let session = Session::new(config, assets.pickup_model());
        Ok(Self {
            renderer,
            assets,
            session,
            camera: config.camera.build(),
            input: InputState::new(),
            cursor: CursorTracker::new(),
            clock: FrameClock::new(),
        })
    }

    fn frame(&mut self, window: &RenderWindow) {
        let dt = self.clock.tick();

        self.camera
            .process_keyboard(movement_direction(&self.input), dt);
        let (dx, dy) = self.cursor.delta(self.input.cursor_position());
        self.camera.process_mouse_movement(dx, dy, true);
        let scroll = self.input.take_scroll();
        if scroll != 0.0 {
            self.camera.process_mouse_scroll(scroll);
        }
        let bounded = self.session.bounds().clamp(self.camera.position());
        self.camera.set_position(bounded);

        self.session.update(dt, self.camera.position());

        let (width, height) = window.size();
        self.renderer.begin_frame(width, height);
        self.assets.draw(
            &mut self.renderer,
            &self.camera,
            window.aspect_ratio(),
            &self.session,
        );
        let stats = self.renderer.end_frame();
        tracing::trace!(dt, draws = stats.draw_calls, triangles = stats.triangles, "frame");
    }
}

struct App {
    config: GameConfig,
    // Declaration order is drop order: GPU resources go before the window.
    game: Option<Game>,
    window: Option<RenderWindow>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        Self {
            config,
            game: None,
            window: None,
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let options = WindowOptions {
            title: self.config.window.title.clone(),
            width: self.config.window.width,
            height: self.config.window.height,
            vsync: self.config.window.vsync,
        };
        let (window, gl) = RenderWindow::create(event_loop, &options)?;
        let game = Game::new(gl, &self.config)?;
        capture_cursor(&window);
        self.game = Some(game);
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

fn capture_cursor(window: &RenderWindow) {
    let window = window.window();
    if let Err(e) = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
    {
        tracing::warn!("cursor grab unavailable: {e}");
    }
    window.set_cursor_visible(false);
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let (Some(game), Some(window)) = (&mut self.game, &self.window) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                window.resize(size.width, size.height);
            }
            WindowEvent::Focused(focused) => {
                if focused {
                    capture_cursor(window);
                } else {
                    game.input.release_all();
                    game.cursor.reset();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                game.input.set_key(key, state == ElementState::Pressed);
                if quit_requested(&game.input) {
                    event_loop.exit();
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
                };
                game.input.add_scroll(lines);
            }
            WindowEvent::RedrawRequested => {
                game.frame(window);
                if let Err(e) = window.swap_buffers() {
                    tracing::error!("swap failed: {e}");
                }
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let (DeviceEvent::MouseMotion { delta }, Some(game)) = (event, &mut self.game) {
            game.input.add_cursor_motion(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.window().request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(game) = &self.game {
            tracing::info!("final {}", game.session.status());
        }
        // Release GPU resources while the context is still alive.
        self.game = None;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = cli.game_config()?;
    tracing::info!("glowfield-desktop starting");
    println!("Controls: WASD / arrows move, mouse looks, wheel zooms, Esc quits");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
