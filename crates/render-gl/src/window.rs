use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("failed to create display: {0}")]
    Display(String),

    #[error("display did not create a window")]
    NoWindow,

    #[error("window handle unavailable: {0}")]
    Handle(#[from] raw_window_handle::HandleError),

    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::error::Error),
}

#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

/// A window together with its current OpenGL context and drawable surface.
pub struct RenderWindow {
    // Declaration order is drop order: surface and context go before the window.
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl RenderWindow {
    /// Open a window, create an OpenGL 3.3 core context with a depth buffer,
    /// make it current, and load the `glow` function table.
    pub fn create(
        event_loop: &ActiveEventLoop,
        options: &WindowOptions,
    ) -> Result<(Self, glow::Context), SurfaceError> {
        let attributes = Window::default_attributes()
            .with_title(options.title.clone())
            .with_inner_size(PhysicalSize::new(options.width, options.height));
        let template = ConfigTemplateBuilder::new().with_depth_size(24);

        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|e| SurfaceError::Display(e.to_string()))?;
        let window = window.ok_or(SurfaceError::NoWindow)?;
        let raw_handle = window.window_handle()?.as_raw();
        let display = config.display();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_handle));
        // SAFETY: the raw handle belongs to `window`, which outlives the context.
        let not_current = unsafe { display.create_context(&config, &context_attributes)? };

        let size = window.inner_size();
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_handle,
            non_zero(size.width),
            non_zero(size.height),
        );
        // SAFETY: as above, the window outlives the surface.
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes)? };
        let context = not_current.make_current(&surface)?;

        if options.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
                tracing::warn!("vsync unavailable: {e}");
            }
        }

        // SAFETY: the context was just made current on this thread.
        let gl = unsafe { glow::Context::from_loader_function_cstr(|symbol| display.get_proc_address(symbol)) };

        tracing::info!(
            width = size.width,
            height = size.height,
            samples = config.num_samples(),
            "OpenGL context created"
        );

        Ok((
            Self {
                surface,
                context,
                window,
            },
            gl,
        ))
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Drawable size in pixels, never zero.
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width.max(1), size.height.max(1))
    }

    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.size();
        width as f32 / height as f32
    }

    /// Resize the drawable; zero sizes (minimized windows) are ignored.
    pub fn resize(&self, width: u32, height: u32) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(&self.context, width, height);
        }
    }

    pub fn swap_buffers(&self) -> Result<(), SurfaceError> {
        self.surface.swap_buffers(&self.context)?;
        Ok(())
    }
}

/// The config with the most multisample samples.
///
/// glutin-winit requires the picker to return a config, so an empty list (a
/// display without any OpenGL config that has a depth buffer) aborts here.
/// This is the only panic path outside tests.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .max_by_key(|config| config.num_samples())
        .expect("display offered no OpenGL configs")
}

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}
