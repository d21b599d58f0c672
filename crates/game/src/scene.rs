use std::rc::Rc;

use glam::{Mat4, Vec3};
use glowfield_camera::Camera;
use glowfield_render::{DrawParams, GpuBackend, Model, RenderError, Renderer, ShaderProgram, shaders};

use crate::config::WorldConfig;
use crate::session::Session;

pub const GROUND_SHININESS: f32 = 32.0;
pub const PICKUP_SHININESS: f32 = 64.0;

/// GPU resources for one world: the ground, the shared pickup sphere and the
/// programs that shade them.
pub struct SceneAssets<B: GpuBackend> {
    ground: Model<B>,
    pickup: Rc<Model<B>>,
    ground_shader: ShaderProgram<B>,
    pickup_shader: ShaderProgram<B>,
    ground_offset: f32,
}

impl<B: GpuBackend> SceneAssets<B> {
    pub fn load(gpu: &Rc<B>, world: &WorldConfig) -> Result<Self, RenderError> {
        let ground = Model::plane(gpu, world.size)?;
        let pickup = Rc::new(Model::sphere(gpu, world.pickup_segments)?);
        let ground_shader =
            ShaderProgram::from_source(Rc::clone(gpu), shaders::LIT_VERTEX, shaders::GROUND_FRAGMENT)?;
        let pickup_shader =
            ShaderProgram::from_source(Rc::clone(gpu), shaders::LIT_VERTEX, shaders::PICKUP_FRAGMENT)?;
        tracing::debug!(
            ground_triangles = ground.triangle_count(),
            pickup_triangles = pickup.triangle_count(),
            "scene assets loaded"
        );
        Ok(Self {
            ground,
            pickup,
            ground_shader,
            pickup_shader,
            ground_offset: world.ground_offset,
        })
    }

    /// Geometry every pickup in a session shares.
    pub fn pickup_model(&self) -> Rc<Model<B>> {
        Rc::clone(&self.pickup)
    }

    /// Submit the ground and every live pickup seen from `camera`.
    pub fn draw(&self, renderer: &mut Renderer<B>, camera: &Camera, aspect: f32, session: &Session<B>) {
        renderer.set_view_matrix(camera.view_matrix());
        renderer.set_projection_matrix(camera.projection_matrix(aspect));
        renderer.set_view_position(camera.position());

        let ground = DrawParams {
            shininess: GROUND_SHININESS,
            time: session.elapsed(),
            ..DrawParams::default()
        };
        renderer.draw_model_with(
            &self.ground,
            &self.ground_shader,
            Mat4::from_translation(Vec3::Y * self.ground_offset),
            &ground,
        );

        let glow = DrawParams {
            shininess: PICKUP_SHININESS,
            time: session.elapsed(),
            ..DrawParams::default()
        };
        for pickup in session.pickups().iter().filter(|p| !p.is_collected()) {
            renderer.draw_model_with(pickup.model(), &self.pickup_shader, pickup.model_matrix(), &glow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glowfield_render::HeadlessBackend;
    use glowfield_render::headless::Command;

    #[test]
    fn draws_ground_then_each_pickup() {
        let gpu = Rc::new(HeadlessBackend::new());
        let config = GameConfig {
            seed: Some(11),
            ..GameConfig::default()
        };
        let assets = SceneAssets::load(&gpu, &config.world).unwrap();
        let session = Session::new(&config, assets.pickup_model());
        let mut renderer = Renderer::new(Rc::clone(&gpu)).unwrap();
        let camera = config.camera.build();

        gpu.take_commands();
        renderer.begin_frame(1280, 720);
        assets.draw(&mut renderer, &camera, 16.0 / 9.0, &session);
        let stats = renderer.end_frame();

        assert_eq!(gpu.draw_count(), 1 + config.world.max_pickups);
        assert_eq!(stats.draw_calls as usize, 1 + config.world.max_pickups);

        let draws: Vec<_> = gpu
            .commands()
            .into_iter()
            .filter_map(|c| match c {
                Command::DrawIndexed { program, index_count } => Some((program, index_count)),
                _ => None,
            })
            .collect();
        assert_eq!(draws[0], (assets.ground_shader.handle(), 6));
        assert!(draws[1..].iter().all(|d| d.0 == assets.pickup_shader.handle()));
    }

    #[test]
    fn dropping_everything_releases_gpu_handles() {
        let gpu = Rc::new(HeadlessBackend::new());
        let config = GameConfig::default();
        {
            let assets = SceneAssets::load(&gpu, &config.world).unwrap();
            let _session = Session::new(&config, assets.pickup_model());
            assert!(gpu.live_resources() > 0);
        }
        assert_eq!(gpu.live_resources(), 0);
        assert_eq!(gpu.invalid_releases(), 0);
    }
}
