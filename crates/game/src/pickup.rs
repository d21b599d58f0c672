use std::f32::consts::TAU;
use std::fmt;
use std::rc::Rc;

use glam::{Mat4, Vec3};
use glowfield_render::{GpuBackend, Model};

/// Degrees per second.
pub const ROTATION_SPEED: f32 = 45.0;
/// Radians per second.
pub const BOB_SPEED: f32 = 2.0;
pub const BOB_HEIGHT: f32 = 0.1;

/// A collectible sphere: shared geometry plus its own placement and animation.
pub struct Pickup<B: GpuBackend> {
    model: Rc<Model<B>>,
    position: Vec3,
    scale: Vec3,
    /// Degrees around +Y.
    rotation: f32,
    bob_phase: f32,
    collected: bool,
    bounding_radius: f32,
}

impl<B: GpuBackend> Pickup<B> {
    pub fn new(model: Rc<Model<B>>, position: Vec3, scale: Vec3) -> Self {
        Self {
            model,
            position,
            scale,
            rotation: 0.0,
            bob_phase: 0.0,
            collected: false,
            bounding_radius: 0.5 * scale.max_element(),
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees.rem_euclid(360.0);
        self
    }

    pub fn with_bob_phase(mut self, phase: f32) -> Self {
        self.bob_phase = phase.rem_euclid(TAU);
        self
    }

    /// Spin and bob; collected pickups stay frozen.
    pub fn update(&mut self, dt: f32) {
        if self.collected {
            return;
        }
        self.rotation = (self.rotation + ROTATION_SPEED * dt).rem_euclid(360.0);
        self.bob_phase = (self.bob_phase + BOB_SPEED * dt).rem_euclid(TAU);
    }

    /// Whether `point` is close enough to collect this pickup.
    pub fn is_within_reach(&self, point: Vec3, reach: f32) -> bool {
        !self.collected && point.distance(self.position) < reach + self.bounding_radius
    }

    pub fn collect(&mut self) {
        self.collected = true;
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn model(&self) -> &Rc<Model<B>> {
        &self.model
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    /// Render offset of the bob animation along +Y.
    pub fn bob_offset(&self) -> f32 {
        self.bob_phase.sin() * BOB_HEIGHT
    }

    /// Translate (with bob) * rotate about Y * scale.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position + Vec3::Y * self.bob_offset())
            * Mat4::from_rotation_y(self.rotation.to_radians())
            * Mat4::from_scale(self.scale)
    }
}

impl<B: GpuBackend> fmt::Debug for Pickup<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pickup")
            .field("position", &self.position)
            .field("scale", &self.scale)
            .field("rotation", &self.rotation)
            .field("collected", &self.collected)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowfield_render::HeadlessBackend;

    fn sphere() -> Rc<Model<HeadlessBackend>> {
        let gpu = Rc::new(HeadlessBackend::new());
        Rc::new(Model::sphere(&gpu, 8).unwrap())
    }

    #[test]
    fn bounding_radius_follows_largest_scale() {
        let pickup = Pickup::new(sphere(), Vec3::ZERO, Vec3::new(0.2, 0.6, 0.4));
        assert!((pickup.bounding_radius() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn reach_threshold_adds_bounding_radius() {
        let model = sphere();
        let camera = Vec3::ZERO;
        let near = Pickup::new(Rc::clone(&model), Vec3::new(0.5, 0.0, 0.0), Vec3::splat(0.6));
        let far = Pickup::new(model, Vec3::new(0.0, 0.0, -2.0), Vec3::splat(0.6));
        assert!(near.is_within_reach(camera, 0.8));
        assert!(!far.is_within_reach(camera, 0.8));
    }

    #[test]
    fn collected_pickup_is_out_of_reach_and_frozen() {
        let mut pickup = Pickup::new(sphere(), Vec3::ZERO, Vec3::splat(0.3)).with_rotation(10.0);
        pickup.collect();
        assert!(!pickup.is_within_reach(Vec3::ZERO, 0.8));
        pickup.update(1.0);
        assert_eq!(pickup.rotation(), 10.0);
    }

    #[test]
    fn rotation_and_bob_wrap() {
        let mut pickup = Pickup::new(sphere(), Vec3::ZERO, Vec3::ONE).with_rotation(350.0);
        pickup.update(0.5);
        assert!((pickup.rotation() - 12.5).abs() < 1e-4);
        for _ in 0..100 {
            pickup.update(0.1);
            assert!((0.0..360.0).contains(&pickup.rotation()));
            assert!(pickup.bob_offset().abs() <= BOB_HEIGHT);
        }
    }

    #[test]
    fn model_matrix_places_bobbed_center() {
        let position = Vec3::new(3.0, 0.5, -1.0);
        let pickup = Pickup::new(sphere(), position, Vec3::splat(0.35))
            .with_rotation(90.0)
            .with_bob_phase(std::f32::consts::FRAC_PI_2);
        let center = pickup.model_matrix().transform_point3(Vec3::ZERO);
        assert!((center - (position + Vec3::Y * BOB_HEIGHT)).length() < 1e-5);
        // Local +X turns to -Z after a quarter turn about Y, then scales.
        let edge = pickup.model_matrix().transform_vector3(Vec3::X);
        assert!((edge - Vec3::new(0.0, 0.0, -0.35)).length() < 1e-5);
    }
}
