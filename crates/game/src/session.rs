use std::f32::consts::TAU;
use std::fmt;
use std::rc::Rc;

use glam::Vec3;
use glowfield_render::{GpuBackend, Model};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{GameConfig, WorldConfig};
use crate::pickup::Pickup;

/// Periodic console summary of a running session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub score: u32,
    pub collected: u32,
    /// Seconds of game time.
    pub elapsed: f32,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {} | Collected: {} | Time: {}s",
            self.score, self.collected, self.elapsed as u32
        )
    }
}

/// What happened during one [`Session::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutcome {
    pub collected: u32,
    pub report: Option<StatusReport>,
}

/// Square play area centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub half_extent: f32,
}

impl WorldBounds {
    pub fn new(size: f32) -> Self {
        Self {
            half_extent: size / 2.0,
        }
    }

    /// Keep `position` over the ground on X and Z; height is untouched.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        let h = self.half_extent;
        Vec3::new(position.x.clamp(-h, h), position.y, position.z.clamp(-h, h))
    }
}

/// Pickup field state: live pickups, score, and game time.
///
/// The field is kept full: every collected pickup is replaced at a random
/// spot in the same update.
pub struct Session<B: GpuBackend> {
    world: WorldConfig,
    report_interval: f32,
    pickup_model: Rc<Model<B>>,
    pickups: Vec<Pickup<B>>,
    rng: StdRng,
    score: u32,
    collected: u32,
    elapsed: f32,
    last_report: f32,
}

impl<B: GpuBackend> Session<B> {
    pub fn new(config: &GameConfig, pickup_model: Rc<Model<B>>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut session = Self {
            world: config.world.clone(),
            report_interval: config.report_interval,
            pickup_model,
            pickups: Vec::with_capacity(config.world.max_pickups),
            rng,
            score: 0,
            collected: 0,
            elapsed: 0.0,
            last_report: 0.0,
        };
        for _ in 0..session.world.max_pickups {
            session.spawn_pickup();
        }
        tracing::debug!(pickups = session.pickups.len(), seed = ?config.seed, "session started");
        session
    }

    /// Advance game time, animate pickups, collect those within reach of
    /// `player`, refill the field and emit a status report when one is due.
    pub fn update(&mut self, dt: f32, player: Vec3) -> FrameOutcome {
        self.elapsed += dt;

        for pickup in &mut self.pickups {
            pickup.update(dt);
        }

        let collected = self.collect_within_reach(player);
        if collected > 0 {
            self.pickups.retain(|p| !p.is_collected());
            for _ in 0..collected {
                self.spawn_pickup();
            }
        }

        FrameOutcome {
            collected,
            report: self.poll_report(),
        }
    }

    pub fn pickups(&self) -> &[Pickup<B>] {
        &self.pickups
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.world.size)
    }

    pub fn status(&self) -> StatusReport {
        StatusReport {
            score: self.score,
            collected: self.collected,
            elapsed: self.elapsed,
        }
    }

    fn collect_within_reach(&mut self, player: Vec3) -> u32 {
        let mut count = 0;
        for pickup in &mut self.pickups {
            if pickup.is_within_reach(player, self.world.collision_radius) {
                pickup.collect();
                self.score += self.world.points_per_pickup;
                self.collected += 1;
                count += 1;
                tracing::info!(score = self.score, total = self.collected, "collected pickup");
            }
        }
        count
    }

    fn poll_report(&mut self) -> Option<StatusReport> {
        if self.elapsed - self.last_report < self.report_interval {
            return None;
        }
        self.last_report = self.elapsed;
        let report = self.status();
        tracing::info!("{report}");
        Some(report)
    }

    fn spawn_pickup(&mut self) {
        let spread = (self.world.size * 0.4).max(f32::EPSILON);
        let rng = &mut self.rng;
        let position = Vec3::new(
            rng.gen_range(-spread..spread),
            0.5 + rng.gen_range(-spread..spread) * 0.1,
            rng.gen_range(-spread..spread),
        );
        let scale = 0.3 + (rng.r#gen::<u32>() % 100) as f32 / 1000.0;
        let pickup = Pickup::new(Rc::clone(&self.pickup_model), position, Vec3::splat(scale))
            .with_rotation(rng.gen_range(0.0..360.0))
            .with_bob_phase(rng.gen_range(0.0..TAU));
        self.pickups.push(pickup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowfield_render::HeadlessBackend;

    fn session(seed: u64, max_pickups: usize) -> Session<HeadlessBackend> {
        let gpu = Rc::new(HeadlessBackend::new());
        let model = Rc::new(Model::sphere(&gpu, 8).unwrap());
        let mut config = GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        };
        config.world.max_pickups = max_pickups;
        Session::new(&config, model)
    }

    const FAR_AWAY: Vec3 = Vec3::new(500.0, 500.0, 500.0);

    #[test]
    fn spawns_inside_field() {
        let session = session(1, 15);
        assert_eq!(session.pickups().len(), 15);
        for pickup in session.pickups() {
            let p = pickup.position();
            assert!(p.x.abs() <= 8.0 && p.z.abs() <= 8.0);
            assert!((p.y - 0.5).abs() <= 0.8 + 1e-6);
            let s = pickup.scale();
            assert!((0.3..0.4).contains(&s.x) && s.x == s.y && s.y == s.z);
            assert!(Rc::ptr_eq(pickup.model(), &session.pickup_model));
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = session(42, 5);
        let b = session(42, 5);
        let positions = |s: &Session<HeadlessBackend>| s.pickups().iter().map(|p| p.position()).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn collects_near_pickup_but_not_far_one() {
        let mut session = session(3, 1);
        let model = Rc::clone(&session.pickup_model);
        session.pickups = vec![
            Pickup::new(Rc::clone(&model), Vec3::new(0.5, 0.0, 0.0), Vec3::splat(0.6)),
            Pickup::new(model, Vec3::new(0.0, 0.0, 2.0), Vec3::splat(0.6)),
        ];

        let outcome = session.update(0.0, Vec3::ZERO);
        assert_eq!(outcome.collected, 1);
        assert_eq!(session.score(), 10);
        assert_eq!(session.collected(), 1);
        // The far pickup survives; the collected one is replaced.
        assert_eq!(session.pickups().len(), 2);
        assert_eq!(session.pickups()[0].position(), Vec3::new(0.0, 0.0, 2.0));
        assert!(session.pickups().iter().all(|p| !p.is_collected()));
    }

    #[test]
    fn field_stays_full_while_sweeping() {
        let mut session = session(9, 15);
        let mut total = 0;
        for step in 0..400 {
            let t = step as f32 * 0.05;
            let player = Vec3::new((t * 0.7).sin() * 8.0, 0.5, (t * 0.3).cos() * 8.0);
            total += session.update(0.05, player).collected;
            assert_eq!(session.pickups().len(), 15);
        }
        assert_eq!(session.collected(), total);
        assert_eq!(session.score(), total * 10);
    }

    #[test]
    fn reports_once_per_interval() {
        let mut session = session(5, 3);
        let mut reports = Vec::new();
        for _ in 0..25 {
            if let Some(report) = session.update(0.5, FAR_AWAY).report {
                reports.push(report);
            }
        }
        let times: Vec<f32> = reports.iter().map(|r| r.elapsed).collect();
        assert_eq!(times, vec![5.0, 10.0]);
        assert_eq!(reports[0].to_string(), "Score: 0 | Collected: 0 | Time: 5s");
    }

    #[test]
    fn bounds_clamp_horizontal_only() {
        let bounds = WorldBounds::new(20.0);
        assert_eq!(
            bounds.clamp(Vec3::new(12.0, 7.0, -30.0)),
            Vec3::new(10.0, 7.0, -10.0)
        );
        assert_eq!(bounds.clamp(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
    }
}
