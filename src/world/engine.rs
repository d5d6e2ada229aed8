use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use super::bounds::Bounds;
use super::renderer::{NullRenderer, Renderer};
use crate::config::{BodyOptions, EngineConfig, SceneConfig};
use crate::constraints::{Constraint, Spring};
use crate::error::Result;
use crate::forces;
use crate::math::vec2::Vec2;
use crate::objects::body::Body;
use crate::shapes::ShapeKind;

/// Frame rate used by `start` when the caller passes a non-positive one.
pub const DEFAULT_FPS: f64 = 60.0;

/// Owns every body and advances them together.
///
/// The engine does not schedule itself: the host calls [`Engine::update`]
/// once per frame, and `start`/`stop` only record whether it intends to.
/// After each step the injected renderer receives the state of every body.
pub struct Engine<R: Renderer = NullRenderer> {
    bodies: Vec<Body>,
    constraints: Vec<Box<dyn Constraint + Send>>,
    gravity: Vec2,
    bounds: Bounds,
    default_dt: f64,
    max_dt: f64,
    running: bool,
    fps: f64,
    last_time: Option<Instant>,
    renderer: R,
}

impl Engine<NullRenderer> {
    /// Default engine that renders nowhere.
    pub fn headless() -> Self {
        Self::with_renderer(NullRenderer)
    }
}

impl Default for Engine<NullRenderer> {
    fn default() -> Self {
        Self::headless()
    }
}

impl<R: Renderer> Engine<R> {
    pub fn new(config: EngineConfig, renderer: R) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config, renderer))
    }

    /// Engine with the default gravity, bounds and timing.
    pub fn with_renderer(renderer: R) -> Self {
        Self::from_valid_config(EngineConfig::default(), renderer)
    }

    /// Builds an engine from a scene: every body is created and every
    /// spring registered as a constraint.
    pub fn from_scene(scene: &SceneConfig, renderer: R) -> Result<Self> {
        let mut engine = Self::new(scene.engine.clone(), renderer)?;
        for spec in &scene.bodies {
            engine.create_body(spec.id.clone(), spec.kind, spec.position, &spec.options)?;
        }
        for spec in &scene.springs {
            if engine.body(&spec.body_a).is_none() || engine.body(&spec.body_b).is_none() {
                warn!(a = %spec.body_a, b = %spec.body_b, "scene spring skipped");
                continue;
            }
            engine.register_constraint(Box::new(spec.to_spring()));
        }
        debug!(
            bodies = engine.bodies.len(),
            constraints = engine.constraints.len(),
            "loaded scene"
        );
        Ok(engine)
    }

    fn from_valid_config(config: EngineConfig, renderer: R) -> Self {
        Self {
            bodies: Vec::new(),
            constraints: Vec::new(),
            gravity: config.gravity,
            bounds: config.bounds,
            default_dt: config.default_dt,
            max_dt: config.max_dt,
            running: false,
            fps: DEFAULT_FPS,
            last_time: None,
            renderer,
        }
    }

    // Registry

    /// Creates and registers a body. An existing body with the same id is
    /// replaced.
    pub fn create_body(
        &mut self,
        id: impl Into<String>,
        kind: ShapeKind,
        position: Vec2,
        options: &BodyOptions,
    ) -> Result<&mut Body> {
        let mut body = Body::new(id, options.mass, options.shape_for(kind), position)
            .with_velocity(options.velocity)
            .with_material(options.material());
        body.set_fixed(options.fixed);
        self.add_body(body)
    }

    /// Registers a pre-built body after validating it.
    pub fn add_body(&mut self, body: Body) -> Result<&mut Body> {
        if let Err(err) = body.validate() {
            warn!(id = %body.id, %err, "rejected body");
            return Err(err);
        }

        let index = match self.index_of(&body.id) {
            Some(index) => {
                debug!(id = %body.id, "replacing body");
                self.bodies[index] = body;
                index
            }
            None => {
                debug!(id = %body.id, kind = %body.shape.kind(), "created body");
                self.bodies.push(body);
                self.bodies.len() - 1
            }
        };
        Ok(&mut self.bodies[index])
    }

    /// Removes and returns the body with `id`. Unknown ids are ignored.
    pub fn remove_body(&mut self, id: &str) -> Option<Body> {
        let index = self.index_of(id)?;
        debug!(id, "removed body");
        Some(self.bodies.swap_remove(index))
    }

    pub fn body(&self, id: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: &str) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    // Stepping

    /// Advances the simulation by one step and pushes the result to the
    /// renderer.
    ///
    /// With `None` the step length is the wall-clock time since the
    /// previous call, capped at `max_dt` (`default_dt` on the first call).
    /// Non-positive or non-finite steps are skipped.
    pub fn update(&mut self, dt: Option<f64>) {
        let now = Instant::now();
        let dt = self.resolve_dt(dt, now);
        self.last_time = Some(now);

        if !(dt.is_finite() && dt > 0.0) {
            warn!(dt, "skipping step with invalid dt");
            return;
        }
        self.step(dt);
    }

    fn resolve_dt(&self, dt: Option<f64>, now: Instant) -> f64 {
        match (dt, self.last_time) {
            (Some(dt), _) => dt,
            (None, None) => self.default_dt,
            (None, Some(last)) => now
                .saturating_duration_since(last)
                .as_secs_f64()
                .min(self.max_dt),
        }
    }

    fn step(&mut self, dt: f64) {
        // 1. Collision flags describe this step only
        for body in self.bodies.iter_mut() {
            body.in_collision = false;
        }

        // 2. Gravity
        let gravity = self.gravity;
        for body in self.bodies.iter_mut().filter(|b| !b.fixed) {
            let weight = gravity * body.mass;
            body.apply_force(weight);
        }

        // 3. Registered constraints
        for constraint in &self.constraints {
            constraint.apply(&mut self.bodies);
        }

        // 4. Integrate motion
        for body in self.bodies.iter_mut() {
            body.integrate(dt);
        }

        // 5. Keep bodies inside the world
        let bounds = self.bounds;
        for body in self.bodies.iter_mut() {
            if bounds.clamp_body(body) {
                trace!(id = %body.id, position = ?body.position, "bounced off bounds");
            }
        }

        // 6. Pairwise collisions
        let contacts = self.resolve_contacts();

        // 7. Publish
        self.render();

        trace!(dt, bodies = self.bodies.len(), contacts, "stepped");
    }

    /// Tests every unordered pair once, resolving and flagging the ones that
    /// overlap. Flags are OR-accumulated so a body touching several others
    /// stays flagged. Returns the number of contacts.
    fn resolve_contacts(&mut self) -> usize {
        let mut contacts = 0;
        let count = self.bodies.len();
        for i in 0..count {
            for j in (i + 1)..count {
                // split_at_mut gives disjoint borrows of bodies i < j
                let (head, tail) = self.bodies.split_at_mut(j);
                let body_a = &mut head[i];
                let body_b = &mut tail[0];

                if body_a.check_collision(body_b) {
                    body_a.resolve_collision(body_b);
                    body_a.in_collision = true;
                    body_b.in_collision = true;
                    contacts += 1;
                }
            }
        }
        contacts
    }

    fn render(&mut self) {
        for body in &self.bodies {
            self.renderer
                .apply_body_state(&body.id, body.position, body.in_collision);
        }
        for constraint in &self.constraints {
            let (id_a, id_b) = constraint.bodies();
            let position_a = self.bodies.iter().find(|b| b.id == id_a).map(|b| b.position);
            let position_b = self.bodies.iter().find(|b| b.id == id_b).map(|b| b.position);
            if let (Some(position_a), Some(position_b)) = (position_a, position_b) {
                self.renderer
                    .apply_constraint_state(id_a, id_b, position_a, position_b);
            }
        }
    }

    // Lifecycle

    /// Marks the engine as running at `fps` frames per second. Does nothing
    /// if it is already running.
    pub fn start(&mut self, fps: f64) {
        if self.running {
            return;
        }
        self.fps = if fps.is_finite() && fps > 0.0 {
            fps
        } else {
            warn!(fps, fallback = DEFAULT_FPS, "invalid frame rate");
            DEFAULT_FPS
        };
        self.running = true;
        self.last_time = Some(Instant::now());
        debug!(fps = self.fps, "engine started");
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        debug!("engine stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// How often the host should call `update`, or `None` while stopped or
    /// when the rate is too slow to express as a `Duration`.
    pub fn frame_interval(&self) -> Option<Duration> {
        if !self.running {
            return None;
        }
        Duration::try_from_secs_f64(1.0 / self.fps).ok()
    }

    // Field forces

    /// Radial push away from `center` with linear falloff to zero at
    /// `radius`. Returns the number of bodies affected.
    pub fn apply_explosion_force(&mut self, center: Vec2, magnitude: f64, radius: f64) -> usize {
        let affected = forces::apply_explosion(&mut self.bodies, center, magnitude, radius);
        debug!(?center, magnitude, radius, affected, "explosion");
        affected
    }

    pub fn apply_wind_force(&mut self, direction: Vec2, strength: f64) {
        forces::apply_wind(&mut self.bodies, direction, strength);
        trace!(?direction, strength, "wind");
    }

    /// Inverse-square pull toward `point`, skipping bodies closer than
    /// `min_distance`. Returns the number of bodies affected.
    pub fn apply_attraction_force(&mut self, point: Vec2, strength: f64, min_distance: f64) -> usize {
        let affected = forces::apply_attraction(&mut self.bodies, point, strength, min_distance);
        trace!(?point, strength, affected, "attraction");
        affected
    }

    // Springs and constraints

    /// Builds a spring between two existing bodies. Returns `None` if either
    /// body is unknown. The spring is not evaluated until it is passed to
    /// [`Engine::apply_spring`] or registered.
    pub fn create_spring(
        &self,
        body_a: &str,
        body_b: &str,
        stiffness: f64,
        rest_length: f64,
        damping: f64,
    ) -> Option<Spring> {
        if self.body(body_a).is_none() || self.body(body_b).is_none() {
            warn!(a = body_a, b = body_b, "spring references unknown body");
            return None;
        }
        Some(Spring::new(body_a, body_b, stiffness, rest_length, damping))
    }

    /// Evaluates a spring once, accumulating its forces for the next step.
    pub fn apply_spring(&mut self, spring: &Spring) {
        spring.apply(&mut self.bodies);
    }

    /// Adds a constraint that is evaluated on every update.
    pub fn register_constraint(&mut self, constraint: Box<dyn Constraint + Send>) {
        let (a, b) = constraint.bodies();
        debug!(a, b, "registered constraint");
        self.constraints.push(constraint);
    }

    pub fn clear_constraints(&mut self) {
        self.constraints.clear();
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    // Accessors

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    const EPSILON: f64 = 1e-9;

    fn still() -> BodyOptions {
        BodyOptions::default().with_material(0.8, 0.0)
    }

    fn zero_gravity() -> Engine {
        let config = EngineConfig {
            gravity: Vec2::ZERO,
            ..EngineConfig::default()
        };
        Engine::new(config, NullRenderer).unwrap()
    }

    #[test]
    fn test_engine_new() {
        let engine = Engine::headless();
        assert_eq!(engine.body_count(), 0);
        assert_eq!(engine.constraint_count(), 0);
        assert_eq!(engine.gravity(), Vec2::new(0.0, 9.8));
        assert_eq!(engine.bounds(), Bounds::new(0.0, 0.0, 800.0, 600.0));
        assert!(!engine.is_running());
        assert!(engine.frame_interval().is_none());
    }

    #[test]
    fn test_engine_new_rejects_bad_config() {
        let config = EngineConfig {
            default_dt: -1.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::new(config, NullRenderer),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_create_body_applies_options() {
        let mut engine = Engine::headless();
        let options = BodyOptions::default()
            .with_mass(2.0)
            .with_size(10.0, 20.0)
            .with_velocity(Vec2::new(1.0, 0.0))
            .fixed();
        let body = engine
            .create_body("box", ShapeKind::Rectangle, Vec2::new(5.0, 6.0), &options)
            .unwrap();

        assert_eq!(body.id, "box");
        assert_eq!(body.mass, 2.0);
        assert_eq!(body.position, Vec2::new(5.0, 6.0));
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
        assert!(body.fixed);
        assert_eq!(body.shape.kind(), ShapeKind::Rectangle);
    }

    #[test]
    fn test_create_body_replaces_same_id() {
        let mut engine = Engine::headless();
        engine
            .create_body("a", ShapeKind::Circle, Vec2::new(1.0, 1.0), &BodyOptions::default())
            .unwrap();
        engine
            .create_body("a", ShapeKind::Circle, Vec2::new(50.0, 50.0), &BodyOptions::default())
            .unwrap();

        assert_eq!(engine.body_count(), 1);
        assert_eq!(engine.body("a").unwrap().position, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_create_body_validation() {
        let mut engine = Engine::headless();
        let bad_mass = BodyOptions::default().with_mass(0.0);
        let bad_radius = BodyOptions::default().with_radius(-5.0);

        assert!(matches!(
            engine.create_body("m", ShapeKind::Circle, Vec2::ZERO, &bad_mass),
            Err(EngineError::InvalidBodyConfiguration { id, .. }) if id == "m"
        ));
        assert!(engine
            .create_body("r", ShapeKind::Circle, Vec2::ZERO, &bad_radius)
            .is_err());
        assert_eq!(engine.body_count(), 0);
    }

    #[test]
    fn test_remove_body() {
        let mut engine = Engine::headless();
        for id in ["a", "b", "c"] {
            engine
                .create_body(id, ShapeKind::Circle, Vec2::ZERO, &BodyOptions::default())
                .unwrap();
        }

        let removed = engine.remove_body("a").unwrap();
        assert_eq!(removed.id, "a");
        assert!(engine.remove_body("a").is_none());
        assert!(engine.body("a").is_none());
        assert!(engine.body("b").is_some());
        assert!(engine.body("c").is_some());
        assert_eq!(engine.body_count(), 2);
    }

    #[test]
    fn test_resolve_dt() {
        let mut engine = Engine::headless();
        let now = Instant::now();

        // First call without a previous frame
        assert!((engine.resolve_dt(None, now) - 1.0 / 60.0).abs() < EPSILON);
        // Explicit dt wins
        assert_eq!(engine.resolve_dt(Some(0.25), now), 0.25);

        engine.last_time = Some(now);
        let later = now + Duration::from_millis(10);
        assert!((engine.resolve_dt(None, later) - 0.01).abs() < 1e-6);
        // Long pauses are capped
        let much_later = now + Duration::from_secs(2);
        assert!((engine.resolve_dt(None, much_later) - 1.0 / 30.0).abs() < EPSILON);
    }

    #[test]
    fn test_update_invalid_dt_is_skipped() {
        let mut engine = Engine::headless();
        engine
            .create_body("a", ShapeKind::Circle, Vec2::new(100.0, 100.0), &BodyOptions::default())
            .unwrap();

        engine.update(Some(0.0));
        engine.update(Some(-1.0));
        engine.update(Some(f64::NAN));

        let body = engine.body("a").unwrap();
        assert_eq!(body.position, Vec2::new(100.0, 100.0));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert!(engine.last_time.is_some());
    }

    #[test]
    fn test_update_gravity_step() {
        let config = EngineConfig {
            gravity: Vec2::new(0.0, 98.0),
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(config, NullRenderer).unwrap();
        engine
            .create_body("ball", ShapeKind::Circle, Vec2::new(100.0, 100.0), &still())
            .unwrap();

        engine.update(Some(0.1));

        let ball = engine.body("ball").unwrap();
        assert!(ball.velocity.x.abs() < EPSILON);
        assert!((ball.velocity.y - 9.8).abs() < EPSILON);
        assert!((ball.position.y - 100.98).abs() < EPSILON);
        assert!(!ball.in_collision);
    }

    #[test]
    fn test_update_collision_flags_reset_each_step() {
        let mut engine = zero_gravity();
        engine
            .create_body("a", ShapeKind::Circle, Vec2::new(100.0, 100.0), &still().with_velocity(Vec2::new(10.0, 0.0)))
            .unwrap();
        engine
            .create_body("b", ShapeKind::Circle, Vec2::new(135.0, 100.0), &still())
            .unwrap();

        engine.update(Some(0.01));
        assert!(engine.body("a").unwrap().in_collision);
        assert!(engine.body("b").unwrap().in_collision);

        // Move them far apart and step again
        engine.body_mut("b").unwrap().position = Vec2::new(500.0, 100.0);
        engine.update(Some(0.01));
        assert!(!engine.body("a").unwrap().in_collision);
        assert!(!engine.body("b").unwrap().in_collision);
    }

    #[test]
    fn test_collision_between_fixed_bodies_is_flagged_not_moved() {
        let mut engine = zero_gravity();
        engine
            .create_body("a", ShapeKind::Rectangle, Vec2::new(100.0, 100.0), &BodyOptions::default().fixed())
            .unwrap();
        engine
            .create_body("b", ShapeKind::Rectangle, Vec2::new(120.0, 100.0), &BodyOptions::default().fixed())
            .unwrap();

        engine.update(Some(0.1));

        assert!(engine.body("a").unwrap().in_collision);
        assert_eq!(engine.body("a").unwrap().position, Vec2::new(100.0, 100.0));
        assert_eq!(engine.body("b").unwrap().position, Vec2::new(120.0, 100.0));
    }

    #[test]
    fn test_start_stop() {
        let mut engine = Engine::headless();

        engine.start(30.0);
        assert!(engine.is_running());
        assert_eq!(engine.fps(), 30.0);
        let interval = engine.frame_interval().unwrap();
        assert!((interval.as_secs_f64() - 1.0 / 30.0).abs() < 1e-6);

        // Starting again keeps the first rate
        engine.start(120.0);
        assert_eq!(engine.fps(), 30.0);

        engine.stop();
        assert!(!engine.is_running());
        engine.stop();
        assert!(!engine.is_running());

        engine.start(0.0);
        assert_eq!(engine.fps(), DEFAULT_FPS);
    }

    #[test]
    fn test_frame_interval_for_tiny_fps() {
        let mut engine = Engine::headless();
        engine.start(1e-30);
        assert!(engine.is_running());
        assert!(engine.frame_interval().is_none());
    }

    #[test]
    fn test_from_scene_skips_dangling_springs() {
        let scene = SceneConfig::from_json_str(
            r#"{
                "engine": { "gravity": { "x": 0.0, "y": 0.0 } },
                "bodies": [
                    { "id": "a", "kind": "circle", "position": { "x": 0.0, "y": 300.0 } },
                    { "id": "b", "kind": "circle", "position": { "x": 200.0, "y": 300.0 } }
                ],
                "springs": [
                    { "body_a": "a", "body_b": "b", "stiffness": 0.5, "rest_length": 100.0, "damping": 0.0 },
                    { "body_a": "a", "body_b": "ghost" }
                ]
            }"#,
        )
        .unwrap();

        let engine = Engine::from_scene(&scene, NullRenderer).unwrap();
        assert_eq!(engine.constraint_count(), 1);
    }

    #[test]
    fn test_create_spring_requires_bodies() {
        let mut engine = Engine::headless();
        engine
            .create_body("a", ShapeKind::Circle, Vec2::ZERO, &BodyOptions::default())
            .unwrap();

        assert!(engine.create_spring("a", "ghost", 0.5, 100.0, 0.1).is_none());

        engine
            .create_body("b", ShapeKind::Circle, Vec2::new(200.0, 0.0), &BodyOptions::default())
            .unwrap();
        let spring = engine.create_spring("a", "b", 0.5, 100.0, 0.0).unwrap();

        engine.apply_spring(&spring);
        assert!((engine.body("a").unwrap().forces.x - 50.0).abs() < EPSILON);
        assert!((engine.body("b").unwrap().forces.x - -50.0).abs() < EPSILON);
    }

    #[test]
    fn test_registered_constraints() {
        let mut engine = Engine::headless();
        engine
            .create_body("a", ShapeKind::Circle, Vec2::new(100.0, 300.0), &BodyOptions::default())
            .unwrap();
        engine
            .create_body("b", ShapeKind::Circle, Vec2::new(300.0, 300.0), &BodyOptions::default())
            .unwrap();

        engine.register_constraint(Box::new(Spring::with_defaults("a", "b")));
        assert_eq!(engine.constraint_count(), 1);

        engine.clear_constraints();
        assert_eq!(engine.constraint_count(), 0);
    }

    #[test]
    fn test_field_forces_delegate() {
        let mut engine = zero_gravity();
        engine
            .create_body("near", ShapeKind::Circle, Vec2::new(110.0, 100.0), &BodyOptions::default())
            .unwrap();
        engine
            .create_body("far", ShapeKind::Circle, Vec2::new(400.0, 100.0), &BodyOptions::default())
            .unwrap();

        assert_eq!(engine.apply_explosion_force(Vec2::new(100.0, 100.0), 100.0, 50.0), 1);
        assert!((engine.body("near").unwrap().forces.x - 80.0).abs() < EPSILON);

        engine.apply_wind_force(Vec2::new(0.0, 1.0), 0.5);
        assert!((engine.body("far").unwrap().forces.y - 20.0).abs() < EPSILON);

        assert_eq!(
            engine.apply_attraction_force(Vec2::new(400.0, 105.0), 10.0, forces::DEFAULT_ATTRACTION_MIN_DISTANCE),
            1
        );
    }
}
