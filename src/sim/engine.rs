//! Rigid-body engine
//!
//! Owns every body of a session. `update` integrates dynamic bodies by a
//! variable delta, then notifies collision-start listeners about pairs that
//! began touching during the step.

use std::fmt;

use glam::Vec2;

use super::body::{Body, BodyDesc, BodyHandle};
use super::collision::{CollisionEvent, PairTracker, overlapping_pairs};
use crate::consts::BASE_DELTA_MS;
use crate::error::SimError;

/// Callback invoked once per collision-start notification
pub type CollisionListener = Box<dyn FnMut(&CollisionEvent)>;

/// Bookkeeping about integration calls
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timing {
    /// Sum of all deltas passed to `update` (ms)
    pub timestamp: f64,
    pub update_count: u64,
    pub last_delta: Option<f32>,
}

pub struct Engine {
    /// Sorted by id for deterministic iteration
    bodies: Vec<Body>,
    next_id: u32,
    /// Acceleration per base step squared
    pub gravity: Vec2,
    timing: Timing,
    pairs: PairTracker,
    collision_start: Vec<CollisionListener>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("bodies", &self.bodies.len())
            .field("gravity", &self.gravity)
            .field("timing", &self.timing)
            .field("collision_listeners", &self.collision_start.len())
            .finish()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl Engine {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 1,
            gravity,
            timing: Timing::default(),
            pairs: PairTracker::default(),
            collision_start: Vec::new(),
        }
    }

    pub fn create_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let id = BodyHandle(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::from_desc(id, desc));
        id
    }

    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<Body, SimError> {
        let idx = self.index_of(handle)?;
        self.pairs.forget(handle);
        Ok(self.bodies.remove(idx))
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.index_of(handle).is_ok()
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&Body, SimError> {
        self.index_of(handle).map(|idx| &self.bodies[idx])
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) -> Result<(), SimError> {
        self.body_mut(handle)?.velocity = velocity;
        Ok(())
    }

    /// Shift a body by `delta` without touching its velocity
    pub fn translate(&mut self, handle: BodyHandle, delta: Vec2) -> Result<(), SimError> {
        self.body_mut(handle)?.position += delta;
        Ok(())
    }

    /// Teleport a body's center to `position`
    pub fn set_position(&mut self, handle: BodyHandle, position: Vec2) -> Result<(), SimError> {
        self.body_mut(handle)?.position = position;
        Ok(())
    }

    /// Advance the world by `delta` milliseconds
    pub fn update(&mut self, delta: f32) -> Result<(), SimError> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(SimError::InvalidDelta(delta));
        }

        self.timing.timestamp += delta as f64;
        self.timing.update_count += 1;
        self.timing.last_delta = Some(delta);

        let scale = delta / BASE_DELTA_MS;
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.velocity += self.gravity * scale;
            body.position += body.velocity * scale;
        }

        let started = self.pairs.advance(overlapping_pairs(&self.bodies));
        if !started.is_empty() {
            log::trace!("{} collision pair(s) started", started.len());
            let event = CollisionEvent { pairs: started };
            for listener in &mut self.collision_start {
                listener(&event);
            }
        }
        Ok(())
    }

    /// Subscribe to collision-start notifications
    pub fn on_collision_start(&mut self, listener: impl FnMut(&CollisionEvent) + 'static) {
        self.collision_start.push(Box::new(listener));
    }

    pub fn collision_listener_count(&self) -> usize {
        self.collision_start.len()
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    fn index_of(&self, handle: BodyHandle) -> Result<usize, SimError> {
        self.bodies
            .binary_search_by_key(&handle, |b| b.id)
            .map_err(|_| SimError::UnknownBody(handle))
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body, SimError> {
        let idx = self.index_of(handle)?;
        Ok(&mut self.bodies[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::CollisionPair;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn square(label: &str, x: f32, y: f32) -> BodyDesc {
        BodyDesc::rectangle(label, Vec2::new(x, y), Vec2::splat(10.0))
    }

    #[test]
    fn test_create_and_lookup() {
        let mut engine = Engine::default();
        let a = engine.create_body(square("a", 0.0, 0.0));
        let b = engine.create_body(square("b", 50.0, 0.0).fixed());
        assert_ne!(a, b);
        assert_eq!(engine.body(a).unwrap().label, "a");
        assert!(engine.body(b).unwrap().is_static);

        engine.remove_body(a).unwrap();
        assert_eq!(engine.body(a).unwrap_err(), SimError::UnknownBody(a));
        assert_eq!(engine.set_velocity(a, Vec2::X), Err(SimError::UnknownBody(a)));
        assert!(engine.contains(b));
    }

    #[test]
    fn test_integration_scales_with_delta() {
        let mut engine = Engine::default();
        let a = engine.create_body(square("a", 0.0, 0.0));
        engine.set_velocity(a, Vec2::new(2.0, 0.0)).unwrap();

        engine.update(BASE_DELTA_MS).unwrap();
        assert!((engine.body(a).unwrap().position.x - 2.0).abs() < 1e-4);

        engine.update(BASE_DELTA_MS * 2.0).unwrap();
        assert!((engine.body(a).unwrap().position.x - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_gravity_skips_static_bodies() {
        let mut engine = Engine::new(Vec2::new(0.0, 1.0));
        let falling = engine.create_body(square("falling", 0.0, 0.0));
        let wall = engine.create_body(square("wall", 100.0, 0.0).fixed());

        engine.update(BASE_DELTA_MS).unwrap();
        let body = engine.body(falling).unwrap();
        assert!((body.velocity.y - 1.0).abs() < 1e-4);
        assert!((body.position.y - 1.0).abs() < 1e-4);
        assert_eq!(engine.body(wall).unwrap().position, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_translate_and_set_position() {
        let mut engine = Engine::default();
        let a = engine.create_body(square("a", 10.0, 10.0).fixed());
        engine.translate(a, Vec2::new(-3.0, 0.0)).unwrap();
        assert_eq!(engine.body(a).unwrap().position, Vec2::new(7.0, 10.0));
        engine.set_position(a, Vec2::new(500.0, -20.0)).unwrap();
        assert_eq!(engine.body(a).unwrap().position, Vec2::new(500.0, -20.0));
    }

    #[test]
    fn test_rejects_bad_delta() {
        let mut engine = Engine::default();
        assert_eq!(engine.update(f32::NAN).unwrap_err().to_string(), "invalid frame delta: NaN ms");
        assert_eq!(engine.update(-1.0), Err(SimError::InvalidDelta(-1.0)));
        assert_eq!(engine.timing().update_count, 0);
    }

    #[test]
    fn test_timing_records_calls() {
        let mut engine = Engine::default();
        engine.update(16.0).unwrap();
        engine.update(20.0).unwrap();
        let timing = engine.timing();
        assert_eq!(timing.update_count, 2);
        assert_eq!(timing.last_delta, Some(20.0));
        assert!((timing.timestamp - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_collision_start_fires_once_per_contact() {
        let mut engine = Engine::default();
        let mover = engine.create_body(square("mover", 0.0, 0.0));
        let wall = engine.create_body(square("wall", 20.0, 0.0).fixed());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.on_collision_start(move |event| sink.borrow_mut().push(event.clone()));

        // Not touching yet
        engine.update(16.0).unwrap();
        assert!(seen.borrow().is_empty());

        // Move into the wall and stay there
        engine.translate(mover, Vec2::new(15.0, 0.0)).unwrap();
        engine.update(16.0).unwrap();
        engine.update(16.0).unwrap();

        let events = seen.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].pairs, vec![CollisionPair::new(mover, wall)]);
    }

    #[test]
    fn test_every_listener_is_notified() {
        let mut engine = Engine::default();
        engine.create_body(square("a", 0.0, 0.0));
        engine.create_body(square("b", 5.0, 0.0));

        let count = Rc::new(RefCell::new(0));
        for _ in 0..2 {
            let count = Rc::clone(&count);
            engine.on_collision_start(move |_| *count.borrow_mut() += 1);
        }
        engine.update(16.0).unwrap();
        assert_eq!(engine.collision_listener_count(), 2);
        assert_eq!(*count.borrow(), 2);
    }
}
