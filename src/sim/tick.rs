//! Per-frame update
//!
//! Called once per rendered frame by the host loop. Order matters:
//! input, integration, obstacles (score, recycle, scroll), then the
//! one-time collision listener.

use glam::Vec2;

use super::events::{Dispatch, EventQueue, GameEvent};
use super::pipes::ObstacleGenerator;
use super::state::Entities;
use crate::error::SimError;
use crate::tuning::Tuning;

/// Kind of a touch reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    Start,
    Move,
    End,
    Press,
    LongPress,
}

/// One touch reported by the host. Only the kind matters to the update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Touch {
    pub kind: TouchKind,
}

impl Touch {
    pub fn press() -> Self {
        Self {
            kind: TouchKind::Press,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Milliseconds since the previous frame
    pub delta: f32,
}

/// Everything the host hands to one frame update
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub touches: &'a [Touch],
    pub time: FrameTime,
    pub dispatch: &'a EventQueue,
}

/// The frame update system: tuning plus the obstacle generator
#[derive(Debug, Clone)]
pub struct PhysicsSystem<G> {
    pub tuning: Tuning,
    pub generator: G,
}

impl<G: ObstacleGenerator> PhysicsSystem<G> {
    pub fn new(tuning: Tuning, generator: G) -> Self {
        Self { tuning, generator }
    }

    /// Advance `entities` by one frame in place
    pub fn update(
        &mut self,
        entities: &mut Entities,
        input: FrameInput<'_>,
    ) -> Result<(), SimError> {
        let tuning = &self.tuning;
        entities.validate(tuning.obstacle_pairs)?;

        let physics = &mut entities.physics;
        let engine = &mut physics.engine;

        // Press assigns the flap velocity; repeats in one frame are no-ops
        for _ in input.touches.iter().filter(|t| t.kind == TouchKind::Press) {
            engine.set_velocity(entities.bird.body, tuning.flap_velocity)?;
        }

        engine.update(input.time.delta)?;

        let scroll = Vec2::new(-tuning.scroll_speed, 0.0);
        for (i, obstacle) in entities.obstacles.iter_mut().enumerate() {
            let right_edge = engine.body(obstacle.top)?.bounds().max.x;

            if right_edge <= tuning.score_line_x && !obstacle.point {
                obstacle.point = true;
                log::debug!("Pair {} scored", i + 1);
                input.dispatch.dispatch(GameEvent::NewPoint);
            }

            if right_edge <= tuning.recycle_line_x {
                let pair = self.generator.next_pair(tuning.viewport.width);
                if !pair.is_finite() {
                    return Err(SimError::InvalidPair { index: i + 1 });
                }
                engine.set_position(obstacle.top, pair.top.pos)?;
                engine.set_position(obstacle.bottom, pair.bottom.pos)?;
                obstacle.point = false;
                log::debug!("Pair {} recycled to x={}", i + 1, pair.top.pos.x);
            }

            engine.translate(obstacle.top, scroll)?;
            engine.translate(obstacle.bottom, scroll)?;
        }

        if !physics.collision_handler_registered {
            let dispatch = input.dispatch.clone();
            engine.on_collision_start(move |event| {
                log::trace!("Collision start: {:?}", event.pairs);
                dispatch.dispatch(GameEvent::GameOver);
            });
            physics.collision_handler_registered = true;
            log::debug!("Collision listener attached");
        }

        Ok(())
    }
}
