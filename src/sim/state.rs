//! Entity set and session setup
//!
//! The entity set is what the frame update reads and mutates each tick: the
//! physics record, the bird, the floor and the ordered obstacle pairs.

use glam::Vec2;

use super::body::{BodyDesc, BodyHandle};
use super::engine::Engine;
use super::pipes::{ObstacleGenerator, PipePair};
use crate::error::SimError;
use crate::tuning::Tuning;

/// The session's physics engine plus its one-time setup flag
#[derive(Debug)]
pub struct PhysicsEntity {
    pub engine: Engine,
    /// Set once the collision-start listener has been attached to `engine`
    pub collision_handler_registered: bool,
}

impl PhysicsEntity {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            collision_handler_registered: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bird {
    pub body: BodyHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Floor {
    pub body: BodyHandle,
}

/// One top/bottom pipe pair forming a gap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstaclePair {
    pub top: BodyHandle,
    pub bottom: BodyHandle,
    /// The current occupant of this slot has already scored
    pub point: bool,
}

#[derive(Debug)]
pub struct Entities {
    pub physics: PhysicsEntity,
    pub bird: Bird,
    pub floor: Option<Floor>,
    /// Processed in order; display names are 1-based
    pub obstacles: Vec<ObstaclePair>,
}

impl Entities {
    /// Build a fresh session: new engine, bird, floor and `obstacle_pairs`
    /// pipe pairs, the n-th placed `n * pair_spacing` viewports to the right
    pub fn new(tuning: &Tuning, generator: &mut impl ObstacleGenerator) -> Self {
        let mut engine = Engine::new(tuning.gravity);
        let width = tuning.viewport.width;
        let height = tuning.viewport.height;

        let bird = Bird {
            body: engine.create_body(BodyDesc::rectangle(
                "Bird",
                tuning.bird_start,
                Vec2::splat(tuning.bird_size),
            )),
        };

        let obstacles = (0..tuning.obstacle_pairs)
            .map(|i| {
                let pair = generator.next_pair(width * tuning.pair_spacing * i as f32);
                spawn_pair(&mut engine, i + 1, &pair)
            })
            .collect();

        let floor = Floor {
            body: engine.create_body(
                BodyDesc::rectangle(
                    "Floor",
                    Vec2::new(width / 2.0, height),
                    Vec2::new(width, tuning.floor_height),
                )
                .fixed(),
            ),
        };

        Self {
            physics: PhysicsEntity::new(engine),
            bird,
            floor: Some(floor),
            obstacles,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.physics.engine
    }

    /// Resolve an entity by its display name (`Bird`, `Floor`,
    /// `ObstacleTop<i>`, `ObstacleBottom<i>`)
    pub fn body(&self, id: &str) -> Result<BodyHandle, SimError> {
        let found = match id {
            "Bird" => Some(self.bird.body),
            "Floor" => self.floor.map(|f| f.body),
            _ => {
                if let Some(n) = id.strip_prefix("ObstacleTop") {
                    self.pair(n).map(|p| p.top)
                } else if let Some(n) = id.strip_prefix("ObstacleBottom") {
                    self.pair(n).map(|p| p.bottom)
                } else {
                    None
                }
            }
        };
        found.ok_or_else(|| SimError::MissingEntity(id.to_string()))
    }

    /// Pair by 1-based index string
    fn pair(&self, index: &str) -> Option<&ObstaclePair> {
        let index: usize = index.parse().ok()?;
        self.obstacles.get(index.checked_sub(1)?)
    }

    /// Fail unless there are exactly `pairs` obstacle pairs and every body
    /// still exists in the engine
    pub fn validate(&self, pairs: usize) -> Result<(), SimError> {
        if self.obstacles.len() != pairs {
            return Err(SimError::PairCount {
                expected: pairs,
                found: self.obstacles.len(),
            });
        }

        // Names are only formatted for the error
        let engine = &self.physics.engine;
        let check = |handle: BodyHandle, name: &dyn Fn() -> String| {
            if engine.contains(handle) {
                Ok(())
            } else {
                Err(SimError::MissingEntity(name()))
            }
        };

        check(self.bird.body, &|| String::from("Bird"))?;
        if let Some(floor) = self.floor {
            check(floor.body, &|| String::from("Floor"))?;
        }
        for (i, pair) in self.obstacles.iter().enumerate() {
            check(pair.top, &|| format!("ObstacleTop{}", i + 1))?;
            check(pair.bottom, &|| format!("ObstacleBottom{}", i + 1))?;
        }
        Ok(())
    }
}

fn spawn_pair(engine: &mut Engine, index: usize, pair: &PipePair) -> ObstaclePair {
    let top = engine.create_body(
        BodyDesc::rectangle(format!("ObstacleTop{index}"), pair.top.pos, pair.top.size).fixed(),
    );
    let bottom = engine.create_body(
        BodyDesc::rectangle(
            format!("ObstacleBottom{index}"),
            pair.bottom.pos,
            pair.bottom.size,
        )
        .fixed(),
    );
    ObstaclePair {
        top,
        bottom,
        point: false,
    }
}
