//! Obstacle generator
//!
//! Produces the geometry of one top/bottom pipe pair. Both pipes are twice
//! the viewport tall and share one x; the top pipe is lifted by a random
//! amount and the bottom pipe sits `gap` below it.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{PipeTuning, Viewport};

/// Center and size of one pipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeGeometry {
    pub pos: Vec2,
    pub size: Vec2,
}

/// A generated top/bottom pair; always applied together
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipePair {
    pub top: PipeGeometry,
    pub bottom: PipeGeometry,
}

impl PipePair {
    pub fn is_finite(&self) -> bool {
        [self.top.pos, self.top.size, self.bottom.pos, self.bottom.size]
            .into_iter()
            .all(crate::is_finite_point)
    }
}

pub trait ObstacleGenerator {
    /// Geometry for a pair placed `x_offset` beyond the right viewport edge
    fn next_pair(&mut self, x_offset: f32) -> PipePair;
}

/// Seeded random pipes
#[derive(Debug, Clone)]
pub struct RandomPipes {
    viewport: Viewport,
    pipes: PipeTuning,
    rng: Pcg32,
}

impl RandomPipes {
    pub fn new(viewport: Viewport, pipes: PipeTuning, seed: u64) -> Self {
        Self {
            viewport,
            pipes,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Random lift of the top pipe, inclusive on both ends
    fn lift(&mut self) -> i32 {
        let min = self.pipes.min_top;
        let max = (self.viewport.height as i32 - self.pipes.bottom_margin).max(min);
        self.rng.random_range(min..=max)
    }
}

impl ObstacleGenerator for RandomPipes {
    fn next_pair(&mut self, x_offset: f32) -> PipePair {
        let height = self.viewport.height;
        let x = self.viewport.width + x_offset;
        let size = Vec2::new(self.pipes.width, height * 2.0);

        let top_y = -(self.lift() as f32);
        let bottom_y = height * 2.0 + self.pipes.gap + top_y;

        PipePair {
            top: PipeGeometry {
                pos: Vec2::new(x, top_y),
                size,
            },
            bottom: PipeGeometry {
                pos: Vec2::new(x, bottom_y),
                size,
            },
        }
    }
}
