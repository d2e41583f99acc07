//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Variable frame delta, integrated by the engine
//! - Seeded RNG only
//! - Stable iteration order (bodies by id, obstacles by index)

pub mod body;
pub mod collision;
pub mod engine;
pub mod events;
pub mod pipes;
pub mod state;
pub mod tick;

pub use body::{Body, BodyDesc, BodyHandle, Bounds};
pub use collision::{CollisionEvent, CollisionPair};
pub use engine::{Engine, Timing};
pub use events::{Dispatch, EventQueue, GameEvent};
pub use pipes::{ObstacleGenerator, PipeGeometry, PipePair, RandomPipes};
pub use state::{Bird, Entities, Floor, ObstaclePair, PhysicsEntity};
pub use tick::{FrameInput, FrameTime, PhysicsSystem, Touch, TouchKind};
