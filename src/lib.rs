//! Floppy Bird - a side-scrolling flappy arcade simulation
//!
//! Core modules:
//! - `sim`: Frame update, physics engine, obstacle recycling, events
//! - `session`: Game-state machine driving the frame update
//! - `tuning`: Data-driven game balance
//! - `error`: Simulation and configuration errors

pub mod error;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, SimError};
pub use session::GameSession;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Engine base step (60 Hz); body velocities are expressed per base step
    pub const BASE_DELTA_MS: f32 = 1000.0 / 60.0;

    /// Viewport defaults (portrait phone)
    pub const VIEWPORT_WIDTH: f32 = 400.0;
    pub const VIEWPORT_HEIGHT: f32 = 800.0;

    /// Bird defaults
    pub const FLAP_VELOCITY_Y: f32 = -4.0;
    pub const BIRD_START_X: f32 = 50.0;
    pub const BIRD_START_Y: f32 = 300.0;
    pub const BIRD_SIZE: f32 = 40.0;
    pub const GRAVITY_Y: f32 = 0.4;

    /// Obstacle defaults
    pub const OBSTACLE_PAIRS: usize = 2;
    /// Right edge at or left of this line scores the pipe
    pub const SCORE_LINE_X: f32 = 50.0;
    /// Right edge at or left of this line recycles the pipe
    pub const RECYCLE_LINE_X: f32 = 0.0;
    /// Leftward scroll per frame
    pub const SCROLL_SPEED: f32 = 3.0;
    pub const PIPE_WIDTH: f32 = 75.0;
    pub const PIPE_GAP: f32 = 200.0;
    pub const PIPE_MIN_TOP: i32 = 300;
    pub const PIPE_BOTTOM_MARGIN: i32 = 100;
    /// Second pair starts this fraction of a viewport further right
    pub const SECOND_PAIR_OFFSET: f32 = 0.9;

    pub const FLOOR_HEIGHT: f32 = 50.0;
}

/// True when every component is finite
#[inline]
pub fn is_finite_point(p: Vec2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
