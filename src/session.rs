//! Game session
//!
//! The state machine around the frame update: owns the entity set, runs one
//! update per frame while playing, and reacts to the events it dispatches.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::sim::{
    Entities, EventQueue, FrameInput, FrameTime, GameEvent, PhysicsSystem, RandomPipes, Touch,
};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frames advance the simulation
    Running,
    /// Bird hit something; frames are ignored until restart
    GameOver,
}

#[derive(Debug)]
pub struct GameSession {
    system: PhysicsSystem<RandomPipes>,
    entities: Entities,
    events: EventQueue,
    pub phase: GamePhase,
    /// Points in the current run
    pub points: u32,
    /// Best run since the session was created
    pub best: u32,
    /// Frames simulated in the current run
    pub frames: u64,
}

impl GameSession {
    pub fn new(tuning: Tuning) -> Self {
        let mut pipes = RandomPipes::new(tuning.viewport, tuning.pipes, tuning.seed);
        let entities = Entities::new(&tuning, &mut pipes);
        log::info!(
            "Session started: {} obstacle pairs, seed {}",
            tuning.obstacle_pairs,
            tuning.seed
        );
        Self {
            system: PhysicsSystem::new(tuning, pipes),
            entities,
            events: EventQueue::new(),
            phase: GamePhase::Running,
            points: 0,
            best: 0,
            frames: 0,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.system.tuning
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Run one frame. Returns the events handled this frame.
    ///
    /// A simulation error ends the run and is returned to the caller.
    pub fn frame(&mut self, touches: &[Touch], delta: f32) -> Result<Vec<GameEvent>, SimError> {
        if !self.is_running() {
            return Ok(Vec::new());
        }

        let input = FrameInput {
            touches,
            time: FrameTime { delta },
            dispatch: &self.events,
        };
        if let Err(e) = self.system.update(&mut self.entities, input) {
            log::error!("Frame update failed: {e}");
            self.end_run();
            return Err(e);
        }
        self.frames += 1;
        log::trace!("Frame {} ({delta} ms)", self.frames);

        let events = self.events.drain();
        for event in &events {
            self.handle(*event);
        }
        Ok(events)
    }

    fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::NewPoint if self.is_running() => {
                self.points += 1;
                log::debug!("Point! total {}", self.points);
            }
            GameEvent::GameOver if self.is_running() => {
                self.end_run();
                log::info!("Game over: {} points after {} frames", self.points, self.frames);
            }
            // Anything after game over in the same frame is stale
            _ => {}
        }
    }

    fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.best = self.best.max(self.points);
    }

    /// Start a new run with a fresh engine and obstacles
    pub fn restart(&mut self) {
        self.entities = Entities::new(&self.system.tuning, &mut self.system.generator);
        self.events.drain();
        self.phase = GamePhase::Running;
        self.points = 0;
        self.frames = 0;
        log::info!("Session restarted (best {})", self.best);
    }
}
