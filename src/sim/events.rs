//! Outbound game events
//!
//! The frame update and the collision listener both report through the same
//! single-threaded queue; the session drains it between frames.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Events reported to the surrounding game-state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// An obstacle crossed the score line
    NewPoint,
    /// Two bodies started touching
    GameOver,
}

/// One-way event sink
pub trait Dispatch {
    fn dispatch(&self, event: GameEvent);
}

/// Clonable FIFO; all clones share one buffer
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    inner: Rc<RefCell<VecDeque<GameEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything queued so far, oldest first
    pub fn drain(&self) -> Vec<GameEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl Dispatch for EventQueue {
    fn dispatch(&self, event: GameEvent) {
        self.inner.borrow_mut().push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let queue = EventQueue::new();
        let listener_side = queue.clone();
        queue.dispatch(GameEvent::NewPoint);
        listener_side.dispatch(GameEvent::GameOver);

        assert!(!queue.is_empty());
        assert_eq!(listener_side.drain(), vec![GameEvent::NewPoint, GameEvent::GameOver]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_wire_shape() {
        assert_eq!(serde_json::to_string(&GameEvent::NewPoint).unwrap(), r#"{"type":"new_point"}"#);
        let event: GameEvent = serde_json::from_str(r#"{"type":"game_over"}"#).unwrap();
        assert_eq!(event, GameEvent::GameOver);
    }
}
