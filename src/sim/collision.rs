//! Broad-phase collision detection
//!
//! Bodies are AABBs, so the broad phase is also the narrow phase. Pairs are
//! ordered `(lower id, higher id)` and tracked between updates so that only
//! newly touching pairs produce a collision-start notification.

use std::collections::BTreeSet;

use super::body::{Body, BodyHandle};

/// Two bodies that started touching during an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollisionPair {
    pub a: BodyHandle,
    pub b: BodyHandle,
}

impl CollisionPair {
    pub fn new(a: BodyHandle, b: BodyHandle) -> Self {
        if a <= b { Self { a, b } } else { Self { a: b, b: a } }
    }

    pub fn involves(&self, body: BodyHandle) -> bool {
        self.a == body || self.b == body
    }
}

/// Payload of a collision-start notification
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionEvent {
    pub pairs: Vec<CollisionPair>,
}

/// All overlapping pairs, skipping static-static pairs
pub fn overlapping_pairs(bodies: &[Body]) -> BTreeSet<CollisionPair> {
    let mut pairs = BTreeSet::new();
    for (i, a) in bodies.iter().enumerate() {
        let a_bounds = a.bounds();
        for b in &bodies[i + 1..] {
            if a.is_static && b.is_static {
                continue;
            }
            if a_bounds.overlaps(&b.bounds()) {
                pairs.insert(CollisionPair::new(a.id, b.id));
            }
        }
    }
    pairs
}

/// Tracks which pairs were touching after the previous update
#[derive(Debug, Clone, Default)]
pub struct PairTracker {
    active: BTreeSet<CollisionPair>,
}

impl PairTracker {
    /// Replace the active set and return the pairs that were not active before
    pub fn advance(&mut self, current: BTreeSet<CollisionPair>) -> Vec<CollisionPair> {
        let started = current.difference(&self.active).copied().collect();
        self.active = current;
        started
    }

    /// Drop every pair that references a removed body
    pub fn forget(&mut self, body: BodyHandle) {
        self.active.retain(|p| !p.involves(body));
    }
}
