//! Node type and related structures.
//!
//! Nodes are the oscillating points of the simulation. Each node has:
//! - A stable identifier (index within its population, never reused)
//! - Position (x, y) and velocity (vx, vy) in surface pixels
//! - An oscillator (phase, frequency, amplitude) driving its activity level

use std::f32::consts::TAU;
use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;

/// Range of per-tick phase increments drawn for a new node.
pub const FREQUENCY_RANGE: RangeInclusive<f32> = 0.02..=0.05;

/// Range of oscillation amplitudes drawn for a new node.
pub const AMPLITUDE_RANGE: RangeInclusive<f32> = 0.5..=1.0;

/// Range of each velocity component drawn for a new node.
pub const VELOCITY_RANGE: RangeInclusive<f32> = -1.0..=1.0;

/// Activity above which a node is drawn with the active hue.
pub const HIGH_ACTIVITY_THRESHOLD: f32 = 0.7;

/// Stable node identifier.
///
/// Assigned in creation order. It stays valid for the node's lifetime and
/// equals the node's slot in the engine buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Slot of this node in the engine buffers.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Randomized kinematic and oscillator parameters for a fresh node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSeed {
    pub vx: f32,
    pub vy: f32,
    pub phase: f32,
    pub frequency: f32,
    pub amplitude: f32,
}

impl NodeSeed {
    /// Draw every parameter uniformly from its range.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            vx: rng.random_range(VELOCITY_RANGE),
            vy: rng.random_range(VELOCITY_RANGE),
            phase: rng.random_range(0.0..TAU),
            frequency: rng.random_range(FREQUENCY_RANGE),
            amplitude: rng.random_range(AMPLITUDE_RANGE),
        }
    }
}

/// Snapshot of a single node, copied out of the engine buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub phase: f32,
    pub frequency: f32,
    pub amplitude: f32,
    pub activity: f32,
}

impl Node {
    /// Whether the node is drawn with the active hue.
    #[inline]
    pub fn is_highly_active(&self) -> bool {
        self.activity > HIGH_ACTIVITY_THRESHOLD
    }
}

/// Activity level for an oscillator state.
///
/// Maps `sin(phase)` from [-1, 1] onto [0, amplitude].
#[inline]
pub fn activity(phase: f32, amplitude: f32) -> f32 {
    (phase.sin() + 1.0) * 0.5 * amplitude
}
