//! Simulation state and per-tick update.
//!
//! Node attributes live in Structure of Arrays (SoA) buffers for zero-copy
//! export, and the proximity edges live in petgraph's StableGraph so the
//! neighbor and degree queries come for free.

mod edge;
mod engine;
mod node;
mod pulse;

pub use edge::{Connection, Link};
pub use engine::{Bounds, SimulationEngine};
pub use node::{HIGH_ACTIVITY_THRESHOLD, Node, NodeId, NodeSeed, activity};
pub use pulse::Pulse;
