//! Edge type and related structures.
//!
//! Edges are the proximity connections between nodes. They carry no
//! identity of their own: the whole edge set is rebuilt from positions
//! every tick. Each edge has:
//! - The two endpoint node IDs (lower ID first)
//! - The Euclidean distance between them
//! - A strength in [0, 1] that falls off linearly with distance

use super::node::NodeId;

/// Edge weight stored in the proximity graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub distance: f32,
    pub strength: f32,
}

impl Link {
    /// Build the link for two points `distance` apart, or `None` when they
    /// are not closer than `threshold`.
    #[inline]
    pub fn between(distance: f32, threshold: f32) -> Option<Self> {
        if distance < threshold {
            Some(Self {
                distance,
                strength: 1.0 - distance / threshold,
            })
        } else {
            None
        }
    }
}

/// A proximity connection between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
    pub distance: f32,
    pub strength: f32,
}

impl Connection {
    #[inline]
    pub fn new(from: NodeId, to: NodeId, link: Link) -> Self {
        Self {
            from,
            to,
            distance: link.distance,
            strength: link.strength,
        }
    }
}
