//! Expanding ring effects anchored at a node's position.

/// A ring that grows from its origin until it reaches `max_radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub max_radius: f32,
    pub alpha: f32,
}

impl Pulse {
    /// A fresh pulse at `(x, y)` sized for the given connection threshold.
    pub fn new(x: f32, y: f32, connection_distance: f32) -> Self {
        Self {
            x,
            y,
            radius: 0.0,
            max_radius: connection_distance * 2.0,
            alpha: 1.0,
        }
    }

    /// Grow by `delta` and recompute alpha.
    ///
    /// Returns `false` once the ring has reached its maximum radius and
    /// should be retired.
    pub fn advance(&mut self, delta: f32) -> bool {
        self.radius += delta;
        self.alpha = if self.max_radius > 0.0 {
            1.0 - self.radius / self.max_radius
        } else {
            0.0
        };
        self.radius < self.max_radius
    }
}
