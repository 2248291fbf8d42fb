//! Tunable simulation parameters.
//!
//! Values arriving from the UI are sanitized rather than rejected: the
//! simulation runs continuously and has no error channel to report to, so
//! every setter clamps into the valid domain and ignores non-finite input.

use serde::{Deserialize, Serialize};

/// Smallest base node radius accepted.
pub const MIN_NODE_SIZE: f32 = 0.1;

/// Smallest per-tick pulse growth accepted.
pub const MIN_PULSE_SPEED: f32 = 0.01;

/// Largest population accepted. The proximity rebuild is quadratic, so
/// this also bounds the per-tick cost.
pub const MAX_NODE_COUNT: usize = 5_000;

/// Largest proximity threshold accepted, in pixels. Keeps pulse rings
/// (`2 * connection_distance`) finite and retirable.
pub const MAX_CONNECTION_DISTANCE: f32 = 1.0e6;

/// A single tunable parameter, named as the UI names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Parameter {
    NodeCount,
    ConnectionDistance,
    SyncStrength,
    AnimationSpeed,
    NodeSize,
    PulseSpeed,
}

/// What the engine must do after a parameter has been stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Replace the population with `node_count` fresh nodes.
    Repopulate,
    /// Recompute the proximity graph.
    RebuildGraph,
    /// Nothing; the value is read on the next tick.
    None,
}

impl Parameter {
    /// The follow-up a change to this parameter requires.
    pub fn follow_up(self) -> FollowUp {
        match self {
            Parameter::NodeCount => FollowUp::Repopulate,
            Parameter::ConnectionDistance => FollowUp::RebuildGraph,
            Parameter::SyncStrength
            | Parameter::AnimationSpeed
            | Parameter::NodeSize
            | Parameter::PulseSpeed => FollowUp::None,
        }
    }
}

/// Simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Target population size.
    pub node_count: usize,
    /// Proximity threshold in pixels.
    pub connection_distance: f32,
    /// Multiplier on rendered edge opacity.
    pub sync_strength: f32,
    /// Multiplier on every per-tick delta.
    pub animation_speed: f32,
    /// Base render radius of a node.
    pub node_size: f32,
    /// Per-tick radius growth of a pulse.
    pub pulse_speed: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            node_count: 80,
            connection_distance: 100.0,
            sync_strength: 1.0,
            animation_speed: 1.0,
            node_size: 4.0,
            pulse_speed: 3.0,
        }
    }
}

impl SimulationConfig {
    /// Store a new value for `param`, clamped into its valid range.
    ///
    /// Returns `false` (leaving the config untouched) when `value` is NaN,
    /// infinite, or too large to store as `f32`.
    pub fn set(&mut self, param: Parameter, value: f64) -> bool {
        let value32 = value as f32;
        if !value32.is_finite() {
            log::warn!("ignoring out-of-range value {} for {:?}", value, param);
            return false;
        }

        match param {
            Parameter::NodeCount => {
                self.node_count = if value <= 0.0 {
                    0
                } else {
                    value.trunc().min(MAX_NODE_COUNT as f64) as usize
                };
            }
            Parameter::ConnectionDistance => {
                self.connection_distance = value32.clamp(0.0, MAX_CONNECTION_DISTANCE);
            }
            Parameter::SyncStrength => self.sync_strength = value32.max(0.0),
            Parameter::AnimationSpeed => self.animation_speed = value32.max(0.0),
            Parameter::NodeSize => self.node_size = value32.max(MIN_NODE_SIZE),
            Parameter::PulseSpeed => self.pulse_speed = value32.max(MIN_PULSE_SPEED),
        }
        true
    }

    /// Read a parameter back as `f64`.
    pub fn get(&self, param: Parameter) -> f64 {
        match param {
            Parameter::NodeCount => self.node_count as f64,
            Parameter::ConnectionDistance => self.connection_distance as f64,
            Parameter::SyncStrength => self.sync_strength as f64,
            Parameter::AnimationSpeed => self.animation_speed as f64,
            Parameter::NodeSize => self.node_size as f64,
            Parameter::PulseSpeed => self.pulse_speed as f64,
        }
    }

    /// Run every field through the same rules as [`SimulationConfig::set`].
    ///
    /// Used for whole configs deserialized from the host. Non-finite fields
    /// fall back to the default value.
    pub fn sanitized(self) -> Self {
        let mut clean = Self {
            node_count: self.node_count.min(MAX_NODE_COUNT),
            ..Self::default()
        };
        for (param, value) in [
            (Parameter::ConnectionDistance, self.connection_distance),
            (Parameter::SyncStrength, self.sync_strength),
            (Parameter::AnimationSpeed, self.animation_speed),
            (Parameter::NodeSize, self.node_size),
            (Parameter::PulseSpeed, self.pulse_speed),
        ] {
            clean.set(param, value as f64);
        }
        clean
    }
}
