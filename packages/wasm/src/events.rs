//! Host events delivered between ticks.
//!
//! The UI layer (sliders, buttons, canvas clicks, window resizes) is reduced
//! to this enum. Events arrive from JavaScript as plain objects tagged by
//! `type`, e.g. `{ type: "setParameter", param: "nodeCount", value: 120 }`.

use serde::{Deserialize, Serialize};

use crate::config::Parameter;

/// A mutation requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SimulationEvent {
    /// A slider moved.
    SetParameter { param: Parameter, value: f64 },
    /// The surface was clicked at `(x, y)`.
    AddNode { x: f32, y: f32 },
    /// Emit a pulse from a random node.
    TriggerPulse,
    /// Replace the population with `nodeCount` fresh nodes.
    Reset,
    /// The drawing surface changed size.
    Resize { width: f32, height: f32 },
}
