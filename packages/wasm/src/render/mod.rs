//! Draw pass over a 2D surface.
//!
//! Rendering is a pure read of the engine: background wash, then
//! connections, then nodes, then pulses. The host surface is abstracted
//! behind [`Surface`] so the same pass drives a browser canvas or an
//! in-memory [`Recorder`].

mod canvas;
mod recorder;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::{Bounds, SimulationEngine};

pub use canvas::Canvas;
pub use recorder::{DrawCommand, Recorder};

/// Extra radius a fully active node gains over `node_size`.
pub const ACTIVITY_RADIUS_GAIN: f32 = 4.0;

/// Extra stroke width a fully active connection gains over 1px.
pub const ACTIVITY_LINE_GAIN: f32 = 2.0;

/// Stroke width of pulse rings.
pub const PULSE_LINE_WIDTH: f32 = 2.0;

/// An 8-bit RGB color with a floating point alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same hue, different alpha.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Alpha clamped into [0, 1]; NaN reads as transparent.
    #[inline]
    pub fn opacity(self) -> f32 {
        if self.a.is_nan() { 0.0 } else { self.a.clamp(0.0, 1.0) }
    }
}

/// CSS `rgba(...)` notation, as accepted by canvas style setters.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.opacity())
    }
}

/// Drawing primitives the render pass needs from its host.
pub trait Surface {
    type Error;

    fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba,
    ) -> Result<(), Self::Error>;

    fn stroke_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        color: Rgba,
        width: f32,
    ) -> Result<(), Self::Error>;

    /// Fill a circle with a two-stop radial gradient from the center
    /// (`inner`) to the rim (`outer`).
    fn fill_circle(
        &mut self,
        center: (f32, f32),
        radius: f32,
        inner: Rgba,
        outer: Rgba,
    ) -> Result<(), Self::Error>;

    fn stroke_circle(
        &mut self,
        center: (f32, f32),
        radius: f32,
        color: Rgba,
        width: f32,
    ) -> Result<(), Self::Error>;
}

/// Colors used by the render pass. Alphas on the hues are ignored; each
/// primitive computes its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    pub node: Rgba,
    pub node_active: Rgba,
    pub connection: Rgba,
    pub pulse: Rgba,
    /// Drawn over the whole surface each frame; its alpha sets trail length.
    pub background: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            node: Rgba::new(0, 255, 255, 1.0),
            node_active: Rgba::new(255, 0, 128, 1.0),
            connection: Rgba::new(0, 255, 255, 1.0),
            pulse: Rgba::new(255, 255, 255, 1.0),
            background: Rgba::new(0, 0, 0, 0.1),
        }
    }
}

/// Renders engine state with a palette.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    pub palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// One full tick: advance the simulation, then draw it.
    pub fn frame<R: rand::Rng, S: Surface>(
        &self,
        engine: &mut SimulationEngine<R>,
        surface: &mut S,
    ) -> Result<(), S::Error> {
        engine.step();
        self.draw(engine, surface)
    }

    /// Draw the current state without touching it.
    pub fn draw<R, S: Surface>(
        &self,
        engine: &SimulationEngine<R>,
        surface: &mut S,
    ) -> Result<(), S::Error> {
        let palette = &self.palette;
        let config = engine.config();
        let Bounds { width, height } = engine.bounds();

        surface.fill_rect(0.0, 0.0, width, height, palette.background)?;

        let xs = engine.positions_x();
        let ys = engine.positions_y();
        let activity = engine.activities();
        for conn in engine.connections() {
            let (a, b) = (conn.from.index(), conn.to.index());
            let avg = (activity[a] + activity[b]) * 0.5;
            let alpha = conn.strength * avg * config.sync_strength;
            surface.stroke_line(
                (xs[a], ys[a]),
                (xs[b], ys[b]),
                palette.connection.with_alpha(alpha),
                1.0 + avg * ACTIVITY_LINE_GAIN,
            )?;
        }

        for node in engine.nodes() {
            let core = if node.is_highly_active() {
                palette.node_active
            } else {
                palette.node
            };
            surface.fill_circle(
                (node.x, node.y),
                config.node_size + node.activity * ACTIVITY_RADIUS_GAIN,
                core.with_alpha(1.0),
                core.with_alpha(0.0),
            )?;
        }

        for pulse in engine.pulses() {
            surface.stroke_circle(
                (pulse.x, pulse.y),
                pulse.radius,
                palette.pulse.with_alpha(pulse.alpha),
                PULSE_LINE_WIDTH,
            )?;
        }

        Ok(())
    }
}
