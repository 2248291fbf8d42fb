//! Neural Sync - WASM Module
//!
//! This module provides the simulation and draw pass for the Neural Sync
//! visualization: oscillating nodes drifting across a canvas, linked by
//! proximity edges, with expanding pulse rings. It is compiled to
//! WebAssembly and exposes a JavaScript-friendly API via wasm-bindgen.
//!
//! # Architecture
//!
//! - `graph`: Simulation engine (SoA node buffers, petgraph proximity graph, pulses)
//! - `config`: Tunable parameters and their sanitizing rules
//! - `events`: Host events and their serde encoding
//! - `render`: Draw pass over an abstract surface (canvas or recorder)
//!
//! The host drives the loop: call `frame(ctx)` once per
//! `requestAnimationFrame` callback.

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

pub mod config;
pub mod events;
pub mod graph;
pub mod render;

use config::{Parameter, SimulationConfig};
use events::SimulationEvent;
use graph::{Bounds, NodeId, SimulationEngine};
use render::{Canvas, Palette, Renderer};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Change the console log level ("off", "error", "warn", "info", "debug", "trace").
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter: log::LevelFilter = level
        .parse()
        .map_err(|_| JsValue::from_str(&format!("unknown log level: {}", level)))?;
    log::set_max_level(filter);
    Ok(())
}

/// Main entry point for the simulation.
///
/// This struct wraps the internal SimulationEngine and its Renderer and
/// provides the public API exposed to JavaScript.
#[wasm_bindgen]
pub struct NeuralSyncWasm {
    engine: SimulationEngine,
    renderer: Renderer,
}

impl NeuralSyncWasm {
    fn build(config: SimulationConfig, width: f32, height: f32, seed: Option<u32>) -> Self {
        let seed = seed.map_or_else(
            || (js_sys::Math::random() * u32::MAX as f64) as u64,
            u64::from,
        );
        log::info!("starting simulation {}x{} with seed {}", width, height, seed);
        Self {
            engine: SimulationEngine::with_seed(config, Bounds::new(width, height), seed),
            renderer: Renderer::default(),
        }
    }
}

#[wasm_bindgen]
impl NeuralSyncWasm {
    /// Create a simulation with the default configuration.
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - Canvas size in pixels
    /// * `seed` - Random seed; drawn from `Math.random()` when omitted
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: Option<u32>) -> Self {
        Self::build(SimulationConfig::default(), width, height, seed)
    }

    /// Create a simulation from a config object such as
    /// `{ nodeCount: 120, connectionDistance: 80 }`. Missing fields take
    /// their defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        width: f32,
        height: f32,
        config: JsValue,
        seed: Option<u32>,
    ) -> Result<NeuralSyncWasm, JsValue> {
        let config: SimulationConfig = serde_wasm_bindgen::from_value(config)?;
        Ok(Self::build(config, width, height, seed))
    }

    // =========================================================================
    // Frame Loop
    // =========================================================================

    /// Advance one tick and draw it.
    pub fn frame(&mut self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        self.renderer.frame(&mut self.engine, &mut Canvas::new(ctx))
    }

    /// Advance one tick without drawing.
    pub fn step(&mut self) {
        self.engine.step();
    }

    /// Draw the current state without advancing.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        self.renderer.draw(&self.engine, &mut Canvas::new(ctx))
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Apply an event object, e.g. `{ type: "addNode", x: 10, y: 20 }`.
    pub fn dispatch(&mut self, event: JsValue) -> Result<(), JsValue> {
        let event: SimulationEvent = serde_wasm_bindgen::from_value(event)?;
        self.engine.dispatch(event);
        Ok(())
    }

    /// Set the population size and repopulate.
    #[wasm_bindgen(js_name = setNodeCount)]
    pub fn set_node_count(&mut self, value: f64) {
        self.engine.set_parameter(Parameter::NodeCount, value);
    }

    /// Set the proximity threshold and rebuild connections.
    #[wasm_bindgen(js_name = setConnectionDistance)]
    pub fn set_connection_distance(&mut self, value: f64) {
        self.engine.set_parameter(Parameter::ConnectionDistance, value);
    }

    #[wasm_bindgen(js_name = setSyncStrength)]
    pub fn set_sync_strength(&mut self, value: f64) {
        self.engine.set_parameter(Parameter::SyncStrength, value);
    }

    #[wasm_bindgen(js_name = setAnimationSpeed)]
    pub fn set_animation_speed(&mut self, value: f64) {
        self.engine.set_parameter(Parameter::AnimationSpeed, value);
    }

    #[wasm_bindgen(js_name = setNodeSize)]
    pub fn set_node_size(&mut self, value: f64) {
        self.engine.set_parameter(Parameter::NodeSize, value);
    }

    #[wasm_bindgen(js_name = setPulseSpeed)]
    pub fn set_pulse_speed(&mut self, value: f64) {
        self.engine.set_parameter(Parameter::PulseSpeed, value);
    }

    /// Add a node at canvas coordinates (e.g. a click).
    ///
    /// Returns the new node ID.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, x: f32, y: f32) -> u32 {
        self.engine.add_node(x, y).raw()
    }

    /// Emit a pulse from a random node.
    ///
    /// Returns false if there are no nodes.
    #[wasm_bindgen(js_name = triggerPulse)]
    pub fn trigger_pulse(&mut self) -> bool {
        self.engine.trigger_pulse()
    }

    /// Replace the population with `nodeCount` fresh nodes.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Remove all nodes, connections and pulses.
    pub fn clear(&mut self) {
        self.engine.clear();
    }

    /// Update the canvas size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.resize(width, height);
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Get the current configuration as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.engine.config())?)
    }

    /// Get the current palette as a plain object.
    pub fn palette(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.renderer.palette)?)
    }

    /// Replace the palette. Missing colors take their defaults.
    #[wasm_bindgen(js_name = setPalette)]
    pub fn set_palette(&mut self, palette: JsValue) -> Result<(), JsValue> {
        self.renderer.palette = serde_wasm_bindgen::from_value::<Palette>(palette)?;
        Ok(())
    }

    // =========================================================================
    // State Queries
    // =========================================================================

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.engine.node_count() as u32
    }

    #[wasm_bindgen(js_name = connectionCount)]
    pub fn connection_count(&self) -> u32 {
        self.engine.connection_count() as u32
    }

    #[wasm_bindgen(js_name = pulseCount)]
    pub fn pulse_count(&self) -> u32 {
        self.engine.pulses().len() as u32
    }

    /// Ticks stepped since construction.
    #[wasm_bindgen(js_name = frameCount)]
    pub fn frame_count(&self) -> f64 {
        self.engine.frame_count() as f64
    }

    /// Simulated seconds elapsed.
    pub fn time(&self) -> f32 {
        self.engine.time()
    }

    /// Get connections as [from0, to0, from1, to1, ...].
    #[wasm_bindgen(js_name = getConnectionPairs)]
    pub fn get_connection_pairs(&self) -> Vec<u32> {
        self.engine
            .connections()
            .flat_map(|c| [c.from.raw(), c.to.raw()])
            .collect()
    }

    /// Get connection strengths in the same order as `getConnectionPairs`.
    #[wasm_bindgen(js_name = getConnectionStrengths)]
    pub fn get_connection_strengths(&self) -> Vec<f32> {
        self.engine.connections().map(|c| c.strength).collect()
    }

    /// Get pulses as [x0, y0, radius0, alpha0, x1, ...].
    #[wasm_bindgen(js_name = getPulses)]
    pub fn get_pulses(&self) -> Vec<f32> {
        self.engine
            .pulses()
            .iter()
            .flat_map(|p| [p.x, p.y, p.radius, p.alpha])
            .collect()
    }

    /// Get the nodes currently connected to a node.
    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn get_neighbors(&self, node_id: u32) -> Vec<u32> {
        self.engine
            .neighbors(NodeId(node_id))
            .into_iter()
            .map(NodeId::raw)
            .collect()
    }

    /// Get the connection count of every node.
    #[wasm_bindgen(js_name = getNodeDegrees)]
    pub fn get_node_degrees(&self) -> Vec<u32> {
        self.engine.degrees()
    }

    // =========================================================================
    // Buffer Access (Zero-Copy)
    // =========================================================================

    /// Get a zero-copy view of X positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately, do not store.
    #[wasm_bindgen(js_name = getPositionsXView)]
    pub fn get_positions_x_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.engine.positions_x()) }
    }

    /// Get a zero-copy view of Y positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately, do not store.
    #[wasm_bindgen(js_name = getPositionsYView)]
    pub fn get_positions_y_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.engine.positions_y()) }
    }

    /// Get a zero-copy view of activity levels.
    #[wasm_bindgen(js_name = getActivityView)]
    pub fn get_activity_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.engine.activities()) }
    }

    /// Get the length of the node buffers.
    #[wasm_bindgen(js_name = positionsLen)]
    pub fn positions_len(&self) -> usize {
        self.engine.positions_x().len()
    }
}
