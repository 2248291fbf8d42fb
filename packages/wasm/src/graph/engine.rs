//! SimulationEngine - Core simulation state.
//!
//! The SimulationEngine owns the node population in SoA (Structure of
//! Arrays) buffers, the proximity graph in petgraph's StableGraph, and the
//! live pulses. One call to [`SimulationEngine::step`] advances everything
//! by one tick: kinematics, then graph rebuild, then pulses.

use std::f32::consts::TAU;

use petgraph::Undirected;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::edge::{Connection, Link};
use super::node::{Node, NodeId, NodeSeed, activity};
use super::pulse::Pulse;
use crate::config::{FollowUp, MAX_NODE_COUNT, Parameter, SimulationConfig};
use crate::events::SimulationEvent;

/// Simulated seconds added per tick at unit animation speed.
const TICK_SECONDS: f32 = 0.016;

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    /// Whether `(x, y)` lies inside the closed rectangle.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }

    /// Map non-finite coordinates onto an edge: `+inf` to the far edge,
    /// `-inf` and NaN to 0. Finite coordinates pass through unchanged.
    pub fn sanitize_point(&self, x: f32, y: f32) -> (f32, f32) {
        (sanitize_coordinate(x, self.width), sanitize_coordinate(y, self.height))
    }
}

fn sanitize_extent(extent: f32) -> f32 {
    if extent.is_finite() { extent.max(0.0) } else { 0.0 }
}

fn sanitize_coordinate(value: f32, extent: f32) -> f32 {
    if value.is_finite() {
        value
    } else if value == f32::INFINITY {
        extent
    } else {
        0.0
    }
}

/// The core simulation engine.
///
/// This struct manages:
/// - Node kinematics and oscillators in SoA layout
/// - The proximity graph, rebuilt after every position change
/// - Live pulses
/// - The seedable random source used for every draw
pub struct SimulationEngine<R = StdRng> {
    config: SimulationConfig,
    bounds: Bounds,
    rng: R,

    /// Proximity edges. Node index `i` is population slot `i`.
    graph: StableGraph<NodeId, Link, Undirected>,

    /// X positions (SoA layout)
    pos_x: Vec<f32>,

    /// Y positions (SoA layout)
    pos_y: Vec<f32>,

    /// X velocities (SoA layout)
    vel_x: Vec<f32>,

    /// Y velocities (SoA layout)
    vel_y: Vec<f32>,

    /// Oscillator phases in radians, kept in [0, 2π)
    phase: Vec<f32>,

    /// Per-tick phase increments
    frequency: Vec<f32>,

    /// Oscillator amplitudes
    amplitude: Vec<f32>,

    /// Activity levels derived from phase and amplitude
    activity: Vec<f32>,

    pulses: Vec<Pulse>,

    /// Simulated time in seconds
    time: f32,

    /// Ticks stepped since construction
    frame: u64,
}

impl SimulationEngine<StdRng> {
    /// Create an engine driven by a `StdRng` seeded from `seed`.
    pub fn with_seed(config: SimulationConfig, bounds: Bounds, seed: u64) -> Self {
        Self::new(config, bounds, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationEngine<R> {
    /// Create an engine and populate it with `config.node_count` nodes.
    pub fn new(config: SimulationConfig, bounds: Bounds, rng: R) -> Self {
        let config = config.sanitized();
        let node_count = config.node_count;
        let mut engine = Self {
            config,
            bounds,
            rng,
            graph: StableGraph::default(),
            pos_x: Vec::new(),
            pos_y: Vec::new(),
            vel_x: Vec::new(),
            vel_y: Vec::new(),
            phase: Vec::new(),
            frequency: Vec::new(),
            amplitude: Vec::new(),
            activity: Vec::new(),
            pulses: Vec::new(),
            time: 0.0,
            frame: 0,
        };
        engine.create_population(node_count);
        engine
    }

    // =========================================================================
    // Population
    // =========================================================================

    /// Replace the population with `count` randomly placed nodes, at most
    /// [`MAX_NODE_COUNT`].
    pub fn create_population(&mut self, count: usize) {
        let count = count.min(MAX_NODE_COUNT);
        self.clear_nodes();
        self.graph = StableGraph::with_capacity(count, 0);
        self.reserve(count);

        let Bounds { width, height } = self.bounds;
        for _ in 0..count {
            let x = self.rng.random::<f32>() * width;
            let y = self.rng.random::<f32>() * height;
            let seed = NodeSeed::random(&mut self.rng);
            self.push_node(x, y, seed, 0.0);
        }

        self.rebuild_connections();
        log::debug!(
            "populated {} nodes in {}x{}, {} connections",
            count,
            width,
            height,
            self.graph.edge_count()
        );
    }

    /// Append a node at exactly `(x, y)` in the "new" state (activity 1).
    ///
    /// Non-finite coordinates are mapped onto the bounds first.
    pub fn add_node(&mut self, x: f32, y: f32) -> NodeId {
        let (x, y) = self.bounds.sanitize_point(x, y);
        let seed = NodeSeed::random(&mut self.rng);
        let id = self.push_node(x, y, seed, 1.0);
        self.rebuild_connections();
        id
    }

    /// Replace the population with `config.node_count` fresh nodes.
    pub fn reset(&mut self) {
        log::info!("reset to {} nodes", self.config.node_count);
        self.create_population(self.config.node_count);
    }

    /// Remove every node, connection and pulse.
    pub fn clear(&mut self) {
        self.clear_nodes();
        self.graph.clear();
        self.pulses.clear();
    }

    fn push_node(&mut self, x: f32, y: f32, seed: NodeSeed, activity: f32) -> NodeId {
        let id = NodeId(self.pos_x.len() as u32);
        let index = self.graph.add_node(id);
        debug_assert_eq!(index.index(), id.index());

        self.pos_x.push(x);
        self.pos_y.push(y);
        self.vel_x.push(seed.vx);
        self.vel_y.push(seed.vy);
        self.phase.push(seed.phase);
        self.frequency.push(seed.frequency);
        self.amplitude.push(seed.amplitude);
        self.activity.push(activity);
        id
    }

    fn reserve(&mut self, count: usize) {
        self.pos_x.reserve(count);
        self.pos_y.reserve(count);
        self.vel_x.reserve(count);
        self.vel_y.reserve(count);
        self.phase.reserve(count);
        self.frequency.reserve(count);
        self.amplitude.reserve(count);
        self.activity.reserve(count);
    }

    fn clear_nodes(&mut self) {
        self.pos_x.clear();
        self.pos_y.clear();
        self.vel_x.clear();
        self.vel_y.clear();
        self.phase.clear();
        self.frequency.clear();
        self.amplitude.clear();
        self.activity.clear();
    }

    // =========================================================================
    // Pulses
    // =========================================================================

    /// Start a pulse at a uniformly chosen node.
    ///
    /// Returns `false` without doing anything when there are no nodes.
    pub fn trigger_pulse(&mut self) -> bool {
        if self.pos_x.is_empty() {
            return false;
        }

        let i = self.rng.random_range(0..self.pos_x.len());
        self.pulses.push(Pulse::new(
            self.pos_x[i],
            self.pos_y[i],
            self.config.connection_distance,
        ));
        true
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        self.update_kinematics();
        self.rebuild_connections();
        self.update_pulses();

        self.time += TICK_SECONDS * self.config.animation_speed;
        self.frame += 1;
    }

    /// Advance phases and positions, reflecting off the surface edges.
    pub fn update_kinematics(&mut self) {
        let speed = self.config.animation_speed;
        let Bounds { width, height } = self.bounds;

        for i in 0..self.pos_x.len() {
            self.phase[i] = (self.phase[i] + self.frequency[i] * speed).rem_euclid(TAU);
            self.activity[i] = activity(self.phase[i], self.amplitude[i]);

            let x = self.pos_x[i] + self.vel_x[i] * speed;
            let y = self.pos_y[i] + self.vel_y[i] * speed;

            // The flip applies from the next tick on; this tick's overshoot is clamped.
            if x < 0.0 || x > width {
                self.vel_x[i] = -self.vel_x[i];
            }
            if y < 0.0 || y > height {
                self.vel_y[i] = -self.vel_y[i];
            }

            self.pos_x[i] = x.clamp(0.0, width);
            self.pos_y[i] = y.clamp(0.0, height);
        }
    }

    /// Recompute every proximity edge from the current positions.
    pub fn rebuild_connections(&mut self) {
        self.graph.clear_edges();

        let threshold = self.config.connection_distance;
        let n = self.pos_x.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = self.pos_x[i] - self.pos_x[j];
                let dy = self.pos_y[i] - self.pos_y[j];
                let distance = (dx * dx + dy * dy).sqrt();

                if let Some(link) = Link::between(distance, threshold) {
                    self.graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), link);
                }
            }
        }
    }

    /// Grow every pulse and retire the ones that reached their maximum.
    pub fn update_pulses(&mut self) {
        let delta = self.config.pulse_speed * self.config.animation_speed;
        self.pulses.retain_mut(|pulse| pulse.advance(delta));
    }

    // =========================================================================
    // Configuration & Events
    // =========================================================================

    /// Store a parameter and apply whatever follow-up it requires, so the
    /// state is consistent before the next render.
    pub fn set_parameter(&mut self, param: Parameter, value: f64) {
        if !self.config.set(param, value) {
            return;
        }
        log::debug!("{:?} = {}", param, self.config.get(param));

        match param.follow_up() {
            FollowUp::Repopulate => self.create_population(self.config.node_count),
            FollowUp::RebuildGraph => self.rebuild_connections(),
            FollowUp::None => {}
        }
    }

    /// Apply a host event.
    pub fn dispatch(&mut self, event: SimulationEvent) {
        match event {
            SimulationEvent::SetParameter { param, value } => self.set_parameter(param, value),
            SimulationEvent::AddNode { x, y } => {
                self.add_node(x, y);
            }
            SimulationEvent::TriggerPulse => {
                self.trigger_pulse();
            }
            SimulationEvent::Reset => self.reset(),
            SimulationEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Record new surface dimensions. Nodes outside the new bounds are
    /// pulled back in by the next kinematics update.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height);
        log::debug!("resized to {}x{}", self.bounds.width, self.bounds.height);
    }
}

impl<R> SimulationEngine<R> {
    // =========================================================================
    // Queries
    // =========================================================================

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Copy one node out of the buffers.
    pub fn node(&self, id: NodeId) -> Option<Node> {
        let i = id.index();
        if i >= self.pos_x.len() {
            return None;
        }
        Some(Node {
            id,
            x: self.pos_x[i],
            y: self.pos_y[i],
            vx: self.vel_x[i],
            vy: self.vel_y[i],
            phase: self.phase[i],
            frequency: self.frequency[i],
            amplitude: self.amplitude[i],
            activity: self.activity[i],
        })
    }

    /// Iterate over snapshots of every node in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        (0..self.pos_x.len()).filter_map(|i| self.node(NodeId(i as u32)))
    }

    /// Get the number of connections.
    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate over connections, ordered by `(from, to)`.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        self.graph
            .edge_references()
            .map(|edge| {
                Connection::new(
                    self.graph[edge.source()],
                    self.graph[edge.target()],
                    *edge.weight(),
                )
            })
    }

    /// Get the nodes connected to `id`.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let index = NodeIndex::new(id.index());
        if !self.graph.contains_node(index) {
            return Vec::new();
        }
        self.graph.neighbors(index).map(|n| self.graph[n]).collect()
    }

    /// Get the connection count of every node, in slot order.
    pub fn degrees(&self) -> Vec<u32> {
        (0..self.pos_x.len())
            .map(|i| self.graph.edges(NodeIndex::new(i)).count() as u32)
            .collect()
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// Simulated seconds elapsed, scaled by animation speed.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Get X positions slice.
    pub fn positions_x(&self) -> &[f32] {
        &self.pos_x
    }

    /// Get Y positions slice.
    pub fn positions_y(&self) -> &[f32] {
        &self.pos_y
    }

    /// Get activity levels slice.
    pub fn activities(&self) -> &[f32] {
        &self.activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(node_count: usize, connection_distance: f32) -> SimulationConfig {
        SimulationConfig {
            node_count,
            connection_distance,
            ..SimulationConfig::default()
        }
    }

    fn engine(node_count: usize, connection_distance: f32) -> SimulationEngine {
        SimulationEngine::with_seed(
            config_with(node_count, connection_distance),
            Bounds::new(800.0, 600.0),
            42,
        )
    }

    fn brute_force_pairs(engine: &SimulationEngine) -> Vec<(u32, u32)> {
        let xs = engine.positions_x();
        let ys = engine.positions_y();
        let threshold = engine.config().connection_distance;
        let mut pairs = Vec::new();
        for i in 0..xs.len() {
            for j in (i + 1)..xs.len() {
                let dx = xs[i] - xs[j];
                let dy = ys[i] - ys[j];
                let d = (dx * dx + dy * dy).sqrt();
                if d < threshold {
                    pairs.push((i as u32, j as u32));
                }
            }
        }
        pairs
    }

    #[test]
    fn test_create_population() {
        let engine = engine(25, 100.0);
        assert_eq!(engine.node_count(), 25);

        for (i, node) in engine.nodes().enumerate() {
            assert_eq!(node.id, NodeId(i as u32));
            assert!(engine.bounds().contains(node.x, node.y));
            assert!((-1.0..=1.0).contains(&node.vx));
            assert!((-1.0..=1.0).contains(&node.vy));
            assert!((0.02..=0.05).contains(&node.frequency));
            assert!((0.5..=1.0).contains(&node.amplitude));
            assert_eq!(node.activity, 0.0);
        }
    }

    #[test]
    fn test_population_is_capped() {
        let mut engine = engine(0, 0.0);
        engine.create_population(MAX_NODE_COUNT + 10);
        assert_eq!(engine.node_count(), MAX_NODE_COUNT);
    }

    #[test]
    fn test_empty_population() {
        let mut engine = engine(10, 100.0);
        engine.create_population(0);
        assert_eq!(engine.node_count(), 0);
        assert_eq!(engine.connection_count(), 0);

        let id = engine.add_node(100.0, 100.0);
        assert_eq!(id, NodeId(0));
        assert_eq!(engine.node_count(), 1);
        assert_eq!(engine.connection_count(), 0);
    }

    #[test]
    fn test_add_node() {
        let mut engine = engine(5, 100.0);
        let id = engine.add_node(123.0, 45.0);

        assert_eq!(id, NodeId(5));
        let node = engine.node(id).unwrap();
        assert_eq!((node.x, node.y), (123.0, 45.0));
        assert_eq!(node.activity, 1.0);
        assert_eq!(engine.node_count(), 6);
    }

    #[test]
    fn test_add_node_non_finite_coordinates() {
        let mut engine = engine(0, 100.0);
        let id = engine.add_node(f32::NAN, f32::INFINITY);
        let node = engine.node(id).unwrap();
        assert_eq!((node.x, node.y), (0.0, 600.0));

        engine.add_node(f32::NEG_INFINITY, 50.0);
        for _ in 0..10 {
            engine.step();
            for node in engine.nodes() {
                assert!(engine.bounds().contains(node.x, node.y));
            }
        }
    }

    #[test]
    fn test_add_node_keeps_existing_ids() {
        let mut engine = engine(3, 100.0);
        let before: Vec<_> = engine.nodes().collect();
        engine.add_node(1.0, 1.0);
        let after: Vec<_> = engine.nodes().take(3).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_two_node_connection() {
        let mut engine = engine(0, 100.0);
        engine.add_node(0.0, 0.0);
        engine.add_node(50.0, 0.0);

        let connections: Vec<_> = engine.connections().collect();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].from, NodeId(0));
        assert_eq!(connections[0].to, NodeId(1));
        assert_eq!(connections[0].distance, 50.0);
        assert_eq!(connections[0].strength, 0.5);
    }

    #[test]
    fn test_zero_distance_never_connects() {
        let mut engine = engine(10, 0.0);
        assert_eq!(engine.connection_count(), 0);
        for _ in 0..50 {
            engine.step();
            assert_eq!(engine.connection_count(), 0);
        }
    }

    #[test]
    fn test_rebuild_matches_brute_force() {
        let mut engine = engine(60, 120.0);
        for _ in 0..20 {
            engine.step();
            let got: Vec<_> = engine.connections().map(|c| (c.from.0, c.to.0)).collect();
            assert_eq!(got, brute_force_pairs(&engine));
        }
    }

    #[test]
    fn test_connection_strength_in_unit_range() {
        let engine = engine(80, 150.0);
        for conn in engine.connections() {
            assert!(conn.from < conn.to);
            assert!(conn.distance < 150.0);
            assert!(conn.strength > 0.0 && conn.strength <= 1.0);
        }
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let mut engine = SimulationEngine::with_seed(
            SimulationConfig {
                node_count: 40,
                animation_speed: 5.0,
                ..SimulationConfig::default()
            },
            Bounds::new(50.0, 30.0),
            3,
        );
        for _ in 0..500 {
            engine.step();
            for node in engine.nodes() {
                assert!(engine.bounds().contains(node.x, node.y), "{:?} escaped", node);
            }
        }
    }

    #[test]
    fn test_reflection_at_edges() {
        let mut engine = engine(0, 100.0);
        engine.resize(100.0, 100.0);
        let left = engine.add_node(0.0, 50.0);
        let right = engine.add_node(100.0, 50.0);
        let before_left = engine.node(left).unwrap();
        let before_right = engine.node(right).unwrap();

        engine.update_kinematics();
        let after_left = engine.node(left).unwrap();
        let after_right = engine.node(right).unwrap();

        // Leaving through an edge flips vx and clamps x back onto the edge.
        if before_left.vx < 0.0 {
            assert_eq!(after_left.vx, -before_left.vx);
            assert_eq!(after_left.x, 0.0);
        } else {
            assert_eq!(after_left.vx, before_left.vx);
        }
        if before_right.vx > 0.0 {
            assert_eq!(after_right.vx, -before_right.vx);
            assert_eq!(after_right.x, 100.0);
        } else {
            assert_eq!(after_right.vx, before_right.vx);
        }

        // Neither node is near a horizontal edge.
        assert_eq!(after_left.vy, before_left.vy);
        assert_eq!(after_right.vy, before_right.vy);
    }

    #[test]
    fn test_activity_bounded_by_amplitude() {
        let mut engine = engine(30, 100.0);
        for _ in 0..300 {
            engine.step();
            for node in engine.nodes() {
                assert!(node.activity >= 0.0);
                assert!(node.activity <= node.amplitude + 1e-6);
                assert!(node.activity <= 1.0 + 1e-6);
            }
        }
    }

    #[test]
    fn test_zero_speed_freezes_motion() {
        let mut engine = engine(10, 100.0);
        engine.set_parameter(Parameter::AnimationSpeed, 0.0);
        let before: Vec<_> = engine.positions_x().to_vec();
        engine.step();
        assert_eq!(engine.positions_x(), &before[..]);
        assert_eq!(engine.time(), 0.0);
        assert_eq!(engine.frame_count(), 1);
    }

    #[test]
    fn test_trigger_pulse_empty_population() {
        let mut engine = engine(0, 100.0);
        assert!(!engine.trigger_pulse());
        assert!(engine.pulses().is_empty());
    }

    #[test]
    fn test_trigger_pulse_single_node() {
        let mut engine = engine(0, 100.0);
        engine.add_node(30.0, 40.0);
        assert!(engine.trigger_pulse());

        assert_eq!(
            engine.pulses(),
            &[Pulse {
                x: 30.0,
                y: 40.0,
                radius: 0.0,
                max_radius: 200.0,
                alpha: 1.0,
            }]
        );
    }

    #[test]
    fn test_pulse_lifecycle() {
        let mut engine = engine(1, 10.0);
        engine.trigger_pulse();

        // max radius 20, growth 3 per tick: alive at 3..18, gone at 21.
        let mut last_alpha = 1.0;
        for tick in 1..=6 {
            engine.step();
            let pulse = engine.pulses()[0];
            assert_eq!(pulse.radius, 3.0 * tick as f32);
            assert!(pulse.alpha < last_alpha);
            last_alpha = pulse.alpha;
        }
        engine.step();
        assert!(engine.pulses().is_empty());
    }

    #[test]
    fn test_pulse_removed_when_radius_meets_max() {
        let mut engine = engine(1, 3.0);
        engine.set_parameter(Parameter::PulseSpeed, 2.0);
        engine.trigger_pulse();

        engine.step();
        engine.step();
        assert_eq!(engine.pulses().len(), 1);
        engine.step();
        assert!(engine.pulses().is_empty());
    }

    #[test]
    fn test_unrepresentable_speed_keeps_activity_finite() {
        let mut engine = engine(20, 100.0);
        engine.set_parameter(Parameter::AnimationSpeed, 1e39);
        assert_eq!(engine.config().animation_speed, 1.0);
        engine.step();
        engine.set_parameter(Parameter::AnimationSpeed, 1.0);
        for _ in 0..5 {
            engine.step();
        }
        for node in engine.nodes() {
            assert!(node.phase.is_finite());
            assert!((0.0..=1.0).contains(&node.activity));
        }
    }

    #[test]
    fn test_unrepresentable_distance_keeps_pulses_retiring() {
        let mut engine = engine(1, 100.0);
        engine.set_parameter(Parameter::ConnectionDistance, 1e39);
        assert_eq!(engine.config().connection_distance, 100.0);

        engine.trigger_pulse();
        assert_eq!(engine.pulses()[0].max_radius, 200.0);
        for _ in 0..67 {
            engine.step();
        }
        assert!(engine.pulses().is_empty());
    }

    #[test]
    fn test_pulse_retirement_keeps_order() {
        let mut engine = engine(4, 10.0);
        engine.trigger_pulse();
        engine.step();
        engine.step();
        engine.set_parameter(Parameter::ConnectionDistance, 100.0);
        engine.trigger_pulse();
        engine.trigger_pulse();

        for _ in 0..5 {
            engine.step();
        }
        assert_eq!(engine.pulses().len(), 2);
        assert!(engine.pulses().iter().all(|p| p.max_radius == 200.0));
        assert_eq!(engine.pulses()[0].radius, engine.pulses()[1].radius);
    }

    #[test]
    fn test_seed_reproducibility() {
        let a = engine(20, 100.0);
        let b = engine(20, 100.0);
        assert_eq!(a.nodes().collect::<Vec<_>>(), b.nodes().collect::<Vec<_>>());

        let c = SimulationEngine::with_seed(config_with(20, 100.0), Bounds::new(800.0, 600.0), 43);
        assert_ne!(a.nodes().collect::<Vec<_>>(), c.nodes().collect::<Vec<_>>());
    }

    #[test]
    fn test_node_count_parameter_repopulates() {
        let mut engine = engine(10, 100.0);
        engine.set_parameter(Parameter::NodeCount, 30.0);
        assert_eq!(engine.node_count(), 30);
        assert_eq!(engine.config().node_count, 30);

        engine.set_parameter(Parameter::NodeCount, -4.0);
        assert_eq!(engine.node_count(), 0);
        assert_eq!(engine.connection_count(), 0);
    }

    #[test]
    fn test_connection_distance_parameter_rebuilds() {
        let mut engine = engine(0, 10.0);
        engine.add_node(0.0, 0.0);
        engine.add_node(50.0, 0.0);
        assert_eq!(engine.connection_count(), 0);

        engine.set_parameter(Parameter::ConnectionDistance, 100.0);
        assert_eq!(engine.connection_count(), 1);
    }

    #[test]
    fn test_dispatch_events() {
        let mut engine = engine(5, 100.0);

        engine.dispatch(SimulationEvent::AddNode { x: 1.0, y: 2.0 });
        assert_eq!(engine.node_count(), 6);

        engine.dispatch(SimulationEvent::TriggerPulse);
        assert_eq!(engine.pulses().len(), 1);

        engine.dispatch(SimulationEvent::Reset);
        assert_eq!(engine.node_count(), 5);

        engine.dispatch(SimulationEvent::Resize { width: 100.0, height: 50.0 });
        assert_eq!(engine.bounds(), Bounds::new(100.0, 50.0));

        engine.dispatch(SimulationEvent::SetParameter {
            param: Parameter::SyncStrength,
            value: 2.5,
        });
        assert_eq!(engine.config().sync_strength, 2.5);
    }

    #[test]
    fn test_resize_pulls_nodes_inside() {
        let mut engine = engine(50, 100.0);
        engine.resize(10.0, 10.0);
        engine.step();
        for node in engine.nodes() {
            assert!(node.x <= 10.0 && node.y <= 10.0);
        }
    }

    #[test]
    fn test_resize_sanitizes_extent() {
        let mut engine = engine(0, 100.0);
        engine.resize(-5.0, f32::NAN);
        assert_eq!(engine.bounds(), Bounds { width: 0.0, height: 0.0 });
    }

    #[test]
    fn test_neighbors_and_degrees() {
        let mut engine = engine(0, 100.0);
        let a = engine.add_node(0.0, 0.0);
        let b = engine.add_node(50.0, 0.0);
        let c = engine.add_node(0.0, 60.0);
        let d = engine.add_node(500.0, 500.0);

        let mut neighbors = engine.neighbors(a);
        neighbors.sort();
        assert_eq!(neighbors, vec![b, c]);
        assert!(engine.neighbors(d).is_empty());
        assert!(engine.neighbors(NodeId(99)).is_empty());

        // b-c is ~78.1 apart, so every node in the triangle has degree 2.
        assert_eq!(engine.degrees(), vec![2, 2, 2, 0]);
    }

    #[test]
    fn test_clear() {
        let mut engine = engine(10, 100.0);
        engine.trigger_pulse();
        engine.clear();
        assert_eq!(engine.node_count(), 0);
        assert_eq!(engine.connection_count(), 0);
        assert!(engine.pulses().is_empty());

        assert_eq!(engine.add_node(5.0, 5.0), NodeId(0));
    }

    #[test]
    fn test_time_accumulates() {
        let mut engine = engine(1, 100.0);
        engine.set_parameter(Parameter::AnimationSpeed, 2.0);
        for _ in 0..10 {
            engine.step();
        }
        assert_eq!(engine.frame_count(), 10);
        assert!((engine.time() - 0.32).abs() < 1e-5);
    }
}
