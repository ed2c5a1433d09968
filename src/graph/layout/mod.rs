mod forces;
mod quadtree;
mod simulation;
mod timeline;

use std::f32::consts::PI;

use eframe::egui::{Vec2, vec2};
use tracing::debug;

use super::links::Link;
use super::node::Node;
pub use forces::{CenterForce, CollideForce, LinkForce, ManyBodyForce};
pub use simulation::{Body, Force, ForceSimulation, IntegratorConfig, Simulation};
pub use timeline::{TimelineConfig, timeline_order, timeline_positions};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    #[default]
    Network,
    Timeline,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn center(self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SimulationConfig {
    pub link_distance: f32,
    pub link_strength: f32,
    pub charge_strength: f32,
    pub barnes_hut_theta: f32,
    pub collision_radius: f32,
    pub collision_strength: f32,
    pub integrator: IntegratorConfig,
    /// Alpha held while a node is dragged, so neighbours keep reacting.
    pub drag_alpha_target: f32,
    /// Alpha restored when leaving the timeline.
    pub reheat_alpha: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            link_distance: 160.0,
            link_strength: 0.5,
            charge_strength: -40.0,
            barnes_hut_theta: 0.9,
            collision_radius: 30.0,
            collision_strength: 1.0,
            integrator: IntegratorConfig::default(),
            drag_alpha_target: 0.3,
            reheat_alpha: 1.0,
        }
    }
}

fn initial_position(index: usize, center: Vec2) -> Vec2 {
    let radius = 10.0 * (0.5 + index as f32).sqrt();
    let angle = index as f32 * PI * (3.0 - 5.0_f32.sqrt());
    center + vec2(angle.cos(), angle.sin()) * radius
}

/// Owns node positions for one graph and switches between the force and timeline layouts.
pub struct LayoutEngine {
    simulation: Box<dyn ForceSimulation>,
    mode: LayoutMode,
    viewport: Viewport,
    config: SimulationConfig,
    timeline: TimelineConfig,
    timeline_order: Vec<usize>,
    dragging: Option<usize>,
}

impl LayoutEngine {
    pub fn new(
        nodes: &[Node],
        links: &[Link],
        viewport: Viewport,
        config: SimulationConfig,
        timeline: TimelineConfig,
    ) -> Self {
        let mut simulation = Simulation::new(config.integrator);
        simulation.add_force(
            "link",
            Box::new(LinkForce::new(config.link_distance, config.link_strength)),
        );
        simulation.add_force(
            "charge",
            Box::new(ManyBodyForce::new(
                config.charge_strength,
                config.barnes_hut_theta,
            )),
        );
        simulation.add_force("center", Box::new(CenterForce::new(viewport.center())));
        simulation.add_force(
            "collision",
            Box::new(CollideForce::new(
                config.collision_radius,
                config.collision_strength,
            )),
        );

        Self::with_simulation(Box::new(simulation), nodes, links, viewport, config, timeline)
    }

    pub fn with_simulation(
        mut simulation: Box<dyn ForceSimulation>,
        nodes: &[Node],
        links: &[Link],
        viewport: Viewport,
        config: SimulationConfig,
        timeline: TimelineConfig,
    ) -> Self {
        let center = viewport.center();
        let bodies = (0..nodes.len())
            .map(|index| Body::at(initial_position(index, center)))
            .collect::<Vec<_>>();
        simulation.set_bodies(bodies);
        simulation.set_links(links);
        simulation.set_alpha(1.0);
        simulation.set_alpha_target(0.0);

        if nodes.is_empty() {
            simulation.stop();
        } else {
            simulation.restart();
        }

        Self {
            simulation,
            mode: LayoutMode::Network,
            viewport,
            config,
            timeline,
            timeline_order: timeline_order(nodes),
            dragging: None,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn shows_date_labels(&self) -> bool {
        self.mode == LayoutMode::Timeline
    }

    pub fn is_running(&self) -> bool {
        self.simulation.is_running()
    }

    pub fn alpha(&self) -> f32 {
        self.simulation.alpha()
    }

    pub fn bodies(&self) -> &[Body] {
        self.simulation.bodies()
    }

    pub fn position(&self, index: usize) -> Option<Vec2> {
        self.simulation.bodies().get(index).map(|body| body.position)
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// One animation frame. Only the network layout advances; returns whether it is still moving.
    pub fn tick(&mut self) -> bool {
        if self.mode != LayoutMode::Network {
            return false;
        }
        self.simulation.tick()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.simulation
            .add_force("center", Box::new(CenterForce::new(viewport.center())));
        if self.mode == LayoutMode::Timeline {
            self.pin_to_timeline();
        }
    }

    pub fn set_mode(&mut self, mode: LayoutMode) -> bool {
        match mode {
            LayoutMode::Network => self.enter_network(),
            LayoutMode::Timeline => self.enter_timeline(),
        }
    }

    pub fn toggle(&mut self) -> LayoutMode {
        match self.mode {
            LayoutMode::Network => self.enter_timeline(),
            LayoutMode::Timeline => self.enter_network(),
        };
        self.mode
    }

    /// Freezes physics and pins every node on the chronological row. No-op when already there.
    pub fn enter_timeline(&mut self) -> bool {
        if self.mode == LayoutMode::Timeline {
            return false;
        }

        // Stop first so no tick can move a body after it was placed.
        self.simulation.stop();
        self.simulation.set_alpha_target(0.0);
        self.dragging = None;
        self.mode = LayoutMode::Timeline;
        self.pin_to_timeline();
        debug!(nodes = self.timeline_order.len(), "entered timeline layout");
        true
    }

    /// Releases every pin and re-heats the simulation. No-op when already in the network layout.
    pub fn enter_network(&mut self) -> bool {
        if self.mode == LayoutMode::Network {
            return false;
        }

        for body in self.simulation.bodies_mut() {
            body.pin = None;
            body.velocity = Vec2::ZERO;
        }
        self.mode = LayoutMode::Network;

        if !self.simulation.bodies().is_empty() {
            self.simulation.set_alpha(self.config.reheat_alpha);
            self.simulation.set_alpha_target(0.0);
            self.simulation.restart();
        }
        debug!(
            nodes = self.simulation.bodies().len(),
            "entered network layout"
        );
        true
    }

    fn pin_to_timeline(&mut self) {
        let positions = timeline_positions(&self.timeline_order, self.viewport, self.timeline);
        for (body, position) in self.simulation.bodies_mut().iter_mut().zip(positions) {
            body.position = position;
            body.velocity = Vec2::ZERO;
            body.pin = Some(position);
        }
    }

    /// Pins the grabbed node and keeps the simulation warm. Ignored on the timeline.
    pub fn start_drag(&mut self, index: usize) -> bool {
        if self.mode != LayoutMode::Network {
            return false;
        }
        let Some(body) = self.simulation.bodies_mut().get_mut(index) else {
            return false;
        };

        body.pin = Some(body.position);
        self.dragging = Some(index);
        self.simulation
            .set_alpha_target(self.config.drag_alpha_target);
        self.simulation.restart();
        true
    }

    pub fn update_drag(&mut self, index: usize, position: Vec2) -> bool {
        if self.mode != LayoutMode::Network || self.dragging != Some(index) {
            return false;
        }
        let Some(body) = self.simulation.bodies_mut().get_mut(index) else {
            return false;
        };

        body.pin = Some(position);
        body.position = position;
        true
    }

    /// Releases the dragged node and lets the simulation cool back down.
    pub fn end_drag(&mut self, index: usize) -> bool {
        if self.mode != LayoutMode::Network || self.dragging != Some(index) {
            return false;
        }

        if let Some(body) = self.simulation.bodies_mut().get_mut(index) {
            body.pin = None;
        }
        self.dragging = None;
        self.simulation.set_alpha_target(0.0);
        true
    }

    /// Cancels the tick loop for good. Used before the owning session is replaced.
    pub fn stop(&mut self) {
        self.dragging = None;
        self.simulation.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::archive::Artifact;
    use crate::graph::links::build_links;
    use crate::graph::node::{build_node, node_id};

    const VIEWPORT: Viewport = Viewport {
        width: 1200.0,
        height: 800.0,
    };

    fn nodes(dates: &[Option<&str>]) -> Vec<Node> {
        dates
            .iter()
            .enumerate()
            .map(|(index, date)| {
                let artifact = Artifact {
                    tags: vec!["Social Justice".to_owned()],
                    date_created: date.map(str::to_owned),
                    ..Artifact::default()
                };
                build_node(Arc::new(artifact), node_id(index))
            })
            .collect()
    }

    fn engine(nodes: &[Node]) -> LayoutEngine {
        LayoutEngine::new(
            nodes,
            &build_links(nodes),
            VIEWPORT,
            SimulationConfig::default(),
            TimelineConfig::default(),
        )
    }

    #[derive(Default)]
    struct Calls {
        restarts: usize,
        stops: usize,
        ticks: usize,
    }

    /// Records the calls the engine makes, moves nothing on its own.
    struct RecordingSimulation {
        inner: Simulation,
        calls: Arc<Mutex<Calls>>,
    }

    impl ForceSimulation for RecordingSimulation {
        fn set_bodies(&mut self, bodies: Vec<Body>) {
            self.inner.set_bodies(bodies);
        }
        fn set_links(&mut self, links: &[Link]) {
            self.inner.set_links(links);
        }
        fn add_force(&mut self, name: &'static str, force: Box<dyn Force>) {
            self.inner.add_force(name, force);
        }
        fn bodies(&self) -> &[Body] {
            self.inner.bodies()
        }
        fn bodies_mut(&mut self) -> &mut [Body] {
            self.inner.bodies_mut()
        }
        fn tick(&mut self) -> bool {
            self.calls.lock().unwrap().ticks += 1;
            self.inner.tick()
        }
        fn alpha(&self) -> f32 {
            self.inner.alpha()
        }
        fn set_alpha(&mut self, alpha: f32) {
            self.inner.set_alpha(alpha);
        }
        fn set_alpha_target(&mut self, target: f32) {
            self.inner.set_alpha_target(target);
        }
        fn restart(&mut self) {
            self.calls.lock().unwrap().restarts += 1;
            self.inner.restart();
        }
        fn stop(&mut self) {
            self.calls.lock().unwrap().stops += 1;
            self.inner.stop();
        }
        fn is_running(&self) -> bool {
            self.inner.is_running()
        }
    }

    fn recording_engine(nodes: &[Node]) -> (LayoutEngine, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let simulation = RecordingSimulation {
            inner: Simulation::new(IntegratorConfig::default()),
            calls: Arc::clone(&calls),
        };
        let engine = LayoutEngine::with_simulation(
            Box::new(simulation),
            nodes,
            &build_links(nodes),
            VIEWPORT,
            SimulationConfig::default(),
            TimelineConfig::default(),
        );
        (engine, calls)
    }

    #[test]
    fn starts_in_network_mode_and_running() {
        let nodes = nodes(&[Some("2025-01-01"), Some("2025-02-01")]);
        let mut engine = engine(&nodes);
        assert_eq!(engine.mode(), LayoutMode::Network);
        assert!(engine.is_running());
        assert!(!engine.shows_date_labels());
        assert!(engine.tick());
    }

    #[test]
    fn empty_graph_never_starts_the_integrator() {
        let mut engine = engine(&[]);
        assert!(!engine.is_running());
        assert!(!engine.tick());
        assert!(engine.enter_timeline());
        assert!(engine.enter_network());
        assert!(!engine.is_running());
        assert!(engine.bodies().is_empty());
    }

    #[test]
    fn network_ticks_settle_linked_nodes_near_the_centre() {
        let nodes = nodes(&[None, None, None, None]);
        let mut engine = engine(&nodes);
        for _ in 0..600 {
            engine.tick();
        }
        let mut mean = Vec2::ZERO;
        for body in engine.bodies() {
            mean += body.position;
        }
        mean /= engine.bodies().len() as f32;
        assert!((mean - VIEWPORT.center()).length() < 1.0);

        for (index, a) in engine.bodies().iter().enumerate() {
            for b in &engine.bodies()[index + 1..] {
                let distance = (a.position - b.position).length();
                assert!(distance > 30.0, "bodies overlap at distance {distance}");
                assert!(distance < 400.0, "bodies drifted apart to {distance}");
            }
        }
    }

    #[test]
    fn timeline_pins_nodes_in_chronological_order() {
        let nodes = nodes(&[
            Some("2025-05-01"),
            None,
            Some("2023-01-15"),
            Some("2025-05-01"),
        ]);
        let mut engine = engine(&nodes);
        engine.tick();

        assert!(engine.enter_timeline());
        assert_eq!(engine.mode(), LayoutMode::Timeline);
        assert!(!engine.is_running());
        assert!(engine.shows_date_labels());

        let bodies = engine.bodies();
        assert!(bodies.iter().all(Body::is_pinned));
        assert!(bodies.iter().all(|body| body.position.y == VIEWPORT.center().y));
        let xs = [2, 0, 3, 1].map(|index| bodies[index].position.x);
        assert!(xs.windows(2).all(|pair| pair[0] < pair[1]), "{xs:?}");
        assert_eq!(xs[0], 80.0);
        assert_eq!(xs[3], VIEWPORT.width - 80.0);
    }

    #[test]
    fn timeline_does_not_advance() {
        let nodes = nodes(&[Some("2025-01-01"), Some("2024-01-01")]);
        let mut engine = engine(&nodes);
        engine.enter_timeline();
        let before = engine.bodies().to_vec();
        for _ in 0..10 {
            assert!(!engine.tick());
        }
        assert_eq!(engine.bodies(), before.as_slice());
    }

    #[test]
    fn reentering_a_mode_is_a_no_op() {
        let nodes = nodes(&[Some("2025-01-01"), Some("2024-01-01"), None]);
        let (mut engine, calls) = recording_engine(&nodes);
        let restarts_after_build = calls.lock().unwrap().restarts;

        assert!(!engine.enter_network());
        assert_eq!(calls.lock().unwrap().restarts, restarts_after_build);

        assert!(engine.enter_timeline());
        let pinned = engine.bodies().to_vec();
        let stops = calls.lock().unwrap().stops;
        assert!(!engine.enter_timeline());
        assert!(!engine.set_mode(LayoutMode::Timeline));
        assert_eq!(engine.bodies(), pinned.as_slice());
        assert_eq!(calls.lock().unwrap().stops, stops);
        assert_eq!(calls.lock().unwrap().restarts, restarts_after_build);
    }

    #[test]
    fn round_trip_releases_every_pin_and_resumes() {
        let nodes = nodes(&[Some("2025-01-01"), Some("2024-01-01"), None]);
        let mut engine = engine(&nodes);
        assert_eq!(engine.toggle(), LayoutMode::Timeline);
        assert_eq!(engine.toggle(), LayoutMode::Network);

        assert!(engine.bodies().iter().all(|body| !body.is_pinned()));
        assert!(engine.is_running());
        assert!(!engine.shows_date_labels());
        assert!((engine.alpha() - SimulationConfig::default().reheat_alpha).abs() < f32::EPSILON);
        assert!(engine.tick());
    }

    #[test]
    fn drag_pins_and_release_unpins() {
        let nodes = nodes(&[None, None, None]);
        let mut engine = engine(&nodes);

        assert!(engine.start_drag(1));
        assert_eq!(engine.dragging(), Some(1));
        assert!(engine.update_drag(1, vec2(42.0, 24.0)));
        for _ in 0..5 {
            engine.tick();
        }
        assert_eq!(engine.position(1), Some(vec2(42.0, 24.0)));
        assert!(engine.bodies()[1].is_pinned());

        assert!(engine.end_drag(1));
        assert!(!engine.bodies()[1].is_pinned());
        assert_eq!(engine.dragging(), None);
        assert!(!engine.update_drag(1, vec2(0.0, 0.0)));
    }

    #[test]
    fn drag_keeps_the_simulation_warm_until_released() {
        let nodes = nodes(&[None, None]);
        let mut engine = engine(&nodes);
        engine.start_drag(0);
        for _ in 0..2_000 {
            assert!(engine.tick());
        }
        assert!(engine.alpha() > 0.2);
        engine.end_drag(0);
        while engine.tick() {}
        assert!(!engine.is_running());
    }

    #[test]
    fn drag_is_ignored_on_the_timeline() {
        let nodes = nodes(&[Some("2025-01-01"), Some("2024-01-01")]);
        let mut engine = engine(&nodes);
        engine.enter_timeline();
        let before = engine.bodies().to_vec();
        assert!(!engine.start_drag(0));
        assert!(!engine.update_drag(0, vec2(1.0, 1.0)));
        assert!(!engine.end_drag(0));
        assert_eq!(engine.bodies(), before.as_slice());
        assert!(!engine.is_running());
    }

    #[test]
    fn entering_timeline_cancels_an_active_drag() {
        let nodes = nodes(&[Some("2025-01-01"), Some("2024-01-01")]);
        let mut engine = engine(&nodes);
        engine.start_drag(0);
        engine.enter_timeline();
        assert_eq!(engine.dragging(), None);
        engine.enter_network();
        assert!(engine.bodies().iter().all(|body| !body.is_pinned()));
    }

    #[test]
    fn resizing_repins_the_timeline() {
        let nodes = nodes(&[Some("2025-01-01"), Some("2024-01-01")]);
        let mut engine = engine(&nodes);
        engine.enter_timeline();
        engine.set_viewport(Viewport {
            width: 600.0,
            height: 400.0,
        });
        assert_eq!(engine.position(1), Some(vec2(80.0, 200.0)));
        assert_eq!(engine.position(0), Some(vec2(520.0, 200.0)));
        assert_eq!(engine.bodies()[0].pin, Some(vec2(520.0, 200.0)));
    }

    #[test]
    fn stop_cancels_the_tick_loop() {
        let nodes = nodes(&[None, None]);
        let (mut engine, calls) = recording_engine(&nodes);
        engine.stop();
        assert!(!engine.tick());
        assert!(!engine.is_running());
        assert!(calls.lock().unwrap().stops >= 1);
    }
}
