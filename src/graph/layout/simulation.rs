use eframe::egui::Vec2;

use crate::graph::links::Link;

/// Simulated body for one node: position, velocity and an optional pinned position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub pin: Option<Vec2>,
}

impl Body {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            pin: None,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }
}

/// One contribution to body velocities per tick.
pub trait Force: Send {
    fn initialize(&mut self, _bodies: &[Body], _links: &[Link]) {}

    fn apply(&mut self, bodies: &mut [Body], alpha: f32);
}

/// Physics integrator the layout engine drives. Swappable, so the engine only talks to this.
pub trait ForceSimulation: Send {
    fn set_bodies(&mut self, bodies: Vec<Body>);
    fn set_links(&mut self, links: &[Link]);
    /// Registers `force` under `name`, replacing any force already registered there.
    fn add_force(&mut self, name: &'static str, force: Box<dyn Force>);
    fn bodies(&self) -> &[Body];
    fn bodies_mut(&mut self) -> &mut [Body];
    /// Advances one step. A stopped simulation does not move. Returns whether it is still running.
    fn tick(&mut self) -> bool;
    fn alpha(&self) -> f32;
    fn set_alpha(&mut self, alpha: f32);
    fn set_alpha_target(&mut self, target: f32);
    fn restart(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

#[derive(Clone, Copy, Debug)]
pub struct IntegratorConfig {
    pub alpha_min: f32,
    pub alpha_decay: f32,
    pub velocity_decay: f32,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            alpha_min: 0.001,
            alpha_decay: 0.01,
            velocity_decay: 0.4,
        }
    }
}

/// Velocity-Verlet style integrator with an alpha "temperature" that cools toward a target.
pub struct Simulation {
    bodies: Vec<Body>,
    links: Vec<Link>,
    forces: Vec<(&'static str, Box<dyn Force>)>,
    alpha: f32,
    alpha_target: f32,
    config: IntegratorConfig,
    running: bool,
}

impl Simulation {
    pub fn new(config: IntegratorConfig) -> Self {
        Self {
            bodies: Vec::new(),
            links: Vec::new(),
            forces: Vec::new(),
            alpha: 1.0,
            alpha_target: 0.0,
            config,
            running: false,
        }
    }

    fn initialize_forces(&mut self) {
        for (_, force) in &mut self.forces {
            force.initialize(&self.bodies, &self.links);
        }
    }
}

impl ForceSimulation for Simulation {
    fn set_bodies(&mut self, bodies: Vec<Body>) {
        self.bodies = bodies;
        self.initialize_forces();
    }

    fn set_links(&mut self, links: &[Link]) {
        self.links = links.to_vec();
        self.initialize_forces();
    }

    fn add_force(&mut self, name: &'static str, mut force: Box<dyn Force>) {
        force.initialize(&self.bodies, &self.links);
        if let Some(slot) = self.forces.iter_mut().find(|(existing, _)| *existing == name) {
            slot.1 = force;
        } else {
            self.forces.push((name, force));
        }
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    fn tick(&mut self) -> bool {
        if !self.running || self.bodies.is_empty() {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

        for (_, force) in &mut self.forces {
            force.apply(&mut self.bodies, self.alpha);
        }

        let retain = 1.0 - self.config.velocity_decay;
        for body in &mut self.bodies {
            if let Some(pin) = body.pin {
                body.position = pin;
                body.velocity = Vec2::ZERO;
            } else {
                body.velocity *= retain;
                body.position += body.velocity;
            }
        }

        if self.alpha < self.config.alpha_min {
            self.running = false;
        }
        self.running
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_alpha_target(&mut self, target: f32) {
        self.alpha_target = target.clamp(0.0, 1.0);
    }

    fn restart(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
