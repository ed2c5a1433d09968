use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadTree;
use super::simulation::{Body, Force};
use crate::graph::links::Link;

const MIN_DISTANCE_SQ: f32 = 1.0;

// Deterministic stand-in direction for bodies sitting exactly on top of each other.
fn separation_direction(from: usize, to: usize) -> Vec2 {
    let angle = ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin()) * 1e-3
}

/// Spring along every link toward a fixed rest length.
pub struct LinkForce {
    links: Vec<Link>,
    bias: Vec<f32>,
    distance: f32,
    strength: f32,
}

impl LinkForce {
    pub fn new(distance: f32, strength: f32) -> Self {
        Self {
            links: Vec::new(),
            bias: Vec::new(),
            distance,
            strength,
        }
    }
}

impl Force for LinkForce {
    fn initialize(&mut self, bodies: &[Body], links: &[Link]) {
        let mut degree = vec![0usize; bodies.len()];
        self.links = links
            .iter()
            .copied()
            .filter(|link| {
                link.source != link.target
                    && link.source < bodies.len()
                    && link.target < bodies.len()
            })
            .collect();
        for link in &self.links {
            degree[link.source] += 1;
            degree[link.target] += 1;
        }

        // Lower-degree endpoints move more, so hubs stay comparatively still.
        self.bias = self
            .links
            .iter()
            .map(|link| {
                let source = degree[link.source] as f32;
                source / (source + degree[link.target] as f32)
            })
            .collect();
    }

    fn apply(&mut self, bodies: &mut [Body], alpha: f32) {
        for (link, &bias) in self.links.iter().zip(&self.bias) {
            let (source, target) = (link.source, link.target);
            let mut delta = (bodies[target].position + bodies[target].velocity)
                - (bodies[source].position + bodies[source].velocity);
            if delta.length_sq() <= f32::EPSILON {
                delta = separation_direction(source, target);
            }

            let distance = delta.length();
            let scale = (distance - self.distance) / distance * alpha * self.strength;
            let correction = delta * scale;

            bodies[target].velocity -= correction * bias;
            bodies[source].velocity += correction * (1.0 - bias);
        }
    }
}

/// All-pairs charge, approximated with a Barnes-Hut quadtree. Negative strength repels.
pub struct ManyBodyForce {
    strength: f32,
    theta: f32,
    positions: Vec<Vec2>,
    deltas: Vec<Vec2>,
}

impl ManyBodyForce {
    pub fn new(strength: f32, theta: f32) -> Self {
        Self {
            strength,
            theta,
            positions: Vec::new(),
            deltas: Vec::new(),
        }
    }

    fn delta_for(&self, tree: &QuadTree, index: usize, alpha: f32) -> Vec2 {
        let point = self.positions[index];
        let theta_sq = self.theta * self.theta;
        let mut delta = Vec2::ZERO;

        tree.visit(|cell| {
            if cell.charge == 0.0 {
                return true;
            }

            if !cell.is_leaf() {
                let offset = cell.centroid - point;
                let distance_sq = offset.length_sq().max(MIN_DISTANCE_SQ);
                let width = cell.extent.size;
                // A distant cell acts as one body carrying the charge of everything below it.
                if !cell.extent.contains(point) && width * width / theta_sq < distance_sq {
                    delta += offset * (cell.charge * alpha / distance_sq);
                    return true;
                }
                return false;
            }

            for &other in cell.bodies.iter().filter(|&&other| other != index) {
                let mut offset = self.positions[other] - point;
                if offset.length_sq() <= f32::EPSILON {
                    offset = separation_direction(index, other);
                }
                let distance_sq = offset.length_sq().max(MIN_DISTANCE_SQ);
                delta += offset * (self.strength * alpha / distance_sq);
            }
            true
        });

        delta
    }
}

impl Force for ManyBodyForce {
    fn apply(&mut self, bodies: &mut [Body], alpha: f32) {
        self.positions.clear();
        self.positions.extend(bodies.iter().map(|body| body.position));

        let strength = self.strength;
        let Some(tree) = QuadTree::build(&self.positions, |_| strength) else {
            return;
        };

        let deltas = (0..bodies.len())
            .map(|index| self.delta_for(&tree, index, alpha))
            .collect::<Vec<_>>();
        self.deltas = deltas;

        for (body, delta) in bodies.iter_mut().zip(&self.deltas) {
            body.velocity += *delta;
        }
    }
}

/// Translates the whole system so its mean position sits on `center`.
pub struct CenterForce {
    center: Vec2,
}

impl CenterForce {
    pub fn new(center: Vec2) -> Self {
        Self { center }
    }
}

impl Force for CenterForce {
    fn apply(&mut self, bodies: &mut [Body], _alpha: f32) {
        if bodies.is_empty() {
            return;
        }

        let mut mean = Vec2::ZERO;
        for body in bodies.iter() {
            mean += body.position;
        }
        mean /= bodies.len() as f32;

        let shift = self.center - mean;
        for body in bodies.iter_mut() {
            body.position += shift;
        }
    }
}

/// Pushes apart bodies closer than twice the collision radius.
pub struct CollideForce {
    radius: f32,
    strength: f32,
    predicted: Vec<Vec2>,
    deltas: Vec<Vec2>,
}

impl CollideForce {
    pub fn new(radius: f32, strength: f32) -> Self {
        Self {
            radius,
            strength,
            predicted: Vec::new(),
            deltas: Vec::new(),
        }
    }

    fn resolve_pair(&mut self, from: usize, to: usize) {
        let min_distance = self.radius * 2.0;
        let mut offset = self.predicted[from] - self.predicted[to];
        if offset.length_sq() <= f32::EPSILON {
            offset = separation_direction(from, to);
        }

        let distance = offset.length();
        if distance >= min_distance {
            return;
        }

        // Equal radii: each body takes half of the correction.
        let push = offset * ((min_distance - distance) / distance * self.strength * 0.5);
        self.deltas[from] += push;
        self.deltas[to] -= push;
    }
}

impl Force for CollideForce {
    fn apply(&mut self, bodies: &mut [Body], _alpha: f32) {
        self.predicted.clear();
        self.predicted
            .extend(bodies.iter().map(|body| body.position + body.velocity));

        let Some(tree) = QuadTree::build(&self.predicted, |_| 1.0) else {
            return;
        };

        self.deltas.clear();
        self.deltas.resize(bodies.len(), Vec2::ZERO);

        let reach = self.radius * 2.0;
        let mut pairs = Vec::new();
        for index in 0..bodies.len() {
            let point = self.predicted[index];
            tree.visit(|cell| {
                if cell.extent.beyond(point, reach) {
                    return true;
                }
                // Each pair is reported once, from its lower index.
                pairs.extend(
                    cell.bodies
                        .iter()
                        .filter(|&&other| other > index)
                        .map(|&other| (index, other)),
                );
                false
            });
        }
        for (from, to) in pairs {
            self.resolve_pair(from, to);
        }

        for (body, delta) in bodies.iter_mut().zip(&self.deltas) {
            body.velocity += *delta;
        }
    }
}
