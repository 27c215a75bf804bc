use std::collections::VecDeque;
use std::time::Duration;

use crate::backend::{Primitive, RenderStates, RenderTarget, TextureRef, Vertex};
use crate::foundation::core::{Color, Point, Vec2};

/// A single live particle.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    /// Center position in the emitter node's local space.
    pub position: Point,
    /// Velocity, for the affector's use.
    pub velocity: Vec2,
    /// Base color; alpha is overridden by the lifetime fade.
    pub color: Color,
    /// Quad extents.
    pub size: Vec2,
    /// Remaining lifetime.
    pub lifetime: Duration,
}

/// Produces a fresh particle; its `lifetime` doubles as the fade reference.
pub type Initializer = Box<dyn FnMut() -> Particle>;

/// Mutates a particle each update step.
pub type Affector = Box<dyn FnMut(&mut Particle, Duration)>;

/// Particle emitter node.
///
/// Behavior is supplied by two closures: an initializer spawning particles at
/// the emitter position and an affector advancing them each step. Particles
/// fade out linearly over their lifetime and expire from the front of the
/// pool. The vertex batch is rebuilt every update and drawn as textured quads.
pub struct ParticleSystem {
    max_particles: usize,
    texture: Option<TextureRef>,
    emitter_active: bool,
    emitter_position: Point,
    base_lifetime: Duration,
    initializer: Option<Initializer>,
    affector: Option<Affector>,
    particles: VecDeque<Particle>,
    vertices: Vec<Vertex>,
}

impl ParticleSystem {
    /// Emitter capped at `max_particles` live particles; `0` means unlimited.
    pub fn new(max_particles: usize, texture: Option<TextureRef>) -> Self {
        Self {
            max_particles,
            texture,
            emitter_active: false,
            emitter_position: Point::ZERO,
            base_lifetime: Duration::ZERO,
            initializer: None,
            affector: None,
            particles: VecDeque::new(),
            vertices: Vec::new(),
        }
    }

    /// Install the spawn closure.
    ///
    /// It is sampled once here to learn the reference lifetime used for the
    /// alpha fade, so it must report the same lifetime on every call.
    pub fn set_initializer(&mut self, mut initializer: impl FnMut() -> Particle + 'static) {
        self.base_lifetime = initializer().lifetime;
        self.initializer = Some(Box::new(initializer));
    }

    /// Install the per-step mutation closure.
    pub fn set_affector(&mut self, affector: impl FnMut(&mut Particle, Duration) + 'static) {
        self.affector = Some(Box::new(affector));
    }

    /// Start or stop spawning and advancing particles.
    pub fn set_emitter_active(&mut self, active: bool) {
        self.emitter_active = active;
    }

    /// Whether the emitter currently runs.
    pub fn emitter_active(&self) -> bool {
        self.emitter_active
    }

    /// Move the spawn point in local space.
    pub fn set_emitter_position(&mut self, position: Point) {
        self.emitter_position = position;
    }

    /// Current spawn point.
    pub fn emitter_position(&self) -> Point {
        self.emitter_position
    }

    /// Number of live particles.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Live particles, oldest first.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub(crate) fn update(&mut self, dt: Duration) {
        if !self.emitter_active {
            return;
        }
        let (Some(initializer), Some(affector)) = (&mut self.initializer, &mut self.affector)
        else {
            tracing::warn!("particle system has no initializer or affector set, skipping update");
            return;
        };
        if self.base_lifetime.is_zero() {
            tracing::warn!("particle lifetime of zero, skipping update");
            return;
        }

        if self.max_particles == 0 || self.particles.len() < self.max_particles {
            let mut particle = initializer();
            particle.position = self.emitter_position;
            self.particles.push_back(particle);
        }

        for particle in &mut self.particles {
            affector(particle, dt);
            particle.lifetime = particle.lifetime.saturating_sub(dt);
        }

        // Oldest-first expiry: one pop per update is enough since particles
        // age at the same rate they spawned.
        if self
            .particles
            .front()
            .is_some_and(|p| p.lifetime.is_zero())
        {
            self.particles.pop_front();
        }

        self.rebuild_vertices();
    }

    fn rebuild_vertices(&mut self) {
        self.vertices.clear();

        let base = self.base_lifetime.as_secs_f64();
        let tex_size = self.texture.map_or(Vec2::ZERO, |t| {
            Vec2::new(f64::from(t.width), f64::from(t.height))
        });

        for particle in &self.particles {
            let ratio = particle.lifetime.as_secs_f64() / base;
            let alpha = (255.0 * ratio.clamp(0.0, 1.0)) as u8;
            let color = particle.color.with_alpha(alpha);

            let half = particle.size / 2.0;
            let pos = particle.position;
            self.vertices.extend([
                Vertex {
                    position: Point::new(pos.x - half.x, pos.y - half.y),
                    tex_coords: Point::new(0.0, 0.0),
                    color,
                },
                Vertex {
                    position: Point::new(pos.x + half.x, pos.y - half.y),
                    tex_coords: Point::new(tex_size.x, 0.0),
                    color,
                },
                Vertex {
                    position: Point::new(pos.x + half.x, pos.y + half.y),
                    tex_coords: Point::new(tex_size.x, tex_size.y),
                    color,
                },
                Vertex {
                    position: Point::new(pos.x - half.x, pos.y + half.y),
                    tex_coords: Point::new(0.0, tex_size.y),
                    color,
                },
            ]);
        }
    }

    pub(crate) fn draw(&self, target: &mut dyn RenderTarget, states: &RenderStates) {
        let states = RenderStates {
            texture: self.texture.map(|t| t.id),
            ..*states
        };
        target.draw_vertices(Primitive::Quads, &self.vertices, &states);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/particles.rs"]
mod tests;
