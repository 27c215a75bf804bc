use std::time::Duration;

use super::*;

fn spark(lifetime: Duration) -> Particle {
    Particle {
        position: Point::ZERO,
        velocity: Vec2::new(1.0, 0.0),
        color: Color::WHITE,
        size: Vec2::new(2.0, 2.0),
        lifetime,
    }
}

fn configured(max: usize) -> ParticleSystem {
    let mut system = ParticleSystem::new(max, None);
    system.set_initializer(|| spark(Duration::from_secs(1)));
    system.set_affector(|particle, dt| {
        particle.position += particle.velocity * dt.as_secs_f64();
    });
    system.set_emitter_active(true);
    system
}

const DT: Duration = Duration::from_millis(100);

#[test]
fn unconfigured_update_degrades_without_spawning() {
    let mut system = ParticleSystem::new(0, None);
    system.set_emitter_active(true);
    system.update(DT);
    assert_eq!(system.particle_count(), 0);
}

#[test]
fn inactive_emitter_does_nothing() {
    let mut system = configured(0);
    system.set_emitter_active(false);
    system.update(DT);
    assert_eq!(system.particle_count(), 0);
}

#[test]
fn particles_spawn_at_the_emitter() {
    let mut system = configured(0);
    system.set_emitter_position(Point::new(3.0, 4.0));
    system.update(DT);

    let spawned = system.particles().next().unwrap();
    // One affector step has already run.
    assert!((spawned.position.x - 3.1).abs() < 1e-9);
    assert_eq!(spawned.position.y, 4.0);
}

#[test]
fn max_particles_caps_the_pool() {
    let mut system = configured(2);
    for _ in 0..5 {
        system.update(DT);
    }
    assert_eq!(system.particle_count(), 2);
}

#[test]
fn zero_max_means_unlimited() {
    let mut system = configured(0);
    for _ in 0..5 {
        system.update(DT);
    }
    assert_eq!(system.particle_count(), 5);
}

#[test]
fn expired_particles_leave_from_the_front() {
    let mut system = configured(0);
    // Each particle lives ten 100ms steps; from the tenth update on, one
    // expires for every one spawned.
    for _ in 0..10 {
        system.update(DT);
    }
    assert_eq!(system.particle_count(), 9);

    system.update(DT);
    assert_eq!(system.particle_count(), 9);
    let oldest = system.particles().next().unwrap();
    assert!(oldest.lifetime > Duration::ZERO);
}

#[test]
fn alpha_fades_with_remaining_lifetime() {
    let mut system = ParticleSystem::new(1, None);
    system.set_initializer(|| spark(Duration::from_secs(1)));
    system.set_affector(|_, _| {});
    system.set_emitter_active(true);

    // One particle aged half its lifetime.
    for _ in 0..5 {
        system.update(DT);
    }

    let remaining = system.particles().next().unwrap().lifetime;
    assert_eq!(remaining, Duration::from_millis(500));

    // Four quad vertices, all at half alpha.
    let mut recorder = VertexRecorder::default();
    system.draw(&mut recorder, &RenderStates::default());
    let vertices = recorder.vertices.into_inner();
    assert_eq!(vertices.len(), 4);
    assert!(vertices.iter().all(|v| v.color.a == 127));
}

use std::cell::RefCell;

use crate::backend::{RenderTarget, TextSpec};

#[derive(Default)]
struct VertexRecorder {
    vertices: RefCell<Vec<Vertex>>,
}

impl RenderTarget for VertexRecorder {
    fn clear(&mut self, _color: Color) {}

    fn draw_vertices(&mut self, primitive: Primitive, vertices: &[Vertex], _: &RenderStates) {
        assert_eq!(primitive, Primitive::Quads);
        self.vertices.borrow_mut().extend_from_slice(vertices);
    }

    fn draw_text(&mut self, _: &TextSpec<'_>, _: Color, _: &RenderStates) {}
}
