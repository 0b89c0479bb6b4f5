//! Ephemeral decorative particles spawned on thrust, score and impact.
//!
//! Purely cosmetic; nothing here feeds back into gameplay.

use crate::bird::Bird;
use crate::constants::{
    EXPLOSION_BURST_COUNT, PARTICLE_ALPHA_DECAY, PARTICLE_LIFE_TICKS, SCORE_BURST_COUNT,
};
use rand::Rng;

/// Which event spawned a particle; the scene maps this to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Trail,
    Score,
    Explosion,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub size: f64,
    pub kind: ParticleKind,
    pub alpha: f64,
    pub life: i32,
}

impl Particle {
    fn new<R: Rng>(rng: &mut R, x: f64, y: f64, dx: f64, dy: f64, kind: ParticleKind, alpha: f64) -> Self {
        Self {
            x,
            y,
            dx,
            dy,
            size: rng.gen_range(2.0..7.0),
            kind,
            alpha,
            life: PARTICLE_LIFE_TICKS,
        }
    }

    pub fn update(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
        self.life -= 1;
        self.alpha -= PARTICLE_ALPHA_DECAY;
    }

    pub fn expired(&self) -> bool {
        self.life <= 0 || self.alpha <= 0.0
    }
}

/// Single engine-trail puff just behind the bird.
pub fn spawn_trail<R: Rng>(rng: &mut R, bird: &Bird) -> Particle {
    let dx = rng.gen_range(1.0..4.0);
    let dy = rng.gen_range(1.0..4.0);
    Particle::new(
        rng,
        bird.x - 5.0,
        bird.y + bird.height / 2.0,
        dx,
        dy,
        ParticleKind::Trail,
        0.7,
    )
}

/// Celebration burst at the bird's nose when a pipe is scored.
pub fn spawn_score_burst<R: Rng>(rng: &mut R, out: &mut Vec<Particle>, x: f64, y: f64) {
    for _ in 0..SCORE_BURST_COUNT {
        let dx = rng.gen_range(-1.5..1.5);
        let dy = rng.gen_range(-1.5..1.5);
        out.push(Particle::new(rng, x, y, dx, dy, ParticleKind::Score, 1.0));
    }
}

/// Explosion burst at the bird's last position on termination.
pub fn spawn_explosion<R: Rng>(rng: &mut R, out: &mut Vec<Particle>, x: f64, y: f64) {
    for _ in 0..EXPLOSION_BURST_COUNT {
        let dx = rng.gen_range(-3.0..3.0);
        let dy = rng.gen_range(-3.0..3.0);
        out.push(Particle::new(rng, x, y, dx, dy, ParticleKind::Explosion, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::Canvas;
    use crate::ruleset::Ruleset;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_trail_spawns_behind_bird() {
        let canvas = Canvas::standard();
        let rules = Ruleset::assisted();
        let bird = Bird::new(&canvas, &rules);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let p = spawn_trail(&mut rng, &bird);
        assert!((p.x - (bird.x - 5.0)).abs() < f64::EPSILON);
        assert!((p.y - (bird.y + bird.height / 2.0)).abs() < f64::EPSILON);
        assert_eq!(p.kind, ParticleKind::Trail);
        assert!(p.dx >= 1.0 && p.dx < 4.0);
        assert!(p.size >= 2.0 && p.size < 7.0);
    }

    #[test]
    fn test_burst_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut out = Vec::new();
        spawn_score_burst(&mut rng, &mut out, 10.0, 10.0);
        assert_eq!(out.len(), SCORE_BURST_COUNT);
        spawn_explosion(&mut rng, &mut out, 10.0, 10.0);
        assert_eq!(out.len(), SCORE_BURST_COUNT + EXPLOSION_BURST_COUNT);
    }

    #[test]
    fn test_particle_expires_by_life() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut out = Vec::new();
        spawn_score_burst(&mut rng, &mut out, 0.0, 0.0);
        let p = &mut out[0];
        for _ in 0..PARTICLE_LIFE_TICKS {
            assert!(!p.expired());
            p.update();
        }
        assert!(p.expired());
    }

    #[test]
    fn test_particle_expires_by_alpha() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let canvas = Canvas::standard();
        let rules = Ruleset::assisted();
        let bird = Bird::new(&canvas, &rules);
        let mut p = spawn_trail(&mut rng, &bird);
        p.life = 1000; // force the alpha path
        let mut ticks = 0;
        while !p.expired() {
            p.update();
            ticks += 1;
            assert!(ticks < 100, "alpha decay never expired the particle");
        }
        assert!(p.alpha <= 0.0);
    }
}
