//! The simulation core: typed entity collections, cooldown timers, and a
//! single `tick(dt)` pipeline. No rendering, no audio device, no globals;
//! sound requests come back to the caller as [`SoundCue`]s.

pub mod asteroid;
pub mod bullet;
pub mod collision;
pub mod particle;
pub mod ship;
pub mod spawn;
pub mod ufo;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::style::Color;

use crate::audio::SoundCue;
use crate::config::Tuning;
use crate::geometry::{Bounds, Vec2};
use crate::input::InputState;

use asteroid::Asteroid;
use bullet::Bullet;
use particle::Particle;
use ship::Ship;
use ufo::Ufo;

// Fractions of the tunable base particle lifetime.
const EXPLOSION_LIFETIME_FRACTION: f32 = 0.75;
const THRUST_LIFETIME_FRACTION: f32 = 0.5;
const CELEBRATION_PARTICLE_COUNT: usize = 40;
const SHIP_EXPLOSION_PARTICLE_COUNT: usize = 30;
const UFO_EXPLOSION_PARTICLE_COUNT: usize = 20;

const SHIP_EXPLOSION_COLOR: Color = Color::Rgb(255, 0, 0);
const UFO_EXPLOSION_COLOR: Color = Color::Rgb(255, 0, 255);
const THRUST_COLOR: Color = Color::Rgb(255, 165, 0);
const CELEBRATION_COLOR: Color = Color::Rgb(255, 215, 80);

/// Whole simulation state for one session. Owned by the app, passed by
/// reference into every update; there is no ambient game instance.
pub struct Game {
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    /// Player-fired shots.
    pub bullets: Vec<Bullet>,
    /// Saucer-fired shots; same type, different owner set.
    pub ufo_bullets: Vec<Bullet>,
    pub ufos: Vec<Ufo>,
    pub particles: Vec<Particle>,

    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub level: u32,
    pub game_over: bool,

    pub shoot_cooldown: f32,
    pub ufo_spawn_timer: f32,
    /// Remaining shake time in seconds; the renderer scales its jitter by
    /// the remaining fraction.
    pub screen_shake: f32,
    /// Cumulative simulated seconds; drives the UFO wobble.
    pub sim_time: f32,

    pub tuning: Tuning,
    pub rng: SmallRng,
    sounds: Vec<SoundCue>,
}

impl Game {
    pub fn new(tuning: Tuning, bounds: Bounds) -> Self {
        Self::with_rng(tuning, bounds, SmallRng::from_entropy())
    }

    /// Deterministic constructor for tests and replays.
    pub fn with_seed(tuning: Tuning, bounds: Bounds, seed: u64) -> Self {
        Self::with_rng(tuning, bounds, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(tuning: Tuning, bounds: Bounds, rng: SmallRng) -> Self {
        let mut game = Game {
            ship: Ship::new(bounds.center()),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            ufo_bullets: Vec::new(),
            ufos: Vec::new(),
            particles: Vec::new(),
            score: 0,
            high_score: 0,
            lives: tuning.starting_lives,
            level: 1,
            game_over: false,
            shoot_cooldown: 0.0,
            ufo_spawn_timer: tuning.ufo_spawn_interval,
            screen_shake: 0.0,
            sim_time: 0.0,
            tuning,
            rng,
            sounds: Vec::new(),
        };
        let count = spawn::asteroid_count(game.level);
        spawn::place_asteroids(&mut game, bounds, count);
        game
    }

    /// Full restart: everything resets except the running high score.
    pub fn reset(&mut self, bounds: Bounds) {
        let tuning = self.tuning.clone();
        let high_score = self.high_score;
        let rng = SmallRng::from_rng(&mut self.rng).unwrap_or_else(|_| SmallRng::seed_from_u64(0));
        *self = Game::with_rng(tuning, bounds, rng);
        self.high_score = high_score;
    }

    /// Advance the simulation by `dt` real seconds. Order: timers, input,
    /// entity updates, expiry pruning, UFO spawning, collision passes,
    /// level bookkeeping. Returns the sound cues this tick produced.
    pub fn tick(&mut self, dt: f32, bounds: Bounds, input: InputState) -> Vec<SoundCue> {
        if self.game_over {
            return Vec::new();
        }

        self.sim_time += dt;
        self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
        if self.screen_shake > 0.0 {
            self.screen_shake -= dt;
        }

        self.apply_input(dt, input);
        self.ship.update(dt, bounds, &self.tuning);

        for bullet in &mut self.bullets {
            bullet.update(dt, bounds);
        }
        self.bullets.retain(Bullet::is_alive);
        for bullet in &mut self.ufo_bullets {
            bullet.update(dt, bounds);
        }
        self.ufo_bullets.retain(Bullet::is_alive);

        for rock in &mut self.asteroids {
            rock.update(dt, bounds);
        }

        self.update_ufos(dt, bounds);

        for spark in &mut self.particles {
            spark.update(dt, bounds);
        }
        self.particles.retain(Particle::is_alive);

        self.ufo_spawn_timer -= dt;
        if self.ufo_spawn_timer <= 0.0 {
            self.ufo_spawn_timer = self.tuning.ufo_spawn_interval;
            spawn::spawn_ufo(self, bounds);
        }

        collision::resolve(self, bounds);

        if self.asteroids.is_empty() && !self.game_over {
            self.next_level(bounds);
        }

        std::mem::take(&mut self.sounds)
    }

    fn apply_input(&mut self, dt: f32, input: InputState) {
        if input.rotate_left {
            self.ship.rotate(-self.tuning.turn_speed * dt);
        }
        if input.rotate_right {
            self.ship.rotate(self.tuning.turn_speed * dt);
        }
        if input.thrust {
            // The cabinet applied a fixed impulse per frame; normalize by
            // dt*60 so the acceleration is the same at any frame rate.
            let impulse = self.tuning.ship_thrust * dt * 60.0;
            self.ship.thrust(impulse, &self.tuning);
            self.spawn_thrust_particles();
        }
        if input.fire && self.shoot_cooldown <= 0.0 {
            self.shoot();
            self.shoot_cooldown = self.tuning.shoot_delay;
        }
    }

    fn shoot(&mut self) {
        let muzzle = self.ship.pos + Vec2::from_degrees(self.ship.angle).scale(self.tuning.ship_size);
        self.bullets.push(Bullet::fired(
            muzzle,
            self.ship.angle,
            self.tuning.bullet_speed,
            self.tuning.bullet_lifetime,
        ));
        self.sounds.push(SoundCue::Fire);
    }

    fn update_ufos(&mut self, dt: f32, bounds: Bounds) {
        let ship_pos = self.ship.pos;
        let sim_time = self.sim_time;
        let Game {
            ufos,
            ufo_bullets,
            rng,
            sounds,
            tuning,
            ..
        } = self;

        for saucer in ufos.iter_mut() {
            saucer.update(dt, sim_time, bounds, tuning);
            if saucer.entered {
                if let Some(shot) = saucer.try_shoot(dt, ship_pos, rng, tuning) {
                    ufo_bullets.push(shot);
                    sounds.push(SoundCue::Fire);
                }
            }
        }
        ufos.retain(|saucer| !saucer.has_exited(bounds, tuning));
    }

    /// Add to the score; the high score shadows the running maximum.
    pub(crate) fn award(&mut self, points: u32) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// Lose a life. Terminal state fires exactly once; a dead game swallows
    /// further damage.
    pub(crate) fn damage_ship(&mut self, bounds: Bounds) {
        if self.game_over {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.game_over = true;
        } else {
            self.ship.respawn(bounds);
        }
    }

    fn next_level(&mut self, bounds: Bounds) {
        self.level += 1;
        self.award(self.tuning.level_bonus);
        self.ship.respawn(bounds);
        let count = spawn::asteroid_count(self.level);
        spawn::place_asteroids(self, bounds, count);
        self.spawn_radial_burst(
            bounds.center(),
            CELEBRATION_COLOR,
            CELEBRATION_PARTICLE_COUNT,
        );
        self.sounds.push(SoundCue::LevelClear);
    }

    pub(crate) fn push_sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    pub(crate) fn shake(&mut self, duration: f32) {
        self.screen_shake = self.screen_shake.max(duration);
    }

    /// Evenly spaced radial burst with randomized speeds.
    pub(crate) fn spawn_radial_burst(&mut self, pos: Vec2, color: Color, count: usize) {
        for i in 0..count {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let speed = self.tuning.explosion_particle_speed * (0.5 + self.rng.gen::<f32>() * 0.5);
            self.particles.push(Particle::new(
                pos,
                Vec2::new(angle.cos(), angle.sin()).scale(speed),
                self.tuning.particle_lifetime * EXPLOSION_LIFETIME_FRACTION,
                color,
                2.0,
            ));
        }
    }

    pub(crate) fn spawn_ship_explosion(&mut self, pos: Vec2) {
        self.spawn_radial_burst(pos, SHIP_EXPLOSION_COLOR, SHIP_EXPLOSION_PARTICLE_COUNT);
    }

    pub(crate) fn spawn_ufo_explosion(&mut self, pos: Vec2) {
        self.spawn_radial_burst(pos, UFO_EXPLOSION_COLOR, UFO_EXPLOSION_PARTICLE_COUNT);
    }

    /// Tier-sized, tier-colored asteroid burst.
    pub(crate) fn spawn_asteroid_explosion(&mut self, pos: Vec2, size: u8) {
        let shade = 150 + size * 30;
        let color = Color::Rgb(shade, shade, shade);
        self.spawn_radial_burst(pos, color, 5 + size as usize * 5);
    }

    fn spawn_thrust_particles(&mut self) {
        let back = self.ship.angle + 180.0;
        let spread = 45.0;
        for _ in 0..2 {
            let jitter: f32 = (self.rng.gen::<f32>() - 0.5) * spread;
            let angle = (back + jitter).to_radians();
            let speed = self.tuning.thrust_particle_speed * (0.5 + self.rng.gen::<f32>() * 0.5);
            let tail = self.ship.pos
                - Vec2::from_degrees(self.ship.angle).scale(self.tuning.ship_size / 2.0);
            self.particles.push(Particle::new(
                tail,
                Vec2::new(angle.cos(), angle.sin()).scale(speed),
                self.tuning.particle_lifetime * THRUST_LIFETIME_FRACTION,
                THRUST_COLOR,
                1.0,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0)
    }

    fn game() -> Game {
        Game::with_seed(Tuning::default(), bounds(), 0xA57E0)
    }

    #[test]
    fn starts_with_level_one_field() {
        let g = game();
        assert_eq!(g.level, 1);
        assert_eq!(g.asteroids.len(), spawn::asteroid_count(1));
        assert!(g.asteroids.iter().all(|a| a.size == 3));
        assert_eq!(g.lives, 3);
        assert_eq!(g.score, 0);
    }

    #[test]
    fn initial_rocks_respect_exclusion_radius() {
        let g = game();
        for rock in &g.asteroids {
            assert!(
                rock.pos.distance(g.ship.pos) >= g.tuning.spawn_exclusion_radius,
                "rock spawned inside the exclusion disk"
            );
        }
    }

    /// Park a single inert rock far from the firing line so bullet counts
    /// are not disturbed by incidental hits.
    fn quiet_field(g: &mut Game) {
        g.asteroids.truncate(1);
        g.asteroids[0].pos = Vec2::new(60.0, 60.0);
        g.asteroids[0].velocity = Vec2::ZERO;
    }

    #[test]
    fn fire_respects_cooldown() {
        let mut g = game();
        quiet_field(&mut g);
        let held = InputState {
            fire: true,
            ..Default::default()
        };
        g.tick(0.016, bounds(), held);
        assert_eq!(g.bullets.len(), 1);
        g.tick(0.016, bounds(), held);
        assert_eq!(g.bullets.len(), 1, "second shot inside the 0.25s delay");

        // Wait out the cooldown and fire again.
        for _ in 0..20 {
            g.tick(0.016, bounds(), InputState::default());
        }
        g.tick(0.016, bounds(), held);
        assert_eq!(g.bullets.len(), 2);
    }

    #[test]
    fn shot_emits_fire_cue() {
        let mut g = game();
        let cues = g.tick(
            0.016,
            bounds(),
            InputState {
                fire: true,
                ..Default::default()
            },
        );
        assert!(cues.contains(&SoundCue::Fire));
    }

    #[test]
    fn award_keeps_high_score_at_running_max() {
        let mut g = game();
        g.award(300);
        assert_eq!(g.high_score, 300);
        let before = g.high_score;
        g.reset(bounds());
        assert_eq!(g.high_score, before);
        g.award(100);
        assert_eq!(g.high_score, before, "high score never decreases");
        g.award(500);
        assert_eq!(g.high_score, 600);
    }

    #[test]
    fn damage_with_lives_left_respawns_at_center() {
        let mut g = game();
        g.ship.pos = Vec2::new(10.0, 10.0);
        g.ship.velocity = Vec2::new(50.0, 0.0);
        g.ship.angle = 123.0;
        g.damage_ship(bounds());
        assert_eq!(g.lives, 2);
        assert!(!g.game_over);
        assert_eq!(g.ship.pos, bounds().center());
        assert_eq!(g.ship.velocity, Vec2::ZERO);
        assert_eq!(g.ship.angle, 0.0);
    }

    #[test]
    fn terminal_state_fires_exactly_once() {
        let mut g = game();
        g.lives = 1;
        g.damage_ship(bounds());
        assert!(g.game_over);
        assert_eq!(g.lives, 0);
        // Further damage in the same tick is swallowed.
        g.damage_ship(bounds());
        assert_eq!(g.lives, 0);
        assert!(g.game_over);
    }

    #[test]
    fn game_over_freezes_the_simulation() {
        let mut g = game();
        g.game_over = true;
        let rock_pos = g.asteroids[0].pos;
        let cues = g.tick(0.016, bounds(), InputState::default());
        assert!(cues.is_empty());
        assert_eq!(g.asteroids[0].pos, rock_pos);
    }

    #[test]
    fn clearing_the_field_advances_the_level() {
        let mut g = game();
        g.asteroids.clear();
        g.tick(0.016, bounds(), InputState::default());
        assert_eq!(g.level, 2);
        assert_eq!(g.score, g.tuning.level_bonus);
        assert_eq!(g.asteroids.len(), spawn::asteroid_count(2));
        assert_eq!(g.ship.pos, bounds().center());
    }

    #[test]
    fn level_clear_emits_cue_and_celebration() {
        let mut g = game();
        g.asteroids.clear();
        g.particles.clear();
        let cues = g.tick(0.016, bounds(), InputState::default());
        assert!(cues.contains(&SoundCue::LevelClear));
        assert!(g.particles.len() >= CELEBRATION_PARTICLE_COUNT);
    }

    #[test]
    fn ufo_spawns_when_interval_elapses() {
        let mut g = game();
        // Plenty of lives so drifting rocks cannot end the run mid-test.
        g.lives = 1000;
        assert!(g.ufos.is_empty());
        let interval = g.tuning.ufo_spawn_interval;
        let mut elapsed = 0.0;
        while elapsed < interval + 0.1 {
            g.tick(0.05, bounds(), InputState::default());
            elapsed += 0.05;
        }
        assert_eq!(g.ufos.len(), 1);
        assert!((g.ufo_spawn_timer - interval).abs() < 0.2, "timer reset");
    }

    #[test]
    fn reset_rebuilds_everything_but_high_score() {
        let mut g = game();
        g.award(2500);
        g.lives = 1;
        g.level = 4;
        g.game_over = true;
        g.reset(bounds());
        assert_eq!(g.high_score, 2500);
        assert_eq!(g.score, 0);
        assert_eq!(g.lives, g.tuning.starting_lives);
        assert_eq!(g.level, 1);
        assert!(!g.game_over);
        assert_eq!(g.asteroids.len(), spawn::asteroid_count(1));
    }

    #[test]
    fn particle_lifetimes_scale_with_the_tuned_base() {
        let mut g = game();
        g.tuning.particle_lifetime = 2.0;

        g.particles.clear();
        g.spawn_radial_burst(Vec2::new(100.0, 100.0), Color::White, 4);
        assert!(g
            .particles
            .iter()
            .all(|p| (p.original_lifetime - 1.5).abs() < 1e-5));

        g.particles.clear();
        g.tick(
            0.016,
            bounds(),
            InputState {
                thrust: true,
                ..Default::default()
            },
        );
        assert!(g
            .particles
            .iter()
            .any(|p| (p.original_lifetime - 1.0).abs() < 1e-5));
    }

    #[test]
    fn thrust_spawns_particles_and_accelerates() {
        let mut g = game();
        let cues_input = InputState {
            thrust: true,
            ..Default::default()
        };
        g.tick(0.016, bounds(), cues_input);
        assert!(g.ship.velocity.length() > 0.0);
        assert!(!g.particles.is_empty());
    }
}
