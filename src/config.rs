//! Gameplay tuning.
//!
//! Every constant the simulation reads lives in [`Tuning`]. The defaults are
//! the shipped balance; a JSON file may override any subset of fields.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Upper bound on `particle_count`; each kill allocates that many particles.
pub const MAX_PARTICLES_PER_KILL: usize = 256;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // ── World ────────────────────────────────────────────────────────────────
    pub world_width: f32,
    pub world_height: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_size: f32,
    pub player_speed: f32,
    pub player_damage: f32,
    pub player_max_health: i32,
    /// Seconds between dash triggers.
    pub dash_cooldown: f32,
    /// Seconds a dash stays active, measured from the start of the cooldown.
    pub dash_duration: f32,
    pub dash_multiplier: f32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub shoot_cooldown: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    /// Distance past the world edge a bullet may travel before it is dropped.
    pub bullet_margin: f32,

    // ── Spawner ──────────────────────────────────────────────────────────────
    pub spawn_interval_base: f32,
    pub spawn_floor_factor: f32,
    pub spawn_interval_min: f32,
    /// How far outside the chosen edge new enemies appear.
    pub spawn_offset: f32,

    // ── Combat ───────────────────────────────────────────────────────────────
    pub contact_damage: i32,
    pub kill_score: u32,

    // ── Drops & effects ──────────────────────────────────────────────────────
    pub medkit_heal: i32,
    pub medkit_drop_chance: f64,
    pub medkit_radius: f32,
    pub particle_count: usize,
    /// Particle velocity components are drawn from `[-speed, speed)`.
    pub particle_speed: f32,
    pub particle_lifetime: f32,

    // ── Floors & shop ────────────────────────────────────────────────────────
    pub first_floor_score: u32,
    pub floor_score_step: u32,
    pub upgrade_damage: f32,
    pub upgrade_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,

            player_size: 30.0,
            player_speed: 250.0,
            player_damage: 20.0,
            player_max_health: 100,
            dash_cooldown: 1.0,
            dash_duration: 0.15,
            dash_multiplier: 3.0,

            shoot_cooldown: 0.25,
            bullet_speed: 700.0,
            bullet_radius: 5.0,
            bullet_margin: 100.0,

            spawn_interval_base: 1.5,
            spawn_floor_factor: 0.1,
            spawn_interval_min: 0.3,
            spawn_offset: 50.0,

            contact_damage: 15,
            kill_score: 15,

            medkit_heal: 25,
            medkit_drop_chance: 0.2,
            medkit_radius: 8.0,
            particle_count: 8,
            particle_speed: 100.0,
            particle_lifetime: 0.6,

            first_floor_score: 100,
            floor_score_step: 150,
            upgrade_damage: 15.0,
            upgrade_speed: 40.0,
        }
    }
}

impl Tuning {
    /// Parse a JSON override. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let tuning: Tuning = serde_json::from_str(text).context("invalid tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        let tuning = Self::from_json(&text)
            .with_context(|| format!("loading tuning file {}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.world_width > self.player_size && self.world_height > self.player_size,
            "world ({}x{}) must be larger than the player ({})",
            self.world_width,
            self.world_height,
            self.player_size
        );
        anyhow::ensure!(self.player_max_health > 0, "player_max_health must be positive");
        anyhow::ensure!(
            self.spawn_interval_min > 0.0,
            "spawn_interval_min must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.medkit_drop_chance),
            "medkit_drop_chance must be within 0..=1"
        );
        anyhow::ensure!(self.particle_speed > 0.0, "particle_speed must be positive");
        anyhow::ensure!(
            self.particle_count <= MAX_PARTICLES_PER_KILL,
            "particle_count must be at most {MAX_PARTICLES_PER_KILL}"
        );
        anyhow::ensure!(self.spawn_offset >= 0.0, "spawn_offset must not be negative");

        // The dash ends once its timer drops below cooldown - duration.
        anyhow::ensure!(
            self.dash_duration > 0.0 && self.dash_duration < self.dash_cooldown,
            "dash_duration ({}) must be positive and shorter than dash_cooldown ({})",
            self.dash_duration,
            self.dash_cooldown
        );
        anyhow::ensure!(self.dash_multiplier > 0.0, "dash_multiplier must be positive");

        anyhow::ensure!(self.contact_damage >= 0, "contact_damage must not be negative");
        anyhow::ensure!(self.medkit_heal >= 0, "medkit_heal must not be negative");
        Ok(())
    }
}
