//! All game entity types: pure data, no simulation logic.

use glam::Vec2;

use crate::config::Tuning;
use crate::geometry::Aabb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
}

/// Per-kind base stats. `hp` grows by `hp_per_floor` on every floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub base_hp: f32,
    pub hp_per_floor: f32,
    pub speed: f32,
    pub size: f32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Normal, EnemyKind::Fast, EnemyKind::Tank];

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Normal => EnemyStats {
                base_hp: 40.0,
                hp_per_floor: 10.0,
                speed: 120.0,
                size: 30.0,
            },
            EnemyKind::Fast => EnemyStats {
                base_hp: 20.0,
                hp_per_floor: 5.0,
                speed: 220.0,
                size: 20.0,
            },
            EnemyKind::Tank => EnemyStats {
                base_hp: 150.0,
                hp_per_floor: 20.0,
                speed: 60.0,
                size: 45.0,
            },
        }
    }

    /// Map a roll in `0..10` to a kind: 60% Normal, 30% Fast, 10% Tank.
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..=5 => EnemyKind::Normal,
            6..=8 => EnemyKind::Fast,
            _ => EnemyKind::Tank,
        }
    }

    pub fn hp_on_floor(self, floor: u32) -> f32 {
        let s = self.stats();
        s.base_hp + floor as f32 * s.hp_per_floor
    }
}

/// Difficulty picked in the menu. Scales the spawn rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Level {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Level {
    pub fn spawn_multiplier(self) -> f32 {
        match self {
            Level::Easy => 0.75,
            Level::Medium => 1.0,
            Level::Hard => 1.5,
        }
    }

    /// `1`, `2`, `3` as shown in the menu.
    pub fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Level::Easy),
            2 => Some(Level::Medium),
            3 => Some(Level::Hard),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "easy" => Some(Level::Easy),
            "medium" | "med" | "normal" => Some(Level::Medium),
            "hard" => Some(Level::Hard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    Shop,
    GameOver,
}

/// Permanent upgrades offered between floors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upgrade {
    Damage,
    Speed,
    Heal,
}

impl Upgrade {
    pub fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Upgrade::Damage),
            2 => Some(Upgrade::Speed),
            3 => Some(Upgrade::Heal),
            _ => None,
        }
    }
}

// ── Projectiles & pickups ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MedKit {
    pub pos: Vec2,
    pub heal: i32,
}

/// Death-burst fragment. Carries the kind of the enemy it came from so the
/// display can colour it; it never touches gameplay.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left before removal.
    pub lifetime: f32,
    pub kind: EnemyKind,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Dash {
    /// Counts down every frame; a new dash needs it at or below zero.
    pub timer: f32,
    pub active: bool,
    pub dir: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub health: i32,
    pub dash: Dash,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.world_width / 2.0, tuning.world_height / 2.0),
            speed: tuning.player_speed,
            damage: tuning.player_damage,
            health: tuning.player_max_health,
            dash: Dash {
                timer: 0.0,
                active: false,
                dir: Vec2::ZERO,
            },
        }
    }

    pub fn bounds(&self, tuning: &Tuning) -> Aabb {
        Aabb::square(self.pos, tuning.player_size)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub hp: f32,
    /// hp at spawn time, kept for health-bar ratios.
    pub max_hp: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn spawn(kind: EnemyKind, pos: Vec2, floor: u32) -> Self {
        let hp = kind.hp_on_floor(floor);
        Self {
            pos,
            kind,
            hp,
            max_hp: hp,
            speed: kind.stats().speed,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.kind.stats().size)
    }

    /// Remaining health in `0.0..=1.0`.
    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            (self.hp / self.max_hp).clamp(0.0, 1.0)
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so the step functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub medkits: Vec<MedKit>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Starts at 1 and only grows through the shop.
    pub floor: u32,
    /// Score that opens the shop.
    pub next_floor_score: u32,
    pub level: Level,
    pub status: GameStatus,
    /// Seconds until the player may fire again.
    pub shoot_timer: f32,
    /// Seconds accumulated towards the next spawn.
    pub spawn_timer: f32,
    pub tuning: Tuning,
}
