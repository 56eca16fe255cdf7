//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`. Side effects are limited to the injected RNG and logging.

use glam::Vec2;
use rand::Rng;

use crate::config::Tuning;
use crate::entities::{
    Bullet, Dash, Enemy, EnemyKind, GameState, GameStatus, Level, MedKit, Particle, Player,
    Upgrade,
};
use crate::geometry::{normalize, Aabb};
use crate::input::FrameInput;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh run sitting in the menu.
pub fn init_state(tuning: Tuning, level: Level) -> GameState {
    GameState {
        player: Player::new(&tuning),
        bullets: Vec::new(),
        enemies: Vec::new(),
        medkits: Vec::new(),
        particles: Vec::new(),
        score: 0,
        floor: 1,
        next_floor_score: tuning.first_floor_score,
        level,
        status: GameStatus::Menu,
        shoot_timer: 0.0,
        spawn_timer: 0.0,
        tuning,
    }
}

/// Throw away the current run. Tuning and difficulty survive.
pub fn reset(state: &GameState) -> GameState {
    init_state(state.tuning.clone(), state.level)
}

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Seconds between spawns. Shrinks with floor and level, never below the
/// configured minimum.
pub fn spawn_interval(floor: u32, level: Level, tuning: &Tuning) -> f32 {
    let interval = tuning.spawn_interval_base
        / (1.0 + floor as f32 * tuning.spawn_floor_factor)
        / level.spawn_multiplier();
    interval.max(tuning.spawn_interval_min)
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Move the player for one frame, handling dash start/stop and clamping to
/// the world.
pub fn move_player(
    player: &Player,
    movement: Vec2,
    dash_pressed: bool,
    dt: f32,
    tuning: &Tuning,
) -> Player {
    let mut dash = Dash {
        timer: (player.dash.timer - dt).max(0.0),
        ..player.dash.clone()
    };

    if dash_pressed && dash.timer <= 0.0 && movement != Vec2::ZERO {
        dash = Dash {
            timer: tuning.dash_cooldown,
            active: true,
            dir: normalize(movement),
        };
    }

    let delta = if dash.active {
        let delta = dash.dir * player.speed * tuning.dash_multiplier * dt;
        if dash.timer < tuning.dash_cooldown - tuning.dash_duration {
            dash.active = false;
        }
        delta
    } else {
        normalize(movement) * player.speed * dt
    };

    let half = tuning.player_size / 2.0;
    let pos = (player.pos + delta).clamp(
        Vec2::splat(half),
        Vec2::new(tuning.world_width - half, tuning.world_height - half),
    );

    Player {
        pos,
        dash,
        ..player.clone()
    }
}

/// Bullet fired from the player towards `target`, or `None` when the target
/// sits exactly on the player and there is no direction to fire in.
pub fn aim_bullet(player: &Player, target: Vec2, tuning: &Tuning) -> Option<Bullet> {
    let dir = normalize(target - player.pos);
    if dir == Vec2::ZERO {
        return None;
    }
    Some(Bullet {
        pos: player.pos,
        vel: dir * tuning.bullet_speed,
        damage: player.damage,
    })
}

/// Fire one bullet at `target`, ignoring the cooldown.
pub fn player_shoot(state: &GameState, target: Vec2) -> GameState {
    let Some(bullet) = aim_bullet(&state.player, target, &state.tuning) else {
        return state.clone();
    };
    let mut bullets = state.bullets.clone();
    bullets.push(bullet);
    GameState {
        bullets,
        shoot_timer: state.tuning.shoot_cooldown,
        ..state.clone()
    }
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Point just outside a random edge of the world.
fn edge_position(tuning: &Tuning, rng: &mut impl Rng) -> Vec2 {
    let (w, h, off) = (tuning.world_width, tuning.world_height, tuning.spawn_offset);
    match rng.gen_range(0..4) {
        0 => Vec2::new(rng.gen_range(0.0..w), -off),
        1 => Vec2::new(rng.gen_range(0.0..w), h + off),
        2 => Vec2::new(-off, rng.gen_range(0.0..h)),
        _ => Vec2::new(w + off, rng.gen_range(0.0..h)),
    }
}

/// Roll a kind and an edge, and build an enemy scaled to `floor`.
pub fn spawn_enemy(floor: u32, tuning: &Tuning, rng: &mut impl Rng) -> Enemy {
    let kind = EnemyKind::from_roll(rng.gen_range(0..10));
    let pos = edge_position(tuning, rng);
    log::debug!("Spawned {:?} at ({:.0}, {:.0}) on floor {}", kind, pos.x, pos.y, floor);
    Enemy::spawn(kind, pos, floor)
}

/// Cosmetic burst left behind by a dead enemy.
fn death_burst(enemy: &Enemy, tuning: &Tuning, rng: &mut impl Rng) -> Vec<Particle> {
    let s = tuning.particle_speed;
    (0..tuning.particle_count)
        .map(|_| Particle {
            pos: enemy.pos,
            vel: Vec2::new(rng.gen_range(-s..s), rng.gen_range(-s..s)),
            lifetime: tuning.particle_lifetime,
            kind: enemy.kind,
        })
        .collect()
}

fn in_play_area(pos: Vec2, tuning: &Tuning) -> bool {
    let m = tuning.bullet_margin;
    pos.x >= -m && pos.x <= tuning.world_width + m && pos.y >= -m && pos.y <= tuning.world_height + m
}

// ── State transitions ────────────────────────────────────────────────────────

/// Spend the shop visit on `upgrade` and start the next floor.
/// Outside the shop this is a no-op.
pub fn choose_upgrade(state: &GameState, upgrade: Upgrade) -> GameState {
    if state.status != GameStatus::Shop {
        return state.clone();
    }
    let t = &state.tuning;
    let player = match upgrade {
        Upgrade::Damage => Player {
            damage: state.player.damage + t.upgrade_damage,
            ..state.player.clone()
        },
        Upgrade::Speed => Player {
            speed: state.player.speed + t.upgrade_speed,
            ..state.player.clone()
        },
        Upgrade::Heal => Player {
            health: t.player_max_health,
            ..state.player.clone()
        },
    };
    let floor = state.floor + 1;
    log::info!("Picked {:?}; entering floor {}", upgrade, floor);

    GameState {
        player,
        bullets: Vec::new(),
        enemies: Vec::new(),
        floor,
        next_floor_score: state.next_floor_score.saturating_add(t.floor_score_step),
        status: GameStatus::Playing,
        spawn_timer: 0.0,
        ..state.clone()
    }
}

/// Apply the one-shot inputs of a frame to the state machine.
///
/// Only the transitions valid for the current status are honoured; every
/// other press is ignored.
pub fn apply_input(state: &GameState, input: &FrameInput) -> GameState {
    match state.status {
        GameStatus::Menu => {
            let mut next = state.clone();
            if let Some(level) = input.level {
                if level != next.level {
                    log::info!("Difficulty set to {}", level.as_str());
                    next.level = level;
                }
            }
            if input.confirm {
                next.status = GameStatus::Playing;
            }
            next
        }
        GameStatus::Playing if input.cancel => GameState {
            status: GameStatus::Menu,
            ..state.clone()
        },
        GameStatus::Shop => match input.upgrade {
            Some(upgrade) => choose_upgrade(state, upgrade),
            None => state.clone(),
        },
        GameStatus::GameOver if input.confirm => {
            log::info!("Restarting after game over (score {})", state.score);
            GameState {
                status: GameStatus::Playing,
                ..reset(state)
            }
        }
        _ => state.clone(),
    }
}

// ── Per-frame tick (nearly pure: RNG is injected) ────────────────────────────

/// Advance a Playing state by `dt` seconds. Any other status is returned
/// unchanged. All randomness comes through `rng` so callers control
/// determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, input: &FrameInput, dt: f32, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let t = &state.tuning;

    // ── 1. Move the player ───────────────────────────────────────────────────
    let player = move_player(&state.player, input.movement(), input.dash, dt, t);

    // ── 2. Shoot ─────────────────────────────────────────────────────────────
    let mut bullets = state.bullets.clone();
    let mut shoot_timer = (state.shoot_timer - dt).max(0.0);
    if input.fire && shoot_timer <= 0.0 {
        if let Some(bullet) = aim_bullet(&player, input.cursor, t) {
            bullets.push(bullet);
            shoot_timer = t.shoot_cooldown;
        }
    }

    // ── 3. Spawn ─────────────────────────────────────────────────────────────
    let mut enemies = state.enemies.clone();
    let mut spawn_timer = state.spawn_timer + dt;
    if spawn_timer > spawn_interval(state.floor, state.level, t) {
        enemies.push(spawn_enemy(state.floor, t, rng));
        spawn_timer = 0.0;
    }

    // ── 4. Collision: bullets ↔ enemies ──────────────────────────────────────
    let bullets: Vec<Bullet> = bullets
        .into_iter()
        .map(|b| Bullet {
            pos: b.pos + b.vel * dt,
            ..b
        })
        .collect();

    let mut killed: Vec<usize> = Vec::new();
    let mut spent: Vec<usize> = Vec::new();
    let mut particles = state.particles.clone();
    let mut medkits = state.medkits.clone();
    let mut score = state.score;

    for (bi, bullet) in bullets.iter().enumerate() {
        let hit_box = Aabb::circle(bullet.pos, t.bullet_radius);
        // First live enemy in the bullet's box takes the whole hit
        let Some(ei) = enemies
            .iter()
            .enumerate()
            .position(|(ei, e)| !killed.contains(&ei) && e.bounds().intersects(&hit_box))
        else {
            continue;
        };
        spent.push(bi);

        let enemy = &mut enemies[ei];
        enemy.hp = (enemy.hp - bullet.damage).max(0.0);
        if enemy.hp <= 0.0 {
            killed.push(ei);
            particles.extend(death_burst(enemy, t, rng));
            if rng.gen_bool(t.medkit_drop_chance) {
                medkits.push(MedKit {
                    pos: enemy.pos,
                    heal: t.medkit_heal,
                });
            }
            score = score.saturating_add(t.kill_score);
            log::debug!("Killed {:?}; score {}", enemy.kind, score);
        }
    }

    let enemies: Vec<Enemy> = enemies
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !killed.contains(i))
        .map(|(_, e)| e)
        .collect();

    // Spent bullets and bullets that left the margin are dropped
    let bullets: Vec<Bullet> = bullets
        .into_iter()
        .enumerate()
        .filter(|(i, b)| !spent.contains(i) && in_play_area(b.pos, t))
        .map(|(_, b)| b)
        .collect();

    // ── 5. Particles ─────────────────────────────────────────────────────────
    let particles: Vec<Particle> = particles
        .into_iter()
        .filter_map(|p| {
            let lifetime = p.lifetime - dt;
            (lifetime > 0.0).then(|| Particle {
                pos: p.pos + p.vel * dt,
                lifetime,
                ..p
            })
        })
        .collect();

    // ── 6. Enemies chase; contact hurts the player and removes the enemy ─────
    let player_box = player.bounds(t);
    let mut health = player.health;
    let enemies: Vec<Enemy> = enemies
        .into_iter()
        .filter_map(|e| {
            let dir = normalize(player.pos - e.pos);
            let moved = Enemy {
                pos: e.pos + dir * e.speed * dt,
                ..e
            };
            if moved.bounds().intersects(&player_box) {
                health = health.saturating_sub(t.contact_damage);
                None
            } else {
                Some(moved)
            }
        })
        .collect();

    // ── 7. Medkits ───────────────────────────────────────────────────────────
    let medkits: Vec<MedKit> = medkits
        .into_iter()
        .filter(|m| {
            if Aabb::circle(m.pos, t.medkit_radius).intersects(&player_box) {
                health = health.saturating_add(m.heal).min(t.player_max_health);
                false
            } else {
                true
            }
        })
        .collect();

    // ── 8. Health & status ───────────────────────────────────────────────────
    let health = health.clamp(0, t.player_max_health);
    let status = if health == 0 {
        log::info!("Game over on floor {} with score {}", state.floor, score);
        GameStatus::GameOver
    } else if score >= state.next_floor_score {
        log::info!("Floor {} cleared with score {}; opening shop", state.floor, score);
        GameStatus::Shop
    } else {
        GameStatus::Playing
    };

    GameState {
        player: Player { health, ..player },
        bullets,
        enemies,
        medkits,
        particles,
        score,
        status,
        shoot_timer,
        spawn_timer,
        ..state.clone()
    }
}

/// One full frame: state-machine inputs first, then the simulation if the
/// result is Playing.
pub fn step(state: &GameState, input: &FrameInput, dt: f32, rng: &mut impl Rng) -> GameState {
    let state = apply_input(state, input);
    tick(&state, input, dt, rng)
}

// ── Presentation helpers ─────────────────────────────────────────────────────

/// Status lines for the current state, top to bottom.
pub fn status_text(state: &GameState) -> String {
    match state.status {
        GameStatus::Menu => format!(
            "ROGUE SQUARE\nENTER: Start | ESC (in game): Pause | 1-3: Difficulty ({})",
            state.level.as_str()
        ),
        GameStatus::Playing => format!(
            "Floor: {} | HP: {} | Score: {}",
            state.floor, state.player.health, state.score
        ),
        GameStatus::Shop => "SHOP: 1: +Dmg | 2: +Spd | 3: Heal".to_string(),
        GameStatus::GameOver => "GAME OVER\nENTER: Restart".to_string(),
    }
}
