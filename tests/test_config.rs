use rogue_square::config::{Tuning, MAX_PARTICLES_PER_KILL};

#[test]
fn defaults_are_valid() {
    let t = Tuning::default();
    assert!(t.validate().is_ok());
    assert_eq!(t.world_width, 800.0);
    assert_eq!(t.world_height, 600.0);
    assert_eq!(t.kill_score, 15);
    assert_eq!(t.first_floor_score, 100);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let t = Tuning::from_json(r#"{ "kill_score": 10, "bullet_speed": 600.0 }"#).unwrap();
    assert_eq!(t.kill_score, 10);
    assert_eq!(t.bullet_speed, 600.0);
    assert_eq!(t.contact_damage, Tuning::default().contact_damage);
}

#[test]
fn empty_object_is_default() {
    assert_eq!(Tuning::from_json("{}").unwrap(), Tuning::default());
}

#[test]
fn malformed_json_is_rejected() {
    assert!(Tuning::from_json("{ kill_score: ").is_err());
    assert!(Tuning::from_json(r#"{ "kill_score": "lots" }"#).is_err());
}

#[test]
fn out_of_range_values_are_rejected() {
    assert!(Tuning::from_json(r#"{ "medkit_drop_chance": 1.5 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "world_width": 10.0 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "spawn_interval_min": 0.0 }"#).is_err());
}

#[test]
fn dash_must_end_before_cooldown() {
    assert!(Tuning::from_json(r#"{ "dash_duration": 1.0 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "dash_duration": 2.0 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "dash_cooldown": 0.1 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "dash_duration": 0.0 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "dash_multiplier": 0.0 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "dash_cooldown": 0.5, "dash_duration": 0.2 }"#).is_ok());
}

#[test]
fn negative_health_deltas_are_rejected() {
    assert!(Tuning::from_json(r#"{ "contact_damage": -15 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "medkit_heal": -25 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "contact_damage": 0, "medkit_heal": 0 }"#).is_ok());
}

#[test]
fn spawn_and_particle_bounds() {
    assert!(Tuning::from_json(r#"{ "spawn_offset": -50.0 }"#).is_err());
    let too_many = format!(r#"{{ "particle_count": {} }}"#, MAX_PARTICLES_PER_KILL + 1);
    assert!(Tuning::from_json(&too_many).is_err());
    assert!(Tuning::from_json(r#"{ "particle_count": -1 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "spawn_offset": 0.0, "particle_count": 0 }"#).is_ok());
}

#[test]
fn load_reads_file() {
    let path = std::env::temp_dir().join(format!("rogue_square_tuning_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "medkit_heal": 40 }"#).unwrap();
    let t = Tuning::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(t.medkit_heal, 40);
}

#[test]
fn load_missing_file_names_the_path() {
    let path = std::env::temp_dir().join("rogue_square_no_such_tuning.json");
    let err = Tuning::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("rogue_square_no_such_tuning.json"));
}
