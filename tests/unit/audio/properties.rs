use super::*;

#[test]
fn defaults_match_the_documented_values() {
    let p = SoundProperties::default();
    assert_eq!(p.volume(), 100.0);
    assert_eq!(p.attenuation(), 1.0);
    assert_eq!(p.pitch(), 1.0);
    assert_eq!(p.min_distance_2d(), 1.0);
    assert!(!p.is_relative_to_listener());
}

#[test]
fn volume_is_clamped_to_0_100() {
    let mut p = SoundProperties::default();
    p.set_volume(150.0);
    assert_eq!(p.volume(), 100.0);
    p.set_volume(-3.0);
    assert_eq!(p.volume(), 0.0);

    assert_eq!(SoundProperties::new(999.0, 1.0, 1.0, 1.0, false).volume(), 100.0);
}

#[test]
fn zero_min_distance_is_coerced_to_one() {
    let mut p = SoundProperties::default();
    p.set_min_distance_2d(0.0);
    assert_eq!(p.min_distance_2d(), 1.0);
}

#[test]
fn min_distance_3d_accounts_for_listener_height() {
    let mut p = SoundProperties::default();
    p.set_min_distance_2d(400.0);
    assert_eq!(p.min_distance_3d(), 400.0_f32.hypot(LISTENER_Z));
}

#[test]
fn properties_serde_round_trip() {
    let p = SoundProperties::new(40.0, 2.0, 1.5, 60.0, true);
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(serde_json::from_str::<SoundProperties>(&json).unwrap(), p);
}
