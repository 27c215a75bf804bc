use super::*;

use crate::foundation::error::EmberError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum TextureIdKey {
    Hero,
    Tileset,
}

#[test]
fn insert_then_get_round_trips() {
    let mut holder = ResourceHolder::new();
    holder.insert(TextureIdKey::Hero, "hero-pixels");
    assert_eq!(*holder.get(&TextureIdKey::Hero), "hero-pixels");
    assert!(holder.contains(&TextureIdKey::Hero));
    assert_eq!(holder.len(), 1);
}

#[test]
fn load_stores_the_loader_result() {
    let mut holder: ResourceHolder<TextureIdKey, String> = ResourceHolder::new();
    holder
        .load(TextureIdKey::Tileset, || Ok("tiles".to_owned()))
        .unwrap();
    assert_eq!(holder.get(&TextureIdKey::Tileset), "tiles");
}

#[test]
fn failed_loads_leave_the_holder_unchanged() {
    let mut holder: ResourceHolder<TextureIdKey, String> = ResourceHolder::new();
    let result = holder.load(TextureIdKey::Hero, || {
        Err(EmberError::resource("corrupt file"))
    });
    assert!(result.is_err());
    assert!(holder.is_empty());
    assert!(holder.try_get(&TextureIdKey::Hero).is_none());
}

#[test]
fn unload_returns_ownership() {
    let mut holder = ResourceHolder::new();
    holder.insert(TextureIdKey::Hero, 42);
    assert_eq!(holder.unload(&TextureIdKey::Hero), Some(42));
    assert_eq!(holder.unload(&TextureIdKey::Hero), None);
    assert!(holder.is_empty());
}

#[test]
fn get_mut_allows_in_place_edits() {
    let mut holder = ResourceHolder::new();
    holder.insert(TextureIdKey::Hero, vec![1, 2]);
    holder.get_mut(&TextureIdKey::Hero).push(3);
    assert_eq!(holder.get(&TextureIdKey::Hero).len(), 3);
}

#[test]
#[should_panic(expected = "no resource stored")]
fn get_on_a_missing_id_panics() {
    let holder: ResourceHolder<TextureIdKey, u8> = ResourceHolder::new();
    holder.get(&TextureIdKey::Tileset);
}

#[test]
fn insert_replaces_an_existing_resource() {
    let mut holder = ResourceHolder::new();
    holder.insert(TextureIdKey::Hero, 1);
    holder.insert(TextureIdKey::Hero, 2);
    assert_eq!(*holder.get(&TextureIdKey::Hero), 2);
    assert_eq!(holder.len(), 1);
}
