use uuid::Uuid;

use super::*;

#[test]
fn miss_then_put_then_hit() {
    let mut cache: ImageCache<u32> = ImageCache::new();
    let id = Uuid::new_v4();
    assert!(cache.get(&id).is_none());
    assert!(cache.put(id, 7));
    assert_eq!(cache.get(&id), Some(&7));
}

#[test]
fn put_is_insert_once() {
    let mut cache = ImageCache::new();
    let id = Uuid::new_v4();
    assert!(cache.put(id, 1));
    assert!(!cache.put(id, 2));
    assert_eq!(cache.get(&id), Some(&1));
    assert_eq!(cache.len(), 1);
}

#[test]
fn begin_decode_deduplicates() {
    let mut cache: ImageCache<u32> = ImageCache::new();
    let id = Uuid::new_v4();
    assert!(cache.begin_decode(id));
    assert!(!cache.begin_decode(id));
    assert_eq!(cache.pending_count(), 1);
}

#[test]
fn put_clears_in_flight() {
    let mut cache = ImageCache::new();
    let id = Uuid::new_v4();
    cache.begin_decode(id);
    cache.put(id, 3);
    assert!(!cache.is_in_flight(&id));
    assert_eq!(cache.pending_count(), 0);
    assert!(!cache.begin_decode(id));
}

#[test]
fn failed_decode_is_not_retried() {
    let mut cache: ImageCache<u32> = ImageCache::new();
    let id = Uuid::new_v4();
    cache.begin_decode(id);
    cache.fail(id);
    assert!(cache.has_failed(&id));
    assert_eq!(cache.pending_count(), 0);
    assert!(!cache.begin_decode(id));
}

#[test]
fn evict_forgets_everything() {
    let mut cache = ImageCache::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    cache.put(a, 1);
    cache.begin_decode(b);
    cache.fail(b);
    assert_eq!(cache.evict(&a), Some(1));
    assert_eq!(cache.evict(&b), None);
    assert!(cache.is_empty());
    assert!(!cache.has_failed(&b));
    assert!(cache.begin_decode(a));
}

#[test]
fn share_copies_bitmap_to_new_id() {
    let mut cache = ImageCache::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    cache.put(a, 9);
    assert!(cache.share(&a, b));
    assert_eq!(cache.get(&b), Some(&9));
    assert!(!cache.share(&Uuid::new_v4(), Uuid::new_v4()));
}
