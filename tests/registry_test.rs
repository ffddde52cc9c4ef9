use ltengine::{Handle, Registry};

#[test]
fn stale_handles_never_resolve() {
    let mut registry = Registry::new();
    let first = registry.insert("first");
    assert_eq!(registry.remove(first), Some("first"));
    assert_eq!(registry.remove(first), None);

    let second = registry.insert("second");
    // slot is reused with a new generation
    assert_eq!(second.index(), first.index());
    assert_ne!(second, first);
    assert_eq!(registry.get(first), None);
    assert_eq!(registry.get(second), Some(&"second"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn iteration_skips_removed_values() {
    let mut registry = Registry::new();
    let handles: Vec<_> = (0..4).map(|i| registry.insert(i)).collect();
    registry.remove(handles[1]);
    registry.remove(handles[2]);

    let values: Vec<_> = registry.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![0, 3]);
    assert_eq!(registry.handles(), vec![handles[0], handles[3]]);

    for (_, v) in registry.iter_mut() {
        *v *= 10;
    }
    assert_eq!(registry.get(handles[3]), Some(&30));
}

#[test]
fn handles_survive_bit_packing() {
    let mut registry = Registry::new();
    let a = registry.insert('a');
    registry.remove(a);
    let b = registry.insert('b');

    let restored: Handle<char> = Handle::from_bits(b.to_bits());
    assert_eq!(restored, b);
    assert_eq!(restored.generation(), 1);
    assert_eq!(registry.get(restored), Some(&'b'));
    assert!(!registry.contains(Handle::from_bits(a.to_bits())));
}

#[test]
fn empty_registry() {
    let mut registry: Registry<u8> = Registry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.get_mut(Handle::from_bits(0)), None);
    assert_eq!(registry.iter().count(), 0);
}
