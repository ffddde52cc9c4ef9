use ltengine::{Camera, Layer, Map, Object, Point, World};

fn camera(world: &mut World, name: &str) -> ltengine::CameraId {
    world.add_camera(Camera::new(Point::new(0, 0), Point::new(1, 1), name))
}

#[test]
fn objects_belong_to_one_layer_at_a_time() {
    let mut world = World::default();
    let first = world.add_layer(Layer::new("first"));
    let second = world.add_layer(Layer::new("second"));
    let object = world.spawn_object(Object::new(Point::new(0, 0), "o"), first);

    assert!(world.enter_layer(object, second));
    assert!(world.layer(first).unwrap().objects().is_empty());
    assert_eq!(world.layer(second).unwrap().objects(), &[object]);
    assert_eq!(world.object(object).unwrap().parent_layer(), Some(second));

    assert!(world.leave_layer(object));
    assert!(!world.leave_layer(object));
    assert!(world.layer(second).unwrap().objects().is_empty());
}

#[test]
fn removing_a_layer_orphans_its_objects() {
    let mut world = World::default();
    let map = world.add_map(Map::new("map"));
    let layer = world.add_layer(Layer::new("layer"));
    world.map_add_layer(map, layer);
    let object = world.spawn_object(Object::new(Point::new(0, 0), "o"), layer);

    assert!(world.remove_layer(layer).is_some());
    assert_eq!(world.object(object).unwrap().parent_layer(), None);
    assert!(world.map(map).unwrap().layers().is_empty());
    assert!(!world.enter_layer(object, layer));
}

#[test]
fn removing_a_map_keeps_its_parts() {
    let mut world = World::default();
    let map = world.add_map(Map::new("map"));
    let layer = world.add_layer(Layer::new("layer"));
    let cam = camera(&mut world, "cam");
    world.map_add_layer(map, layer);
    world.map_add_camera(map, cam, true);

    assert!(world.remove_map(map).is_some());
    assert_eq!(world.layer(layer).unwrap().parent_map(), None);
    assert_eq!(world.camera(cam).unwrap().parent_map(), None);
    assert!(!world.render_map(map));
}

#[test]
fn active_camera_follows_removals() {
    let mut world = World::default();
    let map = world.add_map(Map::new("map"));
    let a = camera(&mut world, "a");
    let b = camera(&mut world, "b");
    let c = camera(&mut world, "c");
    world.map_add_camera(map, a, false);
    world.map_add_camera(map, b, false);
    world.map_add_camera(map, c, true);
    assert_eq!(world.map(map).unwrap().active_camera(), Some(c));

    assert!(world.map_remove_camera(a));
    assert_eq!(world.map(map).unwrap().active_camera(), Some(c));

    world.remove_camera(c);
    assert_eq!(world.map(map).unwrap().cameras(), &[b]);
    assert!(world.render_map(map));
}

#[test]
fn layers_move_between_maps() {
    let mut world = World::default();
    let first = world.add_map(Map::new("first"));
    let second = world.add_map(Map::new("second"));
    let layer = world.add_layer(Layer::new("layer"));

    world.map_add_layer(first, layer);
    world.map_add_layer(second, layer);
    assert!(world.map(first).unwrap().layers().is_empty());
    assert_eq!(world.map(second).unwrap().layers(), &[layer]);
    assert_eq!(world.layer(layer).unwrap().parent_map(), Some(second));
}

#[test]
fn behaviors_may_remove_their_own_object() {
    use ltengine::{ObjectBehavior, ObjectId};

    struct SelfDestruct;
    impl ObjectBehavior for SelfDestruct {
        fn on_tick(&mut self, world: &mut World, this: ObjectId) -> bool {
            world.remove_object(this);
            true
        }
    }

    let mut world = World::default();
    let object = world.add_object(Object::new(Point::new(0, 0), "o").with_behavior(SelfDestruct));

    assert!(world.call_on_ticks());
    assert!(world.object(object).is_none());
    assert!(!world.call_on_ticks());
}
