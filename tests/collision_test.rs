use std::{cell::RefCell, rc::Rc};

use ltengine::{
    Collider, Collision, CollisionEvent, CollisionResult, LayerId, Layer, Object, ObjectBehavior,
    ObjectId, Point, World,
};

const IMMOVABLE: u8 = 0;
const PUSHABLE: u8 = 1;
const OVERLAPPABLE: u8 = 2;

type Log = Rc<RefCell<Vec<String>>>;

/// Records every hook call as "<name>:<hook>".
struct Recorder {
    name: &'static str,
    log: Log,
}

impl Recorder {
    fn push(&self, hook: &str) {
        self.log.borrow_mut().push(format!("{}:{}", self.name, hook));
    }
}

impl ObjectBehavior for Recorder {
    fn on_move(&mut self, _: &mut World, _: ObjectId, _: Point<i32>) {
        self.push("move");
    }
    fn on_push(&mut self, _: &mut World, _: ObjectId, _: CollisionEvent) {
        self.push("push");
    }
    fn on_pushed(&mut self, _: &mut World, _: ObjectId, _: CollisionEvent) {
        self.push("pushed");
    }
    fn on_blocked(&mut self, _: &mut World, _: ObjectId, _: CollisionEvent) {
        self.push("blocked");
    }
    fn on_block(&mut self, _: &mut World, _: ObjectId, _: CollisionEvent) {
        self.push("block");
    }
    fn on_overlap(&mut self, _: &mut World, _: ObjectId, _: CollisionEvent) {
        self.push("overlap");
    }
    fn on_overlap_exit(&mut self, _: &mut World, _: ObjectId, _: CollisionEvent) {
        self.push("overlap_exit");
    }
    fn on_overlapped(&mut self, _: &mut World, _: ObjectId, _: CollisionEvent) {
        self.push("overlapped");
    }
    fn on_overlapped_exit(&mut self, _: &mut World, _: ObjectId, _: CollisionEvent) {
        self.push("overlapped_exit");
    }
}

fn setup() -> (World, LayerId, Log) {
    let mut world = World::default();
    let layer = world.add_layer(Layer::new("test"));
    (world, layer, Rc::new(RefCell::new(Vec::new())))
}

fn spawn(
    world: &mut World,
    layer: LayerId,
    log: &Log,
    name: &'static str,
    x: i32,
    collider_type: u8,
) -> ObjectId {
    let object = Object::new(Point::new(x, 0), name)
        .with_collider(Collider::simple(
            Point::new(1, 1),
            collider_type,
            Point::new(0, 0),
        ))
        .with_behavior(Recorder {
            name,
            log: Rc::clone(log),
        });
    world.spawn_object(object, layer)
}

fn position(world: &World, id: ObjectId) -> Point<i32> {
    world.object(id).map(|o| o.position).unwrap()
}

#[test]
fn push_moves_both_objects() {
    let (mut world, layer, log) = setup();
    let x = spawn(&mut world, layer, &log, "x", 0, PUSHABLE);
    let y = spawn(&mut world, layer, &log, "y", 1, PUSHABLE);

    assert!(world.move_object(x, Point::new(1, 0)));
    assert_eq!(position(&world, x), Point::new(1, 0));
    assert_eq!(position(&world, y), Point::new(2, 0));
    assert_eq!(
        *log.borrow(),
        vec!["x:push", "y:pushed", "x:move", "y:move"]
    );
}

#[test]
fn push_chain_moves_everyone_once() {
    let (mut world, layer, log) = setup();
    let a = spawn(&mut world, layer, &log, "a", 0, PUSHABLE);
    let b = spawn(&mut world, layer, &log, "b", 1, PUSHABLE);
    let c = spawn(&mut world, layer, &log, "c", 2, PUSHABLE);

    assert!(world.move_object(a, Point::new(1, 0)));
    assert_eq!(position(&world, a), Point::new(1, 0));
    assert_eq!(position(&world, b), Point::new(2, 0));
    assert_eq!(position(&world, c), Point::new(3, 0));

    let moves = log.borrow().iter().filter(|e| e.ends_with(":move")).count();
    assert_eq!(moves, 3);
}

#[test]
fn blocked_chain_moves_nothing() {
    let (mut world, layer, log) = setup();
    let a = spawn(&mut world, layer, &log, "a", 0, PUSHABLE);
    let b = spawn(&mut world, layer, &log, "b", 1, PUSHABLE);
    let c = spawn(&mut world, layer, &log, "c", 2, IMMOVABLE);

    assert!(!world.move_object(a, Point::new(1, 0)));
    assert_eq!(position(&world, a), Point::new(0, 0));
    assert_eq!(position(&world, b), Point::new(1, 0));
    assert_eq!(position(&world, c), Point::new(2, 0));

    // only block hooks run on failure
    assert_eq!(*log.borrow(), vec!["b:blocked", "c:block"]);
}

#[test]
fn block_is_absolute() {
    let (mut world, layer, log) = setup();
    let wall = spawn(&mut world, layer, &log, "wall", 1, IMMOVABLE);
    let mover = spawn(&mut world, layer, &log, "mover", 0, IMMOVABLE);
    // an overlap object on the way doesn't change anything
    spawn(&mut world, layer, &log, "ghost", 1, OVERLAPPABLE);

    assert!(!world.move_object(mover, Point::new(1, 0)));
    assert_eq!(position(&world, mover), Point::new(0, 0));
    assert_eq!(position(&world, wall), Point::new(1, 0));
    assert_eq!(*log.borrow(), vec!["mover:blocked", "wall:block"]);
}

#[test]
fn overlap_enter_and_exit_fire_once() {
    let (mut world, layer, log) = setup();
    let mover = spawn(&mut world, layer, &log, "mover", 0, IMMOVABLE);
    spawn(&mut world, layer, &log, "zone", 1, OVERLAPPABLE);

    assert!(world.move_object(mover, Point::new(1, 0)));
    assert_eq!(
        *log.borrow(),
        vec!["mover:overlap", "zone:overlapped", "mover:move"]
    );
    log.borrow_mut().clear();

    assert!(world.move_object(mover, Point::new(1, 0)));
    assert_eq!(
        *log.borrow(),
        vec!["mover:overlap_exit", "zone:overlapped_exit", "mover:move"]
    );
}

#[test]
fn staying_inside_an_overlap_fires_nothing() {
    let (mut world, layer, log) = setup();
    let mover = spawn(&mut world, layer, &log, "mover", 0, IMMOVABLE);
    let zone = Object::new(Point::new(0, 0), "zone").with_collider(Collider::simple(
        Point::new(3, 1),
        OVERLAPPABLE,
        Point::new(0, 0),
    ));
    world.spawn_object(zone, layer);

    assert!(world.move_object(mover, Point::new(1, 0)));
    assert_eq!(*log.borrow(), vec!["mover:move"]);
}

#[test]
fn objects_in_other_layers_never_collide() {
    let (mut world, layer, log) = setup();
    let other_layer = world.add_layer(Layer::new("other"));
    let mover = spawn(&mut world, layer, &log, "mover", 0, IMMOVABLE);
    let wall = spawn(&mut world, other_layer, &log, "wall", 1, IMMOVABLE);

    assert!(world.move_object(mover, Point::new(1, 0)));
    assert_eq!(position(&world, mover), position(&world, wall));
}

#[test]
fn inactive_and_empty_colliders_are_ignored() {
    let (mut world, layer, log) = setup();
    let mover = spawn(&mut world, layer, &log, "mover", 0, IMMOVABLE);
    let wall = spawn(&mut world, layer, &log, "wall", 1, IMMOVABLE);
    world.object_mut(wall).unwrap().colliders[0].active = false;
    let empty = Object::new(Point::new(2, 0), "empty").with_collider(Collider::simple(
        Point::new(0, 0),
        IMMOVABLE,
        Point::new(0, 0),
    ));
    world.spawn_object(empty, layer);

    assert!(world.move_object(mover, Point::new(1, 0)));
    assert!(world.move_object(mover, Point::new(1, 0)));
    assert_eq!(position(&world, mover), Point::new(2, 0));
}

#[test]
fn unknown_collider_types_overlap() {
    let collision = Collision::default();
    assert_eq!(collision.classify(0, 0), CollisionResult::Block);
    assert_eq!(collision.classify(1, 1), CollisionResult::Push);
    assert_eq!(collision.classify(2, 0), CollisionResult::Overlap);
    assert_eq!(collision.classify(7, 0), CollisionResult::Overlap);
    assert_eq!(collision.classify(0, 200), CollisionResult::Overlap);
}

#[test]
fn complex_colliders_only_collide_on_solid_cells() {
    let (mut world, layer, log) = setup();
    let ring = Object::new(Point::new(1, 0), "ring").with_collider(Collider::write(
        &["# #", "###"],
        IMMOVABLE,
        Point::new(0, 0),
    ));
    world.spawn_object(ring, layer);
    let mover = spawn(&mut world, layer, &log, "mover", 2, IMMOVABLE);
    world.object_mut(mover).unwrap().position = Point::new(2, -1);

    // into the gap of the ring
    assert!(world.move_object(mover, Point::new(0, 1)));
    // down onto the solid bottom row
    assert!(!world.move_object(mover, Point::new(0, 1)));
    assert_eq!(position(&world, mover), Point::new(2, 0));
}

#[test]
fn collision_event_carries_collider_indices() {
    struct Capture(Rc<RefCell<Option<CollisionEvent>>>);
    impl ObjectBehavior for Capture {
        fn on_blocked(&mut self, _: &mut World, _: ObjectId, event: CollisionEvent) {
            *self.0.borrow_mut() = Some(event);
        }
    }

    let (mut world, layer, _) = setup();
    let seen = Rc::new(RefCell::new(None));
    let mover = Object::new(Point::new(0, 0), "mover")
        .with_collider(Collider::simple(Point::new(1, 1), OVERLAPPABLE, Point::new(0, 0)))
        .with_collider(Collider::simple(Point::new(1, 1), IMMOVABLE, Point::new(0, 0)))
        .with_behavior(Capture(Rc::clone(&seen)));
    let mover = world.spawn_object(mover, layer);
    let wall = Object::new(Point::new(1, 0), "wall")
        .with_collider(Collider::simple(Point::new(1, 1), PUSHABLE, Point::new(0, 5)))
        .with_collider(Collider::simple(Point::new(1, 1), IMMOVABLE, Point::new(0, 0)));
    let wall = world.spawn_object(wall, layer);

    assert!(!world.move_object(mover, Point::new(1, 0)));
    let event = seen.borrow().expect("blocked hook should run");
    assert_eq!(event.collider, 1);
    assert_eq!(event.other_object, wall);
    assert_eq!(event.other_collider, 1);
    assert_eq!(event.direction, Point::new(1, 0));
}

#[test]
fn behaviors_can_move_objects_from_hooks() {
    /// Pushes back whoever pushes it.
    struct Spring;
    impl ObjectBehavior for Spring {
        fn on_pushed(&mut self, world: &mut World, _: ObjectId, event: CollisionEvent) {
            world.move_object(
                event.other_object,
                Point::new(-event.direction.x, -event.direction.y),
            );
        }
    }

    let (mut world, layer, log) = setup();
    let mover = spawn(&mut world, layer, &log, "mover", 0, PUSHABLE);
    let spring = Object::new(Point::new(1, 0), "spring")
        .with_collider(Collider::simple(Point::new(1, 1), PUSHABLE, Point::new(0, 0)))
        .with_behavior(Spring);
    let spring = world.spawn_object(spring, layer);

    assert!(world.move_object(mover, Point::new(1, 0)));
    assert_eq!(position(&world, mover), Point::new(0, 0));
    assert_eq!(position(&world, spring), Point::new(2, 0));
}

#[test]
fn removed_objects_are_skipped() {
    let (mut world, layer, log) = setup();
    let mover = spawn(&mut world, layer, &log, "mover", 0, IMMOVABLE);
    let wall = spawn(&mut world, layer, &log, "wall", 1, IMMOVABLE);
    assert!(world.remove_object(wall).is_some());

    assert!(world.move_object(mover, Point::new(1, 0)));
    assert!(!world.move_object(wall, Point::new(1, 0)));
    assert!(world.layer(layer).unwrap().objects().len() == 1);
}

#[test]
fn custom_matrix_must_be_square() {
    use CollisionResult::*;
    assert!(Collision::new(vec![vec![Block, Push], vec![Overlap]]).is_err());
    let mut collision = Collision::new(vec![vec![Push]]).unwrap();
    assert_eq!(collision.classify(0, 0), Push);

    assert!(collision.set_matrix(vec![vec![Block], vec![Block]]).is_err());
    assert_eq!(collision.types().len(), 1);
    collision.set_matrix(vec![vec![Block, Overlap], vec![Push, Block]]).unwrap();
    assert_eq!(collision.classify(1, 0), Push);
}

fn spawn_with(
    world: &mut World,
    layer: LayerId,
    log: &Log,
    name: &'static str,
    position: Point<i32>,
    colliders: Vec<Collider>,
) -> ObjectId {
    let mut object = Object::new(position, name).with_behavior(Recorder {
        name,
        log: Rc::clone(log),
    });
    for collider in colliders {
        object = object.with_collider(collider);
    }
    world.spawn_object(object, layer)
}

fn cell(collider_type: u8) -> Collider {
    Collider::simple(Point::new(1, 1), collider_type, Point::new(0, 0))
}

#[test]
fn push_decides_a_pair_even_after_a_block_collider() {
    let (mut world, layer, log) = setup();
    let a = spawn(&mut world, layer, &log, "a", 0, PUSHABLE);
    let b = spawn_with(
        &mut world,
        layer,
        &log,
        "b",
        Point::new(1, 0),
        vec![cell(IMMOVABLE), cell(PUSHABLE)],
    );

    assert!(world.move_object(a, Point::new(1, 0)));
    assert_eq!(position(&world, a), Point::new(1, 0));
    assert_eq!(position(&world, b), Point::new(2, 0));
    assert_eq!(*log.borrow(), vec!["a:push", "b:pushed", "a:move", "b:move"]);
}

#[test]
fn overlaps_are_still_reported_after_a_push() {
    let (mut world, layer, log) = setup();
    let a = spawn(&mut world, layer, &log, "a", 0, PUSHABLE);
    let b = spawn_with(
        &mut world,
        layer,
        &log,
        "b",
        Point::new(1, 0),
        vec![cell(PUSHABLE), cell(OVERLAPPABLE)],
    );

    assert!(world.move_object(a, Point::new(1, 0)));
    assert_eq!(position(&world, b), Point::new(2, 0));
    assert_eq!(
        *log.borrow(),
        vec![
            "a:push",
            "b:pushed",
            "a:overlap",
            "b:overlapped",
            "a:move",
            "b:move"
        ]
    );
}

#[test]
fn diamond_pushes_move_the_far_object_once() {
    let (mut world, layer, log) = setup();
    let tall = || Collider::simple(Point::new(1, 2), PUSHABLE, Point::new(0, 0));
    let a = spawn_with(&mut world, layer, &log, "a", Point::new(0, 0), vec![tall()]);
    let b = spawn_with(&mut world, layer, &log, "b", Point::new(1, 0), vec![cell(PUSHABLE)]);
    let c = spawn_with(&mut world, layer, &log, "c", Point::new(1, 1), vec![cell(PUSHABLE)]);
    let d = spawn_with(&mut world, layer, &log, "d", Point::new(2, 0), vec![tall()]);

    assert!(world.move_object(a, Point::new(1, 0)));
    assert_eq!(position(&world, a), Point::new(1, 0));
    assert_eq!(position(&world, b), Point::new(2, 0));
    assert_eq!(position(&world, c), Point::new(2, 1));
    assert_eq!(position(&world, d), Point::new(3, 0));

    let log = log.borrow();
    assert_eq!(log.iter().filter(|e| *e == "d:move").count(), 1);
    assert_eq!(log.iter().filter(|e| *e == "d:pushed").count(), 1);
}

#[test]
fn moves_saturate_at_the_coordinate_limit() {
    let (mut world, layer, log) = setup();
    let edge = spawn_with(
        &mut world,
        layer,
        &log,
        "edge",
        Point::new(i32::MAX, i32::MIN),
        vec![cell(PUSHABLE)],
    );
    spawn(&mut world, layer, &log, "other", 0, PUSHABLE);

    assert!(world.move_object(edge, Point::new(1, -1)));
    assert_eq!(position(&world, edge), Point::new(i32::MAX, i32::MIN));

    let loose = world.add_object(Object::new(Point::new(i32::MIN, 0), "loose"));
    assert!(world.move_object(loose, Point::new(-5, 0)));
    assert_eq!(position(&world, loose), Point::new(i32::MIN, 0));
}
