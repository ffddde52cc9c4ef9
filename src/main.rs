use std::collections::HashSet;

use log::info;
use ltengine::{
    Camera, CellA, Collider, CollisionEvent, Engine, EngineError, Layer, Map, Object,
    ObjectBehavior, ObjectId, Point, Texture, World, colors, init_terminal, keys,
    restore_terminal, setup_logger,
};
use rand::Rng;

const ROOM: Point<u32> = Point { x: 40, y: 16 };
const WALL: u8 = 0;
const CRATE: u8 = 1;
const GOAL: u8 = 2;

struct Goal;

impl ObjectBehavior for Goal {
    fn on_overlapped(&mut self, _world: &mut World, this: ObjectId, event: CollisionEvent) {
        info!("object {} reached goal {}", event.other_object, this);
    }

    fn on_overlapped_exit(&mut self, _world: &mut World, this: ObjectId, event: CollisionEvent) {
        info!("object {} left goal {}", event.other_object, this);
    }
}

fn wall(world: &mut World, layer: ltengine::LayerId, position: Point<i32>, size: Point<u32>) {
    let cell = CellA::new('#', colors::GRAY, colors::BLACK);
    let object = Object::new(position, "wall")
        .with_texture(Texture::simple(size, cell, Point::new(0, 0)))
        .with_collider(Collider::simple(size, WALL, Point::new(0, 0)));
    world.spawn_object(object, layer);
}

fn free_spot(rng: &mut impl Rng, taken: &mut HashSet<Point<i32>>) -> Point<i32> {
    loop {
        let p = Point::new(
            rng.gen_range(2..ROOM.x as i32 - 2),
            rng.gen_range(2..ROOM.y as i32 - 2),
        );
        if taken.insert(p) {
            return p;
        }
    }
}

fn build_room(engine: &mut Engine) -> (ltengine::MapId, ObjectId) {
    let world = &mut engine.world;
    let map = world.add_map(Map::new("room"));
    let layer = world.add_layer(Layer::new("ground"));
    world.map_add_layer(map, layer);

    let camera = world.add_camera(Camera::new(Point::new(0, 0), ROOM, "main"));
    world.map_add_camera(map, camera, true);

    let (w, h) = (ROOM.x as i32, ROOM.y as i32);
    wall(world, layer, Point::new(0, 0), Point::new(ROOM.x, 1));
    wall(world, layer, Point::new(0, h - 1), Point::new(ROOM.x, 1));
    wall(world, layer, Point::new(0, 1), Point::new(1, ROOM.y - 2));
    wall(world, layer, Point::new(w - 1, 1), Point::new(1, ROOM.y - 2));

    let mut rng = rand::thread_rng();
    let mut taken = HashSet::new();

    for _ in 0..4 {
        let goal = Object::new(free_spot(&mut rng, &mut taken), "goal")
            .with_texture(Texture::simple(
                Point::new(1, 1),
                CellA::new('.', colors::GREEN, colors::TRANSPARENT),
                Point::new(0, 0),
            ))
            .with_collider(Collider::simple(Point::new(1, 1), GOAL, Point::new(0, 0)))
            .with_behavior(Goal);
        world.spawn_object(goal, layer);
    }

    for _ in 0..6 {
        let crate_box = Object::new(free_spot(&mut rng, &mut taken), "crate")
            .with_texture(Texture::simple(
                Point::new(1, 1),
                CellA::new('&', colors::YELLOW, colors::TRANSPARENT),
                Point::new(0, 0),
            ))
            .with_collider(Collider::simple(Point::new(1, 1), CRATE, Point::new(0, 0)));
        world.spawn_object(crate_box, layer);
    }

    let player = Object::new(free_spot(&mut rng, &mut taken), "player")
        .with_texture(Texture::simple(
            Point::new(1, 1),
            CellA::new('@', colors::CYAN, colors::TRANSPARENT),
            Point::new(0, 0),
        ))
        .with_collider(Collider::simple(Point::new(1, 1), WALL, Point::new(0, 0)));
    let player = world.spawn_object(player, layer);

    (map, player)
}

fn main() -> Result<(), EngineError> {
    setup_logger("./log.txt")?;
    init_terminal!();

    let mut engine = Engine::builder()
        .image_size(ROOM)
        .tps_limit(30)
        .read_terminal_input(true)
        .build()?;

    let (map, player) = build_room(&mut engine);

    let moves = [
        (keys::UP, Point::new(0, -1)),
        (keys::DOWN, Point::new(0, 1)),
        (keys::LEFT, Point::new(-1, 0)),
        (keys::RIGHT, Point::new(1, 0)),
        ("w", Point::new(0, -1)),
        ("s", Point::new(0, 1)),
        ("a", Point::new(-1, 0)),
        ("d", Point::new(1, 0)),
    ];
    for (key, direction) in moves {
        engine
            .input
            .register(key, move |world, _| world.move_object(player, direction));
    }
    engine.input.register("q", |world, _| {
        world.quit();
        false
    });

    let result = engine.run(map);
    restore_terminal()?;
    result
}
