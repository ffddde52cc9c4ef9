use ltengine::{
    Animation, Camera, CellA, Engine, EngineError, Instruction, Layer, Map, Measurement, Object,
    Point, Texture, colors, init_terminal, restore_terminal, setup_logger,
};

fn frame(rows: &[&str]) -> Texture {
    Texture::write(rows, colors::WHITE, colors::TRANSPARENT, Point::new(0, 0))
}

fn main() -> Result<(), EngineError> {
    setup_logger("./animation.log")?;
    init_terminal!();

    let mut engine = Engine::builder()
        .image_size(Point::new(30, 10))
        .tps_limit(24)
        .read_terminal_input(true)
        .build()?;

    let world = &mut engine.world;
    let map = world.add_map(Map::new("stage"));
    let layer = world.add_layer(Layer::new("actors"));
    world.map_add_layer(map, layer);
    let camera = world.add_camera(
        Camera::new(Point::new(0, 0), Point::new(30, 10), "main").with_background(CellA::new(
            ' ',
            colors::BLACK,
            colors::BLUE,
        )),
    );
    world.map_add_camera(map, camera, true);

    let walker = Object::new(Point::new(2, 4), "walker")
        .with_texture(frame(&[" o ", "/|\\", "/ \\"]))
        .with_texture(frame(&[" o ", "\\|/", " | "]));
    let walker = world.spawn_object(walker, layer);

    let mut script = Vec::new();
    for _ in 0..20 {
        script.push(Instruction::TextureSet(0));
        script.push(Instruction::ParentMove(Point::new(1, 0)));
        script.push(Instruction::Delay(4, Measurement::Ticks));
        script.push(Instruction::TextureSet(1));
        script.push(Instruction::Delay(4, Measurement::Ticks));
    }
    script.push(Instruction::ParentSetPosition(Point::new(2, 4)));

    let animation = Animation::new(walker, script);
    animation.play(world);

    engine.input.register("r", move |world, _| {
        animation.stop(world);
        animation.play(world)
    });

    let result = engine.run(map);
    restore_terminal()?;
    result
}
