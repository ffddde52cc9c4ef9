use ltengine::{
    Camera, CapturePrinter, CellA, ConfigError, Engine, EngineError, Layer, Map, MapId, Object,
    ObjectBehavior, ObjectId, Point, Texture, World, colors,
};

fn engine(printer: &CapturePrinter) -> Result<Engine, EngineError> {
    Engine::builder()
        .image_size(Point::new(3, 1))
        .tps_limit(1000)
        .printer(printer.clone())
        .build()
}

fn glyph(c: char) -> Texture {
    Texture::simple(
        Point::new(1, 1),
        CellA::new(c, colors::WHITE, colors::BLACK),
        Point::new(0, 0),
    )
}

/// A map with a 3x1 camera and one '@' at `(0, 0)`.
fn scene(engine: &mut Engine) -> (MapId, ObjectId) {
    let world = &mut engine.world;
    let map = world.add_map(Map::new("map"));
    let layer = world.add_layer(Layer::new("layer"));
    world.map_add_layer(map, layer);
    let camera = world.add_camera(Camera::new(Point::new(0, 0), Point::new(3, 1), "camera"));
    world.map_add_camera(map, camera, true);
    let player = world.spawn_object(Object::new(Point::new(0, 0), "player").with_texture(glyph('@')), layer);
    (map, player)
}

fn visible_text(frame: &str) -> String {
    let mut text = String::new();
    let mut chars = frame.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // skip to the end of the escape sequence
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            text.push(c);
        }
    }
    text
}

#[test]
fn invalid_configs_are_rejected() {
    assert!(matches!(
        Engine::builder().tps_limit(0).build(),
        Err(EngineError::Config(ConfigError::ZeroTickRate))
    ));
    assert!(matches!(
        Engine::builder().image_size(Point::new(0, 4)).build(),
        Err(EngineError::Config(ConfigError::EmptyImage { width: 0, height: 4 }))
    ));
    assert!(matches!(
        Engine::builder().quit_key("").build(),
        Err(EngineError::Config(ConfigError::EmptyQuitKey))
    ));
}

#[test]
fn first_tick_renders_and_prints() -> Result<(), EngineError> {
    let printer = CapturePrinter::new(80, 24);
    let mut engine = engine(&printer)?;
    let (map, _) = scene(&mut engine);

    engine.tick(map)?;
    let frame = printer.last_frame().unwrap_or_default();
    assert!(frame.starts_with("\x1b[H"));
    assert_eq!(visible_text(&frame), "@  ");
    assert_eq!(engine.time.ticks_counter(), 1);
    Ok(())
}

#[test]
fn idle_ticks_print_nothing() -> Result<(), EngineError> {
    let printer = CapturePrinter::new(80, 24);
    let mut engine = engine(&printer)?;
    let (map, _) = scene(&mut engine);

    engine.tick(map)?;
    engine.tick(map)?;
    engine.tick(map)?;
    assert_eq!(printer.frames().len(), 1);
    Ok(())
}

#[test]
fn input_moves_render_on_the_next_tick() -> Result<(), EngineError> {
    let printer = CapturePrinter::new(80, 24);
    let mut engine = engine(&printer)?;
    let (map, player) = scene(&mut engine);
    engine
        .input
        .register("d", move |world, _| world.move_object(player, Point::new(1, 0)));

    engine.tick(map)?;
    engine.input.push("d");
    engine.tick(map)?;

    assert_eq!(printer.frames().len(), 2);
    assert_eq!(
        visible_text(&printer.last_frame().unwrap_or_default()),
        " @ "
    );
    Ok(())
}

#[test]
fn on_tick_can_request_renders() -> Result<(), EngineError> {
    struct Blink;
    impl ObjectBehavior for Blink {
        fn on_tick(&mut self, world: &mut World, this: ObjectId) -> bool {
            if let Some(object) = world.object_mut(this) {
                object.textures[0].active = !object.textures[0].active;
            }
            true
        }
    }

    let printer = CapturePrinter::new(80, 24);
    let mut engine = engine(&printer)?;
    let (map, player) = scene(&mut engine);
    if let Some(object) = engine.world.object_mut(player) {
        object.set_behavior(Blink);
    }

    engine.tick(map)?;
    engine.tick(map)?;
    let frames: Vec<_> = printer.frames().iter().map(|f| visible_text(f)).collect();
    assert_eq!(frames, vec!["   ", "@  "]);
    Ok(())
}

#[test]
fn quit_key_ends_run() -> Result<(), EngineError> {
    let printer = CapturePrinter::new(80, 24);
    let mut engine = Engine::builder()
        .image_size(Point::new(3, 1))
        .tps_limit(1000)
        .quit_key("x")
        .printer(printer.clone())
        .build()?;
    let (map, _) = scene(&mut engine);

    engine.input.push("x");
    engine.run(map)?;
    assert!(!engine.is_running());
    assert_eq!(engine.time.ticks_counter(), 1);
    Ok(())
}

#[test]
fn frames_are_cut_to_the_terminal() -> Result<(), EngineError> {
    let printer = CapturePrinter::new(2, 1);
    let mut engine = engine(&printer)?;
    let (map, _) = scene(&mut engine);

    engine.tick(map)?;
    assert_eq!(visible_text(&printer.last_frame().unwrap_or_default()), "@ ");
    Ok(())
}

#[test]
fn tick_rate_can_change_at_runtime() -> Result<(), EngineError> {
    let printer = CapturePrinter::new(80, 24);
    let mut engine = engine(&printer)?;
    assert!(matches!(engine.set_tps_limit(0), Err(ConfigError::ZeroTickRate)));
    engine.set_tps_limit(50)?;
    assert_eq!(engine.time.tps_limit().get(), 50);
    assert_eq!(engine.config().tps_limit, 50);
    Ok(())
}
