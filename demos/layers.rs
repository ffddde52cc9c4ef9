use ltengine::{
    Camera, CellA, Engine, EngineError, Layer, Map, Object, Point, Rgba, Texture, colors,
    init_terminal, keys, restore_terminal, setup_logger,
};

fn main() -> Result<(), EngineError> {
    setup_logger("./layers.log")?;
    init_terminal!();

    let mut engine = Engine::builder()
        .image_size(Point::new(40, 12))
        .read_terminal_input(true)
        .build()?;

    let world = &mut engine.world;
    let map = world.add_map(Map::new("layers"));
    let back = world.add_layer(Layer::new("back"));
    let front = world.add_layer(Layer::new("front"));
    world.map_add_layer(map, back);
    world.map_add_layer(map, front);

    let main = world.add_camera(Camera::new(Point::new(0, 0), Point::new(40, 12), "main"));
    world.map_add_camera(map, main, true);
    let close_up = world.add_camera(Camera::new(Point::new(8, 3), Point::new(10, 5), "close up"));

    world.spawn_object(
        Object::new(Point::new(4, 2), "field").with_texture(Texture::simple(
            Point::new(24, 8),
            CellA::new('.', colors::GREEN, Rgba::new(0, 90, 0, 255)),
            Point::new(0, 0),
        )),
        back,
    );
    let glass = world.spawn_object(
        Object::new(Point::new(10, 4), "glass").with_texture(Texture::simple(
            Point::new(12, 4),
            CellA::new(' ', colors::TRANSPARENT, Rgba::new(120, 160, 255, 140)),
            Point::new(0, 0),
        )),
        front,
    );

    // left/right slide the glass, f fades the front layer, t toggles a red tint
    for (key, dx) in [(keys::LEFT, -1), (keys::RIGHT, 1)] {
        engine
            .input
            .register(key, move |world, _| world.move_object(glass, Point::new(dx, 0)));
    }
    engine.input.register("f", move |world, _| {
        world
            .layer_mut(front)
            .map(|l| l.alpha = l.alpha.wrapping_sub(51))
            .is_some()
    });
    engine.input.register("t", move |world, _| {
        world
            .layer_mut(front)
            .map(|l| {
                l.brgba = if l.brgba.a == 0 {
                    Rgba::new(255, 0, 0, 60)
                } else {
                    colors::TRANSPARENT
                }
            })
            .is_some()
    });

    let layers = [back, front];
    while engine.is_running() {
        engine.call_callbacks();
        if engine.should_render_this_tick() || engine.should_print_this_tick() {
            engine.world.render_camera(main);
            engine.world.render_camera_layers(close_up, &layers);
            engine.output.clear();
            engine.draw_camera(main, Point::new(0, 0), 255);
            engine.draw_camera(close_up, Point::new(29, 6), 200);
            engine.print()?;
        }
        engine.wait_until_next_tick();
    }

    restore_terminal()?;
    Ok(())
}
