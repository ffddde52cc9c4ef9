use std::{
    num::NonZeroU32,
    sync::{Arc, atomic::AtomicBool},
};

use common_stdx::Point;
use log::{debug, info};

use crate::{
    UPoint,
    collision::Collision,
    error::{ConfigError, EngineError},
    input_handler::{Input, keys},
    output::{CrosstermPrinter, Output, TerminalPrinter},
    time::{DEFAULT_TPS_LIMIT, Time},
    world::{CameraId, MapId, World},
};

/// Settings an [`Engine`] is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub tps_limit: u32,
    pub image_size: UPoint,
    /// Input string that stops the game loop.
    pub quit_key: String,
    pub collision: Collision,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tps_limit: DEFAULT_TPS_LIMIT.get(),
            image_size: Point::new(50, 20),
            quit_key: keys::ctrl('c').unwrap_or_default(),
            collision: Collision::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<NonZeroU32, ConfigError> {
        if self.image_size.x == 0 || self.image_size.y == 0 {
            return Err(ConfigError::EmptyImage {
                width: self.image_size.x,
                height: self.image_size.y,
            });
        }
        if self.quit_key.is_empty() {
            return Err(ConfigError::EmptyQuitKey);
        }
        NonZeroU32::new(self.tps_limit).ok_or(ConfigError::ZeroTickRate)
    }
}

macro_rules! config_field {
    ($fn_name:ident, $field_name:ident, $type:ty) => {
        pub fn $fn_name(mut self, $field_name: $type) -> Self {
            self.config.$field_name = $field_name;
            self
        }
    };
}

/// Collects configuration and builds an [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    printer: Option<Box<dyn TerminalPrinter>>,
    read_terminal_input: bool,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    config_field!(tps_limit, tps_limit, u32);
    config_field!(image_size, image_size, UPoint);
    config_field!(collision, collision, Collision);

    pub fn quit_key(mut self, quit_key: impl Into<String>) -> Self {
        self.config.quit_key = quit_key.into();
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Prints somewhere other than stdout.
    pub fn printer(mut self, printer: impl TerminalPrinter + 'static) -> Self {
        self.printer = Some(Box::new(printer));
        self
    }

    /// Starts the terminal input reader thread on build.
    pub fn read_terminal_input(mut self, enabled: bool) -> Self {
        self.read_terminal_input = enabled;
        self
    }

    pub fn build(self) -> Result<Engine, EngineError> {
        let tps_limit = self.config.validate()?;
        let running = Arc::new(AtomicBool::new(true));

        let mut world = World::new(self.config.collision.clone(), Arc::clone(&running));
        world.invocations.set_tps_limit(tps_limit);

        let mut input = Input::new();
        input.set_quit_key(self.config.quit_key.clone());
        if self.read_terminal_input {
            input.start_reader(running)?;
        }

        let output = match self.printer {
            Some(printer) => Output::new(self.config.image_size, printer),
            None => Output::new(self.config.image_size, CrosstermPrinter::default()),
        };

        info!(
            "engine built: {}x{} image at {} ticks per second",
            self.config.image_size.x, self.config.image_size.y, tps_limit
        );

        Ok(Engine {
            world,
            time: Time::new(tps_limit),
            input,
            output,
            config: self.config,
            render_requested: true,
            print_requested: false,
        })
    }
}

/// The explicit engine context: world, clock, input queue and output.
pub struct Engine {
    pub world: World,
    pub time: Time,
    pub input: Input,
    pub output: Output,
    config: EngineConfig,
    render_requested: bool,
    print_requested: bool,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.world.is_running()
    }

    pub fn quit(&self) {
        self.world.quit();
    }

    pub fn set_tps_limit(&mut self, tps_limit: u32) -> Result<(), ConfigError> {
        let tps = NonZeroU32::new(tps_limit).ok_or(ConfigError::ZeroTickRate)?;
        self.time.set_tps_limit(tps);
        self.world.invocations.set_tps_limit(tps);
        self.config.tps_limit = tps_limit;
        Ok(())
    }

    /// Runs input callbacks, due invocations and object ticks, in that order.
    pub fn call_callbacks(&mut self) {
        let mut render = self.input.call_callbacks(&mut self.world);
        render |= self.world.call_invocations(self.time.delta_time());
        render |= self.world.call_on_ticks();
        self.render_requested |= render;

        if self.input.take_resize().is_some() || self.output.terminal_resized() {
            debug!("terminal resized");
            self.print_requested = true;
        }
    }

    /// Whether something asked for a render since the last tick.
    pub fn should_render_this_tick(&self) -> bool {
        self.render_requested
    }

    /// Whether the terminal needs a reprint even without a new render.
    pub fn should_print_this_tick(&self) -> bool {
        self.print_requested
    }

    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    pub fn render_map(&mut self, map: MapId) -> bool {
        self.world.render_map(map)
    }

    /// Draws a camera's whole last render onto the output image.
    pub fn draw_camera(&mut self, camera: CameraId, position: Point<i32>, alpha: u8) -> bool {
        let end = match self.world.camera(camera) {
            Some(c) => c.resolution(),
            None => return false,
        };
        self.draw_camera_region(camera, position, Point::new(0, 0), end, alpha)
    }

    /// Draws the `[start, end)` part of a camera's last render onto the output image.
    pub fn draw_camera_region(
        &mut self,
        camera: CameraId,
        position: Point<i32>,
        start: UPoint,
        end: UPoint,
        alpha: u8,
    ) -> bool {
        let Some(camera) = self.world.cameras.get(camera) else {
            return false;
        };
        self.output.draw(
            camera.image(),
            camera.resolution(),
            position,
            start,
            end,
            alpha,
        );
        true
    }

    pub fn print(&mut self) -> Result<(), EngineError> {
        self.output.print()
    }

    /// Sleeps out the tick and resets render demand.
    pub fn wait_until_next_tick(&mut self) {
        self.render_requested = false;
        self.print_requested = false;
        self.time.wait_until_next_tick();
    }

    /// One game loop iteration for `map`, rendering only on demand.
    pub fn tick(&mut self, map: MapId) -> Result<(), EngineError> {
        self.call_callbacks();

        if self.should_render_this_tick() {
            if let Some(camera) = self.world.map(map).and_then(|m| m.active_camera()) {
                self.world.render_camera(camera);
                self.output.clear();
                self.draw_camera(camera, Point::new(0, 0), 255);
            }
            self.print()?;
        } else if self.should_print_this_tick() {
            self.print()?;
        }

        self.wait_until_next_tick();
        Ok(())
    }

    /// Ticks until something quits the engine.
    pub fn run(&mut self, map: MapId) -> Result<(), EngineError> {
        info!("game loop started");
        while self.is_running() {
            self.tick(map)?;
        }
        info!("game loop stopped after {} ticks", self.time.ticks_counter());
        Ok(())
    }
}
