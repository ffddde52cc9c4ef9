use std::{
    fmt,
    num::NonZeroU32,
    time::{Duration, Instant},
};

use tick_manager_rs::{Speed, TickManager, TickMember};

pub mod invocation;
pub use invocation::{InvocationCallback, InvocationId, Invocations};

pub const DEFAULT_TPS_LIMIT: NonZeroU32 = match NonZeroU32::new(24) {
    Some(tps) => tps,
    None => NonZeroU32::MIN,
};

/// Unit of a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measurement {
    Ticks,
    Seconds,
    Milliseconds,
    Microseconds,
}

impl Measurement {
    pub fn to_duration(self, amount: u64, tps_limit: NonZeroU32) -> Duration {
        match self {
            Measurement::Ticks => {
                Duration::from_micros(amount.saturating_mul(1_000_000) / tps_limit.get() as u64)
            }
            Measurement::Seconds => Duration::from_secs(amount),
            Measurement::Milliseconds => Duration::from_millis(amount),
            Measurement::Microseconds => Duration::from_micros(amount),
        }
    }
}

/// Paces the game loop at a fixed tick rate and measures it.
///
/// The beat comes from a [`TickManager`] running at the tick rate, this
/// clock only waits on it and records what each tick actually took.
pub struct Time {
    tps_limit: NonZeroU32,
    tps: f32,
    tps_potential: f32,
    delta_time: Duration,
    ticks_counter: u64,
    tick_start: Instant,
    // keeps the beat running for `member`
    _manager: TickManager,
    member: TickMember,
}

impl fmt::Debug for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Time")
            .field("tps_limit", &self.tps_limit)
            .field("tps", &self.tps)
            .field("tps_potential", &self.tps_potential)
            .field("delta_time", &self.delta_time)
            .field("ticks_counter", &self.ticks_counter)
            .finish_non_exhaustive()
    }
}

fn beat(tps_limit: NonZeroU32) -> (TickManager, TickMember) {
    let (manager, handle) = TickManager::new(Speed::Fps(tps_limit.get() as _));
    (manager, TickMember::new(handle, 1))
}

impl Default for Time {
    fn default() -> Self {
        Self::new(DEFAULT_TPS_LIMIT)
    }
}

impl Time {
    pub fn new(tps_limit: NonZeroU32) -> Self {
        let (manager, member) = beat(tps_limit);
        Self {
            tps_limit,
            tps: 0.0,
            tps_potential: 0.0,
            delta_time: Duration::ZERO,
            ticks_counter: 0,
            tick_start: Instant::now(),
            _manager: manager,
            member,
        }
    }

    pub fn tps_limit(&self) -> NonZeroU32 {
        self.tps_limit
    }

    pub fn set_tps_limit(&mut self, tps_limit: NonZeroU32) {
        if tps_limit == self.tps_limit {
            return;
        }
        (self._manager, self.member) = beat(tps_limit);
        self.tps_limit = tps_limit;
    }

    /// Ticks per second actually achieved last tick.
    pub fn tps(&self) -> f32 {
        self.tps
    }

    /// Ticks per second the last tick's work would have allowed without sleeping.
    pub fn tps_potential(&self) -> f32 {
        self.tps_potential
    }

    /// Duration of the last full tick, sleep included.
    pub fn delta_time(&self) -> Duration {
        self.delta_time
    }

    pub fn ticks_counter(&self) -> u64 {
        self.ticks_counter
    }

    pub fn tick_period(&self) -> Duration {
        Measurement::Ticks.to_duration(1, self.tps_limit)
    }

    pub fn to_duration(&self, amount: u64, measurement: Measurement) -> Duration {
        measurement.to_duration(amount, self.tps_limit)
    }

    /// Time spent on the current tick so far.
    pub fn elapsed_this_tick(&self) -> Duration {
        self.tick_start.elapsed()
    }

    /// Waits for the next beat, then starts the next tick.
    ///
    /// A tick that overran its budget isn't made up for, it waits for the
    /// following beat like any other tick.
    pub fn wait_until_next_tick(&mut self) {
        let work = self.tick_start.elapsed();
        self.tps_potential = 1.0 / work.as_secs_f32();

        self.member.wait_for_tick();

        let now = Instant::now();
        self.delta_time = now - self.tick_start;
        self.tps = 1.0 / self.delta_time.as_secs_f32();
        self.ticks_counter += 1;
        self.tick_start = now;
    }
}
