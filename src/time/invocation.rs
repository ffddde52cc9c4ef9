use std::{fmt, num::NonZeroU32, time::Duration};

use crate::{
    time::{DEFAULT_TPS_LIMIT, Measurement},
    world::World,
};

/// Called once the delay runs out. Returns `true` to request a render.
pub type InvocationCallback = Box<dyn FnMut(&mut World) -> bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvocationId(u64);

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invocation {}", self.0)
    }
}

struct Invocation {
    id: InvocationId,
    delay: Duration,
    elapsed: Duration,
    callback: Option<InvocationCallback>,
}

/// Delay-then-call callbacks, advanced once per tick.
pub struct Invocations {
    pending: Vec<Invocation>,
    next_id: u64,
    tps_limit: NonZeroU32,
}

impl Default for Invocations {
    fn default() -> Self {
        Self::new(DEFAULT_TPS_LIMIT)
    }
}

impl fmt::Debug for Invocations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocations")
            .field("pending", &self.pending.len())
            .field("tps_limit", &self.tps_limit)
            .finish()
    }
}

impl Invocations {
    pub fn new(tps_limit: NonZeroU32) -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
            tps_limit,
        }
    }

    /// Tick rate used to turn [`Measurement::Ticks`] into time.
    pub fn set_tps_limit(&mut self, tps_limit: NonZeroU32) {
        self.tps_limit = tps_limit;
    }

    pub fn to_duration(&self, amount: u64, measurement: Measurement) -> Duration {
        measurement.to_duration(amount, self.tps_limit)
    }

    /// Schedules `callback` to run once `amount` of `measurement` has passed.
    pub fn invoke(
        &mut self,
        amount: u64,
        measurement: Measurement,
        callback: impl FnMut(&mut World) -> bool + 'static,
    ) -> InvocationId {
        let delay = self.to_duration(amount, measurement);
        self.invoke_after(delay, Box::new(callback))
    }

    pub fn invoke_after(&mut self, delay: Duration, callback: InvocationCallback) -> InvocationId {
        let id = InvocationId(self.next_id);
        self.next_id += 1;
        self.pending.push(Invocation {
            id,
            delay,
            elapsed: Duration::ZERO,
            callback: Some(callback),
        });
        id
    }

    /// Cancels a pending invocation. Cancelling twice, or after it fired, is a no-op.
    pub fn cancel(&mut self, id: InvocationId) -> bool {
        match self.pending.iter_mut().find(|i| i.id == id) {
            Some(invocation) => invocation.callback.take().is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: InvocationId) -> bool {
        self.pending
            .iter()
            .any(|i| i.id == id && i.callback.is_some())
    }

    pub fn len(&self) -> usize {
        self.pending.iter().filter(|i| i.callback.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl World {
    /// Advances every pending invocation by `delta` and calls those that are due.
    ///
    /// Callbacks may schedule new invocations, which start counting on the next
    /// call. Returns `true` if any callback requested a render.
    pub fn call_invocations(&mut self, delta: Duration) -> bool {
        let mut render = false;
        let due = self.invocations.pending.len();
        for i in 0..due {
            let callback = {
                let invocation = &mut self.invocations.pending[i];
                if invocation.callback.is_none() {
                    continue;
                }
                invocation.elapsed += delta;
                if invocation.elapsed < invocation.delay {
                    continue;
                }
                invocation.callback.take()
            };
            if let Some(mut callback) = callback {
                render |= callback(self);
            }
        }
        self.invocations.pending.retain(|i| i.callback.is_some());
        render
    }
}
