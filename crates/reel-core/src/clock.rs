use instant::Instant;

/// Per-frame timing handed to every component.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTick {
    /// Seconds since the previous frame (0 on the first frame).
    pub delta: f32,
    /// Seconds since the clock's first frame.
    pub elapsed: f32,
}

/// Converts frame-callback instants into [`FrameTick`]s.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    first: Option<Instant>,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now: Instant) -> FrameTick {
        let first = *self.first.get_or_insert(now);
        let delta = match self.last {
            Some(prev) => secs_between(prev, now),
            None => 0.0,
        };
        self.last = Some(now);
        FrameTick {
            delta,
            elapsed: secs_between(first, now),
        }
    }
}

// instant's wasm Instant panics on negative differences
#[inline]
fn secs_between(earlier: Instant, later: Instant) -> f32 {
    if later > earlier {
        (later - earlier).as_secs_f32()
    } else {
        0.0
    }
}
