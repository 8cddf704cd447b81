use crate::ItemId;

/// Receives the normalized progress of an animated scroll.
pub trait ProgressSink {
    fn progress(&mut self, t: f32);
}

impl<F: FnMut(f32)> ProgressSink for F {
    fn progress(&mut self, t: f32) {
        self(t)
    }
}

/// A time-bounded, frame-driven progress generator.
///
/// `scroll` arms it, each `tick` reports `elapsed / duration` to the sink, and the first tick
/// that reaches the duration reports exactly `1.0` and disarms it. `release` disarms it silently.
pub struct AutoScroller<S = Box<dyn FnMut(f32)>> {
    active: bool,
    elapsed: f32,
    duration: f32,
    sink: Option<S>,
}

impl<S> Default for AutoScroller<S> {
    fn default() -> Self {
        Self {
            active: false,
            elapsed: 0.0,
            duration: 0.0,
            sink: None,
        }
    }
}

impl<S: ProgressSink> AutoScroller<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Arms the scroller, replacing any scroll in progress.
    ///
    /// Returns `Some(1.0)` when the scroll completed synchronously (inactive view and
    /// `duration <= 0`); the sink has then already been called.
    pub fn scroll(&mut self, duration: f32, view_active: bool, sink: Option<S>) -> Option<f32> {
        self.active = true;
        self.elapsed = 0.0;
        self.duration = if duration.is_finite() { duration } else { 0.0 };
        self.sink = sink;

        if !view_active && self.duration <= 0.0 {
            return Some(self.complete());
        }
        None
    }

    /// Advances by `dt` seconds and returns the progress reported this frame, if any.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        if !self.active {
            return None;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            return Some(self.complete());
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        if let Some(sink) = self.sink.as_mut() {
            sink.progress(t);
        }
        Some(t)
    }

    /// Deactivates without a final progress report.
    pub fn release(&mut self) {
        if self.active {
            vtrace!(elapsed = self.elapsed, "AutoScroller::release");
        }
        self.active = false;
        self.sink = None;
    }

    fn complete(&mut self) -> f32 {
        self.active = false;
        if let Some(mut sink) = self.sink.take() {
            sink.progress(1.0);
        }
        1.0
    }
}

impl<S> core::fmt::Debug for AutoScroller<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AutoScroller")
            .field("active", &self.active)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

/// Where an animated or instant scroll should land.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollTarget {
    /// Centers the row holding this index, clamped to the scrollable range.
    Index(usize),
    Item(ItemId),
    /// A raw main-axis offset, not clamped.
    Offset(f32),
}

/// Interpolates a scroll offset from a starting point to a target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, easing: Easing) -> Self {
        Self { from, to, easing }
    }

    pub fn sample(&self, progress: f32) -> f32 {
        let eased = self.easing.sample(progress.clamp(0.0, 1.0));
        self.from + (self.to - self.from) * eased
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    #[default]
    Linear,
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}
