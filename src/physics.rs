//! Scroll physics: drag tracking, inertia, elastic overscroll.
//!
//! Offsets are main-axis pixels; `0` shows the first row and `max_scroll` the last one.

use crate::{Direction, Layout, LayoutConfig, MovementType, PointerButton, Vec2};

/// Compression factor of the rubber-band curve.
pub const RUBBER_BAND_FACTOR: f32 = 0.55;

/// Velocities below this (pixels per second) stop inertial motion.
pub const MIN_VELOCITY: f32 = 1.0;

/// Overscroll below this (pixels) is considered settled.
const SETTLE_DISTANCE: f32 = 0.01;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    #[default]
    Idle,
    Dragging,
    /// No pointer contact; inertia or elastic return in progress.
    Settling,
    /// A programmatic scroll owns the offset.
    AutoScrolling,
}

/// The geometry the physics needs each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollBounds {
    pub max_scroll: f32,
    pub virtual_extent: f32,
    /// Main-axis viewport size.
    pub viewport: f32,
}

impl From<&Layout> for ScrollBounds {
    fn from(layout: &Layout) -> Self {
        Self {
            max_scroll: layout.max_scroll,
            virtual_extent: layout.virtual_extent,
            viewport: layout.viewport.main,
        }
    }
}

/// Distance that brings `offset` back into `[0, max_scroll]`.
///
/// Positive before the start, negative past the end, `0` in range.
pub fn overscroll(offset: f32, bounds: &ScrollBounds) -> f32 {
    if offset < 0.0 {
        return -offset;
    }
    if bounds.viewport > bounds.virtual_extent {
        return -offset;
    }
    if offset > bounds.max_scroll {
        return bounds.max_scroll - offset;
    }
    0.0
}

/// Compresses an overscroll distance so the result approaches, but never reaches, `view_size`.
pub fn rubber_delta(over: f32, view_size: f32) -> f32 {
    if view_size <= 0.0 {
        return 0.0;
    }
    (1.0 - 1.0 / (over.abs() * RUBBER_BAND_FACTOR / view_size + 1.0)) * view_size * over.signum()
}

/// Critically damped approach of `current` toward `target` over roughly `smooth_time`
/// seconds. `velocity` is carried between calls.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> f32 {
    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let clamped_target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = clamped_target + (change + temp) * decay;

    // No overshoot.
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }
    output
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// The scroll state machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollPhysics {
    phase: ScrollPhase,
    offset: f32,
    velocity: f32,
    previous_offset: f32,
    drag_origin: f32,
    pointer_origin: Vec2,
}

impl ScrollPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == ScrollPhase::Dragging
    }

    /// Moves the offset without touching velocity or phase.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Stops any motion in place (snap, press).
    pub fn stop(&mut self) {
        self.velocity = 0.0;
        if self.phase == ScrollPhase::Settling {
            self.phase = ScrollPhase::Idle;
        }
    }

    /// Pointer pressed inside the viewport: a potential drag kills inertia.
    pub fn press(&mut self) {
        if self.phase != ScrollPhase::AutoScrolling {
            self.stop();
        }
    }

    /// Returns `false` when the drag is refused (wrong button, inactive view, or a
    /// programmatic scroll in progress).
    pub fn begin_drag(&mut self, pointer: Vec2, button: PointerButton, enabled: bool) -> bool {
        if self.phase == ScrollPhase::AutoScrolling || button != PointerButton::Primary || !enabled
        {
            return false;
        }
        vtrace!(offset = self.offset, "begin_drag");
        self.phase = ScrollPhase::Dragging;
        self.velocity = 0.0;
        self.drag_origin = self.offset;
        self.pointer_origin = pointer;
        true
    }

    /// Applies the pointer movement since drag begin. Returns `true` if the offset changed.
    pub fn drag(&mut self, pointer: Vec2, config: &LayoutConfig, bounds: &ScrollBounds) -> bool {
        if self.phase != ScrollPhase::Dragging {
            return false;
        }
        let delta = directional_delta(config.direction, pointer - self.pointer_origin);
        let mut offset = self.drag_origin + delta;

        if config.movement != MovementType::Unrestricted {
            let over = overscroll(offset, bounds);
            offset += over;
            if config.movement == MovementType::Elastic && over != 0.0 {
                offset -= rubber_delta(over, bounds.viewport);
            }
        }

        let changed = offset != self.offset;
        self.offset = offset;
        changed
    }

    pub fn end_drag(
        &mut self,
        button: PointerButton,
        movement: MovementType,
        bounds: &ScrollBounds,
    ) {
        if self.phase != ScrollPhase::Dragging || button != PointerButton::Primary {
            return;
        }
        vtrace!(velocity = self.velocity, "end_drag");
        self.drag_origin = self.offset;
        self.phase = if self.velocity != 0.0
            || restricted_overscroll(self.offset, movement, bounds) != 0.0
        {
            ScrollPhase::Settling
        } else {
            ScrollPhase::Idle
        };
    }

    /// Places the offset and comes to rest there.
    pub(crate) fn jump_to(&mut self, offset: f32) {
        self.offset = offset;
        self.previous_offset = offset;
        self.drag_origin = offset;
        self.velocity = 0.0;
        self.phase = ScrollPhase::Idle;
    }

    pub(crate) fn begin_auto_scroll(&mut self) {
        self.velocity = 0.0;
        self.phase = ScrollPhase::AutoScrolling;
    }

    /// The programmatic scroll completed normally.
    pub(crate) fn finish_auto_scroll(&mut self) {
        if self.phase == ScrollPhase::AutoScrolling {
            self.phase = ScrollPhase::Idle;
        }
    }

    /// The programmatic scroll was released; physics takes the offset back.
    pub(crate) fn release_auto_scroll(&mut self) {
        if self.phase == ScrollPhase::AutoScrolling {
            self.phase = ScrollPhase::Settling;
        }
    }

    /// Advances one frame. Returns `true` if the offset changed.
    pub fn tick(&mut self, dt: f32, config: &LayoutConfig, bounds: &ScrollBounds) -> bool {
        if dt.is_nan() || dt <= 0.0 || self.phase == ScrollPhase::AutoScrolling {
            return false;
        }

        let mut moved = false;
        let dragging = self.phase == ScrollPhase::Dragging;
        let over = restricted_overscroll(self.offset, config.movement, bounds);

        if !dragging && (over != 0.0 || self.velocity != 0.0) {
            self.phase = ScrollPhase::Settling;
            let mut offset = self.offset;

            if config.movement == MovementType::Elastic && over != 0.0 {
                offset = smooth_damp(
                    self.offset,
                    self.offset + over,
                    &mut self.velocity,
                    config.elasticity,
                    f32::INFINITY,
                    dt,
                );
                let rest = overscroll(offset, bounds);
                if rest.abs() < SETTLE_DISTANCE && self.velocity.abs() < MIN_VELOCITY {
                    offset += rest;
                    self.velocity = 0.0;
                }
            } else if config.inertia {
                self.velocity *= config.deceleration_rate.powf(dt);
                if self.velocity.abs() < MIN_VELOCITY {
                    self.velocity = 0.0;
                }
                offset += self.velocity * dt;
            } else {
                self.velocity = 0.0;
            }

            if config.movement == MovementType::Clamped {
                let correction = overscroll(offset, bounds);
                if correction != 0.0 {
                    offset += correction;
                    self.velocity = 0.0;
                }
            }

            moved = offset != self.offset;
            self.offset = offset;

            if self.velocity == 0.0
                && restricted_overscroll(self.offset, config.movement, bounds) == 0.0
            {
                vtrace!(offset = self.offset, "settled");
                self.phase = ScrollPhase::Idle;
            }
        } else if !dragging && self.phase == ScrollPhase::Settling {
            self.phase = ScrollPhase::Idle;
        }

        if dragging && config.inertia {
            let instant = (self.offset - self.previous_offset) / dt;
            self.velocity = lerp(self.velocity, instant, dt * 10.0);
        }
        self.previous_offset = self.offset;

        moved
    }
}

/// Overscroll the movement type cares about; unrestricted scrolling has none.
fn restricted_overscroll(offset: f32, movement: MovementType, bounds: &ScrollBounds) -> f32 {
    match movement {
        MovementType::Unrestricted => 0.0,
        MovementType::Elastic | MovementType::Clamped => overscroll(offset, bounds),
    }
}

/// Pointer delta projected onto the main axis, in scroll-offset units.
///
/// Positions are y-down, so moving the pointer toward the start of the main axis scrolls
/// forward.
fn directional_delta(direction: Direction, delta: Vec2) -> f32 {
    -direction.split(delta).main
}
