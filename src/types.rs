use core::ops::{Add, Sub};

/// A 2D vector in content-local, y-down coordinates.
///
/// Used for everything the host exchanges with the engine: viewport and template sizes,
/// pointer positions, and slot positions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-relative pair: `main` is the scroll axis, `cross` the axis tuples are laid along.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub main: f32,
    pub cross: f32,
}

impl Rect {
    pub const fn new(main: f32, cross: f32) -> Self {
        Self { main, cross }
    }
}

/// The primary scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Horizontal,
    #[default]
    Vertical,
}

impl Direction {
    /// Projects an `x/y` vector onto this direction's main/cross axes.
    pub fn split(self, v: Vec2) -> Rect {
        match self {
            Self::Vertical => Rect::new(v.y, v.x),
            Self::Horizontal => Rect::new(v.x, v.y),
        }
    }

    /// Inverse of [`Direction::split`].
    pub fn join(self, r: Rect) -> Vec2 {
        match self {
            Self::Vertical => Vec2::new(r.cross, r.main),
            Self::Horizontal => Vec2::new(r.main, r.cross),
        }
    }
}

/// How the scroll offset behaves when it leaves `[0, max_scroll]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementType {
    /// No bounds at all.
    Unrestricted,
    /// Overscroll is rubber-banded while dragging and springs back afterwards.
    #[default]
    Elastic,
    /// The offset never leaves the scrollable range.
    Clamped,
}

/// Cross-axis placement of tuples when they do not fill the available space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossAlign {
    Start,
    #[default]
    Center,
    End,
}

impl CrossAlign {
    /// `-1`, `0` or `1`.
    pub fn sign(self) -> i8 {
        match self {
            Self::Start => -1,
            Self::Center => 0,
            Self::End => 1,
        }
    }

    /// Clamps any integer to the nearest alignment (`< 0` start, `> 0` end).
    pub fn from_sign(sign: i32) -> Self {
        match sign {
            i32::MIN..=-1 => Self::Start,
            0 => Self::Center,
            _ => Self::End,
        }
    }
}

/// Content padding in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const ZERO: Self = Self::all(0.0);

    pub const fn all(v: f32) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }

    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Padding before the first row along `direction`.
    pub fn main_start(&self, direction: Direction) -> f32 {
        match direction {
            Direction::Vertical => self.top,
            Direction::Horizontal => self.left,
        }
    }

    /// Padding before the first tuple column along the cross axis.
    pub fn cross_start(&self, direction: Direction) -> f32 {
        match direction {
            Direction::Vertical => self.left,
            Direction::Horizontal => self.top,
        }
    }

    /// Total padding on both ends of the main axis.
    pub fn main_total(&self, direction: Direction) -> f32 {
        match direction {
            Direction::Vertical => self.top + self.bottom,
            Direction::Horizontal => self.left + self.right,
        }
    }

    /// Total padding on both ends of the cross axis.
    pub fn cross_total(&self, direction: Direction) -> f32 {
        match direction {
            Direction::Vertical => self.left + self.right,
            Direction::Horizontal => self.top + self.bottom,
        }
    }
}

/// Slot-to-index binding discipline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowMode {
    /// Slot `k` binds logical index `start + k`; slots are created on demand.
    #[default]
    Sliding,
    /// Slots are preallocated and an index always lands in slot `index mod slot_count`.
    Circular,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerEventKind {
    /// Pointer pressed; a drag may follow.
    Press,
    Begin,
    Move,
    End,
}

/// A pointer event already translated into the content's local space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Vec2,
    pub button: PointerButton,
    /// Whether the event targets this collection's viewport.
    pub in_viewport: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            button: PointerButton::Primary,
            in_viewport: true,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_in_viewport(mut self, in_viewport: bool) -> Self {
        self.in_viewport = in_viewport;
        self
    }
}
