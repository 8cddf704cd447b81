use crate::{CrossAlign, Direction, MovementType, Padding, Vec2, WindowMode};

/// Upper bound for [`LayoutConfig::tuple_count`].
pub const MAX_TUPLES: usize = 8;
/// Upper bound for [`LayoutConfig::cache_margin`].
pub const MAX_CACHE_MARGIN: usize = 128;
/// Upper bound for each spacing component.
pub const MAX_SPACING: f32 = 250.0;

/// Layout and scroll-physics configuration for a [`crate::Collection`].
///
/// This is a plain value. Changes are committed through `Collection::set_config` /
/// `Collection::update_config`, which sanitize the value and run one full re-layout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    pub direction: Direction,
    pub movement: MovementType,
    /// Spring-back time constant (seconds) for elastic overscroll.
    pub elasticity: f32,
    pub inertia: bool,
    /// Fraction of velocity kept after one second of free motion.
    pub deceleration_rate: f32,
    /// Fixed number of items per row (column for horizontal lists), `1..=8`.
    pub tuple_count: usize,
    /// Derive the tuple count from the cross-axis space instead of `tuple_count`.
    pub auto_tuples: bool,
    /// Stretch cells on the cross axis so the tuples fill the content area.
    pub expand: bool,
    pub align: CrossAlign,
    pub padding: Padding,
    /// Space between cells, `x` and `y` in content space.
    pub spacing: Vec2,
    /// Extra slots kept materialized past the viewport.
    pub cache_margin: usize,
    pub window: WindowMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Vertical,
            movement: MovementType::Elastic,
            elasticity: 0.1,
            inertia: true,
            deceleration_rate: 0.135,
            tuple_count: 1,
            auto_tuples: false,
            expand: false,
            align: CrossAlign::Center,
            padding: Padding::ZERO,
            spacing: Vec2::ZERO,
            cache_margin: 0,
            window: WindowMode::Sliding,
        }
    }
}

impl LayoutConfig {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Returns a copy with every field forced into its valid range.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let non_negative = |v: f32, fallback: f32| {
            debug_assert!(v.is_finite(), "LayoutConfig values must be finite; got {v}");
            if v.is_finite() { v.max(0.0) } else { fallback }
        };
        let spacing = |v: f32| non_negative(v, 0.0).min(MAX_SPACING);

        Self {
            elasticity: non_negative(self.elasticity, defaults.elasticity),
            deceleration_rate: non_negative(self.deceleration_rate, defaults.deceleration_rate),
            tuple_count: self.tuple_count.clamp(1, MAX_TUPLES),
            padding: Padding {
                left: non_negative(self.padding.left, 0.0),
                right: non_negative(self.padding.right, 0.0),
                top: non_negative(self.padding.top, 0.0),
                bottom: non_negative(self.padding.bottom, 0.0),
            },
            spacing: Vec2::new(spacing(self.spacing.x), spacing(self.spacing.y)),
            cache_margin: self.cache_margin.min(MAX_CACHE_MARGIN),
            ..self.clone()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_movement(mut self, movement: MovementType) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_elasticity(mut self, elasticity: f32) -> Self {
        self.elasticity = elasticity;
        self
    }

    pub fn with_inertia(mut self, inertia: bool) -> Self {
        self.inertia = inertia;
        self
    }

    pub fn with_deceleration_rate(mut self, rate: f32) -> Self {
        self.deceleration_rate = rate;
        self
    }

    pub fn with_tuple_count(mut self, tuple_count: usize) -> Self {
        self.tuple_count = tuple_count;
        self
    }

    pub fn with_auto_tuples(mut self, auto_tuples: bool) -> Self {
        self.auto_tuples = auto_tuples;
        self
    }

    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn with_align(mut self, align: CrossAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_spacing(mut self, spacing: Vec2) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_cache_margin(mut self, cache_margin: usize) -> Self {
        self.cache_margin = cache_margin;
        self
    }

    pub fn with_window(mut self, window: WindowMode) -> Self {
        self.window = window;
        self
    }
}
