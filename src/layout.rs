use crate::config::MAX_TUPLES;
use crate::{Direction, LayoutConfig, Rect, Vec2};

/// Hard ceiling on the number of materialized slots.
pub const MAX_SLOTS: usize = 512;

/// The solved geometry of a collection.
///
/// Pure function of the config, viewport size, natural cell size and item count;
/// solving twice with the same inputs yields an identical value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    pub direction: Direction,
    /// Items per row (main-axis line).
    pub tuple_count: usize,
    /// Effective cell size, main/cross.
    pub cell: Rect,
    pub spacing: Rect,
    pub viewport: Rect,
    /// Padding before the first row (main) and first tuple column (cross).
    pub padding_start: Rect,
    /// Main-axis size of every row laid out end to end, padding included.
    pub virtual_extent: f32,
    pub max_scroll: f32,
    /// `(cell + spacing) / viewport` on the main axis.
    pub cell_ratio: f32,
    /// Cross-axis shift applied to the tuples to honour the alignment.
    pub align_offset: f32,
    /// Rows that fit the viewport, partially visible ones included.
    pub visible_rows: usize,
    pub slot_count: usize,
    pub item_count: usize,
}

impl Layout {
    pub fn solve(
        config: &LayoutConfig,
        viewport: Vec2,
        natural_cell: Vec2,
        item_count: usize,
    ) -> Self {
        let direction = config.direction;
        let viewport = direction.split(viewport);
        let natural = direction.split(natural_cell);
        let spacing = direction.split(config.spacing);
        let padding = &config.padding;

        let cross_available = (viewport.cross - padding.cross_total(direction)).max(0.0);

        let tuple_count = if config.auto_tuples {
            fitting_cells(cross_available, natural.cross, spacing.cross).clamp(1, MAX_TUPLES)
        } else {
            config.tuple_count.clamp(1, MAX_TUPLES)
        };

        let mut cell = natural;
        if config.expand {
            let gaps = spacing.cross * (tuple_count - 1) as f32;
            cell.cross = ((cross_available - gaps) / tuple_count as f32).max(0.0);
        }

        let stride = cell.main + spacing.main;
        let rows = item_count.div_ceil(tuple_count);
        let virtual_extent = rows as f32 * cell.main
            + rows.saturating_sub(1) as f32 * spacing.main
            + padding.main_total(direction);
        let max_scroll = (virtual_extent - viewport.main).max(0.0);

        let cell_ratio = if viewport.main > 0.0 {
            stride / viewport.main
        } else {
            0.0
        };

        let align_offset = if config.expand {
            0.0
        } else {
            let occupied =
                tuple_count as f32 * cell.cross + (tuple_count - 1) as f32 * spacing.cross;
            let leftover = cross_available - occupied;
            leftover / 2.0 * (1.0 + f32::from(config.align.sign()))
        };

        let visible_rows = visible_cells(viewport.main, cell.main, spacing.main);
        let slot_count = if stride > 0.0 {
            ((visible_rows + 1) * tuple_count + config.cache_margin).min(MAX_SLOTS)
        } else {
            0
        };

        let layout = Self {
            direction,
            tuple_count,
            cell,
            spacing,
            viewport,
            padding_start: Rect::new(padding.main_start(direction), padding.cross_start(direction)),
            virtual_extent,
            max_scroll,
            cell_ratio,
            align_offset,
            visible_rows,
            slot_count,
            item_count,
        };
        vdebug!(
            tuple_count,
            slot_count,
            virtual_extent,
            max_scroll,
            "Layout::solve"
        );
        layout
    }

    /// Main-axis distance between consecutive rows.
    pub fn stride(&self) -> f32 {
        self.cell.main + self.spacing.main
    }

    /// Effective cell size in `x/y`.
    pub fn cell_size(&self) -> Vec2 {
        self.direction.join(self.cell)
    }

    /// Offset that centers the row holding `index` in the viewport, clamped to the
    /// scrollable range.
    pub fn offset_for_index(&self, index: usize) -> f32 {
        let row = index / self.tuple_count.max(1);
        let target = row as f32 * self.stride() + self.padding_start.main
            - (self.viewport.main - self.cell.main) / 2.0;
        target.clamp(0.0, self.max_scroll)
    }

    pub fn clamp_offset(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_scroll)
    }

    /// `offset / max_scroll`; `0` or `1` when nothing can scroll.
    pub fn normalized(&self, offset: f32) -> f32 {
        if self.max_scroll <= 0.0 {
            return if offset < 0.0 { 0.0 } else { 1.0 };
        }
        offset / self.max_scroll
    }
}

/// Number of whole cells (with gaps) that fit in `available`.
fn fitting_cells(available: f32, cell: f32, spacing: f32) -> usize {
    if cell <= 0.0 {
        return 1;
    }
    let n = (available / cell).ceil();
    let extra = n * cell + (n - 1.0) * spacing - available;
    let n = if extra > 0.0 {
        n - (extra / (cell + spacing)).ceil()
    } else {
        n
    };
    n.max(0.0) as usize
}

/// Number of cells needed to cover `available`, partially visible ones included.
fn visible_cells(available: f32, cell: f32, spacing: f32) -> usize {
    if cell <= 0.0 || available <= 0.0 {
        return 0;
    }
    let n = (available / cell).ceil();
    let extra = n * cell + (n - 1.0) * spacing - available;
    let n = if extra > 0.0 {
        n - (extra / (cell + spacing)).floor()
    } else {
        n
    };
    n.max(0.0) as usize
}
