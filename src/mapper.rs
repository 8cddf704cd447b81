use crate::{Layout, Rect, Vec2, WindowMode};

/// Where the window of slots starts for a given scroll offset.
///
/// Slot `k` of the window maps to logical index `start_index + k`; its row inside the
/// window is `k / tuple_count` and its tuple position is `index mod tuple_count`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    /// `(offset - padding) / stride`.
    pub fractional_row: f32,
    /// `floor(fractional_row)`, pinned a window's length outside the content.
    pub base_row: i64,
    /// `(base_row - fractional_row) * cell_ratio`, in `(-cell_ratio, 0]` while any slot can be
    /// in range.
    pub row_offset: f32,
    pub start_index: i64,
    pub slot_count: usize,
    pub tuple_count: usize,
}

impl Window {
    pub fn new(offset: f32, layout: &Layout) -> Self {
        let stride = layout.stride();
        let fractional_row = if stride > 0.0 {
            (offset - layout.padding_start.main) / stride
        } else {
            0.0
        };
        let tuple_count = layout.tuple_count.max(1);
        // Every slot is out of range once the row is `reach` rows outside the content.
        let rows = layout.item_count.div_ceil(tuple_count) as i64;
        let reach = layout.slot_count.div_ceil(tuple_count) as i64 + 1;
        let base_row = (fractional_row.floor() as i64).clamp(-reach, rows + reach);
        Self {
            fractional_row,
            base_row,
            row_offset: (base_row as f32 - fractional_row) * layout.cell_ratio,
            start_index: base_row.saturating_mul(tuple_count as i64),
            slot_count: layout.slot_count,
            tuple_count,
        }
    }

    pub fn index_of_slot(&self, k: usize) -> i64 {
        self.start_index.saturating_add(k as i64)
    }

    /// Row of slot `k`, counted from the first row of the window.
    pub fn row_of_slot(&self, k: usize) -> usize {
        k / self.tuple_count
    }

    /// Normalized main-axis start of slot `k`'s row; `1.0` is the end of the viewport.
    pub fn row_start(&self, k: usize, layout: &Layout) -> f32 {
        self.row_offset + layout.cell_ratio * self.row_of_slot(k) as f32
    }

    /// The pool slot that logical slot `k` binds to.
    pub fn pool_slot(&self, k: usize, mode: WindowMode) -> usize {
        match mode {
            WindowMode::Sliding => k,
            WindowMode::Circular => circular_slot(self.index_of_slot(k), self.slot_count),
        }
    }

    /// Whether slot `k` must stay unbound: its index is outside `[0, item_count)` or, for the
    /// sliding window, its row begins past the materialized area.
    pub fn is_out_of_range(&self, k: usize, layout: &Layout, mode: WindowMode) -> bool {
        let index = self.index_of_slot(k);
        if index < 0 || index >= layout.item_count as i64 {
            return true;
        }
        match mode {
            WindowMode::Sliding => self.row_start(k, layout) > self.cutoff(layout),
            WindowMode::Circular => false,
        }
    }

    fn cutoff(&self, layout: &Layout) -> f32 {
        let cache_rows = layout
            .slot_count
            .saturating_sub((layout.visible_rows + 1) * self.tuple_count)
            .div_ceil(self.tuple_count);
        1.0 + layout.cell_ratio * cache_rows as f32
    }

    /// Content-local position of slot `k`, with `pivot` as fractions of the cell size.
    pub fn position(&self, k: usize, layout: &Layout, pivot: Vec2) -> Vec2 {
        let index = self.index_of_slot(k);
        let tuple = index.rem_euclid(self.tuple_count as i64) as f32;
        let pivot = layout.direction.split(pivot);

        let main = layout.viewport.main * self.row_start(k, layout) + layout.cell.main * pivot.main;
        let cross = layout.padding_start.cross
            + layout.align_offset
            + tuple * (layout.cell.cross + layout.spacing.cross)
            + layout.cell.cross * pivot.cross;

        layout.direction.join(Rect::new(main, cross))
    }
}

/// Maps a logical index onto a fixed ring of `size` slots.
///
/// `-1` lands on `size - 1` and `size` on `0`.
pub fn circular_slot(index: i64, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    let size = size as i64;
    if index < 0 {
        (size - 1 + (index + 1) % size) as usize
    } else {
        (index % size) as usize
    }
}
