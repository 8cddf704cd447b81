use core::fmt;
use core::hash::Hash;

use crate::{TemplateId, Vec2};

/// Items carry a tag that selects the template used to render them.
pub trait Templated {
    type Tag: Hash + Eq + Clone + fmt::Debug;

    fn template_tag(&self) -> Self::Tag;
}

/// The capability every recyclable view provides.
///
/// The engine calls `on_content_update` only when a slot's binding actually changes, and
/// `on_position_update`/`on_size_update` only when its placement changes.
pub trait CellView<T> {
    fn on_content_update(&mut self, index: usize, item: &T);

    /// `position` is content-local and y-down, already corrected by [`CellView::pivot`].
    fn on_position_update(&mut self, position: Vec2);

    /// Called when the effective cell size changes (e.g. with `expand`).
    fn on_size_update(&mut self, _size: Vec2) {}

    /// Shows or hides the view. Detached and unbound views are always inactive.
    fn set_active(&mut self, _active: bool) {}

    /// Forced re-render without a binding change.
    fn on_content_refresh(&mut self) {}

    fn on_position_refresh(&mut self) {}

    /// The point of the cell reported as its position, as fractions of the cell size.
    /// `(0, 0)` is the leading corner, `(0.5, 0.5)` the center.
    fn pivot(&self) -> Vec2 {
        Vec2::ZERO
    }
}

/// Creates and disposes views on behalf of the recycling pool.
pub trait ViewFactory<T> {
    type View: CellView<T>;

    /// The template's natural (unscaled) size.
    fn natural_size(&self, template: TemplateId) -> Vec2;

    fn create(&mut self, template: TemplateId) -> Self::View;

    /// Destroys a view that the pool no longer needs.
    fn dispose(&mut self, view: Self::View) {
        drop(view);
    }
}
