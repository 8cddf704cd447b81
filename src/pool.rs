use std::collections::VecDeque;

use crate::{CellView, ItemId, TemplateId, Vec2, ViewFactory};

/// Cap on detached views kept around for template reuse.
pub const MAX_FREE_VIEWS: usize = 64;

struct Slot<V> {
    index: Option<usize>,
    item: Option<ItemId>,
    template: TemplateId,
    view: V,
    active: bool,
    position: Option<Vec2>,
    size: Option<Vec2>,
}

/// A read-only view of one pooled slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotInfo {
    /// Bound logical index; `None` until first bound.
    pub index: Option<usize>,
    pub item: Option<ItemId>,
    pub template: TemplateId,
    pub active: bool,
    pub position: Option<Vec2>,
}

/// Owns the reusable slots and the free list of detached views.
///
/// Views enter through a [`ViewFactory`] and leave through `ViewFactory::dispose`; the pool
/// never drops a view on its own.
pub struct RecyclingPool<V> {
    slots: Vec<Slot<V>>,
    free: VecDeque<(TemplateId, V)>,
}

impl<V> Default for RecyclingPool<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecyclingPool<V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    pub fn slot(&self, k: usize) -> Option<SlotInfo> {
        self.slots.get(k).map(|s| SlotInfo {
            index: s.index,
            item: s.item,
            template: s.template,
            active: s.active,
            position: s.position,
        })
    }

    pub fn slots(&self) -> impl Iterator<Item = SlotInfo> + '_ {
        (0..self.slots.len()).filter_map(|k| self.slot(k))
    }

    /// The view in slot `k`, whether active or not.
    pub fn view(&self, k: usize) -> Option<&V> {
        self.slots.get(k).map(|s| &s.view)
    }

    /// Destroys slots from the tail until at most `len` remain.
    pub(crate) fn truncate<T, F>(&mut self, len: usize, factory: &mut F)
    where
        F: ViewFactory<T, View = V>,
    {
        if self.slots.len() <= len {
            return;
        }
        vdebug!(from = self.slots.len(), to = len, "RecyclingPool::truncate");
        for slot in self.slots.drain(len..).rev() {
            factory.dispose(slot.view);
        }
    }

    /// Creates inactive slots with `template` until `len` exist.
    pub(crate) fn grow<T, F>(&mut self, len: usize, template: TemplateId, factory: &mut F)
    where
        F: ViewFactory<T, View = V>,
        V: CellView<T>,
    {
        while self.slots.len() < len {
            let view = self.take_view::<T, F>(template, factory);
            self.slots.push(Slot {
                index: None,
                item: None,
                template,
                view,
                active: false,
                position: None,
                size: None,
            });
        }
    }

    /// Makes sure slot `k` holds a view built from `template`, detaching the current view
    /// into the free list when it does not match.
    pub(crate) fn ensure_template<T, F>(&mut self, k: usize, template: TemplateId, factory: &mut F)
    where
        F: ViewFactory<T, View = V>,
        V: CellView<T>,
    {
        let Some(current) = self.slots.get(k).map(|s| s.template) else {
            return;
        };
        if current == template {
            return;
        }

        let view = self.take_view::<T, F>(template, factory);
        let slot = &mut self.slots[k];
        let mut old = core::mem::replace(&mut slot.view, view);
        old.set_active(false);
        let old_template = core::mem::replace(&mut slot.template, template);
        slot.index = None;
        slot.item = None;
        slot.active = false;
        slot.position = None;
        slot.size = None;

        self.free.push_back((old_template, old));
        self.trim_free::<T, F>(factory);
    }

    /// Binds slot `k` to `index`/`item`, firing the content hook only when something changed.
    ///
    /// Returns `true` when the view was updated.
    pub(crate) fn bind<T>(&mut self, k: usize, index: usize, id: ItemId, item: &T) -> bool
    where
        V: CellView<T>,
    {
        let Some(slot) = self.slots.get_mut(k) else {
            return false;
        };
        if slot.index == Some(index) && slot.item == Some(id) && slot.active {
            return false;
        }
        slot.index = Some(index);
        slot.item = Some(id);
        if !slot.active {
            slot.active = true;
            slot.view.set_active(true);
        }
        slot.view.on_content_update(index, item);
        true
    }

    /// Pushes placement to slot `k`'s view when it differs from the last one pushed.
    pub(crate) fn place<T>(&mut self, k: usize, position: Vec2, size: Vec2)
    where
        V: CellView<T>,
    {
        let Some(slot) = self.slots.get_mut(k) else {
            return;
        };
        if slot.size != Some(size) {
            slot.size = Some(size);
            slot.view.on_size_update(size);
        }
        if slot.position != Some(position) {
            slot.position = Some(position);
            slot.view.on_position_update(position);
        }
    }

    pub(crate) fn deactivate<T>(&mut self, k: usize)
    where
        V: CellView<T>,
    {
        if let Some(slot) = self.slots.get_mut(k) {
            if slot.active {
                slot.active = false;
                slot.view.set_active(false);
            }
        }
    }

    pub(crate) fn refresh<T>(&mut self)
    where
        V: CellView<T>,
    {
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            slot.view.on_content_refresh();
            slot.view.on_position_refresh();
        }
    }

    /// Evicts the oldest free views beyond [`MAX_FREE_VIEWS`].
    pub(crate) fn trim_free<T, F>(&mut self, factory: &mut F)
    where
        F: ViewFactory<T, View = V>,
    {
        while self.free.len() > MAX_FREE_VIEWS {
            if let Some((_, view)) = self.free.pop_front() {
                factory.dispose(view);
            }
        }
    }

    /// Disposes every slot and free view.
    pub(crate) fn clear<T, F>(&mut self, factory: &mut F)
    where
        F: ViewFactory<T, View = V>,
    {
        self.truncate::<T, F>(0, factory);
        for (_, view) in self.free.drain(..) {
            factory.dispose(view);
        }
    }

    fn take_view<T, F>(&mut self, template: TemplateId, factory: &mut F) -> V
    where
        F: ViewFactory<T, View = V>,
        V: CellView<T>,
    {
        if let Some(pos) = self.free.iter().position(|(t, _)| *t == template) {
            if let Some((_, view)) = self.free.remove(pos) {
                return view;
            }
        }
        let mut view = factory.create(template);
        view.set_active(false);
        view
    }
}

impl<V> core::fmt::Debug for RecyclingPool<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecyclingPool")
            .field("slots", &self.slots.len())
            .field("active", &self.active_count())
            .field("free", &self.free.len())
            .finish()
    }
}
