use core::fmt;

/// A callback fired once after every mutation of an [`ItemList`].
///
/// The argument is the list length after the mutation.
pub type OnChangeCallback = Box<dyn FnMut(usize)>;

/// Identity of one inserted item.
///
/// Indices shift as the list changes; an `ItemId` does not. Every insertion (including
/// `replace`) hands out a fresh id, so two slots bound to equal values still tell them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(u64);

impl ItemId {
    pub fn get(self) -> u64 {
        self.0
    }
}

struct Entry<T> {
    id: ItemId,
    value: T,
}

/// The ordered, mutable sequence backing a collection.
///
/// All mutators are total: out-of-range indices clamp instead of panicking, and each call
/// fires the change notification exactly once, after the mutation is complete.
pub struct ItemList<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
    revision: u64,
    on_change: Option<OnChangeCallback>,
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ItemList<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            revision: 0,
            on_change: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of mutations applied so far. Bumped once per mutating call.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_on_change(&mut self, on_change: Option<impl FnMut(usize) + 'static>) {
        self.on_change = on_change.map(|f| Box::new(f) as _);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entries.get_mut(index).map(|e| &mut e.value)
    }

    pub fn id_at(&self, index: usize) -> Option<ItemId> {
        self.entries.get(index).map(|e| e.id)
    }

    pub(crate) fn entry(&self, index: usize) -> Option<(ItemId, &T)> {
        self.entries.get(index).map(|e| (e.id, &e.value))
    }

    pub fn index_of_id(&self, id: ItemId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|e| &e.value)
    }

    pub fn add(&mut self, item: T) -> ItemId {
        let id = self.push_entry(item);
        self.notify();
        id
    }

    /// Appends every item and notifies once. Returns how many were added.
    pub fn add_many(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let before = self.entries.len();
        for item in items {
            self.push_entry(item);
        }
        self.notify();
        self.entries.len() - before
    }

    /// Inserts before `index`. Negative indices insert at the front, indices past the end
    /// append.
    pub fn insert(&mut self, index: isize, item: T) -> ItemId {
        let at = self.clamp_insert_index(index);
        let id = self.make_id();
        self.entries.insert(at, Entry { id, value: item });
        self.notify();
        id
    }

    /// Inserts all `items` as a contiguous run starting at the clamped `index`.
    pub fn insert_many(&mut self, index: isize, items: impl IntoIterator<Item = T>) -> usize {
        let at = self.clamp_insert_index(index);
        let batch: Vec<Entry<T>> = items
            .into_iter()
            .map(|value| Entry {
                id: self.make_id(),
                value,
            })
            .collect();
        let n = batch.len();
        let _ = self.entries.splice(at..at, batch);
        self.notify();
        n
    }

    /// Removes the item at `index`. Out-of-range indices remove nothing.
    pub fn remove_at(&mut self, index: isize) -> Option<T> {
        let removed = usize::try_from(index)
            .ok()
            .filter(|&i| i < self.entries.len())
            .map(|i| self.entries.remove(i).value);
        self.notify();
        removed
    }

    pub fn remove_id(&mut self, id: ItemId) -> Option<T> {
        let removed = self
            .index_of_id(id)
            .map(|i| self.entries.remove(i).value);
        self.notify();
        removed
    }

    /// Replaces the whole content with a single item.
    pub fn replace(&mut self, item: T) -> ItemId {
        self.entries.clear();
        let id = self.push_entry(item);
        self.notify();
        id
    }

    /// Replaces the whole content with `items`.
    pub fn replace_many(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        self.entries.clear();
        for item in items {
            self.push_entry(item);
        }
        self.notify();
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.notify();
    }

    fn clamp_insert_index(&self, index: isize) -> usize {
        usize::try_from(index).map_or(0, |i| i.min(self.entries.len()))
    }

    fn make_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn push_entry(&mut self, value: T) -> ItemId {
        let id = self.make_id();
        self.entries.push(Entry { id, value });
        id
    }

    fn notify(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        let len = self.entries.len();
        if let Some(cb) = &mut self.on_change {
            cb(len);
        }
    }
}

impl<T: PartialEq> ItemList<T> {
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.entries.iter().position(|e| e.value == *item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    /// Removes the first item equal to `item`.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let removed = self.index_of(item).map(|i| self.entries.remove(i).value);
        self.notify();
        removed
    }

    /// Removes the first match of each of `items`. Returns how many were removed.
    pub fn remove_many<'a>(&mut self, items: impl IntoIterator<Item = &'a T>) -> usize
    where
        T: 'a,
    {
        let mut n = 0usize;
        for item in items {
            if let Some(i) = self.index_of(item) {
                let _ = self.entries.remove(i);
                n += 1;
            }
        }
        self.notify();
        n
    }
}

impl<T: fmt::Debug> fmt::Debug for ItemList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemList")
            .field("items", &self.entries.iter().map(|e| &e.value).collect::<Vec<_>>())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
