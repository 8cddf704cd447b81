use crate::auto_scroll::{AutoScroller, Easing, ScrollTarget, Tween};
use crate::mapper::Window;
use crate::physics::{ScrollBounds, ScrollPhase, ScrollPhysics, overscroll};
use crate::{
    CellView, CrossAlign, Direction, ItemId, ItemList, Layout, LayoutConfig, MovementType,
    Padding, PointerButton, PointerEvent, PointerEventKind, RecyclingPool, RegistryError,
    TemplateId, TemplateRegistry, Templated, Vec2, ViewFactory, WindowMode,
};

/// Called with the normalized scroll position whenever it changes.
pub type OnScrollCallback = Box<dyn FnMut(f32)>;

/// Observes the progress of one animated scroll.
pub type OnProgressCallback = Box<dyn FnMut(f32)>;

/// The recycling collection: items, layout, pool and scroll physics wired together.
///
/// A `Collection` holds no UI objects of its own. The host supplies a [`ViewFactory`], sizes
/// the viewport, forwards pointer events through [`Collection::handle_pointer`] and calls
/// [`Collection::tick`] once per frame. Views receive their content and placement through the
/// [`CellView`] hooks, only when something actually changed.
///
/// Nothing is laid out until [`Collection::initialize`] succeeds.
pub struct Collection<T: Templated, F: ViewFactory<T>> {
    config: LayoutConfig,
    factory: F,
    templates: Vec<(T::Tag, TemplateId)>,
    default_template: TemplateId,
    registry: Option<TemplateRegistry<T::Tag>>,

    items: ItemList<T>,
    pool: RecyclingPool<F::View>,
    physics: ScrollPhysics,
    auto: AutoScroller,
    tween: Option<Tween>,

    layout: Layout,
    viewport: Vec2,
    active: bool,
    normalized: Option<f32>,
    on_scroll: Option<OnScrollCallback>,

    batch_depth: usize,
    relayout_pending: bool,
}

impl<T: Templated, F: ViewFactory<T>> Collection<T, F> {
    /// Creates an uninitialized collection.
    ///
    /// `templates` maps item tags to the factory's templates; `default_template` renders
    /// items whose tag is not listed and provides the cell size.
    pub fn new(
        factory: F,
        templates: impl IntoIterator<Item = (T::Tag, TemplateId)>,
        default_template: TemplateId,
        config: LayoutConfig,
    ) -> Self {
        Self {
            config: config.sanitized(),
            factory,
            templates: templates.into_iter().collect(),
            default_template,
            registry: None,
            items: ItemList::new(),
            pool: RecyclingPool::new(),
            physics: ScrollPhysics::new(),
            auto: AutoScroller::new(),
            tween: None,
            layout: Layout::default(),
            viewport: Vec2::ZERO,
            active: true,
            normalized: None,
            on_scroll: None,
            batch_depth: 0,
            relayout_pending: false,
        }
    }

    /// Builds the template registry and runs the first layout.
    ///
    /// Calling it again after success does nothing. On error the collection stays
    /// uninitialized and keeps rendering nothing.
    pub fn initialize(&mut self) -> Result<(), RegistryError> {
        if self.registry.is_some() {
            return Ok(());
        }
        let registry = TemplateRegistry::new(self.templates.iter().cloned(), self.default_template)
            .map_err(|err| {
                vwarn!(error = %err, "Collection::initialize: invalid template registry");
                err
            })?;
        vdebug!(
            templates = registry.template_count(),
            items = self.items.len(),
            "Collection::initialize"
        );
        self.registry = Some(registry);
        self.relayout();
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.registry.is_some()
    }

    /// Re-solves the layout, e.g. after the host resized the content area.
    pub fn rebuild_layout(&mut self) {
        if !self.is_initialized() {
            vwarn!("Collection::rebuild_layout called before initialize");
            return;
        }
        self.relayout();
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport_size(&mut self, size: Vec2) {
        debug_assert!(
            size.x.is_finite() && size.y.is_finite(),
            "viewport size must be finite"
        );
        let size = Vec2::new(finite_or_zero(size.x), finite_or_zero(size.y));
        if size == self.viewport {
            return;
        }
        self.viewport = size;
        self.relayout();
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Commits a new configuration and re-lays out once.
    pub fn set_config(&mut self, config: LayoutConfig) {
        let config = config.sanitized();
        if config == self.config {
            return;
        }
        vtrace!(
            direction = ?config.direction,
            tuple_count = config.tuple_count,
            cache_margin = config.cache_margin,
            "Collection::set_config"
        );
        if config.window != self.config.window {
            self.pool.truncate::<T, F>(0, &mut self.factory);
        }
        self.config = config;
        self.relayout();
    }

    /// Edits a copy of the configuration and commits it.
    pub fn update_config(&mut self, f: impl FnOnce(&mut LayoutConfig)) {
        let mut next = self.config.clone();
        f(&mut next);
        self.set_config(next);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.update_config(|c| c.direction = direction);
    }

    pub fn set_movement(&mut self, movement: MovementType) {
        self.update_config(|c| c.movement = movement);
    }

    pub fn set_elasticity(&mut self, elasticity: f32) {
        self.update_config(|c| c.elasticity = elasticity);
    }

    pub fn set_inertia(&mut self, inertia: bool) {
        self.update_config(|c| c.inertia = inertia);
    }

    pub fn set_deceleration_rate(&mut self, rate: f32) {
        self.update_config(|c| c.deceleration_rate = rate);
    }

    pub fn set_tuple_count(&mut self, tuple_count: usize) {
        self.update_config(|c| c.tuple_count = tuple_count);
    }

    pub fn set_auto_tuples(&mut self, auto_tuples: bool) {
        self.update_config(|c| c.auto_tuples = auto_tuples);
    }

    pub fn set_expand(&mut self, expand: bool) {
        self.update_config(|c| c.expand = expand);
    }

    pub fn set_align(&mut self, align: CrossAlign) {
        self.update_config(|c| c.align = align);
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.update_config(|c| c.padding = padding);
    }

    pub fn set_spacing(&mut self, spacing: Vec2) {
        self.update_config(|c| c.spacing = spacing);
    }

    pub fn set_cache_margin(&mut self, cache_margin: usize) {
        self.update_config(|c| c.cache_margin = cache_margin);
    }

    pub fn set_window_mode(&mut self, window: WindowMode) {
        self.update_config(|c| c.window = window);
    }

    /// Runs `f` and re-lays out at most once, after it returns.
    ///
    /// Nested batches only re-lay out when the outermost one ends.
    pub fn batch(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);

        f(self);

        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);

        if self.batch_depth == 0 && core::mem::take(&mut self.relayout_pending) {
            self.relayout();
        }
    }

    pub fn items(&self) -> &ItemList<T> {
        &self.items
    }

    /// Mutates the items directly; the collection re-lays out once afterwards if anything
    /// changed.
    pub fn edit_items<R>(&mut self, f: impl FnOnce(&mut ItemList<T>) -> R) -> R {
        let revision = self.items.revision();
        let out = f(&mut self.items);
        if self.items.revision() != revision {
            self.relayout();
        }
        out
    }

    pub fn set_on_items_changed(&mut self, on_change: Option<impl FnMut(usize) + 'static>) {
        self.items.set_on_change(on_change);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn item_id(&self, index: usize) -> Option<ItemId> {
        self.items.id_at(index)
    }

    pub fn add(&mut self, item: T) -> ItemId {
        let id = self.items.add(item);
        self.relayout();
        id
    }

    pub fn add_many(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let n = self.items.add_many(items);
        self.relayout();
        n
    }

    pub fn insert(&mut self, index: isize, item: T) -> ItemId {
        let id = self.items.insert(index, item);
        self.relayout();
        id
    }

    pub fn insert_many(&mut self, index: isize, items: impl IntoIterator<Item = T>) -> usize {
        let n = self.items.insert_many(index, items);
        self.relayout();
        n
    }

    pub fn remove_at(&mut self, index: isize) -> Option<T> {
        let removed = self.items.remove_at(index);
        self.relayout();
        removed
    }

    pub fn remove_id(&mut self, id: ItemId) -> Option<T> {
        let removed = self.items.remove_id(id);
        self.relayout();
        removed
    }

    pub fn replace(&mut self, item: T) -> ItemId {
        let id = self.items.replace(item);
        self.relayout();
        id
    }

    pub fn replace_many(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let n = self.items.replace_many(items);
        self.relayout();
        n
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.relayout();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the host view is enabled. Drags only begin on an active collection.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active && self.physics.is_dragging() {
            let bounds = ScrollBounds::from(&self.layout);
            self.physics
                .end_drag(PointerButton::Primary, self.config.movement, &bounds);
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn pool(&self) -> &RecyclingPool<F::View> {
        &self.pool
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn phase(&self) -> ScrollPhase {
        self.physics.phase()
    }

    /// Main-axis scroll offset in pixels.
    pub fn offset(&self) -> f32 {
        self.physics.offset()
    }

    pub fn velocity(&self) -> f32 {
        self.physics.velocity()
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.auto.is_active()
    }

    /// `offset / max_scroll`; `0` or `1` when the content does not scroll.
    pub fn normalized_position(&self) -> f32 {
        self.layout.normalized(self.physics.offset())
    }

    pub fn set_normalized_position(&mut self, value: f32) {
        if !self.is_initialized() {
            vwarn!("Collection::set_normalized_position called before initialize");
            return;
        }
        if !value.is_finite() {
            return;
        }
        let value = match self.config.movement {
            MovementType::Unrestricted => value,
            MovementType::Elastic | MovementType::Clamped => value.clamp(0.0, 1.0),
        };
        self.cancel_auto_scroll();
        self.physics.jump_to(self.layout.max_scroll * value);
        self.update_positions();
    }

    pub fn set_on_scroll(&mut self, on_scroll: Option<impl FnMut(f32) + 'static>) {
        self.on_scroll = on_scroll.map(|f| Box::new(f) as _);
    }

    /// Re-renders every active slot without changing any binding.
    pub fn refresh(&mut self) {
        self.pool.refresh::<T>();
    }

    /// Jumps so that the row holding `index` is centered, clamped to the scrollable range.
    pub fn snap_to(&mut self, index: usize) {
        self.snap_to_target(ScrollTarget::Index(index));
    }

    pub fn snap_to_item(&mut self, id: ItemId) {
        self.snap_to_target(ScrollTarget::Item(id));
    }

    pub fn snap_to_target(&mut self, target: ScrollTarget) {
        if !self.is_initialized() {
            vwarn!("Collection::snap_to called before initialize");
            return;
        }
        let Some(offset) = self.resolve_target(target) else {
            vwarn!(scroll_target = ?target, "Collection::snap_to: unknown target");
            return;
        };
        vtrace!(scroll_target = ?target, offset, "Collection::snap_to");
        self.cancel_auto_scroll();
        self.physics.jump_to(offset);
        self.update_positions();
    }

    /// Animates toward the row holding `index` over `duration` seconds.
    pub fn scroll_to(&mut self, index: usize, duration: f32) -> bool {
        self.scroll_to_with(ScrollTarget::Index(index), duration, Easing::Linear, None)
    }

    pub fn scroll_to_item(&mut self, id: ItemId, duration: f32) -> bool {
        self.scroll_to_with(ScrollTarget::Item(id), duration, Easing::Linear, None)
    }

    /// Animates toward a raw offset. If the animation leaves the scrollable range while
    /// movement is restricted, the physics takes over and springs back.
    pub fn scroll_to_offset(&mut self, offset: f32, duration: f32) -> bool {
        self.scroll_to_with(ScrollTarget::Offset(offset), duration, Easing::Linear, None)
    }

    /// Starts an animated scroll, replacing any in progress.
    ///
    /// `observer` receives every progress value, ending with exactly `1.0` unless the scroll
    /// is released or replaced. Returns `false` if the target could not be resolved.
    pub fn scroll_to_with(
        &mut self,
        target: ScrollTarget,
        duration: f32,
        easing: Easing,
        observer: Option<OnProgressCallback>,
    ) -> bool {
        if !self.is_initialized() {
            vwarn!("Collection::scroll_to called before initialize");
            return false;
        }
        let Some(to) = self.resolve_target(target) else {
            vwarn!(scroll_target = ?target, "Collection::scroll_to: unknown target");
            return false;
        };
        vtrace!(scroll_target = ?target, to, duration, "Collection::scroll_to");

        self.tween = Some(Tween::new(self.physics.offset(), to, easing));
        self.physics.begin_auto_scroll();
        if let Some(progress) = self.auto.scroll(duration, self.active, observer) {
            if self.apply_progress(progress) {
                self.update_positions();
            }
        }
        true
    }

    /// Advances animations and physics by `dt` seconds. Returns `true` if the offset moved.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_initialized() {
            return false;
        }
        let moved = match self.auto.tick(dt) {
            Some(progress) => self.apply_progress(progress),
            None => {
                let bounds = ScrollBounds::from(&self.layout);
                self.physics.tick(dt, &self.config, &bounds)
            }
        };
        if moved {
            self.update_positions();
        }
        moved
    }

    /// Routes one pointer event. Returns `true` if the offset moved.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Press => {
                if event.in_viewport && event.button == PointerButton::Primary {
                    self.physics.press();
                }
                false
            }
            PointerEventKind::Begin => {
                if event.in_viewport {
                    self.begin_drag(event.position, event.button);
                }
                false
            }
            PointerEventKind::Move => self.drag(event.position),
            PointerEventKind::End => {
                self.end_drag(event.button);
                false
            }
        }
    }

    pub fn begin_drag(&mut self, pointer: Vec2, button: PointerButton) -> bool {
        let enabled = self.active && self.is_initialized();
        self.physics.begin_drag(pointer, button, enabled)
    }

    pub fn drag(&mut self, pointer: Vec2) -> bool {
        let bounds = ScrollBounds::from(&self.layout);
        if !self.physics.drag(pointer, &self.config, &bounds) {
            return false;
        }
        self.update_positions();
        true
    }

    pub fn end_drag(&mut self, button: PointerButton) {
        let bounds = ScrollBounds::from(&self.layout);
        self.physics.end_drag(button, self.config.movement, &bounds);
    }

    fn resolve_target(&self, target: ScrollTarget) -> Option<f32> {
        match target {
            ScrollTarget::Index(index) => Some(self.layout.offset_for_index(index)),
            ScrollTarget::Item(id) => self
                .items
                .index_of_id(id)
                .map(|index| self.layout.offset_for_index(index)),
            ScrollTarget::Offset(offset) => offset.is_finite().then_some(offset),
        }
    }

    /// Moves the offset to the tween's sample at `progress`, handing control back to the
    /// physics on completion or when the offset leaves the scrollable range.
    fn apply_progress(&mut self, progress: f32) -> bool {
        let Some(tween) = self.tween else {
            return false;
        };
        let before = self.physics.offset();
        let offset = tween.sample(progress);
        self.physics.set_offset(offset);

        if !self.auto.is_active() {
            self.tween = None;
            self.physics.finish_auto_scroll();
        } else if self.config.movement != MovementType::Unrestricted
            && overscroll(offset, &ScrollBounds::from(&self.layout)) != 0.0
        {
            self.auto.release();
            self.tween = None;
            self.physics.release_auto_scroll();
        }
        offset != before
    }

    fn cancel_auto_scroll(&mut self) {
        self.auto.release();
        self.tween = None;
    }

    fn relayout(&mut self) {
        if self.batch_depth > 0 {
            self.relayout_pending = true;
            return;
        }
        let Some(registry) = self.registry.as_ref() else {
            return;
        };
        let natural = self.factory.natural_size(registry.default_template());
        let layout = Layout::solve(&self.config, self.viewport, natural, self.items.len());
        if layout.slot_count < self.pool.len() {
            self.pool.truncate::<T, F>(layout.slot_count, &mut self.factory);
        }
        self.layout = layout;
        self.update_positions();
    }

    /// Binds and places every slot of the current window.
    fn update_positions(&mut self) {
        let Self {
            config,
            factory,
            registry,
            items,
            pool,
            physics,
            layout,
            normalized: last_normalized,
            on_scroll,
            ..
        } = self;
        let Some(registry) = registry.as_ref() else {
            return;
        };

        let mode = config.window;
        let window = Window::new(physics.offset(), layout);
        let swap_templates = registry.template_count() > 1;
        let cell_size = layout.cell_size();

        if mode == WindowMode::Circular {
            pool.grow::<T, F>(window.slot_count, registry.default_template(), factory);
        }

        for k in 0..window.slot_count {
            let slot = window.pool_slot(k, mode);
            let entry = if window.is_out_of_range(k, layout, mode) {
                None
            } else {
                usize::try_from(window.index_of_slot(k))
                    .ok()
                    .and_then(|index| items.entry(index).map(|(id, item)| (index, id, item)))
            };
            let Some((index, id, item)) = entry else {
                pool.deactivate::<T>(slot);
                continue;
            };

            let template = if swap_templates {
                registry.resolve(&item.template_tag())
            } else {
                registry.default_template()
            };
            if slot >= pool.len() {
                pool.grow::<T, F>(slot + 1, template, factory);
            }
            if swap_templates {
                pool.ensure_template::<T, F>(slot, template, factory);
            }

            pool.bind(slot, index, id, item);
            let pivot = pool.view(slot).map_or(Vec2::ZERO, |v| v.pivot());
            pool.place::<T>(slot, window.position(k, layout, pivot), cell_size);
        }

        let normalized = layout.normalized(physics.offset());
        let previous = last_normalized.replace(normalized);
        if previous.is_some_and(|p| p != normalized) {
            if let Some(on_scroll) = on_scroll.as_mut() {
                on_scroll(normalized);
            }
        }
    }
}

impl<T: Templated + PartialEq, F: ViewFactory<T>> Collection<T, F> {
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.index_of(item)
    }

    /// Removes the first item equal to `item`.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let removed = self.items.remove(item);
        self.relayout();
        removed
    }

    pub fn remove_many<'a>(&mut self, items: impl IntoIterator<Item = &'a T>) -> usize
    where
        T: 'a,
    {
        let n = self.items.remove_many(items);
        self.relayout();
        n
    }
}

impl<T: Templated, F: ViewFactory<T>> Drop for Collection<T, F> {
    fn drop(&mut self) {
        self.pool.clear::<T, F>(&mut self.factory);
    }
}

impl<T: Templated, F: ViewFactory<T>> core::fmt::Debug for Collection<T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collection")
            .field("initialized", &self.is_initialized())
            .field("items", &self.items.len())
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("pool", &self.pool)
            .field("physics", &self.physics)
            .field("auto", &self.auto)
            .finish_non_exhaustive()
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
