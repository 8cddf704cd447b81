// Example: a host frame loop driving drags, flings and animated scrolls on a mixed grid.
use recycler::{
    CellView, Collection, Easing, LayoutConfig, PointerEvent, PointerEventKind, ScrollTarget,
    TemplateId, Templated, Vec2, ViewFactory,
};

const CARD: TemplateId = TemplateId(0);
const PHOTO: TemplateId = TemplateId(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Kind {
    Card,
    Photo,
}

struct Tile {
    kind: Kind,
    title: String,
}

impl Templated for Tile {
    type Tag = Kind;

    fn template_tag(&self) -> Kind {
        self.kind
    }
}

#[derive(Default)]
struct Widget {
    bound: Option<usize>,
    at: Vec2,
}

impl CellView<Tile> for Widget {
    fn on_content_update(&mut self, index: usize, _item: &Tile) {
        self.bound = Some(index);
    }

    fn on_position_update(&mut self, position: Vec2) {
        self.at = position;
    }

    fn pivot(&self) -> Vec2 {
        Vec2::new(0.5, 0.5)
    }
}

#[derive(Default)]
struct Host {
    created: usize,
    disposed: usize,
}

impl ViewFactory<Tile> for Host {
    type View = Widget;

    fn natural_size(&self, _template: TemplateId) -> Vec2 {
        Vec2::new(96.0, 96.0)
    }

    fn create(&mut self, _template: TemplateId) -> Widget {
        self.created += 1;
        Widget::default()
    }

    fn dispose(&mut self, _view: Widget) {
        self.disposed += 1;
    }
}

fn report(frame: u32, c: &Collection<Tile, Host>) {
    let first = c.pool().slots().filter(|s| s.active).filter_map(|s| s.index).min();
    println!(
        "frame={frame:>3} phase={:?} offset={:>8.1} velocity={:>8.1} first={first:?} active={}",
        c.phase(),
        c.offset(),
        c.velocity(),
        c.pool().active_count()
    );
}

fn main() {
    let config = LayoutConfig::default()
        .with_auto_tuples(true)
        .with_expand(true)
        .with_spacing(Vec2::new(8.0, 8.0))
        .with_cache_margin(4);
    let mut c = Collection::new(
        Host::default(),
        [(Kind::Card, CARD), (Kind::Photo, PHOTO)],
        CARD,
        config,
    );
    c.add_many((0..5_000).map(|i| Tile {
        kind: if i % 5 == 0 { Kind::Photo } else { Kind::Card },
        title: format!("tile {i}"),
    }));
    c.set_viewport_size(Vec2::new(420.0, 640.0));
    c.set_on_scroll(Some(|v: f32| {
        if v >= 1.0 {
            println!("reached the end");
        }
    }));
    if let Err(err) = c.initialize() {
        eprintln!("cannot initialize: {err}");
        return;
    }
    println!("tuples={} cell={:?}", c.layout().tuple_count, c.layout().cell_size());

    let dt = 1.0 / 60.0;
    let mut frame = 0u32;

    // Fling upward.
    let mut pointer = Vec2::new(200.0, 600.0);
    c.handle_pointer(PointerEvent::new(PointerEventKind::Press, pointer));
    c.handle_pointer(PointerEvent::new(PointerEventKind::Begin, pointer));
    for _ in 0..8 {
        pointer = pointer - Vec2::new(0.0, 40.0);
        c.handle_pointer(PointerEvent::new(PointerEventKind::Move, pointer));
        c.tick(dt);
        frame += 1;
    }
    c.handle_pointer(PointerEvent::new(PointerEventKind::End, pointer));
    for _ in 0..60 {
        c.tick(dt);
        frame += 1;
        if frame % 10 == 0 {
            report(frame, &c);
        }
    }

    // Catch the fling, then animate to an item.
    c.handle_pointer(PointerEvent::new(PointerEventKind::Press, pointer));
    report(frame, &c);
    let target = c.item_id(2_500).map_or(ScrollTarget::Index(2_500), ScrollTarget::Item);
    c.scroll_to_with(
        target,
        0.4,
        Easing::EaseInOutCubic,
        Some(Box::new(|t: f32| {
            if t >= 1.0 {
                println!("scroll finished");
            }
        })),
    );
    while c.is_auto_scrolling() {
        c.tick(dt);
        frame += 1;
    }
    report(frame, &c);

    // Overscroll past the end and let it spring back.
    c.scroll_to_offset(c.layout().max_scroll + 300.0, 0.2);
    for _ in 0..90 {
        c.tick(dt);
        frame += 1;
        if frame % 15 == 0 {
            report(frame, &c);
        }
    }

    if let Some(tile) = c.get(2_500) {
        println!("centered: {}", tile.title);
    }
    if let Some(w) = c.pool().view(0) {
        println!("slot 0: index={:?} center={:?}", w.bound, w.at);
    }
    println!(
        "views created={} disposed={} free={}",
        c.factory().created,
        c.factory().disposed,
        c.pool().free_len()
    );
}
