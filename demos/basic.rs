use recycler::{CellView, Collection, LayoutConfig, TemplateId, Templated, Vec2, ViewFactory};

struct Label(String);

impl Templated for Label {
    type Tag = ();

    fn template_tag(&self) {}
}

struct PrintView {
    id: usize,
}

impl CellView<Label> for PrintView {
    fn on_content_update(&mut self, index: usize, item: &Label) {
        println!("  view#{} <- [{index}] {}", self.id, item.0);
    }

    fn on_position_update(&mut self, _position: Vec2) {}
}

#[derive(Default)]
struct Factory {
    created: usize,
}

impl ViewFactory<Label> for Factory {
    type View = PrintView;

    fn natural_size(&self, _template: TemplateId) -> Vec2 {
        Vec2::new(320.0, 48.0)
    }

    fn create(&mut self, _template: TemplateId) -> PrintView {
        self.created += 1;
        PrintView {
            id: self.created - 1,
        }
    }
}

fn main() {
    let mut c = Collection::new(
        Factory::default(),
        [((), TemplateId(0))],
        TemplateId(0),
        LayoutConfig::default().with_cache_margin(2),
    );
    c.add_many((0..100_000).map(|i| Label(format!("row {i}"))));
    c.set_viewport_size(Vec2::new(320.0, 480.0));

    println!("initialize:");
    if let Err(err) = c.initialize() {
        eprintln!("cannot initialize: {err}");
        return;
    }
    println!(
        "extent={} max_scroll={} slots={}",
        c.layout().virtual_extent,
        c.layout().max_scroll,
        c.layout().slot_count
    );

    println!("snap_to(50_000):");
    c.snap_to(50_000);
    println!("offset={} normalized={:.3}", c.offset(), c.normalized_position());

    println!("snap_to(99_999):");
    c.snap_to(99_999);
    println!("offset={} views created={}", c.offset(), c.factory().created);
}
