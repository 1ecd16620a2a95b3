//! End-to-end scenarios across the library surface: decoration, asset
//! ingestion, and shape conversion working against a real temp directory.

use scrawl::assets::{self, AssetOrigin, AssetWorker};
use scrawl::draw::{convert, DrawingModel, InkStyle, Point, ShapeKind};
use scrawl::store::fs::FileStore;
use scrawl::store::NoteStore;
use scrawl::text::{Decorator, StyledBuffer, Theme};

fn engine_in(dir: &std::path::Path) -> Decorator {
    Decorator::new(Theme::default(), dir)
}

#[test]
fn scenario_a_header_bold_italic() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_in(dir.path());
    let text = "# Title\n\nSome **bold** and *italic* text.";
    let mut buf = StyledBuffer::new(text, engine.theme().base_attrs());
    engine.decorate_all(&mut buf);

    let theme = engine.theme();

    // Header line: hashes hidden, text at level-1 size.
    assert!(buf.attrs_at(0).is_hidden());
    assert_eq!(buf.attrs_at(2).size, theme.header_size(1));

    // "bold" carries bold, surrounded by hidden markers.
    let bold = text.find("bold").unwrap();
    assert!(buf.attrs_at(bold).bold);
    assert!(buf.attrs_at(bold - 2).is_hidden());
    assert!(buf.attrs_at(bold + 4).is_hidden());

    // "italic" carries italic, surrounded by hidden markers.
    let italic = text.find("italic").unwrap();
    assert!(buf.attrs_at(italic).italic);
    assert!(buf.attrs_at(italic - 1).is_hidden());
    assert!(buf.attrs_at(italic + 6).is_hidden());

    // Plain text elsewhere is unstyled, and nothing mutated the source.
    assert_eq!(*buf.attrs_at(text.find("Some").unwrap()), theme.base_attrs());
    assert_eq!(buf.text(), text);
}

#[test]
fn scenario_b_paste_placeholder_then_swap() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    let mut buf = StyledBuffer::new(
        "0123456789",
        Theme::default().base_attrs(),
    );
    let (pending, range) = assets::insert_blob(&mut buf, 10, vec![0u8; 16], AssetOrigin::Paste);
    assert_eq!(range.start, 10);
    assert!(buf.text()[10..].starts_with("![Uploading Image...](img_"));
    assert!(buf.text().ends_with("\n"));

    // The worker persists through the store and reports back.
    let root = dir.path().to_path_buf();
    let worker = AssetWorker::spawn(move |asset: &scrawl::assets::PendingAsset| {
        FileStore::new(&root).save_image(&asset.token, &asset.bytes)
    });
    let token = pending.token.clone();
    worker.submit(pending);

    let completion = worker.wait().unwrap();
    assets::apply_completion(&mut buf, &completion).unwrap();
    assert_eq!(
        buf.text(),
        format!("0123456789![Image]({}.png)\n", token)
    );
    assert!(store.image_path(&format!("{}.png", token)).unwrap().exists());
}

#[test]
fn scenario_c_checklist_styling() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_in(dir.path());
    let theme = engine.theme();

    let mut done = StyledBuffer::new("- [x] Done task", theme.base_attrs());
    engine.decorate_all(&mut done);
    assert_eq!(done.attrs_at(0).fg, theme.muted); // prefix dimmed
    assert!(done.attrs_at(7).strikethrough);
    assert_eq!(done.attrs_at(7).fg, theme.muted);

    let mut todo = StyledBuffer::new("- [ ] Todo", theme.base_attrs());
    engine.decorate_all(&mut todo);
    assert_eq!(todo.attrs_at(0).fg, theme.muted); // prefix dimmed only
    let text_attrs = todo.attrs_at(6);
    assert!(!text_attrs.strikethrough);
    assert_eq!(text_attrs.fg, theme.foreground);
}

#[test]
fn decorating_twice_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_in(dir.path());
    let text = "## Plan\n\n- [ ] write **tests**\n- [x] ~~ship~~\n\n> `code` and [a](b)\n";
    let mut buf = StyledBuffer::new(text, engine.theme().base_attrs());

    engine.decorate_all(&mut buf);
    let spans = buf.spans().to_vec();
    engine.decorate_all(&mut buf);

    assert_eq!(buf.spans(), spans.as_slice());
    assert_eq!(buf.text(), text);
}

#[test]
fn image_substitution_is_the_only_mutation() {
    let dir = tempfile::tempdir().unwrap();
    image::RgbaImage::new(64, 64)
        .save(dir.path().join("existing.png"))
        .unwrap();

    let engine = engine_in(dir.path());
    let text = "before\n![alt](existing.png)\nafter ![gone](missing.png)";
    let mut buf = StyledBuffer::new(text, engine.theme().base_attrs());
    engine.decorate_all(&mut buf);

    // The resolvable tag collapsed; the missing one stayed verbatim.
    assert_eq!(buf.text(), "before\n\u{FFFC}\nafter ![gone](missing.png)");
    assert!(buf.attrs_at(7).attachment.is_some());
}

#[test]
fn two_rapid_pastes_resolve_regardless_of_order() {
    let mut buf = StyledBuffer::new("", Theme::default().base_attrs());
    let (first, _) = assets::insert_blob(&mut buf, 0, vec![1], AssetOrigin::Paste);
    let buf_len = buf.len();
    let (second, _) = assets::insert_blob(&mut buf, buf_len, vec![2], AssetOrigin::Paste);
    assert_ne!(first.token, second.token);

    let make = |token: &str, reference: &str| scrawl::assets::UploadCompletion {
        token: token.to_string(),
        outcome: scrawl::assets::UploadOutcome::Saved(reference.to_string()),
    };

    // Second completes first; both placeholders resolve to their own file.
    assets::apply_completion(&mut buf, &make(&second.token, "b.png")).unwrap();
    assets::apply_completion(&mut buf, &make(&first.token, "a.png")).unwrap();
    assert_eq!(buf.text(), "![Image](a.png)\n![Image](b.png)\n");
}

#[test]
fn zero_area_shape_is_tolerated() {
    let p = Point::new(12.0, 12.0);
    let stroke = convert(ShapeKind::Star, p, p, &InkStyle::default());
    assert!(stroke.points.len() <= 1);
}

#[test]
fn drawing_survives_sidecar_round_trip_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    let note = scrawl::model::Note::new("Canvas".into(), "".into());
    store.save_note(&note).unwrap();

    let mut model = DrawingModel::new();
    model.push_stroke(convert(
        ShapeKind::Triangle,
        Point::new(0.0, 0.0),
        Point::new(40.0, 40.0),
        &InkStyle::default(),
    ));
    store.save_drawing(&note.metadata.id, &model).unwrap();

    assert!(dir.path().join("Canvas.drawing").exists());
    let loaded = store.load_drawing(&note.metadata.id).unwrap().unwrap();
    assert_eq!(loaded, model);
}
