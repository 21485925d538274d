use pretty_assertions::assert_eq;
use twinspect_editor::{
    inspector, outline, AppContext, EditorError, EditorOptions, Modifiers, NodeId, PreviewRenderer, Rect,
    ShorthandKey, SourceFile, SyncError, ViewId,
};
use twinspect_parser::{CodeGenerator, GenerateError, Module};

const CARD: &str = r#"import React from "react";

export default function Card() {
  return (
    <div className="pt-[8px]">
      <h1 className="mt-[4px]">Title</h1>
      <p>Body</p>
      <footer>{year}</footer>
    </div>
  );
}
"#;

fn open() -> SourceFile {
    SourceFile::from_source("/src/Card.tsx", CARD, EditorOptions::default()).unwrap()
}

fn elements(file: &SourceFile) -> (NodeId, NodeId, NodeId, NodeId) {
    let tree = file.tree();
    let div = tree.children(tree.components()[0])[0];
    let kids: Vec<NodeId> = tree
        .children(div)
        .iter()
        .copied()
        .filter(|id| tree.node(*id).tag().is_some())
        .collect();
    (div, kids[0], kids[1], kids[2])
}

fn view_of(app: &AppContext, node: NodeId) -> ViewId {
    app.mapping().dom_for_node(node).unwrap().view
}

#[test]
fn test_pointer_down_selects_exclusively() {
    let file = open();
    let (_, h1, p, _) = elements(&file);
    let mut app = AppContext::new(file, Box::new(PreviewRenderer::new(600.0)));
    app.render().unwrap();

    app.pointer_down(view_of(&app, h1), Modifiers::NONE).unwrap();
    app.pointer_down(view_of(&app, p), Modifiers::NONE).unwrap();
    assert_eq!(app.file().selected_nodes(), vec![p]);

    app.pointer_down(view_of(&app, h1), Modifiers::shift()).unwrap();
    assert_eq!(app.file().selected_nodes(), vec![h1, p]);

    app.pointer_down(view_of(&app, p), Modifiers::shift()).unwrap();
    assert_eq!(app.file().selected_nodes(), vec![h1]);
}

#[test]
fn test_hover_and_overlay_geometry() {
    let file = open();
    let (_, h1, p, _) = elements(&file);
    let mut app = AppContext::new(file, Box::new(PreviewRenderer::new(600.0))).with_origin(10.0, 5.0);
    app.render().unwrap();

    app.pointer_move(view_of(&app, h1)).unwrap();
    app.pointer_down(view_of(&app, p), Modifiers::NONE).unwrap();

    let h1_rect = app.mapping().rect_of(h1).unwrap();
    let overlay = app.overlay();
    assert_eq!(overlay.hovered, Some(h1_rect.translate(-10.0, -5.0)));
    assert_eq!(overlay.selected.len(), 1);

    app.pointer_leave().unwrap();
    assert_eq!(app.overlay().hovered, None);
    assert_eq!(app.file().hovered(), None);
}

#[test]
fn test_overlay_is_empty_until_reload_is_rendered() {
    let file = SourceFile::from_source(
        "/src/Box.tsx",
        "export default function Box() {\n  return <div><p>A</p></div>;\n}\n",
        EditorOptions::default(),
    )
    .unwrap();
    let mut app = AppContext::new(file, Box::new(PreviewRenderer::new(400.0)));
    app.render().unwrap();

    app.file_mut()
        .reload("export default function Box() {\n  return <section><p>A</p><p>B</p><p>C</p></section>;\n}\n")
        .unwrap();
    let section = app.file().tree().children(app.file().tree().components()[0])[0];
    app.file_mut().select(section).unwrap();

    assert!(app.is_stale());
    assert_eq!(app.overlay(), twinspect_editor::Overlay::default());

    app.render().unwrap();
    let overlay = app.overlay();
    assert_eq!(overlay.selected, vec![app.mapping().rect_of(section).unwrap()]);
}

#[test]
fn test_click_hits_innermost_node() {
    let file = open();
    let (_, h1, _, _) = elements(&file);
    let mut app = AppContext::new(file, Box::new(PreviewRenderer::new(600.0)));
    app.render().unwrap();

    let rect: Rect = app.mapping().rect_of(h1).unwrap();
    let hit = app.click_at(rect.x + 1.0, rect.y + 1.0, Modifiers::NONE).unwrap();
    assert_eq!(hit, Some(h1));
}

#[test]
fn test_input_ignored_until_rerender() {
    let file = open();
    let (div, h1, p, _) = elements(&file);
    let mut app = AppContext::new(file, Box::new(PreviewRenderer::new(600.0)));
    app.render().unwrap();
    let stale_view = view_of(&app, h1);

    app.file_mut().insert_before(div, p, Some(h1)).unwrap();
    app.file_mut().update_code().unwrap();
    assert!(app.is_stale());
    assert_eq!(app.pointer_down(stale_view, Modifiers::NONE).unwrap(), None);
    assert!(app.file().selected_nodes().is_empty());

    app.render().unwrap();
    assert!(!app.is_stale());
    assert_eq!(app.mapping().node_for_dom(stale_view), None);
    assert!(app.pointer_down(view_of(&app, h1), Modifiers::NONE).unwrap().is_some());
}

#[test]
fn test_drop_moves_selection_in_document_order() {
    let mut file = open();
    let (div, h1, p, footer) = elements(&file);

    file.select(footer).unwrap();
    file.select(p).unwrap();
    assert!(outline::can_drop(&file, div, Some(h1), false));

    let placed = outline::drop(&mut file, div, Some(h1), false).unwrap();
    assert_eq!(placed, vec![p, footer]);

    let order: Vec<&str> = file
        .tree()
        .children(div)
        .iter()
        .filter_map(|id| file.tree().node(*id).tag())
        .collect();
    assert_eq!(order, vec!["p", "footer", "h1"]);
    assert_eq!(file.version(), 1);
    assert!(file.verify_sync().is_ok());
}

#[test]
fn test_drop_skips_descendants_of_selected_nodes() {
    let mut file = open();
    let (div, h1, p, _) = elements(&file);
    let title = file.tree().children(h1)[0];

    file.select(h1).unwrap();
    file.select(title).unwrap();
    outline::drop(&mut file, div, None, false).unwrap();

    assert_eq!(file.tree().parent(title), Some(h1));
    assert_eq!(file.tree().children(div).last().copied(), Some(h1));
    assert!(file.tree().children(div).contains(&p));
}

#[test]
fn test_drop_into_own_child_is_rejected_without_changes() {
    let mut file = open();
    let (div, h1, _, _) = elements(&file);
    let before = file.tree().children(div).to_vec();

    file.select(h1).unwrap();
    assert!(!outline::can_drop(&file, h1, None, false));

    let err = outline::drop(&mut file, h1, None, false).unwrap_err();
    assert!(matches!(err, EditorError::InvalidOperation(_)));
    assert_eq!(file.tree().children(div), before.as_slice());
    assert_eq!(file.version(), 0);
}

#[test]
fn test_drop_with_copy_duplicates() {
    let mut file = open();
    let (div, h1, p, _) = elements(&file);

    file.select(p).unwrap();
    let placed = outline::drop(&mut file, div, Some(h1), true).unwrap();

    assert_ne!(placed[0], p);
    assert_ne!(file.tree().node(placed[0]).key(), file.tree().node(p).key());
    let tags: Vec<&str> = file
        .tree()
        .children(div)
        .iter()
        .filter_map(|id| file.tree().node(*id).tag())
        .collect();
    assert_eq!(tags, vec!["p", "h1", "p", "footer"]);
    assert_eq!(file.code().matches("<p>Body</p>").count(), 2);
}

#[test]
fn test_style_edit_regenerates_source() {
    let mut file = open();
    let (div, h1, _, _) = elements(&file);

    file.select(div).unwrap();
    file.select(h1).unwrap();
    inspector::set(&mut file, ShorthandKey::Padding.into(), twinspect_editor::MaybeMixed::Value("2px")).unwrap();

    assert!(file.code().contains(r#"<div className="pt-[2px] pr-[2px] pb-[2px] pl-[2px]">"#));
    assert!(file.code().contains(r#"<h1 className="mt-[4px] pt-[2px] pr-[2px] pb-[2px] pl-[2px]">"#));
}

#[test]
fn test_style_value_with_spaces_is_replaced_cleanly() {
    let mut file = open();
    let (div, _, _, _) = elements(&file);
    file.select(div).unwrap();

    let width: twinspect_editor::AnyStyleKey = twinspect_editor::StyleKey::Width.into();
    inspector::set(&mut file, width, twinspect_editor::MaybeMixed::Value("calc(100% - 8px)")).unwrap();
    assert_eq!(file.element_style(div).unwrap().get(twinspect_editor::StyleKey::Width), Some("calc(100% - 8px)"));

    inspector::set(&mut file, width, twinspect_editor::MaybeMixed::Value("10px")).unwrap();
    assert_eq!(file.tree().node(div).string_attribute("className"), Some("w-[10px] pt-[8px]"));
}

struct FailingGenerator;

impl CodeGenerator for FailingGenerator {
    fn generate(&mut self, _module: &Module) -> Result<String, GenerateError> {
        Err(GenerateError::Failed("backend unavailable".to_string()))
    }
}

#[test]
fn test_generation_failure_is_sync_error_and_recoverable() {
    let mut file = open().with_generator(Box::new(FailingGenerator));
    let (div, h1, p, _) = elements(&file);

    file.insert_before(div, p, Some(h1)).unwrap();
    let err = file.update_code().unwrap_err();
    assert!(matches!(err, EditorError::Sync(SyncError::Generate(_))));

    file.recover().unwrap();
    assert_eq!(file.code(), CARD);
    let (_, h1_again, p_again, _) = elements(&file);
    assert_eq!(file.tree().node(h1_again).tag(), Some("h1"));
    assert_eq!(file.tree().node(p_again).tag(), Some("p"));
    assert_eq!(file.version(), 0);
}

#[test]
fn test_open_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("twinspect-open-{}.tsx", std::process::id()));
    std::fs::write(&path, CARD).unwrap();

    let file = SourceFile::open(&path, EditorOptions::default()).unwrap();
    assert_eq!(file.tree().components().len(), 1);

    std::fs::remove_file(&path).unwrap();
    assert!(matches!(
        SourceFile::open(&path, EditorOptions::default()),
        Err(EditorError::Io(_))
    ));
}

#[test]
fn test_options_deserialize_with_defaults() {
    let options: EditorOptions = serde_json::from_str(r#"{ "classAttribute": "class" }"#).unwrap();

    assert_eq!(options.class_attribute, "class");
    assert_eq!(options.indent, "  ");
    assert!(options.hide_whitespace_text);
}
