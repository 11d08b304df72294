#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Command spans enabled:
//!   cargo test -p nestlist-editor --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p nestlist-editor --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[cfg(feature = "tracing")]
use nestlist_core::event::Modifiers;
use nestlist_editor::{EditorCommand, EditorHost, ListEditor, Selection};
use nestlist_tree::{DropPosition, Group, Item, Node, NodeId};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span with its metadata and parent info.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

/// A tracing Layer that captures span metadata.
struct SpanCapture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

/// Handle to read captured spans afterwards.
struct CaptureHandle {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    fn named(&self, name: &str) -> Vec<CapturedSpan> {
        self.spans()
            .into_iter()
            .filter(|span| span.name == name)
            .collect()
    }
}

/// Visitor that extracts span fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);

        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }
}

/// Set up a tracing subscriber with span capture and run a closure.
fn with_captured_spans<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let spans = Arc::new(Mutex::new(Vec::new()));
    let layer = SpanCapture {
        spans: spans.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { spans }
}

struct NullHost;

impl EditorHost<&'static str> for NullHost {
    fn on_items_changed(&mut self, _items: &[Node<&'static str>]) {}
    fn on_selection_changed(&mut self, _selection: &Selection) {}
    fn on_copy(&mut self, _nodes: Vec<Node<&'static str>>) {}
    fn item_label(&self, item: &Item<&'static str>) -> String {
        item.payload.to_string()
    }
}

fn editor() -> ListEditor<&'static str, NullHost> {
    let items = vec![
        Item::new("a").with_id(NodeId::from_u128(1)).into(),
        Group::new("g")
            .with_id(NodeId::from_u128(2))
            .child(Item::new("b").with_id(NodeId::from_u128(3)))
            .into(),
    ];
    ListEditor::new(NullHost).with_items(items)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn command_span_names_the_command() {
    let handle = with_captured_spans(|| {
        let mut editor = editor();
        editor.click(NodeId::from_u128(1), Modifiers::NONE);
        editor.execute(EditorCommand::GroupSelected);
        editor.execute(EditorCommand::SelectAll);
    });

    let commands = handle.named("nestlist.command");
    assert_eq!(commands.len(), 2, "one span per executed command");
    assert_eq!(
        commands[0].fields.get("command").map(String::as_str),
        Some("group_selected")
    );
    assert_eq!(
        commands[1].fields.get("command").map(String::as_str),
        Some("select_all")
    );
}

#[test]
#[cfg(feature = "tracing")]
fn move_span_nests_under_drop() {
    let handle = with_captured_spans(|| {
        let mut editor = editor();
        editor.drag_start(NodeId::from_u128(1));
        editor.drag_over_position(NodeId::from_u128(2), DropPosition::Into);
        editor.drop();
    });

    let moves = handle.named("nestlist.move");
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].parent_name.as_deref(), Some("nestlist.drop"));
    assert_eq!(moves[0].fields.get("sources").map(String::as_str), Some("1"));
}

#[test]
fn zero_overhead_without_feature() {
    let handle = with_captured_spans(|| {
        let mut editor = editor();
        editor.execute(EditorCommand::SelectAll);
        editor.drag_start(NodeId::from_u128(1));
        editor.drag_over_position(NodeId::from_u128(2), DropPosition::Into);
        editor.drop();
    });

    #[cfg(not(feature = "tracing"))]
    assert!(handle.spans().is_empty(), "no spans without the tracing feature");
    #[cfg(feature = "tracing")]
    assert!(!handle.spans().is_empty());
}
