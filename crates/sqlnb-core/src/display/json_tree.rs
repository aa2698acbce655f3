//! Hierarchical JSON renderer.
//!
//! [`JsonNode::build`] turns a value into an immutable tree in which every
//! composite node owns a [`NodeId`] from the view's scope. [`render_json`]
//! then lays the tree out as indented lines; which composites start
//! collapsed is decided by a separate [`ToggleState`] keyed by node id.
//!
//! Layout of a non-empty composite:
//!
//! ```text
//! <div sqlnb-jnode>
//!   <div sqlnb-jline>  toggle  "key": [  <placeholder hidden>…]</placeholder>
//!   <div id=ID-b sqlnb-jbody>  child lines  </div>
//!   <div id=ID-c sqlnb-jline>  ]
//! </div>
//! ```

use super::bindings::{Binding, Rendered};
use super::markup::Element;
use super::scope::{NodeId, ViewScope};
use serde_json::{Number, Value};
use std::collections::HashSet;

const EXPANDED_GLYPH: &str = "▾";
const COLLAPSED_GLYPH: &str = "▸";
const ELLIPSIS: &str = "…";

#[derive(Debug, Clone, PartialEq)]
pub enum JsonNode {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array {
        id: NodeId,
        items: Vec<JsonNode>,
    },
    Object {
        id: NodeId,
        entries: Vec<(String, JsonNode)>,
    },
}

impl JsonNode {
    /// Build the tree, assigning ids to composites in pre-order.
    pub fn build(value: &Value, scope: &mut ViewScope) -> Self {
        match value {
            Value::Null => JsonNode::Null,
            Value::Bool(b) => JsonNode::Bool(*b),
            Value::Number(n) => JsonNode::Number(n.clone()),
            Value::String(s) => JsonNode::String(s.clone()),
            Value::Array(values) => {
                let id = scope.next_node_id();
                let items = values.iter().map(|v| JsonNode::build(v, scope)).collect();
                JsonNode::Array { id, items }
            }
            Value::Object(map) => {
                let id = scope.next_node_id();
                let entries = map
                    .iter()
                    .map(|(k, v)| (k.clone(), JsonNode::build(v, scope)))
                    .collect();
                JsonNode::Object { id, entries }
            }
        }
    }

    pub fn id(&self) -> Option<&NodeId> {
        match self {
            JsonNode::Array { id, .. } | JsonNode::Object { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Ids of composites that get an expand/collapse control, in pre-order.
    pub fn collapsible_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.collect_collapsible(&mut ids);
        ids
    }

    fn collect_collapsible(&self, ids: &mut Vec<NodeId>) {
        match self {
            JsonNode::Array { id, items } => {
                if !items.is_empty() {
                    ids.push(id.clone());
                }
                items.iter().for_each(|item| item.collect_collapsible(ids));
            }
            JsonNode::Object { id, entries } => {
                if !entries.is_empty() {
                    ids.push(id.clone());
                }
                entries
                    .iter()
                    .for_each(|(_, node)| node.collect_collapsible(ids));
            }
            _ => {}
        }
    }
}

/// Collapsed composites of one rendered tree. Everything else is expanded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToggleState {
    collapsed: HashSet<NodeId>,
}

impl ToggleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self, id: &NodeId) -> bool {
        self.collapsed.contains(id)
    }

    pub fn collapse(&mut self, id: &NodeId) {
        self.collapsed.insert(id.clone());
    }

    pub fn expand(&mut self, id: &NodeId) {
        self.collapsed.remove(id);
    }

    pub fn toggle(&mut self, id: &NodeId) {
        if !self.collapsed.remove(id) {
            self.collapsed.insert(id.clone());
        }
    }
}

fn punct(text: &str) -> Element {
    Element::new("span").class("sqlnb-jpunct").text(text)
}

fn scalar(node: &JsonNode) -> Element {
    match node {
        JsonNode::Null => Element::new("span").class("sqlnb-jnull").text("null"),
        JsonNode::Bool(b) => Element::new("span")
            .class("sqlnb-jboolean")
            .text(b.to_string()),
        JsonNode::Number(n) => Element::new("span")
            .class("sqlnb-jnumber")
            .text(n.to_string()),
        JsonNode::String(s) => Element::new("span")
            .class("sqlnb-jstring")
            .text(Value::String(s.clone()).to_string()),
        JsonNode::Array { .. } => punct("[]"),
        JsonNode::Object { .. } => punct("{}"),
    }
}

fn line(lead: Element, key: Option<&str>) -> Element {
    let line = Element::new("div").class("sqlnb-jline").child(lead);
    match key {
        Some(key) => line
            .child(
                Element::new("span")
                    .class("sqlnb-jkey")
                    .text(Value::String(key.to_string()).to_string()),
            )
            .child(punct(": ")),
        None => line,
    }
}

fn spacer() -> Element {
    Element::new("span").class("sqlnb-jspacer")
}

fn render_node(
    node: &JsonNode,
    key: Option<&str>,
    trailing_comma: bool,
    state: &ToggleState,
) -> Element {
    let comma = if trailing_comma { "," } else { "" };

    let (id, open, close) = match node {
        JsonNode::Array { id, items } if !items.is_empty() => (id, "[", "]"),
        JsonNode::Object { id, entries } if !entries.is_empty() => (id, "{", "}"),
        _ => {
            let mut scalar_line = line(spacer(), key).child(scalar(node));
            if trailing_comma {
                scalar_line.push(punct(comma));
            }
            return scalar_line;
        }
    };

    let collapsed = state.is_collapsed(id);

    let toggle = Element::new("button")
        .id(&id.toggle_id())
        .class("sqlnb-jtoggle")
        .attr("type", "button")
        .attr("aria-expanded", (!collapsed).to_string())
        .attr("aria-controls", id.body_id())
        .text(if collapsed { COLLAPSED_GLYPH } else { EXPANDED_GLYPH });

    let heading = line(toggle, key).child(punct(open)).child(
        Element::new("span")
            .id(&id.placeholder_id())
            .class("sqlnb-jplaceholder")
            .hidden(!collapsed)
            .text(format!("{}{}{}", ELLIPSIS, close, comma)),
    );

    let children: Vec<Element> = match node {
        JsonNode::Array { items, .. } => {
            let last = items.len() - 1;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| render_node(item, None, i < last, state))
                .collect()
        }
        JsonNode::Object { entries, .. } => {
            let last = entries.len() - 1;
            entries
                .iter()
                .enumerate()
                .map(|(i, (k, v))| render_node(v, Some(k.as_str()), i < last, state))
                .collect()
        }
        _ => Vec::new(),
    };

    let body = Element::new("div")
        .id(&id.body_id())
        .class("sqlnb-jbody")
        .hidden(collapsed)
        .extend(children);

    let mut closing = Element::new("div")
        .id(&id.close_id())
        .class("sqlnb-jline")
        .hidden(collapsed)
        .child(spacer())
        .child(punct(close));
    if trailing_comma {
        closing.push(punct(comma));
    }

    Element::new("div")
        .class("sqlnb-jnode")
        .child(heading)
        .child(body)
        .child(closing)
}

/// Render an already built tree with the given toggle state.
pub fn render_tree(tree: &JsonNode, state: &ToggleState) -> Rendered {
    let element = Element::new("div")
        .class("sqlnb-json")
        .child(render_node(tree, None, false, state));

    let nodes: Vec<String> = tree
        .collapsible_ids()
        .iter()
        .map(|id| id.as_str().to_string())
        .collect();

    if nodes.is_empty() {
        Rendered::new(element)
    } else {
        Rendered::new(element).with_binding(Binding::Collapse { nodes })
    }
}

/// Build and render `value` fully expanded.
pub fn render_json(value: &Value, scope: &mut ViewScope) -> Rendered {
    let tree = JsonNode::build(value, scope);
    render_tree(&tree, &ToggleState::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn build(value: Value) -> JsonNode {
        JsonNode::build(&value, &mut ViewScope::new(1))
    }

    #[test]
    fn test_scalars_render_with_type_classes() {
        let html = render_json(&json!([null, true, 1.5, "x"]), &mut ViewScope::new(1))
            .element
            .to_html();
        assert!(html.contains(r#"<span class="sqlnb-jnull">null</span>"#));
        assert!(html.contains(r#"<span class="sqlnb-jboolean">true</span>"#));
        assert!(html.contains(r#"<span class="sqlnb-jnumber">1.5</span>"#));
        assert!(html.contains(r#"<span class="sqlnb-jstring">"x"</span>"#));
    }

    #[test]
    fn test_null_and_null_string_differ() {
        let null = render_json(&json!(null), &mut ViewScope::new(1)).element.to_html();
        let text = render_json(&json!("null"), &mut ViewScope::new(1)).element.to_html();
        assert_ne!(null, text);
    }

    #[test]
    fn test_empty_composites_have_no_control() {
        let rendered = render_json(&json!({"a": [], "b": {}}), &mut ViewScope::new(1));
        let html = rendered.element.to_html();
        assert!(html.contains(">[]<"));
        assert!(html.contains(">{}<"));
        // only the outer object is collapsible
        assert_eq!(html.matches("sqlnb-jtoggle").count(), 1);
        assert_eq!(
            rendered.bindings,
            vec![Binding::Collapse {
                nodes: vec!["sqlnb-v1-j1".to_string()]
            }]
        );
    }

    #[test]
    fn test_scalar_root_has_no_bindings() {
        let rendered = render_json(&json!(7), &mut ViewScope::new(1));
        assert!(rendered.bindings.is_empty());
    }

    #[test]
    fn test_default_state_is_expanded() {
        let rendered = render_json(&json!([1, [2, 3]]), &mut ViewScope::new(1));
        let placeholders: Vec<&Element> = rendered
            .element
            .descendants()
            .into_iter()
            .filter(|e| e.has_class("sqlnb-jplaceholder"))
            .collect();
        assert_eq!(placeholders.len(), 2);
        assert!(placeholders.iter().all(|p| p.is_hidden()));
        assert!(!rendered.element.to_html().contains("aria-expanded=\"false\""));
    }

    #[test]
    fn test_ids_are_unique_at_any_depth() {
        let tree = build(json!({
            "a": [{"b": [1, {"c": {}}]}, [[]]],
            "d": {"e": {"f": [true]}}
        }));
        let mut all = Vec::new();
        fn walk(node: &JsonNode, out: &mut Vec<NodeId>) {
            if let Some(id) = node.id() {
                out.push(id.clone());
            }
            match node {
                JsonNode::Array { items, .. } => items.iter().for_each(|n| walk(n, out)),
                JsonNode::Object { entries, .. } => entries.iter().for_each(|(_, n)| walk(n, out)),
                _ => {}
            }
        }
        walk(&tree, &mut all);
        let unique: HashSet<&NodeId> = all.iter().collect();
        assert_eq!(all.len(), 11);
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_object_key_order_is_preserved() {
        let html = render_json(&json!({"zeta": 1, "alpha": 2, "mid": 3}), &mut ViewScope::new(1))
            .element
            .to_html();
        let zeta = html.find("zeta").unwrap();
        let alpha = html.find("alpha").unwrap();
        let mid = html.find("mid").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }

    #[test]
    fn test_collapse_hides_subtree_and_shows_placeholder() {
        let tree = build(json!({"outer": [1, 2]}));
        let inner = tree.collapsible_ids()[1].clone();
        let mut state = ToggleState::new();
        state.collapse(&inner);

        let rendered = render_tree(&tree, &state);
        let body = rendered.element.find_by_id(&inner.body_id()).unwrap();
        let close = rendered.element.find_by_id(&inner.close_id()).unwrap();
        let placeholder = rendered.element.find_by_id(&inner.placeholder_id()).unwrap();
        let toggle = rendered.element.find_by_id(&inner.toggle_id()).unwrap();
        assert!(body.is_hidden());
        assert!(close.is_hidden());
        assert!(!placeholder.is_hidden());
        assert_eq!(placeholder.text_content(), "…]");
        assert_eq!(toggle.attr_value("aria-expanded"), Some("false"));

        // the outer object stays expanded
        let outer = &tree.collapsible_ids()[0];
        let outer_body = rendered.element.find_by_id(&outer.body_id()).unwrap();
        assert!(!outer_body.is_hidden());
    }

    #[test]
    fn test_collapse_does_not_affect_siblings() {
        let tree = build(json!([[1], [2]]));
        let ids = tree.collapsible_ids();
        let mut state = ToggleState::new();
        state.collapse(&ids[1]);

        let rendered = render_tree(&tree, &state);
        assert!(rendered.element.find_by_id(&ids[1].body_id()).unwrap().is_hidden());
        assert!(!rendered.element.find_by_id(&ids[2].body_id()).unwrap().is_hidden());
        assert!(!rendered.element.find_by_id(&ids[0].body_id()).unwrap().is_hidden());
    }

    #[test]
    fn test_toggle_round_trip_is_identical() {
        let tree = build(json!({
            "rows": [{"id": 1, "tags": ["a", "b"]}, {"id": 2, "tags": []}],
            "meta": {"count": 2}
        }));
        let expanded = render_tree(&tree, &ToggleState::new()).element.to_html();

        for id in tree.collapsible_ids() {
            let mut state = ToggleState::new();
            state.toggle(&id);
            let collapsed = render_tree(&tree, &state).element.to_html();
            assert_ne!(collapsed, expanded);

            state.toggle(&id);
            let restored = render_tree(&tree, &state).element.to_html();
            assert_eq!(restored, expanded);
        }
    }

    #[test]
    fn test_trailing_commas_between_siblings() {
        let rendered = render_json(&json!([1, 2]), &mut ViewScope::new(1));
        let text = rendered.element.text_content();
        assert_eq!(text, "▾[…]1,2]");
    }
}
