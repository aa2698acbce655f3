//! View composition.
//!
//! A [`ViewComposer`] turns one result set plus its messages into a
//! self-contained [`ViewFragment`]: markup, a stylesheet scoped to the view's
//! root id, and the bindings that wire its controls. Each call draws a fresh
//! number from the composer's [`ViewSequence`]. Fragments that land on one
//! page must draw from one sequence: either render them all through one
//! composer or build the composers with [`ViewComposer::with_sequence`].

use super::bindings::{Binding, Rendered, wiring_script};
use super::display_options::{DisplayMode, RenderOptions};
use super::json_tree::render_json;
use super::markup::Element;
use super::messages::render_messages;
use super::scope::{ViewScope, ViewSequence};
use super::style::scoped_css;
use super::table::render_table;
use crate::core::messages::Message;
use crate::core::result_model::ResultSet;

/// Status line of a result without columns.
pub fn status_summary(result: &ResultSet) -> String {
    format!(
        "Query executed successfully. {} row(s) affected. ({}ms)",
        result.row_count, result.execution_time_ms
    )
}

/// `N row(s) · Xms`
pub fn meta_summary(result: &ResultSet) -> String {
    format!(
        "{} row(s) \u{00B7} {}ms",
        result.row_count, result.execution_time_ms
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewFragment {
    pub root_id: String,
    pub element: Element,
    pub style: String,
    pub bindings: Vec<Binding>,
}

impl ViewFragment {
    pub fn script(&self) -> String {
        wiring_script(&self.root_id, &self.bindings)
    }

    /// Embeddable markup: the view followed by its style and wiring script.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        Element::new("style")
            .raw(self.style.as_str())
            .write_html(&mut out);
        self.element.write_html(&mut out);
        Element::new("script")
            .raw(self.script())
            .write_html(&mut out);
        out
    }
}

#[derive(Debug, Default)]
pub struct ViewComposer {
    options: RenderOptions,
    sequence: ViewSequence,
}

impl ViewComposer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            sequence: ViewSequence::default(),
        }
    }

    /// Composer drawing view numbers from a sequence shared with others.
    pub fn with_sequence(options: RenderOptions, sequence: ViewSequence) -> Self {
        Self { options, sequence }
    }

    pub fn sequence(&self) -> &ViewSequence {
        &self.sequence
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn next_scope(&self) -> ViewScope {
        ViewScope::new(self.sequence.next())
    }

    pub fn compose_view(
        &self,
        result: &ResultSet,
        connection_label: &str,
        database_label: &str,
        messages: &[Message],
    ) -> ViewFragment {
        let mut scope = self.next_scope();
        let root_id = scope.root_id().to_string();
        let mut bindings = Vec::new();

        let mut root = Element::new("div").id(&root_id).class("sqlnb-view");

        let labels: Vec<&str> = [connection_label, database_label]
            .into_iter()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .collect();
        if !labels.is_empty() {
            root.push(
                Element::new("div")
                    .class("sqlnb-context")
                    .text(labels.join(" / ")),
            );
        }

        if result.is_tabular() {
            let (toolbar, panels, view_bindings) = self.tabular_parts(result, &mut scope);
            root.push(toolbar);
            for panel in panels {
                root.push(panel);
            }
            bindings.extend(view_bindings);
        } else {
            root.push(
                Element::new("div")
                    .class("sqlnb-status")
                    .text(status_summary(result)),
            );
        }

        if let Some(Rendered {
            element,
            bindings: message_bindings,
        }) = render_messages(messages, &mut scope)
        {
            root.push(element);
            bindings.extend(message_bindings);
        }

        log::debug!(
            "composed view {} ({} column(s), {} message(s))",
            root_id,
            result.columns.len(),
            messages.len()
        );

        ViewFragment {
            style: scoped_css(&root_id, &self.options),
            root_id,
            element: root,
            bindings,
        }
    }

    fn tabular_parts(
        &self,
        result: &ResultSet,
        scope: &mut ViewScope,
    ) -> (Element, Vec<Element>, Vec<Binding>) {
        let modes = [DisplayMode::Table, DisplayMode::Json];
        let default_mode = self.options.default_mode;

        let button_ids: Vec<String> = modes.iter().map(|_| scope.next_id("mode")).collect();
        let panel_ids: Vec<String> = modes.iter().map(|_| scope.next_id("panel")).collect();
        let copy_id = scope.next_id("copy");

        let mut toolbar = Element::new("div").class("sqlnb-toolbar");
        for (mode, id) in modes.iter().zip(&button_ids) {
            let active = *mode == default_mode;
            toolbar.push(
                Element::new("button")
                    .id(id)
                    .class(if active { "sqlnb-mode active" } else { "sqlnb-mode" })
                    .attr("type", "button")
                    .attr("aria-pressed", active.to_string())
                    .text(mode.label()),
            );
        }
        toolbar.push(
            Element::new("button")
                .id(&copy_id)
                .class("sqlnb-copy")
                .attr("type", "button")
                .text("Copy as CSV"),
        );
        toolbar.push(
            Element::new("span")
                .class("sqlnb-meta")
                .text(meta_summary(result)),
        );

        let table = render_table(result, scope, &self.options);
        let json = render_json(&result.rows_json(), scope);

        let mut bindings = vec![
            Binding::ModeToggle {
                buttons: button_ids,
                panels: panel_ids.clone(),
            },
            Binding::CopyCsv {
                button: copy_id,
                table: panel_ids[0].clone(),
            },
        ];

        let mut panels = Vec::with_capacity(modes.len());
        for ((mode, id), rendered) in modes.iter().zip(&panel_ids).zip([table, json]) {
            panels.push(
                Element::new("div")
                    .id(id)
                    .class("sqlnb-panel")
                    .attr("data-mode", mode.label())
                    .hidden(*mode != default_mode)
                    .child(rendered.element),
            );
            bindings.extend(rendered.bindings);
        }

        (toolbar, panels, bindings)
    }
}
