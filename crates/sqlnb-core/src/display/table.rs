//! Tabular renderer.
//!
//! A bounded-height scroll region with a sticky header row. Each cell keeps
//! its full text in `data-full`; the visible text is clipped by CSS and the
//! tooltip binding reveals the full value only for cells that are actually
//! clipped.

use super::bindings::{Binding, Rendered};
use super::display_options::RenderOptions;
use super::markup::Element;
use super::scope::ViewScope;
use crate::core::result_model::{Column, ResultSet, Row};
use crate::core::value::CellValue;

pub const NULL_MARKER: &str = "NULL";

fn header_cell(column: &Column) -> Element {
    Element::new("th")
        .attr("title", column.declared_type.as_str())
        .attr("data-name", column.name.as_str())
        .text(column.name.as_str())
}

pub(crate) fn data_cell(value: &CellValue) -> Element {
    match value {
        CellValue::Null => Element::new("td")
            .class("sqlnb-cell sqlnb-null")
            .flag("data-null", true)
            .text(NULL_MARKER),
        CellValue::Number(n) => {
            let text = n.to_string();
            Element::new("td")
                .class("sqlnb-cell sqlnb-num")
                .attr("data-full", text.as_str())
                .text(text)
        }
        CellValue::Bool(b) => Element::new("td")
            .class("sqlnb-cell sqlnb-bool")
            .attr("data-full", b.to_string())
            .text(b.to_string()),
        CellValue::String(s) => Element::new("td")
            .class("sqlnb-cell")
            .attr("data-full", s.as_str())
            .text(s.as_str()),
    }
}

fn body_row(row: &Row) -> Element {
    Element::new("tr").extend(row.values().iter().map(data_cell))
}

fn pager(pages: usize, prev: &str, next: &str, label: &str) -> Element {
    Element::new("div")
        .class("sqlnb-pager")
        .child(
            Element::new("button")
                .id(prev)
                .attr("type", "button")
                .flag("disabled", true)
                .text("Prev"),
        )
        .child(
            Element::new("span")
                .id(label)
                .class("sqlnb-page-label")
                .text(format!("Page 1 of {}", pages)),
        )
        .child(
            Element::new("button")
                .id(next)
                .attr("type", "button")
                .text("Next"),
        )
}

/// Render the grid of a tabular result set.
///
/// Rows keep their order. With paging enabled and more rows than one page,
/// rows are split into page bodies of which only the first is visible.
pub fn render_table(result: &ResultSet, scope: &mut ViewScope, options: &RenderOptions) -> Rendered {
    let table_id = scope.next_id("tbl");
    let region_id = scope.next_id("scroll");
    let tip_id = scope.next_id("tip");

    let head = Element::new("thead")
        .child(Element::new("tr").extend(result.columns.iter().map(header_cell)));

    let page_size = if options.page_size == 0 {
        result.rows.len().max(1)
    } else {
        options.page_size
    };
    let page_count = options.page_count(result.rows.len());

    let mut table = Element::new("table")
        .id(&table_id)
        .class("sqlnb-grid")
        .child(head);

    let mut page_ids = Vec::with_capacity(page_count);
    if result.rows.is_empty() {
        table.push(Element::new("tbody"));
    } else {
        for (index, chunk) in result.rows.chunks(page_size).enumerate() {
            let page_id = scope.next_id("page");
            table.push(
                Element::new("tbody")
                    .id(&page_id)
                    .hidden(index > 0)
                    .extend(chunk.iter().map(body_row)),
            );
            page_ids.push(page_id);
        }
    }

    let mut view = Element::new("div")
        .class("sqlnb-table")
        .child(
            Element::new("div")
                .id(&region_id)
                .class("sqlnb-scroll")
                .child(table),
        );

    let mut rendered_bindings = vec![Binding::Tooltip {
        region: region_id,
        tip: tip_id.clone(),
        trigger: options.tooltip_trigger,
    }];

    if page_ids.len() > 1 {
        let prev = scope.next_id("prev");
        let next = scope.next_id("next");
        let label = scope.next_id("plabel");
        view.push(pager(page_ids.len(), &prev, &next, &label));
        rendered_bindings.push(Binding::Pager {
            pages: page_ids,
            prev,
            next,
            label,
        });
    }

    view.push(
        Element::new("div")
            .id(&tip_id)
            .class("sqlnb-tooltip")
            .attr("role", "tooltip")
            .hidden(true),
    );

    log::debug!(
        "rendered table {} with {} row(s) in {} page(s)",
        table_id,
        result.rows.len(),
        page_count
    );

    Rendered {
        element: view,
        bindings: rendered_bindings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::display_options::TooltipTrigger;
    use crate::display::markup::Markup;

    fn sample() -> ResultSet {
        ResultSet::new(
            vec![Column::new("id", "int"), Column::new("name", "varchar")],
            vec![
                Row::new(vec![CellValue::from(1), CellValue::from("Alice")]),
                Row::new(vec![CellValue::from(2), CellValue::Null]),
            ],
            15,
        )
    }

    fn numbered(rows: i64) -> ResultSet {
        ResultSet::new(
            vec![Column::new("n", "int")],
            (0..rows).map(|n| Row::new(vec![CellValue::from(n)])).collect(),
            1,
        )
    }

    fn elements_with_tag<'a>(root: &'a Element, tag: &str) -> Vec<&'a Element> {
        root.descendants()
            .into_iter()
            .filter(|e| e.tag() == tag)
            .collect()
    }

    #[test]
    fn test_headers_and_rows() {
        let mut scope = ViewScope::new(1);
        let rendered = render_table(&sample(), &mut scope, &RenderOptions::default());

        let headers = elements_with_tag(&rendered.element, "th");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].attr_value("title"), Some("int"));
        assert_eq!(headers[1].text_content(), "name");

        let rows = elements_with_tag(&rendered.element, "tr");
        // header row plus two body rows
        assert_eq!(rows.len(), 3);

        let cells = elements_with_tag(&rendered.element, "td");
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[1].attr_value("data-full"), Some("Alice"));
        assert!(cells[3].has_class("sqlnb-null"));
        assert_eq!(cells[3].text_content(), NULL_MARKER);
    }

    #[test]
    fn test_null_differs_from_null_string() {
        let null_cell = data_cell(&CellValue::Null).to_html();
        let string_cell = data_cell(&CellValue::from("NULL")).to_html();
        assert_ne!(null_cell, string_cell);
        assert!(null_cell.contains("sqlnb-null"));
        assert!(!string_cell.contains("sqlnb-null"));

        let lower = data_cell(&CellValue::from("null")).to_html();
        assert!(!lower.contains("sqlnb-null"));
    }

    #[test]
    fn test_unknown_type_has_empty_tooltip() {
        let result = ResultSet::new(vec![Column::new("x", "")], Vec::new(), 0);
        let rendered = render_table(&result, &mut ViewScope::new(1), &RenderOptions::default());
        let header = elements_with_tag(&rendered.element, "th")[0];
        assert_eq!(header.attr_value("title"), Some(""));
    }

    #[test]
    fn test_row_order_is_preserved() {
        let rendered = render_table(&numbered(5), &mut ViewScope::new(1), &RenderOptions::default());
        let values: Vec<String> = elements_with_tag(&rendered.element, "td")
            .iter()
            .map(|td| td.text_content())
            .collect();
        assert_eq!(values, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_tooltip_binding_uses_trigger() {
        let options = RenderOptions::default().with_tooltip_trigger(TooltipTrigger::Click);
        let mut scope = ViewScope::new(1);
        let rendered = render_table(&sample(), &mut scope, &options);
        match &rendered.bindings[0] {
            Binding::Tooltip { tip, trigger, .. } => {
                assert_eq!(*trigger, TooltipTrigger::Click);
                let tip = rendered.element.find_by_id(tip).unwrap();
                assert!(tip.is_hidden());
            }
            other => panic!("unexpected binding {:?}", other),
        }
    }

    #[test]
    fn test_single_page_has_no_pager() {
        let rendered = render_table(&sample(), &mut ViewScope::new(1), &RenderOptions::default());
        assert_eq!(rendered.bindings.len(), 1);
        assert!(!rendered.element.to_html().contains("sqlnb-pager"));
    }

    #[test]
    fn test_paging_splits_rows() {
        let options = RenderOptions::default().with_page_size(2);
        let rendered = render_table(&numbered(5), &mut ViewScope::new(1), &options);

        let bodies = elements_with_tag(&rendered.element, "tbody");
        assert_eq!(bodies.len(), 3);
        assert!(!bodies[0].is_hidden());
        assert!(bodies[1].is_hidden());
        assert!(bodies[2].is_hidden());
        assert_eq!(elements_with_tag(bodies[2], "tr").len(), 1);

        match &rendered.bindings[1] {
            Binding::Pager { pages, label, .. } => {
                assert_eq!(pages.len(), 3);
                let label = rendered.element.find_by_id(label).unwrap();
                assert_eq!(label.text_content(), "Page 1 of 3");
            }
            other => panic!("unexpected binding {:?}", other),
        }
    }

    #[test]
    fn test_paging_disabled_keeps_one_body() {
        let options = RenderOptions::default().with_page_size(0);
        let rendered = render_table(&numbered(250), &mut ViewScope::new(1), &options);
        assert_eq!(elements_with_tag(&rendered.element, "tbody").len(), 1);
        assert_eq!(elements_with_tag(&rendered.element, "td").len(), 250);
    }

    #[test]
    fn test_empty_result_renders_header_only() {
        let result = ResultSet::new(vec![Column::new("id", "int")], Vec::new(), 0);
        let rendered = render_table(&result, &mut ViewScope::new(1), &RenderOptions::default());
        assert_eq!(elements_with_tag(&rendered.element, "th").len(), 1);
        assert!(elements_with_tag(&rendered.element, "td").is_empty());
    }

    #[test]
    fn test_no_inline_handlers() {
        let rendered = render_table(&numbered(3), &mut ViewScope::new(1), &RenderOptions::default());
        assert!(!rendered.element.to_html().contains("onclick"));
        assert!(rendered
            .element
            .children()
            .iter()
            .all(|child| matches!(child, Markup::Element(_))));
    }
}
