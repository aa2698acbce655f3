use super::bindings::{Binding, Rendered};
use super::markup::Element;
use super::scope::ViewScope;
use crate::core::messages::Message;

fn message_line(message: &Message) -> Element {
    let severity = message.severity.as_str();
    let line = Element::new("div")
        .class(&format!("sqlnb-msg sqlnb-msg-{}", severity))
        .attr("data-severity", severity);
    let line = match message.severity.glyph() {
        Some(glyph) => line.child(
            Element::new("span")
                .class("sqlnb-msg-glyph")
                .attr("aria-hidden", "true")
                .text(glyph),
        ),
        None => line,
    };
    line.child(
        Element::new("span")
            .class("sqlnb-msg-text")
            .text(message.text.as_str()),
    )
}

/// Collapsible messages panel, collapsed by default.
///
/// Returns `None` for an empty list so no panel is shown at all.
pub fn render_messages(messages: &[Message], scope: &mut ViewScope) -> Option<Rendered> {
    if messages.is_empty() {
        return None;
    }

    let toggle_id = scope.next_id("msgt");
    let body_id = scope.next_id("msgb");

    let toggle = Element::new("button")
        .id(&toggle_id)
        .class("sqlnb-msg-toggle")
        .attr("type", "button")
        .attr("aria-expanded", "false")
        .attr("aria-controls", body_id.as_str())
        .text(format!("Messages ({})", messages.len()));

    let body = Element::new("div")
        .id(&body_id)
        .class("sqlnb-msg-body")
        .hidden(true)
        .extend(messages.iter().map(message_line));

    let element = Element::new("div")
        .class("sqlnb-messages")
        .child(toggle)
        .child(body);

    Some(Rendered::new(element).with_binding(Binding::Disclosure {
        toggle: toggle_id,
        body: body_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::messages::Severity;

    #[test]
    fn test_empty_list_renders_nothing() {
        assert!(render_messages(&[], &mut ViewScope::new(1)).is_none());
    }

    #[test]
    fn test_panel_is_collapsed_with_count() {
        let messages = vec![
            Message::info("Changed database context to 'master'."),
            Message::new("Null value is eliminated", Severity::Warning),
            Message::new("Divide by zero", Severity::Error),
        ];
        let rendered = render_messages(&messages, &mut ViewScope::new(1)).unwrap();

        let (toggle, body) = match &rendered.bindings[..] {
            [Binding::Disclosure { toggle, body }] => (toggle.clone(), body.clone()),
            other => panic!("unexpected bindings {:?}", other),
        };
        let toggle = rendered.element.find_by_id(&toggle).unwrap();
        assert_eq!(toggle.text_content(), "Messages (3)");
        assert_eq!(toggle.attr_value("aria-expanded"), Some("false"));
        assert!(rendered.element.find_by_id(&body).unwrap().is_hidden());
    }

    #[test]
    fn test_messages_keep_order_and_severity() {
        let messages = vec![
            Message::new("first", Severity::Error),
            Message::info("second"),
            Message::new("third", Severity::Warning),
        ];
        let rendered = render_messages(&messages, &mut ViewScope::new(1)).unwrap();
        let lines: Vec<&Element> = rendered
            .element
            .descendants()
            .into_iter()
            .filter(|e| e.has_class("sqlnb-msg"))
            .collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].has_class("sqlnb-msg-error"));
        assert_eq!(lines[0].text_content(), "\u{2716}first");
        assert!(lines[1].has_class("sqlnb-msg-info"));
        assert_eq!(lines[1].text_content(), "second");
        assert!(lines[2].has_class("sqlnb-msg-warning"));
        assert_eq!(lines[2].text_content(), "\u{26A0}third");
    }

    #[test]
    fn test_message_text_is_escaped() {
        let rendered =
            render_messages(&[Message::info("<b>bold</b>")], &mut ViewScope::new(1)).unwrap();
        let html = rendered.element.to_html();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }
}
