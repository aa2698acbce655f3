//! Immutable markup tree.
//!
//! Renderers build [`Element`] trees and serialize them once; escaping is
//! applied at serialization so renderers never concatenate markup strings.

#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    Element(Element),
    Text(String),
    /// Emitted verbatim. Only for style and script bodies.
    Raw(String),
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        Markup::Element(element)
    }
}

impl From<&str> for Markup {
    fn from(text: &str) -> Self {
        Markup::Text(text.to_string())
    }
}

impl From<String> for Markup {
    fn from(text: String) -> Self {
        Markup::Text(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, Option<String>)>,
    children: Vec<Markup>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, Some(value.into())));
        self
    }

    /// Boolean attribute such as `hidden`, written without a value.
    pub fn flag(mut self, name: &'static str, on: bool) -> Self {
        if on {
            self.attrs.push((name, None));
        }
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn hidden(self, hidden: bool) -> Self {
        self.flag("hidden", hidden)
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Markup::Text(text.into()))
    }

    pub fn raw(self, raw: impl Into<String>) -> Self {
        self.child(Markup::Raw(raw.into()))
    }

    pub fn extend<I, M>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Markup>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn push(&mut self, child: impl Into<Markup>) {
        self.children.push(child.into());
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr_value("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn is_hidden(&self) -> bool {
        self.attr_value("hidden").is_some()
    }

    pub fn children(&self) -> &[Markup] {
        &self.children
    }

    /// All descendant elements in document order, self excluded.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(&mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let Markup::Element(element) = child {
                found.push(element);
                element.collect_descendants(found);
            }
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.attr_value("id") == Some(id) {
            return Some(self);
        }
        self.descendants()
            .into_iter()
            .find(|e| e.attr_value("id") == Some(id))
    }

    /// Concatenated text of all descendants. Raw style and script bodies are
    /// not text.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Markup::Element(element) => out.push_str(&element.text_content()),
                Markup::Text(text) => out.push_str(text),
                Markup::Raw(_) => {}
            }
        }
        out
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                escape_into(value, true, out);
                out.push('"');
            }
        }
        out.push('>');
        for child in &self.children {
            match child {
                Markup::Element(element) => element.write_html(out),
                Markup::Text(text) => escape_into(text, false, out),
                Markup::Raw(raw) => out.push_str(raw),
            }
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
