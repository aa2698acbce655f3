//! Interaction wiring.
//!
//! Renderers describe behaviour as typed [`Binding`]s instead of writing
//! event handler attributes. A view serializes its bindings to JSON and one
//! static runtime attaches listeners with `addEventListener` after the markup
//! is in place. Element references are captured once at bind time; toggle
//! state lives in the runtime's own per-view maps.

use super::display_options::TooltipTrigger;
use super::markup::Element;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Binding {
    /// Button `i` shows panel `i` and hides the others.
    ModeToggle {
        buttons: Vec<String>,
        panels: Vec<String>,
    },
    /// Expand/collapse of composite JSON nodes, by node id.
    Collapse { nodes: Vec<String> },
    /// A toggle button that shows or hides a single body.
    Disclosure { toggle: String, body: String },
    /// Full-value tooltip for clipped cells inside `region`.
    Tooltip {
        region: String,
        tip: String,
        trigger: TooltipTrigger,
    },
    Pager {
        pages: Vec<String>,
        prev: String,
        next: String,
        label: String,
    },
    CopyCsv { button: String, table: String },
}

/// Output of one renderer: its element subtree plus the bindings it needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub element: Element,
    pub bindings: Vec<Binding>,
}

impl Rendered {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            bindings: Vec::new(),
        }
    }

    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }
}

const RUNTIME: &str = r#"(function (root, bindings) {
  if (!root) { return; }
  var byId = function (id) { return document.getElementById(id); };
  var show = function (el, visible) { if (el) { el.hidden = !visible; } };
  var handlers = {
    mode_toggle: function (b) {
      var buttons = b.buttons.map(byId);
      var panels = b.panels.map(byId);
      buttons.forEach(function (button, i) {
        button.addEventListener('click', function () {
          panels.forEach(function (panel, j) { show(panel, i === j); });
          buttons.forEach(function (other, j) {
            other.classList.toggle('active', i === j);
            other.setAttribute('aria-pressed', String(i === j));
          });
        });
      });
    },
    collapse: function (b) {
      var state = {};
      b.nodes.forEach(function (id) {
        var node = {
          toggle: byId(id + '-t'),
          body: byId(id + '-b'),
          close: byId(id + '-c'),
          placeholder: byId(id + '-p')
        };
        node.collapsed = node.toggle.getAttribute('aria-expanded') === 'false';
        state[id] = node;
        node.toggle.addEventListener('click', function () {
          node.collapsed = !node.collapsed;
          show(node.body, !node.collapsed);
          show(node.close, !node.collapsed);
          show(node.placeholder, node.collapsed);
          node.toggle.setAttribute('aria-expanded', String(!node.collapsed));
          node.toggle.textContent = node.collapsed ? '▸' : '▾';
        });
      });
    },
    disclosure: function (b) {
      var toggle = byId(b.toggle), body = byId(b.body);
      toggle.addEventListener('click', function () {
        var open = body.hidden;
        show(body, open);
        toggle.setAttribute('aria-expanded', String(open));
      });
    },
    tooltip: function (b) {
      var region = byId(b.region), tip = byId(b.tip), current = null;
      var hide = function () { tip.hidden = true; current = null; };
      var reveal = function (cell) {
        if (cell.scrollWidth <= cell.clientWidth) { hide(); return; }
        tip.textContent = cell.getAttribute('data-full');
        var box = cell.getBoundingClientRect();
        var base = (tip.offsetParent || root).getBoundingClientRect();
        tip.style.left = (box.left - base.left) + 'px';
        tip.style.top = (box.bottom - base.top + 2) + 'px';
        tip.hidden = false;
        current = cell;
      };
      var cellOf = function (target) {
        var cell = target && target.closest ? target.closest('td[data-full]') : null;
        return cell && region.contains(cell) ? cell : null;
      };
      if (b.trigger === 'click') {
        region.addEventListener('click', function (e) {
          var cell = cellOf(e.target);
          if (!cell || cell === current) { hide(); } else { reveal(cell); }
        });
      } else {
        region.addEventListener('mouseover', function (e) {
          var cell = cellOf(e.target);
          if (!cell) { hide(); } else if (cell !== current) { reveal(cell); }
        });
        region.addEventListener('mouseleave', hide);
      }
      region.addEventListener('scroll', hide);
    },
    pager: function (b) {
      var pages = b.pages.map(byId), prev = byId(b.prev), next = byId(b.next), label = byId(b.label);
      var index = 0;
      var go = function (to) {
        index = Math.max(0, Math.min(pages.length - 1, to));
        pages.forEach(function (page, i) { show(page, i === index); });
        label.textContent = 'Page ' + (index + 1) + ' of ' + pages.length;
        prev.disabled = index === 0;
        next.disabled = index === pages.length - 1;
      };
      prev.addEventListener('click', function () { go(index - 1); });
      next.addEventListener('click', function () { go(index + 1); });
    },
    copy_csv: function (b) {
      var button = byId(b.button), table = byId(b.table);
      var quote = function (text) { return '"' + String(text).replace(/"/g, '""') + '"'; };
      button.addEventListener('click', function () {
        var lines = [], head = [];
        table.querySelectorAll('thead th').forEach(function (th) { head.push(quote(th.getAttribute('data-name'))); });
        lines.push(head.join(','));
        table.querySelectorAll('tbody tr').forEach(function (tr) {
          var cells = [];
          tr.querySelectorAll('td').forEach(function (td) {
            cells.push(td.hasAttribute('data-null') ? '' : quote(td.getAttribute('data-full')));
          });
          lines.push(cells.join(','));
        });
        if (navigator.clipboard) { navigator.clipboard.writeText(lines.join('\n')); }
      });
    }
  };
  bindings.forEach(function (b) {
    var handler = handlers[b.kind];
    if (handler) { handler(b); }
  });
})"#;

/// Script body that wires `bindings` for the view rooted at `root_id`.
pub fn wiring_script(root_id: &str, bindings: &[Binding]) -> String {
    // Serializing plain strings and vectors cannot fail; fall back to no
    // bindings rather than aborting the render.
    let data = serde_json::to_string(bindings).unwrap_or_else(|e| {
        log::warn!("failed to serialize view bindings: {}", e);
        "[]".to_string()
    });
    let root = serde_json::Value::String(root_id.to_string()).to_string();
    // `</` inside a script body would end the script element early.
    format!(
        "{}(document.getElementById({}), {});",
        RUNTIME,
        root.replace("</", "<\\/"),
        data.replace("</", "<\\/")
    )
}
