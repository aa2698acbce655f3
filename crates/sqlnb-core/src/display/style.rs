//! View-scoped stylesheet.
//!
//! Every rule is prefixed with the view's root id so styles of one output
//! never leak into another. Colors come from the host's theme variables with
//! plain fallbacks.

use super::display_options::RenderOptions;

const TEMPLATE: &str = r#"
#ROOT { position: relative; font-family: var(--vscode-editor-font-family, monospace); font-size: var(--vscode-editor-font-size, 13px); color: var(--vscode-foreground, #333); }
#ROOT [hidden] { display: none !important; }
#ROOT .sqlnb-context { opacity: 0.8; margin-bottom: 4px; }
#ROOT .sqlnb-toolbar { display: flex; gap: 6px; align-items: center; margin-bottom: 4px; }
#ROOT .sqlnb-toolbar button, #ROOT .sqlnb-pager button, #ROOT .sqlnb-msg-toggle { background: var(--vscode-button-secondaryBackground, #e5e5e5); color: var(--vscode-button-secondaryForeground, #333); border: none; padding: 2px 8px; cursor: pointer; }
#ROOT .sqlnb-toolbar button.active { background: var(--vscode-button-background, #0e639c); color: var(--vscode-button-foreground, #fff); }
#ROOT .sqlnb-meta { margin-left: auto; opacity: 0.7; }
#ROOT .sqlnb-scroll { max-height: MAXHEIGHTpx; overflow: auto; border: 1px solid var(--vscode-panel-border, #ccc); }
#ROOT .sqlnb-grid { border-collapse: collapse; width: max-content; min-width: 100%; }
#ROOT .sqlnb-grid th { position: sticky; top: 0; z-index: 1; text-align: left; background: var(--vscode-editor-background, #fff); border-bottom: 1px solid var(--vscode-panel-border, #ccc); padding: 2px 8px; }
#ROOT .sqlnb-grid td { max-width: MAXCELLpx; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; padding: 2px 8px; border-bottom: 1px solid var(--vscode-panel-border, #eee); }
#ROOT .sqlnb-num { text-align: right; }
#ROOT .sqlnb-null { font-style: italic; opacity: 0.6; }
#ROOT .sqlnb-tooltip { position: absolute; z-index: 10; max-width: 60%; white-space: pre-wrap; word-break: break-all; padding: 4px 6px; background: var(--vscode-editorHoverWidget-background, #f3f3f3); border: 1px solid var(--vscode-editorHoverWidget-border, #c8c8c8); }
#ROOT .sqlnb-pager { display: flex; gap: 6px; align-items: center; margin-top: 4px; }
#ROOT .sqlnb-json { white-space: pre; overflow: auto; max-height: MAXHEIGHTpx; }
#ROOT .sqlnb-jbody { padding-left: 1.5em; }
#ROOT .sqlnb-jtoggle, #ROOT .sqlnb-jspacer { display: inline-block; width: 1.2em; background: none; border: none; padding: 0; color: inherit; cursor: pointer; }
#ROOT .sqlnb-jkey { color: var(--vscode-symbolIcon-propertyForeground, #0451a5); }
#ROOT .sqlnb-jstring { color: var(--vscode-debugTokenExpression-string, #a31515); }
#ROOT .sqlnb-jnumber { color: var(--vscode-debugTokenExpression-number, #098658); }
#ROOT .sqlnb-jboolean { color: var(--vscode-debugTokenExpression-boolean, #0000ff); }
#ROOT .sqlnb-jnull { font-style: italic; opacity: 0.6; }
#ROOT .sqlnb-status { padding: 4px 0; }
#ROOT .sqlnb-messages { margin-top: 6px; }
#ROOT .sqlnb-msg { display: flex; gap: 4px; white-space: pre-wrap; }
#ROOT .sqlnb-msg-warning { color: var(--vscode-editorWarning-foreground, #bf8803); }
#ROOT .sqlnb-msg-error { color: var(--vscode-errorForeground, #e51400); }
"#;

/// Stylesheet for the view rooted at `root_id`.
pub fn scoped_css(root_id: &str, options: &RenderOptions) -> String {
    TEMPLATE
        .trim_start()
        .replace("#ROOT", &format!("#{}", root_id))
        .replace("MAXHEIGHT", &options.max_table_height_px.to_string())
        .replace("MAXCELL", &options.max_cell_width_px.to_string())
}
