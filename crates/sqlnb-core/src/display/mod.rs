pub mod bindings;
pub mod csv;
pub mod display_options;
pub mod json_tree;
pub mod markup;
pub mod messages;
pub mod output;
pub mod plain_text;
pub mod scope;
pub mod style;
pub mod table;
pub mod view;

pub use bindings::{Binding, Rendered};
pub use display_options::{DisplayMode, RenderOptions, TooltipTrigger};
pub use json_tree::{JsonNode, ToggleState, render_json, render_tree};
pub use markup::{Element, Markup};
pub use messages::render_messages;
pub use output::{CellOutput, OutputItem};
pub use plain_text::render_plain_text;
pub use scope::{NodeId, ViewScope, ViewSequence};
pub use table::render_table;
pub use view::{ViewComposer, ViewFragment};
