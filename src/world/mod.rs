//! Areas and the content lookup seam.

pub mod content;
pub mod data;

pub use content::{ContentLookup, ContentNode, DropEntry, NodeKind, StaticContent};
pub use data::{get_all_areas, get_area};
