//! The block document model.
//!
//! A document is an ordered list of blocks, each independently editable and
//! independently styleable. This module owns the model and the mutation
//! contract:
//! - [`types`]: block records, tags, and open style/attribute maps
//! - [`caret`]: logical caret targets and clamped resolution
//! - [`list`]: the list controller with split/merge and change notification

pub mod caret;
pub mod list;
pub mod types;

pub use caret::CaretTarget;
pub use list::{BlockList, ChangeHook};
pub use types::{Block, BlockPatch, BlockTag, PropMap, PropValue, fresh_id};
