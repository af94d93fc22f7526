//! rearrange - reorder a list by dragging items or pressing move buttons
//!
//! The pieces stack bottom-up: [`order`] holds the pure index arithmetic,
//! [`gesture`] the toolkit-neutral drag interface, [`list`] the adapter that
//! ties both to a host-owned item sequence, and [`ui`] a terminal toolkit
//! built on bubbletea-rs that drives it.
//!
//! Tests live close to the modules they exercise as unit tests.

pub mod config;
pub mod error;
pub mod gesture;
pub mod list;
pub mod logging;
pub mod order;
pub mod source;
pub mod ui;

pub use error::{Error, Result};
pub use list::{ListProps, ReorderList};
pub use order::{move_item, Move};
