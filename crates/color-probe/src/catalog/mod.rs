//! Named color catalogs
//!
//! [`ColorCatalog::web`] holds the CSS web colors and backs
//! [`nearest_name`]. [`ColorCatalog::basic`] holds a dozen everyday names.
//! Both are built once per process and never change afterwards.

mod catalog;

pub use catalog::{nearest_name, ColorCatalog, NamedColor, NOT_DETECTED};
