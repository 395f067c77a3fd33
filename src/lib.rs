//! svgtree: rebuild the element tree of an SVG document from the flat row
//! table a conversion engine exports, and render it as indented text or as a
//! structured tree model.
//!
//! Layers, innermost first: [`domain`] (pure ingestion, hierarchy, rendering),
//! [`application`] (extraction service), [`infrastructure`] (engine, table
//! files, wiring) and [`cli`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
