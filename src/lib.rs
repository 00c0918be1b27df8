//! # Molshot
//!
//! Renders tabular molecular data as grid images: each row of a CSV becomes
//! one cell showing a 2D structure depiction plus selected metadata fields,
//! and each page of rows becomes one PNG, captured from rendered HTML by
//! headless Chrome.
//!
//! # Architecture: A One-Way Pipeline
//!
//! ```text
//! CLI/config → resolve settings → load CSV → partition into pages
//!                                               │ (per page, lazily)
//!                                               ▼
//!                          render grid HTML → capture element → page.png
//! ```
//!
//! Data flows strictly left to right. The only state shared across pages is
//! the immutable [`config::GridConfig`]; pages are generated sequentially
//! because the capturer owns an exclusive browser session.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Settings record; CLI > JSON config file > defaults merge |
//! | [`dataset`] | CSV loading, column validation, default display subset |
//! | [`paginate`] | Page-sized row ranges and zero-padded output naming |
//! | [`depict`] | Structure depiction seam (chemistry toolkits plug in here) |
//! | [`render`] | Maud-generated grid HTML with forced static rendering |
//! | [`screenshot`] | Cropped element capture via headless Chrome |
//! | [`convert`] | Per-page generation and the lazy batch orchestrator |
//! | [`output`] | Warnings, progress bar, and result summary |
//!
//! # Design Decisions
//!
//! ## HTML as the Intermediate Format
//!
//! The grid is laid out by a browser engine, not by an image compositor.
//! CSS grid handles cell sizing, gaps, borders, and fonts for free, and the
//! depictions are embedded SVG, so the captured raster is crisp at any cell
//! size. The cost is a headless Chrome dependency at runtime, confined
//! behind the [`screenshot::Capturer`] trait.
//!
//! ## Forced Static Rendering
//!
//! Screenshot capture requires fully materialized, script-free markup: the
//! renderer always emits a static document with pre-rendered SVG depictions,
//! regardless of configuration. See [`render`] for the three forced options.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): compile-time
//! checked templates, auto-escaped interpolation, no runtime template files.
//!
//! ## No Chemistry Toolkit
//!
//! Real 2D structure layout belongs to a chemistry toolkit, which is out of
//! scope here. [`depict::Depictor`] is the seam; the built-in
//! [`depict::NotationDepictor`] keeps the pipeline runnable end-to-end.

pub mod config;
pub mod convert;
pub mod dataset;
pub mod depict;
pub mod output;
pub mod paginate;
pub mod render;
pub mod screenshot;
