//! Structure depiction seam.
//!
//! Turning a structure line notation into a 2D depiction is the job of a
//! chemistry toolkit, which this crate deliberately does not ship. The
//! [`Depictor`] trait is the boundary: the grid renderer asks a depictor for
//! an SVG fragment per cell and stays ignorant of how it was produced.
//!
//! [`NotationDepictor`] is the built-in implementation — a minimal SVG that
//! letters the notation itself inside the cell box. It keeps the pipeline
//! runnable end-to-end (layout, pagination, capture, transparency) without a
//! toolkit; a real one plugs in behind the trait.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to depict structure in row {row}: {reason}")]
    Depiction { row: usize, reason: String },
}

/// Per-depiction drawing options, derived from the grid settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOptions {
    /// Depiction viewport width in pixels.
    pub width: u32,
    /// Depiction viewport height in pixels.
    pub height: u32,
    /// Skip the opaque backdrop behind the structure. Set when the page is
    /// rendered with a transparent background, so per-cell transparency
    /// survives the molecule drawing as well as the page chrome.
    pub clear_background: bool,
    /// Strip explicit hydrogens before depiction. Toolkit passthrough; the
    /// built-in depictor has no atoms to act on and ignores it.
    pub remove_hs: Option<bool>,
    /// Reuse 2D coordinates already present in the input. Toolkit passthrough.
    pub use_coords: Option<bool>,
    /// Use the toolkit's template-based coordinate generator. Toolkit
    /// passthrough.
    pub coord_gen: Option<bool>,
}

/// Produces an SVG fragment for one structure.
pub trait Depictor {
    fn depict(&self, notation: &str, options: &DrawOptions) -> Result<String, RenderError>;
}

/// Built-in fallback depictor: renders the notation text centered in the
/// cell, over a white backdrop unless `clear_background` is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotationDepictor;

impl Depictor for NotationDepictor {
    fn depict(&self, notation: &str, options: &DrawOptions) -> Result<String, RenderError> {
        let (width, height) = (options.width, options.height);
        let backdrop = if options.clear_background {
            String::new()
        } else {
            format!(r##"<rect width="{width}" height="{height}" fill="#ffffff"/>"##)
        };
        // Shrink long notations so they stay inside the viewport.
        let font_size = (width as f64 / (notation.chars().count().max(1) as f64 * 0.62))
            .min(height as f64 / 3.0)
            .max(6.0)
            .round() as u32;
        Ok(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">{backdrop}<text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" font-family="monospace" font-size="{font_size}">{}</text></svg>"#,
            escape(notation)
        ))
    }
}

/// Minimal XML text escaping for notation strings embedded in SVG.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
