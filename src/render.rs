//! Grid HTML rendering.
//!
//! Builds the self-contained HTML document that the screenshot capturer
//! loads: one CSS-grid cell per data row, each holding a structure depiction
//! and the configured metadata fields. Uses [maud](https://maud.lambda.xyz/)
//! for compile-time HTML templating, so the markup is type-checked and all
//! metadata interpolation is auto-escaped.
//!
//! ## Forced rendering behavior
//!
//! Screenshot capture needs fully materialized markup: no scripts, no lazy
//! drawing, resolution-independent depictions. Three options are therefore
//! forced on every render, regardless of what the caller put in
//! [`GridOptions`]:
//!
//! - `template = Static` — no interactive machinery in the document;
//! - `prerender = true` — depictions are embedded, not drawn on load;
//! - `use_svg = true` — vector depictions, crisp at any capture scale.
//!
//! ## Transparency
//!
//! `transparent` touches two layers at once: the page CSS gets an override
//! forcing a transparent body background, and the depictor is told not to
//! paint an opaque backdrop behind each structure. Missing either layer
//! produces a white box somewhere in the captured raster.

use crate::config::GridConfig;
use crate::dataset::RowDataset;
use crate::depict::{Depictor, DrawOptions, RenderError};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::ops::Range;

/// Id of the grid container element; the default capture selector targets it.
pub const GRID_CONTAINER_ID: &str = "mols2grid";

/// Baseline stylesheet for captures: white margin-free page, internal
/// row-id markup hidden.
pub const DEFAULT_CSS: &str = "\
body {
    background-color: #ffffff;
    margin: 0;
}
.data-mols2grid-id {
    color: transparent !important;
    display: none;
}
";

/// Appended when transparency is requested; wins over [`DEFAULT_CSS`].
const TRANSPARENT_CSS: &str = "\
body {
    background-color: transparent !important;
}
";

/// Document template variants. Only [`Template::Static`] is ever rendered;
/// the variant exists so the forced override is visible in the options
/// rather than silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Interactive,
    Static,
}

/// Closed allow-list of rendering parameters.
///
/// Built from the resolved [`GridConfig`] plus the effective display subset.
/// There is no open-ended passthrough: a setting reaches the renderer only
/// by being a field here.
#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    pub smiles_col: String,
    pub subset: Vec<String>,
    pub n_cols: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    /// Cell padding in pixels.
    pub pad: u32,
    pub fontsize: u32,
    pub custom_css: String,
    pub sort_by: Option<String>,
    pub remove_hs: Option<bool>,
    pub use_coords: Option<bool>,
    pub coord_gen: Option<bool>,
    pub border: Option<String>,
    pub gap: Option<u32>,
    pub fontfamily: Option<String>,
    pub text_align: Option<String>,
    pub transparent: bool,
    pub template: Template,
    pub prerender: bool,
    pub use_svg: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            smiles_col: "smiles".to_string(),
            subset: Vec::new(),
            n_cols: 5,
            cell_width: 150,
            cell_height: 150,
            pad: 10,
            fontsize: 12,
            custom_css: DEFAULT_CSS.to_string(),
            sort_by: None,
            remove_hs: None,
            use_coords: None,
            coord_gen: None,
            border: None,
            gap: None,
            fontfamily: None,
            text_align: None,
            transparent: false,
            template: Template::Static,
            prerender: true,
            use_svg: true,
        }
    }
}

impl GridOptions {
    /// Map the resolved settings onto the renderer's allow-list.
    ///
    /// `subset` is the effective display subset (explicit config or the
    /// dataset-derived default) — resolved by the caller because the frozen
    /// config cannot absorb it.
    pub fn from_config(config: &GridConfig, subset: Vec<String>) -> Self {
        Self {
            smiles_col: config.smiles_col.clone(),
            subset,
            n_cols: config.n_cols,
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            fontsize: config.fontsize,
            sort_by: config.sort_by.clone(),
            remove_hs: config.remove_hs,
            use_coords: config.use_coords,
            coord_gen: config.coord_gen,
            border: config.border.clone(),
            gap: config.gap,
            fontfamily: config.fontfamily.clone(),
            text_align: config.text_align.clone(),
            transparent: config.transparent,
            ..Self::default()
        }
    }

    /// Apply the non-negotiable capture settings.
    fn forced(&self) -> Self {
        Self {
            template: Template::Static,
            prerender: true,
            use_svg: true,
            ..self.clone()
        }
    }

    fn draw_options(&self) -> DrawOptions {
        DrawOptions {
            width: self.cell_width,
            height: self.cell_height,
            clear_background: self.transparent,
            remove_hs: self.remove_hs,
            use_coords: self.use_coords,
            coord_gen: self.coord_gen,
        }
    }
}

/// Opaque renderable grid. Created per page, consumed immediately; the only
/// capability the rest of the pipeline uses is HTML serialization.
#[derive(Debug, Clone)]
pub struct MolGrid {
    html: String,
}

impl MolGrid {
    pub fn render_to_html(&self) -> String {
        self.html.clone()
    }
}

/// Render one page's row range into a [`MolGrid`].
///
/// Rows keep dataset order unless `sort_by` names an existing column, in
/// which case the page's rows are stably sorted by that column's value.
/// Renders silently: nothing is written to stdout or stderr.
pub fn render_grid(
    dataset: &RowDataset,
    rows: Range<usize>,
    options: &GridOptions,
    depictor: &dyn Depictor,
) -> Result<MolGrid, RenderError> {
    let options = options.forced();
    let draw_options = options.draw_options();

    let mut indices: Vec<usize> = rows.collect();
    if let Some(sort_col) = options.sort_by.as_deref() {
        if dataset.has_column(sort_col) {
            indices.sort_by(|&a, &b| {
                dataset
                    .value(a, sort_col)
                    .unwrap_or("")
                    .cmp(dataset.value(b, sort_col).unwrap_or(""))
            });
        }
    }

    let mut cells: Vec<Markup> = Vec::with_capacity(indices.len());
    for &row in &indices {
        let notation = dataset.value(row, &options.smiles_col).unwrap_or("");
        let depiction = depictor.depict(notation, &draw_options)?;
        cells.push(html! {
            div class="cell" {
                div class="data-mols2grid-id" { (row) }
                div class="depiction" { (PreEscaped(depiction)) }
                @for column in &options.subset {
                    @if let Some(value) = dataset.value(row, column) {
                        div class="cell-field" { (value) }
                    }
                }
            }
        });
    }

    let css = stylesheet(&options);
    let document = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                style { (PreEscaped(css)) }
            }
            body {
                div id=(GRID_CONTAINER_ID) {
                    @for cell in &cells { (cell) }
                }
            }
        }
    };

    Ok(MolGrid {
        html: document.into_string(),
    })
}

/// Custom CSS, transparency override, then the generated layout rules.
fn stylesheet(options: &GridOptions) -> String {
    let mut css = options.custom_css.clone();
    if options.transparent {
        css.push('\n');
        css.push_str(TRANSPARENT_CSS);
    }

    let gap = options.gap.unwrap_or(options.pad);
    let border = options.border.as_deref().unwrap_or("none");
    css.push_str(&format!(
        "\n#{id} {{\n    display: grid;\n    grid-template-columns: repeat({cols}, {w}px);\n    gap: {gap}px;\n    padding: {pad}px;\n    font-size: {fs}px;\n    width: fit-content;\n}}\n",
        id = GRID_CONTAINER_ID,
        cols = options.n_cols,
        w = options.cell_width,
        gap = gap,
        pad = options.pad,
        fs = options.fontsize,
    ));
    css.push_str(&format!(
        "#{id} .cell {{\n    width: {w}px;\n    border: {border};\n    overflow: hidden;\n}}\n",
        id = GRID_CONTAINER_ID,
        w = options.cell_width,
    ));
    if let Some(family) = options.fontfamily.as_deref() {
        css.push_str(&format!(
            "#{GRID_CONTAINER_ID} {{ font-family: {family}; }}\n"
        ));
    }
    if let Some(align) = options.text_align.as_deref() {
        css.push_str(&format!(
            "#{GRID_CONTAINER_ID} .cell {{ text-align: {align}; }}\n"
        ));
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depict::NotationDepictor;

    fn sample() -> RowDataset {
        RowDataset::new(
            vec!["smiles".into(), "ccd".into()],
            vec![
                vec!["CCO".into(), "ETH".into()],
                vec!["C".into(), "MET".into()],
                vec!["CCC".into(), "PRO".into()],
            ],
        )
    }

    fn render(options: &GridOptions) -> String {
        render_grid(&sample(), 0..3, options, &NotationDepictor)
            .unwrap()
            .render_to_html()
    }

    // =========================================================================
    // Document shape
    // =========================================================================

    #[test]
    fn document_contains_grid_container_and_cells() {
        let html = render(&GridOptions::default());
        assert!(html.contains(r#"id="mols2grid""#));
        assert_eq!(html.matches(r#"class="cell""#).count(), 3);
        assert!(html.contains("<!DOCTYPE html>"));
    }

    #[test]
    fn depictions_are_embedded_svg() {
        let html = render(&GridOptions::default());
        assert_eq!(html.matches("<svg").count(), 3);
    }

    #[test]
    fn baseline_css_hides_internal_id_markup() {
        let html = render(&GridOptions::default());
        assert!(html.contains(".data-mols2grid-id"));
        assert!(html.contains("background-color: #ffffff"));
    }

    #[test]
    fn layout_follows_options() {
        let options = GridOptions {
            n_cols: 3,
            cell_width: 200,
            fontsize: 16,
            gap: Some(4),
            border: Some("1px solid black".into()),
            fontfamily: Some("serif".into()),
            text_align: Some("left".into()),
            ..GridOptions::default()
        };
        let html = render(&options);
        assert!(html.contains("repeat(3, 200px)"));
        assert!(html.contains("gap: 4px"));
        assert!(html.contains("font-size: 16px"));
        assert!(html.contains("border: 1px solid black"));
        assert!(html.contains("font-family: serif"));
        assert!(html.contains("text-align: left"));
    }

    // =========================================================================
    // Forced static rendering
    // =========================================================================

    #[test]
    fn interactive_template_is_overridden() {
        let options = GridOptions {
            template: Template::Interactive,
            prerender: false,
            use_svg: false,
            ..GridOptions::default()
        };
        let html = render(&options);
        // Static document: no scripts, depictions already materialized as SVG.
        assert!(!html.contains("<script"));
        assert!(html.contains("<svg"));
    }

    // =========================================================================
    // Transparency
    // =========================================================================

    #[test]
    fn transparent_overrides_body_and_depiction_backdrop() {
        let options = GridOptions {
            transparent: true,
            ..GridOptions::default()
        };
        let html = render(&options);
        assert!(html.contains("background-color: transparent !important"));
        // Depictor was told to skip the opaque backdrop.
        assert!(!html.contains(r##"fill="#ffffff""##));
    }

    #[test]
    fn opaque_by_default() {
        let html = render(&GridOptions::default());
        assert!(!html.contains("background-color: transparent"));
        assert!(html.contains(r##"fill="#ffffff""##));
    }

    // =========================================================================
    // Subset and sorting
    // =========================================================================

    #[test]
    fn subset_fields_are_rendered_in_order() {
        let options = GridOptions {
            subset: vec!["ccd".into()],
            ..GridOptions::default()
        };
        let html = render(&options);
        assert!(html.contains("ETH"));
        assert!(html.contains("MET"));
        assert!(html.contains("PRO"));
    }

    #[test]
    fn absent_subset_renders_no_metadata() {
        let html = render(&GridOptions::default());
        assert!(!html.contains("cell-field"));
    }

    #[test]
    fn sort_by_orders_rows_within_the_page() {
        let options = GridOptions {
            sort_by: Some("ccd".into()),
            subset: vec!["ccd".into()],
            ..GridOptions::default()
        };
        let html = render(&options);
        let eth = html.find("ETH").unwrap();
        let met = html.find("MET").unwrap();
        let pro = html.find("PRO").unwrap();
        assert!(eth < met && met < pro);
    }

    #[test]
    fn sort_by_unknown_column_keeps_original_order() {
        let options = GridOptions {
            sort_by: Some("nope".into()),
            subset: vec!["ccd".into()],
            ..GridOptions::default()
        };
        let html = render(&options);
        let eth = html.find("ETH").unwrap();
        let met = html.find("MET").unwrap();
        assert!(eth < met);
    }

    // =========================================================================
    // Escaping
    // =========================================================================

    #[test]
    fn metadata_values_are_escaped() {
        let dataset = RowDataset::new(
            vec!["smiles".into(), "name".into()],
            vec![vec!["C".into(), "<b>bold</b>".into()]],
        );
        let options = GridOptions {
            subset: vec!["name".into()],
            ..GridOptions::default()
        };
        let html = render_grid(&dataset, 0..1, &options, &NotationDepictor)
            .unwrap()
            .render_to_html();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    // =========================================================================
    // Options mapping
    // =========================================================================

    #[test]
    fn from_config_maps_all_settings() {
        let config = GridConfig {
            smiles_col: "structure".into(),
            n_cols: 2,
            cell_width: 90,
            cell_height: 80,
            fontsize: 10,
            sort_by: Some("name".into()),
            remove_hs: Some(true),
            gap: Some(2),
            transparent: true,
            ..GridConfig::default()
        };
        let options = GridOptions::from_config(&config, vec!["name".into()]);

        assert_eq!(options.smiles_col, "structure");
        assert_eq!(options.n_cols, 2);
        assert_eq!(options.cell_width, 90);
        assert_eq!(options.cell_height, 80);
        assert_eq!(options.fontsize, 10);
        assert_eq!(options.sort_by.as_deref(), Some("name"));
        assert_eq!(options.remove_hs, Some(true));
        assert_eq!(options.gap, Some(2));
        assert_eq!(options.subset, vec!["name".to_string()]);
        assert!(options.transparent);
        // Forced capture settings regardless of config.
        assert_eq!(options.template, Template::Static);
        assert!(options.prerender);
        assert!(options.use_svg);
    }

    #[test]
    fn transparency_reaches_draw_options() {
        let options = GridOptions {
            transparent: true,
            remove_hs: Some(true),
            ..GridOptions::default()
        };
        let draw = options.draw_options();
        assert!(draw.clear_background);
        assert_eq!(draw.remove_hs, Some(true));
        assert_eq!(draw.width, 150);
    }
}
