//! Per-page image generation and batch orchestration.
//!
//! This is where the pipeline's pieces meet: partition the dataset into
//! pages, render each page's grid to HTML, hand the HTML to the screenshot
//! capturer, and surface one output path per page.
//!
//! Page generation is lazy and strictly sequential. [`run`] returns an
//! iterator; a page's HTML is only rendered — and its image only written —
//! when that element is consumed, so abandoning iteration early skips the
//! remaining pages' work entirely. The capturer owns an exclusive browser
//! session, so there is deliberately no parallel variant. If page *k* fails,
//! pages before *k* stay on disk and pages after *k* are never produced.
//!
//! Intermediate HTML goes to the caller-configured path (and stays there) or
//! to a scoped temp file that is removed on every exit path, success or
//! error; a failed removal is swallowed, never escalated.

use crate::config::GridConfig;
use crate::dataset::RowDataset;
use crate::depict::{Depictor, RenderError};
use crate::paginate::{self, PageDescriptor};
use crate::render::{GridOptions, MolGrid, render_grid};
use crate::screenshot::{Capturer, CaptureError, DEFAULT_SELECTOR};
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize a rendered grid to HTML and capture it as a raster image.
///
/// With `intermediate_html` the HTML lands at that path and is left on disk;
/// without it a temp file scoped to this call is used. Capturer failures
/// propagate unchanged — no retry lives here.
pub fn grid_to_image(
    grid: &MolGrid,
    output_image: &Path,
    intermediate_html: Option<&Path>,
    omit_background: bool,
    capturer: &dyn Capturer,
) -> Result<PathBuf, ConvertError> {
    let html = grid.render_to_html();
    match intermediate_html {
        Some(path) => {
            fs::write(path, &html)?;
            Ok(capturer.capture(path, output_image, DEFAULT_SELECTOR, omit_background)?)
        }
        None => {
            let mut file = tempfile::Builder::new()
                .prefix("molshot-")
                .suffix(".html")
                .tempfile()?;
            file.write_all(html.as_bytes())?;
            file.flush()?;
            // TempPath removes the file when dropped, on success and on the
            // error path alike; removal failure is ignored.
            let temp_path = file.into_temp_path();
            let result =
                capturer.capture(&temp_path, output_image, DEFAULT_SELECTOR, omit_background)?;
            Ok(result)
        }
    }
}

/// Generate one page end-to-end: render, serialize, capture.
pub fn generate_page(
    dataset: &RowDataset,
    page: &PageDescriptor,
    options: &GridOptions,
    depictor: &dyn Depictor,
    capturer: &dyn Capturer,
) -> Result<PathBuf, ConvertError> {
    let grid = render_grid(dataset, page.rows(), options, depictor)?;
    grid_to_image(
        &grid,
        &page.output_image,
        page.output_html.as_deref(),
        options.transparent,
        capturer,
    )
}

/// Lazy page sequence for one run.
///
/// Finite and non-restartable: a fresh [`run`] call starts over from page 1,
/// no position survives across calls.
pub struct PageRun<'a> {
    dataset: &'a RowDataset,
    options: GridOptions,
    depictor: &'a dyn Depictor,
    capturer: &'a dyn Capturer,
    total: usize,
    pages: std::vec::IntoIter<PageDescriptor>,
}

impl PageRun<'_> {
    /// Number of pages this run will produce if fully consumed.
    pub fn total_pages(&self) -> usize {
        self.total
    }
}

impl Iterator for PageRun<'_> {
    type Item = Result<(usize, PathBuf), ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.pages.next()?;
        Some(
            generate_page(self.dataset, &page, &self.options, self.depictor, self.capturer)
                .map(|path| (page.number, path)),
        )
    }
}

/// Partition the dataset per the settings and return the lazy page sequence.
///
/// Resolves the effective display subset once (explicit config, else the
/// dataset-derived default) and reuses it for every page.
pub fn run<'a>(
    dataset: &'a RowDataset,
    config: &GridConfig,
    depictor: &'a dyn Depictor,
    capturer: &'a dyn Capturer,
) -> Result<PageRun<'a>, ConvertError> {
    let pages = paginate::partition(
        dataset.len(),
        config.per_page,
        &config.output_image,
        config.output_html.as_deref(),
        config.output_dir.as_deref(),
    )?;
    let subset = config
        .subset
        .clone()
        .unwrap_or_else(|| dataset.default_subset());
    let options = GridOptions::from_config(config, subset);

    Ok(PageRun {
        dataset,
        options,
        depictor,
        capturer,
        total: pages.len(),
        pages: pages.into_iter(),
    })
}
