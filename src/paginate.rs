//! Batch partitioning: page-sized row ranges and collision-free file naming.
//!
//! A run produces one output image per page. With a single page the
//! configured output path is used verbatim; with N > 1 pages every path gets
//! a 1-based, zero-padded suffix whose width is the digit count of N, so a
//! 36-row table at 2 rows per page yields `result_01.png` … `result_18.png`
//! and the names sort in page order. Re-running with the same inputs derives
//! the same names, so an interrupted batch can be re-run over its own output.
//!
//! An `output_dir` override relocates only the file *name* of each output
//! under the override directory (created first, parents included); the
//! directory part of the configured path is discarded.

use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// One page of the batch: a contiguous row range and where its files go.
///
/// Created by [`partition`], consumed once by the per-page generator, not
/// persisted beyond the run.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    /// 1-based page number.
    pub number: usize,
    /// Row range `[start, end)` into the dataset, in original order.
    pub start: usize,
    pub end: usize,
    /// Where the rendered raster for this page is written.
    pub output_image: PathBuf,
    /// Retained intermediate HTML path, when the caller asked for one.
    pub output_html: Option<PathBuf>,
}

impl PageDescriptor {
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split `total_rows` into pages and derive each page's output paths.
///
/// `per_page` values of `None` or `0` mean "no pagination": everything lands
/// on a single page named by the original path. `output_dir`, when set, is
/// created (with parents) before any page path is derived.
pub fn partition(
    total_rows: usize,
    per_page: Option<u32>,
    output_image: &Path,
    output_html: Option<&Path>,
    output_dir: Option<&Path>,
) -> io::Result<Vec<PageDescriptor>> {
    let output_image = match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            relocate(output_image, dir)
        }
        None => output_image.to_path_buf(),
    };
    let output_html = match (output_html, output_dir) {
        (Some(html), Some(dir)) => Some(relocate(html, dir)),
        (Some(html), None) => Some(html.to_path_buf()),
        (None, _) => None,
    };

    // Callers short-circuit empty datasets before partitioning; returning no
    // pages keeps the arithmetic below free of a zero divisor regardless.
    if total_rows == 0 {
        return Ok(Vec::new());
    }

    let page_size = match per_page {
        Some(n) if n > 0 => n as usize,
        _ => total_rows,
    };
    let total_pages = total_rows.div_ceil(page_size);
    let width = total_pages.to_string().len();

    let mut pages = Vec::with_capacity(total_pages);
    for number in 1..=total_pages {
        let start = (number - 1) * page_size;
        let end = (start + page_size).min(total_rows);
        let (image, html) = if total_pages == 1 {
            (output_image.clone(), output_html.clone())
        } else {
            (
                suffixed(&output_image, number, width),
                output_html.as_deref().map(|h| suffixed(h, number, width)),
            )
        };
        pages.push(PageDescriptor {
            number,
            start,
            end,
            output_image: image,
            output_html: html,
        });
    }
    Ok(pages)
}

/// Move only the file name of `path` under `dir`.
fn relocate(path: &Path, dir: &Path) -> PathBuf {
    match path.file_name() {
        Some(name) => dir.join(name),
        None => dir.to_path_buf(),
    }
}

/// `result.png` + page 3 of 18 → `result_03.png`, same directory.
fn suffixed(path: &Path, number: usize, width: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{number:0width$}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{number:0width$}"),
    };
    path.with_file_name(name)
}
