//! Element screenshot capture via headless Chrome.
//!
//! The capturer contract is narrow: given an HTML file and a CSS selector,
//! produce a cropped raster of that one element. Each capture owns a fresh,
//! exclusive browser session — the grid pipeline is strictly one page at a
//! time, so there is nothing to pool. The capture blocks until navigation
//! settles and the element is located; no retries, and no timeout beyond
//! what the browser library enforces internally.
//!
//! [`Capturer`] is the seam the pipeline depends on. Tests stub it to
//! exercise pagination and file handling without launching Chrome; the real
//! implementation is [`ChromeCapturer`].

use headless_chrome::protocol::cdp::DOM::RGBA;
use headless_chrome::protocol::cdp::Emulation::SetDefaultBackgroundColorOverride;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// CSS selector for the grid container element.
pub const DEFAULT_SELECTOR: &str = "#mols2grid";

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("HTML file not found: {0}")]
    HtmlNotFound(PathBuf),
    #[error("element not found: {0}")]
    ElementNotFound(String),
    #[error("browser error: {0}")]
    Browser(anyhow::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<anyhow::Error> for CaptureError {
    fn from(err: anyhow::Error) -> Self {
        CaptureError::Browser(err)
    }
}

/// Captures a cropped raster of one element in an HTML file.
pub trait Capturer {
    fn capture(
        &self,
        html_file: &Path,
        output_image: &Path,
        selector: &str,
        omit_background: bool,
    ) -> Result<PathBuf, CaptureError>;
}

/// Real capturer: launches headless Chrome, loads the file, screenshots the
/// selected element as PNG.
#[derive(Debug, Clone, Copy)]
pub struct ChromeCapturer {
    /// Browser viewport. Must be at least as large as the grid element, or
    /// the capture clips to the viewport.
    pub window_size: (u32, u32),
}

impl Default for ChromeCapturer {
    fn default() -> Self {
        Self {
            window_size: (1600, 1200),
        }
    }
}

impl Capturer for ChromeCapturer {
    fn capture(
        &self,
        html_file: &Path,
        output_image: &Path,
        selector: &str,
        omit_background: bool,
    ) -> Result<PathBuf, CaptureError> {
        if !html_file.exists() {
            return Err(CaptureError::HtmlNotFound(html_file.to_path_buf()));
        }
        let html_file = html_file.canonicalize()?;

        let browser = Browser::new(LaunchOptions {
            window_size: Some(self.window_size),
            ..Default::default()
        })?;
        let tab = browser.new_tab()?;

        if omit_background {
            // Fully transparent default background, so alpha from the page
            // CSS survives into the PNG.
            tab.call_method(SetDefaultBackgroundColorOverride {
                color: Some(RGBA {
                    r: 0,
                    g: 0,
                    b: 0,
                    a: Some(0.0),
                }),
            })?;
        }

        tab.navigate_to(&format!("file://{}", html_file.display()))?;
        tab.wait_until_navigated()?;

        let element = tab
            .wait_for_element(selector)
            .map_err(|_| CaptureError::ElementNotFound(selector.to_string()))?;
        let png = element.capture_screenshot(CaptureScreenshotFormatOption::Png)?;
        fs::write(output_image, &png)?;

        Ok(output_image.to_path_buf())
    }
}
