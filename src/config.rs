//! Grid configuration: defaults, JSON config files, and CLI merging.
//!
//! Every tunable parameter lives in [`GridConfig`], which is resolved exactly
//! once per invocation from three layers, in strict priority order:
//!
//! ```text
//! 1. CLI values        (explicitly supplied flags always win)
//! 2. JSON config file  (-c/--config)
//! 3. Built-in defaults (GridConfig::default())
//! ```
//!
//! The precedence is per-field: an unset CLI option is indistinguishable from
//! "not provided" and never shadows a config-file value. To keep that true,
//! defaults live here and **not** in the clap definitions — a clap default
//! would make every flag look explicitly supplied.
//!
//! ## Config File Format
//!
//! A JSON object whose keys mirror the [`GridConfig`] field names, plus the
//! special pass-through key `input_csv`:
//!
//! ```json
//! {
//!     "input_csv": "molecules.csv",
//!     "output_image": "grid.png",
//!     "n_cols": 4,
//!     "subset": ["ccd", "name"],
//!     "transparent": true
//! }
//! ```
//!
//! Unknown keys are warned about and ignored, not rejected — a config file
//! shared with other tools keeps working here.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {0} does not exist")]
    NotFound(PathBuf),
    #[error("invalid JSON in config file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid JSON in config file {0}: top-level value must be an object")]
    NotAnObject(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable settings record for one grid-image run.
///
/// Constructed once via [`resolve`] and never mutated afterward; downstream
/// code only ever borrows it. `Option` fields carry meaning in their absence:
/// `None` means "no filter/sort/override applied", not "unresolved".
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    // I/O
    pub output_image: PathBuf,
    pub output_html: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,

    // Grid layout
    pub smiles_col: String,
    pub n_cols: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub fontsize: u32,
    pub subset: Option<Vec<String>>,

    // Molecule display
    pub sort_by: Option<String>,
    pub remove_hs: Option<bool>,
    pub use_coords: Option<bool>,
    pub coord_gen: Option<bool>,

    // Cell styling
    pub border: Option<String>,
    pub gap: Option<u32>,
    pub fontfamily: Option<String>,
    pub text_align: Option<String>,

    // Pagination & output
    pub per_page: Option<u32>,
    pub transparent: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            output_image: PathBuf::from("result.png"),
            output_html: None,
            output_dir: None,
            smiles_col: "smiles".to_string(),
            n_cols: 5,
            cell_width: 150,
            cell_height: 150,
            fontsize: 12,
            subset: None,
            sort_by: None,
            remove_hs: None,
            use_coords: None,
            coord_gen: None,
            border: None,
            gap: None,
            fontfamily: None,
            text_align: None,
            per_page: None,
            transparent: false,
        }
    }
}

impl GridConfig {
    /// Cell dimensions as a `(width, height)` pair.
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }
}

/// CLI-supplied values. `None` means the user did not pass the flag.
///
/// Built by `main` from the parsed clap arguments; kept separate from the
/// clap struct so the merge logic stays testable without argv plumbing.
#[derive(Debug, Clone, Default)]
pub struct CliValues {
    pub input_csv: Option<PathBuf>,
    pub output_image: Option<PathBuf>,
    pub output_html: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub smiles_col: Option<String>,
    pub n_cols: Option<u32>,
    pub cell_width: Option<u32>,
    pub cell_height: Option<u32>,
    pub fontsize: Option<u32>,
    pub subset: Option<Vec<String>>,
    pub sort_by: Option<String>,
    pub remove_hs: Option<bool>,
    pub use_coords: Option<bool>,
    pub coord_gen: Option<bool>,
    pub border: Option<String>,
    pub gap: Option<u32>,
    pub fontfamily: Option<String>,
    pub text_align: Option<String>,
    pub per_page: Option<u32>,
    pub transparent: Option<bool>,
}

/// JSON config file contents. All fields optional; a JSON `null` is treated
/// the same as an absent key. String values for path fields deserialize
/// straight to `PathBuf` — no other coercion happens.
///
/// Keys that match no field are collected into `unknown` (via flatten) so
/// [`resolve`] can warn about them instead of serde rejecting the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub input_csv: Option<PathBuf>,
    pub output_image: Option<PathBuf>,
    pub output_html: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub smiles_col: Option<String>,
    pub n_cols: Option<u32>,
    pub cell_width: Option<u32>,
    pub cell_height: Option<u32>,
    pub fontsize: Option<u32>,
    pub subset: Option<Vec<String>>,
    pub sort_by: Option<String>,
    pub remove_hs: Option<bool>,
    pub use_coords: Option<bool>,
    pub coord_gen: Option<bool>,
    pub border: Option<String>,
    pub gap: Option<u32>,
    pub fontfamily: Option<String>,
    pub text_align: Option<String>,
    pub per_page: Option<u32>,
    pub transparent: Option<bool>,
    #[serde(flatten)]
    pub unknown: serde_json::Map<String, serde_json::Value>,
}

/// Result of the three-layer merge.
pub struct ConfigResolution {
    /// The fully-resolved, frozen settings record.
    pub config: GridConfig,
    /// Input table path, if supplied via CLI or the `input_csv` config key.
    pub input_csv: Option<PathBuf>,
    /// One message per unknown config-file key, sorted by key. Emitted by the
    /// caller through the single diagnostics channel ([`crate::output::warn`]).
    pub warnings: Vec<String>,
}

/// Load and parse a JSON config file.
///
/// Errors when the file does not exist, is not valid JSON, has a non-object
/// top-level value, or has a recognized key with a value of the wrong type.
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    if !value.is_object() {
        return Err(ConfigError::NotAnObject(path.to_path_buf()));
    }
    serde_json::from_value(value).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge CLI values, file config, and defaults into a [`GridConfig`].
///
/// Priority per field: CLI > config file > default. Each field resolves
/// independently — a CLI value for one field never affects where another
/// field resolves from.
pub fn resolve(cli: CliValues, file: FileConfig) -> ConfigResolution {
    let mut warnings: Vec<String> = file
        .unknown
        .keys()
        .map(|key| format!("Unknown config key ignored: '{key}'"))
        .collect();
    warnings.sort();

    let d = GridConfig::default();
    let config = GridConfig {
        output_image: cli
            .output_image
            .or(file.output_image)
            .unwrap_or(d.output_image),
        output_html: cli.output_html.or(file.output_html),
        output_dir: cli.output_dir.or(file.output_dir),
        smiles_col: cli.smiles_col.or(file.smiles_col).unwrap_or(d.smiles_col),
        n_cols: cli.n_cols.or(file.n_cols).unwrap_or(d.n_cols),
        cell_width: cli.cell_width.or(file.cell_width).unwrap_or(d.cell_width),
        cell_height: cli
            .cell_height
            .or(file.cell_height)
            .unwrap_or(d.cell_height),
        fontsize: cli.fontsize.or(file.fontsize).unwrap_or(d.fontsize),
        subset: cli.subset.or(file.subset),
        sort_by: cli.sort_by.or(file.sort_by),
        remove_hs: cli.remove_hs.or(file.remove_hs),
        use_coords: cli.use_coords.or(file.use_coords),
        coord_gen: cli.coord_gen.or(file.coord_gen),
        border: cli.border.or(file.border),
        gap: cli.gap.or(file.gap),
        fontfamily: cli.fontfamily.or(file.fontfamily),
        text_align: cli.text_align.or(file.text_align),
        per_page: cli.per_page.or(file.per_page),
        transparent: cli
            .transparent
            .or(file.transparent)
            .unwrap_or(d.transparent),
    };

    ConfigResolution {
        config,
        input_csv: cli.input_csv.or(file.input_csv),
        warnings,
    }
}
