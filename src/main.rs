use anyhow::bail;
use clap::Parser;
use molshot::config::{self, CliValues, FileConfig};
use molshot::depict::NotationDepictor;
use molshot::screenshot::ChromeCapturer;
use molshot::{convert, dataset, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "molshot")]
#[command(version)]
#[command(about = "Render a molecule CSV as grid images via headless Chrome")]
#[command(long_about = "\
Render a molecule CSV as grid images via headless Chrome

Each data row becomes one grid cell: a 2D structure depiction derived from
the structure column, plus any metadata columns selected with --subset.
With --per-page the table is split into page-sized chunks, one output image
per page, numbered result_01.png, result_02.png, ...

Every option can also be set in a JSON config file (--config) using the
option's name with dashes as underscores, e.g. {\"n_cols\": 4}. Explicit
command-line values win over config file values, which win over defaults.
The input path may come from the config file as \"input_csv\".")]
struct Cli {
    /// Path to the input CSV file (or set "input_csv" in the config file)
    input_csv: Option<PathBuf>,

    /// Path to the output PNG file [default: result.png]
    #[arg(short, long = "output")]
    output: Option<PathBuf>,

    /// Keep the intermediate HTML at this path
    #[arg(long)]
    output_html: Option<PathBuf>,

    /// Directory to place all output files in (created if missing)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Column holding the structure line notation [default: smiles]
    #[arg(long)]
    smiles_col: Option<String>,

    /// Metadata column to display in each cell (repeatable)
    #[arg(long)]
    subset: Option<Vec<String>>,

    /// Number of grid columns [default: 5]
    #[arg(long)]
    n_cols: Option<u32>,

    /// Cell width in pixels [default: 150]
    #[arg(short = 'w', long)]
    cell_width: Option<u32>,

    /// Cell height in pixels [default: 150]
    #[arg(long)]
    cell_height: Option<u32>,

    /// Font size in pixels [default: 12]
    #[arg(long)]
    fontsize: Option<u32>,

    /// Sort each page's rows by this column
    #[arg(long)]
    sort_by: Option<String>,

    /// Strip explicit hydrogens before depiction
    #[arg(long)]
    remove_hs: bool,

    /// Reuse 2D coordinates present in the input
    #[arg(long)]
    use_coords: bool,

    /// Use template-based coordinate generation
    #[arg(long)]
    coord_gen: bool,

    /// CSS border for grid cells, e.g. "1px solid black"
    #[arg(long)]
    border: Option<String>,

    /// Gap between cells in pixels
    #[arg(long)]
    gap: Option<u32>,

    /// Font family for cell text
    #[arg(long)]
    font_family: Option<String>,

    /// Text alignment inside cells (left, center, right)
    #[arg(long)]
    text_align: Option<String>,

    /// Split output into pages of this many rows
    #[arg(short, long)]
    per_page: Option<u32>,

    /// Transparent page and depiction background
    #[arg(short, long)]
    transparent: bool,
}

impl Cli {
    /// Only explicitly supplied values; boolean flags count as supplied only
    /// when set, so an omitted flag never shadows a config-file value.
    fn into_values(self) -> (CliValues, Option<PathBuf>) {
        let config_path = self.config;
        let values = CliValues {
            input_csv: self.input_csv,
            output_image: self.output,
            output_html: self.output_html,
            output_dir: self.output_dir,
            smiles_col: self.smiles_col,
            n_cols: self.n_cols,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            fontsize: self.fontsize,
            subset: self.subset,
            sort_by: self.sort_by,
            remove_hs: self.remove_hs.then_some(true),
            use_coords: self.use_coords.then_some(true),
            coord_gen: self.coord_gen.then_some(true),
            border: self.border,
            gap: self.gap,
            fontfamily: self.font_family,
            text_align: self.text_align,
            per_page: self.per_page,
            transparent: self.transparent.then_some(true),
        };
        (values, config_path)
    }
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (values, config_path) = cli.into_values();

    let file_config = match &config_path {
        Some(path) => config::load_file_config(path)?,
        None => FileConfig::default(),
    };

    let resolution = config::resolve(values, file_config);
    for warning in &resolution.warnings {
        output::warn(warning);
    }

    let Some(input_csv) = resolution.input_csv else {
        bail!("input_csv must be provided via an argument or the config file");
    };

    output::announce_input(&input_csv);
    let data = dataset::load(&input_csv)?;

    if data.is_empty() {
        output::warn(&format!(
            "no data rows in {}; nothing to generate",
            input_csv.display()
        ));
        return Ok(());
    }
    data.require_column(&resolution.config.smiles_col)?;

    output::status("Generating grid image(s)...");
    let depictor = NotationDepictor;
    let capturer = ChromeCapturer::default();
    let pages = convert::run(&data, &resolution.config, &depictor, &capturer)?;
    let bar = output::page_progress(pages.total_pages() as u64);
    let mut produced = Vec::with_capacity(pages.total_pages());
    for result in pages {
        let (number, path) = result?;
        produced.push((number, path));
        bar.inc(1);
    }
    bar.finish_and_clear();
    output::print_summary(&produced);

    Ok(())
}
