use crate::store::{DataSource, DEFAULT_DATA_SOURCE};
use crate::utils::Result;
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="prsviz",
          version=&**FULL_VERSION,
          about="Look up variants by gene name or SNP ID and bucket their summed effect sizes",
          long_about = None,
          disable_help_subcommand = true,
          after_help = "The reported score is a placeholder sum of effect sizes; it is not a
validated polygenic risk score and must not be used for diagnostic purposes.",
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(global = true)]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Look up a single gene or SNP")]
    Query(QueryArgs),
    #[clap(about = "Interactive lookup session")]
    Shell(ShellArgs),
    #[clap(about = "Variant dataset checker")]
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct QueryArgs {
    #[clap(required = true)]
    #[clap(value_name = "QUERY")]
    #[clap(help = "Gene name (e.g. SERPINA1) or SNP ID (e.g. rs28929474)")]
    pub query: String,

    #[clap(short = 'd')]
    #[clap(long = "data")]
    #[clap(help = "JSON variant dataset: file path (optionally .gz) or http(s) URL")]
    #[clap(value_name = "DATA")]
    #[clap(default_value = DEFAULT_DATA_SOURCE)]
    #[arg(value_parser = parse_data_source)]
    pub data: DataSource,

    #[clap(short = 'c')]
    #[clap(long = "chart")]
    #[clap(help = "Output path of the score chart (.svg, .png or .pdf)")]
    #[clap(value_name = "IMAGE")]
    #[arg(value_parser = check_image_path)]
    pub chart_path: Option<PathBuf>,

    #[clap(help_heading("Output"))]
    #[clap(long = "html")]
    #[clap(help = "Also write the result table as an HTML page")]
    #[clap(value_name = "HTML")]
    #[arg(value_parser = check_prefix_path)]
    pub html_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ShellArgs {
    #[clap(short = 'd')]
    #[clap(long = "data")]
    #[clap(help = "JSON variant dataset: file path (optionally .gz) or http(s) URL")]
    #[clap(value_name = "DATA")]
    #[clap(default_value = DEFAULT_DATA_SOURCE)]
    #[arg(value_parser = parse_data_source)]
    pub data: DataSource,

    #[clap(help_heading("Output"))]
    #[clap(long = "chart-dir")]
    #[clap(help = "Directory receiving one <GENE>.svg chart per successful query")]
    #[clap(value_name = "DIR")]
    #[arg(value_parser = check_dir_exists)]
    pub chart_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[clap(short = 'd')]
    #[clap(long = "data")]
    #[clap(help = "JSON variant dataset: file path (optionally .gz) or http(s) URL")]
    #[clap(value_name = "DATA")]
    #[clap(default_value = DEFAULT_DATA_SOURCE)]
    #[arg(value_parser = parse_data_source)]
    pub data: DataSource,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn parse_data_source(s: &str) -> Result<DataSource> {
    DataSource::parse(s)
}

fn check_prefix_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}

fn check_image_path(s: &str) -> Result<PathBuf> {
    let path = check_prefix_path(s)?;
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("svg") | Some("png") | Some("pdf") => Ok(path),
        _ => Err("Image must have an extension of .svg, .png, or .pdf".to_string()),
    }
}

fn check_dir_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.is_dir() {
        Err(format!("Directory does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}
