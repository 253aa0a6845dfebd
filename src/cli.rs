use crate::config::{Config, load_config};
use crate::ir::{Entity, Filters, load_entities, parse_entities};
use crate::layout::{
    LayoutParams, TimelineLayout, category_views, compute_canvas_size, compute_stats,
    compute_timeline_layout,
};
use crate::layout_dump::write_layout_dump;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "stl", version, about = "Timeline sankey layout and SVG renderer")]
pub struct Args {
    /// Input data file (.json / .json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, layout)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width, or the width of one page in mobile mode
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f64,

    /// Canvas height. Derived from the dataset's year span if omitted.
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Narrow nodes, one page per category
    #[arg(long)]
    pub mobile: bool,

    /// Route cross-category influence links
    #[arg(long = "cross-links")]
    pub cross_links: bool,

    /// Exclude entities starting before this year
    #[arg(long = "from", requires = "to_year")]
    pub from_year: Option<f64>,

    /// Exclude entities finishing after this year
    #[arg(long = "to", requires = "from_year")]
    pub to_year: Option<f64>,

    /// Exclude entities carrying a facet value, as `facet=title` (repeatable)
    #[arg(long = "exclude", value_parser = parse_exclusion)]
    pub exclude: Vec<(String, String)>,

    /// Year that open-ended entities are truncated at
    #[arg(long = "present-year")]
    pub present_year: Option<f64>,

    /// Log layout diagnostics to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    let entities = read_input(args.input.as_deref())?;
    let layout = layout_from_args(&args, &entities, &config);
    config.render.width = layout.width as f32;
    config.render.height = layout.height as f32;

    match args.output_format {
        OutputFormat::Json => write_layout_dump(args.output.as_deref(), &layout)?,
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => write_png(&layout, &config, args.output.as_deref())?,
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn layout_from_args(args: &Args, entities: &[Entity], config: &Config) -> TimelineLayout {
    let year_height = config.layout.year_height_for(args.mobile);
    let canvas = compute_canvas_size(
        entities,
        year_height,
        args.present_year,
        config.layout.year_step,
    );
    let (min_year, max_year, canvas_height) = canvas
        .map(|size| (size.min_year, size.max_year, size.canvas_height))
        .unwrap_or((0.0, 0.0, year_height));

    let width = if args.mobile {
        let pages = category_views(&compute_stats(entities)).len().max(1);
        args.width * pages as f64
    } else {
        args.width
    };

    let params = LayoutParams {
        min_year,
        max_year,
        width,
        height: args.height.unwrap_or(canvas_height),
        is_mobile: args.mobile,
        show_cross_links: args.cross_links,
    };
    let filters = filters_from_args(args);
    compute_timeline_layout(
        entities,
        &params,
        filters.as_ref(),
        &config.theme,
        &config.layout,
    )
}

fn filters_from_args(args: &Args) -> Option<Filters> {
    let mut filters = Filters {
        year_range: args.from_year.zip(args.to_year),
        ..Default::default()
    };
    for (facet, title) in &args.exclude {
        filters.exclude(facet, title);
    }
    (!filters.is_empty()).then_some(filters)
}

fn parse_exclusion(raw: &str) -> Result<(String, String), String> {
    let (facet, title) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `facet=title`, got `{raw}`"))?;
    let (facet, title) = (facet.trim(), title.trim());
    if facet.is_empty() || title.is_empty() {
        return Err(format!("expected `facet=title`, got `{raw}`"));
    }
    Ok((facet.to_string(), title.to_string()))
}

fn read_input(path: Option<&Path>) -> Result<Vec<Entity>> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(load_entities(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(parse_entities(&buf)?)
}

#[cfg(feature = "png")]
fn write_png(layout: &TimelineLayout, config: &Config, output: Option<&Path>) -> Result<()> {
    let output = output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
    let svg = render_svg(layout, &config.theme, &config.layout);
    write_output_png(&svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_layout: &TimelineLayout, _config: &Config, _output: Option<&Path>) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}
