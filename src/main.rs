use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use opgraph::fragment::{
    make_axis, make_mark, make_scale, AxisOptions, FieldBindings, MarkOptions, ScaleDomain,
    ScaleOptions, ScaleRange,
};
use opgraph::{compile_spec, ChartSpec, MarkType, Theme, ThemeOverrides};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "opgraph")]
#[command(about = "Compile design tokens into Vega chart specifications", long_about = None)]
struct Args {
    /// JSON file with theme overrides (e.g. '{"layout": {"width": 640}}')
    #[arg(long, global = true)]
    overrides: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved theme as JSON
    Theme,
    /// Print a single-series chart specification
    Chart(ChartArgs),
}

#[derive(clap::Args, Debug)]
struct ChartArgs {
    /// Data source name the mark reads from
    #[arg(long, default_value = "table")]
    data: String,
    /// Optional URL emitted as the data source definition
    #[arg(long)]
    url: Option<String>,
    /// Field bound to x
    #[arg(long)]
    x: String,
    /// Field bound to y
    #[arg(long)]
    y: String,
    /// Mark type: line, area, bar, point or rect
    #[arg(long, default_value = "line")]
    mark: String,
    /// x scale type (defaults to band for bar/rect, time otherwise)
    #[arg(long)]
    x_type: Option<String>,
    /// y scale type (defaults to band for rect, linear otherwise)
    #[arg(long)]
    y_type: Option<String>,
    #[arg(long)]
    x_title: Option<String>,
    #[arg(long)]
    y_title: Option<String>,
    /// Series color (defaults to the first palette color)
    #[arg(long)]
    color: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let theme = load_theme(args.overrides.as_deref())?;

    let output = match args.command {
        Command::Theme => {
            serde_json::to_string_pretty(&theme).context("Failed to serialize theme")?
        }
        Command::Chart(chart) => build_chart(&theme, chart)?
            .to_json_pretty()
            .context("Failed to serialize chart specification")?,
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{output}").context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}

fn load_theme(path: Option<&Path>) -> Result<Theme> {
    let Some(path) = path else {
        return Ok(Theme::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read overrides from {}", path.display()))?;
    let overrides = ThemeOverrides::from_json_str(&raw)?;
    Theme::with_overrides(&overrides).context("Failed to apply theme overrides")
}

fn build_chart(theme: &Theme, args: ChartArgs) -> Result<opgraph::Document> {
    let mark: MarkType = args.mark.parse()?;
    let banded_x = matches!(mark, MarkType::Bar | MarkType::Rect);

    let x_type = args
        .x_type
        .unwrap_or_else(|| if banded_x { "band" } else { "time" }.to_string());
    let y_type = args
        .y_type
        .unwrap_or_else(|| if mark == MarkType::Rect { "band" } else { "linear" }.to_string());

    let mut x_scale = ScaleOptions::new(
        "x",
        x_type,
        ScaleRange::width(),
        ScaleDomain::data(&args.data, &args.x),
    );
    if banded_x {
        x_scale = x_scale.option("padding", 0.1);
    }
    let mut y_scale = ScaleOptions::new(
        "y",
        y_type.as_str(),
        ScaleRange::height(),
        ScaleDomain::data(&args.data, &args.y),
    );
    if y_type == "linear" {
        // bars and areas need a zero baseline; lines and points hug the data
        let zero = matches!(mark, MarkType::Bar | MarkType::Area);
        y_scale = y_scale.option("nice", true).option("zero", zero);
    }

    let mut x_axis = AxisOptions::bottom("x");
    x_axis.title = args.x_title;
    let mut y_axis = AxisOptions::left("y");
    y_axis.title = args.y_title;

    let mut mark_options = MarkOptions::new(mark, &args.data, FieldBindings::new(&args.x, &args.y));
    mark_options.color = args.color;

    let mut spec = ChartSpec::new()
        .scale(make_scale(theme, &x_scale)?)
        .scale(make_scale(theme, &y_scale)?)
        .axis(make_axis(theme, &x_axis)?)
        .axis(make_axis(theme, &y_axis)?)
        .mark(make_mark(theme, &mark_options)?);
    if let Some(url) = args.url {
        spec = spec.data(json!({ "name": args.data, "url": url }));
    }

    Ok(compile_spec(theme, spec)?)
}
