#[cfg(feature = "cairo-backend")]
use daychart_rs::api::{BoxStyleSpec, CalendarChart, CalendarConfig, LegendLabels, preset_config};
#[cfg(feature = "cairo-backend")]
use daychart_rs::core::DateInput;
#[cfg(feature = "cairo-backend")]
use daychart_rs::data::{ObservationTable, load_sample_dataset, read_observations_csv};
#[cfg(feature = "cairo-backend")]
use std::fs::{self, File};
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_PATH: &str = "calendar.png";

#[cfg(feature = "cairo-backend")]
#[derive(Debug, Default)]
struct CliArgs {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    preset: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    week_starts_on: Option<String>,
    cmap: Option<String>,
    box_style: Option<String>,
    legend_bins: Option<usize>,
    auto_legend_labels: bool,
    month_grid: bool,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = daychart_rs::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use daychart_rs::render::{CairoRenderer, RenderFrame, Renderer};

    let args = parse_args()?;
    let config = build_config(&args)?;
    let table = load_table(&args)?;

    let chart = CalendarChart::new(config).map_err(|err| format!("invalid config: {err}"))?;
    let dates: Vec<DateInput> = table.date_inputs();
    let layout = chart
        .layout(&dates, &table.values)
        .map_err(|err| format!("layout failed: {err}"))?;

    let viewport = layout.preferred_viewport();
    let width = i32::try_from(viewport.width)
        .map_err(|_| "viewport width overflows i32".to_owned())?;
    let height = i32::try_from(viewport.height)
        .map_err(|_| "viewport height overflows i32".to_owned())?;

    let mut frame = RenderFrame::new(viewport);
    let plot = layout.emit(&mut frame);
    for warning in &plot.warnings {
        eprintln!("warning: {warning}");
    }

    let mut renderer =
        CairoRenderer::new(width, height).map_err(|err| format!("renderer init failed: {err}"))?;
    renderer
        .render(&frame)
        .map_err(|err| format!("render failed: {err}"))?;

    let output_path = args
        .output_path
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            format!("failed to create output dir `{}`: {err}", parent.display())
        })?;
    }
    renderer
        .write_png(&output_path)
        .map_err(|err| format!("{err}"))?;

    println!(
        "rendered {} days over {} weeks ({} to {}) -> {}",
        plot.days.len(),
        plot.total_weeks,
        plot.range.start,
        plot.range.end,
        output_path.display()
    );
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn build_config(args: &CliArgs) -> Result<CalendarConfig, String> {
    let mut config = match (&args.config_path, &args.preset) {
        (Some(_), Some(_)) => {
            return Err("--config and --preset are mutually exclusive".to_owned());
        }
        (Some(path), None) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            CalendarConfig::from_json_compat_str(&raw).map_err(|err| format!("{err}"))?
        }
        (None, Some(name)) => preset_config(name).map_err(|err| format!("{err}"))?,
        (None, None) => CalendarConfig::default(),
    };

    if args.start_date.is_some() || args.end_date.is_some() {
        let start = args.start_date.clone().map(DateInput::from);
        let end = args.end_date.clone().map(DateInput::from);
        let start = start.or_else(|| config.start_date.clone());
        let end = end.or_else(|| config.end_date.clone());
        config = config.with_date_range(start, end);
    }
    if let Some(day) = &args.week_starts_on {
        config = config.with_week_starts_on(day.clone());
    }
    if let Some(cmap) = &args.cmap {
        config = config.with_cmap_name(cmap.clone());
    }
    if let Some(style) = &args.box_style {
        config = config.with_box_style(BoxStyleSpec::named(style.clone()));
    }
    if let Some(bins) = args.legend_bins {
        config = config.with_legend(bins);
    }
    if args.auto_legend_labels {
        let precision = config.legend_labels_precision;
        config = config.with_legend_labels(Some(LegendLabels::Auto), precision);
    }
    if args.month_grid {
        config = config.with_month_grid(None);
    }
    Ok(config)
}

#[cfg(feature = "cairo-backend")]
fn load_table(args: &CliArgs) -> Result<ObservationTable, String> {
    match &args.input_path {
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| format!("failed to open csv `{}`: {err}", path.display()))?;
            read_observations_csv(file).map_err(|err| format!("{err}"))
        }
        None => load_sample_dataset().map_err(|err| format!("{err}")),
    }
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--input" => parsed.input_path = Some(PathBuf::from(value("--input")?)),
            "--output" => parsed.output_path = Some(PathBuf::from(value("--output")?)),
            "--config" => parsed.config_path = Some(PathBuf::from(value("--config")?)),
            "--preset" => parsed.preset = Some(value("--preset")?),
            "--start" => parsed.start_date = Some(value("--start")?),
            "--end" => parsed.end_date = Some(value("--end")?),
            "--week-start" => parsed.week_starts_on = Some(value("--week-start")?),
            "--cmap" => parsed.cmap = Some(value("--cmap")?),
            "--box-style" => parsed.box_style = Some(value("--box-style")?),
            "--legend-bins" => {
                let raw = value("--legend-bins")?;
                let bins = raw
                    .parse::<usize>()
                    .map_err(|err| format!("invalid --legend-bins `{raw}`: {err}"))?;
                parsed.legend_bins = Some(bins);
            }
            "--legend-labels" => parsed.auto_legend_labels = true,
            "--month-grid" => parsed.month_grid = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(parsed)
}

#[cfg(feature = "cairo-backend")]
fn print_usage() {
    println!("{}", usage_message());
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "Usage: cargo run --features cairo-backend --bin render_calendar_png -- [options]\n\nOptions:\n  --input <csv>          `dates,values` CSV (default: bundled sample)\n  --output <path>        PNG output path (default: {DEFAULT_OUTPUT_PATH})\n  --config <json>        Calendar config JSON\n  --preset <name>        Style preset (default, github)\n  --start <YYYY-MM-DD>   First displayed day\n  --end <YYYY-MM-DD>     Last displayed day\n  --week-start <day>     Weekday on the first row (default: Sunday)\n  --cmap <name>          Named colormap, `_r` suffix reverses\n  --box-style <name>     Cell shape (square, circle, round, round4, sawtooth, roundtooth)\n  --legend-bins <n>      Draw a legend with n samples\n  --legend-labels        Label legend samples with rounded values\n  --month-grid           Outline month boundaries\n  -h, --help             Show this message"
    )
}
