use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tempwatch::data::appearance::severity_appearance;
use tempwatch::data::timestamp::format_hours;
use tempwatch::{
    Clock, Dashboard, FileSource, FixedClock, LogSink, Settings, SystemClock, TimeFilter,
};

#[derive(Parser, Debug)]
#[command(name = "tempwatch")]
#[command(about = "Food-safety temperature compliance report for a snapshot of readings")]
struct Args {
    /// Path to the snapshot JSON file (readings + equipment)
    #[arg(short, long, default_value = "snapshot.json")]
    file: PathBuf,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Evaluate as of this local time instead of now (e.g. 2024-05-01T12:00:00)
    #[arg(long, value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    /// Pin the time window: 24h, 7d, 30d or all
    #[arg(long)]
    filter: Option<TimeFilter>,

    /// Focus this equipment id instead of the automatic choice
    #[arg(long)]
    equipment: Option<String>,

    /// Export the evaluated state to a JSON file and exit
    #[arg(short, long, conflicts_with = "watch")]
    export: Option<PathBuf>,

    /// Keep running and re-evaluate whenever the file changes
    #[arg(short, long)]
    watch: bool,

    /// Poll interval in seconds for --watch (overrides settings)
    #[arg(short, long)]
    refresh: Option<u64>,
}

fn parse_now(s: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| {
            format!(
                "invalid date-time: {} (expected YYYY-MM-DDTHH:MM[:SS])",
                s
            )
        })
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(refresh) = args.refresh {
        settings.refresh_secs = refresh;
    }

    let clock: Arc<dyn Clock> = match args.now {
        Some(now) => Arc::new(FixedClock::new(now)),
        None => Arc::new(SystemClock),
    };

    let source = Box::new(FileSource::new(&args.file));
    let mut dashboard = Dashboard::new(source, clock, &settings, Box::new(LogSink));
    if let Some(filter) = args.filter {
        dashboard.choose_filter(filter);
    }
    if let Some(id) = args.equipment {
        dashboard.choose_equipment(id);
    }

    if args.watch {
        return run_watch(dashboard, &settings);
    }

    if !dashboard.reload_data()? {
        let reason = dashboard.load_error().unwrap_or("no data").to_string();
        anyhow::bail!("{}: {}", dashboard.source_description(), reason);
    }

    if let Some(export_path) = args.export {
        return export_to_file(&dashboard, &export_path);
    }

    print_report(&dashboard);
    Ok(())
}

/// Poll the file on the refresh interval until interrupted.
fn run_watch(mut dashboard: Dashboard, settings: &Settings) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let refresh = settings.refresh_interval();
    info!(
        "Watching {} every {:?}",
        dashboard.source_description(),
        refresh
    );

    rt.block_on(async {
        let mut ticker = tokio::time::interval(refresh);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match dashboard.reload_data() {
                        Ok(true) => print_report(&dashboard),
                        Ok(false) => dashboard.refresh(),
                        Err(e) => error!("Reload failed: {:#}", e),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, exiting");
                    break;
                }
            }
        }
    });

    Ok(())
}

fn print_report(dashboard: &Dashboard) {
    let Some(report) = dashboard.report() else {
        return;
    };

    println!(
        "{} at {}",
        dashboard.source_description(),
        report.generated_at.format("%Y-%m-%d %H:%M")
    );
    println!(
        "Window: {} ({})  readings: {} of {}  excluded: {}",
        report.filter,
        if dashboard.is_filter_manual() { "manual" } else { "auto" },
        report.readings_in_window,
        report.total_readings,
        report.excluded.len()
    );

    println!("\nEquipment");
    for row in &report.equipment {
        let selected = dashboard.selected_equipment() == Some(row.id.as_str());
        let marker = if selected { ">" } else { " " };
        let latest = row
            .status
            .latest_celsius()
            .map(|c| format!("{:.1}°C", c))
            .unwrap_or_default();
        println!(
            "{} {:<4} {:<20} {:<18} {:<16} {}",
            marker,
            row.status.symbol(),
            row.name,
            row.equipment_type.label(),
            row.location.as_deref().unwrap_or("-"),
            latest
        );
    }

    if !report.food.is_empty() {
        println!("\nFood");
        for verdict in &report.food {
            println!(
                "  {:<6} {:<20} {:<12} {:>6.1}°C  {}  {}",
                verdict.level.symbol(),
                verdict.label,
                verdict.location.as_deref().unwrap_or("-"),
                verdict.celsius,
                verdict.recorded_at.format("%m-%d %H:%M"),
                verdict.message
            );
        }
    }

    if let Some(chart) = &report.chart {
        let sampled = &chart.sampled;
        let span = match (sampled.series.first(), sampled.series.last()) {
            (Some(first), Some(last)) => format_hours(
                (last.timestamp - first.timestamp).num_minutes() as f64 / 60.0,
            ),
            _ => "-".to_string(),
        };
        println!(
            "\nChart: {}  {} of {} points (every {}), spanning {}, {:?}",
            chart.equipment_id,
            sampled.series.len(),
            sampled.original_len,
            sampled.sample_rate,
            span,
            sampled.hints.density
        );
    }

    if !dashboard.warnings().is_empty() {
        println!("\nWarnings");
        for warning in dashboard.warnings() {
            let action = warning
                .action
                .as_ref()
                .map(|a| format!("  [{} -> {}]", a.label, a.route))
                .unwrap_or_default();
            println!(
                "  {:<4} {}: {}{}  ({})",
                warning.severity.symbol(),
                warning.title,
                warning.message,
                action,
                severity_appearance(warning.severity).color
            );
        }
    }
}

/// Export the current state to a JSON file.
fn export_to_file(dashboard: &Dashboard, export_path: &Path) -> Result<()> {
    let json = dashboard.export_json()?;
    std::fs::write(export_path, json)?;

    println!("Exported compliance state to: {}", export_path.display());
    Ok(())
}
