//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_data_adapter::JsonDataAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::engine::compute_themes;
use crate::domain::error::ThemarankError;
use crate::domain::metrics::{CalculatedTheme, StockMetrics};
use crate::domain::ranking::rank_trend;
use crate::domain::snapshot::Snapshot;
use crate::domain::window::Window;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "themarank", about = "Momentum metrics and ranking for stock themes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank all themes for a lookback window
    Rank {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long, default_value = "3w")]
        window: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show drill-down detail for one theme
    Show {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        theme: String,
        #[arg(short, long, default_value = "3w")]
        window: String,
    },
    /// Export the calculated record set as JSON
    Export {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show snapshot summary
    Info {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Rank {
            config,
            window,
            limit,
        } => run_rank(&config, &window, limit),
        Command::Show {
            config,
            theme,
            window,
        } => run_show(&config, &theme, &window),
        Command::Export { config, output } => run_export(&config, output.as_ref()),
        Command::Info { config } => run_info(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ThemarankError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn load_snapshot(config: &FileConfigAdapter) -> Result<Snapshot, ExitCode> {
    let adapter = match JsonDataAdapter::from_config(config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };

    let snapshot = match adapter.load_snapshot() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };

    eprintln!(
        "Loaded snapshot: {} stocks, {} themes, {} price series (base date {})",
        snapshot.stocks.len(),
        snapshot.themes.len(),
        snapshot.prices.stock_count(),
        snapshot.base_date,
    );
    Ok(snapshot)
}

fn parse_window(s: &str) -> Result<Window, ExitCode> {
    match Window::parse(s) {
        Some(w) => Ok(w),
        None => {
            eprintln!("error: invalid window {s:?} (expected 3w, 6w or 9w)");
            Err(ExitCode::from(2))
        }
    }
}

fn run_rank(config_path: &PathBuf, window: &str, limit: Option<usize>) -> ExitCode {
    let window = match parse_window(window) {
        Ok(w) => w,
        Err(code) => return code,
    };

    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let snapshot = match load_snapshot(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let mut themes = compute_themes(&snapshot);
    themes.sort_by_key(|t| t.metrics.rank(window));
    if let Some(limit) = limit {
        themes.truncate(limit);
    }

    println!(
        "{:>4}  {:<22} {:>8}  {:>6}  {:<10}  {:>5} {:>5} {:>5}",
        "RANK", "THEME", window.to_string().to_uppercase(), "SPREAD", "STAGE", "3W", "6W", "9W"
    );
    for theme in &themes {
        let m = &theme.metrics;
        println!(
            "{:>4}  {:<22} {:>8}  {:>5}%  {:<10}  {:>5} {:>5} {:>5}",
            m.rank(window),
            theme.name,
            fmt_pct(m.window_return(window)),
            m.max_spread(),
            m.stage.label(),
            ranked_cell(theme, Window::W3),
            ranked_cell(theme, Window::W6),
            ranked_cell(theme, Window::W9),
        );
        if let Some(top) = top_stocks_line(&snapshot, theme, window) {
            println!("      {top}");
        }
    }
    ExitCode::SUCCESS
}

/// Rank plus trend arrow for one window column, e.g. `3↑`.
fn ranked_cell(theme: &CalculatedTheme, window: Window) -> String {
    let rank = theme.metrics.rank(window);
    let arrow = rank_trend(&theme.metrics, window)
        .map(|t| t.arrow())
        .unwrap_or("");
    format!("{rank}{arrow}")
}

/// Top three constituents by the window's return, as one summary line.
fn top_stocks_line(
    snapshot: &Snapshot,
    theme: &CalculatedTheme,
    window: Window,
) -> Option<String> {
    let mut stocks: Vec<(&str, &StockMetrics)> = theme
        .stock_metrics
        .iter()
        .map(|(code, m)| (code.as_str(), m))
        .collect();
    if stocks.is_empty() {
        return None;
    }
    stocks.sort_by(|a, b| b.1.window_return(window).total_cmp(&a.1.window_return(window)));

    let line = stocks
        .iter()
        .take(3)
        .map(|(code, m)| {
            format!(
                "{} {}",
                snapshot.stock_name(code),
                fmt_pct(m.window_return(window))
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    Some(line)
}

fn run_show(config_path: &PathBuf, theme_id: &str, window: &str) -> ExitCode {
    let window = match parse_window(window) {
        Ok(w) => w,
        Err(code) => return code,
    };

    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let snapshot = match load_snapshot(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let themes = compute_themes(&snapshot);
    let theme = match themes.iter().find(|t| t.id == theme_id) {
        Some(t) => t,
        None => {
            let err = ThemarankError::ThemeNotFound {
                id: theme_id.to_string(),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };
    let m = &theme.metrics;

    println!(
        "{} ({})  stage {} ({})",
        theme.name,
        theme.id,
        m.stage.code(),
        m.stage.label()
    );
    println!("Base date: {}", snapshot.base_date);
    println!();

    println!("{:<8} {:>8}  {:>6}  {:>5}", "WINDOW", "RETURN", "SPREAD", "RANK");
    for w in Window::ALL {
        let spread = m
            .spread(w)
            .map(|s| format!("{s}%"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:>8}  {:>6}  {:>5}",
            w.to_string(),
            fmt_pct(m.window_return(w)),
            spread,
            ranked_cell(theme, w),
        );
    }
    println!();

    println!("Leaders:");
    for w in Window::ALL {
        match m.leader(w) {
            Some(code) => {
                let ret = theme
                    .stock_metrics
                    .get(code)
                    .map(|sm| sm.window_return(w))
                    .unwrap_or(0.0);
                println!(
                    "  {:<7} {} ({})  {}",
                    w.to_string(),
                    snapshot.stock_name(code),
                    code,
                    fmt_pct(ret)
                );
            }
            None => println!("  {:<7} -", w.to_string()),
        }
    }
    match &m.leader_volume {
        Some(code) => {
            let avg = theme
                .stock_metrics
                .get(code.as_str())
                .map(|sm| sm.avg_volume_1w)
                .unwrap_or(0.0);
            println!(
                "  {:<7} {} ({})  {}",
                "volume",
                snapshot.stock_name(code),
                code,
                fmt_value(avg)
            );
        }
        None => println!("  {:<7} -", "volume"),
    }
    println!();

    let mut stocks: Vec<(&str, &StockMetrics)> = theme
        .stock_metrics
        .iter()
        .map(|(code, sm)| (code.as_str(), sm))
        .collect();
    stocks.sort_by(|a, b| b.1.window_return(window).total_cmp(&a.1.window_return(window)));

    println!("Constituents (sorted by {window}):");
    println!(
        "{:>3}  {:<8} {:<20} {:>8} {:>8} {:>8}  {:>10}  {:>10}  {:>10}",
        "#", "CODE", "NAME", "3W", "6W", "9W", "VALUE(1W)", "MKT CAP", "REVENUE"
    );
    for (i, &(code, sm)) in stocks.iter().enumerate() {
        let leader_mark = if m.leader(window) == Some(code) { "*" } else { " " };
        println!(
            "{:>3}{} {:<8} {:<20} {:>8} {:>8} {:>8}  {:>10}  {:>10}  {:>10}",
            i + 1,
            leader_mark,
            code,
            snapshot.stock_name(code),
            fmt_pct(sm.return_3w),
            fmt_pct(sm.return_6w),
            fmt_pct(sm.return_9w),
            fmt_value(sm.avg_volume_1w),
            fmt_value(snapshot.market_cap(code)),
            fmt_value(snapshot.revenue(code)),
        );
    }

    ExitCode::SUCCESS
}

fn run_export(config_path: &PathBuf, output: Option<&PathBuf>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let snapshot = match load_snapshot(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let themes = compute_themes(&snapshot);
    eprintln!("Computed metrics for {} themes", themes.len());

    let output = resolve_output(output, &config);
    match JsonReportAdapter.write(&themes, snapshot.base_date, &output) {
        Ok(()) => {
            eprintln!("Report written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Output path precedence: CLI flag, then `[report] output`, then the
/// default `themes.json`.
pub fn resolve_output(output: Option<&PathBuf>, config: &dyn ConfigPort) -> PathBuf {
    if let Some(path) = output {
        return path.clone();
    }
    config
        .get_string("report", "output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("themes.json"))
}

fn run_info(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let snapshot = match load_snapshot(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let with_prices = snapshot
        .stocks
        .keys()
        .filter(|code| snapshot.prices.series(code).is_some())
        .count();
    let mut missing: Vec<&str> = snapshot
        .stocks
        .keys()
        .filter(|code| snapshot.prices.series(code).is_none())
        .map(String::as_str)
        .collect();
    missing.sort_unstable();

    let oldest = snapshot
        .prices
        .codes()
        .filter_map(|code| snapshot.prices.series(code)?.oldest_date())
        .min();
    let latest = snapshot
        .prices
        .codes()
        .filter_map(|code| snapshot.prices.series(code)?.latest_date())
        .max();

    println!("Base date:    {}", snapshot.base_date);
    println!("Stocks:       {}", snapshot.stocks.len());
    println!("Themes:       {}", snapshot.themes.len());
    println!(
        "Price data:   {} of {} stocks",
        with_prices,
        snapshot.stocks.len()
    );
    if let (Some(oldest), Some(latest)) = (oldest, latest) {
        println!("Price range:  {oldest} to {latest}");
    }
    if !missing.is_empty() {
        println!("No history:   {}", missing.join(", "));
    }

    ExitCode::SUCCESS
}

pub fn fmt_pct(value: f64) -> String {
    format!("{value:+.1}%")
}

// KRW units: 조 = 1e12, 억 = 1e8.
pub fn fmt_value(value: f64) -> String {
    if value >= 1e12 {
        format!("{:.1}조", value / 1e12)
    } else if value >= 1e8 {
        format!("{}억", (value / 1e8).round() as i64)
    } else {
        format!("{value:.0}")
    }
}
