//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_catalog::{self, CatalogFile};
use crate::adapters::synthetic_source::{DEFAULT_SEED, SyntheticSource};
use crate::adapters::ticker_source::TickerSource;
use crate::adapters::whitelist::{
    render_category_breakdown, render_pair_whitelist, render_ranking_table,
};
use crate::domain::catalog::CategoryWeights;
use crate::domain::criteria::SelectionCriteria;
use crate::domain::error::PairsiftError;
use crate::domain::indicator::atr::{
    ATR_PERIOD, ATR_ROI_MULTIPLIER, ATR_STOPLOSS_MULTIPLIER, TradeSide, atr_stop_price,
    atr_target_price, calculate_atr, relative_distance,
};
use crate::domain::indicator::camarilla::calculate_camarilla;
use crate::domain::indicator::filters::{TREND_EMA_PERIOD, trend_filter};
use crate::domain::indicator::pivot::{calculate_pivot, calculate_pivot_range};
use crate::domain::indicator::{CamarillaScaling, IndicatorValue};
use crate::domain::select::scored::select_by_score;
use crate::domain::select::weighted::select_weighted;
use crate::ports::metrics_port::MetricsPort;

#[derive(Parser, Debug)]
#[command(name = "pairsift", about = "Trading pair selection and scoring toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Seeded synthetic metrics, fully offline
    Synthetic,
    /// Exchange ticker dump (requires --tickers)
    Tickers,
    /// Live CoinGecko markets endpoint
    Coingecko,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScalingArg {
    Classic,
    RangeDoubling,
}

impl From<ScalingArg> for CamarillaScaling {
    fn from(arg: ScalingArg) -> Self {
        match arg {
            ScalingArg::Classic => CamarillaScaling::Classic,
            ScalingArg::RangeDoubling => CamarillaScaling::RangeDoubling,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    Long,
    Short,
}

impl From<SideArg> for TradeSide {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Long => TradeSide::Long,
            SideArg::Short => TradeSide::Short,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Select pairs by category weights
    Select {
        #[arg(short, long)]
        catalog: PathBuf,
        #[arg(short = 'n', long)]
        max_pairs: Option<usize>,
        /// Override weights, e.g. "blue_chips=0.5,defi_tokens=0.25"
        #[arg(short, long)]
        weights: Option<String>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Rank pairs by scored market metrics
    Rank {
        #[arg(short, long)]
        catalog: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = SourceKind::Synthetic)]
        source: SourceKind,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Ticker dump file for --source tickers
        #[arg(long)]
        tickers: Option<PathBuf>,
        #[arg(short = 'n', long)]
        max_pairs: Option<usize>,
        #[arg(long)]
        min_volume: Option<f64>,
        #[arg(long)]
        min_market_cap: Option<f64>,
        #[arg(long)]
        min_volatility: Option<f64>,
        #[arg(long)]
        max_volatility: Option<f64>,
    },
    /// Compute pivot, Camarilla, and ATR levels from OHLCV data
    Levels {
        /// CSV file with date,open,high,low,close,volume
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        pair: String,
        #[arg(long, value_enum)]
        scaling: ScalingArg,
        #[arg(long, default_value_t = ATR_PERIOD)]
        atr_period: usize,
        #[arg(long, default_value_t = ATR_STOPLOSS_MULTIPLIER)]
        atr_multiplier: f64,
        /// EMA period for the trend readout
        #[arg(long, default_value_t = TREND_EMA_PERIOD)]
        ema_period: usize,
        #[arg(long, value_enum, default_value_t = SideArg::Long)]
        side: SideArg,
        /// Entry price for stop and target levels
        #[arg(long)]
        entry: Option<f64>,
    },
    /// Validate a catalog file and the effective criteria
    Validate {
        #[arg(short, long)]
        catalog: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show catalog categories, weights, and criteria
    Info {
        #[arg(short, long)]
        catalog: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Select {
            catalog,
            max_pairs,
            weights,
            config,
        } => run_select(&catalog, max_pairs, weights.as_deref(), config.as_ref()),
        Command::Rank {
            catalog,
            config,
            source,
            seed,
            tickers,
            max_pairs,
            min_volume,
            min_market_cap,
            min_volatility,
            max_volatility,
        } => run_rank(RankArgs {
            catalog,
            config,
            source,
            seed,
            tickers,
            max_pairs,
            min_volume,
            min_market_cap,
            min_volatility,
            max_volatility,
        }),
        Command::Levels {
            data,
            pair,
            scaling,
            atr_period,
            atr_multiplier,
            ema_period,
            side,
            entry,
        } => run_levels(
            &data,
            &pair,
            scaling.into(),
            atr_period,
            atr_multiplier,
            ema_period,
            side.into(),
            entry,
        ),
        Command::Validate { catalog, config } => run_validate(&catalog, config.as_ref()),
        Command::Info { catalog, config } => run_info(&catalog, config.as_ref()),
    }
}

fn load_catalog_file(path: &PathBuf) -> Result<CatalogFile, ExitCode> {
    json_catalog::load_catalog(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn load_settings(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PairsiftError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Parse a "category=weight,category=weight" override string.
pub fn parse_weights(input: &str) -> Result<CategoryWeights, PairsiftError> {
    let mut weights = CategoryWeights::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let (name, value) = token.split_once('=').ok_or_else(|| invalid_weights(
            format!("expected category=weight, got {:?}", token),
        ))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid_weights("empty category name".to_string()));
        }
        let weight: f64 = value
            .trim()
            .parse()
            .map_err(|_| invalid_weights(format!("invalid weight for {}: {:?}", name, value.trim())))?;
        weights.set(name, weight);
    }
    weights.validate()?;
    Ok(weights)
}

fn invalid_weights(reason: String) -> PairsiftError {
    PairsiftError::ConfigInvalid {
        section: "cli".to_string(),
        key: "weights".to_string(),
        reason,
    }
}

/// Merge criteria from defaults, the catalog file, an optional INI settings
/// file, and CLI overrides, in that precedence order.
struct CriteriaOverrides {
    max_pairs: Option<usize>,
    min_volume: Option<f64>,
    min_market_cap: Option<f64>,
    min_volatility: Option<f64>,
    max_volatility: Option<f64>,
}

fn resolve_criteria(
    catalog_file: &CatalogFile,
    config_path: Option<&PathBuf>,
    overrides: &CriteriaOverrides,
) -> Result<SelectionCriteria, ExitCode> {
    let mut criteria = SelectionCriteria::default();
    if let Some(catalog_criteria) = &catalog_file.criteria {
        criteria.apply_catalog(catalog_criteria);
    }
    if let Some(path) = config_path {
        let settings = load_settings(path)?;
        criteria.apply_config(&settings).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        })?;
    }
    if let Some(v) = overrides.max_pairs {
        criteria.max_pairs = v;
    }
    if let Some(v) = overrides.min_volume {
        criteria.min_volume = v;
    }
    if let Some(v) = overrides.min_market_cap {
        criteria.min_market_cap = v;
    }
    if let Some(v) = overrides.min_volatility {
        criteria.min_volatility = v;
    }
    if let Some(v) = overrides.max_volatility {
        criteria.max_volatility = v;
    }
    criteria.validate().map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;
    Ok(criteria)
}

fn run_select(
    catalog_path: &PathBuf,
    max_pairs: Option<usize>,
    weights_override: Option<&str>,
    config_path: Option<&PathBuf>,
) -> ExitCode {
    eprintln!("Loading catalog from {}", catalog_path.display());
    let catalog_file = match load_catalog_file(catalog_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let criteria = match resolve_criteria(
        &catalog_file,
        config_path,
        &CriteriaOverrides {
            max_pairs,
            min_volume: None,
            min_market_cap: None,
            min_volatility: None,
            max_volatility: None,
        },
    ) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let weights = match weights_override {
        Some(s) => match parse_weights(s) {
            Ok(w) => w,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(&e);
            }
        },
        None => match &catalog_file.strategy {
            Some(strategy) => strategy.category_weights(),
            None => {
                eprintln!("error: catalog has no selection_strategy; pass --weights");
                return ExitCode::from(3);
            }
        },
    };

    let selected = select_weighted(&catalog_file.catalog, &weights, criteria.max_pairs);
    eprintln!(
        "Selected {} of {} catalog pairs",
        selected.len(),
        catalog_file.catalog.flatten().len()
    );

    print!("{}", render_pair_whitelist(&selected));
    ExitCode::SUCCESS
}

struct RankArgs {
    catalog: PathBuf,
    config: Option<PathBuf>,
    source: SourceKind,
    seed: u64,
    tickers: Option<PathBuf>,
    max_pairs: Option<usize>,
    min_volume: Option<f64>,
    min_market_cap: Option<f64>,
    min_volatility: Option<f64>,
    max_volatility: Option<f64>,
}

fn build_source(args: &RankArgs) -> Result<Box<dyn MetricsPort>, ExitCode> {
    match args.source {
        SourceKind::Synthetic => Ok(Box::new(SyntheticSource::new(args.seed))),
        SourceKind::Tickers => {
            let path = args.tickers.as_ref().ok_or_else(|| {
                eprintln!("error: --tickers is required for --source tickers");
                ExitCode::from(2)
            })?;
            let source = TickerSource::from_file(path).map_err(|e| {
                eprintln!("error: {e}");
                ExitCode::from(&e)
            })?;
            Ok(Box::new(source))
        }
        SourceKind::Coingecko => {
            #[cfg(feature = "live")]
            {
                use crate::adapters::coingecko::CoinGeckoSource;
                let source = CoinGeckoSource::new().map_err(|e| {
                    eprintln!("error: {e}");
                    ExitCode::from(&e)
                })?;
                Ok(Box::new(source))
            }
            #[cfg(not(feature = "live"))]
            {
                eprintln!("error: live feature is required for --source coingecko");
                Err(ExitCode::from(4))
            }
        }
    }
}

fn run_rank(args: RankArgs) -> ExitCode {
    eprintln!("Loading catalog from {}", args.catalog.display());
    let catalog_file = match load_catalog_file(&args.catalog) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let criteria = match resolve_criteria(
        &catalog_file,
        args.config.as_ref(),
        &CriteriaOverrides {
            max_pairs: args.max_pairs,
            min_volume: args.min_volume,
            min_market_cap: args.min_market_cap,
            min_volatility: args.min_volatility,
            max_volatility: args.max_volatility,
        },
    ) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let source = match build_source(&args) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let candidates = catalog_file.catalog.flatten();
    if candidates.is_empty() {
        eprintln!("error: catalog has no pairs");
        return ExitCode::from(3);
    }

    eprintln!("Fetching metrics for {} candidates...", candidates.len());
    let snapshot = match source.fetch_metrics(&candidates) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    let report = select_by_score(&candidates, &catalog_file.catalog, &snapshot, &criteria);

    for skipped in &report.skipped {
        eprintln!("warning: skipping {} ({})", skipped.pair, skipped.reason);
    }
    eprintln!(
        "Scored {} candidates: {} selected, {} below thresholds, {} skipped",
        candidates.len(),
        report.selected.len(),
        report.filtered_out,
        report.skipped.len()
    );

    if report.selected.is_empty() {
        eprintln!("error: no pairs selected");
        return ExitCode::from(5);
    }

    print!("{}", render_ranking_table(&report.selected));
    println!();
    let pairs: Vec<String> = report.selected.iter().map(|m| m.pair.clone()).collect();
    print!("{}", render_pair_whitelist(&pairs));

    eprintln!("\nCategory breakdown:");
    eprint!(
        "{}",
        render_category_breakdown(&report.selected, &catalog_file.catalog)
    );
    ExitCode::SUCCESS
}

fn run_levels(
    data_path: &PathBuf,
    pair: &str,
    scaling: CamarillaScaling,
    atr_period: usize,
    atr_multiplier: f64,
    ema_period: usize,
    side: TradeSide,
    entry: Option<f64>,
) -> ExitCode {
    eprintln!("Loading bars from {}", data_path.display());
    let bars = match crate::adapters::csv_bars::load_bars(data_path, pair) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };
    if bars.len() < 2 {
        eprintln!("error: need at least 2 bars to compute levels");
        return ExitCode::from(5);
    }

    let last = match bars.last() {
        Some(b) => b,
        None => return ExitCode::from(5),
    };
    println!("{} levels for {}", pair, last.date);

    let pivots = calculate_pivot(&bars);
    if let Some(point) = pivots.values.last().filter(|p| p.valid) {
        if let IndicatorValue::Pivot {
            pivot,
            r1,
            r2,
            r3,
            s1,
            s2,
            s3,
        } = point.value
        {
            println!("\nFloor pivots:");
            println!("  R3 {:>12.4}", r3);
            println!("  R2 {:>12.4}", r2);
            println!("  R1 {:>12.4}", r1);
            println!("  P  {:>12.4}", pivot);
            println!("  S1 {:>12.4}", s1);
            println!("  S2 {:>12.4}", s2);
            println!("  S3 {:>12.4}", s3);
        }
    }

    let range = calculate_pivot_range(&bars);
    if let Some(point) = range.values.last().filter(|p| p.valid) {
        if let IndicatorValue::PivotRange { pivot, bc, tc } = point.value {
            println!("\nCentral pivot range:");
            println!("  TC {:>12.4}", tc);
            println!("  P  {:>12.4}", pivot);
            println!("  BC {:>12.4}", bc);
        }
    }

    let camarilla = calculate_camarilla(&bars, scaling);
    if let Some(point) = camarilla.values.last().filter(|p| p.valid) {
        if let IndicatorValue::Camarilla {
            r1,
            r2,
            r3,
            s1,
            s2,
            s3,
        } = point.value
        {
            println!("\nCamarilla ({}):", camarilla.indicator_type);
            println!("  R3 {:>12.4}", r3);
            println!("  R2 {:>12.4}", r2);
            println!("  R1 {:>12.4}", r1);
            println!("  S1 {:>12.4}", s1);
            println!("  S2 {:>12.4}", s2);
            println!("  S3 {:>12.4}", s3);
        }
    }

    let atr_series = calculate_atr(&bars, atr_period);
    let atr = atr_series.values.last().filter(|p| p.valid).map(|p| match p.value {
        IndicatorValue::Simple(v) => v,
        _ => 0.0,
    });
    match atr {
        Some(atr) => {
            println!("\n{}: {:.4}", atr_series.indicator_type, atr);
            if let Some(entry) = entry {
                let stop = atr_stop_price(entry, atr, atr_multiplier, side);
                let target = atr_target_price(entry, atr, ATR_ROI_MULTIPLIER, side);
                println!("  entry  {:>12.4}", entry);
                println!(
                    "  stop   {:>12.4} ({:.2}% from entry)",
                    stop,
                    relative_distance(entry, stop, side) * 100.0
                );
                println!("  target {:>12.4}", target);
            }
        }
        None => eprintln!(
            "warning: not enough bars for ATR({}) ({} bars loaded)",
            atr_period,
            bars.len()
        ),
    }

    if bars.len() >= ema_period {
        let above = trend_filter(&bars, ema_period)
            .last()
            .copied()
            .unwrap_or(false);
        println!(
            "\nTrend: close {} EMA({})",
            if above { "above" } else { "at or below" },
            ema_period
        );
    } else {
        eprintln!(
            "warning: not enough bars for EMA({}) ({} bars loaded)",
            ema_period,
            bars.len()
        );
    }

    ExitCode::SUCCESS
}

fn run_validate(catalog_path: &PathBuf, config_path: Option<&PathBuf>) -> ExitCode {
    eprintln!("Validating catalog: {}", catalog_path.display());
    let catalog_file = match load_catalog_file(catalog_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if catalog_file.catalog.is_empty() {
        eprintln!("error: catalog has no pairs");
        return ExitCode::from(3);
    }

    if let Some(strategy) = &catalog_file.strategy {
        if let Err(e) = strategy.category_weights().validate() {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    }

    let criteria = match resolve_criteria(
        &catalog_file,
        config_path,
        &CriteriaOverrides {
            max_pairs: None,
            min_volume: None,
            min_market_cap: None,
            min_volatility: None,
            max_volatility: None,
        },
    ) {
        Ok(c) => c,
        Err(code) => return code,
    };

    eprintln!(
        "Catalog valid: {} categories, {} pairs",
        catalog_file.catalog.categories().len(),
        catalog_file.catalog.flatten().len()
    );
    eprintln!(
        "Effective criteria: max_pairs={}, min_volume={}, min_market_cap={}, volatility [{}, {}]",
        criteria.max_pairs,
        criteria.min_volume,
        criteria.min_market_cap,
        criteria.min_volatility,
        criteria.max_volatility
    );
    ExitCode::SUCCESS
}

fn run_info(catalog_path: &PathBuf, config_path: Option<&PathBuf>) -> ExitCode {
    let catalog_file = match load_catalog_file(catalog_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    println!("Catalog: {}", catalog_path.display());
    for category in catalog_file.catalog.categories() {
        println!("  {} ({} pairs)", category.name, category.pairs.len());
        for pair in &category.pairs {
            println!("    {}", pair);
        }
    }

    if let Some(strategy) = &catalog_file.strategy {
        println!("\nSelection strategy:");
        println!("  blue_chips_weight: {}", strategy.blue_chips_weight);
        println!("  defi_weight: {}", strategy.defi_weight);
        println!("  layer1_weight: {}", strategy.layer1_weight);
        println!("  gaming_weight: {}", strategy.gaming_weight);
        if let Some(other) = strategy.other_weight {
            println!("  other_weight: {}", other);
        }
    }

    match resolve_criteria(
        &catalog_file,
        config_path,
        &CriteriaOverrides {
            max_pairs: None,
            min_volume: None,
            min_market_cap: None,
            min_volatility: None,
            max_volatility: None,
        },
    ) {
        Ok(criteria) => {
            println!("\nEffective criteria:");
            println!("  max_pairs: {}", criteria.max_pairs);
            println!("  min_volume: {}", criteria.min_volume);
            println!("  min_market_cap: {}", criteria.min_market_cap);
            println!(
                "  volatility band: [{}, {}] (optimal {})",
                criteria.min_volatility,
                criteria.max_volatility,
                criteria.optimal_volatility()
            );
            println!(
                "  refresh period: {}h",
                criteria.refresh_period.num_minutes() as f64 / 60.0
            );
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}
