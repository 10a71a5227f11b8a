#![deny(warnings)]

//! Headless CLI for generating the heavenly city and reading the leaderboard.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use estate_core::{
    charity_impact, find_parcel, find_religion, global_impact, heavenly_city, CityLayout,
    LotTier, Parcel, ParcelStatus,
};
use estate_gen::{
    available_by_district, block_plan, generate_from_entropy, generate_seeded, summarize,
    GeneratorConfig, RowAdvance,
};
use estate_rank::{
    days_until_month_end, days_until_month_end_now, district_dominance,
    enhanced_competition_stats, format_currency, quote_parcel, rank_medal, CheckoutRequest,
    Dedication, DedicationType, RankError, RankTuning, ReligionStats,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const PROGRESS_BAR_WIDTH: usize = 20;

#[derive(Debug, Parser)]
#[command(author, version, about = "Heavenly Estates headless runner")]
struct Cli {
    /// YAML file with `seed`, `generator` and `rank` sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the parcel inventory and print a summary
    Generate {
        /// RNG seed; omit for a fresh city every run
        #[arg(long)]
        seed: Option<u64>,
        /// Pack rows by lot height instead of the fixed row step
        #[arg(long)]
        packed: bool,
        /// Write parcels as JSON to this path, or `-` for stdout
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Show the donation leaderboard
    Leaderboard {
        /// Date used for the month-end countdown (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Show which religion dominates each district
    Districts,
    /// Show one parcel of a seeded city
    Parcel {
        id: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Quote the purchase of a parcel, including the leaderboard match
    Quote {
        #[arg(long)]
        parcel: String,
        #[arg(long)]
        religion: String,
        /// Donation amount; defaults to the parcel price
        #[arg(long)]
        amount: Option<Decimal>,
        #[arg(long)]
        seed: Option<u64>,
        /// in_memory_of, in_honor_of or dedicated_to
        #[arg(long, requires_all = ["dedicatee", "message"])]
        dedication: Option<DedicationType>,
        #[arg(long, requires = "dedication")]
        dedicatee: Option<String>,
        #[arg(long, requires = "dedication")]
        message: Option<String>,
        #[arg(long, requires = "dedication")]
        dates: Option<String>,
    },
    /// Show global charity impact, or one religion's charity in detail
    Impact {
        #[arg(long)]
        religion: Option<String>,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunConfig {
    seed: Option<u64>,
    generator: GeneratorConfig,
    rank: RankTuning,
}

fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    let Some(path) = path else {
        return Ok(RunConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn parse_config(text: &str) -> Result<RunConfig> {
    let cfg: RunConfig = serde_yaml::from_str(text)?;
    cfg.generator.validate()?;
    cfg.rank.validate()?;
    Ok(cfg)
}

/// Switch to packed rows, keeping a packed gap the config already sets.
fn with_packed_rows(cfg: &GeneratorConfig) -> GeneratorConfig {
    let mut cfg = cfg.clone();
    if !matches!(cfg.row_advance, RowAdvance::Packed { .. }) {
        cfg.row_advance = RowAdvance::Packed { gap: cfg.lot_gap };
    }
    cfg
}

fn generate(layout: &CityLayout, cfg: &GeneratorConfig, seed: Option<u64>) -> Vec<Parcel> {
    match seed {
        Some(seed) => generate_seeded(layout, cfg, seed),
        None => generate_from_entropy(layout, cfg),
    }
}

fn write_json(parcels: &[Parcel], target: &Path) -> Result<()> {
    if target == Path::new("-") {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, parcels)?;
        writeln!(out)?;
    } else {
        let file = File::create(target)
            .with_context(|| format!("creating {}", target.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), parcels)?;
        info!(path = %target.display(), parcels = parcels.len(), "parcels written");
    }
    Ok(())
}

fn print_parcel(p: &Parcel) {
    println!("{} | {} | {}", p.id, p.parcel_number, p.block);
    println!(
        "  {} lot {} at ({}, {}) {}x{} = {} sq ft",
        p.lot_type.label(),
        p.lot,
        p.coordinates.x,
        p.coordinates.y,
        p.dimensions.width,
        p.dimensions.height,
        p.size
    );
    println!("  {} | {}", p.subdivision, p.address);
    println!("  price: ${} | status: {:?}", p.price, p.status);
    println!("  features: {}", p.features.join(", "));
    println!("  {}", p.view);
}

/// Checkout text for a request. Not-found and sold parcels are fallbacks,
/// not failures.
fn checkout_report(
    parcels: &[Parcel],
    request: &CheckoutRequest,
    stats: &[ReligionStats],
) -> Result<String> {
    let quote = match quote_parcel(parcels, request, stats) {
        Ok(Some(quote)) => quote,
        Ok(None) => return Ok(format!("Property not found: {}", request.parcel_id)),
        Err(RankError::ParcelSold(id)) => {
            return Ok(format!("Property {id} is sold and no longer available"))
        }
        Err(e) => return Err(e.into()),
    };
    let d = &quote.donation;
    let mut out = String::new();
    writeln!(
        out,
        "{} | {} | supports {}",
        quote.parcel_number, quote.subdivision, quote.charity_name
    )?;
    write!(
        out,
        "  donation: ${} | match: +{}% (${}) | total impact: ${}",
        d.amount, d.matching_bonus, d.matched, d.total
    )?;
    if let Some(dedication) = &quote.dedication {
        write!(
            out,
            "\n  {} {}",
            dedication.kind.label(),
            dedication.dedicatee
        )?;
        if let Some(dates) = &dedication.dates {
            write!(out, " ({dates})")?;
        }
        write!(out, "\n  \"{}\"", dedication.message)?;
    }
    Ok(out)
}

fn progress_bar(fraction: f64) -> String {
    let filled = (fraction * PROGRESS_BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_BAR_WIDTH);
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

fn impact_report(religion: Option<&str>) -> Result<String> {
    let mut out = String::new();
    let Some(id) = religion else {
        let g = global_impact();
        write!(
            out,
            "Global impact | donations: {} | properties sold: {} | charities: {} | countries: {}",
            format_currency(g.total_donations),
            g.total_properties,
            g.charities_supported,
            g.countries_reached
        )?;
        return Ok(out);
    };
    let (Some(religion), Some(impact)) = (find_religion(id), charity_impact(id)) else {
        return Ok(format!("Religion not found: {id}"));
    };
    writeln!(
        out,
        "{} {} | {}",
        religion.icon, impact.charity_name, religion.charity_description
    )?;
    writeln!(
        out,
        "  donated: ${} | properties supporting: {}",
        impact.total_donations, impact.properties_sold
    )?;
    for m in &impact.impact_metrics {
        writeln!(out, "  {} {} {} {}", m.icon, m.value, m.unit, m.metric)?;
    }
    for p in &impact.projects {
        writeln!(
            out,
            "  {} {:>3}% {} ({}) ${} of ${}",
            progress_bar(p.progress_bar_fraction()),
            p.progress_percent(),
            p.name,
            p.location,
            p.progress,
            p.goal
        )?;
    }
    for s in &impact.recent_stories {
        writeln!(out, "  {} | {} | {}", s.date, s.title, s.location)?;
    }
    Ok(out.trim_end().to_string())
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;
    let layout = heavenly_city();
    estate_gen::validate(&layout, &cfg.generator)?;
    info!(command = ?cli.command, "starting CLI");

    match cli.command {
        Command::Generate { seed, packed, json } => {
            let gen_cfg = if packed {
                with_packed_rows(&cfg.generator)
            } else {
                cfg.generator.clone()
            };
            let parcels = generate(&layout, &gen_cfg, seed.or(cfg.seed));
            let plan = block_plan(&layout, &gen_cfg);
            let skipped = plan.iter().filter(|b| b.is_skipped()).count();
            let summary = summarize(&parcels);

            println!(
                "City OK | parcels: {} | blocks: {} | landmark blocks: {}",
                summary.total,
                plan.len(),
                skipped
            );
            let count = |s: ParcelStatus| summary.by_status.get(&s).copied().unwrap_or(0);
            println!(
                "Status | available: {} | reserved: {} | sold: {}",
                count(ParcelStatus::Available),
                count(ParcelStatus::Reserved),
                count(ParcelStatus::Sold)
            );
            for tier in LotTier::ALL {
                let n = summary.by_tier.get(&tier).copied().unwrap_or(0);
                println!("Tier   | {:<8} {}", tier.label(), n);
            }
            if let (Some(lo), Some(hi)) = (summary.min_price, summary.max_price) {
                println!("Price  | {} .. {}", format_currency(lo), format_currency(hi));
            }
            for d in available_by_district(&layout, &parcels) {
                println!(
                    "District | {:<22} {:>3} available of {}",
                    d.district_name, d.available, d.total
                );
            }
            if let Some(target) = json {
                write_json(&parcels, &target)?;
            }
        }
        Command::Leaderboard { today } => {
            let days_left = today.map_or_else(days_until_month_end_now, days_until_month_end);
            println!("Heavenly Battle | {days_left} days left this month");
            for s in enhanced_competition_stats(&cfg.rank) {
                let name = find_religion(&s.religion_id)
                    .map(|r| r.name)
                    .unwrap_or_else(|| s.religion_id.clone());
                println!(
                    "{:>3} {:<13} {:>8} | week {:>7} | ${}/day {} {:?} | match +{}% | districts: {}",
                    rank_medal(s.rank),
                    name,
                    format_currency(s.total_donations),
                    format_currency(s.last_7_days_donations),
                    s.velocity,
                    s.trend.icon(),
                    s.trend,
                    s.matching_bonus,
                    s.districts_dominated.len()
                );
            }
        }
        Command::Districts => {
            for d in district_dominance(&cfg.rank) {
                println!(
                    "{:<22} | {:<13} | {}",
                    d.district_name,
                    d.dominant_religion.as_deref().unwrap_or("-"),
                    if d.is_contested { "contested" } else { "held" }
                );
            }
        }
        Command::Parcel { id, seed } => {
            let seed = seed.or(cfg.seed);
            if seed.is_none() {
                warn!("no seed given; parcel ids refer to a fresh random city");
            }
            let parcels = generate(&layout, &cfg.generator, seed);
            match find_parcel(&parcels, &id) {
                Some(p) => print_parcel(p),
                None => println!("Property not found: {id}"),
            }
        }
        Command::Quote {
            parcel,
            religion,
            amount,
            seed,
            dedication,
            dedicatee,
            message,
            dates,
        } => {
            let seed = seed.or(cfg.seed);
            if seed.is_none() {
                warn!("no seed given; parcel ids refer to a fresh random city");
            }
            let parcels = generate(&layout, &cfg.generator, seed);
            let request = CheckoutRequest {
                parcel_id: parcel,
                religion_id: religion,
                amount,
                dedication: dedication.map(|kind| Dedication {
                    kind,
                    dedicatee: dedicatee.unwrap_or_default(),
                    dates,
                    message: message.unwrap_or_default(),
                }),
            };
            let stats = enhanced_competition_stats(&cfg.rank);
            println!("{}", checkout_report(&parcels, &request, &stats)?);
        }
        Command::Impact { religion } => {
            println!("{}", impact_report(religion.as_deref())?);
        }
    }

    Ok(())
}
