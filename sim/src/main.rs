//! Command line pack opener
//!
//! `packsim open` opens packs once against a catalog, a format and an optional
//! existing collection. `packsim simulate` repeats an opening many times in
//! parallel and reports how often each rarity shows up.

mod args;
mod stats;

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use packsim_core::{
    allocate, open_packs, AllocationView, CardId, Catalog, Collection, CollectionExport,
    ElementFilter, FormatCaps, RarityCaps, XorShiftRng,
};
use rayon::prelude::*;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::args::{Cli, Commands, DataArgs, OpenArgs, SimulateArgs};
use crate::stats::TrialTotals;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Open(args) => open(args),
        Commands::Simulate(args) => simulate(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Only fails if a logger is already installed
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

/// Everything an opening needs, loaded from disk
struct Session {
    offered: Catalog,
    caps: RarityCaps,
    collection: Collection,
    seed: u64,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_session(data: &DataArgs) -> Result<Session> {
    let catalog = Catalog::from_json(&read(&data.catalog)?)
        .with_context(|| format!("loading catalog {}", data.catalog.display()))?;
    let formats = FormatCaps::from_json(&read(&data.formats)?)
        .with_context(|| format!("loading formats {}", data.formats.display()))?;
    let caps = formats.get(&data.format)?.clone();

    let filter = match &data.partner {
        Some(id) => ElementFilter::from_partner(catalog.require(&CardId::new(id.as_str()))?),
        None => ElementFilter::any(),
    };
    let offered = catalog.filtered(&filter);
    info!(
        "{} of {} cards offered in format '{}'",
        offered.len(),
        catalog.len(),
        data.format
    );

    let collection = match &data.collection {
        Some(path) => {
            let export = CollectionExport::from_json(&read(path)?)
                .with_context(|| format!("loading collection {}", path.display()))?;
            Collection::import(export)
        }
        None => Collection::default(),
    };

    let seed = data.seed.unwrap_or_else(time_seed);
    debug!("seed {}", seed);

    Ok(Session {
        offered,
        caps,
        collection,
        seed,
    })
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

fn open(args: OpenArgs) -> Result<()> {
    let mut session = load_session(&args.data)?;
    let request = args.pack.request();
    let baseline = session.collection.baseline();
    let mut rng = XorShiftRng::seed_from_u64(session.seed);

    let allocation = open_packs(&session.offered, &session.caps, &baseline, &request, &mut rng)?;
    let view = AllocationView::new(&allocation, &request);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_opening(&view);
    }

    if let Some(path) = &args.export {
        session.collection.merge(&allocation);
        session.collection.name = args.name.clone();
        let json = session.collection.export().to_json()?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(
            "exported {} cards ({} distinct) to {}",
            session.collection.total(),
            session.collection.len(),
            path.display()
        );
    }
    Ok(())
}

fn print_opening(view: &AllocationView) {
    for pack in &view.packs {
        println!("Pack {}", pack.index + 1);
        for card in &pack.cards {
            println!("  [{}] {} ({}, {})", card.rarity, card.name, card.id, card.set);
        }
        if pack.unfilled > 0 {
            println!("  ({} empty slots)", pack.unfilled);
        }
    }
    println!(
        "{} cards from {} slots",
        view.total_cards,
        view.slots_per_pack as usize * view.packs.len()
    );
}

fn simulate(args: SimulateArgs) -> Result<()> {
    let session = load_session(&args.data)?;
    let request = args.pack.request();
    request.validate()?;
    let baseline = session.collection.baseline();

    let totals = (0..args.trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = XorShiftRng::seed_from_u64(session.seed.wrapping_add(trial));
            let allocation =
                allocate(&session.offered, &session.caps, &baseline, &request, &mut rng);
            let mut totals = TrialTotals::default();
            totals.record(&allocation, &request);
            totals
        })
        .reduce(TrialTotals::default, TrialTotals::merge);

    let report = totals.report();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} openings of {} packs", report.trials, request.pack_count);
    for (rarity, average) in &report.average_per_opening {
        println!("  {:<10} {:>8.3} per opening", rarity.as_str(), average);
    }
    println!("  ultra slots {:>7.3} per opening", report.average_ultra_slots);
    println!("  fill rate  {:>7.2}%", report.fill_rate * 100.0);
    println!("  complete   {:>7.2}%", report.complete_openings * 100.0);
    Ok(())
}
