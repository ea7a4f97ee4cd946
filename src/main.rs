//! Command-line bridge simulator.
//!
//! With no flags, runs an interactive session: choose the travel plan
//! vehicle by vehicle or let a coin decide, watch the crossing, repeat.
//! With `--vehicles` or `--directions`, runs a single simulation and exits.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use bridgekeeper::{
    random_plan, ConsoleReporter, Direction, SimConfig, Simulation, Subscribe, TrafficLedger,
    MAX_VEHICLES,
};

/// Monitor-synchronized one-lane bridge crossing simulator.
#[derive(Parser, Debug)]
#[command(name = "bridgekeeper", version, about)]
struct Args {
    /// Number of vehicles to send (coin-flipped directions unless --directions)
    #[arg(short = 'n', long, value_name = "COUNT")]
    vehicles: Option<usize>,

    /// Per-vehicle directions as letters, e.g. "eewwe" (e = eastbound, w = westbound)
    #[arg(short, long, value_name = "LETTERS")]
    directions: Option<String>,

    /// Most vehicles the bridge holds at once
    #[arg(short, long, value_name = "SEATS")]
    capacity: Option<u32>,

    /// Millisecond pacing instead of seconds
    #[arg(long)]
    fast: bool,

    /// Suppress per-event console output
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut cfg = SimConfig::default();
    if let Some(capacity) = args.capacity {
        cfg.capacity = capacity;
    }
    if args.fast {
        cfg = cfg.with_fast_pacing();
    }

    match explicit_plan(&args)? {
        Some(plan) => run_once(&cfg, &plan, args.quiet),
        None => interactive_session(&cfg, args.quiet),
    }
}

/// Builds the travel plan requested on the command line, if any.
fn explicit_plan(args: &Args) -> anyhow::Result<Option<Vec<Direction>>> {
    let plan = match (&args.directions, args.vehicles) {
        (Some(letters), vehicles) => {
            let plan = parse_directions(letters)?;
            if let Some(count) = vehicles {
                anyhow::ensure!(
                    plan.len() == count,
                    "--vehicles {count} disagrees with the {} directions given",
                    plan.len(),
                );
            }
            Some(plan)
        }
        (None, Some(count)) => Some(random_plan(count)),
        (None, None) => None,
    };
    Ok(plan)
}

fn parse_directions(letters: &str) -> anyhow::Result<Vec<Direction>> {
    let mut plan = Vec::new();
    for ch in letters.chars() {
        if ch.is_whitespace() || ch == ',' {
            continue;
        }
        let direction = ch
            .to_string()
            .parse::<Direction>()
            .with_context(|| format!("in --directions {letters:?}"))?;
        plan.push(direction);
    }
    Ok(plan)
}

/// Runs one plan with a fresh ledger, prints the outcome, audits the books.
fn run_once(cfg: &SimConfig, plan: &[Direction], quiet: bool) -> anyhow::Result<()> {
    let ledger = Arc::new(TrafficLedger::new());
    let mut sim = Simulation::new(cfg.clone())
        .context("invalid configuration")?
        .with_subscriber(Arc::clone(&ledger) as Arc<dyn Subscribe>);
    if !quiet {
        sim = sim.with_subscriber(Arc::new(ConsoleReporter) as Arc<dyn Subscribe>);
    }

    let summary = sim.run(plan).context("simulation failed")?;

    let audited = ledger.summary();
    println!(
        "\nall vehicles are across: {} eastbound, {} westbound ({:.2?})",
        summary.crossed_toward(Direction::Eastbound),
        summary.crossed_toward(Direction::Westbound),
        summary.elapsed,
    );
    anyhow::ensure!(
        audited.is_balanced(),
        "ledger out of balance after a clean run: {audited:?}",
    );
    Ok(())
}

fn interactive_session(cfg: &SimConfig, quiet: bool) -> anyhow::Result<()> {
    let mut lines = io::stdin().lock().lines();
    println!(
        "one-lane bridge: capacity {}, vehicles travel eastbound (e) or westbound (w)",
        cfg.capacity,
    );

    loop {
        let plan = if prompt_yes_no(&mut lines, "take control of the travel plan? (y/n): ")? {
            let count = prompt_count(&mut lines)?;
            let mut plan = Vec::with_capacity(count);
            for id in 0..count {
                plan.push(prompt_direction(&mut lines, id)?);
            }
            plan
        } else {
            println!("sending {} vehicles with coin-flipped directions", cfg.vehicles);
            random_plan(cfg.vehicles)
        };

        run_once(cfg, &plan, quiet)?;

        if !prompt_yes_no(&mut lines, "run another simulation? (y/n): ")? {
            return Ok(());
        }
    }
}

type Prompter<'a> = io::Lines<io::StdinLock<'a>>;

/// Shows `prompt` (on a terminal) and reads one line. `None` means stdin
/// closed.
fn ask(lines: &mut Prompter<'_>, prompt: &str) -> anyhow::Result<Option<String>> {
    if io::stdin().is_terminal() {
        print!("{prompt}");
        io::stdout().flush()?;
    }
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

fn prompt_yes_no(lines: &mut Prompter<'_>, prompt: &str) -> anyhow::Result<bool> {
    loop {
        let Some(line) = ask(lines, prompt)? else {
            return Ok(false);
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => println!("please answer y or n, not {other:?}"),
        }
    }
}

fn prompt_count(lines: &mut Prompter<'_>) -> anyhow::Result<usize> {
    let prompt = format!("how many vehicles? (1-{MAX_VEHICLES}): ");
    loop {
        let Some(line) = ask(lines, &prompt)? else {
            anyhow::bail!("standard input closed before a vehicle count was given");
        };
        match line.trim().parse::<usize>() {
            Ok(count) if (1..=MAX_VEHICLES).contains(&count) => return Ok(count),
            _ => println!("please enter a number between 1 and {MAX_VEHICLES}"),
        }
    }
}

fn prompt_direction(lines: &mut Prompter<'_>, id: usize) -> anyhow::Result<Direction> {
    let prompt = format!("direction for vehicle {id}? (e = eastbound, w = westbound): ");
    loop {
        let Some(line) = ask(lines, &prompt)? else {
            anyhow::bail!("standard input closed before every vehicle had a direction");
        };
        match line.trim().parse::<Direction>() {
            Ok(direction) => return Ok(direction),
            Err(err) => println!("{err}; try again"),
        }
    }
}
