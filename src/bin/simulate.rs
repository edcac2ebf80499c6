//! Game balance simulator CLI.
//!
//! Runs seeded simulations of the resource engine to check area yields and
//! the level curve.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # Default: 100 runs, one hour each
//!   cargo run --bin simulate -- -n 20 --area 18   # 20 runs in Yggdrasil Forest
//!   cargo run --bin simulate -- --seed 42         # Reproducible run

use megami::simulator::{run_simulation, SimConfig};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              MEGAMI BALANCE SIMULATOR                         ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Ticks per Run:  {}", config.ticks_per_run);
    println!("  Area:           {}", config.area_id);
    match config.summon_rank {
        Some(rank) => println!(
            "  Summons:        rank {} up to {} members",
            rank, config.max_members
        ),
        None => println!("  Summons:        disabled"),
    }
    if let Some(minutes) = config.offline_minutes {
        println!("  Offline:        {} minutes", minutes);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, json).expect("Failed to write JSON report");
        println!("JSON report saved to: {}", filename);
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.ticks_per_run = args[i + 1].parse().unwrap_or(3_600);
                    i += 1;
                }
            }
            "-a" | "--area" => {
                if i + 1 < args.len() {
                    if let Ok(area_id) = args[i + 1].parse::<u32>() {
                        config.area_id = area_id;
                        i += 1;
                    }
                }
            }
            "--summon" => {
                if i + 1 < args.len() {
                    if let Ok(rank) = args[i + 1].parse::<u8>() {
                        config.summon_rank = Some(rank);
                        i += 1;
                    }
                }
            }
            "--no-summon" => {
                config.summon_rank = None;
            }
            "--members" => {
                if i + 1 < args.len() {
                    if let Ok(max) = args[i + 1].parse::<usize>() {
                        config.max_members = max;
                        i += 1;
                    }
                }
            }
            "--offline" => {
                if i + 1 < args.len() {
                    config.offline_minutes = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--long" => {
                config = SimConfig::long_session_test();
            }
            "--solo" => {
                config = SimConfig::solo_test(config.ticks_per_run);
            }
            "--balance" => {
                if i + 1 < args.len() {
                    if let Ok(area_id) = args[i + 1].parse::<u32>() {
                        config = SimConfig::area_balance_test(area_id);
                        i += 1;
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Megami Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulation runs (default: 100)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -t, --ticks <T>     Simulated seconds per run (default: 3,600)");
    println!("    -a, --area <ID>     Area the first party farms (default: 16)");
    println!("    --summon <R>        Summon rank to buy when affordable (default: 0)");
    println!("    --no-summon         Never summon");
    println!("    --members <M>       Stop summoning at M members (default: 6)");
    println!("    --offline <MIN>     Reconcile MIN minutes offline after the run");
    println!("    -v, --verbose       Verbose output");
    println!("    --json              Save JSON report");
    println!("    --long              A day of play with two hours offline");
    println!("    --solo              Starter only, no summons");
    println!("    --balance <ID>      20 one-hour runs in area ID");
    println!("    -h, --help          Show this help");
    println!();
    println!("Set RUST_LOG=megami=debug to see per-tick yields.");
}
