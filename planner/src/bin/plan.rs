use std::{process::ExitCode, time::Instant};

use firetour_structs::problem::Problem;

fn usage() -> ExitCode {
    eprintln!("usage: firetour_plan <problem.json> [<problem.json> ...] [--json]");
    ExitCode::FAILURE
}

pub fn main() -> ExitCode {
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let json = args.iter().any(|a| a == "--json");
    let files = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .collect::<Vec<_>>();
    if files.is_empty() {
        return usage();
    }

    if !json {
        println!("----------------------");
        println!("firetour route planner");
        println!("----------------------");
        println!();
        println!(
            "{:<30} {:>6} {:>12} {:>12} {:>12} {:>9} {:>8}",
            "instance", "fires", "nearest", "largest", "annealed", "accepted", "ms"
        );
    }

    let mut failed = false;
    for filename in files {
        let problem = match Problem::load(filename) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("{}: {}", filename, e);
                failed = true;
                continue;
            }
        };

        let t0 = Instant::now();
        let summary = match firetour_planner::plan(&problem) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}: {}", filename, e);
                failed = true;
                continue;
            }
        };
        let elapsed = t0.elapsed();

        if json {
            match serde_json::to_string_pretty(&summary.route) {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("{}: {}", filename, e);
                    failed = true;
                }
            }
        } else {
            println!(
                "{:<30} {:>6} {:>12} {:>12} {:>12} {:>9} {:>8}",
                filename,
                problem.fires.len(),
                summary.nearest_neighbor_value,
                summary.largest_first_value,
                summary.route.value,
                summary.stats.accepted,
                elapsed.as_millis()
            );
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
