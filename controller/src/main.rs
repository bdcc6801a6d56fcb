use std::process::ExitCode;

use firetour_controller::executive::Executive;
use firetour_sim::SimVehicle;
use firetour_structs::problem::Problem;
use log::error;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(filename) = args.next() else {
        eprintln!("usage: firetour_controller <problem.json> [travel slowdown]");
        return ExitCode::FAILURE;
    };
    let slowdown = match args.next().map(|s| s.parse::<f64>()) {
        None => 1.0,
        Some(Ok(x)) if x > 0.0 => x,
        Some(_) => {
            eprintln!("travel slowdown must be a positive number");
            return ExitCode::FAILURE;
        }
    };

    let problem = match Problem::load(&filename) {
        Ok(p) => p,
        Err(e) => {
            error!("{}: {}", filename, e);
            return ExitCode::FAILURE;
        }
    };

    let summary = match firetour_planner::plan(&problem) {
        Ok(s) => s,
        Err(e) => {
            error!("{}: {}", filename, e);
            return ExitCode::FAILURE;
        }
    };
    summary.route.print();

    let mut vehicle =
        SimVehicle::new(problem.home, problem.config.velocity).with_travel_slowdown(slowdown);
    let report = Executive::new(&problem.config).replay(&summary.route, &mut vehicle);

    println!(
        "executed {} of {} waypoints, value {} of {}, time {:.2}, water left {}",
        report.completed.len(),
        summary.route.waypoints.len(),
        report.value,
        summary.route.value,
        report.elapsed,
        report.water_remaining
    );
    if let Some(e) = report.aborted {
        println!("aborted: {}", e);
    }
    ExitCode::SUCCESS
}
