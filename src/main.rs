use std::env;
use std::io::{self, Read};
use std::process::ExitCode;

use average::Estimate;
use priosim::SchedEvent;
use priosim::sim::{Sim, parse_workload, random_workload};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let specs = if args.first().map(String::as_str) == Some("--random") {
        let count = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(6);
        let seed = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0);
        random_workload(count, 6, 10, seed)
    } else {
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("error: failed to read process definitions: {err}");
            return ExitCode::FAILURE;
        }
        match parse_workload(&input) {
            Ok(specs) => specs,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
    };

    if specs.is_empty() {
        println!("[System] no processes to schedule");
        return ExitCode::SUCCESS;
    }

    let mut sim = match Sim::new(specs) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("[System] scheduling {} processes", sim.records().len());
    for event in sim.run() {
        render(&event);
    }

    let turnaround = avg(sim.records_map(|r| r.completion_step.unwrap() as f64));
    let waiting = avg(
        sim.records_map(|r| (r.completion_step.unwrap() - r.spec.service_time) as f64),
    );
    println!();
    println!("Average turnaround time: {turnaround:.2} units");
    println!("Average waiting time: {waiting:.2} units");

    ExitCode::SUCCESS
}

fn render(event: &SchedEvent) {
    match event {
        SchedEvent::Running {
            step,
            name,
            priority,
            remaining,
        } => println!("--> [Time {step:2}] running {name} (priority {priority}, remaining {remaining})"),
        SchedEvent::Requeued { name, new_priority } => {
            println!("    [Switch] {name} requeued (new priority {new_priority})")
        }
        SchedEvent::Finished { name } => println!("    [Finish] {name} completed"),
        SchedEvent::QueueSnapshot { entries } => {
            let queue = entries
                .iter()
                .map(|(name, priority)| format!("{name}({priority})"))
                .collect::<Vec<_>>()
                .join(" -> ");
            println!("    [Queue] {queue}");
        }
        SchedEvent::Complete => println!("\n[System] all processes scheduled"),
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}
