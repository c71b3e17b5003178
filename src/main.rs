use std::error::Error;
use std::process;

use clap::{value_parser, Arg, ArgMatches, Command};
use csv::{ReaderBuilder, Trim};
use log::error;

use uniprocessor::{compare, simulation, Job, Policy, Priority, Schedule, SchedulingError, TimeStep, ID};

/// Exit code for an unreadable or malformed job file.
const EXIT_BAD_FILE: i32 = 5;

/// Reads a job file and returns the jobs, numbered from 1 in line order.
///
/// Each line holds `arrival, burst, priority`; lines starting with `#` are skipped.
pub fn read_job_file(file_path: &str) -> Result<Vec<Job>, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_path(file_path)?;
    let mut jobs = Vec::new();

    let mut id: ID = 1;

    for result in rdr.records() {
        let record = result?;
        if record.len() != 3 {
            return Err(format!("line {}: expected arrival, burst, priority", id).into());
        }

        let arrival: i64 = record[0].parse()?;
        let burst: i64 = record[1].parse()?;
        let priority: Priority = record[2].parse()?;

        let arrival = TimeStep::try_from(arrival).map_err(|_| SchedulingError::InvalidArrival { job_id: id })?;
        let burst = match TimeStep::try_from(burst) {
            Ok(burst) if burst > 0 => burst,
            _ => return Err(SchedulingError::InvalidBurst { job_id: id }.into()),
        };

        jobs.push(Job::new(id, arrival, burst, priority));
        id += 1;
    }

    Ok(jobs)
}

pub fn build_cli_command() -> Command {
    Command::new("uniprocessor")
        .version("0.1.0")
        .about("Simulates single-processor CPU scheduling of a job set")

        .arg(Arg::new("job_file")
            .required(true)
            .help("Path to the job file (CSV lines: arrival, burst, priority)"))

        .arg(Arg::new("algorithm")
            .short('a')
            .long("algorithm")
            .required(true)
            .help("Scheduling algorithm, or all of them side by side")
            .value_parser(["fcfs", "sjf", "priority", "rr", "all"]))

        .arg(Arg::new("quantum")
            .short('q')
            .long("quantum")
            .help("Time quantum for Round Robin")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64))
            .required_if_eq_any([("algorithm", "rr"), ("algorithm", "all")]))
}

/// Maps the algorithm name to a policy, `None` standing for all of them.
fn select_policy(algorithm: &str, quantum: Option<i64>) -> Result<Option<Policy>, SchedulingError> {
    let policy = match algorithm {
        "fcfs" => Policy::Fcfs,
        "sjf" => Policy::Sjf,
        "priority" => Policy::Priority,
        "rr" => Policy::round_robin(quantum.unwrap_or(0))?,
        _ => return Ok(None),
    };
    Ok(Some(policy))
}

/// Per-job execution ranges and times, followed by the averages.
pub fn format_report(schedule: &Schedule) -> String {
    let mut out = format!("{} Scheduling:\n\n", schedule.policy().name());

    for report in schedule.jobs() {
        let ranges: Vec<String> = report.intervals.iter().map(|i| i.to_string()).collect();
        out.push_str(&format!("Job {} executed during time {} unit\n", report.job_id, ranges.join(", ")));
        out.push_str(&format!("Turn Around Time for Job {} is {} unit\n", report.job_id, report.turnaround_time()));
        out.push_str(&format!("Waiting Time for Job {} is {} unit\n\n", report.job_id, report.waiting_time()));
    }

    let summary = schedule.summary();
    out.push_str(&format!("Average Turn Around Time: {:.2} unit\n", summary.average_turnaround_time));
    out.push_str(&format!("Average Waiting Time: {:.2} unit\n", summary.average_waiting_time));
    out
}

/// One-line Gantt chart, `-` marking idle time.
pub fn format_gantt(schedule: &Schedule) -> String {
    let bars: Vec<String> = schedule
        .timeline()
        .iter()
        .map(|slice| match slice.job_id {
            Some(job_id) => format!("J{} [{}, {})", job_id, slice.interval.start, slice.interval.end),
            None => format!("- [{}, {})", slice.interval.start, slice.interval.end),
        })
        .collect();
    format!("| {} |", bars.join(" | "))
}

/// Side by side figures of several runs over the same jobs.
pub fn format_comparison(schedules: &[Schedule]) -> String {
    let header = format!(
        "{:<34} {:>12} {:>12} {:>9} {:>9} {:>9}",
        "Algorithm", "Avg waiting", "Avg turnar.", "Makespan", "CPU use", "Switches"
    );
    let rows = schedules.iter().map(|schedule| {
        let summary = schedule.summary();
        format!(
            "{:<34} {:>12.2} {:>12.2} {:>9} {:>8.1}% {:>9}",
            schedule.policy().name(),
            summary.average_waiting_time,
            summary.average_turnaround_time,
            summary.makespan,
            summary.utilisation() * 100.0,
            summary.context_switches
        )
    });

    std::iter::once(header)
        .chain(rows)
        .map(|line| line + "\n")
        .collect()
}

fn exit_with(err: SchedulingError) -> ! {
    eprintln!("Error: {}", err);
    process::exit(err.kind() as i32);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // cargo run <job_file> -a fcfs|sjf|priority|rr|all [-q <quantum>]
    // example : cargo run jobs.csv -a rr -q 2
    let matches: ArgMatches = build_cli_command().get_matches();

    let jobs = match read_job_file(matches.get_one::<String>("job_file").map_or("", String::as_str)) {
        Ok(jobs) => jobs,
        Err(e) => {
            error!("cannot load jobs: {}", e);
            eprintln!("Error reading job file: {}", e);
            let code = e
                .downcast_ref::<SchedulingError>()
                .map_or(EXIT_BAD_FILE, |err| err.kind() as i32);
            process::exit(code);
        }
    };

    let algorithm = matches.get_one::<String>("algorithm").map_or("all", String::as_str);
    let quantum = matches.get_one::<i64>("quantum").copied();

    match select_policy(algorithm, quantum) {
        Ok(Some(policy)) => match simulation(jobs, policy) {
            Ok(schedule) => {
                println!("{}", format_report(&schedule));
                println!("{}", format_gantt(&schedule));
            }
            Err(e) => exit_with(e),
        },
        Ok(None) => match compare(&jobs, quantum.unwrap_or(0)) {
            Ok(schedules) => print!("{}", format_comparison(&schedules)),
            Err(e) => exit_with(e),
        },
        Err(e) => exit_with(e),
    }
}
