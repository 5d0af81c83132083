use crate::error::StationError;
use crate::report::{GroupRow, IntervalRow, format_hours};
use crate::station::Station;
use crate::time::{TimeOfDay, default_reference_date};
use crate::unit::Unit;
use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::Tabled;
use tabled::settings::Style;

mod error;
mod interval;
mod report;
mod station;
mod time;
mod unit;

#[derive(Parser)]
struct Args {
    /// Path to a JSON file with intervals to start the session with
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Day onto which ON/OFF times are placed
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    reference_date: Option<NaiveDate>,

    /// Log every change to the interval lists
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

fn paginate(content: String) {
    let pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match pager {
        Ok(pager) => pager,
        Err(e) => {
            log::warn!("no pager available: {}", e);
            println!("{}", content);
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

fn print_table<T: Tabled>(rows: &[T], empty: &str) {
    if rows.is_empty() {
        println!("{}", empty);
        return;
    }
    let mut table = tabled::Table::new(rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if rows.len() > 20 {
        paginate(table.to_string());
    } else {
        println!("{}", table);
    }
}

fn parse_unit(parts: &[&str], idx: usize) -> Option<Result<Unit, StationError>> {
    parts.get(idx).map(|s| s.parse::<Unit>())
}

fn add(station: &mut Station, unit: &str, on: &str, off: &str) -> Result<(), StationError> {
    let unit = unit.parse::<Unit>()?;
    let on = on.parse::<TimeOfDay>()?;
    let off = off.parse::<TimeOfDay>()?;
    station.add_interval(unit, on, off);
    let minutes = station.compute_results().unit_minutes(unit);
    println!(
        "{} {} {}-{}. {} now at {}",
        "Added".green(),
        unit,
        on,
        off,
        unit,
        format_hours(minutes)
    );
    Ok(())
}

fn remove(station: &mut Station, unit: &str, index: &str) -> Result<(), StationError> {
    let unit = unit.parse::<Unit>()?;
    let index = index
        .parse::<usize>()
        .map_err(|_| StationError::InvalidIndex(index.to_string()))?;
    let removed = station.remove_interval(unit, index)?;
    println!("{} {} {}-{}", "Removed".yellow(), unit, removed.on, removed.off);
    Ok(())
}

fn confirm(rl: &mut Editor<CompleteHelper, DefaultHistory>, prompt: &str) -> bool {
    match rl.readline(prompt) {
        Ok(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn list(station: &Station, units: &[Unit]) {
    let reference = station.reference_date();
    let rows = units
        .iter()
        .flat_map(|unit| {
            station
                .intervals(*unit)
                .iter()
                .enumerate()
                .map(move |(i, interval)| IntervalRow::new(*unit, i, interval, reference))
        })
        .collect::<Vec<_>>();
    print_table(&rows, "No intervals entered.");
}

fn report(station: &Station, as_json: bool) -> Result<(), StationError> {
    let results = station.compute_results();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_table(&results.rows(), "");
        println!("{} {}", "Combined runtime:".bold(), format_hours(results.combined_minutes));
        println!("{} {}", "Station runtime: ".bold(), format_hours(results.station_minutes));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let reference = args.reference_date.unwrap_or_else(default_reference_date);
    let mut station = match &args.scenario {
        Some(path) => {
            let station = Station::load_from_file(path, reference)?;
            println!("Station online. Loaded {} interval(s) from {}", station.len(), path.display());
            station
        }
        None => {
            println!("Station online. Type 'help' for commands.");
            Station::new(reference)
        }
    };

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: vec![
            "add".to_string(),
            "rm".to_string(),
            "clear".to_string(),
            "ls".to_string(),
            "merged".to_string(),
            "report".to_string(),
            "help".to_string(),
            "exit".to_string(),
        ],
    };

    let mut rl: Editor<CompleteHelper, DefaultHistory> = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                let outcome = match parts[0] {
                    "add" => {
                        if let (Some(unit), Some(on), Some(off)) = (parts.get(1), parts.get(2), parts.get(3)) {
                            add(&mut station, unit, on, off)
                        } else {
                            println!("Usage: add <unit> <HH:MM> <HH:MM>");
                            Ok(())
                        }
                    },
                    "rm" => {
                        if let (Some(unit), Some(index)) = (parts.get(1), parts.get(2)) {
                            remove(&mut station, unit, index)
                        } else {
                            println!("Usage: rm <unit> <index>");
                            Ok(())
                        }
                    },
                    "clear" => match parse_unit(&parts, 1) {
                        Some(Ok(unit)) => {
                            station.clear_unit(unit);
                            println!("{} {}", "Cleared".yellow(), unit);
                            Ok(())
                        },
                        Some(Err(e)) => Err(e),
                        None => {
                            if station.is_empty() {
                                println!("Nothing to clear.");
                            } else if confirm(&mut rl, &format!("Clear all {} interval(s)? [y/N] ", station.len())) {
                                station.clear_all();
                                println!("{}", "Cleared all units.".yellow());
                            } else {
                                println!("Cancelled.");
                            }
                            Ok(())
                        },
                    },
                    "ls" => match parse_unit(&parts, 1) {
                        Some(Ok(unit)) => {
                            list(&station, &[unit]);
                            Ok(())
                        },
                        Some(Err(e)) => Err(e),
                        None => {
                            list(&station, &Unit::ALL);
                            Ok(())
                        },
                    },
                    "merged" => {
                        let reference = station.reference_date();
                        let rows = station.merged().iter()
                            .enumerate()
                            .map(|(i, g)| GroupRow::new(i, g, reference))
                            .collect::<Vec<_>>();
                        print_table(&rows, "No intervals entered.");
                        Ok(())
                    },
                    "report" => report(&station, parts.get(1) == Some(&"json")),
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  add <u> <on> <off>  - Add an interval to unit <u> (1-4), times as HH:MM; off <= on runs past midnight");
                        println!("  rm <u> <i>          - Remove interval <i> of unit <u> (index as shown by ls)");
                        println!("  clear [u]           - Clear unit <u>, or every unit after confirmation");
                        println!("  ls [u]              - List entered intervals, optionally for one unit");
                        println!("  merged              - List the merged station runtime groups");
                        println!("  report [json]       - Show per-unit, combined and station runtime");
                        println!("  help / ?            - Show this help menu");
                        println!("  exit / quit         - Exit\n");
                        Ok(())
                    },
                    "exit" | "quit" => break,
                    _ => {
                        println!("Unknown command: {}", parts[0]);
                        Ok(())
                    },
                };
                if let Err(e) = outcome {
                    println!("{} {}", "Error:".red(), e);
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
