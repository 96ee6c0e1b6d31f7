use anyhow::Result;
use colored::Colorize;
use leto::calendars;
use leto::prelude::*;
use leto::{ENGINE_NAME, VERSION as LIB_VERSION};
use rustyline::highlight::Highlighter;
use rustyline::Editor;
use rustyline_derive::{Completer, Helper, Hinter, Validator};
use std::borrow::Cow;
use std::env;
use std::path::PathBuf;
use tracing::info;

const SHELL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A custom helper struct for rustyline that enables syntax highlighting.
#[derive(Completer, Helper, Hinter, Validator)]
struct MyHighlighter;

impl Highlighter for MyHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if let Some((command, rest)) = line.split_once(' ') {
            let colored_command = command.yellow().bold();
            let colored_rest = rest.yellow();
            Cow::Owned(format!("{} {}", colored_command, colored_rest))
        } else {
            Cow::Owned(line.yellow().bold().to_string())
        }
    }
    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

fn print_banner() {
    if env::var("QUIET_MODE").is_ok() {
        return;
    }
    const LOGO_TEXT: &str = include_str!("../logo.log");
    println!("{}", LOGO_TEXT.cyan());

    let version_string = format!(
        "          Shell   v{:<8} Library   v{:<8}",
        SHELL_VERSION, LIB_VERSION
    );
    println!("{}", "-".repeat(64).dimmed());
    println!("{}", version_string);
    println!("{}", "-".repeat(64).dimmed());
}

/// Prints one line per period, smallest first.
fn print_periods(periods: &[Period<'_>]) {
    for period in periods {
        let structure = period.structure().map_or("-", |s| s.name());
        let start = period
            .start_at_days_after_epoch()
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        println!(
            "  {:<16} {:>8}  absolute {:>10}  from day {:>10}  ({})",
            period.period_type().name().cyan(),
            period.name(),
            period.absolute_number(),
            start,
            structure.dimmed()
        );
    }
}

/// Builds one synthetic period per number, using each type's first structure.
fn synthetic_periods<'c>(calendar: &'c Calendar, args: &[&str]) -> Result<Vec<Period<'c>>> {
    let type_count = calendar.period_types().len();
    if args.len() > type_count {
        anyhow::bail!(
            "got {} counts, but calendar \"{}\" has only {} period types",
            args.len(),
            calendar.name(),
            type_count
        );
    }
    let mut periods = Vec::with_capacity(args.len());
    for (period_type, arg) in calendar.period_types().iter().zip(args) {
        let number: u64 = arg
            .parse()
            .map_err(|_| anyhow::anyhow!("'{}' is not a valid count", arg))?;
        let structure = *period_type.structures().first().ok_or_else(|| {
            DefinitionError::NoStructures {
                period_type: period_type.name().to_string(),
            }
        })?;
        periods.push(Period::synthetic(calendar, period_type.id(), structure, number)?);
    }
    Ok(periods)
}

fn switch_calendar(target: &str) -> Result<Calendar> {
    if target.ends_with(".toml") {
        return leto::definition::load_calendar(&PathBuf::from(target));
    }
    Ok(calendars::by_name(target)?)
}

fn main() -> Result<()> {
    print_banner();

    let config = LetoConfig::load(env::args().nth(1).map(PathBuf::from).as_deref())?;
    leto::logging::init(&config.log_level);

    let mut calendar = config.calendar()?;
    info!("{} loaded calendar \"{}\".", ENGINE_NAME, calendar.name());

    let mut rl = Editor::new()?;
    let helper = MyHighlighter {};
    rl.set_helper(Some(helper));

    println!("{} is ready. Type 'help' for commands or 'exit' to quit.", ENGINE_NAME.cyan());

    loop {
        let prompt = format!("{}", format!("{} >> ", calendar.name()).cyan().bold());
        let readline = rl.readline(&prompt);
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let args = line.split_whitespace().collect::<Vec<_>>();

                if let Some(command) = args.first() {
                    match *command {
                        "decompose" => match args.get(1).map(|s| s.parse::<u64>()) {
                            Some(Ok(days)) => match calendar.decompose(days) {
                                Ok(periods) => print_periods(&periods),
                                Err(e) => println!("{} {}", "Error:".red(), e),
                            },
                            Some(Err(_)) => println!("Error: '{}' is not a valid day count.", args[1]),
                            None => println!("Usage: decompose <DAYS>"),
                        },
                        "today" => match calendar.days_since_epoch(&SystemClock) {
                            Ok(days) => {
                                println!("--> Day {} since the epoch.", days);
                                match calendar.decompose(days) {
                                    Ok(periods) => print_periods(&periods),
                                    Err(e) => println!("{} {}", "Error:".red(), e),
                                }
                            }
                            Err(e) => println!("{} {}", "Error:".red(), e),
                        },
                        "recompose" => {
                            if args.len() < 2 {
                                println!("Usage: recompose <N0> <N1> ... (smallest period type first)");
                                continue;
                            }
                            match synthetic_periods(&calendar, &args[1..])
                                .and_then(|periods| Ok(recompose(&periods)?))
                            {
                                Ok(days) => println!("--> {} days.", days),
                                Err(e) => println!("{} {}", "Error:".red(), e),
                            }
                        }
                        "check" => match calendar.check_correctness() {
                            None => println!("--> Calendar \"{}\" is well defined.", calendar.name()),
                            Some(report) => {
                                for line in report.lines() {
                                    println!("  {}", line.red());
                                }
                            }
                        },
                        "types" => {
                            for period_type in calendar.period_types() {
                                let lengths = period_type
                                    .structures()
                                    .iter()
                                    .filter_map(|id| calendar.structure(*id))
                                    .map(|s| format!("{} ({}d)", s.name(), s.length_in_days()))
                                    .collect::<Vec<_>>()
                                    .join(", ");
                                println!("  {:<16} {}", period_type.name().cyan(), lengths);
                            }
                        }
                        "use" => match args.get(1) {
                            Some(target) => match switch_calendar(target) {
                                Ok(next) => {
                                    calendar = next;
                                    println!("--> Switched to calendar \"{}\".", calendar.name());
                                }
                                Err(e) => println!("{} {}", "Error:".red(), e),
                            },
                            None => println!(
                                "Usage: use <{}|FILE.toml>",
                                calendars::BUILT_IN.join("|")
                            ),
                        },
                        "help" => {
                            println!("Available commands:");
                            println!("  decompose <D>         - Splits day D (since the epoch) into periods.");
                            println!("  today                 - Decomposes the current day.");
                            println!("  recompose <N0> ...    - Adds up counts, smallest period type first.");
                            println!("  check                 - Runs the calendar correctness checks.");
                            println!("  types                 - Lists period types and their structures.");
                            println!("  use <NAME|FILE.toml>  - Switches to another calendar.");
                            println!("  exit                  - Quits the shell.");
                        }
                        "exit" => break,
                        _ => println!("Unknown command: '{}'. Type 'help'.", line),
                    }
                }
            }
            Err(_) => {
                println!("Exiting letoshell...");
                break;
            }
        }
    }

    Ok(())
}
