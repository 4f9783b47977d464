//! CLI utility to replay a scripted drag session against an in-memory board.

use std::path::PathBuf;

use bases_kanban::board::HostCall;
use bases_kanban::logging;
use bases_kanban::scenario::{ReplayReport, Replay, Scenario};
use bases_kanban::settings;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    let mut settings = match &options.settings_path {
        Some(path) => settings::load_settings_from(path),
        None => settings::load_or_default(),
    }
    .map_err(|err| err.to_string())?;
    if options.no_log_file {
        settings.logging.write_file = false;
    }
    if let Err(err) = logging::init(&settings.logging) {
        eprintln!("Logging disabled: {err}");
    }
    let scenario = Scenario::load(&options.scenario_path).map_err(|err| err.to_string())?;
    let report = Replay::run(&scenario, settings).map_err(|err| err.to_string())?;

    if options.json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("Failed to encode report: {err}"))?;
        println!("{text}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &ReplayReport) {
    for step in &report.steps {
        let target = step.target.as_deref().unwrap_or("-");
        match &step.skipped {
            Some(reason) => println!("#{:<3} {:?} {target}: skipped ({reason})", step.index, step.kind),
            None => println!(
                "#{:<3} {:?} {target}{}",
                step.index,
                step.kind,
                if step.accepted { " [accepted]" } else { "" }
            ),
        }
    }
    println!();
    if report.calls.is_empty() {
        println!("No host calls.");
    }
    for call in &report.calls {
        match call {
            HostCall::ColumnReorder { new_order } => {
                println!("reorder columns -> {}", new_order.join(", "))
            }
            HostCall::CardMoveToColumn { file, new_value } => {
                println!("move {file} -> {new_value:?}")
            }
            HostCall::CardReorder {
                file,
                target_column,
                target_index,
                sort_value,
            } => println!("reorder {file} in {target_column} at {target_index} (sort value {sort_value})"),
            HostCall::Notice { message, tone } => println!("notice [{tone}]: {message}"),
        }
    }
    println!();
    for column in &report.columns {
        println!("{}: {}", column.name, column.entries.join(", "));
    }
    if !report.idle || report.indicator_visible || report.lingering_markers > 0 {
        println!(
            "\nwarning: drag not fully cleaned up (idle={}, indicator_visible={}, markers={})",
            report.idle, report.indicator_visible, report.lingering_markers
        );
    }
}

#[derive(Default)]
struct Options {
    scenario_path: PathBuf,
    settings_path: Option<PathBuf>,
    json: bool,
    no_log_file: bool,
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut scenario = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--scenario" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--scenario requires a value".to_string())?;
                scenario = Some(PathBuf::from(value));
            }
            "--settings" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--settings requires a value".to_string())?;
                options.settings_path = Some(PathBuf::from(value));
            }
            "--json" => options.json = true,
            "--no-log-file" => options.no_log_file = true,
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }
    options.scenario_path = scenario.ok_or_else(|| "--scenario is required".to_string())?;
    Ok(Some(options))
}

fn help_text() -> String {
    [
        "bases-kanban-replay",
        "",
        "Replays a scripted drag session against an in-memory kanban board.",
        "",
        "Usage:",
        "  bases-kanban-replay --scenario <file.toml> [--settings <file.toml>] [--json]",
        "",
        "Options:",
        "  --scenario <path>  Scenario TOML (board, entries, events).",
        "  --settings <path>  Settings TOML (defaults to the app settings file).",
        "  --json             Print the report as JSON.",
        "  --no-log-file      Log to stderr only.",
    ]
    .join("\n")
}
