//! Console rendering of progress events.

use colored::Colorize;
use monorun_runner::{ProgressEvent, Reporter};

/// Prints one line per event; failures go to stderr.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Provisioned { dir } => {
                println!("{} output directory {}", "·".bright_black(), dir.display());
            }
            ProgressEvent::Started { unit, goals } => {
                println!(
                    "{} {} {} '{}'",
                    "==>".cyan().bold(),
                    goal_label(&goals),
                    unit.kind,
                    unit.name.to_string().bold()
                );
            }
            ProgressEvent::Failed {
                unit,
                goals,
                outcome,
            } => {
                eprintln!(
                    "{} {} failed for {} '{}' (exit {})",
                    "✗".red().bold(),
                    goal_label(&goals),
                    unit.kind,
                    unit.name,
                    outcome.exit_code()
                );
            }
            ProgressEvent::Cleared { dir, removed } => {
                println!(
                    "{} cleared {} ({removed} entries)",
                    "·".bright_black(),
                    dir.display()
                );
            }
            ProgressEvent::Finished { operation, units } => {
                println!("{} {operation} finished ({units} units)", "✓".green().bold());
            }
        }
    }
}

fn goal_label(goals: &[String]) -> String {
    if goals.is_empty() {
        "default goal".to_string()
    } else {
        goals.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_label_names_every_goal() {
        assert_eq!(goal_label(&[]), "default goal");
        assert_eq!(
            goal_label(&["build".to_string(), "test".to_string()]),
            "build test"
        );
    }
}
