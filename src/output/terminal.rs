//! Terminal rendering of session reports.

use colored::Colorize;

use crate::config::IterationCount;
use crate::history::{History, HistoryRecord};
use crate::session::{SessionReport, TestReport};

/// Format a whole session as plain per-test summary lines.
///
/// One line per test with best/avg/worst in seconds per iteration, headed
/// by the session configuration.
pub fn format_report(report: &SessionReport) -> String {
    let mut output = String::new();
    output.push_str("perftrack results:\n");
    output.push_str(&format!(
        "repeat = {} and number = {}\n",
        report.repeat,
        format_number(report.number)
    ));
    for test in &report.tests {
        output.push_str(&format!(
            "{} ... best {:.6} s, avg {:.6} s, worst {:.6} s\n",
            test.id, test.current.best, test.current.average, test.current.worst
        ));
    }
    output
}

/// Format a session as per-test comparison tables against prior history.
///
/// Tests with no prior record get only a `current` column.
pub fn format_comparison(report: &SessionReport) -> String {
    let mut output = String::new();
    output.push_str("perftrack results:\n");
    output.push_str(&format!(
        "repeat = {} and number = {}\n",
        report.repeat,
        format_number(report.number)
    ));
    for test in &report.tests {
        output.push_str(&format!("{}:\n", test.id));
        output.push_str(&format_table(test));
    }
    output
}

/// Format the full persisted history: one metric table per recorded test,
/// in identity order. This renders everything ever tracked, including tests
/// that did not run in the current session.
pub fn format_history(history: &History) -> String {
    let mut output = String::new();
    output.push_str("perftrack history:\n");
    for (id, record) in history.iter() {
        output.push_str(&format!("{id}:\n"));
        output.push_str(&format_record(record));
    }
    output
}

fn format_record(record: &HistoryRecord) -> String {
    const METRICS: [&str; 3] = ["best", "avg", "worst"];

    let mut output = format!(
        "  {:<8}{:>14}{:>14}{:>14}\n",
        "metric", "last [s]", "best [s]", "worst [s]"
    );
    let columns = [&record.last, &record.best, &record.worst];
    for (row, metric) in METRICS.iter().enumerate() {
        output.push_str(&format!("  {metric:<8}"));
        for experiment in columns {
            let value = [experiment.best, experiment.avg, experiment.worst][row];
            output.push_str(&format!("{:>14}", format!("{value:.6}")));
        }
        output.push('\n');
    }
    output
}

fn format_number(sentinel: usize) -> String {
    match IterationCount::from_sentinel(sentinel) {
        IterationCount::Auto => "auto".to_string(),
        IterationCount::Fixed(n) => n.to_string(),
    }
}

/// One test's metric table: rows best/avg/worst, columns current plus the
/// persisted last/best/worst experiments when available.
fn format_table(test: &TestReport) -> String {
    const METRICS: [&str; 3] = ["best", "avg", "worst"];

    let current = [
        test.current.best,
        test.current.average,
        test.current.worst,
    ];

    let mut header = format!("  {:<8}{:>14}", "metric", "current [s]");
    let mut columns: Vec<[f64; 3]> = Vec::new();
    if let Some(previous) = &test.previous {
        for (name, experiment) in [
            ("last", &previous.last),
            ("best", &previous.best),
            ("worst", &previous.worst),
        ] {
            header.push_str(&format!("{:>14}", format!("{name} [s]")));
            columns.push([experiment.best, experiment.avg, experiment.worst]);
        }
    }

    let mut output = header;
    output.push('\n');
    for (row, metric) in METRICS.iter().enumerate() {
        let cell = format!("{:>14}", format!("{:.6}", current[row]));
        let cell = colorize_current(test, metric, &cell);
        output.push_str(&format!("  {metric:<8}{cell}"));
        for column in &columns {
            output.push_str(&format!("{:>14}", format!("{:.6}", column[row])));
        }
        output.push('\n');
    }
    output
}

/// Color the current `avg` cell against the historical extremes: green for
/// a new best average, yellow for a new worst.
fn colorize_current(test: &TestReport, metric: &str, cell: &str) -> String {
    if metric != "avg" {
        return cell.to_string();
    }
    let Some(previous) = &test.previous else {
        return cell.to_string();
    };
    if test.current.average < previous.best.avg {
        cell.green().bold().to_string()
    } else if test.current.average > previous.worst.avg {
        cell.yellow().bold().to_string()
    } else {
        cell.to_string()
    }
}
