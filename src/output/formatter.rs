use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;

use crate::diagnostics::Diagnostics;
use crate::github::types::ItemState;
use crate::tally::{day_stats, Category, CategoryTotals, DayStat, ItemAge, Tally};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Check if stderr is a TTY; diagnostics go there, not to stdout
pub fn should_use_colors_stderr() -> bool {
    std::io::stderr().is_terminal()
}

/// Format the open/closed totals of one category
/// Format: "{heading}\n\topen {n}\n\tclosed {n}"
pub fn format_totals(category: Category, totals: &CategoryTotals, use_colors: bool) -> String {
    if use_colors {
        format!(
            "{}\n\topen {}\n\tclosed {}",
            category.heading().bold(),
            totals.open.green(),
            totals.closed.red()
        )
    } else {
        format!(
            "{}\n\topen {}\n\tclosed {}",
            category.heading(),
            totals.open,
            totals.closed
        )
    }
}

fn format_age(age: &ItemAge, use_colors: bool) -> String {
    match (age.state, use_colors) {
        (ItemState::Open, true) => format!("{} ({})", age.state.green(), age.days),
        (ItemState::Closed, true) => format!("{} ({})", age.state.red(), age.days),
        (_, false) => format!("{} ({})", age.state, age.days),
    }
}

/// Format one day of activity
/// Format: "{day} -> {count} {label} ( {net:+} ) -> {state} ({age}), ..."
pub fn format_day_line(category: Category, stat: &DayStat, use_colors: bool) -> String {
    let ages = stat
        .ages
        .iter()
        .map(|age| format_age(age, use_colors))
        .collect::<Vec<_>>()
        .join(", ");
    let net = format!("{:+}", stat.net);

    if use_colors {
        format!(
            "{} -> {} {} ( {} ) -> {}",
            stat.day.cyan(),
            stat.count,
            category.label(),
            net.bold(),
            ages
        )
    } else {
        format!(
            "{} -> {} {} ( {} ) -> {}",
            stat.day,
            stat.count,
            category.label(),
            net,
            ages
        )
    }
}

/// Format the day-by-day report of one category, oldest day first
pub fn format_day_report(category: Category, stats: &[DayStat], use_colors: bool) -> String {
    let header = format!("{}s per day", category.label());
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    std::iter::once(header)
        .chain(stats.iter().map(|stat| format_day_line(category, stat, use_colors)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the whole report: totals for both categories, then the pull
/// request days, then the issue days
pub fn format_report(tally: &Tally<'_>, now: DateTime<Utc>, use_colors: bool) -> String {
    let order = [Category::PullRequest, Category::Issue];

    let totals = order
        .iter()
        .map(|&category| format_totals(category, &tally.category(category).totals, use_colors));

    let days = order.iter().map(|&category| {
        let stats = day_stats(&tally.category(category).days, now);
        format_day_report(category, &stats, use_colors)
    });

    totals.chain(days).collect::<Vec<_>>().join("\n")
}

/// Summarize the run's diagnostics for stderr; empty when there are none
pub fn format_diagnostics(diagnostics: &Diagnostics, use_colors: bool) -> String {
    if diagnostics.is_empty() {
        return String::new();
    }

    let header = format!("{} problem(s) during this run:", diagnostics.len());
    let header = if use_colors {
        header.yellow().to_string()
    } else {
        header
    };

    std::iter::once(header)
        .chain(diagnostics.iter().map(|d| format!("  - {}", d)))
        .collect::<Vec<_>>()
        .join("\n")
}
