pub mod formatter;

pub use formatter::{
    format_day_line, format_day_report, format_diagnostics, format_report, format_totals,
    should_use_colors, should_use_colors_stderr,
};
