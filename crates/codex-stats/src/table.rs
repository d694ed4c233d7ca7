//! Fixed-width bordered table rendering for the daily report.

use stats_core::formatting::format_count;
use stats_core::models::{DailyTotals, ReportRow};

const HEADERS: [&str; 6] = ["Date", "User", "Assistant", "Prompt", "Completion", "Total"];

/// Render the report as a bordered text table.
///
/// Column widths are computed from the widest cell (header, data, or Sum)
/// in each column; the date column is left-aligned, numeric columns are
/// right-aligned and thousands-separated. With zero rows the literal
/// notice `No records found.` is returned instead.
pub fn render(rows: &[ReportRow], totals: &DailyTotals) -> String {
    if rows.is_empty() {
        return "No records found.".to_string();
    }

    let data_rows: Vec<[String; 6]> = rows.iter().map(row_cells).collect();
    let sum_row = totals_cells(totals);

    let mut widths: [usize; 6] = HEADERS.map(str::len);
    for row in data_rows.iter().chain(std::iter::once(&sum_row)) {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let border = border_line(&widths);
    let header_row: [String; 6] = HEADERS.map(String::from);

    let mut lines = Vec::with_capacity(data_rows.len() + 6);
    lines.push(border.clone());
    lines.push(format_row(&header_row, &widths, false));
    lines.push(border.clone());
    for row in &data_rows {
        lines.push(format_row(row, &widths, true));
    }
    lines.push(border.clone());
    lines.push(format_row(&sum_row, &widths, true));
    lines.push(border);

    lines.join("\n")
}

fn row_cells(row: &ReportRow) -> [String; 6] {
    [
        row.day.to_string(),
        format_count(row.totals.user_msgs),
        format_count(row.totals.assistant_msgs),
        format_count(row.totals.prompt_tokens),
        format_count(row.totals.completion_tokens),
        format_count(row.totals.total_tokens),
    ]
}

fn totals_cells(totals: &DailyTotals) -> [String; 6] {
    [
        "Sum".to_string(),
        format_count(totals.user_msgs),
        format_count(totals.assistant_msgs),
        format_count(totals.prompt_tokens),
        format_count(totals.completion_tokens),
        format_count(totals.total_tokens),
    ]
}

/// `| cell | cell | … |`, first column left-aligned, the rest right-aligned
/// when `right_align_numbers` is set (data and Sum rows; headers are all
/// left-aligned).
fn format_row(cells: &[String; 6], widths: &[usize; 6], right_align_numbers: bool) -> String {
    let mut parts = Vec::with_capacity(cells.len());
    for (i, (cell, &width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i > 0 && right_align_numbers {
            parts.push(format!("{cell:>width$}"));
        } else {
            parts.push(format!("{cell:<width$}"));
        }
    }
    format!("| {} |", parts.join(" | "))
}

/// `+------+------+…+` with each segment two wider than its column.
fn border_line(widths: &[usize; 6]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
    format!("+{}+", segments.join("+"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(day: &str, totals: DailyTotals) -> ReportRow {
        ReportRow {
            day: day.parse::<NaiveDate>().unwrap(),
            totals,
        }
    }

    fn sample_totals() -> (Vec<ReportRow>, DailyTotals) {
        let rows = vec![
            row(
                "2024-01-15",
                DailyTotals {
                    user_msgs: 1,
                    assistant_msgs: 1,
                    prompt_tokens: 15,
                    completion_tokens: 20,
                    total_tokens: 35,
                },
            ),
            row(
                "2024-01-16",
                DailyTotals {
                    user_msgs: 2,
                    assistant_msgs: 2,
                    prompt_tokens: 1000,
                    completion_tokens: 2500,
                    total_tokens: 3500,
                },
            ),
        ];
        let mut sum = DailyTotals::default();
        for r in &rows {
            sum.add_totals(&r.totals);
        }
        (rows, sum)
    }

    #[test]
    fn test_empty_report_notice() {
        assert_eq!(render(&[], &DailyTotals::default()), "No records found.");
    }

    #[test]
    fn test_table_structure() {
        let (rows, sum) = sample_totals();
        let table = render(&rows, &sum);
        let lines: Vec<&str> = table.lines().collect();

        // border, header, border, 2 data rows, border, sum, border
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with('+') && lines[0].ends_with('+'));
        assert_eq!(lines[0], lines[2]);
        assert_eq!(lines[0], lines[5]);
        assert_eq!(lines[0], lines[7]);
        assert!(lines[1].contains("Date"));
        assert!(lines[6].starts_with("| Sum"));
    }

    #[test]
    fn test_all_lines_share_one_width() {
        let (rows, sum) = sample_totals();
        let table = render(&rows, &sum);
        let mut widths = table.lines().map(|l| l.len());
        let first = widths.next().unwrap();
        assert!(widths.all(|w| w == first));
    }

    #[test]
    fn test_numeric_cells_thousands_separated() {
        let (rows, sum) = sample_totals();
        let table = render(&rows, &sum);
        assert!(table.contains("1,000"));
        assert!(table.contains("2,500"));
        // Sum column values: 1,015 / 2,520 / 3,535.
        assert!(table.contains("3,535"));
    }

    #[test]
    fn test_alignment() {
        let (rows, sum) = sample_totals();
        let table = render(&rows, &sum);
        let lines: Vec<&str> = table.lines().collect();

        // Date cells are left-aligned: the cell starts right after "| ".
        assert!(lines[3].starts_with("| 2024-01-15 |"));
        // Numeric cells are right-aligned: "Completion" is 10 wide, so the
        // first row's 20 is padded on the left.
        assert!(lines[3].contains("|         20 |"));
    }

    #[test]
    fn test_sum_row_values() {
        let (rows, sum) = sample_totals();
        let table = render(&rows, &sum);
        let sum_line = table.lines().nth(6).unwrap();
        assert!(sum_line.contains("1,015"));
        assert!(sum_line.contains("2,520"));
        assert!(sum_line.contains("3,535"));
    }
}
