//! Plain-text dashboard report for the CLI.

use std::fmt::Write;

use super::PageRenderer;
use crate::page::Page;
use crate::views::{AlertsModel, ChartModel, MedicineTable, ALL_CLEAR_MESSAGE, COLUMNS};

const DEFAULT_BAR_WIDTH: usize = 30;

pub struct TerminalRenderer {
    bar_width: usize,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

impl TerminalRenderer {
    pub fn with_bar_width(bar_width: usize) -> Self {
        Self { bar_width }
    }

    /// Aligned table of the visible rows, with a status column.
    pub fn render_table(&self, table: &MedicineTable) -> String {
        let mut header: Vec<&str> = COLUMNS.to_vec();
        header.push("Status");

        let lines: Vec<Vec<String>> = table
            .visible_rows()
            .map(|row| {
                let mut cells = row.cells().to_vec();
                cells.push(row.css_class().to_string());
                cells
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for cells in &lines {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        write_aligned(&mut out, header.iter().copied(), &widths);
        let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let _ = writeln!(out, "{}", "-".repeat(rule));
        for cells in &lines {
            write_aligned(&mut out, cells.iter().map(String::as_str), &widths);
        }
        if lines.is_empty() {
            out.push_str("(no medicines)\n");
        }
        out
    }

    pub fn render_alerts(&self, alerts: &AlertsModel) -> String {
        let mut out = String::new();
        match alerts {
            AlertsModel::AllClear => {
                let _ = writeln!(out, "{ALL_CLEAR_MESSAGE}");
            }
            AlertsModel::Warnings(sections) => {
                for section in sections {
                    let _ = writeln!(out, "{}", section.heading());
                    for line in section.lines() {
                        let _ = writeln!(out, "  - {line}");
                    }
                }
            }
        }
        out
    }

    /// Horizontal bars scaled to the largest segment.
    pub fn render_chart(&self, chart: &ChartModel) -> String {
        let label_width = chart
            .segments
            .iter()
            .map(|s| s.label.len())
            .max()
            .unwrap_or(0);
        let max = chart.segments.iter().map(|s| s.value.max(0)).max().unwrap_or(0);

        let mut out = String::new();
        for segment in &chart.segments {
            let bar = if max == 0 {
                0
            } else {
                (segment.value.max(0) as usize * self.bar_width) / max as usize
            };
            let _ = writeln!(
                out,
                "{:<label_width$}  {:<bar_width$}  {}",
                segment.label,
                "#".repeat(bar),
                segment.value,
                bar_width = self.bar_width,
            );
        }
        out
    }
}

fn write_aligned<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

impl PageRenderer for TerminalRenderer {
    fn render(&self, page: &Page) -> String {
        let mut out = String::new();

        if let Some(notice) = &page.notice {
            let _ = writeln!(out, "{notice}\n");
        }

        let counts = [
            ("Total", page.total_count),
            ("Expired", page.expired_count),
            ("Low stock", page.low_stock_count),
        ];
        let shown: Vec<String> = counts
            .iter()
            .filter_map(|(label, value)| value.map(|v| format!("{label}: {v}")))
            .collect();
        if !shown.is_empty() {
            let _ = writeln!(out, "{}\n", shown.join("   "));
        }

        if let Some(chart) = &page.chart {
            out.push_str(&self.render_chart(chart));
            out.push('\n');
        }

        if let Some(alerts) = &page.alerts {
            out.push_str("== Alerts ==\n");
            out.push_str(&self.render_alerts(alerts));
            out.push('\n');
        }

        if let Some(table) = &page.medicine_table {
            let _ = writeln!(
                out,
                "== Medicines ({} of {}) ==",
                table.visible_rows().count(),
                table.len()
            );
            out.push_str(&self.render_table(table));
        }

        out
    }
}
