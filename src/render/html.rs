//! Self-contained HTML dashboard document.
//!
//! Every piece of backend text goes through [`escape_html`]. Rows are
//! written into one pre-sized buffer. Search and category filtering run in
//! the browser over the rendered rows; `search_text` and `category` only
//! set the initial state.

use std::f64::consts::PI;
use std::fmt::Write;

use super::PageRenderer;
use crate::models::StockCategory;
use crate::page::Page;
use crate::views::{
    edit_location, AlertsModel, ChartModel, MedicineRow, MedicineTable, ALL_CLEAR_MESSAGE, COLUMNS,
    DELETE_CONFIRMATION,
};

const CHART_RADIUS: f64 = 60.0;
const CHART_CENTER: f64 = 80.0;
const CHART_EMPTY_COLOR: &str = "#ecf0f1";

/// Rough per-row size, used to pre-size the table buffer.
const ROW_CAPACITY_HINT: usize = 640;

pub struct HtmlRenderer {
    update_page: String,
    /// Path the dashboard is served under; delete forms post below it.
    dashboard_path: String,
}

impl HtmlRenderer {
    pub fn new(update_page: &str, dashboard_path: &str) -> Self {
        Self {
            update_page: update_page.to_string(),
            dashboard_path: dashboard_path.trim_end_matches('/').to_string(),
        }
    }

    /// `<tr>` elements for the table body.
    pub fn render_rows(&self, table: &MedicineTable) -> String {
        let mut out = String::with_capacity(table.len() * ROW_CAPACITY_HINT);
        for row in &table.rows {
            self.write_row(&mut out, row);
        }
        out
    }

    fn write_row(&self, out: &mut String, row: &MedicineRow) {
        let _ = write!(
            out,
            "<tr class=\"{}\" data-id=\"{}\"{}>",
            row.css_class(),
            row.medicine_id,
            if row.visible { "" } else { " style=\"display:none\"" }
        );
        for cell in row.cells() {
            let _ = write!(out, "<td>{}</td>", escape_html(&cell));
        }
        let _ = write!(
            out,
            "<td class=\"actions\"><form method=\"post\" action=\"{base}/medicines/{id}/delete\" \
             onsubmit=\"return confirm('{confirm}')\">\
             <button type=\"submit\" class=\"btn btn-danger btn-sm\">Delete</button></form> \
             <a class=\"btn btn-primary btn-sm\" href=\"{edit}\">Edit</a></td></tr>\n",
            base = escape_html(&self.dashboard_path),
            id = row.medicine_id,
            confirm = escape_html(DELETE_CONFIRMATION),
            edit = escape_html(&edit_location(&self.update_page, row.medicine_id)),
        );
    }

    fn write_counts(&self, out: &mut String, page: &Page) {
        let counts = [
            (page.layout.total_count, "totalCount", "Total", page.total_count),
            (page.layout.expired_count, "expiredCount", "Expired", page.expired_count),
            (page.layout.low_stock_count, "lowStockCount", "Low Stock", page.low_stock_count),
        ];
        if counts.iter().all(|(present, ..)| !present) {
            return;
        }
        out.push_str("<section class=\"summary\">\n");
        for (present, id, label, value) in counts {
            if !present {
                continue;
            }
            let shown = value.map(|v| v.to_string()).unwrap_or_default();
            let _ = writeln!(
                out,
                "  <div class=\"stat\"><span>{label}</span><strong id=\"{id}\">{shown}</strong></div>"
            );
        }
        out.push_str("</section>\n");
    }

    fn write_alerts(&self, out: &mut String, alerts: Option<&AlertsModel>) {
        out.push_str("<section id=\"alerts\">\n");
        match alerts {
            None => {}
            Some(AlertsModel::AllClear) => {
                let _ = writeln!(out, "<p class=\"no-alert\">{}</p>", escape_html(ALL_CLEAR_MESSAGE));
            }
            Some(AlertsModel::Warnings(sections)) => {
                for section in sections {
                    let _ = writeln!(out, "<h4>{}</h4>", section.heading());
                    for line in section.lines() {
                        let _ = writeln!(out, "<div>{}</div>", escape_html(&line));
                    }
                }
            }
        }
        out.push_str("</section>\n");
    }

    fn write_filters(&self, out: &mut String, page: &Page) {
        if !page.layout.search_input && !page.layout.category_filter {
            return;
        }
        out.push_str("<div class=\"filters\">\n");
        if page.layout.search_input {
            let _ = writeln!(
                out,
                "  <input id=\"searchBox\" type=\"search\" placeholder=\"Search medicines\" value=\"{}\" \
                 oninput=\"searchMedicine(this.value)\">",
                escape_html(&page.search_text)
            );
        }
        if page.layout.category_filter {
            out.push_str("  <select id=\"expiryFilter\" onchange=\"filterMedicines(this.value)\">\n");
            let options = [
                ("", "All"),
                (StockCategory::Expired.as_str(), "Expired"),
                (StockCategory::Near.as_str(), "Near Expiry"),
                (StockCategory::Low.as_str(), "Low Stock"),
            ];
            for (value, label) in options {
                let selected = if page.category == value { " selected" } else { "" };
                let _ = writeln!(out, "    <option value=\"{value}\"{selected}>{label}</option>");
            }
            out.push_str("  </select>\n");
        }
        out.push_str("</div>\n");
        out.push_str(FILTER_SCRIPT);
    }

    fn write_table(&self, out: &mut String, table: Option<&MedicineTable>) {
        out.push_str("<table class=\"medicines\">\n<thead><tr>");
        for column in COLUMNS {
            let _ = write!(out, "<th>{column}</th>");
        }
        out.push_str("<th>Actions</th></tr></thead>\n<tbody id=\"medicineTable\">\n");
        if let Some(table) = table {
            out.push_str(&self.render_rows(table));
        }
        out.push_str("</tbody>\n</table>\n");
    }
}

impl PageRenderer for HtmlRenderer {
    fn render(&self, page: &Page) -> String {
        let rows = page.medicine_table.as_ref().map(|t| t.len()).unwrap_or(0);
        let mut out = String::with_capacity(4096 + rows * ROW_CAPACITY_HINT);

        out.push_str(DOCUMENT_HEAD);
        out.push_str("<h1>Pharmacy Inventory Dashboard</h1>\n");
        if let Some(notice) = &page.notice {
            let _ = writeln!(
                out,
                "<div class=\"notice\" role=\"status\">{}</div>",
                escape_html(notice)
            );
        }
        self.write_counts(&mut out, page);
        if page.layout.chart {
            out.push_str("<section id=\"stockChart\">\n");
            if let Some(chart) = &page.chart {
                out.push_str(&render_doughnut_svg(chart));
            }
            out.push_str("</section>\n");
        }
        if page.layout.alerts {
            self.write_alerts(&mut out, page.alerts.as_ref());
        }
        if page.layout.medicine_table {
            self.write_filters(&mut out, page);
            self.write_table(&mut out, page.medicine_table.as_ref());
        }
        out.push_str("</body>\n</html>\n");
        out
    }
}

/// Inline SVG doughnut with a legend. Negative segments are listed but not drawn.
pub fn render_doughnut_svg(chart: &ChartModel) -> String {
    let circumference = 2.0 * PI * CHART_RADIUS;
    let total = chart.drawable_total();
    let size = CHART_CENTER * 2.0;
    let mut out = String::with_capacity(1024);

    let _ = writeln!(
        out,
        "<svg class=\"doughnut\" viewBox=\"0 0 {size} {size}\" width=\"{size}\" height=\"{size}\" role=\"img\">"
    );
    if total == 0 {
        let _ = writeln!(
            out,
            "  <circle cx=\"{c}\" cy=\"{c}\" r=\"{r}\" fill=\"none\" stroke=\"{CHART_EMPTY_COLOR}\" stroke-width=\"28\"/>",
            c = CHART_CENTER,
            r = CHART_RADIUS
        );
    } else {
        let mut offset = 0.0;
        for segment in chart.segments.iter().filter(|s| s.value > 0) {
            let length = circumference * segment.value as f64 / total as f64;
            let _ = writeln!(
                out,
                "  <circle cx=\"{c}\" cy=\"{c}\" r=\"{r}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"28\" \
                 stroke-dasharray=\"{length:.2} {gap:.2}\" stroke-dashoffset=\"{dash:.2}\" \
                 transform=\"rotate(-90 {c} {c})\"><title>{label}</title></circle>",
                c = CHART_CENTER,
                r = CHART_RADIUS,
                color = segment.color,
                gap = circumference - length,
                dash = -offset,
                label = segment.label,
            );
            offset += length;
        }
    }
    out.push_str("</svg>\n<ul class=\"legend\">\n");
    for segment in &chart.segments {
        let _ = writeln!(
            out,
            "  <li><span class=\"swatch\" style=\"background:{}\"></span>{}: {}</li>",
            segment.color, segment.label, segment.value
        );
    }
    out.push_str("</ul>\n");
    out
}

/// Escape text for use in HTML content and double- or single-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Row show/hide for the search box and category select. Rows are never
/// removed; the action cell is left out of the searched text.
const FILTER_SCRIPT: &str = r##"<script>
const CATEGORY_CLASSES = { expired: "expired", near: "near-expiry", low: "low" };
function medicineRows() {
  return Array.from(document.querySelectorAll("#medicineTable tr"));
}
function rowText(row) {
  return Array.from(row.cells)
    .filter((cell) => !cell.classList.contains("actions"))
    .map((cell) => cell.textContent)
    .join(" ")
    .toLowerCase();
}
function searchMedicine(text) {
  const needle = text.toLowerCase();
  const select = document.getElementById("expiryFilter");
  if (select) select.value = "";
  for (const row of medicineRows()) {
    row.style.display = rowText(row).includes(needle) ? "" : "none";
  }
}
function filterMedicines(category) {
  const cls = CATEGORY_CLASSES[category];
  const box = document.getElementById("searchBox");
  if (box) box.value = "";
  for (const row of medicineRows()) {
    row.style.display = !category || (cls && row.classList.contains(cls)) ? "" : "none";
  }
}
</script>
"##;

const DOCUMENT_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Pharmacy Inventory Dashboard</title>
<style>
body{margin:0;padding:24px;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#f8f9fa;color:#212529}
h1{font-size:1.5rem;margin:0 0 16px}
.summary{display:flex;gap:16px;margin-bottom:16px}
.stat{background:#fff;border-radius:8px;padding:12px 20px;box-shadow:0 1px 4px rgba(0,0,0,.08)}
.stat span{display:block;font-size:.8rem;color:#6c757d}
.stat strong{font-size:1.5rem}
#alerts{margin:16px 0}
.no-alert{color:#2ecc71}
.legend{list-style:none;padding:0}
.swatch{display:inline-block;width:12px;height:12px;margin-right:6px;border-radius:2px}
table{border-collapse:collapse;width:100%;background:#fff}
th,td{padding:8px;border-bottom:1px solid #dee2e6;text-align:left}
tr.expired{background:#fdecea}
tr.near-expiry{background:#fff4e5}
tr.low{background:#fffbe6}
td form{display:inline}
.btn{border:none;border-radius:4px;padding:4px 10px;cursor:pointer;text-decoration:none;font-size:.85rem}
.btn-danger{background:#e74c3c;color:#fff}
.btn-primary{background:#3498db;color:#fff}
.filters{display:flex;gap:8px;margin-bottom:8px}
.notice{background:#e8f6ef;border-left:4px solid #2ecc71;padding:8px 12px;margin-bottom:16px}
</style>
</head>
<body>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertSet, LowStockAlert};
    use crate::page::PageLayout;
    use crate::test_support::{days_from_today, medicine, mixed_inventory, today};
    use crate::views::{build_alerts, build_chart, build_medicine_table, search, SummaryCounts};

    fn renderer() -> HtmlRenderer {
        HtmlRenderer::new("update_medicine.html", "/dashboard")
    }

    fn page_with_table() -> Page {
        let mut page = Page::new(PageLayout::full());
        page.set_medicine_table(build_medicine_table(&mixed_inventory(), today()));
        page
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"A" & 'B'</b>"#),
            "&lt;b&gt;&quot;A&quot; &amp; &#39;B&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn medicine_names_are_escaped() {
        let meds = vec![medicine(1, "<script>alert(1)</script>", days_from_today(90), 50)];
        let rows = renderer().render_rows(&build_medicine_table(&meds, today()));
        assert!(!rows.contains("<script>"));
        assert!(rows.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn rows_have_status_class_and_actions() {
        let html = renderer().render(&page_with_table());
        assert!(html.contains("<tr class=\"expired\" data-id=\"1\">"));
        assert!(html.contains("<tr class=\"near-expiry\" data-id=\"2\">"));
        assert!(html.contains("<tr class=\"low\" data-id=\"3\">"));
        assert!(html.contains("action=\"/dashboard/medicines/4/delete\""));
        assert!(html.contains("href=\"update_medicine.html?id=4\""));
        assert!(html.contains("confirm('Are you sure you want to delete this medicine?')"));
    }

    #[test]
    fn hidden_rows_stay_in_the_document() {
        let mut page = page_with_table();
        if let Some(table) = page.medicine_table.as_mut() {
            search(table, "paracetamol");
        }
        page.search_text = "paracetamol".into();
        let html = renderer().render(&page);
        assert_eq!(html.matches("style=\"display:none\"").count(), 3);
        assert!(html.contains("Amoxicillin"));
        assert!(html.contains("value=\"paracetamol\""));
    }

    #[test]
    fn all_clear_alerts_have_no_headers() {
        let mut page = Page::new(PageLayout::full());
        page.set_alerts(build_alerts(&AlertSet::default()));
        let html = renderer().render(&page);
        assert!(html.contains(ALL_CLEAR_MESSAGE));
        assert!(!html.contains("<h4>"));
    }

    #[test]
    fn warning_sections_render_lines() {
        let mut page = Page::new(PageLayout::full());
        page.set_alerts(build_alerts(&AlertSet::new(
            vec![LowStockAlert {
                name: "Salbutamol".into(),
                quantity: 4,
            }],
            vec![],
        )));
        let html = renderer().render(&page);
        assert!(html.contains("<h4>Low Stock</h4>"));
        assert!(html.contains("<div>Salbutamol (Qty: 4)</div>"));
        assert!(!html.contains("Near Expiry</h4>"));
    }

    #[test]
    fn counts_and_chart_render() {
        let counts = SummaryCounts {
            total: 4,
            expired: 1,
            low_stock: 1,
        };
        let mut page = Page::new(PageLayout::full());
        page.set_counts(&counts);
        page.set_chart(build_chart(&counts));
        let html = renderer().render(&page);
        assert!(html.contains("<strong id=\"totalCount\">4</strong>"));
        assert!(html.contains("<strong id=\"lowStockCount\">1</strong>"));
        assert!(html.contains("Healthy: 2"));
        assert_eq!(html.matches("stroke-dasharray").count(), 3);
    }

    #[test]
    fn negative_segment_is_listed_but_not_drawn() {
        let chart = build_chart(&SummaryCounts {
            total: 1,
            expired: 1,
            low_stock: 1,
        });
        let svg = render_doughnut_svg(&chart);
        assert_eq!(svg.matches("stroke-dasharray").count(), 2);
        assert!(svg.contains("Healthy: -1"));
    }

    #[test]
    fn empty_chart_draws_placeholder_ring() {
        let svg = render_doughnut_svg(&build_chart(&SummaryCounts::default()));
        assert!(svg.contains(CHART_EMPTY_COLOR));
        assert!(!svg.contains("stroke-dasharray"));
    }

    #[test]
    fn absent_elements_are_not_rendered() {
        let page = Page::new(PageLayout::table_only());
        let html = renderer().render(&page);
        assert!(!html.contains("id=\"alerts\""));
        assert!(!html.contains("id=\"stockChart\""));
        assert!(!html.contains("totalCount"));
        assert!(html.contains("id=\"medicineTable\""));
    }

    #[test]
    fn filters_run_in_the_browser() {
        let html = renderer().render(&page_with_table());
        assert!(html.contains("oninput=\"searchMedicine(this.value)\""));
        assert!(html.contains("onchange=\"filterMedicines(this.value)\""));
        assert!(html.contains("function searchMedicine(text)"));
        assert!(html.contains("function filterMedicines(category)"));
        assert!(!html.contains("<form class=\"filters\""));
        assert!(html.contains("<td class=\"actions\">"));
    }

    #[test]
    fn filter_script_maps_every_category_to_its_row_class() {
        for category in [StockCategory::Expired, StockCategory::Near, StockCategory::Low] {
            let entry = format!("{}: \"{}\"", category.as_str(), category.status().as_str());
            assert!(FILTER_SCRIPT.contains(&entry), "missing {entry}");
        }
    }

    #[test]
    fn notice_is_shown_once_set() {
        let mut page = page_with_table();
        assert!(!renderer().render(&page).contains("class=\"notice\""));
        page.notice = Some("Medicine <deleted>!".into());
        let html = renderer().render(&page);
        assert!(html.contains("<div class=\"notice\" role=\"status\">Medicine &lt;deleted&gt;!</div>"));
    }

    #[test]
    fn selected_category_is_marked() {
        let mut page = page_with_table();
        page.category = "near".into();
        let html = renderer().render(&page);
        assert!(html.contains("<option value=\"near\" selected>Near Expiry</option>"));
        assert!(html.contains("<option value=\"\">All</option>"));
    }
}
