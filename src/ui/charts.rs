use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Corner, GridMark, Legend, Plot, PlotPoint, PlotPoints, Points};

use scival_dashboard::color::ColorScale;
use scival_dashboard::data::filter::SortKey;
use scival_dashboard::data::model::{Record, Table};
use scival_dashboard::data::views::DashboardViews;

const CHART_HEIGHT: f32 = 400.0;
const OUTPUT_BAR_COLOR: Color32 = Color32::from_rgb(76, 120, 168);
const GROWTH_BAR_COLOR: Color32 = Color32::from_rgb(128, 0, 128);
/// Colour classes in the scatter legend.
const SCATTER_BUCKETS: usize = 6;
/// Long cluster names are cut on the y axis; the hover label shows them in full.
const MAX_AXIS_LABEL: usize = 40;

fn no_data(ui: &mut Ui) {
    ui.label(RichText::new("No data for the current filters.").italics());
}

// ---------------------------------------------------------------------------
// Top-N bar charts
// ---------------------------------------------------------------------------

/// Chart 1: top N topic clusters by Scholarly Output.
pub fn output_bar_chart(ui: &mut Ui, views: &DashboardViews) {
    top_n_bar_chart(
        ui,
        "top_output_chart",
        &views.top_output,
        SortKey::ScholarlyOutput,
        "Scholarly Output",
        OUTPUT_BAR_COLOR,
    );
}

/// Chart 3: top N topic clusters by Publication Share growth.
pub fn growth_bar_chart(ui: &mut Ui, views: &DashboardViews) {
    top_n_bar_chart(
        ui,
        "top_growth_chart",
        &views.top_growth,
        SortKey::PublicationShareGrowth,
        "Growth (%)",
        GROWTH_BAR_COLOR,
    );
}

/// Horizontal bars, largest at the top, one per ranked record.
fn top_n_bar_chart(
    ui: &mut Ui,
    id: &str,
    ranked: &[Record],
    key: SortKey,
    axis_label: &str,
    color: Color32,
) {
    if ranked.is_empty() {
        no_data(ui);
        return;
    }

    let last = ranked.len() - 1;
    let bars: Vec<Bar> = ranked
        .iter()
        .enumerate()
        .map(|(rank, record)| {
            let value = key.value(record);
            Bar::new((last - rank) as f64, value)
                .name(format!("{}\n{}: {value}", record.topic_cluster, key.column()))
                .fill(color)
        })
        .collect();

    // Index = bar position on the y axis.
    let labels: Vec<String> = ranked
        .iter()
        .rev()
        .map(|r| axis_label_for(&r.topic_cluster))
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(axis_label)
        .y_axis_label("Topic Cluster")
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            label_at(&labels, mark.value)
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(color).name(axis_label));
        });
}

fn axis_label_for(cluster: &str) -> String {
    if cluster.chars().count() <= MAX_AXIS_LABEL {
        cluster.to_string()
    } else {
        let cut: String = cluster.chars().take(MAX_AXIS_LABEL - 1).collect();
        format!("{cut}…")
    }
}

/// Cluster label for a grid mark that sits exactly on a bar.
fn label_at(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if rounded < 0.0 || (value - rounded).abs() > 1e-6 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Scatter: FWCI vs Prominence percentile, coloured by Scholarly Output
// ---------------------------------------------------------------------------

/// Chart 2: every filtered record, x = FWCI, y = Prominence percentile.
pub fn fwci_prominence_scatter(ui: &mut Ui, views: &DashboardViews) {
    let table = views.scatter();
    let Some(scale) = ColorScale::spanning(table.iter().map(|r| r.scholarly_output as f64)) else {
        no_data(ui);
        return;
    };

    let legend_name = |i: usize| {
        let (lo, hi, _) = scale.bucket_entry(i, SCATTER_BUCKETS);
        format!("Scholarly Output {lo:.0}–{hi:.0}")
    };
    let tooltips = ScatterTooltips::new(table);

    Plot::new("fwci_prominence_scatter")
        .height(CHART_HEIGHT)
        .legend(Legend::default().position(Corner::RightBottom))
        .x_axis_label("FWCI")
        .y_axis_label("Prominence Percentile")
        .label_formatter(move |_name: &str, point: &PlotPoint| tooltips.nearest(point))
        .show(ui, |plot_ui| {
            // Legend swatches first: egui_plot takes an entry's colour from the
            // first item carrying its name.
            for i in 0..SCATTER_BUCKETS {
                let (_, _, color) = scale.bucket_entry(i, SCATTER_BUCKETS);
                plot_ui.points(
                    Points::new(PlotPoints::new(Vec::new()))
                        .color(color.gamma_multiply(0.85))
                        .name(legend_name(i)),
                );
            }
            // One item per record so each point gets its own shade; sharing the
            // bucket name lets a legend click hide the whole class.
            for record in table {
                let output = record.scholarly_output as f64;
                plot_ui.points(
                    Points::new(vec![[record.fwci, record.prominence_percentile]])
                        .radius(5.0)
                        .color(scale.color_for(output).gamma_multiply(0.85))
                        .name(legend_name(scale.bucket(output, SCATTER_BUCKETS))),
                );
            }
        });
}

/// Hover text for the record nearest the cursor.
struct ScatterTooltips {
    entries: Vec<([f64; 2], String)>,
    /// Axis spans, so distance is measured in screen-like proportions.
    spans: [f64; 2],
}

impl ScatterTooltips {
    fn new(table: &Table) -> Self {
        let entries: Vec<([f64; 2], String)> = table
            .iter()
            .map(|r| {
                let text = format!(
                    "{}\nFWCI: {:.2}\nProminence percentile: {:.1}\nScholarly Output: {}",
                    r.topic_cluster, r.fwci, r.prominence_percentile, r.scholarly_output
                );
                ([r.fwci, r.prominence_percentile], text)
            })
            .collect();
        let span = |axis: usize| {
            let (lo, hi) = entries
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (p, _)| {
                    (lo.min(p[axis]), hi.max(p[axis]))
                });
            if hi - lo > f64::EPSILON {
                hi - lo
            } else {
                1.0
            }
        };
        let spans = [span(0), span(1)];
        ScatterTooltips { entries, spans }
    }

    fn nearest(&self, point: &PlotPoint) -> String {
        let distance = |p: &[f64; 2]| {
            let dx = (p[0] - point.x) / self.spans[0];
            let dy = (p[1] - point.y) / self.spans[1];
            dx * dx + dy * dy
        };
        self.entries
            .iter()
            .min_by(|(a, _), (b, _)| distance(a).total_cmp(&distance(b)))
            .map(|(_, text)| text.clone())
            .unwrap_or_default()
    }
}
