//! Chart Plotter Module
//! Creates the dashboard visualizations using egui_plot (pies via painter).

use crate::analysis::TagSplit;
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Legend, Plot};

/// Status colors shared across charts and tables.
pub const TAGGED_COLOR: Color32 = Color32::from_rgb(40, 167, 69); // Green
pub const UNTAGGED_COLOR: Color32 = Color32::from_rgb(220, 53, 69); // Red

/// Color palette for category slices/bars.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(255, 87, 34),   // Deep Orange
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

pub fn palette_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

/// One pie slice: label, value, fill color.
#[derive(Clone)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: Color32,
}

/// Creates dashboard charts in the styles the tabs need.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw a pie chart with a legend underneath.
    /// egui_plot has no pie primitive, so slices are fanned out of small
    /// triangles on the painter.
    pub fn draw_pie_chart(ui: &mut egui::Ui, slices: &[PieSlice], diameter: f32) {
        let total: f64 = slices.iter().map(|s| s.value).sum();
        if total <= 0.0 {
            ui.label(RichText::new("No data").color(Color32::GRAY));
            return;
        }

        ui.vertical_centered(|ui| {
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(diameter, diameter),
                egui::Sense::hover(),
            );
            let painter = ui.painter_at(rect);
            let center = rect.center();
            let radius = diameter / 2.0 - 4.0;

            let mut angle = -std::f32::consts::FRAC_PI_2;
            for slice in slices {
                if slice.value <= 0.0 {
                    continue;
                }
                let sweep = (slice.value / total) as f32 * std::f32::consts::TAU;
                let steps = ((sweep / 0.05).ceil() as usize).max(1);
                let step = sweep / steps as f32;

                for i in 0..steps {
                    let a0 = angle + i as f32 * step;
                    let a1 = a0 + step;
                    let p0 = center + radius * egui::vec2(a0.cos(), a0.sin());
                    let p1 = center + radius * egui::vec2(a1.cos(), a1.sin());
                    painter.add(egui::Shape::convex_polygon(
                        vec![center, p0, p1],
                        slice.color,
                        Stroke::NONE,
                    ));
                }
                angle += sweep;
            }
        });

        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            for slice in slices {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 2.0, slice.color);
                ui.label(
                    RichText::new(format!(
                        "{} ({:.1}%)",
                        slice.label,
                        slice.value / total * 100.0
                    ))
                    .size(11.0),
                );
                ui.add_space(8.0);
            }
        });
    }

    /// Vertical bar chart for single-series category data.
    pub fn draw_bar_chart(
        ui: &mut egui::Ui,
        id: &str,
        data: &[(String, f64)],
        color: Color32,
        height: f32,
    ) {
        let labels: Vec<String> = data.iter().map(|(label, _)| label.clone()).collect();
        let bars: Vec<Bar> = data
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                Bar::new(i as f64, *value)
                    .width(0.6)
                    .fill(color)
                    .name(label)
            })
            .collect();

        Plot::new(id.to_string())
            .height(height)
            .allow_scroll(false)
            .show_grid([false, true])
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Grouped bar chart: tagged vs untagged cost per category.
    pub fn draw_split_bar_chart(
        ui: &mut egui::Ui,
        id: &str,
        data: &[(String, TagSplit)],
        height: f32,
    ) {
        let labels: Vec<String> = data.iter().map(|(label, _)| label.clone()).collect();

        let tagged_bars: Vec<Bar> = data
            .iter()
            .enumerate()
            .map(|(i, (label, split))| {
                Bar::new(i as f64 - 0.2, split.tagged)
                    .width(0.35)
                    .fill(TAGGED_COLOR)
                    .name(label)
            })
            .collect();
        let untagged_bars: Vec<Bar> = data
            .iter()
            .enumerate()
            .map(|(i, (label, split))| {
                Bar::new(i as f64 + 0.2, split.untagged)
                    .width(0.35)
                    .fill(UNTAGGED_COLOR)
                    .name(label)
            })
            .collect();

        Plot::new(id.to_string())
            .height(height)
            .allow_scroll(false)
            .show_grid([false, true])
            .legend(Legend::default())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(tagged_bars).name("Tagged"));
                plot_ui.bar_chart(BarChart::new(untagged_bars).name("Untagged"));
            });
    }

    /// Horizontal bar chart, one bar per category in slice order (bottom-up).
    pub fn draw_hbar_chart(
        ui: &mut egui::Ui,
        id: &str,
        data: &[(String, f64)],
        color: Color32,
        height: f32,
    ) {
        let labels: Vec<String> = data.iter().map(|(label, _)| label.clone()).collect();
        let bars: Vec<Bar> = data
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                Bar::new(i as f64, *value)
                    .width(0.6)
                    .fill(color)
                    .name(label)
            })
            .collect();

        Plot::new(id.to_string())
            .height(height)
            .allow_scroll(false)
            .show_grid([true, false])
            .y_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Six-bucket completeness histogram (0..=100% in 20-point steps).
    pub fn draw_completeness_histogram(
        ui: &mut egui::Ui,
        id: &str,
        histogram: &[usize; 6],
        height: f32,
    ) {
        let bars: Vec<Bar> = histogram
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                Bar::new(i as f64, count as f64)
                    .width(0.8)
                    .fill(palette_color(0))
                    .name(format!("{}%", i * 20))
            })
            .collect();

        Plot::new(id.to_string())
            .height(height)
            .allow_scroll(false)
            .show_grid([false, true])
            .x_axis_formatter(|mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx <= 5 {
                    format!("{}%", idx * 20)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }
}
