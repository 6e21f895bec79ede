//! Classification-metrics report: confusion matrices, per-class bar charts,
//! ROC curves, and a console summary.
//!
//! A single metrics instance gets a detailed 2x3 grid; two or more get a
//! comparison grid with the ROC overlay spanning the left column. Only the
//! first two instances' confusion matrices fit the comparison layout; extra
//! instances still appear in the ROC overlay, the accuracy chart, and the
//! console summary.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::schema::{ClassificationMetrics, RocPoint};

/// Instance colors roughly matching the matplotlib default cycle.
const COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

/// Confusion matrices rendered in comparison mode.
const MAX_COMPARED_MATRICES: usize = 2;

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// A metrics instance plus its resolved display name.
#[derive(Debug, Clone)]
pub struct NamedMetrics {
    pub name: String,
    pub metrics: ClassificationMetrics,
}

/// Class labels in numeric ascending order. Labels that do not parse as
/// integers sort after the numeric ones, lexicographically.
pub fn numeric_label_order<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out: Vec<String> = labels.into_iter().cloned().collect();
    out.sort_by(|a, b| match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
    out
}

/// Materialize the confusion-matrix mapping as a dense matrix with labels in
/// numeric order. An absent predicted key counts as zero.
pub fn confusion_matrix_counts(
    cm: &BTreeMap<String, BTreeMap<String, u64>>,
) -> (Vec<String>, Vec<Vec<u64>>) {
    let labels = numeric_label_order(cm.keys());
    let matrix = labels
        .iter()
        .map(|true_label| {
            let row = cm.get(true_label);
            labels
                .iter()
                .map(|pred| row.and_then(|r| r.get(pred)).copied().unwrap_or(0))
                .collect()
        })
        .collect();
    (labels, matrix)
}

/// ROC points sorted by increasing false-positive rate, with (0,0) prepended
/// and (1,1) appended to close the curve.
pub fn close_roc_curve(points: &[RocPoint]) -> Vec<(f64, f64)> {
    let mut sorted: Vec<(f64, f64)> = points.iter().map(|p| (p.fpr, p.tpr)).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mut curve = Vec::with_capacity(sorted.len() + 2);
    curve.push((0.0, 0.0));
    curve.extend(sorted);
    curve.push((1.0, 1.0));
    curve
}

/// Render the metrics figure for one or more instances.
pub fn render_report(instances: &[NamedMetrics], out_path: &Path) -> Result<()> {
    anyhow::ensure!(!instances.is_empty(), "no metrics instances to render");

    if instances.len() == 1 {
        render_detail(&instances[0], out_path)?;
    } else {
        render_comparison(instances, out_path)?;
    }
    Ok(())
}

/// Single-instance layout: confusion matrix, precision, recall, F1, and a
/// ROC panel spanning the last two grid cells.
fn render_detail(inst: &NamedMetrics, out_path: &Path) -> Result<()> {
    let root = BitMapBackend::new(out_path, (1600, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        &format!("Classification Metrics - {}", inst.name),
        ("sans-serif", 28),
    )?;

    let (w, h) = root.dim_in_pixel();
    let (top, bottom) = root.split_vertically((h / 2) as i32);
    let top_cells = top.split_evenly((1, 3));
    let (f1_cell, roc_cell) = bottom.split_horizontally((w / 3) as i32);

    confusion_matrix_panel(&top_cells[0], &inst.metrics.confusion_matrix, &inst.name)?;
    metric_bar_panel(&top_cells[1], &inst.metrics.precision, "Precision")?;
    metric_bar_panel(&top_cells[2], &inst.metrics.recall, "Recall")?;
    metric_bar_panel(&f1_cell, &inst.metrics.f1_score, "F1-Score")?;
    roc_panel(&roc_cell, std::slice::from_ref(inst))?;

    root.present()?;
    Ok(())
}

/// Comparison layout: ROC overlay spanning the left column, accuracy bars,
/// and the first two instances' confusion matrices.
fn render_comparison(instances: &[NamedMetrics], out_path: &Path) -> Result<()> {
    let root = BitMapBackend::new(out_path, (1800, 1000)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Algorithm Comparison", ("sans-serif", 28))?;

    let (w, _) = root.dim_in_pixel();
    let (roc_area, right) = root.split_horizontally((w / 3) as i32);
    let cells = right.split_evenly((2, 2));

    roc_panel(&roc_area, instances)?;
    accuracy_panel(&cells[0], instances)?;
    for (i, inst) in instances.iter().take(MAX_COMPARED_MATRICES).enumerate() {
        // Right column, one matrix per row.
        confusion_matrix_panel(&cells[1 + i * 2], &inst.metrics.confusion_matrix, &inst.name)?;
    }

    root.present()?;
    Ok(())
}

/// Confusion-matrix heatmap: square grid, white-to-blue cells, annotated
/// counts, true label 0 at the top.
fn confusion_matrix_panel(
    area: &Panel<'_>,
    cm: &BTreeMap<String, BTreeMap<String, u64>>,
    name: &str,
) -> Result<()> {
    let (labels, counts) = confusion_matrix_counts(cm);
    if labels.is_empty() {
        return Ok(());
    }
    let n = labels.len();
    let max = counts
        .iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(format!("Confusion Matrix - {}", name), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0f64..n as f64, 0f64..n as f64)?;
    // Mesh tick labels are suppressed: the float axis places its ticks on
    // cell boundaries, not cell centers, so class labels are drawn below as
    // explicit text elements at band centers instead.
    chart
        .configure_mesh()
        .x_desc("Predicted Label")
        .y_desc("True Label")
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|_| String::new())
        .disable_mesh()
        .draw()?;

    for (i, row) in counts.iter().enumerate() {
        // Row i (true label) is drawn in the band [n-1-i, n-i] so label 0
        // ends up at the top.
        let y0 = (n - 1 - i) as f64;
        for (j, &count) in row.iter().enumerate() {
            let t = count as f64 / max;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(j as f64, y0), (j as f64 + 1.0, y0 + 1.0)],
                heat_color(t).filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(j as f64, y0), (j as f64 + 1.0, y0 + 1.0)],
                WHITE.stroke_width(1),
            )))?;

            let text_color = if t > 0.5 { &WHITE } else { &BLACK };
            let style = TextStyle::from(("sans-serif", 16).into_font())
                .color(text_color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            chart.draw_series(std::iter::once(Text::new(
                count.to_string(),
                (j as f64 + 0.5, y0 + 0.5),
                style,
            )))?;
        }
    }

    // Class labels at band centers: column labels below the grid, row
    // labels to its left.
    let col_style = TextStyle::from(("sans-serif", 15).into_font())
        .pos(Pos::new(HPos::Center, VPos::Top));
    let row_style = TextStyle::from(("sans-serif", 15).into_font())
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (center, label) in heatmap_axis_labels(&labels, false) {
        let (px, py) = chart.backend_coord(&(center, 0.0));
        area.draw(&Text::new(label, (px, py + 6), col_style.clone()))?;
    }
    for (center, label) in heatmap_axis_labels(&labels, true) {
        let (px, py) = chart.backend_coord(&(0.0, center));
        area.draw(&Text::new(label, (px - 6, py), row_style.clone()))?;
    }
    Ok(())
}

/// Band-center position and text for each heatmap axis label, in drawing
/// order. `flip` reverses the placement for the y-axis so class 0 sits at
/// the top, matching the cell layout.
pub fn heatmap_axis_labels(labels: &[String], flip: bool) -> Vec<(f64, String)> {
    let n = labels.len();
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let band = if flip { n - 1 - i } else { i };
            (band as f64 + 0.5, label.clone())
        })
        .collect()
}

/// Per-class bar chart with the y-axis fixed to [0, 1.05] and each bar
/// annotated to three decimals.
fn metric_bar_panel(
    area: &Panel<'_>,
    values: &BTreeMap<String, f64>,
    metric: &str,
) -> Result<()> {
    let labels = numeric_label_order(values.keys());
    let n = labels.len().max(1);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("Per-Class {}", metric), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..1.05f64)?;
    chart
        .configure_mesh()
        .x_desc("Class")
        .y_desc(metric)
        .x_labels(n)
        .x_label_formatter(&|v| tick_label(&labels, *v))
        .disable_x_mesh()
        .draw()?;

    let annotation = TextStyle::from(("sans-serif", 13).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    for (i, label) in labels.iter().enumerate() {
        let v = values.get(label).copied().unwrap_or(0.0);
        let color = COLORS[i % COLORS.len()];
        chart.draw_series(std::iter::once(Rectangle::new(
            [(i as f64 - 0.35, 0.0), (i as f64 + 0.35, v)],
            color.mix(0.8).filled(),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("{:.3}", v),
            (i as f64, v),
            annotation.clone(),
        )))?;
    }
    Ok(())
}

/// ROC overlay: one color per instance, one curve per class, plus the
/// diagonal random-classifier reference.
fn roc_panel(area: &Panel<'_>, instances: &[NamedMetrics]) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption("ROC Curves Comparison", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.05f64..1.05f64, -0.05f64..1.05f64)?;
    chart
        .configure_mesh()
        .x_desc("False Positive Rate")
        .y_desc("True Positive Rate")
        .draw()?;

    for (idx, inst) in instances.iter().enumerate() {
        let color = COLORS[idx % COLORS.len()];
        for (class, points) in &inst.metrics.roc_curve {
            if points.is_empty() {
                continue;
            }
            let curve = close_roc_curve(points);
            chart
                .draw_series(LineSeries::new(curve.clone(), color.stroke_width(2)))?
                .label(format!("{} - Class {}", inst.name, class))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            chart.draw_series(
                curve
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )?;
        }
    }

    chart
        .draw_series(DashedLineSeries::new(
            vec![(0.0, 0.0), (1.0, 1.0)],
            6,
            4,
            BLACK.mix(0.3).stroke_width(1),
        ))?
        .label("Random Classifier")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.3)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// Accuracy comparison bars, one per instance.
fn accuracy_panel(area: &Panel<'_>, instances: &[NamedMetrics]) -> Result<()> {
    let n = instances.len().max(1);

    let mut chart = ChartBuilder::on(area)
        .caption("Accuracy Comparison", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..1.05f64)?;
    chart
        .configure_mesh()
        .x_desc("Algorithm")
        .y_desc("Accuracy")
        .x_labels(n)
        .x_label_formatter(&|v| instance_label(instances, *v))
        .disable_x_mesh()
        .draw()?;

    let annotation = TextStyle::from(("sans-serif", 13).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    for (i, inst) in instances.iter().enumerate() {
        let color = COLORS[i % COLORS.len()];
        let v = inst.metrics.accuracy;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(i as f64 - 0.35, 0.0), (i as f64 + 0.35, v)],
            color.mix(0.8).filled(),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("{:.3}", v),
            (i as f64, v),
            annotation.clone(),
        )))?;
    }
    Ok(())
}

/// Console summary: accuracy and the fixed-width per-class metric table,
/// one block per instance.
pub fn print_summary(instances: &[NamedMetrics]) {
    println!("\n{}", "=".repeat(60));
    println!("CLASSIFICATION METRICS SUMMARY");
    println!("{}", "=".repeat(60));

    for inst in instances {
        let m = &inst.metrics;
        println!("\n{}:", inst.name);
        println!(
            "  Accuracy: {:.4} ({:.2}%)",
            m.accuracy,
            m.accuracy * 100.0
        );

        println!("\n  Per-Class Metrics:");
        println!(
            "    {:<8} {:<12} {:<12} {:<12}",
            "Class", "Precision", "Recall", "F1-Score"
        );
        println!("    {}", "-".repeat(44));

        for class in numeric_label_order(m.precision.keys()) {
            let precision = m.precision.get(&class).copied().unwrap_or(0.0);
            let recall = m.recall.get(&class).copied().unwrap_or(0.0);
            let f1 = m.f1_score.get(&class).copied().unwrap_or(0.0);
            println!(
                "    {:<8} {:<12.4} {:<12.4} {:<12.4}",
                class, precision, recall, f1
            );
        }
    }
}

/// Tick label for a bar at an integer position.
fn tick_label(labels: &[String], v: f64) -> String {
    let i = v.round();
    if (v - i).abs() < 0.01 && i >= 0.0 && (i as usize) < labels.len() {
        labels[i as usize].clone()
    } else {
        String::new()
    }
}

fn instance_label(instances: &[NamedMetrics], v: f64) -> String {
    let i = v.round();
    if (v - i).abs() < 0.01 && i >= 0.0 && (i as usize) < instances.len() {
        instances[i as usize].name.clone()
    } else {
        String::new()
    }
}

/// White-to-blue gradient for heatmap cells.
fn heat_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(247.0, 8.0), lerp(251.0, 48.0), lerp(255.0, 107.0))
}
