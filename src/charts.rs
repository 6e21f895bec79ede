//! Benchmark chart renderers.
//!
//! Each renderer consumes one sweep subset and writes one PNG under the plots
//! directory. Renderers are independent: an empty subset produces a figure
//! with empty axes (or, for the bar chart, no file at all) and never aborts
//! the pipeline.

use std::fs;
use std::ops::Range;
use std::path::Path;

use anyhow::Result;
use log::warn;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::schema::{BenchmarkRecord, ALGORITHMS, BASELINE_ALGORITHM};
use crate::select;
use crate::select::DistanceCalcGroup;

/// Line colors roughly matching the matplotlib default cycle.
const COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180),  // blue
    RGBColor(255, 127, 14),  // orange
    RGBColor(44, 160, 44),   // green
    RGBColor(214, 39, 40),   // red
    RGBColor(148, 103, 189), // purple
];

/// Bar colors for the distance-calculation comparison (baseline red,
/// KD-tree blue, nanoflann green).
const BAR_COLORS: &[RGBColor] = &[
    RGBColor(231, 76, 60),
    RGBColor(52, 152, 219),
    RGBColor(46, 204, 113),
];

/// Query time and speedup against dimensionality, two panels.
///
/// The query-time axis is log-scaled; the speedup panel covers non-baseline
/// algorithms and carries a dashed reference line at speedup = 1.0.
pub fn curse_of_dimensionality(records: &[&BenchmarkRecord], output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("curse_of_dimensionality.png");

    let dims = select::sorted_unique(records, |r| r.n_dimensions);
    let xs: Vec<f64> = dims.iter().map(|&d| d as f64).collect();
    let x_range = linear_span(&xs);

    let root = BitMapBackend::new(&path, (1600, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));

    // Left panel: query time, log y.
    {
        let times: Vec<f64> = records.iter().map(|r| r.avg_query_time_ms).collect();
        let y_range = log_span(&times);

        let mut chart = ChartBuilder::on(&panels[0])
            .caption("Curse of Dimensionality - Query Time", ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), y_range.log_scale())?;
        chart
            .configure_mesh()
            .x_desc("Number of Dimensions")
            .y_desc("Average Query Time (ms)")
            .draw()?;

        for (i, algo) in ALGORITHMS.iter().enumerate() {
            let points: Vec<(f64, f64)> =
                select::series(records, algo, &dims, |r| r.n_dimensions, |r| {
                    Some(r.avg_query_time_ms)
                })
                .into_iter()
                .map(|(x, y)| (x as f64, y))
                .collect();
            if points.is_empty() {
                continue;
            }
            let color = COLORS[i % COLORS.len()];
            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                .label(*algo)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            chart.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    // Right panel: speedup vs baseline, linear y, reference line at 1.0.
    {
        let speedups: Vec<f64> = records
            .iter()
            .filter_map(|r| r.speedup_vs_basic)
            .chain(std::iter::once(1.0))
            .collect();
        let y_range = linear_span(&speedups);

        let mut chart = ChartBuilder::on(&panels[1])
            .caption("Speedup Comparison", ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), y_range)?;
        chart
            .configure_mesh()
            .x_desc("Number of Dimensions")
            .y_desc(format!("Speedup vs {}", BASELINE_ALGORITHM))
            .draw()?;

        for (i, algo) in ALGORITHMS
            .iter()
            .enumerate()
            .filter(|(_, a)| **a != BASELINE_ALGORITHM)
        {
            let points: Vec<(f64, f64)> =
                select::series(records, algo, &dims, |r| r.n_dimensions, |r| {
                    r.speedup_vs_basic
                })
                .into_iter()
                .map(|(x, y)| (x as f64, y))
                .collect();
            if points.is_empty() {
                continue;
            }
            let color = COLORS[i % COLORS.len()];
            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                .label(*algo)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            chart.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )?;
        }

        chart
            .draw_series(DashedLineSeries::new(
                vec![(x_range.start, 1.0), (x_range.end, 1.0)],
                8,
                6,
                RED.mix(0.5).stroke_width(1),
            ))?
            .label("Baseline")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.5)));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    println!("Saved: {}", path.display());
    Ok(())
}

/// Query time and build time against dataset size, two log-log panels.
/// The build-time panel covers non-baseline algorithms only.
pub fn scalability(records: &[&BenchmarkRecord], output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("scalability.png");

    let sizes = select::sorted_unique(records, |r| r.n_samples);
    let xs: Vec<f64> = sizes.iter().map(|&n| n as f64).collect();
    let x_range = log_span(&xs);

    let root = BitMapBackend::new(&path, (1600, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));

    // Left panel: query time vs dataset size.
    {
        let times: Vec<f64> = records.iter().map(|r| r.avg_query_time_ms).collect();
        let y_range = log_span(&times);

        let mut chart = ChartBuilder::on(&panels[0])
            .caption("Scalability - Query Time vs Dataset Size", ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone().log_scale(), y_range.log_scale())?;
        chart
            .configure_mesh()
            .x_desc("Dataset Size (n_samples)")
            .y_desc("Average Query Time (ms)")
            .draw()?;

        for (i, algo) in ALGORITHMS.iter().enumerate() {
            let points: Vec<(f64, f64)> =
                select::series(records, algo, &sizes, |r| r.n_samples, |r| {
                    Some(r.avg_query_time_ms)
                })
                .into_iter()
                .map(|(x, y)| (x as f64, y))
                .collect();
            if points.is_empty() {
                continue;
            }
            let color = COLORS[i % COLORS.len()];
            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                .label(*algo)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            chart.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    // Right panel: build time vs dataset size, non-baseline only.
    {
        let builds: Vec<f64> = records
            .iter()
            .filter(|r| r.algorithm != BASELINE_ALGORITHM)
            .map(|r| r.build_time_ms)
            .collect();
        let y_range = log_span(&builds);

        let mut chart = ChartBuilder::on(&panels[1])
            .caption("Build Time vs Dataset Size", ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone().log_scale(), y_range.log_scale())?;
        chart
            .configure_mesh()
            .x_desc("Dataset Size (n_samples)")
            .y_desc("Build Time (ms)")
            .draw()?;

        for (i, algo) in ALGORITHMS
            .iter()
            .enumerate()
            .filter(|(_, a)| **a != BASELINE_ALGORITHM)
        {
            let points: Vec<(f64, f64)> =
                select::series(records, algo, &sizes, |r| r.n_samples, |r| {
                    Some(r.build_time_ms)
                })
                .into_iter()
                .map(|(x, y)| (x as f64, y))
                .collect();
            if points.is_empty() {
                continue;
            }
            let color = COLORS[i % COLORS.len()];
            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                .label(*algo)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            chart.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    println!("Saved: {}", path.display());
    Ok(())
}

/// Query time against K, single panel with a log-scaled x-axis.
pub fn k_parameter_impact(records: &[&BenchmarkRecord], output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("k_parameter_impact.png");

    let ks = select::sorted_unique(records, |r| r.k_neighbors);
    let xs: Vec<f64> = ks.iter().map(|&k| k as f64).collect();
    let x_range = log_span(&xs);
    let times: Vec<f64> = records.iter().map(|r| r.avg_query_time_ms).collect();
    let y_range = linear_span(&times);

    let root = BitMapBackend::new(&path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("K Parameter Impact on Query Time", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.log_scale(), y_range)?;
    chart
        .configure_mesh()
        .x_desc("K (Number of Neighbors)")
        .y_desc("Average Query Time (ms)")
        .draw()?;

    for (i, algo) in ALGORITHMS.iter().enumerate() {
        let points: Vec<(f64, f64)> =
            select::series(records, algo, &ks, |r| r.k_neighbors, |r| {
                Some(r.avg_query_time_ms)
            })
            .into_iter()
            .map(|(x, y)| (x as f64, y))
            .collect();
        if points.is_empty() {
            continue;
        }
        let color = COLORS[i % COLORS.len()];
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(*algo)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    println!("Saved: {}", path.display());
    Ok(())
}

/// Grouped bar chart of mean distance calculations per query on real
/// datasets: one cluster per dataset, one bar per algorithm, values
/// annotated with thousands separators.
///
/// With no qualifying records this logs a warning and writes nothing.
pub fn distance_calculations_real_datasets(
    records: &[&BenchmarkRecord],
    output_dir: &Path,
) -> Result<()> {
    let groups = select::group_distance_calculations(records);
    if groups.is_empty() {
        warn!("no real dataset results with distance calculations found");
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("distance_calculations_real_datasets.png");

    let y_max = groups
        .iter()
        .flat_map(|g| g.mean_per_algorithm.iter())
        .fold(0.0f64, |acc, &v| acc.max(v));
    let y_max = if y_max > 0.0 { y_max * 1.15 } else { 1.0 };

    let root = BitMapBackend::new(&path, (1400, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Distance Calculation Efficiency on Real Datasets",
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(-0.5f64..(groups.len() as f64 - 0.5), 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Dataset (Dimensions)")
        .y_desc("Avg Distance Calculations per Query")
        .x_labels(groups.len())
        .x_label_formatter(&|x| cluster_label(&groups, *x))
        .y_label_formatter(&|y| format_thousands(*y as u64))
        .disable_x_mesh()
        .draw()?;

    let width = 0.25;
    let annotation = TextStyle::from(("sans-serif", 13).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    for (ai, algo) in ALGORITHMS.iter().enumerate() {
        let color = BAR_COLORS[ai % BAR_COLORS.len()];
        // Center the middle algorithm's bar on the cluster position.
        let offset = (ai as f64 - (ALGORITHMS.len() as f64 - 1.0) / 2.0) * width;

        chart
            .draw_series(groups.iter().enumerate().map(|(gi, g)| {
                let x = gi as f64 + offset;
                Rectangle::new(
                    [(x - width / 2.0, 0.0), (x + width / 2.0, g.mean_per_algorithm[ai])],
                    color.mix(0.8).filled(),
                )
            }))?
            .label(*algo)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.mix(0.8).filled())
            });

        chart.draw_series(
            groups
                .iter()
                .enumerate()
                .filter(|(_, g)| g.mean_per_algorithm[ai] > 0.0)
                .map(|(gi, g)| {
                    let v = g.mean_per_algorithm[ai];
                    Text::new(
                        format_thousands(v as u64),
                        (gi as f64 + offset, v),
                        annotation.clone(),
                    )
                }),
        )?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    println!("Saved: {}", path.display());
    Ok(())
}

fn cluster_label(groups: &[DistanceCalcGroup], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() < 0.01 && i >= 0.0 && (i as usize) < groups.len() {
        let g = &groups[i as usize];
        format!("{} ({}D)", g.dataset, g.n_dimensions)
    } else {
        String::new()
    }
}

/// Format an integer with comma thousands separators.
pub fn format_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Linear axis range covering `values` with a little padding. Falls back to
/// 0..1 when there is nothing to plot.
fn linear_span(values: &[f64]) -> Range<f64> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    if lo == hi {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

/// Log axis range covering the positive `values`. Falls back to 0.1..10 when
/// there is nothing positive to plot.
fn log_span(values: &[f64]) -> Range<f64> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() && v > 0.0 {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return 0.1..10.0;
    }
    (lo / 2.0)..(hi * 2.0)
}
