use crate::models::AnalyzerError;
use log::{info, warn};
use plotters::prelude::*;
use plotters::style::Palette;

fn plot_err<E: std::fmt::Display>(err: E) -> AnalyzerError {
    AnalyzerError::Plot(err.to_string())
}

/// Renders the event-type counts as a side-by-side bar chart and pie
/// chart in one PNG. Skips with a warning when there is nothing to draw.
pub fn plot_event_type_frequency(
    counts: &[(String, usize)],
    path: &str,
) -> Result<(), AnalyzerError> {
    if counts.is_empty() {
        warn!("no events to chart, skipping {path}");
        return Ok(());
    }

    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let (bar_area, pie_area) = root.split_horizontally(600);

    let max_count = counts.iter().map(|(_, count)| *count).max().unwrap_or(1) as i32;
    let mut chart = ChartBuilder::on(&bar_area)
        .caption("Event Type Frequency Distribution", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..counts.len() as i32, 0..max_count + max_count / 10 + 1)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(counts.len())
        .x_label_formatter(&|index| {
            counts
                .get(*index as usize)
                .map(|(event_type, _)| event_type.clone())
                .unwrap_or_default()
        })
        .y_desc("Count")
        .x_desc("Event Type")
        .draw()
        .map_err(plot_err)?;
    chart
        .draw_series(counts.iter().enumerate().map(|(index, (_, count))| {
            Rectangle::new(
                [(index as i32, 0), (index as i32 + 1, *count as i32)],
                BLUE.mix(0.5).filled(),
            )
        }))
        .map_err(plot_err)?;

    let pie_area = pie_area
        .titled("Event Type Distribution", ("sans-serif", 24))
        .map_err(plot_err)?;
    let sizes: Vec<f64> = counts.iter().map(|(_, count)| *count as f64).collect();
    let labels: Vec<String> = counts.iter().map(|(event_type, _)| event_type.clone()).collect();
    let colors: Vec<RGBColor> = (0..counts.len())
        .map(|index| {
            let (r, g, b) = Palette99::COLORS[index % Palette99::COLORS.len()];
            RGBColor(r, g, b)
        })
        .collect();

    let center = (300, 290);
    let radius = 220.0;
    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style(("sans-serif", 16).into_font());
    pie.percentages(("sans-serif", 14).into_font());
    pie_area.draw(&pie).map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    info!("wrote event type chart to {path}");
    Ok(())
}
