//! This module is responsible for generating all visualizations from catalog data.

use anyhow::Result;
use pharmaflow_core::aggregate::{self, CategoryStats, Comparison};
use pharmaflow_core::catalog::ProcessCatalog;
use pharmaflow_core::layout;
use pharmaflow_schemas::process::ProcessDefinition;
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;

/// Generates and saves all charts for a single process drill-down.
pub fn render_show_charts(output_dir: &str, definition: &ProcessDefinition) -> Result<()> {
    println!("[Plotting] Generating charts for '{}'...", definition.name);

    plot_parameter_classes(output_dir, definition)?;
    plot_equipment_classes(output_dir, definition)?;
    plot_process_flow(output_dir, definition)?;

    println!("[Plotting] Charts have been saved to '{}'.", output_dir);
    Ok(())
}

/// Generates and saves all charts for a side-by-side comparison.
pub fn render_comparison_charts(output_dir: &str, comparison: &Comparison) -> Result<()> {
    println!("[Plotting] Generating comparison charts...");

    if comparison.rows.is_empty() {
        println!("[Plotting] Warning: No data to plot.");
        return Ok(());
    }

    plot_step_counts(output_dir, comparison)?;
    plot_complexity(output_dir, comparison)?;

    println!("[Plotting] Comparison charts have been saved to '{}'.", output_dir);
    Ok(())
}

/// Generates and saves all charts for the catalog-wide overview.
pub fn render_overview_charts(
    output_dir: &str,
    ordered: &[(String, CategoryStats)],
    catalog: &ProcessCatalog,
) -> Result<()> {
    println!("[Plotting] Generating overview charts...");

    if ordered.is_empty() {
        println!("[Plotting] Warning: No data to plot.");
        return Ok(());
    }

    plot_category_steps(output_dir, ordered)?;
    plot_equipment_demand(output_dir, catalog)?;

    println!("[Plotting] Overview charts have been saved to '{}'.", output_dir);
    Ok(())
}

/// Turns a segmented axis position back into the label it stands for.
fn segment_label(value: &SegmentValue<usize>, labels: &[String]) -> String {
    let index = match value {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i,
        SegmentValue::Last => return String::new(),
    };
    labels.get(index).cloned().unwrap_or_default()
}

/// Generates a pie chart of the critical parameters grouped by class.
fn plot_parameter_classes(output_dir: &str, definition: &ProcessDefinition) -> Result<()> {
    let path = format!("{}/1_parameter_classes.png", output_dir);
    let root = BitMapBackend::new(&path, (768, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    root.titled("Critical Parameters by Class", ("sans-serif", 40))?;

    let distribution = aggregate::parameter_class_distribution(definition);
    if distribution.is_empty() {
        println!(
            "[Plotting] Warning: '{}' has no critical parameters to chart.",
            definition.name
        );
        return Ok(());
    }

    let sizes: Vec<f64> = distribution.iter().map(|(_, count)| *count as f64).collect();
    let labels: Vec<String> = distribution
        .iter()
        .map(|(class, count)| format!("{} ({})", class, count))
        .collect();

    let palette = [
        RGBColor(70, 130, 180),
        RGBColor(60, 179, 113),
        RGBColor(218, 165, 32),
        RGBColor(205, 92, 92),
        RGBColor(123, 104, 238),
    ];
    let colors: Vec<RGBColor> = (0..sizes.len()).map(|i| palette[i % palette.len()]).collect();

    let dims = root.dim_in_pixel();
    let center = (dims.0 as i32 / 2, dims.1 as i32 / 2);
    let radius = 240.0;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 20).into_font());
    pie.percentages(("sans-serif", 16).into_font().color(&WHITE));
    root.draw(&pie)?;

    root.present()?;
    Ok(())
}

/// Generates a bar chart of the distinct equipment grouped by class.
fn plot_equipment_classes(output_dir: &str, definition: &ProcessDefinition) -> Result<()> {
    let path = format!("{}/2_equipment_classes.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let distribution = aggregate::equipment_class_distribution([definition]);
    if distribution.is_empty() {
        println!(
            "[Plotting] Warning: '{}' has no equipment to chart.",
            definition.name
        );
        return Ok(());
    }

    let labels: Vec<String> = distribution.iter().map(|(class, _)| class.to_string()).collect();
    let max_count = distribution.iter().map(|(_, count)| *count).max().unwrap_or(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Equipment by Class: {}", definition.name),
            ("sans-serif", 40).into_font(),
        )
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0u32..max_count as u32 + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len() + 1)
        .x_label_formatter(&|segment| segment_label(segment, &labels))
        .x_desc("Equipment class")
        .y_desc("Equipment mentions across steps")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RGBColor(70, 130, 180).filled())
            .margin(25)
            .data(distribution.iter().enumerate().map(|(i, (_, count))| (i, *count as u32))),
    )?;

    root.present()?;
    Ok(())
}

/// Generates a flowchart of the process steps in execution order.
fn plot_process_flow(output_dir: &str, definition: &ProcessDefinition) -> Result<()> {
    let path = format!("{}/3_process_flow.png", output_dir);
    let root_area = BitMapBackend::new(&path, (1920, 400)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let title = format!("Process Flow: {}", definition.name);
    root_area.titled(&title, ("sans-serif", 40))?;

    let drawing_area = root_area.margin(60, 20, 20, 20);

    let step_names: Vec<&str> = definition.steps.iter().map(|s| s.name.as_str()).collect();
    let diagram = layout::layout(&step_names);

    let (width, height) = drawing_area.dim_in_pixel();
    let x_margin = 120;
    let usable_width = width as i32 - 2 * x_margin;
    let to_pixels = |x: f64, y: f64| -> (i32, i32) {
        (
            x_margin + (x * usable_width as f64) as i32,
            (y * height as f64) as i32,
        )
    };

    let node_half_width = 12;
    let node_half_height = 12;

    for edge in &diagram.edges {
        let from = to_pixels(diagram.nodes[edge.from].x, diagram.nodes[edge.from].y);
        let to = to_pixels(diagram.nodes[edge.to].x, diagram.nodes[edge.to].y);
        drawing_area.draw(&PathElement::new(vec![from, to], BLACK.stroke_width(2)))?;

        let (mid_x, mid_y) = to_pixels(edge.midpoint.0, edge.midpoint.1);
        let arrowhead_size = 10;
        let arrowhead_points = vec![
            (mid_x + arrowhead_size / 2, mid_y),
            (mid_x - arrowhead_size / 2, mid_y - arrowhead_size / 2),
            (mid_x - arrowhead_size / 2, mid_y + arrowhead_size / 2),
        ];
        drawing_area.draw(&Polygon::new(arrowhead_points, BLACK.filled()))?;
    }

    let node_color = RGBColor(70, 130, 180);
    let style = ShapeStyle { color: node_color.into(), filled: true, stroke_width: 2 };
    let text_style = TextStyle::from(("sans-serif", 14).into_font());

    for node in &diagram.nodes {
        let (cx, cy) = to_pixels(node.x, node.y);
        drawing_area.draw(&Rectangle::new(
            [
                (cx - node_half_width, cy - node_half_height),
                (cx + node_half_width, cy + node_half_height),
            ],
            style,
        ))?;

        let caption = format!("{}. {}", node.ordinal, node.name);
        let (text_width, _) = drawing_area.estimate_text_size(&caption, &text_style)?;
        // Alternate the captions above and below the lane so neighbors stay apart.
        let text_y = if node.ordinal % 2 == 0 {
            cy + node_half_height + 10
        } else {
            cy - node_half_height - 24
        };
        drawing_area.draw_text(&caption, &text_style, (cx - text_width as i32 / 2, text_y))?;
    }

    root_area.present()?;
    Ok(())
}

/// Generates a bar chart of step counts for the compared products.
fn plot_step_counts(output_dir: &str, comparison: &Comparison) -> Result<()> {
    let path = format!("{}/1_step_counts.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = comparison.rows.iter().map(|row| row.product.clone()).collect();
    let max_steps = comparison.rows.iter().map(|row| row.step_count).max().unwrap_or(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Step Counts", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0u32..max_steps as u32 + 2)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len() + 1)
        .x_label_formatter(&|segment| segment_label(segment, &labels))
        .x_desc("Product")
        .y_desc("Steps")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RGBColor(70, 130, 180).filled())
            .margin(25)
            .data(comparison.rows.iter().enumerate().map(|(i, row)| (i, row.step_count as u32))),
    )?;

    root.present()?;
    Ok(())
}

/// Generates a scatter chart of parameter load against equipment load,
/// with marker size tracking the number of steps.
fn plot_complexity(output_dir: &str, comparison: &Comparison) -> Result<()> {
    let path = format!("{}/2_complexity.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_params = comparison
        .rows
        .iter()
        .map(|row| row.critical_parameter_count)
        .max()
        .unwrap_or(1);
    let max_equipment = comparison
        .rows
        .iter()
        .map(|row| row.distinct_equipment_count)
        .max()
        .unwrap_or(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Process Complexity", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0u32..max_params as u32 + 5, 0u32..max_equipment as u32 + 3)?;

    chart
        .configure_mesh()
        .x_desc("Critical parameters")
        .y_desc("Distinct equipment")
        .draw()?;

    let colors = [RED, GREEN, BLUE, MAGENTA, CYAN, BLACK];

    for (i, row) in comparison.rows.iter().enumerate() {
        let color = colors[i % colors.len()].clone();
        let size = 4 + row.step_count as i32;

        chart
            .draw_series(std::iter::once(Circle::new(
                (
                    row.critical_parameter_count as u32,
                    row.distinct_equipment_count as u32,
                ),
                size,
                color.mix(0.7).filled(),
            )))?
            .label(row.product.clone())
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Generates a bar chart of mean step counts per category, with whiskers
/// spanning the minimum and maximum.
fn plot_category_steps(output_dir: &str, ordered: &[(String, CategoryStats)]) -> Result<()> {
    let path = format!("{}/1_category_steps.png", output_dir);
    let root = BitMapBackend::new(&path, (1280, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = ordered.iter().map(|(category, _)| category.clone()).collect();
    let max_steps = ordered.iter().map(|(_, stats)| stats.max_step_count).max().unwrap_or(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Step Counts by Category", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0f64..max_steps as f64 * 1.2)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len() + 1)
        .x_label_formatter(&|segment| segment_label(segment, &labels))
        .x_desc("Category")
        .y_desc("Steps per process")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RGBColor(70, 130, 180).mix(0.6).filled())
            .margin(25)
            .data(ordered.iter().enumerate().map(|(i, (_, stats))| (i, stats.mean_step_count))),
    )?;

    chart.draw_series(ordered.iter().enumerate().map(|(i, (_, stats))| {
        ErrorBar::new_vertical(
            SegmentValue::CenterOf(i),
            stats.min_step_count as f64,
            stats.mean_step_count,
            stats.max_step_count as f64,
            BLACK.stroke_width(2),
            12,
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Generates a bar chart of equipment demand by class across the whole catalog.
fn plot_equipment_demand(output_dir: &str, catalog: &ProcessCatalog) -> Result<()> {
    let path = format!("{}/2_equipment_demand.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let totals = aggregate::equipment_class_distribution(catalog.definitions());
    if totals.is_empty() {
        println!("[Plotting] Warning: No data to plot.");
        return Ok(());
    }

    let labels: Vec<String> = totals.iter().map(|(class, _)| class.to_string()).collect();
    let max_count = totals.iter().map(|(_, count)| *count).max().unwrap_or(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Equipment Demand by Class", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0u32..max_count as u32 + 2)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len() + 1)
        .x_label_formatter(&|segment| segment_label(segment, &labels))
        .x_desc("Equipment class")
        .y_desc("Equipment mentions, catalog-wide")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RGBColor(70, 130, 180).filled())
            .margin(25)
            .data(totals.iter().enumerate().map(|(i, (_, count))| (i, *count as u32))),
    )?;

    root.present()?;
    Ok(())
}
