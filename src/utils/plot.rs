// Visualization of shop layouts and chosen tours

use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use crate::error::{Result, ShopperError};
use crate::models::{Candidate, Location, Problem};

/// Renders the shops (blue), the start (red) and, when given, the closed tour
/// of `candidate` into a PNG at `output_path`
pub fn plot_tour<P: AsRef<Path>>(
    problem: &Problem,
    candidate: Option<&Candidate>,
    output_path: P,
) -> Result<()> {
    draw(problem, candidate, output_path.as_ref())
        .map_err(|e| ShopperError::Plot(e.to_string()))
}

/// Chart bounds around all shops and the start, padded by 5% on each side
pub fn bounds(problem: &Problem) -> (f64, f64, f64, f64) {
    let start = problem.start();
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (start.x, start.x, start.y, start.y);

    for shop in problem.shops() {
        min_x = min_x.min(shop.location.x);
        max_x = max_x.max(shop.location.x);
        min_y = min_y.min(shop.location.y);
        max_y = max_y.max(shop.location.y);
    }

    let pad_x = ((max_x - min_x) * 0.05).max(1.0);
    let pad_y = ((max_y - min_y) * 0.05).max(1.0);
    (min_x - pad_x, max_x + pad_x, min_y - pad_y, max_y + pad_y)
}

fn draw(
    problem: &Problem,
    candidate: Option<&Candidate>,
    output_path: &Path,
) -> std::result::Result<(), Box<dyn Error>> {
    let (min_x, max_x, min_y, max_y) = bounds(problem);
    let start = problem.start();

    let root = BitMapBackend::new(output_path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let caption = match candidate {
        Some(candidate) => format!(
            "{} shops, tour over {} (cost {:.2})",
            problem.shops().len(),
            candidate.visits.len(),
            candidate.cost
        ),
        None => format!("{} shops", problem.shops().len()),
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(min_x..max_x, min_y..max_y)?;

    chart.configure_mesh().draw()?;

    chart.draw_series(problem.shops().iter().map(|shop| {
        Circle::new(
            (shop.location.x, shop.location.y),
            3,
            ShapeStyle::from(&BLUE).filled(),
        )
    }))?;

    chart.draw_series(std::iter::once(Circle::new(
        (start.x, start.y),
        6,
        ShapeStyle::from(&RED).filled(),
    )))?;

    if let Some(candidate) = candidate {
        let mut path_points = vec![(start.x, start.y)];
        for visit in &candidate.visits {
            let Location { x, y } = problem.location(visit.shop_id)?;
            path_points.push((x, y));
        }
        path_points.push((start.x, start.y));

        chart.draw_series(LineSeries::new(path_points, BLACK.mix(0.7).stroke_width(2)))?;
    }

    root.present()?;
    Ok(())
}
