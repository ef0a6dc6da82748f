use nalgebra::DVector;

// integrand names may contain characters like '/' or '^' that break file paths
fn safe_filename(varname: &str) -> String {
    let stem: String = varname
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}.png", stem)
}

pub fn plot_grid(
    varname: String,
    arg: String,
    curve_x: &DVector<f64>,
    curve_y: &DVector<f64>,
    grid_x: &DVector<f64>,
    grid_y: &DVector<f64>,
) {
    use plotters::prelude::*;
    let x_min = curve_x.min();
    let x_max = curve_x.max();
    let y_min = curve_y.min().min(grid_y.min());
    let y_max = curve_y.max().max(grid_y.max());
    // additive padding, multiplicative padding misbehaves around negative bounds
    let x_pad = 0.05 * (x_max - x_min);
    let y_pad = 0.05 * (y_max - y_min);
    let filename = safe_filename(&varname);
    let root_area = BitMapBackend::new(&filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE).unwrap();

    // Create a chart builder
    let mut chart = ChartBuilder::on(&root_area)
        .caption(format!("{}", varname), ("sans-serif", 50))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(x_min - x_pad..x_max + x_pad, y_min - y_pad..y_max + y_pad)
        .unwrap();

    // Configure the mesh
    chart
        .configure_mesh()
        .x_desc(&arg)
        .y_desc(&varname)
        .draw()
        .unwrap();

    // Plot the integrand curve
    let series: Vec<(f64, f64)> = curve_x
        .iter()
        .zip(curve_y.iter())
        .map(|(&x, &y)| (x, y))
        .collect();
    chart
        .draw_series(LineSeries::new(series, &Palette99::pick(0)))
        .unwrap()
        .label(format!(" {}", varname))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(0)));

    // Mark the Simpson nodes on top of the curve
    let nodes: Vec<(f64, f64)> = grid_x
        .iter()
        .zip(grid_y.iter())
        .map(|(&x, &y)| (x, y))
        .collect();
    chart
        .draw_series(nodes.iter().map(|&(x, y)| Circle::new((x, y), 3, RED.filled())))
        .unwrap()
        .label(" simpson nodes")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, RED.filled()));

    // Configure the legend
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .unwrap();
}

use gnuplot::{AxesCommon, Caption, Color, Figure, PointSymbol, RGBString};
pub fn plot_grid_gnuplot(
    varname: String,
    arg: String,
    curve_x: &DVector<f64>,
    curve_y: &DVector<f64>,
    grid_x: &DVector<f64>,
    grid_y: &DVector<f64>,
) {
    let mut fg = Figure::new();
    let curve: Vec<f64> = curve_y.iter().copied().collect();
    let nodes: Vec<f64> = grid_y.iter().copied().collect();

    fg.axes2d()
        .set_title(&varname, &[])
        .set_x_label(&arg, &[])
        .set_y_label(&varname, &[])
        .lines(
            curve_x.as_slice(),
            &curve,
            &[Caption(&varname), Color(RGBString("blue"))],
        )
        .points(
            grid_x.as_slice(),
            &nodes,
            &[Caption("simpson nodes"), Color(RGBString("red")), PointSymbol('O')],
        );

    // Save the plot to a file
    let filename = safe_filename(&varname);
    fg.save_to_png(&filename, 800, 600).unwrap();
}
