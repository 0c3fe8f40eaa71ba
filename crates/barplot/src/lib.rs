/*!
This crate draws simple categorical bar charts: one vertical bar per category,
each with its own fill color, over a zero-based y axis with ticks. Charts carry
a title and a y-axis label and can be rendered as SVG, PNG, or PDF images.

The SVG document is always produced first; PNG and PDF output are conversions
of that document.
*/

mod barplot;
mod image;
mod pdf;
mod png;
mod svg;

pub use barplot::{Bar, BarPlot, Color};
pub use image::generate as generate_image;
use usvg::Tree;

pub fn prepare_svg_tree(svg_data: &[u8]) -> Result<Tree, String> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_data(svg_data, &options).map_err(|e| e.to_string())?;
    Ok(tree)
}
