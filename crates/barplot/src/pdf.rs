use std::path::Path;
use svg2pdf::usvg;

pub fn render_from_string(svg_content: &str, path: &Path) -> Result<(), String> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg_content, &options).map_err(|e| e.to_string())?;
    let pdf = svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| format!("PDF conversion failed: {:?}", e))?;
    std::fs::write(path, pdf).map_err(|e| format!("{}: {}", path.display(), e))
}
