use crate::{pdf, png, svg, BarPlot};
use std::path::Path;

pub fn generate(plot: &BarPlot, path: &Path) -> Result<(), String> {
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        let file_type = FileType::from_extension(extension)
            .ok_or_else(|| format!("Unsupported file extension: {extension:?}"))?;
        let svg_content = svg::generate_string(plot);
        match file_type {
            FileType::Svg => svg::render_from_string(&svg_content, path),
            FileType::Png => png::render_from_string(&svg_content, path),
            FileType::Pdf => pdf::render_from_string(&svg_content, path),
        }
    } else {
        Err(format!("Failed to get extension from path: {path:?}"))
    }
}

#[derive(Debug, PartialEq)]
pub enum FileType {
    Svg,
    Png,
    Pdf,
}

impl FileType {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "svg" => Some(FileType::Svg),
            "png" => Some(FileType::Png),
            "pdf" => Some(FileType::Pdf),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bar;

    #[test]
    fn file_type_is_case_insensitive() {
        assert_eq!(FileType::from_extension("SVG"), Some(FileType::Svg));
        assert_eq!(FileType::from_extension("png"), Some(FileType::Png));
        assert_eq!(FileType::from_extension("Pdf"), Some(FileType::Pdf));
        assert_eq!(FileType::from_extension("jpg"), None);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let plot = BarPlot::new("t", "y", vec![Bar::new("Low", 0.1, "green")]);
        assert!(generate(&plot, &dir.path().join("chart.jpg")).is_err());
        assert!(generate(&plot, &dir.path().join("chart")).is_err());
        assert!(!dir.path().join("chart.jpg").exists());
    }

    #[test]
    fn generate_svg_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let plot = BarPlot::new("t", "y", vec![Bar::new("Low", 0.1, "green")]);
        generate(&plot, &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}
