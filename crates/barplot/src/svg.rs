use crate::barplot::{Bar, BarPlot, Color};
use std::path::Path;

const DEFAULT_WIDTH: f64 = 480.0;
const DEFAULT_HEIGHT: f64 = 360.0;
const DEFAULT_PADDING: f64 = 12.0;
const MARGIN_LEFT: f64 = 72.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 36.0;
const NUM_TICKS: usize = 5;
const BAR_FILL_FRAC: f64 = 0.6;

pub fn generate_string(plot: &BarPlot) -> String {
    let mut generator = Generator::new((DEFAULT_WIDTH, DEFAULT_HEIGHT), DEFAULT_PADDING);
    generator.generate(plot);
    generator.content
}

pub fn render_from_string(svg_content: &str, path: &Path) -> Result<(), String> {
    std::fs::write(path, svg_content).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Rounds `value` up to 1, 2, 2.5 or 5 times a power of ten.
pub(crate) fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= value * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude)
}

pub(crate) fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

struct Generator {
    dims: (f64, f64),
    pad: f64,
    y_max: f64,
    content: String,
}

impl Generator {
    fn new(dims: (f64, f64), pad: f64) -> Self {
        Self {
            dims,
            pad,
            y_max: 1.0,
            content: String::new(),
        }
    }

    fn generate(&mut self, plot: &BarPlot) {
        self.y_max = nice_ceiling(plot.max_value());
        self.start_svg();
        self.add_background();
        self.plot_title(&plot.title);
        self.plot_y_axis(&plot.y_label);

        let slot_width = self.plot_width() / plot.bars.len().max(1) as f64;
        for (index, bar) in plot.bars.iter().enumerate() {
            let x = self.origin().0 + slot_width * index as f64;
            self.plot_bar(bar, x, slot_width);
        }

        self.end_svg();
    }

    fn plot_title(&mut self, title: &str) {
        let x = self.dims.0 / 2.0;
        let y = self.pad + 14.0;
        let style = r#"font-family="sans-serif" font-size="16px" font-weight="bold" text-anchor="middle""#;
        self.add_text((x, y), style, title);
    }

    fn plot_y_axis(&mut self, label: &str) {
        let (x0, y0) = self.origin();
        let top = MARGIN_TOP;
        self.add_line((x0, top), (x0, y0), "#000000", 1.0);
        self.add_line((x0, y0), (self.dims.0 - self.pad, y0), "#000000", 1.0);

        for tick in 0..=NUM_TICKS {
            let value = self.y_max * tick as f64 / NUM_TICKS as f64;
            let y = self.to_y(value);
            self.add_line((x0 - 4.0, y), (x0, y), "#000000", 1.0);
            if tick > 0 {
                self.add_line((x0, y), (self.dims.0 - self.pad, y), "#E0E0E0", 0.5);
            }
            let style = r#"font-family="sans-serif" font-size="11px" text-anchor="end""#;
            self.add_text((x0 - 6.0, y + 4.0), style, &format_tick(value));
        }

        let x = self.pad + 10.0;
        let y = (top + y0) / 2.0;
        self.content.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" font-family=\"sans-serif\" font-size=\"12px\" text-anchor=\"middle\" transform=\"rotate(-90 {x} {y})\">{}</text>\n",
            escape_text(label)
        ));
    }

    fn plot_bar(&mut self, bar: &Bar, slot_x: f64, slot_width: f64) {
        let (_, y0) = self.origin();
        let bar_width = slot_width * BAR_FILL_FRAC;
        let x = slot_x + (slot_width - bar_width) / 2.0;

        // Non-positive values keep their category label but get no visible bar
        if bar.value > 0.0 {
            let top = self.to_y(bar.value);
            self.add_rect((x, top), (bar_width, y0 - top), &bar.color);
        }

        let style = r#"font-family="sans-serif" font-size="12px" text-anchor="middle""#;
        self.add_text((slot_x + slot_width / 2.0, y0 + 18.0), style, &bar.label);
    }

    fn add_rect(&mut self, pos: (f64, f64), dims: (f64, f64), color: &Color) {
        let (x, y) = pos;
        let (w, h) = dims;
        let pos = format!("x=\"{}\" y=\"{}\"", x, y);
        let dim = format!("height=\"{}\" width=\"{}\"", h, w);
        let style = format!("fill=\"{}\" stroke=\"{}\" stroke-width=\"0\"", color, color);
        self.content
            .push_str(&format!("<rect {} {} {} opacity=\"0.9\" />\n", pos, dim, style));
    }

    fn add_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, stroke: f64) {
        let x1y1 = format!("x1=\"{}\" y1=\"{}\"", from.0, from.1);
        let x2y2 = format!("x2=\"{}\" y2=\"{}\"", to.0, to.1);
        let style = format!("stroke=\"{}\" stroke-width=\"{}\"", color, stroke);
        self.content
            .push_str(&format!("<line {} {} {} />\n", x1y1, x2y2, style));
    }

    fn add_text(&mut self, pos: (f64, f64), style: &str, text: &str) {
        let point = format!("x=\"{}\" y=\"{}\"", pos.0, pos.1);
        self.content.push_str(&format!(
            "<text {} {}>{}</text>\n",
            point,
            style,
            escape_text(text)
        ));
    }

    fn start_svg(&mut self) {
        self.content.push_str("<?xml version=\"1.0\"?>\n");
        self.content.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
            self.dims.0, self.dims.1
        ));
    }

    fn end_svg(&mut self) {
        self.content.push_str("</svg>\n");
    }

    fn add_background(&mut self) {
        self.content
            .push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    }

    fn origin(&self) -> (f64, f64) {
        (MARGIN_LEFT, self.dims.1 - MARGIN_BOTTOM)
    }

    fn plot_width(&self) -> f64 {
        self.dims.0 - self.pad - MARGIN_LEFT
    }

    fn to_y(&self, value: f64) -> f64 {
        let (_, y0) = self.origin();
        y0 - (value / self.y_max) * (y0 - MARGIN_TOP)
    }
}

fn format_tick(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk_plot(values: [f64; 3]) -> BarPlot {
        BarPlot::new(
            "PRS Distribution for ABC",
            "Total PRS Score",
            vec![
                Bar::new("Low", values[0], "green"),
                Bar::new("Medium", values[1], "orange"),
                Bar::new("High", values[2], "red"),
            ],
        )
    }

    #[test]
    fn nice_ceiling_rounds_up() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(-3.0), 1.0);
        assert!((nice_ceiling(0.5) - 0.5).abs() < 1e-12);
        assert!((nice_ceiling(0.7) - 1.0).abs() < 1e-12);
        assert_eq!(nice_ceiling(1.3), 2.0);
        assert_eq!(nice_ceiling(2.2), 2.5);
        assert_eq!(nice_ceiling(42.0), 50.0);
    }

    #[test]
    fn format_tick_strips_trailing_zeros() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(0.25), "0.25");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(2.0), "2");
    }

    #[test]
    fn only_positive_bars_are_drawn() {
        let svg = generate_string(&risk_plot([0.0, 0.5, 0.0]));
        assert!(svg.contains("fill=\"orange\""));
        assert!(!svg.contains("fill=\"green\""));
        assert!(!svg.contains("fill=\"red\""));
        assert!(svg.contains(">Low</text>"));
        assert!(svg.contains(">High</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn labels_are_escaped() {
        let mut plot = risk_plot([0.1, 0.0, 0.0]);
        plot.title = "A<B & C".to_string();
        let svg = generate_string(&plot);
        assert!(svg.contains("A&lt;B &amp; C"));
    }

    #[test]
    fn render_svg_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let svg = generate_string(&risk_plot([0.0, 0.0, 1.2]));
        render_from_string(&svg, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, svg);
    }
}
