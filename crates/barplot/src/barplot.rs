pub type Color = String;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Color,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<Color>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarPlot {
    pub title: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl BarPlot {
    pub fn new(title: impl Into<String>, y_label: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            bars,
        }
    }

    /// Largest bar value, never below zero.
    pub fn max_value(&self) -> f64 {
        self.bars
            .iter()
            .map(|bar| bar.value)
            .fold(0.0, f64::max)
    }

    /// True when at least one bar would be drawn with a visible height.
    pub fn has_data(&self) -> bool {
        self.bars.iter().any(|bar| bar.value > 0.0)
    }
}
