use crate::store::VariantRecord;
use std::fmt;

/// Scores at or above this are at least `Medium`.
pub const MEDIUM_THRESHOLD: f64 = 0.5;
/// Scores at or above this are `High`.
pub const HIGH_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Low,
    Medium,
    High,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Low, Bucket::Medium, Bucket::High];

    pub fn from_score(score: f64) -> Self {
        if score < MEDIUM_THRESHOLD {
            Bucket::Low
        } else if score < HIGH_THRESHOLD {
            Bucket::Medium
        } else {
            Bucket::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Low => "Low",
            Bucket::Medium => "Medium",
            Bucket::High => "High",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Bucket::Low => "green",
            Bucket::Medium => "orange",
            Bucket::High => "red",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Placeholder risk score: the plain sum of effect sizes.
pub fn prs_score(records: &[VariantRecord]) -> f64 {
    records.iter().map(|r| r.effect_size_beta).sum()
}

/// Per-bucket chart values in `Bucket::ALL` order; only `bucket` carries the score.
pub fn bucket_values(score: f64, bucket: Bucket) -> [f64; 3] {
    Bucket::ALL.map(|b| if b == bucket { score } else { 0.0 })
}
