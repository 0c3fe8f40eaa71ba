mod engine;
mod score;

pub use engine::{classify, normalize_query, resolve_query, QueryError, QueryKind, QueryResult};
pub use score::{bucket_values, prs_score, Bucket, HIGH_THRESHOLD, MEDIUM_THRESHOLD};
