use super::score::{prs_score, Bucket};
use crate::store::{DataStore, Dataset, VariantRecord};
use thiserror::Error;

const SNP_PREFIX: &str = "RS";
// Accepted alongside the real prefix; inputs like "R S123" are treated as SNP ids.
const SNP_PREFIX_SPACED: &str = "R S";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Please enter a Gene Name or SNP ID.")]
    EmptyQuery,
    #[error("Data is unavailable. Please check the log for loading errors.")]
    DataUnavailable,
    #[error("SNP ID {0} not found in the database.")]
    SnpNotFound(String),
    #[error("Gene {0} not found.")]
    GeneNotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Snp,
    Gene,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub matched_records: Vec<VariantRecord>,
    pub resolved_gene_name: String,
    pub prs_score: f64,
    pub bucket: Bucket,
}

/// Trims and uppercases raw user input.
pub fn normalize_query(raw_input: &str) -> String {
    raw_input.trim().to_uppercase()
}

/// Classifies an already normalized query.
pub fn classify(query: &str) -> QueryKind {
    if query.starts_with(SNP_PREFIX) || query.starts_with(SNP_PREFIX_SPACED) {
        QueryKind::Snp
    } else {
        QueryKind::Gene
    }
}

/// Resolves a gene name or SNP id against the current contents of `store`.
pub fn resolve_query(raw_input: &str, store: &DataStore) -> Result<QueryResult, QueryError> {
    let query = normalize_query(raw_input);
    if query.is_empty() {
        return Err(QueryError::EmptyQuery);
    }
    let dataset = store.snapshot().ok_or(QueryError::DataUnavailable)?;
    log::debug!("Resolving query {} against {} records", query, dataset.len());
    resolve_in_dataset(&query, &dataset)
}

fn resolve_in_dataset(query: &str, dataset: &Dataset) -> Result<QueryResult, QueryError> {
    let gene_name = match classify(query) {
        QueryKind::Snp => resolve_snp(query, dataset)?,
        QueryKind::Gene => query.to_string(),
    };

    let matched_records: Vec<VariantRecord> = dataset
        .records()
        .iter()
        .filter(|r| r.matches_gene(&gene_name))
        .cloned()
        .collect();
    if matched_records.is_empty() {
        return Err(QueryError::GeneNotFound(gene_name));
    }

    let prs_score = prs_score(&matched_records);
    let bucket = Bucket::from_score(prs_score);
    log::debug!(
        "Gene {}: {} records, score {:.4} ({})",
        gene_name,
        matched_records.len(),
        prs_score,
        bucket
    );

    Ok(QueryResult {
        matched_records,
        resolved_gene_name: gene_name,
        prs_score,
        bucket,
    })
}

fn resolve_snp(snp_id: &str, dataset: &Dataset) -> Result<String, QueryError> {
    dataset
        .records()
        .iter()
        .find(|r| r.matches_snp(snp_id))
        .map(|r| r.gene_name.to_uppercase())
        .ok_or_else(|| QueryError::SnpNotFound(snp_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{read_dataset, DataStore};
    use std::io::Cursor;

    fn store_from_json(json: &str) -> DataStore {
        DataStore::with_dataset(read_dataset(Cursor::new(json)).unwrap())
    }

    fn copd_store() -> DataStore {
        store_from_json(
            r#"[
            {"Gene Name": "SERPINA1", "SNP ID": "rs28929474", "Effect Size (Beta)": 0.45},
            {"Gene Name": "HHIP", "SNP ID": "rs13118928", "Effect Size (Beta)": 0.12},
            {"Gene Name": "serpina1", "SNP ID": "rs17580", "Effect Size (Beta)": 0.31},
            {"Gene Name": "FAM13A", "SNP ID": "rs7671167"},
            {"Gene Name": "HHIP", "SNP ID": "rs1828591", "Effect Size (Beta)": 0.08},
            {"Gene Name": "SERPINA1", "SNP ID": "rs1303", "Effect Size (Beta)": 0.27}
        ]"#,
        )
    }

    #[test]
    fn end_to_end_defaulted_beta() {
        let store = store_from_json(
            r#"[{"Gene Name":"ABC","SNP ID":"rs1","Effect Size (Beta)":0.3},{"Gene Name":"ABC","SNP ID":"rs2"}]"#,
        );
        let result = resolve_query("ABC", &store).unwrap();
        assert!((result.prs_score - 0.5).abs() < 1e-9);
        assert_eq!(result.bucket, Bucket::Medium);
        assert_eq!(result.matched_records.len(), 2);
        assert_eq!(result.resolved_gene_name, "ABC");
    }

    #[test]
    fn gene_query_is_case_insensitive_and_ordered() {
        let store = copd_store();
        let result = resolve_query("  serpina1 ", &store).unwrap();
        let ids: Vec<&str> = result
            .matched_records
            .iter()
            .map(|r| r.snp_id.as_str())
            .collect();
        assert_eq!(ids, ["rs28929474", "rs17580", "rs1303"]);
        assert!((result.prs_score - 1.03).abs() < 1e-9);
        assert_eq!(result.bucket, Bucket::High);
    }

    #[test]
    fn snp_query_redirects_to_gene() {
        let store = copd_store();
        let by_snp = resolve_query("rs17580", &store).unwrap();
        let by_gene = resolve_query("SERPINA1", &store).unwrap();
        assert_eq!(by_snp, by_gene);
    }

    #[test]
    fn snp_query_uses_defaulted_beta() {
        let store = copd_store();
        let result = resolve_query("RS7671167", &store).unwrap();
        assert_eq!(result.resolved_gene_name, "FAM13A");
        assert!((result.prs_score - 0.2).abs() < 1e-9);
        assert_eq!(result.bucket, Bucket::Low);
    }

    #[test]
    fn unknown_gene() {
        let store = copd_store();
        assert_eq!(
            resolve_query("ZZZTOP", &store),
            Err(QueryError::GeneNotFound("ZZZTOP".to_string()))
        );
    }

    #[test]
    fn unknown_snp() {
        let store = copd_store();
        assert_eq!(
            resolve_query("rs000", &store),
            Err(QueryError::SnpNotFound("RS000".to_string()))
        );
    }

    #[test]
    fn spaced_prefix_is_treated_as_snp() {
        let store = copd_store();
        assert_eq!(classify("R S17580"), QueryKind::Snp);
        assert_eq!(
            resolve_query("r s17580", &store),
            Err(QueryError::SnpNotFound("R S17580".to_string()))
        );
    }

    #[test]
    fn gene_names_starting_with_rs_are_snp_queries() {
        let store = store_from_json(r#"[{"Gene Name": "RSPO3", "SNP ID": "rs9399401"}]"#);
        assert_eq!(classify("RSPO3"), QueryKind::Snp);
        assert_eq!(
            resolve_query("RSPO3", &store),
            Err(QueryError::SnpNotFound("RSPO3".to_string()))
        );
    }

    #[test]
    fn blank_input_does_not_need_data() {
        let store = DataStore::new();
        assert_eq!(resolve_query("   \t", &store), Err(QueryError::EmptyQuery));
        assert_eq!(resolve_query("", &store), Err(QueryError::EmptyQuery));
    }

    #[test]
    fn unloaded_store_is_unavailable() {
        let store = DataStore::new();
        assert_eq!(
            resolve_query("ABC", &store),
            Err(QueryError::DataUnavailable)
        );
        store.begin_load();
        assert_eq!(
            resolve_query("ABC", &store),
            Err(QueryError::DataUnavailable)
        );
        store.fail("unreachable");
        assert_eq!(
            resolve_query("ABC", &store),
            Err(QueryError::DataUnavailable)
        );
    }

    #[test]
    fn empty_dataset_reports_not_found() {
        let store = store_from_json("[]");
        assert_eq!(
            resolve_query("ABC", &store),
            Err(QueryError::GeneNotFound("ABC".to_string()))
        );
    }

    #[test]
    fn error_messages_quote_identifiers() {
        assert_eq!(
            QueryError::SnpNotFound("RS000".into()).to_string(),
            "SNP ID RS000 not found in the database."
        );
        assert_eq!(
            QueryError::GeneNotFound("ZZZTOP".into()).to_string(),
            "Gene ZZZTOP not found."
        );
    }
}
