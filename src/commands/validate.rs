use crate::cli::ValidateArgs;
use crate::lookup::{prs_score, Bucket};
use crate::store::{load_failure_message, load_into, DataStore, Dataset, VariantRecord};
use crate::utils::Result;
use itertools::Itertools;
use std::collections::HashMap;
use std::io::Write;

pub fn validate(args: ValidateArgs) -> Result<()> {
    let store = DataStore::new();
    load_into(&store, &args.data).map_err(|e| load_failure_message(&args.data, &e))?;
    let dataset = store
        .snapshot()
        .ok_or_else(|| format!("No data installed from {}", args.data))?;

    let summary = summarize(&dataset);
    for snp_id in &summary.duplicate_snps {
        log::warn!(
            "SNP ID {} occurs more than once; lookups use its first occurrence",
            snp_id
        );
    }

    log::info!(
        "Records: {}, genes: {}, distinct SNP IDs: {}",
        summary.num_records,
        summary.gene_scores.len(),
        summary.num_snps
    );
    log::info!(
        "Effect sizes defaulted: {} ({:.2}%)",
        summary.num_defaulted,
        percentage(summary.num_defaulted, summary.num_records)
    );
    let score_stats = calculate_stats(&summary.gene_scores);
    log::info!(
        "Gene scores - Range: [{:.4},{:.4}], Mean: {:.4}",
        score_stats.min,
        score_stats.max,
        score_stats.mean
    );
    for bucket in Bucket::ALL {
        let count = summary
            .gene_scores
            .iter()
            .filter(|gene| gene.bucket == bucket)
            .count();
        log::info!("Genes in bucket {}: {}", bucket, count);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_gene_scores(&mut out, &summary.gene_scores).map_err(|e| e.to_string())?;

    match summary.duplicate_snps.len() {
        0 => log::info!("Validation successful. Records={}", summary.num_records),
        n => log::info!(
            "Validation finished with warnings. Records={}, duplicated SNP IDs={}",
            summary.num_records,
            n
        ),
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneScore {
    pub gene_name: String,
    pub num_variants: usize,
    pub prs_score: f64,
    pub bucket: Bucket,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub num_records: usize,
    pub num_snps: usize,
    pub num_defaulted: usize,
    pub duplicate_snps: Vec<String>,
    pub gene_scores: Vec<GeneScore>,
}

/// Scores every gene of the dataset the same way a lookup would.
pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let mut genes: Vec<(String, Vec<VariantRecord>)> = Vec::new();
    let mut gene_index: HashMap<String, usize> = HashMap::new();
    for record in dataset.records() {
        let gene_name = record.gene_name.to_uppercase();
        let index = *gene_index.entry(gene_name.clone()).or_insert_with(|| {
            genes.push((gene_name, Vec::new()));
            genes.len() - 1
        });
        genes[index].1.push(record.clone());
    }

    let gene_scores = genes
        .into_iter()
        .map(|(gene_name, records)| {
            let score = prs_score(&records);
            GeneScore {
                gene_name,
                num_variants: records.len(),
                prs_score: score,
                bucket: Bucket::from_score(score),
            }
        })
        .collect();

    let snp_counts = dataset
        .records()
        .iter()
        .map(|record| record.snp_id.to_uppercase())
        .counts();
    let duplicate_snps = dataset
        .records()
        .iter()
        .map(|record| record.snp_id.to_uppercase())
        .unique()
        .filter(|snp_id| snp_counts.get(snp_id).copied().unwrap_or(0) > 1)
        .collect();

    DatasetSummary {
        num_records: dataset.len(),
        num_snps: snp_counts.len(),
        num_defaulted: dataset.num_defaulted(),
        duplicate_snps,
        gene_scores,
    }
}

fn write_gene_scores<W: Write>(out: &mut W, gene_scores: &[GeneScore]) -> std::io::Result<()> {
    let width = gene_scores
        .iter()
        .map(|gene| gene.gene_name.chars().count())
        .chain(std::iter::once("Gene".len()))
        .max()
        .unwrap_or(0);
    writeln!(out, "{:<width$}  Variants  Score    Bucket", "Gene", width = width)?;
    for gene in gene_scores {
        writeln!(
            out,
            "{:<width$}  {:>8}  {:>7.4}  {}",
            gene.gene_name,
            gene.num_variants,
            gene.prs_score,
            gene.bucket,
            width = width
        )?;
    }
    Ok(())
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn calculate_stats(gene_scores: &[GeneScore]) -> Stats {
    if gene_scores.is_empty() {
        return Stats {
            min: 0.0,
            max: 0.0,
            mean: 0.0,
        };
    }
    let scores = gene_scores.iter().map(|gene| gene.prs_score);
    let min = scores.clone().fold(f64::INFINITY, f64::min);
    let max = scores.clone().fold(f64::NEG_INFINITY, f64::max);
    let mean = scores.sum::<f64>() / gene_scores.len() as f64;
    Stats { min, max, mean }
}

struct Stats {
    min: f64,
    max: f64,
    mean: f64,
}
