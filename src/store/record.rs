use serde::Deserialize;
use serde_json::{Map, Number, Value};

pub const GENE_NAME_KEY: &str = "Gene Name";
pub const SNP_ID_KEY: &str = "SNP ID";
pub const EFFECT_SIZE_KEY: &str = "Effect Size (Beta)";

/// Effect size assigned to variants whose source row carries none.
pub const DEFAULT_EFFECT_SIZE_BETA: f64 = 0.2;

/// One row of the variant dataset.
///
/// The gene name, SNP id and effect size are typed; every other field of the
/// source object is kept verbatim in `extra`. `columns` remembers the key order
/// of the source object so that tables list fields the way the dataset does.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct VariantRecord {
    pub gene_name: String,
    pub snp_id: String,
    pub effect_size_beta: f64,
    pub beta_defaulted: bool,
    extra: Map<String, Value>,
    columns: Vec<String>,
}

impl VariantRecord {
    pub fn new(gene_name: &str, snp_id: &str, effect_size_beta: Option<f64>) -> Self {
        Self {
            gene_name: gene_name.to_string(),
            snp_id: snp_id.to_string(),
            effect_size_beta: effect_size_beta.unwrap_or(DEFAULT_EFFECT_SIZE_BETA),
            beta_defaulted: effect_size_beta.is_none(),
            extra: Map::new(),
            columns: vec![
                GENE_NAME_KEY.to_string(),
                SNP_ID_KEY.to_string(),
                EFFECT_SIZE_KEY.to_string(),
            ],
        }
    }

    pub fn from_object(object: Map<String, Value>) -> Result<Self, String> {
        let gene_name = required_string(&object, GENE_NAME_KEY)?;
        let snp_id = required_string(&object, SNP_ID_KEY)?;

        let (effect_size_beta, beta_defaulted) = match object.get(EFFECT_SIZE_KEY) {
            None | Some(Value::Null) => (DEFAULT_EFFECT_SIZE_BETA, true),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(beta) => (beta, false),
                None => return Err(format!("{} is not representable: {}", EFFECT_SIZE_KEY, n)),
            },
            Some(other) => {
                return Err(format!(
                    "{} must be a number, got {} (SNP {})",
                    EFFECT_SIZE_KEY, other, snp_id
                ))
            }
        };

        let mut columns: Vec<String> = object.keys().cloned().collect();
        if !object.contains_key(EFFECT_SIZE_KEY) {
            columns.push(EFFECT_SIZE_KEY.to_string());
        }

        let extra = object
            .into_iter()
            .filter(|(key, _)| !is_core_key(key))
            .collect();

        Ok(Self {
            gene_name,
            snp_id,
            effect_size_beta,
            beta_defaulted,
            extra,
            columns,
        })
    }

    /// Field names in display order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Value of a field as it should appear in a table, with the effect size
    /// already normalized.
    pub fn field(&self, key: &str) -> Option<Value> {
        match key {
            GENE_NAME_KEY => Some(Value::String(self.gene_name.clone())),
            SNP_ID_KEY => Some(Value::String(self.snp_id.clone())),
            EFFECT_SIZE_KEY => Some(
                Number::from_f64(self.effect_size_beta)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
            ),
            _ => self.extra.get(key).cloned(),
        }
    }

    pub fn matches_gene(&self, gene_name: &str) -> bool {
        self.gene_name.to_uppercase() == gene_name
    }

    pub fn matches_snp(&self, snp_id: &str) -> bool {
        self.snp_id.to_uppercase() == snp_id
    }
}

impl TryFrom<Map<String, Value>> for VariantRecord {
    type Error = String;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::from_object(object)
    }
}

fn is_core_key(key: &str) -> bool {
    key == GENE_NAME_KEY || key == SNP_ID_KEY || key == EFFECT_SIZE_KEY
}

fn required_string(object: &Map<String, Value>, key: &str) -> Result<String, String> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(format!("Field \"{}\" must be a string, got {}", key, other)),
        None => Err(format!("Missing field \"{}\"", key)),
    }
}
