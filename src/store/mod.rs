mod data_store;
mod loader;
mod record;

pub use data_store::{DataStore, Dataset, LoadStatus};
pub use loader::{
    load, load_failure_message, load_into, read_dataset, spawn_load, DataSource, LoadError,
    LoadEvent, DEFAULT_DATA_SOURCE,
};
pub use record::{
    VariantRecord, DEFAULT_EFFECT_SIZE_BETA, EFFECT_SIZE_KEY, GENE_NAME_KEY, SNP_ID_KEY,
};
