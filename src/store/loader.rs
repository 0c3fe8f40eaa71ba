use super::data_store::{DataStore, Dataset};
use super::record::VariantRecord;
use crate::utils::open_data_reader;
use crossbeam_channel::Sender;
use std::{
    fmt,
    io::Read,
    path::PathBuf,
    sync::Arc,
    thread::{self, JoinHandle},
};
use thiserror::Error;

pub const DEFAULT_DATA_SOURCE: &str = "copd_data.json";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Io(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Request(String),
    #[error("invalid dataset: {0}")]
    Decode(String),
    #[error("load already started")]
    AlreadyStarted,
}

/// Where the variant dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn parse(encoding: &str) -> Result<Self, String> {
        let encoding = encoding.trim();
        if encoding.is_empty() {
            return Err("Data source cannot be an empty string".to_string());
        }
        let lower = encoding.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(DataSource::Url(encoding.to_string()))
        } else {
            Ok(DataSource::File(PathBuf::from(encoding)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Outcome of a background load, for whoever presents it to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    Loaded(usize),
    Failed(String),
}

/// User-facing wording of a failed load.
pub fn load_failure_message(source: &DataSource, err: &LoadError) -> String {
    format!("Error loading initial gene data ({}): {}", source, err)
}

/// Parses a JSON array of variant objects and normalizes every record.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let records: Vec<VariantRecord> =
        serde_json::from_reader(reader).map_err(|e| LoadError::Decode(e.to_string()))?;
    Ok(Dataset::new(records))
}

pub fn load(source: &DataSource) -> Result<Dataset, LoadError> {
    match source {
        DataSource::File(path) => {
            let reader = open_data_reader(path).map_err(LoadError::Io)?;
            read_dataset(reader)
        }
        DataSource::Url(url) => fetch(url),
    }
}

fn fetch(url: &str) -> Result<Dataset, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LoadError::Request(e.to_string()))?;
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .map_err(|e| LoadError::Request(e.to_string()))?;
    if !response.status().is_success() {
        return Err(LoadError::Status(response.status().as_u16()));
    }
    let body = response
        .bytes()
        .map_err(|e| LoadError::Request(e.to_string()))?;
    read_dataset(body.as_ref())
}

/// Loads `source` into `store`, blocking until the dataset is installed.
pub fn load_into(store: &DataStore, source: &DataSource) -> Result<usize, LoadError> {
    if !store.begin_load() {
        return Err(LoadError::AlreadyStarted);
    }
    log::debug!("Loading variant data from {}", source);
    match load(source) {
        Ok(dataset) => {
            let num_records = dataset.len();
            store.install(dataset);
            log::info!("Data loaded successfully: {} records", num_records);
            Ok(num_records)
        }
        Err(err) => {
            store.fail(err.to_string());
            Err(err)
        }
    }
}

/// Starts the one-time load on a background thread. The outcome is reported
/// on `events`; a failure is also logged.
pub fn spawn_load(
    store: Arc<DataStore>,
    source: DataSource,
    events: Sender<LoadEvent>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("prsviz-loader".to_string())
        .spawn(move || {
            let event = match load_into(&store, &source) {
                Ok(num_records) => LoadEvent::Loaded(num_records),
                Err(err) => {
                    let message = load_failure_message(&source, &err);
                    log::error!("{}", message);
                    LoadEvent::Failed(message)
                }
            };
            if let Err(e) = events.send(event) {
                log::trace!("Load event dropped: {}", e);
            }
        })
}
