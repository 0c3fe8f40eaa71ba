mod readers;
mod util;

pub use readers::open_data_reader;
pub use util::{handle_error_and_exit, sanitize_file_stem, Result};
