pub mod dataset;
pub mod field;
pub mod matcher;
pub mod rates;

/// One row of the dataset. Key order follows the source file.
pub type Record = serde_json::Map<String, serde_json::Value>;

pub use dataset::{load_dataset, DatasetPaths};
pub use field::{detect_search_field, score_text, text_of, SAMPLE_ROWS};
pub use matcher::{parse_limit, Catalog, DEFAULT_LIMIT};
