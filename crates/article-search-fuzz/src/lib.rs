//! Fuzzing library for article-search.
//!
//! Targets cover the untrusted edges of the service: engine response bodies, paging
//! parameters and chart labels.
//!
//! # Usage
//!
//! ```bash
//! cd crates/article-search-fuzz
//! cargo +nightly fuzz run fuzz_response_parse -- -max_total_time=60
//! ```

pub use article_search::{formatters, models, pagination};
