#![no_main]

use article_search::models::{SearchResponse, normalize_hits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Engine bodies either parse and normalize or fail; never panic
    if let Ok(response) = serde_json::from_slice::<SearchResponse>(data) {
        let _ = normalize_hits(response.hits.hits);
    }
});
