#![no_main]

use article_search::pagination;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [i64; 2]| {
    let [page, size] = data;
    if let Ok(resolved) = pagination::resolve(page, size) {
        assert!(resolved.limit >= 1 && resolved.limit <= 1000);
    }
});
