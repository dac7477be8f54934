#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The parser may reject input but must not panic on it.
    let filter = covgate::filter::PathFilter::new([""], Vec::<String>::new());
    let _ = covgate::lcov::parse(data, &filter, covgate::lcov::ParseOptions::default());
});
