#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz the chunk header/lexicon decoder with arbitrary bytes
    // Malformed input must come back as an error, never a panic
    let _ = qix::index::Lexicon::parse(data);
});
