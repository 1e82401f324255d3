//! Grammar readers must reject arbitrary input gracefully, never panic.

#![no_main]
use chartparse::Grammar;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let _ = Grammar::parse(text);
    let _ = Grammar::parse_ebnf(text);
});
