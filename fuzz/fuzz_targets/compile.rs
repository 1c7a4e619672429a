#![no_main]

use libfuzzer_sys::fuzz_target;
use tacfront::backend::TacGenerator;
use tacfront::frontend::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = lexer::lex(s) {
            if let Ok(program) = parser::parse(&tokens) {
                // Any tree the parser accepts must lower without an internal error.
                let output = TacGenerator::new().generate(&program);
                assert!(output.is_ok(), "generator rejected a parsed program: {output:?}");
            }
        }
    }
});
