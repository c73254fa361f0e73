#![no_main]

use libfuzzer_sys::fuzz_target;
use wavegen::expr::{Compiler, SymbolTable};

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let symbols = SymbolTable::standard();
    if let Ok(channel) = Compiler::new(&symbols).compile(source) {
        for t in [0.0, 0.5, -1.0, 1e9] {
            let _ = channel.eval(t);
        }
    }
});
