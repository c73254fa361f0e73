//! Tests for the expression compiler.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::*;

fn compile(source: &str) -> Result<CompiledChannel, ExprError> {
    let symbols = SymbolTable::standard();
    Compiler::new(&symbols).compile(source)
}

// =========================================================================
// Compilation
// =========================================================================

#[test]
fn test_compile_waveform_library_names() {
    let sq = compile("sq(t)").unwrap();
    let tri = compile("tri(t)").unwrap();
    let saw = compile("saw(t)").unwrap();
    assert_eq!(sq.eval(PI + 0.1), -1.0);
    assert!((tri.eval(FRAC_PI_2) - 1.0).abs() < 1e-12);
    assert_eq!(saw.eval(0.0), -1.0);
}

#[test]
fn test_compile_envelopes() {
    let ch = compile("sin(t * tau * 440) * fadein(t, 0.5) * fadeout(t, 2)").unwrap();
    assert_eq!(ch.eval(0.0), 0.0);
    assert_eq!(ch.eval(2.5), 0.0);
}

#[test]
fn test_tau_constant() {
    let ch = compile("tau").unwrap();
    assert_eq!(ch.eval(123.0), TAU);
}

#[test]
fn test_constant_expression_is_folded() {
    let ch = compile("2 * pi + sqrt(16)").unwrap();
    assert!(matches!(ch.expr(), Some(Expr::Const(v)) if (*v - (2.0 * PI + 4.0)).abs() < 1e-12));
}

#[test]
fn test_time_dependent_expression_is_not_folded() {
    let ch = compile("t * 2").unwrap();
    assert!(matches!(ch.expr(), Some(Expr::Binary(BinOp::Mul, _, _))));
}

#[test]
fn test_invalid_expressions_are_rejected() {
    for source in ["t +", "", "sin(", "1 2", "t ** ", "import os", "__import__('os')"] {
        assert!(compile(source).is_err(), "{:?} should not compile", source);
    }
}

#[test]
fn test_unknown_symbol_is_rejected() {
    let err = compile("t * frequency").unwrap_err();
    assert_eq!(err.code(), "E005");
    assert_eq!(err.offset, 4);
}

// =========================================================================
// WaveSpec pass-through
// =========================================================================

#[test]
fn test_function_spec_passes_through() {
    let symbols = SymbolTable::standard();
    let compiler = Compiler::new(&symbols);
    let spec = WaveSpec::function(|t| t * 3.0);
    let ch = compiler.compile_spec(&spec).unwrap();
    assert!(ch.is_native());
    assert_eq!(ch.eval(2.0), 6.0);
}

#[test]
fn test_expression_spec_compiles() {
    let symbols = SymbolTable::standard();
    let compiler = Compiler::new(&symbols);
    let ch = compiler.compile_spec(&WaveSpec::from("t - 1")).unwrap();
    assert!(!ch.is_native());
    assert_eq!(ch.eval(3.0), 2.0);
}

#[test]
fn test_wavespec_debug_and_describe() {
    let text = WaveSpec::expression("sq(t)");
    assert_eq!(text.describe(), "sq(t)");
    assert_eq!(format!("{:?}", text), "Expression(\"sq(t)\")");

    let native = WaveSpec::function(|_| 0.0);
    assert_eq!(native.describe(), "<native fn>");
    assert_eq!(format!("{:?}", native), "Function(<native fn>)");
}

#[test]
fn test_compiled_channel_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CompiledChannel>();
    assert_send_sync::<WaveSpec>();

    let ch = compile("sin(t)").unwrap();
    let handle = {
        let ch = ch.clone();
        std::thread::spawn(move || ch.eval(FRAC_PI_2))
    };
    assert_eq!(handle.join().unwrap(), ch.eval(FRAC_PI_2));
}
