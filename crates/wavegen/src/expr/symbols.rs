//! The fixed symbol table available to waveform expressions.
//!
//! A table is built once per run and handed to the compiler by reference.
//! Nothing outside the table (and the variable `t`) can be named from an
//! expression.

use std::collections::BTreeMap;
use std::f64::consts::{E, PI, TAU};

use crate::waveform;

/// Name of the free time variable.
pub const TIME_VARIABLE: &str = "t";

/// A callable entry in the symbol table.
#[derive(Debug, Clone, Copy)]
pub enum Function {
    /// Exactly one argument.
    Unary(fn(f64) -> f64),
    /// Exactly two arguments.
    Binary(fn(f64, f64) -> f64),
    /// Between `min` and `max` arguments (`None` = unbounded).
    Variadic {
        min: usize,
        max: Option<usize>,
        call: fn(&[f64]) -> f64,
    },
}

impl Function {
    /// Human-readable accepted argument count.
    pub fn arity(&self) -> String {
        match self {
            Function::Unary(_) => "1".to_string(),
            Function::Binary(_) => "2".to_string(),
            Function::Variadic { min, max: None, .. } => format!("{} or more", min),
            Function::Variadic {
                min,
                max: Some(max),
                ..
            } if max == min => min.to_string(),
            Function::Variadic {
                min,
                max: Some(max),
                ..
            } if *max == min + 1 => format!("{} or {}", min, max),
            Function::Variadic {
                min,
                max: Some(max),
                ..
            } => format!("{} to {}", min, max),
        }
    }

    /// Whether a call with `count` arguments is allowed.
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Function::Unary(_) => count == 1,
            Function::Binary(_) => count == 2,
            Function::Variadic { min, max, .. } => {
                count >= *min && max.map_or(true, |max| count <= max)
            }
        }
    }
}

/// A named entry: either a constant or a function.
#[derive(Debug, Clone, Copy)]
pub enum Symbol {
    Constant(f64),
    Function(Function),
}

/// Immutable lookup table of names usable in expressions.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: BTreeMap<&'static str, Symbol>,
}

impl SymbolTable {
    /// Builds the standard table: math constants and functions, the
    /// builtins `abs`/`min`/`max`/`round`, the waveforms `sq`/`tri`/`saw`,
    /// and the envelopes `fadein`/`fadeout`.
    pub fn standard() -> Self {
        let mut table = Self {
            symbols: BTreeMap::new(),
        };

        table.constant("pi", PI);
        table.constant("e", E);
        table.constant("tau", TAU);
        table.constant("inf", f64::INFINITY);
        table.constant("nan", f64::NAN);

        // Trigonometric
        table.unary("sin", f64::sin);
        table.unary("cos", f64::cos);
        table.unary("tan", f64::tan);
        table.unary("asin", f64::asin);
        table.unary("acos", f64::acos);
        table.unary("atan", f64::atan);
        table.binary("atan2", f64::atan2);
        table.binary("hypot", f64::hypot);
        table.unary("degrees", f64::to_degrees);
        table.unary("radians", f64::to_radians);

        // Hyperbolic
        table.unary("sinh", f64::sinh);
        table.unary("cosh", f64::cosh);
        table.unary("tanh", f64::tanh);
        table.unary("asinh", f64::asinh);
        table.unary("acosh", f64::acosh);
        table.unary("atanh", f64::atanh);

        // Exponential and logarithmic
        table.unary("exp", f64::exp);
        table.unary("exp2", f64::exp2);
        table.unary("expm1", f64::exp_m1);
        table.variadic("log", 1, Some(2), log);
        table.unary("log2", f64::log2);
        table.unary("log10", f64::log10);
        table.unary("log1p", f64::ln_1p);
        table.unary("sqrt", f64::sqrt);
        table.unary("cbrt", f64::cbrt);
        table.binary("pow", f64::powf);
        table.binary("ldexp", |x, i| x * i.trunc().exp2());

        // Rounding and remainders
        table.unary("floor", f64::floor);
        table.unary("ceil", f64::ceil);
        table.unary("trunc", f64::trunc);
        table.unary("fabs", f64::abs);
        table.binary("fmod", |x, y| x % y);
        table.binary("remainder", |x, y| x - y * (x / y).round_ties_even());
        table.binary("copysign", f64::copysign);

        // Classification
        table.unary("isnan", |x| flag(x.is_nan()));
        table.unary("isinf", |x| flag(x.is_infinite()));
        table.unary("isfinite", |x| flag(x.is_finite()));

        // Builtins
        table.unary("abs", f64::abs);
        table.unary("round", f64::round_ties_even);
        table.variadic("min", 2, None, min);
        table.variadic("max", 2, None, max);

        // Waveforms and envelopes
        table.unary("sq", waveform::square);
        table.unary("tri", waveform::triangle);
        table.unary("saw", waveform::sawtooth);
        table.binary("fadein", waveform::fadein);
        table.binary("fadeout", waveform::fadeout);

        table
    }

    /// Looks up a name.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Whether `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Iterates over all entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Symbol)> + '_ {
        self.symbols.iter().map(|(name, symbol)| (*name, symbol))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn constant(&mut self, name: &'static str, value: f64) {
        self.symbols.insert(name, Symbol::Constant(value));
    }

    fn unary(&mut self, name: &'static str, f: fn(f64) -> f64) {
        self.symbols
            .insert(name, Symbol::Function(Function::Unary(f)));
    }

    fn binary(&mut self, name: &'static str, f: fn(f64, f64) -> f64) {
        self.symbols
            .insert(name, Symbol::Function(Function::Binary(f)));
    }

    fn variadic(
        &mut self,
        name: &'static str,
        min: usize,
        max: Option<usize>,
        call: fn(&[f64]) -> f64,
    ) {
        self.symbols
            .insert(name, Symbol::Function(Function::Variadic { min, max, call }));
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn log(args: &[f64]) -> f64 {
    match args {
        [x] => x.ln(),
        [x, base] => x.ln() / base.ln(),
        _ => f64::NAN,
    }
}

// NaN propagates, matching a plain pairwise comparison chain.
fn min(args: &[f64]) -> f64 {
    args.iter()
        .copied()
        .reduce(|a, b| if b < a { b } else { a })
        .unwrap_or(f64::NAN)
}

fn max(args: &[f64]) -> f64 {
    args.iter()
        .copied()
        .reduce(|a, b| if b > a { b } else { a })
        .unwrap_or(f64::NAN)
}
