//! Waveform expression compiler.
//!
//! This module turns expression text such as `sin(t * tau * 440) * fadein(t, 0.1)`
//! into a [`CompiledChannel`], a pure function of time. The compiler:
//!
//! - Tokenizes and parses the text with a recursive-descent parser
//! - Resolves every name against an explicit [`SymbolTable`]
//! - Folds constant subtrees so per-sample evaluation only touches `t`
//!
//! # Safety
//!
//! Expressions can only reach what the symbol table holds: numeric constants
//! and pure numeric functions. There is no way to name I/O, the file system,
//! or process state. Evaluation is total and uses IEEE semantics, so a
//! division by zero yields an infinity or NaN instead of an error.
//!
//! # Example
//!
//! ```
//! use wavegen::expr::{Compiler, SymbolTable};
//!
//! let symbols = SymbolTable::standard();
//! let compiler = Compiler::new(&symbols);
//! let channel = compiler.compile("sq(t * tau * 2)").unwrap();
//! assert_eq!(channel.eval(0.0), 1.0);
//! ```

mod ast;
mod error;
mod lexer;
mod parser;
mod symbols;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

pub use ast::{BinOp, CmpOp, Expr};
pub use error::{ExprError, ExprErrorKind};
pub use parser::{MAX_NESTING, MAX_TOKENS};
pub use symbols::{Function, Symbol, SymbolTable, TIME_VARIABLE};

type NativeFn = dyn Fn(f64) -> f64 + Send + Sync;

/// A compiled `time -> amplitude` function for one channel.
///
/// Cloning is cheap; the underlying tree or closure is shared.
#[derive(Clone)]
pub struct CompiledChannel {
    inner: ChannelFn,
}

#[derive(Clone)]
enum ChannelFn {
    Expr(Arc<Expr>),
    Native(Arc<NativeFn>),
}

impl CompiledChannel {
    /// Wraps a native closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            inner: ChannelFn::Native(Arc::new(f)),
        }
    }

    /// Wraps an already-parsed expression tree.
    pub fn from_expr(expr: Expr) -> Self {
        Self {
            inner: ChannelFn::Expr(Arc::new(expr)),
        }
    }

    /// Evaluates the channel at `t` seconds.
    #[inline]
    pub fn eval(&self, t: f64) -> f64 {
        match &self.inner {
            ChannelFn::Expr(expr) => expr.eval(t),
            ChannelFn::Native(f) => f(t),
        }
    }

    /// Whether the channel wraps a native closure.
    pub fn is_native(&self) -> bool {
        matches!(self.inner, ChannelFn::Native(_))
    }

    /// Returns the expression tree, if this channel was compiled from text.
    pub fn expr(&self) -> Option<&Expr> {
        match &self.inner {
            ChannelFn::Expr(expr) => Some(expr.as_ref()),
            ChannelFn::Native(_) => None,
        }
    }
}

impl fmt::Debug for CompiledChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            ChannelFn::Expr(expr) => f.debug_tuple("CompiledChannel").field(expr).finish(),
            ChannelFn::Native(_) => f.write_str("CompiledChannel(<native fn>)"),
        }
    }
}

/// A channel's waveform definition, before compilation.
#[derive(Clone)]
pub enum WaveSpec {
    /// Expression text in the variable `t`.
    Expression(String),
    /// An already-callable function, used as-is.
    Function(CompiledChannel),
}

impl WaveSpec {
    /// Creates an expression spec.
    pub fn expression(source: impl Into<String>) -> Self {
        Self::Expression(source.into())
    }

    /// Creates a spec from a native closure.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::Function(CompiledChannel::from_fn(f))
    }

    /// Short description for logs and reports.
    pub fn describe(&self) -> &str {
        match self {
            WaveSpec::Expression(source) => source,
            WaveSpec::Function(_) => "<native fn>",
        }
    }
}

impl fmt::Debug for WaveSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveSpec::Expression(source) => f.debug_tuple("Expression").field(source).finish(),
            WaveSpec::Function(_) => f.write_str("Function(<native fn>)"),
        }
    }
}

impl From<&str> for WaveSpec {
    fn from(source: &str) -> Self {
        Self::Expression(source.to_string())
    }
}

impl From<String> for WaveSpec {
    fn from(source: String) -> Self {
        Self::Expression(source)
    }
}

impl From<CompiledChannel> for WaveSpec {
    fn from(channel: CompiledChannel) -> Self {
        Self::Function(channel)
    }
}

/// Compiles expression text against a borrowed symbol table.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'a> {
    symbols: &'a SymbolTable,
}

impl<'a> Compiler<'a> {
    /// Creates a compiler over `symbols`.
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self { symbols }
    }

    /// Compiles expression text into a channel function.
    pub fn compile(&self, source: &str) -> Result<CompiledChannel, ExprError> {
        let expr = parser::parse(source, self.symbols)?.fold();
        Ok(CompiledChannel::from_expr(expr))
    }

    /// Compiles a spec. Function specs pass through unchanged.
    pub fn compile_spec(&self, spec: &WaveSpec) -> Result<CompiledChannel, ExprError> {
        match spec {
            WaveSpec::Expression(source) => self.compile(source),
            WaveSpec::Function(channel) => Ok(channel.clone()),
        }
    }
}
