//! Resolved expression tree and its evaluator.
//!
//! Names are resolved against the symbol table while parsing, so the tree only
//! holds constants, the time variable, and direct function pointers.

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinOp {
    /// Applies the operator with floored `//` and `%`.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinOp::Add => a + b,
            BinOp::Sub => a - b,
            BinOp::Mul => a * b,
            BinOp::Div => a / b,
            BinOp::FloorDiv => (a / b).floor(),
            BinOp::Mod => floored_mod(a, b),
            BinOp::Pow => a.powf(b),
        }
    }
}

/// Comparison operators. Results are 1.0 (true) or 0.0 (false).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CmpOp {
    pub fn apply(self, a: f64, b: f64) -> bool {
        match self {
            CmpOp::Lt => a < b,
            CmpOp::Le => a <= b,
            CmpOp::Gt => a > b,
            CmpOp::Ge => a >= b,
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
        }
    }
}

/// A compiled expression node.
#[derive(Debug, Clone)]
pub enum Expr {
    Const(f64),
    /// The time variable `t`, in seconds.
    Time,
    Neg(Box<Expr>),
    Not(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// Chained comparison: `a < b <= c` holds when every link holds.
    Compare(Box<Expr>, Vec<(CmpOp, Expr)>),
    /// Short-circuit `and`, yielding the deciding operand.
    And(Box<Expr>, Box<Expr>),
    /// Short-circuit `or`, yielding the deciding operand.
    Or(Box<Expr>, Box<Expr>),
    /// `then if cond else otherwise`.
    If {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Call1(fn(f64) -> f64, Box<Expr>),
    Call2(fn(f64, f64) -> f64, Box<Expr>, Box<Expr>),
    CallN(fn(&[f64]) -> f64, Vec<Expr>),
}

impl Expr {
    /// Evaluates the expression at time `t`.
    pub fn eval(&self, t: f64) -> f64 {
        match self {
            Expr::Const(v) => *v,
            Expr::Time => t,
            Expr::Neg(e) => -e.eval(t),
            Expr::Not(e) => bool_value(!truthy(e.eval(t))),
            Expr::Binary(op, a, b) => op.apply(a.eval(t), b.eval(t)),
            Expr::Compare(first, links) => {
                let mut left = first.eval(t);
                for (op, e) in links {
                    let right = e.eval(t);
                    if !op.apply(left, right) {
                        return 0.0;
                    }
                    left = right;
                }
                1.0
            }
            Expr::And(a, b) => {
                let left = a.eval(t);
                if truthy(left) {
                    b.eval(t)
                } else {
                    left
                }
            }
            Expr::Or(a, b) => {
                let left = a.eval(t);
                if truthy(left) {
                    left
                } else {
                    b.eval(t)
                }
            }
            Expr::If {
                cond,
                then,
                otherwise,
            } => {
                if truthy(cond.eval(t)) {
                    then.eval(t)
                } else {
                    otherwise.eval(t)
                }
            }
            Expr::Call1(f, a) => f(a.eval(t)),
            Expr::Call2(f, a, b) => f(a.eval(t), b.eval(t)),
            Expr::CallN(f, args) => {
                let values: Vec<f64> = args.iter().map(|a| a.eval(t)).collect();
                f(&values)
            }
        }
    }

    /// Whether the node is a literal constant.
    pub fn is_const(&self) -> bool {
        matches!(self, Expr::Const(_))
    }

    /// Collapses every subtree that does not depend on `t` into a constant.
    pub fn fold(self) -> Expr {
        let folded = match self {
            Expr::Const(v) => return Expr::Const(v),
            Expr::Time => return Expr::Time,
            Expr::Neg(e) => Expr::Neg(Box::new(e.fold())),
            Expr::Not(e) => Expr::Not(Box::new(e.fold())),
            Expr::Binary(op, a, b) => Expr::Binary(op, Box::new(a.fold()), Box::new(b.fold())),
            Expr::Compare(first, links) => Expr::Compare(
                Box::new(first.fold()),
                links.into_iter().map(|(op, e)| (op, e.fold())).collect(),
            ),
            Expr::And(a, b) => Expr::And(Box::new(a.fold()), Box::new(b.fold())),
            Expr::Or(a, b) => Expr::Or(Box::new(a.fold()), Box::new(b.fold())),
            Expr::If {
                cond,
                then,
                otherwise,
            } => Expr::If {
                cond: Box::new(cond.fold()),
                then: Box::new(then.fold()),
                otherwise: Box::new(otherwise.fold()),
            },
            Expr::Call1(f, a) => Expr::Call1(f, Box::new(a.fold())),
            Expr::Call2(f, a, b) => Expr::Call2(f, Box::new(a.fold()), Box::new(b.fold())),
            Expr::CallN(f, args) => Expr::CallN(f, args.into_iter().map(Expr::fold).collect()),
        };

        if folded.children_const() {
            Expr::Const(folded.eval(0.0))
        } else {
            folded
        }
    }

    fn children_const(&self) -> bool {
        match self {
            Expr::Const(_) => true,
            Expr::Time => false,
            Expr::Neg(e) | Expr::Not(e) | Expr::Call1(_, e) => e.is_const(),
            Expr::Binary(_, a, b)
            | Expr::And(a, b)
            | Expr::Or(a, b)
            | Expr::Call2(_, a, b) => a.is_const() && b.is_const(),
            Expr::Compare(first, links) => {
                first.is_const() && links.iter().all(|(_, e)| e.is_const())
            }
            Expr::If {
                cond,
                then,
                otherwise,
            } => cond.is_const() && then.is_const() && otherwise.is_const(),
            Expr::CallN(_, args) => args.iter().all(Expr::is_const),
        }
    }
}

/// Zero is false, everything else (NaN included) is true.
pub fn truthy(value: f64) -> bool {
    value != 0.0
}

fn bool_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Modulo whose result takes the sign of the divisor.
pub fn floored_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}
