//! Symbolic expression trees over the two surface variables.
//!
//! This module defines the core types used to represent a terrain formula in a
//! form that supports symbolic differentiation and compilation into numeric
//! evaluators. The main types are:
//!
//! - `Axis`: the two free variables of a surface, `x` and `y`
//! - `Expr`: a tagged expression tree over constants, the two variables, and
//!   the supported operator/function set
//!
//! The expression tree is built recursively using `Box<Expr>` and can be:
//! - Symbolically differentiated with respect to either axis
//! - Simplified using algebraic rules (for readable rendering)
//! - Lowered into a flat stack program for fast evaluation
//! - Rendered to standard mathematical notation via `Display`
//!
//! # Symbolic Differentiation
//! The `derivative` method applies the standard calculus rules recursively:
//! sum/difference rule, product rule, quotient rule, power rule (integer,
//! float, and general `f^g` exponents), and the chain rule for every
//! supported function.
//!
//! # Simplification
//! The `simplify` method folds constants and applies identity rules so the
//! derivative trees produced above render as something a surveyor would
//! recognize. Simplification is not required for evaluation correctness; the
//! same tree evaluates identically before and after.

use crate::program::{Instr, Program};

/// One of the two horizontal axes a terrain formula ranges over.
///
/// Terrain surfaces are functions of exactly two variables, so the variable of
/// an expression node is a closed enum rather than a name lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The east-west coordinate, `x`
    X,
    /// The north-south coordinate, `y`
    Y,
}

impl Axis {
    /// The variable name as it appears in formulas and rendered output.
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An expression tree node representing one operation of a terrain formula.
///
/// The tree is pure: no node carries state beyond its operands, so equal trees
/// evaluate identically on all inputs and differentiation is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant floating point value
    Const(f64),
    /// One of the two surface variables
    Var(Axis),
    /// Addition of two expressions
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction of two expressions
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication of two expressions
    Mul(Box<Expr>, Box<Expr>),
    /// Division of two expressions
    Div(Box<Expr>, Box<Expr>),
    /// Negation of an expression
    Neg(Box<Expr>),
    /// Absolute value of an expression
    Abs(Box<Expr>),
    /// Exponentiation by an integer constant
    Pow(Box<Expr>, i64),
    /// Exponentiation by a floating point constant
    PowFloat(Box<Expr>, f64),
    /// Exponentiation by another expression
    PowExpr(Box<Expr>, Box<Expr>),
    /// Exponential function
    Exp(Box<Expr>),
    /// Natural logarithm
    Ln(Box<Expr>),
    /// Square root
    Sqrt(Box<Expr>),
    /// Sine (argument in radians)
    Sin(Box<Expr>),
    /// Cosine (argument in radians)
    Cos(Box<Expr>),
    /// Tangent (argument in radians)
    Tan(Box<Expr>),
}

impl Expr {
    /// Returns true if the expression references the given axis anywhere.
    ///
    /// A formula that never mentions an axis is constant along it; its partial
    /// derivative with respect to that axis is the zero expression and grid
    /// evaluation broadcasts the constant across that direction.
    pub fn depends_on(&self, axis: Axis) -> bool {
        match self {
            Expr::Const(_) => false,
            Expr::Var(a) => *a == axis,
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::PowExpr(l, r) => l.depends_on(axis) || r.depends_on(axis),
            Expr::Neg(e)
            | Expr::Abs(e)
            | Expr::Exp(e)
            | Expr::Ln(e)
            | Expr::Sqrt(e)
            | Expr::Sin(e)
            | Expr::Cos(e)
            | Expr::Tan(e) => e.depends_on(axis),
            Expr::Pow(b, _) | Expr::PowFloat(b, _) => b.depends_on(axis),
        }
    }

    /// Computes the symbolic partial derivative with respect to one axis.
    ///
    /// Recursively applies the rules of differentiation to build a new
    /// expression tree. The rules implemented are:
    /// - d/dx(c) = 0 for constants
    /// - d/dx(x) = 1, d/dx(y) = 0
    /// - Sum rule: d/dx(f + g) = df/dx + dg/dx
    /// - Product rule: d/dx(f * g) = f * dg/dx + g * df/dx
    /// - Quotient rule: d/dx(f/g) = (g * df/dx - f * dg/dx) / g^2
    /// - Power rule: d/dx(f^n) = n * f^(n-1) * df/dx
    /// - General power rule: d/dx(f^g) = f^g * (g' * ln(f) + g * f'/f)
    /// - Chain rule for exp: d/dx(e^f) = e^f * df/dx
    /// - Chain rule for ln: d/dx(ln(f)) = 1/f * df/dx
    /// - Chain rule for sqrt: d/dx(sqrt(f)) = 1/(2*sqrt(f)) * df/dx
    /// - Chain rule for abs: d/dx|f| = f/|f| * df/dx
    /// - Trigonometric rules: d/dx(sin f) = cos(f) * f',
    ///   d/dx(cos f) = -sin(f) * f', d/dx(tan f) = f' / cos(f)^2
    ///
    /// This is exact symbolic work; no finite-difference approximation is
    /// involved anywhere.
    pub fn derivative(&self, axis: Axis) -> Box<Expr> {
        match self {
            Expr::Const(_) => Box::new(Expr::Const(0.0)),

            Expr::Var(a) => {
                if *a == axis {
                    Box::new(Expr::Const(1.0))
                } else {
                    Box::new(Expr::Const(0.0))
                }
            }

            Expr::Add(left, right) => Box::new(Expr::Add(
                left.derivative(axis),
                right.derivative(axis),
            )),

            Expr::Sub(left, right) => Box::new(Expr::Sub(
                left.derivative(axis),
                right.derivative(axis),
            )),

            Expr::Mul(left, right) => Box::new(Expr::Add(
                Box::new(Expr::Mul(left.clone(), right.derivative(axis))),
                Box::new(Expr::Mul(right.clone(), left.derivative(axis))),
            )),

            Expr::Div(left, right) => Box::new(Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(right.clone(), left.derivative(axis))),
                    Box::new(Expr::Mul(left.clone(), right.derivative(axis))),
                )),
                Box::new(Expr::Pow(right.clone(), 2)),
            )),

            Expr::Neg(expr) => Box::new(Expr::Neg(expr.derivative(axis))),

            Expr::Abs(expr) => Box::new(Expr::Mul(
                Box::new(Expr::Div(expr.clone(), Box::new(Expr::Abs(expr.clone())))),
                expr.derivative(axis),
            )),

            Expr::Pow(base, exp) => Box::new(Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(*exp as f64)),
                    Box::new(Expr::Pow(base.clone(), exp - 1)),
                )),
                base.derivative(axis),
            )),

            Expr::PowFloat(base, exp) => Box::new(Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(*exp)),
                    Box::new(Expr::PowFloat(base.clone(), exp - 1.0)),
                )),
                base.derivative(axis),
            )),

            Expr::PowExpr(base, exponent) => Box::new(Expr::Mul(
                Box::new(Expr::PowExpr(base.clone(), exponent.clone())),
                Box::new(Expr::Add(
                    Box::new(Expr::Mul(
                        exponent.derivative(axis),
                        Box::new(Expr::Ln(base.clone())),
                    )),
                    Box::new(Expr::Mul(
                        exponent.clone(),
                        Box::new(Expr::Div(base.derivative(axis), base.clone())),
                    )),
                )),
            )),

            Expr::Exp(expr) => Box::new(Expr::Mul(
                Box::new(Expr::Exp(expr.clone())),
                expr.derivative(axis),
            )),

            Expr::Ln(expr) => Box::new(Expr::Mul(
                Box::new(Expr::Div(Box::new(Expr::Const(1.0)), expr.clone())),
                expr.derivative(axis),
            )),

            Expr::Sqrt(expr) => Box::new(Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Mul(
                        Box::new(Expr::Const(2.0)),
                        Box::new(Expr::Sqrt(expr.clone())),
                    )),
                )),
                expr.derivative(axis),
            )),

            Expr::Sin(expr) => Box::new(Expr::Mul(
                Box::new(Expr::Cos(expr.clone())),
                expr.derivative(axis),
            )),

            Expr::Cos(expr) => Box::new(Expr::Mul(
                Box::new(Expr::Neg(Box::new(Expr::Sin(expr.clone())))),
                expr.derivative(axis),
            )),

            Expr::Tan(expr) => Box::new(Expr::Div(
                expr.derivative(axis),
                Box::new(Expr::Pow(Box::new(Expr::Cos(expr.clone())), 2)),
            )),
        }
    }

    /// Simplifies the expression by folding constants and applying identity
    /// rules.
    ///
    /// The rule set is aimed at readable rendered output:
    /// - Constant folding: 2 + 3 → 5, sin(0) → 0
    /// - Identities: x + 0 → x, x * 1 → x, x * 0 → 0, x / 1 → x
    /// - Cancellation: x - x → 0, x / x → 1, -(-x) → x
    /// - Exponents: x^0 → 1, x^1 → x, (x^a)^b → x^(a*b), x^a * x^b → x^(a+b)
    /// - Like terms: c1*x + c2*x → (c1+c2)*x
    /// - Function identities: exp(ln x) → x, ln(exp x) → x, sqrt(x^2) → |x|
    ///
    /// Returns a new tree; the receiver is untouched.
    pub fn simplify(&self) -> Box<Expr> {
        match self {
            Expr::Const(_) | Expr::Var(_) => Box::new(self.clone()),

            Expr::Add(left, right) => {
                let l = left.simplify();
                let r = right.simplify();
                match (&*l, &*r) {
                    (Expr::Const(a), Expr::Const(b)) => Box::new(Expr::Const(a + b)),
                    (expr, Expr::Const(c)) | (Expr::Const(c), expr) if *c == 0.0 => {
                        Box::new(expr.clone())
                    }
                    // Combine like terms: c1*x + c2*x -> (c1+c2)*x
                    (Expr::Mul(a1, x1), Expr::Mul(a2, x2)) if x1 == x2 => {
                        let coeff = Expr::Add(a1.clone(), a2.clone()).simplify();
                        Expr::Mul(coeff, x1.clone()).simplify()
                    }
                    _ => Box::new(Expr::Add(l, r)),
                }
            }

            Expr::Sub(left, right) => {
                let l = left.simplify();
                let r = right.simplify();
                match (&*l, &*r) {
                    (Expr::Const(a), Expr::Const(b)) => Box::new(Expr::Const(a - b)),
                    (expr, Expr::Const(c)) if *c == 0.0 => Box::new(expr.clone()),
                    (Expr::Const(c), expr) if *c == 0.0 => {
                        Box::new(Expr::Neg(Box::new(expr.clone())))
                    }
                    (a, b) if a == b => Box::new(Expr::Const(0.0)),
                    (Expr::Mul(a1, x1), Expr::Mul(a2, x2)) if x1 == x2 => {
                        let coeff = Expr::Sub(a1.clone(), a2.clone()).simplify();
                        Expr::Mul(coeff, x1.clone()).simplify()
                    }
                    _ => Box::new(Expr::Sub(l, r)),
                }
            }

            Expr::Mul(left, right) => {
                let l = left.simplify();
                let r = right.simplify();

                if l == r {
                    return Box::new(Expr::Pow(l, 2)); // x * x -> x^2
                }

                match (&*l, &*r) {
                    (Expr::Const(a), Expr::Const(b)) => Box::new(Expr::Const(a * b)),
                    (_, Expr::Const(c)) | (Expr::Const(c), _) if *c == 0.0 => {
                        Box::new(Expr::Const(0.0))
                    }
                    (expr, Expr::Const(c)) | (Expr::Const(c), expr) if *c == 1.0 => {
                        Box::new(expr.clone())
                    }
                    (expr, Expr::Const(c)) | (Expr::Const(c), expr) if *c == -1.0 => {
                        Box::new(Expr::Neg(Box::new(expr.clone())))
                    }
                    // Combine exponents: x^a * x^b -> x^(a+b)
                    (Expr::Pow(b1, e1), Expr::Pow(b2, e2)) if b1 == b2 => {
                        Expr::Pow(b1.clone(), e1 + e2).simplify()
                    }
                    // Associativity: (c1 * x) * c2 -> (c1 * c2) * x
                    (Expr::Mul(c1, x), c2)
                        if matches!(**c1, Expr::Const(_)) && matches!(*c2, Expr::Const(_)) =>
                    {
                        Box::new(Expr::Mul(
                            Expr::Mul(c1.clone(), Box::new(c2.clone())).simplify(),
                            x.clone(),
                        ))
                    }
                    _ => Box::new(Expr::Mul(l, r)),
                }
            }

            Expr::Div(left, right) => {
                let l = left.simplify();
                let r = right.simplify();
                match (&*l, &*r) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Box::new(Expr::Const(a / b)),
                    (Expr::Const(c), _) if *c == 0.0 => Box::new(Expr::Const(0.0)),
                    (expr, Expr::Const(c)) if *c == 1.0 => Box::new(expr.clone()),
                    (expr, Expr::Const(c)) if *c == -1.0 => {
                        Box::new(Expr::Neg(Box::new(expr.clone())))
                    }
                    (a, b) if a == b => Box::new(Expr::Const(1.0)),
                    // Cancel exponents: x^a / x^b -> x^(a-b)
                    (Expr::Pow(b1, e1), Expr::Pow(b2, e2)) if b1 == b2 => {
                        Expr::Pow(b1.clone(), e1 - e2).simplify()
                    }
                    _ => Box::new(Expr::Div(l, r)),
                }
            }

            Expr::Neg(expr) => {
                let e = expr.simplify();
                match &*e {
                    Expr::Const(a) => Box::new(Expr::Const(-a)),
                    Expr::Neg(inner) => inner.clone(),
                    _ => Box::new(Expr::Neg(e)),
                }
            }

            Expr::Abs(expr) => {
                let e = expr.simplify();
                match &*e {
                    Expr::Const(a) => Box::new(Expr::Const(a.abs())),
                    Expr::Abs(inner) => Box::new(Expr::Abs(inner.clone())),
                    Expr::Neg(inner) => Box::new(Expr::Abs(inner.clone())),
                    // Even powers are never negative
                    Expr::Pow(_, exp) if exp % 2 == 0 => e,
                    _ => Box::new(Expr::Abs(e)),
                }
            }

            Expr::Pow(base, exp) => {
                let b = base.simplify();
                match (&*b, exp) {
                    (_, 0) => Box::new(Expr::Const(1.0)),
                    (Expr::Const(a), exp) => Box::new(Expr::Const(a.powi(*exp as i32))),
                    (expr, 1) => Box::new(expr.clone()),
                    // Nested exponents: (x^a)^b -> x^(a*b)
                    (Expr::Pow(inner_base, inner_exp), outer_exp) => {
                        Box::new(Expr::Pow(inner_base.clone(), inner_exp * outer_exp))
                    }
                    _ => Box::new(Expr::Pow(b, *exp)),
                }
            }

            Expr::PowFloat(base, exp) => {
                let b = base.simplify();
                match (&*b, exp) {
                    (_, e) if *e == 0.0 => Box::new(Expr::Const(1.0)),
                    (Expr::Const(a), e) => Box::new(Expr::Const(a.powf(*e))),
                    (expr, e) if *e == 1.0 => Box::new(expr.clone()),
                    // Integer-valued exponents take the cheaper integer path
                    (expr, e) if e.fract() == 0.0 => {
                        Expr::Pow(Box::new(expr.clone()), *e as i64).simplify()
                    }
                    _ => Box::new(Expr::PowFloat(b, *exp)),
                }
            }

            Expr::PowExpr(base, exponent) => {
                let b = base.simplify();
                let e = exponent.simplify();
                match (&*b, &*e) {
                    (Expr::Const(a), Expr::Const(c)) => Box::new(Expr::Const(a.powf(*c))),
                    (expr, Expr::Const(c)) if c.fract() == 0.0 => {
                        Expr::Pow(Box::new(expr.clone()), *c as i64).simplify()
                    }
                    (expr, Expr::Const(c)) => Box::new(Expr::PowFloat(Box::new(expr.clone()), *c)),
                    _ => Box::new(Expr::PowExpr(b, e)),
                }
            }

            Expr::Exp(expr) => {
                let e = expr.simplify();
                match &*e {
                    Expr::Const(a) => Box::new(Expr::Const(a.exp())),
                    Expr::Ln(inner) => inner.clone(),
                    _ => Box::new(Expr::Exp(e)),
                }
            }

            Expr::Ln(expr) => {
                let e = expr.simplify();
                match &*e {
                    Expr::Const(a) if *a > 0.0 => Box::new(Expr::Const(a.ln())),
                    Expr::Exp(inner) => inner.clone(),
                    _ => Box::new(Expr::Ln(e)),
                }
            }

            Expr::Sqrt(expr) => {
                let e = expr.simplify();
                match &*e {
                    Expr::Const(a) if *a >= 0.0 => Box::new(Expr::Const(a.sqrt())),
                    Expr::Pow(x, 2) => Box::new(Expr::Abs(x.clone())),
                    _ => Box::new(Expr::Sqrt(e)),
                }
            }

            Expr::Sin(expr) => {
                let e = expr.simplify();
                match &*e {
                    Expr::Const(a) => Box::new(Expr::Const(a.sin())),
                    _ => Box::new(Expr::Sin(e)),
                }
            }

            Expr::Cos(expr) => {
                let e = expr.simplify();
                match &*e {
                    Expr::Const(a) => Box::new(Expr::Const(a.cos())),
                    _ => Box::new(Expr::Cos(e)),
                }
            }

            Expr::Tan(expr) => {
                let e = expr.simplify();
                match &*e {
                    Expr::Const(a) => Box::new(Expr::Const(a.tan())),
                    _ => Box::new(Expr::Tan(e)),
                }
            }
        }
    }

    /// Tries to evaluate the whole expression as a compile-time constant.
    ///
    /// Returns `None` as soon as a variable is encountered or a fold would
    /// hide a domain error that evaluation must report (division by zero,
    /// log of a non-positive constant, square root of a negative constant).
    pub fn try_evaluate_constant(&self) -> Option<f64> {
        match self {
            Expr::Const(val) => Some(*val),
            Expr::Var(_) => None,
            Expr::Add(left, right) => {
                Some(left.try_evaluate_constant()? + right.try_evaluate_constant()?)
            }
            Expr::Sub(left, right) => {
                Some(left.try_evaluate_constant()? - right.try_evaluate_constant()?)
            }
            Expr::Mul(left, right) => {
                Some(left.try_evaluate_constant()? * right.try_evaluate_constant()?)
            }
            Expr::Div(left, right) => {
                let r = right.try_evaluate_constant()?;
                if r == 0.0 {
                    return None;
                }
                Some(left.try_evaluate_constant()? / r)
            }
            Expr::Neg(expr) => Some(-expr.try_evaluate_constant()?),
            Expr::Abs(expr) => Some(expr.try_evaluate_constant()?.abs()),
            Expr::Pow(base, exp) => Some(base.try_evaluate_constant()?.powi(*exp as i32)),
            Expr::PowFloat(base, exp) => Some(base.try_evaluate_constant()?.powf(*exp)),
            Expr::PowExpr(base, exponent) => Some(
                base.try_evaluate_constant()?
                    .powf(exponent.try_evaluate_constant()?),
            ),
            Expr::Exp(expr) => Some(expr.try_evaluate_constant()?.exp()),
            Expr::Ln(expr) => {
                let val = expr.try_evaluate_constant()?;
                if val <= 0.0 {
                    return None;
                }
                Some(val.ln())
            }
            Expr::Sqrt(expr) => {
                let val = expr.try_evaluate_constant()?;
                if val < 0.0 {
                    return None;
                }
                Some(val.sqrt())
            }
            Expr::Sin(expr) => Some(expr.try_evaluate_constant()?.sin()),
            Expr::Cos(expr) => Some(expr.try_evaluate_constant()?.cos()),
            Expr::Tan(expr) => Some(expr.try_evaluate_constant()?.tan()),
        }
    }

    /// Lowers the expression tree into a flat stack program.
    ///
    /// The program eliminates tree traversal from the evaluation hot path; a
    /// fully constant expression collapses to a single load with the constant
    /// recorded, which is what grid evaluation broadcasts.
    pub fn lower(&self) -> Program {
        if let Some(constant) = self.try_evaluate_constant() {
            return Program {
                instrs: vec![Instr::LoadConst(constant)],
                constant: Some(constant),
            };
        }

        let mut instrs = Vec::new();
        self.lower_recursive(&mut instrs);

        Program {
            instrs,
            constant: None,
        }
    }

    fn lower_recursive(&self, instrs: &mut Vec<Instr>) {
        match self {
            Expr::Const(val) => instrs.push(Instr::LoadConst(*val)),
            Expr::Var(axis) => instrs.push(Instr::Load(*axis)),

            Expr::Add(left, right) => {
                left.lower_recursive(instrs);
                right.lower_recursive(instrs);
                instrs.push(Instr::Add);
            }
            Expr::Sub(left, right) => {
                left.lower_recursive(instrs);
                right.lower_recursive(instrs);
                instrs.push(Instr::Sub);
            }
            Expr::Mul(left, right) => {
                left.lower_recursive(instrs);
                right.lower_recursive(instrs);
                instrs.push(Instr::Mul);
            }
            Expr::Div(left, right) => {
                left.lower_recursive(instrs);
                right.lower_recursive(instrs);
                instrs.push(Instr::Div);
            }
            Expr::Neg(expr) => {
                expr.lower_recursive(instrs);
                instrs.push(Instr::Neg);
            }
            Expr::Abs(expr) => {
                expr.lower_recursive(instrs);
                instrs.push(Instr::Abs);
            }
            Expr::Pow(base, exp) => {
                base.lower_recursive(instrs);
                instrs.push(Instr::PowConst(*exp));
            }
            Expr::PowFloat(base, exp) => {
                base.lower_recursive(instrs);
                instrs.push(Instr::PowFloat(*exp));
            }
            Expr::PowExpr(base, exponent) => {
                base.lower_recursive(instrs);
                exponent.lower_recursive(instrs);
                instrs.push(Instr::PowExpr);
            }
            Expr::Exp(expr) => {
                expr.lower_recursive(instrs);
                instrs.push(Instr::Exp);
            }
            Expr::Ln(expr) => {
                expr.lower_recursive(instrs);
                instrs.push(Instr::Ln);
            }
            Expr::Sqrt(expr) => {
                expr.lower_recursive(instrs);
                instrs.push(Instr::Sqrt);
            }
            Expr::Sin(expr) => {
                expr.lower_recursive(instrs);
                instrs.push(Instr::Sin);
            }
            Expr::Cos(expr) => {
                expr.lower_recursive(instrs);
                instrs.push(Instr::Cos);
            }
            Expr::Tan(expr) => {
                expr.lower_recursive(instrs);
                instrs.push(Instr::Tan);
            }
        }
    }
}

/// Renders expressions in standard mathematical notation.
///
/// Binary operations are parenthesized, functions use call notation, absolute
/// value uses `|x|`, exponents use `^`. This is the display string handed to
/// the presentation layer for the formula and its partial derivatives.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Const(val) => write!(f, "{val}"),
            Expr::Var(axis) => write!(f, "{axis}"),
            Expr::Add(left, right) => write!(f, "({left} + {right})"),
            Expr::Sub(left, right) => write!(f, "({left} - {right})"),
            Expr::Mul(left, right) => write!(f, "({left} * {right})"),
            Expr::Div(left, right) => write!(f, "({left} / {right})"),
            Expr::Neg(expr) => write!(f, "-({expr})"),
            Expr::Abs(expr) => write!(f, "|{expr}|"),
            Expr::Pow(base, exp) => write!(f, "({base}^{exp})"),
            Expr::PowFloat(base, exp) => write!(f, "({base}^{exp})"),
            Expr::PowExpr(base, exponent) => write!(f, "({base}^{exponent})"),
            Expr::Exp(expr) => write!(f, "exp({expr})"),
            Expr::Ln(expr) => write!(f, "ln({expr})"),
            Expr::Sqrt(expr) => write!(f, "sqrt({expr})"),
            Expr::Sin(expr) => write!(f, "sin({expr})"),
            Expr::Cos(expr) => write!(f, "cos({expr})"),
            Expr::Tan(expr) => write!(f, "tan({expr})"),
        }
    }
}
