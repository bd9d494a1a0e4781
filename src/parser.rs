//! Compiling formula strings into symbolic expression trees.
//!
//! The front end is the [evalexpr](https://github.com/ISibboI/evalexpr)
//! crate's operator-tree parser; this module converts its AST into our own
//! [`Expr`] representation, validating on the way that the formula is a pure
//! mathematical expression over `x` and `y`:
//!
//! - variables are restricted to the two surface axes
//! - function calls are restricted to a fixed allow-list (`sin`, `cos`,
//!   `tan`, `exp`, `log`, `ln`, `sqrt`, `abs`)
//! - constants must be numeric
//! - every other operator the parser knows (comparisons, boolean logic,
//!   assignment, chains, tuples) is rejected here rather than at evaluation
//!
//! Python-style `**` exponentiation is accepted and normalized to `^`, since
//! that is how surveyors coming from the original tooling write powers.

use evalexpr::{build_operator_tree, Node, Operator, Value};

use crate::errors::ParseError;
use crate::expr::{Axis, Expr};

/// Nesting bound applied during conversion, so a hostile formula cannot make
/// differentiation or evaluation blow up on a pathologically deep tree.
pub const MAX_DEPTH: usize = 256;

/// Compiles a formula string into a symbolic expression over `x` and `y`.
///
/// This is the Expression Compiler boundary: a pure function of the input
/// string with no side effects. On success the returned tree references at
/// most the two surface variables; an expression in one variable (or none) is
/// valid, its missing partials simply differentiate to zero.
///
/// # Arguments
/// * `formula` - The formula as text, e.g. `"100 - x^2 - y^2"`
///
/// # Example
/// ```
/// use terrain_analyzer::parser::compile;
///
/// let expr = compile("100 - x^2 - y^2").unwrap();
/// assert_eq!(expr.to_string(), "((100 - (x^2)) - (y^2))");
///
/// assert!(compile("x +* y").is_err());
/// assert!(compile("q + 1").is_err());
/// ```
pub fn compile(formula: &str) -> Result<Expr, ParseError> {
    if formula.trim().is_empty() {
        return Err(ParseError::EmptyFormula);
    }

    // Python-style exponentiation is common in survey notes
    let normalized = formula.replace("**", "^");
    let node: Node = build_operator_tree(&normalized)?;
    convert(&node, 0)
}

/// Converts one evalexpr AST node into our internal representation.
///
/// Recursively traverses the parsed tree, folding evalexpr's variadic `+`
/// and `*` nodes into binary ones and enforcing the two-variable grammar.
fn convert(node: &Node, depth: usize) -> Result<Expr, ParseError> {
    if depth > MAX_DEPTH {
        return Err(ParseError::TooDeep(MAX_DEPTH));
    }

    match node.operator() {
        // Addition - evalexpr hands us a variadic node; fold it left
        Operator::Add => {
            let children = node.children();
            children
                .iter()
                .skip(1)
                .try_fold(convert(&children[0], depth + 1)?, |acc, child| {
                    Ok(Expr::Add(
                        Box::new(acc),
                        Box::new(convert(child, depth + 1)?),
                    ))
                })
        }
        Operator::Mul => {
            let children = node.children();
            children
                .iter()
                .skip(1)
                .try_fold(convert(&children[0], depth + 1)?, |acc, child| {
                    Ok(Expr::Mul(
                        Box::new(acc),
                        Box::new(convert(child, depth + 1)?),
                    ))
                })
        }
        Operator::Sub => {
            let (left, right) = binary_children(node)?;
            Ok(Expr::Sub(
                Box::new(convert(left, depth + 1)?),
                Box::new(convert(right, depth + 1)?),
            ))
        }
        Operator::Div => {
            let (left, right) = binary_children(node)?;
            Ok(Expr::Div(
                Box::new(convert(left, depth + 1)?),
                Box::new(convert(right, depth + 1)?),
            ))
        }

        Operator::Neg => {
            let child = single_child(node)?;
            Ok(Expr::Neg(Box::new(convert(child, depth + 1)?)))
        }

        Operator::Const { value } => match value {
            Value::Float(f) => Ok(Expr::Const(*f)),
            Value::Int(i) => Ok(Expr::Const(*i as f64)),
            other => Err(ParseError::NonNumericConstant(format!("{other:?}"))),
        },

        Operator::VariableIdentifierRead { identifier } => match identifier.as_str() {
            "x" => Ok(Expr::Var(Axis::X)),
            "y" => Ok(Expr::Var(Axis::Y)),
            other => Err(ParseError::UnknownVariable(other.to_string())),
        },

        Operator::FunctionIdentifier { identifier } => {
            let arg = Box::new(convert(single_child(node)?, depth + 1)?);
            match identifier.as_str() {
                "sin" => Ok(Expr::Sin(arg)),
                "cos" => Ok(Expr::Cos(arg)),
                "tan" => Ok(Expr::Tan(arg)),
                "exp" => Ok(Expr::Exp(arg)),
                // both spellings mean the natural logarithm
                "ln" | "log" => Ok(Expr::Ln(arg)),
                "sqrt" => Ok(Expr::Sqrt(arg)),
                "abs" => Ok(Expr::Abs(arg)),
                other => Err(ParseError::UnknownFunction(other.to_string())),
            }
        }

        // Exponentiation - constant exponents get the cheaper dedicated
        // forms, everything else the general f^g node
        Operator::Exp => {
            let (base, exponent) = binary_children(node)?;
            let base = convert(base, depth + 1)?;
            match convert(exponent, depth + 1)? {
                Expr::Const(c) if c.fract() == 0.0 && c.abs() <= i32::MAX as f64 => {
                    Ok(Expr::Pow(Box::new(base), c as i64))
                }
                Expr::Const(c) => Ok(Expr::PowFloat(Box::new(base), c)),
                exponent => Ok(Expr::PowExpr(Box::new(base), Box::new(exponent))),
            }
        }

        Operator::RootNode => {
            let children = node.children();
            match children.len() {
                1 => convert(&children[0], depth),
                0 => Err(ParseError::EmptyFormula),
                _ => Err(ParseError::UnsupportedOperator(
                    "multiple expressions in one formula".to_string(),
                )),
            }
        }

        // Comparisons, boolean logic, assignment, chains, tuples, ...
        other => Err(ParseError::UnsupportedOperator(format!("{other:?}"))),
    }
}

fn binary_children(node: &Node) -> Result<(&Node, &Node), ParseError> {
    match node.children() {
        [left, right] => Ok((left, right)),
        children => Err(ParseError::UnsupportedOperator(format!(
            "operator expected two operands, found {}",
            children.len()
        ))),
    }
}

fn single_child(node: &Node) -> Result<&Node, ParseError> {
    match node.children() {
        [child] => Ok(child),
        children => Err(ParseError::UnsupportedOperator(format!(
            "expected a single operand, found {}",
            children.len()
        ))),
    }
}
