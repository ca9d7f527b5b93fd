//! Boolean rules defined as expression trees

use core::ops::BitAnd;
use core::ops::BitOr;
use core::ops::Not;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::parse::VariableParser;
use crate::*;

/// A Boolean expression tree.
///
/// Represents a Boolean rule as a tree where internal nodes are AND or OR operations
/// over any number of children, and leaves are individual variables (or fixed Boolean values).
/// Each node carries its own negation flag.
/// Expressions overload the ```&```, ```|```, and ```!``` operators to facilitate their definition
/// as readable rust statements. Fixed Boolean values and double negations are eliminated and
/// nested operations of the same type are flattened.
///
/// Expressions can not be [copied](Copy) but they can be [cloned](Clone) in constant time.
///
/// ```
/// use truthkit::{Expr, Point, Rule, Variable};
/// # use truthkit::TruthError;
/// # fn main() -> Result<(), TruthError> {
///
/// let a = Variable::from(0);
/// let b = Variable::from(1);
/// let c = Variable::from(2);
///
/// let sub_expr = b & !c;
/// let pos_expr = a & !sub_expr;
/// let neg_expr = !&pos_expr;
///
/// let point: Point = "011".parse()?;
/// assert_ne!(pos_expr.eval(&point), neg_expr.eval(&point));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct Expr {
    pub(crate) value: bool,
    pub(crate) node: ExprNode,
}

/// A node in an expression tree
#[derive(Clone, PartialEq, Debug)]
pub enum ExprNode {
    /// A fixed Boolean value
    True,

    /// A single literal
    Variable(Variable),

    /// Expressions connected with an operator
    Operation(Operator, Arc<[Expr]>),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// Expression trees can use the AND and OR operators.
pub enum Operator {
    /// AND operator: all children need to be true
    And,
    /// OR operator: at least one child needs to be true
    Or,
}

impl Expr {
    fn new(value: bool, node: ExprNode) -> Self {
        Self { value, node }
    }

    /// A variable or its negation
    pub fn literal(var: Variable, value: bool) -> Self {
        Self::new(value, ExprNode::Variable(var))
    }

    fn _fmt_expr(&self, f: &mut dyn efmt::ExprFormatter, parent: Option<Operator>) -> fmt::Result {
        match &self.node {
            ExprNode::True => f.write_bool(self.value),
            ExprNode::Variable(var) => f.write_variable(*var, self.value),
            ExprNode::Operation(o, children) => {
                f.start_operation(*o, self.value, parent)?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.sep_operation(*o)?;
                    }
                    child._fmt_expr(f, Some(*o))?;
                }
                f.end_operation(*o, self.value, parent)
            }
        }
    }

    /// Get access to the inner content: a boolean value and an expression node
    pub fn get_inner(&self) -> (bool, &ExprNode) {
        (self.value, &self.node)
    }

    /// Get the fixed value associated to this expression, or none if it is not fixed
    pub fn get_fixed(&self) -> Option<bool> {
        match &self.node {
            ExprNode::True => Some(self.value),
            _ => None,
        }
    }

    /// The children of a non-negated operation, or the expression itself
    fn operands(&self, op: Operator) -> &[Expr] {
        match &self.node {
            ExprNode::Operation(o, children) if *o == op && self.value => children,
            _ => std::slice::from_ref(self),
        }
    }
}

impl Operator {
    /// Define the priority of operators
    ///
    /// This priority controls the addition of necessary parenthesis when formatting expressions.
    pub fn priority(self) -> u8 {
        match self {
            Operator::And => 2,
            Operator::Or => 1,
        }
    }

    /// The value which leaves the other operand unchanged
    pub fn neutral(self) -> bool {
        match self {
            Operator::And => true,
            Operator::Or => false,
        }
    }

    /// Join two expressions with this operator
    pub fn join(self, e1: impl Into<Expr>, e2: impl Into<Expr>) -> Expr {
        self.join_all([e1.into(), e2.into()])
    }

    /// Join any number of expressions with this operator.
    ///
    /// Neutral values are skipped and absorbing values replace the whole operation.
    /// An empty list gives the neutral value and a single operand is returned as is.
    pub fn join_all(self, operands: impl IntoIterator<Item = Expr>) -> Expr {
        let mut children: Vec<Expr> = Vec::new();
        for e in operands {
            match e.get_fixed() {
                Some(b) if b == self.neutral() => continue,
                Some(b) => return Expr::from(b),
                None => children.extend_from_slice(e.operands(self)),
            }
        }
        match children.len() {
            0 => Expr::from(self.neutral()),
            1 => children.remove(0),
            _ => Expr::from(ExprNode::Operation(self, children.into())),
        }
    }
}

impl FromStr for Expr {
    type Err = TruthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parser().parse_expression(s)
    }
}

impl From<&Expr> for Expr {
    fn from(e: &Expr) -> Self {
        e.clone()
    }
}

impl From<ExprNode> for Expr {
    fn from(node: ExprNode) -> Self {
        Self::new(true, node)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Self::new(b, ExprNode::True)
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Self::from(ExprNode::Variable(var))
    }
}

impl From<&Variable> for Expr {
    fn from(var: &Variable) -> Self {
        Self::from(*var)
    }
}

/// The conjunction of the literals assigned by the point
impl From<&Point> for Expr {
    fn from(point: &Point) -> Expr {
        Operator::And.join_all(point.iter().map(|(v, b)| Expr::literal(v, b)))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operator::And => write!(f, "&"),
            Operator::Or => write!(f, "|"),
        }
    }
}

impl Rule for Expr {
    fn fmt_with(&self, f: &mut dyn efmt::ExprFormatter) -> fmt::Result {
        self._fmt_expr(f, None)
    }

    fn eval(&self, point: &Point) -> bool {
        self.value
            == match &self.node {
                ExprNode::True => true,
                ExprNode::Variable(var) => point.value(*var) == Some(true),
                ExprNode::Operation(Operator::And, children) => children.iter().all(|c| c.eval(point)),
                ExprNode::Operation(Operator::Or, children) => children.iter().any(|c| c.eval(point)),
            }
    }

    fn collect_regulators(&self, regulators: &mut VarSet) {
        match &self.node {
            ExprNode::True => (),
            ExprNode::Variable(var) => regulators.insert(*var),
            ExprNode::Operation(_, children) => {
                for c in children.iter() {
                    c.collect_regulators(regulators);
                }
            }
        }
    }
}

// Delegate Display to the rule trait
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rule::fmt_rule(self, f)
    }
}

/* ************************************************************************************* */
/* ******************************   Operator overloading  ****************************** */
/* ************************************************************************************* */

impl Not for Expr {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self::new(!self.value, self.node)
    }
}

impl Not for &Expr {
    type Output = Expr;
    fn not(self) -> Self::Output {
        Expr::new(!self.value, self.node.clone())
    }
}

impl Not for Variable {
    type Output = Expr;
    fn not(self) -> Self::Output {
        Expr::literal(self, false)
    }
}

impl<T: Into<Expr>> BitAnd<T> for Expr {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Operator::And.join(self, rhs)
    }
}

impl<T: Into<Expr>> BitAnd<T> for &Expr {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Operator::And.join(self, rhs)
    }
}

impl<T: Into<Expr>> BitAnd<T> for Variable {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Operator::And.join(self, rhs)
    }
}

impl<T: Into<Expr>> BitOr<T> for Expr {
    type Output = Self;
    fn bitor(self, rhs: T) -> Self::Output {
        Operator::Or.join(self, rhs)
    }
}

impl<T: Into<Expr>> BitOr<T> for &Expr {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        Operator::Or.join(self, rhs)
    }
}

impl<T: Into<Expr>> BitOr<T> for Variable {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        Operator::Or.join(self, rhs)
    }
}
