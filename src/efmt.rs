//! Formatting API for expressions and tables

use crate::{Operator, Rule, VarSpace, Variable};

use std::fmt;

/// Define hooks to display separate parts of expressions.
///
/// [Rule::fmt_with] calls these hooks for each node and leaf of the rule. Tables only use
/// [ExprFormatter::write_variable] to print their inputs.
///
/// The infix formatter writes on top of a [fmt::Formatter], with or without variable names.
pub trait ExprFormatter {
    /// Pass-through to the inner [fmt::Formatter], enables the ```write!``` macro.
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result;

    /// Write a fixed Boolean node
    fn write_bool(&mut self, b: bool) -> fmt::Result;

    /// Write a variable, negated if `value` is false
    fn write_variable(&mut self, var: Variable, value: bool) -> fmt::Result;

    fn start_operation(&mut self, op: Operator, value: bool, parent: Option<Operator>) -> fmt::Result;

    fn end_operation(&mut self, op: Operator, value: bool, parent: Option<Operator>) -> fmt::Result;

    /// Separate two children of the current operation
    fn sep_operation(&mut self, op: Operator) -> fmt::Result;
}

/// Write rules with infix operators, adding parentheses only where priorities need them
pub struct InfixFormatter<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    names: Option<&'a VarSpace>,
}

impl<'a, 'b> InfixFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self { f, names: None }
    }

    pub fn named(f: &'a mut fmt::Formatter<'b>, names: &'a VarSpace) -> Self {
        Self { f, names: Some(names) }
    }

    fn grouped(op: Operator, value: bool, parent: Option<Operator>) -> bool {
        !value || op.priority() < parent.map_or(0, Operator::priority)
    }
}

impl ExprFormatter for InfixFormatter<'_, '_> {
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result {
        self.f.write_fmt(args)
    }

    fn write_bool(&mut self, b: bool) -> fmt::Result {
        write!(self, "{}", b as u8)
    }

    fn write_variable(&mut self, var: Variable, value: bool) -> fmt::Result {
        if !value {
            write!(self, "!")?;
        }
        match self.names {
            None => write!(self, "{}", var),
            Some(vs) => vs.format_variable(self.f, var),
        }
    }

    fn start_operation(&mut self, op: Operator, value: bool, parent: Option<Operator>) -> fmt::Result {
        if !value {
            write!(self, "!")?;
        }
        match Self::grouped(op, value, parent) {
            true => write!(self, "("),
            false => Ok(()),
        }
    }

    fn end_operation(&mut self, op: Operator, value: bool, parent: Option<Operator>) -> fmt::Result {
        match Self::grouped(op, value, parent) {
            true => write!(self, ")"),
            false => Ok(()),
        }
    }

    fn sep_operation(&mut self, op: Operator) -> fmt::Result {
        write!(self, " {} ", op)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::VariableParser;
    use crate::*;

    #[test]
    fn priorities_and_negations() -> Result<(), TruthError> {
        let mut vs = VarSpace::default();
        let expr = vs.extend().parse_expression("A | (B & C)")?;
        assert_eq!(format!("{}", vs.named(&expr)), "A | B & C");

        let expr = vs.extend().parse_expression("A & (D | !C | B)")?;
        assert_eq!(format!("{}", vs.named(&expr)), "A & (D | !C | B)");
        assert_eq!(format!("{}", expr), "_0_ & (_3_ | !_2_ | _1_)");

        let expr = vs.parse_expression("!(A & B) | !(C | D)")?;
        assert_eq!(format!("{}", vs.named(&expr)), "!(A & B) | !(C | D)");

        assert_eq!(format!("{}", Expr::from(false)), "0");
        Ok(())
    }
}
