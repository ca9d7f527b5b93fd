use crate::efmt::{ExprFormatter, InfixFormatter};
use crate::{Point, VarSet, VarSpace};
use std::fmt;

/// Common API for all Boolean rules.
///
/// A rule can be evaluated on a point and displayed. This is the evaluator used to build
/// a [truth table](crate::TruthTable::from_rule) by enumerating all points of its regulators.
pub trait Rule {
    /// Display the rule using the selected formatter
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result;

    /// Display the rule with the default formatter
    fn fmt_rule(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_with(&mut InfixFormatter::new(f))
    }

    /// Display the rule using the names defined in a collection of variables
    fn fmt_named(&self, f: &mut fmt::Formatter, namer: &VarSpace) -> fmt::Result {
        self.fmt_with(&mut InfixFormatter::named(f, namer))
    }

    /// Evaluate the rule on the given point.
    ///
    /// Variables which are not assigned by the point are considered false.
    fn eval(&self, point: &Point) -> bool;

    /// Add all regulators to the set of variables
    fn collect_regulators(&self, regulators: &mut VarSet);

    /// Construct the set of regulators
    fn get_regulators(&self) -> VarSet {
        let mut regulators = VarSet::default();
        self.collect_regulators(&mut regulators);
        regulators
    }
}
