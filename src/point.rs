use crate::*;

use std::fmt;
use std::str::FromStr;

/// An assignment of Boolean values to some variables.
///
/// A point is represented as a pair of [VarSet] storing the variables assigned to 1 and to 0.
/// It is total when it assigns every input of a table, otherwise it is a partial point
/// which can be used to [restrict](TruthTable::restrict) a table.
/// Assigning a variable replaces any previous value: a point never contains conflicts.
///
/// A Point can be parsed from strings where the position in the string defines the
/// variable UID and the character defines the value: - for unassigned, 0 and 1 for fixed values.
/// Spaces and single quotes are ignored around and inside the string.
///
/// ```
/// use truthkit::{Point, Variable};
/// # use truthkit::TruthError;
/// # fn main() -> Result<(), TruthError> {
/// let p: Point = "1-0".parse()?;
/// assert_eq!(p.value(Variable::from(0)), Some(true));
/// assert_eq!(p.value(Variable::from(1)), None);
/// assert_eq!(p.value(Variable::from(2)), Some(false));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Point {
    pub(crate) positive: VarSet,
    pub(crate) negative: VarSet,
}

impl Point {
    /// Create a point from the two inner sets of fixed variables.
    ///
    /// Variables present in both sets are assigned to 1.
    pub fn with(positive: VarSet, mut negative: VarSet) -> Self {
        negative.difference_with(&positive);
        Self { positive, negative }
    }

    /// Assign a value to a variable, replacing the previous one if any
    pub fn set(&mut self, var: Variable, value: bool) {
        if value {
            self.negative.remove(var);
            self.positive.insert(var);
        } else {
            self.positive.remove(var);
            self.negative.insert(var);
        }
    }

    /// Clone this point and assign an additional variable
    pub fn with_value(&self, var: Variable, value: bool) -> Self {
        let mut result = self.clone();
        result.set(var, value);
        result
    }

    /// Remove the value assigned to a variable.
    pub fn free_variable(&mut self, var: Variable) {
        self.positive.remove(var);
        self.negative.remove(var);
    }

    /// Get the value assigned to a variable, if any
    pub fn value(&self, var: Variable) -> Option<bool> {
        if self.positive.contains(var) {
            Some(true)
        } else if self.negative.contains(var) {
            Some(false)
        } else {
            None
        }
    }

    /// Test if a variable is assigned in this point
    pub fn contains_var(&self, var: Variable) -> bool {
        self.positive.contains(var) || self.negative.contains(var)
    }

    /// The set of all assigned variables
    pub fn assigned(&self) -> VarSet {
        let mut result = self.positive.clone();
        result.union_with(&self.negative);
        result
    }

    /// The variables assigned to 1
    pub fn positive(&self) -> &VarSet {
        &self.positive
    }

    /// The variables assigned to 0
    pub fn negative(&self) -> &VarSet {
        &self.negative
    }

    /// Number of assigned variables
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Test if none of the assigned variables belong to the given set
    pub fn is_disjoint_from(&self, vars: &VarSet) -> bool {
        self.positive.is_disjoint(vars) && self.negative.is_disjoint(vars)
    }

    /// Test if all variables of the given set are assigned
    pub fn assigns_all(&self, vars: &VarSet) -> bool {
        self.assigned().contains_all(vars)
    }

    /// Keep only the values assigned to variables of the given set
    pub fn project(&self, vars: &VarSet) -> Self {
        let mut positive = self.positive.clone();
        positive.intersect_with(vars);
        let mut negative = self.negative.clone();
        negative.intersect_with(vars);
        Self { positive, negative }
    }

    /// Combine the assignments of two points.
    ///
    /// When both points assign the same variable, the value from the other point is used.
    pub fn union(&self, other: &Self) -> Self {
        let mut positive = self.positive.clone();
        positive.difference_with(&other.negative);
        positive.union_with(&other.positive);
        let mut negative = self.negative.clone();
        negative.difference_with(&other.positive);
        negative.union_with(&other.negative);
        Self { positive, negative }
    }

    /// Iterate over the assigned variables and their value, following the order of the variables
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        let mut pos = self.positive.iter().peekable();
        let mut neg = self.negative.iter().peekable();
        std::iter::from_fn(move || match (pos.peek().copied(), neg.peek().copied()) {
            (Some(p), Some(n)) if p < n => pos.next().map(|v| (v, true)),
            (Some(_), Some(_)) | (None, Some(_)) => neg.next().map(|v| (v, false)),
            (Some(_), None) => pos.next().map(|v| (v, true)),
            (None, None) => None,
        })
    }
}

impl FromStr for Point {
    type Err = TruthError;

    fn from_str(descr: &str) -> Result<Point, TruthError> {
        let mut p = Point::default();
        let mut idx = 0;
        for c in descr.chars() {
            match c {
                ' ' | '\t' | '\'' => (), // skip spacing and ` for formatting
                '-' => idx += 1,
                '0' => {
                    p.negative.insert(Variable(idx));
                    idx += 1;
                }
                '1' => {
                    p.positive.insert(Variable(idx));
                    idx += 1;
                }
                _ => return Err(TruthError::InvalidExpression),
            };
        }
        Ok(p)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = vec![];
        for (v, b) in self.iter() {
            if result.len() <= v.uid() {
                result.resize(v.uid() + 1, '-');
            }
            result[v.uid()] = if b { '1' } else { '0' };
        }
        let s: String = result.iter().collect();
        write!(f, "{}", &s)
    }
}

impl From<(Variable, bool)> for Point {
    fn from((var, value): (Variable, bool)) -> Self {
        let mut point = Point::default();
        point.set(var, value);
        point
    }
}

impl FromIterator<(Variable, bool)> for Point {
    fn from_iter<I: IntoIterator<Item = (Variable, bool)>>(iter: I) -> Self {
        let mut point = Point::default();
        for (var, value) in iter {
            point.set(var, value);
        }
        point
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn construct_and_display() -> Result<(), TruthError> {
        let p: Point = "-0--01-11--0-1---".parse()?;
        assert_eq!(format!("{}", p), "-0--01-11--0-1");
        assert_eq!(p.len(), 7);

        let mut p = Point::default();
        for v in [1, 3, 5, 8] {
            p.set(Variable(v), true);
        }
        p.set(Variable(3), false);
        assert_eq!(format!("{}", p), "-1-0-1--1");
        Ok(())
    }

    #[test]
    fn ordered_iteration() -> Result<(), TruthError> {
        let p: Point = "01-10".parse()?;
        let values: Vec<(Variable, bool)> = p.iter().collect();
        assert_eq!(
            values,
            vec![
                (Variable(0), false),
                (Variable(1), true),
                (Variable(3), true),
                (Variable(4), false)
            ]
        );
        Ok(())
    }

    #[test]
    fn union_and_projection() -> Result<(), TruthError> {
        let p1: Point = "1-0".parse()?;
        let p2: Point = "-11".parse()?;

        let u = p1.union(&p2);
        assert_eq!(format!("{}", u), "111");

        let vars: VarSet = "011".parse()?;
        assert_eq!(format!("{}", p1.project(&vars)), "--0");
        assert!(p1.assigns_all(&"101".parse()?));
        assert!(!p1.assigns_all(&vars));
        assert!(p2.is_disjoint_from(&"1".parse()?));
        Ok(())
    }
}
