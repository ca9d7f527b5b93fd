//! Implementation for variables, sets of variables and ordered lists of inputs

use crate::*;

use bit_set::BitSet;
use delegate::delegate;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;
use std::slice::Iter as SliceIter;
use std::str::FromStr;

static RE_GENERIC_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*_?([0-9]+)_?\s*$").unwrap());

/// A single Boolean variable with an integer UID.
///
/// Variables are totally ordered by their UID. This order is used to sort the inputs of a table
/// obtained by combining two tables with different inputs.
///
/// They can be created manually by specifying the UID, or through a [variable collection](VarSpace)
/// where they are associated to a human-readable identifier.
#[derive(Clone, Copy, Default, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Variable(pub(crate) usize);

impl Variable {
    /// Create a new variable with a specific UID
    pub fn new(uid: usize) -> Self {
        Self(uid)
    }

    /// Return the internal integer UID
    pub fn uid(&self) -> usize {
        self.0
    }
}

impl From<usize> for Variable {
    fn from(uid: usize) -> Self {
        Self(uid)
    }
}

impl Rule for Variable {
    fn fmt_with(&self, f: &mut dyn efmt::ExprFormatter) -> fmt::Result {
        f.write_variable(*self, true)
    }

    fn eval(&self, point: &Point) -> bool {
        point.value(*self) == Some(true)
    }

    fn collect_regulators(&self, regulators: &mut VarSet) {
        regulators.insert(*self);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}_", self.0)
    }
}

impl FromStr for Variable {
    type Err = TruthError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        RE_GENERIC_NAME
            .captures(name)
            .and_then(|cap| cap.get(1))
            .and_then(|uid| uid.as_str().parse::<usize>().ok())
            .map(Variable::from)
            .ok_or(TruthError::InvalidExpression)
    }
}

/// A set of selected variables with efficient bitwise operations.
///
/// A VarSet is an abstraction over [BitSet], providing a similar API.
/// It is used as the unordered support of a table and to store both sides of a [Point].
/// Iteration follows the natural order of the variables.
///
/// A VarSet can also be parsed from strings where the position in the string defines the
/// variable UID and the character defines the activation state: 0 for inactive, 1 for active.
/// To make the strings easier to read, spaces and ' are ignored around and inside the string.
///
/// ```
/// use truthkit::{Variable, VarSet};
///
/// let mut vs = VarSet::default();
/// vs.insert(Variable::from(1));
/// vs.insert(Variable::from(3));
/// vs.remove(Variable::from(3));
///
/// # assert!(!vs.contains(Variable::from(0)));
/// # assert!( vs.contains(Variable::from(1)));
/// # assert!(!vs.contains(Variable::from(3)));
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct VarSet {
    variables: BitSet,
}

impl VarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an iterator over the contained variables
    pub fn iter(&self) -> Iter {
        self.into_iter()
    }

    /// Add the given variable to this set
    pub fn insert(&mut self, var: Variable) {
        self.variables.insert(var.uid());
    }

    /// Remove the given variable from this set
    pub fn remove(&mut self, var: Variable) {
        self.variables.remove(var.uid());
    }

    /// Test if a specific variable is part of this set
    pub fn contains(&self, var: Variable) -> bool {
        self.variables.contains(var.uid())
    }

    /// Remove all variables from the other set
    pub fn difference_with(&mut self, vars: &Self) {
        self.variables.difference_with(&vars.variables);
    }

    /// Retain only the variables also included in the other set
    pub fn intersect_with(&mut self, vars: &Self) {
        self.variables.intersect_with(&vars.variables);
    }

    /// Add all variables from the other set
    pub fn union_with(&mut self, vars: &Self) {
        self.variables.union_with(&vars.variables);
    }

    /// Return true if this set contains all variables of the other set
    pub fn contains_all(&self, other: &Self) -> bool {
        self.variables.is_superset(&other.variables)
    }

    /// Return true if the two sets have no common variable
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.variables.is_disjoint(&other.variables)
    }

    /// Return the number of variables in this set
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Return whether there are no selected variable in this set
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl FromIterator<Variable> for VarSet {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        let mut vs = VarSet::default();
        vs.extend(iter);
        vs
    }
}

impl Extend<Variable> for VarSet {
    fn extend<T: IntoIterator<Item = Variable>>(&mut self, iter: T) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl fmt::Display for VarSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut pos = 0;
        for v in self {
            while pos < v.uid() {
                write!(f, "0")?;
                pos += 1;
            }
            write!(f, "1")?;
            pos += 1;
        }
        Ok(())
    }
}

impl FromStr for VarSet {
    type Err = TruthError;

    fn from_str(descr: &str) -> Result<Self, TruthError> {
        let mut s = Self::default();
        let mut idx = 0;
        for c in descr.chars() {
            match c {
                ' ' | '\t' | '\'' => (), // skip spacing and ` for formatting
                '0' => idx += 1,
                '1' => {
                    s.insert(Variable(idx));
                    idx += 1;
                }
                _ => return Err(TruthError::InvalidExpression),
            };
        }
        Ok(s)
    }
}

/// Iterate over variables in a [VarSet]
pub struct Iter<'a>(bit_set::Iter<'a, u32>);

impl Iterator for Iter<'_> {
    type Item = Variable;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|uid| uid.into())
    }
}

impl<'a> IntoIterator for &'a VarSet {
    type Item = Variable;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.variables.iter())
    }
}

/// An ordered list of distinct variables: the inputs of a truth table.
///
/// The position of a variable in the list defines its bit in the index of a point:
/// the first variable is the least significant bit.
/// The list also carries the corresponding [VarSet] for fast membership tests.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct VarList {
    order: Vec<Variable>,
    members: VarSet,
}

impl VarList {
    /// Build a list of inputs, rejecting duplicated variables
    pub fn new(variables: impl IntoIterator<Item = Variable>) -> Result<Self, TruthError> {
        let mut result = Self::default();
        for var in variables {
            result.push(var)?;
        }
        Ok(result)
    }

    /// Append a new variable at the end of the list
    pub fn push(&mut self, var: Variable) -> Result<(), TruthError> {
        if self.members.contains(var) {
            return Err(TruthError::DuplicateVariable(var));
        }
        self.members.insert(var);
        self.order.push(var);
        Ok(())
    }

    /// The sorted union of two lists of variables.
    ///
    /// Both lists are sorted before merging, the result follows the natural order of the variables.
    pub fn sorted_union(&self, other: &Self) -> Self {
        let order: Vec<Variable> = self
            .order
            .iter()
            .copied()
            .sorted()
            .merge(other.order.iter().copied().sorted())
            .dedup()
            .collect();
        let members = order.iter().copied().collect();
        Self { order, members }
    }

    /// Test if the variables of this list follow their natural order
    pub fn is_sorted(&self) -> bool {
        self.order.iter().tuple_windows().all(|(a, b)| a < b)
    }

    /// Copy of this list without the selected variables, the order of the others is preserved
    pub fn without(&self, removed: &VarSet) -> Self {
        let order: Vec<Variable> = self
            .order
            .iter()
            .copied()
            .filter(|v| !removed.contains(*v))
            .collect();
        let mut members = self.members.clone();
        members.difference_with(removed);
        Self { order, members }
    }

    /// Find the position (bit index) of a variable
    pub fn position(&self, var: Variable) -> Option<usize> {
        match self.members.contains(var) {
            true => self.order.iter().position(|v| *v == var),
            false => None,
        }
    }

    /// The unordered set of variables in this list
    pub fn as_set(&self) -> &VarSet {
        &self.members
    }

    delegate! {
        to self.members {
            /// Test if a variable is part of the list
            pub fn contains(&self, var: Variable) -> bool;
        }
        to self.order {
            pub fn as_slice(&self) -> &[Variable];
            pub fn iter(&self) -> SliceIter<'_, Variable>;
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
        }
    }
}

impl Index<usize> for VarList {
    type Output = Variable;

    fn index(&self, index: usize) -> &Self::Output {
        &self.order[index]
    }
}

impl<'a> IntoIterator for &'a VarList {
    type Item = &'a Variable;
    type IntoIter = SliceIter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl fmt::Display for VarList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.order.iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use core::str::FromStr;

    #[test]
    fn extract_variable() {
        assert_eq!(Variable::from_str("12").unwrap().uid(), 12);
        assert_eq!(Variable::from_str("_003_").unwrap().uid(), 3);
        assert_eq!(Variable::from_str("  5_  ").unwrap().uid(), 5);

        assert!(Variable::from_str("h12").is_err());
        assert!(Variable::from_str("v1y2").is_err());
    }

    #[test]
    fn variable_set() -> Result<(), TruthError> {
        let vs: VarSet = "0110 01".parse()?;
        assert_eq!(vs.len(), 3);
        assert!(vs.contains(Variable(1)));
        assert!(vs.contains(Variable(5)));
        assert!(!vs.contains(Variable(4)));
        assert_eq!(format!("{}", vs), "011001");
        Ok(())
    }

    #[test]
    fn list_rejects_duplicates() {
        let err = VarList::new([Variable(2), Variable(0), Variable(2)]).unwrap_err();
        assert_eq!(err, TruthError::DuplicateVariable(Variable(2)));
    }

    #[test]
    fn list_union_and_removal() -> Result<(), TruthError> {
        let l1 = VarList::new([Variable(4), Variable(1)])?;
        let l2 = VarList::new([Variable(2), Variable(4), Variable(0)])?;

        let union = l1.sorted_union(&l2);
        assert_eq!(
            union.as_slice(),
            &[Variable(0), Variable(1), Variable(2), Variable(4)]
        );
        assert_eq!(union.position(Variable(2)), Some(2));
        assert_eq!(union.position(Variable(3)), None);
        assert!(union.is_sorted());
        assert!(!l1.is_sorted());

        let removed: VarSet = [Variable(1), Variable(3)].into_iter().collect();
        let rest = union.without(&removed);
        assert_eq!(rest.as_slice(), &[Variable(0), Variable(2), Variable(4)]);
        assert!(!rest.contains(Variable(1)));
        Ok(())
    }
}
