use crate::{parse::VariableParser, *};

use once_cell::sync::Lazy;
use regex::Regex;
use slab::Slab;
use std::collections::HashMap;
use std::fmt;

static RE_UID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(_[01-9_]*)?[a-zA-Z][a-zA-Z01-9_]*$").unwrap());

/// A collection of named variables.
///
/// Adding a new name to the collection triggers the creation of a variable associated to a unique integer UID
/// (using successive UIDs for better scalability). Variables can then be used independently of the collection,
/// in particular as inputs of [truth tables](TruthTable).
/// A request with an existing name allows to recover a variable with the same UID.
///
/// The name of a variable can be changed (then the old name can no longer be used to recover this variable).
/// Variables can be removed from the collection, in which case their internal UIDs can be reused for new variables.
///
/// The collection can be used to retrieve the name associated with existing variables, which is especially useful
/// to display the canonical expressions of a table.
///
/// ```
/// use truthkit::{Mode, TruthTable, VarSpace};
/// # use truthkit::TruthError;
/// # fn main() -> Result<(), TruthError> {
///
/// let mut variables = VarSpace::default();
/// let a = variables.provide("a")?;
/// let b = variables.provide("b")?;
///
/// let xor = TruthTable::new([a, b], [0, 1, 1, 0], Mode::Binary)?.into_table()?;
/// assert_eq!(format!("{}", variables.named(&xor.to_expr(false))), "a & !b | !a & b");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default, Debug)]
pub struct VarSpace {
    /// The names of variables, indexed by UID
    names: Slab<String>,

    /// Find a variable by name
    name2uid: HashMap<String, Variable>,

    /// auto create variables when parsing
    auto_extend: bool,
}

/// A named rule associates a rule to a variable collection to provide prettier display output
struct NamedRule<'a, R: ?Sized> {
    namer: &'a VarSpace,
    rule: &'a R,
}

/// Parser creating the missing variables in a collection
pub struct ExtendingParser<'a>(&'a mut VarSpace);

impl VarSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a named variable or create it if needed.
    ///
    /// If a variable with this name already exists, return it without any change in the collection.
    /// Otherwise, create a new Variable associated to the desired name.
    ///
    /// Returns an error if the name is invalid, in this case the collection is not modified.
    pub fn provide(&mut self, name: &str) -> Result<Variable, TruthError> {
        if let Some(var) = self.name2uid.get(name) {
            return Ok(*var);
        }
        if !RE_UID.is_match(name) {
            return Err(TruthError::InvalidName(name.into()));
        }
        let var = self.names.insert(name.into()).into();
        self.name2uid.insert(name.into(), var);
        Ok(var)
    }

    /// Get the number of assigned Variables
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Return whether there are no variables in this collection
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check if a variable is part of the collection
    pub fn contains(&self, var: Variable) -> bool {
        self.names.contains(var.uid())
    }

    /// Check if a name is part of the collection
    pub fn contains_name(&self, name: &str) -> bool {
        self.name2uid.contains_key(name)
    }

    /// Search a variable with the given name
    pub fn get(&self, name: &str) -> Option<Variable> {
        self.name2uid.get(name).copied()
    }

    /// Search a variable with the given name
    pub fn get_or_err(&self, name: &str) -> Result<Variable, TruthError> {
        self.get(name)
            .ok_or_else(|| TruthError::NoSuchVariableName(name.into()))
    }

    /// Remove a given variable.
    ///
    /// This operation does not fail as it ignored variable which are not part of the collection
    pub fn remove(&mut self, var: Variable) {
        if let Some(name) = self.names.try_remove(var.uid()) {
            self.name2uid.remove(&name);
        }
    }

    /// Rename a variable identified by its old name and retrieve the corresponding Variable.
    ///
    /// Returns an error if the old name does not exist in the collection or if the new one is either
    /// invalid or already associated to another variable. Renaming to the same name is accepted
    /// (in this case, the collection is not changed)
    pub fn rename(&mut self, old: &str, name: &str) -> Result<Variable, TruthError> {
        let v = self.get_or_err(old)?;
        self.set_name(v, name)
    }

    pub fn set_name(&mut self, v: Variable, name: &str) -> Result<Variable, TruthError> {
        if !self.contains(v) {
            return Err(TruthError::NoSuchVariable(v));
        }

        // Reject invalid names
        if !RE_UID.is_match(name) {
            return Err(TruthError::InvalidName(name.into()));
        }

        // Detect conflicts or unchanged names
        if let Some(existing) = self.get(name) {
            if existing == v {
                return Ok(v);
            }
            return Err(TruthError::ConflictingName(String::from(name)));
        }

        let old_name = std::mem::replace(&mut self.names[v.uid()], name.into());
        self.name2uid.remove(&old_name);
        self.name2uid.insert(name.into(), v);
        Ok(v)
    }

    /// Let the parsing methods create missing variables
    pub fn set_auto_extend(&mut self, b: bool) {
        self.auto_extend = b;
    }

    /// A parser creating missing variables, regardless of the auto-extend flag
    pub fn extend(&mut self) -> ExtendingParser {
        ExtendingParser(self)
    }

    /// Iterate on all variables of this collection
    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        self.names.iter().map(|(idx, _)| idx.into())
    }

    /// Apply variable names from this collection to a rule.
    ///
    /// This operation is only useful to display rules (especially expressions and tables) or variables.
    ///
    /// It accepts rules with variables which are not part of the collection.
    /// In this case, valid variables will be associated to their name in the collection,
    /// while missing variables will receive their default UID-based name.
    pub fn named<'a, R: Rule + ?Sized>(&'a self, rule: &'a R) -> impl fmt::Display + 'a {
        NamedRule { namer: self, rule }
    }

    /// Insert the name of a variable during a display operation.
    pub fn format_variable(&self, f: &mut fmt::Formatter, var: Variable) -> fmt::Result {
        match self.names.get(var.uid()) {
            None => write!(f, "{}", var),
            Some(s) => write!(f, "{}", s),
        }
    }

    /// Check that a rule uses only variables included in this collection
    pub fn check_rule(&self, rule: &dyn Rule) -> Result<(), TruthError> {
        match rule.get_regulators().iter().find(|v| !self.contains(*v)) {
            Some(v) => Err(TruthError::NoSuchVariable(v)),
            None => Ok(()),
        }
    }
}

impl<R: Rule + ?Sized> fmt::Display for NamedRule<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rule.fmt_named(f, self.namer)
    }
}

impl VariableParser for VarSpace {
    fn parse_variable(&mut self, s: &str) -> Result<Variable, TruthError> {
        match self.auto_extend {
            true => self.provide(s),
            false => self.get_or_err(s),
        }
    }
}

impl VariableParser for ExtendingParser<'_> {
    fn parse_variable(&mut self, s: &str) -> Result<Variable, TruthError> {
        self.0.provide(s)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::VariableParser;
    use crate::*;

    #[test]
    fn names() -> Result<(), TruthError> {
        let mut vs = VarSpace::default();
        let test = vs.provide("test")?;
        assert_eq!(test.uid(), 0);
        assert_eq!(vs.provide("test")?, test);
        assert_eq!(vs.provide("pi po"), Err(TruthError::InvalidName("pi po".into())));

        let other = vs.provide("other")?;
        assert_eq!(vs.set_name(other, "test"), Err(TruthError::ConflictingName("test".into())));
        assert_eq!(vs.rename("other", "renamed")?, other);
        assert!(!vs.contains_name("other"));
        assert_eq!(vs.get("renamed"), Some(other));

        vs.remove(test);
        assert_eq!(vs.len(), 1);
        assert_eq!(vs.get_or_err("test"), Err(TruthError::NoSuchVariableName("test".into())));
        assert_eq!(vs.provide("again")?, test);
        Ok(())
    }

    #[test]
    fn auto_extend() -> Result<(), TruthError> {
        let mut vs = VarSpace::default();
        assert!(vs.parse_variable_set("a b").is_err());

        vs.set_auto_extend(true);
        let set = vs.parse_variable_set("a b")?;
        assert_eq!(set.len(), 2);
        vs.set_auto_extend(false);

        let e = vs.extend().parse_expression("a | c")?;
        assert_eq!(vs.len(), 3);
        assert!(vs.check_rule(&e).is_ok());
        assert_eq!(vs.check_rule(&Variable::from(7)), Err(TruthError::NoSuchVariable(Variable::from(7))));
        Ok(())
    }
}
