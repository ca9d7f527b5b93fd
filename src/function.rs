//! Common capabilities of Boolean function representations

use crate::*;

/// Operations shared by the representations of Boolean functions.
///
/// A representation may not provide every operation: unsupported operations return
/// [TruthError::UnsupportedOperation] instead of an approximate result.
pub trait BooleanFunction {
    /// The result of operations which can reduce the function to a constant
    type Value;

    /// The set of inputs
    fn support(&self) -> &VarSet;

    /// The ordered list of inputs
    fn inputs(&self) -> &VarList;

    /// The cofactor with respect to a partial assignment
    fn restrict(&self, point: &Point) -> Self::Value;

    /// Substitute functions to some of the inputs
    fn compose(&self, mapping: &[(Variable, Self::Value)]) -> Result<Self::Value, TruthError>;

    fn satisfy_one(&self) -> Option<Point>;

    fn satisfy_all(&self) -> Box<dyn Iterator<Item = Point> + '_>;

    fn satisfy_count(&self) -> usize;

    /// Check if the function is negative unate in the selected variables
    fn is_neg_unate(&self, vars: &VarSet) -> Result<bool, TruthError>;

    /// Check if the function is positive unate in the selected variables
    fn is_pos_unate(&self, vars: &VarSet) -> Result<bool, TruthError>;

    /// Existential quantification of the selected variables
    fn smoothing(&self, vars: &VarSet) -> Result<Self::Value, TruthError>;

    /// Universal quantification of the selected variables
    fn consensus(&self, vars: &VarSet) -> Result<Self::Value, TruthError>;

    /// Boolean difference with respect to the selected variables
    fn derivative(&self, vars: &VarSet) -> Result<Self::Value, TruthError>;
}

impl BooleanFunction for TruthTable {
    type Value = TableValue;

    fn support(&self) -> &VarSet {
        TruthTable::support(self)
    }

    fn inputs(&self) -> &VarList {
        TruthTable::inputs(self)
    }

    fn restrict(&self, point: &Point) -> TableValue {
        TruthTable::restrict(self, point)
    }

    fn compose(&self, _mapping: &[(Variable, TableValue)]) -> Result<TableValue, TruthError> {
        Err(TruthError::UnsupportedOperation("compose"))
    }

    fn satisfy_one(&self) -> Option<Point> {
        TruthTable::satisfy_one(self)
    }

    fn satisfy_all(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(TruthTable::satisfy_all(self))
    }

    fn satisfy_count(&self) -> usize {
        TruthTable::satisfy_count(self)
    }

    fn is_neg_unate(&self, _vars: &VarSet) -> Result<bool, TruthError> {
        Err(TruthError::UnsupportedOperation("is_neg_unate"))
    }

    fn is_pos_unate(&self, _vars: &VarSet) -> Result<bool, TruthError> {
        Err(TruthError::UnsupportedOperation("is_pos_unate"))
    }

    fn smoothing(&self, _vars: &VarSet) -> Result<TableValue, TruthError> {
        Err(TruthError::UnsupportedOperation("smoothing"))
    }

    fn consensus(&self, _vars: &VarSet) -> Result<TableValue, TruthError> {
        Err(TruthError::UnsupportedOperation("consensus"))
    }

    fn derivative(&self, _vars: &VarSet) -> Result<TableValue, TruthError> {
        Err(TruthError::UnsupportedOperation("derivative"))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn count_through_trait<F: BooleanFunction>(f: &F) -> (usize, usize) {
        (f.satisfy_count(), f.satisfy_all().count())
    }

    #[test]
    fn table_capabilities() -> Result<(), TruthError> {
        let t = TruthTable::new([0, 1].map(Variable::from), [0, 1, 1, 1], Mode::Binary)?
            .into_table()?;
        assert_eq!(count_through_trait(&t), (3, 3));
        assert_eq!(BooleanFunction::inputs(&t).len(), 2);
        assert_eq!(
            BooleanFunction::restrict(&t, &"0".parse()?),
            TruthTable::new([Variable::from(1)], [0, 1], Mode::Binary)?
        );

        let vars: VarSet = "11".parse()?;
        assert_eq!(t.compose(&[]), Err(TruthError::UnsupportedOperation("compose")));
        assert_eq!(t.is_neg_unate(&vars), Err(TruthError::UnsupportedOperation("is_neg_unate")));
        assert_eq!(t.is_pos_unate(&vars), Err(TruthError::UnsupportedOperation("is_pos_unate")));
        assert_eq!(t.smoothing(&vars), Err(TruthError::UnsupportedOperation("smoothing")));
        assert_eq!(t.consensus(&vars), Err(TruthError::UnsupportedOperation("consensus")));
        assert_eq!(t.derivative(&vars), Err(TruthError::UnsupportedOperation("derivative")));
        Ok(())
    }
}
