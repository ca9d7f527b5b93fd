//! Mapping between point indices and points.
//!
//! The index of a point over a list of inputs is the integer whose bit `i` is the value
//! of the `i`-th input. All tables enumerate their points in ascending index order.

use crate::{Point, TruthError, VarList};

/// Value of the bit `i` of `n`
pub fn bit_of(n: usize, i: usize) -> bool {
    (n >> i) & 1 == 1
}

/// Build the point corresponding to the index `n` over the given inputs
pub fn point_of(n: usize, inputs: &VarList) -> Point {
    inputs
        .iter()
        .enumerate()
        .map(|(i, v)| (*v, bit_of(n, i)))
        .collect()
}

/// Find the index of a point over the given inputs.
///
/// Variables assigned by the point but missing from the inputs are ignored.
/// Fails if one of the inputs is not assigned by the point.
pub fn index_of(point: &Point, inputs: &VarList) -> Result<usize, TruthError> {
    inputs
        .iter()
        .enumerate()
        .try_fold(0, |n, (i, v)| match point.value(*v) {
            None => Err(TruthError::IncompletePoint(*v)),
            Some(true) => Ok(n | (1 << i)),
            Some(false) => Ok(n),
        })
}

#[cfg(test)]
mod tests {
    use crate::codec::*;
    use crate::*;

    #[test]
    fn bits() {
        assert!(bit_of(5, 0));
        assert!(!bit_of(5, 1));
        assert!(bit_of(5, 2));
        assert!(!bit_of(5, 3));
    }

    #[test]
    fn round_trip() -> Result<(), TruthError> {
        let inputs = VarList::new([Variable::from(3), Variable::from(0), Variable::from(7)])?;
        for n in 0..8 {
            let point = point_of(n, &inputs);
            assert_eq!(point.len(), 3);
            assert_eq!(index_of(&point, &inputs)?, n);
        }

        // The first input is the least significant bit
        let point = point_of(1, &inputs);
        assert_eq!(point.value(Variable::from(3)), Some(true));
        assert_eq!(point.value(Variable::from(0)), Some(false));
        Ok(())
    }

    #[test]
    fn incomplete_point() -> Result<(), TruthError> {
        let inputs = VarList::new([Variable::from(0), Variable::from(1)])?;
        let point: Point = "1".parse()?;
        assert_eq!(
            index_of(&point, &inputs),
            Err(TruthError::IncompletePoint(Variable::from(1)))
        );

        // Extra variables are ignored
        let point: Point = "101".parse()?;
        assert_eq!(index_of(&point, &inputs)?, 1);
        Ok(())
    }
}
