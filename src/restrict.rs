//! Cofactors of truth tables

use crate::codec::bit_of;
use crate::*;

use log::debug;

impl TruthTable {
    /// Restrict this table to a partial assignment of its inputs.
    ///
    /// Variables of the point which are not inputs of the table are ignored.
    /// The remaining inputs keep their order. When the point assigns all inputs, the result is the
    /// [scalar](TableValue::Scalar) output at this point. When it assigns none of them, the table is
    /// returned unchanged.
    ///
    /// ```
    /// use truthkit::{Mode, Output, Point, TableValue, TruthTable, Variable};
    /// # use truthkit::TruthError;
    /// # fn main() -> Result<(), TruthError> {
    /// let t = TruthTable::new([0, 1].map(Variable::from), [0, 1, 1, 1], Mode::Binary)?.into_table()?;
    ///
    /// let b_is_false: Point = "-0".parse()?;
    /// let cofactor = t.restrict(&b_is_false);
    /// assert_eq!(cofactor, TruthTable::new([Variable::from(0)], [0, 1], Mode::Binary)?);
    ///
    /// let point: Point = "11".parse()?;
    /// assert_eq!(t.restrict(&point), TableValue::Scalar(Output::One));
    /// # Ok(())
    /// # }
    /// ```
    pub fn restrict(&self, point: &Point) -> TableValue {
        let fixed = point.project(self.support());
        if fixed.is_empty() {
            return TableValue::Table(self.clone());
        }

        let inputs = self.inputs.without(&fixed.assigned());
        debug!(
            "restrict([{}], {}) -> [{}]",
            self.inputs,
            fixed,
            inputs
        );
        // Index of the first restricted point in this table
        let base = self
            .inputs
            .iter()
            .enumerate()
            .filter(|(_, v)| fixed.value(**v) == Some(true))
            .fold(0, |n, (i, _)| n | (1 << i));
        if inputs.is_empty() {
            return TableValue::Scalar(self.decode(base));
        }

        // Position of the free inputs
        let free: Vec<usize> = self
            .inputs
            .iter()
            .enumerate()
            .filter(|(_, v)| !fixed.contains_var(**v))
            .map(|(i, _)| i)
            .collect();

        let outputs = (0..1 << inputs.len()).map(|r| {
            let n = free
                .iter()
                .enumerate()
                .filter(|(j, _)| bit_of(r, *j))
                .fold(base, |n, (_, i)| n | (1 << i));
            self.decode(n)
        });
        TableValue::Table(TruthTable::packed(inputs, self.mode, outputs))
    }
}

impl TableValue {
    /// Restrict the function to a partial assignment, constants are left unchanged
    pub fn restrict(&self, point: &Point) -> TableValue {
        match self {
            TableValue::Scalar(_) => self.clone(),
            TableValue::Table(t) => t.restrict(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use test_log::test;

    fn random_table(rng: &mut StdRng, degree: usize) -> TruthTable {
        let outputs: Vec<bool> = (0..1 << degree).map(|_| rng.gen()).collect();
        TruthTable::new((0..degree).map(Variable::from), outputs, Mode::Binary)
            .unwrap()
            .into_table()
            .unwrap()
    }

    #[test]
    fn cofactors() -> Result<(), TruthError> {
        let t = TruthTable::new((0..3).map(Variable::from), "01101001".chars(), Mode::Binary)?
            .into_table()?;

        let r = t.restrict(&"-1".parse()?);
        let expected = TruthTable::new([0, 2].map(Variable::from), "1001".chars(), Mode::Binary)?;
        assert_eq!(r, expected);

        let r = t.restrict(&"1-0".parse()?);
        let expected = TruthTable::new([Variable::from(1)], "10".chars(), Mode::Binary)?;
        assert_eq!(r, expected);

        assert_eq!(t.restrict(&"110".parse()?), TableValue::from(false));
        Ok(())
    }

    #[test]
    fn plane_coded_cofactor() -> Result<(), TruthError> {
        let t = TruthTable::plane_coded([0, 1].map(Variable::from), "0-?1".chars())?.into_table()?;
        assert_eq!(
            t.restrict(&"1".parse()?),
            TruthTable::plane_coded([Variable::from(1)], "-1".chars())?
        );
        assert_eq!(t.restrict(&"-0".parse()?).mode(), Mode::PlaneCoded);
        Ok(())
    }

    #[test]
    fn irrelevant_variables() -> Result<(), TruthError> {
        let mut rng = StdRng::seed_from_u64(5);
        let t = random_table(&mut rng, 3);

        // Only variables 5 and 7 are assigned
        let point: Point = "-----1-0".parse()?;
        assert_eq!(t.restrict(&point), TableValue::Table(t.clone()));
        assert_eq!(t.restrict(&Point::default()), TableValue::Table(t.clone()));

        // Extra variables are ignored
        let point: Point = "1----1-0".parse()?;
        assert_eq!(t.restrict(&point), t.restrict(&"1".parse()?));
        Ok(())
    }

    #[test]
    fn idempotence_and_evaluation() -> Result<(), TruthError> {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..10 {
            let t = random_table(&mut rng, 5);
            let point: Point = "1-0-1".parse()?;
            let once = t.restrict(&point);
            assert_eq!(once.restrict(&point), once);

            let once = once.into_table()?;
            assert_eq!(once.degree(), 2);
            for n in 0..once.cardinality() {
                let free = codec::point_of(n, once.inputs());
                assert_eq!(once.decode(n), t.output_at(&point.union(&free))?);
            }
        }
        Ok(())
    }

    #[test]
    fn disjoint_restrictions() -> Result<(), TruthError> {
        let mut rng = StdRng::seed_from_u64(29);
        let inputs = VarList::new((0..4).map(Variable::from))?;
        let all = [Output::Zero, Output::One, Output::DontCare, Output::Void];
        for mode in [Mode::Binary, Mode::PlaneCoded] {
            for _ in 0..10 {
                let t = TruthTable::from_fn(inputs.clone(), mode, |_| match mode {
                    Mode::Binary => Output::from(rng.gen::<bool>()),
                    Mode::PlaneCoded => all[rng.gen_range(0..4)],
                })?
                .into_table()?;

                for (p1, p2) in [("1---", "--0-"), ("-0--", "1-01"), ("0--1", "-1--")] {
                    let p1: Point = p1.parse()?;
                    let p2: Point = p2.parse()?;
                    assert_eq!(t.restrict(&p1).restrict(&p2), t.restrict(&p1.union(&p2)));
                    assert_eq!(t.restrict(&p2).restrict(&p1), t.restrict(&p1.union(&p2)));
                }
            }
        }
        Ok(())
    }
}
