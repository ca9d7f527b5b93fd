//! Canonical normal forms of truth tables.

use crate::*;

use log::debug;

/// Constructors used to build the canonical form of a table.
///
/// The canonical forms only need literals, n-ary terms and the two constants.
/// Any expression representation can be targeted by implementing this trait.
pub trait TermBuilder {
    type Term;

    /// A variable (`value = true`) or its negation
    fn literal(&mut self, var: Variable, value: bool) -> Self::Term;

    /// Join literals into a term: conjunction for the DNF, disjunction for the CNF
    fn inner(&mut self, conj: bool, literals: Vec<Self::Term>) -> Self::Term;

    /// Join terms: disjunction for the DNF, conjunction for the CNF
    fn outer(&mut self, conj: bool, terms: Vec<Self::Term>) -> Self::Term;

    /// A fixed Boolean value
    fn constant(&mut self, value: bool) -> Self::Term;
}

/// Build expressions as [Expr] trees
#[derive(Clone, Copy, Default, Debug)]
pub struct ExprBuilder;

impl TermBuilder for ExprBuilder {
    type Term = Expr;

    fn literal(&mut self, var: Variable, value: bool) -> Expr {
        Expr::literal(var, value)
    }

    fn inner(&mut self, conj: bool, literals: Vec<Expr>) -> Expr {
        match conj {
            true => Operator::Or.join_all(literals),
            false => Operator::And.join_all(literals),
        }
    }

    fn outer(&mut self, conj: bool, terms: Vec<Expr>) -> Expr {
        self.inner(!conj, terms)
    }

    fn constant(&mut self, value: bool) -> Expr {
        Expr::from(value)
    }
}

/// Build the canonical normal form of a table.
///
/// With `conj = false`, build the disjunction of the minterms of all points whose output is exactly 1.
/// With `conj = true`, build the conjunction of the maxterms of all points whose output is exactly 0.
/// Literals follow the order of the inputs and terms follow the ascending index of their point.
///
/// Don't-care and unresolved points appear in neither form.
/// An empty disjunction is false and an empty conjunction is true.
pub fn to_expression<B: TermBuilder>(table: &TruthTable, conj: bool, builder: &mut B) -> B::Term {
    let target = match conj {
        true => Output::Zero,
        false => Output::One,
    };

    let mut terms = Vec::new();
    for n in (0..table.cardinality()).filter(|n| table.decode(*n) == target) {
        let literals = table
            .inputs
            .iter()
            .enumerate()
            .map(|(i, v)| builder.literal(*v, codec::bit_of(n, i) != conj))
            .collect();
        terms.push(builder.inner(conj, literals));
    }
    debug!(
        "to_expression([{}], conj={}) -> {} terms",
        table.inputs,
        conj,
        terms.len()
    );

    match terms.is_empty() {
        true => builder.constant(conj),
        false => builder.outer(conj, terms),
    }
}

impl TruthTable {
    /// The canonical DNF (`conj = false`) or CNF (`conj = true`) of this table as an expression
    pub fn to_expr(&self, conj: bool) -> Expr {
        to_expression(self, conj, &mut ExprBuilder)
    }
}

impl TableValue {
    /// The canonical expression of this function, constants give fixed expressions
    pub fn to_expr(&self, conj: bool) -> Expr {
        match self {
            TableValue::Scalar(Output::One) => Expr::from(true),
            TableValue::Scalar(Output::Zero) => Expr::from(false),
            TableValue::Scalar(_) => Expr::from(conj),
            TableValue::Table(t) => t.to_expr(conj),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::canon::{to_expression, TermBuilder};
    use crate::parse::VariableParser;
    use crate::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use test_log::test;

    /// Build the minterms and maxterms as strings of 0 and 1
    struct Patterns;

    impl TermBuilder for Patterns {
        type Term = String;

        fn literal(&mut self, _var: Variable, value: bool) -> String {
            String::from(if value { "1" } else { "0" })
        }

        fn inner(&mut self, _conj: bool, literals: Vec<String>) -> String {
            literals.concat()
        }

        fn outer(&mut self, _conj: bool, terms: Vec<String>) -> String {
            terms.join(" ")
        }

        fn constant(&mut self, value: bool) -> String {
            format!("{}", value)
        }
    }

    #[test]
    fn or_scenario() -> Result<(), TruthError> {
        let mut space = VarSpace::default();
        let a = space.provide("a")?;
        let b = space.provide("b")?;
        let t = TruthTable::new([a, b], [0, 1, 1, 1], Mode::Binary)?.into_table()?;

        let dnf = t.to_expr(false);
        assert_eq!(format!("{}", space.named(&dnf)), "a & !b | !a & b | a & b");
        assert_eq!(dnf, space.parse_expression("a & !b | !a & b | a & b")?);

        let cnf = t.to_expr(true);
        assert_eq!(format!("{}", space.named(&cnf)), "a | b");

        assert_eq!(to_expression(&t, false, &mut Patterns), "10 01 11");
        assert_eq!(to_expression(&t, true, &mut Patterns), "11");
        Ok(())
    }

    #[test]
    fn plane_coded_scenario() -> Result<(), TruthError> {
        let v = Variable::from(0);
        let t = TruthTable::plane_coded([v], [Output::Zero, Output::DontCare])?.into_table()?;

        // The single zero point gives the clause (v), the don't care point is skipped
        assert_eq!(t.to_expr(true), Expr::from(v));
        assert_eq!(t.to_expr(false), Expr::from(false));
        Ok(())
    }

    #[test]
    fn constants() -> Result<(), TruthError> {
        let inputs = [0, 1].map(Variable::from);
        let never = TruthTable::new(inputs, [0, 0, 0, 0], Mode::Binary)?.into_table()?;
        assert_eq!(never.to_expr(false), Expr::from(false));
        assert_eq!(to_expression(&never, true, &mut Patterns), "11 01 10 00");

        let always = TruthTable::new(inputs, [1, 1, 1, 1], Mode::Binary)?.into_table()?;
        assert_eq!(always.to_expr(true), Expr::from(true));

        let unknown = TruthTable::plane_coded(inputs, "-?-?".chars())?.into_table()?;
        assert_eq!(unknown.to_expr(false), Expr::from(false));
        assert_eq!(unknown.to_expr(true), Expr::from(true));

        assert_eq!(TableValue::from(true).to_expr(true), Expr::from(true));
        Ok(())
    }

    #[test]
    fn round_trip() -> Result<(), TruthError> {
        let mut rng = StdRng::seed_from_u64(21);
        let inputs = VarList::new([4, 1, 6].map(Variable::from))?;
        for _ in 0..10 {
            let t = TruthTable::from_fn(inputs.clone(), Mode::Binary, |_| rng.gen::<bool>())?
                .into_table()?;
            for conj in [false, true] {
                let expr = t.to_expr(conj);
                for n in 0..t.cardinality() {
                    let point = codec::point_of(n, &inputs);
                    assert_eq!(Output::from(expr.eval(&point)), t.decode(n));
                }
            }
        }
        Ok(())
    }
}
