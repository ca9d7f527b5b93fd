//! Boolean functions stored as packed truth tables.

use crate::codec::{bit_of, index_of, point_of};
use crate::*;

use bitvec::prelude::*;
use log::debug;
use once_cell::sync::Lazy;
use rand::Rng;
use std::fmt;

/// Number of active bits in each byte
static COUNT_ONES: Lazy<[u8; 256]> = Lazy::new(|| {
    let mut table = [0; 256];
    for (b, count) in table.iter_mut().enumerate() {
        *count = (0..8).filter(|i| bit_of(b, *i)).count() as u8;
    }
    table
});

/// Number of plane-coded fields in each byte which may be 1 (ONE or DC)
static PC_COUNT_ONES: Lazy<[u8; 256]> = Lazy::new(|| {
    let mut table = [0; 256];
    for (b, count) in table.iter_mut().enumerate() {
        *count = (0..8).step_by(2).filter(|i| bit_of(b, *i)).count() as u8;
    }
    table
});

/// A Boolean function defined by its output on every point of its inputs.
///
/// The outputs are packed in a bit vector backed by bytes, low bits first: the output of the point with index `n`
/// occupies the bits `[n*w, (n+1)*w)` of the buffer, where the width `w` depends on the [Mode].
/// Binary tables use a single bit per point, plane-coded tables use two bits per point to
/// store the four [Output] values.
///
/// Tables are immutable: complement, sum, product and restriction create new tables.
///
/// ```
/// use truthkit::{Mode, Output, TruthTable, Variable};
/// # use truthkit::TruthError;
/// # fn main() -> Result<(), TruthError> {
/// let a = Variable::from(0);
/// let b = Variable::from(1);
///
/// // The OR function: outputs are given in ascending index order, a is the lowest bit
/// let t = TruthTable::new([a, b], [0, 1, 1, 1], Mode::Binary)?.into_table()?;
/// assert_eq!(t.satisfy_count(), 3);
/// assert_eq!(t.decode(2), Output::One);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TruthTable {
    pub(crate) inputs: VarList,
    pub(crate) mode: Mode,
    pub(crate) width: usize,
    pub(crate) mask: u8,
    pub(crate) data: BitVec<u8, Lsb0>,
}

/// Result of operations which can produce a table or a constant.
///
/// A function without input has a single output and no meaningful packed form:
/// it is represented as a scalar [Output].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TableValue {
    /// A constant output
    Scalar(Output),
    /// A function with at least one input
    Table(TruthTable),
}

impl TruthTable {
    /// Build a table from the list of all its outputs.
    ///
    /// The outputs must be given in ascending index order and their number must match
    /// the size of the input space. They are coerced into the output domain of the selected mode:
    /// binary tables reject the don't-care and unresolved values.
    ///
    /// Returns a scalar when the list of inputs is empty.
    pub fn new<O>(
        inputs: impl IntoIterator<Item = Variable>,
        outputs: impl IntoIterator<Item = O>,
        mode: Mode,
    ) -> Result<TableValue, TruthError>
    where
        O: TryInto<Output>,
        TruthError: From<O::Error>,
    {
        let inputs = VarList::new(inputs)?;
        let outputs = outputs
            .into_iter()
            .map(|o| o.try_into().map_err(TruthError::from))
            .collect::<Result<Vec<Output>, TruthError>>()?;
        Self::pack(inputs, outputs, mode)
    }

    /// Build a plane-coded table from the list of all its outputs.
    pub fn plane_coded<O>(
        inputs: impl IntoIterator<Item = Variable>,
        outputs: impl IntoIterator<Item = O>,
    ) -> Result<TableValue, TruthError>
    where
        O: TryInto<Output>,
        TruthError: From<O::Error>,
    {
        Self::new(inputs, outputs, Mode::PlaneCoded)
    }

    /// Build a table by evaluating a function on every point of the inputs, in ascending index order.
    pub fn from_fn<O, F>(inputs: VarList, mode: Mode, mut f: F) -> Result<TableValue, TruthError>
    where
        F: FnMut(&Point) -> O,
        O: TryInto<Output>,
        TruthError: From<O::Error>,
    {
        let cardinality = 1 << inputs.len();
        let outputs = (0..cardinality)
            .map(|n| f(&point_of(n, &inputs)).try_into().map_err(TruthError::from))
            .collect::<Result<Vec<Output>, TruthError>>()?;
        Self::pack(inputs, outputs, mode)
    }

    /// Build the binary table of a rule over its regulators, sorted in natural order.
    pub fn from_rule(rule: &impl Rule) -> Result<TableValue, TruthError> {
        let inputs = VarList::new(&rule.get_regulators())?;
        Self::from_fn(inputs, Mode::Binary, |p| rule.eval(p))
    }

    /// Pack a list of outputs, checking its size and the output domain.
    pub(crate) fn pack(
        inputs: VarList,
        outputs: Vec<Output>,
        mode: Mode,
    ) -> Result<TableValue, TruthError> {
        let expected = 1 << inputs.len();
        if outputs.len() != expected {
            return Err(TruthError::ShapeMismatch {
                expected,
                found: outputs.len(),
            });
        }
        for output in &outputs {
            output.encode(mode)?;
        }
        if inputs.is_empty() {
            return Ok(TableValue::Scalar(outputs[0]));
        }

        debug!("pack({} inputs, {:?})", inputs.len(), mode);
        Ok(TableValue::Table(Self::packed(inputs, mode, outputs)))
    }

    /// Pack outputs given in ascending index order.
    ///
    /// There must be one output per point and binary tables only keep the "may be 1" plane.
    pub(crate) fn packed(
        inputs: VarList,
        mode: Mode,
        outputs: impl IntoIterator<Item = Output>,
    ) -> Self {
        let width = mode.width();
        let mut data = bitvec![u8, Lsb0; 0; (1 << inputs.len()) * width];
        for (n, output) in outputs.into_iter().enumerate() {
            data[n * width..(n + 1) * width].store_le(output.field(mode));
        }
        Self::with_data(inputs, mode, data)
    }

    pub(crate) fn with_data(inputs: VarList, mode: Mode, data: BitVec<u8, Lsb0>) -> Self {
        Self {
            inputs,
            mode,
            width: mode.width(),
            mask: mode.mask(),
            data,
        }
    }

    /// The ordered list of inputs
    pub fn inputs(&self) -> &VarList {
        &self.inputs
    }

    /// The set of inputs
    pub fn support(&self) -> &VarSet {
        self.inputs.as_set()
    }

    /// Number of inputs
    pub fn degree(&self) -> usize {
        self.inputs.len()
    }

    /// Number of points (and outputs) of the table
    pub fn cardinality(&self) -> usize {
        1 << self.inputs.len()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_plane_coded(&self) -> bool {
        self.mode == Mode::PlaneCoded
    }

    /// Number of bits used by each output
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask selecting a single output in the packed data
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// A truth table can not be simplified further
    pub fn reduce(&self) -> &Self {
        self
    }

    /// Get the output of the point with index `n`.
    ///
    /// Panics if `n` is not lower than the cardinality of the table.
    pub fn decode(&self, n: usize) -> Output {
        let field = self.data[n * self.width..(n + 1) * self.width].load_le::<u8>();
        Output::decode(field, self.mode)
    }

    /// Get the output at the given point, which must assign all inputs of the table
    pub fn output_at(&self, point: &Point) -> Result<Output, TruthError> {
        index_of(point, &self.inputs).map(|n| self.decode(n))
    }

    /// Iterate over all outputs in ascending index order
    pub fn outputs(&self) -> impl Iterator<Item = Output> + '_ {
        (0..self.cardinality()).map(move |n| self.decode(n))
    }

    /// Iterate over the points whose output may be 1 (1 in binary mode, ONE or DC in plane-coded mode)
    pub fn iter_ones(&self) -> Points<'_> {
        Points::new(self, Output::may_be_one)
    }

    /// Iterate over the points whose output may be 0 (0 in binary mode, ZERO or DC in plane-coded mode)
    pub fn iter_zeros(&self) -> Points<'_> {
        Points::new(self, Output::may_be_zero)
    }

    /// The first satisfying point in ascending index order, if any
    pub fn satisfy_one(&self) -> Option<Point> {
        self.iter_ones().next()
    }

    /// All satisfying points, in ascending index order
    pub fn satisfy_all(&self) -> Points<'_> {
        self.iter_ones()
    }

    /// Count the satisfying points, one byte of packed outputs at a time
    pub fn satisfy_count(&self) -> usize {
        let lookup = match self.mode {
            Mode::Binary => &COUNT_ONES,
            Mode::PlaneCoded => &PC_COUNT_ONES,
        };
        self.data
            .chunks(8)
            .map(|byte| lookup[byte.load_le::<u8>() as usize] as usize)
            .sum()
    }

    /// Pick a satisfying point with a uniform distribution
    pub fn satisfy_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Point> {
        match self.satisfy_count() {
            0 => None,
            count => self.iter_ones().nth(rng.gen_range(0..count)),
        }
    }
}

impl Rule for TruthTable {
    /// List the inputs from the most significant one, then the output of each point.
    fn fmt_with(&self, f: &mut dyn efmt::ExprFormatter) -> fmt::Result {
        write!(f, "inputs:")?;
        for v in self.inputs.iter().rev() {
            write!(f, " ")?;
            f.write_variable(*v, true)?;
        }
        writeln!(f)?;
        let degree = self.degree();
        for (n, output) in self.outputs().enumerate() {
            writeln!(f, "{:0width$b} {}", n, output, width = degree)?;
        }
        Ok(())
    }

    /// Unassigned inputs are considered false. Don't care outputs evaluate to true.
    fn eval(&self, point: &Point) -> bool {
        let n = self
            .inputs
            .iter()
            .enumerate()
            .filter(|(_, v)| point.value(**v) == Some(true))
            .fold(0, |n, (i, _)| n | (1 << i));
        self.decode(n).may_be_one()
    }

    fn collect_regulators(&self, regulators: &mut VarSet) {
        regulators.union_with(self.support());
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_rule(f)
    }
}

/// Iterate over the points of a table whose output satisfies a filter.
///
/// Points are enumerated in ascending index order. A new iterator restarts the enumeration.
pub struct Points<'a> {
    table: &'a TruthTable,
    next: usize,
    filter: fn(Output) -> bool,
}

impl<'a> Points<'a> {
    fn new(table: &'a TruthTable, filter: fn(Output) -> bool) -> Self {
        Self {
            table,
            next: 0,
            filter,
        }
    }
}

impl Iterator for Points<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while self.next < self.table.cardinality() {
            let n = self.next;
            self.next += 1;
            if (self.filter)(self.table.decode(n)) {
                return Some(point_of(n, &self.table.inputs));
            }
        }
        None
    }
}

impl TableValue {
    /// The constant value, if this is not a table
    pub fn scalar(&self) -> Option<Output> {
        match self {
            TableValue::Scalar(o) => Some(*o),
            TableValue::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&TruthTable> {
        match self {
            TableValue::Scalar(_) => None,
            TableValue::Table(t) => Some(t),
        }
    }

    /// Extract the table, fails with an unsupported operation for scalars
    pub fn into_table(self) -> Result<TruthTable, TruthError> {
        match self {
            TableValue::Scalar(_) => Err(TruthError::UnsupportedOperation("scalar to table")),
            TableValue::Table(t) => Ok(t),
        }
    }

    /// The output at a point assigning all inputs
    pub fn output_at(&self, point: &Point) -> Result<Output, TruthError> {
        match self {
            TableValue::Scalar(o) => Ok(*o),
            TableValue::Table(t) => t.output_at(point),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            TableValue::Scalar(Output::Zero | Output::One) => Mode::Binary,
            TableValue::Scalar(_) => Mode::PlaneCoded,
            TableValue::Table(t) => t.mode,
        }
    }

    /// The ordered list of inputs, empty for scalars
    pub fn inputs(&self) -> VarList {
        match self {
            TableValue::Scalar(_) => VarList::default(),
            TableValue::Table(t) => t.inputs.clone(),
        }
    }
}

impl From<TruthTable> for TableValue {
    fn from(t: TruthTable) -> Self {
        TableValue::Table(t)
    }
}

impl From<Output> for TableValue {
    fn from(o: Output) -> Self {
        TableValue::Scalar(o)
    }
}

impl From<bool> for TableValue {
    fn from(b: bool) -> Self {
        TableValue::Scalar(b.into())
    }
}

impl fmt::Display for TableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableValue::Scalar(o) => write!(f, "{}", o),
            TableValue::Table(t) => write!(f, "{}", t),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::VariableParser;
    use crate::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_log::test;

    fn vars(n: usize) -> Vec<Variable> {
        (0..n).map(Variable::from).collect()
    }

    #[test]
    fn or_scenario() -> Result<(), TruthError> {
        let a = Variable::from(0);
        let b = Variable::from(1);
        let t = TruthTable::new([a, b], [0, 1, 1, 1], Mode::Binary)?.into_table()?;

        assert_eq!(t.degree(), 2);
        assert_eq!(t.cardinality(), 4);
        assert_eq!(t.satisfy_count(), 3);
        assert_eq!(t.satisfy_one(), Some("10".parse()?));

        let ones: Vec<Point> = t.satisfy_all().collect();
        assert_eq!(ones, vec!["10".parse()?, "01".parse()?, "11".parse()?]);
        let zeros: Vec<Point> = t.iter_zeros().collect();
        assert_eq!(zeros, vec!["00".parse()?]);
        Ok(())
    }

    #[test]
    fn plane_coded_scenario() -> Result<(), TruthError> {
        let v = Variable::from(0);
        let t = TruthTable::plane_coded([v], [Output::Zero, Output::DontCare])?.into_table()?;

        assert!(t.is_plane_coded());
        assert_eq!(t.width(), 2);
        assert_eq!(t.mask(), 0b11);
        assert_eq!(t.satisfy_count(), 1);
        assert_eq!(t.iter_ones().collect::<Vec<_>>(), vec!["1".parse()?]);
        assert_eq!(t.iter_zeros().count(), 2);
        Ok(())
    }

    #[test]
    fn decode_round_trip() -> Result<(), TruthError> {
        let inputs = VarList::new([Variable::from(4), Variable::from(2), Variable::from(9)])?;
        let outputs = ['1', '-', '0', '?', '0', '0', '1', '-'];
        let t = TruthTable::plane_coded(inputs.iter().copied(), outputs)?.into_table()?;

        for n in 0..t.cardinality() {
            let point = codec::point_of(n, &inputs);
            assert_eq!(t.output_at(&point)?, Output::try_from(outputs[n])?);
        }
        assert_eq!(t.satisfy_count(), 4);
        Ok(())
    }

    #[test]
    fn shape_mismatch() {
        let err = TruthTable::new(vars(3), [0, 1, 1, 0], Mode::Binary).unwrap_err();
        assert_eq!(
            err,
            TruthError::ShapeMismatch {
                expected: 8,
                found: 4
            }
        );
    }

    #[test]
    fn invalid_outputs() {
        assert!(TruthTable::new(vars(1), ['0', '-'], Mode::Binary).is_err());
        assert!(TruthTable::new(vars(1), [0, 2], Mode::Binary).is_err());
        assert!(TruthTable::new(vars(1), ['0', '-'], Mode::PlaneCoded).is_ok());
    }

    #[test]
    fn scalar_without_inputs() -> Result<(), TruthError> {
        let v = TruthTable::new(vars(0), [true], Mode::Binary)?;
        assert_eq!(v, TableValue::Scalar(Output::One));
        assert!(TruthTable::new(vars(0), [true, false], Mode::Binary).is_err());
        Ok(())
    }

    #[test]
    fn large_count() -> Result<(), TruthError> {
        // Parity function on 5 variables
        let inputs = VarList::new(vars(5))?;
        let t = TruthTable::from_fn(inputs.clone(), Mode::Binary, |p| {
            p.positive().len() % 2 == 1
        })?
        .into_table()?;
        assert_eq!(t.satisfy_count(), 16);
        assert_eq!(t.iter_ones().count(), 16);

        let t = TruthTable::from_fn(inputs, Mode::PlaneCoded, |p| match p.positive().len() {
            0 => Output::Void,
            1 => Output::DontCare,
            2 => Output::Zero,
            _ => Output::One,
        })?
        .into_table()?;
        // 5 points with one active variable, 16 with at least three
        assert_eq!(t.satisfy_count(), 21);
        assert_eq!(t.iter_zeros().count(), 15);
        Ok(())
    }

    #[test]
    fn random_satisfying_point() -> Result<(), TruthError> {
        let inputs = VarList::new(vars(4))?;
        let t = TruthTable::from_fn(inputs, Mode::Binary, |p| p.positive().len() == 2)?
            .into_table()?;
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let p = t.satisfy_random(&mut rng).unwrap();
            assert_eq!(t.output_at(&p)?, Output::One);
        }

        let never = TruthTable::new(vars(2), [0, 0, 0, 0], Mode::Binary)?.into_table()?;
        assert_eq!(never.satisfy_random(&mut rng), None);
        assert_eq!(never.satisfy_one(), None);
        Ok(())
    }

    #[test]
    fn display() -> Result<(), TruthError> {
        let t = TruthTable::plane_coded(vars(2), ['0', '1', '-', '?'])?.into_table()?;
        assert_eq!(
            format!("{}", t),
            "inputs: _1_ _0_\n00 0\n01 1\n10 -\n11 ?\n"
        );

        let mut space = VarSpace::default();
        let a = space.provide("a")?;
        let b = space.provide("b")?;
        let t = TruthTable::new([a, b], [0, 1, 1, 1], Mode::Binary)?.into_table()?;
        assert_eq!(
            format!("{}", space.named(&t)),
            "inputs: b a\n00 0\n01 1\n10 1\n11 1\n"
        );
        Ok(())
    }

    #[test]
    fn from_expression() -> Result<(), TruthError> {
        let mut space = VarSpace::default();
        let e = space.extend().parse_expression("a & !b | c")?;
        let t = TruthTable::from_rule(&e)?.into_table()?;
        assert_eq!(t.degree(), 3);
        for n in 0..t.cardinality() {
            let point = codec::point_of(n, t.inputs());
            assert_eq!(t.decode(n), Output::from(e.eval(&point)));
        }
        Ok(())
    }
}
