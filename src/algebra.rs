//! Complement, sum, product and subtraction of truth tables.
//!
//! Operands of a binary operation can use different inputs: both are evaluated on the sorted union
//! of their inputs, each one reading the projection of the combined point on its own inputs.
//! Constant operands (`bool`, [Output] or scalar [TableValue]) are accepted on both sides.
//! Definite constants short-circuit the operation, while don't-care and unresolved constants
//! are broadcast to every point.
//!
//! ```
//! use truthkit::{Mode, TableValue, TruthTable, Variable};
//! # use truthkit::TruthError;
//! # fn main() -> Result<(), TruthError> {
//! let a = TruthTable::new([Variable::from(0)], [0, 1], Mode::Binary)?;
//! let b = TruthTable::new([Variable::from(1)], [0, 1], Mode::Binary)?;
//!
//! let or = &a + &b;
//! assert_eq!(or.inputs().len(), 2);
//! assert_eq!(&or * true, or);
//! assert_eq!(&or + true, TableValue::from(true));
//! # Ok(())
//! # }
//! ```

use crate::codec::bit_of;
use crate::*;

use log::debug;
use std::ops::{Add, Mul, Neg, Sub};

impl TruthTable {
    /// The complement of this table: exchange 0 and 1, keep don't-care and unresolved outputs
    pub fn complement(&self) -> TruthTable {
        let data = match self.mode {
            Mode::Binary => !self.data.clone(),
            Mode::PlaneCoded => {
                // Exchange the two planes of each field
                let mut data = self.data.clone();
                for b in data.as_raw_mut_slice() {
                    *b = ((*b & 0x55) << 1) | ((*b & 0xAA) >> 1);
                }
                data
            }
        };
        Self::with_data(self.inputs.clone(), self.mode, data)
    }
}

impl TableValue {
    /// The complement of this function
    pub fn complement(&self) -> TableValue {
        match self {
            TableValue::Scalar(o) => TableValue::Scalar(!*o),
            TableValue::Table(t) => TableValue::Table(t.complement()),
        }
    }

    /// The disjunction of two functions
    pub fn sum(&self, other: &TableValue) -> TableValue {
        match (self, other) {
            (TableValue::Scalar(Output::Zero), x) | (x, TableValue::Scalar(Output::Zero)) => x.clone(),
            (TableValue::Scalar(Output::One), _) | (_, TableValue::Scalar(Output::One)) => {
                TableValue::Scalar(Output::One)
            }
            _ => combine(self, other, Operator::Or),
        }
    }

    /// The conjunction of two functions
    pub fn product(&self, other: &TableValue) -> TableValue {
        match (self, other) {
            (TableValue::Scalar(Output::Zero), _) | (_, TableValue::Scalar(Output::Zero)) => {
                TableValue::Scalar(Output::Zero)
            }
            (TableValue::Scalar(Output::One), x) | (x, TableValue::Scalar(Output::One)) => x.clone(),
            _ => combine(self, other, Operator::And),
        }
    }

    /// The sum of this function with the complement of the other one
    pub fn difference(&self, other: &TableValue) -> TableValue {
        match other {
            TableValue::Scalar(Output::Zero) => TableValue::Scalar(Output::One),
            TableValue::Scalar(Output::One) => self.clone(),
            _ => self.sum(&other.complement()),
        }
    }
}

/// Position of each input of an operand in the combined inputs
fn projection(inputs: &VarList, combined: &VarList) -> Vec<usize> {
    inputs.iter().filter_map(|v| combined.position(*v)).collect()
}

/// Index of the projection of the combined point `n`
fn project(n: usize, positions: &[usize]) -> usize {
    positions
        .iter()
        .enumerate()
        .fold(0, |m, (i, p)| m | ((bit_of(n, *p) as usize) << i))
}

fn output_of(value: &TableValue, n: usize) -> Output {
    match value {
        TableValue::Scalar(o) => *o,
        TableValue::Table(t) => t.decode(n),
    }
}

/// Combine both operands bytewise when they share their inputs and mode
fn combine_packed(a: &TruthTable, b: &TruthTable, op: Operator) -> TruthTable {
    let mut data = a.data.clone();
    match (a.mode, op) {
        (Mode::Binary, Operator::Or) => data |= b.data.as_bitslice(),
        (Mode::Binary, Operator::And) => data &= b.data.as_bitslice(),
        (Mode::PlaneCoded, _) => {
            for (x, y) in data.as_raw_mut_slice().iter_mut().zip(b.data.as_raw_slice()) {
                *x = match op {
                    Operator::Or => ((*x | y) & 0x55) | ((*x & y) & 0xAA),
                    Operator::And => ((*x & y) & 0x55) | ((*x | y) & 0xAA),
                };
            }
        }
    }
    TruthTable::with_data(a.inputs.clone(), a.mode, data)
}

/// Pointwise combination over the sorted union of the inputs, at least one operand is a table
fn combine(a: &TableValue, b: &TableValue, op: Operator) -> TableValue {
    if let (TableValue::Table(ta), TableValue::Table(tb)) = (a, b) {
        if ta.inputs == tb.inputs && ta.mode == tb.mode && ta.inputs.is_sorted() {
            debug!("{:?}({} inputs, {:?}) packed", op, ta.degree(), ta.mode);
            return TableValue::Table(combine_packed(ta, tb, op));
        }
    }

    let a_inputs = a.inputs();
    let b_inputs = b.inputs();
    let inputs = a_inputs.sorted_union(&b_inputs);
    let mode = a.mode().join(b.mode());
    let pa = projection(&a_inputs, &inputs);
    let pb = projection(&b_inputs, &inputs);
    debug!(
        "{:?}([{}], [{}]) -> [{}] {:?}",
        op, a_inputs, b_inputs, inputs, mode
    );

    let f: fn(Output, Output) -> Output = match op {
        Operator::Or => |x, y| x | y,
        Operator::And => |x, y| x & y,
    };
    let outputs = (0..1 << inputs.len())
        .map(|n| f(output_of(a, project(n, &pa)), output_of(b, project(n, &pb))))
        .collect::<Vec<_>>();

    match inputs.is_empty() {
        true => TableValue::Scalar(outputs[0]),
        false => TableValue::Table(TruthTable::packed(inputs, mode, outputs)),
    }
}

/* ************************************************************************************* */
/* ******************************   Operator overloading  ****************************** */
/* ************************************************************************************* */

impl From<&TruthTable> for TableValue {
    fn from(t: &TruthTable) -> Self {
        TableValue::Table(t.clone())
    }
}

impl From<&TableValue> for TableValue {
    fn from(v: &TableValue) -> Self {
        v.clone()
    }
}

impl Neg for TruthTable {
    type Output = TruthTable;
    fn neg(self) -> TruthTable {
        self.complement()
    }
}

impl Neg for &TruthTable {
    type Output = TruthTable;
    fn neg(self) -> TruthTable {
        self.complement()
    }
}

impl Neg for TableValue {
    type Output = TableValue;
    fn neg(self) -> TableValue {
        self.complement()
    }
}

impl Neg for &TableValue {
    type Output = TableValue;
    fn neg(self) -> TableValue {
        self.complement()
    }
}

macro_rules! impl_table_ops {
    ($($lhs:ty),+) => {$(
        impl<T: Into<TableValue>> Add<T> for $lhs {
            type Output = TableValue;
            fn add(self, rhs: T) -> TableValue {
                TableValue::from(self).sum(&rhs.into())
            }
        }

        impl<T: Into<TableValue>> Mul<T> for $lhs {
            type Output = TableValue;
            fn mul(self, rhs: T) -> TableValue {
                TableValue::from(self).product(&rhs.into())
            }
        }

        impl<T: Into<TableValue>> Sub<T> for $lhs {
            type Output = TableValue;
            fn sub(self, rhs: T) -> TableValue {
                TableValue::from(self).difference(&rhs.into())
            }
        }
    )+};
}

impl_table_ops!(TruthTable, &TruthTable, TableValue, &TableValue);

// Constants on the left side
macro_rules! impl_constant_ops {
    ($cst:ty => $($rhs:ty),+) => {$(
        impl Add<$rhs> for $cst {
            type Output = TableValue;
            fn add(self, rhs: $rhs) -> TableValue {
                TableValue::from(self).sum(&rhs.into())
            }
        }

        impl Mul<$rhs> for $cst {
            type Output = TableValue;
            fn mul(self, rhs: $rhs) -> TableValue {
                TableValue::from(self).product(&rhs.into())
            }
        }

        impl Sub<$rhs> for $cst {
            type Output = TableValue;
            fn sub(self, rhs: $rhs) -> TableValue {
                TableValue::from(self).difference(&rhs.into())
            }
        }
    )+};
}

impl_constant_ops!(bool => TruthTable, &TruthTable, TableValue, &TableValue);
impl_constant_ops!(Output => TruthTable, &TruthTable, TableValue, &TableValue);
