//! Boolean functions stored as packed truth tables.
//!
//! [Boolean variables](Variable) are identified by an integer UID. A [truth table](TruthTable) over an ordered
//! [list of inputs](VarList) stores the output of the function on each of the `2^k` [points](Point) of its inputs.
//! The `i`-th input is the bit `i` of the index of a point, and the outputs are packed in ascending index order.
//!
//! ```
//! use truthkit::{Mode, Output, Point, TruthTable, Variable};
//! # use truthkit::TruthError;
//! # fn main() -> Result<(), TruthError> {
//!
//! // Create some variables
//! let a = Variable::from(0);
//! let b = Variable::from(1);
//!
//! // The OR function, a is the least significant bit of the index
//! let t = TruthTable::new([a, b], [0, 1, 1, 1], Mode::Binary)?.into_table()?;
//! assert_eq!(t.cardinality(), 4);
//! assert_eq!(t.satisfy_count(), 3);
//!
//! let point: Point = "01".parse()?;
//! assert_eq!(t.output_at(&point)?, Output::One);
//! # Ok(())
//! # }
//! ```
//!
//! # Output values
//!
//! Binary tables store a single bit per point. *Plane-coded* tables use two bits per point to
//! store four [output values](Output): besides 0 and 1, an output can be a don't-care (both values are acceptable)
//! or unresolved (no value is acceptable). The two bits are the planes of the value: "may be 1" and "may be 0".
//! Queries enumerating the points where a function is satisfied consider don't-care outputs as satisfied.
//!
//! ```
//! use truthkit::{Output, TruthTable, Variable};
//! # use truthkit::TruthError;
//! # fn main() -> Result<(), TruthError> {
//!
//! let v = Variable::from(0);
//! let t = TruthTable::plane_coded([v], "0-".chars())?.into_table()?;
//! assert_eq!(t.decode(1), Output::DontCare);
//! assert_eq!(t.satisfy_count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Algebra and cofactors
//!
//! Tables can be complemented (`-`), summed (`+`, disjunction), multiplied (`*`, conjunction) and subtracted
//! (`a - b` is `a + (-b)`). Operands with different inputs are extended to the sorted union of their inputs.
//! Constants can be used on both sides of an operation. Operations which can produce a constant function return a
//! [TableValue].
//!
//! ```
//! use truthkit::{Mode, Point, TableValue, TruthTable, Variable};
//! # use truthkit::TruthError;
//! # fn main() -> Result<(), TruthError> {
//!
//! let a = TruthTable::new([Variable::from(0)], [0, 1], Mode::Binary)?;
//! let b = TruthTable::new([Variable::from(1)], [0, 1], Mode::Binary)?;
//!
//! // De Morgan
//! assert_eq!(-(&a + &b), (-&a) * (-&b));
//!
//! // Restrict to a partial assignment
//! let point: Point = "-1".parse()?;
//! assert_eq!((&a * &b).restrict(&point), a);
//! let point: Point = "01".parse()?;
//! assert_eq!((&a + &b).restrict(&point), TableValue::from(true));
//! # Ok(())
//! # }
//! ```
//!
//! # Canonical forms and named variables
//!
//! A [collection of variables](VarSpace) associates human-readable names to variables. It is used to parse
//! [expressions](Expr) and to display rules. Any [rule](Rule) can be enumerated into a table, and a table
//! can be converted into its canonical disjunctive or conjunctive normal form.
//!
//! ```
//! use truthkit::{parse::VariableParser, TruthTable, VarSpace};
//! # use truthkit::TruthError;
//! # fn main() -> Result<(), TruthError> {
//!
//! let mut variables = VarSpace::default();
//! let expr = variables.extend().parse_expression("A & (B | !C)")?;
//!
//! let table = TruthTable::from_rule(&expr)?.into_table()?;
//! assert_eq!(table.satisfy_count(), 3);
//!
//! let cnf = table.to_expr(true);
//! println!("{}", variables.named(&table));
//! println!("{}", variables.named(&cnf));
//! # Ok(())
//! # }
//! ```

mod algebra;
mod canon;
pub mod codec;
pub mod efmt;
mod error;
mod expr;
mod function;
mod output;
pub mod parse;
mod point;
mod restrict;
mod rules;
mod space;
mod table;
mod variable;

#[macro_use]
extern crate pest_derive;

// Export public structures and API
pub use canon::{to_expression, ExprBuilder, TermBuilder};
pub use error::TruthError;
pub use expr::{Expr, ExprNode, Operator};
pub use function::BooleanFunction;
pub use output::{Mode, Output};
pub use point::Point;
pub use rules::Rule;
pub use space::{ExtendingParser, VarSpace};
pub use table::{Points, TableValue, TruthTable};
pub use variable::{VarList, VarSet, Variable};
