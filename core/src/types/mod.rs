//! SQL data type markers for compile-time type safety.
//!
//! Zero-sized markers represent SQL data types at the Rust type level so
//! that comparing, for example, an integer column with a text value is a
//! compile error rather than a runtime surprise.
//!
//! ```text
//! DataType (base trait)
//! ├── Numeric (Int, BigInt, Double)
//! ├── Textual (Text)
//! └── Bool
//! ```

mod private {
    pub trait Sealed {}
}

/// Represents a SQL data type at the type level.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a recognized SQL data type",
    label = "use a SQL type marker (Int, BigInt, Double, Text, Bool)"
)]
pub trait DataType: private::Sealed + Copy + Default + 'static {}

/// Numeric SQL types usable with SUM, AVG and arithmetic comparisons.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a numeric SQL type",
    label = "expected Int, BigInt, or Double"
)]
pub trait Numeric: DataType {}

/// String SQL types usable with LIKE.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a text SQL type",
    label = "expected Text"
)]
pub trait Textual: DataType {}

/// SQL INTEGER type marker (32-bit signed integer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Int;

/// SQL INTEGER type marker for 64-bit values (row ids, counts).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BigInt;

/// SQL REAL type marker (64-bit floating point).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Double;

/// SQL TEXT type marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Text;

/// SQL boolean type marker (predicates).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bool;

impl private::Sealed for Int {}
impl private::Sealed for BigInt {}
impl private::Sealed for Double {}
impl private::Sealed for Text {}
impl private::Sealed for Bool {}

impl DataType for Int {}
impl DataType for BigInt {}
impl DataType for Double {}
impl DataType for Text {}
impl DataType for Bool {}

impl Numeric for Int {}
impl Numeric for BigInt {}
impl Numeric for Double {}

impl Textual for Text {}

/// Types that can be compared with each other in SQL.
///
/// ```ignore
/// fn requires_compatible<L: Compatible<R>, R: DataType>() {}
/// requires_compatible::<Int, BigInt>(); // OK
/// // requires_compatible::<Int, Text>(); // Compile error
/// ```
#[diagnostic::on_unimplemented(
    message = "cannot compare `{Self}` with `{Rhs}`",
    label = "these SQL types are not compatible"
)]
pub trait Compatible<Rhs: DataType = Self>: DataType {}

impl<T: DataType> Compatible<T> for T {}

// Integer family
impl Compatible<BigInt> for Int {}
impl Compatible<Int> for BigInt {}

// Integer and floating point compare numerically
impl Compatible<Double> for Int {}
impl Compatible<Double> for BigInt {}
impl Compatible<Int> for Double {}
impl Compatible<BigInt> for Double {}
