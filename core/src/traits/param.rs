/// A marker trait for types that can be used as SQL parameters.
///
/// This trait is used as a bound on the parameter type in SQL fragments.
/// Each dialect crate provides one value type implementing it.
pub trait SQLParam: Clone + core::fmt::Debug {}
