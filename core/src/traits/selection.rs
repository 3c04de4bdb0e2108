//! Select-list and FROM-list composition.

use crate::{
    sql::{SQL, Token},
    traits::SQLParam,
};

/// Something that can appear in a select list.
///
/// A selection expands to one SQL fragment per result column. Whole tables
/// expand to all of their qualified columns; tuples concatenate the
/// expansion of each element in order.
pub trait Selection<'a, V: SQLParam> {
    fn columns(&self) -> Vec<SQL<'a, V>>;

    /// Number of result columns this selection produces.
    fn width(&self) -> usize {
        self.columns().len()
    }
}

/// Something that can appear in a FROM clause: a table instance or a tuple
/// of table instances (a theta join, filtered in WHERE).
pub trait FromSource<'a, V: SQLParam> {
    fn from_sql(&self) -> SQL<'a, V>;
}

impl<'a, V: SQLParam + 'a> Selection<'a, V> for SQL<'a, V> {
    fn columns(&self) -> Vec<SQL<'a, V>> {
        vec![self.clone()]
    }

    fn width(&self) -> usize {
        1
    }
}

macro_rules! impl_selection_for_tuple {
    ($($T:ident),+) => {
        impl<'a, V, $($T),+> Selection<'a, V> for ($($T,)+)
        where
            V: SQLParam + 'a,
            $($T: Selection<'a, V>,)+
        {
            #[allow(non_snake_case)]
            fn columns(&self) -> Vec<SQL<'a, V>> {
                let ($($T,)+) = self;
                let mut columns = Vec::new();
                $(columns.extend($T.columns());)+
                columns
            }

            #[allow(non_snake_case)]
            fn width(&self) -> usize {
                let ($($T,)+) = self;
                0 $(+ $T.width())+
            }
        }

        impl<'a, V, $($T),+> FromSource<'a, V> for ($($T,)+)
        where
            V: SQLParam + 'a,
            $($T: FromSource<'a, V>,)+
        {
            #[allow(non_snake_case)]
            fn from_sql(&self) -> SQL<'a, V> {
                let ($($T,)+) = self;
                SQL::join([$($T.from_sql()),+], Token::COMMA)
            }
        }
    };
}

impl_selection_for_tuple!(A, B);
impl_selection_for_tuple!(A, B, C);
impl_selection_for_tuple!(A, B, C, D);
impl_selection_for_tuple!(A, B, C, D, E);
impl_selection_for_tuple!(A, B, C, D, E, F);
impl_selection_for_tuple!(A, B, C, D, E, F, G);
impl_selection_for_tuple!(A, B, C, D, E, F, G, H);
