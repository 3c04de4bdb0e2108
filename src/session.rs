use std::any::Any;
use std::cell::RefCell;

use hashbrown::HashMap;
use querycraft_core::{Result, eq, querycraft_trace_session};
use rusqlite::Connection;

use crate::domain::{QMember, QTeam};
use crate::entity::Entity;
use crate::factory::QueryFactory;

/// A unit of work over an externally owned connection.
///
/// The session keeps a first-level cache of the entities it persisted or
/// loaded by id, so repeated [`Session::find`] calls for the same row do not
/// hit the store. It never opens, pools or closes connections.
///
/// ```no_run
/// use querycraft::prelude::*;
///
/// # fn main() -> querycraft::Result<()> {
/// let conn = rusqlite::Connection::open_in_memory()?;
/// let session = Session::new(&conn);
/// session.create_schema()?;
///
/// let mut team = Team::new("teamA");
/// session.persist(&mut team)?;
/// let mut member = Member::new("member1", 10, Some(&team));
/// session.persist(&mut member)?;
/// # Ok(())
/// # }
/// ```
pub struct Session<'c> {
    conn: &'c Connection,
    cache: RefCell<HashMap<(&'static str, i64), Box<dyn Any>>>,
}

impl<'c> Session<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn connection(&self) -> &'c Connection {
        self.conn
    }

    /// Query factory bound to this session.
    pub fn query(&self) -> QueryFactory<'_> {
        QueryFactory::new(self)
    }

    /// Creates the `team` and `member` tables if they do not exist.
    pub fn create_schema(&self) -> Result<()> {
        for ddl in [QTeam::create_table_sql(), QMember::create_table_sql()] {
            self.conn.execute(&ddl, [])?;
        }
        Ok(())
    }

    /// Inserts `entity` and assigns its generated identity.
    ///
    /// An entity that already has an identity is left untouched.
    pub fn persist<E: Entity>(&self, entity: &mut E) -> Result<i64> {
        if let Some(id) = entity.id() {
            return Ok(id);
        }

        let id = entity
            .insert(E::Table::default())?
            .execute_returning_id(self.conn)?;
        entity.assign_id(id);
        querycraft_trace_session!("persist", E::NAME, id);

        self.cache
            .borrow_mut()
            .insert((E::NAME, id), Box::new(entity.clone()));
        Ok(id)
    }

    /// Loads an entity by identity, consulting the first-level cache first.
    pub fn find<E: Entity>(&self, id: i64) -> Result<Option<E>> {
        if let Some(cached) = self.cached::<E>(id) {
            return Ok(Some(cached));
        }

        let table = E::Table::default();
        let found: Option<E> = self
            .query()
            .select_from(table)
            .r#where(eq(E::id_column(&table), id))
            .fetch_one()?;

        if let Some(entity) = &found {
            querycraft_trace_session!("load", E::NAME, id);
            self.cache
                .borrow_mut()
                .insert((E::NAME, id), Box::new(entity.clone()));
        }
        Ok(found)
    }

    /// Whether the first-level cache holds the entity with this identity.
    pub fn contains<E: Entity>(&self, id: i64) -> bool {
        self.cache.borrow().contains_key(&(E::NAME, id))
    }

    /// Empties the first-level cache. Entities handed out earlier stay valid.
    pub fn clear(&self) {
        querycraft_trace_session!("clear", "all");
        self.cache.borrow_mut().clear();
    }

    fn cached<E: Entity>(&self, id: i64) -> Option<E> {
        self.cache
            .borrow()
            .get(&(E::NAME, id))
            .and_then(|entity| entity.downcast_ref::<E>())
            .cloned()
    }
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cached", &self.cache.borrow().len())
            .finish_non_exhaustive()
    }
}
