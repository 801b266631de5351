//! Host drawing interface
//!
//! The annotation pipeline never touches a concrete drawing type. It works
//! against [`DrawingDatabase`] (find, create, read and write records) and
//! [`Transactional`] (all-or-nothing commit), so any host that can provide
//! those capabilities can be annotated.

use thiserror::Error;

use crate::core::identity::Handle;
use crate::entities::{DrawingEntity, LayerRecord, Table};

/// Record-level access to a drawing
pub trait DrawingDatabase {
    /// Look up a layer by exact name
    fn find_layer(&self, name: &str) -> Option<Handle>;

    /// Register a new layer record; fails if the name is taken
    fn add_layer(&mut self, layer: LayerRecord) -> Result<Handle, DrawingError>;

    /// Handles of every model space entity, in drawing order
    fn handles(&self) -> Vec<Handle>;

    /// Read an entity by handle
    fn entity(&self, handle: &Handle) -> Option<&DrawingEntity>;

    /// Append an entity to model space
    fn append_entity(&mut self, entity: DrawingEntity) -> Result<Handle, DrawingError>;

    /// The report table registered for a layer, if any
    fn table_on_layer(&self, layer: &str) -> Option<Handle>;

    /// Append a row to a table and return the new row's index
    fn append_table_row(
        &mut self,
        table: &Handle,
        height: f64,
        cells: Vec<String>,
    ) -> Result<usize, DrawingError>;

    /// Read a table entity by handle
    fn table(&self, handle: &Handle) -> Option<&Table> {
        self.entity(handle).and_then(DrawingEntity::as_table)
    }
}

/// All-or-nothing edit scope over a drawing
pub trait Transactional {
    /// Open a transaction; nested transactions are not supported
    fn begin(&mut self) -> Result<(), DrawingError>;

    /// Keep every edit made since `begin`
    fn commit(&mut self) -> Result<(), DrawingError>;

    /// Discard every edit made since `begin`
    fn rollback(&mut self);
}

/// Run `f` inside a transaction, committing on success and rolling back on error
pub fn run_in_transaction<D, T, E, F>(db: &mut D, f: F) -> Result<T, E>
where
    D: Transactional + ?Sized,
    E: From<DrawingError>,
    F: FnOnce(&mut D) -> Result<T, E>,
{
    db.begin()?;
    match f(db) {
        Ok(value) => match db.commit() {
            Ok(()) => Ok(value),
            Err(e) => {
                db.rollback();
                Err(e.into())
            }
        },
        Err(e) => {
            db.rollback();
            Err(e)
        }
    }
}

/// Errors raised by a drawing host
#[derive(Debug, Error)]
pub enum DrawingError {
    #[error("layer '{0}' already exists")]
    LayerExists(String),

    #[error("layer '{0}' does not exist")]
    UnknownLayer(String),

    #[error("handle {0} is already in use")]
    DuplicateHandle(Handle),

    #[error("no entity with handle {0}")]
    NotFound(Handle),

    #[error("entity {0} is not a table")]
    NotATable(Handle),

    #[error("a transaction is already open")]
    TransactionActive,

    #[error("no transaction is open")]
    NoTransaction,

    #[error("drawing host rejected the edit: {0}")]
    Rejected(String),
}
