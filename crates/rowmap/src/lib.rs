//! Map relational rows to dynamic records and back.
//!
//! A [`Db`] reads the storage catalog into [`Table`]s. Tables hand out
//! lazily executed [`ResultStream`]s of [`Record`]s, and resolve the
//! [`Relation`]s registered on them as record fields on first access.
//!
//! ```no_run
//! # fn main() -> rowmap::Result<()> {
//! use rowmap::{Db, Expr};
//!
//! let db = Db::connect("sqlite::memory:")?;
//! let person = db.table("person")?;
//! person.relate_one("manager", "manager_id", &person, "id")?;
//!
//! let mut bob = person
//!     .get_one(Expr::matching([("name", "Bob")])?)?
//!     .expect("Bob is in the table");
//! let manager = bob.get("manager")?;
//! # let _ = manager;
//! # Ok(())
//! # }
//! ```

pub mod db;
pub use db::Db;

mod engine;

mod field;
pub use field::Field;

mod record;
pub use record::Record;

pub mod relation;
pub use relation::Relation;

mod stream;
pub use stream::{Iter, ResultStream};

mod table;
pub use table::Table;

pub use rowmap_core::{
    bail,
    driver::{self, Capability, Driver},
    err,
    stmt::{Column, Expr, OrderBy, Value},
    Error, Result,
};
