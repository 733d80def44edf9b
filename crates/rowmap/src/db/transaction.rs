use super::Db;
use crate::Result;

use log::{trace, warn};
use rowmap_sql::stmt::Transaction as TransactionOp;

use std::ops::Deref;

/// An open transaction on a [`Db`].
///
/// Dropping the guard without calling [`commit`](Transaction::commit) or
/// [`rollback`](Transaction::rollback) rolls the transaction back.
#[derive(Debug)]
pub struct Transaction<'a> {
    db: &'a Db,

    /// Set once the transaction was committed or rolled back.
    finished: bool,
}

impl Transaction<'_> {
    /// Commits the transaction. When COMMIT fails, the guard still rolls
    /// back as it is dropped.
    pub fn commit(mut self) -> Result<()> {
        trace!("commit transaction");
        self.db.engine().transaction(TransactionOp::Commit)?;
        self.finished = true;
        Ok(())
    }

    pub fn rollback(mut self) -> Result<()> {
        self.finished = true;
        trace!("rollback transaction");
        self.db.engine().transaction(TransactionOp::Rollback)
    }
}

impl Deref for Transaction<'_> {
    type Target = Db;

    fn deref(&self) -> &Db {
        self.db
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        trace!("rollback dropped transaction");
        if let Err(err) = self.db.engine().transaction(TransactionOp::Rollback) {
            warn!("failed to roll back dropped transaction; err={err}");
        }
    }
}

impl Db {
    /// Starts a transaction.
    pub fn begin(&self) -> Result<Transaction<'_>> {
        trace!("begin transaction");
        self.engine().transaction(TransactionOp::Begin)?;

        Ok(Transaction {
            db: self,
            finished: false,
        })
    }

    /// Runs `f` inside a transaction.
    ///
    /// Commits when `f` returns `Ok`, rolls back when it returns `Err`. The
    /// closure's error is returned unchanged; a rollback failure is logged.
    pub fn transaction<T>(&self, f: impl FnOnce(&Db) -> Result<T>) -> Result<T> {
        let tx = self.begin()?;

        match f(&tx) {
            Ok(ret) => {
                tx.commit()?;
                Ok(ret)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback() {
                    warn!("failed to roll back transaction; err={rollback}");
                }
                Err(err)
            }
        }
    }
}
