use std::thread;

use diesel::connection::{Connection, SimpleConnection};
use diesel::sqlite::SqliteConnection;
use log::error;
use tokio::sync::{mpsc, oneshot};

use crate::errors::{DatabaseError, Error, Result};

type Job = Box<dyn FnOnce(&mut SqliteConnection) + Send + 'static>;

/// Handle to the single-writer actor.
///
/// All mutations go through one dedicated connection owned by a background
/// thread, so writes are serialized and never contend on SQLite locks with
/// each other. Reads keep using the pool.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::UnboundedSender<Job>,
}

impl WriteHandle {
    pub fn spawn(db_path: &str) -> Result<Self> {
        let mut conn = SqliteConnection::establish(db_path)
            .map_err(DatabaseError::ConnectionFailed)?;
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 30000;")?;

        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();

        thread::Builder::new()
            .name("db-writer".to_string())
            .spawn(move || {
                while let Some(job) = rx.blocking_recv() {
                    job(&mut conn);
                }
            })?;

        Ok(WriteHandle { tx })
    }

    /// Runs a closure against the writer connection and awaits its result.
    pub async fn exec<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();

        self.tx
            .send(Box::new(move |conn: &mut SqliteConnection| {
                let _ = done_tx.send(f(conn));
            }))
            .map_err(|_| {
                error!("Write actor channel closed");
                Error::Database(DatabaseError::WriterUnavailable)
            })?;

        done_rx
            .await
            .map_err(|_| Error::Database(DatabaseError::WriterUnavailable))?
    }
}
