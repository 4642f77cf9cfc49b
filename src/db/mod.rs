//! Inspection record store: a single SQLite connection owned by a dedicated
//! worker thread, driven through an mpsc command channel so async callers
//! never block on disk I/O.
//!
//! The store owns the pass/fail decision: `insert_inspection` runs the
//! classifier over the submitted reading and persists status and reason
//! alongside it. Records are immutable once written.

use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread,
};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use log::{error, info};
use rusqlite::{params, Connection};
use tokio::sync::oneshot;
use uuid::Uuid;

mod migrations;

use migrations::run_migrations;

use crate::classifier::{classify, Thresholds};
use crate::models::{InspectionRecord, InspectionStats, InspectionStatus, NewInspection};

type StoreJob = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum Command {
    Run(StoreJob),
    Shutdown,
}

struct Inner {
    jobs: mpsc::Sender<Command>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.jobs.send(Command::Shutdown) {
                error!("could not signal store thread to stop: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("store thread join failed: {join_err:?}");
            }
        }
    }
}

fn open_connection(path: &Path) -> Result<Connection> {
    let mut conn = Connection::open(path).context("failed to open SQLite database")?;
    if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
        error!("could not enable WAL mode: {err}");
    }
    run_migrations(&mut conn).context("failed to run database migrations")?;
    Ok(conn)
}

fn parse_datetime(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| anyhow!("invalid datetime '{value}': {err}"))
}

fn status_from_str(value: &str) -> Result<InspectionStatus> {
    match value {
        "passed" => Ok(InspectionStatus::Passed),
        "rejected" => Ok(InspectionStatus::Rejected),
        _ => Err(anyhow!("unknown inspection status '{value}'")),
    }
}

#[derive(Clone)]
pub struct Database {
    inner: Arc<Inner>,
    db_path: Arc<PathBuf>,
}

impl Database {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let (job_tx, job_rx) = mpsc::channel::<Command>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path_for_thread = db_path.clone();

        let worker = thread::Builder::new()
            .name("packcheck-db".into())
            .spawn(move || {
                let mut conn = match open_connection(&path_for_thread) {
                    Ok(conn) => {
                        if ready_tx.send(Ok(())).is_err() {
                            return;
                        }
                        conn
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };

                while let Ok(command) = job_rx.recv() {
                    match command {
                        Command::Run(job) => job(&mut conn),
                        Command::Shutdown => break,
                    }
                }

                info!("store thread shutting down");
            })
            .context("failed to spawn database worker thread")?;

        ready_rx
            .recv()
            .context("database worker exited before signaling readiness")??;

        info!("inspection store ready at {}", db_path.display());

        Ok(Self {
            inner: Arc::new(Inner {
                jobs: job_tx,
                worker: Mutex::new(Some(worker)),
            }),
            db_path: Arc::new(db_path),
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    /// Run a job on the store thread and await its result.
    pub async fn execute<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.inner
            .jobs
            .send(Command::Run(Box::new(move |conn| {
                let result = job(conn);
                if reply_tx.send(result).is_err() {
                    error!("store caller went away before the job finished");
                }
            })))
            .map_err(|err| anyhow!("could not reach store thread: {err}"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("store thread terminated unexpectedly"))?
    }

    /// Classify the submitted reading and persist the resulting record.
    /// The record is created exactly once and never touched again.
    pub async fn insert_inspection(
        &self,
        submission: NewInspection,
        thresholds: Thresholds,
    ) -> Result<InspectionRecord> {
        let verdict = classify(
            submission.temperature,
            submission.weight,
            submission.is_sealed,
            &thresholds,
        );

        let record = InspectionRecord {
            id: Uuid::new_v4().to_string(),
            package_id: submission.package_id,
            temperature: submission.temperature,
            weight: submission.weight,
            is_sealed: submission.is_sealed,
            image_data: submission.image_data,
            status: verdict.status,
            reason: verdict.reason,
            timestamp: Utc::now(),
        };

        let stored = record.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO inspections (id, package_id, temperature, weight, is_sealed, image_data, status, reason, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    stored.id,
                    stored.package_id,
                    stored.temperature,
                    stored.weight,
                    stored.is_sealed,
                    stored.image_data,
                    stored.status.as_str(),
                    stored.reason,
                    stored.timestamp.to_rfc3339(),
                ],
            )
            .context("failed to insert inspection")?;
            Ok(())
        })
        .await?;

        Ok(record)
    }

    /// All inspections, newest first.
    pub async fn list_inspections(&self) -> Result<Vec<InspectionRecord>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, package_id, temperature, weight, is_sealed, image_data, status, reason, timestamp
                 FROM inspections
                 ORDER BY timestamp DESC",
            )?;

            let mut rows = stmt.query([])?;
            let mut inspections = Vec::new();
            while let Some(row) = rows.next()? {
                inspections.push(InspectionRecord {
                    id: row.get(0)?,
                    package_id: row.get(1)?,
                    temperature: row.get(2)?,
                    weight: row.get(3)?,
                    is_sealed: row.get(4)?,
                    image_data: row.get(5)?,
                    status: status_from_str(&row.get::<_, String>(6)?)?,
                    reason: row.get(7)?,
                    timestamp: parse_datetime(&row.get::<_, String>(8)?)?,
                });
            }

            Ok(inspections)
        })
        .await
    }

    /// Aggregate counts over every stored inspection.
    pub async fn get_stats(&self) -> Result<InspectionStats> {
        self.execute(|conn| {
            conn.query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(status = 'passed'), 0),
                        COALESCE(SUM(status = 'rejected'), 0),
                        COALESCE(SUM(is_sealed = 1), 0),
                        COALESCE(SUM(is_sealed = 0), 0)
                 FROM inspections",
                [],
                |row| {
                    Ok(InspectionStats {
                        total_packages: row.get::<_, i64>(0)? as u64,
                        passed_packages: row.get::<_, i64>(1)? as u64,
                        rejected_packages: row.get::<_, i64>(2)? as u64,
                        sealed_packages: row.get::<_, i64>(3)? as u64,
                        unsealed_packages: row.get::<_, i64>(4)? as u64,
                    })
                },
            )
            .context("failed to compute inspection stats")
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(package_id: &str, temperature: f64, weight: f64, sealed: bool) -> NewInspection {
        NewInspection {
            package_id: package_id.to_string(),
            temperature,
            weight,
            is_sealed: sealed,
            image_data: "data:image/jpeg;base64,test".to_string(),
        }
    }

    async fn open_database() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = Database::new(dir.path().join("packcheck.sqlite3")).expect("database");
        (dir, db)
    }

    #[tokio::test]
    async fn insert_classifies_and_persists() {
        let (_dir, db) = open_database().await;

        let passed = db
            .insert_inspection(submission("PKG-1", 20.0, 500.0, true), Thresholds::default())
            .await
            .unwrap();
        assert_eq!(passed.status, InspectionStatus::Passed);
        assert_eq!(passed.reason, "All quality checks passed");

        let rejected = db
            .insert_inspection(submission("PKG-2", 30.0, 500.0, true), Thresholds::default())
            .await
            .unwrap();
        assert_eq!(rejected.status, InspectionStatus::Rejected);
        assert!(rejected.reason.contains("Temperature"));

        let listed = db.list_inspections().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed
            .iter()
            .any(|record| record.package_id == "PKG-1" && record.status == InspectionStatus::Passed));
    }

    #[tokio::test]
    async fn stats_count_every_dimension() {
        let (_dir, db) = open_database().await;
        let thresholds = Thresholds::default();

        db.insert_inspection(submission("PKG-1", 20.0, 500.0, true), thresholds.clone())
            .await
            .unwrap();
        db.insert_inspection(submission("PKG-2", 30.0, 500.0, true), thresholds.clone())
            .await
            .unwrap();
        db.insert_inspection(submission("PKG-3", 20.0, 500.0, false), thresholds)
            .await
            .unwrap();

        let stats = db.get_stats().await.unwrap();
        assert_eq!(stats.total_packages, 3);
        assert_eq!(stats.passed_packages, 1);
        assert_eq!(stats.rejected_packages, 2);
        assert_eq!(stats.sealed_packages, 2);
        assert_eq!(stats.unsealed_packages, 1);
    }

    #[tokio::test]
    async fn empty_store_has_zeroed_stats() {
        let (_dir, db) = open_database().await;
        let stats = db.get_stats().await.unwrap();
        assert_eq!(stats.total_packages, 0);
        assert_eq!(stats.passed_packages, 0);
    }
}
