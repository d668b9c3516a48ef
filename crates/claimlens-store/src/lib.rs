//! Claimlens Storage Layer
//!
//! Implements the ClaimSink trait plus the influencer registry over SQLite.
//!
//! # Architecture
//!
//! Two tables: `influencers` (registry plus the pipeline-owned trust score
//! and last-analyzed timestamp) and `claims` (immutable, one row per unique
//! claim per run). Ids are stored in their UUID string form.
//!
//! # Examples
//!
//! ```
//! use claimlens_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for influencer and claim operations
//! ```

#![warn(missing_docs)]

use claimlens_domain::traits::ClaimSink;
use claimlens_domain::{Category, Claim, ClaimId, Influencer, InfluencerId, VerificationStatus};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stored data that cannot be mapped back to the domain model
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-backed implementation of ClaimSink and the influencer registry
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance; the pipeline keeps its store behind a mutex.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use claimlens_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("claimlens.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS influencers (
                id              TEXT PRIMARY KEY,
                name            TEXT NOT NULL,
                handle          TEXT NOT NULL UNIQUE,
                follower_count  INTEGER NOT NULL DEFAULT 0,
                trust_score     REAL NOT NULL DEFAULT 0.0,
                last_analyzed   INTEGER
            );
            CREATE TABLE IF NOT EXISTS claims (
                id                  TEXT PRIMARY KEY,
                influencer_id       TEXT NOT NULL REFERENCES influencers(id),
                claim_text          TEXT NOT NULL,
                category            TEXT NOT NULL,
                verification_status TEXT NOT NULL,
                confidence_score    REAL NOT NULL DEFAULT 0.0,
                date_collected      INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_claims_influencer
                ON claims(influencer_id);",
        )?;
        Ok(())
    }

    /// Create or update an influencer, keyed by handle
    ///
    /// An existing row keeps its id, trust score, and last-analyzed
    /// timestamp; only name and follower count are refreshed. Returns the
    /// id of the stored row.
    pub fn upsert_influencer(&mut self, influencer: &Influencer) -> Result<InfluencerId, StoreError> {
        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM influencers WHERE handle = ?1",
                params![influencer.handle],
                |row| row.get(0),
            )
            .optional()?;

        match existing {
            Some(id_str) => {
                self.conn.execute(
                    "UPDATE influencers SET name = ?1, follower_count = ?2 WHERE handle = ?3",
                    params![influencer.name, influencer.follower_count, influencer.handle],
                )?;
                InfluencerId::from_string(&id_str).map_err(StoreError::InvalidData)
            }
            None => {
                self.conn.execute(
                    "INSERT INTO influencers (id, name, handle, follower_count, trust_score, last_analyzed)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        influencer.id.to_string(),
                        influencer.name,
                        influencer.handle,
                        influencer.follower_count,
                        influencer.trust_score,
                        influencer.last_analyzed,
                    ],
                )?;
                Ok(influencer.id)
            }
        }
    }

    /// Look up an influencer by handle
    pub fn get_influencer(&self, handle: &str) -> Result<Option<Influencer>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, handle, follower_count, trust_score, last_analyzed
                 FROM influencers WHERE handle = ?1",
                params![handle],
                map_influencer_row,
            )
            .optional()?;

        row.map(influencer_from_raw).transpose()
    }

    /// List all influencers ordered by trust score, highest first
    pub fn list_influencers(&self) -> Result<Vec<Influencer>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, handle, follower_count, trust_score, last_analyzed
             FROM influencers ORDER BY trust_score DESC, handle ASC",
        )?;

        let rows = stmt.query_map([], map_influencer_row)?;
        rows.map(|row| row.map_err(StoreError::from).and_then(influencer_from_raw))
            .collect()
    }

    /// List all claims for an influencer in collection order
    pub fn claims_for(&self, influencer_id: InfluencerId) -> Result<Vec<Claim>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, influencer_id, claim_text, category, verification_status,
                    confidence_score, date_collected
             FROM claims WHERE influencer_id = ?1 ORDER BY rowid ASC",
        )?;

        let rows = stmt.query_map(params![influencer_id.to_string()], map_claim_row)?;
        rows.map(|row| row.map_err(StoreError::from).and_then(claim_from_raw))
            .collect()
    }
}

impl ClaimSink for SqliteStore {
    type Error = StoreError;

    fn save_claim(&mut self, claim: &Claim) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT INTO claims (id, influencer_id, claim_text, category,
                                 verification_status, confidence_score, date_collected)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                claim.id.to_string(),
                claim.influencer_id.to_string(),
                claim.text,
                claim.category.as_str(),
                claim.status.as_str(),
                claim.confidence,
                claim.collected_at,
            ],
        )?;
        Ok(())
    }

    fn update_influencer_trust(
        &mut self,
        id: InfluencerId,
        trust_score: f64,
        analyzed_at: u64,
    ) -> Result<(), Self::Error> {
        let updated = self.conn.execute(
            "UPDATE influencers SET trust_score = ?1, last_analyzed = ?2 WHERE id = ?3",
            params![trust_score, analyzed_at, id.to_string()],
        )?;

        if updated == 0 {
            return Err(StoreError::NotFound(format!("influencer {}", id)));
        }
        Ok(())
    }
}

// Intermediate row tuples keep the rusqlite closure free of domain parsing,
// which would otherwise force every mapping error through rusqlite's error
// type.

type RawInfluencerRow = (String, String, String, u64, f64, Option<u64>);
type RawClaimRow = (String, String, String, String, String, f64, u64);

fn map_influencer_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawInfluencerRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn influencer_from_raw(raw: RawInfluencerRow) -> Result<Influencer, StoreError> {
    let (id, name, handle, follower_count, trust_score, last_analyzed) = raw;
    Ok(Influencer {
        id: InfluencerId::from_string(&id).map_err(StoreError::InvalidData)?,
        name,
        handle,
        follower_count,
        trust_score,
        last_analyzed,
    })
}

fn map_claim_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawClaimRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn claim_from_raw(raw: RawClaimRow) -> Result<Claim, StoreError> {
    let (id, influencer_id, text, category, status, confidence, collected_at) = raw;
    Ok(Claim {
        id: ClaimId::from_string(&id).map_err(StoreError::InvalidData)?,
        influencer_id: InfluencerId::from_string(&influencer_id).map_err(StoreError::InvalidData)?,
        text,
        category: Category::parse_label(&category)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown category: {}", category)))?,
        status: VerificationStatus::parse_label(&status)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown status: {}", status)))?,
        confidence,
        collected_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_then_get() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let influencer = Influencer::new("Dr. Health", "drhealth", 125_000);

        let id = store.upsert_influencer(&influencer).unwrap();
        assert_eq!(id, influencer.id);

        let fetched = store.get_influencer("drhealth").unwrap().unwrap();
        assert_eq!(fetched.name, "Dr. Health");
        assert_eq!(fetched.follower_count, 125_000);
        assert_eq!(fetched.trust_score, 0.0);
        assert_eq!(fetched.last_analyzed, None);
    }

    #[test]
    fn test_upsert_existing_keeps_id_and_trust() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let first = Influencer::new("Dr. Health", "drhealth", 100);
        let id = store.upsert_influencer(&first).unwrap();

        store.update_influencer_trust(id, 72.5, 1_700_000_000).unwrap();

        let renamed = Influencer::new("Doctor Health", "drhealth", 200);
        let id_again = store.upsert_influencer(&renamed).unwrap();

        assert_eq!(id, id_again);
        let fetched = store.get_influencer("drhealth").unwrap().unwrap();
        assert_eq!(fetched.name, "Doctor Health");
        assert_eq!(fetched.follower_count, 200);
        assert_eq!(fetched.trust_score, 72.5);
        assert_eq!(fetched.last_analyzed, Some(1_700_000_000));
    }

    #[test]
    fn test_get_unknown_handle_is_none() {
        let store = SqliteStore::new(":memory:").unwrap();
        assert!(store.get_influencer("nobody").unwrap().is_none());
    }

    #[test]
    fn test_update_trust_for_missing_influencer() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let result = store.update_influencer_trust(InfluencerId::new(), 50.0, 0);
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
