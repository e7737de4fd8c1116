//! craftstats database gateway - PostgreSQL activity log
//!
//! Every operation acquires a fresh connection scoped to that call:
//! connect, run inside a transaction, commit on success, roll back on
//! failure. Connections are never pooled or reused; call frequency is at
//! most once per poll tick. Connect attempts carry a bounded timeout, and
//! nothing here retries.

pub mod schema;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use craftstats_core::constants::NETWORK_TIMEOUT_SECS;
use craftstats_core::{ActivitySample, DbSettings, Error, Result};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection, Row};
use tracing::{debug, info, warn};

/// Write seam between the poller and the database
#[async_trait]
pub trait ActivityRecorder: Send + Sync {
    /// Persist one activity sample
    async fn record(&self, sample: &ActivitySample) -> Result<()>;
}

/// Per-call connection gateway over the player_activity table
pub struct ActivityLog {
    options: PgConnectOptions,
}

impl ActivityLog {
    /// Build a gateway from settings plus the keyring password
    pub fn new(settings: &DbSettings, password: &str) -> Self {
        let options = PgConnectOptions::new()
            .host(&settings.ip_address)
            .port(settings.port)
            .username(&settings.username)
            .password(password)
            .database(&settings.database);

        Self { options }
    }

    async fn connect(&self) -> Result<PgConnection> {
        let timeout = std::time::Duration::from_secs(NETWORK_TIMEOUT_SECS);
        match tokio::time::timeout(timeout, self.options.connect()).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(Error::connection(e.to_string())),
            Err(_) => Err(Error::connection(format!(
                "connect timed out after {}s",
                NETWORK_TIMEOUT_SECS
            ))),
        }
    }

    /// Connect and run a trivial statement; run at startup before any mode
    pub async fn check(&self) -> Result<()> {
        let mut conn = self.connect().await?;
        sqlx::query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(|e| Error::query(e.to_string()))?;
        debug!("Database login check passed");
        conn.close().await.ok();
        Ok(())
    }

    /// Create the player_activity table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        let mut conn = self.connect().await?;
        sqlx::query(schema::SCHEMA)
            .execute(&mut conn)
            .await
            .map_err(|e| Error::query(e.to_string()))?;
        info!("Database schema initialized");
        conn.close().await.ok();
        Ok(())
    }

    /// Insert one activity row
    ///
    /// The caller provides a fully-formed sample; no field validation
    /// happens here. Rows are append-only.
    pub async fn insert(&self, sample: &ActivitySample) -> Result<()> {
        let mut conn = self.connect().await?;
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| Error::query(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO player_activity ("Time_Stamp", "Player_Count", "Player_Names", "Server_Name")
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(sample.timestamp.naive_utc())
        .bind(sample.player_count as i32)
        .bind(encode_player_names(&sample.player_names))
        .bind(&sample.server_name)
        .execute(&mut *tx)
        .await;

        match result {
            Ok(_) => {
                tx.commit()
                    .await
                    .map_err(|e| Error::query(e.to_string()))?;
                debug!(
                    "Logged {} player(s) on {}",
                    sample.player_count, sample.server_name
                );
                Ok(())
            }
            Err(e) => {
                warn!("Activity insert failed, rolling back: {}", e);
                tx.rollback().await.ok();
                Err(Error::query(e.to_string()))
            }
        }
    }

    /// Fetch rows from the trailing `days`-day window
    ///
    /// Rows come back in store-native order; callers must not assume one.
    pub async fn query_recent(&self, days: u32) -> Result<Vec<ActivitySample>> {
        let mut conn = self.connect().await?;
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| Error::query(e.to_string()))?;

        let result = sqlx::query(
            r#"
            SELECT "Time_Stamp", "Player_Count", "Player_Names", "Server_Name"
            FROM player_activity
            WHERE "Time_Stamp" >= $1
            "#,
        )
        .bind(window_cutoff(Utc::now(), days))
        .fetch_all(&mut *tx)
        .await;

        match result {
            Ok(rows) => {
                tx.commit()
                    .await
                    .map_err(|e| Error::query(e.to_string()))?;
                let samples = rows
                    .iter()
                    .map(|row| {
                        let ts: NaiveDateTime = row.get("Time_Stamp");
                        let count: Option<i32> = row.get("Player_Count");
                        let names: Option<String> = row.get("Player_Names");
                        let server: Option<String> = row.get("Server_Name");
                        ActivitySample {
                            timestamp: DateTime::from_naive_utc_and_offset(ts, Utc),
                            player_count: count.unwrap_or(0).max(0) as u32,
                            player_names: decode_player_names(names.as_deref().unwrap_or("")),
                            server_name: server.unwrap_or_default(),
                        }
                    })
                    .collect();
                Ok(samples)
            }
            Err(e) => {
                warn!("Activity query failed, rolling back: {}", e);
                tx.rollback().await.ok();
                Err(Error::query(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl ActivityRecorder for ActivityLog {
    async fn record(&self, sample: &ActivitySample) -> Result<()> {
        self.insert(sample).await
    }
}

/// Cutoff instant for a trailing window of `days` days
fn window_cutoff(now: DateTime<Utc>, days: u32) -> NaiveDateTime {
    (now - Duration::days(days as i64)).naive_utc()
}

/// Roster serialization for the Player_Names TEXT column (JSON array)
fn encode_player_names(names: &[String]) -> String {
    serde_json::to_string(names).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a roster; tolerates legacy comma-joined text
fn decode_player_names(text: &str) -> Vec<String> {
    if let Ok(names) = serde_json::from_str::<Vec<String>>(text) {
        return names;
    }
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_options_from_settings() {
        let settings = DbSettings {
            database: "player_stats".to_string(),
            ip_address: "10.0.0.5".to_string(),
            port: 5433,
            username: "postgres".to_string(),
        };
        let log = ActivityLog::new(&settings, "secret");

        assert_eq!(log.options.get_host(), "10.0.0.5");
        assert_eq!(log.options.get_port(), 5433);
        assert_eq!(log.options.get_username(), "postgres");
        assert_eq!(log.options.get_database(), Some("player_stats"));
    }

    #[test]
    fn test_window_cutoff() {
        let now = Utc::now();
        let cutoff = window_cutoff(now, 7);
        assert_eq!(now.naive_utc() - cutoff, Duration::days(7));
    }

    #[test]
    fn test_player_names_round_trip() {
        let names = vec!["alex".to_string(), "steve".to_string()];
        let encoded = encode_player_names(&names);
        assert_eq!(encoded, r#"["alex","steve"]"#);
        assert_eq!(decode_player_names(&encoded), names);
    }

    #[test]
    fn test_decode_empty_and_legacy_text() {
        assert!(decode_player_names("").is_empty());
        assert!(decode_player_names("[]").is_empty());
        assert_eq!(
            decode_player_names("alex, steve"),
            vec!["alex".to_string(), "steve".to_string()]
        );
    }
}
