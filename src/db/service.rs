use crate::db::models::{NewMessage, StoredMessage};
use crate::db::DbPool;
use chrono::{DateTime, NaiveDateTime, Utc};
use duckdb::{params, Connection, Result as DbResult, Row};
use tracing::warn;

/// DuckDB casts timestamps to "YYYY-MM-DD HH:MM:SS[.ffffff]", which is not
/// RFC 3339; parse that shape, with a fetch-time fallback for anything else.
fn parse_db_timestamp(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .map(|dt| dt.and_utc())
        .ok()
}

pub struct DbService;

impl DbService {
    fn row_to_message(row: &Row) -> DbResult<StoredMessage> {
        let paths_str: String = row.get(8)?;
        let image_paths =
            serde_json::from_str(&paths_str).unwrap_or(serde_json::Value::Array(vec![]));

        // Timestamps are selected as VARCHAR so we don't depend on the
        // driver's chrono feature; see the CAST in the SELECTs below.
        let created_val: duckdb::types::Value = row.get(9)?;
        let created_str = match created_val {
            duckdb::types::Value::Text(s) => s,
            _ => String::new(),
        };
        let created_at = parse_db_timestamp(&created_str).unwrap_or_else(Utc::now);

        Ok(StoredMessage {
            id: row.get(0)?,
            chat_id: row.get(1)?,
            user_id: row.get(2)?,
            assistant_id: row.get(3)?,
            role: row.get(4)?,
            content: row.get(5)?,
            model: row.get(6)?,
            sequence_number: row.get(7)?,
            image_paths,
            created_at,
        })
    }

    pub fn insert_message(conn: &Connection, msg: &NewMessage) -> DbResult<()> {
        conn.execute(
            "INSERT INTO messages (chat_id, user_id, assistant_id, role, content, model, sequence_number, image_paths)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                msg.chat_id,
                msg.user_id,
                msg.assistant_id,
                msg.role,
                msg.content,
                msg.model,
                msg.sequence_number,
                msg.image_paths.to_string(),
            ],
        )?;
        Ok(())
    }

    pub fn get_messages(conn: &Connection, chat_id: &str) -> DbResult<Vec<StoredMessage>> {
        let mut stmt = conn.prepare(
            "SELECT id, chat_id, user_id, assistant_id, role, content, model, sequence_number, CAST(image_paths AS VARCHAR), CAST(created_at AS VARCHAR)
             FROM messages
             WHERE chat_id = ?
             ORDER BY sequence_number ASC",
        )?;

        let rows = stmt.query_map(params![chat_id], Self::row_to_message)?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?);
        }
        Ok(messages)
    }

    /// Best-effort side-channel write: never raises, outcome goes to the log.
    /// The request must succeed for the user even when this write fails.
    pub fn record_turn(pool: &DbPool, msg: &NewMessage) {
        let conn = match pool.lock() {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Skipping {} message write, pool lock poisoned: {}", msg.role, e);
                return;
            }
        };
        if let Err(e) = Self::insert_message(&conn, msg) {
            warn!(
                "Failed to persist {} message for chat {}: {}",
                msg.role, msg.chat_id, e
            );
        }
    }
}
