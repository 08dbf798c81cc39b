#[cfg(test)]
mod tests {
    use serde_json::json;
    use siftchat::db::connection::SCHEMA;
    use siftchat::db::service::DbService;
    use siftchat::db::{DbPool, NewMessage, PersistTarget};
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    // In memory database just for tests
    fn get_test_pool() -> DbPool {
        let conn = duckdb::Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        Arc::new(Mutex::new(conn))
    }

    fn sample_row(chat_id: &str, role: &str, seq: i64) -> NewMessage {
        NewMessage {
            chat_id: chat_id.to_string(),
            user_id: Uuid::new_v4().to_string(),
            assistant_id: None,
            role: role.to_string(),
            content: format!("{} turn {}", role, seq),
            model: Some("gpt-4o".to_string()),
            sequence_number: seq,
            image_paths: json!([]),
        }
    }

    #[test]
    fn test_insert_and_read_back_ordered() {
        let pool = get_test_pool();
        let conn = pool.lock().unwrap();
        let chat_id = Uuid::new_v4().to_string();

        // Insert out of order; read-back is ordered by sequence_number.
        DbService::insert_message(&conn, &sample_row(&chat_id, "assistant", 2)).unwrap();
        DbService::insert_message(&conn, &sample_row(&chat_id, "user", 1)).unwrap();

        let rows = DbService::get_messages(&conn, &chat_id).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].role, "user");
        assert_eq!(rows[0].sequence_number, 1);
        assert_eq!(rows[1].role, "assistant");
        assert_eq!(rows[1].sequence_number, 2);
        assert_eq!(rows[0].image_paths, json!([]));
    }

    #[test]
    fn test_created_at_survives_read_back() {
        let pool = get_test_pool();
        let conn = pool.lock().unwrap();
        let chat_id = Uuid::new_v4().to_string();

        DbService::insert_message(&conn, &sample_row(&chat_id, "user", 1)).unwrap();
        conn.execute(
            "UPDATE messages SET created_at = TIMESTAMP '2024-01-01 12:30:45'",
            [],
        )
        .unwrap();

        let rows = DbService::get_messages(&conn, &chat_id).unwrap();
        assert_eq!(
            rows[0].created_at,
            chrono::DateTime::parse_from_rfc3339("2024-01-01T12:30:45Z").unwrap()
        );
    }

    #[test]
    fn test_record_turn_never_panics_on_bad_row() {
        let pool = get_test_pool();

        // Force an insert failure by dropping the table; the advisory write
        // must swallow it and return normally.
        pool.lock()
            .unwrap()
            .execute_batch("DROP TABLE messages")
            .unwrap();

        let row = sample_row("chat", "user", 1);
        DbService::record_turn(&pool, &row);
    }

    #[test]
    fn test_persist_target_from_last_entry() {
        let history = vec![
            json!({"role": "user", "content": "old", "chat_id": "ignored", "user_id": "ignored"}),
            json!({"message": {
                "role": "assistant",
                "content": "latest",
                "chat_id": "chat-1",
                "user_id": "user-1",
                "assistant_id": "asst-1",
                "sequence_number": 6
            }}),
        ];

        let target = PersistTarget::from_history(&history).unwrap();
        assert_eq!(target.chat_id, "chat-1");
        assert_eq!(target.user_id, "user-1");
        assert_eq!(target.assistant_id.as_deref(), Some("asst-1"));
        assert_eq!(target.cursor, 6);

        let user_row = target.user_row("question", Some("gpt-4o"));
        assert_eq!(user_row.sequence_number, 7);
        assert_eq!(user_row.role, "user");

        let assistant_row = target.assistant_row("answer", Some("gpt-4o"));
        assert_eq!(assistant_row.sequence_number, 8);
        assert_eq!(assistant_row.role, "assistant");
    }

    #[test]
    fn test_persist_target_cursor_falls_back_to_history_length() {
        let history = vec![
            json!({"role": "user", "content": "a"}),
            json!({"role": "assistant", "content": "b"}),
            json!({"role": "user", "content": "c", "chat_id": "chat-2", "user_id": "user-2"}),
        ];

        let target = PersistTarget::from_history(&history).unwrap();
        assert_eq!(target.cursor, 3);
        assert_eq!(target.assistant_id, None);
    }

    #[test]
    fn test_persist_target_requires_identifiers() {
        // Identifiers on an earlier entry don't count; only the last one is read.
        let history = vec![
            json!({"role": "user", "content": "a", "chat_id": "chat-3", "user_id": "user-3"}),
            json!({"role": "assistant", "content": "b"}),
        ];
        assert!(PersistTarget::from_history(&history).is_none());
        assert!(PersistTarget::from_history(&[]).is_none());
    }
}
