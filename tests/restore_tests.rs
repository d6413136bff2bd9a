use dumprestore::core::restore::RestoreLogic;
use dumprestore::errors::{AppError, AppResult};
use dumprestore::models::{Row, SqlValue, TableBatches};
use dumprestore::sink::{DryRunSink, UpsertSink};
use serde_json::Number;

/// Records every call; fails the calls listed in `fail_on` (table, 1-based call per table).
#[derive(Default)]
struct RecordingSink {
    calls: Vec<(String, usize)>,
    fail_on: Vec<(String, usize)>,
}

impl UpsertSink for RecordingSink {
    fn label(&self) -> String {
        "recording".to_string()
    }

    fn upsert(&mut self, table: &str, rows: &[Row]) -> AppResult<usize> {
        self.calls.push((table.to_string(), rows.len()));
        let nth = self.calls.iter().filter(|(t, _)| t == table).count();

        if self.fail_on.iter().any(|(t, n)| t == table && *n == nth) {
            return Err(AppError::upsert(table, "http status 409"));
        }
        Ok(rows.len())
    }
}

fn batches(tables: &[(&str, usize)]) -> TableBatches {
    let mut b = TableBatches::new();
    for (table, count) in tables {
        for i in 0..*count {
            let mut row = Row::new();
            row.insert("id".to_string(), SqlValue::Number(Number::from(i as i64)));
            b.push(table, row);
        }
    }
    b
}

fn order(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_rows_are_sent_in_chunks_of_100() {
    let b = batches(&[("personnel", 250)]);
    let mut sink = RecordingSink::default();

    let report = RestoreLogic::replay(&b, &order(&["personnel"]), &mut sink, 100, None);

    let sizes: Vec<usize> = sink.calls.iter().map(|(_, n)| *n).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(report.tables[0].chunks, 3);
    assert_eq!(report.rows_written(), 250);
}

#[test]
fn test_failed_chunk_does_not_stop_the_rest() {
    let b = batches(&[("teams", 150), ("events", 20)]);
    let mut sink = RecordingSink {
        fail_on: vec![("teams".to_string(), 1)],
        ..Default::default()
    };

    let report = RestoreLogic::replay(&b, &order(&["teams", "events"]), &mut sink, 100, None);

    assert_eq!(
        sink.calls,
        vec![
            ("teams".to_string(), 100),
            ("teams".to_string(), 50),
            ("events".to_string(), 20)
        ]
    );
    assert_eq!(report.failed_chunks(), 1);
    assert_eq!(report.tables[0].rows_written, 50);
    assert_eq!(report.tables[1].rows_written, 20);
    assert_eq!(report.rows_written(), 70);
}

#[test]
fn test_replay_follows_given_order() {
    let b = batches(&[("personnel", 1), ("teams", 1)]);
    let mut sink = RecordingSink::default();

    RestoreLogic::replay(&b, &order(&["teams", "personnel"]), &mut sink, 100, None);

    let tables: Vec<&str> = sink.calls.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(tables, vec!["teams", "personnel"]);
}

#[test]
fn test_dry_run_sink_counts_calls() {
    let b = batches(&[("suppliers", 5)]);
    let mut sink = DryRunSink::new();

    let report = RestoreLogic::replay(&b, &order(&["suppliers"]), &mut sink, 2, None);

    assert_eq!(sink.calls["suppliers"], vec![2, 2, 1]);
    assert_eq!(report.rows_written(), 5);
    assert_eq!(report.failed_chunks(), 0);
}

#[test]
fn test_chunk_failures_are_journaled() {
    let conn = rusqlite::Connection::open_in_memory().expect("journal");
    dumprestore::db::migrate::run_pending_migrations(&conn).expect("migrate");

    let b = batches(&[("teams", 3)]);
    let mut sink = RecordingSink {
        fail_on: vec![("teams".to_string(), 2)],
        ..Default::default()
    };

    RestoreLogic::replay(&b, &order(&["teams"]), &mut sink, 2, Some(&conn));

    let entries = dumprestore::db::log::load_log(&conn).expect("load log");
    let failed: Vec<_> = entries
        .iter()
        .filter(|e| e.operation == "chunk_failed")
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].target, "teams");
    assert!(failed[0].message.contains("chunk 2 (1 rows)"));
}
