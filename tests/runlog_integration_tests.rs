// Integration tests for the CSV run log: concurrent writers, header
// handling, and quoting round-trips.

use camino::Utf8PathBuf;
use proptest::prelude::*;
use std::thread;
use tempfile::TempDir;
use winmaint::runlog::LOG_HEADER;
use winmaint::RunLog;

fn temp_log_dir() -> (Utf8PathBuf, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (dir.join("logs"), temp_dir)
}

fn read_rows(runlog: &RunLog, stream: &str) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(runlog.stream_path(stream).as_std_path()).unwrap();
    assert_eq!(
        reader.headers().unwrap(),
        &csv::StringRecord::from(LOG_HEADER.to_vec())
    );
    reader.records().map(|r| r.unwrap()).collect()
}

#[test]
fn test_concurrent_writers_produce_exactly_m_rows() {
    let (dir, _temp_dir) = temp_log_dir();
    const WRITERS: usize = 8;
    const ROWS_PER_WRITER: usize = 25;

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            // Each thread gets its own RunLog (and therefore its own file
            // handle), like independent elevated processes would.
            let runlog = RunLog::new(&dir);
            thread::spawn(move || {
                for row in 0..ROWS_PER_WRITER {
                    runlog
                        .try_append(
                            "events",
                            &format!("writer{}", writer),
                            &format!("row {}, with a comma", row),
                        )
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let rows = read_rows(&RunLog::new(&dir), "events");
    assert_eq!(rows.len(), WRITERS * ROWS_PER_WRITER);

    // Every row is well-formed: three fields, intact message text.
    for row in &rows {
        assert_eq!(row.len(), 3);
        assert!(row[1].starts_with("writer"));
        assert!(row[2].contains("with a comma"));
    }
}

#[test]
fn test_header_survives_concurrent_first_writes() {
    let (dir, _temp_dir) = temp_log_dir();

    let handles: Vec<_> = (0..4)
        .map(|writer| {
            let runlog = RunLog::new(&dir);
            thread::spawn(move || {
                runlog
                    .try_append("status", &format!("w{}", writer), "first row race")
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Exactly one header plus four rows, regardless of which writer won.
    let rows = read_rows(&RunLog::new(&dir), "status");
    assert_eq!(rows.len(), 4);
}

#[test]
fn test_multiline_message_round_trips() {
    let (dir, _temp_dir) = temp_log_dir();
    let runlog = RunLog::new(&dir);

    let message = "line one\nline two, \"quoted\", and a trailing comma,";
    runlog.try_append("errors", "repair", message).unwrap();

    let rows = read_rows(&runlog, "errors");
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][2], message);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // Whatever the adapters put in a message, re-parsing the file yields
    // the same rows with the same field values.
    #[test]
    fn prop_rows_round_trip(
        entries in prop::collection::vec(("[a-z_]{1,12}", "\\PC{0,120}"), 1..12)
    ) {
        let (dir, _temp_dir) = temp_log_dir();
        let runlog = RunLog::new(&dir);

        for (function, message) in &entries {
            runlog.try_append("events", function, message).unwrap();
        }

        let rows = read_rows(&runlog, "events");
        prop_assert_eq!(rows.len(), entries.len());
        for (row, (function, message)) in rows.iter().zip(&entries) {
            prop_assert_eq!(&row[1], function.as_str());
            prop_assert_eq!(&row[2], message.as_str());
        }
    }
}
