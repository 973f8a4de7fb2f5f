use std::{sync::Arc, thread};

use loghub::{Level, Logger, NullSink};

fn quiet_logger(min_level: Level) -> Logger {
    Logger::builder()
        .with_min_level(min_level)
        .with_console_sink(Box::new(NullSink::new()))
        .build()
        .unwrap()
}

#[test]
fn concurrent_accessors_see_a_single_shared_instance() {
    let handles: Vec<_> = (0..16)
        .map(|_| thread::spawn(|| loghub::logger() as *const Logger as usize))
        .collect();

    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn stress_emits_lose_nothing_and_keep_per_thread_order() {
    const THREADS: usize = 8;
    const MESSAGES: usize = 100;

    let logger = Arc::new(quiet_logger(Level::Info));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for m in 0..MESSAGES {
                    logger.info(&format!("thread={} seq={}", t, m));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let history = logger.snapshot_history();
    assert_eq!(history.len(), THREADS * MESSAGES);

    for t in 0..THREADS {
        let prefix = format!("thread={} ", t);
        let sequence: Vec<usize> = history
            .iter()
            .filter(|r| r.message().starts_with(&prefix))
            .map(|r| {
                r.message()
                    .split_once("seq=")
                    .unwrap()
                    .1
                    .parse::<usize>()
                    .unwrap()
            })
            .collect();

        assert_eq!(sequence.len(), MESSAGES);
        assert!(sequence.windows(2).all(|pair| pair[0] + 1 == pair[1]));
    }
}

#[test]
fn filtered_emits_never_surface_under_contention() {
    const THREADS: usize = 4;
    const MESSAGES: usize = 50;

    let logger = Arc::new(quiet_logger(Level::Warn));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for m in 0..MESSAGES {
                    logger.debug(&format!("noise {} {}", t, m));
                    logger.warn(&format!("signal {} {}", t, m));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let history = logger.snapshot_history();
    assert_eq!(history.len(), THREADS * MESSAGES);
    assert!(history.iter().all(|r| r.level() == Level::Warn));
}

#[test]
fn file_writes_match_history_order_under_contention() {
    const THREADS: usize = 4;
    const MESSAGES: usize = 50;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loghub.log");

    let logger = Arc::new(
        Logger::builder()
            .with_console_sink(Box::new(NullSink::new()))
            .with_file_sink(&path)
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for m in 0..MESSAGES {
                    logger.info(&format!("entry {} {}", t, m));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    logger.flush();

    let written: Vec<String> = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    let rendered: Vec<String> = logger
        .snapshot_history()
        .iter()
        .map(|r| r.rendered().to_string())
        .collect();

    assert_eq!(written, rendered);
}

#[test]
fn snapshots_taken_mid_stream_are_consistent_prefixes() {
    const MESSAGES: usize = 200;

    let logger = Arc::new(quiet_logger(Level::Info));

    let writer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for m in 0..MESSAGES {
                logger.info(&format!("seq={}", m));
            }
        })
    };

    // Race some snapshots against the writer; each must be a prefix of the
    // final sequence, never a torn or reordered view.
    for _ in 0..20 {
        let snapshot = logger.snapshot_history();
        for (i, record) in snapshot.iter().enumerate() {
            assert_eq!(record.message(), format!("seq={}", i));
        }
    }

    writer.join().unwrap();
    assert_eq!(logger.snapshot_history().len(), MESSAGES);
}
