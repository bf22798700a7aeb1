//! Integration tests for scour
//!
//! These tests verify end-to-end functionality by driving search and
//! replace sessions over real files in temporary directories.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use scour::engine::{
    Controller, EngineError, FileSequence, MatchLocation, ReplaceSpec, ReplaceSummary,
    RevertPolicy, replace_session, search_session,
};
use scour::matcher::CaseMode;
use tempfile::TempDir;

/// Create a file with the given content inside the temp dir
fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Drive a controller until the sequence is exhausted, counting turns
fn drive_to_exhaustion(controller: &mut Controller) -> usize {
    let mut turns = 0;
    loop {
        match controller.continue_op() {
            Ok(()) => turns += 1,
            Err(EngineError::AllFilesProcessed) => return turns,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}

#[test]
fn test_search_visits_files_in_order_one_turn_per_match() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write_file(&dir, "first.txt", "the needle is here"),
        write_file(&dir, "second.txt", "needle again"),
        write_file(&dir, "third.txt", "ends with needle"),
    ];

    let found = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&found);

    let mut controller = Controller::new();
    let session = search_session(
        "needle",
        CaseMode::Sensitive,
        FileSequence::from_list(files.clone()),
        move |location: &MatchLocation| sink.borrow_mut().push(location.path.clone()),
    )
    .unwrap();
    controller.initialize_with(session);

    let turns = drive_to_exhaustion(&mut controller);

    assert_eq!(turns, 3);
    assert_eq!(*found.borrow(), files);

    // The terminal signal repeats on further calls.
    assert!(matches!(
        controller.continue_op(),
        Err(EngineError::AllFilesProcessed)
    ));
}

#[test]
fn test_continue_without_initialize_fails() {
    let mut controller = Controller::new();
    assert!(matches!(
        controller.continue_op(),
        Err(EngineError::NoOperationInProgress)
    ));
}

#[test]
fn test_empty_file_list_is_immediately_exhausted() {
    let mut controller = Controller::new();
    let scans = Rc::new(RefCell::new(0));
    let count = Rc::clone(&scans);
    controller
        .initialize(
            FileSequence::from_list(Vec::<PathBuf>::new()),
            move |_| {
                *count.borrow_mut() += 1;
                false
            },
            |_| Ok(false),
        )
        .unwrap();

    assert!(matches!(
        controller.continue_op(),
        Err(EngineError::AllFilesProcessed)
    ));
    assert_eq!(*scans.borrow(), 0);
}

#[test]
fn test_replace_across_files_rewrites_on_disk() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "a.txt", "foo foo");
    let b = write_file(&dir, "b.txt", "nofoo");

    let spec = ReplaceSpec {
        pattern: "foo".to_string(),
        replacement: "bar".to_string(),
        case: CaseMode::Sensitive,
        delimited: false,
    };
    let summary = Rc::new(RefCell::new(ReplaceSummary::default()));

    let mut controller = Controller::new();
    let session = replace_session(
        &spec,
        FileSequence::from_list([a.clone(), b.clone()]),
        |_| true,
        |path: &Path, content: &str| fs::write(path, content),
        Rc::clone(&summary),
    )
    .unwrap();
    controller.initialize_with(session);

    drive_to_exhaustion(&mut controller);

    assert_eq!(fs::read_to_string(&a).unwrap(), "bar bar");
    assert_eq!(fs::read_to_string(&b).unwrap(), "nobar");
    assert_eq!(summary.borrow().replaced, 3);
    assert_eq!(summary.borrow().files_changed, 2);
}

#[test]
fn test_delimited_replace_spares_substrings() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "words.txt", "foo nofoo foo-suffix");

    let spec = ReplaceSpec {
        pattern: "foo".to_string(),
        replacement: "bar".to_string(),
        case: CaseMode::Sensitive,
        delimited: true,
    };
    let summary = Rc::new(RefCell::new(ReplaceSummary::default()));

    let mut controller = Controller::new();
    let session = replace_session(
        &spec,
        FileSequence::from_list([path.clone()]),
        |_| true,
        |p: &Path, content: &str| fs::write(p, content),
        Rc::clone(&summary),
    )
    .unwrap();
    controller.initialize_with(session);

    drive_to_exhaustion(&mut controller);

    assert_eq!(fs::read_to_string(&path).unwrap(), "bar nofoo bar-suffix");
}

#[test]
fn test_refusing_every_replacement_leaves_files_untouched() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "keep.txt", "foo foo foo");

    let spec = ReplaceSpec {
        pattern: "foo".to_string(),
        replacement: "bar".to_string(),
        case: CaseMode::Sensitive,
        delimited: false,
    };
    let summary = Rc::new(RefCell::new(ReplaceSummary::default()));

    let mut controller = Controller::new();
    let session = replace_session(
        &spec,
        FileSequence::from_list([path.clone()]),
        |_| false,
        |p: &Path, content: &str| fs::write(p, content),
        Rc::clone(&summary),
    )
    .unwrap();
    controller.initialize_with(session);

    drive_to_exhaustion(&mut controller);

    assert_eq!(fs::read_to_string(&path).unwrap(), "foo foo foo");
    assert_eq!(summary.borrow().replaced, 0);
    assert_eq!(summary.borrow().skipped, 3);
    assert_eq!(summary.borrow().files_changed, 0);
}

#[test]
fn test_generator_backed_sequence_over_real_files() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write_file(&dir, "one.txt", "match"),
        write_file(&dir, "two.txt", "no hit"),
        write_file(&dir, "three.txt", "match"),
    ];

    let mut remaining: std::collections::VecDeque<PathBuf> = files.into();
    let sequence = FileSequence::from_generator(move || remaining.pop_front());

    let found = Rc::new(RefCell::new(0));
    let count = Rc::clone(&found);

    let mut controller = Controller::new();
    let session = search_session("match", CaseMode::Sensitive, sequence, move |_| {
        *count.borrow_mut() += 1;
    })
    .unwrap();
    controller.initialize_with(session);

    drive_to_exhaustion(&mut controller);
    assert_eq!(*found.borrow(), 2);
}

#[test]
fn test_stale_file_in_never_mode_is_not_reloaded() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "stale.txt", "old needle");

    let mut controller = Controller::new();
    controller.set_revert_policy(RevertPolicy::never());

    // First session leaves a live, finished buffer behind.
    let session = scour::engine::Session::builder()
        .files(FileSequence::from_list([path.clone()]))
        .scan(|visit| {
            if let Some(pos) = visit.rest().find("needle") {
                let start = visit.cursor() + pos;
                visit.set_cursor(start + "needle".len());
                true
            } else {
                false
            }
        })
        .operate(|_| Ok(false))
        .keep_open(true)
        .build()
        .unwrap();
    controller.initialize_with(session);
    controller.continue_op().unwrap();

    // The file changes on disk behind the engine's back.
    std::thread::sleep(std::time::Duration::from_millis(20));
    fs::write(&path, "completely different").unwrap();

    // A second session over the same path still sees the in-memory copy.
    let seen = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&seen);
    let session = scour::engine::Session::builder()
        .files(FileSequence::from_list([path.clone()]))
        .scan(|_| true)
        .operate(move |visit| {
            *sink.borrow_mut() = visit.content().to_string();
            Ok(false)
        })
        .keep_open(true)
        .build()
        .unwrap();
    controller.initialize_with(session);
    controller.continue_op().unwrap();

    assert_eq!(*seen.borrow(), "old needle");
}

#[test]
fn test_case_folding_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "case.txt", "Needle NEEDLE needle");

    let count_with = |case: CaseMode| {
        let found = Rc::new(RefCell::new(0));
        let tally = Rc::clone(&found);
        let mut controller = Controller::new();
        let session = search_session(
            "needle",
            case,
            FileSequence::from_list([path.clone()]),
            move |_| *tally.borrow_mut() += 1,
        )
        .unwrap();
        controller.initialize_with(session);
        drive_to_exhaustion(&mut controller);
        let n = *found.borrow();
        n
    };

    // Smart case folds an all-lowercase pattern.
    assert_eq!(count_with(CaseMode::Smart), 3);
    assert_eq!(count_with(CaseMode::Insensitive), 3);
    assert_eq!(count_with(CaseMode::Sensitive), 1);
}
