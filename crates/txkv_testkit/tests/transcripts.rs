//! Replays the bundled transcripts.

use std::fs;
use txkv_core::TransactionStatus;
use txkv_testkit::{assert_transcript, transcripts_dir};

#[test]
fn set_get() {
    assert_transcript(transcripts_dir().join("set_get.txt"));
}

#[test]
fn delete() {
    assert_transcript(transcripts_dir().join("delete.txt"));
}

#[test]
fn count() {
    assert_transcript(transcripts_dir().join("count.txt"));
}

#[test]
fn commit() {
    let session = assert_transcript(transcripts_dir().join("commit.txt"));
    assert_eq!(session.status(), TransactionStatus::None);
}

#[test]
fn rollback() {
    assert_transcript(transcripts_dir().join("rollback.txt"));
}

#[test]
fn nested() {
    let session = assert_transcript(transcripts_dir().join("nested.txt"));
    assert_eq!(session.depth(), 0);
    assert_eq!(session.stack().base().get("foo"), Some("123"));
}

#[test]
fn declined() {
    let session = assert_transcript(transcripts_dir().join("declined.txt"));
    assert_eq!(session.depth(), 0);
}

#[test]
fn errors() {
    assert_transcript(transcripts_dir().join("errors.txt"));
}

#[test]
fn every_bundled_transcript_passes() {
    let mut seen = 0;
    for entry in fs::read_dir(transcripts_dir()).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            assert_transcript(&path);
            seen += 1;
        }
    }
    assert!(seen >= 8, "only {seen} transcripts found");
}
