mod common;

use std::fs;

use common::{FakeTransfer, FakeTransport, client};
use tubegrab::{EncodingDescriptor, Error, VideoMetadata};

const URL: &str = "http://cdn.test/video&signature=s1";

fn video() -> VideoMetadata {
    VideoMetadata {
        id: "abc".to_string(),
        title: "Test".to_string(),
        formats: vec![EncodingDescriptor {
            itag: 18,
            video_type: "video/mp4".to_string(),
            quality: "medium".to_string(),
            url: URL.to_string(),
        }],
        ..Default::default()
    }
}

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[test]
fn streams_to_file_with_progress() {
    let data = payload(10_000);
    let client = client(FakeTransport::default().with_transfer(URL, FakeTransfer::ok(data.clone(), 1024)));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.mp4");

    let mut calls = Vec::new();
    let written = client
        .download(&video(), 0, &path, |done, total| calls.push((done, total)))
        .unwrap();

    assert_eq!(written, 10_000);
    assert_eq!(fs::read(&path).unwrap(), data);

    // One call per 1 KiB chunk, cumulative and ending at the delivered size.
    assert_eq!(calls.len(), 10);
    assert!(calls.windows(2).all(|w| w[0].0 < w[1].0));
    assert!(calls.iter().all(|&(_, total)| total == 10_000));
    assert_eq!(calls.last(), Some(&(10_000, 10_000)));
}

#[test]
fn delivered_size_wins_over_declared_length() {
    let mut transfer = FakeTransfer::ok(payload(3000), 1000);
    transfer.content_length = Some(1000);
    let client = client(FakeTransport::default().with_transfer(URL, transfer));
    let dir = tempfile::tempdir().unwrap();

    let mut last = None;
    client
        .download(&video(), 0, dir.path().join("v.mp4"), |done, total| last = Some((done, total)))
        .unwrap();
    assert_eq!(last, Some((3000, 1000)));
}

#[test]
fn unknown_length_reports_zero_total() {
    let mut transfer = FakeTransfer::ok(payload(500), 200);
    transfer.content_length = None;
    let client = client(FakeTransport::default().with_transfer(URL, transfer));
    let dir = tempfile::tempdir().unwrap();

    let mut calls = Vec::new();
    client
        .download(&video(), 0, dir.path().join("v.mp4"), |done, total| calls.push((done, total)))
        .unwrap();
    assert_eq!(calls, vec![(200, 0), (400, 0), (500, 0)]);
}

#[test]
fn refused_transfer_never_touches_the_sink() {
    let mut transfer = FakeTransfer::ok(payload(100), 10);
    transfer.status = 403;
    let client = client(FakeTransport::default().with_transfer(URL, transfer));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.mp4");

    let mut calls = 0;
    let err = client
        .download(&video(), 0, &path, |_, _| calls += 1)
        .unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, Error::HttpStatus { status: 403, .. }));
    assert_eq!(calls, 0);
    assert!(!path.exists());
}

#[test]
fn sink_creation_failure() {
    let client = client(FakeTransport::default().with_transfer(URL, FakeTransfer::ok(payload(10), 10)));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("v.mp4");

    let err = client.download(&video(), 0, &path, |_, _| {}).unwrap_err();
    match err {
        Error::SinkCreation { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected SinkCreation, got {other:?}"),
    }
}

#[test]
fn out_of_range_index() {
    let client = client(FakeTransport::default());
    let dir = tempfile::tempdir().unwrap();

    let err = client
        .download(&video(), 3, dir.path().join("v.mp4"), |_, _| {})
        .unwrap_err();
    assert!(matches!(err, Error::NoSuchEncoding { index: 3, available: 1 }));
    assert!(client.transport().requests().is_empty());
}

#[test]
fn broken_stream_keeps_written_bytes() {
    let mut transfer = FakeTransfer::ok(payload(300), 100);
    transfer.fail_at_end = true;
    let client = client(FakeTransport::default().with_transfer(URL, transfer));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.mp4");

    let mut calls = Vec::new();
    let err = client
        .download(&video(), 0, &path, |done, _| calls.push(done))
        .unwrap_err();

    assert!(matches!(err, Error::Transfer(_)));
    assert!(err.is_transport());
    assert_eq!(calls, vec![100, 200, 300]);
    // No rollback; whatever reached the buffer before the failure may remain.
    assert!(path.exists());
}
