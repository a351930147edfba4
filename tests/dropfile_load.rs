use std::time::Duration;

use ansidoor::door::dropfile::{self, DropFileError};
use ansidoor::door::session::{CommType, Emulation, TermSize};
use tokio_test::assert_ok;

mod common;
use common::{drop_file_dir, DOOR32_ANSI};

#[tokio::test]
async fn loads_from_node_directory() {
    let (tmp, _) = drop_file_dir("door32.sys", DOOR32_ANSI);
    let door = assert_ok!(dropfile::load(tmp.path()).await);

    assert_eq!(door.alias, "ZeroCool");
    assert_eq!(door.real_name, "Jane Doe");
    assert_eq!(door.node, 3);
    assert_eq!(door.emulation, Emulation::Ansi);
    assert_eq!(door.time_left_minutes, 30);
    assert_eq!(door.comm_type, CommType::Telnet);
    assert_eq!(door.bbs_id, "Mystic BBS 1.12");
}

#[tokio::test]
async fn loads_upper_case_file_name_from_directory() {
    let (tmp, _) = drop_file_dir("DOOR32.SYS", DOOR32_ANSI);
    let door = assert_ok!(dropfile::load(tmp.path()).await);
    assert_eq!(door.alias, "ZeroCool");
}

#[tokio::test]
async fn loads_explicit_file_path() {
    let (_tmp, path) = drop_file_dir("node3.sys", &DOOR32_ANSI.replace("\r\n", "\n"));
    let door = assert_ok!(dropfile::load(&path).await);
    assert_eq!(door.node, 3);
}

#[tokio::test]
async fn missing_file_reports_resolved_path() {
    let tmp = tempfile::tempdir().unwrap();
    let err = dropfile::load(tmp.path()).await.unwrap_err();
    match err {
        DropFileError::Io { path, .. } => assert_eq!(path, tmp.path().join("door32.sys")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[tokio::test]
async fn truncated_file_is_rejected() {
    let truncated: String = DOOR32_ANSI.split_inclusive("\r\n").take(9).collect();
    let (_tmp, path) = drop_file_dir("door32.sys", &truncated);
    let err = dropfile::load(&path).await.unwrap_err();
    assert!(matches!(err, DropFileError::MissingField { line: 10, .. }), "{err:?}");
}

#[tokio::test]
async fn descriptor_combines_drop_file_and_terminal_size() {
    let (tmp, _) = drop_file_dir("door32.sys", DOOR32_ANSI);
    let door = dropfile::load(tmp.path()).await.unwrap();

    let session = door.into_descriptor(TermSize::new(132, 50), TermSize::new(30, 7));

    assert_eq!(session.alias, "ZeroCool");
    assert_eq!(session.time_left, Duration::from_secs(30 * 60));
    assert_eq!((session.width, session.height), (132, 50));
    assert_eq!((session.modal_width, session.modal_height), (66, 25));
    assert_eq!(session.security_level, 20);
    assert_eq!(session.user_record, 42);
    assert_eq!(session.baud_rate, 38400);
}
