//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use vistoria::error::VistoriaError;
use vistoria::scanner::{self, MediaKind};
use vistoria_common::{InspectionState, NameKind, ServiceError};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"), MediaKind::Photo);
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, VistoriaError::FolderNotFound(_)));
}

/// 写真のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_photos() {
    let dir = tempdir().expect("Failed to create temp dir");

    // テキストファイルのみ作成
    std::fs::write(dir.path().join("notas.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::scan_folder(dir.path(), MediaKind::Photo);
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// VistoriaErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        VistoriaError::Config("テスト設定エラー".to_string()),
        VistoriaError::FileNotFound("sala.jpg".to_string()),
        VistoriaError::FolderNotFound("/fotos".to_string()),
        VistoriaError::NoMediaFound("/fotos".to_string()),
        VistoriaError::SessionNotFound(".vistoria-session.json".to_string()),
        VistoriaError::SessionVersion { expected: 1, found: 2 },
        VistoriaError::ExcelGeneration("シート作成失敗".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// セッション未作成のメッセージに開始方法を含む
#[test]
fn test_session_not_found_message() {
    let err = VistoriaError::SessionNotFound("x.json".to_string());
    let display = format!("{}", err);

    assert!(display.contains("x.json"));
    assert!(display.contains("vistoria init"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: VistoriaError = io_err.into();

    assert!(matches!(err, VistoriaError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: VistoriaError = json_err.into();

    assert!(matches!(err, VistoriaError::JsonParse(_)));
}

/// 名前の検証エラーは共通エラーのまま透過する
#[test]
fn test_invalid_name_is_transparent() {
    let mut state = InspectionState::new();
    let common_err = state.set_status("  ", "pia", vistoria_common::Status::Ok).unwrap_err();
    let err: VistoriaError = common_err.into();

    assert!(matches!(
        err,
        VistoriaError::Common(vistoria_common::Error::InvalidName(NameKind::Room))
    ));
    assert_eq!(format!("{}", err), "部屋名が空です");
    assert!(state.is_empty());
}

/// 検出サービスのエラーは原因（ステータス・詳細）を保持する
#[test]
fn test_detection_service_error_keeps_cause() {
    let common_err: vistoria_common::Error = ServiceError::Server {
        status: 503,
        detail: "Service Unavailable".to_string(),
    }
    .into();
    let err: VistoriaError = common_err.into();

    let display = format!("{}", err);
    assert!(display.contains("503"));
    assert!(display.contains("Service Unavailable"));
}
