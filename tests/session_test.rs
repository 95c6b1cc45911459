//! セッションファイルのテスト
//!
//! 保存・読み込み・バージョン不一致・削除を検証

use vistoria::error::VistoriaError;
use vistoria::session::Session;
use vistoria_common::{ChecklistTemplate, InspectionInfo, InspectionKind, InspectionState, Status};
use tempfile::tempdir;

fn sample_session() -> Session {
    let template = ChecklistTemplate::from_preset("apartamento").expect("プリセットがない");
    let mut state = InspectionState::from_template(&template).unwrap();
    state.set_status("cozinha", "torneira", Status::Damaged).unwrap();
    state.add_photo("cozinha", "torneira", "fotos/t1.jpg", "vazamento na base").unwrap();
    state.add_audio("cozinha", "torneira", "audio/t1.m4a", "torneira pingando").unwrap();
    state.update_notes("sala", "piso", "riscos perto da porta").unwrap();

    let info = InspectionInfo {
        property_address: "Rua das Laranjeiras, 100 - apto 302".to_string(),
        landlord_name: "Maria".to_string(),
        tenant_name: "João".to_string(),
        inspection_kind: InspectionKind::Saida,
        template: Some(template.name.clone()),
        ..Default::default()
    };
    Session::new(info, state)
}

/// 保存して読み込むと同じ内容
#[test]
fn test_session_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("vistoria.json");

    let session = sample_session();
    session.save(&path).expect("セッション保存失敗");

    let loaded = Session::load(&path).expect("セッション読み込み失敗");
    assert_eq!(loaded.version(), Session::CURRENT_VERSION);
    assert_eq!(loaded.info, session.info);
    assert_eq!(loaded.state, session.state);

    let record = loaded.state.item("cozinha", "torneira").unwrap();
    assert_eq!(record.status, Some(Status::Damaged));
    assert_eq!(record.photos[0].handle.as_str(), "fotos/t1.jpg");
    assert_eq!(record.audios[0].transcript, "torneira pingando");
}

/// 部屋・項目の順序が保存後も保たれる
#[test]
fn test_session_preserves_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("vistoria.json");

    let session = sample_session();
    session.save(&path).unwrap();
    let loaded = Session::load(&path).unwrap();

    let before: Vec<_> = session.state.rooms().map(|r| r.name().to_string()).collect();
    let after: Vec<_> = loaded.state.rooms().map(|r| r.name().to_string()).collect();
    assert_eq!(before, after);

    let items: Vec<_> = loaded.state.room("cozinha").iter().map(|r| r.name.clone()).collect();
    assert_eq!(items.first().map(String::as_str), Some("pia"));
}

/// 存在しないセッション
#[test]
fn test_session_not_found() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = Session::load(&dir.path().join("none.json"));

    assert!(matches!(result, Err(VistoriaError::SessionNotFound(_))));
}

/// バージョン不一致はエラー（黙って捨てない）
#[test]
fn test_session_version_mismatch() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("old.json");
    std::fs::write(&path, r#"{"version": 0, "rooms": {"sala": ["sofá"]}}"#).unwrap();

    let result = Session::load(&path);
    assert!(matches!(
        result,
        Err(VistoriaError::SessionVersion { expected: 1, found: 0 })
    ));
    assert!(path.exists(), "古いセッションが消された");
}

/// u32 を超えるバージョンは切り詰めずに不一致
#[test]
fn test_session_version_overflow_is_mismatch() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("overflow.json");
    // 2^32 + 1 は u32 に切り詰めると 1 になる
    std::fs::write(&path, r#"{"version": 4294967297, "info": {}, "state": {}}"#).unwrap();

    let result = Session::load(&path);
    assert!(matches!(
        result,
        Err(VistoriaError::SessionVersion { expected: 1, found: u32::MAX })
    ));
}

/// 壊れたJSON
#[test]
fn test_session_broken_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Session::load(&path), Err(VistoriaError::JsonParse(_))));
}

/// 保存先のフォルダがなければ作る
#[test]
fn test_session_save_creates_parent() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("imoveis").join("apto302.json");

    Session::default().save(&path).unwrap();
    assert!(Session::load(&path).unwrap().state.is_empty());
}

/// 削除
#[test]
fn test_session_remove() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("vistoria.json");
    Session::default().save(&path).unwrap();

    assert!(Session::remove(&path).unwrap());
    assert!(!Session::remove(&path).unwrap());
}
