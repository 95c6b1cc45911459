//! 一括取り込み・自動検出の統合テスト
//!
//! 固定応答のAIサービスで、取り込み順・部分失敗・候補算出を検証

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use vistoria::analyzer::{AiService, ServiceResult};
use vistoria::error::VistoriaError;
use vistoria::upload::{analyze_item, attach_audios, attach_photos, auto_detect, FileOutcome};
use vistoria_common::{Error, InspectionState, ServiceError, Transcription, VisionAnalysis};

/// ファイル名ごとに遅延と応答を決めるAIサービス
#[derive(Default)]
struct FakeService {
    delays: HashMap<String, u64>,
    failures: HashMap<String, ServiceError>,
    detected: HashMap<String, Vec<String>>,
    detection: Option<ServiceResult<Vec<String>>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeService {
    fn delay(mut self, file: &str, ms: u64) -> Self {
        self.delays.insert(file.to_string(), ms);
        self
    }

    fn fail(mut self, file: &str, error: ServiceError) -> Self {
        self.failures.insert(file.to_string(), error);
        self
    }

    fn detects(mut self, file: &str, items: &[&str]) -> Self {
        self.detected
            .insert(file.to_string(), items.iter().map(|s| s.to_string()).collect());
        self
    }

    fn detection(mut self, result: ServiceResult<Vec<String>>) -> Self {
        self.detection = Some(result);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, file: &Path) -> ServiceResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let name = file.file_name().unwrap().to_string_lossy().to_string();
        let delay = self.delays.get(&name).copied().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.failures.get(&name) {
            Some(error) => Err(error.clone()),
            None => Ok(name),
        }
    }
}

#[async_trait]
impl AiService for FakeService {
    async fn detect_items_from_images(&self, _images: &[PathBuf]) -> ServiceResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.detection.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn analyze_image(
        &self,
        image: &Path,
        _context_prompt: &str,
    ) -> ServiceResult<VisionAnalysis> {
        let name = self.respond(image).await?;
        Ok(VisionAnalysis {
            description: format!("descrição de {}", name),
            detected_items: self.detected.get(&name).cloned().unwrap_or_default(),
        })
    }

    fn supports_transcription(&self) -> bool {
        true
    }

    async fn transcribe_audio(&self, audio: &Path) -> ServiceResult<Transcription> {
        let name = self.respond(audio).await?;
        Ok(Transcription {
            text: format!("transcrição de {}", name),
        })
    }
}

/// 文字起こしを実装しないサービス（既定実装を使う）
struct VisionOnly;

#[async_trait]
impl AiService for VisionOnly {
    async fn detect_items_from_images(&self, _images: &[PathBuf]) -> ServiceResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn analyze_image(
        &self,
        _image: &Path,
        _context_prompt: &str,
    ) -> ServiceResult<VisionAnalysis> {
        Ok(VisionAnalysis::default())
    }
}

fn files(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| PathBuf::from(format!("fotos/{}", n))).collect()
}

fn photo_handles(state: &InspectionState, room: &str, item: &str) -> Vec<String> {
    state
        .item(room, item)
        .map(|r| r.photos.iter().map(|p| p.handle.as_str().to_string()).collect())
        .unwrap_or_default()
}

// =============================================
// attach_photos テスト
// =============================================

/// 3枚中2枚目が失敗しても、1枚目と3枚目は記録される
#[tokio::test]
async fn test_attach_photos_partial_failure() {
    let service = FakeService::default().fail(
        "2.jpg",
        ServiceError::Server {
            status: 500,
            detail: "Erro na análise de imagem".into(),
        },
    );
    let mut state = InspectionState::new();

    let photos = files(&["1.jpg", "2.jpg", "3.jpg"]);
    let report = attach_photos(&mut state, &service, "sala", "sofá", &photos).await.unwrap();

    assert_eq!(report.attached_count(), 2);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(photo_handles(&state, "sala", "sofá"), vec!["fotos/1.jpg", "fotos/3.jpg"]);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, Path::new("fotos/2.jpg"));
    assert!(matches!(failures[0].1, ServiceError::Server { status: 500, .. }));

    let record = state.item("sala", "sofá").unwrap();
    assert_eq!(record.photos[0].description, "descrição de 1.jpg");
    assert_eq!(record.photos[1].description, "descrição de 3.jpg");
}

/// 後のファイルが先に終わっても、記録順は取り込み順
#[tokio::test]
async fn test_attach_photos_keeps_upload_order() {
    let service = FakeService::default()
        .delay("a.jpg", 60)
        .delay("b.jpg", 30)
        .delay("c.jpg", 0);
    let mut state = InspectionState::new();

    let photos = files(&["a.jpg", "b.jpg", "c.jpg"]);
    let report = attach_photos(&mut state, &service, "cozinha", "pia", &photos).await.unwrap();

    assert_eq!(
        photo_handles(&state, "cozinha", "pia"),
        vec!["fotos/a.jpg", "fotos/b.jpg", "fotos/c.jpg"],
        "取り込み順で記録されていない"
    );
    let order: Vec<_> = report.outcomes.iter().map(|o| o.file().to_path_buf()).collect();
    assert_eq!(order, files(&["a.jpg", "b.jpg", "c.jpg"]));
}

/// AI呼び出しは並行に発行される
#[tokio::test]
async fn test_attach_photos_calls_in_flight_concurrently() {
    let service = FakeService::default()
        .delay("a.jpg", 50)
        .delay("b.jpg", 50)
        .delay("c.jpg", 50);
    let mut state = InspectionState::new();

    attach_photos(&mut state, &service, "quarto", "cama", &files(&["a.jpg", "b.jpg", "c.jpg"]))
        .await
        .unwrap();

    assert_eq!(service.max_in_flight.load(Ordering::SeqCst), 3);
}

/// 写っていた他の項目は候補として返すだけで、台帳には追加しない
#[tokio::test]
async fn test_attach_photos_returns_candidates_without_mutation() {
    let service = FakeService::default()
        .detects("1.jpg", &["mesa", "Sofá", "tv"])
        .detects("2.jpg", &[" MESA ", "tapete"]);
    let mut state = InspectionState::new();
    state.ensure_item("sala", "tv").unwrap();

    let report = attach_photos(&mut state, &service, "sala", "sofá", &files(&["1.jpg", "2.jpg"]))
        .await
        .unwrap();

    // 撮影対象（sofá）と既存（tv）は除外、mesa は先勝ち
    assert_eq!(report.candidates, vec!["mesa", "tapete"]);
    assert!(state.item("sala", "mesa").is_none());
    assert_eq!(state.room("sala").len(), 2);
}

/// 不正な名前はAIを呼ぶ前に拒否し、何も作らない
#[tokio::test]
async fn test_attach_photos_invalid_name() {
    let service = FakeService::default();
    let mut state = InspectionState::new();

    let result = attach_photos(&mut state, &service, "sala", "   ", &files(&["1.jpg"])).await;

    assert!(matches!(result, Err(VistoriaError::Common(Error::InvalidName(_)))));
    assert_eq!(service.calls(), 0);
    assert!(state.is_empty());
}

/// ファイルなしは空の結果
#[tokio::test]
async fn test_attach_photos_no_files() {
    let service = FakeService::default();
    let mut state = InspectionState::new();

    let report = attach_photos(&mut state, &service, "sala", "sofá", &[]).await.unwrap();

    assert!(report.outcomes.is_empty());
    assert!(report.candidates.is_empty());
}

// =============================================
// attach_audios テスト
// =============================================

#[tokio::test]
async fn test_attach_audios_partial_failure() {
    let service = FakeService::default().fail("2.m4a", ServiceError::Network("timeout".into()));
    let mut state = InspectionState::new();

    let report = attach_audios(&mut state, &service, "banheiro", "pia", &files(&["1.m4a", "2.m4a"]))
        .await
        .unwrap();

    assert_eq!(report.attached_count(), 1);
    let record = state.item("banheiro", "pia").unwrap();
    assert_eq!(record.audios.len(), 1);
    assert_eq!(record.audios[0].transcript, "transcrição de 1.m4a");
    assert!(matches!(
        report.outcomes[1],
        FileOutcome::Failed { error: ServiceError::Network(_), .. }
    ));
}

/// 文字起こし非対応のサービスでは全件失敗、記録なし
#[tokio::test]
async fn test_attach_audios_unsupported() {
    let mut state = InspectionState::new();

    let report = attach_audios(&mut state, &VisionOnly, "sala", "porta", &files(&["1.wav"]))
        .await
        .unwrap();

    assert_eq!(report.failed_count(), 1);
    assert!(matches!(
        report.outcomes[0],
        FileOutcome::Failed { error: ServiceError::Unsupported(_), .. }
    ));
    assert!(state.item("sala", "porta").is_none());
}

#[test]
fn test_supports_transcription_default_is_false() {
    assert!(!VisionOnly.supports_transcription());
    assert!(FakeService::default().supports_transcription());
}

// =============================================
// auto_detect テスト
// =============================================

#[tokio::test]
async fn test_auto_detect_then_confirm_is_idempotent() {
    let service = FakeService::default().detection(Ok(vec![
        "Sofá".to_string(),
        "sofa".to_string(),
        " SOFÁ ".to_string(),
        "tv".to_string(),
    ]));
    let mut state = InspectionState::new();
    state.ensure_item("sala", "Sofá").unwrap();

    let candidates = auto_detect(&state, &service, "sala", &files(&["sala.jpg"])).await.unwrap();
    assert_eq!(candidates, vec!["sofa", "tv"]);
    assert_eq!(state.room("sala").len(), 1, "候補算出で台帳が変わった");

    let added = state.confirm_add("sala", &candidates).unwrap();
    assert_eq!(added, vec!["sofa", "tv"]);
    let again = state.confirm_add("sala", &candidates).unwrap();
    assert!(again.is_empty());
    assert_eq!(state.room("sala").len(), 3);
}

#[tokio::test]
async fn test_auto_detect_service_failure() {
    let service = FakeService::default()
        .detection(Err(ServiceError::Network("connection refused".into())));
    let state = InspectionState::new();

    let result = auto_detect(&state, &service, "sala", &files(&["sala.jpg"])).await;

    match result {
        Err(VistoriaError::Common(Error::DetectionService(ServiceError::Network(detail)))) => {
            assert_eq!(detail, "connection refused");
        }
        other => panic!("DetectionServiceエラーになっていない: {:?}", other),
    }
}

#[tokio::test]
async fn test_auto_detect_empty_is_not_error() {
    let service = FakeService::default().detection(Ok(Vec::new()));
    let state = InspectionState::new();

    let candidates = auto_detect(&state, &service, "sala", &files(&["sala.jpg"])).await.unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_auto_detect_invalid_room() {
    let service = FakeService::default();
    let state = InspectionState::new();

    let result = auto_detect(&state, &service, " ", &files(&["sala.jpg"])).await;
    assert!(matches!(result, Err(VistoriaError::Common(Error::InvalidName(_)))));
    assert_eq!(service.calls(), 0);
}

// =============================================
// analyze_item テスト
// =============================================

#[tokio::test]
async fn test_analyze_item_overwrites_analysis() {
    let service = FakeService::default();
    let mut state = InspectionState::new();
    state.set_ai_analysis("cozinha", "fogão", "antigo").unwrap();

    let photo = Path::new("fotos/fogao.jpg");
    let analysis = analyze_item(&mut state, &service, "cozinha", "fogão", photo).await.unwrap();

    assert_eq!(analysis, "descrição de fogao.jpg");
    let record = state.item("cozinha", "fogão").unwrap();
    assert_eq!(record.ai_analysis.as_deref(), Some("descrição de fogao.jpg"));
    assert!(record.photos.is_empty(), "所見の更新で写真が記録された");
}

#[tokio::test]
async fn test_analyze_item_failure_keeps_previous() {
    let service = FakeService::default().fail(
        "fogao.jpg",
        ServiceError::MalformedResponse("sem JSON".into()),
    );
    let mut state = InspectionState::new();
    state.set_ai_analysis("cozinha", "fogão", "antigo").unwrap();

    let photo = Path::new("fotos/fogao.jpg");
    let result = analyze_item(&mut state, &service, "cozinha", "fogão", photo).await;

    assert!(result.is_err());
    assert_eq!(
        state.item("cozinha", "fogão").unwrap().ai_analysis.as_deref(),
        Some("antigo")
    );
}
