//! AI CLI連携モジュール
//!
//! claude / codex / gemini のCLIをサブプロセスで呼び出す。
//! - 写真解析: 呼び出し側のプロンプト + 写真パス → `{description, detected_items}`
//! - 項目検出: 部屋の写真群 → 項目名の配列
//! - 文字起こし: 音声パス → `{text}`（音声を読めるCLIのみ）
//!
//! プロンプト生成と応答パースは vistoria_common を使用

use super::{AiService, ServiceResult};
use crate::ai_provider::AiProvider;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use vistoria_common::prompts::{build_detection_prompt, build_transcription_prompt, localize_label};
use vistoria_common::{
    parse_detection_response, parse_transcription_response, parse_vision_response, ServiceError,
    Transcription, VisionAnalysis,
};

pub struct CliAiService {
    provider: AiProvider,
    timeout: Duration,
}

impl CliAiService {
    pub fn new(provider: AiProvider, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider(&self) -> AiProvider {
        self.provider
    }

    async fn run_cli(&self, prompt: &str) -> ServiceResult<String> {
        let command_name = self.provider.command_name();
        // 改行をスペースに置換してCLI引数で渡す
        let prompt = prompt.replace('\n', " ");

        tracing::debug!(provider = %self.provider, prompt_len = prompt.len(), "AI CLI呼び出し");

        // Windowsではcmd /c経由
        #[cfg(windows)]
        let mut command = {
            let mut c = Command::new("cmd");
            c.args(["/c", command_name]);
            c
        };
        #[cfg(not(windows))]
        let mut command = Command::new(command_name);

        command.args(self.provider.prompt_args(&prompt)).kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                ServiceError::Network(format!(
                    "{} CLIが{}秒以内に応答しません",
                    command_name,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| ServiceError::Network(format!("{} CLI実行エラー: {}", command_name, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ServiceError::Server {
                status: output
                    .status
                    .code()
                    .and_then(|c| u16::try_from(c).ok())
                    .unwrap_or(0),
                detail: format!("{} CLI failed: {}", command_name, stderr.trim()),
            });
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();

        let preview: String = response.chars().take(500).collect();
        tracing::debug!(response_len = response.len(), %preview, "AI CLI応答");

        Ok(response)
    }
}

/// CLIに渡すための絶対パス（失敗時はそのまま）
fn display_path(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
        .replace('\\', "/")
}

#[async_trait]
impl AiService for CliAiService {
    async fn detect_items_from_images(&self, images: &[PathBuf]) -> ServiceResult<Vec<String>> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let image_list = images.iter().map(|p| display_path(p)).collect::<Vec<_>>();
        let file_names = image_list.iter().map(String::as_str).collect::<Vec<_>>();
        let prompt = format!(
            "Read the following image files and analyze them: {}\n\n{}",
            image_list.join(", "),
            build_detection_prompt(&file_names)
        );

        let response = self.run_cli(&prompt).await?;
        let labels = parse_detection_response(&response)
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;
        // 英語ラベルで返るモデルがあるのでチェックリスト名に寄せる
        Ok(labels.iter().map(|label| localize_label(label)).collect())
    }

    async fn analyze_image(
        &self,
        image: &Path,
        context_prompt: &str,
    ) -> ServiceResult<VisionAnalysis> {
        let prompt = format!(
            "Read the following image file and analyze it: {}\n\n{}",
            display_path(image),
            context_prompt
        );

        let response = self.run_cli(&prompt).await?;
        let mut analysis = parse_vision_response(&response)
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;
        analysis.detected_items = analysis
            .detected_items
            .iter()
            .map(|label| localize_label(label))
            .collect();
        Ok(analysis)
    }

    fn supports_transcription(&self) -> bool {
        self.provider.supports_audio()
    }

    async fn transcribe_audio(&self, audio: &Path) -> ServiceResult<Transcription> {
        if !self.supports_transcription() {
            return Err(ServiceError::Unsupported(format!(
                "{} CLIは音声を読めません: {}",
                self.provider,
                audio.display()
            )));
        }

        let prompt = format!("@{}\n\n{}", display_path(audio), build_transcription_prompt());
        let response = self.run_cli(&prompt).await?;
        parse_transcription_response(&response)
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))
    }
}
