use crate::ai_provider::AiProvider;
use crate::error::{Result, VistoriaError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// セッションファイルの既定名（カレントディレクトリ）
pub const SESSION_FILE_NAME: &str = ".vistoria-session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai_provider: AiProvider,
    pub session_path: Option<PathBuf>,
    /// 修理費見積りの地域コード
    pub region: String,
    pub timeout_seconds: u64,
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai_provider: AiProvider::Claude,
            session_path: None,
            region: vistoria_common::cost::DEFAULT_REGION.into(),
            timeout_seconds: 120,
            language: "pt-BR".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VistoriaError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("vistoria").join("config.json"))
    }

    /// 使用するセッションファイル（引数 > 設定 > 既定）
    pub fn session_file(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.session_path.clone())
            .unwrap_or_else(|| PathBuf::from(SESSION_FILE_NAME))
    }
}
