use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Claude,
    Codex,
    Gemini,
}

impl AiProvider {
    pub fn command_name(&self) -> &'static str {
        match self {
            AiProvider::Claude => "claude",
            AiProvider::Codex => "codex",
            AiProvider::Gemini => "gemini",
        }
    }

    /// 音声ファイルを読めるCLIか（gemini は `@パス` で添付できる）
    pub fn supports_audio(&self) -> bool {
        matches!(self, AiProvider::Gemini)
    }

    /// プロンプトを渡すCLI引数
    pub fn prompt_args<'a>(&self, prompt: &'a str) -> Vec<&'a str> {
        match self {
            AiProvider::Claude => vec!["-p", prompt, "--output-format", "text"],
            AiProvider::Codex => vec!["exec", prompt],
            AiProvider::Gemini => vec!["-p", prompt],
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command_name())
    }
}
