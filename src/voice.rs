//! 音声コマンド検出
//!
//! 文字起こしテキストから点検操作を読み取る:
//! - 「marcar X como <status>」「X está <status>」→ 状態設定
//! - 「próximo cômodo」「próxima sala」「avançar」→ 次の部屋へ
//! - 「observação: ...」「anotar: ...」「nota: ...」→ 所見の追記

use regex::Regex;
use vistoria_common::{InspectionState, Result, Status};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCommand {
    SetStatus { item: String, status: Status },
    NextRoom,
    AddNote(String),
}

/// 項目名の前に来やすい冠詞・つなぎ語
const LEADING_WORDS: &[&str] = &[
    "o", "a", "os", "as", "que", "e", "eu", "acho", "então", "também", "mas", "agora", "aqui",
];

/// 項目名を小文字化し、先頭の冠詞・つなぎ語を除去
fn clean_item(raw: &str) -> String {
    let item = raw.trim().to_lowercase();
    item.split_whitespace()
        .skip_while(|word| LEADING_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_status(word: &str) -> Option<Status> {
    let word = word.to_lowercase();
    if word == "ok" {
        Some(Status::Ok)
    } else if word.starts_with("danificad") {
        Some(Status::Damaged)
    } else if word.starts_with("suj") {
        Some(Status::Dirty)
    } else if word == "ausente" {
        Some(Status::Missing)
    } else {
        None
    }
}

/// テキストから音声コマンドを検出（出現順）
pub fn detect_voice_commands(text: &str) -> Vec<VoiceCommand> {
    lazy_static::lazy_static! {
        static ref MARK_RE: Regex = Regex::new(
            r"(?i)\bmarcar?\s+(.+?)\s+como\s+(ok|danificad[oa]|suj[oa]|ausente)\b"
        ).unwrap();
        static ref IS_RE: Regex = Regex::new(
            r"(?i)\b((?:[^\s.,;!?]+\s+){0,2}[^\s.,;!?]+)\s+está\s+(ok|danificad[oa]|suj[oa]|ausente)\b"
        ).unwrap();
        static ref NEXT_RE: Regex = Regex::new(
            r"(?i)próximo\s+cômodo|próxima\s+sala|\bavançar\b"
        ).unwrap();
        static ref NOTE_RE: Regex = Regex::new(
            r"(?i)(?:observação|anotar|nota):\s*(.+)"
        ).unwrap();
    }

    let mut found: Vec<(usize, VoiceCommand)> = Vec::new();

    for caps in MARK_RE.captures_iter(text).chain(IS_RE.captures_iter(text)) {
        let item = clean_item(&caps[1]);
        if item.is_empty() {
            continue;
        }
        if let Some(status) = parse_status(&caps[2]) {
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            found.push((start, VoiceCommand::SetStatus { item, status }));
        }
    }

    for m in NEXT_RE.find_iter(text) {
        found.push((m.start(), VoiceCommand::NextRoom));
    }

    for caps in NOTE_RE.captures_iter(text) {
        let note = caps[1].trim();
        if !note.is_empty() {
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            found.push((start, VoiceCommand::AddNote(note.to_string())));
        }
    }

    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, command)| command).collect()
}

/// 検出したコマンドを点検状態に反映
///
/// 所見は現在の項目の末尾に追記する。`NextRoom` は状態を変えないので呼び出し側で扱う。
/// 戻り値は反映したコマンド数。
pub fn apply_voice_commands(
    state: &mut InspectionState,
    room: &str,
    current_item: &str,
    commands: &[VoiceCommand],
) -> Result<usize> {
    let mut applied = 0;
    for command in commands {
        match command {
            VoiceCommand::SetStatus { item, status } => {
                state.set_status(room, item, *status)?;
                applied += 1;
            }
            VoiceCommand::AddNote(note) => {
                let notes = match state.item(room, current_item) {
                    Some(record) if !record.notes.is_empty() => {
                        format!("{}\n{}", record.notes, note)
                    }
                    _ => note.clone(),
                };
                state.update_notes(room, current_item, notes)?;
                applied += 1;
            }
            VoiceCommand::NextRoom => {}
        }
    }
    Ok(applied)
}
