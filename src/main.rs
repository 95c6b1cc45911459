use anyhow::{bail, Context};
use clap::Parser;
use dialoguer::{Confirm, MultiSelect};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vistoria::{cli, config, error, export, scanner, session, upload, voice};
use vistoria::analyzer::{AiService, CliAiService};
use cli::{Cli, Commands};
use config::Config;
use error::VistoriaError;
use scanner::MediaKind;
use session::Session;
use vistoria_common::template::PRESET_NAMES;
use vistoria_common::{
    compare_inspections, determine_repair_priority, estimate_repair_costs, ChecklistTemplate,
    CostTable, InspectionInfo, InspectionState,
};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;
    let session_path = config.session_file(cli.session.as_deref());
    let provider = cli.ai_provider.unwrap_or(config.ai_provider);
    let service = CliAiService::new(provider, Duration::from_secs(config.timeout_seconds));
    tracing::debug!(session = %session_path.display(), %provider, "starting");

    match cli.command {
        Commands::Init {
            template,
            template_file,
            empty,
            address,
            landlord,
            tenant,
            kind,
            force,
        } => {
            if session_path.exists() && !force {
                bail!(
                    "セッションが既にあります: {}（上書きするには --force）",
                    session_path.display()
                );
            }

            let template = if empty {
                None
            } else if let Some(path) = template_file {
                Some(
                    ChecklistTemplate::from_file(&path)
                        .with_context(|| format!("テンプレート読み込み失敗: {}", path.display()))?,
                )
            } else {
                Some(ChecklistTemplate::from_preset(&template).ok_or_else(|| {
                    VistoriaError::Config(format!(
                        "未知のテンプレート: {}（{} のいずれか）",
                        template,
                        PRESET_NAMES.join("/")
                    ))
                })?)
            };

            let state = match &template {
                Some(t) => InspectionState::from_template(t)?,
                None => InspectionState::new(),
            };
            let info = InspectionInfo {
                property_address: address,
                landlord_name: landlord,
                tenant_name: tenant,
                inspection_kind: kind,
                inspection_date: Some(chrono::Local::now().naive_local()),
                template: template.map(|t| t.name),
            };

            let session = Session::new(info, state);
            session.save(&session_path)?;
            println!(
                "✔ 点検を開始しました ({}): {}部屋 / {}項目",
                session.info.inspection_kind,
                session.state.room_count(),
                session.state.item_count()
            );
            println!("  セッション: {}", session_path.display());
        }

        Commands::Status { room, item, status, clear } => {
            let mut session = Session::load(&session_path)?;

            if clear {
                session.state.clear_status(&room, &item)?;
                session.save(&session_path)?;
                println!("✔ {} / {}: 未設定に戻しました", room.trim(), item.trim());
            } else if let Some(status) = status {
                session.state.set_status(&room, &item, status)?;
                session.save(&session_path)?;
                println!("✔ {} / {}: {}", room.trim(), item.trim(), status.label());
            } else {
                match session.state.item(&room, &item) {
                    Some(record) => println!(
                        "{} / {}: {}",
                        room.trim(),
                        record.name,
                        record.status.map(|s| s.label()).unwrap_or("未設定")
                    ),
                    None => println!("項目がありません: {} / {}", room.trim(), item.trim()),
                }
            }
        }

        Commands::Notes { room, item, text } => {
            let mut session = Session::load(&session_path)?;
            session.state.update_notes(&room, &item, text)?;
            session.save(&session_path)?;
            println!("✔ 所見を保存しました: {} / {}", room.trim(), item.trim());
        }

        Commands::Show { room } => {
            let session = Session::load(&session_path)?;
            print_info(&session.info);
            match room {
                Some(room) => print_room(&session.state.room(&room)),
                None => {
                    if session.state.is_empty() {
                        println!("（項目なし）");
                    }
                    for ledger in session.state.rooms() {
                        print_room(ledger);
                    }
                }
            }
        }

        Commands::Photo { room, item, files, yes, no_candidates } => {
            let mut session = Session::load(&session_path)?;
            let paths = collect_paths(&files, MediaKind::Photo)?;

            println!(
                "📸 {} / {}: {}枚の写真を解析中... ({})",
                room.trim(),
                item.trim(),
                paths.len(),
                provider
            );
            let report =
                upload::attach_photos(&mut session.state, &service, &room, &item, &paths).await?;
            session.save(&session_path)?;
            print_upload_report(&report);

            if !no_candidates && !report.candidates.is_empty() {
                println!("\n写真に写っていた未登録の項目: {}", report.candidates.join(", "));
                let selected = choose_candidates(&report.candidates, yes)?;
                add_candidates(&mut session, &session_path, &room, &selected)?;
            }
        }

        Commands::Audio { room, item, files, no_commands } => {
            if !service.supports_transcription() {
                bail!(
                    "{} CLIは文字起こし非対応です（--ai-provider gemini を指定）",
                    provider
                );
            }
            let mut session = Session::load(&session_path)?;
            let paths = collect_paths(&files, MediaKind::Audio)?;

            println!(
                "🎙 {} / {}: {}件の音声を文字起こし中... ({})",
                room.trim(),
                item.trim(),
                paths.len(),
                provider
            );
            let report =
                upload::attach_audios(&mut session.state, &service, &room, &item, &paths).await?;
            print_upload_report(&report);

            if !no_commands {
                for outcome in &report.outcomes {
                    if let upload::FileOutcome::Attached { text, .. } = outcome {
                        let commands = voice::detect_voice_commands(text);
                        let applied = voice::apply_voice_commands(
                            &mut session.state,
                            &room,
                            &item,
                            &commands,
                        )?;
                        if applied > 0 {
                            println!("  音声コマンドを{}件反映しました", applied);
                        }
                        if commands.contains(&voice::VoiceCommand::NextRoom) {
                            println!("  → 次の部屋へ進んでください");
                        }
                    }
                }
            }
            session.save(&session_path)?;
        }

        Commands::Detect { room, files, yes } => {
            let mut session = Session::load(&session_path)?;
            let paths = collect_paths(&files, MediaKind::Photo)?;

            println!(
                "🔍 {}: {}枚の写真から項目を検出中... ({})",
                room.trim(),
                paths.len(),
                provider
            );
            let candidates = upload::auto_detect(&session.state, &service, &room, &paths).await?;

            if candidates.is_empty() {
                println!("新しい項目は検出されませんでした");
            } else {
                println!("未登録の項目: {}", candidates.join(", "));
                let selected = choose_candidates(&candidates, yes)?;
                add_candidates(&mut session, &session_path, &room, &selected)?;
            }
        }

        Commands::Analyze { room, item, photo } => {
            let mut session = Session::load(&session_path)?;
            let image = match photo {
                Some(path) => path,
                None => session
                    .state
                    .item(&room, &item)
                    .and_then(|record| record.photos.last())
                    .map(|p| PathBuf::from(p.handle.as_str()))
                    .ok_or_else(|| {
                        VistoriaError::NoMediaFound(format!("{} / {}", room.trim(), item.trim()))
                    })?,
            };
            if !image.is_file() {
                return Err(VistoriaError::FileNotFound(image.display().to_string()).into());
            }

            println!("🤖 {} / {}: AI所見を作成中... ({})", room.trim(), item.trim(), provider);
            let analysis =
                upload::analyze_item(&mut session.state, &service, &room, &item, &image).await?;
            session.save(&session_path)?;

            println!("{}", analysis);
            println!("優先度: {}", determine_repair_priority(&analysis));
        }

        Commands::Costs { region, table } => {
            let session = Session::load(&session_path)?;
            let table = load_cost_table(table.as_deref())?;
            let region = region.unwrap_or_else(|| config.region.clone());

            let estimate = estimate_repair_costs(&session.state, &table, &region);
            if estimate.detailed_costs.is_empty() {
                println!("修理が必要な項目はありません ({})", estimate.region);
            }
            for line in &estimate.detailed_costs {
                println!(
                    "  {} / {}: {} {:.2} ({}, {})",
                    line.room, line.item, estimate.currency, line.cost, line.repair_type, line.unit
                );
            }
            println!(
                "合計: {} {:.2} ({})",
                estimate.currency, estimate.total_cost, estimate.region
            );
        }

        Commands::Compare { entry, exit } => {
            let entry_session = Session::load(&entry)?;
            let exit_path = exit.unwrap_or_else(|| session_path.clone());
            let exit_session = Session::load(&exit_path)?;

            let report = compare_inspections(&entry_session.state, &exit_session.state);
            println!("変更: {}件", report.total_changes);
            for change in &report.changes {
                println!(
                    "  {} / {}: {} → {}",
                    change.room,
                    change.item,
                    change.from_status.map(|s| s.label()).unwrap_or("未設定"),
                    change.to_status.map(|s| s.label()).unwrap_or("未設定")
                );
            }
            println!(
                "悪化: {}件 / 改善: {}件 / 新規損傷: {}件",
                report.deteriorated.len(),
                report.improved.len(),
                report.new_damages.len()
            );
            println!("劣化の概算費用: {:.2}", report.estimated_deterioration_cost);
        }

        Commands::Report { output, costs } => {
            let session = Session::load(&session_path)?;
            let output = output.unwrap_or_else(|| PathBuf::from("."));
            let output_path = export::output_path_for(&output, export::DEFAULT_REPORT_NAME);

            let estimate = if costs {
                let table = CostTable::default_table();
                Some(estimate_repair_costs(&session.state, &table, &config.region))
            } else {
                None
            };

            println!("- Excelを生成中...");
            export::write_report(&session, estimate.as_ref(), &output_path)?;
            println!("✔ Excel出力: {}", output_path.display());
        }

        Commands::Reset { yes, delete } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("点検状態をすべて消去しますか？")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("中止しました");
                    return Ok(());
                }
            }

            if delete {
                match Session::remove(&session_path)? {
                    true => println!("✔ セッションを削除しました: {}", session_path.display()),
                    false => println!("セッションファイルが存在しません"),
                }
            } else {
                let mut session = Session::load(&session_path)?;
                session.state.reset_all();
                session.save(&session_path)?;
                println!("✔ 点検状態を消去しました");
            }
        }

        Commands::Config { set_provider, set_region, set_session_path, set_timeout, show } => {
            let mut changed = false;
            if let Some(p) = set_provider {
                config.ai_provider = p;
                changed = true;
            }
            if let Some(region) = set_region {
                config.region = region;
                changed = true;
            }
            if let Some(path) = set_session_path {
                config.session_path = Some(path);
                changed = true;
            }
            if let Some(seconds) = set_timeout {
                config.timeout_seconds = seconds;
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  AIプロバイダ: {}", config.ai_provider);
                println!("  地域: {}", config.region);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  言語: {}", config.language);
                println!("  セッション: {}", config.session_file(None).display());
            }
        }
    }

    Ok(())
}

fn collect_paths(files: &[PathBuf], kind: MediaKind) -> error::Result<Vec<PathBuf>> {
    let media = scanner::collect_media(files, kind)?;
    if media.is_empty() {
        let joined = files
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(VistoriaError::NoMediaFound(joined));
    }
    Ok(media.into_iter().map(|m| m.path).collect())
}

fn load_cost_table(path: Option<&Path>) -> anyhow::Result<CostTable> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("修理費テーブル読み込み失敗: {}", path.display()))?;
            Ok(CostTable::from_json(&content)?)
        }
        None => Ok(CostTable::default_table()),
    }
}

/// 候補から追加する項目を選ぶ（`--yes` なら全部）
fn choose_candidates(candidates: &[String], yes: bool) -> anyhow::Result<Vec<String>> {
    if yes {
        return Ok(candidates.to_vec());
    }

    let defaults = vec![true; candidates.len()];
    let chosen = MultiSelect::new()
        .with_prompt("追加する項目を選択（Spaceで切替、Enterで確定）")
        .items(candidates)
        .defaults(&defaults)
        .interact()?;

    Ok(chosen.into_iter().map(|i| candidates[i].clone()).collect())
}

fn add_candidates(
    session: &mut Session,
    session_path: &Path,
    room: &str,
    selected: &[String],
) -> anyhow::Result<()> {
    if selected.is_empty() {
        println!("追加しませんでした");
        return Ok(());
    }

    let added = session.state.confirm_add(room, selected)?;
    session.save(session_path)?;
    if added.is_empty() {
        println!("追加済みの項目でした");
    } else {
        println!("✔ {}件を追加: {}", added.len(), added.join(", "));
    }
    Ok(())
}

fn print_upload_report(report: &upload::UploadReport) {
    for outcome in &report.outcomes {
        match outcome {
            upload::FileOutcome::Attached { file, text } => {
                let preview: String = text.chars().take(80).collect();
                println!("  ✔ {}: {}", file.display(), preview);
            }
            upload::FileOutcome::Failed { file, error } => {
                println!("  ✘ {}: {}", file.display(), error);
            }
        }
    }
    println!(
        "取り込み: {}件 / 失敗: {}件",
        report.attached_count(),
        report.failed_count()
    );
}

fn print_info(info: &InspectionInfo) {
    println!("点検 ({})", info.inspection_kind);
    if !info.property_address.is_empty() {
        println!("  住所: {}", info.property_address);
    }
    if !info.landlord_name.is_empty() {
        println!("  貸主: {}", info.landlord_name);
    }
    if !info.tenant_name.is_empty() {
        println!("  借主: {}", info.tenant_name);
    }
    if let Some(date) = info.inspection_date {
        println!("  日時: {}", date.format("%Y-%m-%d %H:%M"));
    }
    println!();
}

fn print_room(ledger: &vistoria_common::RoomLedger) {
    println!("■ {} ({}項目)", ledger.name(), ledger.len());
    for record in ledger {
        println!(
            "  - {} [{}] 写真{} 音声{}",
            record.name,
            record.status.map(|s| s.label()).unwrap_or("-"),
            record.photos.len(),
            record.audios.len()
        );
        if !record.notes.is_empty() {
            println!("      所見: {}", record.notes);
        }
        if let Some(analysis) = &record.ai_analysis {
            println!("      AI: {}", analysis);
        }
    }
}
