use super::{format_elapsed, to_kib, to_mib};
use crate::domain::models::ConversionOutcome;
use crate::domain::run_summary::RunSummary;
use chrono::{DateTime, Local};
use std::fmt::Write;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// 実行開始時刻 (秒単位) からサマリーファイル名を作る。
pub fn file_name(started_at: DateTime<Local>) -> String {
    format!(
        "conversion_summary_{}.txt",
        started_at.format("%Y%m%d_%H%M%S")
    )
}

/// サマリーファイルの本文を組み立てる。
///
/// コンソール表示と違い、スキップ一覧も省略せず、成功したファイルの内訳も含める。
pub fn render(summary: &RunSummary, generated_at: DateTime<Local>) -> String {
    let mut out = String::new();
    let rule = "-".repeat(80);

    let _ = writeln!(out, "画像 WebP 変換サマリー");
    let _ = writeln!(out, "作成日時: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out);

    let _ = writeln!(out, "統計:");
    let _ = writeln!(out, "  変換成功: {} 件", summary.successes().len());
    let _ = writeln!(out, "  スキップ: {} 件", summary.skipped().len());
    let _ = writeln!(out, "  失敗: {} 件", summary.failed().len());
    let _ = writeln!(out, "  処理時間: {}", format_elapsed(summary.elapsed()));
    let _ = writeln!(out);

    if !summary.successes().is_empty() {
        let _ = writeln!(out, "サイズ比較:");
        let _ = writeln!(
            out,
            "  変換前の総サイズ: {:.2} MB",
            to_mib(summary.total_original_size() as i64)
        );
        let _ = writeln!(
            out,
            "  変換後の総サイズ: {:.2} MB",
            to_mib(summary.total_new_size() as i64)
        );
        let _ = writeln!(
            out,
            "  削減容量: {:.2} MB ({:.1}%)",
            to_mib(summary.saved_bytes()),
            summary.total_reduction()
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "変換に成功したファイル ({}):", summary.successes().len());
        let _ = writeln!(out);
        for outcome in summary.successes() {
            if let ConversionOutcome::Success {
                source,
                original_size,
                new_size,
                reduction,
                ..
            } = outcome
            {
                let _ = writeln!(out, "  {}", source.display());
                let _ = writeln!(
                    out,
                    "    サイズ: {:.2} KB → {:.2} KB",
                    to_kib(*original_size),
                    to_kib(*new_size)
                );
                let _ = writeln!(out, "    削減率: {:.1}%", reduction);
                let _ = writeln!(out);
            }
        }
    }

    for (title, outcomes) in [
        ("スキップしたファイル", summary.skipped()),
        ("失敗したファイル", summary.failed()),
    ] {
        if outcomes.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "{} ({}):", title, outcomes.len());
        let _ = writeln!(out);
        for outcome in outcomes {
            if let ConversionOutcome::Skipped { source, reason }
            | ConversionOutcome::Failed { source, reason } = outcome
            {
                let _ = writeln!(out, "  {}", source.display());
                let _ = writeln!(out, "    理由: {}", reason);
                let _ = writeln!(out);
            }
        }
    }

    out
}

/// サマリーファイルを `dir` に書き出し、そのパスを返す。
pub fn write_to_dir(summary: &RunSummary, dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(file_name(summary.started_at()));
    fs::write(&path, render(summary, Local::now()))?;
    Ok(path)
}
