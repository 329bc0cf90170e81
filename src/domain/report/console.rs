use super::{format_elapsed, to_mib, SKIP_PREVIEW_LIMIT};
use crate::domain::models::ConversionOutcome;
use crate::domain::run_summary::RunSummary;
use std::fmt::Write;
use std::path::Path;

/// 表示用のファイル名。ファイル名部分が無いパスはそのまま表示する。
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// 実行開始時に表示する設定内容。
pub fn render_header(source_dir: &Path, output_dir: Option<&Path>, quality: i32, keep: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "画像の変換を開始します...");
    let _ = writeln!(out, "変換元ディレクトリ: {}", source_dir.display());
    if let Some(output_dir) = output_dir {
        let _ = writeln!(out, "出力先ディレクトリ: {}", output_dir.display());
    }
    let _ = writeln!(out, "品質: {}", quality);
    let _ = writeln!(out, "元ファイルを保持: {}", keep);
    out
}

/// 1ファイルの処理が終わるたびに表示する1行。
pub fn outcome_line(outcome: &ConversionOutcome) -> String {
    match outcome {
        ConversionOutcome::Success {
            source,
            destination,
            reduction,
            ..
        } => format!(
            "✓ {} → {} ({:.1}% 削減)",
            display_name(source),
            display_name(destination),
            reduction
        ),
        ConversionOutcome::Skipped { source, reason } => {
            format!("⊘ スキップ: {} ({})", display_name(source), reason)
        }
        ConversionOutcome::Failed { source, reason } => {
            format!("✗ 失敗: {} ({})", display_name(source), reason)
        }
    }
}

/// 実行終了時に表示するサマリー。
///
/// スキップ一覧は先頭 `SKIP_PREVIEW_LIMIT` 件まで、失敗一覧は全件を表示する。
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "変換サマリー");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out);

    let _ = writeln!(out, "✓ 変換成功: {} 件", summary.successes().len());
    let _ = writeln!(out, "⊘ スキップ: {} 件", summary.skipped().len());
    let _ = writeln!(out, "✗ 失敗: {} 件", summary.failed().len());
    let _ = writeln!(out);

    if !summary.successes().is_empty() {
        let _ = writeln!(
            out,
            "総サイズ: {:.2} MB → {:.2} MB",
            to_mib(summary.total_original_size() as i64),
            to_mib(summary.total_new_size() as i64)
        );
        let _ = writeln!(
            out,
            "削減容量: {:.2} MB ({:.1}%)",
            to_mib(summary.saved_bytes()),
            summary.total_reduction()
        );
    }

    let _ = writeln!(out, "処理時間: {}", format_elapsed(summary.elapsed()));
    let _ = writeln!(out);

    if !summary.skipped().is_empty() {
        let _ = writeln!(out, "スキップしたファイル:");
        for (i, outcome) in summary.skipped().iter().enumerate() {
            if i >= SKIP_PREVIEW_LIMIT {
                let _ = writeln!(
                    out,
                    "  ... 他 {} 件",
                    summary.skipped().len() - SKIP_PREVIEW_LIMIT
                );
                break;
            }
            if let ConversionOutcome::Skipped { source, reason } = outcome {
                let _ = writeln!(out, "  - {} ({})", source.display(), reason);
            }
        }
        let _ = writeln!(out);
    }

    if !summary.failed().is_empty() {
        let _ = writeln!(out, "失敗したファイル:");
        for outcome in summary.failed() {
            if let ConversionOutcome::Failed { source, reason } = outcome {
                let _ = writeln!(out, "  - {}", source.display());
                let _ = writeln!(out, "    理由: {}", reason);
            }
        }
        let _ = writeln!(out);
    }

    out
}
