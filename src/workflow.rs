//! アプリケーションのメインワークフローを定義するモジュール。
//!
//! このモジュールは、UI層（`cli`）とドメイン層（`domain`）を仲介し、
//! 走査 → 変換 → 集計 → 表示・保存 の流れを実装します。

use crate::cli::Args;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::Instant;
use webp_batch_converter::domain::converter::Converter;
use webp_batch_converter::domain::destination::DestinationResolver;
use webp_batch_converter::domain::report::{console, summary_file};
use webp_batch_converter::domain::run_summary::RunSummary;
use webp_batch_converter::domain::source_tree::directory_path::DirectoryPath;
use webp_batch_converter::error::AppError;

/// アプリケーションのメインロジックを実行します。
///
/// # 戻り値
/// * `Ok(())`: 走査が最後まで完了した場合 (個々のファイルの失敗・スキップは含まない)。
/// * `Err(AppError)`: ディレクトリ走査中に回復不可能なエラーが発生した場合。
pub fn run(args: Args) -> Result<(), AppError> {
    let output_dir = args.output_dir();
    print!(
        "{}",
        console::render_header(&args.dir, output_dir.as_deref(), args.quality, args.keep)
    );
    println!();

    let summary = convert_tree(&args.dir, output_dir, args.quality, args.keep, |line| {
        println!("{}", line)
    })?;

    print!("{}", console::render_summary(&summary));

    // サマリーファイルはカレントディレクトリに保存する。失敗しても実行結果は変えない
    match summary_file::write_to_dir(&summary, Path::new(".")) {
        Ok(path) => {
            log::info!("summary written to {}", path.display());
            println!("✓ サマリーファイルを保存しました: {}", console::display_name(&path));
        }
        Err(e) => println!("⚠ サマリーファイルを作成できません: {}", e),
    }

    Ok(())
}

/// `source_dir` 配下の画像を順に変換し、集計結果を返します。
///
/// 各ファイルの処理が終わるたびに、表示用の1行を `on_outcome` に渡します。
pub fn convert_tree(
    source_dir: &Path,
    output_dir: Option<PathBuf>,
    quality: i32,
    keep_original: bool,
    mut on_outcome: impl FnMut(&str),
) -> Result<RunSummary, AppError> {
    let started = Instant::now();
    let mut summary = RunSummary::new(Local::now());

    let source_root = DirectoryPath::new(source_dir)?;
    let converter = Converter::new(
        DestinationResolver::new(source_root.as_path(), output_dir),
        quality,
        keep_original,
    );
    log::info!("walking {}", source_root);

    for image_result in source_root.images() {
        // 走査エラーは致命的なので、ここで全体を打ち切る
        let image = image_result?;
        let outcome = converter.convert(&image);
        on_outcome(&console::outcome_line(&outcome));
        summary.record(outcome);
    }

    summary.finish(started.elapsed());
    Ok(summary)
}
