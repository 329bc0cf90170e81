//! 実行結果 (`RunSummary`) の表示・保存を行うモジュール。
//!
//! コンソール表示とサマリーファイルはどちらも `RunSummary` だけから組み立てるので、
//! 両者の合計値は常に一致する。

pub mod console;
pub mod summary_file;

use std::time::Duration;

/// コンソールに表示するスキップ一覧の最大件数。
pub const SKIP_PREVIEW_LIMIT: usize = 10;

pub(crate) fn to_mib(bytes: i64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

pub(crate) fn to_kib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

/// 経過時間をミリ秒単位に丸めて表示用の文字列にする (例: `0s`, `850ms`, `1.25s`, `2m3.5s`, `1h0m5s`)。
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = (elapsed.as_micros() + 500) / 1000;
    if millis == 0 {
        return "0s".to_string();
    }
    if millis < 1000 {
        return format!("{}ms", millis);
    }

    let hours = millis / 3_600_000;
    let minutes = millis % 3_600_000 / 60_000;
    let rest = millis % 60_000;
    let seconds = format!("{}.{:03}", rest / 1000, rest % 1000);
    let seconds = seconds.trim_end_matches('0').trim_end_matches('.');
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
