use std::path::{Path, PathBuf};

/// 1ファイル分の変換結果。
///
/// 走査で見つかった対象ファイル1つにつき、必ずどれか1つだけが記録される。
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Success {
        source: PathBuf,
        destination: PathBuf,
        original_size: u64,
        new_size: u64,
        reduction: f64,
    },
    Skipped {
        source: PathBuf,
        reason: String,
    },
    Failed {
        source: PathBuf,
        reason: String,
    },
}

impl ConversionOutcome {
    pub fn success(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        original_size: u64,
        new_size: u64,
    ) -> Self {
        Self::Success {
            source: source.into(),
            destination: destination.into(),
            original_size,
            new_size,
            reduction: reduction_percent(original_size, new_size),
        }
    }

    pub fn source(&self) -> &Path {
        match self {
            Self::Success { source, .. }
            | Self::Skipped { source, .. }
            | Self::Failed { source, .. } => source,
        }
    }
}

/// 削減率 (%) を計算する。出力の方が大きい場合は負の値になる。
///
/// 元サイズが 0 の場合は 0% とする。
pub fn reduction_percent(original_size: u64, new_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    (original_size as f64 - new_size as f64) / original_size as f64 * 100.0
}
