use crate::domain::source_tree::path_error::PathError;
use thiserror::Error;

/// 実行全体を中断させる致命的なエラー。
///
/// 1ファイル単位の失敗 (`ConversionError`) はここには含めず、結果として記録する。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Path(#[from] PathError),
}
