use thiserror::Error;

// ソースディレクトリ関連のエラー型を定義
#[derive(Debug, Error)]
pub enum PathError {
    #[error("無効なパスです: {0}")]
    InvalidPath(String),

    #[error("ディレクトリ走査中のI/Oエラー: {0}")]
    Walk(#[from] walkdir::Error),
}
