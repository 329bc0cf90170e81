use super::path_error::PathError;
use image::ImageFormat;
use std::fmt;
use std::path::{Path, PathBuf};

/// 変換元として受け付ける画像フォーマット。
///
/// 拡張子は大文字小文字を区別せずに判定する (`.JPG` と `.jpg` はどちらも JPEG)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
}

impl SourceFormat {
    /// パスの拡張子からフォーマットを判定する。対象外の拡張子なら `None`。
    ///
    /// 拡張子はファイル名の最後の `.` 以降とするので、`.png` のような
    /// ドットで始まるファイル名も PNG として扱う。
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let ext = name[name.rfind('.')? + 1..].to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// デコードに使う `image` クレート側のフォーマット。
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
        }
    }
}

/// 走査中に見つかった変換対象の画像ファイル。
///
/// 元ファイルのサイズは走査時点で取得したものを保持する。
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    path: PathBuf,
    format: SourceFormat,
    original_size: u64,
}

impl SourceImage {
    /// 新しい `SourceImage` を生成する。
    ///
    /// 拡張子が JPEG / PNG のいずれでもない場合は `PathError::InvalidPath` を返す。
    pub fn new<P: AsRef<Path>>(path: P, original_size: u64) -> Result<Self, PathError> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path).ok_or_else(|| {
            PathError::InvalidPath(format!(
                "パス '{}' はサポートされている画像ファイルではありません。",
                path.display()
            ))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            format,
            original_size,
        })
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }
    pub fn format(&self) -> SourceFormat {
        self.format
    }
    pub fn original_size(&self) -> u64 {
        self.original_size
    }
}

impl fmt::Display for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
