//! 変換先 (WebP) のファイルパスを決定するモジュール。

use std::path::{Path, PathBuf};

/// 変換後のファイルに付ける拡張子。
pub const WEBP_EXTENSION: &str = "webp";

/// 変換元のルートと、任意の出力先ルートから変換先パスを計算する。
///
/// - 出力先ルートが無い場合: 元ファイルと同じディレクトリに拡張子だけ差し替えて出力する。
/// - 出力先ルートがある場合: 変換元ルートからの相対パスを保ったまま出力先ルートへ配置する。
#[derive(Debug, Clone)]
pub struct DestinationResolver {
    source_root: PathBuf,
    output_root: Option<PathBuf>,
}

impl DestinationResolver {
    pub fn new(source_root: impl Into<PathBuf>, output_root: Option<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root,
        }
    }

    pub fn resolve(&self, input: &Path) -> PathBuf {
        match &self.output_root {
            None => replace_extension(input),
            Some(output_root) => {
                // 走査で得たパスは必ず source_root 配下だが、念のためファイル名だけで配置する
                let relative = match input.strip_prefix(&self.source_root) {
                    Ok(rel) => rel.to_path_buf(),
                    Err(_) => input.file_name().map(PathBuf::from).unwrap_or_default(),
                };
                output_root.join(replace_extension(&relative))
            }
        }
    }
}

/// ファイル名の最後の `.` 以降を `.webp` に差し替える。
///
/// `Path::with_extension` と違い、`.png` のようなファイル名は `.webp` になる。
fn replace_extension(path: &Path) -> PathBuf {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return path.with_extension(WEBP_EXTENSION);
    };
    let stem = name.rfind('.').map_or(name, |idx| &name[..idx]);
    path.with_file_name(format!("{}.{}", stem, WEBP_EXTENSION))
}
