//! 1ファイルずつ WebP への変換を行うモジュール。
//!
//! 変換先の決定、既存チェック、ディレクトリ作成、デコード、エンコード、
//! 元ファイルの削除までを順に行い、結果を `ConversionOutcome` として返します。
//! どの段階で失敗しても、そのファイルの処理を打ち切るだけで走査全体は止めません。

use crate::domain::destination::DestinationResolver;
use crate::domain::models::ConversionOutcome;
use crate::domain::source_tree::source_image::SourceImage;
use crate::domain::webp_file::{decode_source, WebpError, WebpFile};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 変換先が既に存在する場合のスキップ理由。
pub const DESTINATION_EXISTS: &str = "変換先のファイルが既に存在します";

/// 1ファイルの変換中に発生する回復可能なエラー。
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("ディレクトリの作成に失敗しました: {0}")]
    CreateDir(#[source] std::io::Error),

    #[error(transparent)]
    Webp(#[from] WebpError),
}

/// 変換処理の設定をまとめた構造体。
#[derive(Clone)]
pub struct Converter {
    resolver: DestinationResolver,
    quality: i32,
    keep_original: bool,
    remove_original: fn(&Path) -> std::io::Result<()>,
}

impl Converter {
    pub fn new(resolver: DestinationResolver, quality: i32, keep_original: bool) -> Self {
        Self {
            resolver,
            quality,
            keep_original,
            remove_original: |path| fs::remove_file(path),
        }
    }

    /// 元ファイルの削除処理を差し替える。
    #[cfg(test)]
    fn with_remover(mut self, remover: fn(&Path) -> std::io::Result<()>) -> Self {
        self.remove_original = remover;
        self
    }

    /// 1つの画像を変換し、結果を返す。
    ///
    /// 成功した場合のみ、`keep_original` が偽なら元ファイルを削除する。
    /// 削除の失敗は結果に含めず無視する (変換自体は完了しているため)。
    pub fn convert(&self, source: &SourceImage) -> ConversionOutcome {
        let destination = self.resolver.resolve(source.as_path());

        // 1. 変換先が既にあればスキップ (元ファイルには触れない)
        if destination.exists() {
            log::debug!("skip {}: {} exists", source, destination.display());
            return ConversionOutcome::Skipped {
                source: source.as_path().to_path_buf(),
                reason: DESTINATION_EXISTS.to_string(),
            };
        }

        // 2. 変換
        let new_size = match self.write_webp(source, &destination) {
            Ok(new_size) => new_size,
            Err(e) => {
                log::debug!("failed {}: {}", source, e);
                return ConversionOutcome::Failed {
                    source: source.as_path().to_path_buf(),
                    reason: e.to_string(),
                };
            }
        };

        let outcome = ConversionOutcome::success(
            source.as_path(),
            &destination,
            source.original_size(),
            new_size,
        );

        // 3. 元ファイルの削除
        if !self.keep_original {
            if let Err(e) = (self.remove_original)(source.as_path()) {
                log::debug!("could not remove {}: {}", source, e);
            }
        }

        outcome
    }

    /// 変換先ディレクトリを用意して WebP を書き込み、書き込んだファイルのサイズを返す。
    fn write_webp(&self, source: &SourceImage, destination: &Path) -> Result<u64, ConversionError> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(ConversionError::CreateDir)?;
            }
        }

        let image = decode_source(source)?;
        let webp = WebpFile::encode(&image, self.quality)?;
        webp.save_to_path(destination)?;

        let new_size = fs::metadata(destination)
            .map(|meta| meta.len())
            .unwrap_or(webp.webp_data.len() as u64);
        Ok(new_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::run_summary::RunSummary;
    use chrono::Local;
    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};
    use std::path::PathBuf;
    use tempfile::tempdir;

    // --- テスト用ヘルパー関数 ---
    fn pixels(width: u32, height: u32) -> Vec<u8> {
        (0..width * height * 3).map(|i| (i % 251) as u8).collect()
    }

    fn write_png(path: &Path, width: u32, height: u32) -> u64 {
        let mut buf = Vec::new();
        PngEncoder::new(&mut buf)
            .write_image(&pixels(width, height), width, height, ExtendedColorType::Rgb8)
            .expect("PNGのエンコードに失敗");
        fs::write(path, &buf).unwrap();
        buf.len() as u64
    }

    fn write_jpeg(path: &Path, width: u32, height: u32) -> u64 {
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, 95)
            .write_image(&pixels(width, height), width, height, ExtendedColorType::Rgb8)
            .expect("JPEGのエンコードに失敗");
        fs::write(path, &buf).unwrap();
        buf.len() as u64
    }

    fn converter(root: &Path, output: Option<PathBuf>, keep: bool) -> Converter {
        Converter::new(DestinationResolver::new(root, output), 85, keep)
    }

    #[test]
    fn converts_png_and_removes_original() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("b.png");
        let size = write_png(&src, 32, 32);

        let source = SourceImage::new(&src, size).unwrap();
        let outcome = converter(dir.path(), None, false).convert(&source);

        let dest = dir.path().join("b.webp");
        match outcome {
            ConversionOutcome::Success {
                destination,
                original_size,
                new_size,
                reduction,
                ..
            } => {
                assert_eq!(destination, dest);
                assert_eq!(original_size, size);
                assert_eq!(new_size, fs::metadata(&dest).unwrap().len());
                let expected = (size as f64 - new_size as f64) / size as f64 * 100.0;
                assert!((reduction - expected).abs() < 1e-9);
            }
            other => panic!("予期せぬ結果: {:?}", other),
        }
        assert!(!src.exists());
    }

    #[test]
    fn keep_flag_preserves_original() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.JPG");
        let size = write_jpeg(&src, 24, 24);

        let source = SourceImage::new(&src, size).unwrap();
        let outcome = converter(dir.path(), None, true).convert(&source);

        assert!(matches!(outcome, ConversionOutcome::Success { .. }));
        assert!(src.exists());
        assert!(dir.path().join("a.webp").exists());
    }

    #[test]
    fn failed_removal_of_original_is_ignored() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("c.png");
        let size = write_png(&src, 16, 16);

        let source = SourceImage::new(&src, size).unwrap();
        let outcome = converter(dir.path(), None, false)
            .with_remover(|_| {
                Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "削除できません",
                ))
            })
            .convert(&source);

        // 削除に失敗しても変換は成功扱いで、失敗としては記録されない
        let mut summary = RunSummary::new(Local::now());
        summary.record(outcome);
        assert_eq!(summary.successes().len(), 1);
        assert!(summary.failed().is_empty());
        assert!(src.exists());
        assert!(dir.path().join("c.webp").is_file());
    }

    #[test]
    fn existing_destination_is_skipped_untouched() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("img.jpg");
        fs::write(&src, b"not even a jpeg").unwrap();
        fs::write(dir.path().join("img.webp"), b"previous").unwrap();

        let source = SourceImage::new(&src, 15).unwrap();
        let outcome = converter(dir.path(), None, false).convert(&source);

        assert_eq!(
            outcome,
            ConversionOutcome::Skipped {
                source: src.clone(),
                reason: DESTINATION_EXISTS.to_string(),
            }
        );
        assert_eq!(fs::read(&src).unwrap(), b"not even a jpeg");
        assert_eq!(fs::read(dir.path().join("img.webp")).unwrap(), b"previous");
    }

    #[test]
    fn decode_failure_is_recorded_and_source_kept() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("broken.png");
        fs::write(&src, b"garbage").unwrap();

        let source = SourceImage::new(&src, 7).unwrap();
        let outcome = converter(dir.path(), None, false).convert(&source);

        match outcome {
            ConversionOutcome::Failed { source, reason } => {
                assert_eq!(source, src);
                assert!(reason.contains("デコード"));
            }
            other => panic!("予期せぬ結果: {:?}", other),
        }
        assert!(src.exists());
    }

    #[test]
    fn encode_failure_is_recorded() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("ok.png");
        let size = write_png(&src, 8, 8);

        let source = SourceImage::new(&src, size).unwrap();
        let outcome = Converter::new(DestinationResolver::new(dir.path(), None), 500, false)
            .convert(&source);

        assert!(matches!(outcome, ConversionOutcome::Failed { .. }));
        assert!(src.exists());
    }

    #[test]
    fn directory_creation_failure_is_recorded() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("src");
        fs::create_dir_all(root.join("nested")).unwrap();
        let src = root.join("nested/pic.png");
        let size = write_png(&src, 4, 4);

        // 出力先ルートの位置に通常ファイルを置き、ディレクトリを作れなくする
        let blocker = dir.path().join("out");
        fs::write(&blocker, b"file").unwrap();

        let source = SourceImage::new(&src, size).unwrap();
        let outcome = converter(&root, Some(blocker), false).convert(&source);

        match outcome {
            ConversionOutcome::Failed { reason, .. } => {
                assert!(reason.contains("ディレクトリの作成に失敗しました"))
            }
            other => panic!("予期せぬ結果: {:?}", other),
        }
        assert!(src.exists());
    }

    #[test]
    fn output_root_receives_mirrored_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("static");
        fs::create_dir_all(root.join("b")).unwrap();
        let src = root.join("b/img.png");
        let size = write_png(&src, 8, 8);
        let out = dir.path().join("out");

        let source = SourceImage::new(&src, size).unwrap();
        let outcome = converter(&root, Some(out.clone()), true).convert(&source);

        assert!(matches!(outcome, ConversionOutcome::Success { .. }));
        assert!(out.join("b/img.webp").is_file());
    }
}
