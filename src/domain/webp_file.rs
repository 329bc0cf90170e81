// --- 依存モジュール ---

use crate::domain::source_tree::source_image::SourceImage;
use image::DynamicImage;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// デコード・エンコード・保存時に発生する可能性のあるエラー。
///
/// `Display` の文字列はそのまま失敗理由としてレポートに載る。
#[derive(Debug, Error)]
pub enum WebpError {
    /// 変換元ファイルを開けなかった場合。
    #[error("ファイルを開けません: {0}")]
    Read(#[source] std::io::Error),
    /// 拡張子から選んだデコーダで読み込めなかった場合。
    #[error("デコードに失敗しました: {0}")]
    Decode(#[from] image::ImageError),
    /// libwebp がエンコードを拒否した場合 (品質値が範囲外など)。
    #[error("WebPエンコードに失敗しました: {0}")]
    Encode(String),
    /// エンコード結果をディスクへ書き込めなかった場合。
    #[error("WebPファイルの保存に失敗しました: {0}")]
    Save(#[source] std::io::Error),
}

/// 変換元の画像を、拡張子で決まるデコーダで読み込む。
///
/// 内容からのフォーマット推測は行わない。`.png` という名前の JPEG はデコード失敗になる。
pub fn decode_source(source: &SourceImage) -> Result<DynamicImage, WebpError> {
    let file = File::open(source.as_path()).map_err(WebpError::Read)?;
    let image = image::load(BufReader::new(file), source.format().image_format())?;
    Ok(image)
}

/// メモリ上にエンコードされた WebP データ。
pub struct WebpFile {
    /// エンコード時に使った品質値。
    pub quality: f32,
    /// WebP のバイト列。
    pub webp_data: Vec<u8>,
}

impl WebpFile {
    /// デコード済みの画像を非可逆 WebP にエンコードする。
    ///
    /// アルファチャンネルを持つ画像は RGBA、それ以外は RGB として libwebp に渡す。
    /// 品質値は検証せずにそのまま渡すので、範囲外の値は libwebp 側でエラーになる。
    pub fn encode(image: &DynamicImage, quality: i32) -> Result<Self, WebpError> {
        let quality = quality as f32;
        let (width, height) = (image.width(), image.height());

        let memory = if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            webp::Encoder::from_rgba(rgba.as_raw(), width, height)
                .encode_simple(false, quality)
                .map_err(|e| WebpError::Encode(format!("{:?}", e)))?
        } else {
            let rgb = image.to_rgb8();
            webp::Encoder::from_rgb(rgb.as_raw(), width, height)
                .encode_simple(false, quality)
                .map_err(|e| WebpError::Encode(format!("{:?}", e)))?
        };

        Ok(Self {
            quality,
            webp_data: memory.to_vec(),
        })
    }

    /// `self.webp_data` を指定されたパスに一括で書き込む。
    pub fn save_to_path(&self, path: &Path) -> Result<(), WebpError> {
        fs::write(path, &self.webp_data).map_err(WebpError::Save)
    }
}
