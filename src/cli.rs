use clap::Parser;
use std::path::PathBuf;

/// ディレクトリ配下の JPEG / PNG 画像を WebP に一括変換するツール
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// WebP の品質 (0-100)
    #[arg(long, default_value_t = 85, allow_negative_numbers = true)]
    pub quality: i32,

    /// 変換後も元ファイルを残す
    #[arg(long)]
    pub keep: bool,

    /// 処理するディレクトリ
    #[arg(long, default_value = "./static")]
    pub dir: PathBuf,

    /// 出力先ディレクトリ (空の場合は元ファイルと同じディレクトリ)
    #[arg(long, default_value = "")]
    pub output: String,
}

impl Args {
    /// 空文字列の `--output` は「出力先なし」として扱う。
    pub fn output_dir(&self) -> Option<PathBuf> {
        if self.output.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.output))
        }
    }
}
