use super::path_error::PathError;
use super::source_image::{SourceFormat, SourceImage};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// 変換元のルートディレクトリを表す構造体
#[derive(Debug)]
pub struct DirectoryPath {
    pub path: PathBuf,
}

impl DirectoryPath {
    // コンストラクタ: パスを受け取り、バリデーションを行う
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        // パスが存在し、かつディレクトリであることを検証
        if !path.exists() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' は存在しません。",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' はディレクトリではありません。",
                path.display()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    // 内部のPathBufへの参照を返す
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// ディレクトリ配下を再帰的に走査し、変換対象の画像だけを順に返す。
    ///
    /// 走査順はファイル名の辞書順による深さ優先。対象外の拡張子のファイルと
    /// ディレクトリ自体は何も返さない。走査中のI/Oエラー (権限不足、壊れた
    /// シンボリックリンク等) は `Err` として返るので、呼び出し側はそこで処理を
    /// 打ち切ること。
    pub fn images(&self) -> impl Iterator<Item = Result<SourceImage, PathError>> {
        WalkDir::new(&self.path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry_result| {
                let entry = match entry_result {
                    Ok(entry) => entry,
                    Err(e) => return Some(Err(PathError::Walk(e))),
                };
                if !entry.file_type().is_file() {
                    return None;
                }
                SourceFormat::from_path(entry.path())?;

                // サイズは走査時点の値を使う
                let result = entry
                    .metadata()
                    .map_err(PathError::Walk)
                    .and_then(|meta| SourceImage::new(entry.path(), meta.len()));
                Some(result)
            })
    }
}

// Displayトレイトの実装（表示用）
impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// 正常なディレクトリパスでDirectoryPathが作成できるかテスト
    #[test]
    fn test_valid_directory_path() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path();

        let result = DirectoryPath::new(path);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_path(), path);
    }

    /// 存在しないパスでエラーが返されるかテスト
    #[test]
    fn test_non_existent_path_returns_error() {
        let path = PathBuf::from("this_directory_should_not_exist");
        let err = DirectoryPath::new(&path).unwrap_err();
        if let PathError::InvalidPath(msg) = err {
            assert!(msg.contains("存在しません"));
        } else {
            panic!("予期せぬエラーが返されました: {:?}", err);
        }
    }

    /// ファイルパスでエラーが返されるかテスト
    #[test]
    fn test_file_path_returns_error() {
        let file_path = PathBuf::from("Cargo.toml"); // 常に存在するファイル
        let err = DirectoryPath::new(&file_path).unwrap_err();
        if let PathError::InvalidPath(msg) = err {
            assert!(msg.contains("ディレクトリではありません"));
        } else {
            panic!("予期せぬエラーが返されました: {:?}", err);
        }
    }

    /// 対象の拡張子だけが辞書順の深さ優先で返されるかテスト
    #[test]
    fn test_images_filters_and_orders_entries() {
        let dir = tempdir().expect("Failed to create temp directory");
        let root = dir.path();

        fs::create_dir_all(root.join("b_sub/deeper")).unwrap();
        fs::write(root.join("c.webp"), b"webp").unwrap();
        fs::write(root.join("d.txt"), b"text").unwrap();
        fs::write(root.join("a.jpg"), vec![0u8; 50]).unwrap();
        fs::write(root.join("b_sub/z.PNG"), vec![0u8; 7]).unwrap();
        fs::write(root.join("b_sub/deeper/y.jpeg"), b"j").unwrap();
        fs::write(root.join("e.png"), b"pp").unwrap();
        fs::write(root.join(".jpg"), b"hidden").unwrap();

        let dir_path = DirectoryPath::new(root).unwrap();
        let images: Vec<SourceImage> = dir_path
            .images()
            .collect::<Result<_, _>>()
            .expect("walk should not fail");

        let relative: Vec<PathBuf> = images
            .iter()
            .map(|img| img.as_path().strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from(".jpg"),
                PathBuf::from("a.jpg"),
                PathBuf::from("b_sub/deeper/y.jpeg"),
                PathBuf::from("b_sub/z.PNG"),
                PathBuf::from("e.png"),
            ]
        );
        assert_eq!(images[1].original_size(), 50);
        assert_eq!(images[3].original_size(), 7);
    }

    /// 空のディレクトリでは何も返らないかテスト
    #[test]
    fn test_images_on_empty_directory() {
        let dir = tempdir().expect("Failed to create temp directory");
        let dir_path = DirectoryPath::new(dir.path()).unwrap();
        assert!(dir_path.images().next().is_none());
    }

    /// 走査中のI/Oエラーが Err として返るかテスト
    #[test]
    fn test_images_reports_walk_error() {
        // new()のバリデーションをスキップして、存在しないパスを持つインスタンスを強制的に作成
        let dir_path = DirectoryPath {
            path: PathBuf::from("this_path_definitely_does_not_exist"),
        };
        let first = dir_path.images().next().expect("an error entry");
        assert!(matches!(first, Err(PathError::Walk(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_images_reports_broken_symlink() {
        let dir = tempdir().expect("Failed to create temp directory");
        std::os::unix::fs::symlink(dir.path().join("missing.png"), dir.path().join("link.png"))
            .unwrap();

        let dir_path = DirectoryPath::new(dir.path()).unwrap();
        let results: Vec<_> = dir_path.images().collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
