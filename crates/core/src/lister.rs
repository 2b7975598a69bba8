use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// OS bookkeeping files that never hold photos.
pub const DEFAULT_IGNORED_NAMES: &[&str] = &[".DS_Store"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
}

/// Lazily yields the regular files directly inside one directory, sorted by
/// file name. Consumed once; call [`list_images`] again to re-scan.
pub struct ImageEntries {
    root: PathBuf,
    inner: walkdir::IntoIter,
    ignored: Vec<String>,
}

pub fn list_images(dir: &Path) -> Result<ImageEntries> {
    let ignored: Vec<String> = DEFAULT_IGNORED_NAMES.iter().map(|v| v.to_string()).collect();
    list_images_ignoring(dir, &ignored)
}

pub fn list_images_ignoring(dir: &Path, ignored: &[String]) -> Result<ImageEntries> {
    let meta = std::fs::metadata(dir)
        .with_context(|| format!("フォルダが存在しません: {}", dir.display()))?;
    if !meta.is_dir() {
        anyhow::bail!("フォルダではありません: {}", dir.display());
    }

    let inner = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    Ok(ImageEntries {
        root: dir.to_path_buf(),
        inner,
        ignored: ignored.to_vec(),
    })
}

impl Iterator for ImageEntries {
    type Item = Result<DirectoryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    return Some(Err(anyhow::Error::from(err).context(format!(
                        "フォルダ走査に失敗しました: {}",
                        self.root.display()
                    ))))
                }
            };

            // walkdir does not follow links, so symlinks report their own type here
            if !entry.file_type().is_file() {
                debug!("通常ファイルではないため除外: {}", entry.path().display());
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if self.ignored.iter().any(|ignored| ignored == &name) {
                debug!("除外対象のファイル名: {}", entry.path().display());
                continue;
            }

            return Some(Ok(DirectoryEntry {
                name,
                path: entry.into_path(),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{list_images, list_images_ignoring, DirectoryEntry};
    use std::fs;
    use tempfile::tempdir;

    fn names(entries: Vec<DirectoryEntry>) -> Vec<String> {
        entries.into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn yields_regular_files_sorted_and_skips_ds_store() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("b.JPG"), b"b").expect("write b");
        fs::write(temp.path().join("a.JPG"), b"a").expect("write a");
        fs::write(temp.path().join(".DS_Store"), b"x").expect("write ds_store");
        fs::write(temp.path().join("notes.txt"), b"t").expect("write txt");

        let entries = list_images(temp.path())
            .expect("listing should start")
            .collect::<anyhow::Result<Vec<_>>>()
            .expect("listing should finish");

        assert_eq!(names(entries.clone()), vec!["a.JPG", "b.JPG", "notes.txt"]);
        assert_eq!(entries[0].path, temp.path().join("a.JPG"));
    }

    #[test]
    fn skips_directories_and_does_not_recurse() {
        let temp = tempdir().expect("tempdir");
        let nested = temp.path().join("nested");
        fs::create_dir_all(&nested).expect("create nested");
        fs::write(nested.join("inner.JPG"), b"x").expect("write inner");
        fs::write(temp.path().join("top.JPG"), b"x").expect("write top");

        let entries = list_images(temp.path())
            .expect("listing should start")
            .collect::<anyhow::Result<Vec<_>>>()
            .expect("listing should finish");

        assert_eq!(names(entries), vec!["top.JPG"]);
    }

    #[cfg(unix)]
    #[test]
    fn skips_symlinks() {
        let temp = tempdir().expect("tempdir");
        let real = temp.path().join("real.JPG");
        fs::write(&real, b"x").expect("write real");
        std::os::unix::fs::symlink(&real, temp.path().join("link.JPG")).expect("symlink");

        let entries = list_images(temp.path())
            .expect("listing should start")
            .collect::<anyhow::Result<Vec<_>>>()
            .expect("listing should finish");

        assert_eq!(names(entries), vec!["real.JPG"]);
    }

    #[test]
    fn custom_ignore_list_matches_exact_names_only() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("Thumbs.db"), b"x").expect("write thumbs");
        fs::write(temp.path().join("thumbs.db"), b"x").expect("write lower thumbs");
        fs::write(temp.path().join(".DS_Store"), b"x").expect("write ds_store");

        let entries = list_images_ignoring(temp.path(), &["Thumbs.db".to_string()])
            .expect("listing should start")
            .collect::<anyhow::Result<Vec<_>>>()
            .expect("listing should finish");

        assert_eq!(names(entries), vec![".DS_Store", "thumbs.db"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let err = list_images(&temp.path().join("absent"))
            .err()
            .expect("missing dir should fail");
        assert!(err.to_string().contains("フォルダが存在しません"));
    }

    #[test]
    fn file_instead_of_directory_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let file = temp.path().join("a.JPG");
        fs::write(&file, b"x").expect("write file");

        let err = list_images(&file).err().expect("file should fail");
        assert!(err.to_string().contains("フォルダではありません"));
    }

    #[test]
    fn listing_is_consumed_once_and_rescans_fresh() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("a.JPG"), b"x").expect("write a");

        let mut first = list_images(temp.path()).expect("listing should start");
        assert!(first.next().is_some());
        assert!(first.next().is_none());

        fs::write(temp.path().join("b.JPG"), b"x").expect("write b");
        let second = list_images(temp.path()).expect("listing should start");
        assert_eq!(second.count(), 2);
    }
}
