use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

/// One visible entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
}

/// Entries whose name starts with `.` are never listed.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Presentation order: directories first, then case-insensitive name, with the
/// raw name as a final tie-break so the order is total.
pub fn entry_order(a: &DirEntryInfo, b: &DirEntryInfo) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Lists the immediate, non-hidden children of `dir` in presentation order.
///
/// Symbolic links are followed when deciding whether an entry is a directory; a
/// dangling link is listed as a file. Entries that disappear or fail while the
/// listing is in progress are skipped.
///
/// # Errors
///
/// Returns an error only if the directory itself cannot be opened.
pub fn list_dir(dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                trace!("Skipping unreadable entry in {:?}: {}", dir, e);
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if is_hidden(&name) {
            continue;
        }

        let path = entry.path();
        let is_dir = match fs::metadata(&path) {
            Ok(metadata) => metadata.is_dir(),
            Err(_) => entry.file_type().map(|t| t.is_dir()).unwrap_or(false),
        };

        entries.push(DirEntryInfo { path, name, is_dir });
    }

    entries.sort_by(entry_order);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(entries: &[DirEntryInfo]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn lists_directories_first_then_case_insensitive_names() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::create_dir(dir.path().join("A")).unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        fs::write(dir.path().join("a.cif"), "").unwrap();

        let entries = list_dir(dir.path()).unwrap();

        assert_eq!(names(&entries), vec!["A", "a.cif", "b.txt"]);
        assert!(entries[0].is_dir);
        assert_eq!(entries[1].path, dir.path().join("a.cif"));
    }

    #[test]
    fn hidden_directories_are_excluded() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir(dir.path().join("relax")).unwrap();

        let entries = list_dir(dir.path()).unwrap();

        assert_eq!(names(&entries), vec!["relax"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn names_differing_only_in_case_have_a_stable_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("poscar"), "").unwrap();
        fs::write(dir.path().join("POSCAR"), "").unwrap();

        let entries = list_dir(dir.path()).unwrap();

        assert_eq!(names(&entries), vec!["POSCAR", "poscar"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();

        assert!(list_dir(&dir.path().join("gone")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_listed_as_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("target")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("target"), dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("dangling"))
            .unwrap();

        let entries = list_dir(dir.path()).unwrap();

        assert_eq!(names(&entries), vec!["link", "target", "dangling"]);
        assert!(entries[0].is_dir);
        assert!(!entries[2].is_dir);
    }
}
