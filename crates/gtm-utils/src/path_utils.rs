use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir_exists(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Makes `path` absolute against the current directory and folds `.` and
/// `..` components lexically, without touching the filesystem.
pub fn absolute_normalized(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// Renders a path with `/` separators regardless of platform.
#[must_use]
pub fn format_path(path: &Path) -> String {
    normalize_separators(&path.to_string_lossy(), MAIN_SEPARATOR)
}

fn normalize_separators(path: &str, separator: char) -> String {
    if separator == '/' {
        path.to_string()
    } else {
        path.replace(separator, "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_separators_are_normalized() {
        assert_eq!(
            normalize_separators(r"C:\Users\gtm\.gtm-cli\index.js", '\\'),
            "C:/Users/gtm/.gtm-cli/index.js"
        );
    }

    #[test]
    fn test_unix_paths_are_untouched() {
        assert_eq!(
            normalize_separators("/home/gtm/lib/index.js", '/'),
            "/home/gtm/lib/index.js"
        );
    }

    #[test]
    fn test_absolute_normalized_folds_dots() {
        let tmp = tempfile::tempdir().unwrap();
        let messy = tmp.path().join("pkg").join(".").join("lib").join("..").join("index.js");
        assert_eq!(
            absolute_normalized(&messy).unwrap(),
            absolute_normalized(&tmp.path().join("pkg").join("index.js")).unwrap()
        );
        assert!(absolute_normalized(Path::new("relative")).unwrap().is_absolute());
    }

    #[test]
    fn test_ensure_dir_exists_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir_exists(&nested).unwrap();
    }
}
