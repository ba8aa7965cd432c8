use std::fs;
use std::io;
use std::path::Path;

/// Total size in bytes of all files under `path`, recursively.
pub fn dir_size(path: &Path) -> io::Result<u64> {
    let mut total = 0;
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let meta = entry.metadata()?;
        if meta.is_dir() {
            total += dir_size(&entry.path())?;
        } else {
            total += meta.len();
        }
    }
    Ok(total)
}

/// Human-readable size for the post-run report.
pub fn format_size(bytes: u64) -> String {
    let mb = bytes as f64 / 1_048_576.0;
    if mb >= 1024.0 {
        format!("{:.1} GB", mb / 1024.0)
    } else {
        format!("{:.1} MB", mb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_files_across_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.mp4"), vec![0u8; 1000]).unwrap();
        let sub = dir.path().join("playlist");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("b.mp3"), vec![0u8; 500]).unwrap();

        assert_eq!(dir_size(dir.path()).unwrap(), 1500);
    }

    #[test]
    fn empty_directory_sums_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(dir_size(dir.path()).unwrap(), 0);
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(dir_size(Path::new("/definitely/not/here")).is_err());
    }

    #[test]
    fn formats_mb_and_gb() {
        assert_eq!(format_size(0), "0.0 MB");
        assert_eq!(format_size(52_428_800), "50.0 MB");
        assert_eq!(format_size(1_610_612_736), "1.5 GB");
    }
}
