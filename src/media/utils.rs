use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};

/// Extracts the output path yt-dlp reports on stdout.
///
/// Matches the first line carrying a `Destination:` or
/// `has already been downloaded` marker; the path is the text after the first
/// colon on that line, trimmed. Marker lines without a colon keep the scan
/// going so the caller can fall back to a directory listing.
pub fn parse_reported_path(stdout: &str) -> Option<PathBuf> {
    for line in stdout.lines() {
        if !line.contains("Destination:") && !line.contains("has already been downloaded") {
            continue;
        }
        if let Some((_, rest)) = line.split_once(':') {
            let path = rest.trim();
            if path.is_empty() {
                return None;
            }
            return Some(PathBuf::from(path));
        }
    }
    None
}

/// Newest non-hidden regular file directly inside `dir`, by modification time.
pub fn newest_file_in(dir: &Path) -> std::io::Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified()?;
        if newest.as_ref().is_none_or(|(time, _)| modified > *time) {
            newest = Some((modified, entry.path()));
        }
    }

    Ok(newest.map(|(_, path)| path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_destination_line() {
        let stdout = "[youtube] abc123: Downloading webpage\n\
                      [download] Destination: /downloads/foo-123.mp4\n\
                      [download] 100% of 1.00MiB";
        assert_eq!(
            parse_reported_path(stdout),
            Some(PathBuf::from("/downloads/foo-123.mp4"))
        );
    }

    #[test]
    fn path_is_taken_after_the_first_colon() {
        let stdout = "Destination: /downloads/foo-123.mp4";
        assert_eq!(
            parse_reported_path(stdout),
            Some(PathBuf::from("/downloads/foo-123.mp4"))
        );
    }

    #[test]
    fn already_downloaded_line_without_colon_is_skipped() {
        let stdout = "[download] /downloads/foo.mp4 has already been downloaded";
        assert_eq!(parse_reported_path(stdout), None);
    }

    #[test]
    fn no_marker_means_no_path() {
        let stdout = "[youtube] abc123: Downloading webpage\n[download] 100%";
        assert_eq!(parse_reported_path(stdout), None);
    }

    #[test]
    fn newest_file_skips_hidden_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();

        std::fs::write(dir.path().join("older.mp4"), b"a").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(30));
        std::fs::write(dir.path().join("newer.mp4"), b"b").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(30));
        std::fs::write(dir.path().join(".part"), b"c").unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        let newest = newest_file_in(dir.path()).unwrap();
        assert_eq!(newest, Some(dir.path().join("newer.mp4")));
    }

    #[test]
    fn empty_directory_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(newest_file_in(dir.path()).unwrap(), None);
    }
}
