use std::io::{BufRead, BufReader};
use std::path::Path;

use scour_common::api::LocationMatch;
use scour_common::expr::Expression;

/// Accept .txt files.
pub fn accepts(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

/// Scan a plain-text file line by line.
///
/// Returns one `Line` location per matching line: 1-based number plus the
/// trimmed line text. A read failure (unreadable file, invalid UTF-8)
/// surfaces as this file's error; the caller reports it and moves on.
pub fn search(path: &Path, expr: &Expression) -> anyhow::Result<Vec<LocationMatch>> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut locations = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if expr.matches(&line) {
            locations.push(LocationMatch::Line {
                number: i + 1,
                text: line.trim().to_string(),
            });
        }
    }
    Ok(locations)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_accepts() {
        assert!(accepts(Path::new("notes.txt")));
        assert!(accepts(Path::new("NOTES.TXT")));
        assert!(!accepts(Path::new("notes.md")));
        assert!(!accepts(Path::new("notes")));
    }

    #[test]
    fn test_line_numbers_and_trimming() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "fruit.txt", b"apple pie\nbanana split\n  apple banana  \n");

        let expr = Expression::compile("apple AND banana").unwrap();
        let locations = search(&path, &expr).unwrap();
        assert_eq!(
            locations,
            vec![LocationMatch::Line {
                number: 3,
                text: "apple banana".into(),
            }]
        );
    }

    #[test]
    fn test_no_match_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "fruit.txt", b"apple pie\n");

        let expr = Expression::compile("cherry").unwrap();
        assert!(search(&path, &expr).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let expr = Expression::compile("x").unwrap();
        assert!(search(Path::new("/nonexistent/file.txt"), &expr).is_err());
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.txt", b"ok line\n\xff\xfe broken\n");

        let expr = Expression::compile("ok").unwrap();
        assert!(search(&path, &expr).is_err());
    }
}
