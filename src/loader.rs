//! Seeding a tree from whitespace separated integers.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str;

use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::tree::{Insertion, Tree};

/// What a load did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of values that got their own node.
    pub inserted: usize,
    /// Values skipped because they were already in the tree, in the order they were read.
    pub duplicates: Vec<i32>,
    /// The token reading stopped at, when the input held something other than an integer.
    pub stopped_at: Option<String>,
}

/// Opens a data file for [`load`].
pub fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads integers separated by ASCII whitespace and inserts each one not already in `tree`.
/// Reading stops at the first token that isn't an `i32`, including one that isn't valid UTF-8,
/// leaving the rest of the input unread.
///
/// If a node can't be allocated the load stops with [`LoadError::Alloc`]; everything inserted
/// before that stays in the tree.
///
/// # Examples
///
/// ```
/// use intbst::loader::load;
/// use intbst::tree::Tree;
///
/// let mut tree = Tree::new();
/// let report = load(&mut tree, "5 3\n8 3\n".as_bytes()).unwrap();
///
/// assert_eq!(report.inserted, 3);
/// assert_eq!(report.duplicates, [3]);
/// assert_eq!(tree.iter().collect::<Vec<_>>(), [3, 5, 8]);
/// ```
pub fn load<R: BufRead>(tree: &mut Tree, reader: R) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();

    'lines: for line in reader.split(b'\n') {
        let line = line?;
        let tokens = line
            .split(u8::is_ascii_whitespace)
            .filter(|token| !token.is_empty());
        for token in tokens {
            let Some(value) = parse_token(token) else {
                let token = String::from_utf8_lossy(token);
                warn!(%token, "stopping at non-integer token");
                report.stopped_at = Some(token.into_owned());
                break 'lines;
            };

            match tree.insert_unique(value) {
                Ok(Insertion::Inserted) => report.inserted += 1,
                Ok(Insertion::Duplicate) => {
                    debug!(value, "skipping duplicate");
                    report.duplicates.push(value);
                }
                Err(source) => {
                    return Err(LoadError::Alloc {
                        inserted: report.inserted,
                        source,
                    })
                }
            }
        }
    }

    info!(
        inserted = report.inserted,
        duplicates = report.duplicates.len(),
        height = tree.height(),
        "loaded tree"
    );
    Ok(report)
}

fn parse_token(token: &[u8]) -> Option<i32> {
    str::from_utf8(token).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AllocError;

    #[test]
    fn mixed_separators() {
        let mut tree = Tree::new();
        let report = load(&mut tree, "  4\t2\n\n6\r\n 1 3   5\n".as_bytes()).unwrap();

        assert_eq!(report.inserted, 6);
        assert!(report.duplicates.is_empty());
        assert_eq!(report.stopped_at, None);
        assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn empty_input() {
        let mut tree = Tree::new();
        let report = load(&mut tree, "".as_bytes()).unwrap();

        assert_eq!(report, LoadReport::default());
        assert!(tree.is_empty());
    }

    #[test]
    fn duplicates_are_reported_in_order() {
        let mut tree = Tree::new();
        let report = load(&mut tree, "7 7 1 7 1".as_bytes()).unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(report.duplicates, [7, 1, 7, 1]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn stops_at_first_bad_token() {
        let mut tree = Tree::new();
        let report = load(&mut tree, "3 1\n2 x 9\n10".as_bytes()).unwrap();

        assert_eq!(report.inserted, 3);
        assert_eq!(report.stopped_at.as_deref(), Some("x"));
        assert!(!tree.contains(9));
        assert!(!tree.contains(10));
    }

    #[test]
    fn out_of_range_token_stops_reading() {
        let mut tree = Tree::new();
        let report = load(&mut tree, "1 99999999999 2".as_bytes()).unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(report.stopped_at.as_deref(), Some("99999999999"));
    }

    #[test]
    fn invalid_utf8_stops_reading() {
        let mut tree = Tree::new();
        let report = load(&mut tree, &b"5 3 8\n1 \xff 4\n"[..]).unwrap();

        assert_eq!(report.inserted, 4);
        assert_eq!(report.stopped_at.as_deref(), Some("\u{fffd}"));
        assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 3, 5, 8]);
    }

    #[test]
    fn invalid_utf8_keeps_earlier_values_on_the_line() {
        let mut tree = Tree::new();
        let report = load(&mut tree, &b"5 3 8 \xe9t\xe9\n2"[..]).unwrap();

        assert_eq!(report.inserted, 3);
        assert!(report.stopped_at.is_some());
        assert_eq!(tree.iter().collect::<Vec<_>>(), [3, 5, 8]);
    }

    #[test]
    fn allocation_failure_keeps_loaded_values() {
        let mut tree = Tree::with_node_limit(3);
        let err = load(&mut tree, "5 3 5 8 1 4".as_bytes()).unwrap_err();

        match err {
            LoadError::Alloc { inserted, source } => {
                assert_eq!(inserted, 3);
                assert_eq!(source, AllocError::LimitReached { limit: 3 });
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(tree.iter().collect::<Vec<_>>(), [3, 5, 8]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn open_missing_file() {
        let err = open(Path::new("/definitely/not/here.txt")).unwrap_err();

        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
