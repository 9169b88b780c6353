//! Candidate ordering
//!
//! Text keys use a natural comparison: case-insensitive, with digit runs
//! compared as numbers, so `img2` sorts before `img10`. Size and time keys
//! fall back to name order on ties to keep the ordering total and stable
//! across platforms.

use std::cmp::Ordering;

use super::types::{SortKey, SortOrder};
use crate::scan::CandidateItem;

/// Case-insensitive, numeric-aware string comparison
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b), // total tie-break on raw bytes
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(lc), Some(rc)) => {
                if lc.is_ascii_digit() && rc.is_ascii_digit() {
                    let ln = take_number(&mut left);
                    let rn = take_number(&mut right);
                    match cmp_number(&ln, &rn) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                } else {
                    left.next();
                    right.next();
                    match lc.to_lowercase().cmp(rc.to_lowercase()) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                }
            }
        }
    }
}

/// Pull a full digit run off the iterator
fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek() {
        if c.is_ascii_digit() {
            digits.push(*c);
            chars.next();
        } else {
            break;
        }
    }
    digits
}

/// Compare digit runs numerically without parsing into a fixed-width integer
fn cmp_number(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Sort candidates in place by the given key and order
pub fn sort_items(items: &mut [CandidateItem], key: SortKey, order: SortOrder) {
    items.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => natural_cmp(&a.name, &b.name),
            SortKey::Extension => {
                natural_cmp(&a.extension, &b.extension).then_with(|| natural_cmp(&a.name, &b.name))
            }
            SortKey::Size => {
                let (sa, sb) = (size_of(a), size_of(b));
                sa.cmp(&sb).then_with(|| natural_cmp(&a.name, &b.name))
            }
            SortKey::Modified => {
                let (ta, tb) = (modified_of(a), modified_of(b));
                ta.cmp(&tb).then_with(|| natural_cmp(&a.name, &b.name))
            }
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn size_of(item: &CandidateItem) -> u64 {
    item.stats.as_ref().map_or(0, |s| s.size)
}

fn modified_of(item: &CandidateItem) -> std::time::SystemTime {
    item.stats
        .as_ref()
        .and_then(|s| s.modified)
        .unwrap_or(std::time::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ItemStats;
    use std::path::PathBuf;
    use std::time::{Duration, UNIX_EPOCH};

    fn item(name: &str, size: u64, modified_secs: u64) -> CandidateItem {
        let extension = name
            .rsplit_once('.')
            .map(|(_, e)| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();
        CandidateItem {
            full_path: PathBuf::from(format!("/d/{name}")),
            parent_dir: PathBuf::from("/d"),
            name: name.to_string(),
            extension,
            is_dir: false,
            is_file: true,
            stats: Some(ItemStats {
                size,
                modified: Some(UNIX_EPOCH + Duration::from_secs(modified_secs)),
                accessed: None,
                created: None,
            }),
        }
    }

    fn names(items: &[CandidateItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_natural_cmp_numeric_runs() {
        assert_eq!(natural_cmp("img2", "img10"), Ordering::Less);
        assert_eq!(natural_cmp("img10", "img2"), Ordering::Greater);
        assert_eq!(natural_cmp("a2b3", "a2b10"), Ordering::Less);
    }

    #[test]
    fn test_natural_cmp_case_insensitive() {
        assert_eq!(natural_cmp("Alpha", "beta"), Ordering::Less);
        assert_eq!(natural_cmp("BETA", "alpha"), Ordering::Greater);
    }

    #[test]
    fn test_natural_cmp_leading_zeros() {
        assert_eq!(natural_cmp("file007", "file7x"), Ordering::Less);
        assert_eq!(natural_cmp("file010", "file9"), Ordering::Greater);
    }

    #[test]
    fn test_sort_by_name_natural() {
        let mut items = vec![item("img10.png", 0, 0), item("img2.png", 0, 0), item("img1.png", 0, 0)];
        sort_items(&mut items, SortKey::Name, SortOrder::Asc);
        assert_eq!(names(&items), vec!["img1.png", "img2.png", "img10.png"]);
    }

    #[test]
    fn test_sort_descending() {
        let mut items = vec![item("a.txt", 0, 0), item("b.txt", 0, 0)];
        sort_items(&mut items, SortKey::Name, SortOrder::Desc);
        assert_eq!(names(&items), vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn test_sort_by_size_with_name_tiebreak() {
        let mut items = vec![item("b.txt", 5, 0), item("a.txt", 5, 0), item("c.txt", 1, 0)];
        sort_items(&mut items, SortKey::Size, SortOrder::Asc);
        assert_eq!(names(&items), vec!["c.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_sort_by_extension() {
        let mut items = vec![item("z.md", 0, 0), item("a.txt", 0, 0), item("b.md", 0, 0)];
        sort_items(&mut items, SortKey::Extension, SortOrder::Asc);
        assert_eq!(names(&items), vec!["b.md", "z.md", "a.txt"]);
    }

    #[test]
    fn test_sort_by_modified() {
        let mut items = vec![item("new.txt", 0, 200), item("old.txt", 0, 100)];
        sort_items(&mut items, SortKey::Modified, SortOrder::Asc);
        assert_eq!(names(&items), vec!["old.txt", "new.txt"]);
    }

    #[test]
    fn test_missing_stats_sort_first_by_size() {
        let mut no_stats = item("z.txt", 0, 0);
        no_stats.stats = None;
        let mut items = vec![item("a.txt", 10, 0), no_stats];
        sort_items(&mut items, SortKey::Size, SortOrder::Asc);
        assert_eq!(names(&items), vec!["z.txt", "a.txt"]);
    }
}
