//! Report Analyzer
//!
//! Finds the most commonly reported WCAG recommendations in a directory of
//! accessibility reports. Every tag like `wcag143` becomes an element of an
//! [`IndexedMinHeap`] whose priority shrinks the more often the tag appears, so
//! repeated `remove_min` yields tags from the most to the least frequent.
//!

use crate::indexed_heap::IndexedMinHeap;
use crate::itertools::Itertools;
use crate::min_pq::*;
use crate::util::*;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

const TAG_PREFIX: &str = "wcag";
const TAG_MIN_DIGITS: usize = 3;
const TAG_MAX_DIGITS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagFrequency {
    pub tag: String,
    pub count: usize,
}

/// parse tab-separated `"<dotted index>\t<title>"` lines into `("wcag" + index without dots, title)` in file order
pub fn parse_definitions(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let (index, title) = line.split_once('\t')?;
            Some((format!("{TAG_PREFIX}{}", index.trim().replace('.', "")), title.trim_end().to_string()))
        })
        .collect()
}

pub fn load_definitions(path: impl AsRef<Path>) -> io::Result<Vec<(String, String)>> {
    Ok(parse_definitions(&fs::read_to_string(path)?))
}

/// every non-overlapping occurrence of `wcag` followed by 3 or 4 digits; longer digit runs are cut at 4
pub fn extract_tags(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let prefix = TAG_PREFIX.as_bytes();
    let mut tags = vec![];
    let mut cursor = 0;
    while cursor + prefix.len() <= bytes.len() {
        if &bytes[cursor..cursor + prefix.len()] != prefix {
            cursor += 1;
            continue;
        }
        let digits_begin = cursor + prefix.len();
        let digits = bytes[digits_begin..]
            .iter()
            .take(TAG_MAX_DIGITS)
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        if digits >= TAG_MIN_DIGITS {
            let end = digits_begin + digits;
            tags.push(text[cursor..end].to_string());
            cursor = end;
        } else {
            cursor += 1;
        }
    }
    tags
}

/// tags of every file under `dir`, walked recursively without following directory links;
/// a missing `dir` is an error, files that cannot be read as text contribute nothing
pub fn load_report_tags(dir: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let dir = dir.as_ref();
    let root_is_dir = fs::metadata(dir)?.is_dir();
    let mut tags = vec![];
    let mut pending = vec![(dir.to_path_buf(), root_is_dir)];
    while let Some((path, is_dir)) = pending.pop() {
        if is_dir {
            let mut children: Vec<_> = fs::read_dir(&path)?
                .filter_map(|entry| {
                    let entry = entry.ok()?;
                    // `DirEntry::file_type` does not traverse symlinks
                    let is_dir = entry.file_type().ok()?.is_dir();
                    Some((entry.path(), is_dir))
                })
                .collect();
            // keep the walk order independent of the file system
            children.sort();
            pending.extend(children.into_iter().rev());
        } else if let Ok(content) = fs::read_to_string(&path) {
            tags.extend(extract_tags(&content));
        }
    }
    Ok(tags)
}

/// `total - (count - 1)`: the most frequent tag gets the lowest priority
pub fn tag_priorities(tags: &[String]) -> Vec<(String, Priority)> {
    let total = tags.len();
    tags.iter()
        .counts()
        .into_iter()
        .map(|(tag, count)| (tag.clone(), (total - (count - 1)) as Priority))
        .collect()
}

/// the `k` most frequent tags, most frequent first; ties come out in unspecified order
pub fn most_common(tags: &[String], k: usize) -> MinPQResult<Vec<TagFrequency>> {
    let total = tags.len();
    let mut heap = IndexedMinHeap::from_priorities(tag_priorities(tags))?;
    let mut result = Vec::with_capacity(k.min(heap.size()));
    while result.len() < k && !heap.is_empty() {
        let priority = heap.peek_min_priority()?;
        let tag = heap.remove_min()?;
        result.push(TagFrequency {
            tag,
            count: total + 1 - priority as usize,
        });
    }
    Ok(result)
}
