//! Entry matching
//!
//! This module decides whether a single directory entry matches the configured
//! name patterns and kind filter. Name patterns use shell-style globs
//! (`*`, `?`, `[...]`); a pattern without metacharacters only matches the
//! identical name. Patterns are translated before compiling so that the
//! usual shell forms work on base names:
//!
//! - runs of `*` act as a single `*`
//! - `[^...]` and `[!...]` are negated classes
//! - `\x` matches `x` literally

use glob::{MatchOptions, Pattern};

use crate::errors::{FindError, FindResult};
use crate::fs::{DirEntry, EntryKind};

/// Trait for entry filters
pub trait FileFilter {
    /// Check if the entry matches the filter
    fn matches(&self, entry: &DirEntry) -> bool;

    /// Get the filter description
    fn description(&self) -> String;
}

fn malformed(pattern: &str, message: &str) -> FindError {
    FindError::Pattern {
        pattern: pattern.to_string(),
        message: message.to_string(),
    }
}

/// Rewrite a name pattern into the syntax accepted by `glob::Pattern`
fn translate(pattern: &str) -> FindResult<String> {
    let mut out = String::with_capacity(pattern.len() + 2);
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;
    // `]` directly after `[` or `[^` is a member, not the end of the class
    let mut class_start = false;

    while let Some(c) = chars.next() {
        if in_class {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => out.push(escaped),
                    None => return Err(malformed(pattern, "trailing backslash")),
                },
                ']' if !class_start => {
                    in_class = false;
                    out.push(']');
                }
                other => out.push(other),
            }
            class_start = false;
            continue;
        }

        match c {
            '\\' => match chars.next() {
                Some(escaped @ ('*' | '?' | '[' | ']')) => {
                    out.push('[');
                    out.push(escaped);
                    out.push(']');
                }
                Some(escaped) => out.push(escaped),
                None => return Err(malformed(pattern, "trailing backslash")),
            },
            '*' => {
                out.push('*');
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
            }
            '[' => {
                out.push('[');
                if matches!(chars.peek(), Some('^') | Some('!')) {
                    chars.next();
                    out.push('!');
                }
                in_class = true;
                class_start = true;
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

fn compile(pattern: &str) -> FindResult<Pattern> {
    Pattern::new(&translate(pattern)?).map_err(|e| malformed(pattern, e.msg))
}

/// Check `name` against `patterns` in order, stopping at the first match.
///
/// A malformed pattern reached before a match is an error.
pub fn matches(name: &str, patterns: &[String]) -> FindResult<bool> {
    for pattern in patterns {
        if compile(pattern)?.matches(name) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Name patterns compiled once and shared by every scan of a search
#[derive(Debug, Clone)]
pub struct NameMatcher {
    patterns: Vec<Pattern>,
    sources: Vec<String>,
    options: MatchOptions,
}

impl NameMatcher {
    /// Compile the given patterns
    pub fn new(patterns: &[String]) -> FindResult<Self> {
        let sources = patterns.to_vec();
        let patterns = patterns
            .iter()
            .map(|p| compile(p))
            .collect::<FindResult<Vec<_>>>()?;

        Ok(Self {
            patterns,
            sources,
            options: MatchOptions::new(),
        })
    }

    /// Compile the given patterns for case-insensitive matching
    pub fn new_ignore_case(patterns: &[String]) -> FindResult<Self> {
        let mut matcher = Self::new(patterns)?;
        matcher.options.case_sensitive = false;
        Ok(matcher)
    }

    /// Check whether a base name matches any pattern
    pub fn is_match(&self, name: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(name, self.options))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl FileFilter for NameMatcher {
    fn matches(&self, entry: &DirEntry) -> bool {
        self.is_match(&entry.name)
    }

    fn description(&self) -> String {
        let patterns: Vec<&str> = self.sources.iter().map(String::as_str).collect();
        let case = if self.options.case_sensitive {
            ""
        } else {
            " (ignore case)"
        };
        format!("name{} matches any of [{}]", case, patterns.join(", "))
    }
}

/// Restricts matches to regular files, directories, or either
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    /// Regular files and directories
    #[default]
    Any,
    /// Regular files only
    FileOnly,
    /// Directories only
    DirOnly,
}

impl KindFilter {
    /// Create a KindFilter from a `find -type` style code
    pub fn from_code(code: &str) -> FindResult<Self> {
        match code {
            "a" => Ok(KindFilter::Any),
            "f" => Ok(KindFilter::FileOnly),
            "d" => Ok(KindFilter::DirOnly),
            _ => Err(FindError::InvalidFileType(code.to_string())),
        }
    }

    /// Check whether an entry of the given kind passes this filter
    pub fn matches_kind(&self, kind: EntryKind) -> bool {
        match (self, kind) {
            (_, EntryKind::Other) => false,
            (KindFilter::Any, _) => true,
            (KindFilter::FileOnly, kind) => kind == EntryKind::Regular,
            (KindFilter::DirOnly, kind) => kind == EntryKind::Directory,
        }
    }
}

impl FileFilter for KindFilter {
    fn matches(&self, entry: &DirEntry) -> bool {
        self.matches_kind(entry.kind)
    }

    fn description(&self) -> String {
        match self {
            KindFilter::Any => "is a regular file or directory".to_string(),
            KindFilter::FileOnly => "is a regular file".to_string(),
            KindFilter::DirOnly => "is a directory".to_string(),
        }
    }
}
