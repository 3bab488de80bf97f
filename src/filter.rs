//! Extension allow-set filtering of raw listing entries.

use crate::types::FilteredFileEntry;

/// Returns the substring after the last `.` of `name`.
///
/// `None` when there is no dot or nothing follows the last one (`"notes."`).
pub fn extension_of(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Returns everything before the last `.` of `name`, or the whole name when it
/// has no dot.
pub fn base_name_of(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, _)) => base,
        None => name,
    }
}

/// Fixed allow-set of extensions, matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    allowed: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for ext in allowed {
            let ext = ext.into();
            if !list.contains(&ext) {
                list.push(ext);
            }
        }
        Self { allowed: list }
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        extension_of(name).is_some_and(|ext| self.allowed.iter().any(|a| a == ext))
    }

    /// Keeps the entries whose extension is in the allow-set, in server order.
    pub fn apply<I, S>(&self, raw: I) -> Vec<FilteredFileEntry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter().filter_map(|name| self.admit(name.as_ref())).collect()
    }

    /// Classifies a single entry.
    pub fn admit(&self, name: &str) -> Option<FilteredFileEntry> {
        let ext = extension_of(name)?;
        if !self.allowed.iter().any(|a| a == ext) {
            return None;
        }
        Some(FilteredFileEntry {
            name: name.to_string(),
            base: base_name_of(name).to_string(),
            extension: ext.to_string(),
        })
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(["pdf", "docx"])
    }
}
