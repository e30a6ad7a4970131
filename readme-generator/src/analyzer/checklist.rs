//! Well-known files the analyzer looks for at the repository root.

use std::collections::BTreeSet;

/// Summary field a checklist file fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistSlot {
    /// Existing README.
    Readme,
    /// Package or build manifest.
    Manifest,
    /// Dependency list.
    DependencyList,
}

/// Candidate file names for one slot, in order of preference.
#[derive(Debug, Clone, Copy)]
pub struct ChecklistEntry {
    /// Slot the file fills.
    pub slot: ChecklistSlot,
    /// Root-level file names, most preferred first.
    pub candidates: &'static [&'static str],
}

/// The fixed checklist.
pub const CHECKLIST: &[ChecklistEntry] = &[
    ChecklistEntry {
        slot: ChecklistSlot::Readme,
        candidates: &[
            "README.md",
            "readme.md",
            "Readme.md",
            "README.MD",
            "README.rst",
            "README.txt",
            "README",
        ],
    },
    ChecklistEntry {
        slot: ChecklistSlot::Manifest,
        candidates: &[
            "package.json",
            "Cargo.toml",
            "pyproject.toml",
            "go.mod",
            "pom.xml",
            "build.gradle",
            "build.gradle.kts",
            "composer.json",
        ],
    },
    ChecklistEntry {
        slot: ChecklistSlot::DependencyList,
        candidates: &["requirements.txt", "Pipfile", "Gemfile", "environment.yml"],
    },
];

/// A checklist file present in the directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistMatch {
    /// Slot the file fills.
    pub slot: ChecklistSlot,
    /// Matched file name.
    pub file_name: &'static str,
}

/// Picks, per slot, the first candidate present in `file_names`.
///
/// Slots with no candidate in the listing produce no match, so nothing is
/// fetched for them.
#[must_use]
pub fn select_files(file_names: &BTreeSet<String>) -> Vec<ChecklistMatch> {
    CHECKLIST
        .iter()
        .filter_map(|entry| {
            entry
                .candidates
                .iter()
                .find(|candidate| file_names.contains(**candidate))
                .map(|file_name| ChecklistMatch {
                    slot: entry.slot,
                    file_name,
                })
        })
        .collect()
}
