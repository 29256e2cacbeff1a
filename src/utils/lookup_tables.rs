//! Ordinal Code Lookup Tables
//!
//! Maps the integer codes stored in the fish dataset to readable labels.
//! Tables are immutable statics; decoding takes the table explicitly so
//! callers (and tests) can supply their own.
//!
//! Columns:
//! - uncare: care difficulty (4 classes)
//! - availability: trade availability (4 classes)
//! - school: social behavior (3 classes)
//! - agression: aggression level (3 classes)
//! - breeding_difficulty: breeding difficulty (4 classes)

/// Label returned for any code not present in a table
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A single code with its label
#[derive(Debug, Clone, Copy)]
pub struct CodeLabel {
    pub code: i64,
    pub label: &'static str,
}

/// Fixed code → label table for one ordinal attribute
#[derive(Debug)]
pub struct CodeTable {
    pub attribute: &'static str,
    pub entries: &'static [CodeLabel],
}

impl CodeTable {
    /// Find the label for a code, if the table defines one
    pub fn get(&self, code: i64) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.label)
    }
}

// ============================================================================
// EMBEDDED CODE TABLES
// ============================================================================

pub static CARE_DIFFICULTY: CodeTable = CodeTable {
    attribute: "uncare",
    entries: &[
        CodeLabel { code: 4, label: "Beginner" },
        CodeLabel { code: 3, label: "Easy" },
        CodeLabel { code: 2, label: "Medium" },
        CodeLabel { code: 1, label: "Difficult" },
    ],
};

pub static AVAILABILITY: CodeTable = CodeTable {
    attribute: "availability",
    entries: &[
        CodeLabel { code: 4, label: "Very common" },
        CodeLabel { code: 3, label: "Common" },
        CodeLabel { code: 2, label: "Rare" },
        CodeLabel { code: 1, label: "Very rare" },
    ],
};

pub static BEHAVIOR: CodeTable = CodeTable {
    attribute: "school",
    entries: &[
        CodeLabel { code: 3, label: "Schooling" },
        CodeLabel { code: 2, label: "Social" },
        CodeLabel { code: 1, label: "Solitary" },
    ],
};

pub static AGGRESSION: CodeTable = CodeTable {
    attribute: "agression",
    entries: &[
        CodeLabel { code: 3, label: "Aggressive" },
        CodeLabel { code: 2, label: "Mostly peaceful" },
        CodeLabel { code: 1, label: "Peaceful" },
    ],
};

pub static BREEDING_DIFFICULTY: CodeTable = CodeTable {
    attribute: "breeding_difficulty",
    entries: &[
        CodeLabel { code: 4, label: "No record" },
        CodeLabel { code: 3, label: "Hard" },
        CodeLabel { code: 2, label: "Medium" },
        CodeLabel { code: 1, label: "Easy" },
    ],
};

/// Decode an optional ordinal code through a table, falling back to "Unknown"
pub fn decode(table: &CodeTable, code: Option<i64>) -> &'static str {
    code.and_then(|c| table.get(c)).unwrap_or(UNKNOWN_LABEL)
}
