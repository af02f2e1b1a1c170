use serde::{Deserialize, Serialize};

/// A user-defined attribute with a fixed set of allowed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub values: Vec<String>,
}

impl Category {
    /// Builds a category from the comma-separated form used in the
    /// Categories sheet and the add/edit forms.
    pub fn from_csv(name: &str, values: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            values: parse_values(values),
        }
    }

    pub fn allows(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Values joined back into the sheet representation.
    pub fn values_csv(&self) -> String {
        self.values.join(", ")
    }
}

/// Splits on commas, trims, drops blanks and repeated values (first wins).
pub fn parse_values(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() || out.iter().any(|v| v == part) {
            continue;
        }
        out.push(part.to_string());
    }
    out
}
