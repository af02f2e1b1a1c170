use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::MappingFlag;

/// A raw value imported from the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[cfg(test)]
impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }

    pub fn with_id(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Some(id.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingFlags {
    pub cancel_no_show_rule: bool,
    pub booking_rule: bool,
}

impl MappingFlags {
    pub fn get(&self, flag: MappingFlag) -> bool {
        match flag {
            MappingFlag::CancelNoShowRule => self.cancel_no_show_rule,
            MappingFlag::BookingRule => self.booking_rule,
        }
    }

    pub fn set(&mut self, flag: MappingFlag, value: bool) {
        match flag {
            MappingFlag::CancelNoShowRule => self.cancel_no_show_rule = value,
            MappingFlag::BookingRule => self.booking_rule = value,
        }
    }
}

/// Category assignments, notes and flags attached to one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub item: String,
    pub categories: BTreeMap<String, String>,
    pub notes: String,
    /// `None` for domains without rule flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MappingFlags>,
}

impl Mapping {
    pub(crate) fn empty(item: &str, with_flags: bool) -> Self {
        Self {
            item: item.to_string(),
            categories: BTreeMap::new(),
            notes: String::new(),
            flags: with_flags.then(MappingFlags::default),
        }
    }

    pub fn category(&self, name: &str) -> Option<&str> {
        self.categories.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagPatch {
    #[serde(default)]
    pub cancel_no_show_rule: Option<bool>,
    #[serde(default)]
    pub booking_rule: Option<bool>,
}

impl FlagPatch {
    pub fn is_empty(&self) -> bool {
        self.cancel_no_show_rule.is_none() && self.booking_rule.is_none()
    }

    pub fn entries(&self) -> impl Iterator<Item = (MappingFlag, bool)> {
        [
            (MappingFlag::CancelNoShowRule, self.cancel_no_show_rule),
            (MappingFlag::BookingRule, self.booking_rule),
        ]
        .into_iter()
        .filter_map(|(flag, v)| v.map(|v| (flag, v)))
    }
}

/// Fields applied by a mass edit.
///
/// Empty category values are skipped and empty notes leave existing notes
/// alone, so a patch can only add or overwrite, never blank out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingPatch {
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub flags: FlagPatch,
}

impl MappingPatch {
    pub(crate) fn category_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.is_empty())
    }
}
