use std::fmt;

use serde::{Deserialize, Serialize};

/// The four fixed item kinds that can be mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    AppointmentType,
    AppointmentPurpose,
    Doctor,
    Location,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::AppointmentType,
        Domain::AppointmentPurpose,
        Domain::Doctor,
        Domain::Location,
    ];

    /// Position in the store's per-domain array.
    pub fn index(self) -> usize {
        match self {
            Domain::AppointmentType => 0,
            Domain::AppointmentPurpose => 1,
            Domain::Doctor => 2,
            Domain::Location => 3,
        }
    }

    /// Worksheet name used for import and export.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Domain::AppointmentType => "Appointment Type",
            Domain::AppointmentPurpose => "Appointment Purpose",
            Domain::Doctor => "Doctor",
            Domain::Location => "Location",
        }
    }

    /// Header of the column holding the item name.
    pub fn primary_column(self) -> &'static str {
        match self {
            Domain::AppointmentType => "type",
            Domain::AppointmentPurpose => "purpose",
            Domain::Doctor => "doctor",
            Domain::Location => "location",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Domain::AppointmentType => "Appointment Types",
            Domain::AppointmentPurpose => "Appointment Purposes",
            Domain::Doctor => "Doctors/Providers",
            Domain::Location => "Locations",
        }
    }

    /// Only appointment types and purposes carry the rule flags.
    pub fn supports_flags(self) -> bool {
        matches!(self, Domain::AppointmentType | Domain::AppointmentPurpose)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// Boolean rules attached to appointment type/purpose mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MappingFlag {
    CancelNoShowRule,
    BookingRule,
}

impl MappingFlag {
    pub const ALL: [MappingFlag; 2] = [MappingFlag::CancelNoShowRule, MappingFlag::BookingRule];

    /// Export column header.
    pub fn column(self) -> &'static str {
        match self {
            MappingFlag::CancelNoShowRule => "Cancel/No-Show Rules",
            MappingFlag::BookingRule => "Booking Rule",
        }
    }
}
