//! Institution profile model.
//!
//! The profile is a singleton: at most one instance exists system-wide. Its
//! id is absent until the first remote insert succeeds, and the nested
//! sub-records travel with it as one denormalized document - the cache and
//! the remote store both persist the profile as a single snapshot.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchoolProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub registration_number: String,
    pub census_code: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub education_levels: Vec<EducationLevel>,
    pub grade_years: Vec<GradeYear>,
    pub shifts: Vec<SchoolShift>,
    pub special_ed: SpecialEdSupport,
    pub infrastructure: Infrastructure,
    pub principal: String,
    pub vice_principal: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub complement: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    EarlyChildhood,
    Elementary,
    MiddleSchool,
    HighSchool,
    AdultEducation,
}

/// A grade-year offered by the school (e.g. "3rd year"). Carries its own id
/// so individual entries can be toggled or removed by the host application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeYear {
    pub id: String,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    Morning,
    Afternoon,
    Evening,
    FullDay,
}

impl ShiftKind {
    /// Default start/end times for a newly enabled shift.
    pub fn default_hours(self) -> (&'static str, &'static str) {
        match self {
            ShiftKind::Morning => ("07:00", "12:00"),
            ShiftKind::Afternoon => ("13:00", "18:00"),
            ShiftKind::Evening => ("19:00", "22:00"),
            ShiftKind::FullDay => ("07:00", "16:00"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolShift {
    pub kind: ShiftKind,
    pub starts: String,
    pub ends: String,
    pub active: bool,
}

impl SchoolShift {
    /// A shift of the given kind with its default hours, enabled.
    pub fn with_default_hours(kind: ShiftKind) -> Self {
        let (starts, ends) = kind.default_hours();
        Self {
            kind,
            starts: starts.to_string(),
            ends: ends.to_string(),
            active: true,
        }
    }
}

/// Special-education support offered by the school.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialEdSupport {
    pub offered: bool,
    pub resource_room: bool,
    pub resource_room_count: u32,
    pub disabilities_served: Vec<String>,
    pub staff_count: u32,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Infrastructure {
    pub accessibility: Accessibility,
    pub spaces: SchoolSpaces,
    pub total_rooms: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Accessibility {
    pub ramp: bool,
    pub elevator: bool,
    pub adapted_restroom: bool,
    pub tactile_floor: bool,
    pub braille_signage: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchoolSpaces {
    pub resource_room: bool,
    pub resource_room_count: u32,
    pub computer_lab: bool,
    pub science_lab: bool,
    pub library: bool,
    pub sports_court: bool,
    pub covered_court: bool,
    pub auditorium: bool,
    pub cafeteria: bool,
    pub playground: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_default_hours() {
        let shift = SchoolShift::with_default_hours(ShiftKind::Morning);
        assert_eq!(shift.starts, "07:00");
        assert_eq!(shift.ends, "12:00");
        assert!(shift.active);

        let (starts, ends) = ShiftKind::Evening.default_hours();
        assert_eq!(starts, "19:00");
        assert_eq!(ends, "22:00");
    }

    #[test]
    fn test_profile_snapshot_round_trip() {
        let mut profile = SchoolProfile::default();
        profile.name = "North Hill Elementary".to_string();
        profile.shifts.push(SchoolShift::with_default_hours(ShiftKind::FullDay));
        profile.education_levels.push(EducationLevel::Elementary);

        let json = serde_json::to_string(&profile).unwrap();
        // No id yet: the field must be absent from the snapshot, not null.
        assert!(!json.contains("\"id\""));

        let back: SchoolProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "North Hill Elementary");
        assert_eq!(back.shifts.len(), 1);
        assert_eq!(back.education_levels, vec![EducationLevel::Elementary]);
    }
}
