//! Incident records logged by field personnel.
//!
//! An incident is created once, stamped with its author and a creation
//! timestamp, and thereafter immutable except for the two transfer fields
//! updated through [`TransferUpdate`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::{User, UserId};

/// The administrative zones accepted for an incident's `lga` field.
///
/// Matching is case-sensitive and exact.
pub const VALID_LGAS: [&str; 20] = [
    "Agege",
    "Ajeromi-Ifelodun",
    "Alimosho",
    "Amuwo-Odofin",
    "Apapa",
    "Badagry",
    "Epe",
    "Eti-Osa",
    "Ibeju-Lekki",
    "Ifako-Ijaiye",
    "Ikeja",
    "Ikorodu",
    "Kosofe",
    "Lagos Island",
    "Lagos Mainland",
    "Mushin",
    "Ojo",
    "Oshodi-Isolo",
    "Shomolu",
    "Surulere",
];

/// Maximum accepted patient-name length.
pub const PATIENT_NAME_MAX: usize = 200;
/// Maximum accepted patient age.
pub const PATIENT_AGE_MAX: i32 = 150;
/// Maximum accepted location length.
pub const LOCATION_MAX: usize = 500;
/// Minimum accepted length for description and action-taken narratives.
pub const NARRATIVE_MIN: usize = 10;
/// Maximum accepted length for description and action-taken narratives.
pub const NARRATIVE_MAX: usize = 2000;

/// Collapse internal whitespace runs to single spaces and trim the ends.
///
/// Applied identically to every free-text incident field before validation.
///
/// # Examples
/// ```
/// use lifeline_backend::domain::incident::normalize_text;
///
/// assert_eq!(normalize_text("  fell \t from  height \n"), "fell from height");
/// ```
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn lga_sample() -> String {
    VALID_LGAS[..5].join(", ")
}

/// Validation errors for incident fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncidentValidationError {
    /// Patient name was blank once normalized.
    EmptyPatientName,
    /// Patient name exceeded [`PATIENT_NAME_MAX`].
    PatientNameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Patient age fell outside `0..=150`.
    PatientAgeOutOfRange {
        /// The rejected age.
        value: i32,
    },
    /// Patient sex named neither `Male` nor `Female`.
    UnknownPatientSex {
        /// The rejected input.
        value: String,
    },
    /// Location was blank once normalized.
    EmptyLocation,
    /// Location exceeded [`LOCATION_MAX`].
    LocationTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// LGA did not match any accepted zone.
    UnknownLga {
        /// The rejected input.
        value: String,
    },
    /// Description fell outside the narrative bounds.
    DescriptionLength {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },
    /// Action-taken fell outside the narrative bounds.
    ActionTakenLength {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for IncidentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPatientName => write!(f, "patient name must not be empty"),
            Self::PatientNameTooLong { max } => {
                write!(f, "patient name must be at most {max} characters")
            }
            Self::PatientAgeOutOfRange { value } => {
                write!(f, "patient age {value} must be between 0 and {PATIENT_AGE_MAX}")
            }
            Self::UnknownPatientSex { value } => {
                write!(f, "patient sex {value:?} must be Male or Female")
            }
            Self::EmptyLocation => write!(f, "location must not be empty"),
            Self::LocationTooLong { max } => {
                write!(f, "location must be at most {max} characters")
            }
            Self::UnknownLga { value } => write!(
                f,
                "unknown LGA {value:?}; valid values include {}, ...",
                lga_sample()
            ),
            Self::DescriptionLength { min, max } => {
                write!(f, "description must be between {min} and {max} characters")
            }
            Self::ActionTakenLength { min, max } => {
                write!(f, "action taken must be between {min} and {max} characters")
            }
        }
    }
}

impl std::error::Error for IncidentValidationError {}

/// Recorded patient sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PatientSex {
    /// Wire value `Male`.
    Male,
    /// Wire value `Female`.
    Female,
}

impl fmt::Display for PatientSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("Male"),
            Self::Female => f.write_str("Female"),
        }
    }
}

impl std::str::FromStr for PatientSex {
    type Err = IncidentValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            other => Err(IncidentValidationError::UnknownPatientSex {
                value: other.to_owned(),
            }),
        }
    }
}

/// A validated administrative zone from [`VALID_LGAS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Lga(String);

impl Lga {
    /// Validate `raw` against the accepted zone list (case-sensitive).
    ///
    /// # Examples
    /// ```
    /// use lifeline_backend::domain::Lga;
    ///
    /// assert!(Lga::new("Ikeja").is_ok());
    /// assert!(Lga::new("Neverland").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IncidentValidationError> {
        let raw = raw.as_ref();
        if VALID_LGAS.contains(&raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(IncidentValidationError::UnknownLga {
                value: raw.to_owned(),
            })
        }
    }

    /// The zone name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Lga {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Lga> for String {
    fn from(value: Lga) -> Self {
        value.0
    }
}

impl TryFrom<String> for Lga {
    type Error = IncidentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Caller-supplied incident fields before validation and author stamping.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentDraft {
    /// Patient name, free text.
    pub patient_name: String,
    /// Optional patient age.
    pub patient_age: Option<i32>,
    /// Recorded patient sex.
    pub patient_sex: PatientSex,
    /// Free-text location of the incident.
    pub location: String,
    /// Administrative zone, already validated.
    pub lga: Lga,
    /// What happened.
    pub description: String,
    /// What the responder did.
    pub action_taken: String,
    /// Whether a hospital transfer was flagged.
    pub transfer_to_hospital: bool,
    /// Destination hospital; meaningful only with the transfer flag, and not
    /// checked against the hospital reference set.
    pub hospital_id: Option<String>,
}

/// Overwrite for the two mutable transfer fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferUpdate {
    /// New transfer flag.
    pub transfer_to_hospital: bool,
    /// New destination hospital, if any.
    pub hospital_id: Option<String>,
}

/// A persisted incident record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Stable opaque identifier.
    pub id: Uuid,
    /// Normalized patient name.
    pub patient_name: String,
    /// Optional patient age.
    pub patient_age: Option<i32>,
    /// Recorded patient sex.
    pub patient_sex: PatientSex,
    /// Normalized free-text location.
    pub location: String,
    /// Validated administrative zone.
    pub lga: Lga,
    /// Normalized description narrative.
    pub description: String,
    /// Normalized action-taken narrative.
    pub action_taken: String,
    /// Whether a hospital transfer is flagged.
    pub transfer_to_hospital: bool,
    /// Destination hospital, if flagged.
    pub hospital_id: Option<String>,
    /// Identifier of the authoring personnel; stamped, never caller-supplied.
    pub personnel_id: UserId,
    /// Author name denormalized at creation time.
    pub personnel_name: String,
    /// Creation timestamp, set once.
    pub created_at: DateTime<Utc>,
}

impl Incident {
    /// Validate and normalize a draft, stamping `author` and assigning a
    /// fresh identifier and creation timestamp.
    pub fn from_draft(draft: IncidentDraft, author: &User) -> Result<Self, IncidentValidationError> {
        let patient_name = normalize_text(&draft.patient_name);
        if patient_name.is_empty() {
            return Err(IncidentValidationError::EmptyPatientName);
        }
        if patient_name.chars().count() > PATIENT_NAME_MAX {
            return Err(IncidentValidationError::PatientNameTooLong {
                max: PATIENT_NAME_MAX,
            });
        }

        if let Some(age) = draft.patient_age {
            if !(0..=PATIENT_AGE_MAX).contains(&age) {
                return Err(IncidentValidationError::PatientAgeOutOfRange { value: age });
            }
        }

        let location = normalize_text(&draft.location);
        if location.is_empty() {
            return Err(IncidentValidationError::EmptyLocation);
        }
        if location.chars().count() > LOCATION_MAX {
            return Err(IncidentValidationError::LocationTooLong { max: LOCATION_MAX });
        }

        let description = normalize_text(&draft.description);
        if !(NARRATIVE_MIN..=NARRATIVE_MAX).contains(&description.chars().count()) {
            return Err(IncidentValidationError::DescriptionLength {
                min: NARRATIVE_MIN,
                max: NARRATIVE_MAX,
            });
        }

        let action_taken = normalize_text(&draft.action_taken);
        if !(NARRATIVE_MIN..=NARRATIVE_MAX).contains(&action_taken.chars().count()) {
            return Err(IncidentValidationError::ActionTakenLength {
                min: NARRATIVE_MIN,
                max: NARRATIVE_MAX,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            patient_name,
            patient_age: draft.patient_age,
            patient_sex: draft.patient_sex,
            location,
            lga: draft.lga,
            description,
            action_taken,
            transfer_to_hospital: draft.transfer_to_hospital,
            hospital_id: draft.hospital_id,
            personnel_id: author.id.clone(),
            personnel_name: author.full_name.as_str().to_owned(),
            created_at: Utc::now(),
        })
    }

    /// Overwrite exactly the two transfer fields.
    pub fn apply_transfer_update(&mut self, update: &TransferUpdate) {
        self.transfer_to_hospital = update.transfer_to_hospital;
        self.hospital_id = update.hospital_id.clone();
    }
}

/// A clamped pagination window for incident listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    skip: u64,
    limit: u64,
}

impl PageWindow {
    /// Listing size when the caller does not ask for one.
    pub const DEFAULT_LIMIT: i64 = 50;
    /// Smallest accepted listing size.
    pub const MIN_LIMIT: i64 = 1;
    /// Largest accepted listing size.
    pub const MAX_LIMIT: i64 = 100;

    /// Clamp raw caller input: `skip` to `>= 0`, `limit` to `[1, 100]`.
    ///
    /// # Examples
    /// ```
    /// use lifeline_backend::domain::PageWindow;
    ///
    /// let window = PageWindow::clamped(-3, 1000);
    /// assert_eq!(window.skip(), 0);
    /// assert_eq!(window.limit(), 100);
    /// ```
    pub fn clamped(skip: i64, limit: i64) -> Self {
        Self {
            skip: u64::try_from(skip.max(0)).unwrap_or(0),
            limit: u64::try_from(limit.clamp(Self::MIN_LIMIT, Self::MAX_LIMIT)).unwrap_or(1),
        }
    }

    /// Records to skip from the top of the ordering.
    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// Maximum records to return.
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::user::{EmailAddress, FullName, Role};

    #[fixture]
    fn author() -> User {
        User {
            id: UserId::random(),
            email: EmailAddress::new("medic@example.com").expect("valid email"),
            full_name: FullName::new("Field Medic").expect("valid name"),
            role: Role::Personnel,
            created_at: Utc::now(),
        }
    }

    fn draft() -> IncidentDraft {
        IncidentDraft {
            patient_name: "Ada Obi".to_owned(),
            patient_age: Some(34),
            patient_sex: PatientSex::Female,
            location: "Allen Avenue junction".to_owned(),
            lga: Lga::new("Ikeja").expect("valid lga"),
            description: "Collapsed at a bus stop, unresponsive on arrival".to_owned(),
            action_taken: "Administered oxygen and stabilised for transport".to_owned(),
            transfer_to_hospital: false,
            hospital_id: None,
        }
    }

    #[rstest]
    fn drafts_are_normalized_and_stamped(author: User) {
        let mut input = draft();
        input.patient_name = "  Ada   Obi ".to_owned();
        input.location = " Allen \t Avenue\njunction ".to_owned();

        let incident = Incident::from_draft(input, &author).expect("valid draft");
        assert_eq!(incident.patient_name, "Ada Obi");
        assert_eq!(incident.location, "Allen Avenue junction");
        assert_eq!(incident.personnel_id, author.id);
        assert_eq!(incident.personnel_name, "Field Medic");
    }

    #[rstest]
    fn fresh_identifiers_per_record(author: User) {
        let first = Incident::from_draft(draft(), &author).expect("valid draft");
        let second = Incident::from_draft(draft(), &author).expect("valid draft");
        assert_ne!(first.id, second.id);
    }

    #[rstest]
    #[case::blank_name("patient_name", "   ")]
    #[case::blank_location("location", " \t ")]
    fn blank_required_text_is_rejected(author: User, #[case] field: &str, #[case] value: &str) {
        let mut input = draft();
        match field {
            "patient_name" => input.patient_name = value.to_owned(),
            "location" => input.location = value.to_owned(),
            other => panic!("unexpected field {other}"),
        }
        assert!(Incident::from_draft(input, &author).is_err());
    }

    #[rstest]
    #[case(-1)]
    #[case(151)]
    fn out_of_range_ages_are_rejected(author: User, #[case] age: i32) {
        let mut input = draft();
        input.patient_age = Some(age);
        assert_eq!(
            Incident::from_draft(input, &author).expect_err("invalid age"),
            IncidentValidationError::PatientAgeOutOfRange { value: age }
        );
    }

    #[rstest]
    #[case(0)]
    #[case(150)]
    fn boundary_ages_are_accepted(author: User, #[case] age: i32) {
        let mut input = draft();
        input.patient_age = Some(age);
        assert!(Incident::from_draft(input, &author).is_ok());
    }

    #[rstest]
    fn short_narratives_are_rejected(author: User) {
        let mut input = draft();
        input.description = "too short".to_owned();
        assert_eq!(
            Incident::from_draft(input, &author).expect_err("short narrative"),
            IncidentValidationError::DescriptionLength {
                min: NARRATIVE_MIN,
                max: NARRATIVE_MAX,
            }
        );
    }

    #[rstest]
    fn whitespace_padding_does_not_satisfy_narrative_minimum(author: User) {
        // Nine letters padded with whitespace still collapse below the bound.
        let mut input = draft();
        input.action_taken = "  a b c d e   ".to_owned();
        assert!(Incident::from_draft(input, &author).is_err());
    }

    #[test]
    fn lga_accepts_known_zones_case_sensitively() {
        assert!(Lga::new("Ikeja").is_ok());
        assert!(Lga::new("ikeja").is_err());
        assert!(Lga::new("Neverland").is_err());
    }

    #[test]
    fn lga_errors_name_a_sample_of_valid_zones() {
        let err = Lga::new("Neverland").expect_err("unknown zone");
        let message = err.to_string();
        assert!(message.contains("Agege"));
        assert!(message.contains("Apapa"));
    }

    #[test]
    fn patient_sex_parses_exact_wire_values_only() {
        assert_eq!("Male".parse::<PatientSex>().expect("male"), PatientSex::Male);
        assert_eq!(
            "Female".parse::<PatientSex>().expect("female"),
            PatientSex::Female
        );
        assert!("male".parse::<PatientSex>().is_err());
        assert!("other".parse::<PatientSex>().is_err());
    }

    #[rstest]
    fn transfer_update_touches_only_transfer_fields(author: User) {
        let original = Incident::from_draft(draft(), &author).expect("valid draft");
        let mut updated = original.clone();
        updated.apply_transfer_update(&TransferUpdate {
            transfer_to_hospital: true,
            hospital_id: Some("hosp-1".to_owned()),
        });

        assert!(updated.transfer_to_hospital);
        assert_eq!(updated.hospital_id.as_deref(), Some("hosp-1"));

        let mut reverted = updated;
        reverted.apply_transfer_update(&TransferUpdate {
            transfer_to_hospital: original.transfer_to_hospital,
            hospital_id: original.hospital_id.clone(),
        });
        assert_eq!(reverted, original);
    }

    #[rstest]
    #[case(0, 50, 0, 50)]
    #[case(-10, 0, 0, 1)]
    #[case(25, 100, 25, 100)]
    #[case(3, 101, 3, 100)]
    fn page_windows_clamp_raw_input(
        #[case] skip: i64,
        #[case] limit: i64,
        #[case] expected_skip: u64,
        #[case] expected_limit: u64,
    ) {
        let window = PageWindow::clamped(skip, limit);
        assert_eq!(window.skip(), expected_skip);
        assert_eq!(window.limit(), expected_limit);
    }

    #[test]
    fn incidents_serialize_with_camel_case_keys() {
        let author = User {
            id: UserId::random(),
            email: EmailAddress::new("medic@example.com").expect("valid email"),
            full_name: FullName::new("Field Medic").expect("valid name"),
            role: Role::Personnel,
            created_at: Utc::now(),
        };
        let incident = Incident::from_draft(draft(), &author).expect("valid draft");
        let value = serde_json::to_value(&incident).expect("serializable");
        assert!(value.get("patientName").is_some());
        assert!(value.get("actionTaken").is_some());
        assert_eq!(value["lga"], serde_json::json!("Ikeja"));
        assert_eq!(value["patientSex"], serde_json::json!("Female"));
    }
}
