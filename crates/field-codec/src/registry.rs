//! Per-entity registry of encryptable column names.
//!
//! The lists are authoritative: a column not listed here is never touched
//! by the codec, however sensitive it looks. Numeric columns (ages,
//! incomes, counts) are deliberately absent — PostgreSQL will reject
//! base64 text in an INTEGER column, so encrypting one fails the write.
//!
//! Built once at startup via [`FieldRegistry::standard`] and injected into
//! the record codec; never mutated afterwards.

use std::collections::HashMap;

/// The four entity types whose rows pass through the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Patient,
    ClinicalProforma,
    AdlFile,
    Prescription,
}

impl Entity {
    /// Stable name used in logs and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Patient => "patient",
            Entity::ClinicalProforma => "clinical_proforma",
            Entity::AdlFile => "adl_file",
            Entity::Prescription => "prescription",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Patient registration columns holding identity or contact text.
///
/// Excluded numeric columns: `age`, `monthly_income`, `family_members`.
const PATIENT_FIELDS: &[&str] = &[
    "name",
    "father_or_spouse_name",
    "address",
    "contact_number",
    "email",
    "guardian_name",
    "referred_by",
    "occupation",
    "education",
];

/// Visit-record (clinical proforma) narrative columns.
///
/// Excluded numeric columns: `visit_number`, `duration_months`.
const CLINICAL_PROFORMA_FIELDS: &[&str] = &[
    "chief_complaints",
    "history_of_present_illness",
    "past_psychiatric_history",
    "medical_history",
    "family_history",
    "personal_history",
    "mental_status_examination",
    "diagnosis",
    "treatment_plan",
];

/// ADL psychiatric-history form narrative columns.
///
/// Excluded numeric columns: `age_em_onset`, `total_children`.
const ADL_FILE_FIELDS: &[&str] = &[
    "presenting_complaints",
    "onset_and_course",
    "premorbid_personality",
    "substance_use_history",
    "risk_assessment",
    "adl_notes",
];

/// Prescription columns.
///
/// Excluded numeric columns: `quantity`, `refills`.
const PRESCRIPTION_FIELDS: &[&str] = &[
    "medicine",
    "dosage",
    "frequency",
    "instructions",
    "notes",
];

/// Immutable map from entity type to its encryptable column names.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    entries: HashMap<Entity, Vec<String>>,
}

impl FieldRegistry {
    /// The authoritative production registry.
    pub fn standard() -> Self {
        Self::from_entries([
            (Entity::Patient, PATIENT_FIELDS),
            (Entity::ClinicalProforma, CLINICAL_PROFORMA_FIELDS),
            (Entity::AdlFile, ADL_FILE_FIELDS),
            (Entity::Prescription, PRESCRIPTION_FIELDS),
        ])
    }

    /// Build a registry from explicit entries (tests, embedding callers).
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = (Entity, &'a [&'a str])>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(entity, fields)| {
                let fields = fields.iter().map(|f| (*f).to_owned()).collect();
                (entity, fields)
            })
            .collect();
        Self { entries }
    }

    /// Column names to encrypt for `entity`. Unregistered entities have no
    /// encryptable columns.
    pub fn fields(&self, entity: Entity) -> &[String] {
        self.entries.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }
}
