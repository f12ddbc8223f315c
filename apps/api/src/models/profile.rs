use serde::{Deserialize, Serialize};

/// The applicant's personal and professional details, as collected by the first form step.
///
/// Required fields default to empty strings on deserialization so that a missing field
/// surfaces as a validation error rather than a JSON rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
}

/// The target job, as collected by the second form step (or pasted and extracted).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProfile {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
}

impl CandidateProfile {
    /// Names of required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("experience", &self.experience),
            ("skills", &self.skills),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl JobProfile {
    /// Names of required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("companyName", &self.company_name),
            ("jobTitle", &self.job_title),
            ("jobDescription", &self.job_description),
            ("requirements", &self.requirements),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Returns the value unless it is absent or empty, in which case `placeholder` is used.
/// Whitespace-only values are kept as given.
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}
