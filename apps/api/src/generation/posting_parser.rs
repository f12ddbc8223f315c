//! Posting parser — recovers company, title, and application URL from pasted job posting text.
//!
//! Purely heuristic. Each field is matched against a prioritized list of patterns and the
//! first pattern that matches wins; later patterns are never consulted. Pattern order is
//! part of the behavior: reordering changes which text wins on ambiguous postings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::profile::JobProfile;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| compile(r"(?i)(https?://[^\s]+)"));

static COMPANY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"(?i)(?:at |@|company:|employer:|join )\s*([A-Za-z0-9\s&.,'-]{2,50})"),
        compile(r"(?i)([A-Za-z0-9\s&.,'-]{2,30})\s+(?:is hiring|seeks|looking for)"),
    ]
});

static TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"(?i)(?:position:|role:|title:|job:|hiring:)\s*([A-Za-z0-9\s&.,'-]{2,50})"),
        compile(
            r"(?i)(?:we are looking for|seeking|hiring)\s+(?:a |an )?([A-Za-z0-9\s&.,'-]{2,50})",
        ),
        // "Join X as a <title>" phrasing; only reached when neither explicit marker matched.
        compile(r"(?i)\bas\s+(?:a |an )([A-Za-z0-9\s&.,'-]{2,50})"),
    ]
});

/// Patterns are literals; a failure here is a programming error caught by the unit tests.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid posting pattern {pattern}: {e}"))
}

/// Fields recovered from a pasted posting. Unmatched fields are `None`, never empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPosting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
    pub clean_description: String,
}

/// Extracts posting fields from raw text. Never fails; at worst every optional field is
/// `None` and the description is the whitespace-normalized input.
pub fn extract(raw_text: &str) -> ExtractedPosting {
    let urls: Vec<&str> = URL_PATTERN
        .find_iter(raw_text)
        .map(|m| m.as_str())
        .collect();

    let without_urls = URL_PATTERN.replace_all(raw_text, "");
    let clean_description = collapse_whitespace(&without_urls);

    ExtractedPosting {
        company_name: first_match(&COMPANY_PATTERNS, raw_text),
        job_title: first_match(&TITLE_PATTERNS, raw_text),
        application_url: urls.first().map(|url| url.to_string()),
        clean_description,
    }
}

/// Capture group 1 of the first pattern that matches, trimmed.
/// A capture that trims to nothing counts as no match.
fn first_match(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl ExtractedPosting {
    /// Applies the extraction to a job draft.
    ///
    /// The description becomes the clean text, or `raw_text` as pasted when cleaning left
    /// nothing. Company, title, and URL only fill fields that are currently blank: an
    /// absent extraction means "no update", never "clear".
    pub fn merge_into(&self, job: &mut JobProfile, raw_text: &str) {
        job.job_description = if self.clean_description.is_empty() {
            raw_text.to_string()
        } else {
            self.clean_description.clone()
        };
        if let Some(company) = &self.company_name {
            if job.company_name.trim().is_empty() {
                job.company_name = company.clone();
            }
        }
        if let Some(title) = &self.job_title {
            if job.job_title.trim().is_empty() {
                job.job_title = title.clone();
            }
        }
        if let Some(url) = &self.application_url {
            let blank = job
                .application_url
                .as_deref()
                .map_or(true, |current| current.trim().is_empty());
            if blank {
                job.application_url = Some(url.clone());
            }
        }
    }

    /// Human-readable names of the fields that were recovered, for user feedback.
    pub fn filled_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.company_name.is_some() {
            fields.push("Company");
        }
        if self.job_title.is_some() {
            fields.push("Job Title");
        }
        if self.application_url.is_some() {
            fields.push("URL");
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert_eq!(COMPANY_PATTERNS.len(), 2);
        assert_eq!(TITLE_PATTERNS.len(), 3);
        Lazy::force(&URL_PATTERN);
    }

    #[test]
    fn test_join_posting_with_url() {
        let posting =
            extract("Join Acme Corp as a Backend Engineer! Apply: https://acme.example/jobs/42");

        assert!(posting.company_name.unwrap().contains("Acme Corp"));
        assert!(posting.job_title.unwrap().contains("Backend Engineer"));
        assert_eq!(
            posting.application_url.as_deref(),
            Some("https://acme.example/jobs/42")
        );
        assert_eq!(
            posting.clean_description,
            "Join Acme Corp as a Backend Engineer! Apply:"
        );
    }

    #[test]
    fn test_unstructured_text_yields_no_fields() {
        let posting = extract("no   identifiable\n structure here");
        assert_eq!(
            posting,
            ExtractedPosting {
                company_name: None,
                job_title: None,
                application_url: None,
                clean_description: "no identifiable structure here".to_string(),
            }
        );
    }

    #[test]
    fn test_explicit_markers() {
        let posting = extract("Company: Globex; Position: Site Reliability Engineer");
        assert_eq!(posting.company_name.as_deref(), Some("Globex"));
        assert_eq!(
            posting.job_title.as_deref(),
            Some("Site Reliability Engineer")
        );
    }

    #[test]
    fn test_company_before_is_hiring() {
        let posting = extract("Initech is hiring!");
        assert_eq!(posting.company_name.as_deref(), Some("Initech"));
        // "hiring" followed by "!" leaves no title capture
        assert_eq!(posting.job_title, None);
    }

    #[test]
    fn test_first_pattern_wins_over_later_patterns() {
        // Both company patterns match; the marker pattern is listed first.
        let posting = extract("Hooli is hiring. Employer: Pied Piper");
        assert_eq!(posting.company_name.as_deref(), Some("Pied Piper"));

        // Both title patterns match; the explicit "role:" marker is listed first.
        let posting = extract("We are looking for a Designer. Role: Product Designer");
        assert_eq!(posting.job_title.as_deref(), Some("Product Designer"));
    }

    #[test]
    fn test_seeking_pattern_skips_article() {
        let posting = extract("Umbrella seeks\nWe are seeking an Data Analyst!");
        assert_eq!(posting.job_title.as_deref(), Some("Data Analyst"));
        assert_eq!(posting.company_name.as_deref(), Some("Umbrella"));
    }

    #[test]
    fn test_first_url_wins_and_all_urls_are_removed() {
        let posting = extract(
            "Apply at http://one.example/a or https://two.example/b\tthanks https://one.example/a",
        );
        assert_eq!(
            posting.application_url.as_deref(),
            Some("http://one.example/a")
        );
        assert_eq!(posting.clean_description, "Apply at or thanks");
    }

    #[test]
    fn test_merge_fills_blank_fields_only() {
        let posting = ExtractedPosting {
            company_name: Some("Acme Corp".to_string()),
            job_title: Some("Backend Engineer".to_string()),
            application_url: Some("https://acme.example/jobs/42".to_string()),
            clean_description: "Join Acme Corp".to_string(),
        };
        let mut job = JobProfile {
            company_name: "Existing Co".to_string(),
            ..Default::default()
        };

        posting.merge_into(&mut job, "Join Acme Corp https://acme.example/jobs/42");

        assert_eq!(job.company_name, "Existing Co");
        assert_eq!(job.job_title, "Backend Engineer");
        assert_eq!(
            job.application_url.as_deref(),
            Some("https://acme.example/jobs/42")
        );
        assert_eq!(job.job_description, "Join Acme Corp");
    }

    #[test]
    fn test_merge_never_clears_existing_values() {
        let posting = extract("nothing to see");
        let mut job = JobProfile {
            company_name: "Acme".to_string(),
            job_title: "QA Lead".to_string(),
            application_url: Some("https://acme.example".to_string()),
            ..Default::default()
        };

        posting.merge_into(&mut job, "nothing to see");

        assert_eq!(job.company_name, "Acme");
        assert_eq!(job.job_title, "QA Lead");
        assert_eq!(job.application_url.as_deref(), Some("https://acme.example"));
        assert_eq!(job.job_description, "nothing to see");
    }

    #[test]
    fn test_url_only_paste_keeps_raw_text_as_description() {
        let raw = "  https://acme.example/jobs/42\n";
        let posting = extract(raw);
        assert_eq!(posting.clean_description, "");

        let mut job = JobProfile {
            job_description: "old description".to_string(),
            ..Default::default()
        };
        posting.merge_into(&mut job, raw);

        assert_eq!(job.job_description, raw);
        assert_eq!(
            job.application_url.as_deref(),
            Some("https://acme.example/jobs/42")
        );
    }

    #[test]
    fn test_filled_fields_in_fixed_order() {
        let posting = extract("Join Acme Corp as a Backend Engineer! https://acme.example/jobs/42");
        assert_eq!(posting.filled_fields(), vec!["Company", "Job Title", "URL"]);
        assert!(extract("plain").filled_fields().is_empty());
    }
}
