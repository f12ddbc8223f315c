//! Deterministic demo letter substituted when the completion service is rate limited.

use crate::models::profile::{or_placeholder, CandidateProfile, JobProfile};

/// Marker appended to every fallback letter so the user can tell it apart from a real one.
pub const DEMO_MODE_MARKER: &str = "🚨 DEMO MODE: Micro cover letter (OpenAI quota exceeded).";

/// Builds the fallback letter directly from the profile fields.
pub fn fallback_letter(candidate: &CandidateProfile, job: &JobProfile) -> String {
    let experience = or_placeholder(Some(candidate.experience.as_str()), "relevant experience");
    let title = or_placeholder(Some(job.job_title.as_str()), "position");
    let company = or_placeholder(Some(job.company_name.as_str()), "your company");
    let skills = or_placeholder(Some(candidate.skills.as_str()), "key skills");
    let name = or_placeholder(Some(candidate.full_name.as_str()), "Your Name");

    format!(
        "Dear Hiring Manager,
My {experience} perfectly matches your {title} requirements at {company}.
My expertise in {skills} aligns directly with your needs.
Best regards,
{name}

---
{DEMO_MODE_MARKER}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_embeds_profile_fields() {
        let candidate = CandidateProfile {
            full_name: "Jane Doe".to_string(),
            experience: "5 years in QA".to_string(),
            skills: "automation testing".to_string(),
            ..Default::default()
        };
        let job = JobProfile {
            company_name: "Acme".to_string(),
            job_title: "QA Lead".to_string(),
            ..Default::default()
        };

        let letter = fallback_letter(&candidate, &job);
        assert_eq!(
            letter,
            "Dear Hiring Manager,\n\
             My 5 years in QA perfectly matches your QA Lead requirements at Acme.\n\
             My expertise in automation testing aligns directly with your needs.\n\
             Best regards,\n\
             Jane Doe\n\
             \n\
             ---\n\
             🚨 DEMO MODE: Micro cover letter (OpenAI quota exceeded)."
        );
    }

    #[test]
    fn test_fallback_uses_placeholders_for_blank_fields() {
        let letter = fallback_letter(&CandidateProfile::default(), &JobProfile::default());
        assert!(letter.contains("My relevant experience perfectly matches your position"));
        assert!(letter.contains("requirements at your company."));
        assert!(letter.contains("My expertise in key skills aligns"));
        assert!(letter.contains("Best regards,\nYour Name\n"));
        assert!(letter.ends_with(DEMO_MODE_MARKER));
    }
}
