//! Instruction compiler — turns profiles plus a letter configuration into a completion request.
//!
//! Pure and deterministic: identical inputs always produce byte-identical instructions.

use crate::generation::prompts::{
    focus_bullet, length_spec, AUTO_INSTRUCTIONS, AUTO_SYSTEM, CLOSING_INSTRUCTION,
    CRITICAL_HEADING, FOCUS_HEADING, LONG_INSTRUCTIONS, LONG_SYSTEM, MEDIUM_INSTRUCTIONS,
    MEDIUM_SYSTEM, NO_EXTRA_CONTENT, SHORT_INSTRUCTIONS, SHORT_SYSTEM, TRUST_BANNER,
    TRUST_GUIDANCE, TRUST_SYSTEM,
};
use crate::models::letter::{LetterConfiguration, LetterLength};
use crate::models::profile::{or_placeholder, CandidateProfile, JobProfile};

const NOT_PROVIDED: &str = "Not provided";
const DEFAULT_CONTACT: &str = "Hiring Manager";

/// Everything the completion service needs for one generation. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub user_content: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// System text, sampling parameters, and numbered rules for one generation mode.
#[derive(Debug)]
pub struct LengthProfile {
    pub system: &'static str,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub instructions: &'static str,
}

const SHORT: LengthProfile = LengthProfile {
    system: SHORT_SYSTEM,
    max_output_tokens: 100,
    temperature: 0.3,
    instructions: SHORT_INSTRUCTIONS,
};

const MEDIUM: LengthProfile = LengthProfile {
    system: MEDIUM_SYSTEM,
    max_output_tokens: 200,
    temperature: 0.3,
    instructions: MEDIUM_INSTRUCTIONS,
};

const LONG: LengthProfile = LengthProfile {
    system: LONG_SYSTEM,
    max_output_tokens: 300,
    temperature: 0.3,
    instructions: LONG_INSTRUCTIONS,
};

const AUTO: LengthProfile = LengthProfile {
    system: AUTO_SYSTEM,
    max_output_tokens: 150,
    temperature: 0.3,
    instructions: AUTO_INSTRUCTIONS,
};

/// Trust mode has no numbered rules; `instructions` holds the free-form guidance instead.
const TRUST: LengthProfile = LengthProfile {
    system: TRUST_SYSTEM,
    max_output_tokens: 400,
    temperature: 0.8,
    instructions: TRUST_GUIDANCE,
};

/// Profile for a manual length. `Auto` and `Unspecified` share the auto profile.
pub fn length_profile(length: LetterLength) -> &'static LengthProfile {
    match length {
        LetterLength::Short => &SHORT,
        LetterLength::Medium => &MEDIUM,
        LetterLength::Long => &LONG,
        LetterLength::Auto | LetterLength::Unspecified => &AUTO,
    }
}

/// Profile selected by strict priority: trust mode first, then length.
/// An omitted length gets the auto profile.
pub fn select_profile(config: &LetterConfiguration) -> &'static LengthProfile {
    if config.trust_mode {
        return &TRUST;
    }
    match config.length {
        Some(length) => length_profile(length),
        None => &AUTO,
    }
}

/// Numbered rules for the user content. An omitted length is written as short here,
/// even though its system text and budget come from the auto profile.
fn rule_block(config: &LetterConfiguration, profile: &LengthProfile) -> &'static str {
    match config.length {
        None => SHORT.instructions,
        Some(_) => profile.instructions,
    }
}

/// Compiles the system instruction, user content, and sampling parameters.
///
/// Performs no validation; callers check required fields first.
pub fn compile(
    candidate: &CandidateProfile,
    job: &JobProfile,
    config: &LetterConfiguration,
) -> CompletionRequest {
    let profile = select_profile(config);

    CompletionRequest {
        system_instruction: profile.system.to_string(),
        user_content: render_user_content(candidate, job, config, profile),
        max_output_tokens: profile.max_output_tokens,
        temperature: profile.temperature,
    }
}

fn render_user_content(
    candidate: &CandidateProfile,
    job: &JobProfile,
    config: &LetterConfiguration,
    profile: &LengthProfile,
) -> String {
    let header = if config.trust_mode {
        TRUST_BANNER.to_string()
    } else {
        let length = config.length.unwrap_or(LetterLength::Short);
        format!("URGENT: Write a cover letter - {}.", length_spec(length))
    };

    let guidance = if config.trust_mode {
        profile.instructions.to_string()
    } else {
        format!(
            "{CRITICAL_HEADING}\n{}\n\n{}\n\n{NO_EXTRA_CONTENT}",
            rule_block(config, profile),
            render_focus_block(config)
        )
    };

    format!(
        "
{header}

Please write a professional cover letter based on the following information:

CANDIDATE INFORMATION:
- Name: {name}
- Email: {email}
- Phone: {phone}
- Experience: {experience}
- Skills: {skills}
- Education: {education}

JOB INFORMATION:
- Company: {company}
- Position: {position}
- Job Description: {description}
- Key Requirements: {requirements}
- Hiring Manager: {contact}

{guidance}

{CLOSING_INSTRUCTION}
",
        name = candidate.full_name,
        email = candidate.email,
        phone = or_placeholder(candidate.phone.as_deref(), NOT_PROVIDED),
        experience = candidate.experience,
        skills = candidate.skills,
        education = or_placeholder(candidate.education.as_deref(), NOT_PROVIDED),
        company = job.company_name,
        position = job.job_title,
        description = job.job_description,
        requirements = job.requirements,
        contact = or_placeholder(job.contact_person.as_deref(), DEFAULT_CONTACT),
    )
}

/// Empty when no focus is chosen; otherwise a leading blank line, the heading, and one
/// bullet per tag in input order.
fn render_focus_block(config: &LetterConfiguration) -> String {
    if config.focus.is_empty() {
        return String::new();
    }
    let bullets: Vec<String> = config.focus.iter().map(focus_bullet).collect();
    format!("\n{FOCUS_HEADING}\n{}", bullets.join("\n"))
}
