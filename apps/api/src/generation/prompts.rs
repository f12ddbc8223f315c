// All instruction text sent to the completion service for cover letter generation.
// The compiler assembles these verbatim; any edit here changes generated prompts byte-for-byte.

use crate::models::letter::{FocusArea, LetterLength};

/// System text when the model is given full creative control.
pub const TRUST_SYSTEM: &str = "You are an expert cover letter writer with full creative control. \
Write the BEST possible cover letter using your professional expertise. \
Choose the optimal length, structure, and focus areas based on the job requirements and candidate profile. \
Be impactful, professional, and tailored.";

pub const SHORT_SYSTEM: &str = "You are an expert cover letter writer. \
CRITICAL REQUIREMENT: Write EXACTLY 4-5 lines total (including greeting and closing). \
STRUCTURE: 1) Greeting line 2) ONE sentence about relevant experience \
3) ONE sentence about specific skills match 4) Closing line. \
NO additional content. Maximum 60 words total.";

pub const MEDIUM_SYSTEM: &str = "You are an expert cover letter writer. \
Write a concise 6-8 lines cover letter. \
Include greeting, 2-3 focused sentences about qualifications, and closing. \
Maximum 100 words total. Be direct and impactful.";

pub const LONG_SYSTEM: &str = "You are an expert cover letter writer. \
Write a comprehensive 3-4 paragraph cover letter. \
Include introduction, experience/achievements, skills/value proposition, and closing. \
Maximum 200 words total. Be detailed but professional.";

pub const AUTO_SYSTEM: &str = "You are an expert cover letter writer. \
Choose the optimal length and structure based on the job requirements and candidate profile. \
Write the most effective cover letter possible.";

/// Opening line of the user content in trust mode.
pub const TRUST_BANNER: &str = "TRUST MODE: You have full creative control. \
Write the BEST possible cover letter using your expertise. \
Choose optimal length, focus areas, and approach based on the job requirements.";

/// Free-form guidance that replaces the numbered instructions in trust mode.
pub const TRUST_GUIDANCE: &str = "TRUST MODE INSTRUCTIONS:
- Use your full expertise to write the BEST cover letter possible
- Choose the optimal length and structure based on the job requirements
- Focus on what will make the strongest impression
- Be creative, professional, and impactful
- No restrictions - write what works best";

pub const SHORT_INSTRUCTIONS: &str = r#"1. Write EXACTLY 4-5 lines total. NO MORE.
2. Line 1: "Dear Hiring Manager," or "Dear [Name],"
3. Line 2: ONE sentence about relevant experience that matches the job
4. Line 3: ONE sentence about specific skills that align with requirements
5. Line 4: "Best regards," or "Sincerely,"
6. Line 5: Candidate name
7. MAXIMUM 60 words total"#;

pub const MEDIUM_INSTRUCTIONS: &str = "1. Write 6-8 lines total
2. Include greeting and closing
3. 2-3 sentences focusing on key qualifications
4. MAXIMUM 100 words total
5. Keep it concise but slightly more detailed than short format";

pub const LONG_INSTRUCTIONS: &str = "1. Write 3-4 paragraphs
2. Paragraph 1: Introduction and interest
3. Paragraph 2: Relevant experience and achievements
4. Paragraph 3: Skills and value proposition
5. Paragraph 4: Closing and call to action
6. MAXIMUM 200 words total";

pub const AUTO_INSTRUCTIONS: &str = "1. Choose optimal length based on job complexity and requirements
2. Use your judgment for best format and structure
3. Focus on most impactful content";

/// Heading of the numbered block in every non-trust prompt.
pub const CRITICAL_HEADING: &str = "CRITICAL INSTRUCTIONS - FOLLOW EXACTLY:";

/// Last numbered rule of every non-trust prompt.
pub const NO_EXTRA_CONTENT: &str =
    "8. NO additional paragraphs, explanations, or content beyond specified format";

pub const FOCUS_HEADING: &str = "FOCUS AREAS (prioritize these):";

pub const CLOSING_INSTRUCTION: &str =
    "Format the cover letter as a complete, ready-to-send document.";

pub const SHORT_SPEC: &str = "EXACTLY 4-5 lines, MAXIMUM 60 words";
pub const MEDIUM_SPEC: &str = "6-8 lines, MAXIMUM 100 words";
pub const LONG_SPEC: &str = "3-4 paragraphs, MAXIMUM 200 words";
pub const AUTO_SPEC: &str = "optimal length based on job requirements (AI decides)";

/// Length directive used in the urgency header. Unrecognized lengths get the short directive.
pub fn length_spec(length: LetterLength) -> &'static str {
    match length {
        LetterLength::Short | LetterLength::Unspecified => SHORT_SPEC,
        LetterLength::Medium => MEDIUM_SPEC,
        LetterLength::Long => LONG_SPEC,
        LetterLength::Auto => AUTO_SPEC,
    }
}

/// One bullet line for a focus area.
pub fn focus_bullet(area: &FocusArea) -> String {
    let sentence = match area {
        FocusArea::Experience => {
            "Emphasize relevant professional experience and career progression"
        }
        FocusArea::Skills => "Highlight technical skills and expertise that match job requirements",
        FocusArea::Education => "Mention educational background and relevant qualifications",
        FocusArea::Achievements => "Include specific achievements and measurable results",
        FocusArea::Passion => "Show enthusiasm and passion for the field/company",
        FocusArea::CultureFit => "Demonstrate cultural alignment and soft skills",
        FocusArea::Other(tag) => return format!("- Focus on {tag}"),
    };
    format!("- {sentence}")
}
