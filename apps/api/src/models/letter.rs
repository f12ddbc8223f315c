use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of focus areas a configuration may carry.
pub const MAX_FOCUS_AREAS: usize = 3;

/// Requested letter length tier.
///
/// Unknown strings deserialize to `Unspecified`, which is compiled like `Auto`
/// except for the header directive (see `generation::prompts::length_spec`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterLength {
    Short,
    Medium,
    Long,
    Auto,
    #[serde(other)]
    Unspecified,
}

/// A qualification category the generated letter should emphasize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FocusArea {
    Experience,
    Skills,
    Education,
    Achievements,
    Passion,
    CultureFit,
    Other(String),
}

impl FocusArea {
    pub fn as_str(&self) -> &str {
        match self {
            FocusArea::Experience => "experience",
            FocusArea::Skills => "skills",
            FocusArea::Education => "education",
            FocusArea::Achievements => "achievements",
            FocusArea::Passion => "passion",
            FocusArea::CultureFit => "culture-fit",
            FocusArea::Other(tag) => tag,
        }
    }
}

impl From<String> for FocusArea {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "experience" => FocusArea::Experience,
            "skills" => FocusArea::Skills,
            "education" => FocusArea::Education,
            "achievements" => FocusArea::Achievements,
            "passion" => FocusArea::Passion,
            "culture-fit" => FocusArea::CultureFit,
            _ => FocusArea::Other(tag),
        }
    }
}

impl From<&str> for FocusArea {
    fn from(tag: &str) -> Self {
        FocusArea::from(tag.to_string())
    }
}

impl From<FocusArea> for String {
    fn from(area: FocusArea) -> Self {
        match area {
            FocusArea::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// User-chosen length, focus, and trust settings for one generation.
///
/// Mutable until generation is triggered; `snapshot()` produces the frozen copy
/// that is handed to the compiler.
///
/// `length` is `None` only when the caller never sent one. An explicit `null` or an
/// unknown string is kept as `Unspecified`; the two compile differently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterConfiguration {
    #[serde(
        deserialize_with = "present_length",
        skip_serializing_if = "Option::is_none"
    )]
    pub length: Option<LetterLength>,
    pub focus: Vec<FocusArea>,
    pub trust_mode: bool,
}

/// Only called when the field is present, so `null` lands here as `Unspecified`.
fn present_length<'de, D>(deserializer: D) -> Result<Option<LetterLength>, D::Error>
where
    D: Deserializer<'de>,
{
    let length = Option::<LetterLength>::deserialize(deserializer)?;
    Ok(Some(length.unwrap_or(LetterLength::Unspecified)))
}

impl LetterConfiguration {
    /// Starting options of an interactive form: short, no focus, trust mode off.
    pub fn form_defaults() -> Self {
        LetterConfiguration {
            length: Some(LetterLength::Short),
            ..Default::default()
        }
    }

    /// Enables or disables trust mode. Enabling it resets length to auto and clears focus;
    /// disabling it leaves those reset values in place.
    pub fn set_trust_mode(&mut self, enabled: bool) {
        self.trust_mode = enabled;
        if enabled {
            self.length = Some(LetterLength::Auto);
            self.focus.clear();
        }
    }

    /// Sets the manual length. Ignored while trust mode is on; returns whether it applied.
    pub fn set_length(&mut self, length: LetterLength) -> bool {
        if self.trust_mode {
            return false;
        }
        self.length = Some(length);
        true
    }

    /// Adds the focus area if absent, removes it if present.
    ///
    /// Returns `false` when nothing changed: trust mode is on, or adding would exceed
    /// `MAX_FOCUS_AREAS`.
    pub fn toggle_focus(&mut self, area: FocusArea) -> bool {
        if self.trust_mode {
            return false;
        }
        if let Some(pos) = self.focus.iter().position(|f| *f == area) {
            self.focus.remove(pos);
            return true;
        }
        if self.focus.len() >= MAX_FOCUS_AREAS {
            return false;
        }
        self.focus.push(area);
        true
    }

    /// Frozen copy used for a generation request.
    ///
    /// Trust mode forces `Auto` and an empty focus list regardless of manual values.
    /// Duplicate focus tags are dropped, keeping first occurrence order.
    pub fn snapshot(&self) -> LetterConfiguration {
        if self.trust_mode {
            return LetterConfiguration {
                length: Some(LetterLength::Auto),
                focus: Vec::new(),
                trust_mode: true,
            };
        }

        let mut focus: Vec<FocusArea> = Vec::with_capacity(self.focus.len());
        for area in &self.focus {
            if !focus.contains(area) {
                focus.push(area.clone());
            }
        }

        LetterConfiguration {
            length: self.length,
            focus,
            trust_mode: false,
        }
    }
}
