// src/extractors/section.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

// --- Regex Patterns (Lazy Static) ---
const WEIGHT_TOKEN: &str = r"(?:\d+(?:\.\d+)?kg|\+\d+kg)";

// "Weight class" or "Class", then a whitespace separated run of `60kg` / `+87kg` tokens
pub(crate) static WEIGHT_CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:Weight class|Class)[:\s]*({token}(?:\s+{token})*)",
        token = WEIGHT_TOKEN
    ))
    .expect("Failed to compile WEIGHT_CLASS_RE")
});

// "Total", then a run of bare integers or `120kg` tokens ending at whitespace or end of text
pub(crate) static TOTAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Total[:\s]*((?:\d+(?:kg)?(?:\s+\d+(?:kg)?)*))(?:\s|$)")
        .expect("Failed to compile TOTAL_RE")
});

// --- Data Structures ---

/// The six age groups a standards document is divided into, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AgeGroup {
    YouthWomen,
    YouthMen,
    JuniorWomen,
    JuniorMen,
    SeniorWomen,
    SeniorMen,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 6] = [
        AgeGroup::YouthWomen,
        AgeGroup::YouthMen,
        AgeGroup::JuniorWomen,
        AgeGroup::JuniorMen,
        AgeGroup::SeniorWomen,
        AgeGroup::SeniorMen,
    ];

    /// Label as printed in the documents, e.g. "Junior Women"
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::YouthWomen => "Youth Women",
            AgeGroup::YouthMen => "Youth Men",
            AgeGroup::JuniorWomen => "Junior Women",
            AgeGroup::JuniorMen => "Junior Men",
            AgeGroup::SeniorWomen => "Senior Women",
            AgeGroup::SeniorMen => "Senior Men",
        }
    }

    /// The heading that opens this group's section, e.g. "Junior Women:"
    pub fn marker(&self) -> String {
        format!("{}:", self.label())
    }

    /// First word of the label: "Youth", "Junior" or "Senior"
    pub fn bracket(&self) -> &'static str {
        self.label().split(' ').next().unwrap_or_default()
    }

    /// "Female" for the women's groups, "Male" otherwise
    pub fn gender(&self) -> &'static str {
        if self.label().contains("Women") { "Female" } else { "Male" }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One qualifying total for one weight class of one age group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardRecord {
    pub age_group: AgeGroup,
    pub weight_class: String,    // e.g. "60kg" or "+87kg"
    pub weight_standard: String, // e.g. "120", kg suffix stripped
}

impl StandardRecord {
    pub fn new(age_group: AgeGroup, weight_class: impl Into<String>, weight_standard: impl Into<String>) -> Self {
        Self {
            age_group,
            weight_class: weight_class.into(),
            weight_standard: weight_standard.into(),
        }
    }
}

/// The slice of normalized text belonging to one age group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub age_group: AgeGroup,
    pub text: &'a str,
}

/// Positionally paired rows pulled out of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionFields {
    pub weight_classes: Vec<String>,
    pub totals: Vec<String>,
}

impl SectionFields {
    pub fn is_empty(&self) -> bool {
        self.weight_classes.is_empty() && self.totals.is_empty()
    }
}

// --- Section Splitting ---

/// Slices normalized text into one section per age group whose marker is present.
///
/// A section starts at its marker and ends where the next *found* marker (in
/// `AgeGroup::ALL` order) starts, or at end of text. Missing groups are skipped.
pub fn split_sections(text: &str) -> Vec<Section<'_>> {
    let starts: Vec<(AgeGroup, Option<usize>)> = AgeGroup::ALL
        .iter()
        .map(|group| (*group, text.find(&group.marker())))
        .collect();

    let mut sections = Vec::new();
    for (i, (group, start)) in starts.iter().enumerate() {
        let Some(start) = *start else {
            tracing::debug!("No section found for {}", group);
            continue;
        };

        let end = starts[i + 1..]
            .iter()
            .find_map(|(_, next_start)| *next_start)
            .unwrap_or(text.len());

        // A later group printed before this one leaves nothing to slice
        let end = end.max(start);

        sections.push(Section {
            age_group: *group,
            text: &text[start..end],
        });
    }

    sections
}

// --- Field Extraction ---

/// Pulls the weight-class row and the totals row out of one section.
///
/// Returns empty lists when either row is missing or when the rows differ in length.
pub fn extract_section_data(section_text: &str) -> SectionFields {
    let (Some(weight_caps), Some(total_caps)) = (
        WEIGHT_CLASS_RE.captures(section_text),
        TOTAL_RE.captures(section_text),
    ) else {
        tracing::debug!("Weight class or total row not found in section");
        return SectionFields::default();
    };

    let weight_classes: Vec<String> = weight_caps[1]
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let totals: Vec<String> = total_caps[1]
        .split_whitespace()
        .map(strip_kg_suffix)
        .map(str::to_string)
        .collect();

    if weight_classes.len() != totals.len() {
        tracing::warn!(
            "Mismatch: {} weight classes and {} totals, dropping section",
            weight_classes.len(),
            totals.len()
        );
        return SectionFields::default();
    }

    SectionFields { weight_classes, totals }
}

fn strip_kg_suffix(token: &str) -> &str {
    // `(?i)kg` also matches the Kelvin sign, so the last two bytes may split a char
    match token.len().checked_sub(2).and_then(|i| token.get(i..).map(|tail| (i, tail))) {
        Some((i, tail)) if tail.eq_ignore_ascii_case("kg") => &token[..i],
        _ => token,
    }
}

// --- Main Extractor ---

/// Turns the normalized text of one standards document into records.
pub struct StandardsExtractor;

impl StandardsExtractor {
    pub fn new() -> Self { Self {} }

    pub fn extract_records(&self, text: &str) -> Vec<StandardRecord> {
        let sections = split_sections(text);
        if sections.is_empty() {
            tracing::warn!("No age group sections found in document text ({} chars)", text.len());
        }

        let mut records = Vec::new();
        for section in sections {
            tracing::debug!(
                "Processing section for {}: {}",
                section.age_group,
                section.text.chars().take(200).collect::<String>()
            );

            let fields = extract_section_data(section.text);
            tracing::info!(
                "{}: found {} weight classes and {} totals",
                section.age_group,
                fields.weight_classes.len(),
                fields.totals.len()
            );

            if fields.is_empty() {
                continue;
            }

            records.extend(
                fields
                    .weight_classes
                    .into_iter()
                    .zip(fields.totals)
                    .map(|(weight_class, total)| StandardRecord::new(section.age_group, weight_class, total)),
            );
        }

        records
    }

    /// Patterns highlighted in annotated debug dumps
    pub fn debug_patterns(&self) -> Vec<(String, &'static str)> {
        let mut patterns: Vec<(String, &'static str)> = AgeGroup::ALL
            .iter()
            .map(|group| (regex::escape(&group.marker()), "label"))
            .collect();
        patterns.push((WEIGHT_CLASS_RE.as_str().to_string(), "class"));
        patterns.push((TOTAL_RE.as_str().to_string(), "total"));
        patterns
    }
}

impl Default for StandardsExtractor {
    fn default() -> Self {
        Self::new()
    }
}
