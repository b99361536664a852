// src/standards/mod.rs
//! Merging of the A and B standards tables into one sorted table keyed by
//! age bracket and gendered weight class.

pub mod format;

use crate::extractors::section::{AgeGroup, StandardRecord};
use crate::utils::error::MergeError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Ordering;
use std::fmt;

pub use format::{format_table, OutputFormat};

/// Age bracket shared by the women's and men's groups of the same age.
/// Variant order is the table's bracket order; `StandardsTable` indexes by discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBracket {
    Youth,
    Junior,
    Senior,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 3] = [AgeBracket::Youth, AgeBracket::Junior, AgeBracket::Senior];

    pub fn name(&self) -> &'static str {
        match self {
            AgeBracket::Youth => "Youth",
            AgeBracket::Junior => "Junior",
            AgeBracket::Senior => "Senior",
        }
    }
}

impl From<AgeGroup> for AgeBracket {
    fn from(group: AgeGroup) -> Self {
        match group {
            AgeGroup::YouthWomen | AgeGroup::YouthMen => AgeBracket::Youth,
            AgeGroup::JuniorWomen | AgeGroup::JuniorMen => AgeBracket::Junior,
            AgeGroup::SeniorWomen | AgeGroup::SeniorMen => AgeBracket::Senior,
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Qualifying totals for one weight class; 0 means "not published"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct QualifyingStandards {
    pub a: i64,
    pub b: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardsEntry {
    pub weight_class: String, // e.g. "Female 55kg"
    pub standards: QualifyingStandards,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketStandards {
    pub bracket: AgeBracket,
    pub entries: Vec<StandardsEntry>,
}

impl BracketStandards {
    fn new(bracket: AgeBracket) -> Self {
        Self { bracket, entries: Vec::new() }
    }

    fn entry_mut(&mut self, weight_class: &str) -> Option<&mut StandardsEntry> {
        self.entries.iter_mut().find(|e| e.weight_class == weight_class)
    }
}

/// The merged table. Every bracket is present, in `AgeBracket::ALL` order,
/// and each bracket's entries are sorted by gender then weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardsTable {
    pub brackets: Vec<BracketStandards>,
}

impl StandardsTable {
    fn empty() -> Self {
        Self {
            brackets: AgeBracket::ALL.iter().map(|b| BracketStandards::new(*b)).collect(),
        }
    }

    fn bracket_mut(&mut self, bracket: AgeBracket) -> &mut BracketStandards {
        &mut self.brackets[bracket as usize]
    }

    pub fn bracket(&self, bracket: AgeBracket) -> Option<&BracketStandards> {
        self.brackets.iter().find(|b| b.bracket == bracket)
    }

    /// Looks up one leaf, e.g. `table.get(AgeBracket::Senior, "Male 60kg")`
    #[cfg(test)]
    pub fn get(&self, bracket: AgeBracket, weight_class: &str) -> Option<QualifyingStandards> {
        self.bracket(bracket)?
            .entries
            .iter()
            .find(|e| e.weight_class == weight_class)
            .map(|e| e.standards)
    }

    pub fn entry_count(&self) -> usize {
        self.brackets.iter().map(|b| b.entries.len()).sum()
    }
}

/// "Female 55kg" for a women's group record with class "55kg"
fn gendered_weight_class(record: &StandardRecord) -> String {
    format!("{} {}", record.age_group.gender(), record.weight_class)
}

/// Integer part of the record's total, e.g. "120.7" -> 120
fn parse_standard(record: &StandardRecord) -> Result<i64, MergeError> {
    let invalid = || MergeError::InvalidStandard {
        age_group: record.age_group.to_string(),
        weight_class: record.weight_class.clone(),
        value: record.weight_standard.clone(),
    };

    let value: f64 = record.weight_standard.trim().parse().map_err(|_| invalid())?;
    let value = value.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(invalid());
    }
    Ok(value as i64)
}

/// Sort key for a gendered weight class: gender, then weight with open ("+") classes last.
pub fn weight_class_sort_key(weight_class: &str) -> Result<(&str, f64), MergeError> {
    let (gender, weight) = weight_class
        .split_once(' ')
        .ok_or_else(|| MergeError::InvalidWeightClass(weight_class.to_string()))?;

    if weight.starts_with('+') {
        return Ok((gender, f64::INFINITY));
    }

    let kg: f64 = weight
        .replace("kg", "")
        .parse()
        .map_err(|_| MergeError::InvalidWeightClass(weight_class.to_string()))?;
    Ok((gender, kg))
}

/// Stable sort of one bracket's entries by `weight_class_sort_key`.
fn sort_entries(entries: &mut Vec<StandardsEntry>) -> Result<(), MergeError> {
    let mut keyed = Vec::with_capacity(entries.len());
    for entry in entries.drain(..) {
        let key = weight_class_sort_key(&entry.weight_class)
            .map(|(gender, weight)| (gender.to_string(), weight))?;
        keyed.push((key, entry));
    }

    keyed.sort_by(|(a, _), (b, _)| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
    });

    entries.extend(keyed.into_iter().map(|(_, entry)| entry));
    Ok(())
}

/// Merges the A and B tables.
///
/// A records are applied first; a repeated A key keeps its first value. B records
/// then fill in `b`, creating `a = 0` entries for classes only B lists.
pub fn merge_standards(a_records: &[StandardRecord], b_records: &[StandardRecord]) -> Result<StandardsTable, MergeError> {
    let mut table = StandardsTable::empty();

    for record in a_records {
        let standard_a = parse_standard(record)?;
        let weight_class = gendered_weight_class(record);
        let bracket = table.bracket_mut(record.age_group.into());

        if bracket.entry_mut(&weight_class).is_none() {
            bracket.entries.push(StandardsEntry {
                weight_class,
                standards: QualifyingStandards { a: standard_a, b: 0 },
            });
        }
    }

    for record in b_records {
        let standard_b = parse_standard(record)?;
        let weight_class = gendered_weight_class(record);
        let bracket = table.bracket_mut(record.age_group.into());

        match bracket.entry_mut(&weight_class) {
            Some(entry) => entry.standards.b = standard_b,
            None => bracket.entries.push(StandardsEntry {
                weight_class,
                standards: QualifyingStandards { a: 0, b: standard_b },
            }),
        }
    }

    for bracket in &mut table.brackets {
        sort_entries(&mut bracket.entries)?;
        tracing::debug!("{}: {} merged weight classes", bracket.bracket, bracket.entries.len());
    }

    Ok(table)
}

// --- Serialization ---
// Emits {"standards": {"Youth": {"Female 40kg": {"qualifyingStandards": {"a": .., "b": ..}}}}}
// keeping bracket and entry order.

#[derive(serde::Serialize)]
struct Leaf<'a> {
    #[serde(rename = "qualifyingStandards")]
    qualifying_standards: &'a QualifyingStandards,
}

struct BracketsView<'a>(&'a [BracketStandards]);
struct EntriesView<'a>(&'a [StandardsEntry]);

impl Serialize for EntriesView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.weight_class, &Leaf { qualifying_standards: &entry.standards })?;
        }
        map.end()
    }
}

impl Serialize for BracketsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for bracket in self.0 {
            map.serialize_entry(bracket.bracket.name(), &EntriesView(&bracket.entries))?;
        }
        map.end()
    }
}

impl Serialize for StandardsTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("standards", &BracketsView(&self.brackets))?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{normalize_text, StandardsExtractor};

    fn record(group: AgeGroup, class: &str, total: &str) -> StandardRecord {
        StandardRecord::new(group, class, total)
    }

    fn classes(table: &StandardsTable, bracket: AgeBracket) -> Vec<String> {
        table
            .bracket(bracket)
            .unwrap()
            .entries
            .iter()
            .map(|e| e.weight_class.clone())
            .collect()
    }

    #[test]
    fn test_bracket_matches_first_word_of_group() {
        for group in AgeGroup::ALL {
            assert_eq!(AgeBracket::from(group).name(), group.bracket());
        }
    }

    #[test]
    fn test_sort_open_classes_last() {
        let mut entries: Vec<StandardsEntry> = ["Female 55kg", "Female +65kg", "Female 50kg"]
            .iter()
            .map(|c| StandardsEntry { weight_class: c.to_string(), standards: QualifyingStandards::default() })
            .collect();
        sort_entries(&mut entries).unwrap();

        let sorted: Vec<&str> = entries.iter().map(|e| e.weight_class.as_str()).collect();
        assert_eq!(sorted, vec!["Female 50kg", "Female 55kg", "Female +65kg"]);
    }

    #[test]
    fn test_sort_groups_by_gender_then_weight() {
        let a = vec![
            record(AgeGroup::SeniorMen, "+109kg", "400"),
            record(AgeGroup::SeniorMen, "61kg", "250"),
            record(AgeGroup::SeniorWomen, "87kg", "220"),
            record(AgeGroup::SeniorWomen, "49kg", "160"),
            record(AgeGroup::SeniorMen, "102kg", "350"),
            record(AgeGroup::SeniorMen, "9kg", "1"),
        ];
        let table = merge_standards(&a, &[]).unwrap();

        assert_eq!(
            classes(&table, AgeBracket::Senior),
            vec!["Female 49kg", "Female 87kg", "Male 9kg", "Male 61kg", "Male 102kg", "Male +109kg"]
        );
    }

    #[test]
    fn test_merge_pairs_a_and_b() {
        let a = vec![record(AgeGroup::SeniorMen, "60kg", "120")];
        let b = vec![record(AgeGroup::SeniorMen, "60kg", "110")];
        let table = merge_standards(&a, &b).unwrap();

        assert_eq!(table.get(AgeBracket::Senior, "Male 60kg"), Some(QualifyingStandards { a: 120, b: 110 }));
        assert_eq!(table.entry_count(), 1);
    }

    #[test]
    fn test_merge_one_sided_entries_default_to_zero() {
        let a = vec![record(AgeGroup::JuniorWomen, "55kg", "150")];
        let b = vec![record(AgeGroup::YouthMen, "+81kg", "180")];
        let table = merge_standards(&a, &b).unwrap();

        assert_eq!(table.get(AgeBracket::Junior, "Female 55kg"), Some(QualifyingStandards { a: 150, b: 0 }));
        assert_eq!(table.get(AgeBracket::Youth, "Male +81kg"), Some(QualifyingStandards { a: 0, b: 180 }));
        assert!(table.bracket(AgeBracket::Senior).unwrap().entries.is_empty());
    }

    #[test]
    fn test_merge_duplicate_keys() {
        let a = vec![
            record(AgeGroup::SeniorMen, "60kg", "120"),
            record(AgeGroup::SeniorMen, "60kg", "125"),
        ];
        let b = vec![
            record(AgeGroup::SeniorMen, "60kg", "100"),
            record(AgeGroup::SeniorMen, "60kg", "105"),
        ];
        let table = merge_standards(&a, &b).unwrap();

        // First A value kept, last B value wins
        assert_eq!(table.get(AgeBracket::Senior, "Male 60kg"), Some(QualifyingStandards { a: 120, b: 105 }));
    }

    #[test]
    fn test_merge_truncates_decimal_standards() {
        let a = vec![record(AgeGroup::YouthWomen, "40kg", "99.9")];
        let table = merge_standards(&a, &[]).unwrap();
        assert_eq!(table.get(AgeBracket::Youth, "Female 40kg"), Some(QualifyingStandards { a: 99, b: 0 }));
    }

    #[test]
    fn test_merge_rejects_malformed_standard() {
        let a = vec![record(AgeGroup::SeniorMen, "60kg", "12O")];
        let err = merge_standards(&a, &[]).unwrap_err();
        assert!(matches!(err, MergeError::InvalidStandard { ref value, .. } if value == "12O"));
    }

    #[test]
    fn test_merge_rejects_out_of_range_standard() {
        let a = vec![record(AgeGroup::SeniorMen, "60kg", "99999999999999999999")];
        let err = merge_standards(&a, &[]).unwrap_err();
        assert!(matches!(err, MergeError::InvalidStandard { ref value, .. } if value == "99999999999999999999"));

        let b = vec![record(AgeGroup::SeniorMen, "60kg", "\u{0967}")];
        assert!(matches!(merge_standards(&[], &b), Err(MergeError::InvalidStandard { .. })));
    }

    #[test]
    fn test_brackets_index_matches_order() {
        let mut table = StandardsTable::empty();
        for bracket in AgeBracket::ALL {
            assert_eq!(table.bracket_mut(bracket).bracket, bracket);
        }
    }

    #[test]
    fn test_sort_key_rejects_malformed_class() {
        assert!(matches!(weight_class_sort_key("Female"), Err(MergeError::InvalidWeightClass(_))));
        assert!(matches!(weight_class_sort_key("Female heavy"), Err(MergeError::InvalidWeightClass(_))));
        assert_eq!(weight_class_sort_key("Male +109kg").unwrap(), ("Male", f64::INFINITY));
        assert_eq!(weight_class_sort_key("Male 55.5kg").unwrap(), ("Male", 55.5));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let raw_a = "2024 A Standards\nYouth Women:\tWeight class 40kg 45kg +81kg\nTotal 100 110 160\n\
                     Senior Men: Weight class 61kg 67kg\u{a0}Total: 250kg 270kg";
        let raw_b = "Youth Women: Class 45kg 40kg Total 95 90 Junior Men: Class 55kg Total 170";

        let run = || {
            let extractor = StandardsExtractor::new();
            let a = extractor.extract_records(&normalize_text(raw_a));
            let b = extractor.extract_records(&normalize_text(raw_b));
            let table = merge_standards(&a, &b).unwrap();
            format_table(&table, OutputFormat::Typescript).unwrap()
        };

        let first = run();
        assert_eq!(first, run());
        assert!(first.contains("\"Female 40kg\": { qualifyingStandards: { a: 100, b: 90 } },"));
        assert!(first.contains("\"Female +81kg\": { qualifyingStandards: { a: 160, b: 0 } },"));
        assert!(first.contains("\"Male 55kg\": { qualifyingStandards: { a: 0, b: 170 } },"));
        assert!(first.contains("\"Male 67kg\": { qualifyingStandards: { a: 270, b: 0 } },"));
    }
}
