// src/standards/format.rs
use super::StandardsTable;
use crate::utils::error::StorageError;

/// Source format of the emitted table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `export const standards = { ... };`
    #[default]
    Typescript,
    /// Pretty-printed JSON with the same nesting
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Typescript => "ts",
            OutputFormat::Json => "json",
        }
    }
}

/// Renders the table as a TypeScript module exporting `standards`.
pub fn format_as_typescript(table: &StandardsTable) -> String {
    let mut out = String::from("export const standards = {\n");

    for bracket in &table.brackets {
        out.push_str(&format!("    {}: {{\n", bracket.bracket.name()));
        for entry in &bracket.entries {
            out.push_str(&format!(
                "        \"{}\": {{ qualifyingStandards: {{ a: {}, b: {} }} }},\n",
                entry.weight_class, entry.standards.a, entry.standards.b
            ));
        }
        out.push_str("    },\n");
    }

    out.push_str("};\n");
    out
}

pub fn format_as_json(table: &StandardsTable) -> Result<String, StorageError> {
    let mut json = serde_json::to_string_pretty(table)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

pub fn format_table(table: &StandardsTable, format: OutputFormat) -> Result<String, StorageError> {
    match format {
        OutputFormat::Typescript => Ok(format_as_typescript(table)),
        OutputFormat::Json => format_as_json(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::section::{AgeGroup, StandardRecord};
    use crate::standards::merge_standards;

    fn sample_table() -> StandardsTable {
        let a = vec![
            StandardRecord::new(AgeGroup::YouthWomen, "45kg", "110"),
            StandardRecord::new(AgeGroup::YouthWomen, "40kg", "100"),
            StandardRecord::new(AgeGroup::SeniorMen, "+109kg", "400"),
        ];
        let b = vec![StandardRecord::new(AgeGroup::YouthWomen, "40kg", "90")];
        merge_standards(&a, &b).unwrap()
    }

    #[test]
    fn test_typescript_layout() {
        let expected = "export const standards = {\n\
                        \x20   Youth: {\n\
                        \x20       \"Female 40kg\": { qualifyingStandards: { a: 100, b: 90 } },\n\
                        \x20       \"Female 45kg\": { qualifyingStandards: { a: 110, b: 0 } },\n\
                        \x20   },\n\
                        \x20   Junior: {\n\
                        \x20   },\n\
                        \x20   Senior: {\n\
                        \x20       \"Male +109kg\": { qualifyingStandards: { a: 400, b: 0 } },\n\
                        \x20   },\n\
                        };\n";
        assert_eq!(format_as_typescript(&sample_table()), expected);
    }

    #[test]
    fn test_json_preserves_order() {
        let json = format_table(&sample_table(), OutputFormat::Json).unwrap();

        let youth = json.find("\"Youth\"").unwrap();
        let junior = json.find("\"Junior\"").unwrap();
        let senior = json.find("\"Senior\"").unwrap();
        assert!(youth < junior && junior < senior);
        assert!(json.find("\"Female 40kg\"").unwrap() < json.find("\"Female 45kg\"").unwrap());

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["standards"]["Youth"]["Female 40kg"]["qualifyingStandards"]["a"], 100);
        assert_eq!(value["standards"]["Youth"]["Female 40kg"]["qualifyingStandards"]["b"], 90);
        assert_eq!(value["standards"]["Junior"], serde_json::json!({}));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_empty_table_still_lists_every_bracket() {
        let table = merge_standards(&[], &[]).unwrap();
        assert_eq!(
            format_as_typescript(&table),
            "export const standards = {\n    Youth: {\n    },\n    Junior: {\n    },\n    Senior: {\n    },\n};\n"
        );
    }
}
