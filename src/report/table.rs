use crate::lookup::QueryResult;
use itertools::Itertools;
use serde_json::Value;

/// Tabular view of a query result: one row per matched record, columns taken
/// from the first matched record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn from_result(result: &QueryResult) -> Self {
        let columns: Vec<String> = result
            .matched_records
            .first()
            .map(|record| record.columns().to_vec())
            .unwrap_or_default();

        let rows = result
            .matched_records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| {
                        record
                            .field(column)
                            .map(|value| format_value(&value))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Renders the table with space-padded columns for a terminal.
    pub fn to_text(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let format_line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format_line(self.columns.as_slice()));
        lines.push(widths.iter().map(|w| "-".repeat(*w)).join("  "));
        for row in &self.rows {
            lines.push(format_line(row.as_slice()));
        }
        lines.join("\n")
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<table class='gene-table'><tr>");
        for column in &self.columns {
            html.push_str(&format!("<th>{}</th>", escape_html(column)));
        }
        html.push_str("</tr>");
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");
        html
    }
}

/// Formats a field for display. Non-integral numbers get four decimals;
/// integral numbers, including `2.0`, print without a fraction.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 => format!("{:.0}", f),
                    Some(f) => format!("{:.4}", f),
                    None => n.to_string(),
                }
            }
        }
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::resolve_query;
    use crate::store::{read_dataset, DataStore};
    use serde_json::json;
    use std::io::Cursor;

    fn result_for(json: &str, query: &str) -> QueryResult {
        let store = DataStore::with_dataset(read_dataset(Cursor::new(json)).unwrap());
        resolve_query(query, &store).unwrap()
    }

    #[test]
    fn format_numbers() {
        assert_eq!(format_value(&json!(0.3)), "0.3000");
        assert_eq!(format_value(&json!(0.123456)), "0.1235");
        assert_eq!(format_value(&json!(94844947)), "94844947");
        assert_eq!(format_value(&json!(-3)), "-3");
        assert_eq!(format_value(&json!(2.0)), "2");
        assert_eq!(format_value(&json!(1e16)), "10000000000000000");
        assert_eq!(format_value(&json!(-4.0)), "-4");
    }

    #[test]
    fn format_other_values() {
        assert_eq!(format_value(&json!("rs1")), "rs1");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&Value::Null), "null");
        assert_eq!(format_value(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn columns_follow_first_record() {
        let result = result_for(
            r#"[
                {"Gene Name": "ABC", "SNP ID": "rs1", "P-value": 0.00012, "Effect Size (Beta)": 0.3},
                {"Gene Name": "ABC", "SNP ID": "rs2", "Risk Allele": "T"}
            ]"#,
            "ABC",
        );
        let table = ResultTable::from_result(&result);
        assert_eq!(
            table.columns,
            ["Gene Name", "SNP ID", "P-value", "Effect Size (Beta)"]
        );
        assert_eq!(table.rows[0], ["ABC", "rs1", "0.0001", "0.3000"]);
        assert_eq!(table.rows[1], ["ABC", "rs2", "", "0.2000"]);
    }

    #[test]
    fn text_table_is_aligned() {
        let result = result_for(
            r#"[{"Gene Name": "ABC", "SNP ID": "rs1", "Effect Size (Beta)": 0.3},
                {"Gene Name": "ABC", "SNP ID": "rs22"}]"#,
            "abc",
        );
        let text = ResultTable::from_result(&result).to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Gene Name  SNP ID  Effect Size (Beta)");
        assert_eq!(lines[1], "---------  ------  ------------------");
        assert_eq!(lines[2], "ABC        rs1     0.3000");
        assert_eq!(lines[3], "ABC        rs22    0.2000");
    }

    #[test]
    fn html_table_escapes_cells() {
        let table = ResultTable {
            columns: vec!["Gene Name".to_string(), "Note".to_string()],
            rows: vec![vec!["ABC".to_string(), "<b>&'".to_string()]],
        };
        assert_eq!(
            table.to_html(),
            "<table class='gene-table'><tr><th>Gene Name</th><th>Note</th></tr>\
             <tr><td>ABC</td><td>&lt;b&gt;&amp;&#39;</td></tr></table>"
        );
    }
}
