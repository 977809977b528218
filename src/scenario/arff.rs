//! Minimal ARFF reader for the files of an ASlib scenario.
//!
//! Format:
//! ```text
//! % comment
//! @RELATION name
//! @ATTRIBUTE instance_id STRING
//! @ATTRIBUTE repetition NUMERIC
//! @ATTRIBUTE runstatus {ok, timeout, memout}
//! @DATA
//! inst1,1,ok
//! 'inst 2',1,?
//! ```
//!
//! - Keywords are case-insensitive
//! - Names and values may be quoted with `'` or `"`
//! - `?` marks a missing value
//! - Sparse (`{...}`) data rows are not supported

/// Declared type of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    /// NUMERIC, REAL or INTEGER
    Numeric,
    /// STRING
    String,
    /// `{a, b, c}`
    Nominal(Vec<String>),
    /// DATE or anything else we pass through as text
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

/// A single data cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Parsed ARFF file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arff {
    pub relation: String,
    pub attributes: Vec<Attribute>,
    pub rows: Vec<Vec<Value>>,
}

impl Arff {
    /// Index of the attribute called `name` (exact match first, then
    /// case-insensitive).
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|a| a.name == name)
            .or_else(|| {
                self.attributes
                    .iter()
                    .position(|a| a.name.eq_ignore_ascii_case(name))
            })
    }
}

/// Parse ARFF text. Errors carry the 1-based line number.
pub fn parse_arff(text: &str) -> Result<Arff, String> {
    let mut arff = Arff::default();
    let mut in_data = false;

    for (line_num, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let at = |msg: String| format!("line {}: {msg}", line_num + 1);

        if in_data {
            let row = parse_data_row(line, &arff.attributes).map_err(at)?;
            arff.rows.push(row);
            continue;
        }

        let lower = line.to_ascii_lowercase();
        if lower.starts_with("@relation") {
            let (name, _) = split_token(line[9..].trim()).map_err(at)?;
            arff.relation = name;
        } else if lower.starts_with("@attribute") {
            arff.attributes
                .push(parse_attribute(line[10..].trim()).map_err(at)?);
        } else if lower.starts_with("@data") {
            if arff.attributes.is_empty() {
                return Err(at("@DATA before any @ATTRIBUTE".to_string()));
            }
            in_data = true;
        } else {
            return Err(at(format!(
                "unexpected header line: {}",
                line.split_whitespace().next().unwrap_or(line)
            )));
        }
    }

    if !in_data {
        return Err("missing @DATA section".to_string());
    }
    Ok(arff)
}

/// Parse `name type` after the @ATTRIBUTE keyword.
fn parse_attribute(rest: &str) -> Result<Attribute, String> {
    if rest.is_empty() {
        return Err("@ATTRIBUTE requires a name and a type".to_string());
    }
    let (name, remainder) = split_token(rest)?;
    let type_spec = remainder.trim();
    if type_spec.is_empty() {
        return Err(format!("attribute '{name}' has no type"));
    }

    let kind = if let Some(inner) = type_spec.strip_prefix('{') {
        let inner = inner
            .strip_suffix('}')
            .ok_or_else(|| format!("unclosed nominal type for '{name}'"))?;
        let labels = split_fields(inner)?
            .into_iter()
            .map(|(s, _)| s)
            .collect();
        AttributeKind::Nominal(labels)
    } else {
        let keyword = type_spec
            .split_whitespace()
            .next()
            .unwrap_or(type_spec)
            .to_ascii_lowercase();
        match keyword.as_str() {
            "numeric" | "real" | "integer" => AttributeKind::Numeric,
            "string" => AttributeKind::String,
            _ => AttributeKind::Other(type_spec.to_string()),
        }
    };

    Ok(Attribute { name, kind })
}

/// Take one possibly quoted token off the front of `s`.
fn split_token(s: &str) -> Result<(String, &str), String> {
    let s = s.trim_start();
    match s.chars().next() {
        Some(q @ ('\'' | '"')) => {
            let after = &s[1..];
            match after.find(q) {
                Some(end) => Ok((after[..end].to_string(), &after[end + 1..])),
                None => Err(format!("unclosed quote {q}")),
            }
        }
        Some(_) => {
            let end = s.find(char::is_whitespace).unwrap_or(s.len());
            Ok((s[..end].to_string(), &s[end..]))
        }
        None => Err("expected a name".to_string()),
    }
}

/// Split a comma separated line, honouring quotes. The flag tells whether
/// the field was quoted.
fn split_fields(line: &str) -> Result<Vec<(String, bool)>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut quoted = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                } else {
                    return Err(format!("dangling escape inside {q} quote"));
                }
            }
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            // A quote only opens at the start of a field.
            None if (c == '\'' || c == '"') && !quoted && current.trim().is_empty() => {
                current.clear();
                quote = Some(c);
                quoted = true;
            }
            None if c == ',' => {
                fields.push((finish_field(&current, quoted), quoted));
                current.clear();
                quoted = false;
            }
            // Padding after a closing quote.
            None if quoted && c.is_whitespace() => {}
            None => current.push(c),
        }
    }
    if let Some(q) = quote {
        return Err(format!("unclosed quote {q}"));
    }
    fields.push((finish_field(&current, quoted), quoted));
    Ok(fields)
}

fn finish_field(raw: &str, quoted: bool) -> String {
    if quoted {
        raw.to_string()
    } else {
        raw.trim().to_string()
    }
}

fn parse_data_row(line: &str, attributes: &[Attribute]) -> Result<Vec<Value>, String> {
    if line.starts_with('{') {
        return Err("sparse ARFF rows are not supported".to_string());
    }
    let fields = split_fields(line)?;
    if fields.len() != attributes.len() {
        return Err(format!(
            "expected {} values, found {}",
            attributes.len(),
            fields.len()
        ));
    }

    fields
        .into_iter()
        .zip(attributes)
        .map(|((raw, quoted), attr)| {
            if !quoted && raw == "?" {
                return Ok(Value::Missing);
            }
            match attr.kind {
                AttributeKind::Numeric => raw.parse::<f64>().map(Value::Number).map_err(|_| {
                    format!("invalid number '{raw}' for attribute '{}'", attr.name)
                }),
                _ => Ok(Value::Text(raw)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUNS: &str = "\
% algorithm runs
@RELATION ALGORITHM_RUNS_toy

@ATTRIBUTE instance_id STRING
@ATTRIBUTE repetition NUMERIC
@attribute 'algorithm' STRING
@ATTRIBUTE runtime NUMERIC
@ATTRIBUTE runstatus {ok , timeout , memout, not_applicable , crash , other}

@DATA
inst1,1,minisat,1.5,ok
'inst 2',1,\"glu,cose\",?,timeout
";

    #[test]
    fn test_parse_header() {
        let arff = parse_arff(RUNS).unwrap();
        assert_eq!(arff.relation, "ALGORITHM_RUNS_toy");
        assert_eq!(arff.attributes.len(), 5);
        assert_eq!(arff.attributes[2].name, "algorithm");
        assert_eq!(arff.attributes[3].kind, AttributeKind::Numeric);
        match &arff.attributes[4].kind {
            AttributeKind::Nominal(labels) => {
                assert_eq!(labels[0], "ok");
                assert_eq!(labels.len(), 6);
            }
            other => panic!("Expected Nominal, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rows() {
        let arff = parse_arff(RUNS).unwrap();
        assert_eq!(arff.rows.len(), 2);
        assert_eq!(arff.rows[0][0], Value::Text("inst1".to_string()));
        assert_eq!(arff.rows[0][3], Value::Number(1.5));
        assert_eq!(arff.rows[1][0], Value::Text("inst 2".to_string()));
        assert_eq!(arff.rows[1][2], Value::Text("glu,cose".to_string()));
        assert_eq!(arff.rows[1][3], Value::Missing);
        assert_eq!(arff.rows[1][4].as_text(), Some("timeout"));
    }

    #[test]
    fn test_attribute_index_case_insensitive() {
        let arff = parse_arff(RUNS).unwrap();
        assert_eq!(arff.attribute_index("runtime"), Some(3));
        assert_eq!(arff.attribute_index("RUNSTATUS"), Some(4));
        assert_eq!(arff.attribute_index("cost"), None);
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let text = "@RELATION r\n@ATTRIBUTE a NUMERIC\n@DATA\n1,2\n";
        let err = parse_arff(text).unwrap_err();
        assert!(err.starts_with("line 4:"), "{err}");
    }

    #[test]
    fn test_invalid_number() {
        let text = "@RELATION r\n@ATTRIBUTE a NUMERIC\n@DATA\nabc\n";
        assert!(parse_arff(text).unwrap_err().contains("invalid number"));
    }

    #[test]
    fn test_missing_data_section() {
        let text = "@RELATION r\n@ATTRIBUTE a NUMERIC\n";
        assert!(parse_arff(text).is_err());
    }

    #[test]
    fn test_quote_inside_unquoted_value() {
        let text = "@RELATION r\n@ATTRIBUTE id STRING\n@ATTRIBUTE rep NUMERIC\n@ATTRIBUTE x NUMERIC\n@DATA\nit's_1,1,5\nsay\"hi\",2,6\n";
        let arff = parse_arff(text).unwrap();
        assert_eq!(arff.rows[0][0], Value::Text("it's_1".to_string()));
        assert_eq!(arff.rows[0][2], Value::Number(5.0));
        assert_eq!(arff.rows[1][0], Value::Text("say\"hi\"".to_string()));
    }

    #[test]
    fn test_sparse_rows_rejected() {
        let text = "@RELATION r\n@ATTRIBUTE a NUMERIC\n@DATA\n{0 1}\n";
        assert!(parse_arff(text).unwrap_err().contains("sparse"));
    }
}
