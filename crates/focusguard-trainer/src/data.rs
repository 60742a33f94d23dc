//! Data loading for labeled application-usage records.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

/// Columns the dataset must provide.
pub const APP_NAME_COLUMN: &str = "app_name";
pub const WINDOW_TITLE_COLUMN: &str = "window_title";
pub const CATEGORY_COLUMN: &str = "category";

/// A single labeled activity sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub app_name: String,
    pub window_title: String,
    pub category: String,
}

impl Record {
    pub fn new(
        app_name: impl Into<String>,
        window_title: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            window_title: window_title.into(),
            category: category.into(),
        }
    }

    /// Classifier input for this record.
    pub fn text(&self) -> String {
        focusguard_core::activity_text(&self.app_name, &self.window_title)
    }
}

/// Load records from a CSV file with a header row.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Record>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    parse_dataset(&content).with_context(|| format!("Malformed dataset {}", path.display()))
}

/// Parse CSV text. Columns are located by header name; extra columns are ignored.
pub fn parse_dataset(content: &str) -> anyhow::Result<Vec<Record>> {
    let mut rows = parse_csv(content)?.into_iter();

    let Some((_, header)) = rows.next() else {
        bail!("dataset is empty");
    };
    let column = |name: &str| -> anyhow::Result<usize> {
        header
            .iter()
            .position(|h| h.trim() == name)
            .with_context(|| format!("missing column `{name}`"))
    };
    let app_idx = column(APP_NAME_COLUMN)?;
    let title_idx = column(WINDOW_TITLE_COLUMN)?;
    let category_idx = column(CATEGORY_COLUMN)?;

    let mut records = Vec::new();
    for (line, fields) in rows {
        // Skip blank lines
        if fields.len() == 1 && fields[0].is_empty() {
            continue;
        }
        if fields.len() != header.len() {
            bail!(
                "line {}: expected {} fields, found {}",
                line,
                header.len(),
                fields.len()
            );
        }

        records.push(Record::new(
            fields[app_idx].as_str(),
            fields[title_idx].as_str(),
            fields[category_idx].as_str(),
        ));
    }

    Ok(records)
}

/// Split CSV text into records of fields, each tagged with its starting line.
///
/// Supports quoted fields containing commas, doubled quotes and newlines.
fn parse_csv(content: &str) -> anyhow::Result<Vec<(usize, Vec<String>)>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_start = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                rows.push((row_start, std::mem::take(&mut fields)));
                line += 1;
                row_start = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        bail!("line {}: unterminated quoted field", row_start);
    }

    // Don't forget the last row
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push((row_start, fields));
    }

    Ok(rows)
}

/// Shuffle with a seeded RNG and split off `ceil(test_fraction * n)` test records.
///
/// Returns `(train, test)`.
pub fn train_test_split(
    records: &[Record],
    test_fraction: f64,
    seed: u64,
) -> anyhow::Result<(Vec<Record>, Vec<Record>)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        bail!("test fraction must be in (0, 1), got {test_fraction}");
    }

    let n = records.len();
    let n_test = (test_fraction * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        bail!("cannot split {n} records with test fraction {test_fraction}");
    }

    let mut rng = oorandom::Rand64::new(seed as u128);
    let mut indices: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.rand_range(0..(i as u64 + 1)) as usize;
        indices.swap(i, j);
    }

    let test = indices[..n_test].iter().map(|&i| records[i].clone()).collect();
    let train = indices[n_test..].iter().map(|&i| records[i].clone()).collect();
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dataset_basic() {
        let csv = "app_name,window_title,category\n\
                   chrome,YouTube,distracting\n\
                   code,main.rs,productive\n";
        let records = parse_dataset(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Record::new("chrome", "YouTube", "distracting"));
        assert_eq!(records[1].text(), "code main.rs");
    }

    #[test]
    fn test_parse_dataset_column_order_and_extras() {
        let csv = "timestamp,category,window_title,app_name\r\n\
                   2024-01-01,productive,Inbox,Outlook\r\n";
        let records = parse_dataset(csv).unwrap();
        assert_eq!(records, vec![Record::new("Outlook", "Inbox", "productive")]);
    }

    #[test]
    fn test_parse_dataset_quoted_fields() {
        let csv = "app_name,window_title,category\n\
                   Chrome,\"Cats, dogs and \"\"more\"\"\",distracting\n\
                   Notes,\"line one\nline two\",productive\n";
        let records = parse_dataset(csv).unwrap();
        assert_eq!(records[0].window_title, "Cats, dogs and \"more\"");
        assert_eq!(records[1].window_title, "line one\nline two");
    }

    #[test]
    fn test_parse_dataset_without_trailing_newline() {
        let csv = "app_name,window_title,category\nchrome,,distracting";
        let records = parse_dataset(csv).unwrap();
        assert_eq!(records, vec![Record::new("chrome", "", "distracting")]);
    }

    #[test]
    fn test_parse_dataset_missing_column() {
        let err = parse_dataset("app_name,category\nchrome,distracting\n").unwrap_err();
        assert!(err.to_string().contains("window_title"));
    }

    #[test]
    fn test_parse_dataset_ragged_row() {
        let csv = "app_name,window_title,category\nchrome,YouTube\n";
        let err = parse_dataset(csv).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_dataset_unterminated_quote() {
        let csv = "app_name,window_title,category\nchrome,\"oops,distracting\n";
        assert!(parse_dataset(csv).is_err());
    }

    #[test]
    fn test_load_dataset_missing_file() {
        assert!(load_dataset("/nonexistent/dataset.csv").is_err());
    }

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new(format!("app{i}"), "title", "label"))
            .collect()
    }

    #[test]
    fn test_split_sizes() {
        let (train, test) = train_test_split(&records(10), 0.2, 42).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);

        let (train, test) = train_test_split(&records(11), 0.2, 42).unwrap();
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn test_split_is_seeded() {
        let data = records(50);
        let a = train_test_split(&data, 0.2, 42).unwrap();
        let b = train_test_split(&data, 0.2, 42).unwrap();
        assert_eq!(a, b);

        let c = train_test_split(&data, 0.2, 7).unwrap();
        assert_ne!(a.1, c.1);
    }

    #[test]
    fn test_split_is_a_partition() {
        let data = records(30);
        let (train, test) = train_test_split(&data, 0.2, 42).unwrap();

        let mut names: Vec<_> = train.iter().chain(&test).map(|r| r.app_name.clone()).collect();
        names.sort();
        let mut expected: Vec<_> = data.iter().map(|r| r.app_name.clone()).collect();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_split_rejects_bad_input() {
        assert!(train_test_split(&records(10), 0.0, 42).is_err());
        assert!(train_test_split(&records(10), 1.0, 42).is_err());
        assert!(train_test_split(&records(1), 0.2, 42).is_err());
        assert!(train_test_split(&[], 0.2, 42).is_err());
    }
}
