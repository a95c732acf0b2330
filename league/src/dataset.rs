use std::io;
use std::path::Path;

/// How an uploaded dataset is interpolated into the prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataFormat {
    #[default]
    MarkdownTable,
    BulletPoints,
}

/// A small tabular dataset parsed from a league CSV export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn from_path(path: &Path) -> Result<Self, csv::Error> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
            // Ragged rows are padded so every row lines up with the header.
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self, format: DataFormat) -> String {
        match format {
            DataFormat::MarkdownTable => self.to_markdown_table(),
            DataFormat::BulletPoints => self.to_bullet_list(),
        }
    }

    /// Pipe-style Markdown table with padded columns.
    fn to_markdown_table(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }
        // Keep the separator row legal markdown even for empty headers.
        for w in &mut widths {
            *w = (*w).max(3);
        }

        let mut out = String::new();
        out.push_str(&table_row(&self.headers, &widths));
        out.push('\n');
        let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&table_row(&dashes, &widths));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&table_row(row, &widths));
        }
        out
    }

    /// One bullet per row: `- **col:** value; **col:** value`
    fn to_bullet_list(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let items: Vec<String> = self
                .headers
                .iter()
                .zip(row.iter())
                .map(|(col, cell)| format!("**{col}:** {cell}"))
                .collect();
            out.push_str("- ");
            out.push_str(&items.join("; "));
            out.push('\n');
        }
        out
    }
}

fn table_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, w)| format!("{cell:<w$}", w = *w))
        .collect();
    format!("| {} |", padded.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_reader("team,wins\nOrcland Raiders,3\nReikland Reavers,1\n".as_bytes())
            .unwrap()
    }

    #[test]
    fn csv_parses_headers_and_rows() {
        let data = sample();
        assert_eq!(data.headers, vec!["team", "wins"]);
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0], vec!["Orcland Raiders", "3"]);
    }

    #[test]
    fn ragged_rows_are_padded_to_the_header_width() {
        let data = Dataset::from_reader("a,b,c\n1,2\n".as_bytes()).unwrap();
        assert_eq!(data.rows[0], vec!["1", "2", ""]);
    }

    #[test]
    fn markdown_table_has_aligned_pipes() {
        let table = sample().render(DataFormat::MarkdownTable);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("| team"));
        assert!(lines[1].starts_with("| ---"));
        assert!(lines[2].contains("Orcland Raiders"));
        // Every row renders at the same width.
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn bullet_list_names_every_column() {
        let bullets = sample().render(DataFormat::BulletPoints);
        assert!(bullets.contains("- **team:** Orcland Raiders; **wins:** 3"));
        assert_eq!(bullets.lines().count(), 2);
    }

    #[test]
    fn quoted_fields_keep_their_commas() {
        let data =
            Dataset::from_reader("team,note\n\"Raiders, The\",ok\n".as_bytes()).unwrap();
        assert_eq!(data.rows[0][0], "Raiders, The");
    }
}
