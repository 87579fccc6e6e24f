//! In-memory table: a header row plus data rows.

use crate::cell::CellValue;

/// One data row. `cells` is aligned with [`Dataset::headers`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based position among the source data rows (the header is not
    /// counted). Blank rows keep their number even though they are dropped.
    pub index: usize,
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn cell(&self, column: usize) -> &CellValue {
        self.cells.get(column).unwrap_or(&CellValue::Empty)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from raw records.
    ///
    /// Headers are trimmed. Each record is padded or cut to the header width,
    /// and records with no content at all are dropped. Indices are assigned
    /// before dropping, so every row keeps its position in the source.
    pub fn new<H, R>(headers: H, records: R) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator<Item = Vec<CellValue>>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|h| h.as_ref().trim().to_string())
            .collect();
        let width = headers.len();

        let rows = records
            .into_iter()
            .enumerate()
            .filter(|(_, cells)| cells.iter().any(|c| !c.is_empty()))
            .map(|(i, mut cells)| {
                cells.resize(width, CellValue::Empty);
                Row {
                    index: i + 1,
                    cells,
                }
            })
            .collect();

        Dataset { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::text(s)
    }

    #[test]
    fn headers_are_trimmed() {
        let ds = Dataset::new([" Title ", "Date"], Vec::<Vec<CellValue>>::new());
        assert_eq!(ds.headers, vec!["Title", "Date"]);
        assert!(ds.is_empty());
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_cut() {
        let ds = Dataset::new(
            ["a", "b"],
            vec![vec![text("1")], vec![text("1"), text("2"), text("3")]],
        );
        assert_eq!(ds.rows[0].cells, vec![text("1"), CellValue::Empty]);
        assert_eq!(ds.rows[1].cells.len(), 2);
    }

    #[test]
    fn blank_rows_are_dropped_but_keep_later_indices() {
        let ds = Dataset::new(
            ["a"],
            vec![
                vec![text("first")],
                vec![CellValue::Empty],
                vec![text("  ")],
                vec![text("second")],
            ],
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].index, 1);
        assert_eq!(ds.rows[1].index, 4);
        assert_eq!(ds.rows[1].cell(0), &text("second"));
    }

    #[test]
    fn missing_cell_reads_as_empty() {
        let row = Row {
            index: 1,
            cells: vec![],
        };
        assert_eq!(row.cell(3), &CellValue::Empty);
    }
}
