//! Best-hit selection: one row per gene id

use crate::bio::alignment::AlignmentRow;
use crate::processing::criterion::Criterion;
use crate::processing::filter::RowFilter;
use crate::utils::files::StagedFile;
use crate::{BioPathPredError, BioPathPredResult};
use csv::StringRecord;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Column rows are grouped by
pub const GROUP_COLUMN: &str = "id";

/// Indices of the best item of each group, in first-seen group order.
///
/// The best item has the largest value; on ties the earliest item wins, and NaN only
/// wins when every value of the group is NaN.
pub fn stable_argmax_by_group<T, K, V>(items: &[T], key: K, value: V) -> Vec<usize>
where
    K: Fn(&T) -> &str,
    V: Fn(&T) -> f64,
{
    let mut best: IndexMap<&str, (usize, f64)> = IndexMap::new();

    for (index, item) in items.iter().enumerate() {
        let candidate = value(item);
        best.entry(key(item))
            .and_modify(|(best_index, best_value)| {
                let better = candidate > *best_value || (best_value.is_nan() && !candidate.is_nan());
                if better {
                    *best_index = index;
                    *best_value = candidate;
                }
            })
            .or_insert((index, candidate));
    }

    best.into_values().map(|(index, _)| index).collect()
}

/// An in-memory CSV table: header plus records
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: StringRecord,
    pub records: Vec<StringRecord>,
}

impl Table {
    pub fn read_from<R: Read>(reader: R) -> BioPathPredResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let records = csv_reader
            .records()
            .collect::<Result<Vec<_>, csv::Error>>()?;
        Ok(Self { headers, records })
    }

    pub fn write_to<W: Write>(&self, writer: W) -> BioPathPredResult<()> {
        let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for record in &self.records {
            csv_writer.write_record(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> BioPathPredResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| BioPathPredError::MissingColumn(name.to_string()))
    }
}

/// Numeric columns of [`AlignmentRow`] usable as criteria or filters
const ROW_NUMERIC_COLUMNS: [&str; 7] = [
    "start",
    "end",
    "existence",
    "score",
    "evalue",
    "identity_percentage",
    "query_coverage",
];

fn row_value(row: &AlignmentRow, column: &str) -> Option<f64> {
    match column {
        "start" => Some(row.start as f64),
        "end" => Some(row.end as f64),
        "existence" => Some(row.existence as f64),
        "score" => Some(row.score),
        "evalue" => Some(row.evalue),
        "identity_percentage" => Some(row.identity_percentage),
        "query_coverage" => Some(row.query_coverage),
        _ => None,
    }
}

/// Numeric cell value; an empty cell reads as NaN
fn numeric_cell(record: &StringRecord, index: usize, column: &str, row: usize) -> BioPathPredResult<f64> {
    let cell = record.get(index).unwrap_or("").trim();
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse().map_err(|_| BioPathPredError::InvalidValue {
        column: column.to_string(),
        value: cell.to_string(),
        row,
    })
}

/// Keeps the row maximizing a criterion for every gene id
#[derive(Debug, Clone, Default)]
pub struct BestHitSelector {
    criterion: Criterion,
    filters: Vec<RowFilter>,
}

impl BestHitSelector {
    pub fn new(criterion: Criterion) -> Self {
        Self {
            criterion,
            filters: Vec::new(),
        }
    }

    pub fn with_filters(mut self, filters: Vec<RowFilter>) -> Self {
        self.filters = filters;
        self
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Select from a CSV table, keeping its schema
    pub fn select(&self, table: &Table) -> BioPathPredResult<Table> {
        let column = self.criterion.column();
        let id_index = table.column_index(GROUP_COLUMN)?;
        let value_index = table.column_index(column)?;
        let filter_indices = self
            .filters
            .iter()
            .map(|f| table.column_index(&f.column))
            .collect::<BioPathPredResult<Vec<_>>>()?;

        // Data rows are numbered from 1, as a spreadsheet would show them below the header
        let mut kept: Vec<(&StringRecord, f64)> = Vec::with_capacity(table.records.len());
        for (i, record) in table.records.iter().enumerate() {
            let row = i + 1;
            let mut passes = true;
            for (filter, &index) in self.filters.iter().zip(&filter_indices) {
                if !filter.accepts(numeric_cell(record, index, &filter.column, row)?) {
                    passes = false;
                    break;
                }
            }
            if passes {
                kept.push((record, numeric_cell(record, value_index, column, row)?));
            }
        }

        let dropped = table.records.len() - kept.len();
        if dropped > 0 {
            debug!("Filters dropped {} of {} rows", dropped, table.records.len());
        }

        let winners = stable_argmax_by_group(
            &kept,
            |(record, _)| record.get(id_index).unwrap_or(""),
            |(_, value)| *value,
        );

        Ok(Table {
            headers: table.headers.clone(),
            records: winners.into_iter().map(|i| kept[i].0.clone()).collect(),
        })
    }

    /// Select from typed alignment rows
    pub fn select_rows(&self, rows: &[AlignmentRow]) -> BioPathPredResult<Vec<AlignmentRow>> {
        for column in self.filters.iter().map(|f| f.column.as_str()) {
            if !ROW_NUMERIC_COLUMNS.contains(&column) {
                return Err(BioPathPredError::MissingColumn(column.to_string()));
            }
        }

        let kept: Vec<&AlignmentRow> = rows
            .iter()
            .filter(|row| {
                self.filters
                    .iter()
                    .all(|f| f.accepts(row_value(row, &f.column).unwrap_or(f64::NAN)))
            })
            .collect();

        let column = self.criterion.column();
        Ok(stable_argmax_by_group(
            &kept,
            |r| r.id.as_str(),
            |r| row_value(r, column).unwrap_or(f64::NAN),
        )
        .into_iter()
        .map(|i| kept[i].clone())
        .collect())
    }

    pub fn select_reader<R: Read, W: Write>(&self, reader: R, writer: W) -> BioPathPredResult<usize> {
        let table = Table::read_from(reader)?;
        let selected = self.select(&table)?;
        selected.write_to(writer)?;
        Ok(selected.records.len())
    }
}

/// Reduce one alignment row CSV to its best hit per gene.
///
/// Nothing is written to `output` unless selection succeeds.
pub fn find_best_blast(input: &Path, output: &Path, selector: &BestHitSelector) -> BioPathPredResult<usize> {
    if !input.is_file() {
        return Err(BioPathPredError::MissingInput(input.to_path_buf()));
    }
    let reader = BufReader::new(File::open(input)?);

    let mut staged = StagedFile::new(output)?;
    let count = selector.select_reader(reader, staged.file_mut())?;
    staged.commit()?;

    info!(
        "Selected {} best hits by {} into {}",
        count,
        selector.criterion(),
        output.display()
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ROWS: &str = "\
id,alignment_id,score,evalue,identity_percentage,query_coverage
g1,A,50.0,1e-10,40.0,90.0
g2,B,30.0,1e-3,80.0,50.0
g1,C,75.5,1e-20,35.0,95.0
g2,D,30.0,1e-5,60.0,70.0
g3,E,10.0,0.5,20.0,10.0
";

    fn table() -> Table {
        Table::read_from(ROWS.as_bytes()).unwrap()
    }

    fn alignment_ids(table: &Table) -> Vec<String> {
        let index = table.column_index("alignment_id").unwrap();
        table
            .records
            .iter()
            .map(|r| r.get(index).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_select_by_score_keeps_first_on_ties() {
        let selected = BestHitSelector::default().select(&table()).unwrap();
        assert_eq!(alignment_ids(&selected), vec!["C", "B", "E"]);
        assert_eq!(selected.headers, table().headers);
    }

    #[test]
    fn test_select_each_criterion() {
        let cases = vec![
            (Criterion::Score, vec!["C", "B", "E"]),
            // Maximized like every other criterion: the worst e-value wins
            (Criterion::Evalue, vec!["A", "B", "E"]),
            (Criterion::IdentityPercentage, vec!["A", "B", "E"]),
            (Criterion::QueryCoverage, vec!["C", "D", "E"]),
        ];

        for (criterion, expected) in cases {
            let selected = BestHitSelector::new(criterion).select(&table()).unwrap();
            assert_eq!(alignment_ids(&selected), expected, "criterion {}", criterion);
        }
    }

    #[test]
    fn test_filters_apply_before_selection() {
        let selector = BestHitSelector::new(Criterion::Score)
            .with_filters(RowFilter::parse_all(&["identity_percentage>=38", "evalue<=0.01"]).unwrap());
        let selected = selector.select(&table()).unwrap();
        assert_eq!(alignment_ids(&selected), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_input() {
        let table = Table::read_from("id,score\n".as_bytes()).unwrap();
        let selected = BestHitSelector::default().select(&table).unwrap();
        assert!(selected.records.is_empty());
    }

    #[test]
    fn test_missing_columns() {
        let table = Table::read_from("gene,score\ng1,1\n".as_bytes()).unwrap();
        let result = BestHitSelector::default().select(&table);
        assert!(matches!(result, Err(BioPathPredError::MissingColumn(c)) if c == "id"));

        let table = Table::read_from("id,evalue\ng1,1\n".as_bytes()).unwrap();
        let result = BestHitSelector::default().select(&table);
        assert!(matches!(result, Err(BioPathPredError::MissingColumn(c)) if c == "score"));
    }

    #[test]
    fn test_non_numeric_value() {
        let table = Table::read_from("id,score\ng1,1\ng1,high\n".as_bytes()).unwrap();
        match BestHitSelector::default().select(&table) {
            Err(BioPathPredError::InvalidValue { value, row, .. }) => {
                assert_eq!(value, "high");
                assert_eq!(row, 2);
            }
            other => panic!("Expected invalid value error, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_loses_to_numbers() {
        let table = Table::read_from("id,score\ng1,\ng1,3\ng1,\n".as_bytes()).unwrap();
        let selected = BestHitSelector::default().select(&table).unwrap();
        assert_eq!(selected.records.len(), 1);
        assert_eq!(selected.records[0].get(1), Some("3"));
    }

    #[test]
    fn test_select_typed_rows() {
        let row = |id: &str, alignment_id: &str, score: f64, identity: f64| AlignmentRow {
            id: id.to_string(),
            start: 1,
            end: 300,
            alignment_id: alignment_id.to_string(),
            enzyme_id: "-".to_string(),
            enzyme_code: "-".to_string(),
            product: "Chaperonin GroEL".to_string(),
            organism: "Escherichia coli".to_string(),
            existence: 1,
            gene: "groL".to_string(),
            score,
            evalue: 1e-10,
            identity_percentage: identity,
            query_coverage: 90.0,
        };
        let rows = vec![
            row("g1", "A", 10.0, 95.0),
            row("g1", "B", 20.0, 50.0),
            row("g2", "C", 5.0, 20.0),
        ];

        let selected = BestHitSelector::default().select_rows(&rows).unwrap();
        let ids: Vec<&str> = selected.iter().map(|r| r.alignment_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);

        let selector = BestHitSelector::default()
            .with_filters(RowFilter::parse_all(&["identity_percentage>60"]).unwrap());
        let selected = selector.select_rows(&rows).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].alignment_id, "A");

        // Unknown filter columns fail the same way on typed rows and on tables
        let selector = BestHitSelector::default()
            .with_filters(RowFilter::parse_all(&["pident>=10"]).unwrap());
        let result = selector.select_rows(&rows);
        assert!(matches!(result, Err(BioPathPredError::MissingColumn(c)) if c == "pident"));

        let mut csv = Vec::new();
        crate::bio::alignment::write_rows(&mut csv, &rows).unwrap();
        let table = Table::read_from(csv.as_slice()).unwrap();
        let result = selector.select(&table);
        assert!(matches!(result, Err(BioPathPredError::MissingColumn(c)) if c == "pident"));
    }

    #[test]
    fn test_select_reader_round_trip_schema() {
        let mut output = Vec::new();
        let count = BestHitSelector::default()
            .select_reader(ROWS.as_bytes(), &mut output)
            .unwrap();
        assert_eq!(count, 3);

        let text = String::from_utf8(output).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,alignment_id,score,evalue,identity_percentage,query_coverage")
        );
        assert_eq!(lines.next(), Some("g1,C,75.5,1e-20,35.0,95.0"));
    }
}
