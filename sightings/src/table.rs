use std::io;

/// Raw tabular result from the occurrence service: a header row plus string
/// records. The core treats columns as opaque; presenters look names up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn from_reader<R: io::Read>(reader: R) -> Result<ResultTable, csv::Error> {
        let mut rdr = csv::Reader::from_reader(reader);
        let columns = rdr.headers()?.iter().map(str::to_owned).collect();
        let rows = rdr
            .records()
            .map(|rec| rec.map(|r| r.iter().map(str::to_owned).collect()))
            .collect::<Result<_, _>>()?;
        Ok(ResultTable { columns, rows })
    }

    /// Writes the table as CSV: header row first, one record per line,
    /// no row index column.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush().map_err(csv::Error::from)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
