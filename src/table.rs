//! Delimited text output handed to the chart renderer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::Itertools;

use crate::error::Result;

/// Anything that can be written out as a header row followed by data rows.
pub trait Table {
    fn header(&self) -> Vec<String>;
    fn rows(&self) -> Vec<Vec<String>>;

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()>
    where
        Self: Sized,
    {
        writeln!(writer, "{}", self.header().iter().join(","))?;
        for row in self.rows() {
            writeln!(writer, "{}", row.iter().join(","))?;
        }
        Ok(())
    }

    fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()>
    where
        Self: Sized,
    {
        let mut file = BufWriter::new(
            File::options()
                .write(true)
                .truncate(true)
                .create(true)
                .open(&path)?,
        );
        self.write_to(&mut file)?;
        file.flush()?;
        Ok(())
    }
}
