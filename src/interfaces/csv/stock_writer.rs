use crate::domain::denomination::Denomination;
use crate::domain::inventory::CoinInventory;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct StockRecord {
    denomination: Denomination,
    count: u64,
}

/// Writes a coin inventory as `denomination,count` rows, largest-first.
///
/// Every denomination of the table gets a row, including those at zero.
pub struct StockWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> StockWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_stock(&mut self, stock: &CoinInventory) -> Result<()> {
        for denomination in Denomination::ALL {
            self.writer.serialize(StockRecord {
                denomination,
                count: stock.count(denomination),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_stock() {
        let stock: CoinInventory = [(Denomination::C500, 2), (Denomination::C5, 1)]
            .into_iter()
            .collect();
        let mut out = Vec::new();
        StockWriter::new(&mut out).write_stock(&stock).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "denomination,count");
        assert_eq!(lines[1], "20000,0");
        assert_eq!(lines[6], "500,2");
        assert_eq!(lines[12], "5,1");
    }
}
