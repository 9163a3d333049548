use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes a command file that pays `tickets` tickets of price 450 with exact
/// coins, numbered from 1.
pub fn generate_commands(path: &Path, tickets: u32) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(file);

    wtr.write_record(["command", "value", "price"])?;

    for number in 1..=tickets {
        wtr.write_record(["start", &number.to_string(), "450"])?;
        for coin in ["200", "200", "50"] {
            wtr.write_record(["coin", coin])?;
        }
        wtr.write_record(["pay"])?;
    }

    wtr.flush()?;
    Ok(())
}
