use crate::application::terminal::Command;
use crate::domain::amount::Amount;
use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum CommandKind {
    Start,
    Coin,
    Change,
    Close,
    Pay,
    Cancel,
    Exit,
}

#[derive(Debug, Deserialize)]
struct CommandRecord {
    command: CommandKind,
    value: Option<String>,
    price: Option<i64>,
}

impl TryFrom<CommandRecord> for Command {
    type Error = PaymentError;

    fn try_from(record: CommandRecord) -> Result<Self> {
        let command = match record.command {
            CommandKind::Start => {
                let value = record.value.ok_or_else(|| {
                    PaymentError::InvalidCommand("start needs a ticket number".to_string())
                })?;
                let ticket = value.parse().map_err(|_| {
                    PaymentError::InvalidCommand(format!("invalid ticket number {:?}", value))
                })?;
                Command::Start {
                    ticket,
                    price: record.price.map(Amount::new),
                }
            }
            CommandKind::Coin => Command::Coin(record.value.ok_or_else(|| {
                PaymentError::InvalidCommand("coin needs a face value".to_string())
            })?),
            CommandKind::Change => Command::Change,
            CommandKind::Close => Command::Close,
            CommandKind::Pay => Command::Pay,
            CommandKind::Cancel => Command::Cancel,
            CommandKind::Exit => Command::Exit,
        };
        Ok(command)
    }
}

/// Reads terminal commands from a CSV source.
///
/// The expected header is `command, value, price`. Trailing empty columns may
/// be omitted, e.g. `close` or `coin, 500`.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and converts commands, one result per record.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize::<CommandRecord>()
            .map(|result| result.map_err(PaymentError::from).and_then(Command::try_from))
    }
}
