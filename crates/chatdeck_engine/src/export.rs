use chatdeck_core::ChatMessage;

/// Header row of every export.
pub const CSV_HEADER: [&str; 3] = ["Time", "Author", "Message"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes messages as UTF-8 CSV: header `Time,Author,Message`, then one
/// row per message in the given order. The header is written even when
/// `messages` is empty.
pub fn write_csv(messages: &[ChatMessage]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for message in messages {
        writer.serialize(message)?;
    }
    writer.into_inner().map_err(|err| err.into_error().into())
}

/// Parses a CSV produced by [`write_csv`] back into messages.
pub fn read_csv(bytes: &[u8]) -> Result<Vec<ChatMessage>, ExportError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut messages = Vec::new();
    for row in reader.deserialize() {
        messages.push(row?);
    }
    Ok(messages)
}
