use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const PREDICTION_HEADER: [&str; 2] = ["Index", "Hogwarts House"];

/// Write one `<row index>,<label>` record per prediction under the
/// `Index,Hogwarts House` header.
pub fn write_predictions<P: AsRef<Path>>(predictions: &[String], output_path: P) -> Result<()> {
    let path = output_path.as_ref();
    let file = File::create(path).with_context(|| format!("Failed to create output file: {:?}", path))?;
    write_predictions_to(predictions, BufWriter::new(file))
        .with_context(|| format!("Failed to write predictions to {:?}", path))
}

pub fn write_predictions_to<W: Write>(predictions: &[String], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(PREDICTION_HEADER)?;
    for (index, label) in predictions.iter().enumerate() {
        writer.write_record([index.to_string().as_str(), label.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
