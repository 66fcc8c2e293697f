//! Batch driver: search a file of position descriptors one after another.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::engine::{Search, Tablebases, TranspositionTable};

use super::handler::UciHandler;

/// Read one descriptor per line. Lines are passed through unvalidated.
pub fn read_descriptors(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    BufReader::new(file).lines().collect()
}

/// Reset once, then search each descriptor to completion in order
pub fn run_batch<S, T, B, W>(handler: &mut UciHandler<S, T, B, W>, descriptors: &[String])
where
    S: Search,
    T: TranspositionTable,
    B: Tablebases,
    W: Write + Send + 'static,
{
    handler.new_game();
    for (i, descriptor) in descriptors.iter().enumerate() {
        log::debug!("batch position {}/{}", i + 1, descriptors.len());
        handler.go_descriptor(descriptor);
    }
}

/// [`read_descriptors`] followed by [`run_batch`]
pub fn run_batch_file<S, T, B, W>(
    handler: &mut UciHandler<S, T, B, W>,
    path: impl AsRef<Path>,
) -> io::Result<()>
where
    S: Search,
    T: TranspositionTable,
    B: Tablebases,
    W: Write + Send + 'static,
{
    let path = path.as_ref();
    let descriptors = read_descriptors(path)?;
    log::info!("{} positions read from {}", descriptors.len(), path.display());
    run_batch(handler, &descriptors);
    Ok(())
}
