//! Readers for the pedigree and genotype inputs of the compatibility check.

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

pub mod ped;
pub mod vcf;

pub use ped::PedParser;
pub use vcf::VcfGenotypeReader;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Open a plain or gzip/bgzip compressed text file
pub fn open_file(path: &Path) -> Result<Box<dyn BufRead>> {
    let mut reader = BufReader::new(File::open(path)?);
    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);

    if is_gzip {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}
