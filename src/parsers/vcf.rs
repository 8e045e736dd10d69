use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{CompatibilityError, Result};
use crate::genotype_list::GenotypeList;
use crate::parsers::open_file;
use crate::pedigree::Pedigree;
use crate::types::Genotype;

/// Fixed columns before the first sample: CHROM POS ID REF ALT QUAL FILTER INFO FORMAT
const FIXED_COLUMNS: usize = 9;

pub const DEFAULT_GENE_KEY: &str = "GENE";
pub const DEFAULT_X_CONTIGS: [&str; 4] = ["X", "chrX", "23", "chr23"];

/// Extracts per-gene genotype calls from a multi-sample VCF.
///
/// Sample columns are re-ordered into pedigree member order and records are grouped
/// by the gene named in an INFO key, keeping the order in which genes first appear.
pub struct VcfGenotypeReader {
    gene_key: String,
    x_contigs: Vec<String>,
}

struct GeneCalls {
    contig: String,
    calls: Vec<Vec<Genotype>>,
}

impl VcfGenotypeReader {
    pub fn new(gene_key: impl Into<String>, x_contigs: Vec<String>) -> Self {
        Self {
            gene_key: gene_key.into(),
            x_contigs,
        }
    }

    pub fn is_x_contig(&self, contig: &str) -> bool {
        self.x_contigs.iter().any(|x| x == contig)
    }

    pub fn read(&self, path: &Path, pedigree: &Pedigree) -> Result<Vec<GenotypeList>> {
        let reader = open_file(path)?;
        let genes = self.read_from(reader, pedigree)?;
        debug!(path = %path.display(), genes = genes.len(), "read VCF genotypes");
        Ok(genes)
    }

    pub fn read_from<R: BufRead>(&self, reader: R, pedigree: &Pedigree) -> Result<Vec<GenotypeList>> {
        let mut columns: Option<Vec<usize>> = None;
        let mut order: Vec<String> = Vec::new();
        let mut genes: HashMap<String, GeneCalls> = HashMap::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;

            if line.starts_with("##") || line.trim().is_empty() {
                continue;
            }
            if let Some(header) = line.strip_prefix("#CHROM") {
                columns = Some(self.sample_columns(header, pedigree)?);
                continue;
            }
            let Some(columns) = columns.as_deref() else {
                return Err(CompatibilityError::vcf(line_no, "record before #CHROM header"));
            };

            let parts: Vec<&str> = line.trim_end().split('\t').collect();
            if parts.len() < FIXED_COLUMNS {
                return Err(CompatibilityError::vcf(
                    line_no,
                    format!("expected at least {} columns, found {}", FIXED_COLUMNS, parts.len()),
                ));
            }

            let gene_names = self.gene_names(parts[7]);
            if gene_names.is_empty() {
                debug!(line = line_no, "skipping record without {}", self.gene_key);
                continue;
            }
            let call = self.parse_call(&parts, columns, line_no)?;

            for gene in gene_names {
                let entry = genes.entry(gene.to_string()).or_insert_with(|| {
                    order.push(gene.to_string());
                    GeneCalls {
                        contig: parts[0].to_string(),
                        calls: Vec::new(),
                    }
                });
                if entry.contig != parts[0] {
                    warn!(
                        gene,
                        first = %entry.contig,
                        found = parts[0],
                        "gene spans several contigs"
                    );
                }
                entry.calls.push(call.clone());
            }
        }

        let names: Vec<String> = pedigree.names().iter().map(|n| n.to_string()).collect();
        order
            .into_iter()
            .filter_map(|gene| genes.remove(&gene).map(|calls| (gene, calls)))
            .map(|(gene, gene_calls)| {
                let is_x = self.is_x_contig(&gene_calls.contig);
                GenotypeList::new(gene, names.clone(), is_x, gene_calls.calls)
            })
            .collect()
    }

    /// Column index of every pedigree member, in member order
    fn sample_columns(&self, header: &str, pedigree: &Pedigree) -> Result<Vec<usize>> {
        let samples: HashMap<&str, usize> = header
            .trim_end()
            .split('\t')
            .enumerate()
            .skip(FIXED_COLUMNS)
            .map(|(i, name)| (name, i))
            .collect();

        pedigree
            .names()
            .into_iter()
            .map(|name| {
                samples
                    .get(name)
                    .copied()
                    .ok_or_else(|| CompatibilityError::MissingSample {
                        name: name.to_string(),
                    })
            })
            .collect()
    }

    fn gene_names<'a>(&self, info: &'a str) -> Vec<&'a str> {
        let mut names: Vec<&str> = info
            .split(';')
            .filter_map(|entry| entry.split_once('='))
            .filter(|(key, _)| *key == self.gene_key)
            .flat_map(|(_, value)| value.split(&[',', '|'][..]))
            .filter(|name| !name.is_empty() && *name != ".")
            .collect();
        let mut seen = HashSet::new();
        names.retain(|name| seen.insert(*name));
        names
    }

    fn parse_call(&self, parts: &[&str], columns: &[usize], line_no: usize) -> Result<Vec<Genotype>> {
        let Some(gt_index) = parts[8].split(':').position(|f| f == "GT") else {
            return Ok(vec![Genotype::NotObserved; columns.len()]);
        };

        columns
            .iter()
            .map(|&col| -> Result<Genotype> {
                let sample = parts.get(col).ok_or_else(|| {
                    CompatibilityError::vcf(line_no, format!("missing sample column {}", col + 1))
                })?;
                Ok(sample
                    .split(':')
                    .nth(gt_index)
                    .map(Genotype::from_gt)
                    .unwrap_or(Genotype::NotObserved))
            })
            .collect()
    }
}

impl Default for VcfGenotypeReader {
    fn default() -> Self {
        Self::new(
            DEFAULT_GENE_KEY,
            DEFAULT_X_CONTIGS.iter().map(|s| s.to_string()).collect(),
        )
    }
}
