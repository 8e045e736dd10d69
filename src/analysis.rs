use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::checkers;
use crate::genotype_list::GenotypeList;
use crate::pedigree::Pedigree;
use crate::types::ModeOfInheritance;

/// Verdict for one gene
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneVerdict {
    pub gene: String,
    pub variants: usize,
    pub compatible: bool,
}

/// Gene whose input was structurally invalid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedGene {
    pub gene: String,
    pub reason: String,
}

/// Container for the verdicts of one filtering run
#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    pub pedigree: String,
    pub mode: ModeOfInheritance,
    pub verdicts: Vec<GeneVerdict>,
    pub skipped: Vec<SkippedGene>,
}

impl FilterReport {
    pub fn compatible_genes(&self) -> impl Iterator<Item = &str> {
        self.verdicts
            .iter()
            .filter(|v| v.compatible)
            .map(|v| v.gene.as_str())
    }

    pub fn compatible_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.compatible).count()
    }
}

/// Checks every gene of a run against one pedigree and mode of inheritance.
///
/// Genes are independent, so they are checked in parallel on the rayon pool. A gene
/// with structurally invalid input is logged and skipped; the other genes go on.
pub struct GeneFilter<'a> {
    pedigree: &'a Pedigree,
    mode: ModeOfInheritance,
}

impl<'a> GeneFilter<'a> {
    pub fn new(pedigree: &'a Pedigree, mode: ModeOfInheritance) -> Self {
        Self { pedigree, mode }
    }

    pub fn filter(&self, genes: &[GenotypeList]) -> FilterReport {
        self.filter_with_progress(genes, || {})
    }

    /// Like [`filter`](Self::filter), calling `tick` once per finished gene
    pub fn filter_with_progress<F>(&self, genes: &[GenotypeList], tick: F) -> FilterReport
    where
        F: Fn() + Sync,
    {
        let results: Vec<Result<GeneVerdict, SkippedGene>> = genes
            .par_iter()
            .map(|list| {
                let result = self.check(list);
                tick();
                result
            })
            .collect();

        let mut report = FilterReport {
            pedigree: self.pedigree.name().to_string(),
            mode: self.mode,
            verdicts: Vec::with_capacity(results.len()),
            skipped: Vec::new(),
        };
        for result in results {
            match result {
                Ok(verdict) => report.verdicts.push(verdict),
                Err(skipped) => report.skipped.push(skipped),
            }
        }

        info!(
            mode = %self.mode,
            genes = genes.len(),
            compatible = report.compatible_count(),
            skipped = report.skipped.len(),
            "inheritance filtering done"
        );
        report
    }

    fn check(&self, list: &GenotypeList) -> Result<GeneVerdict, SkippedGene> {
        match checkers::check(self.pedigree, list, self.mode) {
            Ok(compatible) => Ok(GeneVerdict {
                gene: list.gene_name().to_string(),
                variants: list.len(),
                compatible,
            }),
            Err(e) => {
                warn!(gene = list.gene_name(), "skipping gene: {}", e);
                Err(SkippedGene {
                    gene: list.gene_name().to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
