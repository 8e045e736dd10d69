use serde::Serialize;

use crate::error::{CompatibilityError, Result};
use crate::pedigree::Pedigree;
use crate::types::Genotype;

/// Genotype calls of all candidate variants in one gene.
///
/// Each call holds one [`Genotype`] per sample, in the order of `names`.
/// Built once per gene and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenotypeList {
    gene_name: String,
    names: Vec<String>,
    is_x_chromosomal: bool,
    calls: Vec<Vec<Genotype>>,
}

impl GenotypeList {
    /// Fails if any call does not hold exactly one genotype per sample name.
    pub fn new(
        gene_name: impl Into<String>,
        names: Vec<String>,
        is_x_chromosomal: bool,
        calls: Vec<Vec<Genotype>>,
    ) -> Result<Self> {
        let gene_name = gene_name.into();
        if let Some((index, call)) = calls
            .iter()
            .enumerate()
            .find(|(_, call)| call.len() != names.len())
        {
            return Err(CompatibilityError::CallLengthMismatch {
                gene: gene_name,
                index,
                expected: names.len(),
                found: call.len(),
            });
        }

        Ok(Self {
            gene_name,
            names,
            is_x_chromosomal,
            calls,
        })
    }

    pub fn gene_name(&self) -> &str {
        &self.gene_name
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_x_chromosomal(&self) -> bool {
        self.is_x_chromosomal
    }

    pub fn calls(&self) -> &[Vec<Genotype>] {
        &self.calls
    }

    /// Number of calls (candidate variants)
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// True if the sample names are the pedigree's member names, in member order
    pub fn names_match(&self, pedigree: &Pedigree) -> bool {
        self.names.len() == pedigree.len()
            && self
                .names
                .iter()
                .zip(pedigree.members())
                .all(|(name, person)| name == person.name())
    }
}
