//! Autosomal recessive compatibility through two heterozygous calls in the same gene,
//! one inherited from each parent.
//!
//! Calls are first split into paternal-origin and maternal-origin candidates. A pair of
//! distinct calls, one from each set, is then accepted unless one of these holds:
//!
//! - neither side has positive evidence: no affected member and no parent is
//!   heterozygous on that side's call
//! - an affected member is homozygous on either call
//! - the father is homozygous on the paternal call, or the mother on the maternal call
//! - an unaffected full sibling of an affected member is heterozygous on both calls
//!
//! "Father" and "mother" are the parents of the affected members, so all affected
//! members must share at most one father and one mother.

use std::collections::BTreeSet;

use tracing::trace;

use crate::error::{CompatibilityError, Result};
use crate::genotype_list::GenotypeList;
use crate::pedigree::Pedigree;
use crate::types::Genotype;

pub struct CompoundHetChecker<'a> {
    pedigree: &'a Pedigree,
    list: &'a GenotypeList,
    father: Option<usize>,
    mother: Option<usize>,
    affected: Vec<usize>,
    unaffected_siblings: Vec<usize>,
}

impl<'a> CompoundHetChecker<'a> {
    pub fn new(pedigree: &'a Pedigree, list: &'a GenotypeList) -> Result<Self> {
        super::validate(pedigree, list)?;

        let affected = pedigree.affected();
        let father = single_parent(pedigree, &affected, "father", |i| pedigree.members()[i].father())?;
        let mother = single_parent(pedigree, &affected, "mother", |i| pedigree.members()[i].mother())?;

        let unaffected_siblings: BTreeSet<usize> = affected
            .iter()
            .flat_map(|&a| pedigree.siblings_of(a))
            .filter(|&s| pedigree.members()[s].is_unaffected())
            .collect();

        Ok(Self {
            pedigree,
            list,
            father,
            mother,
            affected,
            unaffected_siblings: unaffected_siblings.into_iter().collect(),
        })
    }

    pub fn run(&self) -> bool {
        if self.pedigree.len() == 1 {
            has_two_heterozygous(self.list.calls())
        } else {
            self.run_pedigree()
        }
    }

    pub(crate) fn run_pedigree(&self) -> bool {
        let calls = self.list.calls();
        let paternal: Vec<usize> = (0..calls.len())
            .filter(|&i| self.is_candidate(&calls[i], self.father, self.mother))
            .collect();
        let maternal: Vec<usize> = (0..calls.len())
            .filter(|&i| self.is_candidate(&calls[i], self.mother, self.father))
            .collect();
        trace!(
            gene = self.list.gene_name(),
            paternal = paternal.len(),
            maternal = maternal.len(),
            "compound het candidates"
        );

        paternal.iter().any(|&p| {
            maternal
                .iter()
                .any(|&m| p != m && self.is_compatible_pair(&calls[p], &calls[m]))
        })
    }

    /// Candidate for inheritance from `source`: affected members carry it (or are
    /// uncalled), `source` carries it and `other` does not.
    fn is_candidate(&self, call: &[Genotype], source: Option<usize>, other: Option<usize>) -> bool {
        let affected_carry = self
            .affected
            .iter()
            .all(|&a| call[a].is_heterozygous() || call[a].is_not_observed());
        let source_carries = source
            .map(|s| call[s].is_heterozygous() || call[s].is_not_observed())
            .unwrap_or(true);
        let other_lacks = other
            .map(|o| matches!(call[o], Genotype::HomozygousRef) || call[o].is_not_observed())
            .unwrap_or(true);
        affected_carry && source_carries && other_lacks
    }

    fn is_compatible_pair(&self, paternal: &[Genotype], maternal: &[Genotype]) -> bool {
        let has_evidence = |call: &[Genotype], parent: Option<usize>| {
            self.affected.iter().any(|&a| call[a].is_heterozygous())
                || parent.is_some_and(|p| call[p].is_heterozygous())
        };
        if !has_evidence(paternal, self.father) && !has_evidence(maternal, self.mother) {
            return false;
        }

        if self
            .affected
            .iter()
            .any(|&a| paternal[a].is_homozygous() || maternal[a].is_homozygous())
        {
            return false;
        }

        if self.father.is_some_and(|f| paternal[f].is_homozygous())
            || self.mother.is_some_and(|m| maternal[m].is_homozygous())
        {
            return false;
        }

        !self
            .unaffected_siblings
            .iter()
            .any(|&s| paternal[s].is_heterozygous() && maternal[s].is_heterozygous())
    }
}

/// Two heterozygous hits stand in for one allele from each parent, since phase
/// cannot be observed in a single sample.
pub(crate) fn has_two_heterozygous(calls: &[Vec<Genotype>]) -> bool {
    calls.iter().filter(|call| call[0].is_heterozygous()).count() > 1
}

fn single_parent(
    pedigree: &Pedigree,
    affected: &[usize],
    role: &'static str,
    parent_of: impl Fn(usize) -> Option<usize>,
) -> Result<Option<usize>> {
    let parents: BTreeSet<usize> = affected.iter().filter_map(|&a| parent_of(a)).collect();
    if parents.len() > 1 {
        let names: Vec<&str> = parents
            .iter()
            .map(|&p| pedigree.members()[p].name())
            .collect();
        return Err(CompatibilityError::AmbiguousParents {
            role,
            names: names.join(", "),
        });
    }
    Ok(parents.into_iter().next())
}
