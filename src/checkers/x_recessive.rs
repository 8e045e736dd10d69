use crate::error::Result;
use crate::genotype_list::GenotypeList;
use crate::pedigree::{Pedigree, Person};
use crate::types::{Genotype, Sex};

use super::compound_het::has_two_heterozygous;
use super::recessive_homozygous::any_homozygous_alt;

/// X-linked recessive compatibility.
///
/// Affected males are hemizygous for the alternate allele (a heterozygous call is
/// accepted as a likely miscall), affected females are homozygous alternate.
/// Unaffected mothers of affected members are heterozygous carriers, unaffected
/// males carry nothing and unaffected females are not homozygous alternate.
/// Members of unknown sex are handled like females.
pub struct XRecessiveChecker<'a> {
    pedigree: &'a Pedigree,
    list: &'a GenotypeList,
    carrier_mothers: Vec<usize>,
}

impl<'a> XRecessiveChecker<'a> {
    pub fn new(pedigree: &'a Pedigree, list: &'a GenotypeList) -> Result<Self> {
        super::validate(pedigree, list)?;

        let mut carrier_mothers: Vec<usize> = pedigree
            .affected()
            .into_iter()
            .filter_map(|a| pedigree.members()[a].mother())
            .filter(|&m| pedigree.members()[m].is_unaffected())
            .collect();
        carrier_mothers.sort_unstable();
        carrier_mothers.dedup();

        Ok(Self {
            pedigree,
            list,
            carrier_mothers,
        })
    }

    pub fn run(&self) -> bool {
        if !self.list.is_x_chromosomal() {
            return false;
        }
        if self.pedigree.len() == 1 {
            single_sample_compatible(self.list.calls(), self.pedigree.members()[0].sex())
        } else {
            self.run_pedigree()
        }
    }

    pub(crate) fn run_pedigree(&self) -> bool {
        self.list
            .calls()
            .iter()
            .any(|call| self.is_compatible_call(call))
    }

    fn is_compatible_call(&self, call: &[Genotype]) -> bool {
        let mut carriers = 0;
        for (person, gt) in self.pedigree.members().iter().zip(call) {
            if person.is_affected() {
                match gt {
                    Genotype::HomozygousRef => return false,
                    Genotype::Heterozygous if !person.is_male() => return false,
                    Genotype::Heterozygous | Genotype::HomozygousAlt => carriers += 1,
                    Genotype::NotObserved => {}
                }
            } else if person.is_unaffected() && !is_unaffected_compatible(person, *gt) {
                return false;
            }
        }

        let mothers_carry = self
            .carrier_mothers
            .iter()
            .all(|&m| !call[m].is_homozygous());
        mothers_carry && carriers > 0
    }
}

// Fathers need no rule of their own: an unaffected father is an unaffected male.
fn is_unaffected_compatible(person: &Person, gt: Genotype) -> bool {
    if person.is_male() {
        !gt.has_alt()
    } else {
        gt != Genotype::HomozygousAlt
    }
}

/// A lone male needs a hemizygous call, a lone female a homozygous call or two
/// heterozygous hits.
pub(crate) fn single_sample_compatible(calls: &[Vec<Genotype>], sex: Sex) -> bool {
    match sex {
        Sex::Male => any_homozygous_alt(calls),
        Sex::Female | Sex::Unknown => any_homozygous_alt(calls) || has_two_heterozygous(calls),
    }
}
