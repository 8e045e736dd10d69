use crate::error::Result;
use crate::genotype_list::GenotypeList;
use crate::pedigree::Pedigree;
use crate::types::{Genotype, Sex};

use super::autosomal_dominant::any_heterozygous;
use super::recessive_homozygous::any_homozygous_alt;

/// X-linked dominant compatibility.
///
/// Affected females are heterozygous (a homozygous alternate female is not counted,
/// that pattern is left to the recessive model), affected males carry the alternate
/// allele and unaffected members carry nothing. Members of unknown sex are handled
/// like females.
pub struct XDominantChecker<'a> {
    pedigree: &'a Pedigree,
    list: &'a GenotypeList,
}

impl<'a> XDominantChecker<'a> {
    pub fn new(pedigree: &'a Pedigree, list: &'a GenotypeList) -> Result<Self> {
        super::validate(pedigree, list)?;
        Ok(Self { pedigree, list })
    }

    pub fn run(&self) -> bool {
        if !self.list.is_x_chromosomal() {
            return false;
        }
        if self.pedigree.len() == 1 {
            // A single X copy makes dominant and recessive the same for a male
            match self.pedigree.members()[0].sex() {
                Sex::Male => any_homozygous_alt(self.list.calls()),
                Sex::Female | Sex::Unknown => any_heterozygous(self.list.calls()),
            }
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
                    Genotype::HomozygousAlt if !person.is_male() => return false,
                    Genotype::Heterozygous | Genotype::HomozygousAlt => carriers += 1,
                    Genotype::NotObserved => {}
                }
            } else if person.is_unaffected() && gt.has_alt() {
                return false;
            }
        }
        carriers > 0
    }
}
