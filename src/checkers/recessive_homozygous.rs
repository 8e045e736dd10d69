use crate::error::Result;
use crate::genotype_list::GenotypeList;
use crate::pedigree::Pedigree;
use crate::types::Genotype;

/// Autosomal recessive compatibility through a homozygous alternate call.
///
/// Affected members are homozygous alternate, every identified parent is a
/// heterozygous carrier and no unaffected member is homozygous alternate.
pub struct RecessiveHomozygousChecker<'a> {
    pedigree: &'a Pedigree,
    list: &'a GenotypeList,
    parents: Vec<usize>,
}

impl<'a> RecessiveHomozygousChecker<'a> {
    pub fn new(pedigree: &'a Pedigree, list: &'a GenotypeList) -> Result<Self> {
        super::validate(pedigree, list)?;
        Ok(Self {
            pedigree,
            list,
            parents: pedigree.parent_indices(),
        })
    }

    pub fn run(&self) -> bool {
        if self.pedigree.len() == 1 {
            any_homozygous_alt(self.list.calls())
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
                    Genotype::HomozygousAlt => carriers += 1,
                    Genotype::NotObserved => {}
                    Genotype::HomozygousRef | Genotype::Heterozygous => return false,
                }
            } else if person.is_unaffected() && *gt == Genotype::HomozygousAlt {
                return false;
            }
        }

        let parents_carry = self
            .parents
            .iter()
            .all(|&p| call[p].is_heterozygous() || call[p].is_not_observed());
        parents_carry && carriers > 0
    }
}

pub(crate) fn any_homozygous_alt(calls: &[Vec<Genotype>]) -> bool {
    calls.iter().any(|call| call[0] == Genotype::HomozygousAlt)
}
