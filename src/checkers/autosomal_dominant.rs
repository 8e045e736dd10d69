use crate::error::Result;
use crate::genotype_list::GenotypeList;
use crate::pedigree::Pedigree;
use crate::types::Genotype;

/// Autosomal dominant compatibility.
///
/// A call fits if every affected member is heterozygous (missing calls are tolerated),
/// no unaffected member carries the alternate allele, and at least one affected member
/// is actually heterozygous.
pub struct AutosomalDominantChecker<'a> {
    pedigree: &'a Pedigree,
    list: &'a GenotypeList,
}

impl<'a> AutosomalDominantChecker<'a> {
    pub fn new(pedigree: &'a Pedigree, list: &'a GenotypeList) -> Result<Self> {
        super::validate(pedigree, list)?;
        Ok(Self { pedigree, list })
    }

    pub fn run(&self) -> bool {
        if self.pedigree.len() == 1 {
            any_heterozygous(self.list.calls())
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
                    Genotype::HomozygousRef | Genotype::HomozygousAlt => return false,
                    Genotype::Heterozygous => carriers += 1,
                    Genotype::NotObserved => {}
                }
            } else if person.is_unaffected() && gt.has_alt() {
                return false;
            }
        }
        carriers > 0
    }
}

/// Single-sample rule: homozygous alternate calls are not informative for a dominant model
pub(crate) fn any_heterozygous(calls: &[Vec<Genotype>]) -> bool {
    calls.iter().any(|call| call[0].is_heterozygous())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::fixtures::*;
    use crate::types::Genotype::*;
    use crate::types::{Disease, Sex};

    fn run(pedigree: &Pedigree, calls: Vec<Vec<Genotype>>) -> bool {
        let list = list(pedigree, false, calls);
        AutosomalDominantChecker::new(pedigree, &list).unwrap().run()
    }

    #[test]
    fn test_trio_de_novo() {
        let pedigree = trio();
        assert!(run(&pedigree, vec![vec![Heterozygous, HomozygousRef, HomozygousRef]]));
        assert!(!run(&pedigree, vec![vec![Heterozygous, Heterozygous, HomozygousRef]]));
        assert!(!run(&pedigree, vec![vec![Heterozygous, HomozygousRef, Heterozygous]]));
    }

    #[test]
    fn test_affected_must_be_heterozygous() {
        let pedigree = trio();
        assert!(!run(&pedigree, vec![vec![HomozygousAlt, HomozygousRef, HomozygousRef]]));
        assert!(!run(&pedigree, vec![vec![HomozygousRef, HomozygousRef, HomozygousRef]]));
        // Missing calls everywhere are no evidence
        assert!(!run(&pedigree, vec![vec![NotObserved, NotObserved, NotObserved]]));
        // Missing parents do not contradict
        assert!(run(&pedigree, vec![vec![Heterozygous, NotObserved, NotObserved]]));
    }

    #[test]
    fn test_any_call_suffices() {
        let pedigree = trio();
        assert!(run(
            &pedigree,
            vec![
                vec![HomozygousRef, HomozygousRef, HomozygousRef],
                vec![Heterozygous, HomozygousRef, HomozygousRef],
            ]
        ));
    }

    #[test]
    fn test_affected_parent_transmits() {
        let pedigree = Pedigree::new(
            "fam",
            vec![
                person("child", "father", "mother", Sex::Female, Disease::Affected),
                person("father", "0", "0", Sex::Male, Disease::Affected),
                person("mother", "0", "0", Sex::Female, Disease::Unaffected),
                person("brother", "father", "mother", Sex::Male, Disease::Unaffected),
            ],
        )
        .unwrap();
        assert!(run(
            &pedigree,
            vec![vec![Heterozygous, Heterozygous, HomozygousRef, HomozygousRef]]
        ));
        assert!(!run(
            &pedigree,
            vec![vec![Heterozygous, Heterozygous, HomozygousRef, Heterozygous]]
        ));
    }

    #[test]
    fn test_no_affected_members_never_passes() {
        let pedigree = Pedigree::new(
            "fam",
            vec![
                person("a", "0", "0", Sex::Male, Disease::Unaffected),
                person("b", "0", "0", Sex::Female, Disease::Unknown),
            ],
        )
        .unwrap();
        assert!(!run(&pedigree, vec![vec![HomozygousRef, Heterozygous]]));
    }

    #[test]
    fn test_single_sample() {
        let pedigree = single(Sex::Female);
        assert!(run(&pedigree, vec![vec![HomozygousRef], vec![Heterozygous]]));
        assert!(!run(&pedigree, vec![vec![HomozygousAlt]]));
    }

    #[test]
    fn test_single_sample_agrees_with_pedigree_rule() {
        let pedigree = single(Sex::Male);
        for calls in single_sample_lists(&[HomozygousRef, Heterozygous, HomozygousAlt, NotObserved], 3) {
            let list = list(&pedigree, false, calls);
            let checker = AutosomalDominantChecker::new(&pedigree, &list).unwrap();
            assert_eq!(checker.run(), checker.run_pedigree(), "{:?}", list.calls());
        }
    }
}
