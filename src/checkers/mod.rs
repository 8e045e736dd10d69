//! Mode-of-inheritance compatibility checkers.
//!
//! One checker per mode, each consuming a validated `(Pedigree, GenotypeList)` pair.
//! A gene is compatible if any of its calls (or, for compound heterozygosity, any
//! valid pair of calls) fits the mode's rules.

mod autosomal_dominant;
mod compound_het;
mod recessive_homozygous;
mod x_dominant;
mod x_recessive;

pub use autosomal_dominant::AutosomalDominantChecker;
pub use compound_het::CompoundHetChecker;
pub use recessive_homozygous::RecessiveHomozygousChecker;
pub use x_dominant::XDominantChecker;
pub use x_recessive::XRecessiveChecker;

use tracing::debug;

use crate::error::{CompatibilityError, Result};
use crate::genotype_list::GenotypeList;
use crate::pedigree::Pedigree;
use crate::types::ModeOfInheritance;

/// Preconditions shared by every checker
pub(crate) fn validate(pedigree: &Pedigree, list: &GenotypeList) -> Result<()> {
    if pedigree.is_empty() {
        return Err(CompatibilityError::EmptyPedigree {
            name: pedigree.name().to_string(),
        });
    }
    if list.is_empty() {
        return Err(CompatibilityError::EmptyCallList {
            gene: list.gene_name().to_string(),
        });
    }
    if !list.names_match(pedigree) {
        return Err(CompatibilityError::MemberNameMismatch {
            gene: list.gene_name().to_string(),
        });
    }
    Ok(())
}

/// Check one gene's calls against `mode`.
///
/// `Ok(false)` is a legitimate negative verdict; `Err` means the input itself is
/// inconsistent (empty pedigree or call list, samples out of member order, ...).
pub fn check(pedigree: &Pedigree, list: &GenotypeList, mode: ModeOfInheritance) -> Result<bool> {
    let compatible = match mode {
        ModeOfInheritance::AutosomalDominant => {
            AutosomalDominantChecker::new(pedigree, list)?.run()
        }
        ModeOfInheritance::AutosomalRecessive => {
            // Father/mother roles are only needed for pairing, so a family with
            // several parent couples can still pass the homozygous rule
            RecessiveHomozygousChecker::new(pedigree, list)?.run()
                || CompoundHetChecker::new(pedigree, list)?.run()
        }
        ModeOfInheritance::XDominant => XDominantChecker::new(pedigree, list)?.run(),
        ModeOfInheritance::XRecessive => XRecessiveChecker::new(pedigree, list)?.run(),
        ModeOfInheritance::Uninitialized => true,
    };

    debug!(
        gene = list.gene_name(),
        mode = %mode,
        calls = list.len(),
        compatible,
        "checked gene"
    );
    Ok(compatible)
}

/// Check several call lists of the same gene; compatible if any of them is.
///
/// Every list is validated, so a structural error is reported even when an
/// earlier list already passed.
pub fn check_gene(
    pedigree: &Pedigree,
    lists: &[GenotypeList],
    mode: ModeOfInheritance,
) -> Result<bool> {
    let Some(first) = lists.first() else {
        return Err(CompatibilityError::NoCallLists);
    };

    let mut compatible = false;
    for list in lists {
        if list.gene_name() != first.gene_name() {
            debug!(
                expected = first.gene_name(),
                found = list.gene_name(),
                "call lists of different genes checked together"
            );
        }
        compatible |= check(pedigree, list, mode)?;
    }
    Ok(compatible)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::genotype_list::GenotypeList;
    use crate::pedigree::{PedPerson, Pedigree};
    use crate::types::{Disease, Genotype, Sex};

    pub fn person(name: &str, father: &str, mother: &str, sex: Sex, disease: Disease) -> PedPerson {
        PedPerson::new("fam", name, father, mother, sex, disease)
    }

    /// Affected son, unaffected parents, member order `[child, father, mother]`
    pub fn trio() -> Pedigree {
        trio_with_child(Sex::Male)
    }

    pub fn trio_with_child(sex: Sex) -> Pedigree {
        Pedigree::new(
            "fam",
            vec![
                person("child", "father", "mother", sex, Disease::Affected),
                person("father", "0", "0", Sex::Male, Disease::Unaffected),
                person("mother", "0", "0", Sex::Female, Disease::Unaffected),
            ],
        )
        .unwrap()
    }

    /// Trio plus an unaffected sibling, member order `[child, father, mother, sibling]`
    pub fn quartet() -> Pedigree {
        Pedigree::new(
            "fam",
            vec![
                person("child", "father", "mother", Sex::Male, Disease::Affected),
                person("father", "0", "0", Sex::Male, Disease::Unaffected),
                person("mother", "0", "0", Sex::Female, Disease::Unaffected),
                person("sibling", "father", "mother", Sex::Female, Disease::Unaffected),
            ],
        )
        .unwrap()
    }

    pub fn single(sex: Sex) -> Pedigree {
        Pedigree::new(
            "fam",
            vec![person("proband", "0", "0", sex, Disease::Affected)],
        )
        .unwrap()
    }

    pub fn list(pedigree: &Pedigree, is_x: bool, calls: Vec<Vec<Genotype>>) -> GenotypeList {
        let names = pedigree.names().iter().map(|n| n.to_string()).collect();
        GenotypeList::new("GENE1", names, is_x, calls).unwrap()
    }

    /// Every call list of length `1..=max_len` over `alphabet`, one genotype per call
    pub fn single_sample_lists(alphabet: &[Genotype], max_len: usize) -> Vec<Vec<Vec<Genotype>>> {
        let mut lists: Vec<Vec<Vec<Genotype>>> = vec![Vec::new()];
        let mut all = Vec::new();
        for _ in 0..max_len {
            lists = lists
                .iter()
                .flat_map(|calls| {
                    alphabet.iter().map(move |gt| {
                        let mut next = calls.clone();
                        next.push(vec![*gt]);
                        next
                    })
                })
                .collect();
            all.extend(lists.iter().cloned());
        }
        all
    }
}
