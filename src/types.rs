use serde::{Deserialize, Serialize};
use std::fmt;

/// Sex of a pedigree member, PED codes `0/1/2`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Sex {
    #[default]
    Unknown,
    Male,
    Female,
}

impl Sex {
    pub fn from_ped_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Sex::Unknown),
            "1" => Some(Sex::Male),
            "2" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Disease status of a pedigree member, PED codes `0/1/2` (`-9` is PLINK's missing value)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Disease {
    #[default]
    Unknown,
    Unaffected,
    Affected,
}

impl Disease {
    pub fn from_ped_code(code: &str) -> Option<Self> {
        match code {
            "0" | "-9" => Some(Disease::Unknown),
            "1" => Some(Disease::Unaffected),
            "2" => Some(Disease::Affected),
            _ => None,
        }
    }
}

/// Zygosity of one individual at one locus
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Genotype {
    HomozygousRef, // 0/0
    HomozygousAlt, // 1/1, or haploid 1
    Heterozygous,  // 0/1, 1/2
    NotObserved,   // ./. or missing
}

impl Genotype {
    /// Decode a VCF `GT` value. Any missing allele makes the whole call unobserved.
    pub fn from_gt(gt: &str) -> Self {
        match gt {
            "0/0" | "0|0" | "0" => Genotype::HomozygousRef,
            "1/1" | "1|1" | "1" => Genotype::HomozygousAlt,
            "0/1" | "0|1" | "1/0" | "1|0" => Genotype::Heterozygous,
            "./." | ".|." | "." | "" => Genotype::NotObserved,
            _ => {
                // Handle other cases like 0/2, 2/2, 1/2, polyploid
                let alleles: Vec<&str> = gt.split(&['/', '|'][..]).collect();
                if alleles.iter().any(|a| *a == "." || a.is_empty()) {
                    return Genotype::NotObserved;
                }
                if alleles.iter().all(|a| *a == "0") {
                    Genotype::HomozygousRef
                } else if alleles.windows(2).all(|w| w[0] == w[1]) {
                    Genotype::HomozygousAlt
                } else {
                    Genotype::Heterozygous
                }
            }
        }
    }

    pub fn is_heterozygous(&self) -> bool {
        matches!(self, Genotype::Heterozygous)
    }

    pub fn is_homozygous(&self) -> bool {
        matches!(self, Genotype::HomozygousRef | Genotype::HomozygousAlt)
    }

    pub fn is_not_observed(&self) -> bool {
        matches!(self, Genotype::NotObserved)
    }

    /// Carries at least one alternate allele
    pub fn has_alt(&self) -> bool {
        matches!(self, Genotype::Heterozygous | Genotype::HomozygousAlt)
    }
}

/// Mendelian mode of inheritance a gene is tested against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ModeOfInheritance {
    AutosomalDominant,
    AutosomalRecessive,
    XDominant,
    XRecessive,
    /// No filtering, every gene passes
    Uninitialized,
}

impl ModeOfInheritance {
    pub fn all() -> [ModeOfInheritance; 5] {
        [
            ModeOfInheritance::AutosomalDominant,
            ModeOfInheritance::AutosomalRecessive,
            ModeOfInheritance::XDominant,
            ModeOfInheritance::XRecessive,
            ModeOfInheritance::Uninitialized,
        ]
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModeOfInheritance::AutosomalDominant => {
                "Heterozygous in all affected, absent from all unaffected"
            }
            ModeOfInheritance::AutosomalRecessive => {
                "Homozygous alternate, or compound heterozygous with one allele from each parent"
            }
            ModeOfInheritance::XDominant => "X-linked, carried by affected males and females",
            ModeOfInheritance::XRecessive => {
                "X-linked, hemizygous in affected males, carried by unaffected mothers"
            }
            ModeOfInheritance::Uninitialized => "No inheritance filtering",
        }
    }
}

impl fmt::Display for ModeOfInheritance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModeOfInheritance::AutosomalDominant => "autosomal-dominant",
            ModeOfInheritance::AutosomalRecessive => "autosomal-recessive",
            ModeOfInheritance::XDominant => "x-dominant",
            ModeOfInheritance::XRecessive => "x-recessive",
            ModeOfInheritance::Uninitialized => "uninitialized",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genotype_from_gt() {
        assert_eq!(Genotype::from_gt("0/0"), Genotype::HomozygousRef);
        assert_eq!(Genotype::from_gt("0|1"), Genotype::Heterozygous);
        assert_eq!(Genotype::from_gt("1/2"), Genotype::Heterozygous);
        assert_eq!(Genotype::from_gt("2/2"), Genotype::HomozygousAlt);
        assert_eq!(Genotype::from_gt("1"), Genotype::HomozygousAlt);
        assert_eq!(Genotype::from_gt("./."), Genotype::NotObserved);
        assert_eq!(Genotype::from_gt("./1"), Genotype::NotObserved);
        assert_eq!(Genotype::from_gt(""), Genotype::NotObserved);
    }

    #[test]
    fn test_ped_codes() {
        assert_eq!(Sex::from_ped_code("1"), Some(Sex::Male));
        assert_eq!(Sex::from_ped_code("2"), Some(Sex::Female));
        assert_eq!(Sex::from_ped_code("M"), None);
        assert_eq!(Disease::from_ped_code("-9"), Some(Disease::Unknown));
        assert_eq!(Disease::from_ped_code("2"), Some(Disease::Affected));
        assert_eq!(Disease::from_ped_code("3"), None);
    }
}
