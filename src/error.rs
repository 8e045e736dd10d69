//! Error types for pedigree construction, genotype extraction and compatibility checks.
//!
//! Everything here is a structural error: the input is malformed or inconsistent.
//! A well-formed gene that simply does not fit a mode of inheritance is a plain
//! `false` verdict, never an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompatibilityError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A pedigree with no members was handed to a checker or constructor
    #[error("pedigree {name:?} has no members")]
    EmptyPedigree { name: String },

    #[error("person {name:?} appears more than once in pedigree {pedigree:?}")]
    DuplicatePerson { pedigree: String, name: String },

    /// A father/mother reference that is neither `0` nor a member of the same pedigree
    #[error("parent {parent:?} of {person:?} is not a member of pedigree {pedigree:?}")]
    UnknownParent {
        pedigree: String,
        person: String,
        parent: String,
    },

    #[error("person {person:?} is their own ancestor in pedigree {pedigree:?}")]
    CyclicPedigree { pedigree: String, person: String },

    #[error("invalid sex code {code:?} for {person:?}")]
    InvalidSexCode { person: String, code: String },

    #[error("invalid disease code {code:?} for {person:?}")]
    InvalidDiseaseCode { person: String, code: String },

    /// Malformed PED line
    #[error("PED parse error at line {line}: {message}")]
    Ped { line: usize, message: String },

    #[error("pedigree {name:?} not found in PED file")]
    PedigreeNotFound { name: String },

    #[error("PED file contains several pedigrees ({names}), select one by name")]
    AmbiguousPedigree { names: String },

    #[error("no calls for gene {gene:?}")]
    EmptyCallList { gene: String },

    /// `check_gene` was given no call lists at all
    #[error("no call lists to check")]
    NoCallLists,

    #[error("call {index} of gene {gene:?} has {found} genotypes, expected {expected}")]
    CallLengthMismatch {
        gene: String,
        index: usize,
        expected: usize,
        found: usize,
    },

    /// Genotype columns are not in pedigree member order
    #[error("sample names of gene {gene:?} do not match pedigree member order")]
    MemberNameMismatch { gene: String },

    /// Affected members descend from more than one father (or mother)
    #[error("affected members have more than one {role}: {names}")]
    AmbiguousParents { role: &'static str, names: String },

    #[error("pedigree member {name:?} has no sample column in the VCF")]
    MissingSample { name: String },

    #[error("VCF error at line {line}: {message}")]
    Vcf { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, CompatibilityError>;

impl CompatibilityError {
    pub fn ped(line: usize, message: impl Into<String>) -> Self {
        Self::Ped {
            line,
            message: message.into(),
        }
    }

    pub fn vcf(line: usize, message: impl Into<String>) -> Self {
        Self::Vcf {
            line,
            message: message.into(),
        }
    }
}
