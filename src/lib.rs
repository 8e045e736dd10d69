//! # Inheritance Compatibility
//!
//! Decides whether the genotype calls of a family are consistent with a Mendelian
//! mode of inheritance, to prune candidate disease genes in multi-sample sequencing
//! analyses.
//!
//! ## Features
//!
//! - Autosomal dominant, autosomal recessive (homozygous and compound heterozygous),
//!   X-linked dominant and X-linked recessive checkers
//! - Immutable, thread-shareable pedigree model built from PED files
//! - Per-gene genotype extraction from multi-sample VCF files
//! - Multi-threaded filtering of many genes with per-gene error isolation
//!
//! ## Example
//!
//! ```
//! use inheritance_compatibility::{check, Genotype, GenotypeList, ModeOfInheritance, Pedigree};
//!
//! let pedigree = Pedigree::single_sample("proband");
//! let list = GenotypeList::new(
//!     "GENE1",
//!     vec!["proband".to_string()],
//!     false,
//!     vec![vec![Genotype::Heterozygous]],
//! )
//! .unwrap();
//! assert!(check(&pedigree, &list, ModeOfInheritance::AutosomalDominant).unwrap());
//! ```

pub mod analysis;
pub mod checkers;
pub mod error;
pub mod genotype_list;
pub mod output;
pub mod parsers;
pub mod pedigree;
pub mod types;

// Re-export key types
pub use analysis::{FilterReport, GeneFilter, GeneVerdict, SkippedGene};
pub use checkers::{check, check_gene};
pub use error::{CompatibilityError, Result};
pub use genotype_list::GenotypeList;
pub use output::{ReportFormat, ReportWriter};
pub use parsers::{PedParser, VcfGenotypeReader};
pub use pedigree::{PedFileContents, PedPerson, Pedigree, Person};
pub use types::*;
