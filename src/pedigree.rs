//! Pedigree model: an immutable arena of family members.
//!
//! A [`Pedigree`] owns its [`Person`]s in a `Vec`. Father and mother are indices
//! into that same `Vec`, resolved and validated once when the pedigree is built,
//! so a pedigree is plain data and can be shared across worker threads by reference.
//!
//! The member order is fixed at construction. Every [`GenotypeList`](crate::GenotypeList)
//! checked against a pedigree must list its genotypes in exactly this order.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::error::{CompatibilityError, Result};
use crate::types::{Disease, Sex};

/// Name used in PED files for a missing parent
pub const NO_PARENT: &str = "0";

/// Raw pedigree record, as read from one PED line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PedPerson {
    pub pedigree: String,
    pub name: String,
    pub father: String,
    pub mother: String,
    pub sex: Sex,
    pub disease: Disease,
    pub extra_fields: Vec<String>,
}

impl PedPerson {
    pub fn new(
        pedigree: impl Into<String>,
        name: impl Into<String>,
        father: impl Into<String>,
        mother: impl Into<String>,
        sex: Sex,
        disease: Disease,
    ) -> Self {
        Self {
            pedigree: pedigree.into(),
            name: name.into(),
            father: father.into(),
            mother: mother.into(),
            sex,
            disease,
            extra_fields: Vec::new(),
        }
    }

    pub fn is_founder(&self) -> bool {
        is_missing_parent(&self.father) && is_missing_parent(&self.mother)
    }
}

fn is_missing_parent(name: &str) -> bool {
    name.is_empty() || name == NO_PARENT
}

/// All records of a PED file, possibly covering several pedigrees
#[derive(Debug, Clone, Default, Serialize)]
pub struct PedFileContents {
    pub extra_column_headers: Vec<String>,
    pub individuals: Vec<PedPerson>,
}

impl PedFileContents {
    pub fn new(extra_column_headers: Vec<String>, individuals: Vec<PedPerson>) -> Self {
        Self {
            extra_column_headers,
            individuals,
        }
    }

    /// Distinct pedigree names in the order they first appear
    pub fn pedigree_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.individuals
            .iter()
            .filter(|p| seen.insert(p.pedigree.as_str()))
            .map(|p| p.pedigree.clone())
            .collect()
    }
}

/// One member of a [`Pedigree`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    name: String,
    sex: Sex,
    disease: Disease,
    father: Option<usize>,
    mother: Option<usize>,
    extra_fields: Vec<String>,
}

impl Person {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn disease(&self) -> Disease {
        self.disease
    }

    /// Index of the father within the owning pedigree
    pub fn father(&self) -> Option<usize> {
        self.father
    }

    /// Index of the mother within the owning pedigree
    pub fn mother(&self) -> Option<usize> {
        self.mother
    }

    pub fn extra_fields(&self) -> &[String] {
        &self.extra_fields
    }

    pub fn is_founder(&self) -> bool {
        self.father.is_none() && self.mother.is_none()
    }

    pub fn is_male(&self) -> bool {
        self.sex == Sex::Male
    }

    pub fn is_female(&self) -> bool {
        self.sex == Sex::Female
    }

    pub fn is_affected(&self) -> bool {
        self.disease == Disease::Affected
    }

    pub fn is_unaffected(&self) -> bool {
        self.disease == Disease::Unaffected
    }
}

/// Immutable family graph with stable member indices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pedigree {
    name: String,
    members: Vec<Person>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Pedigree {
    /// Build a pedigree from raw records, keeping their order.
    ///
    /// Fails when there are no records, when a name is used twice, when a
    /// father/mother name is not one of the records, or when the parent-of
    /// relation contains a cycle.
    pub fn new(name: impl Into<String>, records: Vec<PedPerson>) -> Result<Self> {
        let name = name.into();
        if records.is_empty() {
            return Err(CompatibilityError::EmptyPedigree { name });
        }

        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.name.clone(), i).is_some() {
                return Err(CompatibilityError::DuplicatePerson {
                    pedigree: name,
                    name: record.name.clone(),
                });
            }
        }

        let resolve = |person: &str, parent: &str| -> Result<Option<usize>> {
            if is_missing_parent(parent) {
                return Ok(None);
            }
            index
                .get(parent)
                .copied()
                .map(Some)
                .ok_or_else(|| CompatibilityError::UnknownParent {
                    pedigree: name.clone(),
                    person: person.to_string(),
                    parent: parent.to_string(),
                })
        };

        let mut members = Vec::with_capacity(records.len());
        for record in records {
            let father = resolve(&record.name, &record.father)?;
            let mother = resolve(&record.name, &record.mother)?;
            members.push(Person {
                name: record.name,
                sex: record.sex,
                disease: record.disease,
                father,
                mother,
                extra_fields: record.extra_fields,
            });
        }

        let pedigree = Self {
            name,
            members,
            index,
        };
        pedigree.check_acyclic()?;
        pedigree.warn_on_parent_sex();
        Ok(pedigree)
    }

    /// Build the pedigree called `name` out of a PED file.
    ///
    /// With `name == None` the file must describe exactly one pedigree.
    pub fn from_ped(contents: &PedFileContents, name: Option<&str>) -> Result<Self> {
        let name = match name {
            Some(name) => name.to_string(),
            None => {
                let names = contents.pedigree_names();
                match names.len() {
                    0 => {
                        return Err(CompatibilityError::EmptyPedigree {
                            name: String::new(),
                        })
                    }
                    1 => names[0].clone(),
                    _ => {
                        return Err(CompatibilityError::AmbiguousPedigree {
                            names: names.join(", "),
                        })
                    }
                }
            }
        };

        let records: Vec<PedPerson> = contents
            .individuals
            .iter()
            .filter(|p| p.pedigree == name)
            .cloned()
            .collect();
        if records.is_empty() {
            return Err(CompatibilityError::PedigreeNotFound { name });
        }
        Self::new(name, records)
    }

    /// One-member pedigree for single-sample analysis
    pub fn single_sample(name: impl Into<String>) -> Self {
        let name = name.into();
        let person = Person {
            name: name.clone(),
            sex: Sex::Unknown,
            disease: Disease::Affected,
            father: None,
            mother: None,
            extra_fields: Vec::new(),
        };
        Self {
            index: HashMap::from([(name.clone(), 0)]),
            name,
            members: vec![person],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Person] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member names in pedigree order
    pub fn names(&self) -> Vec<&str> {
        self.members.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&Person> {
        self.index_of(name).map(|i| &self.members[i])
    }

    pub fn father_of(&self, idx: usize) -> Option<&Person> {
        self.members
            .get(idx)
            .and_then(|p| p.father)
            .map(|f| &self.members[f])
    }

    pub fn mother_of(&self, idx: usize) -> Option<&Person> {
        self.members
            .get(idx)
            .and_then(|p| p.mother)
            .map(|m| &self.members[m])
    }

    /// Indices of everybody referenced as a father or mother, ascending
    pub fn parent_indices(&self) -> Vec<usize> {
        let mut parents: Vec<usize> = self
            .members
            .iter()
            .flat_map(|p| p.father.into_iter().chain(p.mother))
            .collect();
        parents.sort_unstable();
        parents.dedup();
        parents
    }

    /// Members sharing both parents with `idx`, excluding `idx` itself
    pub fn siblings_of(&self, idx: usize) -> Vec<usize> {
        let Some(person) = self.members.get(idx) else {
            return Vec::new();
        };
        let (Some(father), Some(mother)) = (person.father, person.mother) else {
            return Vec::new();
        };
        self.members
            .iter()
            .enumerate()
            .filter(|(i, p)| *i != idx && p.father == Some(father) && p.mother == Some(mother))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn affected(&self) -> Vec<usize> {
        self.indices_where(Person::is_affected)
    }

    pub fn unaffected(&self) -> Vec<usize> {
        self.indices_where(Person::is_unaffected)
    }

    /// Restrict the pedigree to the named members, keeping pedigree order.
    ///
    /// Names that are not members are ignored. Parent links pointing outside the
    /// subset are dropped, so such members become founders.
    pub fn subset<S: AsRef<str>>(&self, names: &[S]) -> Result<Pedigree> {
        let keep: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();
        let parent_name = |parent: Option<usize>| -> String {
            parent
                .map(|i| self.members[i].name.as_str())
                .filter(|n| keep.contains(n))
                .unwrap_or(NO_PARENT)
                .to_string()
        };

        let records = self
            .members
            .iter()
            .filter(|p| keep.contains(p.name.as_str()))
            .map(|p| PedPerson {
                pedigree: self.name.clone(),
                name: p.name.clone(),
                father: parent_name(p.father),
                mother: parent_name(p.mother),
                sex: p.sex,
                disease: p.disease,
                extra_fields: p.extra_fields.clone(),
            })
            .collect();
        Pedigree::new(self.name.clone(), records)
    }

    fn indices_where(&self, pred: impl Fn(&Person) -> bool) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, p)| pred(p))
            .map(|(i, _)| i)
            .collect()
    }

    // Kahn's algorithm over parent -> child edges
    fn check_acyclic(&self) -> Result<()> {
        let mut pending_parents: Vec<usize> = self
            .members
            .iter()
            .map(|p| p.father.iter().count() + p.mother.iter().count())
            .collect();
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); self.members.len()];
        for (i, person) in self.members.iter().enumerate() {
            for parent in person.father.into_iter().chain(person.mother) {
                children[parent].push(i);
            }
        }

        let mut ready: Vec<usize> = (0..self.members.len())
            .filter(|&i| pending_parents[i] == 0)
            .collect();
        let mut visited = 0;
        while let Some(i) = ready.pop() {
            visited += 1;
            for &child in &children[i] {
                pending_parents[child] -= 1;
                if pending_parents[child] == 0 {
                    ready.push(child);
                }
            }
        }

        if visited == self.members.len() {
            return Ok(());
        }
        let person = pending_parents
            .iter()
            .position(|&n| n > 0)
            .map(|i| self.members[i].name.clone())
            .unwrap_or_default();
        Err(CompatibilityError::CyclicPedigree {
            pedigree: self.name.clone(),
            person,
        })
    }

    fn warn_on_parent_sex(&self) {
        for person in &self.members {
            if let Some(father) = person.father.map(|f| &self.members[f]) {
                if father.is_female() {
                    warn!(
                        pedigree = %self.name,
                        "{} is listed as father of {} but is female",
                        father.name, person.name
                    );
                }
            }
            if let Some(mother) = person.mother.map(|m| &self.members[m]) {
                if mother.is_male() {
                    warn!(
                        pedigree = %self.name,
                        "{} is listed as mother of {} but is male",
                        mother.name, person.name
                    );
                }
            }
        }
    }
}
