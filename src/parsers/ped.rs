use std::io::BufRead;
use std::path::Path;
use tracing::debug;

use crate::error::{CompatibilityError, Result};
use crate::parsers::open_file;
use crate::pedigree::{PedFileContents, PedPerson};
use crate::types::{Disease, Sex};

/// Number of mandatory PED columns
const PED_COLUMNS: usize = 6;

/// PED pedigree file parser.
///
/// Format: `FamilyID IndividualID PaternalID MaternalID Sex Phenotype [extra...]`,
/// whitespace separated. Comment lines start with `#`; a comment line with more
/// than six columns names the extra columns.
pub struct PedParser;

impl PedParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, path: &Path) -> Result<PedFileContents> {
        let reader = open_file(path)?;
        let contents = self.parse_reader(reader)?;
        debug!(
            path = %path.display(),
            individuals = contents.individuals.len(),
            "parsed PED file"
        );
        Ok(contents)
    }

    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<PedFileContents> {
        let mut contents = PedFileContents::default();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                continue;
            }
            if let Some(header) = trimmed.strip_prefix('#') {
                let parts: Vec<&str> = header.split_whitespace().collect();
                if contents.individuals.is_empty() && parts.len() > PED_COLUMNS {
                    contents.extra_column_headers =
                        parts[PED_COLUMNS..].iter().map(|s| s.to_string()).collect();
                }
                continue;
            }

            contents.individuals.push(self.parse_line(trimmed, line_no)?);
        }

        Ok(contents)
    }

    fn parse_line(&self, line: &str, line_no: usize) -> Result<PedPerson> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < PED_COLUMNS {
            return Err(CompatibilityError::ped(
                line_no,
                format!("expected at least {} columns, found {}", PED_COLUMNS, parts.len()),
            ));
        }

        let name = parts[1];
        let sex = Sex::from_ped_code(parts[4]).ok_or_else(|| CompatibilityError::InvalidSexCode {
            person: name.to_string(),
            code: parts[4].to_string(),
        })?;
        let disease =
            Disease::from_ped_code(parts[5]).ok_or_else(|| CompatibilityError::InvalidDiseaseCode {
                person: name.to_string(),
                code: parts[5].to_string(),
            })?;

        let mut person = PedPerson::new(parts[0], name, parts[2], parts[3], sex, disease);
        person.extra_fields = parts[PED_COLUMNS..].iter().map(|s| s.to_string()).collect();
        Ok(person)
    }
}

impl Default for PedParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedigree::Pedigree;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    const TRIO: &str = "\
#family\tname\tfather\tmother\tsex\tdisease\tethnicity
fam\tchild\tdad\tmum\t1\t2\tEUR
fam\tdad\t0\t0\t1\t1\tEUR

fam\tmum\t0\t0\t2\t1\tEUR
";

    #[test]
    fn test_parse_ped_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("trio.ped");
        let mut file = File::create(&path)?;
        write!(file, "{}", TRIO)?;

        let contents = PedParser::new().parse(&path)?;
        assert_eq!(contents.extra_column_headers, vec!["ethnicity"]);
        assert_eq!(contents.individuals.len(), 3);

        let child = &contents.individuals[0];
        assert_eq!(child.name, "child");
        assert_eq!(child.father, "dad");
        assert_eq!(child.sex, Sex::Male);
        assert_eq!(child.disease, Disease::Affected);
        assert_eq!(child.extra_fields, vec!["EUR"]);
        assert!(contents.individuals[1].is_founder());

        let pedigree = Pedigree::from_ped(&contents, None)?;
        assert_eq!(pedigree.names(), vec!["child", "dad", "mum"]);
        Ok(())
    }

    #[test]
    fn test_invalid_codes() {
        let parser = PedParser::new();
        let bad_sex = "fam child 0 0 M 2\n";
        assert!(matches!(
            parser.parse_reader(bad_sex.as_bytes()),
            Err(CompatibilityError::InvalidSexCode { .. })
        ));

        let bad_disease = "fam child 0 0 1 affected\n";
        assert!(matches!(
            parser.parse_reader(bad_disease.as_bytes()),
            Err(CompatibilityError::InvalidDiseaseCode { .. })
        ));

        let short = "fam child 0 0\n";
        assert!(matches!(
            parser.parse_reader(short.as_bytes()),
            Err(CompatibilityError::Ped { line: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_parent_fails_pedigree() -> Result<()> {
        let contents = PedParser::new().parse_reader("fam child dad 0 1 2\n".as_bytes())?;
        assert!(matches!(
            Pedigree::from_ped(&contents, Some("fam")),
            Err(CompatibilityError::UnknownParent { .. })
        ));
        Ok(())
    }
}
