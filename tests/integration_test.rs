use anyhow::Result;
use inheritance_compatibility::{
    check, GeneFilter, Genotype, GenotypeList, ModeOfInheritance, PedParser, Pedigree,
    ReportFormat, ReportWriter, VcfGenotypeReader,
};
use std::fs;
use tempfile::TempDir;

use inheritance_compatibility::Genotype::*;

const PED: &str = "\
fam\tchild\tfather\tmother\t1\t2
fam\tfather\t0\t0\t1\t1
fam\tmother\t0\t0\t2\t1
fam\tsister\tfather\tmother\t2\t1
";

// Sample columns deliberately not in pedigree order
const VCF: &str = "\
##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tsister\tmother\tfather\tchild
1\t1000\t.\tA\tT\t60\tPASS\tGENE=DOM\tGT\t0/0\t0/0\t0/0\t0/1
2\t2000\t.\tC\tG\t60\tPASS\tGENE=HOM\tGT\t0/1\t0/1\t0/1\t1/1
3\t3000\t.\tG\tA\t60\tPASS\tGENE=CHET\tGT\t0/0\t0/0\t0/1\t0/1
3\t3100\t.\tT\tC\t60\tPASS\tGENE=CHET\tGT\t0/0\t0/1\t0/0\t0/1
4\t4000\t.\tG\tA\t60\tPASS\tGENE=SIBCHET\tGT\t0/1\t0/0\t0/1\t0/1
4\t4100\t.\tT\tC\t60\tPASS\tGENE=SIBCHET\tGT\t0/1\t0/1\t0/0\t0/1
X\t5000\t.\tA\tG\t60\tPASS\tGENE=XREC\tGT\t0/0\t0/1\t0\t1
";

fn load(temp_dir: &TempDir) -> Result<(Pedigree, Vec<GenotypeList>)> {
    let ped_path = temp_dir.path().join("family.ped");
    let vcf_path = temp_dir.path().join("family.vcf");
    fs::write(&ped_path, PED)?;
    fs::write(&vcf_path, VCF)?;

    let contents = PedParser::new().parse(&ped_path)?;
    let pedigree = Pedigree::from_ped(&contents, None)?;
    let genes = VcfGenotypeReader::default().read(&vcf_path, &pedigree)?;
    Ok((pedigree, genes))
}

fn compatible(pedigree: &Pedigree, genes: &[GenotypeList], mode: ModeOfInheritance) -> Vec<String> {
    GeneFilter::new(pedigree, mode)
        .filter(genes)
        .compatible_genes()
        .map(String::from)
        .collect()
}

#[test]
fn test_end_to_end_filtering() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (pedigree, genes) = load(&temp_dir)?;
    assert_eq!(genes.len(), 5);

    assert_eq!(
        compatible(&pedigree, &genes, ModeOfInheritance::AutosomalDominant),
        vec!["DOM"]
    );
    assert_eq!(
        compatible(&pedigree, &genes, ModeOfInheritance::AutosomalRecessive),
        vec!["HOM", "CHET"]
    );
    assert_eq!(
        compatible(&pedigree, &genes, ModeOfInheritance::XRecessive),
        vec!["XREC"]
    );
    assert!(compatible(&pedigree, &genes, ModeOfInheritance::XDominant).is_empty());
    assert_eq!(
        compatible(&pedigree, &genes, ModeOfInheritance::Uninitialized).len(),
        genes.len()
    );
    Ok(())
}

#[test]
fn test_report_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (pedigree, genes) = load(&temp_dir)?;
    let report = GeneFilter::new(&pedigree, ModeOfInheritance::AutosomalRecessive).filter(&genes);

    let mut out = Vec::new();
    ReportWriter::new(ReportFormat::Tsv, true).write(&report, &mut out)?;
    let text = String::from_utf8(out)?;
    assert_eq!(
        text,
        "gene\tvariants\tstatus\treason\nHOM\t1\tcompatible\t\nCHET\t2\tcompatible\t\n"
    );
    Ok(())
}

fn trio() -> Result<Pedigree> {
    let contents = PedParser::new().parse_reader(
        "fam child father mother 1 2\nfam father 0 0 1 1\nfam mother 0 0 2 1\n".as_bytes(),
    )?;
    Ok(Pedigree::from_ped(&contents, None)?)
}

fn list(pedigree: &Pedigree, is_x: bool, calls: Vec<Vec<Genotype>>) -> Result<GenotypeList> {
    let names = pedigree.names().iter().map(|n| n.to_string()).collect();
    Ok(GenotypeList::new("GENE", names, is_x, calls)?)
}

#[test]
fn test_x_flag_false_fails_x_modes() -> Result<()> {
    let pedigree = trio()?;
    let calls = vec![
        vec![HomozygousAlt, HomozygousRef, Heterozygous],
        vec![Heterozygous, HomozygousRef, HomozygousRef],
    ];

    let on_x = list(&pedigree, true, calls.clone())?;
    let autosomal = list(&pedigree, false, calls)?;
    for mode in [ModeOfInheritance::XDominant, ModeOfInheritance::XRecessive] {
        assert!(check(&pedigree, &on_x, mode)?, "{mode}");
        assert!(!check(&pedigree, &autosomal, mode)?, "{mode}");
    }
    Ok(())
}

#[test]
fn test_pedigree_shared_across_threads() -> Result<()> {
    let pedigree = trio()?;
    let lists: Vec<GenotypeList> = (0..8)
        .map(|_| list(&pedigree, false, vec![vec![Heterozygous, HomozygousRef, HomozygousRef]]))
        .collect::<Result<_>>()?;

    std::thread::scope(|scope| {
        for list in &lists {
            let pedigree = &pedigree;
            scope.spawn(move || {
                assert!(check(pedigree, list, ModeOfInheritance::AutosomalDominant).unwrap());
            });
        }
    });
    Ok(())
}
