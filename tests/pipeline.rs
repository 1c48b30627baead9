use camino::Utf8PathBuf;

use aadr_curator::config::{RegionException, ResolvedConfig, TRANSCONTINENTAL_NOTE};
use aadr_curator::domain::SampleRow;
use aadr_curator::export;
use aadr_curator::filter::RowCountCheck;
use aadr_curator::pipeline::Pipeline;

const COLUMNS: usize = 41;

fn anno_row(fields: &[(usize, &str)]) -> String {
    let mut cells = vec![".."; COLUMNS];
    for (index, value) in fields {
        cells[*index] = *value;
    }
    cells.join("\t")
}

fn write_file(dir: &std::path::Path, name: &str, content: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(dir.join(name)).unwrap();
    std::fs::write(path.as_std_path(), content).unwrap();
    path
}

/// 10 raw rows: 1 reference, 2 present-day, 7 historical. SiteC has no
/// coordinates anywhere; Atlantis is in no region table; "Unknown 1999" has
/// no DOI anywhere.
fn fixture_config(dir: &std::path::Path) -> ResolvedConfig {
    let header = (0..COLUMNS)
        .map(|index| format!("c{index}"))
        .collect::<Vec<_>>()
        .join("\t");
    let rows = [
        anno_row(&[(0, "Href.REF")]),
        anno_row(&[(0, "I0008"), (11, "present")]),
        anno_row(&[(0, "I0009"), (11, "present")]),
        anno_row(&[
            (0, "I0001"),
            (1, "MA0001"),
            (5, "Fu 2016"),
            (6, "doi:10.1/abc"),
            (11, "5000-4000 BP"),
            (14, "SiteA"),
            (15, "Germany"),
            (16, "1.0"),
            (17, "2.0"),
            (19, "AG,SG"),
        ]),
        anno_row(&[
            (0, "I0002"),
            (5, "Fu 2016"),
            (6, "10.1/abc"),
            (11, "5000-4000 BP"),
            (14, "SiteB"),
            (15, "Germany"),
            (19, "1240K"),
        ]),
        anno_row(&[
            (0, "I0003"),
            (5, "Fu 2016"),
            (6, "10.1/abc"),
            (11, "5000-4000 BP"),
            (14, "SiteC"),
            (15, "Germany"),
        ]),
        anno_row(&[
            (0, "I0004"),
            (5, "Fu 2016"),
            (6, "10.1/abc"),
            (11, "5000-4000 BP"),
            (14, "SiteA"),
            (15, "Russia"),
            (16, "55.0"),
            (17, "60.0"),
        ]),
        anno_row(&[
            (0, "I0005"),
            (5, "Fu 2016"),
            (6, "10.1/abc"),
            (11, "5000-4000 BP"),
            (14, "SiteA"),
            (15, "Czechoslovakia"),
            (16, "50.0"),
            (17, "14.0"),
        ]),
        anno_row(&[
            (0, "I0006"),
            (5, "Unknown 1999"),
            (11, "5000-4000 BP"),
            (14, "SiteA"),
            (15, "Atlantis"),
            (16, "0.0"),
            (17, "0.0"),
        ]),
        anno_row(&[
            (0, "I0007"),
            (5, "Santa 2020 (preprint)"),
            (11, "5000-4000 BP"),
            (14, "SiteA"),
            (15, "Germany"),
            (16, "40.0"),
            (17, "3.0"),
        ]),
    ];
    let annotation = write_file(
        dir,
        "anno.tsv",
        &format!("{header}\n{}\n", rows.join("\n")),
    );

    let coordinate_fixes = write_file(
        dir,
        "missing_lat_lon.csv",
        "locality,GISLat,GISLon,lat_lon_notes\nSiteB,10.5,20.5,coordinates approximate\n",
    );
    let countries = write_file(
        dir,
        "iso_country.csv",
        "name,alpha-2,region,sub-region\nGermany,DE,Europe,Western Europe\nRussia,RU,Europe,Eastern Europe\n",
    );
    let missing_regions = write_file(
        dir,
        "missing_region.csv",
        "name,edited_name,missing_region,missing_subregion,region_notes\nCzechia,Czechoslovakia,Europe,Central Europe,historical entity\n",
    );
    let siberia_list = write_file(dir, "siberia_list.csv", "genID\nI0004\n");
    let doi_fixes = write_file(
        dir,
        "missing_doi.csv",
        "publication_code,doi_link,doi_notes\nSanta 2020,10.5/xyz,recovered from preprint\n",
    );
    let manual_notes = write_file(
        dir,
        "manual_notes.csv",
        "genID,manual_notes\nI0007,checked by hand\n",
    );

    ResolvedConfig {
        schema_version: 1,
        annotation,
        output: Utf8PathBuf::from_path_buf(dir.join("cleaned.csv")).unwrap(),
        expected_rows: Some(10),
        coordinate_fixes: Some(coordinate_fixes),
        countries: Some(countries),
        missing_regions: Some(missing_regions),
        region_exceptions: vec![RegionException {
            list: siberia_list,
            region: "Asia".to_string(),
            sub_region: "Siberia".to_string(),
            note: TRANSCONTINENTAL_NOTE.to_string(),
        }],
        doi_fixes: Some(doi_fixes),
        manual_notes: Some(manual_notes),
    }
}

fn find<'a>(rows: &'a [SampleRow], gen_id: &str) -> &'a SampleRow {
    rows.iter().find(|row| row.gen_id == gen_id).unwrap()
}

#[test]
fn full_pipeline_end_to_end() {
    let temp = tempfile::tempdir().unwrap();
    let config = fixture_config(temp.path());
    let output_path = config.output.clone();

    let outcome = Pipeline::new(config).run().unwrap();

    assert_eq!(outcome.rows.len(), 7);
    assert_eq!(outcome.report.loaded_rows, 10);
    assert_eq!(outcome.report.refs_removed, 1);
    assert_eq!(outcome.report.presents_removed, 2);
    assert_eq!(
        outcome.report.row_count,
        RowCountCheck::Consistent { remaining: 7 }
    );
    assert_eq!(outcome.report.sequence_types, vec!["AG.SG", "1240K"]);

    // Exactly one locality has no coordinates anywhere.
    assert_eq!(outcome.report.missing_coordinates, vec!["SiteC"]);

    // Own coordinates win, the fallback fills gaps.
    assert_eq!(find(&outcome.rows, "I0001").gis_lat.as_deref(), Some("1.0"));
    assert_eq!(find(&outcome.rows, "I0002").gis_lat.as_deref(), Some("10.5"));
    assert_eq!(find(&outcome.rows, "I0002").gis_lon.as_deref(), Some("20.5"));
    assert_eq!(find(&outcome.rows, "I0003").gis_lat, None);

    // Generic region join, edited-name fixup, and the exception override.
    assert_eq!(
        find(&outcome.rows, "I0001").region.as_deref(),
        Some("Europe")
    );
    assert_eq!(
        find(&outcome.rows, "I0005").sub_region.as_deref(),
        Some("Central Europe")
    );
    let siberian = find(&outcome.rows, "I0004");
    assert_eq!(siberian.region.as_deref(), Some("Asia"));
    assert_eq!(siberian.sub_region.as_deref(), Some("Siberia"));
    assert_eq!(outcome.report.unresolved_regions.len(), 1);
    assert_eq!(outcome.report.unresolved_regions[0].gen_id, "I0006");

    // DOI links: own value normalized, fallback by publication code.
    assert_eq!(
        find(&outcome.rows, "I0001").doi_link.as_deref(),
        Some("https://doi.org/10.1/abc")
    );
    assert_eq!(
        find(&outcome.rows, "I0007").doi_link.as_deref(),
        Some("https://doi.org/10.5/xyz")
    );
    assert_eq!(
        outcome.report.missing_doi_publications,
        vec!["Unknown 1999"]
    );

    // Notes consolidation keeps only the populated sources.
    assert_eq!(
        find(&outcome.rows, "I0007").notes.as_deref(),
        Some("recovered from preprint, checked by hand")
    );
    assert_eq!(
        find(&outcome.rows, "I0002").notes.as_deref(),
        Some("coordinates approximate")
    );
    assert_eq!(
        find(&outcome.rows, "I0005").notes.as_deref(),
        Some("historical entity")
    );
    assert_eq!(
        find(&outcome.rows, "I0004").notes.as_deref(),
        Some(TRANSCONTINENTAL_NOTE)
    );

    export::write_csv(&output_path, &outcome.rows).unwrap();
    let exported = std::fs::read_to_string(output_path.as_std_path()).unwrap();
    let lines: Vec<&str> = exported.lines().collect();
    assert_eq!(lines.len(), 8);
    // Header row, no index column, stable order.
    assert_eq!(
        lines[0],
        "genID,masterID,groupID,publication,doi,ybp,yrange,locality,political_entity,\
         lat,lon,snpauto,molsex,yhaplo_term,yhaplo_isogg,mtDNA_covg,mtDNA_haplo,\
         dmgrate,libtype,asm,repository,sequence_type,GISLat,GISLon,region,sub-region,\
         doi_link,notes"
    );
    assert!(lines[1].starts_with("I0001,"));
}

#[test]
fn mismatched_expected_total_is_reported_not_fatal() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = fixture_config(temp.path());
    config.expected_rows = Some(11);

    let outcome = Pipeline::new(config).run().unwrap();
    assert_eq!(
        outcome.report.row_count,
        RowCountCheck::Mismatch {
            expected_remaining: 8,
            remaining: 7,
        }
    );
    assert_eq!(outcome.rows.len(), 7);
}

#[test]
fn runs_without_optional_tables() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = fixture_config(temp.path());
    config.expected_rows = None;
    config.coordinate_fixes = None;
    config.countries = None;
    config.missing_regions = None;
    config.region_exceptions = Vec::new();
    config.doi_fixes = None;
    config.manual_notes = None;

    let outcome = Pipeline::new(config).run().unwrap();
    assert_eq!(outcome.rows.len(), 7);
    assert_eq!(
        outcome.report.row_count,
        RowCountCheck::Unverified { remaining: 7 }
    );
    // No country table configured means no region report either.
    assert!(outcome.report.unresolved_regions.is_empty());
    // Own coordinates and DOIs still flow through.
    assert_eq!(find(&outcome.rows, "I0001").gis_lat.as_deref(), Some("1.0"));
    assert_eq!(
        find(&outcome.rows, "I0001").doi_link.as_deref(),
        Some("https://doi.org/10.1/abc")
    );
    assert_eq!(find(&outcome.rows, "I0002").gis_lat, None);
}
