use serde::Serialize;

/// Pseudo-samples the AADR annotation carries for the reference genomes.
/// These are never real samples and are dropped unconditionally.
pub const REFERENCE_SAMPLES: [&str; 4] =
    ["Ancestor.REF", "Chimp.REF", "Gorilla.REF", "Href.REF"];

/// Year-range value marking a present-day (modern comparison) sample.
pub const PRESENT_DAY: &str = "present";

/// Missing-value sentinel used throughout the annotation file.
pub const MISSING_SENTINEL: &str = "..";

/// Maps an annotation cell to `None` when it is empty or the `".."` sentinel.
pub fn normalize_cell(value: &str) -> Option<String> {
    if value.is_empty() || value == MISSING_SENTINEL {
        None
    } else {
        Some(value.to_string())
    }
}

/// One annotation row in canonical column order. Field order is the export
/// column order; all values stay text (year fields included). The per-stage
/// note fields are working state and never reach the output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SampleRow {
    #[serde(rename = "genID")]
    pub gen_id: String,
    #[serde(rename = "masterID")]
    pub master_id: Option<String>,
    #[serde(rename = "groupID")]
    pub group_id: Option<String>,
    pub publication: Option<String>,
    pub doi: Option<String>,
    pub ybp: Option<String>,
    pub yrange: Option<String>,
    pub locality: Option<String>,
    pub political_entity: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub snpauto: Option<String>,
    pub molsex: Option<String>,
    pub yhaplo_term: Option<String>,
    pub yhaplo_isogg: Option<String>,
    #[serde(rename = "mtDNA_covg")]
    pub mtdna_covg: Option<String>,
    #[serde(rename = "mtDNA_haplo")]
    pub mtdna_haplo: Option<String>,
    pub dmgrate: Option<String>,
    pub libtype: Option<String>,
    pub asm: Option<String>,
    pub repository: Option<String>,
    pub sequence_type: Option<String>,
    #[serde(rename = "GISLat")]
    pub gis_lat: Option<String>,
    #[serde(rename = "GISLon")]
    pub gis_lon: Option<String>,
    pub region: Option<String>,
    #[serde(rename = "sub-region")]
    pub sub_region: Option<String>,
    pub doi_link: Option<String>,
    pub notes: Option<String>,

    #[serde(skip)]
    pub doi_notes: Option<String>,
    #[serde(skip)]
    pub lat_lon_notes: Option<String>,
    #[serde(skip)]
    pub region_notes: Option<String>,
    #[serde(skip)]
    pub manual_notes: Option<String>,
}

impl SampleRow {
    pub fn is_reference(&self) -> bool {
        REFERENCE_SAMPLES.contains(&self.gen_id.as_str())
    }

    pub fn is_present_day(&self) -> bool {
        self.yrange.as_deref() == Some(PRESENT_DAY)
    }
}
