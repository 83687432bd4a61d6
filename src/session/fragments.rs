//! XML fragments spliced into the master session templates.
//!
//! Output is byte-compatible with existing sessions, whitespace included.
//! Paths and names are inserted verbatim; no XML escaping is applied.

/// `<Resource>` entry for a data file
#[must_use]
pub fn resource(path: &str) -> String {
    format!("\n        <Resource path=\"{path}\"/>\n        ")
}

/// `<Panel>` wrapping pre-rendered tracks
#[must_use]
pub fn panel(height: u32, width: u32, name: &str, tracks: &str) -> String {
    format!(
        "\n        <Panel height=\"{height}\"  width=\"{width}\" name=\"{name}\">\n            {tracks}\n        </Panel>\n        "
    )
}

/// Coverage, splice junction, and alignment tracks for one BAM
#[must_use]
pub fn alignment_tracks(full_path: &str, name: &str) -> String {
    format!(
        concat!(
            "\n        <Track autoScale=\"true\" clazz=\"org.broad.igv.sam.CoverageTrack\" color=\"175,175,175\" ",
            "colorScale=\"ContinuousColorScale;0.0;927.0;255,255,255;175,175,175\" fontSize=\"10\" ",
            "id=\"{full}_coverage\" name=\"{name} Coverage\" snpThreshold=\"0.2\" visible=\"true\">",
            "\n            <DataRange baseline=\"0.0\" drawBaseline=\"true\" flipAxis=\"false\" maximum=\"1503.0\" minimum=\"0.0\" type=\"LINEAR\"/>",
            "\n        </Track>",
            "\n        <Track clazz=\"org.broad.igv.sam.SpliceJunctionTrack\" fontSize=\"10\" height=\"60\" ",
            "id=\"{full}_junctions\" name=\"{name} Junctions\" visible=\"false\"/>",
            "\n        <Track clazz=\"org.broad.igv.sam.AlignmentTrack\" displayMode=\"EXPANDED\" experimentType=\"OTHER\" ",
            "fontSize=\"10\" id=\"{full}\" name=\"{name}\" visible=\"true\">",
            "\n            <RenderOptions/>",
            "\n        </Track>  \n        ",
        ),
        full = full_path,
        name = name,
    )
}

/// `VariantTrack` for a VEP-annotated VCF
#[must_use]
pub fn variant_track(full_path: &str, name: &str) -> String {
    format!(
        concat!(
            "\n            <Track clazz=\"org.broad.igv.variant.VariantTrack\" color=\"0,0,178\" displayMode=\"EXPANDED\" ",
            "fontSize=\"10\" id=\"{full}\" name=\"{name}\" siteColorMode=\"ALLELE_FREQUENCY\" squishedHeight=\"1\" visible=\"true\"/>",
            "\n        ",
        ),
        full = full_path,
        name = name,
    )
}

/// `MutationTrack` for a `.mut` file
#[must_use]
pub fn mutation_track(full_path: &str, name: &str) -> String {
    format!(
        concat!(
            "\n                <Track clazz=\"org.broad.igv.track.MutationTrack\" color=\"0,0,178\" ",
            "colorScale=\"ContinuousColorScale;0.0;12.0;255,255,255;0,0,178\" fontSize=\"10\" height=\"15\" ",
            "id=\"{full}\" name=\"{name}\" visible=\"true\"/>",
            "\n        ",
        ),
        full = full_path,
        name = name,
    )
}

/// `FeatureTrack` for a `.gtf` file
#[must_use]
pub fn feature_track(full_path: &str, name: &str) -> String {
    format!(
        concat!(
            "\n            <Track clazz=\"org.broad.igv.track.FeatureTrack\" color=\"0,0,178\" fontSize=\"10\" ",
            "id=\"{full}\" name=\"{name}\" visible=\"true\"/>",
            "\n        ",
        ),
        full = full_path,
        name = name,
    )
}
