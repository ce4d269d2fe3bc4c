use json_residue::Record;

/// Verifies that `#[residue(crate = "json_residue")]` is accepted and the
/// generated code compiles. Uses the real crate name as a self-referential
/// alias so no workspace reconfiguration is needed.
#[derive(Debug, Default, Record)]
#[residue(crate = "json_residue")]
struct CratePathRecord {
    value: String,
    count: u32,
}

fn main() {
    let result = CratePathRecord::from_json_with_diff(r#"{"value":"hello","count":1}"#);
    let _: json_residue::ResidueResult<(CratePathRecord, json_residue::Diff)> = result;
}
