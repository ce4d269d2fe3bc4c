//! Trybuild fixture verifying `#[residue(crate = "...")]` works with a
//! dependency renamed via `use ... as`.

use json_residue as residue;
use residue::Record;

/// Verifies that `#[residue(crate = "residue")]` generates code that
/// references types through the aliased name rather than `json_residue`.
#[derive(Debug, Default, Record)]
#[residue(crate = "residue", rename_all = "camelCase")]
struct AliasedRecord {
    display_name: String,
    #[residue(nested)]
    owner: Owner,
}

#[derive(Debug, Default, Record)]
#[residue(crate = "residue")]
struct Owner {
    id: u64,
}

fn main() {
    let result = residue::unmarshal_with_diff::<AliasedRecord>(r#"{"displayName":"x"}"#);
    let _: residue::ResidueResult<(AliasedRecord, residue::Diff)> = result;
}
