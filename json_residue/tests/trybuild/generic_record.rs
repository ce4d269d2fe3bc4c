//! Trybuild fixture verifying the derive on records with type parameters.

use json_residue::{Convertible, Record};

#[derive(Debug, Default, Record)]
struct Envelope<T, M>
where
    T: Record,
    M: Convertible + Default + 'static,
{
    #[residue(nested)]
    items: Vec<T>,
    #[residue(nested)]
    first: Option<T>,
    meta: M,
}

#[derive(Debug, Default, Record)]
struct Item {
    sku: String,
}

fn main() {
    let result = json_residue::unmarshal_with_diff::<Envelope<Item, Option<String>>>(
        r#"{"items":[{"sku":"a"}],"first":{"sku":"b"},"meta":null}"#,
    );
    let _: json_residue::ResidueResult<(Envelope<Item, Option<String>>, json_residue::Diff)> =
        result;
}
