//! Tests for descriptor planning and the generated `Record` impl.

use super::*;
use crate::derive::parse::parse_input;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

fn parse_ok(input: &DeriveInput) -> Result<ParsedInput> {
    parse_input(input).map_err(|err| anyhow!(err))
}

fn keys(parsed: &ParsedInput) -> Result<Vec<String>> {
    let specs = plan_fields(parsed).map_err(|err| anyhow!(err))?;
    Ok(specs.into_iter().map(|spec| spec.key).collect())
}

#[rstest]
fn external_key_prefers_explicit_rename() {
    let attrs = FieldAttrs {
        rename: Some("years".to_owned()),
        ..FieldAttrs::default()
    };
    assert_eq!(external_key("age", &attrs, Some(RenameRule::ScreamingSnake)), "years");
}

#[rstest]
#[case(None, "full_name")]
#[case(Some(RenameRule::Camel), "fullName")]
#[case(Some(RenameRule::Kebab), "full-name")]
fn external_key_applies_container_rule(
    #[case] rule: Option<RenameRule>,
    #[case] expected: &str,
) {
    assert_eq!(external_key("full_name", &FieldAttrs::default(), rule), expected);
}

#[rstest]
fn plans_follow_field_types() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Owner {
            name: String,
            tags: Vec<String>,
            nickname: Option<String>,
            #[residue(nested)]
            address: Address,
            #[residue(nested)]
            spouse: Option<Person>,
            #[residue(nested)]
            pets: Vec<Pet>,
        }
    };
    let parsed = parse_ok(&input)?;
    let specs = plan_fields(&parsed).map_err(|err| anyhow!(err))?;
    let address: syn::Type = parse_quote!(Address);
    let person: syn::Type = parse_quote!(Person);
    let pet: syn::Type = parse_quote!(Pet);
    let plans: Vec<_> = specs.iter().map(|spec| &spec.plan).collect();
    ensure!(
        plans
            == [
                &FieldPlan::Scalar,
                &FieldPlan::Scalar,
                &FieldPlan::Scalar,
                &FieldPlan::Nested(&address),
                &FieldPlan::OptionalNested(&person),
                &FieldPlan::Sequence(&pet),
            ],
        "unexpected plans {plans:?}"
    );
    Ok(())
}

#[rstest]
fn boxed_records_plan_the_inner_type() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Node {
            #[residue(nested)]
            next: Option<Box<Node>>,
            #[residue(nested)]
            parent: Box<Node>,
            #[residue(nested)]
            children: Vec<Box<Node>>,
        }
    };
    let parsed = parse_ok(&input)?;
    let specs = plan_fields(&parsed).map_err(|err| anyhow!(err))?;
    let node: syn::Type = parse_quote!(Node);
    let plans: Vec<_> = specs.iter().map(|spec| &spec.plan).collect();
    ensure!(
        plans
            == [
                &FieldPlan::OptionalNested(&node),
                &FieldPlan::Nested(&node),
                &FieldPlan::Sequence(&node),
            ],
        "unexpected plans {plans:?}"
    );
    Ok(())
}

#[rstest]
#[case::optional_sequence(parse_quote! {
    struct Demo {
        #[residue(nested)]
        pets: Option<Vec<Pet>>,
    }
})]
#[case::sequence_of_options(parse_quote! {
    struct Demo {
        #[residue(nested)]
        pets: Vec<Option<Pet>>,
    }
})]
#[case::nested_sequences(parse_quote! {
    struct Demo {
        #[residue(nested)]
        grid: Vec<Vec<Cell>>,
    }
})]
#[case::boxed_sequence(parse_quote! {
    struct Demo {
        #[residue(nested)]
        pets: Box<Vec<Pet>>,
    }
})]
#[case::double_option(parse_quote! {
    struct Demo {
        #[residue(nested)]
        spouse: Option<Option<Person>>,
    }
})]
fn unsupported_nested_shapes_are_rejected(#[case] input: DeriveInput) -> Result<()> {
    let parsed = parse_ok(&input)?;
    let Err(err) = plan_fields(&parsed) else {
        return Err(anyhow!("expected an unsupported shape error"));
    };
    ensure!(
        err.to_string().starts_with("`nested` expects a record"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
fn skipped_fields_are_left_out() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[serde(rename_all = "camelCase")]
        struct Person {
            full_name: String,
            #[serde(skip)]
            cache: Vec<u8>,
            #[residue(skip)]
            secret: String,
            r#type: String,
        }
    };
    let keys = keys(&parse_ok(&input)?)?;
    ensure!(keys == ["fullName", "type"], "unexpected keys {keys:?}");
    Ok(())
}

#[rstest]
fn raw_identifiers_keep_their_unraw_name() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Token {
            r#match: String,
        }
    };
    let parsed = parse_ok(&input)?;
    let specs = plan_fields(&parsed).map_err(|err| anyhow!(err))?;
    let spec = specs.first().ok_or_else(|| anyhow!("expected a field"))?;
    ensure!(spec.name == "match", "unexpected name {}", spec.name);
    ensure!(spec.key == "match", "unexpected key {}", spec.key);
    Ok(())
}

#[rstest]
#[case::explicit(parse_quote! {
    struct Demo {
        first: String,
        #[residue(rename = "first")]
        second: String,
    }
})]
#[case::rule_collision(parse_quote! {
    #[residue(rename_all = "lowercase")]
    struct Demo {
        #[residue(rename = "fullname")]
        alias: String,
        FullName: String,
    }
})]
fn duplicate_keys_are_rejected(#[case] input: DeriveInput) -> Result<()> {
    let parsed = parse_ok(&input)?;
    let Err(err) = plan_fields(&parsed) else {
        return Err(anyhow!("expected a duplicate key error"));
    };
    ensure!(
        err.to_string().contains("is already bound to field"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
fn record_impl_uses_default_crate_path() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Pet {
            name: String,
        }
    };
    let tokens = record_impl(&parse_ok(&input)?)
        .map_err(|err| anyhow!(err))?
        .to_string();
    ensure!(
        tokens.contains("impl json_residue :: Record for Pet"),
        "missing impl header: {tokens}"
    );
    ensure!(tokens.contains("name : \"Pet\""), "missing record name: {tokens}");
    ensure!(tokens.contains("key : \"name\""), "missing key: {tokens}");
    ensure!(
        tokens.contains("json_residue :: merge :: assign_scalar"),
        "missing scalar assignment: {tokens}"
    );
    Ok(())
}

#[rstest]
fn record_impl_honours_crate_alias_and_generics() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[residue(crate = "residue")]
        struct Envelope<T>
        where
            T: residue::Record,
        {
            #[residue(nested)]
            items: Vec<T>,
        }
    };
    let tokens = record_impl(&parse_ok(&input)?)
        .map_err(|err| anyhow!(err))?
        .to_string();
    ensure!(
        tokens.contains("impl < T > residue :: Record for Envelope < T > where T : residue :: Record"),
        "unexpected impl header: {tokens}"
    );
    ensure!(
        tokens.contains("residue :: FieldKind :: < Self > :: SequenceOfRecord"),
        "missing sequence kind: {tokens}"
    );
    ensure!(
        tokens.contains("residue :: Shape :: of :: < T >"),
        "missing element shape: {tokens}"
    );
    ensure!(!tokens.contains("json_residue"), "default path leaked: {tokens}");
    Ok(())
}

#[rstest]
fn optional_nested_uses_optional_merge() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Person {
            #[residue(nested)]
            spouse: Option<Person>,
        }
    };
    let tokens = record_impl(&parse_ok(&input)?)
        .map_err(|err| anyhow!(err))?
        .to_string();
    ensure!(
        tokens.contains("merge_optional_nested :: < Person , _ > (& mut record . spouse"),
        "missing optional merge: {tokens}"
    );
    ensure!(
        tokens.contains("Shape :: of :: < Person >"),
        "shape should name the inner record: {tokens}"
    );
    Ok(())
}
