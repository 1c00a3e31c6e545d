//! Tests for the generated `EnvConfig` implementation.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use super::*;
use crate::derive::parse::parse_input;

fn expand(input: &DeriveInput) -> Result<String> {
    let parsed = parse_input(input).map_err(|err| anyhow!(err))?;
    Ok(env_config_impl(&parsed).to_string())
}

fn attrs(tokens: &DeriveInput) -> Result<FieldAttrs> {
    let parsed = parse_input(tokens).map_err(|err| anyhow!(err))?;
    parsed
        .fields
        .into_iter()
        .next()
        .map(|field| field.attrs)
        .ok_or_else(|| anyhow!("missing field"))
}

#[rstest]
#[case::leaf(parse_quote! { struct S { #[env(key = "K")] pub f: u8 } }, SlotKind::Leaf)]
#[case::nested(parse_quote! { struct S { #[env(prefix = "P")] pub f: u8 } }, SlotKind::Nested)]
#[case::flatten(parse_quote! { struct S { #[env(flatten)] pub f: u8 } }, SlotKind::Nested)]
#[case::collector(
    parse_quote! { struct S { #[env(collect, prefix = "P")] pub f: u8 } },
    SlotKind::Collector
)]
#[case::collector_without_prefix(parse_quote! { struct S { #[env(collect)] pub f: u8 } }, SlotKind::Collector)]
#[case::key_and_prefix(parse_quote! { struct S { #[env(key = "K", prefix = "P")] pub f: u8 } }, SlotKind::Invalid)]
#[case::key_and_flatten(parse_quote! { struct S { #[env(key = "K", flatten)] pub f: u8 } }, SlotKind::Invalid)]
#[case::collect_and_flatten(parse_quote! { struct S { #[env(collect, flatten)] pub f: u8 } }, SlotKind::Invalid)]
#[case::bare(parse_quote! { struct S { pub f: u8 } }, SlotKind::Invalid)]
fn picks_slot_kind_from_directives(#[case] input: DeriveInput, #[case] expected: SlotKind) -> Result<()> {
    let kind = SlotKind::of(&attrs(&input)?);
    ensure!(kind == expected, "expected {expected:?}, got {kind:?}");
    Ok(())
}

#[rstest]
fn generates_one_visit_per_participating_field() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Config {
            #[env(key = "PORT", default = 8080)]
            pub port: u16,
            #[env(prefix = "DB")]
            pub db: Database,
            #[env(key = "-")]
            pub skipped: String,
            #[env(skip)]
            pub also_skipped: String,
            #[env(key = "HIDDEN")]
            hidden: String,
        }
    };
    let tokens = expand(&input)?;
    ensure!(tokens.matches("walker . visit").count() == 2, "{tokens}");
    ensure!(tokens.contains("name : \"port\""), "{tokens}");
    ensure!(
        tokens.contains(":: envfill :: Slot :: Leaf (& mut self . port)"),
        "{tokens}"
    );
    ensure!(
        tokens.contains(":: envfill :: Slot :: Nested (& mut self . db)"),
        "{tokens}"
    );
    ensure!(
        tokens.contains("default : :: core :: option :: Option :: Some (\"8080\")"),
        "{tokens}"
    );
    ensure!(!tokens.contains("hidden"), "private field must not participate");
    ensure!(!tokens.contains("skipped"), "skipped fields must not participate");
    Ok(())
}

#[rstest]
fn invalid_combinations_do_not_borrow_the_field() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Config {
            #[env(key = "K", prefix = "P")]
            pub both: Database,
        }
    };
    let tokens = expand(&input)?;
    ensure!(tokens.contains(":: envfill :: Slot :: Invalid"), "{tokens}");
    ensure!(!tokens.contains("self . both"), "{tokens}");
    Ok(())
}

#[rstest]
fn validate_and_crate_path_are_honoured() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[env(validate, crate = "my_env")]
        struct Checked<T: Default> where T: Clone {
            #[env(key = "V")]
            pub value: T,
        }
    };
    let tokens = expand(&input)?;
    ensure!(
        tokens.contains("impl < T : Default > my_env :: EnvConfig for Checked < T > where T : Clone"),
        "{tokens}"
    );
    ensure!(tokens.contains("walker . validate (\"Checked\" , & * self) ?"), "{tokens}");
    ensure!(!tokens.contains(":: envfill"), "{tokens}");
    Ok(())
}

#[rstest]
fn field_validation_follows_its_visit() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Config {
            #[env(key = "URL", validate)]
            pub url: Endpoint,
            #[env(key = "NAME")]
            pub name: String,
            #[env(key = "-", validate)]
            pub ignored: Endpoint,
        }
    };
    let tokens = expand(&input)?;
    let check = "walker . validate (\"url\" , & self . url) ?";
    ensure!(tokens.matches("walker . validate").count() == 1, "{tokens}");
    let visit_url = tokens.find("Leaf (& mut self . url)");
    let validate_url = tokens.find(check);
    let visit_name = tokens.find("Leaf (& mut self . name)");
    ensure!(
        matches!((visit_url, validate_url, visit_name), (Some(a), Some(b), Some(c)) if a < b && b < c),
        "{tokens}"
    );
    Ok(())
}

#[rstest]
fn empty_records_silence_unused_parameters() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Empty {
            private: u8,
        }
    };
    let tokens = expand(&input)?;
    ensure!(tokens.contains("let _ = (walker , prefix) ;"), "{tokens}");
    Ok(())
}

#[rstest]
fn raw_identifiers_are_reported_without_prefix() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Config {
            #[env(key = "TYPE")]
            pub r#type: String,
        }
    };
    let tokens = expand(&input)?;
    ensure!(tokens.contains("name : \"type\""), "{tokens}");
    ensure!(tokens.contains("& mut self . r#type"), "{tokens}");
    Ok(())
}
