//! Leaf population: precedence of found values, defaults and required
//! fields, plus round-trips for every primitive kind.

mod common;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow, ensure};
use camino::Utf8PathBuf;
use envfill::{ConvertError, EnvConfig, EnvError, RawBytes, read_with};
use rstest::rstest;
use test_helpers::RecordingLookup;

use common::source;

#[derive(Debug, Default, EnvConfig)]
struct Primitives {
    #[env(key = "TEXT")]
    pub text: String,
    #[env(key = "FLAG")]
    pub flag: bool,
    #[env(key = "I8")]
    pub tiny: i8,
    #[env(key = "I64")]
    pub wide: i64,
    #[env(key = "U32")]
    pub unsigned: u32,
    #[env(key = "USIZE")]
    pub count: usize,
    #[env(key = "F32")]
    pub ratio: f32,
    #[env(key = "F64")]
    pub scale: f64,
    #[env(key = "WAIT")]
    pub wait: Duration,
    #[env(key = "PATH")]
    pub path: PathBuf,
    #[env(key = "UTF8_PATH")]
    pub utf8_path: Utf8PathBuf,
    #[env(key = "BYTES")]
    pub bytes: RawBytes,
}

#[rstest]
fn primitives_round_trip() -> Result<()> {
    let config = Primitives::from_lookup(source(&[
        ("TEXT", "hello, world"),
        ("FLAG", "True"),
        ("I8", "-128"),
        ("I64", "9223372036854775807"),
        ("U32", "4294967295"),
        ("USIZE", "7"),
        ("F32", "1.5"),
        ("F64", "-2.25"),
        ("WAIT", "1m30s"),
        ("PATH", "/etc/app"),
        ("UTF8_PATH", "conf/app.toml"),
        ("BYTES", "a,b"),
    ]))?;
    ensure!(config.text == "hello, world");
    ensure!(config.flag);
    ensure!(config.tiny == i8::MIN);
    ensure!(config.wide == i64::MAX);
    ensure!(config.unsigned == u32::MAX);
    ensure!(config.count == 7);
    ensure!(config.ratio.to_bits() == 1.5_f32.to_bits());
    ensure!(config.scale.to_bits() == (-2.25_f64).to_bits());
    ensure!(config.wait == Duration::from_secs(90));
    ensure!(config.path == PathBuf::from("/etc/app"));
    ensure!(config.utf8_path == Utf8PathBuf::from("conf/app.toml"));
    ensure!(&*config.bytes == b"a,b");
    Ok(())
}

#[rstest]
#[case("I8", "128")]
#[case("U32", "-1")]
#[case("U32", "4294967296")]
fn integers_overflow_per_width(#[case] key: &str, #[case] raw: &str) -> Result<()> {
    let err = Primitives::from_lookup(source(&[(key, raw)]))
        .err()
        .ok_or_else(|| anyhow!("{key}={raw} should overflow"))?;
    ensure!(
        matches!(err, EnvError::Convert { source: ConvertError::Int { .. }, .. }),
        "{err}"
    );
    Ok(())
}

#[derive(Debug, Default, EnvConfig)]
struct Server {
    #[env(key = "PORT", default = 8080)]
    pub port: u16,
    #[env(key = "HOST", default = "0.0.0.0")]
    pub host: String,
    #[env(key = "TOKEN", required)]
    pub token: Option<String>,
    #[env(key = "WORKERS")]
    pub workers: u8,
}

#[rstest]
fn not_found_uses_default() -> Result<()> {
    let config = Server::from_lookup(source(&[("TOKEN", "t")]))?;
    ensure!(config.port == 8080);
    ensure!(config.host == "0.0.0.0");
    ensure!(config.workers == 0, "unset field without default keeps its zero value");
    Ok(())
}

#[rstest]
fn found_empty_suppresses_default_and_required() -> Result<()> {
    let config = Server::from_lookup(source(&[("HOST", ""), ("TOKEN", "")]))?;
    ensure!(config.host.is_empty(), "found empty value replaced by default");
    ensure!(config.token.as_deref() == Some(""));
    Ok(())
}

#[rstest]
fn missing_required_field_fails() -> Result<()> {
    let err = Server::from_lookup(source(&[]))
        .err()
        .ok_or_else(|| anyhow!("TOKEN is required"))?;
    ensure!(
        matches!(&err, EnvError::Required { field, key } if field == "token" && key == "TOKEN"),
        "{err}"
    );
    Ok(())
}

#[rstest]
fn invalid_port_names_the_field() -> Result<()> {
    let mut config = Server::default();
    let err = read_with(&mut config, source(&[("PORT", "notanumber"), ("TOKEN", "t")]))
        .err()
        .ok_or_else(|| anyhow!("notanumber is not a port"))?;
    ensure!(err.field() == Some("port"));
    ensure!(err.to_string().contains("invalid integer"), "{err}");
    Ok(())
}

#[derive(Debug, Default, EnvConfig)]
struct Skipping {
    #[env(key = "-")]
    pub secret: String,
    #[env(skip)]
    pub cached: String,
    #[env(key = "NAME")]
    pub name: String,
    internal: String,
}

#[rstest]
fn skipped_and_private_fields_are_never_queried() -> Result<()> {
    let lookup = RecordingLookup::new([
        ("-", "x"),
        ("SECRET", "x"),
        ("CACHED", "x"),
        ("NAME", "svc"),
        ("INTERNAL", "x"),
    ]);
    let mut config = Skipping::default();
    read_with(&mut config, |key: &str| lookup.get(key))?;
    ensure!(config.name == "svc");
    ensure!(config.secret.is_empty() && config.cached.is_empty() && config.internal.is_empty());
    ensure!(lookup.queried() == ["NAME"], "queried {:?}", lookup.queried());
    Ok(())
}

#[rstest]
fn fields_are_visited_in_declaration_order() -> Result<()> {
    let lookup = RecordingLookup::new([("TOKEN", "t")]);
    let mut config = Server::default();
    read_with(&mut config, |key: &str| lookup.get(key))?;
    ensure!(
        lookup.queried() == ["PORT", "HOST", "TOKEN", "WORKERS"],
        "queried {:?}",
        lookup.queried()
    );
    Ok(())
}

#[rstest]
fn first_error_aborts_the_walk() -> Result<()> {
    let lookup = RecordingLookup::new([("PORT", "x"), ("HOST", "h")]);
    let mut config = Server::default();
    ensure!(read_with(&mut config, |key: &str| lookup.get(key)).is_err());
    ensure!(lookup.queried() == ["PORT"], "queried {:?}", lookup.queried());
    ensure!(config.host.is_empty(), "later fields are untouched");
    Ok(())
}
