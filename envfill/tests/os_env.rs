//! Population from the process environment.

use std::collections::HashMap;

use anyhow::{Result, anyhow, ensure};
use envfill::{EnvConfig, EnvError, Fallback, IgnoreEmpty, OsEnv, read};
use rstest::rstest;
use serial_test::serial;
use test_helpers::env;

#[derive(Debug, Default, EnvConfig)]
struct Database {
    #[env(key = "HOST", default = "localhost")]
    pub host: String,
    #[env(key = "PORT", default = 5432)]
    pub port: u16,
}

#[derive(Debug, Default, EnvConfig)]
struct Config {
    #[env(prefix = "ENVFILL_IT_DB")]
    pub db: Database,
    #[env(key = "ENVFILL_IT_DEBUG")]
    pub debug: bool,
}

#[rstest]
#[serial]
fn from_env_reads_prefixed_variables() -> Result<()> {
    let _scope = env::scope([
        ("ENVFILL_IT_DB_HOST", Some("db.internal")),
        ("ENVFILL_IT_DB_PORT", None),
        ("ENVFILL_IT_DEBUG", Some("t")),
    ]);
    let config = Config::from_env()?;
    ensure!(config.db.host == "db.internal");
    ensure!(config.db.port == 5432);
    ensure!(config.debug);
    Ok(())
}

#[rstest]
#[serial]
fn read_updates_an_existing_record() -> Result<()> {
    let _scope = env::scope([
        ("ENVFILL_IT_DB_HOST", None),
        ("ENVFILL_IT_DB_PORT", Some("6543")),
        ("ENVFILL_IT_DEBUG", None),
    ]);
    let mut config = Config {
        debug: true,
        ..Config::default()
    };
    read(&mut config)?;
    ensure!(config.db.host == "localhost");
    ensure!(config.db.port == 6543);
    ensure!(config.debug, "unset leaf keeps its value");
    Ok(())
}

#[rstest]
#[serial]
fn empty_variable_is_a_value() -> Result<()> {
    let _scope = env::scope([
        ("ENVFILL_IT_DB_HOST", Some("")),
        ("ENVFILL_IT_DB_PORT", Some("")),
        ("ENVFILL_IT_DEBUG", None),
    ]);
    let err = Config::from_env()
        .err()
        .ok_or_else(|| anyhow!("empty port can't convert"))?;
    ensure!(
        matches!(&err, EnvError::Convert { key, .. } if key == "ENVFILL_IT_DB_PORT"),
        "{err}"
    );

    let config = Config::from_lookup(IgnoreEmpty(OsEnv))?;
    ensure!(config.db.host == "localhost" && config.db.port == 5432);
    Ok(())
}

#[rstest]
#[serial]
fn process_environment_overrides_file_values() -> Result<()> {
    let _scope = env::scope([
        ("ENVFILL_IT_DB_HOST", Some("from-env")),
        ("ENVFILL_IT_DB_PORT", None),
        ("ENVFILL_IT_DEBUG", None),
    ]);
    let file = HashMap::from([
        ("ENVFILL_IT_DB_HOST".to_owned(), "from-file".to_owned()),
        ("ENVFILL_IT_DB_PORT".to_owned(), "7000".to_owned()),
    ]);
    let config = Config::from_lookup(Fallback::new(OsEnv, file))?;
    ensure!(config.db.host == "from-env");
    ensure!(config.db.port == 7000);
    Ok(())
}
