use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Storage {
    Memory,
    Mongo,
}

impl FromStr for Storage {
    type Err = ();

    fn from_str(s: &str) -> Result<Storage, ()> {
        match s {
            "memory" => Ok(Storage::Memory),
            "mongo" => Ok(Storage::Mongo),
            _ => Err(()),
        }
    }
}

/// Server configuration read from the environment.
///
/// | Env Var                    | Default                     |
/// |----------------------------|-----------------------------|
/// | `ASSIAH_BIND`              | `127.0.0.1:8080`            |
/// | `ASSIAH_STORAGE`           | `memory`                    |
/// | `ASSIAH_MONGO_URI`         | `mongodb://localhost:27017` |
/// | `ASSIAH_MONGO_DATABASE`    | `assiah`                    |
/// | `ASSIAH_SEED`              | `true`                      |
/// | `ASSIAH_NARRATOR_DELAY_MS` | `2000`                      |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub bind: String,
    pub storage: Storage,
    pub mongo_uri: String,
    pub mongo_database: String,
    pub seed: bool,
    pub narrator_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind = var("ASSIAH_BIND", "127.0.0.1:8080");
        let storage = parse("ASSIAH_STORAGE", var("ASSIAH_STORAGE", "memory"))?;
        let mongo_uri = var("ASSIAH_MONGO_URI", "mongodb://localhost:27017");
        let mongo_database = var("ASSIAH_MONGO_DATABASE", "assiah");
        let seed = parse("ASSIAH_SEED", var("ASSIAH_SEED", "true"))?;
        let narrator_delay_ms: u64 = parse(
            "ASSIAH_NARRATOR_DELAY_MS",
            var("ASSIAH_NARRATOR_DELAY_MS", "2000"),
        )?;

        Ok(Config {
            bind,
            storage,
            mongo_uri,
            mongo_database,
            seed,
            narrator_delay: Duration::from_millis(narrator_delay_ms),
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, Error> {
    value.trim().parse().map_err(|_| Error::InvalidConfig { key, value })
}
