use std::env;
use std::str::FromStr;
use tracing::log::warn;

pub struct Environment;

impl Environment {
    pub fn string(
        env_name: &str,
        default: &str,
    ) -> String {
        Self::optional_string(env_name).unwrap_or(default.to_string())
    }

    /// Blank values count as absent.
    pub fn optional_string(env_name: &str) -> Option<String> {
        env::var(env_name).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
    }

    pub fn u16(
        env_name: &str,
        default: u16,
    ) -> u16 {
        Self::parsed(env_name, default)
    }

    pub fn u32(
        env_name: &str,
        default: u32,
    ) -> u32 {
        Self::parsed(env_name, default)
    }

    pub fn u64(
        env_name: &str,
        default: u64,
    ) -> u64 {
        Self::parsed(env_name, default)
    }

    /// Comma separated list, e.g. `2,4`.
    pub fn u64_list(
        env_name: &str,
        default: &[u64],
    ) -> Vec<u64> {
        let Some(value) = Self::optional_string(env_name) else {
            return default.to_vec();
        };

        let parsed = value.split(',').map(|item| item.trim().parse::<u64>()).collect::<Result<Vec<u64>, _>>();

        match parsed {
            Ok(list) if !list.is_empty() => list,
            _ => {
                warn!("Invalid value for {env_name}: {value}. Using default {default:?}");
                default.to_vec()
            },
        }
    }

    fn parsed<T>(
        env_name: &str,
        default: T,
    ) -> T
    where
        T: FromStr + std::fmt::Debug,
    {
        match Self::optional_string(env_name) {
            None => default,
            Some(value) => value.parse::<T>().unwrap_or_else(|_| {
                warn!("Invalid value for {env_name}: {value}. Using default {default:?}");
                default
            }),
        }
    }
}
