use std::{net::SocketAddr, str::FromStr};

use anyhow::{anyhow, bail, Context};
use argon2::Params;

/// Reserved identity of the seeded administrator.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@daigyo.com";
/// Documented bootstrap password. Override with `ADMIN_PASSWORD` before first start.
pub const DEFAULT_ADMIN_PASSWORD: &str = "123456";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub session_inactivity: time::Duration,
    pub secure_cookie: bool,
    pub admin_email: String,
    pub admin_password: String,
    pub argon2: Params,
}

impl Config {
    /// Environment first, then `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port: u16 = parsed(&lookup, "PORT", 3000)?;
        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw.parse().with_context(|| format!("invalid BIND_ADDR {raw:?}"))?,
            None => SocketAddr::from(([0, 0, 0, 0], port)),
        };

        let memory_kib = parsed(&lookup, "ARGON2_MEMORY_KIB", Params::DEFAULT_M_COST)?;
        let iterations = parsed(&lookup, "ARGON2_ITERATIONS", Params::DEFAULT_T_COST)?;
        let argon2 = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|err| anyhow!("invalid argon2 parameters: {err}"))?;

        let session_minutes: i64 = parsed(&lookup, "SESSION_INACTIVITY_MINUTES", 60)?;
        if session_minutes <= 0 {
            bail!("invalid SESSION_INACTIVITY_MINUTES {session_minutes:?}: must be at least 1");
        }

        Ok(Config {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://daigyo.db?mode=rwc".to_owned()),
            db_max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", 16)?,
            bind_addr,
            session_inactivity: time::Duration::minutes(session_minutes),
            secure_cookie: parsed(&lookup, "SESSION_SECURE_COOKIE", false)?,
            admin_email: lookup("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_owned()),
            admin_password: lookup("ADMIN_PASSWORD").unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_owned()),
            argon2,
        })
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().with_context(|| format!("invalid {key} {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.admin_email, DEFAULT_ADMIN_EMAIL);
        assert_eq!(config.session_inactivity, time::Duration::minutes(60));
        assert!(!config.secure_cookie);
        assert_eq!(config.argon2.m_cost(), Params::DEFAULT_M_COST);
    }

    #[test]
    fn port_and_bind_addr() {
        assert_eq!(config(&[("PORT", "8080")]).unwrap().bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(
            config(&[("PORT", "8080"), ("BIND_ADDR", "127.0.0.1:9000")]).unwrap().bind_addr,
            "127.0.0.1:9000".parse().unwrap()
        );
    }

    #[test]
    fn malformed_values_name_the_variable() {
        let err = config(&[("SESSION_SECURE_COOKIE", "yes please")]).err().unwrap();
        assert!(err.to_string().contains("SESSION_SECURE_COOKIE"));

        let err = config(&[("DB_MAX_CONNECTIONS", "-1")]).err().unwrap();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));

        for minutes in ["0", "-5"] {
            let err = config(&[("SESSION_INACTIVITY_MINUTES", minutes)]).err().unwrap();
            assert!(err.to_string().contains("invalid SESSION_INACTIVITY_MINUTES"));
        }
    }
}
