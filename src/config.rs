//! Runtime configuration from environment variables
//!
//! | Variable                | Default   |
//! |-------------------------|-----------|
//! | `RELAY_HOST`            | `0.0.0.0` |
//! | `RELAY_PORT`            | `3001`    |
//! | `RELAY_SEND_QUEUE`      | `256`     |
//! | `RELAY_HEARTBEAT_SECS`  | `30`      |
//! | `RELAY_ALLOWED_TENANTS` | unset     |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::relay::{JoinPolicy, OpenJoin, TenantAllowList};
use crate::types::{RelayError, RelayResult, TenantId};

#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Outbound frames buffered per connection before it counts as failed
    pub send_queue: usize,
    /// WebSocket ping interval; `None` disables heartbeats
    pub heartbeat: Option<Duration>,
    /// When set, only these tenants' rooms may be joined
    pub allowed_tenants: Option<Vec<TenantId>>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            send_queue: 256,
            heartbeat: Some(Duration::from_secs(30)),
            allowed_tenants: None,
        }
    }
}

impl RelayConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> RelayResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> RelayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("RELAY_HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = parse_var(&lookup, "RELAY_PORT")? {
            config.port = port;
        }
        if let Some(send_queue) = parse_var::<usize, _>(&lookup, "RELAY_SEND_QUEUE")? {
            if send_queue == 0 {
                return Err(RelayError::Config(
                    "RELAY_SEND_QUEUE must be at least 1".to_string(),
                ));
            }
            config.send_queue = send_queue;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "RELAY_HEARTBEAT_SECS")? {
            config.heartbeat = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(list) = lookup("RELAY_ALLOWED_TENANTS") {
            let tenants = list
                .split(',')
                .filter(|t| !t.trim().is_empty())
                .map(TenantId::parse)
                .collect::<RelayResult<Vec<_>>>()
                .map_err(|e| RelayError::Config(format!("RELAY_ALLOWED_TENANTS: {}", e)))?;
            // blank list means no restriction, like a blank RELAY_HOST
            config.allowed_tenants = (!tenants.is_empty()).then_some(tenants);
        }

        Ok(config)
    }

    /// Address to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Join policy implied by this configuration
    pub fn join_policy(&self) -> Box<dyn JoinPolicy> {
        match &self.allowed_tenants {
            Some(tenants) => Box::new(TenantAllowList::new(tenants.iter().cloned())),
            None => Box::new(OpenJoin),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> RelayResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| RelayError::Config(format!("{}={:?}: {}", key, raw, e))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConnectionId, RoomKey};
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RelayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RelayConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:3001");
    }

    #[test]
    fn test_overrides() {
        let config = RelayConfig::from_lookup(lookup(&[
            ("RELAY_HOST", "127.0.0.1"),
            ("RELAY_PORT", "8080"),
            ("RELAY_SEND_QUEUE", "16"),
            ("RELAY_HEARTBEAT_SECS", "0"),
            ("RELAY_ALLOWED_TENANTS", "1, 2,,clinic_a"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.send_queue, 16);
        assert_eq!(config.heartbeat, None);
        assert_eq!(config.allowed_tenants.as_ref().map(Vec::len), Some(3));

        let policy = config.join_policy();
        let tenant = TenantId::parse("clinic_a").unwrap();
        assert!(policy.may_join(ConnectionId(1), &RoomKey::practice(&tenant)));
    }

    #[test]
    fn test_blank_allowed_tenants_is_unset() {
        for blank in ["", "  ", " , ,"] {
            let config =
                RelayConfig::from_lookup(lookup(&[("RELAY_ALLOWED_TENANTS", blank)])).unwrap();
            assert_eq!(config.allowed_tenants, None);

            let tenant = TenantId::parse("4").unwrap();
            let policy = config.join_policy();
            assert!(policy.may_join(ConnectionId(1), &RoomKey::practice(&tenant)));
        }
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            RelayConfig::from_lookup(lookup(&[("RELAY_PORT", "http")])),
            Err(RelayError::Config(_))
        ));
        assert!(matches!(
            RelayConfig::from_lookup(lookup(&[("RELAY_SEND_QUEUE", "0")])),
            Err(RelayError::Config(_))
        ));
        assert!(matches!(
            RelayConfig::from_lookup(lookup(&[("RELAY_ALLOWED_TENANTS", "a b")])),
            Err(RelayError::Config(_))
        ));
    }
}
