//! Address roles.
//!
//! An address is a proxy iff it is listed among the snapshot's proxies;
//! everything else, including the unresolved sentinel, is a server.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::topology::TopologySnapshot;

/// Tier an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Proxy,
    Server,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Proxy => f.write_str("proxy"),
            Role::Server => f.write_str("server"),
        }
    }
}

/// Proxy membership set, built once per run.
#[derive(Debug, Clone, Default)]
pub struct RoleMap {
    proxies: HashSet<String>,
}

impl RoleMap {
    pub fn from_snapshot(snapshot: &TopologySnapshot) -> Self {
        Self::from_proxies(snapshot.proxies.iter().map(|p| p.address.as_str()))
    }

    pub fn from_proxies<'a>(proxies: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            proxies: proxies.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn role_of(&self, address: &str) -> Role {
        if self.proxies.contains(address) {
            Role::Proxy
        } else {
            Role::Server
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Proxy, UNRESOLVED_SERVER};

    #[test]
    fn test_roles_derive_from_proxy_list() {
        let snapshot = TopologySnapshot {
            proxies: vec![Proxy::new("10.0.0.1:19000")],
            ..TopologySnapshot::default()
        };
        let roles = RoleMap::from_snapshot(&snapshot);

        assert_eq!(roles.role_of("10.0.0.1:19000"), Role::Proxy);
        assert_eq!(roles.role_of("10.0.0.1:6379"), Role::Server);
        assert_eq!(roles.role_of(UNRESOLVED_SERVER), Role::Server);
    }
}
