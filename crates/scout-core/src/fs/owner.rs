//! Owner names and session identity.

use std::collections::HashMap;

/// Maps numeric user ids to account names.
///
/// Built once at startup; unknown ids are shown numerically.
#[derive(Debug, Clone, Default)]
pub struct OwnerResolver {
    names: HashMap<u32, String>,
}

impl OwnerResolver {
    /// Reads the system user database.
    #[cfg(unix)]
    pub fn from_system() -> Self {
        let users = sysinfo::Users::new_with_refreshed_list();
        let names = users
            .list()
            .iter()
            .map(|user| (**user.id(), user.name().to_string()))
            .collect::<HashMap<_, _>>();
        tracing::debug!(count = names.len(), "loaded user names");
        Self { names }
    }

    #[cfg(not(unix))]
    pub fn from_system() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, String)>) -> Self {
        Self {
            names: pairs.into_iter().collect(),
        }
    }

    /// Returns the account name for `uid`, or the decimal id if unknown.
    pub fn name_for(&self, uid: u32) -> String {
        self.names
            .get(&uid)
            .cloned()
            .unwrap_or_else(|| uid.to_string())
    }
}

/// Returns `"user@host"` for the top bar.
pub fn session_identity() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .unwrap_or_else(|_| "?".to_string());
    let host = sysinfo::System::host_name().unwrap_or_else(|| "localhost".to_string());
    format!("{user}@{host}")
}
