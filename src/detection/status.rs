//! Installation-status snapshot.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Per-tool installed flags, in tool order.
///
/// Rebuilt from the live host on every detection pass; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallationStatus {
    entries: Vec<(String, bool)>,
}

impl InstallationStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tool's status, replacing any previous entry for it.
    pub fn insert(&mut self, name: &str, installed: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = installed;
        } else {
            self.entries.push((name.to_string(), installed));
        }
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, installed)| *installed)
    }

    /// True iff there are no `false` entries.
    pub fn all_installed(&self) -> bool {
        self.entries.iter().all(|(_, installed)| *installed)
    }

    /// Names of tools that are not installed, in order.
    pub fn missing(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, installed)| !installed)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, i)| (n.as_str(), *i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for InstallationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, installed) in &self.entries {
            map.serialize_entry(name, installed)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_installed_when_every_entry_true() {
        let mut status = InstallationStatus::new();
        status.insert("python", true);
        status.insert("git", true);
        assert!(status.all_installed());
        assert!(status.missing().is_empty());
    }

    #[test]
    fn one_false_entry_breaks_all_installed() {
        let mut status = InstallationStatus::new();
        status.insert("python", true);
        status.insert("conda", false);
        assert!(!status.all_installed());
        assert_eq!(status.missing(), vec!["conda"]);
    }

    #[test]
    fn insert_replaces_and_keeps_order() {
        let mut status = InstallationStatus::new();
        status.insert("node", false);
        status.insert("cmake", true);
        status.insert("node", true);

        assert_eq!(status.len(), 2);
        assert_eq!(status.get("node"), Some(true));
        let names: Vec<_> = status.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["node", "cmake"]);
    }

    #[test]
    fn unknown_tool_is_none() {
        assert_eq!(InstallationStatus::new().get("ruby"), None);
    }

    #[test]
    fn serializes_as_ordered_map() {
        let mut status = InstallationStatus::new();
        status.insert("python", true);
        status.insert("git", false);
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#"{"python":true,"git":false}"#);
    }
}
