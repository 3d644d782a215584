use crate::shared::error::AnalysisError;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const DEFAULT_PROJECT_NAME: &str = "Unknown Project";
const DEFAULT_PROJECT_VERSION: &str = "0.0.0";

/// The manifest section a dependency was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    Production,
    Development,
    Peer,
}

impl DependencyType {
    /// The package.json key this type is read from
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyType::Production => "dependencies",
            DependencyType::Development => "devDependencies",
            DependencyType::Peer => "peerDependencies",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyType::Production => write!(f, "production"),
            DependencyType::Development => write!(f, "development"),
            DependencyType::Peer => write!(f, "peer"),
        }
    }
}

/// Insertion-ordered `name -> version range` map.
///
/// Document order is preserved. A repeated key keeps its first position and
/// takes the last value, which is how JSON objects behave in npm tooling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap(Vec<(String, String)>);

impl DependencyMap {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts or overwrites `name`; an overwrite keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, range: impl Into<String>) {
        let name = name.into();
        let range = range.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = range,
            None => self.0.push((name, range)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, range)| range.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, r)| (n.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies every entry of `other` on top of this map.
    pub fn merge_from(&mut self, other: &DependencyMap) {
        for (name, range) in other.iter() {
            self.insert(name, range);
        }
    }
}

impl<N: Into<String>, R: Into<String>> FromIterator<(N, R)> for DependencyMap {
    fn from_iter<I: IntoIterator<Item = (N, R)>>(iter: I) -> Self {
        let mut map = DependencyMap::new();
        for (name, range) in iter {
            map.insert(name, range);
        }
        map
    }
}

impl Serialize for DependencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, range) in &self.0 {
            map.serialize_entry(name, range)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DependencyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DependencyMapVisitor;

        impl<'de> Visitor<'de> for DependencyMapVisitor {
            type Value = DependencyMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping package names to version ranges")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = DependencyMap::new();
                while let Some((name, range)) = access.next_entry::<String, String>()? {
                    map.insert(name, range);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(DependencyMapVisitor)
    }
}

/// Project descriptor submitted for analysis (package.json).
///
/// Unknown top-level keys such as `scripts` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<DependencyMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_dependencies: Option<DependencyMap>,
}

impl Manifest {
    /// Parses raw manifest text.
    ///
    /// # Errors
    /// `InvalidManifestSyntax` when the text is not JSON or does not have the
    /// shape of a package.json (e.g. a non-object root or a non-string range).
    pub fn parse(text: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(text).map_err(|e| AnalysisError::InvalidManifestSyntax {
            details: e.to_string(),
        })
    }

    /// The dependency map declared for `dependency_type`, if any.
    pub fn dependencies_of(&self, dependency_type: DependencyType) -> Option<&DependencyMap> {
        match dependency_type {
            DependencyType::Production => self.dependencies.as_ref(),
            DependencyType::Development => self.dev_dependencies.as_ref(),
            DependencyType::Peer => self.peer_dependencies.as_ref(),
        }
    }

    /// All three maps merged production, then development, then peer.
    /// A name declared in more than one map takes the later range.
    pub fn merged_dependencies(&self) -> DependencyMap {
        let mut merged = DependencyMap::new();
        for dependency_type in [
            DependencyType::Production,
            DependencyType::Development,
            DependencyType::Peer,
        ] {
            if let Some(map) = self.dependencies_of(dependency_type) {
                merged.merge_from(map);
            }
        }
        merged
    }

    pub fn project_info(&self) -> ProjectInfo {
        ProjectInfo {
            name: self
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
            version: self
                .version
                .clone()
                .unwrap_or_else(|| DEFAULT_PROJECT_VERSION.to_string()),
            description: self.description.clone().unwrap_or_default(),
        }
    }
}

/// Name, version and description of the analysed project, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_key_order() {
        let manifest = Manifest::parse(
            r#"{"dependencies": {"zod": "^3.0.0", "axios": "^1.0.0", "lodash": "^4.0.0"}}"#,
        )
        .unwrap();

        let names: Vec<&str> = manifest
            .dependencies
            .as_ref()
            .unwrap()
            .iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["zod", "axios", "lodash"]);
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let manifest = Manifest::parse(
            r#"{"name": "demo", "scripts": {"build": "vite build"}, "private": true}"#,
        )
        .unwrap();
        assert_eq!(manifest.name.as_deref(), Some("demo"));
        assert!(manifest.dependencies.is_none());
    }

    #[test]
    fn test_parse_truncated_text_is_syntax_error() {
        let result = Manifest::parse(r#"{"name": "demo", "dependencies": {"#);
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidManifestSyntax { .. })
        ));
    }

    #[test]
    fn test_parse_non_object_root_is_syntax_error() {
        let result = Manifest::parse("[1, 2, 3]");
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidManifestSyntax { .. })
        ));
    }

    #[test]
    fn test_parse_non_string_range_is_syntax_error() {
        let result = Manifest::parse(r#"{"dependencies": {"axios": 1}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_key_keeps_position_takes_last_value() {
        let manifest = Manifest::parse(
            r#"{"dependencies": {"a": "1.0.0", "b": "2.0.0", "a": "3.0.0"}}"#,
        )
        .unwrap();
        let deps = manifest.dependencies.unwrap();
        let entries: Vec<(&str, &str)> = deps.iter().collect();
        assert_eq!(entries, vec![("a", "3.0.0"), ("b", "2.0.0")]);
    }

    #[test]
    fn test_merged_dependencies_later_maps_overwrite() {
        let manifest = Manifest::parse(
            r#"{
                "dependencies": {"react": "^18.0.0", "lodash": "^4.0.0"},
                "devDependencies": {"lodash": "^4.17.21", "vite": "^4.0.0"},
                "peerDependencies": {"react": ">=17"}
            }"#,
        )
        .unwrap();

        let merged = manifest.merged_dependencies();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("react"), Some(">=17"));
        assert_eq!(merged.get("lodash"), Some("^4.17.21"));
        let names: Vec<&str> = merged.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["react", "lodash", "vite"]);
    }

    #[test]
    fn test_project_info_defaults() {
        let info = Manifest::default().project_info();
        assert_eq!(info.name, "Unknown Project");
        assert_eq!(info.version, "0.0.0");
        assert_eq!(info.description, "");
    }

    #[test]
    fn test_project_info_from_manifest() {
        let manifest =
            Manifest::parse(r#"{"name": "demo", "version": "1.2.3", "description": "A demo"}"#)
                .unwrap();
        let info = manifest.project_info();
        assert_eq!(info.name, "demo");
        assert_eq!(info.version, "1.2.3");
        assert_eq!(info.description, "A demo");
    }

    #[test]
    fn test_dependency_type_manifest_key() {
        assert_eq!(DependencyType::Production.manifest_key(), "dependencies");
        assert_eq!(DependencyType::Development.manifest_key(), "devDependencies");
        assert_eq!(DependencyType::Peer.manifest_key(), "peerDependencies");
    }

    #[test]
    fn test_dependency_type_serializes_lowercase() {
        let json = serde_json::to_string(&DependencyType::Development).unwrap();
        assert_eq!(json, "\"development\"");
    }
}
