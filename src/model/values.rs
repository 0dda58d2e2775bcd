use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Free-form labels attached to a Sim. Order is irrelevant; duplicates collapse.
pub type Tags = BTreeSet<String>;

/// Key/value metadata attached to a Sim.
pub type Categories = BTreeMap<String, Category>;

/// Named atom selections of a universe.
pub type Selections = BTreeMap<String, Selection>;

/// Residue numbers, one per atom. Atoms without a number are stored as `null`.
pub type ResNums = Vec<Option<i64>>;

/// A single category value.
///
/// Pre-release Sims mostly stored strings, but the category setter accepted
/// any JSON value. Scalars get their own variant; anything else (`null`,
/// lists, objects) is kept verbatim in [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Flag(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Flag(v) => write!(f, "{}", v),
            Category::Integer(v) => write!(f, "{}", v),
            Category::Unsigned(v) => write!(f, "{}", v),
            Category::Float(v) => write!(f, "{}", v),
            Category::Text(v) => write!(f, "{}", v),
            Category::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::Text(value.to_string())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::Text(value)
    }
}

/// An atom selection definition.
///
/// Selections are usually a single expression, sometimes a list of
/// expressions whose results are concatenated in order. Anything else is
/// kept verbatim so it survives the conversion untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Expression(String),
    Group(Vec<String>),
    Structured(serde_json::Value),
}

impl Selection {
    /// Number of selection expressions, or `None` for structured values.
    pub fn expression_count(&self) -> Option<usize> {
        match self {
            Selection::Expression(_) => Some(1),
            Selection::Group(exprs) => Some(exprs.len()),
            Selection::Structured(_) => None,
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::Expression(value.to_string())
    }
}

/// An (absolute, relative) pair of paths to the same file.
///
/// Serialized as a two-element array, which is how both schemas store
/// topology and trajectory locations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathPair(pub PathBuf, pub PathBuf);

impl PathPair {
    pub fn new(abs: impl Into<PathBuf>, rel: impl Into<PathBuf>) -> Self {
        Self(abs.into(), rel.into())
    }

    #[inline]
    pub fn abs(&self) -> &Path {
        &self.0
    }

    #[inline]
    pub fn rel(&self) -> &Path {
        &self.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_accepts_scalars() {
        let cats: Categories = serde_json::from_value(json!({
            "protein": "adk",
            "temperature": 300,
            "pressure": 1.5,
            "solvated": true,
        }))
        .unwrap();

        assert_eq!(cats["protein"], Category::Text("adk".into()));
        assert_eq!(cats["temperature"], Category::Integer(300));
        assert_eq!(cats["pressure"], Category::Float(1.5));
        assert_eq!(cats["solvated"], Category::Flag(true));
    }

    #[test]
    fn category_keeps_values_outside_the_scalars() {
        let raw = json!({
            "unset": null,
            "replicas": [1, 2, 3],
            "seed": 18446744073709551615u64,
        });
        let cats: Categories = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(cats["unset"], Category::Other(serde_json::Value::Null));
        assert!(matches!(cats["replicas"], Category::Other(_)));
        assert_eq!(cats["seed"], Category::Unsigned(u64::MAX));
        assert_eq!(serde_json::to_value(&cats).unwrap(), raw);
    }

    #[test]
    fn category_display_matches_raw_value() {
        assert_eq!(Category::from("adk").to_string(), "adk");
        assert_eq!(Category::Integer(42).to_string(), "42");
        assert_eq!(Category::Flag(false).to_string(), "false");
        assert_eq!(Category::Other(json!(["a", 1])).to_string(), r#"["a",1]"#);
    }

    #[test]
    fn selection_variants_are_inferred() {
        let sels: Selections = serde_json::from_value(json!({
            "backbone": "name CA C N O",
            "domains": ["resid 1:29", "resid 60:121"],
            "odd": {"expr": "protein", "updating": true},
        }))
        .unwrap();

        assert_eq!(sels["backbone"], Selection::from("name CA C N O"));
        assert_eq!(sels["domains"].expression_count(), Some(2));
        assert!(matches!(sels["odd"], Selection::Structured(_)));
        assert_eq!(sels["odd"].expression_count(), None);
    }

    #[test]
    fn selection_serializes_back_unchanged() {
        let raw = json!(["resid 1:29", "resid 60:121"]);
        let sel: Selection = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&sel).unwrap(), raw);
    }

    #[test]
    fn path_pair_is_a_two_element_array() {
        let pair: PathPair =
            serde_json::from_value(json!(["/data/adk/top.pdb", "../top.pdb"])).unwrap();
        assert_eq!(pair.abs(), Path::new("/data/adk/top.pdb"));
        assert_eq!(pair.rel(), Path::new("../top.pdb"));
    }

    #[test]
    fn resnums_keep_missing_entries() {
        let resnums: ResNums = serde_json::from_value(json!([1, null, 3])).unwrap();
        assert_eq!(resnums, vec![Some(1), None, Some(3)]);
    }
}
