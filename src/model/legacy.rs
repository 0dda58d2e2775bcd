use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::values::{Categories, PathPair, ResNums, Selections, Tags};

/// State file contents of a pre-release Sim.
///
/// Only the keys the conversion needs are modelled; anything else in the
/// file is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyState {
    pub tags: Tags,
    pub categories: Categories,
    pub mds: LegacyMds,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyMds {
    pub universes: BTreeMap<String, LegacyUniverse>,
}

/// One of the (possibly many) universe definitions of a pre-release Sim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyUniverse {
    pub top: PathPair,
    #[serde(default)]
    pub traj: Vec<PathPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resnums: Option<ResNums>,
    #[serde(default)]
    pub sels: Selections,
}

impl LegacyState {
    pub fn universe_names(&self) -> impl Iterator<Item = &str> {
        self.mds.universes.keys().map(String::as_str)
    }

    #[inline]
    pub fn universe_count(&self) -> usize {
        self.mds.universes.len()
    }

    pub fn universe(&self, name: &str) -> Option<&LegacyUniverse> {
        self.mds.universes.get(name)
    }
}

impl LegacyUniverse {
    pub fn trajectory_paths(&self) -> impl Iterator<Item = &std::path::Path> {
        self.traj.iter().map(PathPair::abs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::values::Selection;
    use serde_json::json;
    use std::path::Path;

    fn sample() -> serde_json::Value {
        json!({
            "tags": ["adk", "closed"],
            "categories": {"protein": "adk"},
            "mds": {
                "universes": {
                    "main": {
                        "top": ["/data/adk/adk.psf", "adk.psf"],
                        "traj": [
                            ["/data/adk/md1.dcd", "md1.dcd"],
                            ["/data/adk/md2.dcd", "md2.dcd"]
                        ],
                        "resnums": [1, 2, 3],
                        "sels": {"backbone": "name CA C N O"}
                    },
                    "fitted": {
                        "top": ["/data/adk/adk.psf", "adk.psf"],
                        "traj": [["/data/adk/fit.dcd", "fit.dcd"]],
                        "sels": {}
                    }
                },
                "version": "0.5.0"
            },
            "coordinator": null
        })
    }

    #[test]
    fn parses_pre_release_state() {
        let state: LegacyState = serde_json::from_value(sample()).unwrap();

        assert_eq!(state.tags.len(), 2);
        assert_eq!(state.universe_count(), 2);
        assert_eq!(state.universe_names().collect::<Vec<_>>(), ["fitted", "main"]);

        let main = state.universe("main").unwrap();
        assert_eq!(main.top.abs(), Path::new("/data/adk/adk.psf"));
        assert_eq!(
            main.trajectory_paths().collect::<Vec<_>>(),
            [Path::new("/data/adk/md1.dcd"), Path::new("/data/adk/md2.dcd")]
        );
        assert_eq!(main.resnums, Some(vec![Some(1), Some(2), Some(3)]));
        assert_eq!(main.sels["backbone"], Selection::from("name CA C N O"));
    }

    #[test]
    fn missing_resnums_is_none() {
        let state: LegacyState = serde_json::from_value(sample()).unwrap();
        assert!(state.universe("fitted").unwrap().resnums.is_none());
    }

    #[test]
    fn null_resnums_is_none() {
        let mut raw = sample();
        raw["mds"]["universes"]["main"]["resnums"] = serde_json::Value::Null;
        let state: LegacyState = serde_json::from_value(raw).unwrap();
        assert!(state.universe("main").unwrap().resnums.is_none());
    }

    #[test]
    fn malformed_resnums_is_an_error() {
        let mut raw = sample();
        raw["mds"]["universes"]["main"]["resnums"] = json!("1-3");
        assert!(serde_json::from_value::<LegacyState>(raw).is_err());
    }

    #[test]
    fn new_format_state_is_rejected() {
        let raw = json!({
            "tags": [],
            "categories": {},
            "mdsynthesis": {"universedef": {}, "atomselections": {}}
        });
        assert!(serde_json::from_value::<LegacyState>(raw).is_err());
    }
}
