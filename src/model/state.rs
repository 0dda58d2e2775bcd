use serde::{Deserialize, Serialize};

use super::values::{Categories, PathPair, ResNums, Selections, Tags};

/// State file contents of a 0.6.0 Sim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub categories: Categories,
    #[serde(default)]
    pub mdsynthesis: MdsState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MdsState {
    #[serde(default)]
    pub universedef: UniverseDef,
    #[serde(default)]
    pub atomselections: Selections,
}

/// The single universe definition carried by a 0.6.0 Sim.
///
/// Relative halves of `top` and `traj` are relative to the Sim's own
/// directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniverseDef {
    #[serde(default)]
    pub top: Option<PathPair>,
    #[serde(default)]
    pub traj: Vec<PathPair>,
    #[serde(default)]
    pub resnums: Option<ResNums>,
    #[serde(default)]
    pub kwargs: serde_json::Map<String, serde_json::Value>,
}

impl UniverseDef {
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.top.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_state_layout() {
        let value = serde_json::to_value(SimState::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "tags": [],
                "categories": {},
                "mdsynthesis": {
                    "universedef": {
                        "top": null,
                        "traj": [],
                        "resnums": null,
                        "kwargs": {}
                    },
                    "atomselections": {}
                }
            })
        );
    }

    #[test]
    fn tags_serialize_sorted() {
        let state = SimState {
            tags: ["solvated", "adk", "closed"].map(String::from).into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["tags"], json!(["adk", "closed", "solvated"]));
    }

    #[test]
    fn partial_state_fills_defaults() {
        let state: SimState = serde_json::from_value(json!({"tags": ["adk"]})).unwrap();
        assert!(state.categories.is_empty());
        assert!(!state.mdsynthesis.universedef.is_defined());
    }
}
