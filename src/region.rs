use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{HuntError, HuntResult};
use crate::target::Target;
use crate::viewport::NormalizedPoint;

/// Rectangular hit area, in percent of the picture's width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Region {
    /// Inclusive on every edge.
    pub fn contains(&self, point: NormalizedPoint) -> bool {
        self.min_y <= point.rel_y
            && point.rel_y <= self.max_y
            && self.min_x <= point.rel_x
            && point.rel_x <= self.max_x
    }
}

/// Hit regions for each target. Loaded once per session and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionIndex {
    regions: BTreeMap<Target, Vec<Region>>,
}

impl RegionIndex {
    pub fn new(regions: BTreeMap<Target, Vec<Region>>) -> Self {
        Self { regions }
    }

    pub fn from_json_str(s: &str) -> HuntResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn regions_for(&self, target: Target) -> Option<&[Region]> {
        self.regions.get(&target).map(Vec::as_slice)
    }

    /// Targets from the fixed set that have no entry at all.
    pub fn missing_targets(&self) -> Vec<Target> {
        Target::ALL
            .into_iter()
            .filter(|t| !self.regions.contains_key(t))
            .collect()
    }
}

/// Does `point` land inside any region of `target`?
///
/// Stops at the first matching region.
pub fn hit_test(point: NormalizedPoint, target: Target, index: &RegionIndex) -> HuntResult<bool> {
    let regions = index
        .regions_for(target)
        .ok_or(HuntError::TargetNotFound(target))?;

    Ok(regions.iter().any(|r| r.contains(point)))
}
