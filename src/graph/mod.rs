//! The ramp/link graph: an arena of ramps, the links between their swatches,
//! and the explicit propagation walk that keeps dependents in sync.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::HsvColor;
use crate::config::EngineConfig;
use crate::error::GraphError;
use crate::optimize;
use crate::ramp::{Ramp, RampParams, RangeEdge, ShiftTriple};

/// Identifier of a ramp inside a [`PaletteGraph`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RampId(u32);

impl fmt::Display for RampId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to one swatch position inside one ramp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwatchRef {
    /// The ramp holding the swatch.
    pub ramp: RampId,
    /// Zero-based swatch index, darkest first.
    pub swatch: usize,
}

/// A directed link making the target swatch mirror the source swatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The controlling swatch.
    pub source: SwatchRef,
    /// The controlled (anchor) swatch.
    pub target: SwatchRef,
    /// Whether the target ramp kept its brightness range when the link was
    /// created. Consulted only at creation time.
    pub keep_value_range: bool,
}

/// Owns every ramp and link and runs all recomputation.
///
/// Mutations recompute the touched ramp synchronously and then cascade to
/// transitive dependents with an explicit depth-first walk over outbound
/// links. Each ramp has at most one inbound link, and link creation rejects
/// cycles, so the walk always terminates.
#[derive(Debug)]
pub struct PaletteGraph {
    config: EngineConfig,
    ramps: IndexMap<RampId, Ramp>,
    links: Vec<Link>,
    next_id: u32,
}

impl Default for PaletteGraph {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl PaletteGraph {
    /// Create an empty graph using the given engine configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ramps: IndexMap::new(),
            links: Vec::new(),
            next_id: 0,
        }
    }

    /// The engine configuration this graph was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Add a new independent ramp and generate its swatches.
    pub fn add_ramp(&mut self, params: RampParams) -> RampId {
        let id = RampId(self.next_id);
        self.next_id += 1;
        self.ramps.insert(id, Ramp::new(params));
        debug!(ramp = %id, count = params.color_count, "added ramp");
        id
    }

    /// Remove a ramp together with every link touching it. Former dependents
    /// of the ramp revert to independent mode with the default brightness
    /// range.
    pub fn remove_ramp(&mut self, id: RampId) -> Result<(), GraphError> {
        if !self.ramps.contains_key(&id) {
            return Err(GraphError::UnknownRamp(id));
        }

        let detached: Vec<Link> = self
            .links
            .iter()
            .filter(|l| l.source.ramp == id || l.target.ramp == id)
            .copied()
            .collect();
        self.links
            .retain(|l| l.source.ramp != id && l.target.ramp != id);
        self.ramps.shift_remove(&id);

        for link in detached {
            if link.source.ramp == id && link.target.ramp != id {
                self.revert_to_independent(link.target)?;
                self.propagate_from(link.target.ramp)?;
            }
        }
        debug!(ramp = %id, "removed ramp");
        Ok(())
    }

    /// Look up a ramp.
    pub fn ramp(&self, id: RampId) -> Result<&Ramp, GraphError> {
        self.ramps.get(&id).ok_or(GraphError::UnknownRamp(id))
    }

    /// Iterate over all ramps in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RampId, &Ramp)> {
        self.ramps.iter().map(|(&id, ramp)| (id, ramp))
    }

    /// All current links.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Display colors of a ramp, darkest first; what exporters and
    /// visualizers consume.
    pub fn display_colors(&self, id: RampId) -> Result<Vec<HsvColor>, GraphError> {
        Ok(self.ramp(id)?.display_colors())
    }

    /// Replace a ramp's generation parameters and recompute it and all its
    /// transitive dependents.
    ///
    /// Changing the swatch count is rejected while the ramp participates in
    /// any link; otherwise a count change rebuilds the swatch list and
    /// discards its manual shifts.
    pub fn set_params(&mut self, id: RampId, params: RampParams) -> Result<(), GraphError> {
        let current_count = self.ramp(id)?.swatches().len();
        if params.color_count != current_count && self.has_links(id) {
            return Err(GraphError::LinkedCountChange(id));
        }

        let inbound = self.inbound_link(id);
        let ramp = self.ramps.get_mut(&id).ok_or(GraphError::UnknownRamp(id))?;
        ramp.set_params(params);
        if let Some(link) = inbound {
            self.recompute_dependent(&link, RangeEdge::Lower)?;
        }
        self.propagate_from(id)
    }

    /// Move one edge of a ramp's brightness range and recompute.
    ///
    /// For a dependent ramp the edited edge is kept (clamped into the
    /// feasible interval) and the opposite edge is re-derived from the anchor
    /// constraint; for an independent ramp both values are taken as given.
    pub fn set_value_range(
        &mut self,
        id: RampId,
        value_min: i32,
        value_max: i32,
        edited_edge: RangeEdge,
    ) -> Result<(), GraphError> {
        let inbound = self.inbound_link(id);
        let ramp = self.ramps.get_mut(&id).ok_or(GraphError::UnknownRamp(id))?;
        ramp.set_value_range(value_min, value_max);
        match inbound {
            Some(link) => self.recompute_dependent(&link, edited_edge)?,
            None => {
                let ramp = self.ramps.get_mut(&id).ok_or(GraphError::UnknownRamp(id))?;
                ramp.regenerate();
            }
        }
        self.propagate_from(id)
    }

    /// Set the manual shift of one swatch (clamped into the configured
    /// bounds) and cascade to dependents.
    ///
    /// Link-controlled swatches are rejected: their color mirrors the
    /// controller and carries no shift.
    pub fn set_shift(&mut self, at: SwatchRef, shift: ShiftTriple) -> Result<(), GraphError> {
        let ramp = self.ramp(at.ramp)?;
        let swatch = ramp
            .swatches()
            .get(at.swatch)
            .ok_or(GraphError::SwatchOutOfRange {
                ramp: at.ramp,
                index: at.swatch,
            })?;
        if swatch.is_dependent() {
            return Err(GraphError::DependentSwatch {
                ramp: at.ramp,
                index: at.swatch,
            });
        }

        let clamped = self.config.shift_bounds.clamp(shift);
        let ramp = self
            .ramps
            .get_mut(&at.ramp)
            .ok_or(GraphError::UnknownRamp(at.ramp))?;
        ramp.set_shift(at.swatch, clamped);
        self.propagate_from(at.ramp)
    }

    /// Create a link so that the target swatch mirrors the source swatch.
    ///
    /// The target ramp must not already follow another ramp, the link must
    /// stay acyclic, and both endpoints must exist. Creating the link resets
    /// every manual shift in the target ramp and, unless `keep_value_range`,
    /// its brightness range as well, before the first dependent recompute.
    pub fn create_link(
        &mut self,
        source: SwatchRef,
        target: SwatchRef,
        keep_value_range: bool,
    ) -> Result<(), GraphError> {
        self.check_swatch(source)?;
        self.check_swatch(target)?;
        if source.ramp == target.ramp {
            return Err(GraphError::SelfLink(source.ramp));
        }
        if self.inbound_link(target.ramp).is_some() {
            return Err(GraphError::AlreadyDependent(target.ramp));
        }
        // Walk the inbound chain above the source; reaching the target would
        // close a cycle.
        let mut current = source.ramp;
        while let Some(link) = self.inbound_link(current) {
            if link.source.ramp == target.ramp {
                return Err(GraphError::WouldCycle {
                    source_ramp: source.ramp,
                    target_ramp: target.ramp,
                });
            }
            current = link.source.ramp;
        }

        let link = Link {
            source,
            target,
            keep_value_range,
        };
        self.links.push(link);

        let ramp = self
            .ramps
            .get_mut(&target.ramp)
            .ok_or(GraphError::UnknownRamp(target.ramp))?;
        ramp.clear_shifts();
        ramp.set_dependent(target.swatch, true);
        if !keep_value_range {
            ramp.set_value_range(self.config.default_value_min, self.config.default_value_max);
        }

        self.recompute_dependent(&link, RangeEdge::Lower)?;
        debug!(
            source = %source.ramp,
            target = %target.ramp,
            anchor = target.swatch,
            "created link"
        );
        self.propagate_from(target.ramp)
    }

    /// Remove the link ending at the given swatch. The formerly dependent
    /// ramp reverts to independent mode with the default brightness range.
    pub fn remove_link(&mut self, target: SwatchRef) -> Result<(), GraphError> {
        let position = self
            .links
            .iter()
            .position(|l| l.target == target)
            .ok_or(GraphError::NoSuchLink {
                ramp: target.ramp,
                index: target.swatch,
            })?;
        self.links.swap_remove(position);
        self.revert_to_independent(target)?;
        debug!(target = %target.ramp, anchor = target.swatch, "removed link");
        self.propagate_from(target.ramp)
    }

    /// Run the spacing optimizer over a ramp's generated colors, write the
    /// result back as manual shifts, and cascade.
    ///
    /// Rejected for dependent ramps, where shifts are meaningless.
    pub fn apply_spacing_optimization(
        &mut self,
        id: RampId,
    ) -> Result<Vec<ShiftTriple>, GraphError> {
        if self.inbound_link(id).is_some() {
            return Err(GraphError::DependentRamp(id));
        }
        let generated: Vec<HsvColor> = self
            .ramp(id)?
            .swatches()
            .iter()
            .map(|s| s.generated())
            .collect();
        let shifts = optimize::optimize_spacing(&generated, &self.config.shift_bounds);

        let ramp = self.ramps.get_mut(&id).ok_or(GraphError::UnknownRamp(id))?;
        for (index, &shift) in shifts.iter().enumerate() {
            ramp.set_shift(index, shift);
        }
        self.propagate_from(id)?;
        Ok(shifts)
    }

    /// Recompute every ramp that transitively depends on `start`, in
    /// dependency order.
    pub fn propagate_from(&mut self, start: RampId) -> Result<(), GraphError> {
        let mut visited: IndexSet<RampId> = IndexSet::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            let outbound: Vec<Link> = self
                .links
                .iter()
                .filter(|l| l.source.ramp == current)
                .copied()
                .collect();
            for link in outbound {
                let dependent = link.target.ramp;
                if dependent == start || !visited.insert(dependent) {
                    return Err(GraphError::CycleDetected(start));
                }
                self.recompute_dependent(&link, RangeEdge::Lower)?;
                stack.push(dependent);
            }
        }
        Ok(())
    }

    fn has_links(&self, id: RampId) -> bool {
        self.links
            .iter()
            .any(|l| l.source.ramp == id || l.target.ramp == id)
    }

    fn inbound_link(&self, id: RampId) -> Option<Link> {
        self.links.iter().find(|l| l.target.ramp == id).copied()
    }

    fn check_swatch(&self, at: SwatchRef) -> Result<(), GraphError> {
        let ramp = self.ramp(at.ramp)?;
        if at.swatch >= ramp.swatches().len() {
            return Err(GraphError::SwatchOutOfRange {
                ramp: at.ramp,
                index: at.swatch,
            });
        }
        Ok(())
    }

    /// Re-derive a dependent ramp from its controller's current display
    /// color.
    fn recompute_dependent(&mut self, link: &Link, edge: RangeEdge) -> Result<(), GraphError> {
        let source = self.ramp(link.source.ramp)?;
        let controller = source
            .swatches()
            .get(link.source.swatch)
            .ok_or(GraphError::SwatchOutOfRange {
                ramp: link.source.ramp,
                index: link.source.swatch,
            })?
            .display_color();

        let ramp = self
            .ramps
            .get_mut(&link.target.ramp)
            .ok_or(GraphError::UnknownRamp(link.target.ramp))?;
        ramp.set_dependent(link.target.swatch, true);
        ramp.regenerate_dependent(link.target.swatch, controller, edge);
        debug!(
            source = %link.source.ramp,
            target = %link.target.ramp,
            "recomputed dependent ramp"
        );
        Ok(())
    }

    /// Clear a ramp's dependent state and regenerate it on its own
    /// parameters with the default brightness range.
    fn revert_to_independent(&mut self, target: SwatchRef) -> Result<(), GraphError> {
        let ramp = self
            .ramps
            .get_mut(&target.ramp)
            .ok_or(GraphError::UnknownRamp(target.ramp))?;
        ramp.set_dependent(target.swatch, false);
        ramp.set_value_range(self.config.default_value_min, self.config.default_value_max);
        ramp.regenerate();
        Ok(())
    }
}
