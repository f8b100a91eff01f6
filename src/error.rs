//! Errors reported by palette-graph mutations.
//!
//! Numeric generation never fails; only structural misuse of the ramp/link
//! graph does.

use thiserror::Error;

use crate::graph::RampId;

/// Errors that can occur when mutating the ramp/link graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The referenced ramp does not exist.
    #[error("ramp {0} does not exist")]
    UnknownRamp(RampId),
    /// A swatch index is out of range for its ramp.
    #[error("swatch index {index} is out of range for ramp {ramp}")]
    SwatchOutOfRange {
        /// The ramp that was addressed.
        ramp: RampId,
        /// The offending swatch index.
        index: usize,
    },
    /// A link would connect a ramp to itself.
    #[error("cannot link ramp {0} to itself")]
    SelfLink(RampId),
    /// The target ramp already has an inbound link; at most one is allowed.
    #[error("ramp {0} already follows another ramp")]
    AlreadyDependent(RampId),
    /// Creating the link would close a cycle in the link graph.
    ///
    /// The field names avoid `source`, which thiserror reserves for the
    /// error-source chain.
    #[error("linking ramp {source_ramp} to ramp {target_ramp} would form a cycle")]
    WouldCycle {
        /// Source ramp of the rejected link.
        source_ramp: RampId,
        /// Target ramp of the rejected link.
        target_ramp: RampId,
    },
    /// No link ends at the given swatch.
    #[error("no link ends at swatch {index} of ramp {ramp}")]
    NoSuchLink {
        /// The ramp that was addressed.
        ramp: RampId,
        /// The swatch index that was addressed.
        index: usize,
    },
    /// The swatch is driven by a link; its manual shift cannot be edited.
    #[error("swatch {index} of ramp {ramp} is link-controlled and cannot be shifted")]
    DependentSwatch {
        /// The ramp that was addressed.
        ramp: RampId,
        /// The swatch index that was addressed.
        index: usize,
    },
    /// The ramp is driven by a link; the requested operation needs an
    /// independent ramp.
    #[error("ramp {0} is link-controlled")]
    DependentRamp(RampId),
    /// The swatch count of a ramp that participates in a link cannot change.
    #[error("ramp {0} participates in a link; its swatch count is fixed")]
    LinkedCountChange(RampId),
    /// A cycle was met while cascading a recompute. Creation-time checks
    /// should make this unreachable.
    #[error("link cycle detected while propagating from ramp {0}")]
    CycleDetected(RampId),
}
