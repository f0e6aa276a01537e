use crate::util::*;
use thiserror::Error;

/// errors surfaced to the caller of the solver; internal contract violations are assertions instead
#[derive(Error, Debug)]
pub enum MatchingError {
    #[error("edge {edge_index} has invalid weight {weight}, weights must be finite and non-negative")]
    InvalidWeight { edge_index: EdgeIndex, weight: Weight },

    #[error("edge {edge_index} refers to vertex {vertex} but there are only {vertex_num} vertices")]
    VertexOutOfRange {
        edge_index: EdgeIndex,
        vertex: VertexIndex,
        vertex_num: VertexNum,
    },

    #[error("no perfect matching exists: required dual increase {delta} exceeds the threshold")]
    NoPerfectMatching { delta: Weight },

    #[error("invalid solver config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("neither a primal operation nor a positive dual step is available")]
    Stalled,

    #[error("optimality certificate violated: {0}")]
    InvalidCertificate(String),
}

pub type MatchingResult<T> = Result<T, MatchingError>;
