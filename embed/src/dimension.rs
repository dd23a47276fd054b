/// Output dimension of an embedder.
///
/// `Unresolved` carries the fallback value reported until the dimension
/// has been taken from the model table or observed in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionState {
    Resolved(usize),
    Unresolved(usize),
}

impl DimensionState {
    pub fn value(&self) -> usize {
        match *self {
            DimensionState::Resolved(d) | DimensionState::Unresolved(d) => d,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, DimensionState::Resolved(_))
    }
}
