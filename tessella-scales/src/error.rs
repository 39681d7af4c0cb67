#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TessellaScaleError {
    #[error("Empty range")]
    EmptyRange,

    #[error("Breaks must be in ascending order: {0:?}")]
    BreaksNotAscending(Vec<f64>),
}
