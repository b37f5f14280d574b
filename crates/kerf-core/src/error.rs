use thiserror::Error;

#[derive(Debug, Error)]
pub enum KerfError {
    #[error("Unsupported Bezier order {order} (maximum {max})")]
    UnsupportedOrder { order: usize, max: usize },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

pub type Result<T> = std::result::Result<T, KerfError>;
