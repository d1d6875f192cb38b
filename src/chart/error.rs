use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// Tooltip placement other than `right-start`
    InvalidPlacement(String),
    /// Signal index outside the drawn markers
    UnknownSignal(usize),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::InvalidPlacement(placement) => {
                write!(f, "Invalid placement: {:?}", placement)
            }
            ChartError::UnknownSignal(index) => write!(f, "No signal marker at index {}", index),
        }
    }
}

impl std::error::Error for ChartError {}
