use crate::error::{ChunkerError, Result};

/// Configuration for the chunker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkerConfig {
    /// Declarations shorter than this are folded into fragments rather than
    /// kept as standalone chunks
    pub min_chunk_bytes: usize,

    /// Hard upper bound for a single chunk
    pub max_chunk_bytes: usize,
}

impl ChunkerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_bytes == 0 {
            return Err(ChunkerError::invalid_config("max_chunk_bytes must be > 0"));
        }
        if self.min_chunk_bytes >= self.max_chunk_bytes {
            return Err(ChunkerError::invalid_config(
                "min_chunk_bytes must be smaller than max_chunk_bytes",
            ));
        }
        Ok(())
    }
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            min_chunk_bytes: 500,
            max_chunk_bytes: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ChunkerConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let config = ChunkerConfig {
            min_chunk_bytes: 2000,
            max_chunk_bytes: 500,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_max() {
        let config = ChunkerConfig {
            min_chunk_bytes: 0,
            max_chunk_bytes: 0,
        };
        assert!(config.validate().is_err());
    }
}
