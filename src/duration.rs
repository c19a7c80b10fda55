//! Edge duration models.
//!
//! An activity's duration is either a fixed value or a uniform random draw.
//! Descriptors are parsed once while the network is built; the trial hot
//! path only ever matches on an already-constructed model.

use std::str::FromStr;

use rand::Rng;

/// Errors that can occur while parsing a duration descriptor
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("empty duration descriptor")]
    Empty,

    #[error("invalid number '{0}' in duration descriptor")]
    InvalidNumber(String),

    #[error("uniform descriptor '{0}' must be of the form U(low,high)")]
    MalformedUniform(String),

    #[error("invalid uniform range: low {low} > high {high}")]
    InvalidRange { low: f64, high: f64 },

    #[error("negative duration {0} is not allowed")]
    NegativeDuration(f64),
}

/// Duration model for a single activity (edge).
///
/// The enum is the extension point for further distribution kinds: adding
/// one means a new variant plus arms in `sample` and `from_str`.
#[derive(Debug, Clone, PartialEq)]
pub enum DurationModel {
    /// Deterministic duration
    Fixed(f64),
    /// Uniform random duration drawn from `[low, high)`
    Uniform { low: f64, high: f64 },
}

impl DurationModel {
    /// Sample a concrete duration from this model.
    ///
    /// `Fixed` ignores the random source and returns its constant;
    /// `Uniform` draws from `[low, high)` using the supplied generator.
    /// The source is an explicit argument so trials can run on independent,
    /// reproducible streams.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            DurationModel::Fixed(value) => *value,
            DurationModel::Uniform { low, high } => {
                if low == high {
                    *low
                } else {
                    rng.gen_range(*low..*high)
                }
            }
        }
    }

    /// Returns true if this model has no randomness
    pub fn is_deterministic(&self) -> bool {
        match self {
            DurationModel::Fixed(_) => true,
            DurationModel::Uniform { low, high } => low == high,
        }
    }
}

impl FromStr for DurationModel {
    type Err = ParseError;

    /// Parse a duration descriptor.
    ///
    /// Accepted forms:
    /// - `"<number>"` for a fixed duration, e.g. `"6"` or `"4.5"`
    /// - `"U(<low>,<high>)"` for a uniform duration, e.g. `"U(3,5)"`
    ///
    /// Surrounding whitespace is tolerated in both forms.
    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let descriptor = descriptor.trim();
        if descriptor.is_empty() {
            return Err(ParseError::Empty);
        }

        if let Some(rest) = descriptor.strip_prefix('U') {
            let params = rest
                .trim()
                .strip_prefix('(')
                .and_then(|inner| inner.strip_suffix(')'))
                .ok_or_else(|| ParseError::MalformedUniform(descriptor.to_string()))?;

            let mut parts = params.split(',');
            let (low_str, high_str) = match (parts.next(), parts.next(), parts.next()) {
                (Some(low), Some(high), None) => (low, high),
                _ => return Err(ParseError::MalformedUniform(descriptor.to_string())),
            };

            let low = parse_value(low_str)?;
            let high = parse_value(high_str)?;
            if low > high {
                return Err(ParseError::InvalidRange { low, high });
            }
            Ok(DurationModel::Uniform { low, high })
        } else {
            let value = parse_value(descriptor)?;
            Ok(DurationModel::Fixed(value))
        }
    }
}

/// Parse a single non-negative numeric component of a descriptor
fn parse_value(text: &str) -> Result<f64, ParseError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber(text.trim().to_string()))?;
    if value < 0.0 {
        return Err(ParseError::NegativeDuration(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_parse_fixed() {
        assert_eq!("6".parse::<DurationModel>(), Ok(DurationModel::Fixed(6.0)));
        assert_eq!(
            "4.5".parse::<DurationModel>(),
            Ok(DurationModel::Fixed(4.5))
        );
        assert_eq!(
            " 9 ".parse::<DurationModel>(),
            Ok(DurationModel::Fixed(9.0))
        );
    }

    #[test]
    fn test_parse_uniform() {
        assert_eq!(
            "U(3,5)".parse::<DurationModel>(),
            Ok(DurationModel::Uniform { low: 3.0, high: 5.0 })
        );
        assert_eq!(
            "U( 7 , 10 )".parse::<DurationModel>(),
            Ok(DurationModel::Uniform { low: 7.0, high: 10.0 })
        );
    }

    #[test]
    fn test_parse_invalid() {
        // Missing upper bound
        assert!(matches!(
            "U(5)".parse::<DurationModel>(),
            Err(ParseError::MalformedUniform(_))
        ));
        // Inverted range
        assert!(matches!(
            "U(9,3)".parse::<DurationModel>(),
            Err(ParseError::InvalidRange { .. })
        ));
        // Non-numeric
        assert!(matches!(
            "U(a,b)".parse::<DurationModel>(),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            "fast".parse::<DurationModel>(),
            Err(ParseError::InvalidNumber(_))
        ));
        // Extra parameter
        assert!(matches!(
            "U(1,2,3)".parse::<DurationModel>(),
            Err(ParseError::MalformedUniform(_))
        ));
        assert_eq!("".parse::<DurationModel>(), Err(ParseError::Empty));
        assert!(matches!(
            "-3".parse::<DurationModel>(),
            Err(ParseError::NegativeDuration(_))
        ));
    }

    #[test]
    fn test_fixed_sample_is_deterministic() {
        let model = DurationModel::Fixed(6.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(model.sample(&mut rng), 6.0);
        }
        assert!(model.is_deterministic());
    }

    #[test]
    fn test_uniform_sample_bounds_and_mean() {
        let model = DurationModel::Uniform { low: 3.0, high: 5.0 };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let draws: Vec<f64> = (0..10_000).map(|_| model.sample(&mut rng)).collect();

        for value in &draws {
            assert!(*value >= 3.0 && *value < 5.0);
        }
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        assert!((mean - 4.0).abs() < 0.05, "empirical mean {} too far from 4.0", mean);
    }

    #[test]
    fn test_degenerate_uniform() {
        let model = DurationModel::Uniform { low: 4.0, high: 4.0 };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(model.sample(&mut rng), 4.0);
        assert!(model.is_deterministic());
    }
}
