//! Performance score for a completed review: correct answers out of total.
use crate::error::ScheduleError;

/// Validated review result. Construction guarantees `total > 0` and
/// `correct <= total`, so `percent` is always within [0, 100].
#[derive(Clone, Copy, Debug)]
pub struct Score {
    correct: u32,
    total: u32,
}

impl Score {
    pub fn new(correct: u32, total: u32) -> Result<Self, ScheduleError> {
        if total == 0 {
            return Err(ScheduleError::InvalidScore(
                "total question count must be greater than zero".to_string(),
            ));
        }
        if correct > total {
            return Err(ScheduleError::InvalidScore(format!(
                "{correct} correct out of {total} is not possible"
            )));
        }
        Ok(Self { correct, total })
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Score as a percentage in [0, 100].
    pub fn percent(&self) -> f64 {
        (self.correct as f64 / self.total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        let score = Score::new(32, 40).unwrap();
        assert_eq!(score.percent(), 80.0);

        let score = Score::new(0, 40).unwrap();
        assert_eq!(score.percent(), 0.0);

        let score = Score::new(40, 40).unwrap();
        assert_eq!(score.percent(), 100.0);
    }

    #[test]
    fn test_zero_total_rejected() {
        assert!(matches!(
            Score::new(0, 0),
            Err(ScheduleError::InvalidScore(_))
        ));
    }

    #[test]
    fn test_correct_above_total_rejected() {
        assert!(matches!(
            Score::new(41, 40),
            Err(ScheduleError::InvalidScore(_))
        ));
    }
}
