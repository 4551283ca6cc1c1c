//! Answer request DTOs

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Path parameters of an answer submission
#[derive(Debug, Deserialize)]
pub struct AnswerPath {
    /// 1-based question number
    pub number: String,
}

impl AnswerPath {
    /// 0-based question index
    pub fn index(&self) -> AppResult<usize> {
        let number: usize = self
            .number
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("Invalid question number: {}", self.number)))?;
        number
            .checked_sub(1)
            .ok_or(AppError::InvalidQuestion { number })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(number: &str) -> AnswerPath {
        AnswerPath {
            number: number.to_string(),
        }
    }

    #[test]
    fn test_index_is_zero_based() {
        assert_eq!(path("1").index().unwrap(), 0);
        assert_eq!(path("3").index().unwrap(), 2);
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(
            path("0").index(),
            Err(AppError::InvalidQuestion { number: 0 })
        ));
        assert!(matches!(path("abc").index(), Err(AppError::InvalidInput(_))));
        assert!(matches!(path("-1").index(), Err(AppError::InvalidInput(_))));
    }
}
