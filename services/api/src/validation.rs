//! Input validation utilities

/// Validate an optional journal rating; when present it must be in [1, 10]
pub fn validate_rating(rating: Option<i32>) -> Result<(), String> {
    if let Some(rating) = rating {
        if !(1..=10).contains(&rating) {
            return Err("Rating must be between 1 and 10.".to_string());
        }
    }

    Ok(())
}

/// Validate a required title field
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title is required.".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(validate_rating(Some(1)).is_ok());
        assert!(validate_rating(Some(10)).is_ok());
        assert!(validate_rating(Some(0)).is_err());
        assert!(validate_rating(Some(11)).is_err());
    }

    #[test]
    fn absent_rating_is_valid() {
        assert!(validate_rating(None).is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(validate_title("Cold showers").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }
}
