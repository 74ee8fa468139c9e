use crate::errors::ServiceError;
use rand::{Rng, rng};
use regex::Regex;

pub fn random_card_number() -> Result<String, ServiceError> {
    let mut rng = rng();

    let random_digits: String = (0..15)
        .map(|_| rng.random_range(0..10).to_string())
        .collect();

    let candidate = format!("4{random_digits}");

    let re = Regex::new(r"^\d{16}$").map_err(|e| ServiceError::Internal(e.to_string()))?;
    if re.is_match(&candidate) {
        Ok(candidate)
    } else {
        Err(ServiceError::Internal(
            "Generated card number is invalid".into(),
        ))
    }
}
