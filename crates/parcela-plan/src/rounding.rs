//! Decimal rounding of `f64` amounts.

/// Rounds half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Rounds a monetary amount to cents.
pub fn round_money(value: f64) -> f64 {
    round_to(value, 2)
}

/// Monthly rates are exposed with 4 decimal places.
pub fn round_monthly_rate(value: f64) -> f64 {
    round_to(value, 4)
}

/// Yearly rates are exposed with 6 decimal places.
pub fn round_yearly_rate(value: f64) -> f64 {
    round_to(value, 6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(7847.8404), 7847.84);
        assert_eq!(round_money(390.0), 390.0);
        assert_eq!(round_money(-1.006), -1.01);
    }

    #[test]
    fn test_rate_precision() {
        assert_eq!(round_monthly_rate(0.027438), 0.0274);
        assert_eq!(round_yearly_rate(0.3837824), 0.383782);
        assert_eq!(round_to(0.000_734_1234_56, 10), 0.0007341235);
    }
}
