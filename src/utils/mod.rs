pub mod bracket_cache;
pub mod db_utils;

/// Round a peso amount to centavos.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_centavos() {
        assert_eq!(round2(872.7272727), 872.73);
        assert_eq!(round2(72.727), 72.73);
        assert_eq!(round2(100.0), 100.0);
        assert_eq!(round2(-0.005), -0.01);
    }
}
