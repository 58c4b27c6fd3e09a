use subtle::ConstantTimeEq;

/// Header the widget layer sends the per-session token in.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Compare a presented token against the session secret in constant time.
pub fn verify(presented: &str, secret: &str) -> bool {
    presented.as_bytes().ct_eq(secret.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_token_matches() {
        assert!(verify("a3f0", "a3f0"));
    }

    #[test]
    fn any_other_string_fails() {
        assert!(!verify("a3f0", "a3f1"));
        assert!(!verify("", "a3f0"));
        assert!(!verify("a3f0a3f0", "a3f0"));
    }
}
