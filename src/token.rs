/// Shared secret used for signing URLs.
///
/// The token is issued by the image service and may be any length. Its
/// `Debug` implementation prints no secret material and equality is checked
/// in constant time.
///
/// # Example
///
/// ```rust
/// use imgix_url::Token;
///
/// let token = Token::new("my-signing-secret");
/// assert_eq!(format!("{:?}", token), "Token");
/// ```
#[derive(Clone)]
pub struct Token(String);

impl Token {
    /// Create a new `Token` from a secret string.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token").finish()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;

        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl Eq for Token {}

impl From<&str> for Token {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for Token {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_does_not_leak_the_secret() {
        let token = Token::new("hunter2");
        assert_eq!(format!("{token:?}"), "Token");
    }

    #[test]
    fn equality() {
        assert_eq!(Token::new("abc"), Token::new("abc"));
        assert_ne!(Token::new("abc"), Token::new("abd"));
        assert_ne!(Token::new("abc"), Token::new("abcd"));
    }
}
