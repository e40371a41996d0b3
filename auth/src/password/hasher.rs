use super::errors::PasswordError;

/// One-way password hashing capability.
///
/// Implementations embed their salt and parameters in the returned digest so
/// that `verify` needs nothing but the digest itself.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - The underlying algorithm rejected the input
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored digest.
    ///
    /// Returns false on mismatch and on a malformed digest.
    fn verify(&self, password: &str, digest: &str) -> bool;
}
