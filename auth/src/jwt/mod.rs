pub mod claims;
pub mod codec;
pub mod errors;
pub mod issuer;
pub mod scope;

pub use claims::Claims;
pub use codec::JwtCodec;
pub use codec::TokenCodec;
pub use errors::JwtError;
pub use errors::Unauthorized;
pub use issuer::Token;
pub use issuer::TokenIssuer;
pub use scope::TokenScope;
