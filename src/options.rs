/// Limits applied while parsing a descriptor
///
/// The defaults accept everything the format itself can express: tokens
/// up to 1024 bytes and any count that fits the 16-bit count fields.
/// Lower the record ceilings when loading descriptors from untrusted
/// sources, since declared counts drive up-front allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Longest accepted word token, in bytes
    pub max_token_len: usize,
    /// Largest accepted `common pages=` value
    pub max_pages: usize,
    /// Largest accepted `chars count=` value
    pub max_chars: usize,
    /// Largest accepted `kernings count=` value
    pub max_kernings: usize,
}

/// Default word token ceiling
pub const MAX_TOKEN_LENGTH: usize = 1024;

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_token_len: MAX_TOKEN_LENGTH,
            max_pages: u16::MAX as usize,
            max_chars: u16::MAX as usize,
            max_kernings: u16::MAX as usize,
        }
    }
}
