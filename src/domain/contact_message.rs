/// Minimum number of characters, after trimming, of a contact message.
pub const MIN_MESSAGE_LENGTH: usize = 10;

/// A message long enough to be worth forwarding.
#[derive(Debug, Clone)]
pub struct ContactMessage(String);

impl ContactMessage {
    /// Accepts the message when it holds at least [`MIN_MESSAGE_LENGTH`]
    /// UTF-16 code units once surrounding whitespace is removed, the length a
    /// browser reports for the same text. The stored message is the trimmed
    /// text.
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();
        if Self::is_long_enough(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(format!(
                "The message must be at least {MIN_MESSAGE_LENGTH} characters long."
            ))
        }
    }

    pub fn is_long_enough(s: &str) -> bool {
        s.trim().encode_utf16().count() >= MIN_MESSAGE_LENGTH
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
