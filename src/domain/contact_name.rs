/// Shortest name the contact form accepts before sending anything.
pub const MIN_NAME_LENGTH: usize = 3;

/// Struct to hold the name of the person getting in touch.
/// The only way to create a `ContactName` is through `parse`, which means
/// consumers of this type are guaranteed it is not blank.
#[derive(Debug, Clone)]
pub struct ContactName(String);

impl ContactName {
    /// Returns a trimmed `ContactName` if the input holds anything besides
    /// whitespace.
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err("The contact name is empty.".to_string())
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Whether the name is long enough for the form, counted in UTF-16 code
    /// units like the browser does. The handler does not
    /// enforce this, so that short names typed by hand are still delivered.
    pub fn is_long_enough(s: &str) -> bool {
        s.trim().encode_utf16().count() >= MIN_NAME_LENGTH
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
