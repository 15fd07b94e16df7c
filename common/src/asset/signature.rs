/// What one HTTP probe response looked like.
///
/// Compared field by field; the derived `Eq`/`Hash` are only used to tally
/// identical wildcard responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HttpSignature {
    pub status_code: u16,
    pub title: String,
    pub location: String,
    /// Perceptual content hash, absent when the prober did not report one.
    pub simhash: Option<u64>,
    pub content_length: u64,
}

impl HttpSignature {
    pub fn new(
        status_code: u16,
        title: impl Into<String>,
        location: impl Into<String>,
        simhash: Option<u64>,
        content_length: u64,
    ) -> Self {
        Self {
            status_code,
            title: title.into(),
            location: location.into(),
            simhash,
            content_length,
        }
    }
}
