#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum NameFormat {
    /// One line in encoding order (OpenSSL style), `O=Org, CN=Alice`
    Text,
    /// Subject-string syntax, `/CN=Alice/O=Org`
    Slash,
    /// JSON format
    Json,
    /// DER encoding of the Name, as hex
    Der,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum KeyFormat {
    /// Human-readable text format (OpenSSL-like)
    Text,
    /// JSON format
    Json,
    /// DER encoding of the SubjectPublicKeyInfo, as hex
    Der,
}
