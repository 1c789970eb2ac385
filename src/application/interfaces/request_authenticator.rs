pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SIGNATURE_HEADER: &str = "x-slack-signature";
pub const RETRY_HEADER: &str = "x-slack-retry-num";

/// The parts of an inbound HTTP request that authenticity depends on.
#[derive(Debug, Clone, Copy)]
pub struct SignedRequest<'a> {
    pub timestamp: Option<&'a str>,
    pub signature: Option<&'a str>,
    pub body: &'a [u8],
}

impl<'a> SignedRequest<'a> {
    pub fn new(timestamp: Option<&'a str>, signature: Option<&'a str>, body: &'a [u8]) -> Self {
        Self {
            timestamp,
            signature,
            body,
        }
    }
}

/// Decides whether an inbound request really came from the chat platform.
pub trait RequestAuthenticator: Send + Sync {
    fn verify(&self, request: &SignedRequest<'_>) -> bool;
}
