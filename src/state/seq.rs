//! Monotonic request tokens for discarding stale responses.
//!
//! Each logical operation owns one `RequestSeq`. Issuing a request takes a
//! new token; a response is applied only if its token is still the latest.

#[cfg(test)]
#[path = "seq_test.rs"]
mod seq_test;

/// Opaque token identifying one issued request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Clone, Debug, Default)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    /// Issue a token newer than every token issued before it.
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    #[must_use]
    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Invalidate every outstanding token without issuing a new request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}
