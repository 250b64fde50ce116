//! Refresh sequence numbers. A fetch result only applies if no refresh was
//! started after it.

/// Sequence number of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Default)]
pub struct LatestOnly {
    issued: u64,
    pending: Option<RequestId>,
}

impl LatestOnly {
    /// Issues the next id; any earlier pending refresh becomes stale.
    pub fn begin(&mut self) -> RequestId {
        self.issued += 1;
        let id = RequestId(self.issued);
        self.pending = Some(id);
        id
    }

    /// Claims the result slot for `id`. Returns false for stale ids and for
    /// an id whose result was already applied.
    pub fn take(&mut self, id: RequestId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
