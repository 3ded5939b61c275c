/// Pending delete awaiting the user's confirmation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmDelete {
    pending: Option<i64>,
}

impl ConfirmDelete {
    pub fn request_delete(&mut self, id: i64) {
        self.pending = Some(id);
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Close the confirmation and hand back the id to delete
    pub fn confirm(&mut self) -> Option<i64> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<i64> {
        self.pending
    }
}
