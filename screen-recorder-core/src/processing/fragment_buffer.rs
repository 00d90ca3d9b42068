use crate::models::fragment::Fragment;

/// Ordered, append-only store of encoded fragments for one session.
///
/// Wrap in `Arc<parking_lot::Mutex<FragmentBuffer>>` to share it with the
/// encoder's event callback.
///
/// Empty fragments are never stored. The buffer is consumed exactly once by
/// [`FragmentBuffer::assemble`]; anything pushed afterwards is refused.
#[derive(Debug, Default)]
pub struct FragmentBuffer {
    fragments: Vec<Fragment>,
    total_bytes: usize,
    consumed: bool,
}

impl FragmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment in arrival order.
    ///
    /// Returns `false` (and stores nothing) for zero-size fragments or once
    /// the buffer has been assembled.
    pub fn push(&mut self, fragment: Fragment) -> bool {
        if fragment.is_empty() || self.consumed {
            return false;
        }
        self.total_bytes += fragment.len();
        self.fragments.push(fragment);
        true
    }

    /// Concatenate all fragments in arrival order and mark the buffer consumed.
    ///
    /// Returns `None` if the buffer was already assembled.
    pub fn assemble(&mut self) -> Option<Vec<u8>> {
        if self.consumed {
            return None;
        }
        self.consumed = true;

        let mut bytes = Vec::with_capacity(self.total_bytes);
        for fragment in self.fragments.drain(..) {
            bytes.extend(fragment.into_bytes());
        }
        self.total_bytes = 0;
        Some(bytes)
    }

    /// Number of fragments currently held.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Sum of the sizes of held fragments.
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}
