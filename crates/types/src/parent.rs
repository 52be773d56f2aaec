use alloy_primitives::B256;

/// Protocol state and parent block root resolved for a target slot.
///
/// `S` is whatever state handle the resolver hands out. It lives for one header request
/// and is never cached across requests.
#[derive(Clone, Debug)]
pub struct ResolvedParent<S> {
    pub state: S,
    pub parent_root: B256,
}

impl<S> ResolvedParent<S> {
    pub fn new(state: S, parent_root: B256) -> Self {
        Self { state, parent_root }
    }
}
