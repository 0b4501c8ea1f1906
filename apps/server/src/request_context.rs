//! Per-request context propagated through middleware extensions.

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}
