use bytes::Bytes;

/// An opaque broadcast payload.
///
/// Messages carry no schema, identity, or ordering key; the hub preserves
/// nothing about them beyond arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    payload: Bytes,
}

pub fn new_message(payload: impl Into<Bytes>) -> Message {
    Message {
        payload: payload.into(),
    }
}

impl Message {
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
