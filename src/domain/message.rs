/// One newline-delimited line read from the serial device, delimiter excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialMessage {
    pub data: Vec<u8>,
}

impl SerialMessage {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    /// The payload as text, if it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
