/// One unit of encoded output delivered by the encoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    data: Vec<u8>,
}

impl Fragment {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for Fragment {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for Fragment {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}
