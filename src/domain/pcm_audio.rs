use bytes::Bytes;

use super::PcmStreamDescriptor;

/// WAV bytes known to match the canonical descriptor.
#[derive(Debug, Clone)]
pub struct PcmAudio {
    bytes: Bytes,
}

impl PcmAudio {
    pub fn from_wav(bytes: impl Into<Bytes>) -> Result<Self, String> {
        let bytes = bytes.into();
        let descriptor = PcmStreamDescriptor::inspect_wav(&bytes)?;
        if descriptor != PcmStreamDescriptor::CANONICAL {
            return Err(format!(
                "expected {}, got {}",
                PcmStreamDescriptor::CANONICAL,
                descriptor
            ));
        }
        Ok(Self { bytes })
    }

    pub fn descriptor(&self) -> PcmStreamDescriptor {
        PcmStreamDescriptor::CANONICAL
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Zero-copy slices of at most `chunk_size` bytes, in order.
    pub fn chunks(&self, chunk_size: usize) -> impl Iterator<Item = Bytes> + '_ {
        let chunk_size = chunk_size.max(1);
        (0..self.bytes.len())
            .step_by(chunk_size)
            .map(move |start| {
                let end = (start + chunk_size).min(self.bytes.len());
                self.bytes.slice(start..end)
            })
    }
}
