//! PCM data extraction and hashing utilities.

use super::header::HEADER_SIZE;

/// Incremental BLAKE3 digest over sample data.
#[derive(Debug, Clone, Default)]
pub struct PcmDigest {
    hasher: blake3::Hasher,
    bytes: u64,
}

impl PcmDigest {
    /// Creates an empty digest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next run of sample bytes.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.bytes += data.len() as u64;
    }

    /// Number of bytes hashed so far.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Returns the hex digest.
    pub fn finalize(&self) -> String {
        self.hasher.finalize().to_hex().to_string()
    }
}

/// Computes the BLAKE3 hash of raw sample data.
pub fn compute_pcm_hash(pcm_data: &[u8]) -> String {
    blake3::hash(pcm_data).to_hex().to_string()
}

/// Returns the sample data of a canonical stream, or `None` if it is shorter
/// than the header or the data chunk is truncated.
///
/// The data size is taken from the header itself, so bytes past the
/// announced data chunk are ignored.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < HEADER_SIZE {
        return None;
    }
    if &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" || &wav_data[36..40] != b"data"
    {
        return None;
    }
    let data_size =
        u32::from_le_bytes([wav_data[40], wav_data[41], wav_data[42], wav_data[43]]) as usize;
    wav_data.get(HEADER_SIZE..HEADER_SIZE.checked_add(data_size)?)
}
