//! Hand-assembled RIFF/WAVE byte streams
//!
//! Unlike hound, the builder can emit inconsistent headers, extra chunks
//! before `data`, and strided payloads whose decimated values are known in
//! advance.

/// Builder for raw WAV bytes
#[derive(Debug, Clone)]
pub struct WavBuilder {
    riff_tag: [u8; 4],
    audio_format: u16,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    byte_rate: Option<u32>,
    block_align: Option<u16>,
    extra_chunks: Vec<([u8; 4], Vec<u8>)>,
    data: Vec<u8>,
}

impl WavBuilder {
    /// 16-bit PCM with the given layout and an empty payload
    pub fn pcm16(channels: u16, sample_rate: u32) -> Self {
        Self {
            riff_tag: *b"RIFF",
            audio_format: 1,
            channels,
            sample_rate,
            bits_per_sample: 16,
            byte_rate: None,
            block_align: None,
            extra_chunks: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn riff_tag(mut self, tag: &[u8; 4]) -> Self {
        self.riff_tag = *tag;
        self
    }

    pub fn audio_format(mut self, code: u16) -> Self {
        self.audio_format = code;
        self
    }

    /// Override the stored byte rate instead of deriving it
    pub fn byte_rate(mut self, byte_rate: u32) -> Self {
        self.byte_rate = Some(byte_rate);
        self
    }

    /// Override the stored block align instead of deriving it
    pub fn block_align(mut self, block_align: u16) -> Self {
        self.block_align = Some(block_align);
        self
    }

    /// Insert a chunk between the header and `data`
    pub fn chunk(mut self, tag: &[u8; 4], payload: Vec<u8>) -> Self {
        self.extra_chunks.push((*tag, payload));
        self
    }

    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Payload where the decimator reads exactly `values`, in order.
    ///
    /// Each value starts a block of `16 + 16 * channels * 3` bytes: the
    /// frame sample read plus the stride skipped after it.
    pub fn strided_values(self, values: &[i16]) -> Self {
        let block_len = 16 + 16 * self.channels as usize * 3;
        let mut data = Vec::with_capacity(values.len() * block_len);
        for &v in values {
            let mut block = vec![0u8; block_len];
            block[..2].copy_from_slice(&v.to_le_bytes());
            data.extend(block);
        }
        self.data(data)
    }

    pub fn build(&self) -> Vec<u8> {
        let block_align = self
            .block_align
            .unwrap_or(self.channels * self.bits_per_sample / 8);
        let byte_rate = self
            .byte_rate
            .unwrap_or(self.sample_rate * (self.channels * self.bits_per_sample / 8) as u32);

        let extra_len: usize = self.extra_chunks.iter().map(|(_, p)| 8 + p.len()).sum();
        let riff_size = (4 + 24 + extra_len + 8 + self.data.len()) as u32;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.riff_tag);
        bytes.extend_from_slice(&riff_size.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&self.audio_format.to_le_bytes());
        bytes.extend_from_slice(&self.channels.to_le_bytes());
        bytes.extend_from_slice(&self.sample_rate.to_le_bytes());
        bytes.extend_from_slice(&byte_rate.to_le_bytes());
        bytes.extend_from_slice(&block_align.to_le_bytes());
        bytes.extend_from_slice(&self.bits_per_sample.to_le_bytes());

        for (tag, payload) in &self.extra_chunks {
            bytes.extend_from_slice(tag);
            bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
            bytes.extend_from_slice(payload);
        }

        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&self.data);
        bytes
    }
}
