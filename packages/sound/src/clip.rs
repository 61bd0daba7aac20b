//! Decoded audio clips and flat playback.

use std::{
    path::Path,
    io::Cursor,
    fmt::{self, Formatter, Debug},
};
use rodio::{
    decoder::Decoder,
    source::{
        Source,
        Buffered,
    },
    OutputStream,
    OutputStreamHandle,
};
use tokio::fs;
use anyhow::*;


/// A clip of audio, decoded up front and buffered in memory. Cheap to clone.
#[derive(Clone)]
pub struct Sound(pub(crate) Buffered<Decoder<Cursor<Vec<u8>>>>);

impl Sound {
    /// Decode a clip from the raw bytes of an audio file.
    pub fn new(file_data: Vec<u8>) -> Result<Self> {
        Ok(Sound(Decoder::new(Cursor::new(file_data))?.buffered()))
    }

    pub async fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(fs::read(path).await?)
    }
}

impl Debug for Sound {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("Sound(..)")
    }
}


/// Handle for playing clips flat, with no positioning.
pub struct SoundPlayer {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl SoundPlayer {
    /// Open the default output device.
    pub fn new() -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        Ok(SoundPlayer {
            _stream: stream,
            stream_handle,
        })
    }

    pub fn play(&self, sound: &Sound) {
        let res = self.stream_handle.play_raw(sound.0.clone().convert_samples());
        if let Err(e) = res {
            error!(%e, "error playing sound");
        }
    }
}

impl Debug for SoundPlayer {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("SoundPlayer(..)")
    }
}


// 8 samples of 16-bit mono silence at 44.1 kHz
#[cfg(test)]
fn tiny_wav() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&(36u32 + 16).to_le_bytes());
    data.extend_from_slice(b"WAVE");
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&44100u32.to_le_bytes());
    data.extend_from_slice(&(44100u32 * 2).to_le_bytes());
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes());
    data.extend_from_slice(b"data");
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&[0; 16]);
    data
}

#[test]
fn decodes_wav_bytes() {
    let sound = Sound::new(tiny_wav()).unwrap();
    assert_eq!(sound.0.clone().count(), 8);
    // clones share the decoded buffer
    let clone = sound.clone();
    assert_eq!(clone.0.clone().count(), 8);
}

#[test]
fn rejects_non_audio_bytes() {
    assert!(Sound::new(b"definitely not audio".to_vec()).is_err());
    assert!(Sound::new(Vec::new()).is_err());
}

#[tokio::test]
async fn read_file_decodes_from_disk() {
    let path = std::env::temp_dir()
        .join(format!("sound_read_file_test_{}.wav", std::process::id()));
    tokio::fs::write(&path, tiny_wav()).await.unwrap();
    let sound = Sound::read_file(&path).await.unwrap();
    assert_eq!(sound.0.clone().count(), 8);
    tokio::fs::remove_file(&path).await.ok();

    assert!(Sound::read_file("/definitely/not/a/real/path.wav").await.is_err());
}
