//! Sound settings file.

use std::{
    path::Path,
    fs::File,
    io::{
        BufReader,
        BufWriter,
    },
};
use serde::{Serialize, Deserialize};
use anyhow::*;


pub const SOUND_SETTINGS_FILE_NAME: &'static str = "sound_settings.json";


/// Sound settings. A client-side global resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundSettings {
    pub master_volume: f32,
    /// Distance between the listener's ears, in world units.
    pub ear_spacing: f32,
}

impl Default for SoundSettings {
    fn default() -> Self {
        SoundSettings {
            master_volume: 1.0,
            ear_spacing: 0.2,
        }
    }
}

impl SoundSettings {
    pub fn read(path: impl AsRef<Path>) -> Self {
        Self::try_read(path).unwrap_or_else(|e| {
            warn!(%e, "unable to read sound settings, using defaults");
            Self::default()
        })
    }

    pub fn try_read(path: impl AsRef<Path>) -> Result<Self> {
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), self)?;
        Ok(())
    }
}


#[test]
fn settings_round_trip() {
    let dir = std::env::temp_dir()
        .join(format!("sound_settings_round_trip_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(SOUND_SETTINGS_FILE_NAME);
    let settings = SoundSettings {
        master_volume: 0.25,
        ear_spacing: 0.5,
    };
    settings.write(&path).unwrap();
    let read_back = SoundSettings::read(&path);
    assert_eq!(read_back.master_volume, 0.25);
    assert_eq!(read_back.ear_spacing, 0.5);
    std::fs::remove_file(&path).ok();
    std::fs::remove_dir(&dir).ok();
}

#[test]
fn read_defaults_when_file_missing() {
    let settings = SoundSettings::read("/definitely/not/a/real/path/sound_settings.json");
    let defaults = SoundSettings::default();
    assert_eq!(settings.master_volume, defaults.master_volume);
    assert_eq!(settings.ear_spacing, defaults.ear_spacing);
}

#[test]
fn read_defaults_on_malformed_file() {
    let path = std::env::temp_dir()
        .join(format!("sound_settings_malformed_{}.json", std::process::id()));
    std::fs::write(&path, b"not json").unwrap();
    let settings = SoundSettings::read(&path);
    assert_eq!(settings.master_volume, SoundSettings::default().master_volume);
    std::fs::remove_file(&path).ok();
}

#[test]
fn try_read_errors_when_file_missing() {
    assert!(SoundSettings::try_read("/definitely/not/a/real/path/sound_settings.json").is_err());
}
