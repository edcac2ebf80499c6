use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::core::game_state::GameState;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Manages saving and loading game state with checksummed binary format
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager instance
    ///
    /// Sets up the save directory at the appropriate location for the platform
    /// using the `directories` crate.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "megami").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine data directory")
        })?;

        let data_dir = project_dirs.data_dir();
        fs::create_dir_all(data_dir)?;

        Ok(Self {
            save_path: data_dir.join("save.dat"),
        })
    }

    /// Uses an explicit save file location.
    pub fn with_path(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
        }
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Stamps `current_time` as the save time, then writes the state to disk
    /// with checksum verification
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized game state (variable length)
    /// - SHA256 checksum (32 bytes)
    pub fn save(&self, state: &mut GameState, current_time: i64) -> io::Result<()> {
        state.mark_saved(current_time);
        let bytes = encode(state)?;
        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&bytes)?;
        info!(path = %self.save_path.display(), bytes = bytes.len(), "game saved");
        Ok(())
    }

    /// Loads the game state from disk with checksum verification.
    ///
    /// The returned state is already rehydrated: every member's derived stats
    /// were recomputed from its stored inputs.
    pub fn load(&self) -> io::Result<GameState> {
        let mut bytes = Vec::new();
        fs::File::open(&self.save_path)?.read_to_end(&mut bytes)?;
        let state = decode(&bytes)
            .inspect_err(|e| warn!(path = %self.save_path.display(), error = %e, "save rejected"))?;
        info!(path = %self.save_path.display(), parties = state.parties.len(), "game loaded");
        Ok(state)
    }

    /// Checks if a save file exists
    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}

/// Serializes a state into the checksummed save format.
pub fn encode(state: &GameState) -> io::Result<Vec<u8>> {
    let data =
        bincode::serialize(state).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let data_len = u32::try_from(data.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "save data too large"))?;

    // Checksum covers version + length + data
    let mut hasher = Sha256::new();
    hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
    hasher.update(data_len.to_le_bytes());
    hasher.update(&data);
    let checksum = hasher.finalize();

    let mut bytes = Vec::with_capacity(8 + 4 + data.len() + 32);
    bytes.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.extend_from_slice(&data);
    bytes.extend_from_slice(&checksum);
    Ok(bytes)
}

/// Parses and verifies the save format, then rehydrates the state.
///
/// Returns `InvalidData` if:
/// - The version magic is incorrect
/// - The checksum verification fails
/// - The data cannot be deserialized
pub fn decode(mut bytes: &[u8]) -> io::Result<GameState> {
    let mut version_bytes = [0u8; 8];
    bytes.read_exact(&mut version_bytes)?;
    let version = u64::from_le_bytes(version_bytes);
    if version != SAVE_VERSION_MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                SAVE_VERSION_MAGIC, version
            ),
        ));
    }

    let mut length_bytes = [0u8; 4];
    bytes.read_exact(&mut length_bytes)?;
    let data_len = u32::from_le_bytes(length_bytes) as usize;

    let mut data = vec![0u8; data_len];
    bytes.read_exact(&mut data)?;

    let mut stored_checksum = [0u8; 32];
    bytes.read_exact(&mut stored_checksum)?;

    let mut hasher = Sha256::new();
    hasher.update(version_bytes);
    hasher.update(length_bytes);
    hasher.update(&data);
    if stored_checksum != hasher.finalize().as_slice() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Checksum verification failed",
        ));
    }

    let mut state: GameState =
        bincode::deserialize(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    state.rehydrate();
    Ok(state)
}
