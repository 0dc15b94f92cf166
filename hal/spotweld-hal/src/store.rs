//! Persistent settings storage abstractions
//!
//! The timer persists two single-byte records. The store mirrors the
//! behaviour of a small EEPROM: a byte can be read at any time, a write may
//! leave the store busy for a while, and writers check [`ByteStore::is_ready`]
//! before starting a write.

/// Value returned for a record that was never written
pub const ERASED_BYTE: u8 = 0xFF;

/// Storage keys for the persisted records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Pulse length in resolution units (1-99)
    PulseLength = 0,
    /// Timing resolution (1 = 0.01 s, 2 = 0.1 s)
    Resolution = 1,
}

impl StorageKey {
    /// All keys, in storage order
    #[cfg(test)]
    const ALL: [StorageKey; 2] = [StorageKey::PulseLength, StorageKey::Resolution];

    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::PulseLength),
            1 => Some(StorageKey::Resolution),
            _ => None,
        }
    }
}

/// Byte-per-key persistent store
///
/// Reads never fail: a missing or unreadable record reads as
/// [`ERASED_BYTE`], and callers range-check what they get back.
pub trait ByteStore {
    /// Read the byte stored under `key`
    fn read_byte(&mut self, key: StorageKey) -> u8;

    /// Start writing `value` under `key`
    ///
    /// The store may report not ready until the write has completed.
    fn write_byte(&mut self, key: StorageKey, value: u8);

    /// Check whether the store can accept a write
    fn is_ready(&self) -> bool;

    /// Block until the store is ready
    ///
    /// There is no timeout.
    fn wait_ready(&mut self) {
        while !self.is_ready() {
            core::hint::spin_loop();
        }
    }

    /// Write `value` only if it differs from the stored byte
    fn update_byte(&mut self, key: StorageKey, value: u8) {
        if self.read_byte(key) != value {
            self.write_byte(key, value);
        }
    }
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match StorageKey::from_u8(buffer[0]) {
            Some(key) => Ok((key, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}
