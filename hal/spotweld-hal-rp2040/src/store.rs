//! Flash-backed settings store for RP2040
//!
//! The RP2040 has no EEPROM. The two settings bytes live in the last 64KB
//! of flash, managed by sequential-storage for wear levelling. Flash
//! operations are driven to completion with `block_on`, so the store is
//! ready again as soon as a write returns.
//!
//! Implements the `ByteStore` trait from `spotweld-hal`.

use embassy_futures::block_on;
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

// Re-export shared types from spotweld-hal
pub use spotweld_hal::store::{StorageKey, ERASED_BYTE};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const SETTINGS_PARTITION_SIZE: usize = 64 * 1024;
pub const SETTINGS_PARTITION_START: usize = FLASH_SIZE - SETTINGS_PARTITION_SIZE;

/// Flash range for the settings partition
pub const SETTINGS_RANGE: core::ops::Range<u32> =
    (SETTINGS_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch space for one map item (key, length and a one byte value)
const ITEM_BUFFER_SIZE: usize = 64;

/// Errors from the underlying flash map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Flash driver reported an error
    Flash,
    /// Map layer rejected the operation (corruption, full partition)
    Storage,
}

/// RP2040 flash settings store
pub struct FlashStore<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> FlashStore<'d> {
    /// Create a new flash store
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }

    /// Fetch a record, `Ok(None)` if it was never written
    pub fn fetch(&mut self, key: StorageKey) -> Result<Option<u8>, StoreError> {
        let mut data_buffer = [0u8; ITEM_BUFFER_SIZE];

        let result = block_on(map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        ));

        match result {
            Ok(Some(data)) => Ok(data.first().copied()),
            Ok(None) => Ok(None),
            Err(e) => Err(map_error(e)),
        }
    }

    /// Store a record, blocking until flash programming has finished
    pub fn store(&mut self, key: StorageKey, value: u8) -> Result<(), StoreError> {
        let mut data_buffer = [0u8; ITEM_BUFFER_SIZE];
        let data: &[u8] = &[value];

        block_on(map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &data,
        ))
        .map_err(map_error)
    }
}

fn map_error<E>(error: sequential_storage::Error<E>) -> StoreError {
    match error {
        sequential_storage::Error::Storage { .. } => StoreError::Flash,
        _ => StoreError::Storage,
    }
}

impl spotweld_hal::ByteStore for FlashStore<'_> {
    fn read_byte(&mut self, key: StorageKey) -> u8 {
        match self.fetch(key) {
            Ok(Some(value)) => value,
            Ok(None) => ERASED_BYTE,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Settings read {} failed: {}", key, _e);
                ERASED_BYTE
            }
        }
    }

    fn write_byte(&mut self, key: StorageKey, value: u8) {
        if let Err(_e) = self.store(key, value) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Settings write {}={} failed: {}", key, value, _e);
        }
    }

    fn is_ready(&self) -> bool {
        // Writes complete before `write_byte` returns
        true
    }
}
