//! Persisted settings
//!
//! Two values survive power cycles: the pulse length (in resolution units)
//! and the resolution itself. Both are stored as single bytes and validated
//! on load; anything out of range falls back to the configured default.

use spotweld_hal::{ByteStore, StorageKey};

use crate::config::{
    DEFAULT_PULSE_LENGTH, DEFAULT_RESOLUTION, PULSE_LENGTH_MAX, PULSE_LENGTH_MIN,
    RESOLUTION_UNIT_MS,
};

/// Time unit of the pulse length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Resolution {
    /// 10 ms per unit
    Fine = 1,
    /// 100 ms per unit
    Coarse = 2,
}

impl Resolution {
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Fine),
            2 => Some(Self::Coarse),
            _ => None,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a stored byte, falling back to the default
    pub const fn from_stored(value: u8) -> Self {
        match Self::from_u8(value) {
            Some(resolution) => resolution,
            None => DEFAULT_RESOLUTION,
        }
    }

    pub fn load<S: ByteStore>(store: &mut S) -> Self {
        let raw = store.read_byte(StorageKey::Resolution);
        let resolution = Self::from_stored(raw);
        if resolution.as_u8() != raw {
            debug!("Stored resolution {} invalid, using default", raw);
        }
        resolution
    }

    /// Milliseconds per pulse unit
    pub const fn unit_ms(self) -> u32 {
        match self {
            Self::Fine => RESOLUTION_UNIT_MS,
            Self::Coarse => RESOLUTION_UNIT_MS * 10,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Fine => Self::Coarse,
            Self::Coarse => Self::Fine,
        }
    }

    /// Digit shown for this resolution in the splash and setup menu
    pub const fn digit(self) -> u8 {
        self.as_u8()
    }
}

impl Default for Resolution {
    fn default() -> Self {
        DEFAULT_RESOLUTION
    }
}

/// Pulse length in resolution units, always within 1..=99
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseLength(u8);

impl PulseLength {
    pub const MIN: Self = Self(PULSE_LENGTH_MIN);
    pub const MAX: Self = Self(PULSE_LENGTH_MAX);

    pub const fn new(units: u8) -> Option<Self> {
        if units >= PULSE_LENGTH_MIN && units <= PULSE_LENGTH_MAX {
            Some(Self(units))
        } else {
            None
        }
    }

    /// Decode a stored byte, falling back to the default
    pub const fn from_stored(value: u8) -> Self {
        match Self::new(value) {
            Some(pulse) => pulse,
            None => Self(DEFAULT_PULSE_LENGTH),
        }
    }

    pub fn load<S: ByteStore>(store: &mut S) -> Self {
        let raw = store.read_byte(StorageKey::PulseLength);
        let pulse = Self::from_stored(raw);
        if pulse.get() != raw {
            debug!("Stored pulse length {} invalid, using default", raw);
        }
        pulse
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// One unit longer, saturating at the maximum
    pub const fn incremented(self) -> Self {
        if self.0 < PULSE_LENGTH_MAX {
            Self(self.0 + 1)
        } else {
            self
        }
    }

    /// One unit shorter, saturating at the minimum
    pub const fn decremented(self) -> Self {
        if self.0 > PULSE_LENGTH_MIN {
            Self(self.0 - 1)
        } else {
            self
        }
    }

    pub const fn duration_ms(self, resolution: Resolution) -> u32 {
        self.0 as u32 * resolution.unit_ms()
    }
}

impl Default for PulseLength {
    fn default() -> Self {
        Self(DEFAULT_PULSE_LENGTH)
    }
}

/// Working copy of the persisted settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub pulse: PulseLength,
    pub resolution: Resolution,
}

impl Settings {
    /// Both records at once; the controller loads them at different phases
    #[cfg(test)]
    pub(crate) fn load<S: ByteStore>(store: &mut S) -> Self {
        Self {
            pulse: PulseLength::load(store),
            resolution: Resolution::load(store),
        }
    }

    pub const fn pulse_ms(&self) -> u32 {
        self.pulse.duration_ms(self.resolution)
    }

    /// Save the pulse length. Returns false if the store was busy and the
    /// write was skipped.
    pub fn persist_pulse<S: ByteStore>(&self, store: &mut S) -> bool {
        persist(store, StorageKey::PulseLength, self.pulse.get())
    }

    /// Save the resolution. Returns false if the store was busy and the
    /// write was skipped.
    pub fn persist_resolution<S: ByteStore>(&self, store: &mut S) -> bool {
        persist(store, StorageKey::Resolution, self.resolution.as_u8())
    }
}

// A busy store skips the write, but the caller still waits for it to
// become ready before continuing.
fn persist<S: ByteStore>(store: &mut S, key: StorageKey, value: u8) -> bool {
    let ready = store.is_ready();
    if ready {
        store.update_byte(key, value);
    } else {
        warn!("Store busy, {} not saved", key);
    }
    store.wait_ready();
    ready
}
