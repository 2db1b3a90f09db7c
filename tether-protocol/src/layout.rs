//! Wire layout of a frame.
//!
//! Field placement is data, not a struct reinterpretation: every field is a
//! [`Slot`] with an explicit offset, width and byte order, and both encode and
//! decode walk [`LAYOUT`].

use crate::frame::{CHANNEL_COUNT, FRAME_LEN};

/// Byte order of a multi-byte slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endian {
    Little,
    Big,
}

/// What a slot carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotKind {
    Header,
    /// Payload channel, by index
    Channel(u8),
    Checksum,
}

/// One fixed-width 16-bit field in the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slot {
    pub kind: SlotKind,
    pub offset: usize,
    pub width: usize,
    pub endian: Endian,
}

impl Slot {
    const fn le16(kind: SlotKind, offset: usize) -> Self {
        Self {
            kind,
            offset,
            width: 2,
            endian: Endian::Little,
        }
    }

    /// Read this slot out of a full frame
    pub fn read(&self, bytes: &[u8; FRAME_LEN]) -> u16 {
        let raw = [bytes[self.offset], bytes[self.offset + 1]];
        match self.endian {
            Endian::Little => u16::from_le_bytes(raw),
            Endian::Big => u16::from_be_bytes(raw),
        }
    }

    /// Write `value` into this slot of a full frame
    pub fn write(&self, bytes: &mut [u8; FRAME_LEN], value: u16) {
        let raw = match self.endian {
            Endian::Little => value.to_le_bytes(),
            Endian::Big => value.to_be_bytes(),
        };
        bytes[self.offset..self.offset + self.width].copy_from_slice(&raw);
    }
}

/// Number of slots: header, channels, checksum
pub const SLOT_COUNT: usize = CHANNEL_COUNT + 2;

/// The frame schema, in wire order
pub const LAYOUT: [Slot; SLOT_COUNT] = build_layout();

const fn build_layout() -> [Slot; SLOT_COUNT] {
    let mut slots = [Slot::le16(SlotKind::Header, 0); SLOT_COUNT];
    let mut i = 0;
    while i < CHANNEL_COUNT {
        slots[i + 1] = Slot::le16(SlotKind::Channel(i as u8), 2 + 2 * i);
        i += 1;
    }
    slots[SLOT_COUNT - 1] = Slot::le16(SlotKind::Checksum, 2 + 2 * CHANNEL_COUNT);
    slots
}

/// Header slot
pub const HEADER_SLOT: Slot = LAYOUT[0];

/// Checksum trailer slot
pub const CHECKSUM_SLOT: Slot = LAYOUT[SLOT_COUNT - 1];
