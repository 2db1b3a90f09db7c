//! Frame start search over a raw byte window.
//!
//! The scan is a single forward pass and the earliest header pair wins.
//! Nothing is validated here: a payload that happens to contain `0x20 0x40`
//! ahead of the real header locks alignment onto the wrong offset, and the
//! subsequent checksum is what rejects it.

use crate::frame::HEADER;

/// Header as it appears on the wire (low byte first)
pub const HEADER_BYTES: [u8; 2] = HEADER.to_le_bytes();

/// Offset of the first header pair in `window`
///
/// Returns `None` for windows shorter than two bytes or with no match. Never
/// reads outside `window`.
pub fn find_header(window: &[u8]) -> Option<usize> {
    window
        .windows(HEADER_BYTES.len())
        .position(|pair| pair == HEADER_BYTES)
}

/// View of `window` starting at the first header pair
///
/// Borrowed, not copied. The view may be shorter than a frame if the header
/// was found near the end of the window; the caller reads the rest.
pub fn resynchronize(window: &[u8]) -> Option<&[u8]> {
    find_header(window).map(|offset| &window[offset..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Frame, CHANNEL_COUNT, FRAME_LEN};
    use proptest::prelude::*;

    #[test]
    fn test_header_at_start() {
        let bytes = Frame::new([1500; CHANNEL_COUNT]).encode();
        assert_eq!(find_header(&bytes), Some(0));
        let view = resynchronize(&bytes).unwrap();
        assert_eq!(view.len(), FRAME_LEN);
        assert!(core::ptr::eq(view.as_ptr(), bytes.as_ptr()));
    }

    #[test]
    fn test_header_mid_window() {
        let window = [0x05, 0x40, 0x20, 0x20, 0x40, 0xDC, 0x05];
        let view = resynchronize(&window).unwrap();
        assert_eq!(view, &[0x20, 0x40, 0xDC, 0x05]);
        assert_eq!(find_header(&window), Some(3));
    }

    #[test]
    fn test_reversed_byte_order_is_not_a_header() {
        assert_eq!(find_header(&[0x40, 0x20, 0x11]), None);
        // A following low byte completes a real pair
        assert_eq!(find_header(&[0x40, 0x20, 0x40]), Some(1));
    }

    #[test]
    fn test_header_in_last_two_bytes() {
        let window = [0x00, 0x00, 0x00, 0x20, 0x40];
        assert_eq!(resynchronize(&window), Some(&window[3..]));
    }

    #[test]
    fn test_trailing_low_byte_is_not_found() {
        // Header split across the window boundary
        assert_eq!(find_header(&[0x11, 0x22, 0x20]), None);
    }

    #[test]
    fn test_short_windows() {
        assert_eq!(resynchronize(&[]), None);
        assert_eq!(resynchronize(&[0x20]), None);
    }

    fn two_frames(first: [u16; CHANNEL_COUNT], second: [u16; CHANNEL_COUNT]) -> [u8; 2 * FRAME_LEN] {
        let mut window = [0u8; 2 * FRAME_LEN];
        window[..FRAME_LEN].copy_from_slice(&Frame::new(first).encode());
        window[FRAME_LEN..].copy_from_slice(&Frame::new(second).encode());
        window
    }

    #[test]
    fn test_false_positive_in_payload_wins() {
        // A channel value of 0x4020 ahead of the real header
        let mut channels = [1000; CHANNEL_COUNT];
        channels[12] = HEADER;
        let window = two_frames(channels, [1500; CHANNEL_COUNT]);

        // Start listening mid-frame, just before the fake header
        let stream = &window[20..];
        let view = resynchronize(stream).unwrap();
        assert_eq!(stream.len() - view.len(), 6);
        assert!(matches!(
            Frame::decode(view),
            Err(crate::FrameError::InvalidChecksum { .. })
        ));
    }

    #[test]
    fn test_false_positive_passes_on_repeated_frame() {
        // Known weakness: a word-aligned rotation of identical frames sums
        // to the same value, so the fake alignment checks out.
        let mut channels = [1000; CHANNEL_COUNT];
        channels[12] = HEADER;
        let window = two_frames(channels, channels);

        let view = resynchronize(&window[20..]).unwrap();
        let fake = Frame::decode(view).unwrap();
        assert_ne!(fake.channels, channels);
    }

    proptest! {
        #[test]
        fn prop_finds_header_at_offset(
            offset in 0usize..64,
            filler in 0u8..0x20,
        ) {
            // Filler never contains 0x20, so no earlier match exists
            let mut window = [filler; 96];
            window[offset..offset + FRAME_LEN]
                .copy_from_slice(&Frame::new([filler as u16; CHANNEL_COUNT]).encode());
            prop_assert_eq!(find_header(&window), Some(offset));
            let view = resynchronize(&window).unwrap();
            prop_assert!(Frame::decode(view).is_ok());
        }

        #[test]
        fn prop_no_header_not_found(window in prop::collection::vec(0x21u8..=0xFF, 0..80)) {
            prop_assert_eq!(resynchronize(&window), None);
        }
    }
}
