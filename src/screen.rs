use crate::engine::{Engine, NES_SCREEN_WIDTH};

/// Copy of the engine's palette-indexed frame, one byte per pixel.
pub fn current_frame<E: Engine>(engine: &E) -> Vec<u8> {
    let len = NES_SCREEN_WIDTH * engine.screen_height();
    let frame = engine.frame_buffer();
    let mut raw = vec![0u8; len];
    let n = frame.len().min(len);
    raw[..n].copy_from_slice(&frame[..n]);
    raw
}

/// Expands palette indices to three bytes per pixel through `palette`.
///
/// Bytes come out blue, green, red.
pub fn to_bgr(raw: &[u8], palette: impl Fn(u8) -> (u8, u8, u8)) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len() * 3);
    for &index in raw {
        let (r, g, b) = palette(index);
        out.extend_from_slice(&[b, g, r]);
    }
    out
}

pub fn screen_bgr<E: Engine>(engine: &E) -> Vec<u8> {
    to_bgr(&current_frame(engine), |i| engine.palette_color(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Buttons;
    use crate::test_support::FakeEngine;
    use proptest::prelude::*;

    #[test]
    fn frame_is_width_times_reported_height() {
        let mut engine = FakeEngine {
            height: 224,
            ..Default::default()
        };
        assert_eq!(current_frame(&engine), vec![0; 256 * 224]);
        engine.step_frame(Buttons::NONE, Buttons::NONE).unwrap();
        let frame = current_frame(&engine);
        assert_eq!(frame.len(), 256 * 224);
        assert_eq!(&frame[..3], &[1, 2, 3]);
    }

    #[test]
    fn known_index_comes_out_blue_green_red() {
        let palette = |i: u8| if i == 0x16 { (0xB5, 0x31, 0x20) } else { (0, 0, 0) };
        assert_eq!(to_bgr(&[0x16, 0x00], palette), vec![0x20, 0x31, 0xB5, 0, 0, 0]);
    }

    #[test]
    fn engine_palette_is_used() {
        let mut engine = FakeEngine {
            height: 1,
            ..Default::default()
        };
        engine.step_frame(Buttons::NONE, Buttons::NONE).unwrap();
        let bgr = screen_bgr(&engine);
        assert_eq!(bgr.len(), 3 * 256);
        // Pixel 0 holds index 1, which the fake palette maps to (1, 254, 0).
        assert_eq!(&bgr[..3], &[0, 254, 1]);
    }

    proptest! {
        #[test]
        fn output_is_three_bytes_per_pixel(raw in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let bgr = to_bgr(&raw, |i| (i, i ^ 0xFF, i.wrapping_mul(3)));
            prop_assert_eq!(bgr.len(), 3 * raw.len());
            for (px, &i) in bgr.chunks_exact(3).zip(&raw) {
                prop_assert_eq!(px, &[i.wrapping_mul(3), i ^ 0xFF, i][..]);
            }
        }
    }
}
