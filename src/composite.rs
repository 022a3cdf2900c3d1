//! Layer compositing
//!
//! `OFF` pixels are transparent: they never cover the layer below. An
//! effect that needs real black at some position must leave that position
//! uncovered instead.

use crate::Frame;
use crate::color::{OFF, Rgb};

/// Merge `over` on top of `under`
pub fn merge<const N: usize>(under: &Frame<N>, over: &Frame<N>) -> Frame<N> {
    let mut frame = *under;
    merge_into(&mut frame, over);
    frame
}

/// Merge `over` on top of `under` in place
///
/// Pixels past the end of the shorter slice are left untouched.
pub fn merge_into(under: &mut [Rgb], over: &[Rgb]) {
    for (pixel, layer) in under.iter_mut().zip(over) {
        if *layer != OFF {
            *pixel = *layer;
        }
    }
}
