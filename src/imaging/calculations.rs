//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the output size for one responsive variant.
///
/// The longer original edge is set to `size`; the other edge is scaled by the
/// original aspect ratio and truncated toward zero. Square images take the
/// portrait branch, which yields `(size, size)` either way. Sources smaller
/// than `size` are upscaled. Neither edge drops below 1px.
///
/// # Arguments
/// * `original` - Decoded (already upright) dimensions `(width, height)`
/// * `size` - Target value for the longer edge
///
/// # Examples
/// ```
/// # use responsive_variants::imaging::calculate_target_dimensions;
/// // 3:2 landscape → 400x266 (266.67 truncated)
/// assert_eq!(calculate_target_dimensions((3000, 2000), 400), (400, 266));
///
/// // 2:3 portrait → 266x400
/// assert_eq!(calculate_target_dimensions((2000, 3000), 400), (266, 400));
/// ```
pub fn calculate_target_dimensions(original: (u32, u32), size: u32) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    let ratio = orig_w as f64 / orig_h as f64;

    let (w, h) = if orig_w > orig_h {
        (size, (size as f64 / ratio) as u32)
    } else {
        ((size as f64 * ratio) as u32, size)
    };

    (w.max(1), h.max(1))
}

/// Target dimensions for a single width, paired with the requested size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSize {
    /// Requested size; used in the output filename (`_400w`).
    pub target: u32,
    pub width: u32,
    pub height: u32,
}

/// Calculate the variant sizes for every requested width, in request order.
pub fn calculate_variant_sizes(original: (u32, u32), sizes: &[u32]) -> Vec<VariantSize> {
    sizes
        .iter()
        .map(|&target| {
            let (width, height) = calculate_target_dimensions(original, target);
            VariantSize {
                target,
                width,
                height,
            }
        })
        .collect()
}
