//! Pure calculation functions for crop-to-fit geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::CropAnchor;

/// Top-left corner of the crop window inside the resized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropOffset {
    pub x: u32,
    pub y: u32,
}

/// Resize-then-crop plan for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropPlan {
    /// Dimensions to resize the source to before cropping.
    pub resize: (u32, u32),
    /// Window origin, or `None` when the resize already matches the target.
    pub offset: Option<CropOffset>,
}

/// Calculate dimensions needed to fill a target area (resize before crop).
///
/// The side whose ratio leaves slack is scaled to the target exactly, the
/// other keeps the source aspect and is truncated to whole pixels. Ratios
/// are compared by cross-multiplying so equal aspects are detected exactly.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height), both non-zero
/// * `target` - Target area dimensions (width, height), both non-zero
///
/// # Returns
/// * `(width, height)` - Fill dimensions (at least one matches target)
///
/// # Examples
/// ```
/// # use lattice::imaging::calculate_fill_dimensions;
/// // 1600x1200 (4:3) into 800x800: height matches, width = 800 * 1600 / 1200
/// assert_eq!(calculate_fill_dimensions((1600, 1200), (800, 800)), (1066, 800));
/// ```
pub fn calculate_fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = (source.0 as u64, source.1 as u64);
    let (tgt_w, tgt_h) = (target.0 as u64, target.1 as u64);

    // target_ratio vs source_ratio, i.e. tgt_w/tgt_h vs src_w/src_h
    let target_side = tgt_w * src_h;
    let source_side = tgt_h * src_w;

    if target_side > source_side {
        // Target is wider: width matches, height overshoots
        let h = (tgt_w * src_h / src_w).max(tgt_h);
        (target.0, h as u32)
    } else if target_side < source_side {
        // Target is taller: height matches, width overshoots
        let w = (tgt_h * src_w / src_h).max(tgt_w);
        (w as u32, target.1)
    } else {
        target
    }
}

/// Start of a `window`-long span inside `extent` for the given anchor.
pub fn anchor_offset(extent: u32, window: u32, anchor: CropAnchor) -> u32 {
    let slack = extent.saturating_sub(window);
    match anchor {
        CropAnchor::Top => 0,
        CropAnchor::Middle => slack / 2,
        CropAnchor::Bottom => slack,
    }
}

/// Plan a crop-to-fit of `source` into `target`.
pub fn plan_crop(source: (u32, u32), target: (u32, u32), anchor: CropAnchor) -> CropPlan {
    let resize = calculate_fill_dimensions(source, target);
    if resize == target {
        return CropPlan {
            resize,
            offset: None,
        };
    }

    let offset = if resize.1 > target.1 {
        CropOffset {
            x: 0,
            y: anchor_offset(resize.1, target.1, anchor),
        }
    } else {
        CropOffset {
            x: anchor_offset(resize.0, target.0, anchor),
            y: 0,
        }
    };

    CropPlan {
        resize,
        offset: Some(offset),
    }
}
