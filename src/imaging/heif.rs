//! HEIF-family input (`.heic`, `.heif`, `.avif`).
//!
//! Detection works on both the extension and the ISOBMFF `ftyp` box, so a
//! phone export renamed to `.jpg` still lands here. Decoding is an optional
//! extension behind the `heif` cargo feature:
//!
//! - AV1 payloads (AVIF) are decoded with `avif-parse` (container) and
//!   `rav1d` (AV1), then converted from YCbCr to RGB8.
//! - HEVC payloads (HEIC) go through libheif when built with the `heic`
//!   feature, and fail with [`BackendError::UnsupportedFormat`] otherwise.
//!
//! The container's rotation (`irot`) and mirror (`imir`) properties on the
//! primary item are applied, so the result is upright. libheif does this
//! itself; for AVIF they are read by [`primary_item_transforms`]. EXIF
//! orientation inside HEIF is ignored, as the container transforms take
//! precedence.

use super::backend::BackendError;
use image::DynamicImage;
use std::io::Read;
use std::path::Path;

const HEIF_EXTENSIONS: &[&str] = &["heic", "heif", "hif", "avif"];

/// Brands whose primary item is HEVC-coded.
const HEVC_BRANDS: &[&[u8; 4]] = &[
    b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"hevm", b"hevs",
];

/// Brands that mark a HEIF container of any codec.
const HEIF_BRANDS: &[&[u8; 4]] = &[b"mif1", b"msf1", b"avif", b"avis"];

/// Read the brands declared in the leading `ftyp` box (major + compatible).
fn ftyp_brands(header: &[u8]) -> Vec<[u8; 4]> {
    if header.len() < 16 || &header[4..8] != b"ftyp" {
        return Vec::new();
    }
    let box_len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
    let end = box_len.min(header.len());

    // major brand at 8..12, minor version at 12..16, compatible brands after
    let mut brands = vec![[header[8], header[9], header[10], header[11]]];
    let mut offset = 16;
    while offset + 4 <= end {
        brands.push([
            header[offset],
            header[offset + 1],
            header[offset + 2],
            header[offset + 3],
        ]);
        offset += 4;
    }
    brands
}

fn has_hevc_brand(brands: &[[u8; 4]]) -> bool {
    brands.iter().any(|b| HEVC_BRANDS.contains(&b))
}

fn has_avif_brand(brands: &[[u8; 4]]) -> bool {
    brands.iter().any(|b| b == b"avif" || b == b"avis")
}

fn read_header(path: &Path) -> Result<Vec<u8>, BackendError> {
    let mut header = Vec::with_capacity(64);
    std::fs::File::open(path)?
        .take(64)
        .read_to_end(&mut header)?;
    Ok(header)
}

/// Whether `path` should be decoded as HEIF rather than by the `image` crate.
pub fn is_heif(path: &Path) -> Result<bool, BackendError> {
    let by_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| HEIF_EXTENSIONS.iter().any(|h| e.eq_ignore_ascii_case(h)));

    let brands = ftyp_brands(&read_header(path)?);
    let by_content = brands
        .iter()
        .any(|b| HEVC_BRANDS.contains(&b) || HEIF_BRANDS.contains(&b));

    Ok(by_extension || by_content)
}

/// Decode a HEIF-family file to pixels.
pub fn decode(path: &Path) -> Result<DynamicImage, BackendError> {
    let data = std::fs::read(path)?;
    let brands = ftyp_brands(&data[..data.len().min(64)]);

    if has_hevc_brand(&brands) && !has_avif_brand(&brands) {
        return decode_hevc(path, &data);
    }

    let image = decode_av1(path, &data)?;
    let transforms = primary_item_transforms(&data);
    if !transforms.is_empty() {
        tracing::debug!(path = %path.display(), ?transforms, "applying HEIF transforms");
    }
    Ok(apply_transforms(image, &transforms))
}

/// A geometric transform attached to the primary item, applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// `irot`: anticlockwise quarter turns, 0-3.
    Rotate(u8),
    /// `imir` axis 0: top and bottom swap.
    FlipVertical,
    /// `imir` axis 1: left and right swap.
    FlipHorizontal,
}

pub fn apply_transforms(mut image: DynamicImage, transforms: &[Transform]) -> DynamicImage {
    for transform in transforms {
        image = match transform {
            Transform::Rotate(1) => image.rotate270(),
            Transform::Rotate(2) => image.rotate180(),
            Transform::Rotate(3) => image.rotate90(),
            Transform::Rotate(_) => image,
            Transform::FlipVertical => image.flipv(),
            Transform::FlipHorizontal => image.fliph(),
        };
    }
    image
}

fn be_u16(b: &[u8], at: usize) -> Option<u16> {
    Some(u16::from_be_bytes(b.get(at..at + 2)?.try_into().ok()?))
}

fn be_u32(b: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_be_bytes(b.get(at..at + 4)?.try_into().ok()?))
}

/// Child boxes of an ISOBMFF box body (or of a whole file): `(type, body)`.
fn child_boxes(mut data: &[u8]) -> Vec<([u8; 4], &[u8])> {
    let mut children = Vec::new();
    while data.len() >= 8 {
        let Some(size) = be_u32(data, 0) else { break };
        let kind = [data[4], data[5], data[6], data[7]];
        let (header, total) = match size {
            0 => (8, data.len()),
            1 => match data.get(8..16).and_then(|b| <[u8; 8]>::try_from(b).ok()) {
                Some(large) => (16, u64::from_be_bytes(large) as usize),
                None => break,
            },
            n => (8, n as usize),
        };
        if total < header || total > data.len() {
            break;
        }
        children.push((kind, &data[header..total]));
        data = &data[total..];
    }
    children
}

fn find_box<'a>(data: &'a [u8], kind: &[u8; 4]) -> Option<&'a [u8]> {
    child_boxes(data)
        .into_iter()
        .find(|(k, _)| k == kind)
        .map(|(_, body)| body)
}

/// `irot`/`imir` properties associated with the primary item, in
/// association order. A malformed or absent `meta` yields no transforms.
pub fn primary_item_transforms(data: &[u8]) -> Vec<Transform> {
    parse_primary_transforms(data).unwrap_or_default()
}

fn parse_primary_transforms(data: &[u8]) -> Option<Vec<Transform>> {
    // meta, pitm, ipma are full boxes: 1 byte version + 3 bytes flags
    let meta = find_box(data, b"meta")?.get(4..)?;

    let pitm = find_box(meta, b"pitm")?;
    let primary = match pitm.first()? {
        0 => be_u16(pitm, 4)? as u32,
        _ => be_u32(pitm, 4)?,
    };

    let iprp = find_box(meta, b"iprp")?;
    let properties = child_boxes(find_box(iprp, b"ipco")?);

    let mut transforms = Vec::new();
    for (_, ipma) in child_boxes(iprp).into_iter().filter(|(k, _)| k == b"ipma") {
        let version = *ipma.first()?;
        let wide_index = ipma.get(3)? & 1 == 1;
        let entries = be_u32(ipma, 4)?;
        let mut pos = 8;

        for _ in 0..entries {
            let item = if version < 1 {
                pos += 2;
                be_u16(ipma, pos - 2)? as u32
            } else {
                pos += 4;
                be_u32(ipma, pos - 4)?
            };
            let count = *ipma.get(pos)?;
            pos += 1;

            for _ in 0..count {
                let index = if wide_index {
                    pos += 2;
                    (be_u16(ipma, pos - 2)? & 0x7FFF) as usize
                } else {
                    pos += 1;
                    (ipma.get(pos - 1)? & 0x7F) as usize
                };
                if item != primary || index == 0 {
                    continue;
                }
                match properties.get(index - 1) {
                    Some((kind, body)) if kind == b"irot" => {
                        transforms.push(Transform::Rotate(body.first()? & 0b11));
                    }
                    Some((kind, body)) if kind == b"imir" => {
                        transforms.push(if body.first()? & 1 == 0 {
                            Transform::FlipVertical
                        } else {
                            Transform::FlipHorizontal
                        });
                    }
                    _ => {}
                }
            }
        }
    }
    Some(transforms)
}

#[cfg(not(feature = "heic"))]
fn decode_hevc(path: &Path, _data: &[u8]) -> Result<DynamicImage, BackendError> {
    Err(BackendError::UnsupportedFormat(format!(
        "{}: HEVC-coded HEIF (HEIC) needs the `heic` feature (libheif)",
        path.display()
    )))
}

/// Decode HEIC through libheif, which also applies `irot`/`imir`.
#[cfg(feature = "heic")]
fn decode_hevc(path: &Path, data: &[u8]) -> Result<DynamicImage, BackendError> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let failed = |message: String| BackendError::Decode {
        path: path.to_path_buf(),
        message,
    };

    let lib = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(data).map_err(|e| failed(e.to_string()))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| failed(e.to_string()))?;
    let decoded = lib
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| failed(e.to_string()))?;

    let planes = decoded.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| failed("libheif returned no interleaved RGB plane".to_string()))?;

    let row_bytes = plane.width as usize * 3;
    let mut rgb = Vec::with_capacity(row_bytes * plane.height as usize);
    for row in plane.data.chunks(plane.stride).take(plane.height as usize) {
        rgb.extend_from_slice(row.get(..row_bytes).ok_or_else(|| {
            failed("libheif plane row is shorter than its width".to_string())
        })?);
    }

    image::RgbImage::from_raw(plane.width, plane.height, rgb)
        .map(DynamicImage::ImageRgb8)
        .ok_or_else(|| failed("decoded HEIC frame has an inconsistent size".to_string()))
}

#[cfg(not(feature = "heif"))]
fn decode_av1(path: &Path, _data: &[u8]) -> Result<DynamicImage, BackendError> {
    Err(BackendError::UnsupportedFormat(format!(
        "{}: HEIF support not compiled in (enable the `heif` feature)",
        path.display()
    )))
}

#[cfg(feature = "heif")]
fn decode_av1(path: &Path, data: &[u8]) -> Result<DynamicImage, BackendError> {
    use rav1d::include::dav1d::data::Dav1dData;
    use rav1d::include::dav1d::dav1d::Dav1dSettings;
    use rav1d::include::dav1d::picture::Dav1dPicture;
    use rav1d::src::lib as dav1d;
    use std::mem::MaybeUninit;
    use std::ptr::NonNull;

    let failed = |message: String| BackendError::Decode {
        path: path.to_path_buf(),
        message,
    };

    let avif = avif_parse::read_avif(&mut std::io::Cursor::new(data))
        .map_err(|e| failed(format!("invalid AVIF container: {e:?}")))?;
    let payload: &[u8] = &avif.primary_item;

    let mut settings = MaybeUninit::<Dav1dSettings>::uninit();
    unsafe { dav1d::dav1d_default_settings(NonNull::from(&mut settings).cast()) };
    let mut settings = unsafe { settings.assume_init() };
    settings.n_threads = 1;
    settings.max_frame_delay = 1;

    let mut ctx = None;
    let rc = unsafe { dav1d::dav1d_open(NonNull::new(&mut ctx), NonNull::new(&mut settings)) };
    if rc.0 != 0 {
        return Err(failed(format!("rav1d open failed ({})", rc.0)));
    }

    // Everything after a successful open runs in here so the context is
    // closed on every path.
    let decoded = (|| {
        let mut input = Dav1dData::default();
        let buf = unsafe { dav1d::dav1d_data_create(NonNull::new(&mut input), payload.len()) };
        if buf.is_null() {
            return Err(failed("rav1d could not allocate input".to_string()));
        }
        unsafe { std::ptr::copy_nonoverlapping(payload.as_ptr(), buf, payload.len()) };

        let rc = unsafe { dav1d::dav1d_send_data(ctx, NonNull::new(&mut input)) };
        if rc.0 != 0 {
            unsafe { dav1d::dav1d_data_unref(NonNull::new(&mut input)) };
            return Err(failed(format!("rav1d rejected AV1 data ({})", rc.0)));
        }

        let mut pic: Dav1dPicture = unsafe { std::mem::zeroed() };
        let rc = unsafe { dav1d::dav1d_get_picture(ctx, NonNull::new(&mut pic)) };
        if rc.0 != 0 {
            return Err(failed(format!("rav1d produced no picture ({})", rc.0)));
        }

        let converted = picture_to_rgb(&pic).map_err(failed);
        unsafe { dav1d::dav1d_picture_unref(NonNull::new(&mut pic)) };
        converted
    })();

    unsafe { dav1d::dav1d_close(NonNull::new(&mut ctx)) };

    let (width, height, rgb) = decoded?;
    image::RgbImage::from_raw(width, height, rgb)
        .map(DynamicImage::ImageRgb8)
        .ok_or_else(|| failed("decoded AV1 frame has an inconsistent size".to_string()))
}

/// One YCbCr plane borrowed from a rav1d picture.
#[cfg(feature = "heif")]
#[derive(Clone, Copy)]
struct Plane {
    ptr: *const u8,
    stride: isize,
    /// Samples stored as little-endian u16 (10/12-bit streams).
    wide: bool,
}

#[cfg(feature = "heif")]
impl Plane {
    fn sample(&self, x: u32, y: u32) -> f32 {
        let row = y as isize * self.stride;
        unsafe {
            if self.wide {
                let p = self.ptr.offset(row + x as isize * 2) as *const u16;
                p.read_unaligned() as f32
            } else {
                *self.ptr.offset(row + x as isize) as f32
            }
        }
    }
}

/// BT.601 YCbCr → RGB, with chroma already centred on zero.
#[cfg(feature = "heif")]
fn ycbcr_to_rgb(y: f32, cb: f32, cr: f32) -> [f32; 3] {
    [
        y + 1.402 * cr,
        y - 0.344_136 * cb - 0.714_136 * cr,
        y + 1.772 * cb,
    ]
}

#[cfg(feature = "heif")]
fn picture_to_rgb(
    pic: &rav1d::include::dav1d::picture::Dav1dPicture,
) -> Result<(u32, u32, Vec<u8>), String> {
    use rav1d::include::dav1d::headers::{
        DAV1D_PIXEL_LAYOUT_I400, DAV1D_PIXEL_LAYOUT_I420, DAV1D_PIXEL_LAYOUT_I422,
        DAV1D_PIXEL_LAYOUT_I444,
    };

    let width = pic.p.w as u32;
    let height = pic.p.h as u32;
    let bpc = pic.p.bpc as u32;
    let wide = bpc > 8;

    let plane = |index: usize, stride: isize| {
        pic.data[index]
            .map(|p| Plane {
                ptr: p.as_ptr() as *const u8,
                stride,
                wide,
            })
            .ok_or_else(|| format!("AV1 frame is missing plane {index}"))
    };

    let luma = plane(0, pic.stride[0])?;
    // (horizontal, vertical) chroma subsampling; None for monochrome
    let subsampling = match pic.p.layout {
        DAV1D_PIXEL_LAYOUT_I400 => None,
        DAV1D_PIXEL_LAYOUT_I420 => Some((true, true)),
        DAV1D_PIXEL_LAYOUT_I422 => Some((true, false)),
        DAV1D_PIXEL_LAYOUT_I444 => Some((false, false)),
        other => return Err(format!("unsupported AV1 pixel layout {other}")),
    };
    let chroma = match subsampling {
        Some(ss) => Some((plane(1, pic.stride[1])?, plane(2, pic.stride[1])?, ss)),
        None => None,
    };

    let max = ((1u32 << bpc) - 1) as f32;
    let center = (1u32 << (bpc - 1)) as f32;
    let scale = 255.0 / max;
    let to_u8 = |v: f32| (v * scale).clamp(0.0, 255.0) as u8;

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for row in 0..height {
        for col in 0..width {
            let y = luma.sample(col, row);
            let [r, g, b] = match chroma {
                None => [y, y, y],
                Some((cb_plane, cr_plane, (ss_x, ss_y))) => {
                    let cx = if ss_x { col / 2 } else { col };
                    let cy = if ss_y { row / 2 } else { row };
                    let cb = cb_plane.sample(cx, cy) - center;
                    let cr = cr_plane.sample(cx, cy) - center;
                    ycbcr_to_rgb(y, cb, cr)
                }
            };
            rgb.extend_from_slice(&[to_u8(r), to_u8(g), to_u8(b)]);
        }
    }

    Ok((width, height, rgb))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heic_header() -> Vec<u8> {
        let mut h = Vec::new();
        h.extend_from_slice(&24u32.to_be_bytes());
        h.extend_from_slice(b"ftypheic");
        h.extend_from_slice(&0u32.to_be_bytes());
        h.extend_from_slice(b"mif1heic");
        h.extend_from_slice(&[0u8; 16]);
        h
    }

    #[test]
    fn ftyp_brands_reads_major_and_compatible() {
        let brands = ftyp_brands(&heic_header());
        assert_eq!(brands, vec![*b"heic", *b"mif1", *b"heic"]);
    }

    #[test]
    fn ftyp_brands_ignores_non_isobmff() {
        assert!(ftyp_brands(b"\xFF\xD8\xFF\xE0\0\x10JFIF\0\x01\x01\0\0\x01").is_empty());
        assert!(ftyp_brands(b"short").is_empty());
    }

    #[test]
    fn is_heif_by_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("IMG_0001.HEIC");
        std::fs::write(&path, b"whatever").unwrap();
        assert!(is_heif(&path).unwrap());
    }

    #[test]
    fn is_heif_by_content() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("renamed.jpg");
        std::fs::write(&path, heic_header()).unwrap();
        assert!(is_heif(&path).unwrap());
    }

    #[test]
    fn jpeg_is_not_heif() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        image::RgbImage::new(4, 4).save(&path).unwrap();
        assert!(!is_heif(&path).unwrap());
    }

    #[test]
    fn is_heif_missing_file_is_io_error() {
        let err = is_heif(Path::new("/nonexistent/photo.heic")).unwrap_err();
        assert!(matches!(err, BackendError::Io(_)));
    }

    #[cfg(not(feature = "heic"))]
    #[test]
    fn hevc_payload_is_unsupported() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("phone.heic");
        std::fs::write(&path, heic_header()).unwrap();

        let err = decode(&path).unwrap_err();
        assert!(matches!(err, BackendError::UnsupportedFormat(_)), "got {err:?}");
        assert!(err.to_string().contains("HEIC"));
    }

    #[cfg(feature = "heic")]
    #[test]
    fn hevc_payload_goes_to_libheif() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("phone.heic");
        std::fs::write(&path, heic_header()).unwrap();

        // No meta box, so libheif rejects it as a broken file.
        let err = decode(&path).unwrap_err();
        assert!(matches!(err, BackendError::Decode { .. }), "got {err:?}");
    }

    fn isobmff_box(kind: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut b = ((body.len() + 8) as u32).to_be_bytes().to_vec();
        b.extend_from_slice(kind);
        b.extend_from_slice(body);
        b
    }

    fn full_box(kind: &[u8; 4], version: u8, flags: u8, body: &[u8]) -> Vec<u8> {
        let mut b = vec![version, 0, 0, flags];
        b.extend_from_slice(body);
        isobmff_box(kind, &b)
    }

    /// Container with items 1 (primary) and 2, properties
    /// `[ispe, irot(angle), imir(axis)]`, and the given associations.
    fn container(angle: u8, axis: u8, primary_props: &[u8], other_props: &[u8]) -> Vec<u8> {
        let mut ipco = isobmff_box(b"ispe", &[0; 12]);
        ipco.extend(isobmff_box(b"irot", &[angle]));
        ipco.extend(isobmff_box(b"imir", &[axis]));

        let mut ipma = 2u32.to_be_bytes().to_vec();
        for (item, props) in [(1u16, primary_props), (2u16, other_props)] {
            ipma.extend_from_slice(&item.to_be_bytes());
            ipma.push(props.len() as u8);
            ipma.extend(props.iter().map(|p| p | 0x80));
        }

        let mut iprp = isobmff_box(b"ipco", &ipco);
        iprp.extend(full_box(b"ipma", 0, 0, &ipma));

        let mut meta = full_box(b"pitm", 0, 0, &1u16.to_be_bytes());
        meta.extend(isobmff_box(b"iprp", &iprp));

        let mut file = heic_header();
        file.truncate(24);
        file.extend(full_box(b"meta", 0, 0, &meta));
        file
    }

    #[test]
    fn primary_transforms_in_association_order() {
        let data = container(1, 1, &[1, 3, 2], &[]);
        assert_eq!(
            primary_item_transforms(&data),
            vec![Transform::FlipHorizontal, Transform::Rotate(1)]
        );
    }

    #[test]
    fn transforms_of_other_items_are_ignored() {
        let data = container(3, 0, &[1], &[2, 3]);
        assert!(primary_item_transforms(&data).is_empty());
    }

    #[test]
    fn mirror_axis_zero_flips_vertically() {
        let data = container(0, 0, &[3], &[]);
        assert_eq!(primary_item_transforms(&data), vec![Transform::FlipVertical]);
    }

    #[test]
    fn missing_or_broken_meta_means_no_transforms() {
        assert!(primary_item_transforms(&heic_header()).is_empty());
        let mut data = container(1, 0, &[2], &[]);
        data.truncate(data.len() - 6);
        assert!(primary_item_transforms(&data).is_empty());
    }

    #[test]
    fn apply_transforms_rotates_anticlockwise_then_flips() {
        // 2x1: red | blue
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        }));

        // A quarter turn anticlockwise puts the right column on top.
        let turned = apply_transforms(img.clone(), &[Transform::Rotate(1)]).to_rgb8();
        assert_eq!(turned.dimensions(), (1, 2));
        assert_eq!(turned.get_pixel(0, 0), &image::Rgb([0, 0, 255]));

        let flipped = apply_transforms(img, &[Transform::FlipHorizontal]).to_rgb8();
        assert_eq!(flipped.get_pixel(0, 0), &image::Rgb([0, 0, 255]));
        assert_eq!(flipped.get_pixel(1, 0), &image::Rgb([255, 0, 0]));
    }

    #[cfg(feature = "heif")]
    fn write_test_avif(path: &Path, width: u32, height: u32) {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 96])
        });
        let writer = std::io::BufWriter::new(std::fs::File::create(path).unwrap());
        let encoder = image::codecs::avif::AvifEncoder::new_with_speed_quality(writer, 10, 80);
        DynamicImage::ImageRgb8(img)
            .write_with_encoder(encoder)
            .unwrap();
    }

    #[cfg(feature = "heif")]
    #[test]
    fn decode_avif_keeps_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.avif");
        write_test_avif(&path, 64, 48);

        assert!(is_heif(&path).unwrap());
        let img = decode(&path).unwrap();
        assert_eq!((img.width(), img.height()), (64, 48));
        assert!(!img.color().has_alpha());
    }

    #[cfg(feature = "heif")]
    #[test]
    fn decode_truncated_avif_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.avif");
        let mut header = heic_header();
        header[8..12].copy_from_slice(b"avif");
        std::fs::write(&path, header).unwrap();

        let err = decode(&path).unwrap_err();
        assert!(matches!(err, BackendError::Decode { .. }), "got {err:?}");
    }
}
