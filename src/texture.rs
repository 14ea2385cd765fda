//! Texture decoding, registration, and unit assignment.
//!
//! Textures are addressed two ways: by a caller-chosen *tag* (a string used
//! at scene-authoring time) and by the *unit* the texture is bound to on the
//! GPU. The [`TextureRegistry`] owns the mapping between the two. The unit is
//! simply the 0-based registration order, so the draw loop can select a
//! texture by writing its slot index as a sampler uniform, provided
//! [`TextureRegistry::bind_all`] ran once after registration.
//!
//! Decoding goes through the `image` crate. Images are flipped vertically at
//! load so row 0 of the pixel data is the bottom of the picture, matching the
//! UV origin of the generated meshes, and only 3- and 4-channel images are
//! accepted.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Upper bound on concurrently bound textures, one per texture unit.
///
/// Sixteen units is the floor guaranteed by the kinds of GPUs this targets.
/// Registration past the limit fails with [`TextureError::UnitsExhausted`].
pub const MAX_TEXTURE_UNITS: usize = 16;

/// Errors from texture decoding and registration.
#[derive(Debug)]
pub enum TextureError {
    /// The file could not be read or decoded.
    Image(image::ImageError),
    /// The image is neither RGB nor RGBA.
    UnsupportedChannelCount { count: u8 },
    /// A texture with this tag is already registered.
    DuplicateTag(String),
    /// Every texture unit already has a registration.
    UnitsExhausted,
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Image(e) => write!(f, "image error: {}", e),
            TextureError::UnsupportedChannelCount { count } => {
                write!(f, "unsupported channel count: {}", count)
            }
            TextureError::DuplicateTag(tag) => {
                write!(f, "texture tag '{}' already registered", tag)
            }
            TextureError::UnitsExhausted => {
                write!(f, "all {} texture units in use", MAX_TEXTURE_UNITS)
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::Image(e)
    }
}

/// Decoded, vertically flipped pixel data ready for GPU upload.
#[derive(Clone, Debug)]
pub struct TextureImage {
    /// Raw 8-bit pixel rows, bottom row first, `channels` bytes per pixel.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// 3 (RGB) or 4 (RGBA).
    pub channels: u8,
}

impl TextureImage {
    /// Decodes the image at `path`.
    ///
    /// Fails with [`TextureError::UnsupportedChannelCount`] for anything that
    /// is not 3- or 4-channel; 16-bit sources are narrowed to 8 bits.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let img = image::open(path.as_ref())?;
        let channels = img.color().channel_count();
        if channels != 3 && channels != 4 {
            return Err(TextureError::UnsupportedChannelCount { count: channels });
        }

        let flipped = img.flipv();
        let (width, height) = (flipped.width(), flipped.height());
        let pixels = if channels == 3 {
            flipped.to_rgb8().into_raw()
        } else {
            flipped.to_rgba8().into_raw()
        };

        Ok(Self {
            pixels,
            width,
            height,
            channels,
        })
    }

    /// The pixel data as RGBA, expanding RGB with an opaque alpha.
    pub fn rgba_pixels(&self) -> Cow<'_, [u8]> {
        if self.channels == 4 {
            return Cow::Borrowed(&self.pixels);
        }
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for px in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(px);
            rgba.push(u8::MAX);
        }
        Cow::Owned(rgba)
    }
}

/// Opaque reference to a texture owned by a [`TextureUnits`] backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// GPU texture storage addressed by fixed texture units.
///
/// The registry drives this seam; backends are expected to upload with
/// repeat wrapping, linear filtering, and mipmaps.
pub trait TextureUnits {
    /// Uploads an image and returns a handle to the new texture.
    fn create(&mut self, image: &TextureImage, label: &str) -> TextureHandle;

    /// Points `unit` at the given texture.
    fn bind(&mut self, unit: usize, handle: TextureHandle);

    /// Frees the texture behind `handle`.
    fn delete(&mut self, handle: TextureHandle);
}

/// One registration: the tag and the backend handle it resolved to.
#[derive(Clone, Debug)]
pub struct TextureEntry {
    pub tag: String,
    pub handle: TextureHandle,
}

/// Tagged textures in registration order.
///
/// Entries keep their insertion order because the order *is* the texture
/// unit assignment; a tag index sits alongside for O(1) lookup. Tags are
/// unique: re-registering a tag fails rather than shadowing the original.
#[derive(Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    index: HashMap<String, usize>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `path` and registers it under `tag`, uploading through
    /// `units`. On success the texture occupies the next free unit slot.
    ///
    /// Failure leaves the registry untouched; a missing or undecodable file
    /// is recoverable and later lookups of `tag` simply return `None`.
    pub fn register(
        &mut self,
        units: &mut impl TextureUnits,
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<(), TextureError> {
        if self.index.contains_key(tag) {
            return Err(TextureError::DuplicateTag(tag.to_string()));
        }
        if self.entries.len() >= MAX_TEXTURE_UNITS {
            return Err(TextureError::UnitsExhausted);
        }

        let path = path.as_ref();
        let image = TextureImage::load(path)?;
        log::info!(
            "loaded texture '{}' from {}: {}x{}, {} channels",
            tag,
            path.display(),
            image.width,
            image.height,
            image.channels
        );

        let handle = units.create(&image, tag);
        self.index.insert(tag.to_string(), self.entries.len());
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        Ok(())
    }

    /// Binds every registered texture to the unit equal to its slot, in
    /// registration order. Call once after all registrations; the sampler
    /// indices written during rendering assume these bindings.
    pub fn bind_all(&self, units: &mut impl TextureUnits) {
        for (slot, entry) in self.entries.iter().enumerate() {
            units.bind(slot, entry.handle);
        }
    }

    /// The handle registered under `tag`, if any.
    pub fn handle(&self, tag: &str) -> Option<TextureHandle> {
        self.index.get(tag).map(|&i| self.entries[i].handle)
    }

    /// The texture unit `tag` is bound to, if registered.
    ///
    /// `None` is the only "not found" signal; a missing tag can never be
    /// mistaken for unit 0.
    pub fn slot(&self, tag: &str) -> Option<usize> {
        self.index.get(tag).copied()
    }

    /// Frees every registered texture and empties the registry.
    pub fn release_all(&mut self, units: &mut impl TextureUnits) {
        for entry in self.entries.drain(..) {
            units.delete(entry.handle);
        }
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered entries in unit order.
    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeUnits {
        created: u32,
        bound: Vec<(usize, TextureHandle)>,
        deleted: Vec<TextureHandle>,
    }

    impl TextureUnits for FakeUnits {
        fn create(&mut self, _image: &TextureImage, _label: &str) -> TextureHandle {
            let handle = TextureHandle(self.created);
            self.created += 1;
            handle
        }

        fn bind(&mut self, unit: usize, handle: TextureHandle) {
            self.bound.push((unit, handle));
        }

        fn delete(&mut self, handle: TextureHandle) {
            self.deleted.push(handle);
        }
    }

    fn rgb_fixture(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn load_accepts_rgb_and_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let rgb = rgb_fixture(dir.path(), "rgb.png");
        let rgba = dir.path().join("rgba.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 4]))
            .save(&rgba)
            .unwrap();

        assert_eq!(TextureImage::load(&rgb).unwrap().channels, 3);
        assert_eq!(TextureImage::load(&rgba).unwrap().channels, 4);
    }

    #[test]
    fn load_rejects_grayscale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        image::GrayImage::from_pixel(2, 2, image::Luma([128]))
            .save(&path)
            .unwrap();

        match TextureImage::load(&path) {
            Err(TextureError::UnsupportedChannelCount { count: 1 }) => {}
            other => panic!("expected channel-count rejection, got {other:?}"),
        }
    }

    #[test]
    fn load_flips_rows_vertically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flip.png");
        let mut img = image::RgbImage::new(1, 2);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(0, 1, image::Rgb([0, 0, 255]));
        img.save(&path).unwrap();

        let loaded = TextureImage::load(&path).unwrap();
        assert_eq!(&loaded.pixels[..3], &[0, 0, 255], "row 0 should be the bottom row");
    }

    #[test]
    fn rgb_expands_to_opaque_rgba() {
        let image = TextureImage {
            pixels: vec![1, 2, 3, 4, 5, 6],
            width: 2,
            height: 1,
            channels: 3,
        };
        assert_eq!(image.rgba_pixels().as_ref(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn slots_follow_registration_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = rgb_fixture(dir.path(), "tex.png");
        let mut units = FakeUnits::default();
        let mut registry = TextureRegistry::new();

        registry.register(&mut units, &path, "desk").unwrap();
        registry.register(&mut units, &path, "lamp").unwrap();
        registry.register(&mut units, &path, "mouse").unwrap();

        assert_eq!(registry.slot("desk"), Some(0));
        assert_eq!(registry.slot("lamp"), Some(1));
        assert_eq!(registry.slot("mouse"), Some(2));
        assert!(registry.handle("lamp").is_some());
    }

    #[test]
    fn unknown_tag_returns_none() {
        let registry = TextureRegistry::new();
        assert_eq!(registry.slot("nope"), None);
        assert_eq!(registry.handle("nope"), None);
    }

    #[test]
    fn failed_decode_leaves_registry_unchanged() {
        let mut units = FakeUnits::default();
        let mut registry = TextureRegistry::new();

        let result = registry.register(&mut units, "/no/such/file.png", "ghost");
        assert!(matches!(result, Err(TextureError::Image(_))));
        assert!(registry.is_empty());
        assert_eq!(units.created, 0);
        assert_eq!(registry.handle("ghost"), None);
    }

    #[test]
    fn duplicate_tags_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = rgb_fixture(dir.path(), "tex.png");
        let mut units = FakeUnits::default();
        let mut registry = TextureRegistry::new();

        registry.register(&mut units, &path, "desk").unwrap();
        let result = registry.register(&mut units, &path, "desk");
        assert!(matches!(result, Err(TextureError::DuplicateTag(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registration_stops_at_the_unit_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = rgb_fixture(dir.path(), "tex.png");
        let mut units = FakeUnits::default();
        let mut registry = TextureRegistry::new();

        for i in 0..MAX_TEXTURE_UNITS {
            registry.register(&mut units, &path, &format!("tex{i}")).unwrap();
        }
        let result = registry.register(&mut units, &path, "overflow");
        assert!(matches!(result, Err(TextureError::UnitsExhausted)));
        assert_eq!(registry.len(), MAX_TEXTURE_UNITS);
    }

    #[test]
    fn bind_all_binds_in_unit_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = rgb_fixture(dir.path(), "tex.png");
        let mut units = FakeUnits::default();
        let mut registry = TextureRegistry::new();

        registry.register(&mut units, &path, "a").unwrap();
        registry.register(&mut units, &path, "b").unwrap();
        registry.bind_all(&mut units);

        assert_eq!(
            units.bound,
            vec![(0, TextureHandle(0)), (1, TextureHandle(1))]
        );
    }

    #[test]
    fn release_all_frees_every_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = rgb_fixture(dir.path(), "tex.png");
        let mut units = FakeUnits::default();
        let mut registry = TextureRegistry::new();

        registry.register(&mut units, &path, "a").unwrap();
        registry.register(&mut units, &path, "b").unwrap();
        registry.release_all(&mut units);

        assert_eq!(units.deleted, vec![TextureHandle(0), TextureHandle(1)]);
        assert!(registry.is_empty());
        assert_eq!(registry.slot("a"), None);
    }
}
