//! End-to-end save of thumbnail-bearing records against real files.
//!
//! Uses the public API only: an in-memory record store, the filesystem
//! image backend and a config loaded from a `lattice.toml` on disk.

use image::{GenericImageView, Rgb, RgbImage};
use lattice::config::{self, CONFIG_FILENAME};
use lattice::imaging::{RustBackend, get_dimensions};
use lattice::records::{
    Described, Hooks, Lifecycle, LifecycleError, MemoryStore, Record, RecordId, RecordStore,
    SaveOptions, SiteId, SiteScope, Slugged, Thumbnail,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Default)]
struct Gallery {
    id: Option<RecordId>,
    site: SiteScope,
    slugged: Slugged,
    described: Described,
    cover: Thumbnail,
}

impl Record for Gallery {
    const KIND: &'static str = "gallery";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn site_scope_mut(&mut self) -> Option<&mut SiteScope> {
        Some(&mut self.site)
    }

    fn slugged_mut(&mut self) -> Option<&mut Slugged> {
        Some(&mut self.slugged)
    }

    fn described_mut(&mut self) -> Option<&mut Described> {
        Some(&mut self.described)
    }

    fn thumbnail(&self) -> Option<&Path> {
        self.cover.path()
    }
}

/// Top half white, bottom half black.
fn write_upload(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_fn(width, height, |_, y| {
        if y < height / 2 {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    })
    .save(&path)
    .unwrap();
    path
}

fn gallery(title: &str, content: &str, cover: &Path) -> Gallery {
    Gallery {
        slugged: Slugged::new(title),
        described: Described {
            content: content.into(),
            description: None,
        },
        cover: Thumbnail::new(cover),
        ..Gallery::default()
    }
}

#[test]
fn create_crops_upload_with_configured_box() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join(CONFIG_FILENAME);
    std::fs::write(
        &config_path,
        "[images]\nuploaded_img_size = [200, 100]\ncrop_anchor = \"top\"\n\n[site]\ncurrent_site = 3\n",
    )
    .unwrap();
    let config = config::load_config(&config_path).unwrap();

    let upload = write_upload(tmp.path(), "cover.png", 300, 300);
    let mut lc = Lifecycle::new(
        MemoryStore::new(),
        RustBackend::with_quality(config.images.quality()),
        Hooks::new().crop_thumbnails::<Gallery>(),
        config,
    );

    let mut g = gallery(
        "Winter Light",
        "# Winter\n\nShort days, long shadows.\n\nMore later.",
        &upload,
    );
    let outcome = lc.save(&mut g, SaveOptions::default()).unwrap();

    assert!(outcome.created);
    assert_eq!(g.site.site, Some(SiteId(3)));
    assert_eq!(g.slugged.slug(), Some("winter-light"));
    assert_eq!(
        g.described.description.as_deref(),
        Some("Short days, long shadows.")
    );
    assert!(lc.store().exists("gallery", "winter-light"));

    let dims = outcome.cropped.unwrap();
    assert_eq!((dims.width, dims.height), (200, 100));
    assert_eq!(
        get_dimensions(lc.images(), &upload).unwrap(),
        (200, 100)
    );

    // Top anchor keeps the white half
    let stored = image::open(&upload).unwrap();
    assert_eq!(stored.get_pixel(100, 10).0[0], 255);
    assert_eq!(stored.get_pixel(100, 90).0[0], 255);
}

#[test]
fn update_leaves_cropped_file_alone() {
    let tmp = TempDir::new().unwrap();
    let upload = write_upload(tmp.path(), "cover.jpg", 1600, 1200);
    let mut lc = Lifecycle::new(
        MemoryStore::new(),
        RustBackend::new(),
        Hooks::new().crop_thumbnails::<Gallery>(),
        config::resolve_config(None).unwrap(),
    );

    let mut g = gallery("Dawn", "Early.", &upload);
    lc.save(&mut g, SaveOptions::default()).unwrap();
    let after_create = std::fs::read(&upload).unwrap();
    assert_eq!(image::image_dimensions(&upload).unwrap(), (800, 800));

    g.slugged.title = "Dawn, again".into();
    let outcome = lc.save(&mut g, SaveOptions::default()).unwrap();

    assert!(!outcome.created);
    assert_eq!(outcome.cropped, None);
    assert_eq!(std::fs::read(&upload).unwrap(), after_create);
    assert_eq!(g.slugged.slug(), Some("dawn"));
}

#[test]
fn same_title_twice_gets_two_slugs() {
    let tmp = TempDir::new().unwrap();
    let first_upload = write_upload(tmp.path(), "a.png", 40, 40);
    let second_upload = write_upload(tmp.path(), "b.png", 40, 40);
    let mut lc = Lifecycle::new(
        MemoryStore::new(),
        RustBackend::new(),
        Hooks::new().crop_thumbnails::<Gallery>(),
        config::resolve_config(None).unwrap(),
    );

    let mut first = gallery("Hello, World!", "", &first_upload);
    let mut second = gallery("Hello, World!", "", &second_upload);
    lc.save(&mut first, SaveOptions::default()).unwrap();
    lc.save(&mut second, SaveOptions::default()).unwrap();

    assert_eq!(first.slugged.slug(), Some("hello-world"));
    let other = second.slugged.slug().unwrap();
    let suffix = other.strip_prefix("hello-world-").unwrap();
    assert_eq!(suffix.len(), 4);
    assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(lc.store().len(), 2);
}

#[test]
fn unreadable_upload_reports_saved_record() {
    let tmp = TempDir::new().unwrap();
    let bogus = tmp.path().join("cover.jpg");
    std::fs::write(&bogus, b"not an image").unwrap();
    let mut lc = Lifecycle::new(
        MemoryStore::new(),
        RustBackend::new(),
        Hooks::new().crop_thumbnails::<Gallery>(),
        config::resolve_config(None).unwrap(),
    );

    let mut g = gallery("Broken", "", &bogus);
    let err = lc.save(&mut g, SaveOptions::default()).unwrap_err();

    match err {
        LifecycleError::Crop { id, .. } => assert_eq!(g.id, Some(id)),
        other => panic!("expected crop error, got {other:?}"),
    }
    assert_eq!(std::fs::read(&bogus).unwrap(), b"not an image");
}
