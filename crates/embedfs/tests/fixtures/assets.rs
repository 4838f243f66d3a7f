// Code generated by embedfs-gen. DO NOT EDIT.

pub mod assets {
    #![allow(unused_imports)]

    use std::sync::LazyLock;
    use std::time::{Duration, UNIX_EPOCH};

    use embedfs::{ContentProducer, ManifestFs, Vfs};

    static MANIFEST: LazyLock<ManifestFs> = LazyLock::new(|| {
        let mut fs = ManifestFs::new();
        fs.add(
            "/",
            4096,
            0o40755,
            UNIX_EPOCH + Duration::from_secs(0),
            true,
            None,
        );
        fs.add(
            "/README",
            9,
            0o100644,
            UNIX_EPOCH + Duration::from_secs(0),
            false,
            Some(ContentProducer::gzip_static(
                b"\x1f\x8b\x08\x00\x00\x00\x00\x00\x02\x03\x4b\xcd\x4d\x4a\x4d\x49\x49\x4d\xe1\x02\x00\xa5\x59\xad\x88\x09\x00\x00\x00",
            )),
        );
        fs.add(
            "/assets",
            4096,
            0o40755,
            UNIX_EPOCH + Duration::from_secs(0),
            true,
            None,
        );
        fs.add(
            "/assets/app.js",
            16,
            0o100644,
            UNIX_EPOCH + Duration::from_secs(0),
            false,
            Some(ContentProducer::gzip_static(
                b"\x1f\x8b\x08\x00\x00\x00\x00\x00\x02\x03\x4b\xce\xcf\x2b\xce\xcf\x49\xd5\xcb\xc9\x4f\xd7\x30\xd4\xb4\xe6\x02\x00\x6c\x69\x9f\x6a\
                  \x10\x00\x00\x00",
            )),
        );
        fs.add(
            "/assets/index.html",
            12,
            0o100644,
            UNIX_EPOCH + Duration::from_secs(0),
            false,
            Some(ContentProducer::gzip_static(
                b"\x1f\x8b\x08\x00\x00\x00\x00\x00\x02\x03\xb3\xc9\x30\xb4\xcb\xc8\xb4\xd1\x07\x52\x5c\x00\xc2\x57\x01\xb6\x0c\x00\x00\x00",
            )),
        );
        fs
    });

    /// The embedded filesystem.
    pub fn fs() -> &'static dyn Vfs {
        &*MANIFEST
    }

    /// The embedded manifest itself.
    pub fn manifest() -> &'static ManifestFs {
        &MANIFEST
    }
}
