//! Media classification by file extension.
//!
//! Kinds are derived from the lowercased text after the last `.` in a file
//! name. Only three fixed extension sets are recognized; everything else is
//! [`MediaKind::Unknown`] and gets filtered out of listings.

use mediasync_types::{MediaFile, MediaKind, NamedFile};

/// Recognized video extensions.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "webm", "wmv", "flv", "m4v"];

/// Recognized audio extensions.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "aac", "m4a", "wma"];

/// Recognized image extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg", "tiff"];

/// MIME type used when nothing better is known.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Lowercased extension of `filename`, if it has one.
pub fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Classify a file by its extension.
pub fn classify(filename: &str) -> MediaKind {
    match extension(filename) {
        Some(ext) => kind_for_extension(&ext),
        None => MediaKind::Unknown,
    }
}

/// Classify an already-lowercased extension (no dot).
pub fn kind_for_extension(ext: &str) -> MediaKind {
    if VIDEO_EXTENSIONS.contains(&ext) {
        MediaKind::Video
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        MediaKind::Audio
    } else if IMAGE_EXTENSIONS.contains(&ext) {
        MediaKind::Image
    } else {
        MediaKind::Unknown
    }
}

/// Keep only files with a recognized media extension.
///
/// Order and duplicates are preserved.
pub fn filter_media<T: NamedFile>(files: impl IntoIterator<Item = T>) -> Vec<T> {
    files
        .into_iter()
        .filter(|file| classify(file.file_name()).is_recognized())
        .collect()
}

/// Filter a backend listing and derive each entry's kind from its name.
///
/// Any kind the backend reported is replaced by the extension-based one.
pub fn media_listing(files: impl IntoIterator<Item = MediaFile>) -> Vec<MediaFile> {
    filter_media(files)
        .into_iter()
        .map(|mut file| {
            file.kind = classify(&file.name);
            file
        })
        .collect()
}

/// Build a listing from bare file names (sizes unknown, reported as zero).
pub fn listing_from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Vec<MediaFile> {
    names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let kind = classify(name);
            kind.is_recognized().then(|| MediaFile::new(name, 0, kind))
        })
        .collect()
}

/// MIME type for a file of the given kind.
///
/// Unrecognized extensions fall back to a fixed default per kind.
pub fn mime_type(kind: MediaKind, filename: &str) -> &'static str {
    let ext = extension(filename).unwrap_or_default();
    match kind {
        MediaKind::Video => match ext.as_str() {
            "mp4" => "video/mp4",
            "avi" => "video/x-msvideo",
            "mkv" => "video/x-matroska",
            "mov" => "video/quicktime",
            "webm" => "video/webm",
            "wmv" => "video/x-ms-wmv",
            "flv" => "video/x-flv",
            "m4v" => "video/x-m4v",
            _ => "video/mp4",
        },
        MediaKind::Audio => match ext.as_str() {
            "mp3" => "audio/mpeg",
            "wav" => "audio/wav",
            "flac" => "audio/flac",
            "ogg" => "audio/ogg",
            "aac" => "audio/aac",
            "m4a" => "audio/mp4",
            "wma" => "audio/x-ms-wma",
            _ => "audio/mpeg",
        },
        MediaKind::Image => match ext.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "bmp" => "image/bmp",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            "tiff" => "image/tiff",
            _ => "image/jpeg",
        },
        MediaKind::Unknown => FALLBACK_MIME,
    }
}

/// Display text for a local file selection, e.g. `"3 media files selected"`.
pub fn selection_summary(count: usize) -> String {
    if count == 1 {
        "1 media file selected".to_string()
    } else {
        format!("{} media files selected", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::is_valid_path;
    use mediasync_types::SelectedFile;

    #[test]
    fn classifies_every_recognized_extension() {
        for ext in VIDEO_EXTENSIONS {
            assert_eq!(classify(&format!("clip.{}", ext)), MediaKind::Video);
        }
        for ext in AUDIO_EXTENSIONS {
            assert_eq!(classify(&format!("song.{}", ext)), MediaKind::Audio);
        }
        for ext in IMAGE_EXTENSIONS {
            assert_eq!(classify(&format!("photo.{}", ext)), MediaKind::Image);
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("HOLIDAY.MP4"), MediaKind::Video);
        assert_eq!(classify("Track.Flac"), MediaKind::Audio);
        assert_eq!(classify("scan.TIFF"), MediaKind::Image);
    }

    #[test]
    fn uses_last_extension_only() {
        assert_eq!(classify("archive.mp4.zip"), MediaKind::Unknown);
        assert_eq!(classify("movie.final.mkv"), MediaKind::Video);
    }

    #[test]
    fn no_extension_is_unknown() {
        assert_eq!(classify("README"), MediaKind::Unknown);
        assert_eq!(classify("trailing."), MediaKind::Unknown);
        assert_eq!(classify(""), MediaKind::Unknown);
        assert_eq!(classify("notes.txt"), MediaKind::Unknown);
    }

    #[test]
    fn filter_keeps_order_and_duplicates() {
        let files = vec!["a.mp4", "b.txt", "c.jpg", "a.mp4", "d", "e.MP3"];
        assert_eq!(filter_media(files), vec!["a.mp4", "c.jpg", "a.mp4", "e.MP3"]);
    }

    #[test]
    fn filter_works_on_listings() {
        let files = vec![
            MediaFile::new("a.mp4", 1, MediaKind::Unknown),
            MediaFile::new("b.txt", 2, MediaKind::Unknown),
        ];
        let kept = filter_media(files);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "a.mp4");

        let selected = vec![SelectedFile::new("x.doc", 3)];
        assert!(filter_media(selected).is_empty());
    }

    #[test]
    fn listing_reclassifies_by_extension() {
        let files = vec![
            MediaFile::new("clip.MOV", 5, MediaKind::Audio),
            MediaFile::new("readme.md", 1, MediaKind::Video),
            MediaFile::new("cover.png", 2, MediaKind::Unknown),
        ];
        assert_eq!(
            media_listing(files),
            vec![
                MediaFile::new("clip.MOV", 5, MediaKind::Video),
                MediaFile::new("cover.png", 2, MediaKind::Image),
            ]
        );
    }

    #[test]
    fn listing_from_names_drops_unrecognized() {
        let listing = listing_from_names(["sample_video.mp4", "notes.txt", "sample_audio.mp3"]);
        assert_eq!(
            listing,
            vec![
                MediaFile::new("sample_video.mp4", 0, MediaKind::Video),
                MediaFile::new("sample_audio.mp3", 0, MediaKind::Audio),
            ]
        );
    }

    #[test]
    fn mime_for_known_extensions() {
        assert_eq!(mime_type(MediaKind::Video, "a.mp4"), "video/mp4");
        assert_eq!(mime_type(MediaKind::Video, "a.MKV"), "video/x-matroska");
        assert_eq!(mime_type(MediaKind::Video, "a.mov"), "video/quicktime");
        assert_eq!(mime_type(MediaKind::Audio, "a.mp3"), "audio/mpeg");
        assert_eq!(mime_type(MediaKind::Audio, "a.m4a"), "audio/mp4");
        assert_eq!(mime_type(MediaKind::Image, "a.jpeg"), "image/jpeg");
        assert_eq!(mime_type(MediaKind::Image, "a.svg"), "image/svg+xml");
    }

    #[test]
    fn mime_defaults_per_kind() {
        assert_eq!(mime_type(MediaKind::Video, "a.xyz"), "video/mp4");
        assert_eq!(mime_type(MediaKind::Audio, "a"), "audio/mpeg");
        assert_eq!(mime_type(MediaKind::Image, "a.raw"), "image/jpeg");
        assert_eq!(mime_type(MediaKind::Unknown, "a.mp4"), FALLBACK_MIME);
    }

    #[test]
    fn selection_summary_is_rejected_as_a_path() {
        assert_eq!(selection_summary(1), "1 media file selected");
        assert_eq!(selection_summary(3), "3 media files selected");
        for count in [0, 1, 2, 10, 250] {
            assert!(!is_valid_path(&selection_summary(count)));
        }
    }
}
