/*!
 * Tests for slug normalization
 */

use catnav::slug::{normalize, slug_from_image_path};

/// Test that normalizing twice changes nothing
#[test]
fn test_normalize_appliedTwice_shouldBeIdempotent() {
    let inputs = [
        "",
        "   ",
        "Drum-Lifting-Beam-2",
        "drum_lifting_beam_03.jpeg",
        "photo.jpg.png",
        "photo-2.jpg-3",
        "Valve 2",
        "2-3",
        "--__--",
        "عارضة رفع البراميل",
        "Chlorine System — Solutions!",
        "İstanbul Office",
        "model-300",
        "a.b.c.gif",
    ];

    for input in inputs {
        let once = normalize(input);
        assert_eq!(normalize(&once), once, "normalize is not idempotent for {:?}", input);
    }
}

/// Test that mixed case and numeric suffixes collapse onto the base slug
#[test]
fn test_normalize_withCaseAndSuffix_shouldMatchBaseSlug() {
    assert_eq!(normalize("Drum-Lifting-Beam-2"), "drum-lifting-beam");
    assert_eq!(normalize("DRUM_LIFTING_BEAM_03"), "drum-lifting-beam");
    assert_eq!(normalize("drum-lifting-beam"), "drum-lifting-beam");
}

/// Test that every supported image extension is removed
#[test]
fn test_normalize_withImageExtensions_shouldStripThem() {
    for ext in ["jpg", "jpeg", "png", "webp", "gif", "svg", "JPG", "Webp"] {
        assert_eq!(normalize(&format!("pump.{}", ext)), "pump");
    }

    // Non-image extensions are ordinary text
    assert_eq!(normalize("manual.pdf"), "manual-pdf");
}

/// Test that Arabic text survives normalization
#[test]
fn test_normalize_withArabicText_shouldKeepLetters() {
    assert_eq!(normalize("عارضة رفع البراميل"), "عارضة-رفع-البراميل");
}

/// Test that empty and separator-only input yields an empty key
#[test]
fn test_normalize_withNoAlphanumerics_shouldBeEmpty() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize(" -_/ "), "");
}

/// Test deriving slugs from image paths
#[test]
fn test_slug_from_image_path_withDirectories_shouldUseFileNameOnly() {
    assert_eq!(slug_from_image_path("/images/projects/Dammam_Reservoir-2.jpg"), "dammam-reservoir");
    assert_eq!(slug_from_image_path("C:\\assets\\Gas Detector.png"), "gas-detector");
    assert_eq!(slug_from_image_path(""), "");
}
