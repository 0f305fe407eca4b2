use std::path::{Path, PathBuf};

use framekit::{
    ErrorKind, FrameSequence, FramekitError, SheetLayout, SheetOpts, SidecarMetadata,
    WidthPolicy, to_sprite_sheet,
};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "framekit_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_frame(dir: &Path, name: &str, w: u32, h: u32, px: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(w, h, image::Rgba(px))
        .save(&path)
        .unwrap();
    path
}

fn read_sidecar(path: &Path) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

#[test]
fn two_frames_side_by_side() {
    let tmp = temp_dir("sheet_two");
    let a = write_frame(&tmp, "a.png", 10, 10, RED);
    let b = write_frame(&tmp, "b.png", 10, 10, BLUE);
    let out = tmp.join("out").join("sheet.png");

    let mut seq = FrameSequence::from_paths([a, b]);
    let meta = to_sprite_sheet(&mut seq, &out, &SheetOpts::default()).unwrap();
    assert_eq!(
        meta,
        SidecarMetadata {
            total_width: 20,
            total_height: 10,
            frame_count: 2
        }
    );

    let layout = SheetLayout::from_output_path(&out).unwrap();
    assert_eq!(layout.image_path, tmp.join("out").join("sheet").join("sheet.png"));
    assert_eq!(
        layout.sidecar_path,
        tmp.join("out").join("sheet").join("sheet_info.json")
    );

    let sheet = image::open(&layout.image_path).unwrap().to_rgba8();
    assert_eq!(sheet.dimensions(), (20, 10));
    for x in 0..10 {
        assert_eq!(sheet.get_pixel(x, 5).0, RED);
    }
    for x in 10..20 {
        assert_eq!(sheet.get_pixel(x, 5).0, BLUE);
    }

    let json = read_sidecar(&layout.sidecar_path);
    assert_eq!(json["Total_width"], 20);
    assert_eq!(json["Total_height"], 10);
    assert_eq!(json["Number_of_frames"], 2);

    // Only the two artifacts, no leftover staging files.
    assert_eq!(std::fs::read_dir(&layout.dir).unwrap().count(), 2);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn single_frame_sheet_matches_frame_size() {
    let tmp = temp_dir("sheet_single");
    let a = write_frame(&tmp, "a.png", 7, 5, RED);
    let out = tmp.join("one.png");

    let mut seq = FrameSequence::from_paths([a]);
    let meta = to_sprite_sheet(&mut seq, &out, &SheetOpts::default()).unwrap();
    assert_eq!((meta.total_width, meta.total_height, meta.frame_count), (7, 5, 1));

    let sheet = image::open(tmp.join("one").join("one.png")).unwrap();
    assert_eq!((sheet.width(), sheet.height()), (7, 5));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn trailing_black_frames_are_trimmed_before_layout() {
    let tmp = temp_dir("sheet_trim");
    let c = write_frame(&tmp, "c.png", 10, 10, RED);
    let a = write_frame(&tmp, "a.png", 10, 10, BLACK);
    let b = write_frame(&tmp, "b.png", 10, 10, BLACK);
    let out = tmp.join("trimmed.png");

    let mut seq = FrameSequence::from_paths([c.clone(), a, b]);
    let meta = to_sprite_sheet(&mut seq, &out, &SheetOpts::default()).unwrap();

    assert_eq!(seq.paths(), &[c]);
    assert_eq!((meta.total_width, meta.total_height, meta.frame_count), (10, 10, 1));
    let json = read_sidecar(&tmp.join("trimmed").join("trimmed_info.json"));
    assert_eq!(json["Number_of_frames"], 1);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn leading_black_frames_are_kept() {
    let tmp = temp_dir("sheet_leading_black");
    let a = write_frame(&tmp, "a.png", 10, 10, BLACK);
    let b = write_frame(&tmp, "b.png", 10, 10, BLACK);
    let c = write_frame(&tmp, "c.png", 10, 10, RED);
    let out = tmp.join("lead.png");

    let mut seq = FrameSequence::from_paths([a, b, c]);
    let meta = to_sprite_sheet(&mut seq, &out, &SheetOpts::default()).unwrap();
    assert_eq!((meta.total_width, meta.total_height, meta.frame_count), (30, 10, 3));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn all_black_input_is_rejected_without_writing() {
    let tmp = temp_dir("sheet_all_black");
    let a = write_frame(&tmp, "a.png", 4, 4, BLACK);
    let b = write_frame(&tmp, "b.png", 4, 4, [0, 0, 0, 0]);
    let out = tmp.join("empty.png");

    let mut seq = FrameSequence::from_paths([a, b]);
    let err = to_sprite_sheet(&mut seq, &out, &SheetOpts::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(seq.is_empty());
    assert!(!tmp.join("empty").exists());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn empty_sequence_is_invalid_input() {
    let tmp = temp_dir("sheet_empty");
    let mut seq = FrameSequence::new();
    let err = to_sprite_sheet(&mut seq, &tmp.join("x.png"), &SheetOpts::default()).unwrap_err();
    assert!(matches!(err, FramekitError::InvalidInput(_)));
    assert_eq!(std::fs::read_dir(&tmp).unwrap().count(), 0);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn wrong_extension_is_rejected_before_reading_frames() {
    let tmp = temp_dir("sheet_bad_ext");
    // Frames do not exist: an I/O error here would mean they were read.
    let mut seq = FrameSequence::from_paths([tmp.join("missing.png")]);
    let err = to_sprite_sheet(&mut seq, &tmp.join("sheet.gif"), &SheetOpts::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(seq.len(), 1);
    assert!(!tmp.join("sheet").exists());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_frame_leaves_no_artifact() {
    let tmp = temp_dir("sheet_missing");
    let a = write_frame(&tmp, "a.png", 4, 4, RED);
    let b = write_frame(&tmp, "b.png", 4, 4, BLUE);
    let out = tmp.join("broken.png");

    let mut seq = FrameSequence::from_paths([a, tmp.join("gone.png"), b]);
    let err = to_sprite_sheet(&mut seq, &out, &SheetOpts::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert!(!tmp.join("broken").exists());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn wider_frame_is_overwritten_by_its_successor() {
    let tmp = temp_dir("sheet_wide");
    let a = write_frame(&tmp, "a.png", 4, 2, RED);
    let wide = write_frame(&tmp, "b.png", 6, 2, BLUE);
    let c = write_frame(&tmp, "c.png", 4, 2, [0, 255, 0, 255]);
    let out = tmp.join("wide.png");

    let mut seq = FrameSequence::from_paths([a, wide, c]);
    let meta = to_sprite_sheet(&mut seq, &out, &SheetOpts::default()).unwrap();
    assert_eq!((meta.total_width, meta.total_height), (12, 2));

    let sheet = image::open(tmp.join("wide").join("wide.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(sheet.get_pixel(3, 0).0, RED);
    assert_eq!(sheet.get_pixel(7, 0).0, BLUE);
    // The wide frame's overflow into cell 2 was painted over by frame c.
    assert_eq!(sheet.get_pixel(8, 0).0, [0, 255, 0, 255]);
    assert_eq!(sheet.get_pixel(9, 1).0, [0, 255, 0, 255]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn strict_width_policy_rejects_mismatch() {
    let tmp = temp_dir("sheet_strict");
    let a = write_frame(&tmp, "a.png", 4, 2, RED);
    let b = write_frame(&tmp, "b.png", 5, 2, BLUE);
    let out = tmp.join("strict.png");

    let mut seq = FrameSequence::from_paths([a, b]);
    let opts = SheetOpts {
        width_policy: WidthPolicy::Strict,
    };
    let err = to_sprite_sheet(&mut seq, &out, &opts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    assert!(!tmp.join("strict").exists());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn transparency_is_preserved() {
    let tmp = temp_dir("sheet_alpha");
    let a = write_frame(&tmp, "a.png", 3, 3, [10, 20, 30, 128]);
    let out = tmp.join("alpha.png");

    let mut seq = FrameSequence::from_paths([a]);
    to_sprite_sheet(&mut seq, &out, &SheetOpts::default()).unwrap();

    let sheet = image::open(tmp.join("alpha").join("alpha.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(sheet.get_pixel(1, 1).0, [10, 20, 30, 128]);

    std::fs::remove_dir_all(&tmp).ok();
}
