//! Integration tests for label and image file decoding.

use std::io::{Cursor, Write};

use mnistidx::idx::color::{to_color, to_intensity};
use mnistidx::idx::{
    read_image_set, read_image_set_from_stream, read_label_set, read_label_set_from_stream,
    Image, ImageReader, Label, LabelReader,
};
use mnistidx::MnistIdxError;

mod common;
use common::{image_file_bytes, label_file_bytes, Unseekable};

#[test]
fn labels_decode_in_file_order() {
    let bytes = label_file_bytes(&[5, 0, 4, 1, 9, 2]);
    let labels = read_label_set(Cursor::new(&bytes)).expect("decode labels");

    assert_eq!(labels.len(), 6);
    for (i, label) in labels.iter().enumerate() {
        assert_eq!(label.as_u8(), bytes[8 + i]);
    }
}

#[test]
fn read_label_matches_decode_all() {
    let bytes = label_file_bytes(&[7, 2, 1, 0]);
    let all = read_label_set(Cursor::new(&bytes)).unwrap();

    let mut reader = LabelReader::new(Cursor::new(&bytes));
    reader.validate_header().unwrap();
    // Out of order on purpose
    for i in [3, 0, 2, 1] {
        assert_eq!(reader.read_label(i).unwrap(), all[i]);
    }
}

#[test]
fn images_decode_with_header_dimensions() {
    let pixels: Vec<u8> = (0..24).collect();
    let bytes = image_file_bytes(2, 3, 4, &pixels);
    let images = read_image_set(Cursor::new(&bytes)).expect("decode images");

    assert_eq!(images.len(), 2);
    for (i, image) in images.iter().enumerate() {
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 3);
        assert_eq!(image.data(), &bytes[16 + i * 12..16 + (i + 1) * 12]);
    }
    // Row-major: x=1, y=2 of the second image
    assert_eq!(images[1].pixel_at(1, 2), 12 + 2 * 4 + 1);
}

#[test]
fn read_image_reproduces_block_at_offset() {
    let pixels: Vec<u8> = (0..60).map(|v| v * 3).collect();
    let bytes = image_file_bytes(5, 3, 4, &pixels);

    let mut reader = ImageReader::new(Cursor::new(&bytes));
    reader.validate_header().unwrap();
    assert_eq!(reader.num_images(), 5);
    assert_eq!(reader.dimensions(), (4, 3));

    let image = reader.read_image(3).unwrap();
    assert_eq!(image.data(), &bytes[16 + 3 * 12..16 + 4 * 12]);
}

#[test]
fn label_magic_mismatch_leaves_reader_unvalidated() {
    let mut bytes = label_file_bytes(&[1, 2, 3]);
    bytes[3] = 0x03; // image magic

    let mut reader = LabelReader::new(Cursor::new(bytes));
    let err = reader.validate_header().unwrap_err();
    assert!(err.is_invalid_magic(), "unexpected error: {err}");
    assert!(!reader.is_validated());

    // Fix the bytes in place and retry
    reader.get_mut().get_mut()[3] = 0x01;
    reader.validate_header().expect("retry with correct magic");
    assert_eq!(reader.num_labels(), 3);
}

#[test]
fn image_magic_mismatch_leaves_reader_unvalidated() {
    let mut bytes = image_file_bytes(1, 1, 1, &[42]);
    bytes[3] = 0x01; // label magic

    let mut reader = ImageReader::new(Cursor::new(bytes));
    assert!(reader.validate_header().unwrap_err().is_invalid_magic());
    assert!(!reader.is_validated());

    reader.get_mut().get_mut()[3] = 0x03;
    reader.validate_header().expect("retry with correct magic");
    assert_eq!(reader.read_image(0).unwrap().data(), &[42u8]);
}

#[test]
fn short_stream_is_io_error_not_magic_error() {
    let err = read_label_set(Cursor::new(b"X".to_vec())).unwrap_err();
    assert!(matches!(err, MnistIdxError::Io(_)), "unexpected error: {err}");

    // Magic ok, count field truncated
    let err = read_label_set(Cursor::new(label_file_bytes(&[])[..6].to_vec())).unwrap_err();
    assert!(matches!(err, MnistIdxError::Io(_)), "unexpected error: {err}");

    let image_header = image_file_bytes(0, 28, 28, &[]);
    let err = read_image_set(Cursor::new(image_header[..15].to_vec())).unwrap_err();
    assert!(matches!(err, MnistIdxError::Io(_)), "unexpected error: {err}");
}

#[test]
fn wrong_magic_text_is_magic_error() {
    let err = read_label_set(Cursor::new(b"NO_THE_MAGIC_NUMBER".to_vec())).unwrap_err();
    assert!(err.is_invalid_magic());
    assert!(err.to_string().contains("Invalid magic number"));
}

#[test]
fn header_only_label_file_decodes() {
    let bytes = label_file_bytes(&[]);
    assert_eq!(bytes, [0u8, 0, 8, 1, 0, 0, 0, 0]);
    let labels = read_label_set(Cursor::new(bytes)).unwrap();
    assert!(labels.is_empty());
}

#[test]
fn decode_all_discards_partial_results_on_error() {
    // Header claims 3 images, payload only holds 2
    let mut bytes = image_file_bytes(2, 2, 2, &[0; 8]);
    bytes[7] = 3;
    let err = read_image_set(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, MnistIdxError::Io(_)));
}

#[test]
fn reads_from_files_on_disk() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("t10k-labels-idx1-ubyte");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&label_file_bytes(&[3, 1, 4])).unwrap();
    drop(file);

    let labels = read_label_set(std::fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(labels, vec![Label(3), Label(1), Label(4)]);
}

#[test]
fn unseekable_and_seekable_sources_agree() {
    let label_bytes = label_file_bytes(&[9, 8, 7, 6, 5]);
    assert_eq!(
        read_label_set_from_stream(Unseekable(&label_bytes)).unwrap(),
        read_label_set(Cursor::new(&label_bytes)).unwrap()
    );

    let pixels: Vec<u8> = (0..18).collect();
    let image_bytes = image_file_bytes(2, 3, 3, &pixels);
    assert_eq!(
        read_image_set_from_stream(Unseekable(&image_bytes)).unwrap(),
        read_image_set(Cursor::new(&image_bytes)).unwrap()
    );
}

#[test]
fn unseekable_source_with_bad_magic_reports_magic_error() {
    let mut bytes = label_file_bytes(&[1]);
    bytes[0] = 0xFF;
    let err = read_label_set_from_stream(Unseekable(&bytes)).unwrap_err();
    assert!(err.is_invalid_magic());
}

#[test]
#[should_panic(expected = "validate_header")]
fn label_read_before_validation_panics() {
    let mut reader = LabelReader::new(Cursor::new(label_file_bytes(&[1])));
    let _ = reader.read_label(0);
}

#[test]
#[should_panic(expected = "validate_header")]
fn image_dimensions_before_validation_panics() {
    let reader = ImageReader::new(Cursor::new(image_file_bytes(1, 1, 1, &[0])));
    let _ = reader.dimensions();
}

#[test]
fn checkerboard_renders_through_color_law() {
    let image = Image::from_raw(2, 2, vec![0, 255, 255, 0]).unwrap();
    let white = to_color(0);
    let black = to_color(255);

    assert_eq!(white.0, [0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF]);
    assert_eq!(black.0, [0x0000, 0x0000, 0x0000, 0xFFFF]);
    assert_eq!(image.color_at(0, 0), white);
    assert_eq!(image.color_at(1, 0), black);
    assert_eq!(image.color_at(1, 1), white);
    assert_eq!(image.color_at(0, 1), black);

    assert_eq!(to_intensity(white), 0);
    assert_eq!(to_intensity(black), 255);
}
