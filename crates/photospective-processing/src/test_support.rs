//! Fixture builders shared by the processing tests.

use ::image::codecs::jpeg::JpegEncoder;
use ::image::{ImageFormat, Rgb, RgbImage};
use bytes::Bytes;
use exif::experimental::Writer;
use exif::{Context, Field, In, Rational, Tag, Value};
use img_parts::jpeg::Jpeg;
use img_parts::ImageEXIF;
use std::io::Cursor;

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

/// Primary-IFD camera fields plus a few that extraction must drop: binary values, a
/// blank string, and a thumbnail-only field.
pub fn camera_fields() -> Vec<Field> {
    vec![
        Field {
            tag: Tag::Make,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"Canon".to_vec()]),
        },
        Field {
            tag: Tag::Model,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"EOS 5D".to_vec()]),
        },
        Field {
            tag: Tag::Artist,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"   ".to_vec()]),
        },
        Field {
            tag: Tag(Context::Tiff, 65000),
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"mystery".to_vec()]),
        },
        Field {
            tag: Tag::FocalLength,
            ifd_num: In::PRIMARY,
            value: Value::Rational(vec![Rational { num: 50, denom: 1 }]),
        },
        Field {
            tag: Tag::ExifVersion,
            ifd_num: In::PRIMARY,
            value: Value::Undefined(b"0230".to_vec(), 0),
        },
        Field {
            tag: Tag::MakerNote,
            ifd_num: In::PRIMARY,
            value: Value::Undefined(vec![0xde, 0xad, 0xbe, 0xef], 0),
        },
        Field {
            tag: Tag::Software,
            ifd_num: In::THUMBNAIL,
            value: Value::Ascii(vec![b"thumbnailer".to_vec()]),
        },
    ]
}

/// TIFF-structured EXIF block built from [`camera_fields`].
pub fn camera_exif_block() -> Vec<u8> {
    let fields = camera_fields();
    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, 90)
        .encode_image(&gradient(width, height))
        .unwrap();
    buf
}

pub fn jpeg_with_exif(width: u32, height: u32, exif: &[u8]) -> Vec<u8> {
    let mut jpeg = Jpeg::from_bytes(Bytes::from(jpeg_bytes(width, height))).unwrap();
    jpeg.set_exif(Some(Bytes::copy_from_slice(exif)));
    jpeg.encoder().bytes().to_vec()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    gradient(width, height)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}
