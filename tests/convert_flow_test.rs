//! End-to-end flow: photo PNG -> dithered panel payload -> picture
//! command -> paced transfer.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use pretty_assertions::assert_eq;

use inkpost::error::TransportError;
use inkpost::models::PanelSpec;
use inkpost::protocol::Command;
use inkpost::rendering::{convert_photo, decode_photo_png, encode_preview_png, ConvertOptions};
use inkpost::transport::{LinkWriter, PacedSender, CHUNK_SIZE};
use mono_dither::BinaryImage;

/// Encode a synthetic panel-sized gradient photo as a PNG.
fn gradient_photo_png() -> Vec<u8> {
    let panel = PanelSpec::CALENDAR_2IN9;
    let mut rgba = Vec::with_capacity((panel.width * panel.height * 4) as usize);
    for y in 0..panel.height {
        for x in 0..panel.width {
            let v = ((x + y) * 255 / (panel.width + panel.height - 2)) as u8;
            rgba.extend_from_slice(&[v, v, v, 255]);
        }
    }

    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, panel.width, panel.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&rgba).unwrap();
    }
    bytes
}

struct RecordingLink {
    writes: Vec<Vec<u8>>,
}

#[async_trait]
impl LinkWriter for RecordingLink {
    async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), TransportError> {
        self.writes.push(chunk.to_vec());
        Ok(())
    }
}

#[test]
fn test_photo_to_packed_payload() {
    let panel = PanelSpec::CALENDAR_2IN9;
    let photo = decode_photo_png(&gradient_photo_png()).unwrap();
    assert_eq!(photo.width(), panel.width);
    assert_eq!(photo.height(), panel.height);

    let result = convert_photo(&photo, panel, &ConvertOptions::default()).unwrap();
    assert_eq!(result.packed.data().len(), panel.packed_len());

    // a diagonal gradient dithers to a mix of black and white
    let mut white = 0usize;
    for y in 0..panel.height {
        for x in 0..panel.width {
            if result.packed.get_pixel(x, y).unwrap() {
                white += 1;
            }
        }
    }
    let total = (panel.width * panel.height) as usize;
    assert!(white > 0 && white < total, "got {white}/{total} white pixels");
}

#[test]
fn test_packed_payload_survives_file_round_trip() {
    let panel = PanelSpec::CALENDAR_2IN9;
    let photo = decode_photo_png(&gradient_photo_png()).unwrap();
    let result = convert_photo(&photo, panel, &ConvertOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.bin");
    std::fs::write(&path, result.packed.data()).unwrap();

    let read_back = std::fs::read(&path).unwrap();
    assert_eq!(read_back.len(), panel.packed_len());
    assert_eq!(read_back, result.packed.data());
}

#[test]
fn test_picture_command_payload_decodes_back_to_preview() {
    let panel = PanelSpec::CALENDAR_2IN9;
    let photo = decode_photo_png(&gradient_photo_png()).unwrap();
    let result = convert_photo(&photo, panel, &ConvertOptions::default()).unwrap();
    let png_bytes = encode_preview_png(&result.preview).unwrap();

    let command = Command::picture(2, &png_bytes).unwrap();
    let json = command.to_json().unwrap();

    // the device parses the same JSON: recover the PNG and check pixels
    let parsed: Command = serde_json::from_str(&json).unwrap();
    let (idx, dat) = match parsed {
        Command::Picture { idx, dat } => (idx, dat),
        other => panic!("expected picture command, got {other:?}"),
    };
    assert_eq!(idx, 2);

    let recovered_png = BASE64.decode(dat).unwrap();
    let recovered = decode_photo_png(&recovered_png).unwrap();
    assert_eq!(recovered.width(), panel.width);
    assert_eq!(recovered.height(), panel.height);

    for y in (0..panel.height).step_by(31) {
        for x in (0..panel.width).step_by(29) {
            let white = result.preview.get_pixel(x, y).unwrap();
            let i = (y as usize * panel.width as usize + x as usize) * 4;
            assert_eq!(
                recovered.data()[i] == 255,
                white,
                "pixel ({x}, {y}) changed across the PNG round trip"
            );
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_command_transfer_respects_link_contract() {
    let panel = PanelSpec::CALENDAR_2IN9;
    let photo = decode_photo_png(&gradient_photo_png()).unwrap();
    let result = convert_photo(&photo, panel, &ConvertOptions::default()).unwrap();
    let png_bytes = encode_preview_png(&result.preview).unwrap();
    let json = Command::picture(0, &png_bytes).unwrap().to_json().unwrap();

    let mut sender = PacedSender::new(RecordingLink { writes: Vec::new() });
    sender.send_str(&json).await.unwrap();

    let writes = sender.into_inner().writes;
    let (terminator, chunks) = writes.split_last().unwrap();
    assert!(terminator.is_empty(), "last write is the terminator");
    assert!(!chunks.is_empty());
    for chunk in chunks {
        assert!(!chunk.is_empty() && chunk.len() <= CHUNK_SIZE);
    }

    let reassembled: Vec<u8> = chunks.concat();
    assert_eq!(reassembled, json.as_bytes());
}
