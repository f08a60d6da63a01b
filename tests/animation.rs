use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::{Frame, ImageFormat, Rgba, RgbaImage};
use pretty_assertions::assert_eq;

use term_nexus::color::GameColor;
use term_nexus::graphics::{Animation, ImageProcessor, PaletteProcessor, SizePolicy};
use term_nexus::types::{Cell, RenderFrame, Size};
use term_nexus::{Error, Result};

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn gif(colors: &[[u8; 4]], width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder
            .encode_frames(
                colors
                    .iter()
                    .map(|c| Frame::new(RgbaImage::from_pixel(width, height, Rgba(*c)))),
            )
            .unwrap();
    }
    bytes
}

fn fg(frame: &RenderFrame) -> GameColor {
    frame.cells()[0].fg
}

#[test]
fn gif_frames_play_in_source_order_and_wrap() -> anyhow::Result<()> {
    let bytes = gif(&[RED, GREEN, BLUE], 6, 4);
    let mut animation =
        Animation::from_image_bytes(&bytes, &PaletteProcessor::default(), SizePolicy::Native)?;

    assert_eq!(animation.frame_count(), 3);
    assert_eq!(animation.size(), Size::new(6, 4));

    let played: Vec<GameColor> = (0..4).map(|_| fg(animation.next_frame())).collect();
    assert_eq!(
        played,
        vec![GameColor::RED, GameColor::GREEN, GameColor::BLUE, GameColor::RED]
    );
    Ok(())
}

#[test]
fn size_policy_is_applied_to_every_frame() -> anyhow::Result<()> {
    let bytes = gif(&[RED, GREEN], 10, 6);
    let processor = PaletteProcessor::default();

    let absolute = Animation::from_image_bytes(
        &bytes,
        &processor,
        SizePolicy::Absolute(Size::new(4, 2)),
    )?;
    assert!(absolute.frames().iter().all(|f| f.size() == Size::new(4, 2)));

    let relative = Animation::from_image_bytes(&bytes, &processor, SizePolicy::Relative(50.0))?;
    assert!(relative.frames().iter().all(|f| f.size() == Size::new(5, 3)));
    Ok(())
}

#[test]
fn processor_sees_resolved_size_once_per_frame() -> anyhow::Result<()> {
    let bytes = gif(&[RED, GREEN, BLUE], 8, 8);
    let seen = std::cell::RefCell::new(Vec::new());
    let recording = |frame: &RgbaImage, size: Size| -> Result<RenderFrame> {
        seen.borrow_mut().push((frame.dimensions(), size));
        RenderFrame::filled(size, Cell::default())
    };

    Animation::from_image_bytes(&bytes, &recording, SizePolicy::Relative(25.0))?;

    assert_eq!(seen.into_inner(), vec![((8, 8), Size::new(2, 2)); 3]);
    Ok(())
}

#[test]
fn still_images_are_rejected() {
    let mut png = Vec::new();
    RgbaImage::from_pixel(3, 3, Rgba(RED))
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();

    let result = Animation::from_image_bytes(&png, &PaletteProcessor::default(), SizePolicy::Native);
    assert!(matches!(result, Err(Error::InvalidFormat(_))));
}

#[test]
fn single_frame_gif_is_rejected() {
    let bytes = gif(&[RED], 2, 2);
    let result = Animation::from_image_bytes(&bytes, &PaletteProcessor::default(), SizePolicy::Native);
    assert!(matches!(result, Err(Error::InvalidFormat(_))));
}

#[test]
fn empty_frame_list_is_rejected() {
    assert!(matches!(
        Animation::from_frames(Vec::new()),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn invalid_policy_fails_before_processing() {
    let bytes = gif(&[RED, GREEN], 4, 4);
    let result = Animation::from_image_bytes(
        &bytes,
        &PaletteProcessor::default(),
        SizePolicy::Relative(-10.0),
    );
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn loads_from_a_file_path() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("term-nexus-{}.gif", std::process::id()));
    std::fs::write(&path, gif(&[BLUE, RED], 2, 2))?;

    let result = Animation::from_path(&path, &PaletteProcessor::default(), SizePolicy::Native);
    std::fs::remove_file(&path)?;

    let mut animation = result?;
    assert_eq!(fg(animation.next_frame()), GameColor::BLUE);
    assert_eq!(fg(animation.next_frame()), GameColor::RED);
    Ok(())
}

#[test]
fn processors_are_usable_as_trait_objects() -> anyhow::Result<()> {
    let processor: Box<dyn ImageProcessor> = Box::new(PaletteProcessor::default().with_glyph('o'));
    let bytes = gif(&[GREEN, RED], 2, 2);
    let mut animation = Animation::from_image_bytes(&bytes, processor.as_ref(), SizePolicy::Native)?;
    assert_eq!(animation.next_frame().cells()[0].glyph, 'o');
    Ok(())
}

#[test]
fn unreachable_url_fails_without_building() {
    let result = Animation::from_url(
        "http://127.0.0.1:9/missing.gif",
        &PaletteProcessor::default(),
        SizePolicy::Native,
    );
    assert!(matches!(result, Err(Error::Upstream { .. })));
}
