//! Handler and decoder integration tests.

use std::sync::Arc;

use bytes::Bytes;

use tiffwalk::{
    BaselineHandler, ByteOrder, ColorModel, Container, Decoder, Handler, HandlerRegistry,
    ImageConfig, RawImage, TiffError,
};

use super::test_utils::{gray_strip_tiff, IfdBuilder, TiffBuilder};

#[test]
fn test_baseline_strip_image() {
    for big in [false, true] {
        for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
            let container = Container::from_bytes(gray_strip_tiff(order, big)).unwrap();
            assert!(BaselineHandler.can_handle(&container));

            let decoder = HandlerRegistry::new().decoder(&container).unwrap();
            let config = decoder.config().unwrap();
            assert_eq!((config.width, config.height), (4, 2));
            assert_eq!(config.bits_per_sample, vec![8]);
            assert_eq!(config.color_model, ColorModel::Gray);

            let image = decoder.image().unwrap();
            assert_eq!(image.data.as_ref(), &[0, 1, 2, 3, 4, 5, 6, 7]);
        }
    }
}

#[test]
fn test_unsupported_compression() {
    let data = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .short(256, &[1])
                .short(257, &[1])
                .short(259, &[5])
                .long(273, &[8])
                .long(279, &[1]),
        )
        .build();
    let container = Container::from_bytes(data).unwrap();
    let decoder = BaselineHandler.decoder(&container).unwrap();
    assert_eq!(decoder.config().unwrap().compression, 5);
    assert!(matches!(
        decoder.image(),
        Err(TiffError::UnsupportedCompression(5))
    ));
}

struct Vendor;

struct VendorDecoder;

impl Decoder for VendorDecoder {
    fn config(&self) -> Result<ImageConfig, TiffError> {
        Ok(ImageConfig {
            width: 1,
            height: 1,
            samples_per_pixel: 3,
            bits_per_sample: vec![8, 8, 8],
            compression: 1,
            photometric: Some(2),
            color_model: ColorModel::Rgba,
        })
    }

    fn image(&self) -> Result<RawImage, TiffError> {
        Ok(RawImage {
            config: self.config()?,
            data: Bytes::from_static(&[255, 0, 0]),
        })
    }
}

impl Handler for Vendor {
    fn can_handle(&self, container: &Container) -> bool {
        !container.directories().is_empty()
    }

    fn decoder<'a>(&self, _: &'a Container) -> Result<Box<dyn Decoder + 'a>, TiffError> {
        Ok(Box::new(VendorDecoder))
    }
}

#[test]
fn test_make_handler_replaces_baseline() {
    let registry = HandlerRegistry::new();
    registry.register_by_make("Acme Imaging", Arc::new(Vendor));

    let container =
        Container::from_bytes(gray_strip_tiff(ByteOrder::LittleEndian, false)).unwrap();
    assert!(registry.find(&container).is_some());

    let image = registry.decoder(&container).unwrap().image().unwrap();
    assert_eq!(image.data.as_ref(), &[255, 0, 0]);
    assert_eq!(image.config.color_model, ColorModel::Rgba);

    // Other makes still get the baseline decoder
    let other = HandlerRegistry::new();
    other.register_by_make("Someone Else", Arc::new(Vendor));
    let image = other.decoder(&container).unwrap().image().unwrap();
    assert_eq!(image.data.len(), 8);
}
