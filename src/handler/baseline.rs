//! Fallback handler for baseline strip images.

use bytes::BytesMut;
use tracing::{debug, warn};

use super::compression::Compression;
use super::{ColorModel, Decoder, Handler, ImageConfig, RawImage};
use crate::error::TiffError;
use crate::format::tiff::{Container, Directory, TiffTag};

/// Color map tag, only checked for presence.
const COLOR_MAP: u16 = 320;

/// Handles any file whose IFD0 describes a strip image.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineHandler;

impl Handler for BaselineHandler {
    fn can_handle(&self, container: &Container) -> bool {
        container.directory(0).is_some_and(|ifd0| {
            [
                TiffTag::ImageWidth,
                TiffTag::ImageLength,
                TiffTag::StripOffsets,
                TiffTag::StripByteCounts,
            ]
            .iter()
            .all(|&tag| ifd0.has_field(tag.as_u16()))
        })
    }

    fn decoder<'a>(&self, container: &'a Container) -> Result<Box<dyn Decoder + 'a>, TiffError> {
        let ifd = container
            .directory(0)
            .ok_or(TiffError::MissingTag(TiffTag::ImageWidth.as_u16()))?;
        Ok(Box::new(BaselineDecoder { container, ifd }))
    }
}

/// Reads the first image of a file from its strips.
pub struct BaselineDecoder<'a> {
    container: &'a Container,
    ifd: &'a Directory,
}

impl BaselineDecoder<'_> {
    fn strips(&self) -> Result<(Vec<u64>, Vec<u64>), TiffError> {
        let offsets: Vec<u64> = self.ifd.require(TiffTag::StripOffsets.as_u16())?;
        let counts: Vec<u64> = self.ifd.require(TiffTag::StripByteCounts.as_u16())?;
        if offsets.len() != counts.len() {
            warn!(
                offsets = offsets.len(),
                byte_counts = counts.len(),
                "Strip offset and byte count lengths differ"
            );
        }
        Ok((offsets, counts))
    }
}

impl Decoder for BaselineDecoder<'_> {
    fn config(&self) -> Result<ImageConfig, TiffError> {
        let ifd = self.ifd;
        let width = ifd.require(TiffTag::ImageWidth.as_u16())?;
        let height = ifd.require(TiffTag::ImageLength.as_u16())?;
        let samples_per_pixel = ifd
            .get::<u16>(TiffTag::SamplesPerPixel.as_u16())?
            .unwrap_or(1);
        let bits_per_sample = ifd
            .get::<Vec<u16>>(TiffTag::BitsPerSample.as_u16())?
            .unwrap_or_else(|| vec![1]);
        let compression = ifd
            .get::<u16>(TiffTag::Compression.as_u16())?
            .unwrap_or(Compression::None.as_u16());
        let photometric = ifd.get::<u16>(TiffTag::PhotometricInterpretation.as_u16())?;

        let deep = bits_per_sample.iter().any(|&bps| bps > 8);
        let color_model = if ifd.has_field(COLOR_MAP) {
            ColorModel::Palette
        } else {
            match (samples_per_pixel, deep) {
                (1, false) => ColorModel::Gray,
                (1, true) => ColorModel::Gray16,
                (3, false) => ColorModel::Rgba,
                (3, true) => ColorModel::Rgba64,
                _ => ColorModel::Unknown,
            }
        };

        Ok(ImageConfig {
            width,
            height,
            samples_per_pixel,
            bits_per_sample,
            compression,
            photometric,
            color_model,
        })
    }

    fn image(&self) -> Result<RawImage, TiffError> {
        let config = self.config()?;
        let compression = Compression::from_u16(config.compression)
            .ok_or(TiffError::UnsupportedCompression(config.compression))?;
        if !compression.is_supported() {
            return Err(TiffError::UnsupportedCompression(config.compression));
        }

        let (offsets, counts) = self.strips()?;
        let reader = self.container.reader();
        let mut data = BytesMut::new();
        for (&offset, &count) in offsets.iter().zip(&counts) {
            let len = usize::try_from(count).map_err(|_| TiffError::ValueTooLarge {
                tag: TiffTag::StripByteCounts.as_u16(),
                count: 1,
                type_size: count,
            })?;
            let strip = reader.read_at(offset, len)?;
            data.extend_from_slice(&compression.decompress(strip)?);
        }

        debug!(
            width = config.width,
            height = config.height,
            strips = offsets.len(),
            bytes = data.len(),
            "Read baseline image"
        );

        Ok(RawImage {
            config,
            data: data.freeze(),
        })
    }
}
