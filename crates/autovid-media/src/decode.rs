// crates/autovid-media/src/decode.rs
//
// In-process FFmpeg first-frame extraction for the thumbnail strip.
// ffmpeg::init() must have been called once by the binary before use.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::{input, Pixel};
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as SwsContext, flag::Flags};
use ffmpeg::util::frame::video::Video;

use crate::thumbnail::{fit_within, FrameDecoder, Thumbnail};

#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegDecoder;

impl FrameDecoder for FfmpegDecoder {
    fn first_frame(&self, path: &Path, max_w: u32, max_h: u32) -> Result<Thumbnail> {
        let mut ictx = input(path)
            .with_context(|| format!("open {}", path.display()))?;

        let (stream_idx, context) = {
            let stream = ictx.streams().best(Type::Video)
                .ok_or_else(|| anyhow!("no video stream"))?;
            let ctx = ffmpeg::codec::context::Context::from_parameters(stream.parameters())
                .context("codec context")?;
            (stream.index(), ctx)
        };
        let mut decoder = context.decoder().video().context("video decoder")?;

        let (thumb_w, thumb_h) = fit_within(decoder.width(), decoder.height(), max_w, max_h);
        let mut scaler = SwsContext::get(
            decoder.format(), decoder.width(), decoder.height(),
            Pixel::RGBA, thumb_w, thumb_h, Flags::BILINEAR,
        ).context("thumbnail scaler")?;

        let mut decoded = Video::empty();
        for (stream, packet) in ictx.packets().flatten() {
            if stream.index() != stream_idx { continue; }
            if decoder.send_packet(&packet).is_err() { continue; }
            if decoder.receive_frame(&mut decoded).is_ok() {
                return to_thumbnail(&mut scaler, &decoded, thumb_w, thumb_h, path);
            }
        }

        // Short files can hold their only frame inside the decoder.
        decoder.send_eof().ok();
        if decoder.receive_frame(&mut decoded).is_ok() {
            return to_thumbnail(&mut scaler, &decoded, thumb_w, thumb_h, path);
        }
        Err(anyhow!("no frame decoded"))
    }
}

fn to_thumbnail(
    scaler:  &mut SwsContext,
    decoded: &Video,
    width:   u32,
    height:  u32,
    path:    &Path,
) -> Result<Thumbnail> {
    let mut rgba_frame = Video::empty();
    scaler.run(decoded, &mut rgba_frame).context("scale")?;

    // Destripe: copy only visible pixels, not stride padding
    let stride    = rgba_frame.stride(0);
    let raw       = rgba_frame.data(0);
    let row_bytes = width as usize * 4;
    let rgba: Vec<u8> = (0..height as usize)
        .flat_map(|row| &raw[row * stride..row * stride + row_bytes])
        .copied()
        .collect();

    debug!("[thumb] {width}x{height} ← {}", path.display());
    Ok(Thumbnail { width, height, rgba })
}
