//! FFmpeg-backed video decoder.
//!
//! Wraps an opened libavcodec video decoder together with the single frame
//! slot it decodes into. Each successful receive overwrites the slot and
//! advances the frame counter, mirroring libavcodec's own `frame_num`.

use ffmpeg_next::{
    Error as FfmpegError, Packet, decoder::Video as FfmpegVideoDecoder,
    frame::Video as VideoFrame, picture,
};

use crate::{
    backend::{DecodedFrame, FrameDecoder, Plane, Received},
    error::DumpError,
};

/// Decoder state bound to one video stream.
pub struct VideoDecoder {
    decoder: FfmpegVideoDecoder,
    frame: VideoFrame,
    frames_decoded: u64,
}

impl VideoDecoder {
    pub(crate) fn new(decoder: FfmpegVideoDecoder) -> Self {
        Self {
            decoder,
            frame: VideoFrame::empty(),
            frames_decoded: 0,
        }
    }
}

/// Single-character picture type, as `av_get_picture_type_char` prints it.
pub(crate) fn picture_type_char(kind: picture::Type) -> char {
    match kind {
        picture::Type::I => 'I',
        picture::Type::P => 'P',
        picture::Type::B => 'B',
        picture::Type::S => 'S',
        picture::Type::SI => 'i',
        picture::Type::SP => 'p',
        picture::Type::BI => 'b',
        picture::Type::None => '?',
    }
}

/// Translate a failed `avcodec_receive_frame` into a receive outcome.
///
/// `EAGAIN` and end-of-file are normal states of the send/receive protocol;
/// everything else is a decode error.
fn pending_outcome(error: FfmpegError) -> Result<Received<'static>, DumpError> {
    match error {
        FfmpegError::Other { errno } if errno == ffmpeg_sys_next::EAGAIN => {
            Ok(Received::NeedMoreInput)
        }
        FfmpegError::Eof => Ok(Received::EndOfStream),
        error => Err(DumpError::Decode(format!(
            "error while receiving a frame from the decoder: {error}"
        ))),
    }
}

impl FrameDecoder for VideoDecoder {
    type Packet = Packet;

    fn submit(&mut self, packet: &Packet) -> Result<(), DumpError> {
        self.decoder.send_packet(packet).map_err(|error| {
            DumpError::Decode(format!("error while sending a packet to the decoder: {error}"))
        })
    }

    fn receive_frame(&mut self) -> Result<Received<'_>, DumpError> {
        if let Err(error) = self.decoder.receive_frame(&mut self.frame) {
            return pending_outcome(error);
        }

        self.frames_decoded += 1;

        let frame = &self.frame;
        let planes = (0..frame.planes())
            .map(|index| Plane {
                data: frame.data(index),
                stride: frame.stride(index),
            })
            .collect();

        Ok(Received::Frame(DecodedFrame {
            number: self.frames_decoded,
            width: frame.width(),
            height: frame.height(),
            planes,
            pts: frame.pts(),
            picture_type: picture_type_char(frame.kind()),
            is_keyframe: frame.is_key(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use ffmpeg_next::codec::{Id, context::Context as CodecContext};

    use super::*;

    /// Open a libavcodec decoder with no stream parameters, or `None` when
    /// the local FFmpeg build lacks it.
    fn open_decoder(id: Id) -> Option<VideoDecoder> {
        ffmpeg_next::init().ok()?;
        let codec = ffmpeg_next::decoder::find(id)?;
        let decoder = CodecContext::new_with_codec(codec)
            .decoder()
            .open_as(codec)
            .ok()?
            .video()
            .ok()?;
        Some(VideoDecoder::new(decoder))
    }

    #[test]
    fn picture_types_print_like_libavutil() {
        let printed: String = [
            picture::Type::I,
            picture::Type::P,
            picture::Type::B,
            picture::Type::S,
            picture::Type::SI,
            picture::Type::SP,
            picture::Type::BI,
            picture::Type::None,
        ]
        .into_iter()
        .map(picture_type_char)
        .collect();

        assert_eq!(printed, "IPBSipb?");
    }

    #[test]
    fn eagain_and_eof_are_not_errors() {
        let again = FfmpegError::Other {
            errno: ffmpeg_sys_next::EAGAIN,
        };
        assert!(matches!(pending_outcome(again), Ok(Received::NeedMoreInput)));
        assert!(matches!(
            pending_outcome(FfmpegError::Eof),
            Ok(Received::EndOfStream)
        ));
    }

    #[test]
    fn other_receive_failures_are_decode_errors() {
        let error = pending_outcome(FfmpegError::InvalidData).unwrap_err();

        assert!(matches!(error, DumpError::Decode(_)));
        assert!(error.to_string().contains("receiving a frame"));
    }

    #[test]
    fn fresh_decoder_needs_more_input() {
        let Some(mut decoder) = open_decoder(Id::H264) else {
            return;
        };

        assert!(matches!(
            decoder.receive_frame().unwrap(),
            Received::NeedMoreInput
        ));
        assert_eq!(decoder.frames_decoded, 0);
    }

    #[test]
    fn drained_decoder_reports_end_of_stream() {
        let Some(mut decoder) = open_decoder(Id::H264) else {
            return;
        };
        decoder.decoder.send_eof().unwrap();

        assert!(matches!(
            decoder.receive_frame().unwrap(),
            Received::EndOfStream
        ));
    }
}
