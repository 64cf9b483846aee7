use encoding_rs::{GBK, UTF_16LE, UTF_8};
use std::borrow::Cow;
use std::str::FromStr;

/// How a received line is turned into output bytes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TextEncoding {
    /// Bytes pass through untouched.
    #[default]
    Raw,
    /// UTF-8 passes through; anything else is charset-detected and
    /// transcoded to UTF-8.
    Auto,
    Utf8,
    Utf16,
    Ascii,
    Gbk,
    Gb2312,
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "raw" => Ok(Self::Raw),
            "auto" => Ok(Self::Auto),
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-16" | "utf16" | "utf-16le" => Ok(Self::Utf16),
            "ascii" => Ok(Self::Ascii),
            "gbk" => Ok(Self::Gbk),
            "gb2312" => Ok(Self::Gb2312),
            _ => Err(format!("unknown encoding `{s}`")),
        }
    }
}

impl TextEncoding {
    /// Output bytes for `bytes`. `Raw`, and `Auto` on valid UTF-8, borrow
    /// the input unchanged; the other modes produce UTF-8 with undecodable
    /// input replaced.
    pub fn render<'a>(&self, bytes: &'a [u8]) -> Cow<'a, [u8]> {
        match self {
            Self::Raw => Cow::Borrowed(bytes),
            Self::Auto if std::str::from_utf8(bytes).is_ok() => Cow::Borrowed(bytes),
            Self::Auto => {
                let mut detector = chardetng::EncodingDetector::new();
                detector.feed(bytes, true);
                transcode(detector.guess(None, true).decode(bytes).0)
            }
            Self::Utf8 => transcode(UTF_8.decode(bytes).0),
            Self::Utf16 => transcode(UTF_16LE.decode(bytes).0),
            Self::Ascii => Cow::Owned(
                bytes
                    .iter()
                    .map(|&b| if b.is_ascii() { b } else { b'?' })
                    .collect(),
            ),
            Self::Gbk | Self::Gb2312 => transcode(GBK.decode(bytes).0),
        }
    }
}

fn transcode(text: Cow<'_, str>) -> Cow<'static, [u8]> {
    Cow::Owned(text.into_owned().into_bytes())
}
