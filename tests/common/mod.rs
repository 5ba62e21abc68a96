#![allow(dead_code)]

use std::io::Cursor;

/// Route `log` output (page breaks, dropped links) through the test harness.
/// Run with `RUST_LOG=debug` to see it.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Gradient test image encoded as baseline JPEG.
pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Jpeg)
        .expect("encode jpeg fixture");
    buf.into_inner()
}

pub fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

/// The parts of a PDF file reachable by following `startxref` from the end,
/// the way a reader opens it.
pub struct ScannedPdf {
    pub bytes: Vec<u8>,
    pub xref_start: usize,
    pub offsets: Vec<usize>, // index = object number, 0 is the free head
    pub size: usize,
    pub root: usize,
}

impl ScannedPdf {
    pub fn scan(bytes: &[u8]) -> ScannedPdf {
        init_logging();
        let sx = rfind(bytes, b"startxref\n").expect("startxref keyword");
        let tail = String::from_utf8_lossy(&bytes[sx + b"startxref\n".len()..]);
        let xref_start: usize = tail.lines().next().unwrap().trim().parse().expect("xref offset");
        assert!(
            bytes[xref_start..].starts_with(b"xref\n"),
            "startxref does not point at the xref keyword"
        );

        let section = String::from_utf8_lossy(&bytes[xref_start..sx]).into_owned();
        let mut lines = section.split_inclusive('\n');
        assert_eq!(lines.next(), Some("xref\n"));
        let subsection = lines.next().unwrap();
        let count: usize = subsection.trim().split(' ').nth(1).unwrap().parse().unwrap();
        assert!(subsection.starts_with("0 "), "single subsection starting at 0");

        let mut offsets = Vec::with_capacity(count);
        for i in 0..count {
            let record = lines.next().expect("xref record");
            assert_eq!(record.len(), 20, "record {i} is not 20 bytes: {record:?}");
            if i == 0 {
                assert_eq!(record, "0000000000 65535 f \n");
            } else {
                assert!(record.ends_with(" 00000 n \n"), "record {i}: {record:?}");
            }
            offsets.push(record[..10].parse().unwrap());
        }

        let trailer: String = lines.collect();
        assert!(trailer.starts_with("trailer\n"));
        let size = int_after(&trailer, "/Size ");
        let root = int_after(&trailer, "/Root ");

        ScannedPdf {
            bytes: bytes.to_vec(),
            xref_start,
            offsets,
            size,
            root,
        }
    }

    pub fn object_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Dictionary text of object `n`, up to the stream keyword or `endobj`,
    /// with every whitespace run collapsed to one space.
    pub fn dict(&self, n: usize) -> String {
        let start = self.offsets[n];
        let header = format!("{n} 0 obj\n");
        assert!(
            self.bytes[start..].starts_with(header.as_bytes()),
            "xref offset for object {n} does not point at its header"
        );
        let body = start + header.len();
        let end = [b"\nstream\n".as_slice(), b"\nendobj".as_slice()]
            .iter()
            .filter_map(|kw| find(&self.bytes, kw, body))
            .min()
            .unwrap();
        String::from_utf8_lossy(&self.bytes[body..end])
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn stream(&self, n: usize) -> &[u8] {
        let dict = self.dict(n);
        let len = int_after(&dict, "/Length ");
        let start = find(&self.bytes, b"\nstream\n", self.offsets[n]).unwrap() + b"\nstream\n".len();
        &self.bytes[start..start + len]
    }
}

pub fn int_after(text: &str, key: &str) -> usize {
    let at = text.find(key).unwrap_or_else(|| panic!("{key} not found in {text}")) + key.len();
    text[at..]
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap()
        .parse()
        .unwrap()
}

/// Object numbers in the `[a 0 R b 0 R ...]` array following `key`.
pub fn ref_array(text: &str, key: &str) -> Vec<usize> {
    let Some(at) = text.find(key) else {
        return Vec::new();
    };
    let open = at + text[at..].find('[').unwrap();
    let close = open + text[open..].find(']').unwrap();
    text[open + 1..close]
        .split(" 0 R")
        .filter_map(|s| s.trim().parse().ok())
        .collect()
}

pub fn floats_in_array(text: &str, key: &str) -> Vec<f32> {
    let at = text.find(key).unwrap();
    let open = at + text[at..].find('[').unwrap();
    let close = open + text[open..].find(']').unwrap();
    text[open + 1..close]
        .split_whitespace()
        .map(|s| s.parse().unwrap())
        .collect()
}

/// The literal string following `key`, with PDF escapes resolved.
pub fn literal_after(text: &str, key: &str) -> String {
    let at = text.find(key).unwrap() + key.len();
    let mut chars = text[at..].trim_start().chars();
    assert_eq!(chars.next(), Some('('));
    let mut out = String::new();
    let mut depth = 0;
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next().unwrap() {
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                other => out.push(other),
            },
            '(' => {
                depth += 1;
                out.push(c);
            }
            ')' if depth == 0 => return out,
            ')' => {
                depth -= 1;
                out.push(c);
            }
            c => out.push(c),
        }
    }
    panic!("unterminated literal string after {key}");
}
