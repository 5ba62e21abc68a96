use std::io::Write;

use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::writers::Catalog;
use pdf_writer::{Chunk, Filter, Name, Rect, Ref, Str};

use crate::error::{Error, Result};

const HEADER: &[u8] = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";

/// Body of one indirect object, kept as data until the file is written.
pub(super) enum PdfObject<'a> {
    Catalog {
        pages: Ref,
    },
    PageTree {
        kids: Vec<Ref>,
    },
    /// JPEG bytes embedded untouched behind a DCTDecode filter.
    Image {
        width: u32,
        height: u32,
        jpeg: &'a [u8],
    },
    Content {
        ops: Vec<u8>,
    },
    Link {
        rect: Rect,
        uri: String,
    },
    Page {
        parent: Ref,
        media_box: Rect,
        image_name: String,
        image: Ref,
        contents: Ref,
        annots: Vec<Ref>,
    },
}

/// Arena of indirect objects. Numbers are handed out first and bodies filled
/// in later, so an object can be referenced before it exists.
pub(super) struct ObjectTable<'a> {
    slots: Vec<Option<PdfObject<'a>>>,
}

impl<'a> ObjectTable<'a> {
    pub(super) fn new() -> Self {
        ObjectTable { slots: Vec::new() }
    }

    pub(super) fn alloc(&mut self) -> Ref {
        self.slots.push(None);
        Ref::new(self.slots.len() as i32)
    }

    pub(super) fn fill(&mut self, id: Ref, object: PdfObject<'a>) -> Result<()> {
        let slot = usize::try_from(id.get() - 1)
            .ok()
            .and_then(|index| self.slots.get_mut(index))
            .ok_or_else(|| Error::Pdf(format!("object {} was never allocated", id.get())))?;
        if slot.is_some() {
            return Err(Error::Pdf(format!("object {} filled twice", id.get())));
        }
        *slot = Some(object);
        Ok(())
    }

    pub(super) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Write header, objects, xref table and trailer in one forward pass.
    pub(super) fn serialize(&self, root: Ref) -> Result<Vec<u8>> {
        let body_size: usize = self
            .slots
            .iter()
            .flatten()
            .map(|obj| match obj {
                PdfObject::Image { jpeg, .. } => jpeg.len() + 256,
                _ => 256,
            })
            .sum();
        let mut out: Vec<u8> = Vec::with_capacity(HEADER.len() + body_size + 20 * (self.len() + 1) + 128);
        out.extend_from_slice(HEADER);

        let mut offsets: Vec<usize> = Vec::with_capacity(self.len());
        for (index, slot) in self.slots.iter().enumerate() {
            let id = Ref::new(index as i32 + 1);
            let Some(object) = slot else {
                return Err(Error::Pdf(format!("object {} was allocated but never filled", id.get())));
            };
            let chunk = write_object(id, object);
            let bytes = chunk.as_bytes();
            // The xref offset must land on the object number itself.
            if !bytes.starts_with(format!("{} 0 obj", id.get()).as_bytes()) {
                return Err(Error::Pdf(format!("object {} does not start with its header", id.get())));
            }
            offsets.push(out.len());
            out.extend_from_slice(bytes);
        }

        let xref_start = out.len();
        write!(out, "xref\n0 {}\n", offsets.len() + 1)?;
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            writeln!(out, "{offset:010} 00000 n ")?;
        }

        writeln!(
            out,
            "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{xref_start}\n%%EOF",
            offsets.len() + 1,
            root.get()
        )?;

        Ok(out)
    }
}

/// Serialize a single indirect object into its own chunk.
fn write_object(id: Ref, object: &PdfObject) -> Chunk {
    let mut chunk = Chunk::new();
    match object {
        PdfObject::Catalog { pages } => {
            chunk.indirect(id).start::<Catalog>().pages(*pages);
        }
        PdfObject::PageTree { kids } => {
            chunk.pages(id).kids(kids.iter().copied()).count(kids.len() as i32);
        }
        PdfObject::Image {
            width,
            height,
            jpeg,
        } => {
            let mut xobj = chunk.image_xobject(id, jpeg);
            xobj.filter(Filter::DctDecode);
            xobj.width(*width as i32);
            xobj.height(*height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
        }
        PdfObject::Content { ops } => {
            chunk.stream(id, ops);
        }
        PdfObject::Link { rect, uri } => {
            let mut annot = chunk.annotation(id);
            annot
                .subtype(AnnotationType::Link)
                .rect(*rect)
                .border(0.0, 0.0, 0.0, None);
            annot
                .action()
                .action_type(ActionType::Uri)
                .uri(Str(uri.as_bytes()));
        }
        PdfObject::Page {
            parent,
            media_box,
            image_name,
            image,
            contents,
            annots,
        } => {
            let mut page = chunk.page(id);
            page.media_box(*media_box)
                .parent(*parent)
                .contents(*contents);
            if !annots.is_empty() {
                page.annotations(annots.iter().copied());
            }
            page.resources()
                .x_objects()
                .pair(Name(image_name.as_bytes()), *image);
        }
    }
    chunk
}
