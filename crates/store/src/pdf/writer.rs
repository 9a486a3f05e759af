//! PDF Writer
//!
//! File structure (header, body, xref, trailer), object numbering, and
//! optional Flate compression of content streams.

use super::content::ContentStream;
use super::document::{create_catalog, create_pages, PdfVersion};
use super::fonts::create_standard_font_dict;
use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use super::options::PdfExportOptions;
use super::renderer::PdfRenderer;
use chrono::{DateTime, Utc};
use render_model::{PageRender, RenderError};
use std::io::{self, Write};
use thiserror::Error;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Invalid document structure
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("Compression error: {0}")]
    Compression(String),
    /// Deck could not be laid out
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Byte offset of a written object
#[derive(Debug, Clone, Copy)]
struct ObjectEntry {
    obj_num: u32,
    offset: u64,
}

/// PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    /// Current byte position
    position: u64,
    objects: Vec<ObjectEntry>,
    next_obj_num: u32,
    version: PdfVersion,
    /// Whether to compress streams
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W, version: PdfVersion) -> Self {
        Self {
            writer,
            position: 0,
            objects: Vec::new(),
            next_obj_num: 1,
            version,
            compress: true,
        }
    }

    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Write bytes and update position
    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Allocate a new object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    /// Write the version line and the binary marker comment
    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{}\n", self.version.as_str()))?;
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> Result<()> {
        let offset = self.position;

        self.write_str(&format!("{} 0 obj\n", obj_num))?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(object)?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\nendobj\n")?;

        self.objects.push(ObjectEntry { obj_num, offset });
        Ok(())
    }

    /// Write a stream object, deflating it first when compression is on
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.compressed {
            stream = compress_stream(stream)?;
        }
        stream.dict.insert("Length", stream.data.len() as i64);
        self.write_object(obj_num, &PdfObject::Stream(stream))
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: Option<u32>) -> Result<()> {
        let xref_offset = self.position;

        self.objects.sort_by_key(|e| e.obj_num);
        let entries = self.objects.clone();
        let size = self.next_obj_num;

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", size))?;
        self.write_str("0000000000 65535 f \n")?;

        let mut expected_num = 1u32;
        for entry in entries {
            // Allocated but unwritten numbers are listed as free
            while expected_num < entry.obj_num {
                self.write_str("0000000000 65535 f \n")?;
                expected_num += 1;
            }
            self.write_str(&format!("{:010} 00000 n \n", entry.offset))?;
            expected_num = entry.obj_num + 1;
        }
        while expected_num < size {
            self.write_str("0000000000 65535 f \n")?;
            expected_num += 1;
        }

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", size as i64);
        trailer.insert("Root", PdfObject::reference(catalog_ref));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::reference(info));
        }

        self.write_str("trailer\n")?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&trailer.into())?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\n")?;

        self.write_str("startxref\n")?;
        self.write_str(&format!("{}\n", xref_offset))?;
        self.write_str("%%EOF\n")?;

        Ok(())
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Deflate a stream and mark it with the FlateDecode filter
fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&stream.data)
        .map_err(|e| PdfError::Compression(e.to_string()))?;
    stream.data = encoder
        .finish()
        .map_err(|e| PdfError::Compression(e.to_string()))?;
    stream.compressed = true;
    stream.dict.insert("Filter", PdfObject::name("FlateDecode"));

    Ok(stream)
}

/// Writes composed pages as a complete PDF document
pub struct PdfDocumentWriter {
    options: PdfExportOptions,
    creation_date: Option<DateTime<Utc>>,
}

impl PdfDocumentWriter {
    /// Create a writer stamping documents with the current time
    pub fn new(options: PdfExportOptions) -> Self {
        Self {
            options,
            creation_date: Some(Utc::now()),
        }
    }

    /// Override the creation date, or omit it with `None`
    pub fn with_creation_date(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.creation_date = date;
        self
    }

    /// Write a complete PDF document.
    ///
    /// An empty page list produces a valid document with an empty page tree.
    pub fn write<W: Write>(&self, pages: &[PageRender], writer: W) -> Result<()> {
        let mut pdf = PdfWriter::new(writer, self.options.pdf_version.into());
        pdf.set_compression(self.options.compress);
        pdf.write_header()?;

        let catalog_ref = pdf.allocate_object();
        let pages_ref = pdf.allocate_object();
        let info_ref = pdf.allocate_object();

        // Render first so the font resources are known before pages are written
        let mut renderer = PdfRenderer::new();
        let contents: Vec<(&PageRender, ContentStream)> = pages
            .iter()
            .map(|page| (page, renderer.render_page(page)))
            .collect();

        for (page, content) in &contents {
            if content.depth() != 0 {
                return Err(PdfError::InvalidDocument(format!(
                    "Page {} leaves {} graphics states open",
                    page.page_index,
                    content.depth()
                )));
            }
        }
        let content_bytes: usize = contents.iter().map(|(_, c)| c.as_bytes().len()).sum();

        let font_refs: Vec<_> = renderer
            .font_manager()
            .fonts()
            .into_iter()
            .map(|font| (font.name.clone(), font.standard_font, pdf.allocate_object()))
            .collect();

        let page_refs: Vec<(u32, u32)> = contents
            .iter()
            .map(|_| (pdf.allocate_object(), pdf.allocate_object()))
            .collect();

        pdf.write_object(catalog_ref, &create_catalog(pages_ref).into())?;

        let kids: Vec<u32> = page_refs.iter().map(|(page_ref, _)| *page_ref).collect();
        pdf.write_object(pages_ref, &create_pages(&kids).into())?;

        let mut info = self.options.document_info();
        info.creation_date = self.creation_date;
        pdf.write_object(info_ref, &info.to_dictionary().into())?;

        for (_, standard_font, font_ref) in &font_refs {
            pdf.write_object(*font_ref, &create_standard_font_dict(*standard_font).into())?;
        }

        let mut resources = PdfDictionary::new();
        if !font_refs.is_empty() {
            let mut font_dict = PdfDictionary::new();
            for (name, _, font_ref) in &font_refs {
                font_dict.insert(name.clone(), PdfObject::reference(*font_ref));
            }
            resources.insert("Font", font_dict);
        }
        resources.insert(
            "ProcSet",
            PdfObject::Array(vec![PdfObject::name("PDF"), PdfObject::name("Text")]),
        );

        for ((page, content), (page_ref, content_ref)) in contents.into_iter().zip(page_refs) {
            pdf.write_stream_object(content_ref, PdfStream::new(content.into_bytes()))?;

            let mut page_dict = PdfDictionary::typed("Page");
            page_dict.insert("Parent", PdfObject::reference(pages_ref));
            page_dict.insert("MediaBox", PdfObject::rect(page.width, page.height));
            page_dict.insert("Contents", PdfObject::reference(content_ref));
            page_dict.insert("Resources", resources.clone());
            pdf.write_object(page_ref, &page_dict.into())?;
        }

        pdf.write_xref_and_trailer(catalog_ref, Some(info_ref))?;
        pdf.finish()?;

        tracing::debug!(
            pages = pages.len(),
            fonts = font_refs.len(),
            content_bytes,
            compressed = self.options.compress,
            "wrote PDF document"
        );
        Ok(())
    }

    /// Write a complete PDF document to bytes
    pub fn write_to_bytes(&self, pages: &[PageRender]) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(pages, &mut buffer)?;
        Ok(buffer)
    }
}
