mod page;
mod pdf;

pub use page::Page;
pub use pdf::PdfName;
