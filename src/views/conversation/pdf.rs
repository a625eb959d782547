use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfName {
    pub status: &'static str,
    pub pdf_name: Option<String>,
}

impl PdfName {
    pub fn new(pdf_name: Option<String>) -> Self {
        Self {
            status: "Ok",
            pdf_name,
        }
    }
}
