//! Document intake placeholder.
//!
//! Submissions are acknowledged with a fixed record; nothing is parsed or
//! stored. Callers can tell by the `placeholder` flag.

use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExtractedField {
    pub name: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProcessedDocument {
    pub id: &'static str,
    pub document_type: &'static str,
    pub status: &'static str,
    pub placeholder: bool,
    pub extracted_fields: Vec<ExtractedField>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentIntake;

impl DocumentIntake {
    pub fn process(&self) -> ProcessedDocument {
        warn!("Document intake is a placeholder: returning mock processed document");
        ProcessedDocument {
            id: "doc-mock-001",
            document_type: "bank_statement",
            status: "processed",
            placeholder: true,
            extracted_fields: vec![
                ExtractedField {
                    name: "issuer",
                    value: "Banco Exemplo S.A.",
                },
                ExtractedField {
                    name: "amount",
                    value: "150000.00",
                },
                ExtractedField {
                    name: "due_date",
                    value: "2026-12-15",
                },
            ],
        }
    }
}
