pub mod upload_pdf;
