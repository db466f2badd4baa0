pub mod date;
pub mod document_type;
pub mod gender;
pub mod verification_response;
