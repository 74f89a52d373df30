pub mod conge_service;
pub mod employee_service;
pub mod export_service;
pub mod facture_service;
pub mod journal_service;
pub mod paie_service;
pub mod pdf_service;
pub mod permission_service;
pub mod reference_service;
