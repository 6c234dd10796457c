pub mod application;
pub mod kustomization;
pub mod layout;
pub mod report;

pub use crate::domain::DomainError;
pub use application::Application;
pub use kustomization::Kustomization;
pub use layout::NamespaceFolders;
