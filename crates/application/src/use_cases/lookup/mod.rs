pub mod get_registrar_whois;
pub mod get_registry_whois;
pub mod get_whois;

pub use get_registrar_whois::GetRegistrarWhoisUseCase;
pub use get_registry_whois::GetRegistryWhoisUseCase;
pub use get_whois::GetWhoisUseCase;
