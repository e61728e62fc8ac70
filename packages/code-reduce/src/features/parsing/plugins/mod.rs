//! Language plugins
//!
//! Each language has its own plugin implementing the LanguagePlugin trait.
//!
//! Multi-Language Support:
//! - Python, Java, TypeScript/JavaScript, Kotlin, Rust, Go

pub mod go;
pub mod java;
pub mod kotlin;
pub mod python;
pub mod rust_lang;
pub mod typescript;

pub use go::GoPlugin;
pub use java::JavaPlugin;
pub use kotlin::KotlinPlugin;
pub use python::PythonPlugin;
pub use rust_lang::RustPlugin;
pub use typescript::TypeScriptPlugin;

use crate::features::parsing::ports::LanguageRegistry;

/// Create a registry with all language plugins registered
pub fn create_full_registry() -> LanguageRegistry {
    let mut registry = LanguageRegistry::new();
    registry.register(Box::new(PythonPlugin::new()));
    registry.register(Box::new(JavaPlugin::new()));
    registry.register(Box::new(TypeScriptPlugin::typescript()));
    registry.register(Box::new(TypeScriptPlugin::tsx()));
    registry.register(Box::new(TypeScriptPlugin::javascript()));
    registry.register(Box::new(KotlinPlugin::new()));
    registry.register(Box::new(RustPlugin::new()));
    registry.register(Box::new(GoPlugin::new()));
    registry
}
