pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use layouts::email::email_layout;
pub use pages::moth_email::{render_email, RenderedEmail};
