mod versor;

pub use versor::Versor;
